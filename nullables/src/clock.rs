//! Nullable clock: deterministic block height and time for testing.

use oracle_types::{BlockHeader, Timestamp};
use std::cell::Cell;

/// A deterministic block clock.
///
/// Height and time only advance when you tell them to.
pub struct NullClock {
    height: Cell<u64>,
    millis: Cell<u64>,
    block_time_secs: u64,
}

impl NullClock {
    /// Starts at `height` and `initial_secs`; each block advances time by
    /// `block_time_secs`.
    pub fn new(height: u64, initial_secs: u64, block_time_secs: u64) -> Self {
        Self {
            height: Cell::new(height),
            millis: Cell::new(initial_secs * 1000),
            block_time_secs,
        }
    }

    /// The header of the current block.
    pub fn header(&self) -> BlockHeader {
        BlockHeader::new(self.height.get(), self.now())
    }

    pub fn height(&self) -> u64 {
        self.height.get()
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.millis.get())
    }

    /// Move to the next block.
    pub fn advance_block(&self) -> BlockHeader {
        self.advance_blocks(1)
    }

    pub fn advance_blocks(&self, blocks: u64) -> BlockHeader {
        self.height.set(self.height.get() + blocks);
        self.advance_secs(blocks * self.block_time_secs);
        self.header()
    }

    /// Advance time without producing a block.
    pub fn advance_secs(&self, secs: u64) {
        self.millis.set(self.millis.get() + secs * 1000);
    }

    pub fn set_height(&self, height: u64) {
        self.height.set(height);
    }

    pub fn set_secs(&self, secs: u64) {
        self.millis.set(secs * 1000);
    }
}

impl Default for NullClock {
    fn default() -> Self {
        Self::new(1, 1_000_000, 6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_block_moves_height_and_time() {
        let clock = NullClock::new(10, 100, 5);
        let header = clock.advance_block();
        assert_eq!(header.height, 11);
        assert_eq!(header.time.as_secs(), 105);

        clock.advance_blocks(3);
        assert_eq!(clock.height(), 14);
        assert_eq!(clock.now().as_secs(), 120);
    }

    #[test]
    fn time_moves_without_blocks() {
        let clock = NullClock::new(1, 0, 6);
        clock.advance_secs(30);
        assert_eq!(clock.height(), 1);
        assert_eq!(clock.now().as_secs(), 30);
        clock.set_secs(7);
        clock.set_height(99);
        assert_eq!(clock.header(), BlockHeader::new(99, Timestamp::from_secs(7)));
    }
}
