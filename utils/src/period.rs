//! Block-height arithmetic for voting periods and slash windows.

/// Whether `height` is the last block of a period of `period` blocks.
///
/// Periods are aligned so that blocks `period - 1`, `2 * period - 1`, ... close
/// a period. A zero period never closes.
pub fn is_period_last_block(height: u64, period: u64) -> bool {
    if period == 0 {
        return false;
    }
    height % period == period - 1
}

/// How many whole voting periods of the current slash window have elapsed.
pub fn window_progress(height: u64, slash_window: u64, vote_period: u64) -> u64 {
    if slash_window == 0 || vote_period == 0 {
        return 0;
    }
    (height % slash_window) / vote_period
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_block_of_period() {
        assert!(is_period_last_block(1, 2));
        assert!(!is_period_last_block(2, 2));
        assert!(is_period_last_block(3, 2));
        assert!(is_period_last_block(0, 1));
        assert!(is_period_last_block(9, 10));
        assert!(!is_period_last_block(10, 10));
    }

    #[test]
    fn zero_period_never_closes() {
        assert!(!is_period_last_block(0, 0));
        assert!(!is_period_last_block(99, 0));
    }

    #[test]
    fn window_progress_counts_periods() {
        assert_eq!(window_progress(0, 100, 10), 0);
        assert_eq!(window_progress(25, 100, 10), 2);
        assert_eq!(window_progress(125, 100, 10), 2);
        assert_eq!(window_progress(99, 100, 10), 9);
        assert_eq!(window_progress(5, 0, 10), 0);
    }
}
