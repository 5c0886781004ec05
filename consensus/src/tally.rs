//! Tallying a ballot against the reward band.

use oracle_types::Dec;

use crate::ballot::Ballot;
use crate::claim::ClaimMap;
use crate::TallyError;

/// Half-width of the reward band around `median`.
pub fn reward_spread(median: Dec, reward_band: Dec) -> Result<Dec, TallyError> {
    median
        .checked_mul(reward_band)
        .and_then(|width| width.quo_int(2))
        .ok_or_else(|| {
            TallyError::Arithmetic(format!("reward band {reward_band} around {median} overflows"))
        })
}

/// Inclusive `(low, high)` bounds of the reward band around `median`.
pub fn reward_bounds(median: Dec, reward_band: Dec) -> Result<(Dec, Dec), TallyError> {
    let spread = reward_spread(median, reward_band)?;
    let overflow = || TallyError::Arithmetic(format!("reward band {median} ± {spread} overflows"));
    let low = median.checked_sub(spread).ok_or_else(overflow)?;
    let high = median.checked_add(spread).ok_or_else(overflow)?;
    Ok((low, high))
}

/// Compute the weighted median of `ballot` and record results on `claims`.
///
/// Every voter in the ballot is marked as having voted. Voters with power
/// whose rate lies within `median ± median * reward_band / 2` win: their
/// claim's `win_count` and `weight` grow. An empty ballot returns zero and
/// touches nothing; callers treat zero as "no rate".
///
/// If the band cannot be represented the ballot has no winners and the
/// overflow is returned; voters stay marked as having voted.
pub fn tally(ballot: &Ballot, reward_band: Dec, claims: &mut ClaimMap) -> Result<Dec, TallyError> {
    if ballot.is_empty() {
        return Ok(Dec::ZERO);
    }

    for vote in ballot.iter() {
        if let Some(claim) = claims.get_mut(&vote.voter) {
            claim.did_vote = true;
        }
    }

    let median = ballot.weighted_median();
    let (low, high) = reward_bounds(median, reward_band)?;

    for vote in ballot.iter() {
        if vote.power == 0 || vote.exchange_rate < low || vote.exchange_rate > high {
            continue;
        }
        if let Some(claim) = claims.get_mut(&vote.voter) {
            claim.weight = claim.weight.saturating_add(vote.power);
            claim.win_count += 1;
        }
    }

    Ok(median)
}
