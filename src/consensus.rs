//! Round outcome calculation.
//!
//! Pure functions only; the lifecycle engine gates when a result becomes
//! authoritative.

use crate::types::Player;
use serde::Serialize;

/// Outcome of a revealed round.
#[derive(Debug, Clone, Serialize)]
pub struct RoundResult {
    pub average: f64,
    pub two_thirds: f64,
    pub winners: Vec<Player>,
}

/// Compute the group average, the two-thirds target, and the winner set.
///
/// Callers are expected to pass players that have all submitted (the reveal
/// gate enforces this); players without a number are skipped rather than
/// guessed at. Returns `None` when no submitted numbers exist.
///
/// Winners are every player at the minimal distance from the target;
/// equidistant numbers are equally valid winners, so no tie-break is applied.
/// Distances are compared at full f64 precision, never on display-rounded
/// values.
pub fn compute_result(players: &[Player]) -> Option<RoundResult> {
    let submitted: Vec<&Player> = players.iter().filter(|p| p.has_submitted()).collect();
    if submitted.is_empty() {
        return None;
    }

    let sum: f64 = submitted
        .iter()
        .filter_map(|p| p.number)
        .map(f64::from)
        .sum();
    let average = sum / submitted.len() as f64;
    let two_thirds = average * 2.0 / 3.0;

    let distance = |n: u8| (f64::from(n) - two_thirds).abs();

    let min_distance = submitted
        .iter()
        .filter_map(|p| p.number)
        .map(distance)
        .fold(f64::INFINITY, f64::min);

    let winners = submitted
        .iter()
        .filter(|p| p.number.is_some_and(|n| distance(n) == min_distance))
        .map(|p| (**p).clone())
        .collect();

    Some(RoundResult {
        average,
        two_thirds,
        winners,
    })
}
