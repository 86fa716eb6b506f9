//! Best-match teammate suggestions.
//!
//! Ranks candidates by pairwise compatibility with a target student, takes
//! the top `max_size - 1`, and accepts the group only if the whole team
//! clears the acceptance threshold.

use crate::model::{Student, TeamScore};
use crate::scoring::team_compatibility;

/// Minimum whole-team `total` for a suggestion to be returned.
pub const DEFAULT_ACCEPTANCE_THRESHOLD: f64 = 0.5;

/// An accepted suggestion: the chosen teammates and the full team's score.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamMatch<'a> {
    pub teammates: Vec<&'a Student>,
    pub score: TeamScore,
}

#[derive(Debug, Clone)]
pub struct BestMatchFinder {
    acceptance_threshold: f64,
}

impl Default for BestMatchFinder {
    fn default() -> Self {
        Self::new(DEFAULT_ACCEPTANCE_THRESHOLD)
    }
}

impl BestMatchFinder {
    pub fn new(acceptance_threshold: f64) -> Self {
        Self {
            acceptance_threshold,
        }
    }

    pub fn acceptance_threshold(&self) -> f64 {
        self.acceptance_threshold
    }

    /// Pick up to `max_size - 1` teammates for `target` from `candidates`.
    ///
    /// Returns `None` when there are no candidates, no room beside the
    /// target, or the resulting team scores below the threshold. The target
    /// itself is never part of the result.
    pub fn find_scored<'a>(
        &self,
        target: &Student,
        candidates: &'a [Student],
        max_size: usize,
    ) -> Option<TeamMatch<'a>> {
        let slots = max_size.saturating_sub(1);
        if candidates.is_empty() || slots == 0 {
            return None;
        }

        let mut ranked: Vec<(&'a Student, f64)> = candidates
            .iter()
            .map(|c| (c, team_compatibility(&[target.clone(), c.clone()]).total))
            .collect();
        // Stable: equal scores keep candidate order.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let teammates: Vec<&'a Student> =
            ranked.into_iter().take(slots).map(|(s, _)| s).collect();

        let mut team = Vec::with_capacity(teammates.len() + 1);
        team.push(target.clone());
        team.extend(teammates.iter().map(|&s| s.clone()));
        let score = team_compatibility(&team);

        if score.total >= self.acceptance_threshold {
            Some(TeamMatch { teammates, score })
        } else {
            tracing::debug!(
                target = %target.id,
                total = score.total,
                threshold = self.acceptance_threshold,
                "best match rejected below threshold"
            );
            None
        }
    }

    /// Like [`find_scored`](Self::find_scored), but returns an empty list
    /// when no acceptable team is found.
    pub fn find<'a>(
        &self,
        target: &Student,
        candidates: &'a [Student],
        max_size: usize,
    ) -> Vec<&'a Student> {
        self.find_scored(target, candidates, max_size)
            .map(|m| m.teammates)
            .unwrap_or_default()
    }
}

/// Find teammates for `target` with the default acceptance threshold.
pub fn find_optimal_team<'a>(
    target: &Student,
    candidates: &'a [Student],
    max_size: usize,
) -> Vec<&'a Student> {
    BestMatchFinder::default().find(target, candidates, max_size)
}
