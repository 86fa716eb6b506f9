//! Formation error types.
//!
//! Every condition here is local and recoverable. The engine turns an
//! insufficient roster into an empty team list; the other variants are
//! returned to the caller as tagged failures.

use thiserror::Error;

/// Errors that can occur while forming or matching teams.
#[derive(Debug, Error, PartialEq)]
pub enum FormationError {
    /// The rule's size bounds are not `1 <= min <= max`.
    #[error("invalid team formation rule: min_team_size={min}, max_team_size={max}")]
    InvalidRule { min: usize, max: usize },

    /// Fewer students than a single minimum-size team needs.
    #[error("insufficient roster: {available} student(s), at least {required} needed")]
    InsufficientRoster { available: usize, required: usize },

    /// Leftover students were handed to redistribution with no teams to join.
    #[error("cannot distribute {leftover} leftover student(s): no teams were formed")]
    NoTeams { leftover: usize },

    /// A student id was not found on the roster.
    #[error("unknown student: {0}")]
    UnknownStudent(String),
}
