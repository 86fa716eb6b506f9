//! teamforge-core: skill profiles, compatibility scoring, and greedy team
//! formation.
//!
//! The engine consumes plain in-memory rosters and rules and produces plain
//! in-memory teams. It keeps no state between calls, so independent callers
//! can form teams concurrently.

pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod parser;
pub mod profile;
pub mod report;
pub mod scoring;

pub use engine::{form_teams, FormationEngine};
pub use error::FormationError;
pub use matcher::find_optimal_team;
pub use model::{Skill, SkillRequirement, Student, Team, TeamFormationRule, TeamScore};
pub use scoring::{score_candidate, team_compatibility};
