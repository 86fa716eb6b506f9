//! Team scoring.
//!
//! Two independent scorers live here:
//!
//! - [`marginal_score`]: rule-driven, used by the greedy assembler to rank a
//!   candidate against a team's current coverage.
//! - [`team_compatibility`]: rule-free, symmetric score over an arbitrary
//!   member list (coverage, balance, diversity).

use std::collections::BTreeMap;

use crate::model::{Student, Team, TeamFormationRule, TeamScore};
use crate::profile::SkillProfile;

/// Points a candidate earns per requirement the team has not yet met.
pub const UNMET_REQUIREMENT_WEIGHT: f64 = 10.0;

/// Expected distinct skills per member for the coverage baseline.
pub const SKILLS_PER_MEMBER: f64 = 3.0;

/// Penalty per pair of same-skill occurrences with similar proficiency.
pub const SIMILAR_PROFICIENCY_PENALTY: f64 = 0.6;

/// Proficiency levels this close or closer count as "similar".
pub const SIMILARITY_TOLERANCE: u32 = 1;

const COVERAGE_WEIGHT: f64 = 0.4;
const BALANCE_WEIGHT: f64 = 0.3;
const DIVERSITY_WEIGHT: f64 = 0.3;

/// Score a candidate (by its cached profile) against a team's current coverage.
///
/// Each requirement the team has not yet met contributes
/// `UNMET_REQUIREMENT_WEIGHT` if the candidate covers it. Met requirements
/// contribute nothing. On top of that, the rule's diversity weight rewards
/// every requirement the candidate covers.
pub fn marginal_score(team: &Team, candidate: &SkillProfile, rules: &TeamFormationRule) -> f64 {
    let mut score = 0.0;
    for requirement in &rules.required_skills {
        if team.coverage_of(&requirement.skill_id) < requirement.min_count {
            score += f64::from(candidate.covers(&requirement.skill_id)) * UNMET_REQUIREMENT_WEIGHT;
        }
    }
    score + rules.diversity_weight() * f64::from(candidate.total_coverage())
}

/// [`marginal_score`] for a student without a prebuilt profile.
pub fn score_candidate(team: &Team, candidate: &Student, rules: &TeamFormationRule) -> f64 {
    marginal_score(team, &SkillProfile::build(candidate, rules), rules)
}

/// Rule-free compatibility of `members`, scored exactly as given.
pub fn team_compatibility(members: &[Student]) -> TeamScore {
    TeamScore::compute(members)
}

impl TeamScore {
    /// Compute the compatibility score for a member list.
    ///
    /// An empty list scores zero on every component.
    pub fn compute(members: &[Student]) -> Self {
        if members.is_empty() {
            return Self::default();
        }

        let mut levels_by_skill: BTreeMap<&str, Vec<i32>> = BTreeMap::new();
        for student in members {
            for skill in &student.skills {
                levels_by_skill
                    .entry(skill.skill_id.as_str())
                    .or_default()
                    .push(skill.proficiency_level);
            }
        }

        let skill_coverage =
            levels_by_skill.len() as f64 / (members.len() as f64 * SKILLS_PER_MEMBER);
        let skill_balance = balance(&levels_by_skill);
        let skill_diversity = diversity(members);

        Self {
            skill_coverage,
            skill_balance,
            skill_diversity,
            total: skill_coverage * COVERAGE_WEIGHT
                + skill_balance * BALANCE_WEIGHT
                + skill_diversity * DIVERSITY_WEIGHT,
        }
    }
}

/// Mean of `1 / (1 + variance)` across skills; 0 when there are no skills.
fn balance(levels_by_skill: &BTreeMap<&str, Vec<i32>>) -> f64 {
    if levels_by_skill.is_empty() {
        return 0.0;
    }
    let sum: f64 = levels_by_skill
        .values()
        .map(|levels| 1.0 / (1.0 + variance(levels)))
        .sum();
    sum / levels_by_skill.len() as f64
}

/// Population variance. Callers never pass an empty slice.
fn variance(levels: &[i32]) -> f64 {
    let n = levels.len() as f64;
    let mean = levels.iter().map(|&l| f64::from(l)).sum::<f64>() / n;
    levels
        .iter()
        .map(|&l| (f64::from(l) - mean).powi(2))
        .sum::<f64>()
        / n
}

/// `1 - penalty`, floored at 0. Every new occurrence of a skill is compared
/// against all earlier occurrences of the same skill, in member order.
fn diversity(members: &[Student]) -> f64 {
    let mut seen: BTreeMap<&str, Vec<i32>> = BTreeMap::new();
    let mut penalty = 0.0;
    for student in members {
        for skill in &student.skills {
            let earlier = seen.entry(skill.skill_id.as_str()).or_default();
            let similar = earlier
                .iter()
                .filter(|&&prev| prev.abs_diff(skill.proficiency_level) <= SIMILARITY_TOLERANCE)
                .count();
            penalty += similar as f64 * SIMILAR_PROFICIENCY_PENALTY;
            earlier.push(skill.proficiency_level);
        }
    }
    (1.0 - penalty).max(0.0)
}
