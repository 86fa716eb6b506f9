//! Core data model types for teamforge.
//!
//! These are the plain in-memory types the formation engine consumes and
//! produces: students with their skills, formation rules, teams, and
//! compatibility scores.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::FormationError;

/// A skill a student claims, with a self-reported proficiency level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Skill identifier (e.g. "rust", "react").
    #[serde(alias = "skillId")]
    pub skill_id: String,
    /// Ordinal proficiency, usually on a 1..=5 scale. Not clamped.
    #[serde(alias = "proficiencyLevel")]
    pub proficiency_level: i32,
}

impl Skill {
    pub fn new(skill_id: impl Into<String>, proficiency_level: i32) -> Self {
        Self {
            skill_id: skill_id.into(),
            proficiency_level,
        }
    }
}

/// A student on the roster. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Unique student identifier.
    pub id: String,
    /// Skills in the order the student listed them.
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl Student {
    pub fn new(id: impl Into<String>, skills: Vec<Skill>) -> Self {
        Self {
            id: id.into(),
            skills,
        }
    }

    /// Whether this student alone meets `requirement`.
    pub fn satisfies(&self, requirement: &SkillRequirement) -> bool {
        self.skills.iter().any(|skill| {
            skill.skill_id == requirement.skill_id
                && skill.proficiency_level >= requirement.min_proficiency
        })
    }
}

/// A skill the team as a whole must cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRequirement {
    #[serde(alias = "skill_id")]
    pub skill_id: String,
    /// Minimum proficiency a member needs to count towards this requirement.
    #[serde(alias = "min_proficiency")]
    pub min_proficiency: i32,
    /// Number of members that must meet `min_proficiency`.
    #[serde(alias = "min_count", default = "default_min_count")]
    pub min_count: u32,
}

fn default_min_count() -> u32 {
    1
}

impl SkillRequirement {
    pub fn new(skill_id: impl Into<String>, min_proficiency: i32, min_count: u32) -> Self {
        Self {
            skill_id: skill_id.into(),
            min_proficiency,
            min_count,
        }
    }
}

/// Tunables for how skills are spread across a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDistributionRules {
    /// Bonus per required skill a candidate covers, regardless of urgency.
    #[serde(alias = "diversity_weight", default = "default_diversity_weight")]
    pub diversity_weight: f64,
}

fn default_diversity_weight() -> f64 {
    1.0
}

impl Default for SkillDistributionRules {
    fn default() -> Self {
        Self {
            diversity_weight: default_diversity_weight(),
        }
    }
}

/// Size and skill-coverage constraints for one formation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamFormationRule {
    pub min_team_size: usize,
    pub max_team_size: usize,
    #[serde(default)]
    pub required_skills: Vec<SkillRequirement>,
    #[serde(default)]
    pub skill_distribution_rules: SkillDistributionRules,
}

impl TeamFormationRule {
    pub fn new(min_team_size: usize, max_team_size: usize) -> Self {
        Self {
            min_team_size,
            max_team_size,
            required_skills: Vec::new(),
            skill_distribution_rules: SkillDistributionRules::default(),
        }
    }

    /// Builder-style helper for adding a requirement.
    pub fn require(
        mut self,
        skill_id: impl Into<String>,
        min_proficiency: i32,
        min_count: u32,
    ) -> Self {
        self.required_skills
            .push(SkillRequirement::new(skill_id, min_proficiency, min_count));
        self
    }

    pub fn with_diversity_weight(mut self, weight: f64) -> Self {
        self.skill_distribution_rules.diversity_weight = weight;
        self
    }

    pub fn diversity_weight(&self) -> f64 {
        self.skill_distribution_rules.diversity_weight
    }

    /// Check `1 <= min_team_size <= max_team_size`.
    pub fn validate(&self) -> Result<(), FormationError> {
        if self.min_team_size == 0 || self.min_team_size > self.max_team_size {
            return Err(FormationError::InvalidRule {
                min: self.min_team_size,
                max: self.max_team_size,
            });
        }
        Ok(())
    }

    /// Check that a roster of `available` students can fill at least one team.
    pub fn check_roster(&self, available: usize) -> Result<(), FormationError> {
        if available < self.min_team_size {
            return Err(FormationError::InsufficientRoster {
                available,
                required: self.min_team_size,
            });
        }
        Ok(())
    }
}

/// A formed team. `skill_coverage` counts members meeting each requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub members: Vec<Student>,
    #[serde(default)]
    pub skill_coverage: BTreeMap<String, u32>,
}

impl Team {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn member_ids(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.id.as_str()).collect()
    }

    /// Number of members meeting the requirement for `skill_id`.
    pub fn coverage_of(&self, skill_id: &str) -> u32 {
        self.skill_coverage.get(skill_id).copied().unwrap_or(0)
    }

    /// Mean proficiency over every skill entry of every member (0 if none).
    pub fn average_proficiency(&self) -> f64 {
        let levels: Vec<i32> = self
            .members
            .iter()
            .flat_map(|m| m.skills.iter().map(|s| s.proficiency_level))
            .collect();
        if levels.is_empty() {
            return 0.0;
        }
        levels.iter().map(|&l| l as f64).sum::<f64>() / levels.len() as f64
    }

    /// Requirements whose `min_count` this team does not reach.
    pub fn unmet_requirements<'r>(
        &self,
        rules: &'r TeamFormationRule,
    ) -> Vec<&'r SkillRequirement> {
        rules
            .required_skills
            .iter()
            .filter(|req| self.coverage_of(&req.skill_id) < req.min_count)
            .collect()
    }
}

/// Rule-free compatibility of a group of students.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamScore {
    /// Distinct skills relative to three per member. Not capped at 1.
    pub skill_coverage: f64,
    /// Mean of `1 / (1 + variance)` over distinct skills.
    pub skill_balance: f64,
    /// `1 - penalty` for members sharing a skill at similar levels.
    pub skill_diversity: f64,
    /// Weighted sum of the three components.
    pub total: f64,
}
