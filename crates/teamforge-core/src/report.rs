//! Formation report types with JSON persistence.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Team, TeamFormationRule, TeamScore};
use crate::scoring::team_compatibility;

/// A complete record of one formation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormationReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Roster name the teams were formed from.
    pub roster: String,
    /// The rule the run used.
    pub rules: TeamFormationRule,
    /// Number of students on the roster.
    pub student_count: usize,
    /// Per-team summaries, in formation order.
    pub teams: Vec<TeamSummary>,
    /// Aggregate statistics over all teams.
    pub summary: FormationSummary,
    /// Wall-clock duration of the run in milliseconds.
    pub duration_ms: u64,
}

/// One formed team, flattened for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSummary {
    pub members: Vec<String>,
    pub size: usize,
    /// Requirement skill id -> number of members meeting it.
    pub skill_coverage: BTreeMap<String, u32>,
    /// Requirement skill ids whose `minCount` is not reached.
    pub unmet_requirements: Vec<String>,
    pub compatibility: TeamScore,
    pub average_proficiency: f64,
}

impl TeamSummary {
    pub fn from_team(team: &Team, rules: &TeamFormationRule) -> Self {
        Self {
            members: team.members.iter().map(|m| m.id.clone()).collect(),
            size: team.len(),
            skill_coverage: team.skill_coverage.clone(),
            unmet_requirements: team
                .unmet_requirements(rules)
                .into_iter()
                .map(|r| r.skill_id.clone())
                .collect(),
            compatibility: team_compatibility(&team.members),
            average_proficiency: team.average_proficiency(),
        }
    }
}

/// Aggregate statistics across all teams of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormationSummary {
    pub team_count: usize,
    /// Students placed on a team.
    pub assigned: usize,
    /// Students left without a team (only when the roster was too small).
    pub unassigned: usize,
    /// Teams meeting every requirement.
    pub fully_covered: usize,
    /// Teams larger than `max_team_size` after leftover placement.
    pub oversized: usize,
    pub mean_compatibility: f64,
    pub smallest_team: usize,
    pub largest_team: usize,
}

impl FormationSummary {
    pub fn compute(
        teams: &[TeamSummary],
        student_count: usize,
        rules: &TeamFormationRule,
    ) -> Self {
        if teams.is_empty() {
            return Self {
                unassigned: student_count,
                ..Self::default()
            };
        }
        let assigned: usize = teams.iter().map(|t| t.size).sum();
        Self {
            team_count: teams.len(),
            assigned,
            unassigned: student_count.saturating_sub(assigned),
            fully_covered: teams
                .iter()
                .filter(|t| t.unmet_requirements.is_empty())
                .count(),
            oversized: teams.iter().filter(|t| t.size > rules.max_team_size).count(),
            mean_compatibility: teams.iter().map(|t| t.compatibility.total).sum::<f64>()
                / teams.len() as f64,
            smallest_team: teams.iter().map(|t| t.size).min().unwrap_or(0),
            largest_team: teams.iter().map(|t| t.size).max().unwrap_or(0),
        }
    }
}

impl FormationReport {
    /// Build a report for `teams` formed from a roster of `student_count`.
    pub fn new(
        roster: impl Into<String>,
        rules: &TeamFormationRule,
        student_count: usize,
        teams: &[Team],
        duration_ms: u64,
    ) -> Self {
        let summaries: Vec<TeamSummary> = teams
            .iter()
            .map(|t| TeamSummary::from_team(t, rules))
            .collect();
        let summary = FormationSummary::compute(&summaries, student_count, rules);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            roster: roster.into(),
            rules: rules.clone(),
            student_count,
            teams: summaries,
            summary,
            duration_ms,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: FormationReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## Teams for {}\n\n", self.roster));
        md.push_str(&format!(
            "**Summary:** {} teams, {} of {} students assigned, {} fully covered, mean compatibility {:.2}\n\n",
            self.summary.team_count,
            self.summary.assigned,
            self.student_count,
            self.summary.fully_covered,
            self.summary.mean_compatibility
        ));

        if self.teams.is_empty() {
            md.push_str("No teams formed.\n");
            return md;
        }

        md.push_str("| # | Members | Size | Unmet | Compatibility |\n");
        md.push_str("|---|---------|------|-------|---------------|\n");
        for (i, t) in self.teams.iter().enumerate() {
            let unmet = if t.unmet_requirements.is_empty() {
                "-".to_string()
            } else {
                t.unmet_requirements.join(", ")
            };
            md.push_str(&format!(
                "| {} | {} | {} | {} | {:.2} |\n",
                i + 1,
                t.members.join(", "),
                t.size,
                unmet,
                t.compatibility.total
            ));
        }

        md
    }
}
