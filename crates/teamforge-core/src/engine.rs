//! Greedy team formation engine.
//!
//! Sorts the roster by how many requirements each student satisfies, then
//! repeatedly seeds a team with the strongest remaining student and fills it
//! from a bounded look-ahead window. Students left over once the pool drops
//! below `min_team_size` are folded into existing teams.
//!
//! This is a deterministic heuristic. Optimal skill-balanced partitioning is
//! NP-hard and is not attempted.

use std::collections::VecDeque;

use crate::error::FormationError;
use crate::model::{Student, Team, TeamFormationRule};
use crate::profile::{ProfileCache, SkillProfile};
use crate::scoring::marginal_score;

/// How many pool candidates the assembler scores per pick.
pub const DEFAULT_CANDIDATE_WINDOW: usize = 10;

/// Configuration for the formation engine.
#[derive(Debug, Clone)]
pub struct FormationConfig {
    /// Look-ahead window for each greedy pick. Values below 1 act as 1.
    pub candidate_window: usize,
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            candidate_window: DEFAULT_CANDIDATE_WINDOW,
        }
    }
}

/// The team formation engine. Holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct FormationEngine {
    config: FormationConfig,
}

impl FormationEngine {
    pub fn new(config: FormationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormationConfig {
        &self.config
    }

    /// Partition `students` into teams according to `rules`.
    ///
    /// Returns an empty list when the roster cannot fill a single team, and
    /// `FormationError::InvalidRule` when the size bounds are inconsistent.
    pub fn form_teams(
        &self,
        students: &[Student],
        rules: &TeamFormationRule,
    ) -> Result<Vec<Team>, FormationError> {
        rules.validate()?;
        if let Err(e) = rules.check_roster(students.len()) {
            tracing::info!("{e}; no teams formed");
            return Ok(Vec::new());
        }

        let cache = ProfileCache::build(students, rules);

        // Stable sort: ties keep roster order.
        let mut order: Vec<usize> = (0..students.len()).collect();
        order.sort_by(|&a, &b| cache.at(b).skill_count.cmp(&cache.at(a).skill_count));
        let mut pool: VecDeque<usize> = order.into();

        let target = target_team_size(students.len(), rules);
        tracing::debug!(
            students = students.len(),
            target,
            window = self.window(),
            "forming teams"
        );

        let mut teams = Vec::new();
        while pool.len() >= rules.min_team_size {
            let team = self.assemble_team(&mut pool, target, students, &cache, rules);
            tracing::debug!(team = teams.len(), size = team.len(), "assembled team");
            teams.push(team);
        }

        // Redistribution needs at least one team to join.
        if !teams.is_empty() {
            for index in pool {
                place_student(&students[index], cache.at(index), &mut teams, rules)?;
            }
        }

        tracing::info!(
            teams = teams.len(),
            students = students.len(),
            "team formation complete"
        );
        Ok(teams)
    }

    fn window(&self) -> usize {
        self.config.candidate_window.max(1)
    }

    /// Build one team from the front of `pool`, removing its members.
    ///
    /// The team may end up smaller than `target` if the pool runs out.
    fn assemble_team(
        &self,
        pool: &mut VecDeque<usize>,
        target: usize,
        students: &[Student],
        cache: &ProfileCache,
        rules: &TeamFormationRule,
    ) -> Team {
        let mut team = Team {
            members: Vec::with_capacity(target),
            skill_coverage: Default::default(),
        };
        let Some(seed) = pool.pop_front() else {
            return team;
        };
        team.members.push(students[seed].clone());
        team.skill_coverage = cache.at(seed).skill_coverage.clone();

        while team.len() < target && !pool.is_empty() {
            let window = self.window().min(pool.len());
            let mut best_pos = 0;
            let mut best_score = f64::NEG_INFINITY;
            for (pos, &candidate) in pool.iter().take(window).enumerate() {
                let score = marginal_score(&team, cache.at(candidate), rules);
                if score > best_score {
                    best_score = score;
                    best_pos = pos;
                }
            }

            let Some(picked) = pool.remove(best_pos) else {
                break;
            };
            add_member(&mut team, &students[picked], cache.at(picked));
        }

        team
    }
}

/// Form teams with the default engine configuration.
pub fn form_teams(
    students: &[Student],
    rules: &TeamFormationRule,
) -> Result<Vec<Team>, FormationError> {
    FormationEngine::default().form_teams(students, rules)
}

/// Size each team aims for before leftovers are redistributed.
///
/// `ceil(total / floor(total / max))` clamped to `[min, max]`. When the
/// roster is smaller than `max_team_size` the quotient is zero and the
/// target is `max_team_size`.
pub fn target_team_size(total_students: usize, rules: &TeamFormationRule) -> usize {
    let team_count = total_students / rules.max_team_size.max(1);
    if team_count == 0 {
        return rules.max_team_size;
    }
    total_students
        .div_ceil(team_count)
        .max(rules.min_team_size)
        .min(rules.max_team_size)
}

/// Fold each of `leftovers` into the best-scoring existing team.
///
/// Only teams below `max_team_size` are considered. If every team is full,
/// the student goes to the best-scoring team among the smallest ones, so
/// overflow spreads across teams instead of piling onto one.
pub fn distribute_remaining_students(
    leftovers: &[Student],
    teams: &mut [Team],
    rules: &TeamFormationRule,
) -> Result<(), FormationError> {
    if teams.is_empty() && !leftovers.is_empty() {
        return Err(FormationError::NoTeams {
            leftover: leftovers.len(),
        });
    }
    for student in leftovers {
        let profile = SkillProfile::build(student, rules);
        place_student(student, &profile, teams, rules)?;
    }
    Ok(())
}

fn place_student(
    student: &Student,
    profile: &SkillProfile,
    teams: &mut [Team],
    rules: &TeamFormationRule,
) -> Result<usize, FormationError> {
    let mut candidates: Vec<usize> = (0..teams.len())
        .filter(|&i| teams[i].len() < rules.max_team_size)
        .collect();
    if candidates.is_empty() {
        let smallest = teams
            .iter()
            .map(Team::len)
            .min()
            .ok_or(FormationError::NoTeams { leftover: 1 })?;
        candidates = (0..teams.len())
            .filter(|&i| teams[i].len() == smallest)
            .collect();
        tracing::warn!(
            student = %student.id,
            size = smallest + 1,
            max = rules.max_team_size,
            "all teams full, placing leftover over max_team_size"
        );
    }

    let mut best = candidates[0];
    let mut best_score = f64::NEG_INFINITY;
    for &i in &candidates {
        let score = marginal_score(&teams[i], profile, rules);
        if score > best_score {
            best_score = score;
            best = i;
        }
    }

    add_member(&mut teams[best], student, profile);
    tracing::debug!(student = %student.id, team = best, "placed leftover student");
    Ok(best)
}

fn add_member(team: &mut Team, student: &Student, profile: &SkillProfile) {
    team.members.push(student.clone());
    for (skill_id, &covered) in &profile.skill_coverage {
        *team.skill_coverage.entry(skill_id.clone()).or_insert(0) += covered;
    }
}
