//! Roster-level properties of the formation engine.

use std::collections::HashMap;
use std::thread;

use proptest::prelude::*;

use teamforge_core::engine::{form_teams, FormationConfig, FormationEngine};
use teamforge_core::matcher::find_optimal_team;
use teamforge_core::model::{Skill, Student, Team, TeamFormationRule};
use teamforge_core::profile::team_skill_coverage;

const SKILLS: [&str; 6] = ["js", "python", "sql", "rust", "design", "react"];

fn arb_skill() -> impl Strategy<Value = Skill> {
    (0..SKILLS.len(), 1i32..=5).prop_map(|(i, level)| Skill::new(SKILLS[i], level))
}

/// Students with unique ids `s000`, `s001`, ...
fn arb_roster(max_len: usize) -> impl Strategy<Value = Vec<Student>> {
    prop::collection::vec(prop::collection::vec(arb_skill(), 0..4), 0..max_len).prop_map(
        |skill_sets| {
            skill_sets
                .into_iter()
                .enumerate()
                .map(|(i, skills)| Student::new(format!("s{i:03}"), skills))
                .collect()
        },
    )
}

/// Valid rules: `1 <= min <= max`, at most one requirement per skill.
fn arb_rules() -> impl Strategy<Value = TeamFormationRule> {
    let shape = (1usize..=5).prop_flat_map(|min| (Just(min), min..=min + 3));
    let requirements =
        prop::collection::btree_map(0..SKILLS.len(), (1i32..=5, 0u32..=2), 0..=4);
    (shape, requirements, 0.0f64..2.0).prop_map(|((min, max), requirements, weight)| {
        requirements
            .into_iter()
            .fold(TeamFormationRule::new(min, max), |rule, (i, (level, count))| {
                rule.require(SKILLS[i], level, count)
            })
            .with_diversity_weight(weight)
    })
}

fn member_counts(teams: &[Team]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for team in teams {
        for m in &team.members {
            *counts.entry(m.id.clone()).or_insert(0) += 1;
        }
    }
    counts
}

proptest! {
    #[test]
    fn every_student_is_placed_exactly_once(roster in arb_roster(60), rule in arb_rules()) {
        let teams = form_teams(&roster, &rule).unwrap();
        if roster.len() < rule.min_team_size {
            prop_assert!(teams.is_empty());
        } else {
            let counts = member_counts(&teams);
            prop_assert_eq!(counts.len(), roster.len());
            prop_assert!(counts.values().all(|&c| c == 1));
        }
    }

    #[test]
    fn team_sizes_stay_within_bounds_plus_overflow(
        roster in arb_roster(80),
        rule in arb_rules(),
    ) {
        let teams = form_teams(&roster, &rule).unwrap();
        let (min, max) = (rule.min_team_size, rule.max_team_size);
        prop_assert!(teams.iter().all(|t| t.len() >= min));

        // Only the fewer-than-min leftovers may push teams past max, and
        // they spread over the smallest teams.
        let overflow: usize = teams.iter().map(|t| t.len().saturating_sub(max)).sum();
        prop_assert!(overflow < min);
        if overflow > 0 {
            let largest = teams.iter().map(Team::len).max().unwrap();
            let smallest = teams.iter().map(Team::len).min().unwrap();
            prop_assert!(largest - smallest <= 1);
        }
    }

    #[test]
    fn evenly_divisible_rosters_fill_every_team(
        rule in arb_rules(),
        team_count in 1usize..6,
        skills in prop::collection::vec(prop::collection::vec(arb_skill(), 0..4), 48),
    ) {
        let n = team_count * rule.max_team_size;
        let roster: Vec<Student> = skills
            .into_iter()
            .take(n)
            .enumerate()
            .map(|(i, skills)| Student::new(format!("s{i:03}"), skills))
            .collect();
        let teams = form_teams(&roster, &rule).unwrap();
        prop_assert_eq!(teams.len(), team_count);
        prop_assert!(teams.iter().all(|t| t.len() == rule.max_team_size));
    }

    #[test]
    fn formation_is_deterministic(
        roster in arb_roster(60),
        rule in arb_rules(),
        window in 0usize..12,
    ) {
        let engine = FormationEngine::new(FormationConfig { candidate_window: window });
        let first = engine.form_teams(&roster, &rule).unwrap();
        let second = engine.form_teams(&roster, &rule).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn coverage_tally_is_sum_of_member_indicators(
        roster in arb_roster(60),
        rule in arb_rules(),
    ) {
        for team in form_teams(&roster, &rule).unwrap() {
            prop_assert_eq!(&team.skill_coverage, &team_skill_coverage(&team.members, &rule));
        }
    }

    #[test]
    fn finder_never_exceeds_max_size(
        roster in arb_roster(20),
        max_size in 0usize..8,
    ) {
        if let Some((target, candidates)) = roster.split_first() {
            let team = find_optimal_team(target, candidates, max_size);
            prop_assert!(team.len() <= max_size.saturating_sub(1));
            prop_assert!(team.iter().all(|s| s.id != target.id));
        }
    }
}

/// Fixed roster with skills spread by index, for the threading check.
fn striped_roster(n: usize, offset: usize) -> Vec<Student> {
    (0..n)
        .map(|i| {
            let skills = (0..(i + offset) % 4)
                .map(|k| {
                    let level = ((i * 7 + k * 3 + offset) % 5) as i32 + 1;
                    Skill::new(SKILLS[(i + k + offset) % SKILLS.len()], level)
                })
                .collect();
            Student::new(format!("s{i:03}"), skills)
        })
        .collect()
}

#[test]
fn concurrent_runs_do_not_interfere() {
    let roster_a = striped_roster(30, 1);
    let roster_b = striped_roster(25, 4);
    let rule_a = TeamFormationRule::new(2, 3)
        .require("js", 3, 1)
        .require("python", 3, 1)
        .require("sql", 2, 2)
        .with_diversity_weight(0.5);
    let rule_b = TeamFormationRule::new(3, 5)
        .require("rust", 2, 1)
        .require("design", 4, 1);

    let expected_a = form_teams(&roster_a, &rule_a).unwrap();
    let expected_b = form_teams(&roster_b, &rule_b).unwrap();

    thread::scope(|scope| {
        let mut handles = Vec::new();
        for i in 0..8 {
            let (roster, rule, expected) = if i % 2 == 0 {
                (&roster_a, &rule_a, &expected_a)
            } else {
                (&roster_b, &rule_b, &expected_b)
            };
            handles.push(scope.spawn(move || {
                let engine = FormationEngine::new(FormationConfig::default());
                for _ in 0..20 {
                    assert_eq!(&engine.form_teams(roster, rule).unwrap(), expected);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
    });
}
