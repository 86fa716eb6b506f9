//! Per-student skill profiles against a formation rule.
//!
//! A [`ProfileCache`] is built at the start of each formation run and
//! dropped when the run ends. It is never shared between runs.

use std::collections::{BTreeMap, HashMap};

use crate::model::{Student, TeamFormationRule};

/// What a single student contributes towards the rule's requirements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SkillProfile {
    /// Number of requirements this student alone satisfies.
    pub skill_count: usize,
    /// Requirement skill id -> 1 if satisfied, 0 otherwise.
    pub skill_coverage: BTreeMap<String, u32>,
}

impl SkillProfile {
    pub fn build(student: &Student, rules: &TeamFormationRule) -> Self {
        let mut skill_coverage = BTreeMap::new();
        let mut skill_count = 0;
        for requirement in &rules.required_skills {
            let covered = student.satisfies(requirement);
            if covered {
                skill_count += 1;
            }
            skill_coverage.insert(requirement.skill_id.clone(), u32::from(covered));
        }
        Self {
            skill_count,
            skill_coverage,
        }
    }

    /// Coverage indicator for `skill_id` (0 if the rule does not require it).
    pub fn covers(&self, skill_id: &str) -> u32 {
        self.skill_coverage.get(skill_id).copied().unwrap_or(0)
    }

    /// Sum of all coverage indicators.
    pub fn total_coverage(&self) -> u32 {
        self.skill_coverage.values().sum()
    }
}

/// Run-scoped lookup of skill profiles, indexed by roster position.
#[derive(Debug, Clone, Default)]
pub struct ProfileCache {
    profiles: Vec<SkillProfile>,
    by_id: HashMap<String, usize>,
}

impl ProfileCache {
    pub fn build(students: &[Student], rules: &TeamFormationRule) -> Self {
        let profiles: Vec<SkillProfile> = students
            .iter()
            .map(|s| SkillProfile::build(s, rules))
            .collect();
        let mut by_id = HashMap::with_capacity(students.len());
        for (index, student) in students.iter().enumerate() {
            // First occurrence wins for id lookups; positional lookups are exact.
            by_id.entry(student.id.clone()).or_insert(index);
        }
        Self { profiles, by_id }
    }

    /// Profile of the student at roster position `index`.
    pub fn at(&self, index: usize) -> &SkillProfile {
        &self.profiles[index]
    }

    pub fn get(&self, student_id: &str) -> Option<&SkillProfile> {
        self.by_id.get(student_id).map(|&i| &self.profiles[i])
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Per-requirement count of `members` meeting that requirement.
pub fn team_skill_coverage(
    members: &[Student],
    rules: &TeamFormationRule,
) -> BTreeMap<String, u32> {
    let mut coverage = BTreeMap::new();
    for requirement in &rules.required_skills {
        let count = members.iter().filter(|m| m.satisfies(requirement)).count() as u32;
        coverage.insert(requirement.skill_id.clone(), count);
    }
    coverage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Skill;

    fn rules() -> TeamFormationRule {
        TeamFormationRule::new(2, 3)
            .require("js", 3, 1)
            .require("python", 4, 1)
            .require("sql", 2, 2)
    }

    #[test]
    fn profile_counts_satisfied_requirements() {
        let student = Student::new(
            "s1",
            vec![
                Skill::new("js", 4),
                Skill::new("python", 3),
                Skill::new("sql", 2),
            ],
        );
        let profile = SkillProfile::build(&student, &rules());
        assert_eq!(profile.skill_count, 2);
        assert_eq!(profile.covers("js"), 1);
        assert_eq!(profile.covers("python"), 0);
        assert_eq!(profile.covers("sql"), 1);
        assert_eq!(profile.covers("rust"), 0);
        assert_eq!(profile.total_coverage(), 2);
    }

    #[test]
    fn repeated_skill_entries_count_once() {
        let student = Student::new("s1", vec![Skill::new("js", 1), Skill::new("js", 5)]);
        let profile = SkillProfile::build(&student, &rules());
        assert_eq!(profile.skill_count, 1);
        assert_eq!(profile.covers("js"), 1);
    }

    #[test]
    fn cache_lookup_by_position_and_id() {
        let students = vec![
            Student::new("a", vec![Skill::new("js", 5)]),
            Student::new("b", vec![Skill::new("python", 5)]),
        ];
        let cache = ProfileCache::build(&students, &rules());
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.at(1).covers("python"), 1);
        assert_eq!(cache.get("a").map(|p| p.skill_count), Some(1));
        assert!(cache.get("zzz").is_none());
    }

    #[test]
    fn caches_are_independent_per_rule() {
        let students = vec![Student::new("a", vec![Skill::new("js", 3)])];
        let strict = TeamFormationRule::new(1, 2).require("js", 5, 1);
        let loose = TeamFormationRule::new(1, 2).require("js", 1, 1);

        let a = ProfileCache::build(&students, &strict);
        let b = ProfileCache::build(&students, &loose);
        assert_eq!(a.at(0).skill_count, 0);
        assert_eq!(b.at(0).skill_count, 1);
    }

    #[test]
    fn team_coverage_counts_members() {
        let members = vec![
            Student::new("a", vec![Skill::new("sql", 2)]),
            Student::new("b", vec![Skill::new("sql", 3), Skill::new("js", 3)]),
            Student::new("c", vec![Skill::new("sql", 1)]),
        ];
        let coverage = team_skill_coverage(&members, &rules());
        assert_eq!(coverage["sql"], 2);
        assert_eq!(coverage["js"], 1);
        assert_eq!(coverage["python"], 0);
    }
}
