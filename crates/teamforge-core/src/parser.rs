//! Roster file parser.
//!
//! Loads a roster (formation rule plus students) from TOML or JSON files and
//! directories, and validates it.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::FormationError;
use crate::model::{Student, TeamFormationRule};

/// Observed proficiency scale. Values outside it are warned about, not rejected.
pub const PROFICIENCY_SCALE: std::ops::RangeInclusive<i32> = 1..=5;

/// A formation request: who is available and how teams must be shaped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    /// Human-readable name (e.g. the course section).
    #[serde(default)]
    pub name: String,
    pub rules: TeamFormationRule,
    #[serde(default)]
    pub students: Vec<Student>,
}

impl Roster {
    pub fn student(&self, id: &str) -> Result<&Student, FormationError> {
        self.students
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| FormationError::UnknownStudent(id.to_string()))
    }
}

/// Roster file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterFormat {
    Toml,
    Json,
}

impl RosterFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(RosterFormat::Toml),
            "json" => Some(RosterFormat::Json),
            _ => None,
        }
    }
}

/// Parse a single roster file.
pub fn parse_roster(path: &Path) -> Result<Roster> {
    let format = RosterFormat::from_path(path)
        .with_context(|| format!("unsupported roster file type: {}", path.display()))?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read roster file: {}", path.display()))?;

    parse_roster_str(&content, format, path)
}

/// Parse a roster from a string (useful for testing).
pub fn parse_roster_str(content: &str, format: RosterFormat, source_path: &Path) -> Result<Roster> {
    let mut roster: Roster = match format {
        RosterFormat::Toml => toml::from_str(content)
            .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?,
        RosterFormat::Json => serde_json::from_str(content)
            .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?,
    };

    if roster.name.is_empty() {
        roster.name = source_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
    }

    Ok(roster)
}

/// Recursively load all roster files from a directory.
pub fn load_roster_directory(dir: &Path) -> Result<Vec<Roster>> {
    let mut rosters = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            rosters.extend(load_roster_directory(&path)?);
        } else if RosterFormat::from_path(&path).is_some() {
            match parse_roster(&path) {
                Ok(roster) => rosters.push(roster),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(rosters)
}

/// A warning from roster validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The student id (if applicable).
    pub student_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn roster(message: impl Into<String>) -> Self {
        Self {
            student_id: None,
            message: message.into(),
        }
    }

    fn student(id: &str, message: impl Into<String>) -> Self {
        Self {
            student_id: Some(id.to_string()),
            message: message.into(),
        }
    }
}

/// Validate a roster for common issues.
pub fn validate_roster(roster: &Roster) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let rules = &roster.rules;

    if let Err(e) = rules.validate() {
        warnings.push(ValidationWarning::roster(e.to_string()));
    }
    if let Err(e) = rules.check_roster(roster.students.len()) {
        warnings.push(ValidationWarning::roster(e.to_string()));
    }
    if rules.diversity_weight() < 0.0 {
        warnings.push(ValidationWarning::roster(format!(
            "diversityWeight is negative: {}",
            rules.diversity_weight()
        )));
    }

    let mut seen_requirements = HashSet::new();
    for req in &rules.required_skills {
        if !seen_requirements.insert(req.skill_id.as_str()) {
            warnings.push(ValidationWarning::roster(format!(
                "duplicate requirement for skill: {}",
                req.skill_id
            )));
        }
        if req.min_count == 0 {
            warnings.push(ValidationWarning::roster(format!(
                "requirement for {} has minCount 0 and never affects scoring",
                req.skill_id
            )));
        }
        if !roster.students.iter().any(|s| s.satisfies(req)) {
            warnings.push(ValidationWarning::roster(format!(
                "no student meets requirement {} at proficiency {}",
                req.skill_id, req.min_proficiency
            )));
        }
    }

    let mut seen_ids = HashSet::new();
    for student in &roster.students {
        if !seen_ids.insert(student.id.as_str()) {
            warnings.push(ValidationWarning::student(
                &student.id,
                format!("duplicate student ID: {}", student.id),
            ));
        }
        if student.skills.is_empty() {
            warnings.push(ValidationWarning::student(&student.id, "student lists no skills"));
        }
        for skill in &student.skills {
            if !PROFICIENCY_SCALE.contains(&skill.proficiency_level) {
                warnings.push(ValidationWarning::student(
                    &student.id,
                    format!(
                        "proficiency {} for {} is outside {}..={}",
                        skill.proficiency_level,
                        skill.skill_id,
                        PROFICIENCY_SCALE.start(),
                        PROFICIENCY_SCALE.end()
                    ),
                ));
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
name = "CS 101 Section A"

[rules]
min_team_size = 2
max_team_size = 3

[[rules.required_skills]]
skill_id = "rust"
min_proficiency = 3
min_count = 1

[rules.skill_distribution_rules]
diversity_weight = 0.5

[[students]]
id = "alice"
skills = [{ skill_id = "rust", proficiency_level = 4 }]

[[students]]
id = "bob"
skills = [{ skill_id = "sql", proficiency_level = 2 }]
"#;

    const VALID_JSON: &str = r#"{
  "rules": {
    "min_team_size": 1,
    "max_team_size": 2,
    "required_skills": [{ "skillId": "js", "minProficiency": 2, "minCount": 1 }],
    "skill_distribution_rules": { "diversityWeight": 1.0 }
  },
  "students": [
    { "id": "1", "skills": [{ "skill_id": "js", "proficiency_level": 4 }] }
  ]
}"#;

    #[test]
    fn parse_valid_toml() {
        let roster =
            parse_roster_str(VALID_TOML, RosterFormat::Toml, &PathBuf::from("a.toml")).unwrap();
        assert_eq!(roster.name, "CS 101 Section A");
        assert_eq!(roster.rules.max_team_size, 3);
        assert_eq!(roster.rules.required_skills[0].skill_id, "rust");
        assert_eq!(roster.students.len(), 2);
        assert!(validate_roster(&roster).is_empty());
    }

    #[test]
    fn parse_valid_json_names_from_file() {
        let roster =
            parse_roster_str(VALID_JSON, RosterFormat::Json, &PathBuf::from("sec-b.json"))
                .unwrap();
        assert_eq!(roster.name, "sec-b");
        assert_eq!(roster.students[0].skills[0].proficiency_level, 4);
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_roster_str(bad, RosterFormat::Toml, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn unsupported_extension() {
        assert_eq!(RosterFormat::from_path(Path::new("x.yaml")), None);
        assert_eq!(RosterFormat::from_path(Path::new("x.JSON")), Some(RosterFormat::Json));
        assert!(parse_roster(Path::new("roster.csv")).is_err());
    }

    #[test]
    fn lookup_student() {
        let roster =
            parse_roster_str(VALID_TOML, RosterFormat::Toml, &PathBuf::from("a.toml")).unwrap();
        assert_eq!(roster.student("bob").unwrap().id, "bob");
        assert_eq!(
            roster.student("carol"),
            Err(FormationError::UnknownStudent("carol".into()))
        );
    }

    #[test]
    fn validate_flags_problems() {
        let toml = r#"
[rules]
min_team_size = 4
max_team_size = 2

[[rules.required_skills]]
skill_id = "go"
min_proficiency = 5
min_count = 0

[[rules.required_skills]]
skill_id = "go"
min_proficiency = 1

[[students]]
id = "x"
skills = [{ skill_id = "go", proficiency_level = 9 }]

[[students]]
id = "x"
"#;
        let roster =
            parse_roster_str(toml, RosterFormat::Toml, &PathBuf::from("bad.toml")).unwrap();
        let warnings = validate_roster(&roster);
        let has = |needle: &str| warnings.iter().any(|w| w.message.contains(needle));
        assert!(has("invalid team formation rule"));
        assert!(has("insufficient roster"));
        assert!(has("duplicate requirement"));
        assert!(has("minCount 0"));
        assert!(has("duplicate student ID"));
        assert!(has("lists no skills"));
        assert!(has("outside 1..=5"));
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("b.json"), VALID_JSON).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "nope = [").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let rosters = load_roster_directory(dir.path()).unwrap();
        assert_eq!(rosters.len(), 2);
        assert_eq!(rosters[0].name, "CS 101 Section A");
        assert_eq!(rosters[1].name, "b");
    }
}
