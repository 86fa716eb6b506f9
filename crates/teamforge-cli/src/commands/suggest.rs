//! The `teamforge match` command.

use std::path::PathBuf;

use anyhow::Result;

use teamforge_core::config::load_config_from;
use teamforge_core::model::Student;
use teamforge_core::parser::parse_roster;

pub fn execute(
    roster_path: PathBuf,
    student_id: String,
    max_size: Option<usize>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let max_size = max_size.unwrap_or(config.default_match_size);

    let roster = parse_roster(&roster_path)?;
    let target = roster.student(&student_id)?;
    let candidates: Vec<Student> = roster
        .students
        .iter()
        .filter(|s| s.id != target.id)
        .cloned()
        .collect();

    match config.finder().find_scored(target, &candidates, max_size) {
        Some(found) => {
            println!("Suggested teammates for {}:", target.id);
            for mate in &found.teammates {
                let skills: Vec<String> = mate
                    .skills
                    .iter()
                    .map(|s| format!("{}:{}", s.skill_id, s.proficiency_level))
                    .collect();
                println!("  {} ({})", mate.id, skills.join(", "));
            }
            println!(
                "Team compatibility: {:.2} (coverage {:.2}, balance {:.2}, diversity {:.2})",
                found.score.total,
                found.score.skill_coverage,
                found.score.skill_balance,
                found.score.skill_diversity
            );
        }
        None => {
            println!(
                "No compatible team found for {} (threshold {:.2}).",
                target.id,
                config.acceptance_threshold
            );
        }
    }

    Ok(())
}
