//! The `teamforge score` command.

use std::path::PathBuf;

use anyhow::Result;

use teamforge_core::model::Student;
use teamforge_core::parser::parse_roster;
use teamforge_core::profile::team_skill_coverage;
use teamforge_core::scoring::team_compatibility;

pub fn execute(roster_path: PathBuf, members: String) -> Result<()> {
    let roster = parse_roster(&roster_path)?;

    let team: Vec<Student> = members
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| roster.student(id).cloned())
        .collect::<Result<_, _>>()?;
    anyhow::ensure!(!team.is_empty(), "no members given");

    let score = team_compatibility(&team);
    println!("Members: {}", members);
    println!("  coverage:  {:.3}", score.skill_coverage);
    println!("  balance:   {:.3}", score.skill_balance);
    println!("  diversity: {:.3}", score.skill_diversity);
    println!("  total:     {:.3}", score.total);

    let coverage = team_skill_coverage(&team, &roster.rules);
    if !coverage.is_empty() {
        println!("Requirements:");
        for req in &roster.rules.required_skills {
            let have = coverage.get(&req.skill_id).copied().unwrap_or(0);
            let status = if have >= req.min_count { "met" } else { "unmet" };
            println!(
                "  {} (>= {}): {}/{} {}",
                req.skill_id, req.min_proficiency, have, req.min_count, status
            );
        }
    }

    Ok(())
}
