//! The `teamforge form` command.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;

use teamforge_core::config::load_config_from;
use teamforge_core::parser::{parse_roster, validate_roster};
use teamforge_core::report::FormationReport;

pub fn execute(
    roster_path: PathBuf,
    window: Option<usize>,
    output: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(window) = window {
        anyhow::ensure!(window >= 1, "window must be at least 1");
        config.candidate_window = window;
    }

    let roster = parse_roster(&roster_path)?;
    for w in validate_roster(&roster) {
        tracing::warn!("{}", w.message);
    }

    let start = Instant::now();
    let teams = config.engine().form_teams(&roster.students, &roster.rules)?;
    let elapsed = start.elapsed();

    let report = FormationReport::new(
        roster.name.clone(),
        &roster.rules,
        roster.students.len(),
        &teams,
        elapsed.as_millis() as u64,
    );

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "markdown" | "md" => println!("{}", report.to_markdown()),
        _ => print_teams(&report),
    }

    if let Some(dir) = output {
        let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");
        let path = dir.join(format!("teams-{timestamp}.json"));
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn print_teams(report: &FormationReport) {
    use comfy_table::{Cell, Table};

    println!(
        "Roster: {} ({} students, teams of {}-{})",
        report.roster,
        report.student_count,
        report.rules.min_team_size,
        report.rules.max_team_size
    );

    if report.teams.is_empty() {
        println!("No teams formed: roster is smaller than min_team_size.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Members", "Size", "Unmet", "Compatibility", "Avg Prof."]);
    for (i, team) in report.teams.iter().enumerate() {
        let unmet = if team.unmet_requirements.is_empty() {
            "-".to_string()
        } else {
            team.unmet_requirements.join(", ")
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(team.members.join(", ")),
            Cell::new(team.size),
            Cell::new(unmet),
            Cell::new(format!("{:.2}", team.compatibility.total)),
            Cell::new(format!("{:.1}", team.average_proficiency)),
        ]);
    }
    println!("{table}");

    let summary = &report.summary;
    println!(
        "{} teams, {} fully covered, {} over max size, mean compatibility {:.2}",
        summary.team_count, summary.fully_covered, summary.oversized, summary.mean_compatibility
    );
}
