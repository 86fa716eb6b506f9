//! The `teamforge init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create teamforge.toml
    if std::path::Path::new("teamforge.toml").exists() {
        println!("teamforge.toml already exists, skipping.");
    } else {
        std::fs::write("teamforge.toml", SAMPLE_CONFIG)?;
        println!("Created teamforge.toml");
    }

    // Create example roster
    std::fs::create_dir_all("rosters")?;
    let example_path = std::path::Path::new("rosters/example.toml");
    if example_path.exists() {
        println!("rosters/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_ROSTER)?;
        println!("Created rosters/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit rosters/example.toml with your students and requirements");
    println!("  2. Run: teamforge validate --roster rosters/example.toml");
    println!("  3. Run: teamforge form --roster rosters/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# teamforge configuration

# Candidates the greedy assembler scores for each pick.
candidate_window = 10

# Minimum compatibility for `teamforge match` suggestions.
acceptance_threshold = 0.5

# Team size (including the student) for `teamforge match`.
default_match_size = 3

output_dir = "./teamforge-results"
"#;

const EXAMPLE_ROSTER: &str = r#"name = "Example Section"

[rules]
min_team_size = 2
max_team_size = 3

[[rules.required_skills]]
skill_id = "js"
min_proficiency = 3
min_count = 1

[[rules.required_skills]]
skill_id = "python"
min_proficiency = 3
min_count = 1

[rules.skill_distribution_rules]
diversity_weight = 0.5

[[students]]
id = "ada"
skills = [
    { skill_id = "js", proficiency_level = 4 },
    { skill_id = "react", proficiency_level = 3 },
]

[[students]]
id = "grace"
skills = [
    { skill_id = "python", proficiency_level = 4 },
    { skill_id = "django", proficiency_level = 3 },
]

[[students]]
id = "linus"
skills = [
    { skill_id = "js", proficiency_level = 2 },
    { skill_id = "python", proficiency_level = 5 },
]

[[students]]
id = "barbara"
skills = [
    { skill_id = "sql", proficiency_level = 4 },
    { skill_id = "js", proficiency_level = 3 },
]

[[students]]
id = "ken"
skills = [
    { skill_id = "c", proficiency_level = 5 },
]

[[students]]
id = "margaret"
skills = [
    { skill_id = "python", proficiency_level = 3 },
    { skill_id = "design", proficiency_level = 2 },
]
"#;
