use chrono::Datelike;
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};
use yogaplan_core::*;

#[derive(Parser)]
#[command(name = "yogaplan")]
#[command(about = "Personalized weekly yoga and wellness plans", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a weekly plan (default)
    Plan {
        #[command(flatten)]
        request: PlanRequest,
    },

    /// Show only today's session
    Today {
        #[command(flatten)]
        request: PlanRequest,
    },

    /// Show or update the stored profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// List the content library
    Library {
        /// Only list one category (warmup, main_practice, breathing, meditation, cooldown)
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Print the stored profile
    Show,

    /// Merge the given fields into the stored profile
    Set {
        #[command(flatten)]
        fields: ProfileFields,
    },
}

/// Profile fields accepted on the command line
#[derive(Args, Clone, Default)]
struct ProfileFields {
    /// Age in years
    #[arg(long)]
    age: Option<u32>,

    /// Medical condition (repeatable, "none" for no conditions)
    #[arg(long = "condition")]
    conditions: Vec<String>,

    /// Fitness level (low, beginner, moderate, high, athlete)
    #[arg(long)]
    fitness: Option<String>,

    /// Wellness goal (repeatable)
    #[arg(long = "goal")]
    goals: Vec<String>,

    /// Single purpose, used when no goals are given
    #[arg(long)]
    purpose: Option<String>,

    /// Free-text injury description
    #[arg(long)]
    injuries: Option<String>,
}

impl ProfileFields {
    fn into_raw(self) -> RawProfile {
        RawProfile {
            age: self.age,
            conditions: (!self.conditions.is_empty()).then_some(self.conditions),
            medical_conditions: None,
            fitness_level: self.fitness,
            goals: (!self.goals.is_empty()).then_some(self.goals),
            purpose: self.purpose,
            injuries: self.injuries,
        }
    }
}

#[derive(Args, Clone, Default)]
struct PlanRequest {
    #[command(flatten)]
    fields: ProfileFields,

    /// Read the profile from a JSON file
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Seed for reproducible plans
    #[arg(long)]
    seed: Option<u64>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Plans go to stdout, so keep logs quiet unless asked
    let level = if cli.verbose { "debug" } else { "warn" };
    yogaplan_core::logging::init_with_level(level);

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    match cli.command {
        Some(Commands::Plan { request }) => cmd_plan(&data_dir, request, &config),
        Some(Commands::Today { request }) => cmd_today(&data_dir, request, &config),
        Some(Commands::Profile { action }) => cmd_profile(&data_dir, action),
        Some(Commands::Library { category }) => cmd_library(category, &config),
        None => {
            // Default to "plan" command
            cmd_plan(&data_dir, PlanRequest::default(), &config)
        }
    }
}

fn cmd_plan(data_dir: &Path, request: PlanRequest, config: &Config) -> Result<()> {
    let json = request.json || config.output.format == OutputFormat::Json;
    let plan = build_plan(data_dir, request, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        display_plan(&plan);
    }

    Ok(())
}

fn cmd_today(data_dir: &Path, request: PlanRequest, config: &Config) -> Result<()> {
    let json = request.json || config.output.format == OutputFormat::Json;
    let plan = build_plan(data_dir, request, config)?;
    let today = Day::from(chrono::Local::now().weekday());

    let session = plan
        .session_for(today)
        .ok_or_else(|| Error::Other(format!("No session for {}", today)))?;

    if json {
        println!("{}", serde_json::to_string_pretty(session)?);
    } else {
        let focus = plan
            .weekly_schedule
            .iter()
            .find(|d| d.day == today)
            .map(|d| d.focus.as_str())
            .unwrap_or(REST_FOCUS);
        display_session(today, focus, session);
    }

    Ok(())
}

fn cmd_profile(data_dir: &Path, action: ProfileAction) -> Result<()> {
    let store = ProfileStore::in_dir(data_dir);

    match action {
        ProfileAction::Show => {
            if !store.exists() {
                println!("No stored profile - defaults apply.");
            }
            let raw = store.load()?;
            println!("{}", serde_json::to_string_pretty(&raw)?);
            println!();
            display_profile(&normalize(&raw));
        }
        ProfileAction::Set { fields } => {
            let updated = store.update(fields.into_raw())?;
            println!("✓ Profile saved to {}", store.path().display());
            display_profile(&normalize(&updated));
        }
    }

    Ok(())
}

fn cmd_library(category: Option<String>, config: &Config) -> Result<()> {
    let library = load_library(config)?;

    let categories = match category {
        Some(c) => vec![c.parse::<Category>().map_err(Error::Other)?],
        None => Category::ALL.to_vec(),
    };

    for category in categories {
        println!("{} ({})", category.label(), category.as_str());
        for item in library.in_category(category) {
            let mut line = format!(
                "  {:<20} {:<28} {}-{} min",
                item.id, item.name, item.duration.min, item.duration.max
            );
            if !item.contraindications.is_empty() {
                line.push_str(&format!("  avoid: {}", item.contraindications.join(", ")));
            }
            println!("{}", line);
        }
        println!();
    }

    Ok(())
}

/// Stored profile, overlaid with a profile file, overlaid with flags
fn build_plan(data_dir: &Path, request: PlanRequest, config: &Config) -> Result<Plan> {
    let library = load_library(config)?;

    let mut raw = ProfileStore::in_dir(data_dir).load()?;

    if let Some(path) = &request.profile {
        let contents = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&contents)?;
        raw.merge(RawProfile::from_value(&value)?);
    }

    raw.merge(request.fields.into_raw());

    let plan = match request.seed {
        Some(seed) => generate_plan_with(&library, &raw, &mut ChaCha8Rng::seed_from_u64(seed)),
        None => generate_plan_with(&library, &raw, &mut StdRng::from_entropy()),
    };

    Ok(plan)
}

fn load_library(config: &Config) -> Result<std::borrow::Cow<'static, ContentLibrary>> {
    let library = config.library.resolve()?;
    let errors = library.validate();
    if !errors.is_empty() {
        eprintln!("Library validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::LibraryValidation("Invalid library".into()));
    }
    Ok(library)
}

fn display_plan(plan: &Plan) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  WEEKLY YOGA PLAN");
    println!("╰─────────────────────────────────────────╯");
    println!();
    display_profile(&plan.profile);
    println!();

    for day in &plan.weekly_schedule {
        if day.active {
            println!("  {:<10} {:>3} min  {}", day.day.name(), day.duration, day.focus);
        } else {
            println!("  {:<10}   -      {}", day.day.name(), day.focus);
        }
    }

    for day in &plan.weekly_schedule {
        if let Some(session) = plan.session_for(day.day) {
            if !session.is_rest() {
                display_session(day.day, &day.focus, session);
            }
        }
    }

    println!("\n{} progression", plan.progression.timeline);
    for block in &plan.progression.blocks {
        println!("  Weeks {}: {}", block.weeks, block.focus);
        for goal in &block.goals {
            println!("    → {}", goal);
        }
    }

    println!("\nSafety");
    for note in &plan.safety_notes {
        println!("  ⚠ {}", note);
    }
    println!();
}

fn display_session(day: Day, focus: &str, session: &DailySession) {
    match session {
        DailySession::Rest => {
            println!("\n{}: rest day", day);
        }
        DailySession::Active {
            total_duration,
            phases,
        } => {
            println!("\n{} ({} min, focus: {})", day, total_duration, focus);
            println!("─────────────────────────────────────────");
            for phase in phases {
                println!(
                    "  {} ({}/{} min)",
                    phase.label, phase.duration_minutes, phase.allocated_minutes
                );
                if phase.is_empty() {
                    println!("    (nothing suitable, rest in a comfortable position)");
                }
                for selected in &phase.activities {
                    let mut line =
                        format!("    → {} - {} min", selected.item.name, selected.recommended_duration);
                    if let Some(reps) = selected.item.reps {
                        line.push_str(&format!(" ({} x {})", reps.sets, reps.per_set));
                    }
                    if let Some(hold) = &selected.item.hold_time {
                        line.push_str(&format!(", hold {}", hold));
                    }
                    println!("{}", line);
                }
            }
        }
    }
}

fn display_profile(profile: &UserProfile) {
    let conditions = if profile.conditions.is_empty() {
        "none".to_string()
    } else {
        profile
            .conditions
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    };
    let goals = if profile.goals.is_empty() {
        "none".to_string()
    } else {
        profile.goals.join(", ")
    };

    println!("  Age: {}", profile.age);
    println!("  Fitness: {}", profile.fitness_level);
    println!("  Conditions: {}", conditions);
    println!("  Goals: {}", goals);
    if let Some(injuries) = &profile.injuries {
        println!("  Injuries: {}", injuries);
    }
}
