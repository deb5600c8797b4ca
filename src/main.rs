use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use school_scheduler::ga::GaDriver;
use school_scheduler::parser::{load_task_config, require_valid, validate_task};
use school_scheduler::persistence;
use school_scheduler::reporter::{self, build_result, ClassroomPairs, OutputFormat};
use school_scheduler::task::TaskModel;
use school_scheduler::types::TaskConfig;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "school-scheduler")]
#[command(about = "Genetic-algorithm university timetable scheduler")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a small embedded instance, for a zero-setup smoke test
    Demo {
        #[arg(long, default_value_t = 300)]
        generations: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// Run the GA against a task config JSON file
    Solve {
        /// Path to the TaskConfig JSON document (§6)
        #[arg(short, long)]
        task: PathBuf,

        /// Output directory for schedule files
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Number of generations to run
        #[arg(short, long, default_value_t = 300)]
        generations: usize,

        /// RNG seed, for reproducible runs
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Resume from a previously persisted population snapshot
        #[arg(long)]
        resume: Option<PathBuf>,

        /// Write a population snapshot here after every generation
        #[arg(long)]
        persist: Option<PathBuf>,

        /// TOML run profile overriding generations/seed/format
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Output format(s): json, markdown, text, or all
        #[arg(short, long, default_value = "all")]
        format: String,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run only the pre-search validation pass
    Validate {
        #[arg(short, long)]
        task: PathBuf,
    },

    /// Re-render an already-produced schedule.json
    Report {
        #[arg(short, long)]
        schedule: PathBuf,

        #[arg(short, long, default_value = "markdown")]
        format: String,

        /// Restrict the view to one teacher's classes
        #[arg(long)]
        teacher: Option<String>,

        /// Restrict the view to one group's classes
        #[arg(long)]
        group: Option<String>,
    },
}

#[derive(Debug, Default, serde::Deserialize)]
struct RunProfile {
    generations: Option<usize>,
    seed: Option<u64>,
    format: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { generations, seed } => run_demo(generations, seed),
        Commands::Solve {
            task,
            output,
            generations,
            seed,
            resume,
            persist,
            profile,
            format,
            quiet,
        } => run_solve(
            &task,
            &output,
            generations,
            seed,
            resume.as_deref(),
            persist.as_deref(),
            profile.as_deref(),
            &format,
            quiet,
        ),
        Commands::Validate { task } => run_validate(&task),
        Commands::Report {
            schedule,
            format,
            teacher,
            group,
        } => run_report(&schedule, &format, teacher.as_deref(), group.as_deref()),
    }
}

/// Installs a SIGINT handler that flips a cooperative stop flag, honoring
/// §5's "the driver MUST honor a cooperative interrupt signal between
/// generations" contract.
fn install_sigint_handler() -> Result<Arc<AtomicBool>> {
    let stop = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&stop))
        .context("failed to install SIGINT handler")?;
    Ok(stop)
}

fn load_run_profile(path: &Path) -> Result<RunProfile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read run profile '{}'", path.display()))?;
    toml::from_str(&content).with_context(|| format!("failed to parse run profile '{}'", path.display()))
}

fn parse_formats(format: &str) -> Vec<OutputFormat> {
    if format.eq_ignore_ascii_case("all") {
        return vec![OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Text];
    }
    format
        .split(',')
        .filter_map(|f| match f.trim().to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "text" | "txt" => Some(OutputFormat::Text),
            _ => None,
        })
        .collect()
}

fn write_reports(result: &[ClassroomPairs], output: &Path, formats: &[OutputFormat]) -> Result<()> {
    std::fs::create_dir_all(output)
        .with_context(|| format!("failed to create output directory '{}'", output.display()))?;

    for format in formats {
        match format {
            OutputFormat::Json => {
                std::fs::write(output.join("schedule.json"), reporter::render_json(result)?)?;
            }
            OutputFormat::Markdown => {
                std::fs::write(output.join("schedule.md"), reporter::render_markdown(result))?;
            }
            OutputFormat::Text => {
                std::fs::write(output.join("schedule.txt"), reporter::render_text(result))?;
            }
        }
    }
    Ok(())
}

fn run_solve(
    task_path: &Path,
    output: &Path,
    generations: usize,
    seed: u64,
    resume: Option<&Path>,
    persist: Option<&Path>,
    profile: Option<&Path>,
    format: &str,
    quiet: bool,
) -> Result<()> {
    let config = load_task_config(task_path).context("failed to load task config")?;
    solve_and_report(
        &config, output, generations, seed, resume, persist, profile, format, quiet,
    )
}

fn solve_and_report(
    config: &TaskConfig,
    output: &Path,
    generations: usize,
    seed: u64,
    resume: Option<&Path>,
    persist: Option<&Path>,
    profile: Option<&Path>,
    format: &str,
    quiet: bool,
) -> Result<()> {
    require_valid(config)?;

    let run_profile = profile.map(load_run_profile).transpose()?.unwrap_or_default();
    let generations = run_profile.generations.unwrap_or(generations);
    let seed = run_profile.seed.unwrap_or(seed);
    let format = run_profile.format.as_deref().unwrap_or(format);

    let task = TaskModel::build(&config.data)?;
    let driver = GaDriver::new(&task, &config.weights, &config.params);
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let stop = install_sigint_handler()?;

    if !quiet {
        println!(
            "Loaded {} classrooms, {} teachers, {} groups, {} study-classes",
            config.data.classrooms.len(),
            config.data.teachers.len(),
            config.data.student_groups.len(),
            config.data.study_classes.len()
        );
    }

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(generations as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] gen {pos}/{len}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    };
    progress.tick();

    let outcome = match resume {
        Some(path) => {
            let population = persistence::load_population(path)
                .context("failed to load population to resume from")?;
            driver.run_from(population, generations, &mut rng, &stop, persist)
        }
        None => driver.run(generations, &mut rng, &stop, persist),
    };
    progress.finish_and_clear();

    let best_score = outcome.best.fitness.unwrap_or(f64::INFINITY);
    let result = build_result(&task, &outcome.best);

    if !quiet {
        reporter::print_summary(best_score, outcome.generations_run, result.len());
    }

    let formats = parse_formats(format);
    write_reports(&result, output, &formats)?;

    if quiet {
        println!("{}", serde_json::to_string(&serde_json::json!({
            "bestScore": best_score,
            "generationsRun": outcome.generations_run,
        }))?);
    } else {
        println!("{}", format!("Reports written to {}", output.display()).green());
    }

    Ok(())
}

fn run_validate(task_path: &Path) -> Result<()> {
    let config = load_task_config(task_path).context("failed to load task config")?;
    let report = validate_task(&config);

    for warning in &report.warnings {
        println!("{} {}", "Warning:".yellow(), warning);
    }
    for error in &report.errors {
        println!("{} {}", "Error:".red(), error);
    }

    if report.is_valid() {
        println!("{}", "✓ Task config is valid".green().bold());
        Ok(())
    } else {
        anyhow::bail!("validation failed with {} error(s)", report.errors.len());
    }
}

fn run_report(schedule_path: &Path, format: &str, teacher: Option<&str>, group: Option<&str>) -> Result<()> {
    let content = std::fs::read_to_string(schedule_path)
        .with_context(|| format!("failed to read schedule '{}'", schedule_path.display()))?;
    let result: Vec<ClassroomPairs> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse schedule '{}'", schedule_path.display()))?;

    if let Some(name) = teacher {
        for (classroom, pair) in reporter::teacher_view(&result, name) {
            println!(
                "{} {} {} | {} | {}",
                classroom,
                school_scheduler::domain::weekday_name(pair.weekday),
                pair.time,
                pair.course,
                pair.groups.join(", ")
            );
        }
        return Ok(());
    }
    if let Some(name) = group {
        for (classroom, pair) in reporter::group_view(&result, name) {
            println!(
                "{} {} {} | {} | {}",
                classroom,
                school_scheduler::domain::weekday_name(pair.weekday),
                pair.time,
                pair.course,
                pair.teacher
            );
        }
        return Ok(());
    }

    match parse_formats(format).first() {
        Some(OutputFormat::Json) => println!("{}", reporter::render_json(&result)?),
        Some(OutputFormat::Text) => println!("{}", reporter::render_text(&result)),
        _ => println!("{}", reporter::render_markdown(&result)),
    }
    Ok(())
}

fn run_demo(generations: usize, seed: u64) -> Result<()> {
    println!("{}", "University Timetable Scheduler: demo".bold().cyan());
    println!("{}", "─".repeat(40));
    let config = demo_task_config();
    solve_and_report(
        &config,
        Path::new("./output"),
        generations,
        seed,
        None,
        None,
        None,
        "markdown",
        false,
    )
}

/// A small, hand-built instance: two rooms, three teachers, three groups,
/// four study-classes. Enough to see the GA converge to (or near) zero
/// without any input files.
fn demo_task_config() -> TaskConfig {
    let json = serde_json::json!({
        "data": {
            "studyClasses": [
                { "courseId": 1, "teacherId": 1, "groupsIds": [1], "classroomSpecialization": "DEFAULT", "preferences": {}, "fixedTime": null, "fixedClassroomId": null },
                { "courseId": 2, "teacherId": 2, "groupsIds": [1, 2], "classroomSpecialization": "DEFAULT", "preferences": {}, "fixedTime": null, "fixedClassroomId": null },
                { "courseId": 3, "teacherId": 3, "groupsIds": [2], "classroomSpecialization": "COMPUTERS", "preferences": {}, "fixedTime": null, "fixedClassroomId": null },
                { "courseId": 1, "teacherId": 1, "groupsIds": [3], "classroomSpecialization": "DEFAULT", "preferences": {}, "fixedTime": null, "fixedClassroomId": null }
            ],
            "teachers": [
                { "id": 1, "name": "Dr. Alaniz", "preferences": {}, "windowsAllowed": true },
                { "id": 2, "name": "Prof. Bauer", "preferences": {}, "windowsAllowed": false },
                { "id": 3, "name": "Dr. Castillo", "preferences": {}, "windowsAllowed": true }
            ],
            "studentGroups": [
                { "id": 1, "name": "CS-1A", "size": 28, "degree": "BACHELOR", "availableTimes": [0,1,2,3,4,5,6,7,8,9,10,11,12,13] },
                { "id": 2, "name": "CS-1B", "size": 24, "degree": "BACHELOR", "availableTimes": [0,1,2,3,4,5,6,7,8,9,10,11,12,13] },
                { "id": 3, "name": "CS-2A-Master", "size": 15, "degree": "MASTER", "availableTimes": [0,1,2,3,4,5,6,7,8,9,10,11,12,13] }
            ],
            "classrooms": [
                { "id": 1, "name": "Room 101", "capacity": 30, "parallels": 1, "specialization": "DEFAULT", "features": [], "availableTimes": [0,1,2,3,4,5,6,7,8,9,10,11,12,13] },
                { "id": 2, "name": "Lab A", "capacity": 25, "parallels": 1, "specialization": "COMPUTERS", "features": ["PROJECTOR"], "availableTimes": [0,1,2,3,4,5,6,7,8,9,10,11,12,13] }
            ],
            "courses": [
                { "id": 1, "name": "Algorithms" },
                { "id": 2, "name": "Databases" },
                { "id": 3, "name": "Operating Systems Lab" }
            ]
        },
        "weights": {
            "gWindow": 1.0, "tWindow": 1.0, "gParallelClass": 5.0, "tParallelClass": 5.0,
            "gExcessClass": 1.0, "cStandardOverflow": 2.0, "cSpecialOverflow": 2.0,
            "gUnavailableTime": 5.0, "tPrefClassroom": 1.0, "tPrefTime": 1.0,
            "tPrefClassroomFeature": 1.0, "scPrefClassroom": 1.0, "scPrefTime": 1.0,
            "scPrefClassroomFeature": 1.0
        },
        "params": {
            "populationSize": 60, "pMadeByAlgorithm": 0.5, "hallOfFameSize": 4,
            "pMutation": 0.3, "pCrossover": 0.6, "tourSize": 3
        }
    });
    serde_json::from_value(json).expect("demo config is well-formed")
}
