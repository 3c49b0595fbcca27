use clap::{Parser, Subcommand};
use pinboard_common::db::case::Case;
use pinboard_common::db::indices::CaseId;
use pinboard_common::db::parser::{case_file, solution, summary};
use pinboard_common::geom::bounds::BoardBounds;
use pinboard_common::util::config::Config;
use pinboard_common::util::profiler::format_duration;
use pinboard_common::util::{check, generator, logger, visualization};
use pinboard_router::algo::synthesize;
use pinboard_router::{CaseReport, solve_case};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng, thread_rng};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about = "Connects board pins with as few path elements as possible", long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve every case in the case file (or a single named one).
    Solve {
        #[arg(long)]
        case: Option<String>,
        #[arg(long, value_name = "FILE")]
        cases: Option<String>,
    },
    /// Write a file of random cases.
    Generate {
        #[arg(long, default_value_t = 8)]
        pins: usize,
        #[arg(long, default_value_t = 5)]
        count: usize,
        #[arg(long)]
        size: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "cases/random.toml")]
        output: String,
    },
    /// Re-validate and score a saved solution.
    Check {
        #[arg(long, value_name = "FILE")]
        solution: String,
    },
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let config = if args.config.exists() {
        log::info!("Loading configuration from {:?}", args.config);
        let config_str = std::fs::read_to_string(&args.config)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
        toml::from_str(&config_str)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?
    } else {
        log::warn!(
            "Configuration file {:?} not found. Using internal defaults.",
            args.config
        );
        Config::default()
    };

    let command = args.command.unwrap_or(Commands::Solve {
        case: None,
        cases: None,
    });

    match command {
        Commands::Solve { case, cases } => {
            let case_path = cases.unwrap_or_else(|| config.input.case_file.clone());
            run_solve(&config, &case_path, case.as_deref())?;
        }
        Commands::Generate {
            pins,
            count,
            size,
            seed,
            output,
        } => {
            let size = size.unwrap_or(config.board.size);
            run_generate(pins, count, size, seed, &output)?;
        }
        Commands::Check { solution } => {
            if !run_check(&solution)? {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn run_solve(config: &Config, case_path: &str, only: Option<&str>) -> anyhow::Result<()> {
    if !Path::new(case_path).exists() {
        return Err(anyhow::anyhow!("Case file missing: {}", case_path));
    }
    log::info!("Parsing cases: {}", case_path);
    let set = case_file::parse(case_path, config.board.size)?;

    let selected: Vec<&Case> = match only {
        Some(name) => vec![
            set.get(name)
                .ok_or_else(|| anyhow::anyhow!("No case named '{}' in {}", name, case_path))?,
        ],
        None => set.iter().collect(),
    };

    let mut rows = Vec::with_capacity(selected.len());
    for case in selected {
        log::info!(
            "Solving '{}' ({} pins, target {})...",
            case.name,
            case.pins.len(),
            case.target
        );
        let report = solve_case(case, &config.search)
            .map_err(|e| anyhow::anyhow!("Case '{}' failed: {}", case.name, e))?;

        let out_file = Path::new(&config.input.output_dir).join(format!("{}.toml", case.name));
        let record = solution::SolutionRecord {
            case: case.name.clone(),
            size: case.size,
            target: case.target,
            is_success: report.is_success,
            paths_used: report.paths_used,
            iterations: report.iterations,
            base_seed: report.base_seed,
            pins: case.pins.clone(),
            paths: report.paths.sorted(),
        };
        solution::save(&record, &out_file.to_string_lossy())?;

        if config.render.enabled {
            let png = Path::new(&config.input.output_dir).join(format!("{}.png", case.name));
            if let Err(e) = visualization::draw_board(
                &case.pins,
                &report.paths,
                BoardBounds::new(case.size),
                &png.to_string_lossy(),
                config.render.tile_px,
            ) {
                log::warn!("Could not render {:?}: {}", png, e);
            }
        }
        rows.push((case, report));
    }

    print_summary(&rows);

    let table: Vec<summary::SummaryRow> = rows
        .iter()
        .map(|(case, r)| summary::SummaryRow {
            id: case.id.index(),
            name: case.name.clone(),
            difficulty: case.difficulty.clone(),
            size: case.size,
            pins: case.pins.len(),
            target: case.target,
            is_success: r.is_success,
            paths_used: r.paths_used,
            iterations: r.iterations,
            base_seed: r.base_seed,
            elapsed: r.elapsed,
        })
        .collect();
    let csv = summary::save(&table, &config.input.output_dir)?;
    log::info!("Summary written to {:?}", csv);
    Ok(())
}

fn print_summary(rows: &[(&Case, CaseReport)]) {
    println!(
        "\n{:>3}  {:<56} {:>4} {:>5} {:>7} {:>5} {:>10} {:>10}",
        "ID", "name", "pins", "ok", "target", "used", "attempts", "time"
    );
    let mut successes = 0;
    let mut saved: i64 = 0;
    let mut total_time = Duration::ZERO;
    for (case, r) in rows {
        println!(
            "{:>3}  {:<56} {:>4} {:>5} {:>7} {:>5} {:>10} {:>10}",
            case.id.index(),
            case.name,
            case.pins.len(),
            r.is_success,
            case.target,
            r.paths_used,
            r.iterations,
            format_duration(r.elapsed)
        );
        if r.is_success {
            successes += 1;
        }
        saved += case.target as i64 - r.paths_used as i64;
        total_time += r.elapsed;
    }
    println!(
        "\nTotal score:\n- {}/{} successes\n- {} paths\n- {} run time",
        successes,
        rows.len(),
        saved,
        format_duration(total_time)
    );
}

fn run_generate(
    num_pins: usize,
    count: usize,
    size: u32,
    seed: Option<u64>,
    output: &str,
) -> anyhow::Result<()> {
    let seed = seed.unwrap_or_else(|| thread_rng().r#gen());
    let mut rng = StdRng::seed_from_u64(seed);
    let bounds = BoardBounds::new(size);
    log::info!(
        "Generating {} cases with {} pins on a {}x{} board (seed {})...",
        count,
        num_pins,
        size,
        size,
        seed
    );

    let mut cases = Vec::with_capacity(count);
    for version in 0..count {
        let pins = generator::generate_pins(&mut rng, num_pins, bounds)?;
        // A single greedy pass is always reachable, so it makes a fair target.
        let target = synthesize(&pins, 0, &mut rng).unique_len();
        cases.push(Case {
            id: CaseId::new(version),
            name: format!(
                "schwierigkeit-zufall_size-{}_pins-{}_kanten-{}_version-{}",
                size, num_pins, target, version
            ),
            difficulty: "zufall".to_string(),
            size,
            target,
            pins,
        });
    }

    case_file::write(&cases, output)?;
    log::info!("Generated: {}", output);
    Ok(())
}

fn run_check(path: &str) -> anyhow::Result<bool> {
    let record = solution::load(path)?;
    let bounds = BoardBounds::new(record.size);

    if let Err(e) = check::validate_paths(record.paths.as_slice(), bounds) {
        log::error!("\x1b[31mFAIL\x1b[0m: '{}' has malformed paths: {}", record.case, e);
        return Ok(false);
    }
    let score = check::score(record.paths.as_slice(), &record.pins)?;
    if score.is_success {
        log::info!(
            "\x1b[32mPASS\x1b[0m: '{}' connects all pins using {}/{} path elements.",
            record.case,
            score.paths_used,
            record.target
        );
    } else {
        log::error!(
            "\x1b[31mFAIL\x1b[0m: '{}' does not connect all pins ({} clusters).",
            record.case,
            score.pin_clusters
        );
    }
    Ok(score.is_success)
}
