use anyhow::{Context, Result};
use clap::Parser;
use moonlander::engines::generation::{ConsoleProgressCallback, GenerationStats, ProgressCallback};
use moonlander::{ConfigManager, MissionController, Outcome};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "moonlander", about = "Evolve lunar lander pilots with a genetic algorithm")]
struct Args {
    /// TOML config file; `MOONLANDER__SECTION__KEY` variables override it
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 500)]
    generations: usize,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    population: Option<usize>,

    /// Print one JSON line of statistics per generation
    #[arg(long)]
    json: bool,

    /// Write the default configuration to this path and exit
    #[arg(long)]
    write_default_config: Option<PathBuf>,
}

/// Emits generation statistics as JSON lines on stdout
struct JsonLinesCallback;

impl ProgressCallback for JsonLinesCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, stats: &GenerationStats, landed: usize) {
        let line = serde_json::json!({ "stats": stats, "landed": landed });
        println!("{}", line);
    }

    fn on_lander_evaluated(&mut self, _lander_num: usize, _total: usize, _outcome: Outcome) {}
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let manager = ConfigManager::new();

    if let Some(path) = &args.write_default_config {
        manager
            .save_to_file(path)
            .with_context(|| format!("writing {}", path.display()))?;
        log::info!("Default configuration written to {}", path.display());
        return Ok(());
    }

    manager
        .load_layered(args.config.as_deref())
        .context("loading configuration")?;
    manager
        .update(|config| {
            if let Some(seed) = args.seed {
                config.evolution.seed = Some(seed);
            }
            if let Some(population) = args.population {
                config.evolution.population_size = population;
            }
        })
        .context("applying command line overrides")?;

    let mut controller = MissionController::new(manager.get()).context("building mission")?;
    log::info!(
        "Pad at ({:.1}, {:.1}), {} landers, {} genes each",
        controller.pad().position.x,
        controller.pad().position.y,
        controller.engine().config().population_size,
        controller.engine().config().chromosome_length
    );

    let summary = if args.json {
        controller.run(args.generations, JsonLinesCallback)?
    } else {
        controller.run(args.generations, ConsoleProgressCallback)?
    };

    if let Some(trajectory) = controller.replay_fittest() {
        let eval = &trajectory.evaluation;
        log::info!(
            "Fittest lander: {} after {} ticks at ({:.1}, {:.1}), fitness {:.3}",
            eval.outcome,
            eval.ticks,
            eval.final_pose.position.x,
            eval.final_pose.position.y,
            eval.fitness
        );
    }

    if summary.success {
        log::info!("Landed after {} generations", summary.generations);
    } else {
        log::info!("No successful landing in {} generations", summary.generations);
    }

    Ok(())
}
