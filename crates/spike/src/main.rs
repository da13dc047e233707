use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use evolution_core::catalog::{EvolutionCatalog, EvolutionPath, EvolutionRequirements};
use evolution_core::clock::{ManualClock, SystemClock};
use evolution_core::config::EngineConfig;
use evolution_core::dna::DnaType;
use evolution_core::engine::GenomeEngine;
use evolution_core::stats::AbsorbSource;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use strum::{EnumCount, IntoEnumIterator};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const WARMUP_TICKS: usize = 1_000;
/// Per-absorb budget that keeps the engine negligible inside a 60 Hz frame.
const TARGET_ABSORB_US: f64 = 50.0;

#[derive(Parser)]
#[command(name = "evolution-spike")]
#[command(about = "Genome evolution engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive an engine through a scripted sequence of gameplay calls
    Run {
        /// Path to the evolution catalog (JSON object keyed by path id)
        #[arg(long)]
        catalog: PathBuf,

        /// Path to the script (JSON array of steps)
        #[arg(long)]
        script: PathBuf,

        /// Path to an engine config file (JSON, optional)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Measure absorb and availability cost on a synthetic catalog
    Benchmark {
        /// Number of synthetic catalog paths
        #[arg(long, default_value_t = 80)]
        paths: usize,

        /// Number of timed absorb calls
        #[arg(long, default_value_t = 100_000)]
        ticks: usize,
    },
    /// Dump the default engine configuration to stdout
    DumpDefaultConfig,
}

/// One scripted gameplay call.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Step {
    Absorb {
        dna_type: DnaType,
        amount: f32,
        source: AbsorbSource,
    },
    Kill {
        dna_type: DnaType,
        experience: f32,
    },
    Evolve {
        path_id: String,
    },
    Mutate {
        mutation_id: String,
        #[serde(default)]
        target: Option<DnaType>,
    },
    Grant {
        points: u32,
    },
    Advance {
        ms: u64,
    },
    ResetOffered,
    Reset,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {what} file {path:?}"))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {what}"))
}

/// Apply one step. Evolve and mutate steps return their outcome line.
fn apply_step(
    engine: &mut GenomeEngine,
    clock: &ManualClock,
    step: Step,
) -> Option<serde_json::Value> {
    match step {
        Step::Absorb {
            dna_type,
            amount,
            source,
        } => engine.absorb(dna_type, amount, source),
        Step::Kill {
            dna_type,
            experience,
        } => engine.absorb_kill(dna_type, experience),
        Step::Evolve { path_id } => {
            let ok = engine.evolve(&path_id);
            return Some(serde_json::json!({ "op": "evolve", "path_id": path_id, "ok": ok }));
        }
        Step::Mutate {
            mutation_id,
            target,
        } => {
            let ok = engine.apply_mutation(&mutation_id, target);
            return Some(
                serde_json::json!({ "op": "mutate", "mutation_id": mutation_id, "ok": ok }),
            );
        }
        Step::Grant { points } => engine.grant_mutation_points(points),
        Step::Advance { ms } => clock.advance(ms),
        Step::ResetOffered => engine.reset_offered_evolutions(),
        Step::Reset => engine.reset(),
    }
    None
}

fn run_script(catalog: &Path, script: &Path, config: Option<&Path>) -> Result<()> {
    let config: EngineConfig = match config {
        Some(path) => read_json(path, "config")?,
        None => EngineConfig::default(),
    };
    let catalog_text = fs::read_to_string(catalog)
        .with_context(|| format!("failed to read catalog file {catalog:?}"))?;
    let catalog =
        EvolutionCatalog::from_json_str(&catalog_text).context("failed to parse catalog")?;
    let steps: Vec<Step> = read_json(script, "script")?;
    info!(steps = steps.len(), "starting scripted run");

    let clock = ManualClock::new(0);
    let mut engine = GenomeEngine::new(config, Arc::new(catalog))
        .context("engine configuration error")?
        .with_clock(clock.clone());
    info!(
        seed = engine.config().seed,
        paths = engine.catalog().len(),
        mutations = engine.mutations().len(),
        "engine ready"
    );
    engine.subscribe(|event| match serde_json::to_string(event) {
        Ok(line) => println!("{line}"),
        Err(e) => warn!("failed to serialize event: {e}"),
    });

    for step in steps {
        if let Some(outcome) = apply_step(&mut engine, &clock, step) {
            println!("{outcome}");
        }
    }

    info!(
        form = engine.current_form(),
        total_dna = engine.genome().total_value(),
        "scripted run finished"
    );
    println!("{}", serde_json::to_string(&engine.stats())?);
    println!("{}", serde_json::to_string(&engine.dna_breakdown())?);
    Ok(())
}

/// Tiered catalog: each lineage gets paths at rising thresholds and generations.
fn synthetic_catalog(paths: usize, rng: &mut ChaCha12Rng) -> EvolutionCatalog {
    let types: Vec<DnaType> = DnaType::iter().collect();
    EvolutionCatalog::from_paths((0..paths).map(|i| {
        let primary = types[i % DnaType::COUNT];
        let tier = (i / DnaType::COUNT) as u32;
        let mut requirements = EvolutionRequirements {
            min_kills: tier * 10,
            min_generation: tier,
            ..EvolutionRequirements::default()
        };
        requirements
            .min_dna
            .insert(primary, 20.0 + 25.0 * tier as f32);
        let secondary = types[rng.random_range(0..types.len())];
        if secondary != primary {
            requirements
                .max_dna
                .insert(secondary, rng.random_range(10.0..60.0));
        }
        EvolutionPath::new(format!("{}_t{tier}_{i}", primary.as_str()), requirements)
    }))
}

fn run_benchmark(paths: usize, ticks: usize, cooldown_ms: u64) -> Result<f64> {
    if ticks == 0 {
        bail!("ticks must be positive");
    }
    let mut rng = ChaCha12Rng::seed_from_u64(42);
    let catalog = Arc::new(synthetic_catalog(paths, &mut rng));
    let config = EngineConfig {
        offer_cooldown_ms: cooldown_ms,
        ..EngineConfig::default()
    };
    let mut engine = GenomeEngine::new(config, catalog)
        .context("engine configuration error")?
        .with_clock(SystemClock::new());

    let types: Vec<DnaType> = DnaType::iter().collect();
    let absorb_random = |engine: &mut GenomeEngine, rng: &mut ChaCha12Rng| {
        let dna_type = types[rng.random_range(0..types.len())];
        let source = if rng.random_bool(0.5) {
            AbsorbSource::Kill
        } else {
            AbsorbSource::Loot
        };
        engine.absorb(dna_type, rng.random_range(1.0..15.0), source);
    };

    for _ in 0..WARMUP_TICKS {
        absorb_random(&mut engine, &mut rng);
    }

    let start = Instant::now();
    for _ in 0..ticks {
        absorb_random(&mut engine, &mut rng);
    }
    let avg_us = start.elapsed().as_secs_f64() * 1_000_000.0 / ticks as f64;

    println!("--- {paths} paths, cooldown {cooldown_ms} ms ---");
    println!("  Avg absorb:    {avg_us:.2} us");
    println!(
        "  Available now: {} (generation {})",
        engine.available_paths().len(),
        engine.genome().generation()
    );
    Ok(avg_us)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::DumpDefaultConfig => {
            let config = EngineConfig::default();
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Commands::Benchmark { paths, ticks } => {
            if cfg!(debug_assertions) {
                eprintln!("WARNING: running in debug mode. Results are not representative.");
                eprintln!("         Use: cargo run -p evolution-spike --release -- benchmark");
                eprintln!();
            }
            println!("=== Genome Engine Benchmark ===");
            println!("Warmup: {WARMUP_TICKS} absorbs, Timed: {ticks} absorbs");
            println!();

            // Cooldown 0 forces a full availability scan on every absorb.
            let mut worst = 0.0f64;
            for cooldown in [EngineConfig::default().offer_cooldown_ms, 0] {
                worst = worst.max(run_benchmark(paths, ticks, cooldown)?);
            }
            let verdict = if worst <= TARGET_ABSORB_US {
                "GO"
            } else {
                "NO-GO"
            };
            println!();
            println!("Verdict: {verdict} (target: <={TARGET_ABSORB_US} us per absorb)");
        }
        Commands::Run {
            catalog,
            script,
            config,
        } => run_script(&catalog, &script, config.as_deref())?,
    }
    Ok(())
}
