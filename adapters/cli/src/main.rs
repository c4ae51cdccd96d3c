#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives a headless Zombie Defence session.

mod clock;
mod layout;

use std::{
    fs, io,
    path::{Path, PathBuf},
    thread,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::filter::EnvFilter;
use zombie_defence_core::{CommandOutcome, GameConfig, GameStatus, WorldSnapshot};
use zombie_defence_simulation::Simulation;

use crate::{clock::FixedStep, layout::TowerPlacement};

#[derive(Debug, Parser)]
#[command(name = "zombie-defence")]
#[command(about = "Run a headless Zombie Defence session")]
struct Args {
    /// TOML configuration overriding the default tuning.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Tower to build before the session starts, as `kind@x,y`. Repeatable.
    #[arg(long = "tower", value_name = "KIND@X,Y")]
    towers: Vec<String>,
    /// Maximum number of ticks to simulate.
    #[arg(long, default_value_t = 9_000)]
    ticks: u64,
    /// Pace ticks against the wall clock instead of running flat out.
    #[arg(long)]
    realtime: bool,
    /// Extra lives to buy before the session starts.
    #[arg(long, default_value_t = 0)]
    buy_lives: u32,
    /// Continue once with synthetic waves after a victory.
    #[arg(long = "continue")]
    continue_after_victory: bool,
    /// Print the final snapshot as JSON instead of a summary.
    #[arg(long)]
    json: bool,
    /// Print the default configuration as TOML and exit.
    #[arg(long)]
    dump_config: bool,
}

/// Entry point for the Zombie Defence command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if args.dump_config {
        let rendered = toml::to_string_pretty(&GameConfig::default())
            .context("failed to render the default configuration")?;
        print!("{rendered}");
        return Ok(());
    }

    let config = load_config(args.config.as_deref())?;
    let layout = parse_layout(&args.towers)?;
    let mut simulation = Simulation::new(config).context("invalid configuration")?;
    println!("{}", simulation.welcome_banner());

    prepare(&mut simulation, &layout, args.buy_lives);
    let ticks = run(&mut simulation, &args);

    let snapshot = simulation.snapshot();
    if args.json {
        let json = serde_json::to_string_pretty(&snapshot)
            .context("failed to serialize the final snapshot")?;
        println!("{json}");
    } else {
        print_summary(&snapshot, ticks);
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };

    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration {}", path.display()))?;
    GameConfig::from_toml_str(&source)
        .with_context(|| format!("failed to load configuration {}", path.display()))
}

fn parse_layout(values: &[String]) -> Result<Vec<TowerPlacement>> {
    values
        .iter()
        .map(|value| {
            value
                .parse::<TowerPlacement>()
                .with_context(|| format!("invalid --tower value '{value}'"))
        })
        .collect()
}

/// Builds the scripted layout and buys lives before the session starts.
fn prepare(simulation: &mut Simulation, layout: &[TowerPlacement], buy_lives: u32) {
    for placement in layout {
        let _ = simulation.select_tower_type(Some(placement.kind));
        let outcome =
            simulation.place_tower(placement.position.x(), placement.position.y());
        if let CommandOutcome::Rejected(reason) = outcome {
            warn!(
                kind = placement.kind.name(),
                x = placement.position.x(),
                y = placement.position.y(),
                %reason,
                "tower placement rejected"
            );
        }
    }

    for _ in 0..buy_lives {
        if let CommandOutcome::Rejected(reason) = simulation.buy_life() {
            warn!(%reason, "life purchase rejected");
            break;
        }
    }
}

/// Runs the session until it ends or the tick budget is spent. Returns the ticks simulated.
fn run(simulation: &mut Simulation, args: &Args) -> u64 {
    if let CommandOutcome::Rejected(reason) = simulation.start_game() {
        warn!(%reason, "session could not start");
        return 0;
    }

    let mut continue_pending = args.continue_after_victory;
    let mut ticks = 0;
    let mut clock = FixedStep::new(simulation.tick_interval());
    let mut last = Instant::now();

    while ticks < args.ticks {
        if simulation.status().is_terminal() {
            if simulation.status() == GameStatus::Victory && continue_pending {
                continue_pending = false;
                if simulation.continue_after_victory().is_applied() {
                    info!("continuing after victory");
                    continue;
                }
            }
            break;
        }

        if args.realtime {
            let now = Instant::now();
            let due = clock.accumulate(now - last);
            last = now;
            if due == 0 {
                thread::sleep(clock.until_next());
                continue;
            }
            for _ in 0..due {
                if ticks >= args.ticks || simulation.status().is_terminal() {
                    break;
                }
                simulation.advance();
                ticks += 1;
            }
        } else {
            simulation.advance();
            ticks += 1;
        }
    }
    ticks
}

fn print_summary(snapshot: &WorldSnapshot, ticks: u64) {
    println!();
    println!("=== SESSION SUMMARY ===");
    println!("  Status:   {:?}", snapshot.status);
    println!(
        "  Wave:     {} of {}",
        snapshot.wave.number, snapshot.wave.total_waves
    );
    println!("  Gold:     {}", snapshot.economy.gold);
    println!("  Lives:    {}", snapshot.economy.lives);
    println!("  Towers:   {}", snapshot.towers.len());
    println!("  Enemies:  {}", snapshot.enemies.len());
    println!(
        "  Elapsed:  {:.1}s over {ticks} ticks",
        snapshot.now.as_secs_f64()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use zombie_defence_core::TowerKind;

    #[test]
    fn parses_repeated_tower_flags() {
        let args = Args::try_parse_from([
            "zombie-defence",
            "--tower",
            "archer@1,2",
            "--tower",
            "knight@4,5",
            "--ticks",
            "30",
            "--continue",
        ])
        .expect("arguments parse");

        assert_eq!(args.towers.len(), 2);
        assert_eq!(args.ticks, 30);
        assert!(args.continue_after_victory);
        assert!(!args.realtime);
    }

    #[test]
    fn invalid_layout_reports_offending_value() {
        let error = parse_layout(&["archer@1,2".to_owned(), "wizard@0,0".to_owned()])
            .expect_err("unknown kind rejected");
        assert!(error.to_string().contains("wizard@0,0"));
    }

    #[test]
    fn prepared_layout_spends_gold() {
        let mut simulation = Simulation::new(GameConfig::default()).expect("valid configuration");
        let layout = parse_layout(&["archer@1,2".to_owned(), "knight@3,3".to_owned()])
            .expect("layout parses");

        prepare(&mut simulation, &layout, 0);

        let snapshot = simulation.snapshot();
        assert_eq!(snapshot.towers.len(), 1, "path cell refused the knight");
        assert_eq!(snapshot.towers[0].kind, TowerKind::Archer);
        assert_eq!(snapshot.economy.gold, 175);
    }

    #[test]
    fn run_respects_tick_budget() {
        let mut simulation = Simulation::new(GameConfig::default()).expect("valid configuration");
        let args = Args::try_parse_from(["zombie-defence", "--ticks", "45"]).expect("parse");

        assert_eq!(run(&mut simulation, &args), 45);
        assert_eq!(simulation.snapshot().now, simulation.tick_interval() * 45);
    }
}
