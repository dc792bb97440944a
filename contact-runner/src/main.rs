//! contact-sim headless runner
//!
//! Loads a simulation config from JSON, runs it at a fixed frame delta, and
//! logs particle counts and the equilibrium verdict.
//!
//! Usage: `contact-runner [config.json] [--frames N] [--dt SECONDS] [--seed N]
//! [--report-every N] [--snapshot out.json] [--until-equilibrium]`
//!
//! Set `RUST_LOG=debug` to see per-frame reaction activity.

use clap::Parser;
use contact_sim::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug, PartialEq)]
#[command(name = "contact-runner")]
#[command(version)]
#[command(about = "Run a Contact Process simulation without a renderer", long_about = None)]
struct RunnerArgs {
    /// Simulation config (JSON). Defaults are used when omitted or unreadable.
    config: Option<PathBuf>,

    /// Maximum number of frames to simulate
    #[arg(long, default_value_t = 3000)]
    frames: u64,

    /// Frame delta in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Log the counts every N frames
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    report_every: u64,

    /// Write a JSON snapshot of the final state here
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Stop as soon as equilibrium is reported
    #[arg(long)]
    until_equilibrium: bool,
}

fn load_config(path: Option<&PathBuf>) -> SimConfig {
    let Some(path) = path else {
        log::info!("no config file specified, using defaults");
        return SimConfig::default();
    };
    match SimConfig::load(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("failed to load config from {:?}: {}", path, e);
            log::warn!("using default configuration");
            SimConfig::default()
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = RunnerArgs::parse();

    let config = load_config(args.config.as_ref());
    let mut sim = match args.seed {
        Some(seed) => Simulation::seeded(config, seed),
        None => Simulation::new(config),
    };

    let rates = sim.rates();
    log::info!(
        "{:.0} C, pressure {:.1}, catalyst {}: forward p={:.4}, reverse p={:.4}, speed x{:.2}",
        sim.temperature(),
        sim.pressure_factor(),
        if sim.catalyst_active() { "on" } else { "off" },
        rates.forward_probability,
        rates.reverse_probability,
        rates.speed_factor
    );

    sim.set_running(true);
    let mut forward_total = 0;
    let mut reverse_total = 0;
    for _ in 0..args.frames {
        let Some(report) = sim.advance(args.dt) else {
            log::warn!("no particles left to simulate");
            break;
        };
        forward_total += report.forward_fired;
        reverse_total += report.reverse_fired;

        if report.frame % args.report_every == 0 {
            log::info!(
                "frame {:>6}: {}  equilibrium={}",
                report.frame,
                report.counts,
                report.equilibrium
            );
        }
        if args.until_equilibrium && report.equilibrium {
            log::info!("equilibrium reached at frame {}", report.frame);
            break;
        }
    }
    sim.set_running(false);

    log::info!(
        "done after {} frames ({:.1}s simulated): {} | {} forward, {} reverse",
        sim.frame(),
        sim.time().elapsed(),
        sim.counts(),
        forward_total,
        reverse_total
    );

    if let Some(path) = &args.snapshot {
        let written = serde_json::to_string_pretty(&sim.snapshot())
            .map_err(|e| e.to_string())
            .and_then(|json| fs::write(path, json).map_err(|e| e.to_string()));
        if let Err(e) = written {
            log::error!("failed to write snapshot to {:?}: {}", path, e);
            return ExitCode::FAILURE;
        }
        log::info!("snapshot written to {:?}", path);
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<RunnerArgs, clap::Error> {
        RunnerArgs::try_parse_from(std::iter::once("contact-runner").chain(list.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let parsed = args(&[]).unwrap();
        assert_eq!(parsed.config, None);
        assert_eq!(parsed.frames, 3000);
        assert_eq!(parsed.dt, 1.0 / 60.0);
        assert_eq!(parsed.seed, None);
        assert_eq!(parsed.report_every, 60);
        assert_eq!(parsed.snapshot, None);
        assert!(!parsed.until_equilibrium);
    }

    #[test]
    fn test_full_command_line() {
        let parsed = args(&[
            "run.json",
            "--frames",
            "500",
            "--dt",
            "0.02",
            "--seed",
            "9",
            "--report-every",
            "10",
            "--snapshot",
            "out.json",
            "--until-equilibrium",
        ])
        .unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("run.json")));
        assert_eq!(parsed.frames, 500);
        assert_eq!(parsed.dt, 0.02);
        assert_eq!(parsed.seed, Some(9));
        assert_eq!(parsed.report_every, 10);
        assert_eq!(parsed.snapshot, Some(PathBuf::from("out.json")));
        assert!(parsed.until_equilibrium);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(args(&["--frames"]).is_err());
        assert!(args(&["--frames", "many"]).is_err());
        assert!(args(&["--report-every", "0"]).is_err());
        assert!(args(&["--bogus"]).is_err());
        assert!(args(&["a.json", "b.json"]).is_err());
    }

    #[test]
    fn test_command_is_well_formed() {
        use clap::CommandFactory;
        RunnerArgs::command().debug_assert();
    }

    #[test]
    fn test_missing_config_falls_back() {
        let config = load_config(Some(&PathBuf::from("/nonexistent/contact.json")));
        assert_eq!(config, SimConfig::default());
    }
}
