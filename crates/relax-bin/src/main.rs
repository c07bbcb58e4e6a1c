// relax-sim: runs one relax session against a simulated game clock and
// prints every input transition.

mod console;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use relax_config::RelaxConfig;
use relax_model::{DifficultyContext, Mods, Target, TargetSequence};
use relax_play::PlaybackLoop;
use relax_play::simulation::SimulatedGame;

use console::ConsoleActuator;

#[derive(Parser, Debug)]
#[command(name = "relax-sim", about = "Headless relax session against a scripted map")]
struct Args {
    /// JSON array of targets.
    #[arg(long)]
    map: PathBuf,

    /// Relax config JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overall difficulty.
    #[arg(long, default_value_t = 5.0)]
    od: f32,

    /// Circle size.
    #[arg(long, default_value_t = 4.0)]
    cs: f32,

    /// Approach rate.
    #[arg(long, default_value_t = 9.0)]
    ar: f32,

    /// Rate-changing mod to play with.
    #[arg(long, value_enum)]
    mods: Option<RateMod>,

    /// Fixed RNG seed for reproducible runs.
    #[arg(long, env = "RELAX_SEED")]
    seed: Option<u64>,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RateMod {
    Dt,
    Ht,
    Nc,
}

impl RateMod {
    fn mods(self) -> Mods {
        match self {
            RateMod::Dt => Mods::DOUBLE_TIME,
            RateMod::Ht => Mods::HALF_TIME,
            RateMod::Nc => Mods::DOUBLE_TIME | Mods::NIGHTCORE,
        }
    }
}

fn load_map(path: &Path) -> Result<TargetSequence> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read map {}", path.display()))?;
    let targets: Vec<Target> = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse map {}", path.display()))?;
    TargetSequence::new(targets).with_context(|| format!("invalid map {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match &args.config {
        Some(path) => RelaxConfig::read(path)?,
        None => RelaxConfig::default(),
    };
    let targets = load_map(&args.map)?;
    let mods = args.mods.map_or(Mods::empty(), RateMod::mods);
    info!(
        "loaded {} targets from {}, mods {mods:?}",
        targets.len(),
        args.map.display()
    );

    let game = Arc::new(
        SimulatedGame::new(targets)
            .with_difficulty(DifficultyContext::new(args.od, args.cs, args.ar, mods))
            .with_mods(mods),
    );
    let actuator = ConsoleActuator::new(Arc::clone(&game), true);
    let mut playback = PlaybackLoop::with_timing(Arc::clone(&game), actuator, game.ticker(), config);
    if let Some(seed) = args.seed {
        playback = playback.with_seed(seed);
    }

    let summary = playback.run();
    let transitions = playback.actuator().transitions().len();
    println!(
        "{:?}: {} presses, {} skipped, {transitions} transitions",
        summary.exit, summary.presses, summary.skipped
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_demo_map() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/stream.json");
        let map = load_map(&path).unwrap();
        assert!(!map.is_empty());
        assert!(map.iter().any(Target::is_hold));
        assert!(map.iter().any(Target::is_spinner));
    }

    #[test]
    fn rejects_unordered_map() {
        let file = write_temp(
            r#"[
                {"kind": "Tap", "start_time": 500, "end_time": 500, "position": [0.0, 0.0]},
                {"kind": "Tap", "start_time": 100, "end_time": 100, "position": [0.0, 0.0]}
            ]"#,
        );
        let err = load_map(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("invalid map"));
    }

    #[test]
    fn rejects_malformed_json() {
        let file = write_temp("[{");
        let err = load_map(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse map"));
    }

    #[test]
    fn nightcore_plays_at_double_time_rate() {
        assert_eq!(RateMod::Nc.mods().audio_rate(), 1.5);
        assert_eq!(RateMod::Ht.mods().audio_rate(), 0.75);
    }

    #[test]
    fn args_parse() {
        let args = Args::try_parse_from([
            "relax-sim", "--map", "m.json", "--mods", "dt", "--seed", "4", "-v",
        ])
        .unwrap();
        assert_eq!(args.mods, Some(RateMod::Dt));
        assert_eq!(args.seed, Some(4));
        assert!(args.verbose);
        assert_eq!(args.od, 5.0);
    }
}
