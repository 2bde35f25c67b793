//! roll-runner: headless driver for the seedroll manager.
//!
//! Usage:
//!   roll-runner --seed 42 --count 10 --mode d --sides 6
//!   roll-runner --seed 1,2,3 --mode gaussian --skew -0.5
//!   roll-runner --config roll.json --ipc-mode

use anyhow::Result;
use seedroll_core::{RollConfig, RollManager, Seed};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Uniform,
    Gaussian {
        #[serde(default)]
        skew: f64,
    },
    D {
        sides: f64,
    },
    /// Absent, null or unusable seeds reseed from entropy.
    Seed {
        #[serde(default, deserialize_with = "seedroll_core::seed::deserialize_lenient")]
        seed: Option<Seed>,
    },
    MaxHistory {
        #[serde(default)]
        size: Option<usize>,
    },
    ClearHistory,
    Quit,
}

#[derive(serde::Serialize)]
struct RollState {
    seed:        Seed,
    last:        Option<f64>,
    history_len: usize,
    max_history: usize,
    mean:        Option<f64>,
    median:      Option<f64>,
    modes:       Option<Vec<f64>>,
    spread:      Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Mode {
    Uniform,
    Gaussian,
    D,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let count = parse_arg(&args, "--count", 10usize);
    let sides = parse_arg(&args, "--sides", 6.0f64);
    let skew = parse_arg(&args, "--skew", 0.0f64);
    let mode = match flag_value(&args, "--mode").unwrap_or("uniform") {
        "uniform" => Mode::Uniform,
        "gaussian" => Mode::Gaussian,
        "d" => Mode::D,
        other => anyhow::bail!("Unknown mode '{other}' (expected uniform, gaussian or d)"),
    };

    let mut config = match flag_value(&args, "--config") {
        Some(path) => RollConfig::load(path)?,
        None => RollConfig::default(),
    };
    if let Some(raw) = flag_value(&args, "--seed") {
        config.seed = Some(parse_seed(raw)?);
    }

    let mut roller = RollManager::from_config(&config);

    if ipc_mode {
        log::info!("roll-runner IPC mode, seed {}", roller.seed());
        run_ipc_loop(&mut roller)?;
    } else {
        println!("seedroll roll-runner");
        println!("  seed:   {}", roller.seed());
        println!("  mode:   {mode:?}");
        println!("  count:  {count}");
        println!();
        run_batch(&mut roller, mode, count, sides, skew)?;
        print_summary(&roller);
    }

    Ok(())
}

fn run_batch(roller: &mut RollManager, mode: Mode, count: usize, sides: f64, skew: f64) -> Result<()> {
    for i in 1..=count {
        match mode {
            Mode::Uniform => println!("  {i:>4}: {}", roller.uniform()),
            Mode::Gaussian => println!("  {i:>4}: {}", roller.gaussian(skew)?),
            Mode::D => println!("  {i:>4}: {}", roller.d(sides)?),
        }
    }
    Ok(())
}

fn run_ipc_loop(roller: &mut RollManager) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Malformed command: {}", buffer.trim());
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        if let IpcCommand::Quit = cmd {
            break;
        }
        match handle_command(roller, cmd) {
            Ok(()) => writeln!(stdout, "{}", serde_json::to_string(&build_state(roller))?)?,
            Err(e) => write_error(&mut stdout, &e.to_string())?,
        }
        stdout.flush()?;
    }
    Ok(())
}

fn handle_command(roller: &mut RollManager, cmd: IpcCommand) -> seedroll_core::RollResult<()> {
    match cmd {
        IpcCommand::GetState | IpcCommand::Quit => {}
        IpcCommand::Uniform => {
            roller.uniform();
        }
        IpcCommand::Gaussian { skew } => {
            roller.gaussian(skew)?;
        }
        IpcCommand::D { sides } => {
            roller.d(sides)?;
        }
        IpcCommand::Seed { seed } => {
            roller.reseed(seed);
        }
        IpcCommand::MaxHistory { size } => {
            if let Some(size) = size {
                roller.set_max_history(size);
            }
        }
        IpcCommand::ClearHistory => roller.clear_history(),
    }
    Ok(())
}

fn write_error(stdout: &mut io::Stdout, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(stdout, "{}", err_json)?;
    stdout.flush()?;
    Ok(())
}

fn build_state(roller: &RollManager) -> RollState {
    let history = roller.history();
    RollState {
        seed:        roller.seed().clone(),
        last:        history.last().copied(),
        history_len: history.len(),
        max_history: roller.max_history(),
        mean:        roller.mean(None).ok(),
        median:      roller.median(None).ok(),
        modes:       roller.modes(None).ok(),
        spread:      roller.standard_deviation(None).ok(),
    }
}

fn print_summary(roller: &RollManager) {
    let state = build_state(roller);
    let show = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| v.to_string());

    println!();
    println!("=== SUMMARY ===");
    println!("  recorded:  {} / {}", state.history_len, state.max_history);
    println!("  mean:      {}", show(state.mean));
    println!("  median:    {}", show(state.median));
    match &state.modes {
        Some(modes) if modes.len() <= 10 => println!("  modes:     {modes:?}"),
        Some(modes) => println!("  modes:     {} values tied", modes.len()),
        None => println!("  modes:     n/a"),
    }
    println!("  spread:    {} (normalized sd)", show(state.spread));
}

/// `42` is a scalar seed; `1,2,3` is an array seed.
fn parse_seed(raw: &str) -> Result<Seed> {
    let words = raw
        .split(',')
        .map(|w| w.trim().parse::<u64>())
        .collect::<Result<Vec<u64>, _>>()
        .map_err(|e| anyhow::anyhow!("Invalid seed '{raw}': {e}"))?;
    Ok(match words.as_slice() {
        [single] if !raw.contains(',') => Seed::Int(*single),
        _ => Seed::Array(words),
    })
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    flag_value(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
