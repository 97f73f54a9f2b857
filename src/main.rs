use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use toy_robot::{load_settings, settings_file, Driver, Overrides, Preset, Severity, Snapshot};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "toy-robot", version, about = "Drive a toy robot around a 5x5 table")]
struct Args {
    /// Settings file (defaults to ./toy-robot.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pause before each batch command, overriding settings
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// Print the full command history
    #[arg(long, global = true)]
    history: bool,

    /// Print a JSON snapshot instead of plain output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Run a command script from a file, or stdin when omitted or `-`
    Run { path: Option<PathBuf> },

    /// Run one of the built-in example scripts (a, b or c)
    Example { name: Preset },

    /// Apply commands from stdin one at a time as they arrive
    Repl,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let overrides = Overrides {
        step_delay_ms: args.delay_ms,
    };
    let settings =
        load_settings(args.config.as_deref(), &overrides).context("failed to load settings")?;
    init_tracing(&settings.log_filter);
    if let Some(file) = settings_file(args.config.as_deref()) {
        tracing::debug!(path = %file.display(), "loaded settings file");
    }
    tracing::debug!(
        step_delay_ms = settings.step_delay_ms,
        log_filter = %settings.log_filter,
        "settings ready"
    );

    let driver = Driver::from_settings(&settings);

    match &args.mode {
        Mode::Run { path } => {
            let script = read_script(path.as_deref())?;
            driver.run_batch(script.lines()).await;
        }
        Mode::Example { name } => {
            tracing::info!(example = %name, "running example script");
            driver.run_batch(name.script().lines()).await;
        }
        Mode::Repl => repl(&driver, args.json).await?,
    }

    print_snapshot(&driver.snapshot().await, &args)
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_script(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display())),
        _ => {
            let mut script = String::new();
            std::io::stdin()
                .read_to_string(&mut script)
                .context("failed to read script from stdin")?;
            Ok(script)
        }
    }
}

async fn repl(driver: &Driver, quiet: bool) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let Some(entry) = driver.run_one(&line).await else {
            continue;
        };
        if quiet {
            continue;
        }
        if entry.severity == Severity::Report {
            let report = driver
                .inspect(|s| s.output().iter().last().map(str::to_string))
                .await;
            if let Some(report) = report {
                println!("{report}");
            }
        } else {
            eprintln!("{entry}");
        }
    }
    Ok(())
}

fn print_snapshot(snapshot: &Snapshot, args: &Args) -> Result<()> {
    if args.json {
        println!("{}", snapshot.to_json_pretty()?);
        return Ok(());
    }

    if args.history {
        for entry in snapshot.history.iter() {
            println!("{entry}");
        }
    }
    if !matches!(args.mode, Mode::Repl) {
        for report in snapshot.output.iter() {
            println!("{report}");
        }
    }
    Ok(())
}
