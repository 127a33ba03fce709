//! Arm Tracker CLI — rank pitch metrics against MLB benchmarks.
//!
//! Commands:
//! - `assess` — percentile per metric plus an overall score
//! - `benchmarks` — anchor table and the estimation method per metric
//! - `form` — the metric input fields, grouped by pitch type
//! - `contact` — compose a pre-filled `mailto:` draft

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use armtracker_core::report::{render_assessment, render_benchmarks, render_form};
use armtracker_core::{
    assess, ArmTrackerConfig, AssessError, BenchmarkStore, ContactMessage, Measurements,
    MetricKey, PitchType,
};

#[derive(Parser)]
#[command(
    name = "armtracker",
    about = "Arm Tracker — pitch metric percentiles against MLB benchmarks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute per-metric and overall percentiles.
    Assess {
        /// Measurement as KEY=VALUE (e.g. ff_avg_speed=94.2). Repeatable.
        #[arg(long = "metric", value_parser = parse_metric_arg)]
        metrics: Vec<(MetricKey, String)>,

        /// Prompt for each metric on stdin. Blank lines skip a metric.
        #[arg(long, default_value_t = false)]
        interactive: bool,

        /// Print the assessment as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// CSV of empirical samples (metric,value). Overrides the config.
        #[arg(long)]
        samples: Option<PathBuf>,
    },
    /// Show benchmark anchors, sample counts and estimation method.
    Benchmarks {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// CSV of empirical samples (metric,value). Overrides the config.
        #[arg(long)]
        samples: Option<PathBuf>,
    },
    /// List the input fields grouped by pitch type.
    Form,
    /// Compose a contact email draft and print its mailto: URL.
    Contact {
        /// Sender name.
        #[arg(long)]
        name: String,

        /// Sender email address.
        #[arg(long)]
        email: String,

        /// Message text.
        #[arg(long)]
        message: String,

        /// Recipient address. Defaults to `[contact] recipient` in the config.
        #[arg(long)]
        to: Option<String>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Assess {
            metrics,
            interactive,
            json,
            config,
            samples,
        } => {
            let args = AssessArgs {
                metrics,
                interactive,
                json,
                config,
                samples,
            };
            run_assess(
                args,
                &mut std::io::stdin().lock(),
                &mut std::io::stdout().lock(),
                &mut std::io::stderr(),
            )
        }
        Commands::Benchmarks { config, samples } => run_benchmarks(config, samples),
        Commands::Form => {
            print!("{}", render_form(&BenchmarkStore::default()));
            Ok(())
        }
        Commands::Contact {
            name,
            email,
            message,
            to,
            config,
        } => run_contact(name, email, message, to, config),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_metric_arg(s: &str) -> Result<(MetricKey, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    let key: MetricKey = key.parse().map_err(|e| format!("{e}"))?;
    Ok((key, value.to_string()))
}

fn load_config(path: Option<&Path>) -> Result<ArmTrackerConfig> {
    match path {
        Some(p) => ArmTrackerConfig::from_file(p)
            .with_context(|| format!("loading config {}", p.display())),
        None => Ok(ArmTrackerConfig::default()),
    }
}

fn load_store(config: Option<&Path>, samples: Option<&Path>) -> Result<BenchmarkStore> {
    tracing::debug!(?config, ?samples, "building benchmark store");
    let config = load_config(config)?;
    let store = config.build_store(samples)?;
    for key in store.keys_with_samples() {
        tracing::info!(%key, n = store.samples(key).len(), "using empirical samples");
    }
    Ok(store)
}

struct AssessArgs {
    metrics: Vec<(MetricKey, String)>,
    interactive: bool,
    json: bool,
    config: Option<PathBuf>,
    samples: Option<PathBuf>,
}

/// Prompts go to `prompts` so that `out` carries only the report or JSON.
fn run_assess(
    args: AssessArgs,
    input: &mut impl BufRead,
    out: &mut impl Write,
    prompts: &mut impl Write,
) -> Result<()> {
    let store = load_store(args.config.as_deref(), args.samples.as_deref())?;

    let mut measurements: Measurements = args.metrics.into_iter().collect();
    if args.interactive {
        prompt_measurements(&store, input, prompts, &mut measurements)?;
        writeln!(prompts)?;
    }

    let assessment = match assess(&store, &measurements) {
        Ok(a) => a,
        Err(AssessError::NoInput) => bail!("Please enter at least one metric"),
    };

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&assessment)?)?;
    } else {
        write!(out, "{}", render_assessment(&assessment))?;
    }
    Ok(())
}

/// Ask for every metric not already supplied, in form order.
fn prompt_measurements(
    store: &BenchmarkStore,
    input: &mut impl BufRead,
    prompts: &mut impl Write,
    measurements: &mut Measurements,
) -> Result<()> {
    let mut current_pitch: Option<PitchType> = None;

    for key in MetricKey::all() {
        if measurements.get(key).is_some() {
            continue;
        }
        if current_pitch != Some(key.pitch) {
            writeln!(prompts, "\n{}", key.pitch.label())?;
            current_pitch = Some(key.pitch);
        }

        let def = store.definition(key);
        write!(prompts, "  {} ({}): ", def.name, def.unit.trim())?;
        prompts.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        measurements.set(key, line.trim());
    }
    Ok(())
}

fn run_benchmarks(config: Option<PathBuf>, samples: Option<PathBuf>) -> Result<()> {
    let store = load_store(config.as_deref(), samples.as_deref())?;
    print!("{}", render_benchmarks(&store));
    Ok(())
}

fn run_contact(
    name: String,
    email: String,
    message: String,
    to: Option<String>,
    config: Option<PathBuf>,
) -> Result<()> {
    let recipient = resolve_recipient(to, config.as_deref())?;
    let draft = ContactMessage {
        name,
        email,
        message,
    };
    println!("{}", draft.mailto(&recipient)?);
    Ok(())
}

/// `--to` wins; otherwise `[contact] recipient` from the config.
fn resolve_recipient(to: Option<String>, config: Option<&Path>) -> Result<String> {
    if let Some(addr) = to {
        return Ok(addr);
    }
    match load_config(config)?.contact.recipient {
        Some(addr) => Ok(addr),
        None => bail!("no recipient: pass --to or set [contact] recipient in the config"),
    }
}
