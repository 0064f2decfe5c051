use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use carousel_config::{ConfigLoad, ConfigLoader};
use carousel_core::Lifecycle;
use carouselctl::check::write_report;
use carouselctl::output::write_record;
use carouselctl::realtime::RealtimeRun;
use carouselctl::script::parse_run_duration;
use carouselctl::{OutputFormat, Record, ScriptStep, Simulation, parse_script};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(
    name = "carouselctl",
    version,
    about = "Drive the headless carousel engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a script on a virtual clock and print lifecycle events
    Simulate {
        #[command(flatten)]
        config: ConfigArgs,
        #[command(flatten)]
        carousel: CarouselArgs,
        /// Script file, or `-` for stdin
        script: Option<PathBuf>,
        /// Inline steps, run after the script file (e.g. -s "next; wait 1s")
        #[arg(short, long = "step")]
        steps: Vec<String>,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Run in real time, sleeping until each engine deadline
    Run {
        #[command(flatten)]
        config: ConfigArgs,
        #[command(flatten)]
        carousel: CarouselArgs,
        /// Script file, or `-` for stdin; `wait` steps sleep for real
        script: Option<PathBuf>,
        #[arg(short, long = "step")]
        steps: Vec<String>,
        /// How long to keep running after the last step
        #[arg(long, default_value = "10s", value_parser = parse_run_duration)]
        duration: Duration,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Load configuration and report the effective options and warnings
    CheckConfig {
        #[command(flatten)]
        config: ConfigArgs,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
        /// Fail when the configuration produced warnings
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Args)]
struct ConfigArgs {
    /// Options file (default: $CAROUSEL_CONFIG, then ./carousel.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// File with CAROUSEL_* variables (default: ./.env when present)
    #[arg(long)]
    env_file: Option<PathBuf>,
}

impl ConfigArgs {
    fn load(&self) -> Result<ConfigLoad> {
        let mut loader = ConfigLoader::new();
        if let Some(path) = &self.env_file {
            loader = loader.with_env_file(path);
        }
        if let Some(path) = &self.config {
            loader = loader.with_config_path(path);
        }
        loader.load().context("failed to load carousel configuration")
    }
}

#[derive(Args)]
struct CarouselArgs {
    /// Number of generated slides
    #[arg(long, default_value_t = 4)]
    slides: usize,
    /// Force autoplay off regardless of configuration
    #[arg(long)]
    no_autoplay: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate {
            config,
            carousel,
            script,
            steps,
            format,
        } => {
            let mut options = config.load()?.options;
            if carousel.no_autoplay {
                options.auto_play = false;
            }
            let steps = read_steps(script.as_deref(), &steps)?;

            let mut sim = Simulation::new(carousel.slides, options);
            if let Lifecycle::Inert(err) = sim.lifecycle() {
                bail!("carousel did not start: {err}");
            }
            info!(steps = steps.len(), "simulating");

            let mut out = io::stdout().lock();
            for record in sim.run(steps) {
                write_record(&mut out, format, &record)
                    .context("failed to write output")?;
            }
            out.flush()?;
        }
        Command::Run {
            config,
            carousel,
            script,
            steps,
            duration,
            format,
        } => {
            let mut options = config.load()?.options;
            if carousel.no_autoplay {
                options.auto_play = false;
            }
            let run = RealtimeRun {
                slides: carousel.slides,
                options,
                steps: read_steps(script.as_deref(), &steps)?,
                duration,
                format,
            };
            let summary = run.execute().await?;
            write_record(&mut io::stdout().lock(), format, &Record::Summary(summary))?;
        }
        Command::CheckConfig {
            config,
            format,
            strict,
        } => {
            let load = config.load()?;
            write_report(&mut io::stdout().lock(), format, &load)?;
            if strict && !load.warnings.is_empty() {
                bail!(
                    "configuration produced {} warning(s)",
                    load.warnings.len()
                );
            }
        }
    }

    Ok(())
}

/// Steps from the script file (if any) followed by the inline ones.
fn read_steps(script: Option<&Path>, inline: &[String]) -> Result<Vec<ScriptStep>> {
    let mut steps = Vec::new();
    if let Some(path) = script {
        let source = if path == Path::new("-") {
            io::read_to_string(io::stdin())
                .context("failed to read script from stdin")?
        } else {
            fs::read_to_string(path).with_context(|| {
                format!("failed to read script {}", path.display())
            })?
        };
        steps.extend(
            parse_script(&source)
                .with_context(|| format!("invalid script {}", path.display()))?,
        );
    }
    for (index, chunk) in inline.iter().enumerate() {
        steps.extend(
            parse_script(chunk)
                .with_context(|| format!("invalid --step #{}", index + 1))?,
        );
    }
    Ok(steps)
}
