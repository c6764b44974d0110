use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::config::{API_TIMEOUT_ENV, API_URL_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use services::{Clock, ConfigError, GenerationConfig, HttpGenerationClient, StudyLoopService};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidTimeout { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidTimeout { raw } => write!(f, "invalid --timeout-secs value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    study_loop: Arc<StudyLoopService>,
}

impl UiApp for DesktopApp {
    fn study_loop(&self) -> Arc<StudyLoopService> {
        Arc::clone(&self.study_loop)
    }
}

/// Command-line overrides; anything left `None` comes from the environment.
#[derive(Debug, Default)]
struct Args {
    api_url: Option<String>,
    timeout_secs: Option<u64>,
    help: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => parsed.api_url = Some(require_value(args, "--api-url")?),
                "--timeout-secs" => {
                    let value = require_value(args, "--timeout-secs")?;
                    let secs = services::config::parse_timeout_secs(&value)
                        .map_err(|_| ArgsError::InvalidTimeout { raw: value.clone() })?;
                    parsed.timeout_secs = Some(secs);
                }
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(parsed)
    }

    fn generation_config(&self) -> Result<GenerationConfig, ConfigError> {
        let config = GenerationConfig::from_lookup(|key| match key {
            API_URL_ENV => self.api_url.clone().or_else(|| std::env::var(key).ok()),
            _ => std::env::var(key).ok(),
        })?;
        Ok(match self.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--timeout-secs <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url {DEFAULT_BASE_URL}");
    eprintln!("  --timeout-secs {DEFAULT_TIMEOUT_SECS}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {API_URL_ENV}, {API_TIMEOUT_ENV}, RUST_LOG");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if parsed.help {
        print_usage();
        return Ok(());
    }

    init_tracing();

    let config = parsed.generation_config()?;
    info!(
        endpoint = %config.process_url(),
        timeout_secs = config.timeout().as_secs(),
        "starting study app"
    );

    let client = HttpGenerationClient::new(&config)?;
    let study_loop = Arc::new(StudyLoopService::new(Clock::system(), Arc::new(client)));
    let context = build_app_context(Arc::new(DesktopApp { study_loop }));

    // Some dev setups open the window always-on-top unless told otherwise.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Study Flashcards")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
