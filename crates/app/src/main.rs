use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use gateway::GatewayConfig;
use quiz_core::model::{AssignmentId, UserId};
use services::{AppServices, AssessmentService, Clock};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};
use url::Url;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidId { flag: &'static str, raw: String },
    MissingUserId,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidId { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::MissingUserId => write!(f, "no learner given: pass --user-id or set QUIZ_USER_ID"),
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

fn parse_id(raw: String, flag: &'static str) -> Result<u64, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidId { flag, raw })
}

struct DesktopApp {
    user_id: UserId,
    initial_assignment: Option<AssignmentId>,
    file_base_url: Option<Url>,
    assessments: Arc<AssessmentService>,
}

impl UiApp for DesktopApp {
    fn user_id(&self) -> UserId {
        self.user_id
    }

    fn initial_assignment(&self) -> Option<AssignmentId> {
        self.initial_assignment
    }

    fn file_base_url(&self) -> Option<Url> {
        self.file_base_url.clone()
    }

    fn assessments(&self) -> Arc<AssessmentService> {
        Arc::clone(&self.assessments)
    }
}

#[derive(Debug)]
struct Args {
    api: Option<String>,
    user_id: UserId,
    assignment_id: Option<AssignmentId>,
    verbose: bool,
}

enum Parsed {
    Run(Args),
    Help,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api <url>] [--user-id <id>] [--assignment-id <id>] [--verbose]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --api            assignment service base URL");
    eprintln!("  --user-id        learner whose assignments are shown");
    eprintln!("  --assignment-id  open this assignment straight away");
    eprintln!("  --verbose        log at debug level unless QUIZ_LOG/RUST_LOG is set");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_API_BASE_URL, QUIZ_API_TIMEOUT_SECS, QUIZ_USER_ID, QUIZ_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Parsed, ArgsError> {
        let mut api = None;
        let mut user_id = std::env::var("QUIZ_USER_ID")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok());
        let mut assignment_id = None;
        let mut verbose = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api" => api = Some(require_value(args, "--api")?),
                "--user-id" => {
                    let value = require_value(args, "--user-id")?;
                    user_id = Some(parse_id(value, "--user-id")?);
                }
                "--assignment-id" => {
                    let value = require_value(args, "--assignment-id")?;
                    assignment_id = Some(AssignmentId::new(parse_id(value, "--assignment-id")?));
                }
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let user_id = user_id.map(UserId::new).ok_or(ArgsError::MissingUserId)?;
        Ok(Parsed::Run(Self {
            api,
            user_id,
            assignment_id,
            verbose,
        }))
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "debug"
    } else {
        "info,gateway=info,services=info"
    };
    let filter = EnvFilter::try_from_env("QUIZ_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = match Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })? {
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
        Parsed::Run(args) => args,
    };

    init_tracing(args.verbose);

    let mut config = GatewayConfig::from_env()?;
    if let Some(api) = args.api.as_deref() {
        config = config.with_base_url(api)?;
    }
    tracing::info!(
        api = %config.base_url(),
        user_id = %args.user_id,
        "starting assessment client"
    );

    let services = AppServices::new_http(config, Clock::system(), args.user_id)?;
    let app = DesktopApp {
        user_id: services.user(),
        initial_assignment: args.assignment_id,
        file_base_url: services.config().map(|c| c.file_base_url().clone()),
        assessments: services.assessments(),
    };

    let app: Arc<dyn UiApp> = Arc::new(app);
    let context = build_app_context(&app);

    // Some dev setups open the window always-on-top; keep it a normal window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
