mod shell;
mod vm;

use std::fmt;

use services::{AppServices, Clock, ServiceOptions};
use tracing_subscriber::EnvFilter;

use crate::shell::{Mode, Shell};

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidQuizSize { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidQuizSize { raw } => write!(f, "invalid --quiz-size value: {raw}"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  academy [hub|coach|signs] [--offline] [--quiz-size <n>]");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  ACADEMY_AI_API_KEY, ACADEMY_AI_BASE_URL, ACADEMY_AI_MODEL,");
    eprintln!("  ACADEMY_AI_CONTENT_MODEL, ACADEMY_AI_TIMEOUT_SECS, ACADEMY_QUIZ_SIZE,");
    eprintln!("  ACADEMY_LOG (log filter, default info)");
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    mode: Mode,
    options: ServiceOptions,
    help: bool,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();
        let mut args = args.into_iter().peekable();

        // Default behavior: the hub when no subcommand is given.
        if let Some(first) = args.next_if(|arg| !arg.starts_with('-')) {
            parsed.mode = match first.as_str() {
                "hub" => Mode::Hub,
                "coach" => Mode::Coach,
                "signs" => Mode::Signs,
                _ => return Err(ArgsError::UnknownCommand(first)),
            };
        }

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--offline" => parsed.options.offline = true,
                "--quiz-size" => {
                    let value = require_value(&mut args, "--quiz-size")?;
                    let size = value
                        .parse::<usize>()
                        .ok()
                        .filter(|size| *size > 0)
                        .ok_or_else(|| ArgsError::InvalidQuizSize { raw: value.clone() })?;
                    parsed.options.quiz_size = Some(size);
                }
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(parsed)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("ACADEMY_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr so the shell owns stdout.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    init_tracing();

    let services = AppServices::from_env(Clock::system(), args.options);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut shell = Shell::new(services, stdin, tokio::io::stdout());
    shell.run(args.mode).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
