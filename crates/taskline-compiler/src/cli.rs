//! Command-line interface

use crate::config::CompilerConfig;
use crate::error::ConfigError;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use taskline_render::Locale;
use tracing_subscriber::EnvFilter;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Options parsed from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    /// Effective configuration
    pub config: CompilerConfig,
    /// Keep running and recompile on changes
    pub watch: bool,
    /// Log output format
    pub log_format: LogFormat,
    /// Log at debug level unless `RUST_LOG` says otherwise
    pub verbose: bool,
}

/// Build the `taskline` command
#[must_use]
pub fn command() -> Command {
    Command::new("taskline")
        .version(crate::VERSION)
        .about("Compile task documents into a timeline dashboard page")
        .arg(
            Arg::new("watch")
                .long("watch")
                .short('w')
                .action(ArgAction::SetTrue)
                .help("Recompile whenever documents or config files change"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .value_parser(value_parser!(PathBuf))
                .help("Project root that relative paths are resolved against"),
        )
        .arg(
            Arg::new("posts")
                .long("posts")
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding task documents"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .value_parser(value_parser!(PathBuf))
                .help("Directory the page is written into"),
        )
        .arg(
            Arg::new("template")
                .long("template")
                .value_parser(value_parser!(PathBuf))
                .help("Page template file"),
        )
        .arg(
            Arg::new("timeline")
                .long("timeline")
                .value_parser(value_parser!(PathBuf))
                .help("Timeline file with the mermaid diagram"),
        )
        .arg(
            Arg::new("locale")
                .long("locale")
                .value_parser(|s: &str| s.parse::<Locale>())
                .help("Label language: zh or en"),
        )
        .arg(
            Arg::new("debounce-ms")
                .long("debounce-ms")
                .value_parser(value_parser!(u64))
                .help("Coalesce file events arriving within this many milliseconds"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .default_value("text")
                .value_parser(["text", "json"])
                .help("Log output format"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
}

/// Turn parsed arguments into options
///
/// Precedence: CLI flags over the config file over defaults. `--root` is
/// applied last, to every relative path.
///
/// # Errors
/// Any [`ConfigError`] from loading or validating the config file
pub fn options_from_matches(matches: &ArgMatches) -> Result<CliOptions, ConfigError> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => CompilerConfig::load(path)?,
        None => CompilerConfig::new(),
    };

    if let Some(dir) = matches.get_one::<PathBuf>("posts") {
        config = config.with_posts_dir(dir);
    }
    if let Some(dir) = matches.get_one::<PathBuf>("output") {
        config = config.with_output_dir(dir);
    }
    if let Some(path) = matches.get_one::<PathBuf>("template") {
        config = config.with_template_path(path);
    }
    if let Some(path) = matches.get_one::<PathBuf>("timeline") {
        config = config.with_timeline_path(path);
    }
    if let Some(locale) = matches.get_one::<Locale>("locale") {
        config = config.with_locale(*locale);
    }
    if let Some(ms) = matches.get_one::<u64>("debounce-ms") {
        config = config.with_debounce_ms(*ms);
    }
    if let Some(root) = matches.get_one::<PathBuf>("root") {
        config = config.with_root(root);
    }
    config.validate()?;

    let log_format = match matches.get_one::<String>("log-format").map(String::as_str) {
        Some("json") => LogFormat::Json,
        _ => LogFormat::Text,
    };

    Ok(CliOptions {
        config,
        watch: matches.get_flag("watch"),
        log_format,
        verbose: matches.get_flag("verbose"),
    })
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `verbose`. The default filter covers
/// every `taskline*` target.
pub fn init_tracing(format: LogFormat, verbose: bool) {
    let default_filter = if verbose { "taskline=debug" } else { "taskline=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let result = match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
    };
    if let Err(e) = result {
        eprintln!("tracing already initialized: {e}");
    }
}
