//! Command-line interface for facetq
//! Parses faceted search queries, serializes facet lists and checks round-trips.
//!
//! Usage:
//!   facetq parse `<query>` [--format `<format>`]   - Print the facets of a query
//!   facetq serialize [`<path>`]                   - Turn a JSON facet array (file or stdin) into a query
//!   facetq roundtrip `<query>`                    - Serialize, re-parse and compare
//!
//! Global options: --config `<file>`, --remainder `<category>`, --unquotable `<category>`.
//! A `facetq.toml` in the working directory is layered under --config when present.
//! Set FACETQ_LOG (e.g. `debug`) to see parser logging on stderr.

use clap::{Arg, ArgAction, ArgMatches, Command};
use facetq::query::config::{Loader, OutputFormat, Settings};
use facetq::query::{parse, serialize, Facet, QueryConfig};
use std::fmt;
use std::io::Read;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Picked up from the working directory when it exists
const LOCAL_CONFIG: &str = "facetq.toml";

/// Errors surfaced to the user before exiting
#[derive(Debug)]
enum CliError {
    Config(String),
    Io(String),
    Json(String),
    Usage(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Io(msg) => write!(f, "IO error: {}", msg),
            CliError::Json(msg) => write!(f, "Invalid facet JSON: {}", msg),
            CliError::Usage(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CliError {}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Json(err.to_string())
    }
}

fn cli() -> Command {
    Command::new("facetq")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for parsing and serializing faceted search queries")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("remainder")
                .long("remainder")
                .global(true)
                .help("Category assigned to free text (default: 'text')"),
        )
        .arg(
            Arg::new("unquotable")
                .long("unquotable")
                .global(true)
                .action(ArgAction::Append)
                .help("Category whose values are never quoted (repeatable)"),
        )
        .subcommand(
            Command::new("parse")
                .about("Print the facets of a query")
                .arg(
                    Arg::new("query")
                        .help("The query string")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format: json, tag or query (default from config)"),
                ),
        )
        .subcommand(
            Command::new("serialize")
                .about("Serialize a JSON array of facets into a query string")
                .arg(
                    Arg::new("path")
                        .help("JSON file to read (stdin when omitted)")
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("roundtrip")
                .about("Serialize a parsed query and check that it parses back the same")
                .arg(
                    Arg::new("query")
                        .help("The query string")
                        .required(true)
                        .index(1),
                ),
        )
}

fn main() -> ExitCode {
    init_logging();
    let matches = cli().get_matches();

    match run(&matches) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("FACETQ_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(matches: &ArgMatches) -> Result<ExitCode, CliError> {
    match matches.subcommand() {
        Some(("parse", sub)) => {
            let settings = load_settings(sub)?;
            let format = match sub.get_one::<String>("format") {
                Some(format) => format.parse::<OutputFormat>().map_err(CliError::Usage)?,
                None => settings.output.format,
            };
            let query = required(sub, "query")?;
            handle_parse_command(query, format, &settings)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(("serialize", sub)) => {
            let settings = load_settings(sub)?;
            let path = sub.get_one::<String>("path").map(String::as_str);
            handle_serialize_command(path, &settings.query)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(("roundtrip", sub)) => {
            let settings = load_settings(sub)?;
            let query = required(sub, "query")?;
            Ok(handle_roundtrip_command(query, &settings.query))
        }
        _ => Err(CliError::Usage("unknown command".to_string())),
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, CliError> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| CliError::Usage(format!("missing <{}>", name)))
}

/// Defaults, then `./facetq.toml` if present, then the --config file, then individual flags
fn load_settings(matches: &ArgMatches) -> Result<Settings, CliError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(remainder) = matches.get_one::<String>("remainder") {
        loader = loader.set_override("query.remainder", remainder.as_str())?;
    }
    let mut settings = loader.build()?;
    if let Some(categories) = matches.get_many::<String>("unquotable") {
        settings.query = settings.query.with_unquotable(categories.cloned());
    }
    Ok(settings)
}

/// Handle the parse command
fn handle_parse_command(
    query: &str,
    format: OutputFormat,
    settings: &Settings,
) -> Result<(), CliError> {
    let facets = parse(query, &settings.query);
    let formatted = match format {
        OutputFormat::Json if settings.output.pretty => serde_json::to_string_pretty(&facets)?,
        OutputFormat::Json => serde_json::to_string(&facets)?,
        OutputFormat::Tag => to_tag_str(&facets),
        OutputFormat::Query => serialize(&facets, &settings.query),
    };
    println!("{}", formatted);
    Ok(())
}

/// Handle the serialize command
fn handle_serialize_command(path: Option<&str>, config: &QueryConfig) -> Result<(), CliError> {
    let input = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let facets: Vec<Facet> = serde_json::from_str::<Vec<Facet>>(&input)?
        .into_iter()
        .map(Facet::normalized)
        .collect();
    println!("{}", serialize(&facets, config));
    Ok(())
}

/// Handle the roundtrip command
fn handle_roundtrip_command(query: &str, config: &QueryConfig) -> ExitCode {
    let facets = parse(query, config);
    let serialized = serialize(&facets, config);
    println!("{}", serialized);

    let reparsed = parse(&serialized, config);
    if reparsed == facets {
        ExitCode::SUCCESS
    } else {
        eprintln!("Round-trip mismatch:");
        eprintln!("  parsed:   {}", to_tag_str(&facets).replace('\n', " "));
        eprintln!("  reparsed: {}", to_tag_str(&reparsed).replace('\n', " "));
        ExitCode::from(2)
    }
}

/// One `<facet>` element per line
fn to_tag_str(facets: &[Facet]) -> String {
    facets
        .iter()
        .map(|facet| {
            format!(
                "<facet category=\"{}\">{}</facet>",
                escape(&facet.category),
                escape(facet.value())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
