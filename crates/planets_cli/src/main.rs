//! Command-line front end for the planets service.
//!
//! # Responsibility
//! - Build configuration, storage and enrichment client for one request.
//! - Dispatch `<method> <action> [key=value...]` and print the response.
//!
//! Output is `status=<code>` on the first line followed by the body. The
//! process exits non-zero for any non-success status.

use clap::Parser;
use log::error;
use planets_core::db::open_db;
use planets_core::{
    dispatch, init_logging, Method, PlanetService, RequestParams, ServiceConfig,
    SqlitePlanetStore, SwapiClient,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Planets record service")]
struct Args {
    /// SQLite database file (overrides PLANETS_DB_PATH).
    #[arg(long)]
    db: Option<PathBuf>,

    /// SWAPI-compatible base URL (overrides PLANETS_SWAPI_URL).
    #[arg(long)]
    swapi_url: Option<String>,

    /// Enrichment request timeout in seconds (must be positive).
    #[arg(long, value_parser = parse_timeout_secs)]
    timeout_secs: Option<u64>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Request method: get or post.
    #[arg(value_parser = parse_method)]
    method: Method,

    /// Action token: list, view, create, update or delete.
    action: String,

    /// Request parameters as key=value pairs.
    #[arg(value_parser = parse_key_value)]
    params: Vec<(String, String)>,
}

fn parse_method(value: &str) -> Result<Method, String> {
    Method::parse(value).ok_or_else(|| format!("unsupported method `{value}`; expected get|post"))
}

fn parse_timeout_secs(value: &str) -> Result<u64, String> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(format!(
            "invalid timeout `{value}`; expected a positive number of seconds"
        )),
    }
}

fn parse_key_value(value: &str) -> Result<(String, String), String> {
    value
        .split_once('=')
        .map(|(key, val)| (key.trim().to_string(), val.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("invalid parameter `{value}`; expected key=value"))
}

fn apply_overrides(config: &mut ServiceConfig, args: &Args) {
    if let Some(db) = &args.db {
        config.db_path = db.clone();
    }
    if let Some(url) = &args.swapi_url {
        config.swapi_base_url = url.clone();
    }
    if let Some(secs) = args.timeout_secs {
        config.enrichment_timeout = Duration::from_secs(secs);
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    if let Some(dir) = &args.log_dir {
        config.log_dir = Some(dir.clone());
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let mut config = ServiceConfig::from_env();
    apply_overrides(&mut config, &args);

    if let Some(dir) = &config.log_dir {
        if let Err(err) = init_logging(&config.log_level, &dir.to_string_lossy()) {
            eprintln!("logging disabled: {err}");
        }
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            error!("event=cli_start module=cli status=error error_code=db_open_failed error={err}");
            eprintln!("failed to open database `{}`: {err}", config.db_path.display());
            return ExitCode::FAILURE;
        }
    };

    let service = PlanetService::new(
        SqlitePlanetStore::new(&conn),
        SwapiClient::new(config.swapi_base_url.as_str(), config.enrichment_timeout),
    );
    let params: RequestParams = args.params.iter().cloned().collect();
    let response = dispatch(&service, args.method, &args.action, &params);

    println!("status={}", response.status.code());
    println!("{}", response.body);

    if response.status.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
