use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use notion_rest::model::{DatabaseQuery, NewPage};
use notion_rest::{ClientConfig, Method, NotionClient};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Parser)]
#[command(
    name = "notion-cli",
    version,
    about = "Small blocking CLI for the Notion REST API"
)]
struct Cli {
    /// Integration token sent as a bearer credential.
    #[arg(long, env = "NOTION_TOKEN", hide_env_values = true)]
    token: String,

    /// Base URL for the API. Defaults to the public Notion endpoint.
    #[arg(long, env = "NOTION_BASE_URL")]
    base_url: Option<String>,

    /// Value of the `Notion-Version` header.
    #[arg(long, env = "NOTION_VERSION")]
    notion_version: Option<String>,

    /// Emit compact JSON instead of pretty-printed output.
    #[arg(long)]
    compact: bool,

    /// Log requests and pagination progress to stderr.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a page from a JSON body (`parent`, `properties`, `children`).
    AddPage(BodyInput),
    /// List every database shared with the integration.
    ListDatabases,
    /// Find a database by its exact title.
    FindDatabase {
        /// Title to look for.
        name: String,
    },
    /// List the child blocks of a page or block.
    ListBlocks {
        /// Page or block id.
        block_id: String,
    },
    /// Query a database, optionally with a JSON filter/sort body.
    QueryDatabase {
        /// Database id.
        database_id: String,

        #[command(flatten)]
        body: BodyInput,
    },
    /// Send a raw HTTP request using method + path.
    Request(RequestArgs),
}

#[derive(Debug, Args)]
struct RequestArgs {
    /// HTTP method (GET, POST, PATCH, DELETE, ...).
    method: String,

    /// Request path relative to the base URL (for example: v1/users/me).
    path: String,

    /// Query parameter in form key=value. Repeat as needed.
    #[arg(long = "query", value_name = "KEY=VALUE")]
    query: Vec<String>,

    #[command(flatten)]
    body: BodyInput,
}

#[derive(Debug, Args)]
struct BodyInput {
    /// JSON request body literal.
    #[arg(long, conflicts_with = "body_file")]
    body_json: Option<String>,

    /// Path to a file containing a JSON request body.
    #[arg(long, value_name = "PATH", conflicts_with = "body_json")]
    body_file: Option<PathBuf>,
}

/// Entry point for the CLI.
///
/// Parses arguments, builds the client, runs one command and prints JSON.
fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose).context("failed to initialise logging")?;

    let mut config = ClientConfig::new(&cli.token).context("invalid --token value")?;
    if let Some(url) = &cli.base_url {
        config = config
            .with_base_url(url)
            .with_context(|| format!("invalid base URL '{url}'"))?;
    }
    if let Some(version) = &cli.notion_version {
        config = config
            .with_notion_version(version)
            .with_context(|| format!("invalid Notion version '{version}'"))?;
    }
    let client = NotionClient::new(config).context("failed to create HTTP client")?;

    let output = match &cli.command {
        Command::AddPage(body) => {
            let page: NewPage = parse_body(body)
                .context("failed to parse page body")?
                .context("add-page requires --body-json or --body-file")?;
            to_json(&client.add_page(&page).context("creating page failed")?)?
        }
        Command::ListDatabases => {
            to_json(&client.list_databases().context("listing databases failed")?)?
        }
        Command::FindDatabase { name } => to_json(
            &client
                .find_database(name)
                .with_context(|| format!("looking up database '{name}' failed"))?,
        )?,
        Command::ListBlocks { block_id } => to_json(
            &client
                .list_blocks(block_id)
                .with_context(|| format!("listing children of '{block_id}' failed"))?,
        )?,
        Command::QueryDatabase { database_id, body } => {
            let query: DatabaseQuery = parse_body(body)
                .context("failed to parse query body")?
                .unwrap_or_default();
            to_json(
                &client
                    .query_database(database_id, &query)
                    .with_context(|| format!("querying database '{database_id}' failed"))?,
            )?
        }
        Command::Request(args) => send_request(&client, args)
            .with_context(|| format!("request failed: {} {}", args.method, args.path))?,
    };

    print_json(&output, cli.compact).context("failed to print JSON output")?;
    Ok(())
}

/// Routes library logs to stderr; stdout stays reserved for JSON output.
fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}

/// Sends a raw HTTP request using method + path.
fn send_request(client: &NotionClient, args: &RequestArgs) -> Result<Value> {
    // Validate method eagerly so CLI errors are explicit before any network call.
    let method = Method::from_str(&args.method)
        .with_context(|| format!("invalid HTTP method '{}'", args.method))?;
    let query = parse_pairs(&args.query, "--query").context("failed to parse --query arguments")?;
    let body: Option<Value> = parse_body(&args.body).context("failed to parse request body input")?;
    let borrowed_query: Vec<(&str, &str)> = query
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();

    let value: Value = client
        .request_json(method, &args.path, &borrowed_query, body.as_ref())
        .with_context(|| format!("HTTP request failed for path '{}'", args.path))?;
    Ok(value)
}

/// Parses repeated `key=value` arguments into owned key/value pairs.
///
/// Returns an error when a value does not include `=` or has an empty key.
fn parse_pairs(values: &[String], flag_name: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::with_capacity(values.len());
    for item in values {
        let Some((key, value)) = item.split_once('=') else {
            bail!("invalid {flag_name} value '{item}': expected key=value");
        };
        if key.is_empty() {
            bail!("invalid {flag_name} value '{item}': empty key");
        }
        pairs.push((key.to_owned(), value.to_owned()));
    }
    Ok(pairs)
}

/// Parses an optional JSON body from inline text or a file path.
///
/// At most one of `--body-json` or `--body-file` may be set.
fn parse_body<T: DeserializeOwned>(body: &BodyInput) -> Result<Option<T>> {
    match (&body.body_json, &body.body_file) {
        (Some(raw), None) => serde_json::from_str(raw)
            .context("failed to parse JSON from --body-json")
            .map(Some),
        (None, Some(path)) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read --body-file '{}'", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| {
                    format!("failed to parse JSON in --body-file '{}'", path.display())
                })
                .map(Some)
        }
        (None, None) => Ok(None),
        (Some(_), Some(_)) => bail!("use only one of --body-json or --body-file"),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).context("failed to convert result to JSON")
}

/// Prints a JSON value either compact or pretty-formatted.
fn print_json(value: &Value, compact: bool) -> Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
    .context("failed to render JSON")?;
    println!("{rendered}");
    Ok(())
}
