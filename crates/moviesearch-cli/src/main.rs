//! moviesearch - TMDB movie search in the terminal.

/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, TOKEN_ENV_VAR, resolve_config_path, resolve_log_path};
use crate::tui::run_browser;
use moviesearch_api::tmdb::{LocalMovieApi, TmdbClient};
use moviesearch_core::{QueryKey, SearchBar, Submission};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config/log directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse search results interactively.
    Browse,
    /// Search movies once and print the results.
    Search(SearchArgs),
    /// Configuration file operations.
    Config(ConfigCommand),
}

/// Arguments for `search`.
#[derive(clap::Args)]
struct SearchArgs {
    /// Free-text query.
    #[arg(long, required = true)]
    query: String,

    /// 1-based result page.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
}

/// `config` subcommand group.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config operation.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Config operations.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Write a default config file if none exists.
    Init,
}

/// Builds a TMDB client from the environment and config.
///
/// A missing token is not fatal: requests are sent unauthenticated and
/// the server's 401 surfaces as a failed search.
///
/// # Errors
///
/// Returns an error if the configured base URL is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_token = config
        .resolve_api_token(std::env::var(TOKEN_ENV_VAR).ok())
        .unwrap_or_else(|| {
            tracing::warn!("{TOKEN_ENV_VAR} is not set; TMDB requests will be rejected");
            String::new()
        });

    let mut builder = TmdbClient::builder().api_token(api_token).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(base_url) = &config.tmdb.base_url {
        let url = Url::parse(base_url)
            .with_context(|| format!("invalid TMDB base URL: {base_url}"))?;
        builder = builder.base_url(url);
    }

    builder.build().context("failed to build TMDB client")
}

/// Loads the config file under `dir`.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&Path>) -> Result<AppConfig> {
    let path = resolve_config_path(dir)?;
    tracing::debug!(path = %path.display(), "loading config");
    AppConfig::load(&path)
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the query is empty, the client fails to build,
/// or the API request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&Path>) -> Result<()> {
    let mut search_bar = SearchBar::new();
    for ch in args.query.chars() {
        search_bar.push(ch);
    }
    let query = match search_bar.submit() {
        Submission::Query(query) => query,
        Submission::Rejected(notification) => anyhow::bail!("{notification}"),
    };

    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;
    let key = QueryKey::new(query, args.page);

    let response = client
        .search_movies(&key.params())
        .await
        .context("TMDB search/movie request failed")?;

    tracing::info!(
        "Page {}/{}  Total results: {}",
        response.page,
        response.total_pages,
        response.total_results
    );
    if response.results.is_empty() {
        tracing::warn!("{}", moviesearch_core::Notification::NoResults);
        return Ok(());
    }
    tracing::info!("ID\tYear\tRating\tTitle");
    for movie in &response.results {
        tracing::info!(
            "{}\t{}\t{:.1}\t{}",
            movie.id,
            movie
                .release_year()
                .map_or_else(|| String::from("-"), |y| y.to_string()),
            movie.vote_average,
            movie.title,
        );
    }

    Ok(())
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(dir: Option<&Path>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;
    tracing::info!(base_url = %client.base_url(), "starting browser");
    run_browser(Arc::new(client), &config.ui).await
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file cannot be written.
fn run_config_init(dir: Option<&Path>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    if path.exists() {
        tracing::info!("Config already exists: {}", path.display());
        return Ok(());
    }
    AppConfig::default().save(&path)?;
    tracing::info!("Wrote default config to {}", path.display());
    Ok(())
}

/// Chooses the log destination.
///
/// The browser owns the terminal, so its logs go to a file.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
fn log_writer(command: &Commands, dir: Option<&Path>) -> Result<(BoxMakeWriter, bool)> {
    if !matches!(command, Commands::Browse) {
        return Ok((BoxMakeWriter::new(std::io::stdout), true));
    }
    let path = resolve_log_path(dir)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    Ok((BoxMakeWriter::new(Mutex::new(file)), false))
}

/// Installs the global tracing subscriber.
fn init_logging(writer: BoxMakeWriter, ansi: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer);

    #[cfg(not(feature = "otel"))]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let dir = cli.dir.as_deref();

    let (writer, ansi) = log_writer(&cli.command, dir)?;
    init_logging(writer, ansi);

    match &cli.command {
        Commands::Browse => run_browse(dir).await,
        Commands::Search(args) => run_search(args, dir).await,
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Init => run_config_init(dir),
        },
    }
}
