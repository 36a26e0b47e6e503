use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use haversion::{Board, Channel, HaVersion, SourceKind, VersionRequestConfig};

#[derive(Parser)]
#[command(name = "haversion")]
#[command(version, about = "Print the current Home Assistant version from a source")]
struct Cli {
    /// docker, static-manifest (haio), local, pypi or supervised
    #[arg(long)]
    source: Option<SourceKind>,

    #[arg(long)]
    channel: Option<Channel>,

    #[arg(long)]
    board: Option<Board>,

    #[arg(long)]
    image: Option<String>,

    /// Fetch timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Override the source endpoint
    #[arg(long)]
    base_url: Option<String>,

    /// Home Assistant configuration directory (local source)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// JSON file with request settings; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the version and version data as JSON
    #[arg(long)]
    json: bool,

    #[arg(long, default_value = "warn")]
    log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(&cli)?;

    let config = request_config(&cli)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(config, cli.json))
}

async fn run(config: VersionRequestConfig, json: bool) -> anyhow::Result<()> {
    let mut ha_version = HaVersion::new(config)?;
    let (version, version_data) = ha_version.get_version().await?;

    if json {
        let output = serde_json::json!({
            "version": version,
            "versionData": version_data,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        match version {
            Some(version) => println!("{version}"),
            None => anyhow::bail!("source {} reported no version", ha_version.source()),
        }
    }
    Ok(())
}

fn request_config(cli: &Cli) -> anyhow::Result<VersionRequestConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => VersionRequestConfig::default(),
    };

    if let Some(source) = cli.source {
        config.source = source;
    }
    if let Some(channel) = cli.channel {
        config.channel = channel;
    }
    if let Some(board) = cli.board {
        config.board = Some(board);
    }
    if let Some(image) = &cli.image {
        config.image = Some(image.clone());
    }
    if let Some(timeout) = cli.timeout {
        config.timeout = timeout;
    }
    if let Some(base_url) = &cli.base_url {
        config.base_url = Some(base_url.clone());
    }
    if let Some(config_dir) = &cli.config_dir {
        config.config_dir = Some(config_dir.clone());
    }

    if config.source.requires_http_client() {
        config.http_client = Some(reqwest::Client::new());
    }
    Ok(config)
}

fn load_config_file(path: &Path) -> anyhow::Result<VersionRequestConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parsing config file: {}", path.display()))
}

fn init_logging(cli: &Cli) -> anyhow::Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let json = cli.log_format == LogFormat::Json;

    let (result, guard) = match &cli.log_file {
        Some(path) => {
            let dir = path.parent().unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("invalid log file path: {}", path.display()))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
            let builder = builder.with_writer(writer).with_ansi(false);
            let result = if json {
                builder.json().try_init()
            } else {
                builder.try_init()
            };
            (result, Some(guard))
        }
        None => {
            let builder = builder.with_writer(std::io::stderr);
            let result = if json {
                builder.json().try_init()
            } else {
                builder.try_init()
            };
            (result, None)
        }
    };

    result.map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;
    Ok(guard)
}
