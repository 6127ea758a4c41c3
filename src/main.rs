use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dataproxy_version::config::{
    self, ClientConfig, ENGINE_VERSION, EnvironmentView, FETCH_TIMEOUT_MS, ResolverConfig,
};
use dataproxy_version::version::registries::UnpkgRegistry;
use dataproxy_version::version::resolver::VersionResolver;

#[derive(Parser)]
#[command(name = "dataproxy-version")]
#[command(
    version,
    about = "Resolve the engine version a client should address through the data proxy"
)]
struct Cli {
    /// Version declared by the client (defaults to "unknown")
    #[arg(long)]
    client_version: Option<String>,

    /// Bundled engine version used for pre-release lookups
    #[arg(long, default_value = ENGINE_VERSION)]
    engine_version: String,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the registry base URL
    #[arg(long)]
    registry_url: Option<String>,

    /// Registry lookup timeout in milliseconds
    #[arg(long, default_value_t = FETCH_TIMEOUT_MS)]
    timeout_ms: u64,
}

fn init_logging() -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_path = config::log_path();
    let log_dir = log_path.parent().context("log path has no parent")?;
    std::fs::create_dir_all(log_dir)?;
    let file_name = log_path.file_name().context("log path has no file name")?;

    let appender = tracing_appender::rolling::never(log_dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    let mut resolver_config = match &cli.config {
        Some(path) => ResolverConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ResolverConfig::default(),
    };
    if let Some(url) = cli.registry_url {
        resolver_config.registry.url = url;
    }

    let registry = Arc::new(UnpkgRegistry::from_config(&resolver_config.registry));
    let resolver = VersionResolver::with_engine_version(registry, cli.engine_version);
    let client = ClientConfig {
        client_version: cli.client_version,
    };
    let env = EnvironmentView::from_env();

    let resolved = tokio::time::timeout(
        Duration::from_millis(cli.timeout_ms),
        resolver.resolve(&client, &env),
    )
    .await
    .context("timed out resolving engine version")??;

    tracing::info!(
        "Resolved engine {} for client {}",
        resolved,
        client.client_version()
    );
    Ok(resolved)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging()?;

    let resolved = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli))?;

    println!("{}", resolved);
    Ok(())
}
