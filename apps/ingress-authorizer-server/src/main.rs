use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use ingress_authorizer_server::build_router;
use ingress_authorizer_server::config::ServerConfig;
use ingress_authorizer_server::keys::ServiceProviderKeys;
use ingress_authorizer_server::metadata::ServiceProviderMetadata;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Json,
    Text,
}

/// Authorization gate for reverse proxies, backed by SAML sessions.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the service-provider metadata and exit
    #[arg(long)]
    print_metadata: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Json)]
    log_format: LogFormat,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format);

    tracing::debug!(path = %args.config.display(), "Loading configuration");
    let cfg = ServerConfig::load(&args.config)?;
    let keys = ServiceProviderKeys::load(&cfg)?;
    let metadata = ServiceProviderMetadata::render(&cfg, keys.as_ref())?;

    if args.print_metadata {
        print!("{}", metadata.xml());
        return Ok(());
    }

    tracing::info!(
        entity_id = %cfg.entity_id,
        url = %cfg.url,
        idp_metadata_url = ?cfg.idp_metadata_url,
        sign_request = cfg.sign_request,
        use_artifact_response = cfg.use_artifact_response,
        force_authn = cfg.force_authn,
        allow_idp_initiated = cfg.allow_idp_initiated,
        default_redirect_uri = cfg.default_redirect_uri.as_deref(),
        signing_keys = keys.is_some(),
        "starting ingress-authorizer"
    );
    tracing::warn!(
        sessions = cfg.static_session.sessions.len(),
        sso_url = %cfg.static_session.sso_url,
        "Using static session plugin; sessions come from configuration"
    );
    if cfg.require_attributes.is_unrestricted() {
        tracing::warn!("require_attributes is empty; every signed-in caller is authorized");
    }
    let empty_requirements = cfg
        .require_attributes
        .requirements()
        .iter()
        .filter(|requirement| requirement.is_empty())
        .count();
    if empty_requirements > 0 {
        tracing::warn!(
            count = empty_requirements,
            "require_attributes contains empty requirements; they match any caller with attributes"
        );
    }

    let app = build_router(&cfg, metadata);

    let listener = tokio::net::TcpListener::bind(&cfg.addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.addr))?;
    tracing::info!(addr = %cfg.addr, "Listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Received shutdown signal");
}
