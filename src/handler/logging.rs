use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Instant;
use tracing::{Level, debug, error, info, warn};

#[derive(Debug)]
pub struct RequestInfo {
    pub method: String,
    pub uri: String,
    pub remote_addr: Option<SocketAddr>,
    pub user_agent: Option<String>,
}

impl RequestInfo {
    pub fn from_request(req: &Request) -> Self {
        Self {
            method: req.method().to_string(),
            uri: req.uri().to_string(),
            remote_addr: req
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ci| ci.0),
            user_agent: req
                .headers()
                .get("user-agent")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string()),
        }
    }
}

/// Logs every request once it has been answered, at a level chosen by the
/// response status.
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let info = RequestInfo::from_request(&req);

    debug!(
        method = %info.method,
        uri = %info.uri,
        remote_addr = ?info.remote_addr,
        user_agent = ?info.user_agent,
        "Incoming request"
    );

    let response = next.run(req).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    match status {
        200..=399 => info!(
            method = %info.method,
            uri = %info.uri,
            status,
            duration_ms,
            remote_addr = ?info.remote_addr,
            "Request completed"
        ),
        400..=499 => warn!(
            method = %info.method,
            uri = %info.uri,
            status,
            duration_ms,
            remote_addr = ?info.remote_addr,
            user_agent = ?info.user_agent,
            "Client error"
        ),
        500..=599 => error!(
            method = %info.method,
            uri = %info.uri,
            status,
            duration_ms,
            remote_addr = ?info.remote_addr,
            user_agent = ?info.user_agent,
            "Server error occurred"
        ),
        _ => debug!(
            method = %info.method,
            uri = %info.uri,
            status,
            duration_ms,
            "Request completed with unusual status"
        ),
    }

    response
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    #[default]
    Info,
    Debug,
    Error,
    /// Same filter as `Error`; kept for deployments that already set it.
    Critical,
}

impl LogLevel {
    pub fn to_tracing_level(&self) -> Level {
        match self {
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Error | LogLevel::Critical => Level::ERROR,
        }
    }

    pub fn to_filter_string(&self) -> String {
        let level = match self {
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Error | LogLevel::Critical => "error",
        };
        format!("labkeeper={level},tower_http={level}")
    }
}

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "error" => Ok(LogLevel::Error),
            "critical" => Ok(LogLevel::Critical),
            other => anyhow::bail!("unknown log level `{}`", other),
        }
    }
}

/// Initialize logging. `RUST_LOG` takes precedence over `log_level`.
pub fn init_logging(log_level: LogLevel) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_string()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_level(true))
        .init();

    info!("Logging initialized with level: {:?}", log_level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_to_tracing_level() {
        assert_eq!(LogLevel::Info.to_tracing_level(), Level::INFO);
        assert_eq!(LogLevel::Debug.to_tracing_level(), Level::DEBUG);
        assert_eq!(LogLevel::Error.to_tracing_level(), Level::ERROR);
        assert_eq!(LogLevel::Critical.to_tracing_level(), Level::ERROR);
    }

    #[test]
    fn test_log_level_filter_string() {
        assert_eq!(
            LogLevel::Info.to_filter_string(),
            "labkeeper=info,tower_http=info"
        );
        assert_eq!(
            LogLevel::Debug.to_filter_string(),
            "labkeeper=debug,tower_http=debug"
        );
        assert_eq!(
            LogLevel::Critical.to_filter_string(),
            "labkeeper=error,tower_http=error"
        );
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert!("verbose".parse::<LogLevel>().is_err());
    }
}
