//! Fixed-window rate limiter keyed by client IP.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderValue, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tokio::sync::Mutex;

use crate::handler::errors::ErrorResponse;

const PRUNE_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// Client key → window state.
    windows: Arc<Mutex<HashMap<String, Window>>>,
    max_requests: u32,
    window: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: Arc::new(Mutex::new(HashMap::new())),
            max_requests,
            window,
        }
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Counts one request for `key` at `now`.
    pub async fn check_at(&self, key: &str, now: Instant) -> RateDecision {
        let mut windows = self.windows.lock().await;

        if windows.len() >= PRUNE_THRESHOLD {
            let span = self.window;
            windows.retain(|_, w| now.duration_since(w.started) < span);
        }

        let entry = windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(entry.started) >= self.window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }

        if entry.count < self.max_requests {
            entry.count += 1;
            RateDecision::Allowed {
                remaining: self.max_requests - entry.count,
            }
        } else {
            RateDecision::Limited {
                retry_after: self.window.saturating_sub(now.duration_since(entry.started)),
            }
        }
    }

    pub async fn check(&self, key: &str) -> RateDecision {
        self.check_at(key, Instant::now()).await
    }
}

fn client_key(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(&request);

    match limiter.check(&key).await {
        RateDecision::Allowed { remaining } => {
            let mut response = next.run(request).await;
            let headers = response.headers_mut();
            headers.insert("x-ratelimit-limit", HeaderValue::from(limiter.max_requests()));
            headers.insert("x-ratelimit-remaining", HeaderValue::from(remaining));
            response
        }
        RateDecision::Limited { retry_after } => {
            tracing::warn!(client = %key, "rate limit exceeded");
            let mut response =
                ErrorResponse::too_many_requests("too many requests from this IP").into_response();
            // Round up so clients never retry early.
            let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
            response
        }
    }
}
