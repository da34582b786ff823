use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use super::error::ApiError;
use crate::domain::DomainError;

/// Stale windows are swept once this many client addresses are tracked.
const PRUNE_THRESHOLD: usize = 1024;

/// A request budget per time window, e.g. `10 per minute`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    requests: u32,
    window: Duration,
}

impl RateLimit {
    pub fn new(requests: u32, window: Duration) -> Self {
        Self { requests, window }
    }

    /// Parse `"<count> per <unit>"` or `"<count>/<unit>"`, where unit is
    /// second, minute, hour or day (singular or plural).
    pub fn parse(expr: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::config(format!("invalid rate limit: {expr:?}"));

        let normalized = expr.trim().to_lowercase();
        let (count, unit) = normalized
            .split_once(" per ")
            .or_else(|| normalized.split_once('/'))
            .ok_or_else(invalid)?;

        let requests: u32 = count.trim().parse().map_err(|_| invalid())?;
        if requests == 0 {
            return Err(invalid());
        }

        let window = match unit.trim().trim_end_matches('s') {
            "second" => Duration::from_secs(1),
            "minute" => Duration::from_secs(60),
            "hour" => Duration::from_secs(60 * 60),
            "day" => Duration::from_secs(24 * 60 * 60),
            _ => return Err(invalid()),
        };

        Ok(Self { requests, window })
    }

    pub fn requests(&self) -> u32 {
        self.requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window request counter keyed by client address.
///
/// A window opens on an address's first request and resets once it has
/// fully elapsed.
#[derive(Debug)]
pub struct RateLimiter {
    limit: RateLimit,
    windows: Mutex<HashMap<IpAddr, Window>>,
}

impl RateLimiter {
    pub fn new(limit: RateLimit) -> Self {
        Self {
            limit,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Count one request from `addr`; returns `false` once the budget is spent.
    pub fn check(&self, addr: IpAddr) -> bool {
        self.check_at(addr, Instant::now())
    }

    fn check_at(&self, addr: IpAddr, now: Instant) -> bool {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);

        if windows.len() >= PRUNE_THRESHOLD {
            let span = self.limit.window;
            windows.retain(|_, w| now.saturating_duration_since(w.started) < span);
        }

        let window = windows.entry(addr).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.saturating_duration_since(window.started) >= self.limit.window {
            *window = Window {
                started: now,
                count: 0,
            };
        }

        if window.count >= self.limit.requests {
            return false;
        }
        window.count += 1;
        true
    }
}

/// axum middleware rejecting requests over the limit with 429.
pub async fn enforce_rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let addr = client_ip(&request);
    if limiter.check(addr) {
        next.run(request).await
    } else {
        warn!("Rate limit exceeded for {addr}");
        ApiError::RateLimited.into_response()
    }
}

fn client_ip(request: &Request) -> IpAddr {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}
