//! Rate limiting middleware for the verification endpoints
//!
//! Fixed windows kept in process, keyed by route and client IP. Each worker's
//! `App` shares one `RateLimitStore`, so the quota is per server process.
//!
//! The client IP is the socket peer. `X-Forwarded-For` / `Forwarded` are only
//! read when the peer is a configured trusted proxy.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderName, HeaderValue},
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    collections::HashMap,
    future::{ready, Ready},
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use sg_shared::config::RouteLimit;
use sg_shared::errors::{error_codes, ErrorResponse};

/// Windows are purged of stale keys once the map reaches this size
const PURGE_THRESHOLD: usize = 10_000;

#[derive(Debug)]
struct Window {
    resets_at: Instant,
    count: u32,
}

/// Outcome of a quota check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32 },
    Limited { retry_after_seconds: u64 },
}

/// Shared counters for all rate-limited routes
#[derive(Debug)]
pub struct RateLimitStore {
    enabled: bool,
    trusted_proxies: Vec<String>,
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimitStore {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            trusted_proxies: Vec::new(),
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Peers whose forwarded-for headers name the real client
    pub fn with_trusted_proxies(mut self, proxies: Vec<String>) -> Self {
        self.trusted_proxies = proxies;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Count one request against `key`
    pub fn check(&self, key: &str, limit: RouteLimit, now: Instant) -> RateLimitDecision {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());

        if windows.len() >= PURGE_THRESHOLD {
            windows.retain(|_, window| window.resets_at > now);
        }

        let window = windows.entry(key.to_string()).or_insert_with(|| Window {
            resets_at: now + Duration::from_secs(limit.window_seconds),
            count: 0,
        });
        if window.resets_at <= now {
            window.resets_at = now + Duration::from_secs(limit.window_seconds);
            window.count = 0;
        }

        if window.count >= limit.limit {
            let wait = window.resets_at - now;
            let seconds = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
            return RateLimitDecision::Limited {
                retry_after_seconds: seconds.max(1),
            };
        }

        window.count += 1;
        RateLimitDecision::Allowed {
            remaining: limit.limit - window.count,
        }
    }

    pub fn tracked_keys(&self) -> usize {
        self.windows.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Rate limiter middleware factory for one route
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<RateLimitStore>,
    route: &'static str,
    limit: RouteLimit,
}

impl RateLimiter {
    /// Throttle `route` to `limit` requests per client IP
    pub fn new(store: Arc<RateLimitStore>, route: &'static str, limit: RouteLimit) -> Self {
        Self {
            store,
            route,
            limit,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimiterMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterMiddleware {
            service,
            store: self.store.clone(),
            route: self.route,
            limit: self.limit,
        }))
    }
}

/// Rate limiter middleware service
pub struct RateLimiterMiddleware<S> {
    service: S,
    store: Arc<RateLimitStore>,
    route: &'static str,
    limit: RouteLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimiterMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if !self.store.is_enabled() {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        let client_ip = client_ip(&req, &self.store.trusted_proxies);
        let key = format!("{}:{}", self.route, client_ip);

        match self.store.check(&key, self.limit, Instant::now()) {
            RateLimitDecision::Limited {
                retry_after_seconds,
            } => {
                tracing::warn!(
                    route = self.route,
                    client_ip = %client_ip,
                    retry_after = retry_after_seconds,
                    event = "rate_limit_exceeded",
                    "Rate limit exceeded"
                );
                let response = too_many_requests(self.limit, retry_after_seconds);
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
            RateLimitDecision::Allowed { remaining } => {
                let limit = self.limit.limit;
                let fut = self.service.call(req);
                Box::pin(async move {
                    let mut res = fut.await?;
                    let headers = res.headers_mut();
                    headers.insert(
                        HeaderName::from_static("x-rate-limit-limit"),
                        HeaderValue::from(limit),
                    );
                    headers.insert(
                        HeaderName::from_static("x-rate-limit-remaining"),
                        HeaderValue::from(remaining),
                    );
                    Ok(res.map_into_left_body())
                })
            }
        }
    }
}

fn client_ip(req: &ServiceRequest, trusted_proxies: &[String]) -> String {
    let info = req.connection_info();
    let Some(peer) = info.peer_addr() else {
        return "unknown".to_string();
    };

    if is_trusted_proxy(peer, trusted_proxies) {
        if let Some(forwarded) = info.realip_remote_addr() {
            return forwarded.to_string();
        }
    }

    peer.to_string()
}

/// Peer may be a bare IP or `ip:port`
fn is_trusted_proxy(peer: &str, trusted_proxies: &[String]) -> bool {
    if trusted_proxies.is_empty() {
        return false;
    }
    let ip = peer
        .parse::<SocketAddr>()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|_| peer.to_string());

    trusted_proxies
        .iter()
        .any(|trusted| trusted == &ip || trusted == peer)
}

fn too_many_requests(limit: RouteLimit, retry_after_seconds: u64) -> HttpResponse {
    let body = ErrorResponse::new(
        error_codes::RATE_LIMIT_EXCEEDED,
        format!(
            "Too many requests, please try again in {} seconds",
            retry_after_seconds
        ),
    )
    .add_detail("retry_after", retry_after_seconds)
    .add_detail("limit", limit.limit)
    .add_detail("window_seconds", limit.window_seconds);

    HttpResponse::TooManyRequests()
        .insert_header((header::RETRY_AFTER, retry_after_seconds.to_string()))
        .json(body)
}
