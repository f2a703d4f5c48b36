// src/services/rate_limit.rs
use std::collections::HashMap;
use std::env;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Path prefixes that call the LLM and get the stricter bucket
const AI_PATH_PREFIXES: [&str; 4] = ["/api/ai", "/api/ai-agent", "/api/public-ai", "/api/resume"];

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub requests_per_minute: u32,
    pub ai_requests_per_minute: u32,
    pub window_seconds: u32,
    pub whitelist_ips: Vec<String>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests_per_minute: 120,
            ai_requests_per_minute: 10,
            window_seconds: 60,
            whitelist_ips: Vec::new(),
        }
    }
}

impl RateLimitConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(enabled) = env::var("RATE_LIMIT_ENABLED") {
            config.enabled = enabled.to_lowercase() != "false";
        }

        if let Some(val) = env::var("RATE_LIMIT_REQUESTS_PER_MINUTE")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
        {
            config.requests_per_minute = val;
        }

        if let Some(val) = env::var("RATE_LIMIT_AI_REQUESTS_PER_MINUTE")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
        {
            config.ai_requests_per_minute = val;
        }

        if let Ok(whitelist) = env::var("RATE_LIMIT_WHITELIST_IPS") {
            config.whitelist_ips = whitelist
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        config
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Which counter a request is charged against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitBucket {
    General,
    Ai,
}

impl RateLimitBucket {
    pub fn for_path(path: &str) -> Self {
        let is_ai = AI_PATH_PREFIXES.iter().any(|prefix| {
            path == *prefix
                || path
                    .strip_prefix(prefix)
                    .map_or(false, |rest| rest.starts_with('/'))
        });
        if is_ai {
            RateLimitBucket::Ai
        } else {
            RateLimitBucket::General
        }
    }

    fn key_prefix(&self) -> &'static str {
        match self {
            RateLimitBucket::General => "general",
            RateLimitBucket::Ai => "ai",
        }
    }
}

#[derive(Debug, Clone)]
struct RateLimitState {
    count: u32,
    window_start: Instant,
}

impl RateLimitState {
    fn new() -> Self {
        Self {
            count: 0,
            window_start: Instant::now(),
        }
    }

    fn reset(&mut self) {
        self.count = 0;
        self.window_start = Instant::now();
    }

    fn is_expired(&self, window_duration: Duration) -> bool {
        self.window_start.elapsed() > window_duration
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum RateLimitResult {
    Allowed,
    Limited { retry_after: u32 },
}

/// Fixed-window, in-process request counter keyed by client identifier
#[derive(Debug, Clone)]
pub struct RateLimitService {
    config: RateLimitConfig,
    rate_limiter: Arc<RwLock<HashMap<String, RateLimitState>>>,
}

impl RateLimitService {
    pub fn new(config: RateLimitConfig) -> Self {
        info!(
            enabled = config.enabled,
            requests_per_minute = config.requests_per_minute,
            ai_requests_per_minute = config.ai_requests_per_minute,
            window_seconds = config.window_seconds,
            "Initializing RateLimitService"
        );
        Self {
            config,
            rate_limiter: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    fn is_whitelisted(&self, ip: &str) -> bool {
        self.config.whitelist_ips.iter().any(|w| w == ip)
    }

    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        ip_address: Option<&str>,
        bucket: RateLimitBucket,
    ) -> RateLimitResult {
        if !self.config.enabled {
            return RateLimitResult::Allowed;
        }

        if ip_address.map_or(false, |ip| self.is_whitelisted(ip)) {
            return RateLimitResult::Allowed;
        }

        let limit = match bucket {
            RateLimitBucket::General => self.config.requests_per_minute,
            RateLimitBucket::Ai => self.config.ai_requests_per_minute,
        };
        let window_duration = Duration::from_secs(self.config.window_seconds as u64);
        let key = format!("{}:{}", bucket.key_prefix(), identifier);

        self.check_limit_for_key(&key, limit, window_duration).await
    }

    async fn check_limit_for_key(
        &self,
        key: &str,
        limit: u32,
        window_duration: Duration,
    ) -> RateLimitResult {
        let mut limiter = self.rate_limiter.write().await;

        let state = limiter
            .entry(key.to_string())
            .or_insert_with(RateLimitState::new);

        if state.is_expired(window_duration) {
            state.reset();
        }

        if state.count >= limit {
            let elapsed = state.window_start.elapsed().as_secs() as u32;
            let retry_after = (window_duration.as_secs() as u32)
                .saturating_sub(elapsed)
                .max(1);
            return RateLimitResult::Limited { retry_after };
        }

        state.count += 1;
        RateLimitResult::Allowed
    }

    pub fn log_violation(&self, identifier: &str, ip_address: Option<&str>, endpoint: &str) {
        warn!(
            identifier = %identifier,
            ip_address = ?ip_address,
            endpoint = %endpoint,
            "Rate limit violation detected"
        );
    }

    /// Drops counters whose window has passed. Returns how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        let window_duration = Duration::from_secs(self.config.window_seconds as u64);
        let mut limiter = self.rate_limiter.write().await;
        let before = limiter.len();
        limiter.retain(|_, state| !state.is_expired(window_duration));
        before - limiter.len()
    }

    pub async fn tracked_clients(&self) -> usize {
        self.rate_limiter.read().await.len()
    }

    /// Sweeps stale counters once per window for the life of the process
    pub fn spawn_cleanup(self: Arc<Self>) -> JoinHandle<()> {
        let period = Duration::from_secs(self.config.window_seconds.max(1) as u64);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(period).await;
                let removed = self.cleanup_expired().await;
                if removed > 0 {
                    let remaining = self.tracked_clients().await;
                    debug!(removed, remaining, "Rate limit counters pruned");
                }
            }
        })
    }
}
