// Error tracking with Sentry
use std::env;
use tracing::info;

#[derive(Debug, Clone)]
pub struct MonitoringConfig {
    pub sentry_dsn: Option<String>,
    pub environment: String,
    pub traces_sample_rate: f32,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            sentry_dsn: None,
            environment: "development".to_string(),
            traces_sample_rate: 0.0,
        }
    }
}

impl MonitoringConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            sentry_dsn: env::var("SENTRY_DSN").ok().filter(|d| !d.trim().is_empty()),
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            traces_sample_rate: env::var("SENTRY_TRACES_SAMPLE_RATE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.traces_sample_rate),
        }
    }
}

/// Starts the Sentry client when a DSN is configured.
/// The returned guard must stay alive for the lifetime of the process.
pub fn init_sentry(config: &MonitoringConfig) -> Option<sentry::ClientInitGuard> {
    let Some(dsn) = config.sentry_dsn.as_deref() else {
        info!("Sentry DSN not configured, error tracking disabled");
        return None;
    };

    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(config.environment.clone().into()),
            traces_sample_rate: config.traces_sample_rate,
            ..Default::default()
        },
    ));

    info!(environment = %config.environment, "Sentry initialized successfully");
    Some(guard)
}

/// Reports a background-task failure; a no-op when Sentry is not initialized
pub fn capture_error(error: &dyn std::error::Error) {
    sentry::capture_error(error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_disables_sentry() {
        let config = MonitoringConfig::default();
        assert!(config.sentry_dsn.is_none());
        assert_eq!(config.environment, "development");
        assert!(init_sentry(&config).is_none());
    }
}
