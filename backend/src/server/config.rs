//! Startup settings and the resolved server configuration.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use faceexpo::inbound::http::session_config::SessionSettings;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Values read from `FACEEXPO_*` environment variables, config files and
/// command-line flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FACEEXPO")]
pub struct AppSettings {
    /// Listener address, `host:port`.
    pub bind_addr: Option<String>,
    /// Delay added to every store call to mimic a remote backend.
    pub simulated_latency_ms: Option<u64>,
    /// Load the demo artists, posts and contest entries at startup.
    #[ortho_config(default = true)]
    pub seed_demo_data: bool,
}

impl AppSettings {
    /// Configured listener address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Configured store latency; zero disables the delay.
    pub fn simulated_latency(&self) -> Option<Duration> {
        self.simulated_latency_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) latency: Option<Duration>,
    pub(crate) seed_demo_data: bool,
}

impl ServerConfig {
    /// Seeded, latency-free configuration.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            latency: None,
            seed_demo_data: true,
        }
    }

    /// Apply [`AppSettings::simulated_latency`] and the seeding toggle.
    #[must_use]
    pub fn with_settings(mut self, settings: &AppSettings) -> Self {
        self.latency = settings.simulated_latency();
        self.seed_demo_data = settings.seed_demo_data;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("faceexpo")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("FACEEXPO_BIND_ADDR", None::<String>),
            ("FACEEXPO_SIMULATED_LATENCY_MS", None::<String>),
            ("FACEEXPO_SEED_DEMO_DATA", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            SocketAddr::from(([0, 0, 0, 0], 8080))
        );
        assert!(settings.simulated_latency().is_none());
        assert!(settings.seed_demo_data);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("FACEEXPO_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            ("FACEEXPO_SIMULATED_LATENCY_MS", Some("250".to_owned())),
            ("FACEEXPO_SEED_DEMO_DATA", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("override address"),
            SocketAddr::from(([127, 0, 0, 1], 9000))
        );
        assert_eq!(settings.simulated_latency(), Some(Duration::from_millis(250)));
        assert!(!settings.seed_demo_data);
    }

    #[rstest]
    fn zero_latency_disables_the_delay() {
        let _guard = lock_env([("FACEEXPO_SIMULATED_LATENCY_MS", Some("0".to_owned()))]);
        assert!(load_from_empty_args().simulated_latency().is_none());
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let _guard = lock_env([("FACEEXPO_BIND_ADDR", Some("localhost".to_owned()))]);
        assert!(load_from_empty_args().bind_addr().is_err());
    }
}
