// ── Runtime connection configuration ──
//
// Describes *how* to reach the backend. Carries the project key and
// connection tuning but never touches disk: showroom-config (or a test)
// builds a `ClientConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use showroom_api::{TlsMode, TransportConfig};
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
}

/// Configuration for one backend project.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Project URL (e.g. `https://xyz.supabase.co`).
    pub url: Url,
    /// Project key sent with every request, if any.
    pub api_key: Option<SecretString>,
    /// Upper bound for a single request.
    pub timeout: Duration,
    pub tls: TlsVerification,
}

impl ClientConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            api_key: None,
            timeout: showroom_api::DEFAULT_TIMEOUT,
            tls: TlsVerification::default(),
        }
    }

    pub fn with_api_key(mut self, key: SecretString) -> Self {
        self.api_key = Some(key);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        };

        TransportConfig {
            tls,
            timeout: self.timeout,
            api_key: self.api_key.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_thirty_second_budget() {
        let config = ClientConfig::new("https://xyz.supabase.co".parse().unwrap());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.api_key.is_none());
        assert!(matches!(config.transport().tls, TlsMode::System));
    }

    #[test]
    fn transport_carries_key_and_ca() {
        let mut config = ClientConfig::new("https://xyz.supabase.co".parse().unwrap())
            .with_api_key(SecretString::from("k".to_owned()))
            .with_timeout(Duration::from_secs(5));
        config.tls = TlsVerification::CustomCa(PathBuf::from("/etc/ssl/ca.pem"));

        let transport = config.transport();
        assert_eq!(transport.timeout, Duration::from_secs(5));
        assert!(transport.api_key.is_some());
        assert!(matches!(
            transport.tls,
            TlsMode::CustomCa(p) if p == PathBuf::from("/etc/ssl/ca.pem")
        ));
    }
}
