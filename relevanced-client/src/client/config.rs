use std::time::Duration;
use tonic::transport::Endpoint;

/// Port a relevanced server listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 8097;
pub const DEFAULT_HOST: &str = "localhost";

const HOST_VAR: &str = "RELEVANCED_HOST";
const PORT_VAR: &str = "RELEVANCED_PORT";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ClientConfigError {
    #[error("Invalid port '{0}' in RELEVANCED_PORT")]
    InvalidPort(String),
}

/// Where and how to reach a relevanced server.
///
/// Builder style; the defaults target a local server on the standard port.
///
/// ```
/// use relevanced_client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new("relevanced.internal", 9000)
///     .with_connect_timeout(Duration::from_secs(1));
///
/// assert_eq!(config.endpoint_uri(), "http://relevanced.internal:9000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub connect_timeout: Duration,
    /// Per-request deadline enforced by the transport. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    pub tcp_nodelay: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            connect_timeout: Duration::from_secs(5),
            request_timeout: None,
            tcp_nodelay: true,
        }
    }
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Defaults, overridden by `RELEVANCED_HOST` and `RELEVANCED_PORT` when set.
    pub fn from_env() -> Result<Self, ClientConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientConfigError> {
        let mut config = Self::default();

        if let Some(host) = lookup(HOST_VAR).filter(|host| !host.trim().is_empty()) {
            config.host = host.trim().to_string();
        }

        if let Some(port) = lookup(PORT_VAR) {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ClientConfigError::InvalidPort(port.clone()))?;
        }

        Ok(config)
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_tcp_nodelay(mut self, enabled: bool) -> Self {
        self.tcp_nodelay = enabled;
        self
    }

    /// The URI the transport dials, e.g. `http://localhost:8097`.
    pub fn endpoint_uri(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub(crate) fn apply_to_endpoint(&self, mut endpoint: Endpoint) -> Endpoint {
        endpoint = endpoint
            .connect_timeout(self.connect_timeout)
            .tcp_nodelay(self.tcp_nodelay);

        if let Some(timeout) = self.request_timeout {
            endpoint = endpoint.timeout(timeout);
        }

        endpoint
    }
}
