use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared across services.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub delivery: DeliveryConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Presentation knobs the core needs as explicit inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Initial reveal count and the increment of each "load more".
    pub reveal_batch: usize,
    /// Widest viewport (inclusive, in CSS pixels) treated as narrow.
    pub narrow_viewport_max: u32,
    /// Gap kept above the form when scrolling to it.
    pub scroll_offset: i32,
    pub scroll_duration_ms: u64,
    pub fade_ms: u64,
    /// Offset of the venue's calendar from UTC. Booking dates ("not before today") are judged
    /// on this calendar; the default is Romanian standard time (UTC+2), summer time is not applied.
    pub utc_offset_minutes: i32,
}

/// Submission delivery channel sizing.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    pub capacity: usize,
}

/// Logging options fed into the logger builder.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: Option<PathBuf>,
    pub json: bool,
    pub filter: Option<String>,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 4583, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            reveal_batch: 3,
            narrow_viewport_max: 767,
            scroll_offset: 100,
            scroll_duration_ms: 1000,
            fade_ms: 500,
            utc_offset_minutes: 120,
        }
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self { capacity: 128 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), directory: None, json: false, filter: None }
    }
}
