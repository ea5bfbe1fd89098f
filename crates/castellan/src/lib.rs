//! Facade crate for Castellan features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `castellan` with the `server` feature to serve the HTTP API.
//! - Call `castellan::init` (server) to register feature slices; extend as new slices appear.

pub use castellan_domain as domain;
#[cfg(feature = "server")]
use castellan_domain::config::ApiConfig;
#[cfg(feature = "server")]
use castellan_event_bus::EventBus;
pub use castellan_event_bus as events;
pub use castellan_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use castellan_kernel::server::router::system_router;
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use castellan_booking as booking;
    pub use castellan_catalog as catalog;
    pub use castellan_navigation as navigation;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "server")]
        "server",
        "catalog",
        "navigation",
        "booking",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all enabled features for server mode.
///
/// # Errors
/// Returns an error if any feature initialization fails.
#[cfg(feature = "server")]
pub fn init(
    config: &ApiConfig,
    events: &EventBus,
) -> Result<Vec<domain::registry::InitializedSlice>, Box<dyn std::error::Error>> {
    let site = config.site;
    let slices = vec![
        features::catalog::init(site)?,
        features::navigation::init(site)?,
        features::booking::init(site, events)?,
    ];

    tracing::info!(slices = slices.len(), "Feature slices initialized");

    Ok(slices)
}
