//! Navigation feature slice.
//!
//! Maps a catalog selection to its destination page (with the `type` pre-fill parameter and
//! `#form` anchor for primary actions), and owns the motion services pages share: eased
//! scrolling to an anchor, the back-navigation fade, and viewport-triggered reveals.

mod error;
pub mod location;
pub mod reveal;
pub mod route;
pub mod scroll;
#[cfg(feature = "server")]
pub mod server;
pub mod transition;

pub use crate::error::{NavigationError, NavigationErrorExt};
pub use crate::location::Location;
pub use crate::reveal::{Parallax, RevealSignal, ViewportReveal};
pub use crate::route::{Destination, RouteTable, RouteVariant, route};
pub use crate::scroll::{ScrollPlan, animate, ease_in_out};
pub use crate::transition::{BackTransition, TransitionPhase};
use castellan_kernel::prelude::SiteConfig;

/// Navigation feature state
#[castellan_derive::castellan_slice]
pub struct Navigation {
    pub routes: RouteTable,
    pub site: SiteConfig,
}

impl Navigation {
    /// Scroll plan towards a form whose top is `element_top` (viewport-relative).
    pub fn scroll_to(&self, scroll_y: f64, element_top: f64) -> ScrollPlan {
        ScrollPlan::for_site(&self.site, scroll_y, element_top)
    }

    pub fn back_transition(&self) -> BackTransition {
        BackTransition::from_config(&self.site)
    }
}

/// Initialize the navigation feature.
///
/// # Errors
/// Returns [`NavigationError::Internal`] if the route table is empty.
#[cfg(feature = "server")]
pub fn init(site: SiteConfig) -> Result<castellan_kernel::prelude::InitializedSlice, NavigationError> {
    let routes = RouteTable::castle();
    let count = routes.titles().count();
    if count == 0 {
        return Err("Route table is empty".into());
    }

    tracing::info!(slice = Navigation::NAME, routes = count, "Navigation server slice initialized");

    let slice = Navigation::new(NavigationInner { routes, site });

    Ok(castellan_kernel::prelude::InitializedSlice::new(slice))
}
