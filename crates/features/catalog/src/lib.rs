//! Catalog feature slice: the venue's fixed list of offerings, the category + search filter
//! engine, and the progressive reveal used on narrow viewports.
//!
//! ```rust
//! use castellan_catalog::{CatalogStore, FilterState, RevealController, Viewport};
//! use castellan_kernel::prelude::FilterCategory;
//!
//! let store = CatalogStore::castle();
//! let mut filter = FilterState::default();
//! filter.toggle(FilterCategory::Events);
//!
//! let view = store.browse(&filter, &RevealController::default(), Viewport::Narrow);
//! assert_eq!(view.total, 3);
//! ```

pub mod entry;
mod error;
pub mod filter;
pub mod reveal;
#[cfg(feature = "server")]
pub mod server;
pub mod store;

pub use crate::entry::CatalogEntry;
pub use crate::error::{CatalogError, CatalogErrorExt};
pub use crate::filter::{FilterState, filter};
pub use crate::reveal::{RevealController, Viewport, visible_entries};
pub use crate::store::{CatalogStore, CatalogView};
use castellan_kernel::prelude::{CategorySet, FilterCategory, SiteConfig};

/// Catalog feature state
#[castellan_derive::castellan_slice]
pub struct Catalog {
    pub store: CatalogStore,
    pub site: SiteConfig,
}

impl Catalog {
    /// Viewport mode for a reported width.
    pub fn viewport(&self, width: u32) -> Viewport {
        Viewport::from_width(width, self.site.narrow_viewport_max)
    }

    /// Fresh reveal state at the configured batch size.
    pub fn reveal(&self) -> RevealController {
        RevealController::from_config(&self.site)
    }
}

/// Parses a comma separated category list strictly.
///
/// Blank items are ignored; an empty list means "no restriction".
///
/// # Errors
/// Returns [`CatalogError::UnknownCategory`] naming the first unknown id.
pub fn parse_categories(list: &str) -> Result<CategorySet, CatalogError> {
    list.split(',').map(str::trim).filter(|id| !id.is_empty()).try_fold(
        CategorySet::empty(),
        |set, id| {
            FilterCategory::from_id(id).map(|category| set | category.into()).ok_or_else(|| {
                CatalogError::UnknownCategory {
                    message: id.to_owned().into(),
                    context: Some("expected one of tours, vip-tours, art, events, accommodation, shop, dining".into()),
                }
            })
        },
    )
}

/// Initialize the catalog feature.
///
/// # Errors
/// Returns [`CatalogError::InvalidEntry`] if the built-in catalog breaks an invariant.
#[cfg(feature = "server")]
pub fn init(site: SiteConfig) -> Result<castellan_kernel::prelude::InitializedSlice, CatalogError> {
    let store = CatalogStore::new(CatalogStore::castle().entries().to_vec())
        .context("Built-in catalog failed validation")?;

    tracing::info!(slice = Catalog::NAME, entries = store.len(), "Catalog server slice initialized");

    let slice = Catalog::new(CatalogInner { store, site });

    Ok(castellan_kernel::prelude::InitializedSlice::new(slice))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_categories() {
        let set = parse_categories("tours, dining,").unwrap();
        assert_eq!(set, CategorySet::TOURS | CategorySet::DINING);
        assert!(parse_categories("").unwrap().is_empty());
    }

    #[test]
    fn rejects_unknown_category() {
        let err = parse_categories("tours,moat").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCategory { ref message, .. } if message == "moat"));
        assert_eq!(err.code(), "unknown_category");
    }

    #[test]
    fn slice_derives_viewport_from_site_config() {
        let catalog = Catalog::new(CatalogInner { store: CatalogStore::castle(), site: SiteConfig::default() });
        assert_eq!(catalog.viewport(375), Viewport::Narrow);
        assert_eq!(catalog.viewport(1280), Viewport::Wide);
        assert_eq!(catalog.reveal().reveal_count(), 3);
        assert_eq!(Catalog::NAME, "catalog");
    }
}
