//! Static route table from catalog titles to destination pages.

use crate::error::NavigationError;
use castellan_kernel::domain::constants::{FORM_FRAGMENT, TYPE_PARAM};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Which action on a catalog card triggered the navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum RouteVariant {
    /// "Book" / "Buy": lands on the page's form with the type pre-filled.
    #[default]
    Primary,
    /// "Learn more": lands on the offer's section, no pre-fill.
    LearnMore,
}

/// A resolved navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub path: &'static str,
    /// Value of the `type` query parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_param: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragment: Option<&'static str>,
}

impl Destination {
    /// Whether the destination asks the page to scroll to its form.
    pub fn targets_form(&self) -> bool {
        self.fragment == Some(FORM_FRAGMENT)
    }

    /// `path[?type=value][#fragment]`
    pub fn href(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)?;
        if let Some(value) = self.type_param {
            write!(f, "?{TYPE_PARAM}={value}")?;
        }
        if let Some(fragment) = self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RouteRule {
    title: &'static str,
    path: &'static str,
    type_param: Option<&'static str>,
    section: &'static str,
}

const fn rule(
    title: &'static str,
    path: &'static str,
    type_param: Option<&'static str>,
    section: &'static str,
) -> RouteRule {
    RouteRule { title, path, type_param, section }
}

const VISITING_PROGRAM: &str = "/visiting-program";
const EVENTS: &str = "/events";
const ACCOMMODATION: &str = "/accommodation";

const CASTLE_ROUTES: [RouteRule; 11] = [
    rule("Individual Tour", VISITING_PROGRAM, Some("castel-galerie-parc"), "individual"),
    rule("Group Tour", VISITING_PROGRAM, Some("castel-galerie-parc-grup"), "grup"),
    rule("VIP Tours", VISITING_PROGRAM, Some("vip-5plus"), "vip"),
    rule("Private Events", EVENTS, Some("privat"), "events"),
    rule("Weddings", EVENTS, Some("nunta"), "events"),
    rule("Corporate Events", EVENTS, Some("lansare"), "events"),
    rule("Art Gallery", EVENTS, Some("cultural"), "events"),
    rule("Hunter's Lodge", ACCOMMODATION, Some("hunters-lodge"), "accommodation"),
    rule("Garden Suite", ACCOMMODATION, Some("garden-suite"), "accommodation"),
    rule("Shop", "/shop", None, "shop"),
    rule("Canta Cuisine", "/canta-cuisine", None, "dining"),
];

/// Lookup table mapping each catalog title to its destinations.
#[derive(Debug, Clone, Copy)]
pub struct RouteTable {
    rules: &'static [RouteRule],
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::castle()
    }
}

impl RouteTable {
    pub const fn castle() -> Self {
        Self { rules: &CASTLE_ROUTES }
    }

    /// Titles with a known destination, in table order.
    pub fn titles(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.rules.iter().any(|rule| rule.title == title)
    }

    /// Resolves a title without logging.
    pub fn lookup(&self, title: &str, variant: RouteVariant) -> Option<Destination> {
        let rule = self.rules.iter().find(|rule| rule.title == title)?;
        Some(match variant {
            RouteVariant::Primary => Destination {
                path: rule.path,
                type_param: rule.type_param,
                fragment: Some(FORM_FRAGMENT),
            },
            RouteVariant::LearnMore => {
                Destination { path: rule.path, type_param: None, fragment: Some(rule.section) }
            },
        })
    }

    /// Resolves a title, reporting unknown ones.
    ///
    /// # Errors
    /// Returns [`NavigationError::Mismatch`] for a title outside the table. The miss is logged
    /// at `warn`; nothing else changes.
    pub fn route(&self, title: &str, variant: RouteVariant) -> Result<Destination, NavigationError> {
        match self.lookup(title, variant) {
            Some(destination) => {
                debug!(title, ?variant, href = %destination, "Route resolved");
                Ok(destination)
            },
            None => {
                warn!(title, ?variant, "No route defined for selection");
                Err(NavigationError::Mismatch { title: title.to_owned().into(), context: None })
            },
        }
    }
}

/// Resolves `title` against the venue's route table.
///
/// # Errors
/// See [`RouteTable::route`].
pub fn route(title: &str, variant: RouteVariant) -> Result<Destination, NavigationError> {
    RouteTable::castle().route(title, variant)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_route_prefills_and_targets_form() {
        let destination = route("Garden Suite", RouteVariant::Primary).unwrap();
        assert_eq!(destination.href(), "/accommodation?type=garden-suite#form");
        assert!(destination.targets_form());
    }

    #[test]
    fn learn_more_drops_the_type_param() {
        let destination = route("Group Tour", RouteVariant::LearnMore).unwrap();
        assert_eq!(destination.href(), "/visiting-program#grup");
        assert!(!destination.targets_form());
    }

    #[test]
    fn untyped_pages_still_target_the_form() {
        assert_eq!(route("Canta Cuisine", RouteVariant::Primary).unwrap().href(), "/canta-cuisine#form");
        assert_eq!(route("Shop", RouteVariant::LearnMore).unwrap().href(), "/shop#shop");
    }

    #[test]
    fn unknown_title_is_a_mismatch() {
        let err = route("Dungeon Tour", RouteVariant::Primary).unwrap_err();
        assert!(matches!(err, NavigationError::Mismatch { ref title, .. } if title == "Dungeon Tour"));
        assert_eq!(err.code(), "mismatch");
    }

    #[test]
    fn titles_are_unique() {
        let table = RouteTable::castle();
        let mut titles: Vec<_> = table.titles().collect();
        let len = titles.len();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), len);
    }

    #[test]
    fn variant_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&RouteVariant::LearnMore).unwrap(), "\"learn-more\"");
    }
}
