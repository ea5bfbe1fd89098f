use crate::error::{NavigationError, NavigationErrorExt};
use castellan_kernel::domain::constants::{FORM_FRAGMENT, TYPE_PARAM};
use serde::{Deserialize, Serialize};
use url::Url;

/// Origin site paths are resolved against; only the path, query and fragment are kept.
const SITE_ORIGIN: &str = "http://castellan.local/";

/// A site location as read by the destination page on mount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub path: String,
    pub type_param: Option<String>,
    pub fragment: Option<String>,
}

impl Location {
    /// Parses `path[?query][#fragment]`. The query is percent-decoded and only its `type`
    /// parameter is kept; an empty `type=` counts as absent.
    ///
    /// # Errors
    /// Returns [`NavigationError::InvalidLocation`] unless the input is an absolute site path,
    /// or [`NavigationError::Url`] if it does not parse as one.
    pub fn parse(href: &str) -> Result<Self, NavigationError> {
        if !href.starts_with('/') || href.starts_with("//") {
            return Err(NavigationError::InvalidLocation {
                message: format!("'{href}' is not an absolute path").into(),
                context: None,
            });
        }

        let url = Url::parse(SITE_ORIGIN)
            .and_then(|origin| origin.join(href))
            .context(format!("location '{href}'"))?;

        let type_param = url
            .query_pairs()
            .find(|(key, _)| key == TYPE_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty());

        Ok(Self {
            path: url.path().to_owned(),
            type_param,
            fragment: url.fragment().filter(|f| !f.is_empty()).map(str::to_owned),
        })
    }

    pub fn targets_form(&self) -> bool {
        self.fragment.as_deref() == Some(FORM_FRAGMENT)
    }
}
