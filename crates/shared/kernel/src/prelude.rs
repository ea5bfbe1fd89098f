//! Common imports for slice crates.

pub use crate::domain::category::{CategorySet, FilterCategory, IconId};
pub use crate::domain::config::{ApiConfig, SiteConfig};
pub use crate::domain::registry::{FeatureSlice, InitializedSlice};
pub use crate::safe_nanoid;
#[cfg(feature = "server")]
pub use crate::server::{ApiError, ApiResult, ApiState, FieldIssue};
