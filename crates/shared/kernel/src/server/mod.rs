//! HTTP building blocks shared by the slice routers.

mod error;
mod health;
pub mod router;
mod state;

pub use error::{ApiError, ApiResult, ErrorBody, ErrorDetail, FieldIssue};
pub use state::{ApiState, ApiStateBuilder, ApiStateError, ApiStateErrorExt, ApiStateInner};
