use std::borrow::Cow;

/// A specialized [`NavigationError`] enum of this crate.
#[castellan_derive::castellan_error]
pub enum NavigationError {
    /// A selection with no known destination. Non-fatal: the caller stays where it is.
    #[error("No route defined for{}: {title}", format_context(.context))]
    Mismatch { title: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// A location string that is not an absolute site path.
    #[error("Invalid location{}: {message}", format_context(.context))]
    InvalidLocation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("Location parse error{}: {source}", format_context(.context))]
    Url { source: url::ParseError, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal navigation error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
