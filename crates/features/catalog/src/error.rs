use std::borrow::Cow;

/// A specialized [`CatalogError`] enum of this crate.
#[castellan_derive::castellan_error]
pub enum CatalogError {
    /// A category id outside the fixed filter set.
    #[error("Unknown category{}: {message}", format_context(.context))]
    UnknownCategory { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// A catalog entry breaks a catalog invariant (duplicate title, no category).
    #[error("Invalid catalog entry{}: {message}", format_context(.context))]
    InvalidEntry { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal catalog error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
