use crate::field::FieldError;
use castellan_event_bus::EventBusError;
use std::borrow::Cow;

/// A specialized [`BookingError`] enum of this crate.
#[castellan_derive::castellan_error]
pub enum BookingError {
    /// One or more fields failed validation; every failing field is listed.
    #[error("Form validation failed{}: {} invalid field(s)", format_context(.context), .errors.len())]
    Validation { errors: Vec<FieldError>, context: Option<Cow<'static, str>> },
    /// No form with this id.
    #[error("Unknown form{}: {message}", format_context(.context))]
    UnknownForm { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// A field name the form does not declare.
    #[error("Unknown field{}: {message}", format_context(.context))]
    UnknownField { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// The submission could not be handed to the delivery channel.
    #[error("Delivery error{}: {source}", format_context(.context))]
    Delivery { source: EventBusError, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal booking error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl BookingError {
    /// Field failures of a [`BookingError::Validation`], empty otherwise.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation { errors, .. } => errors,
            _ => &[],
        }
    }
}
