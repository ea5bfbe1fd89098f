//! Booking feature slice: the four reservation forms.
//!
//! Each form mounts with its defaults, accepts a navigation `type` parameter as a pre-fill of its
//! type field, validates per field while the visitor edits, and on a valid submit produces one
//! immutable [`FormSubmission`] that is published for delivery.
//!
//! ```rust
//! use castellan_booking::{FormKind, FormSession};
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
//! let session = FormSession::open(FormKind::Accommodation, Some("garden-suite"), today);
//!
//! assert_eq!(session.value("accommodation"), Some("garden-suite"));
//! assert!(session.is_dirty("accommodation") && session.is_touched("accommodation"));
//! ```

pub mod delivery;
mod error;
pub mod field;
pub mod schema;
#[cfg(feature = "server")]
pub mod server;
pub mod session;
pub mod submission;
pub mod validate;

pub use crate::error::{BookingError, BookingErrorExt};
pub use crate::field::{ChoiceOption, FieldError, FieldErrorCode, FieldKind, FieldSpec, FieldValue};
pub use crate::schema::{FormKind, FormSchema};
pub use crate::session::{FormSession, SessionState};
pub use crate::submission::{FormSubmission, SubmissionReceived};
pub use crate::validate::{FormFields, validate};
use castellan_event_bus::EventBus;
use castellan_kernel::prelude::SiteConfig;
use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Booking feature state
#[castellan_derive::castellan_slice]
pub struct Booking {
    pub events: EventBus,
    pub site: SiteConfig,
}

impl Booking {
    /// The current time on the venue's calendar.
    pub fn local_now(&self) -> DateTime<FixedOffset> {
        local_time(&self.site, Utc::now())
    }

    /// Submits `session` and publishes the snapshot for delivery. Dates are checked against the
    /// venue's calendar day at `now`.
    ///
    /// # Errors
    /// Returns [`BookingError::Validation`] when the form is invalid, or
    /// [`BookingError::Delivery`] when the snapshot cannot be published.
    pub fn submit(&self, session: &mut FormSession, now: DateTime<Utc>) -> Result<FormSubmission, BookingError> {
        let submission = session.submit(local_time(&self.site, now))?;
        delivery::publish(&self.events, submission.clone())?;

        tracing::info!(submission = %submission.id, form = %submission.form, "Form submitted");
        Ok(submission)
    }
}

/// `now` on the calendar configured by [`SiteConfig::utc_offset_minutes`].
///
/// An offset outside ±24 hours falls back to UTC; [`init`] refuses such configs.
pub fn local_time(site: &SiteConfig, now: DateTime<Utc>) -> DateTime<FixedOffset> {
    let offset = venue_offset(site).unwrap_or_else(|| Utc.fix());
    now.with_timezone(&offset)
}

fn venue_offset(site: &SiteConfig) -> Option<FixedOffset> {
    FixedOffset::east_opt(site.utc_offset_minutes.saturating_mul(60))
}

/// Initialize the booking feature.
///
/// Delivery workers are attached separately with [`delivery::spawn_logger`].
///
/// # Errors
/// Returns [`BookingError::Internal`] if a form declares its type field twice or not at all,
/// or if `site.utc_offset_minutes` is not a valid offset.
#[cfg(feature = "server")]
pub fn init(site: SiteConfig, events: &EventBus) -> Result<castellan_kernel::prelude::InitializedSlice, BookingError> {
    if venue_offset(&site).is_none() {
        return Err(format!("Invalid venue UTC offset: {} minutes", site.utc_offset_minutes).into());
    }

    for kind in FormKind::ALL {
        let schema = kind.schema();
        let declared = schema.type_field.map_or(1, |name| schema.fields.iter().filter(|f| f.name == name).count());
        if declared != 1 {
            return Err(format!("Form {kind} has a malformed type field").into());
        }
    }

    tracing::info!(slice = Booking::NAME, forms = FormKind::ALL.len(), "Booking server slice initialized");

    let slice = Booking::new(BookingInner { events: events.clone(), site });

    Ok(castellan_kernel::prelude::InitializedSlice::new(slice))
}
