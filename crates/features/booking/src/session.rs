//! Editing state of one mounted form.

use crate::error::BookingError;
use crate::field::{FieldError, FieldSpec};
use crate::schema::{FormKind, FormSchema};
use crate::submission::FormSubmission;
use crate::validate::validate;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use fxhash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Lifecycle of a [`FormSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub enum SessionState {
    /// Mounted, nothing entered yet (defaults do not count).
    #[default]
    Empty,
    Editing,
    /// The last submit was blocked; every failing field carries its message.
    Invalid,
    ValidSubmitted,
}

/// A form between mount and navigation away.
///
/// Values are raw strings as typed; they are only parsed when a field is validated. Errors are
/// per field and never block editing other fields.
#[derive(Debug, Clone)]
pub struct FormSession {
    schema: FormSchema,
    values: FxHashMap<&'static str, String>,
    dirty: FxHashSet<&'static str>,
    touched: FxHashSet<&'static str>,
    errors: FxHashMap<&'static str, FieldError>,
    state: SessionState,
}

impl FormSession {
    /// Mounts `kind` with its default values.
    pub fn mount(kind: FormKind) -> Self {
        let schema = kind.schema();
        let values = schema
            .fields
            .iter()
            .filter_map(|field| field.default.map(|default| (field.name, default.to_owned())))
            .collect();

        Self {
            schema,
            values,
            dirty: FxHashSet::default(),
            touched: FxHashSet::default(),
            errors: FxHashMap::default(),
            state: SessionState::Empty,
        }
    }

    /// Mounts `kind` and applies a navigation `type` parameter, if any.
    ///
    /// A parameter on a form without a type field is ignored with a warning.
    pub fn open(kind: FormKind, type_param: Option<&str>, today: NaiveDate) -> Self {
        let mut session = Self::mount(kind);
        if let Some(value) = type_param.filter(|value| !value.is_empty())
            && let Err(err) = session.prefill(value, today)
        {
            warn!(form = %kind, error = %err, "Ignoring type parameter");
        }
        session
    }

    pub const fn kind(&self) -> FormKind {
        self.schema.kind
    }

    pub const fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub const fn state(&self) -> SessionState {
        self.state
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn is_dirty(&self, field: &str) -> bool {
        self.dirty.contains(field)
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    pub fn error(&self, field: &str) -> Option<&FieldError> {
        self.errors.get(field)
    }

    /// Current errors in schema order.
    pub fn errors(&self) -> impl Iterator<Item = &FieldError> {
        self.schema.fields.iter().filter_map(|field| self.errors.get(field.name))
    }

    /// Seeds the type field as if the visitor had picked `value`: the field becomes dirty and
    /// touched and is validated immediately.
    ///
    /// # Errors
    /// Returns [`BookingError::UnknownField`] if the form has no type field.
    pub fn prefill(&mut self, value: &str, today: NaiveDate) -> Result<(), BookingError> {
        let spec = self.type_spec()?;
        self.force(spec, value.to_owned(), today);
        debug!(form = %self.kind(), field = spec.name, value, "Type field pre-filled");
        Ok(())
    }

    /// Picks a sub-offer shown on the page (for example the "GARDEN SUITE" card), by option
    /// value or by label. Same marks as [`Self::prefill`].
    ///
    /// An offer that matches no option is stored as typed and fails validation.
    ///
    /// # Errors
    /// Returns [`BookingError::UnknownField`] if the form has no type field.
    pub fn select_offer(&mut self, offer: &str, today: NaiveDate) -> Result<(), BookingError> {
        let spec = self.type_spec()?;
        let value = self.schema.resolve_offer(offer).unwrap_or(offer);
        self.force(spec, value.to_owned(), today);
        Ok(())
    }

    /// Records a keystroke-level edit.
    ///
    /// A field already showing an error is re-validated so the message clears as soon as the
    /// value is fixed. Editing either date of an order rule (check-in, check-out) re-checks the
    /// later date once it was touched or shows an error.
    ///
    /// # Errors
    /// Returns [`BookingError::UnknownField`] for a name the form does not declare.
    pub fn set(&mut self, field: &str, value: impl Into<String>, today: NaiveDate) -> Result<(), BookingError> {
        let spec = self.spec(field)?;
        self.values.insert(spec.name, value.into());
        self.dirty.insert(spec.name);
        self.state = SessionState::Editing;

        if self.errors.contains_key(spec.name) {
            self.check(spec, today);
        }
        self.check_orders(spec.name, today);
        Ok(())
    }

    /// Marks a field as visited and validates it.
    ///
    /// # Errors
    /// Returns [`BookingError::UnknownField`] for a name the form does not declare.
    pub fn touch(&mut self, field: &str, today: NaiveDate) -> Result<(), BookingError> {
        let spec = self.spec(field)?;
        self.touched.insert(spec.name);
        self.check(spec, today);
        self.check_orders(spec.name, today);
        Ok(())
    }

    /// Validates the whole form against the calendar day of `now`.
    ///
    /// Pass `now` in the venue's timezone (see [`crate::local_time`]); the snapshot records it
    /// in UTC. On success the snapshot is returned and the session becomes
    /// [`SessionState::ValidSubmitted`]. Otherwise nothing is produced, every field is marked
    /// touched and every failing field keeps its own message.
    ///
    /// # Errors
    /// Returns [`BookingError::Validation`] listing every failing field.
    pub fn submit<Tz: TimeZone>(&mut self, now: DateTime<Tz>) -> Result<FormSubmission, BookingError> {
        self.touched.extend(self.schema.field_names());

        let values = &self.values;
        match validate(&self.schema, |name| values.get(name).map(String::as_str), now.date_naive()) {
            Ok(fields) => {
                self.errors.clear();
                self.state = SessionState::ValidSubmitted;
                Ok(FormSubmission::new(self.schema.kind, fields, now.with_timezone(&Utc)))
            },
            Err(errors) => {
                self.errors = errors.iter().map(|err| (err.field, err.clone())).collect();
                self.state = SessionState::Invalid;
                debug!(form = %self.kind(), failing = errors.len(), "Submit blocked");
                Err(BookingError::Validation { errors, context: None })
            },
        }
    }

    /// Back to the freshly mounted state.
    pub fn reset(&mut self) {
        *self = Self::mount(self.schema.kind);
    }

    fn force(&mut self, spec: &'static FieldSpec, value: String, today: NaiveDate) {
        self.values.insert(spec.name, value);
        self.dirty.insert(spec.name);
        self.touched.insert(spec.name);
        self.state = SessionState::Editing;
        self.check(spec, today);
    }

    fn check(&mut self, spec: &'static FieldSpec, today: NaiveDate) {
        match self.field_result(spec, today) {
            Ok(()) => {
                self.errors.remove(spec.name);
            },
            Err(err) => {
                self.errors.insert(spec.name, err);
            },
        }
    }

    /// Own rules of `spec`, then every order rule in which it is the later date.
    fn field_result(&self, spec: &FieldSpec, today: NaiveDate) -> Result<(), FieldError> {
        let Some(value) = spec.validate(self.value(spec.name), today)? else {
            return Ok(());
        };

        for order in self.schema.date_orders.iter().filter(|order| order.later == spec.name) {
            let earlier = self
                .schema
                .field(order.earlier)
                .and_then(|earlier| earlier.validate(self.value(earlier.name), today).ok().flatten());
            if let Some(earlier) = earlier {
                order.check(&earlier, &value)?;
            }
        }
        Ok(())
    }

    fn check_orders(&mut self, field: &str, today: NaiveDate) {
        let orders = self.schema.date_orders;
        for order in orders.iter().filter(|order| order.involves(field)) {
            let visible = self.touched.contains(order.later) || self.errors.contains_key(order.later);
            if visible && let Some(later) = self.schema.field(order.later) {
                self.check(later, today);
            }
        }
    }

    fn spec(&self, field: &str) -> Result<&'static FieldSpec, BookingError> {
        self.schema.field(field).ok_or_else(|| BookingError::UnknownField {
            message: field.to_owned().into(),
            context: Some(format!("form {}", self.kind()).into()),
        })
    }

    fn type_spec(&self) -> Result<&'static FieldSpec, BookingError> {
        self.schema.type_spec().ok_or_else(|| BookingError::UnknownField {
            message: "type".into(),
            context: Some(format!("form {} has no type field", self.kind()).into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldErrorCode;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 20, 9, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        now().date_naive()
    }

    fn filled_stay(guests: &str) -> FormSession {
        stay("2025-06-01", "2025-06-03", guests)
    }

    fn stay(check_in: &str, check_out: &str, guests: &str) -> FormSession {
        let mut session = FormSession::mount(FormKind::Accommodation);
        for (field, value) in [
            ("accommodation", "hunters-lodge"),
            ("checkIn", check_in),
            ("checkOut", check_out),
            ("guests", guests),
            ("name", "Ana Pop"),
            ("email", "ana@example.com"),
            ("phone", "0712345678"),
        ] {
            session.set(field, value, today()).unwrap();
        }
        session
    }

    #[test]
    fn mount_applies_defaults_without_marking_anything() {
        let session = FormSession::mount(FormKind::Accommodation);
        assert_eq!(session.state(), SessionState::Empty);
        assert_eq!(session.value("guests"), Some("1"));
        assert!(!session.is_dirty("guests"));
        assert_eq!(session.errors().count(), 0);
    }

    #[test]
    fn zero_guests_blocks_submit_on_the_guests_field() {
        let mut session = filled_stay("0");
        let err = session.submit(now()).unwrap_err();

        let fields: Vec<_> = err.field_errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, ["guests"]);
        assert_eq!(session.state(), SessionState::Invalid);
        assert_eq!(session.error("guests").map(|e| e.code), Some(FieldErrorCode::Min));
        assert!(session.is_touched("phone"));
    }

    #[test]
    fn valid_stay_produces_a_seven_field_snapshot() {
        let mut session = filled_stay("2");
        let submission = session.submit(now()).unwrap();

        assert_eq!(submission.form, FormKind::Accommodation);
        assert_eq!(submission.fields.len(), 7);
        assert_eq!(submission.id.len(), 12);
        assert_eq!(session.state(), SessionState::ValidSubmitted);
    }

    #[test]
    fn type_parameter_prefills_dirty_and_touched() {
        let session = FormSession::open(FormKind::Accommodation, Some("garden-suite"), today());
        assert_eq!(session.value("accommodation"), Some("garden-suite"));
        assert!(session.is_dirty("accommodation"));
        assert!(session.is_touched("accommodation"));
        assert!(session.error("accommodation").is_none());
    }

    #[test]
    fn unknown_type_parameter_surfaces_as_a_field_error() {
        let session = FormSession::open(FormKind::Events, Some("gala"), today());
        assert_eq!(session.value("eventType"), Some("gala"));
        assert_eq!(session.error("eventType").map(|e| e.message.as_ref()), Some("Event type is required"));
    }

    #[test]
    fn restaurant_ignores_type_parameter() {
        let session = FormSession::open(FormKind::Restaurant, Some("vip"), today());
        assert_eq!(session.state(), SessionState::Empty);
        assert!(FormSession::mount(FormKind::Restaurant).clone().prefill("vip", today()).is_err());
    }

    #[test]
    fn selecting_an_offer_by_label_sets_its_value() {
        let mut session = FormSession::mount(FormKind::Accommodation);
        session.select_offer("GARDEN SUITE", today()).unwrap();
        assert_eq!(session.value("accommodation"), Some("garden-suite"));
        assert!(session.is_touched("accommodation"));
    }

    #[test]
    fn fixing_a_field_clears_its_error() {
        let mut session = filled_stay("0");
        let _ = session.submit(now());
        session.set("guests", "3", today()).unwrap();
        assert!(session.error("guests").is_none());
        assert_eq!(session.state(), SessionState::Editing);
    }

    #[test]
    fn check_out_keeps_its_order_error_until_it_follows_check_in() {
        let mut session = stay("2025-06-03", "2025-06-03", "2");
        let _ = session.submit(now());
        assert_eq!(session.error("checkOut").map(|e| e.code), Some(FieldErrorCode::NotAfter));

        session.set("checkOut", "2025-06-02", today()).unwrap();
        assert_eq!(session.error("checkOut").map(|e| e.code), Some(FieldErrorCode::NotAfter));
        assert!(session.submit(now()).is_err());

        session.set("checkOut", "2025-06-05", today()).unwrap();
        assert!(session.error("checkOut").is_none());
        assert!(session.submit(now()).is_ok());
    }

    #[test]
    fn moving_check_in_rechecks_a_touched_check_out() {
        let mut session = filled_stay("2");
        session.touch("checkOut", today()).unwrap();
        assert!(session.error("checkOut").is_none());

        session.set("checkIn", "2025-06-04", today()).unwrap();
        assert_eq!(session.error("checkOut").map(|e| e.message.as_ref()), Some("Check-out must be after check-in"));

        session.set("checkIn", "2025-06-02", today()).unwrap();
        assert!(session.error("checkOut").is_none());
    }

    #[test]
    fn untouched_check_out_stays_quiet_while_check_in_moves() {
        let mut session = filled_stay("2");
        session.set("checkIn", "2025-06-04", today()).unwrap();
        assert!(session.error("checkOut").is_none());
    }

    #[test]
    fn dates_are_judged_on_the_callers_calendar() {
        let bucharest = chrono::FixedOffset::east_opt(3 * 3600).unwrap();
        let local = bucharest.with_ymd_and_hms(2025, 6, 1, 1, 0, 0).unwrap();
        let mut session = stay("2025-05-31", "2025-06-03", "2");

        let err = session.submit(local).unwrap_err();
        assert_eq!(err.field_errors()[0].code, FieldErrorCode::PastDate);
        assert_eq!(err.field_errors()[0].field, "checkIn");

        session.set("checkIn", "2025-06-01", local.date_naive()).unwrap();
        let submission = session.submit(local).unwrap();
        assert_eq!(submission.submitted_at, Utc.with_ymd_and_hms(2025, 5, 31, 22, 0, 0).unwrap());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut session = FormSession::mount(FormKind::Events);
        let err = session.set("castle", "yes", today()).unwrap_err();
        assert_eq!(err.code(), "unknown_field");
    }

    #[test]
    fn reset_returns_to_mount_state() {
        let mut session = filled_stay("2");
        session.reset();
        assert_eq!(session.state(), SessionState::Empty);
        assert_eq!(session.value("name"), None);
        assert!(!session.is_dirty("guests"));
    }
}
