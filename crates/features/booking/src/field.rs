//! Field declarations, typed values, and per-field validation.

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::sync::LazyLock;

const MIN_NAME_CHARS: usize = 2;
const MIN_PHONE_CHARS: usize = 10;
const DATE_FORMAT: &str = "%Y-%m-%d";

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$";
const TIME_PATTERN: &str = r"^([01][0-9]|2[0-3]):[0-5][0-9]$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("CRITICAL: Email pattern must compile"));
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TIME_PATTERN).expect("CRITICAL: Time pattern must compile"));

/// One entry of a single-choice field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Value type and rule of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Must be one of the listed values.
    Choice(&'static [ChoiceOption]),
    /// `YYYY-MM-DD`, not before today.
    Date,
    /// Whole number, at least `min`.
    Count { min: u32 },
    /// `HH:MM`, 24-hour clock.
    Time,
    /// At least two characters.
    Name,
    Email,
    /// At least ten characters.
    Phone,
    /// Free text, never validated.
    Text,
}

impl FieldKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Choice(_) => "choice",
            Self::Date => "date",
            Self::Count { .. } => "count",
            Self::Time => "time",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Text => "text",
        }
    }
}

/// Declaration of one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name (`checkIn`, `guestCount`, ...).
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Initial value applied when the form mounts.
    pub default: Option<&'static str>,
    /// Message shown when the value is missing or out of range.
    pub message: &'static str,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind, message: &'static str) -> Self {
        Self { name, label, kind, required: true, default: None, message }
    }

    pub const fn optional(name: &'static str, label: &'static str) -> Self {
        Self { name, label, kind: FieldKind::Text, required: false, default: None, message: "" }
    }

    #[must_use]
    pub const fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    pub fn options(&self) -> &'static [ChoiceOption] {
        match self.kind {
            FieldKind::Choice(options) => options,
            _ => &[],
        }
    }

    /// Validates a raw input against this field.
    ///
    /// Returns `Ok(None)` for an empty optional field.
    ///
    /// # Errors
    /// Returns the [`FieldError`] describing the first broken rule.
    pub fn validate(&self, raw: Option<&str>, today: NaiveDate) -> Result<Option<FieldValue>, FieldError> {
        let raw = raw.map(str::trim).unwrap_or_default();

        if raw.is_empty() {
            return match self.kind {
                _ if !self.required => Ok(None),
                FieldKind::Email => Err(self.error(FieldErrorCode::Email, "Invalid email")),
                FieldKind::Phone => Err(self.error(FieldErrorCode::Phone, "Invalid phone number")),
                _ => Err(self.error(FieldErrorCode::Required, self.message)),
            };
        }

        let value = match self.kind {
            FieldKind::Choice(options) => {
                let option = options
                    .iter()
                    .find(|option| option.value == raw)
                    .ok_or_else(|| self.error(FieldErrorCode::Required, self.message))?;
                FieldValue::Choice(option.value.to_owned())
            },
            FieldKind::Date => {
                let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
                    .map_err(|_| self.error(FieldErrorCode::InvalidDate, "Invalid date"))?;
                if date < today {
                    return Err(self.error(FieldErrorCode::PastDate, "Date cannot be in the past"));
                }
                FieldValue::Date(date)
            },
            FieldKind::Count { min } => {
                let count = raw
                    .parse::<i64>()
                    .map_err(|_| self.error(FieldErrorCode::InvalidNumber, "Must be a whole number"))?;
                if count < i64::from(min) {
                    return Err(self.error(FieldErrorCode::Min, self.message));
                }
                let count = u32::try_from(count)
                    .map_err(|_| self.error(FieldErrorCode::InvalidNumber, "Number is too large"))?;
                FieldValue::Count(count)
            },
            FieldKind::Time => {
                if !TIME_RE.is_match(raw) {
                    return Err(self.error(FieldErrorCode::InvalidTime, "Invalid time"));
                }
                FieldValue::Text(raw.to_owned())
            },
            FieldKind::Name => {
                if raw.chars().count() < MIN_NAME_CHARS {
                    return Err(self.error(FieldErrorCode::TooShort, self.message));
                }
                FieldValue::Text(raw.to_owned())
            },
            FieldKind::Email => {
                if !EMAIL_RE.is_match(raw) {
                    return Err(self.error(FieldErrorCode::Email, "Invalid email"));
                }
                FieldValue::Text(raw.to_owned())
            },
            FieldKind::Phone => {
                if raw.chars().count() < MIN_PHONE_CHARS {
                    return Err(self.error(FieldErrorCode::Phone, "Invalid phone number"));
                }
                FieldValue::Text(raw.to_owned())
            },
            FieldKind::Text => FieldValue::Text(raw.to_owned()),
        };

        Ok(Some(value))
    }

    pub(crate) fn error(&self, code: FieldErrorCode, message: &'static str) -> FieldError {
        FieldError { field: self.name, code, message: Cow::Borrowed(message) }
    }
}

/// A validated, typed field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Choice(String),
    Date(NaiveDate),
    Count(u32),
    Text(String),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Choice(value) | Self::Text(value) => f.write_str(value),
            Self::Date(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            Self::Count(count) => write!(f, "{count}"),
        }
    }
}

/// Machine-readable reason a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorCode {
    Required,
    Min,
    TooShort,
    Email,
    Phone,
    InvalidDate,
    PastDate,
    InvalidNumber,
    InvalidTime,
    /// A date that must follow another one does not.
    NotAfter,
}

impl FieldErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Min => "min",
            Self::TooShort => "too_short",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::InvalidDate => "invalid_date",
            Self::PastDate => "past_date",
            Self::InvalidNumber => "invalid_number",
            Self::InvalidTime => "invalid_time",
            Self::NotAfter => "not_after",
        }
    }
}

/// A per-field validation failure, surfaced next to the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub code: FieldErrorCode,
    pub message: Cow<'static, str>,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TODAY: NaiveDate = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
    const GUESTS: FieldSpec = FieldSpec::required(
        "guests",
        "Guests",
        FieldKind::Count { min: 1 },
        "Number of guests is required",
    );

    #[test]
    fn format_patterns_compile() {
        for pattern in [EMAIL_PATTERN, TIME_PATTERN] {
            assert!(Regex::new(pattern).is_ok(), "{pattern}");
        }
        assert!(EMAIL_RE.is_match("ana@example.com"));
        assert!(!EMAIL_RE.is_match("ana@example"));
        assert!(TIME_RE.is_match("23:59"));
        assert!(!TIME_RE.is_match("24:00"));
    }

    #[test]
    fn count_below_minimum_fails_with_min() {
        let err = GUESTS.validate(Some("0"), TODAY).unwrap_err();
        assert_eq!(err.code, FieldErrorCode::Min);
        assert_eq!(err.field, "guests");
        assert_eq!(GUESTS.validate(Some(" 3 "), TODAY).unwrap(), Some(FieldValue::Count(3)));
        assert_eq!(GUESTS.validate(Some("two"), TODAY).unwrap_err().code, FieldErrorCode::InvalidNumber);
    }

    #[test]
    fn today_is_accepted_and_yesterday_rejected() {
        let date = FieldSpec::required("date", "Date", FieldKind::Date, "Date is required");
        assert!(date.validate(Some("2025-05-20"), TODAY).is_ok());
        assert_eq!(date.validate(Some("2025-05-19"), TODAY).unwrap_err().code, FieldErrorCode::PastDate);
        assert_eq!(date.validate(Some("20/05/2025"), TODAY).unwrap_err().code, FieldErrorCode::InvalidDate);
        assert_eq!(date.validate(None, TODAY).unwrap_err().code, FieldErrorCode::Required);
    }

    #[test]
    fn contact_fields_follow_length_and_format_rules() {
        let name = FieldSpec::required("name", "Name", FieldKind::Name, "Name is required");
        let email = FieldSpec::required("email", "Email", FieldKind::Email, "");
        let phone = FieldSpec::required("phone", "Phone", FieldKind::Phone, "");

        assert_eq!(name.validate(Some("A"), TODAY).unwrap_err().code, FieldErrorCode::TooShort);
        assert!(name.validate(Some("Ană"), TODAY).is_ok());
        assert_eq!(email.validate(Some("ana@"), TODAY).unwrap_err().message, "Invalid email");
        assert!(email.validate(Some("ana.pop@example.co.uk"), TODAY).is_ok());
        assert_eq!(phone.validate(Some("071234"), TODAY).unwrap_err().message, "Invalid phone number");
        assert_eq!(phone.validate(None, TODAY).unwrap_err().code, FieldErrorCode::Phone);
    }

    #[test]
    fn choice_outside_options_fails_like_empty() {
        const OPTIONS: [ChoiceOption; 1] = [ChoiceOption { value: "nunta", label: "Wedding" }];
        let kind = FieldSpec::required("eventType", "Event type", FieldKind::Choice(&OPTIONS), "Event type is required");
        assert_eq!(kind.validate(Some("gala"), TODAY).unwrap_err(), kind.validate(Some(""), TODAY).unwrap_err());
        assert_eq!(kind.validate(Some("nunta"), TODAY).unwrap(), Some(FieldValue::Choice("nunta".to_owned())));
    }

    #[test]
    fn optional_text_is_never_validated() {
        let comments = FieldSpec::optional("comments", "Comments");
        assert_eq!(comments.validate(None, TODAY).unwrap(), None);
        assert_eq!(comments.validate(Some("x"), TODAY).unwrap(), Some(FieldValue::Text("x".to_owned())));
    }

    #[test]
    fn time_must_be_on_the_clock() {
        let time = FieldSpec::required("time", "Time", FieldKind::Time, "Time is required");
        assert!(time.validate(Some("09:30"), TODAY).is_ok());
        assert_eq!(time.validate(Some("24:00"), TODAY).unwrap_err().code, FieldErrorCode::InvalidTime);
    }

    #[test]
    fn values_render_for_display() {
        let date = FieldValue::Date(TODAY);
        assert_eq!(date.to_string(), "2025-05-20");
        assert_eq!(serde_json::to_value(FieldValue::Count(2)).unwrap(), serde_json::json!(2));
    }
}
