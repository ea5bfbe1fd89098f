//! The four reservation forms and their field declarations.

use crate::error::BookingError;
use crate::field::{ChoiceOption, FieldError, FieldErrorCode, FieldKind, FieldSpec, FieldValue};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

const fn option(value: &'static str, label: &'static str) -> ChoiceOption {
    ChoiceOption { value, label }
}

pub const ACCOMMODATION_OPTIONS: [ChoiceOption; 2] =
    [option("hunters-lodge", "Hunter's Lodge"), option("garden-suite", "Garden Suite")];

pub const EVENT_OPTIONS: [ChoiceOption; 4] = [
    option("nunta", "NUNTĂ SAU BOTEZ"),
    option("privat", "PETRECERI PRIVATE"),
    option("lansare", "LANSĂRI DE PRODUSE"),
    option("cultural", "EVENIMENTE CULTURALE"),
];

pub const VISIT_OPTIONS: [ChoiceOption; 8] = [
    option("castel-galerie-parc", "Individual - Castel + Galerie + Parc"),
    option("castel-parc", "Individual - Castel + Parc"),
    option("galerie-parc", "Individual - Galerie + Parc"),
    option("castel-galerie-parc-grup", "Grup - Castel + Galerie + Parc"),
    option("castel-parc-grup", "Grup - Castel + Parc"),
    option("galerie-parc-grup", "Grup - Galerie + Parc"),
    option("vip-5plus", "VIP (5+ persoane)"),
    option("vip-sub5", "VIP (sub 5 persoane)"),
];

pub const EVENT_TIMES: [ChoiceOption; 24] = [
    option("00:00", "00:00"),
    option("01:00", "01:00"),
    option("02:00", "02:00"),
    option("03:00", "03:00"),
    option("04:00", "04:00"),
    option("05:00", "05:00"),
    option("06:00", "06:00"),
    option("07:00", "07:00"),
    option("08:00", "08:00"),
    option("09:00", "09:00"),
    option("10:00", "10:00"),
    option("11:00", "11:00"),
    option("12:00", "12:00"),
    option("13:00", "13:00"),
    option("14:00", "14:00"),
    option("15:00", "15:00"),
    option("16:00", "16:00"),
    option("17:00", "17:00"),
    option("18:00", "18:00"),
    option("19:00", "19:00"),
    option("20:00", "20:00"),
    option("21:00", "21:00"),
    option("22:00", "22:00"),
    option("23:00", "23:00"),
];

pub const RESTAURANT_TIMES: [ChoiceOption; 9] = [
    option("12:00", "12:00"),
    option("13:00", "13:00"),
    option("14:00", "14:00"),
    option("15:00", "15:00"),
    option("16:00", "16:00"),
    option("17:00", "17:00"),
    option("18:00", "18:00"),
    option("19:00", "19:00"),
    option("20:00", "20:00"),
];

const NAME: FieldSpec = FieldSpec::required("name", "Name", FieldKind::Name, "Name is required");
const EMAIL: FieldSpec = FieldSpec::required("email", "Email", FieldKind::Email, "Invalid email");
const PHONE: FieldSpec = FieldSpec::required("phone", "Phone", FieldKind::Phone, "Invalid phone number");

const ACCOMMODATION_FIELDS: [FieldSpec; 7] = [
    FieldSpec::required(
        "accommodation",
        "Accommodation",
        FieldKind::Choice(&ACCOMMODATION_OPTIONS),
        "Accommodation type is required",
    ),
    FieldSpec::required("checkIn", "Check-in", FieldKind::Date, "Check-in date is required"),
    FieldSpec::required("checkOut", "Check-out", FieldKind::Date, "Check-out date is required"),
    FieldSpec::required("guests", "Guests", FieldKind::Count { min: 1 }, "Number of guests is required")
        .with_default("1"),
    NAME,
    EMAIL,
    PHONE,
];

const EVENT_FIELDS: [FieldSpec; 8] = [
    FieldSpec::required("eventType", "Event type", FieldKind::Choice(&EVENT_OPTIONS), "Event type is required"),
    FieldSpec::required(
        "guestCount",
        "Invitees",
        FieldKind::Count { min: 1 },
        "Number of invitees is required",
    )
    .with_default("1"),
    FieldSpec::required("date", "Date", FieldKind::Date, "Date is required"),
    FieldSpec::required("time", "Time", FieldKind::Choice(&EVENT_TIMES), "Time is required"),
    NAME,
    EMAIL,
    PHONE,
    FieldSpec::optional("comments", "Comments"),
];

const VISIT_FIELDS: [FieldSpec; 8] = [
    FieldSpec::required("visitType", "Visit type", FieldKind::Choice(&VISIT_OPTIONS), "Visit type is required"),
    FieldSpec::required("date", "Date", FieldKind::Date, "Visit date is required"),
    FieldSpec::required("time", "Time", FieldKind::Time, "Visit time is required"),
    FieldSpec::required("adults", "Adults", FieldKind::Count { min: 1 }, "Number of adults must be positive")
        .with_default("1"),
    FieldSpec::required(
        "children",
        "Children",
        FieldKind::Count { min: 0 },
        "Number of children must be positive",
    )
    .with_default("0"),
    NAME,
    EMAIL,
    PHONE,
];

const RESTAURANT_FIELDS: [FieldSpec; 7] = [
    FieldSpec::required("date", "Date", FieldKind::Date, "Reservation date is required"),
    FieldSpec::required("time", "Time", FieldKind::Choice(&RESTAURANT_TIMES), "Time is required"),
    FieldSpec::required("guests", "Guests", FieldKind::Count { min: 1 }, "Number of people is required")
        .with_default("2"),
    NAME,
    EMAIL,
    PHONE,
    FieldSpec::optional("specialRequests", "Special requests"),
];

/// A date that must fall strictly after another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateOrder {
    pub earlier: &'static str,
    pub later: &'static str,
    pub message: &'static str,
}

impl DateOrder {
    /// The error reported on [`Self::later`] when the two dates are out of order.
    pub fn check(&self, earlier: &FieldValue, later: &FieldValue) -> Result<(), FieldError> {
        match (earlier, later) {
            (FieldValue::Date(earlier), FieldValue::Date(later)) if later <= earlier => Err(FieldError {
                field: self.later,
                code: FieldErrorCode::NotAfter,
                message: Cow::Borrowed(self.message),
            }),
            _ => Ok(()),
        }
    }

    pub fn involves(&self, field: &str) -> bool {
        self.earlier == field || self.later == field
    }
}

const STAY_ORDER: [DateOrder; 1] =
    [DateOrder { earlier: "checkIn", later: "checkOut", message: "Check-out must be after check-in" }];

/// Which page a form lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub enum FormKind {
    Accommodation,
    Events,
    VisitingProgram,
    Restaurant,
}

impl FormKind {
    pub const ALL: [Self; 4] = [Self::Accommodation, Self::Events, Self::VisitingProgram, Self::Restaurant];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Accommodation => "accommodation",
            Self::Events => "events",
            Self::VisitingProgram => "visiting-program",
            Self::Restaurant => "restaurant",
        }
    }

    /// Page the form is embedded in.
    pub const fn page(self) -> &'static str {
        match self {
            Self::Accommodation => "/accommodation",
            Self::Events => "/events",
            Self::VisitingProgram => "/visiting-program",
            Self::Restaurant => "/canta-cuisine",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Form embedded in the page at `path`.
    pub fn from_page(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.page() == path)
    }

    pub const fn schema(self) -> FormSchema {
        match self {
            Self::Accommodation => FormSchema {
                kind: self,
                type_field: Some("accommodation"),
                fields: &ACCOMMODATION_FIELDS,
                date_orders: &STAY_ORDER,
            },
            Self::Events => {
                FormSchema { kind: self, type_field: Some("eventType"), fields: &EVENT_FIELDS, date_orders: &[] }
            },
            Self::VisitingProgram => {
                FormSchema { kind: self, type_field: Some("visitType"), fields: &VISIT_FIELDS, date_orders: &[] }
            },
            Self::Restaurant => {
                FormSchema { kind: self, type_field: None, fields: &RESTAURANT_FIELDS, date_orders: &[] }
            },
        }
    }
}

impl std::str::FromStr for FormKind {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| BookingError::UnknownForm {
            message: s.to_owned().into(),
            context: Some("expected one of accommodation, events, visiting-program, restaurant".into()),
        })
    }
}

impl std::fmt::Display for FormKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Field layout and cross-field rules of one form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSchema {
    pub kind: FormKind,
    /// The single-choice field a navigation `type` parameter seeds.
    pub type_field: Option<&'static str>,
    pub fields: &'static [FieldSpec],
    pub date_orders: &'static [DateOrder],
}

impl FormSchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// The type field's declaration, if the form has one.
    pub fn type_spec(&self) -> Option<&'static FieldSpec> {
        self.type_field.and_then(|name| self.field(name))
    }

    /// Resolves a sub-offer by option value, or by label ignoring case.
    pub fn resolve_offer(&self, offer: &str) -> Option<&'static str> {
        let options = self.type_spec()?.options();
        options
            .iter()
            .find(|option| option.value == offer)
            .or_else(|| options.iter().find(|option| option.label.to_lowercase() == offer.to_lowercase()))
            .map(|option| option.value)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|field| field.name)
    }
}
