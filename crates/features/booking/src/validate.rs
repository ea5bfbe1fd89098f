//! Whole-form validation.

use crate::field::{FieldError, FieldValue};
use crate::schema::FormSchema;
use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Validated values in schema order. Empty optional fields are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(Vec<(&'static str, FieldValue)>);

impl FormFields {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(field, _)| *field == name).map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.0.iter().map(|(name, value)| (*name, value))
    }
}

impl Serialize for FormFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Validates every field of `schema`, then the cross-field date rules.
///
/// `lookup` returns the raw input of a field by name. Dates earlier than `today` are rejected.
///
/// # Errors
/// Returns every failing field, in schema order. A date-order failure is reported on the later
/// field and only when both dates are otherwise valid.
pub fn validate<'v>(
    schema: &FormSchema,
    lookup: impl Fn(&'static str) -> Option<&'v str>,
    today: NaiveDate,
) -> Result<FormFields, Vec<FieldError>> {
    let mut values = Vec::with_capacity(schema.fields.len());
    let mut errors = Vec::new();

    for spec in schema.fields {
        match spec.validate(lookup(spec.name), today) {
            Ok(Some(value)) => values.push((spec.name, value)),
            Ok(None) => {},
            Err(err) => errors.push(err),
        }
    }

    let fields = FormFields(values);
    for order in schema.date_orders {
        if let (Some(earlier), Some(later)) = (fields.get(order.earlier), fields.get(order.later))
            && let Err(err) = order.check(earlier, later)
        {
            errors.push(err);
        }
    }

    if errors.is_empty() { Ok(fields) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldErrorCode;
    use crate::schema::FormKind;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 20).unwrap()
    }

    fn stay<'a>(check_in: &'a str, check_out: &'a str) -> impl Fn(&'static str) -> Option<&'a str> {
        move |name| match name {
            "accommodation" => Some("hunters-lodge"),
            "checkIn" => Some(check_in),
            "checkOut" => Some(check_out),
            "guests" => Some("2"),
            "name" => Some("Ana Pop"),
            "email" => Some("ana@example.com"),
            "phone" => Some("0712345678"),
            _ => None,
        }
    }

    #[test]
    fn valid_stay_keeps_schema_order() {
        let fields = validate(&FormKind::Accommodation.schema(), stay("2025-06-01", "2025-06-03"), today()).unwrap();
        let names: Vec<_> = fields.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["accommodation", "checkIn", "checkOut", "guests", "name", "email", "phone"]);
    }

    #[test]
    fn check_out_must_follow_check_in() {
        let errors = validate(&FormKind::Accommodation.schema(), stay("2025-06-03", "2025-06-03"), today()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "checkOut");
        assert_eq!(errors[0].code, FieldErrorCode::NotAfter);
    }

    #[test]
    fn order_rule_is_skipped_when_a_date_is_already_invalid() {
        let errors = validate(&FormKind::Accommodation.schema(), stay("2025-05-01", "2025-04-01"), today()).unwrap_err();
        assert!(errors.iter().all(|err| err.code == FieldErrorCode::PastDate));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let schema = FormKind::Events.schema();
        let errors = validate(&schema, |_| None, today()).unwrap_err();
        let required = schema.fields.iter().filter(|field| field.required).count();
        assert_eq!(errors.len(), required);
        assert!(errors.iter().all(|err| err.field != "comments"));
    }

    #[test]
    fn serializes_as_an_ordered_object() {
        let fields = validate(&FormKind::Accommodation.schema(), stay("2025-06-01", "2025-06-03"), today()).unwrap();
        let json = serde_json::to_string(&fields).unwrap();
        assert!(json.starts_with(r#"{"accommodation":"hunters-lodge","checkIn":"2025-06-01""#));
        assert!(json.contains(r#""guests":2"#));
    }
}
