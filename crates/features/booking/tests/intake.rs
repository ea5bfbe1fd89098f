use castellan_booking::{FieldErrorCode, FieldValue, FormKind, FormSession, SessionState};
use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 1, 8, 30, 0).unwrap()
}

fn today() -> NaiveDate {
    now().date_naive()
}

fn fill(session: &mut FormSession, values: &[(&str, &str)]) {
    for (field, value) in values {
        session.set(field, *value, today()).unwrap();
    }
}

const CONTACT: [(&str, &str); 3] = [("name", "Ana Pop"), ("email", "ana@example.com"), ("phone", "0712345678")];

#[test]
fn hunters_lodge_stay_yields_one_seven_field_snapshot() {
    let mut session = FormSession::mount(FormKind::Accommodation);
    fill(
        &mut session,
        &[("accommodation", "hunters-lodge"), ("checkIn", "2025-06-01"), ("checkOut", "2025-06-03"), ("guests", "2")],
    );
    fill(&mut session, &CONTACT);

    let submission = session.submit(now()).unwrap();
    let fields = &submission.fields;

    assert_eq!(fields.len(), 7);
    assert_eq!(fields.get("accommodation"), Some(&FieldValue::Choice("hunters-lodge".to_owned())));
    assert_eq!(fields.get("checkIn"), Some(&FieldValue::Date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())));
    assert_eq!(fields.get("guests"), Some(&FieldValue::Count(2)));
    assert_eq!(fields.get("phone"), Some(&FieldValue::Text("0712345678".to_owned())));
    assert_eq!(submission.submitted_at, now());
}

#[test]
fn zero_guests_produces_no_snapshot() {
    let mut session = FormSession::mount(FormKind::Accommodation);
    fill(
        &mut session,
        &[("accommodation", "hunters-lodge"), ("checkIn", "2025-06-01"), ("checkOut", "2025-06-03"), ("guests", "0")],
    );
    fill(&mut session, &CONTACT);

    let err = session.submit(now()).unwrap_err();
    assert_eq!(err.field_errors().len(), 1);
    assert_eq!(err.field_errors()[0].field, "guests");
    assert_eq!(session.state(), SessionState::Invalid);
}

#[test]
fn garden_suite_parameter_prefills_without_keystrokes() {
    let session = FormSession::open(FormKind::Accommodation, Some("garden-suite"), today());
    assert_eq!(session.value("accommodation"), Some("garden-suite"));
    assert!(session.is_dirty("accommodation"));
    assert!(session.is_touched("accommodation"));
    assert!(!session.is_dirty("guests"));
}

#[test]
fn every_failing_field_surfaces_its_own_message() {
    let mut session = FormSession::mount(FormKind::VisitingProgram);
    fill(&mut session, &[("adults", "0"), ("email", "not-an-email"), ("phone", "123")]);

    let err = session.submit(now()).unwrap_err();
    let messages: Vec<_> = err.field_errors().iter().map(|e| (e.field, e.message.as_ref())).collect();
    assert_eq!(
        messages,
        [
            ("visitType", "Visit type is required"),
            ("date", "Visit date is required"),
            ("time", "Visit time is required"),
            ("adults", "Number of adults must be positive"),
            ("name", "Name is required"),
            ("email", "Invalid email"),
            ("phone", "Invalid phone number"),
        ]
    );
}

#[test]
fn same_day_reservation_is_accepted() {
    let mut session = FormSession::mount(FormKind::Restaurant);
    fill(&mut session, &[("date", "2025-05-01"), ("time", "19:00")]);
    fill(&mut session, &CONTACT);

    let submission = session.submit(now()).unwrap();
    assert_eq!(submission.fields.get("guests"), Some(&FieldValue::Count(2)));
    assert!(submission.fields.get("specialRequests").is_none());
}

#[test]
fn restaurant_rejects_hours_outside_service() {
    let mut session = FormSession::mount(FormKind::Restaurant);
    fill(&mut session, &[("date", "2025-05-02"), ("time", "22:00")]);
    fill(&mut session, &CONTACT);

    let err = session.submit(now()).unwrap_err();
    assert_eq!(err.field_errors()[0].field, "time");
}

proptest! {
    #[test]
    fn past_dates_are_always_rejected(days in 1u64..3650) {
        let date = today().checked_sub_days(Days::new(days)).unwrap();
        let mut session = FormSession::mount(FormKind::Events);
        session.set("date", date.format("%Y-%m-%d").to_string(), today()).unwrap();
        session.touch("date", today()).unwrap();
        prop_assert_eq!(session.error("date").map(|e| e.code), Some(FieldErrorCode::PastDate));
    }

    #[test]
    fn counts_below_one_never_submit(guests in -50i64..1) {
        let mut session = FormSession::mount(FormKind::Restaurant);
        fill(&mut session, &[("date", "2025-05-02"), ("time", "12:00")]);
        fill(&mut session, &CONTACT);
        session.set("guests", guests.to_string(), today()).unwrap();

        let err = session.submit(now()).unwrap_err();
        let codes: Vec<_> = err.field_errors().iter().map(|e| (e.field, e.code)).collect();
        prop_assert_eq!(codes, vec![("guests", FieldErrorCode::Min)]);
    }

    #[test]
    fn stays_must_last_at_least_a_night(start in 0u64..400, nights in 0u64..30) {
        let check_in = today() + Days::new(start);
        let check_out = check_in + Days::new(nights);
        let mut session = FormSession::mount(FormKind::Accommodation);
        fill(&mut session, &[("accommodation", "garden-suite")]);
        fill(&mut session, &CONTACT);
        session.set("checkIn", check_in.format("%Y-%m-%d").to_string(), today()).unwrap();
        session.set("checkOut", check_out.format("%Y-%m-%d").to_string(), today()).unwrap();

        let result = session.submit(now());
        prop_assert_eq!(result.is_ok(), nights > 0);
    }
}
