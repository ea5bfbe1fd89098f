use crate::schema::FormKind;
use crate::validate::FormFields;
use castellan_kernel::safe_nanoid;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Snapshot of a valid submit. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub id: String,
    pub form: FormKind,
    pub fields: FormFields,
    pub submitted_at: DateTime<Utc>,
}

impl FormSubmission {
    pub(crate) fn new(form: FormKind, fields: FormFields, submitted_at: DateTime<Utc>) -> Self {
        Self { id: safe_nanoid!(), form, fields, submitted_at }
    }
}

/// Event published on the bus for every accepted submission.
#[derive(Debug, Clone)]
pub struct SubmissionReceived(pub FormSubmission);
