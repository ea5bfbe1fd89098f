//! `/api/forms` routes.

use crate::{Booking, BookingError, FieldError, FieldSpec, FormKind, FormSession, FormSubmission, SessionState};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use castellan_derive::{api_handler, api_model};
use castellan_kernel::domain::constants::{BOOKING_TAG, FORM_FRAGMENT};
use castellan_kernel::prelude::{ApiError, ApiResult, ApiState, FieldIssue};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use utoipa::IntoParams;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Navigation state the form page was opened with.
#[api_model(deny_unknown_fields = false)]
#[derive(Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MountQuery {
    /// Pre-fill value for the form's type field
    #[serde(rename = "type")]
    pub type_param: Option<String>,
    /// URL fragment without `#`; `form` scrolls to the form
    pub fragment: Option<String>,
}

/// One selectable option.
#[api_model]
pub struct OptionView {
    pub value: String,
    pub label: String,
}

/// A field with its current state.
#[api_model]
pub struct FieldView {
    pub name: String,
    pub label: String,
    /// `choice`, `date`, `count`, `time`, `name`, `email`, `phone` or `text`
    pub kind: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub dirty: bool,
    pub touched: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<FieldIssue>,
}

/// Eased scroll the page runs towards the form after mounting.
#[api_model]
pub struct FormScroll {
    pub offset: i32,
    pub duration_ms: u64,
}

/// A mounted form.
#[api_model]
pub struct FormView {
    pub form: FormKind,
    pub page: String,
    pub state: SessionState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_field: Option<String>,
    pub fields: Vec<FieldView>,
    /// Present when the page was opened on the `#form` anchor with a type parameter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_to_form: Option<FormScroll>,
}

/// A raw field input; numbers are accepted for count fields.
#[api_model]
#[serde(untagged)]
pub enum FieldInput {
    Text(String),
    Number(i64),
}

/// Field inputs keyed by field name.
#[api_model]
pub struct SubmitRequest {
    pub fields: BTreeMap<String, FieldInput>,
}

/// The accepted snapshot.
#[api_model]
pub struct SubmissionView {
    pub id: String,
    pub form: FormKind,
    /// Field name to typed value, in form order
    #[schema(value_type = Object)]
    pub fields: serde_json::Value,
    pub submitted_at: DateTime<Utc>,
}

impl FieldInput {
    fn into_raw(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

impl From<&FieldError> for FieldIssue {
    fn from(err: &FieldError) -> Self {
        Self { field: err.field.to_owned(), code: err.code.as_str().to_owned(), message: err.message.to_string() }
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Validation { ref errors, .. } => {
                Self::unprocessable(err.to_string(), errors.iter().map(FieldIssue::from).collect())
            },
            BookingError::UnknownForm { .. } => Self::not_found(err.code(), err.to_string()),
            BookingError::UnknownField { .. } => Self::bad_request(err.code(), err.to_string()),
            BookingError::Delivery { .. } | BookingError::Internal { .. } => Self::internal(err.to_string()),
        }
    }
}

impl FieldView {
    fn new(spec: &FieldSpec, session: &FormSession) -> Self {
        Self {
            name: spec.name.to_owned(),
            label: spec.label.to_owned(),
            kind: spec.kind.as_str().to_owned(),
            required: spec.required,
            value: session.value(spec.name).map(str::to_owned),
            dirty: session.is_dirty(spec.name),
            touched: session.is_touched(spec.name),
            options: spec
                .options()
                .iter()
                .map(|option| OptionView { value: option.value.to_owned(), label: option.label.to_owned() })
                .collect(),
            error: session.error(spec.name).map(FieldIssue::from),
        }
    }
}

impl FormView {
    fn new(session: &FormSession, scroll_to_form: Option<FormScroll>) -> Self {
        let schema = session.schema();
        Self {
            form: schema.kind,
            page: schema.kind.page().to_owned(),
            state: session.state(),
            type_field: schema.type_field.map(str::to_owned),
            fields: schema.fields.iter().map(|spec| FieldView::new(spec, session)).collect(),
            scroll_to_form,
        }
    }
}

impl SubmissionView {
    fn new(submission: FormSubmission) -> ApiResult<Self> {
        let fields = serde_json::to_value(&submission.fields)
            .map_err(|err| ApiError::internal(format!("Failed to encode submission: {err}")))?;
        Ok(Self { id: submission.id, form: submission.form, fields, submitted_at: submission.submitted_at })
    }
}

#[api_handler(
    get,
    path = "/api/forms",
    responses((status = OK, description = "Every form, freshly mounted", body = Vec<FormView>)),
    tag = BOOKING_TAG,
)]
pub async fn forms_handler() -> Json<Vec<FormView>> {
    Json(FormKind::ALL.into_iter().map(|kind| FormView::new(&FormSession::mount(kind), None)).collect())
}

#[api_handler(
    get,
    path = "/api/forms/{form}",
    params(("form" = String, Path, description = "Form id"), MountQuery),
    responses(
        (status = OK, description = "Mounted form", body = FormView),
        (status = NOT_FOUND, description = "Unknown form", body = castellan_kernel::server::ErrorBody),
    ),
    tag = BOOKING_TAG,
)]
pub async fn mount_handler(
    State(state): State<ApiState>,
    Path(form): Path<String>,
    Query(query): Query<MountQuery>,
) -> ApiResult<Json<FormView>> {
    let booking = state.try_get_slice::<Booking>()?;
    let kind = form.parse::<FormKind>()?;

    let session = FormSession::open(kind, query.type_param.as_deref(), booking.local_now().date_naive());
    let scroll = (query.type_param.is_some() && query.fragment.as_deref() == Some(FORM_FRAGMENT)).then(|| {
        FormScroll { offset: booking.site.scroll_offset, duration_ms: booking.site.scroll_duration_ms }
    });

    Ok(Json(FormView::new(&session, scroll)))
}

#[api_handler(
    post,
    path = "/api/forms/{form}",
    params(("form" = String, Path, description = "Form id")),
    request_body = SubmitRequest,
    responses(
        (status = CREATED, description = "Submission accepted", body = SubmissionView),
        (status = BAD_REQUEST, description = "Unknown field", body = castellan_kernel::server::ErrorBody),
        (status = NOT_FOUND, description = "Unknown form", body = castellan_kernel::server::ErrorBody),
        (status = UNPROCESSABLE_ENTITY, description = "Failing fields", body = castellan_kernel::server::ErrorBody),
    ),
    tag = BOOKING_TAG,
)]
pub async fn submit_handler(
    State(state): State<ApiState>,
    Path(form): Path<String>,
    Json(request): Json<SubmitRequest>,
) -> ApiResult<(StatusCode, Json<SubmissionView>)> {
    let booking = state.try_get_slice::<Booking>()?;
    let kind = form.parse::<FormKind>()?;
    let now = Utc::now();
    let today = crate::local_time(&booking.site, now).date_naive();

    let mut session = FormSession::mount(kind);
    for (field, input) in request.fields {
        session.set(&field, input.into_raw(), today)?;
    }
    let submission = booking.submit(&mut session, now)?;

    Ok((StatusCode::CREATED, Json(SubmissionView::new(submission)?)))
}

/// Booking routes, merged into the server router.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(forms_handler))
        .routes(routes!(mount_handler, submit_handler))
}
