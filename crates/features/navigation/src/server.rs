//! `/api/navigation` routes.

use crate::{Destination, Navigation, NavigationError, RouteVariant};
use axum::Json;
use axum::extract::{Query, State};
use castellan_derive::{api_handler, api_model};
use castellan_kernel::domain::constants::NAVIGATION_TAG;
use castellan_kernel::prelude::{ApiError, ApiResult, ApiState};
use utoipa::IntoParams;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Navigation lookup parameters.
#[api_model(deny_unknown_fields = false)]
#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NavigationQuery {
    /// Catalog entry title, as displayed
    pub title: String,
    #[serde(default)]
    pub variant: RouteVariant,
}

/// Eased scroll the destination page runs towards its form.
#[api_model]
pub struct ScrollSpec {
    /// Units kept above the form's top edge
    pub offset: i32,
    pub duration_ms: u64,
    /// Easing curve name; always `smoothstep` (t²(3 − 2t))
    pub easing: String,
}

/// Resolved destination.
#[api_model]
pub struct NavigationResponse {
    /// `path[?type=value][#fragment]`
    pub href: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_param: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
    /// Present when the destination lands on the form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll: Option<ScrollSpec>,
}

/// Both destinations of one catalog title.
#[api_model]
pub struct RouteView {
    pub title: String,
    pub primary: String,
    pub learn_more: String,
}

impl NavigationResponse {
    fn new(destination: Destination, navigation: &Navigation) -> Self {
        let scroll = destination.targets_form().then(|| ScrollSpec {
            offset: navigation.site.scroll_offset,
            duration_ms: navigation.site.scroll_duration_ms,
            easing: "smoothstep".to_owned(),
        });
        Self {
            href: destination.href(),
            path: destination.path.to_owned(),
            type_param: destination.type_param.map(str::to_owned),
            fragment: destination.fragment.map(str::to_owned),
            scroll,
        }
    }
}

impl From<NavigationError> for ApiError {
    fn from(err: NavigationError) -> Self {
        match err {
            NavigationError::Mismatch { .. } => Self::not_found(err.code(), err.to_string()),
            NavigationError::InvalidLocation { .. } | NavigationError::Url { .. } => {
                Self::bad_request(err.code(), err.to_string())
            },
            NavigationError::Internal { .. } => Self::internal(err.to_string()),
        }
    }
}

#[api_handler(
    get,
    path = "/api/navigation",
    params(NavigationQuery),
    responses(
        (status = OK, description = "Destination for the selection", body = NavigationResponse),
        (status = NOT_FOUND, description = "No route defined for the title", body = castellan_kernel::server::ErrorBody),
    ),
    tag = NAVIGATION_TAG,
)]
pub async fn route_handler(
    State(state): State<ApiState>,
    Query(query): Query<NavigationQuery>,
) -> ApiResult<Json<NavigationResponse>> {
    let navigation = state.try_get_slice::<Navigation>()?;
    let destination = navigation.routes.route(&query.title, query.variant)?;

    Ok(Json(NavigationResponse::new(destination, navigation)))
}

#[api_handler(
    get,
    path = "/api/navigation/routes",
    responses((status = OK, description = "Route table in catalog order", body = Vec<RouteView>)),
    tag = NAVIGATION_TAG,
)]
pub async fn routes_handler(State(state): State<ApiState>) -> ApiResult<Json<Vec<RouteView>>> {
    let navigation = state.try_get_slice::<Navigation>()?;
    let table = navigation.routes;

    let views = table
        .titles()
        .filter_map(|title| {
            let primary = table.lookup(title, RouteVariant::Primary)?;
            let learn_more = table.lookup(title, RouteVariant::LearnMore)?;
            Some(RouteView {
                title: title.to_owned(),
                primary: primary.href(),
                learn_more: learn_more.href(),
            })
        })
        .collect();

    Ok(Json(views))
}

/// Navigation routes, merged into the server router.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(route_handler)).routes(routes!(routes_handler))
}
