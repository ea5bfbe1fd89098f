//! `/api/catalog` routes.

use crate::{Catalog, CatalogEntry, CatalogError, FilterState, parse_categories};
use axum::Json;
use axum::extract::{Query, State};
use castellan_derive::{api_handler, api_model};
use castellan_kernel::domain::constants::CATALOG_TAG;
use castellan_kernel::prelude::{ApiError, ApiResult, ApiState, FilterCategory};
use utoipa::IntoParams;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Catalog browse parameters.
#[api_model(deny_unknown_fields = false)]
#[derive(Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogQuery {
    /// Comma separated category ids; empty means every category
    pub categories: Option<String>,
    /// Case-insensitive search over titles and descriptions
    pub q: Option<String>,
    /// Viewport width in pixels; narrow widths clip the result
    pub viewport: Option<u32>,
    /// Reveal count reached so far (defaults to the batch size)
    pub reveal: Option<usize>,
}

/// Catalog entry as rendered by the presentation layer.
#[api_model]
pub struct EntryView {
    pub title: String,
    pub description: String,
    pub image_ref: String,
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    pub icon: String,
    pub highlights: Vec<String>,
}

impl From<&CatalogEntry> for EntryView {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            title: entry.title.to_owned(),
            description: entry.description.to_owned(),
            image_ref: entry.image_ref.to_owned(),
            categories: entry.categories.categories().map(|c| c.id().to_owned()).collect(),
            subtype: entry.subtype.map(str::to_owned),
            icon: entry.icon.as_str().to_owned(),
            highlights: entry.highlights().iter().map(|h| (*h).to_owned()).collect(),
        }
    }
}

/// One page of the filtered catalog.
#[api_model]
pub struct CatalogPage {
    pub entries: Vec<EntryView>,
    /// Filtered entries before viewport clipping
    pub total: usize,
    pub reveal_count: usize,
    /// Reveal count to request for the next "load more", if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_reveal: Option<usize>,
}

/// A filter category with its display label and icon.
#[api_model]
pub struct CategoryView {
    pub id: String,
    pub label: String,
    pub icon: String,
}

impl From<FilterCategory> for CategoryView {
    fn from(category: FilterCategory) -> Self {
        Self {
            id: category.id().to_owned(),
            label: category.label().to_owned(),
            icon: category.icon().as_str().to_owned(),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownCategory { .. } => Self::bad_request(err.code(), err.to_string()),
            CatalogError::InvalidEntry { .. } | CatalogError::Internal { .. } => {
                Self::internal(err.to_string())
            },
        }
    }
}

#[api_handler(
    get,
    path = "/api/catalog",
    params(CatalogQuery),
    responses(
        (status = OK, description = "Filtered catalog", body = CatalogPage),
        (status = BAD_REQUEST, description = "Unknown category", body = castellan_kernel::server::ErrorBody),
    ),
    tag = CATALOG_TAG,
)]
pub async fn list_handler(
    State(state): State<ApiState>,
    Query(query): Query<CatalogQuery>,
) -> ApiResult<Json<CatalogPage>> {
    let catalog = state.try_get_slice::<Catalog>()?;

    let active = parse_categories(query.categories.as_deref().unwrap_or_default())?;
    let filter = FilterState::new(active, query.q.unwrap_or_default());
    let viewport = query.viewport.map_or(crate::Viewport::Wide, |width| catalog.viewport(width));
    let reveal = catalog.reveal().with_reveal_count(query.reveal.unwrap_or_default());

    let view = catalog.store.browse(&filter, &reveal, viewport);
    let next_reveal = view.can_load_more.then(|| {
        let mut next = reveal;
        next.advance(view.total);
        next.reveal_count()
    });

    Ok(Json(CatalogPage {
        entries: view.entries.into_iter().map(EntryView::from).collect(),
        total: view.total,
        reveal_count: view.reveal_count,
        next_reveal,
    }))
}

#[api_handler(
    get,
    path = "/api/catalog/categories",
    responses((status = OK, description = "Filter categories in display order", body = Vec<CategoryView>)),
    tag = CATALOG_TAG,
)]
pub async fn categories_handler() -> Json<Vec<CategoryView>> {
    Json(FilterCategory::ALL.into_iter().map(CategoryView::from).collect())
}

/// Catalog routes, merged into the server router.
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(list_handler)).routes(routes!(categories_handler))
}
