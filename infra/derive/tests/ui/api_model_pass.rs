use castellan_derive::api_model;

#[api_model]
pub struct CatalogQuery {
    pub search_query: Option<String>,
    pub reveal_count: usize,
}

#[api_model(rename_all = "kebab-case")]
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum RouteVariant {
    Primary,
    LearnMore,
}

fn main() {
    let query: CatalogQuery = serde_json::from_str(r#"{"searchQuery":"tour","revealCount":3}"#).unwrap();
    assert_eq!(query.search_query.as_deref(), Some("tour"));
    assert!(serde_json::from_str::<CatalogQuery>(r#"{"revealCount":3,"extra":1}"#).is_err());

    let variant: RouteVariant = serde_json::from_str(r#""learn-more""#).unwrap();
    assert_eq!(variant, RouteVariant::LearnMore);
}
