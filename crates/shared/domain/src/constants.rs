// Filter categories
pub const TOURS: &str = "tours";
pub const VIP_TOURS: &str = "vip-tours";
pub const ART: &str = "art";
pub const EVENTS: &str = "events";
pub const ACCOMMODATION: &str = "accommodation";
pub const SHOP: &str = "shop";
pub const DINING: &str = "dining";

// Navigation
pub const TYPE_PARAM: &str = "type";
pub const FORM_FRAGMENT: &str = "form";
pub const HOME_PATH: &str = "/";

// OpenAPI tags
pub const SYSTEM_TAG: &str = "System";
pub const CATALOG_TAG: &str = "Catalog";
pub const NAVIGATION_TAG: &str = "Navigation";
pub const BOOKING_TAG: &str = "Booking";
