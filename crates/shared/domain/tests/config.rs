use castellan_domain::config::{ApiConfig, DeliveryConfig, ServerConfig, SiteConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 4583);
    assert!(server.ssl.is_none());

    let site = SiteConfig::default();
    assert_eq!(site.reveal_batch, 3);
    assert_eq!(site.narrow_viewport_max, 767);
    assert_eq!(site.scroll_offset, 100);
    assert_eq!(site.scroll_duration_ms, 1000);
    assert_eq!(site.fade_ms, 500);

    assert_eq!(DeliveryConfig::default().capacity, 128);
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "site": { "reveal_batch": 6 },
        "logging": { "level": "debug", "json": true }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.site.reveal_batch, 6);
    assert_eq!(cfg.site.narrow_viewport_max, 767);
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
    assert_eq!(cfg.delivery.capacity, 128);
}

#[test]
fn api_config_clones_on_write() {
    let original = ApiConfig::default();
    let mut copy = original.clone();
    copy.site.reveal_batch = 9;

    assert_eq!(original.site.reveal_batch, 3);
    assert_eq!(copy.site.reveal_batch, 9);
}
