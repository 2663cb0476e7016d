mod common;

use common::{department_scene, draw_region};
use floorheat_core::config::{load_config, save_config, CancelPolicy, FloorheatConfig, HeatSettings};
use floorheat_core::consts::{DEFAULT_BLUR_RADIUS, DEFAULT_OPACITY};
use floorheat_core::geometry::Point;
use floorheat_core::heat::colormap::ColorScale;

#[test]
fn test_defaults() {
    let config = FloorheatConfig::default();
    assert!(config.heat.enabled);
    assert_eq!(config.heat.blur_radius, DEFAULT_BLUR_RADIUS);
    assert_eq!(config.heat.opacity, DEFAULT_OPACITY);
    assert_eq!(config.heat.color_scale, ColorScale::Heat);
    assert_eq!(config.interaction.cancel_policy, CancelPolicy::DiscardEmpty);
}

#[test]
fn test_toml_roundtrip() {
    let mut config = FloorheatConfig::default();
    config.heat.color_scale = ColorScale::Viridis;
    config.heat.opacity = 0.35;
    config.render.dash = [3.0, 2.0];
    config.interaction.cancel_policy = CancelPolicy::KeepAll;

    let text = toml::to_string_pretty(&config).unwrap();
    let parsed: FloorheatConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_partial_file_uses_defaults() {
    let parsed: FloorheatConfig = toml::from_str("[heat]\nblur_radius = 8.0\n").unwrap();
    assert_eq!(parsed.heat.blur_radius, 8.0);
    assert_eq!(parsed.heat.opacity, DEFAULT_OPACITY);
    assert_eq!(parsed.render, Default::default());

    let empty: FloorheatConfig = toml::from_str("").unwrap();
    assert_eq!(empty, FloorheatConfig::default());
}

#[test]
fn test_sanitize_clamps_ranges() {
    let heat = HeatSettings {
        blur_radius: 500.0,
        opacity: 0.0,
        ..HeatSettings::default()
    }
    .sanitized();
    assert_eq!(heat.blur_radius, 60.0);
    assert_eq!(heat.opacity, 0.05);

    let heat = HeatSettings {
        blur_radius: f32::NAN,
        opacity: f32::INFINITY,
        ..HeatSettings::default()
    }
    .sanitized();
    assert_eq!(heat.blur_radius, DEFAULT_BLUR_RADIUS);
    assert_eq!(heat.opacity, DEFAULT_OPACITY);
}

#[test]
fn test_load_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("floorheat.toml");

    std::fs::write(
        &path,
        "[heat]\nopacity = 3.0\ncolor_scale = \"Spectral\"\n[interaction]\ncancel_policy = \"KeepAll\"\n",
    )
    .unwrap();
    let loaded = load_config(&path).unwrap();
    assert_eq!(loaded.heat.opacity, 1.0);
    assert_eq!(loaded.heat.color_scale, ColorScale::Spectral);
    assert_eq!(loaded.interaction.cancel_policy, CancelPolicy::KeepAll);

    let out = dir.path().join("saved.toml");
    save_config(&loaded, &out).unwrap();
    assert_eq!(load_config(&out).unwrap(), loaded);
}

#[test]
fn test_unknown_color_scale_is_rejected() {
    assert!(toml::from_str::<FloorheatConfig>("[heat]\ncolor_scale = \"Plasma\"\n").is_err());
}

#[test]
fn test_snapshot_serializes() {
    let mut state = department_scene();
    draw_region(&mut state, "Deli", &[Point::new(5.0, 5.0)]);

    let json = serde_json::to_value(state.snapshot()).unwrap();
    assert_eq!(json["zoom"], 1.0);
    assert_eq!(json["pan"], serde_json::json!([0.0, 0.0]));
    assert_eq!(json["mode"]["Draw"], 2);

    let regions = json["regions"].as_array().unwrap();
    assert_eq!(regions.len(), 3);
    assert_eq!(regions[0]["name"], "Cosmetics");
    assert_eq!(regions[0]["value"], 500.0);
    assert_eq!(regions[0]["complete"], true);
    assert_eq!(regions[2]["point_count"], 1);
    assert_eq!(regions[2]["complete"], false);
}
