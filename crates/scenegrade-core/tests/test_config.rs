use std::time::Duration;

use scenegrade_core::config::{AssistantConfig, SamplerConfig};
use scenegrade_core::consts::MAX_SAMPLER_DELAY_MS;
use scenegrade_core::error::ScenegradeError;
use scenegrade_core::grading::{FilterPreset, Knob, ParameterOverlay};
use scenegrade_core::suggest::{Recommender, SceneRule};

#[test]
fn test_defaults() {
    let config = AssistantConfig::default();
    assert_eq!(config.sampler.interval(), Duration::from_secs(5));
    assert_eq!(config.sampler.initial_delay(), Duration::from_secs(1));
    assert_eq!((config.sampler.frame_width, config.sampler.frame_height), (640, 480));
    assert_eq!(config.sampler.jpeg_quality, 80);
    assert_eq!(config.presentation.display_duration(), Duration::from_secs(3));
    assert!(config.presentation.suppress_dismissed);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_json_fills_defaults() {
    let json = r#"{"sampler": {"interval_ms": 2000}, "presentation": {"suppress_dismissed": false}}"#;
    let config: AssistantConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.sampler.interval_ms, 2000);
    assert_eq!(config.sampler.initial_delay_ms, 1000);
    assert_eq!(config.presentation.display_duration_ms, 3000);
    assert!(!config.presentation.suppress_dismissed);
    assert!(config.presets.is_empty());
}

#[test]
fn test_json_roundtrip_with_custom_preset() {
    let json = r#"{
        "presets": [{"id": "faded", "display_name": "Faded", "overlay": {"contrast": 85}}],
        "scenes": [{"label": "Fog", "preset_id": "faded"}]
    }"#;
    let config: AssistantConfig = serde_json::from_str(json).unwrap();
    assert!(config.catalog().contains("faded"));
    assert_eq!(config.scenes[0].message, None);

    let back: AssistantConfig =
        serde_json::from_str(&serde_json::to_string(&config).unwrap()).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_invalid_sampler_settings_rejected() {
    let zero_interval = SamplerConfig {
        interval_ms: 0,
        ..SamplerConfig::default()
    };
    let zero_frame = SamplerConfig {
        frame_width: 0,
        ..SamplerConfig::default()
    };
    let bad_quality = SamplerConfig {
        jpeg_quality: 0,
        ..SamplerConfig::default()
    };
    let huge_interval = SamplerConfig {
        interval_ms: u64::MAX,
        ..SamplerConfig::default()
    };
    let huge_delay = SamplerConfig {
        initial_delay_ms: MAX_SAMPLER_DELAY_MS + 1,
        ..SamplerConfig::default()
    };
    for config in [zero_interval, zero_frame, bad_quality, huge_interval, huge_delay] {
        assert!(
            matches!(config.validate(), Err(ScenegradeError::Config(_))),
            "{config:?}"
        );
    }
}

#[test]
fn test_rule_with_unknown_preset_only_warns() {
    let json = r#"{"scenes": [{"label": "Fog", "preset_id": "nowhere"}]}"#;
    let config: AssistantConfig = serde_json::from_str(json).unwrap();
    assert!(config.validate().is_ok());
}

#[test]
fn test_delay_at_upper_bound_is_accepted() {
    let config = SamplerConfig {
        interval_ms: MAX_SAMPLER_DELAY_MS,
        initial_delay_ms: MAX_SAMPLER_DELAY_MS,
        ..SamplerConfig::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_toml_roundtrip_with_presets_and_rules() {
    let mut scenes = Recommender::builtin_rules();
    scenes.push(SceneRule::new("Fog", "faded", Some("{label} again? {preset} it is.")));
    let config = AssistantConfig {
        presets: vec![FilterPreset::new(
            "faded",
            "Faded",
            ParameterOverlay::default()
                .with(Knob::Contrast, 85.0)
                .with(Knob::Temperature, -12.5),
        )],
        scenes,
        ..AssistantConfig::default()
    };

    let text = toml::to_string_pretty(&config).unwrap();
    let back: AssistantConfig = toml::from_str(&text).unwrap();
    assert_eq!(back, config);
    assert_eq!(back.catalog().get("faded").unwrap().overlay.temperature, Some(-12.5));
}

#[test]
fn test_toml_partial_file_fills_defaults() {
    let text = r#"
[sampler]
interval_ms = 2500

[[presets]]
id = "golden_hour"
display_name = "Golden Hour (mine)"

[presets.overlay]
temperature = 45.0
"#;
    let config: AssistantConfig = toml::from_str(text).unwrap();
    assert_eq!(config.sampler.interval_ms, 2500);
    assert_eq!(config.sampler.jpeg_quality, 80);
    let golden = config.catalog().get("golden_hour").unwrap().clone();
    assert_eq!(golden.display_name, "Golden Hour (mine)");
    assert_eq!(golden.overlay.temperature, Some(45.0));
    assert_eq!(golden.overlay.saturation, None);
}
