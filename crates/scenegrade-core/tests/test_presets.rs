use scenegrade_core::error::ScenegradeError;
use scenegrade_core::grading::{FilterPreset, Knob, ParameterOverlay, PresetCatalog};

#[test]
fn test_builtin_golden_hour() {
    let p = PresetCatalog::builtin().get("golden_hour").unwrap();
    assert_eq!(p.display_name, "Golden Hour");
    assert!(p.overlay.temperature.unwrap() > 0.0);
}

#[test]
fn test_lookup_is_case_insensitive() {
    let catalog = PresetCatalog::builtin();
    assert_eq!(catalog.get("GOLDEN_HOUR").unwrap().id, "golden_hour");
}

#[test]
fn test_unknown_preset_is_not_found() {
    match PresetCatalog::builtin().get("no_such_look") {
        Err(ScenegradeError::PresetNotFound(id)) => assert_eq!(id, "no_such_look"),
        other => panic!("expected PresetNotFound, got {other:?}"),
    }
}

#[test]
fn test_find_by_display_name_or_id() {
    let catalog = PresetCatalog::builtin();
    assert_eq!(catalog.find_by_name("Golden Hour").unwrap().id, "golden_hour");
    assert_eq!(catalog.find_by_name("golden-hour").unwrap().id, "golden_hour");
    assert_eq!(catalog.find_by_name("noir").unwrap().id, "noir");
    assert!(catalog.find_by_name("Xyzzy").is_none());
    assert!(catalog.find_by_name("").is_none());
}

#[test]
fn test_builtin_overlays_stay_in_range() {
    for preset in PresetCatalog::builtin().iter() {
        assert!(!preset.overlay.is_empty(), "{} is empty", preset.id);
        for (knob, value) in preset.overlay.knobs() {
            let (min, max) = knob.range();
            assert!(
                (min..=max).contains(&value),
                "{}: {knob}={value} outside [{min}, {max}]",
                preset.id
            );
        }
    }
}

#[test]
fn test_builtin_ids_are_unique() {
    let catalog = PresetCatalog::builtin();
    let mut ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), catalog.len());
}

#[test]
fn test_custom_preset_overrides_builtin_and_appends() {
    let custom = vec![
        FilterPreset::new(
            "Golden_Hour",
            "My Golden Hour",
            ParameterOverlay::default().with(Knob::Temperature, 45.0),
        ),
        FilterPreset::new(
            "faded",
            "Faded",
            ParameterOverlay::default().with(Knob::Contrast, 80.0),
        ),
    ];
    let builtin_len = PresetCatalog::builtin().len();
    let catalog = PresetCatalog::with_custom(custom);

    assert_eq!(catalog.len(), builtin_len + 1);
    let golden = catalog.get("golden_hour").unwrap();
    assert_eq!(golden.display_name, "My Golden Hour");
    assert_eq!(golden.overlay.temperature, Some(45.0));
    assert_eq!(golden.overlay.saturation, None);
    assert!(catalog.contains("faded"));
}

#[test]
fn test_overlay_rejects_unknown_fields() {
    let json = r#"{"id": "x", "display_name": "X", "overlay": {"exposure": 10}}"#;
    assert!(serde_json::from_str::<FilterPreset>(json).is_err());
}

#[test]
fn test_overlay_serializes_only_set_fields() {
    let overlay = ParameterOverlay::default().with(Knob::GreenBoost, 20.0);
    let json = serde_json::to_string(&overlay).unwrap();
    assert_eq!(json, r#"{"green_boost":20.0}"#);
}

#[test]
fn test_overlay_knobs_in_canonical_order() {
    let overlay = ParameterOverlay::default()
        .with(Knob::Texture, 5.0)
        .with(Knob::Brightness, 110.0);
    let knobs: Vec<Knob> = overlay.knobs().map(|(k, _)| k).collect();
    assert_eq!(knobs, vec![Knob::Brightness, Knob::Texture]);
}
