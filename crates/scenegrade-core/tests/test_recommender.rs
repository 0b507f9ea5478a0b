use std::sync::Arc;

use scenegrade_core::grading::PresetCatalog;
use scenegrade_core::scene::{Confidence, SceneObservation};
use scenegrade_core::suggest::{Recommender, SceneRule};

fn observe(label: &str) -> SceneObservation {
    SceneObservation::new(label, Confidence::High)
}

fn recommender() -> Recommender {
    Recommender::new(Arc::new(PresetCatalog::default()))
}

#[test]
fn test_sunset_suggests_golden_hour() {
    let s = recommender().recommend(&observe("Sunset")).unwrap();
    assert_eq!(s.scene_label, "Sunset");
    assert_eq!(s.preset_id, "golden_hour");
    assert!(s.message.contains("Golden Hour"), "{}", s.message);
    assert!(!s.message.contains('{'));
}

#[test]
fn test_label_match_ignores_case_and_whitespace() {
    let s = recommender().recommend(&observe("  sunset ")).unwrap();
    assert_eq!(s.preset_id, "golden_hour");
    assert_eq!(s.scene_label, "Sunset");
}

#[test]
fn test_unknown_label_has_no_suggestion() {
    assert!(recommender().recommend(&observe("Xyzzy")).is_none());
    assert!(recommender().recommend(&observe("")).is_none());
}

#[test]
fn test_rule_without_message_uses_generic_text() {
    let s = recommender().recommend(&observe("Ocean")).unwrap();
    assert_eq!(s.message, "Ocean scene detected. Try the Cool Breeze filter.");
}

#[test]
fn test_label_naming_a_preset_falls_back() {
    let s = recommender().recommend(&observe("Noir")).unwrap();
    assert_eq!(s.preset_id, "noir");
    assert_eq!(s.message, "Noir scene detected. Try the Noir filter.");
}

#[test]
fn test_rule_with_missing_preset_fails_closed() {
    let rules = vec![SceneRule::new("Sunset", "does_not_exist", None)];
    let rec = Recommender::with_rules(Arc::new(PresetCatalog::default()), rules);
    assert!(rec.recommend(&observe("Sunset")).is_none());
}

#[test]
fn test_extra_rules_replace_and_extend() {
    let extra = vec![
        SceneRule::new("sunset", "warm_feast", Some("{label}: {preset}")),
        SceneRule::new("Stage", "night_glow", None),
    ];
    let rec = Recommender::with_extra_rules(Arc::new(PresetCatalog::default()), &extra);
    assert_eq!(rec.rules().len(), Recommender::builtin_rules().len() + 1);

    let s = rec.recommend(&observe("Sunset")).unwrap();
    assert_eq!(s.preset_id, "warm_feast");
    assert_eq!(s.message, "sunset: Warm Feast");
    assert_eq!(rec.recommend(&observe("stage")).unwrap().preset_id, "night_glow");
}

#[test]
fn test_builtin_rules_resolve_against_builtin_catalog() {
    let catalog = PresetCatalog::builtin();
    for rule in Recommender::builtin_rules() {
        assert!(catalog.contains(&rule.preset_id), "{}", rule.preset_id);
    }
}
