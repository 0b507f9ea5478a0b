use std::sync::mpsc;
use std::time::{Duration, Instant};

use scenegrade_core::assistant::{ApplyOutcome, SceneAssistant};
use scenegrade_core::config::AssistantConfig;
use scenegrade_core::grading::{compose, FilterPreset, GradingParameters, Knob, ParameterOverlay};
use scenegrade_core::scene::{Confidence, SamplerEvent, SceneObservation};
use scenegrade_core::suggest::{PresenterEvent, SceneRule, SuggestionPhase};

fn observe(label: &str) -> SceneObservation {
    SceneObservation::new(label, Confidence::High)
}

#[test]
fn test_sunset_suggestion_applies_golden_hour() {
    let t0 = Instant::now();
    let mut assistant = SceneAssistant::default();

    let events = assistant.on_observation(Some(&observe("Sunset")), t0);
    assert!(matches!(events.as_slice(), [PresenterEvent::Shown(_)]));
    assert_eq!(assistant.phase(), SuggestionPhase::Visible);

    let outcome = assistant.apply(t0 + Duration::from_secs(1));
    let chain = outcome.chain().cloned().unwrap();
    match &outcome {
        ApplyOutcome::Applied { suggestion, .. } => assert_eq!(suggestion.scene_label, "Sunset"),
        other => panic!("expected apply, got {other:?}"),
    }
    assert_eq!(assistant.session().active_preset(), Some("golden_hour"));
    assert_eq!(assistant.phase(), SuggestionPhase::Hidden);

    let golden = assistant.catalog().get("golden_hour").unwrap();
    assert_eq!(chain, compose(&GradingParameters::neutral(), Some(golden)));
    assert_eq!(assistant.filter_chain(), chain);
}

#[test]
fn test_applied_preset_layers_over_user_base() {
    let t0 = Instant::now();
    let mut assistant = SceneAssistant::default();
    assistant.session_mut().adjust(Knob::Clarity, 40.0);
    assistant.on_observation(Some(&observe("Sunset")), t0);
    let chain = assistant.apply(t0).into_chain().unwrap();

    let base = GradingParameters::neutral().with(Knob::Clarity, 40.0);
    let golden = assistant.catalog().get("golden_hour").unwrap();
    assert_eq!(chain, compose(&base, Some(golden)));
}

#[test]
fn test_unknown_scene_stays_hidden() {
    let mut assistant = SceneAssistant::default();
    assert!(assistant
        .on_observation(Some(&observe("Xyzzy")), Instant::now())
        .is_empty());
    assert_eq!(assistant.phase(), SuggestionPhase::Hidden);
    assert_eq!(assistant.apply(Instant::now()), ApplyOutcome::NothingVisible);
    assert!(assistant.session().active_preset().is_none());
}

#[test]
fn test_missed_cycle_keeps_visible_suggestion() {
    let t0 = Instant::now();
    let mut assistant = SceneAssistant::default();
    assistant.on_event(&SamplerEvent::Observed(observe("Night")), t0);
    assert!(assistant
        .on_event(&SamplerEvent::Missed, t0 + Duration::from_millis(500))
        .is_empty());
    assert_eq!(assistant.visible().unwrap().preset_id, "night_glow");
}

#[test]
fn test_missed_cycle_reports_expiry() {
    let t0 = Instant::now();
    let mut assistant = SceneAssistant::default();
    assistant.on_event(&SamplerEvent::Observed(observe("Sunset")), t0);

    let events = assistant.on_event(&SamplerEvent::Missed, t0 + Duration::from_secs(4));
    assert!(matches!(events.as_slice(), [PresenterEvent::Expired(s)] if s.scene_label == "Sunset"));
    assert_eq!(assistant.phase(), SuggestionPhase::Hidden);

    let events = assistant.on_event(
        &SamplerEvent::Observed(observe("Foliage")),
        t0 + Duration::from_secs(5),
    );
    assert!(matches!(events.as_slice(), [PresenterEvent::Shown(_)]));
}

#[test]
fn test_observation_after_expiry_reports_both_transitions() {
    let t0 = Instant::now();
    let mut assistant = SceneAssistant::default();
    assistant.on_observation(Some(&observe("Sunset")), t0);

    let events = assistant.on_observation(Some(&observe("Foliage")), t0 + Duration::from_secs(4));
    assert!(matches!(
        events.as_slice(),
        [PresenterEvent::Expired(_), PresenterEvent::Shown(_)]
    ));
}

#[test]
fn test_apply_after_expiry_reports_expired() {
    let t0 = Instant::now();
    let mut assistant = SceneAssistant::default();
    assistant.on_observation(Some(&observe("Sunset")), t0);

    match assistant.apply(t0 + Duration::from_secs(3)) {
        ApplyOutcome::Expired(s) => assert_eq!(s.preset_id, "golden_hour"),
        other => panic!("expected expiry, got {other:?}"),
    }
    assert!(assistant.session().active_preset().is_none());
    assert_eq!(assistant.apply(t0 + Duration::from_secs(4)), ApplyOutcome::NothingVisible);
}

#[test]
fn test_drain_processes_pending_events() {
    let t0 = Instant::now();
    let mut assistant = SceneAssistant::default();
    let (tx, rx) = mpsc::channel();
    tx.send(SamplerEvent::Observed(observe("Sunset"))).unwrap();
    tx.send(SamplerEvent::Missed).unwrap();
    tx.send(SamplerEvent::Observed(observe("Foliage"))).unwrap();

    let events = assistant.drain(&rx, t0);
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], PresenterEvent::Shown(_)));
    assert!(matches!(events[1], PresenterEvent::Replaced { .. }));
    assert_eq!(assistant.visible().unwrap().scene_label, "Foliage");

    let later = assistant.drain(&rx, t0 + Duration::from_secs(3));
    assert!(matches!(later.as_slice(), [PresenterEvent::Expired(_)]));
}

#[test]
fn test_dismiss_leaves_grading_untouched() {
    let t0 = Instant::now();
    let mut assistant = SceneAssistant::default();
    assistant.on_observation(Some(&observe("City")), t0);
    assert!(assistant.dismiss().is_some());
    assert!(assistant.session().active_preset().is_none());
    assert!(assistant.filter_chain().is_empty());
}

#[test]
fn test_config_presets_and_rules_are_used() {
    let config = AssistantConfig {
        presets: vec![FilterPreset::new(
            "stage_lights",
            "Stage Lights",
            ParameterOverlay::default().with(Knob::Contrast, 140.0),
        )],
        scenes: vec![SceneRule::new("Concert", "stage_lights", None)],
        ..AssistantConfig::default()
    };
    let t0 = Instant::now();
    let mut assistant = SceneAssistant::new(&config);
    match assistant.on_observation(Some(&observe("Concert")), t0).as_slice() {
        [PresenterEvent::Shown(s)] => {
            assert_eq!(s.message, "Concert scene detected. Try the Stage Lights filter.")
        }
        other => panic!("expected suggestion, got {other:?}"),
    }
    let chain = assistant.apply(t0).into_chain().unwrap();
    assert_eq!(chain.to_string(), "contrast(140%)");
}
