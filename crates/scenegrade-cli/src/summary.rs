use console::Style;
use scenegrade_core::grading::{FilterChain, FilterPreset, GradingParameters, Knob, PresetCatalog};
use scenegrade_core::scene::Classification;
use scenegrade_core::suggest::{PresenterEvent, SceneSuggestion};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    preset: Style,
    disabled: Style,
    css: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            preset: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            css: Style::new().magenta(),
        }
    }
}

fn format_overlay(preset: &FilterPreset) -> String {
    preset
        .overlay
        .knobs()
        .map(|(knob, value)| format!("{knob}={value}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn print_catalog(catalog: &PresetCatalog) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Filter Presets"));
    println!();
    for preset in catalog.iter() {
        println!(
            "  {:<16}{:<18}{}",
            s.preset.apply_to(&preset.id),
            s.value.apply_to(&preset.display_name),
            s.label.apply_to(format_overlay(preset))
        );
    }
    println!();
}

pub fn print_grading(base: &GradingParameters, preset: Option<&FilterPreset>, chain: &FilterChain) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Grading"));
    println!();

    let changed: Vec<Knob> = Knob::ALL
        .into_iter()
        .filter(|&k| base.get(k) != k.neutral())
        .collect();
    if changed.is_empty() {
        println!("  {:<14}{}", s.label.apply_to("Base"), s.disabled.apply_to("neutral"));
    } else {
        for knob in changed {
            println!(
                "  {:<14}{}",
                s.label.apply_to(knob),
                s.value.apply_to(base.get(knob))
            );
        }
    }

    match preset {
        Some(p) => println!(
            "  {:<14}{} {}",
            s.label.apply_to("Preset"),
            s.preset.apply_to(&p.display_name),
            s.label.apply_to(format!("({})", format_overlay(p)))
        ),
        None => println!("  {:<14}{}", s.label.apply_to("Preset"), s.disabled.apply_to("none")),
    }

    println!("  {:<14}{}", s.label.apply_to("Ops"), s.value.apply_to(chain.len()));
    println!("  {:<14}{}", s.label.apply_to("CSS filter"), s.css.apply_to(chain));
    println!();
}

pub fn print_classification(result: &Classification) {
    let s = Styles::new();
    println!(
        "  {:<14}{} {}",
        s.label.apply_to("Scene"),
        s.value.apply_to(&result.label),
        s.label.apply_to(format!("({} confidence)", result.confidence))
    );
}

pub fn print_suggestion(suggestion: Option<&SceneSuggestion>) {
    let s = Styles::new();
    match suggestion {
        Some(sugg) => {
            println!("  {:<14}{}", s.label.apply_to("Suggestion"), s.preset.apply_to(&sugg.preset_id));
            println!("  {:<14}{}", s.label.apply_to("Message"), sugg.message);
        }
        None => println!("  {:<14}{}", s.label.apply_to("Suggestion"), s.disabled.apply_to("none")),
    }
}

/// One line per presenter transition, for `watch`.
pub fn print_presenter_event(event: &PresenterEvent) {
    let s = Styles::new();
    let (tag, style) = match event {
        PresenterEvent::Shown(_) => ("show", &s.preset),
        PresenterEvent::Replaced { .. } => ("replace", &s.preset),
        PresenterEvent::Expired(_) => ("expire", &s.disabled),
        PresenterEvent::Applied(_) => ("apply", &s.value),
        PresenterEvent::Dismissed(_) => ("dismiss", &s.disabled),
    };
    let suggestion = event.suggestion();
    match event {
        PresenterEvent::Shown(_) | PresenterEvent::Replaced { .. } => println!(
            "  {:<10}{}",
            style.apply_to(tag),
            suggestion.message
        ),
        _ => println!(
            "  {:<10}{} {}",
            style.apply_to(tag),
            suggestion.scene_label,
            s.label.apply_to(format!("({})", suggestion.preset_id))
        ),
    }
}
