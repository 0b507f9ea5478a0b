use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::config::PresentationConfig;

use super::recommender::SceneSuggestion;

/// What the presentation layer should currently show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuggestionPhase {
    Hidden,
    Visible,
}

/// A transition of the presenter. `Expired`, `Applied` and `Dismissed` all
/// leave the presenter hidden.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PresenterEvent {
    Shown(SceneSuggestion),
    Replaced {
        previous: SceneSuggestion,
        current: SceneSuggestion,
    },
    Expired(SceneSuggestion),
    Applied(SceneSuggestion),
    Dismissed(SceneSuggestion),
}

impl PresenterEvent {
    /// The suggestion the transition is about (the new one for `Replaced`).
    pub fn suggestion(&self) -> &SceneSuggestion {
        match self {
            Self::Shown(s) | Self::Expired(s) | Self::Applied(s) | Self::Dismissed(s) => s,
            Self::Replaced { current, .. } => current,
        }
    }
}

#[derive(Clone, Debug)]
struct Shown {
    suggestion: SceneSuggestion,
    since: Instant,
}

/// Time-boxed display of at most one suggestion: `Hidden -> Visible ->
/// (Applied | Expired | Dismissed) -> Hidden`. The clock is injected.
#[derive(Clone, Debug)]
pub struct SuggestionPresenter {
    display_duration: Duration,
    suppress_dismissed: bool,
    current: Option<Shown>,
    dismissed_label: Option<String>,
}

impl SuggestionPresenter {
    pub fn new(display_duration: Duration, suppress_dismissed: bool) -> Self {
        Self {
            display_duration,
            suppress_dismissed,
            current: None,
            dismissed_label: None,
        }
    }

    pub fn from_config(config: &PresentationConfig) -> Self {
        Self::new(config.display_duration(), config.suppress_dismissed)
    }

    pub fn phase(&self) -> SuggestionPhase {
        if self.current.is_some() {
            SuggestionPhase::Visible
        } else {
            SuggestionPhase::Hidden
        }
    }

    pub fn visible(&self) -> Option<&SceneSuggestion> {
        self.current.as_ref().map(|s| &s.suggestion)
    }

    /// Time left before the visible suggestion expires.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.current.as_ref().map(|s| {
            self.display_duration
                .saturating_sub(now.saturating_duration_since(s.since))
        })
    }

    /// Offer the latest recommendation. A new label shows (or replaces the
    /// current suggestion and restarts its timer); the label already on screen
    /// is left alone; `None` changes nothing.
    ///
    /// Returns every transition in order: an expiry that fell due by `now`
    /// comes first, then `Shown` or `Replaced`.
    pub fn offer(
        &mut self,
        suggestion: Option<SceneSuggestion>,
        now: Instant,
    ) -> Vec<PresenterEvent> {
        let mut events: Vec<PresenterEvent> = self.tick(now).into_iter().collect();
        events.extend(suggestion.and_then(|s| self.show(s, now)));
        events
    }

    fn show(&mut self, suggestion: SceneSuggestion, now: Instant) -> Option<PresenterEvent> {
        if let Some(dismissed) = &self.dismissed_label {
            if dismissed.eq_ignore_ascii_case(&suggestion.scene_label) {
                debug!(scene = %suggestion.scene_label, "Suppressing dismissed suggestion");
                return None;
            }
            self.dismissed_label = None;
        }

        match self.current.take() {
            None => {
                info!(scene = %suggestion.scene_label, preset = %suggestion.preset_id, "Showing suggestion");
                self.current = Some(Shown {
                    suggestion: suggestion.clone(),
                    since: now,
                });
                Some(PresenterEvent::Shown(suggestion))
            }
            Some(shown)
                if shown
                    .suggestion
                    .scene_label
                    .eq_ignore_ascii_case(&suggestion.scene_label) =>
            {
                self.current = Some(shown);
                None
            }
            Some(shown) => {
                info!(
                    from = %shown.suggestion.scene_label,
                    to = %suggestion.scene_label,
                    "Replacing suggestion"
                );
                self.current = Some(Shown {
                    suggestion: suggestion.clone(),
                    since: now,
                });
                Some(PresenterEvent::Replaced {
                    previous: shown.suggestion,
                    current: suggestion,
                })
            }
        }
    }

    /// Expire the visible suggestion once it has been shown for the display
    /// duration.
    pub fn tick(&mut self, now: Instant) -> Option<PresenterEvent> {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|s| now.saturating_duration_since(s.since) >= self.display_duration);
        if !expired {
            return None;
        }
        let shown = self.current.take()?;
        debug!(scene = %shown.suggestion.scene_label, "Suggestion expired");
        Some(PresenterEvent::Expired(shown.suggestion))
    }

    /// The user accepted the visible suggestion. A suggestion that had already
    /// expired at `now` reports `Expired` instead of `Applied`; `None` when
    /// nothing was visible.
    pub fn apply(&mut self, now: Instant) -> Option<PresenterEvent> {
        if let Some(expired) = self.tick(now) {
            return Some(expired);
        }
        let shown = self.current.take()?;
        info!(scene = %shown.suggestion.scene_label, preset = %shown.suggestion.preset_id, "Suggestion applied");
        Some(PresenterEvent::Applied(shown.suggestion))
    }

    /// The user rejected the visible suggestion.
    pub fn dismiss(&mut self) -> Option<PresenterEvent> {
        let shown = self.current.take()?;
        info!(scene = %shown.suggestion.scene_label, "Suggestion dismissed");
        if self.suppress_dismissed {
            self.dismissed_label = Some(shown.suggestion.scene_label.clone());
        }
        Some(PresenterEvent::Dismissed(shown.suggestion))
    }
}

impl Default for SuggestionPresenter {
    fn default() -> Self {
        Self::from_config(&PresentationConfig::default())
    }
}
