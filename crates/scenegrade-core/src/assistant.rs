use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

use tracing::warn;

use crate::config::AssistantConfig;
use crate::grading::{FilterChain, GradingSession, PresetCatalog};
use crate::scene::{SamplerEvent, SceneObservation};
use crate::suggest::{PresenterEvent, Recommender, SceneSuggestion, SuggestionPhase, SuggestionPresenter};

/// Result of [`SceneAssistant::apply`].
#[derive(Clone, Debug, PartialEq)]
pub enum ApplyOutcome {
    /// The preset is now active; `chain` is the session's new filter chain.
    Applied {
        suggestion: SceneSuggestion,
        chain: FilterChain,
    },
    /// The suggestion had already expired and is now hidden.
    Expired(SceneSuggestion),
    /// The suggestion was taken down but its preset is missing from the catalog.
    Unresolved(SceneSuggestion),
    NothingVisible,
}

impl ApplyOutcome {
    pub fn chain(&self) -> Option<&FilterChain> {
        match self {
            Self::Applied { chain, .. } => Some(chain),
            _ => None,
        }
    }

    pub fn into_chain(self) -> Option<FilterChain> {
        match self {
            Self::Applied { chain, .. } => Some(chain),
            _ => None,
        }
    }
}

/// Scene-driven preset suggestions for one capture session.
///
/// Consumes sampler events, keeps at most one suggestion visible, and applies
/// accepted suggestions to the session's grading.
#[derive(Clone, Debug)]
pub struct SceneAssistant {
    recommender: Recommender,
    presenter: SuggestionPresenter,
    session: GradingSession,
}

impl SceneAssistant {
    pub fn new(config: &AssistantConfig) -> Self {
        let catalog = Arc::new(config.catalog());
        Self {
            recommender: Recommender::with_extra_rules(catalog, &config.scenes),
            presenter: SuggestionPresenter::from_config(&config.presentation),
            session: GradingSession::new(),
        }
    }

    pub fn with_parts(
        recommender: Recommender,
        presenter: SuggestionPresenter,
        session: GradingSession,
    ) -> Self {
        Self {
            recommender,
            presenter,
            session,
        }
    }

    pub fn catalog(&self) -> &PresetCatalog {
        self.recommender.catalog()
    }

    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }

    pub fn session(&self) -> &GradingSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GradingSession {
        &mut self.session
    }

    pub fn phase(&self) -> SuggestionPhase {
        self.presenter.phase()
    }

    pub fn visible(&self) -> Option<&SceneSuggestion> {
        self.presenter.visible()
    }

    /// Handle one observation (or its absence) from the sampler. Returns
    /// every presenter transition it caused, expiry first.
    pub fn on_observation(
        &mut self,
        observation: Option<&SceneObservation>,
        now: Instant,
    ) -> Vec<PresenterEvent> {
        let suggestion = observation.and_then(|obs| self.recommender.recommend(obs));
        self.presenter.offer(suggestion, now)
    }

    pub fn on_event(&mut self, event: &SamplerEvent, now: Instant) -> Vec<PresenterEvent> {
        self.on_observation(event.observation(), now)
    }

    /// Handle every event already waiting on `events` without blocking.
    /// Expiry is checked first.
    pub fn drain(
        &mut self,
        events: &mpsc::Receiver<SamplerEvent>,
        now: Instant,
    ) -> Vec<PresenterEvent> {
        let mut out: Vec<PresenterEvent> = self.tick(now).into_iter().collect();
        while let Ok(event) = events.try_recv() {
            out.extend(self.on_event(&event, now));
        }
        out
    }

    pub fn tick(&mut self, now: Instant) -> Option<PresenterEvent> {
        self.presenter.tick(now)
    }

    /// Accept the visible suggestion: its preset becomes the session's active
    /// preset. A suggestion whose preset cannot be resolved leaves the session
    /// untouched.
    pub fn apply(&mut self, now: Instant) -> ApplyOutcome {
        let suggestion = match self.presenter.apply(now) {
            Some(PresenterEvent::Applied(s)) => s,
            Some(PresenterEvent::Expired(s)) => return ApplyOutcome::Expired(s),
            _ => return ApplyOutcome::NothingVisible,
        };
        let catalog = self.recommender.catalog();
        if let Err(e) = self.session.set_active_preset(catalog, &suggestion.preset_id) {
            warn!(error = %e, "Cannot apply suggestion");
            return ApplyOutcome::Unresolved(suggestion);
        }
        ApplyOutcome::Applied {
            chain: self.session.filter_chain(catalog),
            suggestion,
        }
    }

    pub fn dismiss(&mut self) -> Option<PresenterEvent> {
        self.presenter.dismiss()
    }

    /// Filter chain for the session's current base parameters and preset.
    pub fn filter_chain(&self) -> FilterChain {
        self.session.filter_chain(self.recommender.catalog())
    }
}

impl Default for SceneAssistant {
    fn default() -> Self {
        Self::new(&AssistantConfig::default())
    }
}
