pub mod presenter;
pub mod recommender;

pub use presenter::{PresenterEvent, SuggestionPhase, SuggestionPresenter};
pub use recommender::{Recommender, SceneRule, SceneSuggestion};
