pub mod compose;
pub mod params;
pub mod preset;
pub mod session;

pub use compose::{compose, merge, EffectiveParameters, FilterChain, FilterOp, FilterOpKind};
pub use params::{GradingParameters, Knob};
pub use preset::{FilterPreset, ParameterOverlay, PresetCatalog};
pub use session::GradingSession;
