pub mod classifier;
pub mod frame;
pub mod observation;
pub mod sampler;

pub use classifier::{ColorHeuristicClassifier, SceneClassifier};
pub use frame::{FrameEncoder, FrameSource, StillFrameSource};
pub use observation::{Classification, Confidence, SceneObservation};
pub use sampler::{Completion, SampleTicket, SamplerEvent, SamplerPhase, SamplerState, SceneSampler};
