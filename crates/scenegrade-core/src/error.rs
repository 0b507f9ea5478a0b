use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScenegradeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Preset not found: {0}")]
    PresetNotFound(String),

    #[error("Unknown grading parameter: {0}")]
    UnknownKnob(String),

    #[error("Invalid value for {knob}: {value}")]
    InvalidValue { knob: String, value: String },

    #[error("Classification transport error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ScenegradeError>;
