pub mod assistant;
pub mod config;
pub mod consts;
pub mod error;
pub mod grading;
pub mod io;
pub mod render;
pub mod scene;
pub mod suggest;
