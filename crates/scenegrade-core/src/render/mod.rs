//! Rendering sinks for [`FilterChain`](crate::grading::FilterChain)s.
//!
//! - [`css`]: a CSS `filter` property value for web previews.
//! - [`image`]: a CPU rendering of the chain onto RGB pixels.

pub mod css;
pub mod image;

pub use self::css::to_css;
pub use self::image::apply_chain;
