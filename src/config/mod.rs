//! Engine configuration
//!
//! [`EngineConfig`] carries the knobs shared by every fetch the engine
//! performs: deadlines, concurrency width, request headers, the search
//! endpoint, and the optional relay transport.

mod builder;
mod types;

pub use builder::EngineConfigBuilder;
pub use types::EngineConfig;
