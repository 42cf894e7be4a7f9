//! checkt: witness-checked narrowing casts and identity containers.
//!
//! The library side of the `checkt` binary. Generation itself lives in the
//! workspace crates re-exported here; this crate adds the CLI driver, config
//! file handling and tracing setup.

pub use checkt_common as common;
pub use checkt_emitter as emitter;
pub use checkt_generator as generator;
pub use checkt_model as model;

pub mod cli;

// Tracing configuration (CHECKT_LOG / CHECKT_LOG_FORMAT)
pub mod tracing_config;
