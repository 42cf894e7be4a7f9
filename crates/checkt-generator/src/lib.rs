//! Generator core.
//!
//! # Phases
//!
//! 1. `collect`: manifest → flat token accessors and container declarations
//! 2. `grouping`: accessors → namespace → owning type groups, validated,
//!    with each type's recoverable parameter set
//! 3. `casts` / `containers`: groups → declaration IR
//! 4. `pipeline`: IR → printed output targets, handed to a `sink`
//!
//! Every phase reports through a `DiagnosticSink` and keeps going; a problem
//! with one owning type, container or target never stops the others.

pub mod casts;
pub mod collect;
pub mod containers;
pub mod grouping;
pub mod naming;
pub mod options;
pub mod pipeline;
pub mod sink;

pub use casts::{CastPlan, WitnessParam, holder_unit, plan_type};
pub use collect::{Collected, collect};
pub use containers::container_unit;
pub use grouping::{NamespaceGroup, TypeGroup, group_accessors};
pub use options::{GeneratorOptions, SignatureStyle};
pub use pipeline::{EmitSummary, OutputTarget, emit, generate};
pub use sink::{EmitError, FsSink, MemorySink, SourceSink};
