//! Record generation for Recordforge.
//!
//! A [`Factory`] holds an ordered list of named [`FieldType`]s and builds one
//! [`Record`](recordforge_core::Record) per call by asking each field type to
//! emit a value. Factories are built in code or from a declarative
//! [`FactoryPlan`](recordforge_plan::FactoryPlan).

pub mod errors;
pub mod factory;
pub mod generators;
pub mod model;
pub mod planner;

pub use errors::GenerationError;
pub use factory::{Factory, FactoryBuilder, RecordIter};
pub use generators::{EmitContext, FieldType};
pub use model::GenerateOptions;
pub use planner::build_field;
