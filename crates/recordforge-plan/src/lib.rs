//! Declarative field plans for Recordforge.
//!
//! A plan is the JSON form of a factory schema: an ordered list of named
//! fields, each carrying a generator spec. This crate owns the plan
//! contract, its JSON Schema, and structural plus semantic validation.
//! Turning a plan into a running factory is done by `recordforge-generate`.

pub mod errors;
pub mod model;
pub mod parse;
pub mod schema;
pub mod validate;

pub use errors::{IssueSeverity, PlanError, Result, ValidationIssue, ValidationReport};
pub use model::{FactoryPlan, FieldPlan, FieldSpec, PlanOptions};
pub use parse::{parse_step, parse_timestamp};
pub use schema::plan_json_schema;
pub use validate::{
    ValidatedPlan, load_plan, validate_plan, validate_plan_json, validate_plan_semantics,
};

/// Current contract version for plan documents.
pub const PLAN_VERSION: &str = "0.1";
