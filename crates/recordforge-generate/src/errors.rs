use thiserror::Error;

use recordforge_plan::{PlanError, ValidationReport};

/// Errors emitted while configuring field types or generating records.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A field type was configured with values it cannot honor.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// A deduplicating list could not reach its target length.
    #[error(
        "list exhausted: {distinct} of {target} distinct values after {draws} consecutive duplicate draws"
    )]
    ListExhausted {
        distinct: usize,
        target: usize,
        draws: u32,
    },
    /// Emission failed for a named field.
    #[error("field '{field}': {source}")]
    Field {
        field: String,
        #[source]
        source: Box<GenerationError>,
    },
    /// The plan failed semantic validation.
    #[error("invalid plan: {} error(s)", .0.errors.len())]
    InvalidPlan(ValidationReport),
    #[error("plan error: {0}")]
    Plan(#[from] PlanError),
    #[error("record error: {0}")]
    Record(#[from] recordforge_core::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenerationError {
    /// Innermost error, unwrapping any field context.
    pub fn root_cause(&self) -> &GenerationError {
        match self {
            GenerationError::Field { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Dotted path of the fields the error passed through.
    pub fn field_path(&self) -> Option<String> {
        let GenerationError::Field { field, source } = self else {
            return None;
        };
        Some(match source.field_path() {
            Some(inner) => format!("{field}.{inner}"),
            None => field.clone(),
        })
    }
}
