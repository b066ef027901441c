use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canonical plan definition for a record factory.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FactoryPlan {
    /// Contract version for the plan format.
    pub plan_version: String,
    /// Seed for reproducibility; overrides `options.seed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Optional generation options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<PlanOptions>,
    /// Fields in emission order.
    pub fields: Vec<FieldPlan>,
}

impl FactoryPlan {
    /// Effective seed: the plan-level seed wins over `options.seed`.
    pub fn effective_seed(&self) -> Option<u64> {
        self.seed
            .or_else(|| self.options.as_ref().and_then(|options| options.seed))
    }
}

/// Plan-level generation options.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PlanOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Consecutive duplicate draws tolerated by deduplicating lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duplicate_draws: Option<u32>,
}

/// A named field and the generator that fills it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FieldPlan {
    pub name: String,
    pub generator: FieldSpec,
}

/// Generator spec for a single field.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldSpec {
    /// Declared field that never emits a value.
    Placeholder,
    /// Fixed value.
    Constant {
        #[serde(default)]
        value: serde_json::Value,
    },
    /// Random string drawn from an alphabet.
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alphabet: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_len: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_len: Option<usize>,
    },
    /// Random integer in an inclusive range.
    Int {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
    },
    /// Random float in a range.
    Float {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// One of a fixed list of values.
    Enum { choices: Vec<serde_json::Value> },
    /// Random v4 UUID; `format` is one of `hex_str`, `int`, `int_str`.
    Uuid {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },
    /// Random or stepping timestamp between `start` and `end`.
    Datetime {
        start: String,
        end: String,
        /// Signed step such as `1w`, `-3600s` or `86400`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        step: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        include_time: Option<bool>,
    },
    /// List of values drawn from one or more content specs.
    List {
        #[serde(default)]
        content: Vec<FieldSpec>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_len: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_len: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        allow_duplicates: Option<bool>,
    },
    /// Nested record built from its own fields.
    Embed { fields: Vec<FieldPlan> },
}

impl FieldSpec {
    /// Generator id, matching the `type` tag.
    pub fn id(&self) -> &'static str {
        match self {
            FieldSpec::Placeholder => "placeholder",
            FieldSpec::Constant { .. } => "constant",
            FieldSpec::Text { .. } => "text",
            FieldSpec::Int { .. } => "int",
            FieldSpec::Float { .. } => "float",
            FieldSpec::Enum { .. } => "enum",
            FieldSpec::Uuid { .. } => "uuid",
            FieldSpec::Datetime { .. } => "datetime",
            FieldSpec::List { .. } => "list",
            FieldSpec::Embed { .. } => "embed",
        }
    }
}
