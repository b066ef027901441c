use std::path::Path;

use tracing::{info, warn};

use recordforge_core::Value;
use recordforge_plan::{
    FactoryPlan, FieldPlan, FieldSpec, load_plan, parse_step, parse_timestamp, plan_json_schema,
    validate_plan_json, validate_plan_semantics,
};

use crate::errors::GenerationError;
use crate::factory::Factory;
use crate::generators::{
    ConstantField, DatetimeField, EmbedField, EnumField, FieldType, FloatField, IntField,
    ListField, Placeholder, TextField, UuidField, UuidFormat,
};
use crate::model::GenerateOptions;

impl Factory {
    /// Build a factory from a parsed plan after semantic validation.
    ///
    /// Validation errors are returned as [`GenerationError::InvalidPlan`];
    /// warnings are logged and otherwise ignored.
    pub fn from_plan(plan: &FactoryPlan) -> Result<Self, GenerationError> {
        let report = validate_plan_semantics(plan);
        for issue in &report.warnings {
            warn!(code = %issue.code, path = %issue.path, "{}", issue.message);
        }
        if !report.is_ok() {
            return Err(GenerationError::InvalidPlan(report));
        }

        let mut options = GenerateOptions {
            seed: plan.effective_seed(),
            ..GenerateOptions::default()
        };
        if let Some(draws) = plan
            .options
            .as_ref()
            .and_then(|options| options.max_duplicate_draws)
        {
            options.max_duplicate_draws = draws;
        }

        let fields = build_fields(&plan.fields, &options)?;
        info!(
            fields = fields.len(),
            seed = ?options.seed,
            max_duplicate_draws = options.max_duplicate_draws,
            "factory built from plan"
        );
        Factory::with_options(fields, options)
    }

    /// Validate a plan document against the plan JSON Schema, then build it.
    pub fn from_plan_json(plan_json: &serde_json::Value) -> Result<Self, GenerationError> {
        let schema = serde_json::to_value(plan_json_schema())?;
        let report = validate_plan_json(plan_json, &schema)?;
        if !report.is_ok() {
            return Err(GenerationError::InvalidPlan(report));
        }
        let plan: FactoryPlan = serde_json::from_value(plan_json.clone())?;
        Self::from_plan(&plan)
    }

    /// Load a plan file and build it.
    pub fn from_plan_path(path: &Path) -> Result<Self, GenerationError> {
        let plan = load_plan(path)?;
        Self::from_plan(&plan)
    }
}

fn build_fields(
    fields: &[FieldPlan],
    options: &GenerateOptions,
) -> Result<Vec<(String, Box<dyn FieldType>)>, GenerationError> {
    fields
        .iter()
        .map(|field| {
            build_field(&field.generator, options)
                .map(|built| (field.name.clone(), built))
                .map_err(|source| GenerationError::Field {
                    field: field.name.clone(),
                    source: Box::new(source),
                })
        })
        .collect()
}

/// Turn one generator spec into a boxed field type.
pub fn build_field(
    spec: &FieldSpec,
    options: &GenerateOptions,
) -> Result<Box<dyn FieldType>, GenerationError> {
    let field: Box<dyn FieldType> = match spec {
        FieldSpec::Placeholder => Box::new(Placeholder),
        FieldSpec::Constant { value } => Box::new(ConstantField::new(Value::from_json(value))),
        FieldSpec::Text {
            alphabet,
            min_len,
            max_len,
        } => Box::new(TextField::new(alphabet.as_deref(), *min_len, *max_len)?),
        FieldSpec::Int { min, max } => Box::new(IntField::new(*min, *max)?),
        FieldSpec::Float { min, max } => Box::new(FloatField::new(*min, *max)?),
        FieldSpec::Enum { choices } => {
            Box::new(EnumField::new(choices.iter().map(Value::from_json))?)
        }
        FieldSpec::Uuid { format } => Box::new(UuidField::new(
            format
                .as_deref()
                .map(UuidFormat::from_name)
                .unwrap_or_default(),
        )),
        FieldSpec::Datetime {
            start,
            end,
            step,
            include_time,
        } => {
            let step = match step {
                Some(raw) => Some(parse_step(raw).ok_or_else(|| {
                    GenerationError::InvalidConfig(format!("invalid datetime step '{raw}'"))
                })?),
                None => None,
            };
            Box::new(DatetimeField::new(
                timestamp(start)?,
                timestamp(end)?,
                step,
                include_time.unwrap_or(true),
            )?)
        }
        FieldSpec::List {
            content,
            min_len,
            max_len,
            allow_duplicates,
        } => {
            let content = content
                .iter()
                .map(|spec| build_field(spec, options))
                .collect::<Result<Vec<_>, _>>()?;
            Box::new(ListField::new(
                content,
                *min_len,
                *max_len,
                allow_duplicates.unwrap_or(false),
            )?)
        }
        FieldSpec::Embed { fields } => {
            // Embedded emission draws from the parent RNG; the inner factory's
            // own generator only serves direct calls and gets a fixed seed.
            let inner_options = GenerateOptions {
                seed: Some(options.seed.unwrap_or_default()),
                ..options.clone()
            };
            let inner = Factory::with_options(build_fields(fields, options)?, inner_options)?;
            Box::new(EmbedField::new(inner))
        }
    };
    Ok(field)
}

fn timestamp(raw: &str) -> Result<chrono::NaiveDateTime, GenerationError> {
    parse_timestamp(raw)
        .ok_or_else(|| GenerationError::InvalidConfig(format!("invalid timestamp '{raw}'")))
}
