use std::collections::HashSet;
use std::path::Path;

use jsonschema::JSONSchema;
use serde_json::Value;

use crate::PLAN_VERSION;
use crate::errors::{PlanError, ValidationIssue, ValidationReport};
use crate::model::{FactoryPlan, FieldPlan, FieldSpec};
use crate::parse::{parse_step, parse_timestamp};

const KNOWN_UUID_FORMATS: &[&str] = &["hex_str", "int", "int_str"];
const DEFAULT_LIST_MAX_LEN: usize = 1;
const DEFAULT_FLOAT_MIN: f64 = 0.0;
const DEFAULT_FLOAT_MAX: f64 = 1.0;

/// Validated plan with accumulated warnings.
#[derive(Debug, Clone)]
pub struct ValidatedPlan {
    pub plan: FactoryPlan,
    pub warnings: Vec<ValidationIssue>,
}

/// Read and parse a plan document without validating it.
pub fn load_plan(path: &Path) -> Result<FactoryPlan, PlanError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Validate a plan JSON document against the plan JSON Schema.
pub fn validate_plan_json(
    plan_json: &Value,
    plan_schema: &Value,
) -> Result<ValidationReport, PlanError> {
    let compiled =
        JSONSchema::compile(plan_schema).map_err(|err| PlanError::Schema(err.to_string()))?;

    let mut report = ValidationReport::default();

    if let Err(errors) = compiled.validate(plan_json) {
        for error in errors {
            let path = normalized_json_pointer(&error.instance_path.to_string());
            report.push(ValidationIssue::error(
                "schema_violation",
                path,
                error.to_string(),
                None,
            ));
        }
    }

    Ok(report)
}

/// Validate the meaning of a parsed plan: bounds, choices, steps, names.
pub fn validate_plan_semantics(plan: &FactoryPlan) -> ValidationReport {
    let mut report = ValidationReport::default();

    if plan.plan_version != PLAN_VERSION {
        report.push(ValidationIssue::warning(
            "unknown_plan_version",
            "/plan_version",
            format!(
                "plan_version '{}' is not the supported version '{PLAN_VERSION}'",
                plan.plan_version
            ),
            None,
        ));
    }

    validate_fields(&plan.fields, "/fields", &mut report);
    report
}

/// Validate the plan end-to-end, returning structured issues on failure.
pub fn validate_plan(
    plan_json: &Value,
    plan_schema: &Value,
) -> Result<ValidatedPlan, ValidationReport> {
    let structural = match validate_plan_json(plan_json, plan_schema) {
        Ok(report) => report,
        Err(err) => {
            let mut report = ValidationReport::default();
            report.push(ValidationIssue::error(
                "schema_validation_error",
                "/",
                err.to_string(),
                None,
            ));
            return Err(report);
        }
    };

    if !structural.is_ok() {
        return Err(structural);
    }

    let plan: FactoryPlan = match serde_json::from_value(plan_json.clone()) {
        Ok(plan) => plan,
        Err(err) => {
            let mut report = ValidationReport::default();
            report.push(ValidationIssue::error(
                "invalid_plan_json",
                "/",
                err.to_string(),
                None,
            ));
            return Err(report);
        }
    };

    let semantic = validate_plan_semantics(&plan);
    if !semantic.is_ok() {
        return Err(semantic);
    }

    Ok(ValidatedPlan {
        plan,
        warnings: semantic.warnings,
    })
}

fn validate_fields(fields: &[FieldPlan], base_path: &str, report: &mut ValidationReport) {
    if fields.is_empty() {
        report.push(ValidationIssue::warning(
            "fields_empty",
            base_path,
            "plan declares no fields; records will be empty",
            None,
        ));
    }

    let mut seen = HashSet::new();
    for (idx, field) in fields.iter().enumerate() {
        let path = format!("{base_path}/{idx}");
        if !seen.insert(field.name.as_str()) {
            report.push(ValidationIssue::error(
                "duplicate_field",
                format!("{path}/name"),
                format!("field '{}' is declared more than once", field.name),
                Some("rename or merge the duplicate fields".to_string()),
            ));
        }
        validate_spec(&field.generator, &format!("{path}/generator"), report);
    }
}

fn validate_spec(spec: &FieldSpec, path: &str, report: &mut ValidationReport) {
    match spec {
        FieldSpec::Placeholder | FieldSpec::Constant { .. } => {}
        FieldSpec::Text {
            alphabet,
            min_len,
            max_len,
        } => {
            if alphabet.as_deref().is_some_and(str::is_empty) {
                report.push(ValidationIssue::error(
                    "empty_alphabet",
                    format!("{path}/alphabet"),
                    "alphabet must contain at least one character",
                    Some("omit alphabet to use the printable default".to_string()),
                ));
            }
            check_bounds(*min_len, *max_len, "min_len", "max_len", path, report);
        }
        FieldSpec::Int { min, max } => {
            check_bounds(*min, *max, "min", "max", path, report);
        }
        FieldSpec::Float { min, max } => {
            for (key, value) in [("min", min), ("max", max)] {
                if value.is_some_and(|value| !value.is_finite()) {
                    report.push(ValidationIssue::error(
                        "invalid_bounds",
                        format!("{path}/{key}"),
                        format!("{key} must be a finite number"),
                        None,
                    ));
                }
            }
            if let Some(message) = float_range_issue(*min, *max) {
                report.push(ValidationIssue::error(
                    "invalid_bounds",
                    path,
                    message,
                    Some("keep max - min within the f64 range".to_string()),
                ));
            }
        }
        FieldSpec::Enum { choices } => {
            if choices.is_empty() {
                report.push(ValidationIssue::error(
                    "empty_choices",
                    format!("{path}/choices"),
                    "enum requires at least one choice",
                    None,
                ));
            }
        }
        FieldSpec::Uuid { format } => {
            if let Some(format) = format
                && !KNOWN_UUID_FORMATS.contains(&format.as_str())
            {
                report.push(ValidationIssue::warning(
                    "unknown_uuid_format",
                    format!("{path}/format"),
                    format!("uuid format '{format}' falls back to the hyphenated form"),
                    Some(format!("use one of {}", KNOWN_UUID_FORMATS.join(", "))),
                ));
            }
        }
        FieldSpec::Datetime {
            start, end, step, ..
        } => validate_datetime(start, end, step.as_deref(), path, report),
        FieldSpec::List {
            content,
            min_len,
            max_len,
            allow_duplicates,
        } => {
            check_bounds(*min_len, *max_len, "min_len", "max_len", path, report);
            for (idx, item) in content.iter().enumerate() {
                validate_spec(item, &format!("{path}/content/{idx}"), report);
            }
            if !allow_duplicates.unwrap_or(false) {
                check_value_space(
                    content,
                    min_len.unwrap_or(0),
                    max_len.unwrap_or(DEFAULT_LIST_MAX_LEN),
                    path,
                    report,
                );
            }
        }
        FieldSpec::Embed { fields } => {
            validate_fields(fields, &format!("{path}/fields"), report);
        }
    }
}

fn validate_datetime(
    start: &str,
    end: &str,
    step: Option<&str>,
    path: &str,
    report: &mut ValidationReport,
) {
    let start_at = parse_timestamp(start);
    let end_at = parse_timestamp(end);
    for (key, raw, parsed) in [("start", start, start_at), ("end", end, end_at)] {
        if parsed.is_none() {
            report.push(ValidationIssue::error(
                "invalid_timestamp",
                format!("{path}/{key}"),
                format!("'{raw}' is not a supported timestamp"),
                Some("use YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS".to_string()),
            ));
        }
    }
    if let (Some(start_at), Some(end_at)) = (start_at, end_at)
        && start_at > end_at
    {
        report.push(ValidationIssue::error(
            "invalid_bounds",
            path,
            "start must be <= end",
            None,
        ));
    }

    if let Some(step) = step {
        match parse_step(step) {
            None => report.push(ValidationIssue::error(
                "invalid_step",
                format!("{path}/step"),
                format!("'{step}' is not a duration"),
                Some("use a signed integer with an optional s/m/h/d/w suffix".to_string()),
            )),
            Some(duration) if duration.is_zero() => report.push(ValidationIssue::error(
                "zero_step",
                format!("{path}/step"),
                "step must be non-zero",
                Some("omit step for random timestamps".to_string()),
            )),
            Some(_) => {}
        }
    }
}

/// Apply the float field's normalization (`max <= min` becomes `min * 2`)
/// and report a range that cannot be sampled.
fn float_range_issue(min: Option<f64>, max: Option<f64>) -> Option<String> {
    let min = min.unwrap_or(DEFAULT_FLOAT_MIN);
    let mut max = max.unwrap_or(DEFAULT_FLOAT_MAX);
    if !min.is_finite() || !max.is_finite() {
        return None;
    }
    if max <= min {
        max = min * 2.0;
    }
    if min > max {
        Some(format!("min ({min}) stays above max ({max}) after normalization"))
    } else if !max.is_finite() || !(max - min).is_finite() {
        Some(format!("range {min}..={max} is too wide to sample"))
    } else {
        None
    }
}

fn check_bounds<T: PartialOrd + std::fmt::Display>(
    min: Option<T>,
    max: Option<T>,
    min_key: &str,
    max_key: &str,
    path: &str,
    report: &mut ValidationReport,
) {
    if let (Some(min), Some(max)) = (min, max)
        && min > max
    {
        report.push(ValidationIssue::error(
            "invalid_bounds",
            path,
            format!("{min_key} ({min}) must be <= {max_key} ({max})"),
            None,
        ));
    }
}

/// Flag deduplicating lists whose content cannot produce enough distinct values.
///
/// Only finite content (constants, enums, bounded ints) is counted; any other
/// content spec is treated as unbounded.
fn check_value_space(
    content: &[FieldSpec],
    min_len: usize,
    max_len: usize,
    path: &str,
    report: &mut ValidationReport,
) {
    let Some(distinct) = distinct_values(content) else {
        return;
    };

    if distinct < min_len {
        report.push(ValidationIssue::error(
            "exhausted_value_space",
            path,
            format!("content yields {distinct} distinct values but min_len is {min_len}"),
            Some("set allow_duplicates or widen the content".to_string()),
        ));
    } else if distinct < max_len {
        report.push(ValidationIssue::warning(
            "small_value_space",
            path,
            format!("content yields {distinct} distinct values but max_len is {max_len}"),
            Some("lists longer than the value space fail to generate".to_string()),
        ));
    }
}

fn distinct_values(content: &[FieldSpec]) -> Option<usize> {
    if content.is_empty() {
        return None;
    }

    let mut json_values: Vec<&Value> = Vec::new();
    let mut ranged: u128 = 0;
    for spec in content {
        match spec {
            FieldSpec::Constant { value } => json_values.push(value),
            FieldSpec::Enum { choices } => json_values.extend(choices.iter()),
            FieldSpec::Int {
                min: Some(min),
                max: Some(max),
            } if min <= max => {
                let span = (i128::from(*max) - i128::from(*min)) as u128 + 1;
                ranged = ranged.saturating_add(span);
            }
            _ => return None,
        }
    }

    let mut unique: Vec<&Value> = Vec::with_capacity(json_values.len());
    for value in json_values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }

    let total = ranged.saturating_add(unique.len() as u128);
    Some(usize::try_from(total).unwrap_or(usize::MAX))
}

fn normalized_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        "/".to_string()
    } else {
        pointer.to_string()
    }
}
