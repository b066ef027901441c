use rand::Rng;
use tracing::debug;

use recordforge_core::Value;

use crate::errors::GenerationError;
use crate::generators::{EmitContext, FieldType};

/// Printable ASCII: digits, letters, punctuation and whitespace.
pub const DEFAULT_ALPHABET: &str = concat!(
    "0123456789",
    "abcdefghijklmnopqrstuvwxyz",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~",
    " \t\n\r\x0b\x0c",
);
const DEFAULT_TEXT_MIN: usize = 1;
const DEFAULT_TEXT_MAX: usize = 64;
const DEFAULT_INT_MIN: i64 = 0;
const DEFAULT_INT_MAX: i64 = i64::MAX;
const DEFAULT_FLOAT_MIN: f64 = 0.0;
const DEFAULT_FLOAT_MAX: f64 = 1.0;

/// Declared field that never emits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Placeholder;

impl FieldType for Placeholder {
    fn id(&self) -> &'static str {
        "placeholder"
    }

    fn emit(&mut self, _ctx: &mut EmitContext<'_>) -> Result<Option<Value>, GenerationError> {
        Ok(None)
    }
}

#[derive(Debug, Clone)]
pub struct ConstantField {
    value: Value,
}

impl ConstantField {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl FieldType for ConstantField {
    fn id(&self) -> &'static str {
        "constant"
    }

    fn emit(&mut self, _ctx: &mut EmitContext<'_>) -> Result<Option<Value>, GenerationError> {
        Ok(Some(self.value.clone()))
    }
}

/// Random string with a uniformly chosen length in `min_len..=max_len`.
#[derive(Debug, Clone)]
pub struct TextField {
    alphabet: Vec<char>,
    min_len: usize,
    max_len: usize,
}

impl TextField {
    pub fn new(
        alphabet: Option<&str>,
        min_len: Option<usize>,
        max_len: Option<usize>,
    ) -> Result<Self, GenerationError> {
        let alphabet: Vec<char> = alphabet.unwrap_or(DEFAULT_ALPHABET).chars().collect();
        if alphabet.is_empty() {
            return Err(GenerationError::InvalidConfig(
                "text alphabet must not be empty".to_string(),
            ));
        }
        let min_len = min_len.unwrap_or(DEFAULT_TEXT_MIN);
        let max_len = max_len.unwrap_or(DEFAULT_TEXT_MAX);
        if min_len > max_len {
            return Err(GenerationError::InvalidConfig(format!(
                "text min_len ({min_len}) must be <= max_len ({max_len})"
            )));
        }
        Ok(Self {
            alphabet,
            min_len,
            max_len,
        })
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }
}

impl Default for TextField {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            min_len: DEFAULT_TEXT_MIN,
            max_len: DEFAULT_TEXT_MAX,
        }
    }
}

impl FieldType for TextField {
    fn id(&self) -> &'static str {
        "text"
    }

    fn emit(&mut self, ctx: &mut EmitContext<'_>) -> Result<Option<Value>, GenerationError> {
        let len = if self.min_len == self.max_len {
            self.min_len
        } else {
            ctx.rng.random_range(self.min_len..=self.max_len)
        };
        let mut value = String::with_capacity(len);
        for _ in 0..len {
            let idx = ctx.rng.random_range(0..self.alphabet.len());
            value.push(self.alphabet[idx]);
        }
        Ok(Some(Value::Text(value)))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IntField {
    min: i64,
    max: i64,
}

impl IntField {
    pub fn new(min: Option<i64>, max: Option<i64>) -> Result<Self, GenerationError> {
        let min = min.unwrap_or(DEFAULT_INT_MIN);
        let max = max.unwrap_or(DEFAULT_INT_MAX);
        if min > max {
            return Err(GenerationError::InvalidConfig(format!(
                "int min ({min}) must be <= max ({max})"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn bounds(&self) -> (i64, i64) {
        (self.min, self.max)
    }
}

impl Default for IntField {
    fn default() -> Self {
        Self {
            min: DEFAULT_INT_MIN,
            max: DEFAULT_INT_MAX,
        }
    }
}

impl FieldType for IntField {
    fn id(&self) -> &'static str {
        "int"
    }

    fn emit(&mut self, ctx: &mut EmitContext<'_>) -> Result<Option<Value>, GenerationError> {
        Ok(Some(Value::Int(ctx.rng.random_range(self.min..=self.max))))
    }
}

/// Random float in `min..=max`.
///
/// When the configured maximum is not above the minimum it is replaced by
/// twice the minimum, so `FloatField::new(Some(1.0), None)` spans `1.0..=2.0`.
#[derive(Debug, Clone, Copy)]
pub struct FloatField {
    min: f64,
    max: f64,
}

impl FloatField {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Result<Self, GenerationError> {
        let min = min.unwrap_or(DEFAULT_FLOAT_MIN);
        let mut max = max.unwrap_or(DEFAULT_FLOAT_MAX);
        if !min.is_finite() || !max.is_finite() {
            return Err(GenerationError::InvalidConfig(
                "float bounds must be finite".to_string(),
            ));
        }
        if max <= min {
            debug!(min, max, "float max not above min, doubling min");
            max = min * 2.0;
        }
        if min > max {
            return Err(GenerationError::InvalidConfig(format!(
                "float min ({min}) must be <= max ({max}) after normalization"
            )));
        }
        if !max.is_finite() || !(max - min).is_finite() {
            return Err(GenerationError::InvalidConfig(format!(
                "float range {min}..={max} is too wide to sample"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

impl Default for FloatField {
    fn default() -> Self {
        Self {
            min: DEFAULT_FLOAT_MIN,
            max: DEFAULT_FLOAT_MAX,
        }
    }
}

impl FieldType for FloatField {
    fn id(&self) -> &'static str {
        "float"
    }

    fn emit(&mut self, ctx: &mut EmitContext<'_>) -> Result<Option<Value>, GenerationError> {
        Ok(Some(Value::Float(ctx.rng.random_range(self.min..=self.max))))
    }
}

/// Uniform choice from a fixed list; choices may mix kinds and include `Null`.
#[derive(Debug, Clone)]
pub struct EnumField {
    choices: Vec<Value>,
}

impl EnumField {
    pub fn new<I, V>(choices: I) -> Result<Self, GenerationError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let choices: Vec<Value> = choices.into_iter().map(Into::into).collect();
        if choices.is_empty() {
            return Err(GenerationError::InvalidConfig(
                "enum requires at least one choice".to_string(),
            ));
        }
        Ok(Self { choices })
    }

    pub fn choices(&self) -> &[Value] {
        &self.choices
    }
}

impl FieldType for EnumField {
    fn id(&self) -> &'static str {
        "enum"
    }

    fn emit(&mut self, ctx: &mut EmitContext<'_>) -> Result<Option<Value>, GenerationError> {
        let idx = ctx.rng.random_range(0..self.choices.len());
        Ok(Some(self.choices[idx].clone()))
    }
}

/// Rendering of a generated UUID.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UuidFormat {
    /// Canonical 36-character `8-4-4-4-12` lowercase form.
    #[default]
    Hyphenated,
    /// 32 lowercase hex digits without separators.
    Hex,
    /// The 128-bit integer value.
    Int,
    /// The 128-bit integer value as decimal text.
    IntStr,
}

impl UuidFormat {
    /// Map a format name; unknown names fall back to `Hyphenated`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "hex_str" => UuidFormat::Hex,
            "int" => UuidFormat::Int,
            "int_str" => UuidFormat::IntStr,
            _ => UuidFormat::Hyphenated,
        }
    }
}

/// Fresh random (version 4) UUID on every emission.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidField {
    format: UuidFormat,
}

impl UuidField {
    pub fn new(format: UuidFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> UuidFormat {
        self.format
    }
}

impl FieldType for UuidField {
    fn id(&self) -> &'static str {
        "uuid"
    }

    fn emit(&mut self, ctx: &mut EmitContext<'_>) -> Result<Option<Value>, GenerationError> {
        let mut bytes = [0_u8; 16];
        ctx.rng.fill_bytes(&mut bytes);
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;
        let uuid = uuid::Uuid::from_bytes(bytes);

        let value = match self.format {
            UuidFormat::Hyphenated => Value::Text(uuid.hyphenated().to_string()),
            UuidFormat::Hex => Value::Text(uuid.simple().to_string()),
            UuidFormat::Int => Value::U128(uuid.as_u128()),
            UuidFormat::IntStr => Value::Text(uuid.as_u128().to_string()),
        };
        Ok(Some(value))
    }
}
