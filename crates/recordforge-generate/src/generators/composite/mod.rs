use rand::Rng;
use tracing::warn;

use recordforge_core::Value;

use crate::errors::GenerationError;
use crate::factory::Factory;
use crate::generators::{EmitContext, FieldType, TextField};

const DEFAULT_LIST_MIN: usize = 0;
const DEFAULT_LIST_MAX: usize = 1;

/// List of values, each drawn from a uniformly chosen content field type.
///
/// With `allow_duplicates = false` a value equal to one already in the list
/// is discarded and drawn again. After `max_duplicate_draws` discards in a
/// row the emission fails with [`GenerationError::ListExhausted`].
#[derive(Debug)]
pub struct ListField {
    content: Vec<Box<dyn FieldType>>,
    min_len: usize,
    max_len: usize,
    allow_duplicates: bool,
}

impl ListField {
    /// An empty `content` falls back to a single default [`TextField`].
    pub fn new(
        content: Vec<Box<dyn FieldType>>,
        min_len: Option<usize>,
        max_len: Option<usize>,
        allow_duplicates: bool,
    ) -> Result<Self, GenerationError> {
        let min_len = min_len.unwrap_or(DEFAULT_LIST_MIN);
        let max_len = max_len.unwrap_or(DEFAULT_LIST_MAX);
        if min_len > max_len {
            return Err(GenerationError::InvalidConfig(format!(
                "list min_len ({min_len}) must be <= max_len ({max_len})"
            )));
        }
        let content = if content.is_empty() {
            vec![Box::new(TextField::default()) as Box<dyn FieldType>]
        } else {
            content
        };
        Ok(Self {
            content,
            min_len,
            max_len,
            allow_duplicates,
        })
    }

    pub fn content_ids(&self) -> Vec<&'static str> {
        self.content.iter().map(|field| field.id()).collect()
    }
}

impl FieldType for ListField {
    fn id(&self) -> &'static str {
        "list"
    }

    fn emit(&mut self, ctx: &mut EmitContext<'_>) -> Result<Option<Value>, GenerationError> {
        let target = ctx.rng.random_range(self.min_len..=self.max_len);
        let budget = ctx.options.max_duplicate_draws;
        let mut items: Vec<Value> = Vec::with_capacity(target);
        let mut misses = 0_u32;
        let mut warned = false;

        while items.len() < target {
            let idx = ctx.rng.random_range(0..self.content.len());
            let value = self.content[idx].emit(ctx)?.unwrap_or(Value::Null);

            if self.allow_duplicates || !items.contains(&value) {
                items.push(value);
                misses = 0;
                continue;
            }

            misses += 1;
            if !warned && misses >= budget / 2 {
                warned = true;
                warn!(
                    distinct = items.len(),
                    target,
                    misses,
                    budget,
                    "list keeps drawing duplicates"
                );
            }
            if misses >= budget {
                return Err(GenerationError::ListExhausted {
                    distinct: items.len(),
                    target,
                    draws: misses,
                });
            }
        }

        Ok(Some(Value::List(items)))
    }
}

/// Nested record produced by a wrapped factory.
///
/// The inner factory draws from the parent's RNG, so one seed covers the
/// whole record tree.
#[derive(Debug)]
pub struct EmbedField {
    factory: Factory,
}

impl EmbedField {
    pub fn new(factory: Factory) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> &Factory {
        &self.factory
    }
}

impl FieldType for EmbedField {
    fn id(&self) -> &'static str {
        "embed"
    }

    fn emit(&mut self, ctx: &mut EmitContext<'_>) -> Result<Option<Value>, GenerationError> {
        let record = self.factory.make_one_with(&mut *ctx.rng)?;
        Ok(Some(Value::Record(record)))
    }
}
