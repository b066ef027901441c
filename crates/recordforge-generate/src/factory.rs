use std::collections::HashSet;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use recordforge_core::Record;

use crate::errors::GenerationError;
use crate::generators::{EmitContext, FieldType};
use crate::model::GenerateOptions;

/// Builds records from an ordered list of named field types.
///
/// Each call to [`Factory::make_one`] asks every field type, in declaration
/// order, for a value. Fields that emit nothing are left out of the record.
/// The factory remembers the record it built last and the one before it.
#[derive(Debug)]
pub struct Factory {
    fields: Vec<(String, Box<dyn FieldType>)>,
    options: GenerateOptions,
    rng: ChaCha8Rng,
    state: FactoryState,
}

#[derive(Debug, Default)]
struct FactoryState {
    current: Option<Record>,
    last: Option<Record>,
    records_made: u64,
}

impl Factory {
    pub fn new<I, N>(fields: I) -> Result<Self, GenerationError>
    where
        I: IntoIterator<Item = (N, Box<dyn FieldType>)>,
        N: Into<String>,
    {
        Self::with_options(fields, GenerateOptions::default())
    }

    /// Reject duplicate field names and seed the RNG from `options.seed`,
    /// or from fresh entropy when no seed is set.
    pub fn with_options<I, N>(fields: I, options: GenerateOptions) -> Result<Self, GenerationError>
    where
        I: IntoIterator<Item = (N, Box<dyn FieldType>)>,
        N: Into<String>,
    {
        let fields: Vec<(String, Box<dyn FieldType>)> = fields
            .into_iter()
            .map(|(name, field)| (name.into(), field))
            .collect();

        let mut seen = HashSet::new();
        for (name, _) in &fields {
            if !seen.insert(name.as_str()) {
                return Err(GenerationError::InvalidConfig(format!(
                    "duplicate field name '{name}'"
                )));
            }
        }

        let seed = options.seed.unwrap_or_else(rand::random);
        Ok(Self {
            fields,
            options,
            rng: ChaCha8Rng::seed_from_u64(seed),
            state: FactoryState::default(),
        })
    }

    pub fn builder() -> FactoryBuilder {
        FactoryBuilder::default()
    }

    /// Build one record with the factory's own RNG.
    pub fn make_one(&mut self) -> Result<Record, GenerationError> {
        let Factory {
            fields,
            options,
            rng,
            state,
        } = self;
        produce(fields, options, state, rng)
    }

    /// Build one record drawing randomness from `rng` instead of the
    /// factory's own generator.
    pub fn make_one_with(&mut self, rng: &mut dyn RngCore) -> Result<Record, GenerationError> {
        produce(&mut self.fields, &self.options, &mut self.state, rng)
    }

    /// Lazily build exactly `count` records.
    pub fn make_some(&mut self, count: usize) -> RecordIter<'_> {
        info!(
            count,
            fields = self.fields.len(),
            "generating records"
        );
        RecordIter {
            factory: self,
            remaining: count,
        }
    }

    /// Record built before the current one.
    pub fn last_record(&self) -> Option<&Record> {
        self.state.last.as_ref()
    }

    /// Most recently built record.
    pub fn current_record(&self) -> Option<&Record> {
        self.state.current.as_ref()
    }

    pub fn records_made(&self) -> u64 {
        self.state.records_made
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }
}

fn produce(
    fields: &mut [(String, Box<dyn FieldType>)],
    options: &GenerateOptions,
    state: &mut FactoryState,
    rng: &mut dyn RngCore,
) -> Result<Record, GenerationError> {
    let record_index = state.records_made;
    let mut record = Record::with_capacity(fields.len());

    for (name, field) in fields.iter_mut() {
        let mut ctx = EmitContext {
            rng: &mut *rng,
            record_index,
            current: &record,
            last: state.current.as_ref(),
            options,
        };
        let value = field
            .emit(&mut ctx)
            .map_err(|source| GenerationError::Field {
                field: name.clone(),
                source: Box::new(source),
            })?;
        if let Some(value) = value {
            record.insert(name.clone(), value);
        }
    }

    debug!(record_index, fields = record.len(), "record built");
    state.last = state.current.replace(record.clone());
    state.records_made += 1;
    Ok(record)
}

/// Iterator over a fixed number of freshly built records.
#[derive(Debug)]
pub struct RecordIter<'a> {
    factory: &'a mut Factory,
    remaining: usize,
}

impl Iterator for RecordIter<'_> {
    type Item = Result<Record, GenerationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.factory.make_one())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RecordIter<'_> {}

/// Chained construction of a [`Factory`].
#[derive(Debug, Default)]
pub struct FactoryBuilder {
    fields: Vec<(String, Box<dyn FieldType>)>,
    options: GenerateOptions,
}

impl FactoryBuilder {
    pub fn field(mut self, name: impl Into<String>, field: impl FieldType + 'static) -> Self {
        self.fields.push((name.into(), Box::new(field)));
        self
    }

    pub fn options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.options.seed = Some(seed);
        self
    }

    pub fn max_duplicate_draws(mut self, draws: u32) -> Self {
        self.options.max_duplicate_draws = draws;
        self
    }

    pub fn build(self) -> Result<Factory, GenerationError> {
        Factory::with_options(self.fields, self.options)
    }
}
