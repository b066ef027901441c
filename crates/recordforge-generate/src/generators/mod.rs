//! Field types: the value generators a factory dispatches to.

pub mod composite;
pub mod datetime;
pub mod primitives;

use std::fmt;

use rand::RngCore;

use recordforge_core::{Record, Value};

use crate::errors::GenerationError;
use crate::model::GenerateOptions;

pub use composite::{EmbedField, ListField};
pub use datetime::DatetimeField;
pub use primitives::{
    ConstantField, DEFAULT_ALPHABET, EnumField, FloatField, IntField, Placeholder, TextField,
    UuidField, UuidFormat,
};

/// State a field type sees while one record is being built.
pub struct EmitContext<'a> {
    /// Randomness source shared by every field of the record tree.
    pub rng: &'a mut dyn RngCore,
    /// Zero-based index of the record being built by the owning factory.
    pub record_index: u64,
    /// Fields already emitted for the record being built.
    pub current: &'a Record,
    /// The record completed before this one, if any.
    pub last: Option<&'a Record>,
    pub options: &'a GenerateOptions,
}

impl fmt::Debug for EmitContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmitContext")
            .field("record_index", &self.record_index)
            .field("current", &self.current)
            .field("last", &self.last)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// A value generator bound to one field of a schema.
///
/// `emit` returns `Ok(None)` when the field has nothing to contribute; the
/// factory then leaves the field out of the record entirely.
pub trait FieldType: fmt::Debug + Send {
    fn id(&self) -> &'static str;

    fn emit(&mut self, ctx: &mut EmitContext<'_>) -> Result<Option<Value>, GenerationError>;
}

impl<T: FieldType + ?Sized> FieldType for Box<T> {
    fn id(&self) -> &'static str {
        (**self).id()
    }

    fn emit(&mut self, ctx: &mut EmitContext<'_>) -> Result<Option<Value>, GenerationError> {
        (**self).emit(ctx)
    }
}
