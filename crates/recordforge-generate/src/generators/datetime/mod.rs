use chrono::{Duration, NaiveDateTime, NaiveTime};
use rand::Rng;
use tracing::debug;

use recordforge_core::Value;

use crate::errors::GenerationError;
use crate::generators::{EmitContext, FieldType};

/// Timestamps between `start` and `end`, inclusive.
///
/// Without a step every emission is a uniformly random whole second in the
/// range. With a signed step the field walks a cursor through the range:
/// the first value is `start` for a positive step and `end` for a negative
/// one, and each later value is the previous one plus the step. A value past
/// `end` restarts at `start`; a value before `start` restarts at `end`.
///
/// The cursor keeps the full timestamp; `include_time = false` only truncates
/// the emitted value to midnight.
#[derive(Debug, Clone)]
pub struct DatetimeField {
    start: NaiveDateTime,
    end: NaiveDateTime,
    step: Option<Duration>,
    include_time: bool,
    previous: Option<NaiveDateTime>,
}

impl DatetimeField {
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        step: Option<Duration>,
        include_time: bool,
    ) -> Result<Self, GenerationError> {
        if start > end {
            return Err(GenerationError::InvalidConfig(format!(
                "datetime start ({start}) must be <= end ({end})"
            )));
        }
        if step.is_some_and(|step| step.is_zero()) {
            return Err(GenerationError::InvalidConfig(
                "datetime step must not be zero".to_string(),
            ));
        }
        Ok(Self {
            start,
            end,
            step,
            include_time,
            previous: None,
        })
    }

    pub fn random(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, GenerationError> {
        Self::new(start, end, None, true)
    }

    pub fn stepping(
        start: NaiveDateTime,
        end: NaiveDateTime,
        step: Duration,
    ) -> Result<Self, GenerationError> {
        Self::new(start, end, Some(step), true)
    }

    /// Keep only the date part of emitted values.
    pub fn date_only(mut self) -> Self {
        self.include_time = false;
        self
    }

    /// Last untruncated value produced, if any.
    pub fn previous_value(&self) -> Option<NaiveDateTime> {
        self.previous
    }

    fn random_value(&self, ctx: &mut EmitContext<'_>) -> NaiveDateTime {
        let span = (self.end - self.start).num_seconds();
        let offset = ctx.rng.random_range(0..=span);
        Duration::try_seconds(offset)
            .and_then(|offset| self.start.checked_add_signed(offset))
            .unwrap_or(self.end)
    }

    fn next_step(&self, step: Duration) -> NaiveDateTime {
        let forward = step > Duration::zero();
        let Some(previous) = self.previous else {
            return if forward { self.start } else { self.end };
        };

        match previous.checked_add_signed(step) {
            Some(next) if next > self.end => {
                debug!(cursor = %next, restart = %self.start, "datetime cursor passed end");
                self.start
            }
            Some(next) if next < self.start => {
                debug!(cursor = %next, restart = %self.end, "datetime cursor passed start");
                self.end
            }
            Some(next) => next,
            None => {
                let restart = if forward { self.start } else { self.end };
                debug!(restart = %restart, "datetime cursor overflowed");
                restart
            }
        }
    }
}

impl FieldType for DatetimeField {
    fn id(&self) -> &'static str {
        "datetime"
    }

    fn emit(&mut self, ctx: &mut EmitContext<'_>) -> Result<Option<Value>, GenerationError> {
        let value = match self.step {
            Some(step) => self.next_step(step),
            None => self.random_value(ctx),
        };
        self.previous = Some(value);

        let value = if self.include_time {
            value
        } else {
            value.date().and_time(NaiveTime::default())
        };
        Ok(Some(Value::DateTime(value)))
    }
}
