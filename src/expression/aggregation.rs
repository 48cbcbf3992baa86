//! Aggregator expressions and their per-run state.

use crate::data::{ExprType, ExprValue};
use crate::expression::environment::Environment;
use crate::expression::expr::write_call;
use crate::expression::{Expression, ExpressionResult};
use crate::function::{AccumulatorFactory, FunctionSignature};
use std::fmt;

/// Running state of one aggregate function.
///
/// `update` only receives concrete values; NULL and MISSING inputs are
/// filtered out by the aggregator.
pub trait Accumulator: Send + fmt::Debug {
    fn update(&mut self, value: &ExprValue) -> ExpressionResult<()>;

    fn result(&self) -> ExprValue;
}

/// State owned by one aggregation run
#[derive(Debug)]
pub struct AggregationState {
    accumulator: Box<dyn Accumulator>,
}

impl AggregationState {
    pub fn result(&self) -> ExprValue {
        self.accumulator.result()
    }
}

/// Aggregate function call bound to one signature.
///
/// The aggregator itself is immutable; every run gets its own
/// `AggregationState` from `create_state`, so one tree can be aggregated
/// concurrently over independent row sets.
#[derive(Clone)]
pub struct Aggregator {
    signature: FunctionSignature,
    return_type: ExprType,
    factory: AccumulatorFactory,
    arguments: Vec<Expression>,
}

impl Aggregator {
    pub(crate) fn new(
        signature: FunctionSignature,
        return_type: ExprType,
        factory: AccumulatorFactory,
        arguments: Vec<Expression>,
    ) -> Self {
        Self {
            signature,
            return_type,
            factory,
            arguments,
        }
    }

    pub fn signature(&self) -> &FunctionSignature {
        &self.signature
    }

    pub fn arguments(&self) -> &[Expression] {
        &self.arguments
    }

    pub fn type_of(&self) -> ExprType {
        self.return_type
    }

    pub fn create_state(&self) -> AggregationState {
        AggregationState {
            accumulator: (self.factory)(),
        }
    }

    /// Feed one row into `state`
    pub fn iterate(&self, env: &dyn Environment, state: &mut AggregationState) -> ExpressionResult<()> {
        for argument in &self.arguments {
            let value = argument.value_of(env)?;
            if value.is_absent() {
                continue;
            }
            state.accumulator.update(&value)?;
        }
        Ok(())
    }

    pub fn finish(&self, state: &AggregationState) -> ExprValue {
        state.result()
    }

    /// Aggregate over every row
    pub fn aggregate<'a, E, I>(&self, rows: I) -> ExpressionResult<ExprValue>
    where
        E: Environment + 'a,
        I: IntoIterator<Item = &'a E>,
    {
        let mut state = self.create_state();
        for row in rows {
            self.iterate(row, &mut state)?;
        }
        Ok(self.finish(&state))
    }
}

impl fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aggregator")
            .field("signature", &self.signature)
            .field("return_type", &self.return_type)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_call(f, self.signature.name.as_str(), &self.arguments)
    }
}
