//! Aggregate functions and their accumulators.
//!
//! Accumulators only ever see concrete values; NULL and MISSING inputs are
//! skipped by the aggregator before `update` is called.

use crate::data::{ExprType, ExprValue};
use crate::expression::aggregation::Accumulator;
use crate::expression::ExpressionResult;
use crate::function::arithmetic::add;
use crate::function::{
    unexpected_arguments, AccumulatorFactory, BuiltinFunctionName, FunctionDefinition, ReturnType,
};
use std::cmp::Ordering;

pub(crate) fn definitions() -> Vec<FunctionDefinition> {
    let mut definitions = Vec::new();
    for t in ExprType::NUMERIC {
        definitions.push(FunctionDefinition::aggregate(
            BuiltinFunctionName::Avg.function_name(),
            vec![t],
            ReturnType::Fixed(ExprType::Double),
            avg,
        ));
        definitions.push(FunctionDefinition::aggregate(
            BuiltinFunctionName::Sum.function_name(),
            vec![t],
            ReturnType::Argument(0),
            sum,
        ));
    }

    let any_type: [(BuiltinFunctionName, ReturnType, AccumulatorFactory); 3] = [
        (BuiltinFunctionName::Count, ReturnType::Fixed(ExprType::Integer), count),
        (BuiltinFunctionName::Min, ReturnType::Argument(0), min),
        (BuiltinFunctionName::Max, ReturnType::Argument(0), max),
    ];
    for (builtin, return_type, factory) in any_type {
        for t in ExprType::CONCRETE {
            definitions.push(FunctionDefinition::aggregate(
                builtin.function_name(),
                vec![t],
                return_type,
                factory,
            ));
        }
    }
    definitions
}

fn avg() -> Box<dyn Accumulator> {
    Box::new(AvgAccumulator::default())
}

fn sum() -> Box<dyn Accumulator> {
    Box::new(SumAccumulator::default())
}

fn count() -> Box<dyn Accumulator> {
    Box::new(CountAccumulator::default())
}

fn min() -> Box<dyn Accumulator> {
    Box::new(ExtremumAccumulator::new(Ordering::Less))
}

fn max() -> Box<dyn Accumulator> {
    Box::new(ExtremumAccumulator::new(Ordering::Greater))
}

#[derive(Debug, Default)]
struct AvgAccumulator {
    sum: f64,
    count: u64,
}

impl Accumulator for AvgAccumulator {
    fn update(&mut self, value: &ExprValue) -> ExpressionResult<()> {
        if !value.data_type().is_numeric() {
            return Err(unexpected_arguments("AVG", std::slice::from_ref(value)));
        }
        self.sum += value.double_value()?;
        self.count += 1;
        Ok(())
    }

    fn result(&self) -> ExprValue {
        if self.count == 0 {
            ExprValue::Null
        } else {
            ExprValue::Double(self.sum / self.count as f64)
        }
    }
}

#[derive(Debug, Default)]
struct SumAccumulator {
    sum: Option<ExprValue>,
}

impl Accumulator for SumAccumulator {
    fn update(&mut self, value: &ExprValue) -> ExpressionResult<()> {
        self.sum = Some(match self.sum.take() {
            None if value.data_type().is_numeric() => value.clone(),
            None => return Err(unexpected_arguments("SUM", std::slice::from_ref(value))),
            Some(sum) => add(&[sum, value.clone()])?,
        });
        Ok(())
    }

    fn result(&self) -> ExprValue {
        self.sum.clone().unwrap_or(ExprValue::Null)
    }
}

#[derive(Debug, Default)]
struct CountAccumulator {
    count: i32,
}

impl Accumulator for CountAccumulator {
    fn update(&mut self, _value: &ExprValue) -> ExpressionResult<()> {
        self.count = self.count.wrapping_add(1);
        Ok(())
    }

    fn result(&self) -> ExprValue {
        ExprValue::Integer(self.count)
    }
}

/// MIN or MAX: keeps the value that orders `keep` relative to the current one.
#[derive(Debug)]
struct ExtremumAccumulator {
    keep: Ordering,
    current: Option<ExprValue>,
}

impl ExtremumAccumulator {
    fn new(keep: Ordering) -> Self {
        Self {
            keep,
            current: None,
        }
    }
}

impl Accumulator for ExtremumAccumulator {
    fn update(&mut self, value: &ExprValue) -> ExpressionResult<()> {
        let replace = match &self.current {
            None => true,
            Some(current) => value.compare(current)? == self.keep,
        };
        if replace {
            self.current = Some(value.clone());
        }
        Ok(())
    }

    fn result(&self) -> ExprValue {
        self.current.clone().unwrap_or(ExprValue::Null)
    }
}
