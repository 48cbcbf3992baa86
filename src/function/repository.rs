//! Function repository: signature registration and overload resolution.

use crate::data::ExprType;
use crate::expression::{Aggregator, Expression, FunctionExpression};
use crate::function::{
    builtin, cast, FunctionDefinition, FunctionError, FunctionImplementation, FunctionName,
    FunctionResult, FunctionSignature,
};
use log::{debug, trace};
use std::collections::HashMap;

/// A call resolved to one registered signature
#[derive(Debug, Clone)]
pub struct ResolvedFunction {
    pub signature: FunctionSignature,
    pub return_type: ExprType,
    pub implementation: FunctionImplementation,
}

/// Registry of function signatures keyed by name.
///
/// Built once, then shared read-only (typically behind an `Arc`); lookups
/// need no synchronization.
#[derive(Debug, Default)]
pub struct FunctionRepository {
    functions: HashMap<FunctionName, Vec<FunctionDefinition>>,
}

impl FunctionRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from a table of definitions.
    ///
    /// Fails on the first signature registered twice.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = FunctionDefinition>,
    ) -> FunctionResult<Self> {
        let mut repository = Self::new();
        for definition in definitions {
            repository.register(definition)?;
        }
        debug!(
            "function repository built with {} names, {} signatures",
            repository.functions.len(),
            repository.functions.values().map(Vec::len).sum::<usize>()
        );
        Ok(repository)
    }

    /// Repository holding every builtin function
    pub fn builtin() -> FunctionResult<Self> {
        Self::from_definitions(builtin::definitions())
    }

    pub fn register(&mut self, definition: FunctionDefinition) -> FunctionResult<()> {
        let signatures = self
            .functions
            .entry(definition.signature.name.clone())
            .or_default();
        if signatures
            .iter()
            .any(|existing| existing.signature == definition.signature)
        {
            return Err(FunctionError::DuplicateSignature {
                signature: definition.signature.to_string(),
            });
        }
        trace!("registered {}", definition.signature);
        signatures.push(definition);
        Ok(())
    }

    pub fn contains(&self, name: &FunctionName) -> bool {
        self.functions.contains_key(name)
    }

    /// Every registered definition, ordered by name then parameter types
    pub fn definitions(&self) -> Vec<&FunctionDefinition> {
        let mut definitions: Vec<&FunctionDefinition> = self.functions.values().flatten().collect();
        definitions.sort_by(|a, b| {
            a.signature
                .name
                .cmp(&b.signature.name)
                .then_with(|| a.signature.param_types.cmp(&b.signature.param_types))
        });
        definitions
    }

    /// Pick the signature of `name` that best matches `arg_types`.
    ///
    /// Only signatures of the same arity are considered. Each argument costs
    /// its numeric widening distance to the parameter type; a candidate with
    /// a non-convertible argument is dropped. The cheapest candidate wins and
    /// a tie for cheapest is rejected as ambiguous.
    pub fn resolve(
        &self,
        name: &FunctionName,
        arg_types: &[ExprType],
    ) -> FunctionResult<ResolvedFunction> {
        let definitions = self
            .functions
            .get(name)
            .ok_or_else(|| FunctionError::UnknownFunction {
                name: name.to_string(),
            })?;

        let mut best: Vec<&FunctionDefinition> = Vec::new();
        let mut best_cost = u32::MAX;
        for definition in definitions {
            let Some(cost) = definition.signature.match_cost(arg_types) else {
                continue;
            };
            if cost < best_cost {
                best_cost = cost;
                best.clear();
                best.push(definition);
            } else if cost == best_cost {
                best.push(definition);
            }
        }

        let call = FunctionSignature::format_call(name, arg_types);
        match best.as_slice() {
            [] => Err(FunctionError::NoMatchingSignature {
                signature: call,
                candidates: render_candidates(definitions.iter()),
            }),
            [definition] => {
                trace!("resolved {} to {}", call, definition.signature);
                Ok(ResolvedFunction {
                    signature: definition.signature.clone(),
                    return_type: definition.result_type(),
                    implementation: definition.implementation,
                })
            }
            tied => Err(FunctionError::AmbiguousSignature {
                signature: call,
                candidates: render_candidates(tied.iter().copied()),
            }),
        }
    }

    /// Resolve a call against its argument expressions and build the node.
    ///
    /// Arguments that resolution widened are wrapped in the matching cast
    /// function, so every child's type equals its parameter type.
    pub fn compile(
        &self,
        name: &FunctionName,
        arguments: Vec<Expression>,
    ) -> FunctionResult<Expression> {
        let arg_types: Vec<ExprType> = arguments.iter().map(Expression::type_of).collect();
        let resolved = self.resolve(name, &arg_types)?;

        let arguments = arguments
            .into_iter()
            .zip(&resolved.signature.param_types)
            .map(|(argument, param)| self.widen(argument, *param))
            .collect::<FunctionResult<Vec<_>>>()?;

        Ok(match resolved.implementation {
            FunctionImplementation::Scalar {
                function,
                null_handling,
            } => Expression::Function(FunctionExpression::new(
                resolved.signature,
                resolved.return_type,
                function,
                null_handling,
                arguments,
            )),
            FunctionImplementation::Aggregate(factory) => Expression::Aggregator(Aggregator::new(
                resolved.signature,
                resolved.return_type,
                factory,
                arguments,
            )),
        })
    }

    fn widen(&self, argument: Expression, target: ExprType) -> FunctionResult<Expression> {
        let source = argument.type_of();
        if source == target {
            return Ok(argument);
        }
        match cast::cast_to(target) {
            Some(cast) => self.compile(&cast.function_name(), vec![argument]),
            None => Err(FunctionError::NoMatchingSignature {
                signature: format!("CAST({} AS {})", source, target),
                candidates: String::new(),
            }),
        }
    }
}

fn render_candidates<'a>(definitions: impl Iterator<Item = &'a FunctionDefinition>) -> String {
    let mut signatures: Vec<String> = definitions
        .map(|definition| definition.signature.to_string())
        .collect();
    signatures.sort();
    signatures.join(", ")
}
