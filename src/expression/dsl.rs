//! Builder API for resolved expressions.
//!
//! ```
//! use std::sync::Arc;
//! use sqlfront::data::{ExprType, ExprValue};
//! use sqlfront::expression::{BindingTuple, Dsl};
//! use sqlfront::function::FunctionRepository;
//!
//! let dsl = Dsl::new(Arc::new(FunctionRepository::builtin().unwrap()));
//! let expr = dsl
//!     .add(vec![Dsl::ref_("age", ExprType::Integer), Dsl::literal(1)])
//!     .unwrap();
//! let row = BindingTuple::from_iter([("age", ExprValue::Integer(41))]);
//! assert_eq!(expr.value_of(&row).unwrap(), ExprValue::Integer(42));
//! ```

use crate::data::{ExprType, ExprValue};
use crate::expression::{Expression, ExpressionError, ExpressionResult};
use crate::function::{BuiltinFunctionName, FunctionName, FunctionRepository};
use std::sync::Arc;

/// Expression builder bound to one function repository
#[derive(Debug, Clone)]
pub struct Dsl {
    repository: Arc<FunctionRepository>,
}

macro_rules! builtin_functions {
    ($($method:ident => $builtin:ident),* $(,)?) => {
        $(
            pub fn $method(&self, arguments: Vec<Expression>) -> ExpressionResult<Expression> {
                self.builtin(BuiltinFunctionName::$builtin, arguments)
            }
        )*
    };
}

impl Dsl {
    pub fn new(repository: Arc<FunctionRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<FunctionRepository> {
        &self.repository
    }

    pub fn literal(value: impl Into<ExprValue>) -> Expression {
        Expression::literal(value)
    }

    pub fn ref_(name: impl Into<String>, data_type: ExprType) -> Expression {
        Expression::reference(name, data_type)
    }

    /// Resolve and build a call to any registered function
    pub fn function(
        &self,
        name: impl AsRef<str>,
        arguments: Vec<Expression>,
    ) -> ExpressionResult<Expression> {
        let name = FunctionName::new(name);
        let call = render_call(&name, &arguments);
        self.repository
            .compile(&name, arguments)
            .map_err(|source| ExpressionError::Resolution { call, source })
    }

    fn builtin(
        &self,
        builtin: BuiltinFunctionName,
        arguments: Vec<Expression>,
    ) -> ExpressionResult<Expression> {
        self.function(builtin.name(), arguments)
    }

    builtin_functions! {
        abs => Abs,
        ceil => Ceil,
        ceiling => Ceiling,
        exp => Exp,
        floor => Floor,
        ln => Ln,
        log => Log,
        log10 => Log10,
        log2 => Log2,
        add => Add,
        subtract => Subtract,
        multiply => Multiply,
        divide => Divide,
        modulus => Modulus,
        dayofmonth => DayOfMonth,
        and => And,
        or => Or,
        xor => Xor,
        not => Not,
        equal => Equal,
        notequal => NotEqual,
        less => Less,
        lte => Lte,
        greater => Greater,
        gte => Gte,
        like => Like,
        avg => Avg,
        sum => Sum,
        count => Count,
        min => Min,
        max => Max,
    }
}

/// `NAME(arg, ...)` with argument types, for error context
fn render_call(name: &FunctionName, arguments: &[Expression]) -> String {
    let rendered: Vec<String> = arguments
        .iter()
        .map(|argument| format!("{}:{}", argument, argument.type_of()))
        .collect();
    format!("{}({})", name, rendered.join(", "))
}
