//! The expression capability implemented over [`evalexpr`].
//!
//! [`EvalexprParser`] builds an operator tree per equation side and collects
//! the ordered, de-duplicated variable list once at parse time;
//! [`ParsedExpression`] then evaluates the tree against a variable-binding
//! map. Expression syntax is `evalexpr`'s: `^` for exponentiation, the usual
//! operator precedence, and bare identifiers for variables.

use evalexpr::{
    build_operator_tree, ContextWithMutableVariables, EvalexprError, HashMapContext, Node, Value,
};
use thiserror::Error;

use newt_core::expression::{Bindings, Expression, ExpressionParser};

/// Errors from parsing or evaluating an expression.
#[derive(Debug, Error)]
pub enum ExprError {
    /// The text is not a valid expression.
    #[error("failed to parse expression `{text}`")]
    Parse {
        text: String,
        #[source]
        source: EvalexprError,
    },

    /// Evaluation failed, e.g. a variable was missing from the bindings.
    #[error("failed to evaluate expression")]
    Eval(#[source] EvalexprError),
}

impl ExprError {
    /// The stable error code for this failure, for catalog lookup.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "expression.parse",
            Self::Eval(_) => "expression.evaluation",
        }
    }
}

/// An expression parsed into an `evalexpr` operator tree.
#[derive(Debug, Clone)]
pub struct ParsedExpression {
    node: Node,
    variables: Vec<String>,
}

impl Expression for ParsedExpression {
    type Error = ExprError;

    fn evaluate(&self, bindings: &Bindings) -> Result<f64, ExprError> {
        let mut context = HashMapContext::new();
        for (name, value) in bindings {
            context
                .set_value(name.clone(), Value::Float(*value))
                .map_err(ExprError::Eval)?;
        }

        self.node
            .eval_number_with_context(&context)
            .map_err(ExprError::Eval)
    }

    fn variables(&self) -> Vec<String> {
        self.variables.clone()
    }
}

/// Parses equation sides with `evalexpr`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvalexprParser;

impl ExpressionParser for EvalexprParser {
    type Expr = ParsedExpression;
    type Error = ExprError;

    fn parse(&self, text: &str) -> Result<ParsedExpression, ExprError> {
        let node = build_operator_tree(text).map_err(|source| ExprError::Parse {
            text: text.to_string(),
            source,
        })?;

        let mut variables: Vec<String> = Vec::new();
        for name in node.iter_variable_identifiers() {
            if !variables.iter().any(|v| v == name) {
                variables.push(name.to_string());
            }
        }

        Ok(ParsedExpression { node, variables })
    }
}
