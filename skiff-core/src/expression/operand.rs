use crate::{Environment, Expression, SqlWriter, Value};

/// A leaf of a filter condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Null,
    LitBool(bool),
    LitInt(i64),
    LitFloat(f64),
    LitStr(String),
    /// A bare column reference.
    Column(String),
    /// A value resolved from the render environment; absent names render NULL.
    Env(String),
    /// A typed literal rendered through the writer's quoting rules.
    Variable(Value),
}

impl Expression for Operand {
    fn write_query(&self, writer: &dyn SqlWriter, env: &Environment, out: &mut String) {
        writer.write_expression_operand(env, out, self);
    }

    fn is_always_true(&self) -> bool {
        matches!(self, Operand::LitBool(true))
    }
}
