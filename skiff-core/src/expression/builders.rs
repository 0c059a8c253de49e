//! Constructors for filter condition trees.
//!
//! ```rust
//! use skiff_core::{and, eq, gt};
//!
//! let filter = and(eq("status", "open"), gt("priority", 3));
//! ```

use crate::{BinaryOp, BinaryOpType, Expression, Operand, UnaryOp, UnaryOpType, Value};

fn binary(
    op: BinaryOpType,
    lhs: impl Expression + 'static,
    rhs: impl Expression + 'static,
) -> BinaryOp {
    BinaryOp {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

/// The always-true condition; synthesized WHERE clauses omit it.
pub fn always() -> Operand {
    Operand::LitBool(true)
}

pub fn col(name: impl Into<String>) -> Operand {
    Operand::Column(name.into())
}

pub fn val(value: impl Into<Value>) -> Operand {
    Operand::Variable(value.into())
}

/// A reference to a named value of the render environment.
pub fn env_var(name: impl Into<String>) -> Operand {
    Operand::Env(name.into())
}

pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> BinaryOp {
    binary(BinaryOpType::Equal, col(column), val(value))
}

pub fn ne(column: impl Into<String>, value: impl Into<Value>) -> BinaryOp {
    binary(BinaryOpType::NotEqual, col(column), val(value))
}

pub fn lt(column: impl Into<String>, value: impl Into<Value>) -> BinaryOp {
    binary(BinaryOpType::Less, col(column), val(value))
}

pub fn le(column: impl Into<String>, value: impl Into<Value>) -> BinaryOp {
    binary(BinaryOpType::LessEqual, col(column), val(value))
}

pub fn gt(column: impl Into<String>, value: impl Into<Value>) -> BinaryOp {
    binary(BinaryOpType::Greater, col(column), val(value))
}

pub fn ge(column: impl Into<String>, value: impl Into<Value>) -> BinaryOp {
    binary(BinaryOpType::GreaterEqual, col(column), val(value))
}

pub fn like(column: impl Into<String>, pattern: impl Into<String>) -> BinaryOp {
    binary(
        BinaryOpType::Like,
        col(column),
        Operand::LitStr(pattern.into()),
    )
}

pub fn is_null(column: impl Into<String>) -> BinaryOp {
    binary(BinaryOpType::Is, col(column), Operand::Null)
}

pub fn is_not_null(column: impl Into<String>) -> BinaryOp {
    binary(BinaryOpType::IsNot, col(column), Operand::Null)
}

pub fn and(lhs: impl Expression + 'static, rhs: impl Expression + 'static) -> BinaryOp {
    binary(BinaryOpType::And, lhs, rhs)
}

pub fn or(lhs: impl Expression + 'static, rhs: impl Expression + 'static) -> BinaryOp {
    binary(BinaryOpType::Or, lhs, rhs)
}

pub fn not(v: impl Expression + 'static) -> UnaryOp {
    UnaryOp {
        op: UnaryOpType::Not,
        v: Box::new(v),
    }
}

/// Compare a column against an environment value rather than a literal.
pub fn eq_env(column: impl Into<String>, name: impl Into<String>) -> BinaryOp {
    binary(BinaryOpType::Equal, col(column), env_var(name))
}
