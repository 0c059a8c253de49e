use crate::{Environment, SqlWriter};
use std::fmt::Debug;

/// A renderable filter condition node.
pub trait Expression: Send + Sync + Debug {
    /// Serialize the condition into the output string using the sql writer.
    fn write_query(&self, writer: &dyn SqlWriter, env: &Environment, out: &mut String);

    /// Whether this condition is satisfied by every row. An always-true
    /// filter is omitted from synthesized WHERE clauses.
    fn is_always_true(&self) -> bool {
        false
    }
}

impl<T: Expression + ?Sized> Expression for &T {
    fn write_query(&self, writer: &dyn SqlWriter, env: &Environment, out: &mut String) {
        (*self).write_query(writer, env, out);
    }
    fn is_always_true(&self) -> bool {
        (*self).is_always_true()
    }
}

impl Expression for Box<dyn Expression> {
    fn write_query(&self, writer: &dyn SqlWriter, env: &Environment, out: &mut String) {
        self.as_ref().write_query(writer, env, out);
    }
    fn is_always_true(&self) -> bool {
        self.as_ref().is_always_true()
    }
}
