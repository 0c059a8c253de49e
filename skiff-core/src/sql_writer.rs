use crate::{
    BinaryOp, BinaryOpType, DriverError, Environment, Expression, IsolationLevel, Operand, Result,
    SqlParameter, UnaryOp, UnaryOpType, Value, separated_by,
};
use std::fmt::Write;
use time::{Date, Time};

macro_rules! write_integer {
    ($out:ident, $value:expr) => {{
        let mut buffer = itoa::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}
macro_rules! write_float {
    ($this:ident, $out:ident, $value:expr) => {{
        let mut buffer = ryu::Buffer::new();
        if $value.is_nan() {
            $this.write_value_none($out);
        } else if $value.is_infinite() {
            $this.write_value_infinity($out, $value < 0.0);
        } else {
            $out.push_str(buffer.format($value));
        }
    }};
}

/// Renders SQL literals, filter conditions and whole statements.
///
/// Statement synthesis is pure and stateless; all literal quoting funnels
/// through [`SqlWriter::write_value`]. Identifiers are written bare, the way
/// the target engine expects them in synthesized DML.
pub trait SqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter;

    fn write_value(&self, out: &mut String, value: &Value) {
        let _ = match value {
            Value::Null
            | Value::Boolean(None)
            | Value::Int8(None)
            | Value::Int16(None)
            | Value::Int32(None)
            | Value::Int64(None)
            | Value::UInt8(None)
            | Value::UInt16(None)
            | Value::UInt32(None)
            | Value::UInt64(None)
            | Value::Float32(None)
            | Value::Float64(None)
            | Value::Decimal(None)
            | Value::Varchar(None)
            | Value::Blob(None)
            | Value::Date(None)
            | Value::Time(None)
            | Value::Timestamp(None)
            | Value::Uuid(None) => self.write_value_none(out),
            Value::Boolean(Some(v)) => self.write_value_bool(out, *v),
            Value::Int8(Some(v)) => write_integer!(out, *v),
            Value::Int16(Some(v)) => write_integer!(out, *v),
            Value::Int32(Some(v)) => write_integer!(out, *v),
            Value::Int64(Some(v)) => write_integer!(out, *v),
            Value::UInt8(Some(v)) => write_integer!(out, *v),
            Value::UInt16(Some(v)) => write_integer!(out, *v),
            Value::UInt32(Some(v)) => write_integer!(out, *v),
            Value::UInt64(Some(v)) => write_integer!(out, *v),
            Value::Float32(Some(v)) => write_float!(self, out, *v),
            Value::Float64(Some(v)) => write_float!(self, out, *v),
            Value::Decimal(Some(v)) => drop(write!(out, "{}", v)),
            Value::Varchar(Some(v)) => self.write_value_string(out, v),
            Value::Blob(Some(v)) => self.write_value_blob(out, v.as_ref()),
            Value::Date(Some(v)) => {
                out.push('\'');
                self.write_value_date(out, v);
                out.push('\'');
            }
            Value::Time(Some(v)) => {
                out.push('\'');
                self.write_value_time(out, v);
                out.push('\'');
            }
            Value::Timestamp(Some(v)) => {
                out.push('\'');
                self.write_value_date(out, &v.date());
                out.push('T');
                self.write_value_time(out, &v.time());
                out.push('\'');
            }
            Value::Uuid(Some(v)) => drop(write!(out, "'{}'", v)),
        };
    }

    /// SQL literal for a value, as an owned string.
    fn quote(&self, value: &Value) -> String {
        let mut out = String::new();
        self.write_value(&mut out, value);
        out
    }

    fn write_value_none(&self, out: &mut String) {
        out.push_str("NULL")
    }

    fn write_value_bool(&self, out: &mut String, value: bool) {
        out.push_str(["false", "true"][value as usize])
    }

    fn write_value_infinity(&self, out: &mut String, negative: bool) {
        if negative {
            out.push('-');
        }
        out.push_str("1.0e+10000");
    }

    fn write_value_string(&self, out: &mut String, value: &str) {
        out.push('\'');
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == '\'' {
                out.push_str(&value[position..i]);
                out.push_str("''");
                position = i + 1;
            } else if c == '\\' {
                out.push_str(&value[position..i]);
                out.push_str(r"\\");
                position = i + 1;
            } else if c == '\n' {
                out.push_str(&value[position..i]);
                out.push_str(r"\n");
                position = i + 1;
            }
        }
        out.push_str(&value[position..]);
        out.push('\'');
    }

    fn write_value_blob(&self, out: &mut String, value: &[u8]) {
        out.push_str("x'");
        for b in value {
            let _ = write!(out, "{:02X}", b);
        }
        out.push('\'');
    }

    fn write_value_date(&self, out: &mut String, value: &Date) {
        let _ = write!(
            out,
            "{:04}-{:02}-{:02}",
            value.year(),
            value.month() as u8,
            value.day()
        );
    }

    fn write_value_time(&self, out: &mut String, value: &Time) {
        let mut subsecond = value.nanosecond();
        let mut width = 9;
        while width > 1 && subsecond % 10 == 0 {
            subsecond /= 10;
            width -= 1;
        }
        let _ = write!(
            out,
            "{:02}:{:02}:{:02}.{:0width$}",
            value.hour(),
            value.minute(),
            value.second(),
            subsecond
        );
    }

    /// WHERE-clause fragment for a filter condition.
    fn condition_to_sql(&self, filter: &dyn Expression, env: &Environment) -> String {
        let mut out = String::new();
        filter.write_query(self.as_dyn(), env, &mut out);
        out
    }

    fn write_expression_operand(&self, env: &Environment, out: &mut String, value: &Operand) {
        match value {
            Operand::Null => out.push_str("NULL"),
            Operand::LitBool(v) => self.write_value_bool(out, *v),
            Operand::LitInt(v) => write_integer!(out, *v),
            Operand::LitFloat(v) => write_float!(self, out, *v),
            Operand::LitStr(v) => self.write_value_string(out, v),
            Operand::Column(v) => out.push_str(v),
            Operand::Env(name) => self.write_value(out, env.get(name).unwrap_or(&Value::Null)),
            Operand::Variable(v) => self.write_value(out, v),
        }
    }

    fn write_expression_binary_op(&self, env: &Environment, out: &mut String, value: &BinaryOp) {
        let infix = match value.op {
            BinaryOpType::Equal => "=",
            BinaryOpType::NotEqual => "<>",
            BinaryOpType::Less => "<",
            BinaryOpType::LessEqual => "<=",
            BinaryOpType::Greater => ">",
            BinaryOpType::GreaterEqual => ">=",
            BinaryOpType::Like => " LIKE ",
            BinaryOpType::Is => " IS ",
            BinaryOpType::IsNot => " IS NOT ",
            BinaryOpType::And => " AND ",
            BinaryOpType::Or => " OR ",
        };
        out.push('(');
        value.lhs.write_query(self.as_dyn(), env, out);
        out.push_str(infix);
        value.rhs.write_query(self.as_dyn(), env, out);
        out.push(')');
    }

    fn write_expression_unary_op(&self, env: &Environment, out: &mut String, value: &UnaryOp) {
        match value.op {
            UnaryOpType::Not => out.push_str("NOT "),
        };
        value.v.write_query(self.as_dyn(), env, out);
    }

    fn write_where(&self, env: &Environment, out: &mut String, filter: Option<&dyn Expression>) {
        if let Some(filter) = filter {
            if !filter.is_always_true() {
                out.push_str(" WHERE ");
                filter.write_query(self.as_dyn(), env, out);
            }
        }
    }

    fn write_select(
        &self,
        out: &mut String,
        table: &str,
        columns: &str,
        filter: Option<&dyn Expression>,
        order_by: Option<&str>,
        top: Option<u64>,
        env: &Environment,
    ) {
        out.push_str("SELECT ");
        out.push_str(columns);
        out.push_str(" FROM ");
        out.push_str(table);
        self.write_where(env, out, filter);
        if let Some(order_by) = order_by {
            out.push_str(" ORDER BY ");
            out.push_str(order_by);
        }
        if let Some(top) = top {
            out.push_str(" LIMIT ");
            write_integer!(out, top);
        }
    }

    fn write_select_count(
        &self,
        out: &mut String,
        table: &str,
        filter: Option<&dyn Expression>,
        env: &Environment,
    ) {
        out.push_str("SELECT count(*) FROM ");
        out.push_str(table);
        self.write_where(env, out, filter);
    }

    /// A DELETE without a filter fails instead of deleting every row.
    fn write_delete(
        &self,
        out: &mut String,
        table: &str,
        filter: Option<&dyn Expression>,
        env: &Environment,
    ) -> Result<()> {
        let Some(filter) = filter else {
            return Err(DriverError::missing_filter(table).into());
        };
        out.push_str("DELETE FROM ");
        out.push_str(table);
        out.push_str(" WHERE ");
        filter.write_query(self.as_dyn(), env, out);
        Ok(())
    }

    /// Columns and values are positionally paired and must be equal length.
    fn write_insert(&self, out: &mut String, table: &str, columns: &[&str], values: &[Value]) {
        debug_assert_eq!(columns.len(), values.len());
        out.push_str("INSERT INTO ");
        out.push_str(table);
        out.push('(');
        separated_by(out, columns, |out, c| out.push_str(c), ",");
        out.push_str(")VALUES(");
        separated_by(out, values, |out, v| self.write_value(out, v), ",");
        out.push(')');
    }

    fn write_update(
        &self,
        out: &mut String,
        table: &str,
        columns: &[&str],
        values: &[Value],
        filter: Option<&dyn Expression>,
        env: &Environment,
    ) {
        out.push_str("UPDATE ");
        out.push_str(table);
        out.push_str(" SET ");
        separated_by(
            out,
            columns.iter().zip(values),
            |out, (c, v)| {
                out.push_str(c);
                out.push('=');
                self.write_value(out, v);
            },
            ",",
        );
        self.write_where(env, out, filter);
    }

    /// `CALL name(args)` with output parameters rendered as `@name` bind
    /// placeholders and everything else as quoted literals, positionally.
    /// When output parameters exist and `skip_select` is unset, a trailing
    /// `;SELECT @p AS p,...` retrieves their post-call values.
    fn write_call_procedure(
        &self,
        out: &mut String,
        name: &str,
        params: &[SqlParameter],
        skip_select: bool,
    ) {
        out.push_str("CALL ");
        out.push_str(name);
        out.push('(');
        separated_by(
            out,
            params,
            |out, p| {
                if p.output {
                    out.push('@');
                    out.push_str(&p.name);
                } else {
                    self.write_value(out, &p.value);
                }
            },
            ",",
        );
        out.push(')');
        if !skip_select && params.iter().any(|p| p.output) {
            out.push_str(";SELECT ");
            separated_by(
                out,
                params.iter().filter(|p| p.output),
                |out, p| {
                    out.push('@');
                    out.push_str(&p.name);
                    out.push_str(" AS ");
                    out.push_str(&p.name);
                },
                ",",
            );
        }
    }

    fn write_transaction_begin(&self, out: &mut String) {
        out.push_str("START TRANSACTION;");
    }

    fn write_transaction_commit(&self, out: &mut String) {
        out.push_str("COMMIT;");
    }

    fn write_transaction_rollback(&self, out: &mut String) {
        out.push_str("ROLLBACK;");
    }

    fn write_set_isolation_level(&self, out: &mut String, level: IsolationLevel) {
        out.push_str("SET TRANSACTION ISOLATION LEVEL ");
        out.push_str(level.clause());
    }

    /// Catalog query describing a table or view and its columns.
    fn write_table_descriptor_query(&self, out: &mut String, database: &str, table: &str) {
        out.push_str(
            "select 1 as dbo, \
             case when T.table_type='BASE TABLE' then 'U' else 'V' end as xtype, \
             C.COLUMN_NAME as name, C.DATA_TYPE as 'type', \
             C.CHARACTER_MAXIMUM_LENGTH as max_length, \
             C.NUMERIC_PRECISION as 'precision', C.NUMERIC_SCALE as 'scale', \
             case when C.IS_NULLABLE='YES' then 1 else 0 end as 'is_nullable', \
             case when C.COLUMN_KEY='PRI' then 1 else 0 end as 'pk' \
             from INFORMATION_SCHEMA.tables T \
             JOIN INFORMATION_SCHEMA.columns C \
             ON C.table_schema=T.table_schema and C.table_name=T.table_name \
             where T.table_schema=",
        );
        self.write_value_string(out, database);
        out.push_str(" and T.table_name=");
        self.write_value_string(out, table);
    }

    /// Guard appended after a write to surface `err_number` when no row was
    /// touched.
    fn write_no_rows_guard(&self, out: &mut String, err_number: i64) {
        out.push_str("if (ROW_COUNT()=0) BEGIN select ");
        write_integer!(out, err_number);
        out.push_str("; RETURN; END");
    }

    fn write_constant_select(&self, out: &mut String, value: &Value) {
        out.push_str("select ");
        self.write_value(out, value);
        out.push(';');
    }

    /// One command text from a sequence of commands.
    fn write_batch(&self, out: &mut String, commands: &[&str]) {
        separated_by(out, commands, |out, c| out.push_str(c), ";");
    }
}

/// Writer for the MySQL dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlWriter;

impl MySqlWriter {
    pub const fn new() -> Self {
        Self
    }
}

impl SqlWriter for MySqlWriter {
    fn as_dyn(&self) -> &dyn SqlWriter {
        self
    }
}
