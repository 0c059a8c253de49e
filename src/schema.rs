use crate::Connection;
use skiff_core::{DriverError, Engine, Error, Result, RowLabeled, SqlWriter, Value};

/// Whether a catalog object is a base table or a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Table,
    View,
}

/// Structural description of one column of a table or view.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub col_type: String,
    pub max_length: Option<i64>,
    pub precision: Option<i64>,
    pub scale: Option<i64>,
    pub nullable: bool,
    pub primary_key: bool,
}

/// Structural description of a table or view, produced on demand from the
/// schema catalog and never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDescriptor {
    pub name: String,
    pub kind: TableKind,
    pub columns: Vec<ColumnDescriptor>,
}

impl<E: Engine> Connection<E> {
    /// Describes a table or view from the schema catalog.
    pub async fn table_descriptor(&mut self, table: &str) -> Result<TableDescriptor> {
        let database = self.options().database.clone();
        let mut sql = String::new();
        self.sql_writer()
            .write_table_descriptor_query(&mut sql, &database, table);
        let set = self.query_single(&sql).await?;
        if set.is_empty() {
            return Err(DriverError::table_not_found(table, database).into());
        }
        let kind = match set
            .first_record()
            .and_then(|r| r.get_column("xtype").and_then(Value::as_str).map(str::trim).map(str::to_owned))
        {
            Some(xtype) if xtype == "U" => TableKind::Table,
            _ => TableKind::View,
        };
        let columns = set
            .records()
            .map(|record| decode_column(&record))
            .collect::<Result<Vec<_>>>()?;
        Ok(TableDescriptor {
            name: table.to_owned(),
            kind,
            columns,
        })
    }
}

fn decode_column(record: &RowLabeled) -> Result<ColumnDescriptor> {
    Ok(ColumnDescriptor {
        name: text_column(record, "name")?,
        col_type: text_column(record, "type")?,
        max_length: record.get_column("max_length").and_then(Value::as_i64),
        precision: record.get_column("precision").and_then(Value::as_i64),
        scale: record.get_column("scale").and_then(Value::as_i64),
        nullable: record
            .get_column("is_nullable")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        primary_key: record
            .get_column("pk")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}

fn text_column(record: &RowLabeled, name: &str) -> Result<String> {
    record
        .get_column(name)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| Error::msg(format!("catalog row is missing the {name} column")))
}
