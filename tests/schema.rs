mod support;

use skiff::{DriverError, TableKind, Value};
use support::*;

const CATALOG_COLUMNS: &[&str] = &[
    "dbo",
    "xtype",
    "name",
    "type",
    "max_length",
    "precision",
    "scale",
    "is_nullable",
    "pk",
];

fn catalog_row(
    xtype: &str,
    name: &str,
    col_type: &str,
    max_length: Option<i64>,
    nullable: i32,
    pk: i32,
) -> Vec<Value> {
    vec![
        Value::from(1),
        Value::from(xtype),
        Value::from(name),
        Value::from(col_type),
        max_length.map(Value::from).unwrap_or(Value::Int64(None)),
        Value::from(10i64),
        Value::from(0i64),
        Value::from(nullable),
        Value::from(pk),
    ]
}

#[tokio::test]
async fn table_descriptor_decodes_the_catalog_rows() {
    let (mut connection, log, replies) = connected();
    push(
        &replies,
        Reply::Sets(vec![set(
            CATALOG_COLUMNS,
            vec![
                catalog_row("U", "idticket", "int", None, 0, 1),
                catalog_row("U", "subject", "varchar", Some(80), 1, 0),
            ],
        )]),
    );
    let descriptor = connection.table_descriptor("ticket").await.unwrap();
    assert_eq!(descriptor.name, "ticket");
    assert_eq!(descriptor.kind, TableKind::Table);
    assert_eq!(descriptor.columns.len(), 2);

    let id = &descriptor.columns[0];
    assert_eq!(id.name, "idticket");
    assert_eq!(id.col_type, "int");
    assert_eq!(id.max_length, None);
    assert!(!id.nullable);
    assert!(id.primary_key);

    let subject = &descriptor.columns[1];
    assert_eq!(subject.max_length, Some(80));
    assert!(subject.nullable);
    assert!(!subject.primary_key);

    let dispatched = logged(&log);
    assert_eq!(dispatched.len(), 1);
    assert!(dispatched[0].contains("T.table_name='ticket'"));
    assert!(dispatched[0].contains("T.table_schema='helpdesk'"));
}

#[tokio::test]
async fn views_are_told_apart_from_tables() {
    let (mut connection, _, replies) = connected();
    push(
        &replies,
        Reply::Sets(vec![set(
            CATALOG_COLUMNS,
            vec![catalog_row("V", "idticket", "int", None, 0, 0)],
        )]),
    );
    let descriptor = connection.table_descriptor("open_tickets").await.unwrap();
    assert_eq!(descriptor.kind, TableKind::View);
}

#[tokio::test]
async fn an_unknown_table_is_reported_with_its_database() {
    let (mut connection, _, replies) = connected();
    push(&replies, Reply::Sets(vec![set(CATALOG_COLUMNS, Vec::new())]));
    let err = connection.table_descriptor("missing").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DriverError>(),
        Some(DriverError::TableNotFound { table, database })
            if table == "missing" && database == "helpdesk"
    ));
}
