mod support;

use skiff::{DriverError, SpEvent, SqlParameter, Value, stream::TryStreamExt};
use support::*;

#[tokio::test]
async fn output_parameters_are_read_from_the_trailing_select() {
    let (mut connection, log, replies) = connected();
    push(
        &replies,
        Reply::Sets(vec![
            set(&["idticket"], vec![vec![Value::from(11)]]),
            set(&["total"], vec![vec![Value::from(42)]]),
        ]),
    );
    let params = vec![
        SqlParameter::input("idcustomer", 7),
        SqlParameter::output("total", "INT"),
    ];
    let events: Vec<_> = connection
        .call_procedure("sp_customer_total", params, false)
        .try_collect()
        .await
        .expect("Procedure call failed");

    assert_eq!(events.len(), 2);
    let SpEvent::ResultSet(intermediate) = &events[0] else {
        panic!("expected the intermediate result set first");
    };
    assert_eq!(intermediate.columns, names(&["idticket"]));
    let SpEvent::Parameters(params) = &events[1] else {
        panic!("expected the filled parameter list last");
    };
    assert_eq!(params[0].name, "idcustomer");
    assert_eq!(params[0].out_value, None);
    assert_eq!(params[1].name, "total");
    assert_eq!(params[1].out_value, Some(Value::from(42)));

    assert_eq!(
        logged(&log),
        vec!["CALL sp_customer_total(7,@total);SELECT @total AS total".to_owned()]
    );
}

#[tokio::test]
async fn without_output_parameters_every_set_is_forwarded() {
    let (mut connection, log, replies) = connected();
    push(
        &replies,
        Reply::Sets(vec![
            set(&["a"], vec![vec![Value::from(1)]]),
            set(&["b"], vec![vec![Value::from(2)]]),
        ]),
    );
    let events: Vec<_> = connection
        .call_procedure(
            "sp_reindex",
            vec![SqlParameter::input("idticket", 11)],
            false,
        )
        .try_collect()
        .await
        .unwrap();
    assert_eq!(events.len(), 2);
    assert!(events
        .iter()
        .all(|event| matches!(event, SpEvent::ResultSet(_))));
    assert_eq!(logged(&log), vec!["CALL sp_reindex(11)".to_owned()]);
}

#[tokio::test]
async fn skip_select_leaves_output_retrieval_to_the_caller() {
    let (mut connection, log, replies) = connected();
    push(
        &replies,
        Reply::Sets(vec![set(&["unrelated"], vec![vec![Value::from(1)]])]),
    );
    let events: Vec<_> = connection
        .call_procedure(
            "sp_customer_total",
            vec![SqlParameter::output("total", "INT")],
            true,
        )
        .try_collect()
        .await
        .unwrap();
    assert_eq!(logged(&log), vec!["CALL sp_customer_total(@total)".to_owned()]);
    // No trailing select ran, so the output value stays unset.
    let SpEvent::Parameters(params) = events.last().unwrap() else {
        panic!("expected the parameter list");
    };
    assert_eq!(params[0].out_value, None);
}

#[tokio::test]
async fn engine_failures_reject_the_call() {
    let (mut connection, _, replies) = connected();
    push(&replies, Reply::Fail("procedure does not exist"));
    let err = connection
        .call_procedure("sp_missing", Vec::new(), false)
        .try_collect::<Vec<_>>()
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DriverError>(),
        Some(DriverError::Execution { .. })
    ));
    assert!(err.to_string().contains("procedure does not exist"));
}

#[tokio::test]
async fn a_procedure_with_outputs_must_produce_a_result_set() {
    let (mut connection, _, replies) = connected();
    push(&replies, Reply::Sets(Vec::new()));
    let err = connection
        .call_procedure(
            "sp_customer_total",
            vec![SqlParameter::output("total", "INT")],
            false,
        )
        .try_collect::<Vec<_>>()
        .await
        .unwrap_err();
    assert!(err.to_string().contains("produced no result sets"));
}
