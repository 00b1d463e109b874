//! Integration tests for the accept channel, including re-entrant emission
//! from inside accept handlers.

use relay::testing::{EventLog, RecordingListener};
use relay::{
    DispatchError, RegistryError, Relay, RelayError, Value, accept_fn, args, json, listen_fn,
};

#[test]
fn accept_invokes_handler_and_returns_result() {
    let relay = Relay::new();
    relay
        .set_accept_handlers([
            (
                "first".to_string(),
                Some(accept_fn(|_, args| {
                    Ok(args.first().cloned().unwrap_or(Value::Null))
                })),
            ),
            (
                "size".to_string(),
                Some(accept_fn(|_, args| Ok(json!(args.len())))),
            ),
        ])
        .unwrap();

    assert_eq!(relay.accept("first", &args![1, 2, 3]).unwrap(), json!(1));
    assert_eq!(relay.accept("first", &args![[1, 2]]).unwrap(), json!([1, 2]));
    assert_eq!(relay.accept("size", &args![1, 2, 3]).unwrap(), json!(3));
    assert_eq!(relay.accept("size", &[]).unwrap(), json!(0));
}

#[test]
fn last_registration_wins() {
    let relay = Relay::new();
    relay
        .set_accept_handler("a", Some(accept_fn(|_, _| Ok(json!("one")))))
        .unwrap();
    relay
        .set_accept_handler("a", Some(accept_fn(|_, _| Ok(json!("two")))))
        .unwrap();
    assert_eq!(relay.accept("a", &[]).unwrap(), json!("two"));

    // A duplicate name within one bulk call resolves the same way.
    relay
        .set_accept_handlers([
            ("b".to_string(), Some(accept_fn(|_, _| Ok(json!(1))))),
            ("b".to_string(), Some(accept_fn(|_, _| Ok(json!(2))))),
        ])
        .unwrap();
    assert_eq!(relay.accept("b", &[]).unwrap(), json!(2));
}

#[test]
fn unknown_command_fails_with_no_handler() {
    let relay = Relay::new();
    let err = relay.accept("missing", &args![123, 456]).unwrap_err();
    assert!(matches!(
        err,
        RelayError::Dispatch(DispatchError::NoHandler(ref name)) if name == "missing"
    ));
}

#[test]
fn registering_none_deregisters() {
    let relay = Relay::new();
    relay
        .set_accept_handler("gone", Some(accept_fn(|_, _| Ok(Value::Null))))
        .unwrap();
    assert!(relay.has_handler("gone"));

    relay.set_accept_handler("gone", None).unwrap();
    assert!(!relay.has_handler("gone"));
    assert!(relay.accept("gone", &[]).is_err());
}

#[test]
fn empty_name_is_rejected() {
    let relay = Relay::new();
    let err = relay
        .set_accept_handler("", Some(accept_fn(|_, _| Ok(Value::Null))))
        .unwrap_err();
    assert!(matches!(err, RegistryError::EmptyName));
}

#[test]
fn handler_error_propagates_unchanged() {
    let relay = Relay::new();
    relay
        .set_accept_handler("explode", Some(accept_fn(|_, _| Err("boom".into()))))
        .unwrap();

    let err = relay.accept("explode", &[]).unwrap_err();
    match err {
        RelayError::Dispatch(DispatchError::Handler { event, source }) => {
            assert_eq!(event, "explode");
            assert_eq!(source.to_string(), "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn emitted_events_are_delivered_before_accept_returns() {
    let relay = Relay::new();
    relay
        .set_accept_handler(
            "alarm",
            Some(accept_fn(|relay, args| {
                relay.emit("trigger_alarm", args)?;
                Ok(Value::Null)
            })),
        )
        .unwrap();

    let recorder = RecordingListener::new();
    relay.on("trigger_alarm", recorder.listener()).unwrap();

    relay.accept("alarm", &args![1, 2, 3]).unwrap();
    relay.accept("alarm", &args![4]).unwrap();
    relay.accept("alarm", &[]).unwrap();

    // Each payload was observed on return from the accept() that raised it.
    assert_eq!(recorder.received(), vec![args![1, 2, 3], args![4], vec![]]);
}

#[test]
fn counted_subscriptions_expire_across_accept_calls() {
    let relay = Relay::new();
    relay
        .set_accept_handler(
            "alarm",
            Some(accept_fn(|relay, _| {
                relay.emit("alarm_1", &[])?;
                relay.emit("alarm_2", &[])?;
                relay.emit("alarm_3", &[])?;
                Ok(Value::Null)
            })),
        )
        .unwrap();

    let log = EventLog::new();
    relay.on("alarm_1", log.listener("alarm_1")).unwrap();
    relay.once("alarm_2", log.listener("alarm_2")).unwrap();
    relay.upto(2, "alarm_3", log.listener("alarm_3")).unwrap();

    relay.accept("alarm", &[]).unwrap();
    relay.accept("alarm", &[]).unwrap();
    relay.accept("alarm", &[]).unwrap();

    assert_eq!(
        log.entries(),
        vec![
            // call 1: all three fire
            "alarm_1", "alarm_2", "alarm_3",
            // call 2: alarm_2 has expired
            "alarm_1", "alarm_3",
            // call 3: alarm_3 has expired
            "alarm_1",
        ]
    );
}

#[test]
fn reset_discards_handlers_and_listeners() {
    let relay = Relay::new();
    relay
        .set_accept_handler("cmd", Some(accept_fn(|_, _| Ok(Value::Null))))
        .unwrap();
    relay.on("evt", listen_fn(|_, _| Ok(()))).unwrap();

    relay.reset();

    assert!(!relay.has_handler("cmd"));
    assert!(matches!(
        relay.remove_all_listeners("evt"),
        Err(RegistryError::Unregistered(_))
    ));
}
