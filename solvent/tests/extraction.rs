//! Marker injection and payload coercion through whole dispatches, including
//! the structured error feedback emitted for bad payloads.

use serde_json::json;
use solvent::{
    Data, DispatchError, Environ, Payload, RawEvent, ResolveError, Sid, close_code,
};
use std::sync::{Arc, Mutex};

mod common;
use common::{Profile, decode_error, recording_gateway};

#[tokio::test]
async fn sid_marker_receives_the_seeded_connection_id() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();

    let (mut gateway, _) = recording_gateway();
    gateway.on("whoami", move |sid: Sid| {
        let log = log.clone();
        async move {
            log.lock().unwrap().push(sid.into_inner());
        }
    });

    gateway
        .dispatch(RawEvent::new("whoami", "conn-42"))
        .await
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["conn-42".to_string()]);
}

#[tokio::test]
async fn environ_is_empty_outside_connect() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();

    let (mut gateway, _) = recording_gateway();
    gateway.on("probe", move |environ: Environ| {
        let log = log.clone();
        async move {
            log.lock().unwrap().push(environ.len());
        }
    });

    gateway
        .dispatch(RawEvent::new("probe", "s1"))
        .await
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![0]);
}

#[tokio::test]
async fn payload_binds_a_wellformed_mapping() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();

    let (mut gateway, recorded) = recording_gateway();
    gateway.on("profile", move |profile: Payload<Profile>| {
        let log = log.clone();
        async move {
            log.lock().unwrap().push(profile.into_inner());
        }
    });

    gateway
        .dispatch(RawEvent::new("profile", "s1").with_arg(json!({"name": "alice"})))
        .await
        .unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![Profile {
            name: "alice".to_string()
        }]
    );
    assert_eq!(recorded.count(), 0);
}

#[tokio::test]
async fn malformed_payload_reports_before_the_error_propagates() {
    let (mut gateway, recorded) = recording_gateway();
    gateway.on("profile", |_profile: Payload<Profile>| async {});

    let err = gateway
        .dispatch(RawEvent::new("profile", "s1").with_arg(json!({"name": 123})))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DispatchError::Resolve(ResolveError::Validation(_))
    ));

    let message = recorded.last().expect("error feedback should be emitted");
    assert_eq!(message.event, "error");
    assert_eq!(message.options.to.as_deref(), Some("s1"));

    let feedback = decode_error(&message.data);
    assert_eq!(feedback.code, close_code::INVALID_FRAME_PAYLOAD_DATA);
    assert_eq!(feedback.event, "profile");
    assert_eq!(feedback.message, "Data Validation Error.");
    assert!(feedback.data.starts_with("name "), "{}", feedback.data);
}

#[tokio::test]
async fn non_mapping_payload_reports_the_received_type() {
    let (mut gateway, recorded) = recording_gateway();
    gateway.on("profile", |_profile: Payload<Profile>| async {});

    let err = gateway
        .dispatch(RawEvent::new("profile", "s1").with_arg(json!(7)))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DispatchError::Resolve(ResolveError::UnsupportedData { received: "int" })
    ));

    let feedback = decode_error(&recorded.last().expect("feedback expected").data);
    assert_eq!(feedback.code, close_code::UNSUPPORTED_DATA);
    assert_eq!(feedback.data, "expected a 'map', but received a 'int'.");
}

#[tokio::test]
async fn raw_data_passes_through_any_shape() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();

    let (mut gateway, _) = recording_gateway();
    gateway.on("blob", move |data: Data| {
        let log = log.clone();
        async move {
            log.lock().unwrap().push(data.into_inner());
        }
    });

    gateway
        .dispatch(RawEvent::new("blob", "s1").with_arg(json!([1, "two", null])))
        .await
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![json!([1, "two", null])]);
}

#[tokio::test]
async fn optional_payload_turns_failures_into_none() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();

    let (mut gateway, recorded) = recording_gateway();
    gateway.on("profile", move |profile: Option<Payload<Profile>>| {
        let log = log.clone();
        async move {
            log.lock().unwrap().push(profile.is_some());
        }
    });

    gateway
        .dispatch(RawEvent::new("profile", "s1").with_arg(json!(7)))
        .await
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![false]);
    // An absorbed failure produces no feedback.
    assert_eq!(recorded.count(), 0);
}
