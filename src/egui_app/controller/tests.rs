use super::test_support::{
    closed_port_url, controller_for, drain_for, release_channel, serve_json_once, wait_for_settle,
};
use super::*;
use crate::app_dirs::test_support::OverrideGuard;
use crate::form::FieldValue;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn new_mounts_remembered_form_with_defaults() {
    let controller = controller_for(&closed_port_url(), FormId::ModelV2);
    assert_eq!(controller.ui.active_form, FormId::ModelV2);
    assert_eq!(controller.ui.form.form_id, FormId::ModelV2);
    assert_eq!(
        controller.ui.form.values.value("Is_First_Time_Receiver"),
        Some(&FieldValue::Bool(false))
    );
    assert_eq!(controller.ui.form.phase, SubmitPhase::Idle);
}

#[test]
fn invalid_number_keeps_previous_value_and_flags_field() {
    let mut controller = controller_for(&closed_port_url(), FormId::ModelV1);
    controller.set_field("amount", "250");
    controller.set_field("amount", "-");
    assert_eq!(
        controller.ui.form.values.value("amount"),
        Some(&FieldValue::Number(250.0))
    );
    assert_eq!(controller.ui.form.draft("amount"), "-");
    assert!(controller.ui.form.field_errors.contains_key("amount"));

    controller.set_field("amount", "");
    assert_eq!(controller.ui.form.values.value("amount"), Some(&FieldValue::Empty));
    assert!(controller.ui.form.field_errors.is_empty());
}

#[test]
fn invalid_field_blocks_submit_without_request() {
    let mut controller = controller_for(&closed_port_url(), FormId::ModelV1);
    controller.set_field("step", "abc");
    controller.submit();
    assert_eq!(controller.ui.form.phase, SubmitPhase::Idle);
    assert!(controller.ui.form.validation_error.is_some());
    assert!(!controller.has_pending_job());
}

#[test]
fn timestamp_order_violation_never_submits() {
    let mut controller = controller_for(&closed_port_url(), FormId::ModelV2);
    controller.set_field("Timestamp", "2024-05-01T10:00");
    controller.set_field("Last_Txn_Timestamp", "2024-05-01T11:00");
    controller.submit();
    assert_eq!(controller.ui.form.phase, SubmitPhase::Idle);
    assert!(!controller.has_pending_job());
    assert_eq!(
        controller.ui.form.validation_error.as_deref(),
        Some("Last transaction time cannot be later than Timestamp.")
    );
    controller.set_field("Last_Txn_Timestamp", "2024-05-01T09:00");
    assert_eq!(controller.ui.form.validation_error, None);
}

#[test]
fn successful_submission_renders_prediction() {
    let (url, server) = serve_json_once(200, r#"{"is_fraud": 0, "explanation": "ok"}"#, None);
    let mut controller = controller_for(&url, FormId::ModelV1);
    controller.set_field("amount", "1000");
    controller.submit();
    assert!(controller.is_submitting());
    wait_for_settle(&mut controller);

    assert_eq!(controller.ui.form.phase, SubmitPhase::Succeeded);
    let view = controller.ui.form.result.as_ref().unwrap();
    assert_eq!(view.headline, "Prediction: Legitimate");
    assert_eq!(view.category_line, None);
    let request: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
    assert_eq!(request["amount"], serde_json::json!(1000));
    assert_eq!(request["step"], serde_json::Value::Null);
}

#[test]
fn server_error_shows_detail_and_clears_prediction() {
    let (url, _server) = serve_json_once(500, r#"{"detail": "model unavailable"}"#, None);
    let mut controller = controller_for(&url, FormId::ModelV1);
    controller.submit();
    wait_for_settle(&mut controller);

    assert_eq!(controller.ui.form.phase, SubmitPhase::Failed);
    assert_eq!(
        controller.ui.form.submission_error.as_deref(),
        Some("model unavailable")
    );
    assert!(controller.ui.form.result.is_none());
}

#[test]
fn submit_is_ignored_while_in_flight() {
    let (release_tx, release_rx) = release_channel();
    let (url, _server) = serve_json_once(200, r#"{"is_fraud": 1}"#, Some(release_rx));
    let mut controller = controller_for(&url, FormId::ModelV1);
    controller.submit();
    let first = controller.ui.form.pending_request();
    controller.submit();
    assert_eq!(controller.ui.form.pending_request(), first);
    release_tx.send(()).unwrap();
    wait_for_settle(&mut controller);
    assert!(controller.ui.form.result.as_ref().unwrap().fraud);
}

#[test]
fn edit_after_success_rearms_and_keeps_result() {
    let (url, _server) = serve_json_once(200, r#"{"fraud_type": "legit", "risk_percent": 12}"#, None);
    let mut controller = controller_for(&url, FormId::ModelV2);
    controller.submit();
    wait_for_settle(&mut controller);
    assert_eq!(controller.ui.form.phase, SubmitPhase::Succeeded);

    controller.toggle("Is_First_Time_Receiver");
    assert_eq!(controller.ui.form.phase, SubmitPhase::Idle);
    assert_eq!(
        controller.ui.form.result.as_ref().map(|view| view.headline.as_str()),
        Some("LEGIT TRANSACTION")
    );
}

#[test]
fn cancelled_submission_ignores_late_response() {
    let (release_tx, release_rx) = release_channel();
    let (url, server) = serve_json_once(200, r#"{"is_fraud": 1}"#, Some(release_rx));
    let mut controller = controller_for(&url, FormId::ModelV1);
    controller.submit();
    controller.cancel_submission();
    assert_eq!(controller.ui.form.phase, SubmitPhase::Idle);
    assert!(!controller.has_pending_job());

    release_tx.send(()).unwrap();
    server.join().unwrap();
    drain_for(&mut controller, Duration::from_millis(200));
    assert!(controller.ui.form.result.is_none());
    assert_eq!(controller.ui.form.phase, SubmitPhase::Idle);
}

#[test]
fn tab_switch_discards_state_and_drops_stale_response() {
    let base = tempdir().unwrap();
    let _guard = OverrideGuard::set(base.path().to_path_buf());
    let (release_tx, release_rx) = release_channel();
    let (url, server) = serve_json_once(200, r#"{"is_fraud": 1}"#, Some(release_rx));
    let mut controller = controller_for(&url, FormId::ModelV1);
    controller.set_field("amount", "99");
    controller.submit();

    controller.select_form(FormId::ModelV2);
    assert_eq!(controller.ui.active_form, FormId::ModelV2);
    assert_eq!(controller.ui.form.form_id, FormId::ModelV2);
    assert!(controller.ui.form.values.value("amount").is_none());

    release_tx.send(()).unwrap();
    server.join().unwrap();
    drain_for(&mut controller, Duration::from_millis(200));
    assert!(controller.ui.form.result.is_none());
    assert_eq!(controller.ui.form.phase, SubmitPhase::Idle);

    controller.select_form(FormId::ModelV1);
    assert_eq!(controller.ui.form.values.value("amount"), Some(&FieldValue::Empty));
    let saved = crate::config::load_or_default().unwrap();
    assert_eq!(saved.ui.last_form, FormId::ModelV1);
}

#[test]
fn reset_restores_defaults() {
    let mut controller = controller_for(&closed_port_url(), FormId::ModelV1);
    controller.set_field("type", "CASH_OUT");
    controller.set_field("isFlaggedFraud", "Yes");
    controller.reset_form();
    assert_eq!(
        controller.ui.form.values.value("type"),
        Some(&FieldValue::Text("TRANSFER".into()))
    );
    assert_eq!(
        controller.ui.form.values.value("isFlaggedFraud"),
        Some(&FieldValue::Number(0.0))
    );
}

#[test]
fn connection_refused_surfaces_generic_message() {
    let mut controller = controller_for(&closed_port_url(), FormId::ModelV1);
    controller.submit();
    wait_for_settle(&mut controller);
    assert_eq!(controller.ui.form.phase, SubmitPhase::Failed);
    assert_eq!(
        controller.ui.form.submission_error.as_deref(),
        Some(crate::scoring::GENERIC_FAILURE_MESSAGE)
    );
}
