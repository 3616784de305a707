//! Integration tests for the calling services

mod common;

use common::{exact_query, items, no_query, session, start_server, BEARER};
use serde_json::json;
use webex_client::calling::{CallHistoryService, CallsService, VoicemailService};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

// =============================================================================
// Call Control
// =============================================================================

#[tokio::test]
async fn test_dial() {
    let (server, base_url) = start_server().await;

    Mock::given(method("POST"))
        .and(path("/v1/telephony/calls/dial"))
        .and(header("authorization", BEARER))
        .and(body_json(json!({"destination": "+15551234567"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "callId": "C1",
            "callSessionId": "S1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let handle = CallsService::new(session(&base_url))
        .dial("+15551234567")
        .await
        .unwrap();

    assert_eq!(handle.call_id, "C1");
    assert_eq!(handle.call_session_id, "S1");
}

#[tokio::test]
async fn test_simple_call_actions() {
    let (server, base_url) = start_server().await;

    for action in ["answer", "hold", "resume", "hangup", "startRecording"] {
        Mock::given(method("POST"))
            .and(path(format!("/v1/telephony/calls/{}", action)))
            .and(body_json(json!({"callId": "C1"})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
    }

    let calls = CallsService::new(session(&base_url));
    calls.answer("C1").await.unwrap();
    calls.hold("C1").await.unwrap();
    calls.resume("C1").await.unwrap();
    calls.hangup("C1").await.unwrap();
    calls.start_recording("C1").await.unwrap();
}

#[tokio::test]
async fn test_divert_to_voicemail() {
    let (server, base_url) = start_server().await;

    Mock::given(method("POST"))
        .and(path("/v1/telephony/calls/divert"))
        .and(body_json(json!({"callId": "C1", "toVoicemail": true})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    CallsService::new(session(&base_url))
        .divert("C1", "", true)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_divert_without_destination_sends_nothing() {
    let (server, base_url) = start_server().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let err = CallsService::new(session(&base_url))
        .divert("C1", "", false)
        .await
        .unwrap_err();
    assert!(err.is_invalid_parameter());
}

#[tokio::test]
async fn test_consult_transfer() {
    let (server, base_url) = start_server().await;

    Mock::given(method("POST"))
        .and(path("/v1/telephony/calls/consultTransfer"))
        .and(body_json(json!({"callId1": "C1", "callId2": "C2"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    CallsService::new(session(&base_url))
        .consult_transfer("C1", "C2")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_park() {
    let (server, base_url) = start_server().await;

    Mock::given(method("POST"))
        .and(path("/v1/telephony/calls/park"))
        .and(body_json(json!({"callId": "C1", "destination": "1234"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "parkedAgainst": "1234"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = CallsService::new(session(&base_url))
        .park("C1", "1234")
        .await
        .unwrap();
    assert_eq!(result.parked_against.as_deref(), Some("1234"));
}

#[tokio::test]
async fn test_transmit_dtmf() {
    let (server, base_url) = start_server().await;

    Mock::given(method("POST"))
        .and(path("/v1/telephony/calls/transmitDTMF"))
        .and(body_json(json!({"callId": "C1", "dtmf": "1,2#"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    CallsService::new(session(&base_url))
        .transmit_dtmf("C1", "1,2#")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_calls() {
    let (server, base_url) = start_server().await;

    Mock::given(method("GET"))
        .and(path("/v1/telephony/calls"))
        .and(no_query)
        .respond_with(ResponseTemplate::new(200).set_body_json(items(vec![json!({
            "id": "C1",
            "callSessionId": "S1",
            "personality": "originator",
            "state": "connected",
            "remoteParty": {"name": "Bob", "number": "+15550001"}
        })])))
        .expect(1)
        .mount(&server)
        .await;

    let calls = CallsService::new(session(&base_url)).list_calls().await.unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].id, "C1");
}

// =============================================================================
// Call History
// =============================================================================

#[tokio::test]
async fn test_list_missed_calls() {
    let (server, base_url) = start_server().await;

    Mock::given(method("GET"))
        .and(path("/v1/telephony/calls/history"))
        .and(exact_query("type=missed&max=25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items(vec![json!({
            "id": "H1",
            "type": "missed",
            "number": "+15550002",
            "startTime": "2024-02-01T08:00:00Z"
        })])))
        .expect(1)
        .mount(&server)
        .await;

    let records = CallHistoryService::new(session(&base_url))
        .list_missed(Some(25))
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].record_type.as_deref(), Some("missed"));
}

#[tokio::test]
async fn test_delete_call_history() {
    let (server, base_url) = start_server().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/telephony/calls/history"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    CallHistoryService::new(session(&base_url))
        .delete_all()
        .await
        .unwrap();
}

// =============================================================================
// Voicemail
// =============================================================================

#[tokio::test]
async fn test_voicemail_summary() {
    let (server, base_url) = start_server().await;

    Mock::given(method("GET"))
        .and(path("/v1/telephony/voiceMessages/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "newMessages": 3,
            "oldMessages": 7,
            "newUrgentMessages": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let summary = VoicemailService::new(session(&base_url))
        .summary()
        .await
        .unwrap();
    assert_eq!(summary.new_messages, 3);
    assert_eq!(summary.old_messages, 7);
    assert_eq!(summary.new_urgent_messages, 1);
}

#[tokio::test]
async fn test_mark_voicemail_read_and_unread() {
    let (server, base_url) = start_server().await;

    Mock::given(method("PUT"))
        .and(path("/v1/telephony/voiceMessages/V1"))
        .and(body_json(json!({"read": true})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/v1/telephony/voiceMessages/V1"))
        .and(body_json(json!({"read": false})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let voicemail = VoicemailService::new(session(&base_url));
    voicemail.mark_as_read("V1").await.unwrap();
    voicemail.mark_as_unread("V1").await.unwrap();
}

#[tokio::test]
async fn test_voicemail_server_error() {
    let (server, base_url) = start_server().await;

    Mock::given(method("GET"))
        .and(path("/v1/telephony/voiceMessages"))
        .respond_with(
            ResponseTemplate::new(503)
                .insert_header("TrackingID", "ROUTER_VM")
                .set_body_json(json!({"message": "Service unavailable"})),
        )
        .mount(&server)
        .await;

    let err = VoicemailService::new(session(&base_url))
        .list(None)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.tracking_id(), Some("ROUTER_VM"));
}
