//! Shared test harness for E2E integration tests.
//!
//! Wires the skill router to a real `DashboardClient` pointed at a wiremock
//! server and a real `UdpSnmpClient` talking to a local UDP agent, so every
//! request crosses the same crate boundaries as in production.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tokio::net::UdpSocket;
use tokio::task::JoinHandle;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ms_dashboard::{DashboardClient, DashboardConfig};
use ms_skill::lifecycle::RecordingLifecycle;
use ms_skill::router::IntentRouter;
use ms_skill::routes::build_router;
use ms_skill::state::AppState;
use ms_snmp::ber::{self, Message, Pdu, PduKind};
use ms_snmp::{DEV_NAME_OID, DEV_STATUS_OID, MockSnmpPoller, Oid, SnmpPoller, SnmpTarget, SnmpValue};

pub const APP_ID: &str = "amzn1.ask.skill.meraki";
pub const ORG_ID: &str = "549236";
pub const NETWORK_ID: &str = "N_24";
pub const COMMUNITY: &str = "public";

/// End-to-end harness: HTTP router + wiremock Dashboard + UDP SNMP agent.
pub struct TestHarness {
    /// Axum router for HTTP requests via `tower::oneshot`.
    pub router: Router,
    /// Stand-in for the Dashboard REST API.
    pub dashboard: MockServer,
    /// Lifecycle hooks installed in the router.
    pub lifecycle: Arc<RecordingLifecycle>,
    /// Where the SNMP agent listens.
    pub snmp_target: SnmpTarget,
    snmp_agent: JoinHandle<()>,
}

impl TestHarness {
    /// Harness whose SNMP agent serves `sw1`/`sw2`/`sw3` with statuses 1/0/0.
    pub async fn with_sample_devices() -> Self {
        Self::with_devices(&[("sw1", 1), ("sw2", 0), ("sw3", 0)]).await
    }

    /// Harness whose SNMP agent serves the given (name, status) rows.
    pub async fn with_devices(devices: &[(&str, i64)]) -> Self {
        let names: Oid = DEV_NAME_OID.parse().unwrap();
        let statuses: Oid = DEV_STATUS_OID.parse().unwrap();
        let table = MockSnmpPoller::new()
            .with_text_column(&names, &devices.iter().map(|(n, _)| *n).collect::<Vec<_>>())
            .with_column(
                &statuses,
                devices.iter().map(|(_, s)| SnmpValue::Integer(*s)).collect(),
            );
        let (snmp_target, snmp_agent) = spawn_snmp_agent(table, true).await;
        Self::build(snmp_target, snmp_agent, None).await
    }

    /// Harness whose SNMP agent never answers.
    pub async fn with_silent_agent() -> Self {
        let (snmp_target, snmp_agent) = spawn_snmp_agent(MockSnmpPoller::new(), false).await;
        Self::build(snmp_target, snmp_agent, None).await
    }

    /// Harness that only accepts requests for `application_id`.
    pub async fn with_application_id(application_id: &str) -> Self {
        let (snmp_target, snmp_agent) = spawn_snmp_agent(MockSnmpPoller::new(), true).await;
        Self::build(snmp_target, snmp_agent, Some(application_id.to_string())).await
    }

    async fn build(
        snmp_target: SnmpTarget,
        snmp_agent: JoinHandle<()>,
        application_id: Option<String>,
    ) -> Self {
        let dashboard = MockServer::start().await;
        let mut config = DashboardConfig::new("test-key", dashboard.uri(), ORG_ID, NETWORK_ID);
        config.template_payload = json!({"configTemplateId": "L_closed", "autoBind": false});
        config.timeout_secs = 2;

        let lifecycle = Arc::new(RecordingLifecycle::new());
        let router = IntentRouter::new(
            Arc::new(DashboardClient::new(config).unwrap()),
            Arc::new(ms_snmp::UdpSnmpClient::new(Duration::from_millis(500))),
            snmp_target.clone(),
        )
        .with_lifecycle(lifecycle.clone())
        .with_application_id(application_id);

        Self {
            router: build_router(AppState::new(router)),
            dashboard,
            lifecycle,
            snmp_target,
            snmp_agent,
        }
    }

    // ── Dashboard stubs ─────────────────────────────────────────

    pub async fn mount_org(&self, name: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/organizations/{ORG_ID}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": ORG_ID, "name": name})))
            .mount(&self.dashboard)
            .await;
    }

    pub async fn mount_inventory(&self, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/organizations/{ORG_ID}/inventory")))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.dashboard)
            .await;
    }

    pub async fn mount_bind(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path(format!("/networks/{NETWORK_ID}/bind")))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.dashboard)
            .await;
    }

    pub async fn mount_unbind(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path(format!("/networks/{NETWORK_ID}/unbind")))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.dashboard)
            .await;
    }

    /// Number of requests the Dashboard stand-in has received.
    pub async fn dashboard_request_count(&self) -> usize {
        self.dashboard
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or(0)
    }

    // ── Skill requests ──────────────────────────────────────────

    /// POST a request body (the `request` object) under a fresh envelope.
    /// Returns (HTTP status, response bytes).
    pub async fn post(&self, request: Value, new_session: bool) -> (StatusCode, Vec<u8>) {
        self.post_envelope(envelope(APP_ID, request, new_session)).await
    }

    pub async fn post_envelope(&self, envelope: Value) -> (StatusCode, Vec<u8>) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::post("/skill")
                    .header("content-type", "application/json")
                    .body(Body::from(envelope.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    /// Send an intent on an existing session and decode the JSON reply.
    pub async fn intent(&self, name: &str) -> (StatusCode, Value) {
        let (status, body) = self.post(intent_request(name), false).await;
        (status, serde_json::from_slice(&body).unwrap())
    }
}

impl Drop for TestHarness {
    fn drop(&mut self) {
        self.snmp_agent.abort();
    }
}

/// Build a skill envelope around a request object.
pub fn envelope(application_id: &str, request: Value, new_session: bool) -> Value {
    json!({
        "version": "1.0",
        "session": {
            "new": new_session,
            "sessionId": "amzn1.echo-api.session.e2e",
            "application": {"applicationId": application_id},
            "attributes": {},
            "user": {"userId": "amzn1.ask.account.e2e"}
        },
        "request": request
    })
}

pub fn launch_request() -> Value {
    json!({
        "type": "LaunchRequest",
        "requestId": "amzn1.echo-api.request.launch",
        "timestamp": "2016-10-27T18:21:44Z",
        "locale": "en-US"
    })
}

pub fn intent_request(name: &str) -> Value {
    json!({
        "type": "IntentRequest",
        "requestId": "amzn1.echo-api.request.intent",
        "timestamp": "2016-10-27T18:21:44Z",
        "locale": "en-US",
        "intent": {"name": name, "slots": {}}
    })
}

pub fn session_ended_request(reason: &str) -> Value {
    json!({
        "type": "SessionEndedRequest",
        "requestId": "amzn1.echo-api.request.end",
        "timestamp": "2016-10-27T18:21:44Z",
        "reason": reason
    })
}

/// Spoken text of a response envelope.
pub fn speech(json: &Value) -> &str {
    json["response"]["outputSpeech"]["text"].as_str().unwrap()
}

/// Serve GetNext requests from `table` over UDP on localhost.
///
/// With `answer = false` the agent reads requests and never replies.
async fn spawn_snmp_agent(table: MockSnmpPoller, answer: bool) -> (SnmpTarget, JoinHandle<()>) {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let target = SnmpTarget {
        host: "127.0.0.1".into(),
        port: socket.local_addr().unwrap().port(),
        community: COMMUNITY.into(),
    };
    let agent_target = target.clone();

    let handle = tokio::spawn(async move {
        let mut buf = vec![0u8; 65_535];
        loop {
            let Ok((len, peer)) = socket.recv_from(&mut buf).await else {
                return;
            };
            if !answer {
                continue;
            }
            let Ok(request) = ber::decode_message(&buf[..len]) else {
                continue;
            };
            let Some(varbind) = request.pdu.varbinds.first() else {
                continue;
            };
            let next = table.get_next(&agent_target, &varbind.oid).await.unwrap();
            let reply = Pdu {
                kind: PduKind::Response,
                request_id: request.pdu.request_id,
                error_status: 0,
                error_index: 0,
                varbinds: vec![next],
            };
            let bytes = ber::encode_message(&Message::v2c(COMMUNITY, reply)).unwrap();
            let _ = socket.send_to(&bytes, peer).await;
        }
    });

    (target, handle)
}
