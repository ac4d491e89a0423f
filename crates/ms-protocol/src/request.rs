use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Inbound envelope sent by the conversational front-end for every turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Front-end protocol version (usually "1.0").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Conversational session this turn belongs to.
    pub session: Session,
    /// The request itself.
    pub request: SkillRequest,
}

impl RequestEnvelope {
    pub fn new(session: Session, request: SkillRequest) -> Self {
        Self {
            version: Some("1.0".to_string()),
            session,
            request,
        }
    }
}

/// Caller-owned conversational session.
///
/// The skill reads `new` and `session_id` and never persists `attributes`;
/// it hands a fresh mapping back in every response instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// True on the first turn of a session.
    pub new: bool,
    pub session_id: String,
    pub application: Application,
    /// Attributes returned by the skill on the previous turn. `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub attributes: serde_json::Map<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Session {
    pub fn new(
        session_id: impl Into<String>,
        application_id: impl Into<String>,
        new: bool,
    ) -> Self {
        Self {
            new,
            session_id: session_id.into(),
            application: Application {
                application_id: application_id.into(),
            },
            attributes: serde_json::Map::new(),
            user: None,
        }
    }
}

fn null_as_empty<'de, D>(
    deserializer: D,
) -> Result<serde_json::Map<String, serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let attributes: Option<serde_json::Map<String, serde_json::Value>> =
        Option::deserialize(deserializer)?;
    Ok(attributes.unwrap_or_default())
}

/// Skill application the request was routed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
}

/// Kind of request carried by an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestType {
    /// User opened the skill without asking for anything.
    #[serde(rename = "LaunchRequest")]
    Launch,
    /// User asked for a named intent.
    #[serde(rename = "IntentRequest")]
    Intent,
    /// Session closed by the user, an error, or a timeout.
    #[serde(rename = "SessionEndedRequest")]
    SessionEnded,
    /// Any request type this skill does not handle.
    #[serde(other)]
    Unsupported,
}

/// A single turn's request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRequest {
    #[serde(rename = "type")]
    pub kind: RequestType,
    pub request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Why the session ended (SessionEndedRequest only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Present on IntentRequest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
}

impl SkillRequest {
    fn with_kind(kind: RequestType, request_id: impl Into<String>) -> Self {
        Self {
            kind,
            request_id: request_id.into(),
            timestamp: Some(Utc::now()),
            locale: None,
            reason: None,
            intent: None,
        }
    }

    pub fn launch(request_id: impl Into<String>) -> Self {
        Self::with_kind(RequestType::Launch, request_id)
    }

    pub fn intent(request_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            intent: Some(Intent {
                name: name.into(),
                slots: BTreeMap::new(),
            }),
            ..Self::with_kind(RequestType::Intent, request_id)
        }
    }

    pub fn session_ended(request_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
            ..Self::with_kind(RequestType::SessionEnded, request_id)
        }
    }
}

/// Named intent classified by the front-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: BTreeMap<String, Slot>,
}

/// One slot value of an intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTENT_REQUEST: &str = r#"{
        "version": "1.0",
        "session": {
            "new": true,
            "sessionId": "amzn1.echo-api.session.0001",
            "application": { "applicationId": "amzn1.ask.skill.meraki" },
            "attributes": {},
            "user": { "userId": "amzn1.ask.account.XYZ" }
        },
        "request": {
            "type": "IntentRequest",
            "requestId": "amzn1.echo-api.request.0001",
            "timestamp": "2017-03-01T17:02:11Z",
            "locale": "en-US",
            "intent": {
                "name": "GetStatus",
                "slots": { "Site": { "name": "Site", "value": "shop" } }
            }
        }
    }"#;

    #[test]
    fn deserialize_intent_request() {
        let env: RequestEnvelope = serde_json::from_str(INTENT_REQUEST).unwrap();
        assert!(env.session.new);
        assert_eq!(env.session.session_id, "amzn1.echo-api.session.0001");
        assert_eq!(
            env.session.application.application_id,
            "amzn1.ask.skill.meraki"
        );
        assert_eq!(env.request.kind, RequestType::Intent);
        assert_eq!(env.request.request_id, "amzn1.echo-api.request.0001");

        let intent = env.request.intent.unwrap();
        assert_eq!(intent.name, "GetStatus");
        assert_eq!(intent.slots["Site"].value.as_deref(), Some("shop"));
    }

    #[test]
    fn request_type_wire_names() {
        for (wire, kind) in [
            ("LaunchRequest", RequestType::Launch),
            ("IntentRequest", RequestType::Intent),
            ("SessionEndedRequest", RequestType::SessionEnded),
        ] {
            let parsed: RequestType = serde_json::from_str(&format!("\"{wire}\"")).unwrap();
            assert_eq!(parsed, kind);
            assert_eq!(serde_json::to_string(&kind).unwrap(), format!("\"{wire}\""));
        }
    }

    #[test]
    fn unknown_request_type_is_unsupported() {
        let parsed: RequestType =
            serde_json::from_str(r#""CanFulfillIntentRequest""#).unwrap();
        assert_eq!(parsed, RequestType::Unsupported);
    }

    #[test]
    fn launch_without_intent_or_attributes() {
        let json = r#"{
            "session": {
                "new": false,
                "sessionId": "s-1",
                "application": { "applicationId": "app" }
            },
            "request": { "type": "LaunchRequest", "requestId": "r-1" }
        }"#;
        let env: RequestEnvelope = serde_json::from_str(json).unwrap();
        assert!(env.version.is_none());
        assert!(env.session.attributes.is_empty());
        assert!(env.request.intent.is_none());
        assert!(env.request.timestamp.is_none());
    }

    #[test]
    fn null_attributes_read_as_empty() {
        let json = r#"{
            "session": {
                "new": true,
                "sessionId": "s-1",
                "application": { "applicationId": "app" },
                "attributes": null
            },
            "request": { "type": "LaunchRequest", "requestId": "r-1" }
        }"#;
        let env: RequestEnvelope = serde_json::from_str(json).unwrap();
        assert!(env.session.attributes.is_empty());
    }

    #[test]
    fn constructors_set_kind() {
        assert_eq!(SkillRequest::launch("r").kind, RequestType::Launch);

        let req = SkillRequest::intent("r", "OpenShop");
        assert_eq!(req.kind, RequestType::Intent);
        assert_eq!(req.intent.unwrap().name, "OpenShop");

        let req = SkillRequest::session_ended("r", "USER_INITIATED");
        assert_eq!(req.kind, RequestType::SessionEnded);
        assert_eq!(req.reason.as_deref(), Some("USER_INITIATED"));
    }
}
