//! Request routing: lifecycle hooks, request-type dispatch, and the intent table.

use std::sync::Arc;

use ms_dashboard::Dashboard;
use ms_protocol::{EnvelopeResponse, RequestEnvelope, RequestType};
use ms_snmp::{SnmpPoller, SnmpTarget};

use crate::error::{SkillError, SkillResult};
use crate::handlers::{inventory, roadmap, shop, status, welcome};
use crate::intents::SkillIntent;
use crate::lifecycle::{LoggingLifecycle, SessionLifecycle};

/// Routes one skill request to its handler.
///
/// Holds only immutable settings and shared collaborator handles, so a single
/// router serves concurrent requests.
pub struct IntentRouter {
    dashboard: Arc<dyn Dashboard>,
    snmp: Arc<dyn SnmpPoller>,
    snmp_target: SnmpTarget,
    lifecycle: Arc<dyn SessionLifecycle>,
    application_id: Option<String>,
}

impl IntentRouter {
    /// Router with logging lifecycle hooks and no application check.
    pub fn new(
        dashboard: Arc<dyn Dashboard>,
        snmp: Arc<dyn SnmpPoller>,
        snmp_target: SnmpTarget,
    ) -> Self {
        Self {
            dashboard,
            snmp,
            snmp_target,
            lifecycle: Arc::new(LoggingLifecycle),
            application_id: None,
        }
    }

    pub fn with_lifecycle(mut self, lifecycle: Arc<dyn SessionLifecycle>) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Reject requests whose `applicationId` differs from `application_id`.
    pub fn with_application_id(mut self, application_id: Option<String>) -> Self {
        self.application_id = application_id;
        self
    }

    /// Handle one request envelope.
    ///
    /// `Ok(None)` means no speech is owed (session ended, unsupported type).
    pub async fn handle(&self, envelope: &RequestEnvelope) -> SkillResult<Option<EnvelopeResponse>> {
        let session = &envelope.session;
        let request = &envelope.request;

        if let Some(expected) = &self.application_id {
            let actual = &session.application.application_id;
            if actual != expected {
                tracing::warn!(
                    request_id = %request.request_id,
                    application_id = %actual,
                    "rejecting request for another application"
                );
                return Err(SkillError::InvalidApplication(actual.clone()));
            }
        }

        if session.new {
            self.lifecycle.on_start(request, session);
        }

        match request.kind {
            RequestType::Launch => {
                tracing::info!(
                    request_id = %request.request_id,
                    session_id = %session.session_id,
                    "launch"
                );
                Ok(Some(welcome::get_welcome_response()))
            }
            RequestType::Intent => {
                let intent = request.intent.as_ref().ok_or(SkillError::MissingIntent)?;
                tracing::info!(
                    request_id = %request.request_id,
                    session_id = %session.session_id,
                    intent = %intent.name,
                    "intent"
                );
                let intent = SkillIntent::from_name(&intent.name)
                    .ok_or_else(|| SkillError::UnknownIntent(intent.name.clone()))?;
                Ok(Some(self.dispatch(intent).await))
            }
            RequestType::SessionEnded => {
                self.lifecycle.on_end(request, session);
                Ok(None)
            }
            RequestType::Unsupported => {
                tracing::warn!(
                    request_id = %request.request_id,
                    session_id = %session.session_id,
                    "unsupported request type, ignoring"
                );
                Ok(None)
            }
        }
    }

    async fn dispatch(&self, intent: SkillIntent) -> EnvelopeResponse {
        match intent {
            SkillIntent::GetStatus => {
                status::get_network_status(self.snmp.as_ref(), &self.snmp_target).await
            }
            SkillIntent::GetRoadmap => roadmap::get_roadmap(),
            SkillIntent::GetInventory => inventory::get_inventory(self.dashboard.as_ref()).await,
            SkillIntent::CloseShop => shop::close_shop(self.dashboard.as_ref()).await,
            SkillIntent::OpenShop => shop::open_shop(self.dashboard.as_ref()).await,
            SkillIntent::Help => welcome::get_welcome_response(),
        }
    }
}
