//! Open/close the shop by unbinding/binding the network's config template.
//!
//! Closing binds the template that disables guest wi-fi; opening unbinds it.

use ms_dashboard::{Dashboard, DashboardResult};
use ms_protocol::EnvelopeResponse;

use super::final_response;

pub const CLOSE_TITLE: &str = "Close the shop";
pub const OPEN_TITLE: &str = "Open the shop";

pub const CLOSE_SUCCESS: &str = "Success ! Disabling guest wi-fi";
pub const OPEN_SUCCESS: &str = "Success ! Enabling guest wi-fi";
pub const UNSUCCESSFUL: &str = "Unsuccessful";

pub async fn close_shop(dashboard: &dyn Dashboard) -> EnvelopeResponse {
    let result = dashboard.bind_template().await;
    final_response(CLOSE_TITLE, outcome_speech("bind", &result, CLOSE_SUCCESS))
}

pub async fn open_shop(dashboard: &dyn Dashboard) -> EnvelopeResponse {
    let result = dashboard.unbind_template().await;
    final_response(OPEN_TITLE, outcome_speech("unbind", &result, OPEN_SUCCESS))
}

/// Only HTTP 200 counts as success.
pub fn outcome_speech(
    action: &str,
    result: &DashboardResult<u16>,
    success: &'static str,
) -> &'static str {
    match result {
        Ok(200) => {
            tracing::info!(action, "template change applied");
            success
        }
        Ok(status) => {
            tracing::warn!(action, status, "template change rejected");
            UNSUCCESSFUL
        }
        Err(e) => {
            tracing::warn!(action, error = %e, "template change failed");
            UNSUCCESSFUL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ms_dashboard::{DashboardCall, DashboardError, MockDashboard};

    #[test]
    fn only_200_succeeds() {
        assert_eq!(outcome_speech("bind", &Ok(200), CLOSE_SUCCESS), CLOSE_SUCCESS);
        for status in [201, 204, 302, 400, 404, 500] {
            assert_eq!(outcome_speech("bind", &Ok(status), CLOSE_SUCCESS), UNSUCCESSFUL);
        }
        let err = Err(DashboardError::Http("connection refused".into()));
        assert_eq!(outcome_speech("bind", &err, CLOSE_SUCCESS), UNSUCCESSFUL);
    }

    #[tokio::test]
    async fn close_binds_template() {
        let dashboard = MockDashboard::new();
        let response = close_shop(&dashboard).await;

        assert_eq!(response.title(), "Close the shop");
        assert_eq!(response.speech(), CLOSE_SUCCESS);
        assert!(response.ends_session());
        assert_eq!(dashboard.calls(), vec![DashboardCall::Bind]);
    }

    #[tokio::test]
    async fn open_unbinds_template() {
        let dashboard = MockDashboard::new();
        let response = open_shop(&dashboard).await;

        assert_eq!(response.title(), "Open the shop");
        assert_eq!(response.speech(), OPEN_SUCCESS);
        assert_eq!(dashboard.calls(), vec![DashboardCall::Unbind]);
    }

    #[tokio::test]
    async fn rejected_bind_is_unsuccessful() {
        let dashboard = MockDashboard::new().with_bind_status(400);
        assert_eq!(close_shop(&dashboard).await.speech(), UNSUCCESSFUL);
    }

    #[tokio::test]
    async fn rejected_unbind_is_unsuccessful() {
        let dashboard = MockDashboard::new().with_unbind_status(500);
        let response = open_shop(&dashboard).await;
        assert_eq!(response.speech(), UNSUCCESSFUL);
        assert_eq!(dashboard.calls(), vec![DashboardCall::Unbind]);
    }

    #[tokio::test]
    async fn unreachable_unbind_is_unsuccessful() {
        let dashboard = MockDashboard::new().unreachable();
        let response = open_shop(&dashboard).await;
        assert_eq!(response.speech(), UNSUCCESSFUL);
        assert!(response.ends_session());
    }
}
