//! Intent handlers.
//!
//! Each handler produces a complete `EnvelopeResponse`. Collaborator
//! failures are logged and spoken, never returned as errors.

pub mod inventory;
pub mod roadmap;
pub mod shop;
pub mod status;
pub mod welcome;

use ms_protocol::{EnvelopeResponse, SessionAttributes, build_envelope, build_speechlet};

/// A one-shot answer: empty reprompt, empty attributes, session ends.
pub(crate) fn final_response(title: &str, output: &str) -> EnvelopeResponse {
    build_envelope(
        SessionAttributes::new(),
        build_speechlet(title, output, "", true),
    )
}
