//! Welcome / help response.

use ms_protocol::{EnvelopeResponse, SessionAttributes, build_envelope, build_speechlet};

pub const WELCOME_TITLE: &str = "Welcome";

pub const WELCOME_TEXT: &str = "Welcome to the Alexa Meraki Application. You can ask me for network status, inventory, and to open or close this shop. ";

pub const WELCOME_REPROMPT: &str =
    "Please ask me to do something like, what is the network status?";

/// Greeting for launch and help. Keeps the session open.
pub fn get_welcome_response() -> EnvelopeResponse {
    build_envelope(
        SessionAttributes::new(),
        build_speechlet(WELCOME_TITLE, WELCOME_TEXT, WELCOME_REPROMPT, false),
    )
}
