//! Roadmap question. Always the same answer.

use ms_protocol::EnvelopeResponse;

use super::final_response;

pub const ROADMAP_TITLE: &str = "roadmap";

pub const ROADMAP_TEXT: &str =
    "The first rule of Meraki roadmaps, is we do not talk about Meraki roadmaps. ";

pub fn get_roadmap() -> EnvelopeResponse {
    final_response(ROADMAP_TITLE, ROADMAP_TEXT)
}
