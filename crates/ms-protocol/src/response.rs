//! Speech/card response schema and the pure builders that produce it.

use serde::{Deserialize, Serialize};

/// Envelope protocol version returned on every response.
pub const RESPONSE_VERSION: &str = "1.0";

/// Label prepended to the card title and content.
pub const CARD_PREFIX: &str = "SessionSpeechlet - ";

/// Session attributes handed back to the caller.
pub type SessionAttributes = serde_json::Map<String, serde_json::Value>;

/// Top-level response returned to the front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeResponse {
    pub version: String,
    pub session_attributes: SessionAttributes,
    pub response: SpeechletResponse,
}

/// Spoken output, card, and reprompt for a single turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechletResponse {
    pub output_speech: OutputSpeech,
    pub card: Card,
    pub reprompt: Reprompt,
    pub should_end_session: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeechType {
    PlainText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: SpeechType,
    pub text: String,
}

impl OutputSpeech {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: SpeechType::PlainText,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardType {
    Simple,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "type")]
    pub kind: CardType,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

/// Build the speech, card, and reprompt for one turn.
pub fn build_speechlet(
    title: &str,
    output: &str,
    reprompt: &str,
    end_session: bool,
) -> SpeechletResponse {
    SpeechletResponse {
        output_speech: OutputSpeech::plain(output),
        card: Card {
            kind: CardType::Simple,
            title: format!("{CARD_PREFIX}{title}"),
            content: format!("{CARD_PREFIX}{output}"),
        },
        reprompt: Reprompt {
            output_speech: OutputSpeech::plain(reprompt),
        },
        should_end_session: end_session,
    }
}

/// Wrap a speechlet response and session attributes into the outbound envelope.
pub fn build_envelope(
    session_attributes: SessionAttributes,
    speechlet: SpeechletResponse,
) -> EnvelopeResponse {
    EnvelopeResponse {
        version: RESPONSE_VERSION.to_string(),
        session_attributes,
        response: speechlet,
    }
}

impl EnvelopeResponse {
    /// Spoken text of this response.
    pub fn speech(&self) -> &str {
        &self.response.output_speech.text
    }

    /// Card title with the card prefix removed.
    pub fn title(&self) -> &str {
        let title = &self.response.card.title;
        title.strip_prefix(CARD_PREFIX).unwrap_or(title)
    }

    pub fn reprompt(&self) -> &str {
        &self.response.reprompt.output_speech.text
    }

    pub fn ends_session(&self) -> bool {
        self.response.should_end_session
    }
}
