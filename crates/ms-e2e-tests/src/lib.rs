//! End-to-end tests for the meraki voice skill.
//!
//! The tests live in `tests/`: they drive the Axum router with real skill
//! envelopes against a wiremock Dashboard and a UDP SNMP agent.
