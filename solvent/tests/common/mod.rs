use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use solvent::testing::RecordingTransport;
use solvent::{ErrorMessage, EventGateway, WirePayload};

// ============================================================================
// Test Models
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub name: String,
}

impl WirePayload for Profile {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessToken {
    pub access_token: String,
}

// ============================================================================
// Fixtures
// ============================================================================

/// A gateway over a recording transport, plus a handle on the recording.
pub fn recording_gateway() -> (EventGateway<RecordingTransport>, RecordingTransport) {
    let transport = RecordingTransport::new();
    let recorded = transport.clone();
    (EventGateway::new(transport), recorded)
}

/// A minimal connection environment mapping.
pub fn environ_map() -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("REMOTE_ADDR".to_string(), json!("127.0.0.1"));
    map.insert("HTTP_ORIGIN".to_string(), json!("https://app.example"));
    map
}

/// Decode the structured error feedback out of a recorded message.
pub fn decode_error(data: &Value) -> ErrorMessage {
    serde_json::from_value(data.clone()).expect("error feedback should decode")
}
