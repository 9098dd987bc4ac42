//! Wire types for the control surface
//!
//! The shapes here, field names included, are the protocol the
//! presentation layer speaks. Resource ids travel as raw integers and
//! idle state travels as remaining time-to-live, so no storage detail or
//! clock domain leaks out of the engine.

use serde::{Deserialize, Serialize};

/// A control request, dispatched on its `action` tag
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum ControlRequest {
    /// Flip the user pin on one resource
    #[serde(rename = "togglePin", rename_all = "camelCase")]
    TogglePin {
        /// Host-assigned resource id
        tab_id: u64,
    },

    /// Query the user pin on one resource
    #[serde(rename = "isPinned", rename_all = "camelCase")]
    IsPinned {
        /// Host-assigned resource id
        tab_id: u64,
    },

    /// Merge the provided fields into the settings
    #[serde(rename = "updateSettings")]
    UpdateSettings {
        /// New diagnostics flag, if present
        debug: Option<bool>,
        /// New idle timeout in minutes, if present
        timeout: Option<u32>,
        /// Replacement allow-list, if present
        whitelist: Option<Vec<String>>,
    },

    /// Fetch the joined resource snapshot
    #[serde(rename = "getTabData")]
    GetTabData,
}

/// Pin state response for `togglePin` and `isPinned`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinResponse {
    /// Whether the resource is now user-pinned
    pub pinned: bool,
}

/// Acknowledgement for `updateSettings`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSettingsResponse {
    /// Always true: the update was accepted and merged
    pub success: bool,
}

/// One resource in the snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabEntry {
    /// Host-assigned id
    pub id: u64,
    /// Human-readable title
    pub title: String,
    /// Current URL
    pub url: String,
    /// Favicon URL, omitted when the host reports none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fav_icon_url: Option<String>,
    /// Already suspended by the host
    pub discarded: bool,
    /// Currently emitting audio
    pub audible: bool,
    /// Remaining idle time-to-live in milliseconds; zero once eligible,
    /// null for resources the engine has not tracked yet
    pub ttl: Option<u64>,
    /// User-pinned through this surface
    pub is_pinned: bool,
}

/// Snapshot response for `getTabData`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabDataResponse {
    /// Live resources joined with their bookkeeping
    pub tabs: Vec<TabEntry>,
    /// Current idle timeout in minutes
    pub timeout: u32,
    /// Current allow-list
    pub whitelist: Vec<String>,
}

/// Any control response body
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ControlResponse {
    /// Pin state
    Pin(PinResponse),
    /// Settings acknowledgement
    Settings(UpdateSettingsResponse),
    /// Resource snapshot
    TabData(TabDataResponse),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn toggle_pin_request_parses() {
        let request: ControlRequest =
            serde_json::from_value(json!({"action": "togglePin", "tabId": 7})).unwrap();
        assert!(matches!(request, ControlRequest::TogglePin { tab_id: 7 }));
    }

    #[test]
    fn is_pinned_request_parses() {
        let request: ControlRequest =
            serde_json::from_value(json!({"action": "isPinned", "tabId": 3})).unwrap();
        assert!(matches!(request, ControlRequest::IsPinned { tab_id: 3 }));
    }

    #[test]
    fn update_settings_request_keeps_absent_fields_absent() {
        let request: ControlRequest =
            serde_json::from_value(json!({"action": "updateSettings", "timeout": 15})).unwrap();
        match request {
            ControlRequest::UpdateSettings {
                debug,
                timeout,
                whitelist,
            } => {
                assert_eq!(timeout, Some(15));
                assert!(debug.is_none());
                assert!(whitelist.is_none());
            }
            other => panic!("parsed the wrong action: {:?}", other),
        }
    }

    #[test]
    fn update_settings_distinguishes_false_from_absent() {
        let request: ControlRequest =
            serde_json::from_value(json!({"action": "updateSettings", "debug": false})).unwrap();
        match request {
            ControlRequest::UpdateSettings { debug, .. } => assert_eq!(debug, Some(false)),
            other => panic!("parsed the wrong action: {:?}", other),
        }
    }

    #[test]
    fn get_tab_data_request_parses() {
        let request: ControlRequest =
            serde_json::from_value(json!({"action": "getTabData"})).unwrap();
        assert!(matches!(request, ControlRequest::GetTabData));
    }

    #[test]
    fn unknown_action_is_rejected() {
        let result: Result<ControlRequest, _> =
            serde_json::from_value(json!({"action": "selfDestruct"}));
        assert!(result.is_err());
    }

    #[test]
    fn tab_entry_serializes_with_wire_field_names() {
        let entry = TabEntry {
            id: 4,
            title: "Example".to_string(),
            url: "https://example.com".to_string(),
            fav_icon_url: Some("https://example.com/favicon.ico".to_string()),
            discarded: false,
            audible: true,
            ttl: Some(90_000),
            is_pinned: true,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 4,
                "title": "Example",
                "url": "https://example.com",
                "favIconUrl": "https://example.com/favicon.ico",
                "discarded": false,
                "audible": true,
                "ttl": 90_000,
                "isPinned": true,
            })
        );
    }

    #[test]
    fn absent_favicon_is_omitted_and_untracked_ttl_is_null() {
        let entry = TabEntry {
            id: 4,
            title: "Example".to_string(),
            url: "https://example.com".to_string(),
            fav_icon_url: None,
            discarded: false,
            audible: false,
            ttl: None,
            is_pinned: false,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("favIconUrl").is_none());
        assert_eq!(value.get("ttl"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn responses_serialize_flat() {
        let pin = serde_json::to_value(ControlResponse::Pin(PinResponse { pinned: true })).unwrap();
        assert_eq!(pin, json!({"pinned": true}));

        let ack = serde_json::to_value(ControlResponse::Settings(UpdateSettingsResponse {
            success: true,
        }))
        .unwrap();
        assert_eq!(ack, json!({"success": true}));
    }
}
