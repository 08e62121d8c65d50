//! Static device configuration.

use serde::{Deserialize, Serialize};

use mtpd_proto::codes::{
    self, DevicePropCode, EventCode, FormatCode, OperationCode,
};
use mtpd_proto::{DeviceInfo, PtpString};

/// Operations this responder implements, in advertisement order.
const SUPPORTED_OPERATIONS: &[OperationCode] = &[
    OperationCode::GET_DEVICE_INFO,
    OperationCode::OPEN_SESSION,
    OperationCode::CLOSE_SESSION,
    OperationCode::GET_STORAGE_IDS,
    OperationCode::GET_STORAGE_INFO,
    OperationCode::GET_NUM_OBJECTS,
    OperationCode::GET_OBJECT_HANDLES,
    OperationCode::GET_OBJECT_INFO,
    OperationCode::GET_OBJECT,
    OperationCode::DELETE_OBJECT,
    OperationCode::SEND_OBJECT_INFO,
    OperationCode::SEND_OBJECT,
    OperationCode::GET_DEVICE_PROP_DESC,
    OperationCode::GET_DEVICE_PROP_VALUE,
    OperationCode::SET_DEVICE_PROP_VALUE,
    OperationCode::GET_PARTIAL_OBJECT,
    OperationCode::GET_OBJECT_PROPS_SUPPORTED,
    OperationCode::GET_OBJECT_PROP_DESC,
    OperationCode::GET_OBJECT_PROP_VALUE,
    OperationCode::SET_OBJECT_PROP_VALUE,
    OperationCode::GET_OBJECT_PROP_LIST,
];

const SUPPORTED_EVENTS: &[EventCode] = &[
    EventCode::OBJECT_ADDED,
    EventCode::OBJECT_REMOVED,
    EventCode::STORE_ADDED,
    EventCode::STORE_REMOVED,
    EventCode::DEVICE_PROP_CHANGED,
    EventCode::STORAGE_INFO_CHANGED,
];

const SUPPORTED_DEVICE_PROPS: &[DevicePropCode] = &[
    DevicePropCode::BATTERY_LEVEL,
    DevicePropCode::SYNCHRONIZATION_PARTNER,
    DevicePropCode::DEVICE_FRIENDLY_NAME,
];

const SUPPORTED_OBJECT_FORMATS: &[FormatCode] = &[
    FormatCode::UNDEFINED,
    FormatCode::ASSOCIATION,
    FormatCode::TEXT,
    FormatCode::WAV,
    FormatCode::MP3,
    FormatCode::AVI,
    FormatCode::MPEG,
    FormatCode::JPEG,
    FormatCode::PNG,
    FormatCode::WMA,
    FormatCode::WMV,
];

/// Device identity and capacity configuration.
///
/// Loaded once at startup (typically from JSON via serde) and owned by the
/// device; a reset re-applies it wholesale. There is no partial update path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub manufacturer: String,
    pub model: String,
    pub device_version: String,
    pub serial_number: String,
    pub vendor_extension_desc: String,
    /// Number of store slots the device exposes.
    pub max_stores: usize,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            manufacturer: "mtpd".to_owned(),
            model: "mtpd responder".to_owned(),
            device_version: "1.0".to_owned(),
            serial_number: String::new(),
            vendor_extension_desc: "microsoft.com: 1.0;".to_owned(),
            max_stores: 1,
        }
    }
}

impl DeviceConfig {
    /// Builds the full DeviceInfo dataset this configuration advertises.
    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            standard_version: codes::STANDARD_VERSION,
            vendor_extension_id: codes::VENDOR_EXTENSION_ID,
            vendor_extension_version: codes::VENDOR_EXTENSION_VERSION,
            vendor_extension_desc: PtpString::new(&self.vendor_extension_desc),
            functional_mode: codes::FUNCTIONAL_MODE_STANDARD,
            operations_supported: SUPPORTED_OPERATIONS.to_vec(),
            events_supported: SUPPORTED_EVENTS.to_vec(),
            device_properties_supported: SUPPORTED_DEVICE_PROPS.to_vec(),
            capture_formats_supported: Vec::new(),
            object_formats_supported: SUPPORTED_OBJECT_FORMATS.to_vec(),
            manufacturer: PtpString::new(&self.manufacturer),
            model: PtpString::new(&self.model),
            device_version: PtpString::new(&self.device_version),
            serial_number: PtpString::new(&self.serial_number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_from_json_with_defaults_for_missing_fields() {
        let cfg: DeviceConfig = serde_json::from_str(
            r#"{ "model": "test unit", "serial_number": "0042", "max_stores": 2 }"#,
        )
        .unwrap();
        assert_eq!(cfg.model, "test unit");
        assert_eq!(cfg.serial_number, "0042");
        assert_eq!(cfg.max_stores, 2);
        assert_eq!(cfg.manufacturer, DeviceConfig::default().manufacturer);
    }

    #[test]
    fn device_info_reflects_identity_strings() {
        let cfg = DeviceConfig {
            manufacturer: "acme".to_owned(),
            ..DeviceConfig::default()
        };
        let info = cfg.device_info();
        assert_eq!(info.manufacturer, PtpString::new("acme"));
        assert_eq!(info.standard_version, codes::STANDARD_VERSION);
        assert!(info
            .operations_supported
            .contains(&OperationCode::DELETE_OBJECT));
        // same config -> identical dataset, both value- and wire-level
        let again = cfg.device_info();
        assert_eq!(info, again);
        assert_eq!(info.required_size(), again.required_size());
    }
}
