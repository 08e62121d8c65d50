//! PTP/MTP code tables.
//!
//! Each code space is a `u16` newtype with the well-known values as associated
//! consts. Unknown values are representable on purpose: a peer may send codes
//! from vendor extensions we have no names for.

/// Version of the PTP standard implemented, in hundredths (1.00).
pub const STANDARD_VERSION: u16 = 0x0064;

/// Vendor extension id advertised in the DeviceInfo dataset.
pub const VENDOR_EXTENSION_ID: u32 = 0x0000_0006;

/// Vendor extension version, in hundredths (1.00).
pub const VENDOR_EXTENSION_VERSION: u16 = 0x0064;

/// Standard functional mode (the only mode this device operates in).
pub const FUNCTIONAL_MODE_STANDARD: u16 = 0x0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationCode(pub u16);

impl OperationCode {
    pub const GET_DEVICE_INFO: OperationCode = OperationCode(0x1001);
    pub const OPEN_SESSION: OperationCode = OperationCode(0x1002);
    pub const CLOSE_SESSION: OperationCode = OperationCode(0x1003);
    pub const GET_STORAGE_IDS: OperationCode = OperationCode(0x1004);
    pub const GET_STORAGE_INFO: OperationCode = OperationCode(0x1005);
    pub const GET_NUM_OBJECTS: OperationCode = OperationCode(0x1006);
    pub const GET_OBJECT_HANDLES: OperationCode = OperationCode(0x1007);
    pub const GET_OBJECT_INFO: OperationCode = OperationCode(0x1008);
    pub const GET_OBJECT: OperationCode = OperationCode(0x1009);
    pub const DELETE_OBJECT: OperationCode = OperationCode(0x100B);
    pub const SEND_OBJECT_INFO: OperationCode = OperationCode(0x100C);
    pub const SEND_OBJECT: OperationCode = OperationCode(0x100D);
    pub const GET_DEVICE_PROP_DESC: OperationCode = OperationCode(0x1014);
    pub const GET_DEVICE_PROP_VALUE: OperationCode = OperationCode(0x1015);
    pub const SET_DEVICE_PROP_VALUE: OperationCode = OperationCode(0x1016);
    pub const GET_PARTIAL_OBJECT: OperationCode = OperationCode(0x101B);
    pub const GET_OBJECT_PROPS_SUPPORTED: OperationCode = OperationCode(0x9801);
    pub const GET_OBJECT_PROP_DESC: OperationCode = OperationCode(0x9802);
    pub const GET_OBJECT_PROP_VALUE: OperationCode = OperationCode(0x9803);
    pub const SET_OBJECT_PROP_VALUE: OperationCode = OperationCode(0x9804);
    pub const GET_OBJECT_PROP_LIST: OperationCode = OperationCode(0x9805);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventCode(pub u16);

impl EventCode {
    pub const OBJECT_ADDED: EventCode = EventCode(0x4002);
    pub const OBJECT_REMOVED: EventCode = EventCode(0x4003);
    pub const STORE_ADDED: EventCode = EventCode(0x4004);
    pub const STORE_REMOVED: EventCode = EventCode(0x4005);
    pub const DEVICE_PROP_CHANGED: EventCode = EventCode(0x4006);
    pub const STORAGE_INFO_CHANGED: EventCode = EventCode(0x400C);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DevicePropCode(pub u16);

impl DevicePropCode {
    pub const BATTERY_LEVEL: DevicePropCode = DevicePropCode(0x5001);
    pub const SYNCHRONIZATION_PARTNER: DevicePropCode = DevicePropCode(0xD401);
    pub const DEVICE_FRIENDLY_NAME: DevicePropCode = DevicePropCode(0xD402);
}

/// Object format code (PTP 0x30xx space plus MTP vendor formats).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormatCode(pub u16);

impl FormatCode {
    pub const UNDEFINED: FormatCode = FormatCode(0x3000);
    /// Folder-like container object. Containers are the only objects with
    /// children, so deletion recurses exactly on this format.
    pub const ASSOCIATION: FormatCode = FormatCode(0x3001);
    pub const TEXT: FormatCode = FormatCode(0x3004);
    pub const WAV: FormatCode = FormatCode(0x3008);
    pub const MP3: FormatCode = FormatCode(0x3009);
    pub const AVI: FormatCode = FormatCode(0x300A);
    pub const MPEG: FormatCode = FormatCode(0x300B);
    pub const JPEG: FormatCode = FormatCode(0x3801);
    pub const PNG: FormatCode = FormatCode(0x380B);
    pub const WMA: FormatCode = FormatCode(0xB901);
    pub const WMV: FormatCode = FormatCode(0xB981);

    pub fn is_association(self) -> bool {
        self == FormatCode::ASSOCIATION
    }
}

/// Response code returned in the response phase of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResponseCode(pub u16);

impl ResponseCode {
    pub const OK: ResponseCode = ResponseCode(0x2001);
    pub const GENERAL_ERROR: ResponseCode = ResponseCode(0x2002);
    pub const INVALID_OBJECT_HANDLE: ResponseCode = ResponseCode(0x2009);
    pub const INVALID_OBJECT_FORMAT_CODE: ResponseCode = ResponseCode(0x200B);
    pub const STORE_FULL: ResponseCode = ResponseCode(0x200C);
    pub const PARTIAL_DELETION: ResponseCode = ResponseCode(0x2012);
    pub const DEVICE_BUSY: ResponseCode = ResponseCode(0x2019);
    pub const INVALID_PARENT_OBJECT: ResponseCode = ResponseCode(0x201A);

    pub fn name(self) -> Option<&'static str> {
        match self {
            ResponseCode::OK => Some("OK"),
            ResponseCode::GENERAL_ERROR => Some("GENERAL_ERROR"),
            ResponseCode::INVALID_OBJECT_HANDLE => Some("INVALID_OBJECT_HANDLE"),
            ResponseCode::INVALID_OBJECT_FORMAT_CODE => Some("INVALID_OBJECT_FORMAT_CODE"),
            ResponseCode::STORE_FULL => Some("STORE_FULL"),
            ResponseCode::PARTIAL_DELETION => Some("PARTIAL_DELETION"),
            ResponseCode::DEVICE_BUSY => Some("DEVICE_BUSY"),
            ResponseCode::INVALID_PARENT_OBJECT => Some("INVALID_PARENT_OBJECT"),
            _ => None,
        }
    }
}
