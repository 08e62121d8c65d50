//! The GetDeviceInfo dataset.

use thiserror::Error;

use crate::codes::{DevicePropCode, EventCode, FormatCode, OperationCode};
use crate::wire::{code_array_len, ByteWriter, PtpString};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PackError {
    #[error("buffer too small for dataset: required {required}, capacity {capacity}")]
    BufferTooSmall { required: usize, capacity: usize },
}

/// DeviceInfo dataset advertising protocol version, vendor extension and
/// capability lists.
///
/// Field order mirrors the on-wire dataset exactly; [`DeviceInfo::pack_into`]
/// serializes the fields in declaration order. List order is
/// protocol-significant and is preserved as given.
///
/// Built once from static configuration at device init and replaced wholesale
/// on reset; never partially updated.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceInfo {
    pub standard_version: u16,
    pub vendor_extension_id: u32,
    pub vendor_extension_version: u16,
    pub vendor_extension_desc: PtpString,
    pub functional_mode: u16,
    pub operations_supported: Vec<OperationCode>,
    pub events_supported: Vec<EventCode>,
    pub device_properties_supported: Vec<DevicePropCode>,
    pub capture_formats_supported: Vec<FormatCode>,
    pub object_formats_supported: Vec<FormatCode>,
    pub manufacturer: PtpString,
    pub model: PtpString,
    pub device_version: PtpString,
    pub serial_number: PtpString,
}

impl DeviceInfo {
    /// Exact number of bytes [`DeviceInfo::pack_into`] needs for the current
    /// contents. Pure; callers size their response buffer with this.
    pub fn required_size(&self) -> usize {
        2 // standard_version
            + 4 // vendor_extension_id
            + 2 // vendor_extension_version
            + self.vendor_extension_desc.encoded_len()
            + 2 // functional_mode
            + code_array_len(self.operations_supported.len())
            + code_array_len(self.events_supported.len())
            + code_array_len(self.device_properties_supported.len())
            + code_array_len(self.capture_formats_supported.len())
            + code_array_len(self.object_formats_supported.len())
            + self.manufacturer.encoded_len()
            + self.model.encoded_len()
            + self.device_version.encoded_len()
            + self.serial_number.encoded_len()
    }

    /// Serializes the dataset into `buf`.
    ///
    /// Fail-clean: if `buf` is smaller than [`DeviceInfo::required_size`] no
    /// byte is written and `BufferTooSmall` is returned. A truncated dataset
    /// on the wire is unrecoverable, so partial writes are never an option.
    /// On success returns the byte count written, which equals
    /// `required_size()`.
    pub fn pack_into(&self, buf: &mut [u8]) -> Result<usize, PackError> {
        let required = self.required_size();
        if buf.len() < required {
            return Err(PackError::BufferTooSmall {
                required,
                capacity: buf.len(),
            });
        }

        let mut w = ByteWriter::new(buf);
        w.put_u16(self.standard_version);
        w.put_u32(self.vendor_extension_id);
        w.put_u16(self.vendor_extension_version);
        w.put_string(&self.vendor_extension_desc);
        w.put_u16(self.functional_mode);
        w.put_code_array(self.operations_supported.iter().map(|c| c.0));
        w.put_code_array(self.events_supported.iter().map(|c| c.0));
        w.put_code_array(self.device_properties_supported.iter().map(|c| c.0));
        w.put_code_array(self.capture_formats_supported.iter().map(|c| c.0));
        w.put_code_array(self.object_formats_supported.iter().map(|c| c.0));
        w.put_string(&self.manufacturer);
        w.put_string(&self.model);
        w.put_string(&self.device_version);
        w.put_string(&self.serial_number);

        debug_assert_eq!(w.written(), required);
        Ok(w.written())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes;

    fn sample_info() -> DeviceInfo {
        DeviceInfo {
            standard_version: codes::STANDARD_VERSION,
            vendor_extension_id: codes::VENDOR_EXTENSION_ID,
            vendor_extension_version: codes::VENDOR_EXTENSION_VERSION,
            vendor_extension_desc: PtpString::empty(),
            functional_mode: codes::FUNCTIONAL_MODE_STANDARD,
            operations_supported: vec![
                OperationCode::GET_DEVICE_INFO,
                OperationCode::OPEN_SESSION,
                OperationCode::DELETE_OBJECT,
            ],
            events_supported: vec![EventCode::OBJECT_ADDED],
            device_properties_supported: vec![DevicePropCode::BATTERY_LEVEL],
            capture_formats_supported: vec![],
            object_formats_supported: vec![FormatCode::UNDEFINED, FormatCode::ASSOCIATION],
            manufacturer: PtpString::new("A"),
            model: PtpString::new("B"),
            device_version: PtpString::new("1.0"),
            serial_number: PtpString::empty(),
        }
    }

    #[test]
    fn pack_writes_exactly_required_size() {
        let info = sample_info();
        let required = info.required_size();
        let mut buf = vec![0u8; required];
        assert_eq!(info.pack_into(&mut buf), Ok(required));
    }

    #[test]
    fn undersized_buffer_fails_without_writing() {
        let info = sample_info();
        let required = info.required_size();
        let mut buf = vec![0xA5u8; required - 1];
        assert_eq!(
            info.pack_into(&mut buf),
            Err(PackError::BufferTooSmall {
                required,
                capacity: required - 1,
            })
        );
        assert!(buf.iter().all(|&b| b == 0xA5), "failed pack must not write");
    }

    #[test]
    fn field_order_and_encodings_match_the_dataset_layout() {
        let info = sample_info();
        let mut buf = vec![0u8; info.required_size()];
        let n = info.pack_into(&mut buf).unwrap();

        let mut expect = Vec::new();
        expect.extend_from_slice(&0x0064u16.to_le_bytes()); // StandardVersion
        expect.extend_from_slice(&0x0000_0006u32.to_le_bytes()); // VendorExtensionID
        expect.extend_from_slice(&0x0064u16.to_le_bytes()); // VendorExtensionVersion
        expect.push(0); // VendorExtensionDescription (empty)
        expect.extend_from_slice(&0u16.to_le_bytes()); // FunctionalMode
        expect.extend_from_slice(&3u32.to_le_bytes()); // OperationsSupported
        expect.extend_from_slice(&0x1001u16.to_le_bytes());
        expect.extend_from_slice(&0x1002u16.to_le_bytes());
        expect.extend_from_slice(&0x100Bu16.to_le_bytes());
        expect.extend_from_slice(&1u32.to_le_bytes()); // EventsSupported
        expect.extend_from_slice(&0x4002u16.to_le_bytes());
        expect.extend_from_slice(&1u32.to_le_bytes()); // DevicePropertiesSupported
        expect.extend_from_slice(&0x5001u16.to_le_bytes());
        expect.extend_from_slice(&0u32.to_le_bytes()); // CaptureFormatsSupported
        expect.extend_from_slice(&2u32.to_le_bytes()); // ObjectFormatsSupported
        expect.extend_from_slice(&0x3000u16.to_le_bytes());
        expect.extend_from_slice(&0x3001u16.to_le_bytes());
        expect.extend_from_slice(&[2, b'A', 0, 0, 0]); // Manufacturer
        expect.extend_from_slice(&[2, b'B', 0, 0, 0]); // Model
        expect.extend_from_slice(&[4, b'1', 0, b'.', 0, b'0', 0, 0, 0]); // DeviceVersion
        expect.push(0); // SerialNumber (empty)

        assert_eq!(&buf[..n], &expect[..]);
    }

    #[test]
    fn required_size_tracks_list_growth() {
        let mut info = sample_info();
        let before = info.required_size();
        info.operations_supported.push(OperationCode::GET_OBJECT);
        assert_eq!(info.required_size(), before + 2);
    }
}
