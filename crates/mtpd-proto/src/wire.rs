//! Low-level dataset encoding helpers.
//!
//! All multi-byte integers are little-endian, matching the transport's
//! container framing.

/// Maximum number of UTF-16 code units in a PTP string payload.
///
/// The on-wire length unit is a single byte counting code units *including*
/// the terminating NUL, so content is capped at 254 units.
pub const MAX_STRING_UNITS: usize = 254;

/// Protocol text value in the PTP length-prefixed representation.
///
/// On the wire: one `u8` counting UTF-16 code units including a terminating
/// NUL, then that many little-endian code units. The empty string is a single
/// zero byte with no code units and no terminator.
///
/// Over-long content is truncated at construction (never at pack time, so
/// [`crate::DeviceInfo::required_size`] stays exact).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PtpString {
    units: Vec<u16>,
}

impl PtpString {
    pub fn new(s: &str) -> Self {
        let mut units: Vec<u16> = s.encode_utf16().collect();
        units.truncate(MAX_STRING_UNITS);
        Self { units }
    }

    pub fn empty() -> Self {
        Self { units: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Exact number of bytes [`ByteWriter::put_string`] emits for this value.
    pub fn encoded_len(&self) -> usize {
        if self.units.is_empty() {
            1
        } else {
            // length byte + content units + terminating NUL unit
            1 + (self.units.len() + 1) * 2
        }
    }

    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.units)
    }
}

impl From<&str> for PtpString {
    fn from(s: &str) -> Self {
        PtpString::new(s)
    }
}

/// Number of bytes a count-prefixed array of `n` 16-bit codes occupies.
pub(crate) fn code_array_len(n: usize) -> usize {
    4 + n * 2
}

/// Little-endian write cursor over a caller-supplied buffer.
///
/// Callers check capacity up front (see [`crate::DeviceInfo::pack_into`]);
/// the put methods themselves assume room and only debug-assert it.
pub struct ByteWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> ByteWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Number of bytes written so far.
    pub fn written(&self) -> usize {
        self.pos
    }

    fn put_bytes(&mut self, bytes: &[u8]) {
        debug_assert!(self.pos + bytes.len() <= self.buf.len());
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    pub fn put_u8(&mut self, v: u8) {
        self.put_bytes(&[v]);
    }

    pub fn put_u16(&mut self, v: u16) {
        self.put_bytes(&v.to_le_bytes());
    }

    pub fn put_u32(&mut self, v: u32) {
        self.put_bytes(&v.to_le_bytes());
    }

    /// Count-prefixed code array: u32 element count, then the codes in order.
    pub fn put_code_array<I>(&mut self, codes: I)
    where
        I: ExactSizeIterator<Item = u16>,
    {
        self.put_u32(codes.len() as u32);
        for code in codes {
            self.put_u16(code);
        }
    }

    pub fn put_string(&mut self, s: &PtpString) {
        if s.units.is_empty() {
            self.put_u8(0);
            return;
        }
        self.put_u8((s.units.len() + 1) as u8);
        for unit in &s.units {
            self.put_u16(*unit);
        }
        self.put_u16(0); // terminating NUL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_single_zero_byte() {
        let s = PtpString::empty();
        assert_eq!(s.encoded_len(), 1);

        let mut buf = [0xAAu8; 4];
        let mut w = ByteWriter::new(&mut buf);
        w.put_string(&s);
        assert_eq!(w.written(), 1);
        assert_eq!(buf[0], 0);
    }

    #[test]
    fn string_length_counts_terminating_nul() {
        let s = PtpString::new("ab");
        assert_eq!(s.encoded_len(), 1 + 3 * 2);

        let mut buf = [0u8; 16];
        let mut w = ByteWriter::new(&mut buf);
        w.put_string(&s);
        assert_eq!(w.written(), 7);
        assert_eq!(&buf[..7], &[3, b'a', 0, b'b', 0, 0, 0]);
    }

    #[test]
    fn overlong_string_is_truncated_at_construction() {
        let long: String = std::iter::repeat('x').take(500).collect();
        let s = PtpString::new(&long);
        assert_eq!(s.encoded_len(), 1 + (MAX_STRING_UNITS + 1) * 2);
    }

    #[test]
    fn code_array_preserves_order() {
        let codes = [0x1001u16, 0x1003, 0x1002];
        let mut buf = [0u8; 16];
        let mut w = ByteWriter::new(&mut buf);
        w.put_code_array(codes.iter().copied());
        assert_eq!(w.written(), code_array_len(3));
        assert_eq!(
            &buf[..10],
            &[3, 0, 0, 0, 0x01, 0x10, 0x03, 0x10, 0x02, 0x10]
        );
    }
}
