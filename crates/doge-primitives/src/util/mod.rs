//! Compact-size variable-length integer encoding.
//!
//! The marker-byte format used by Bitcoin-family protocols to prefix
//! lengths: values below `0xfd` take one byte, larger values are written
//! as a marker (`0xfd`, `0xfe`, `0xff`) followed by 2, 4 or 8 little-endian
//! bytes. Values are restricted to the safe-integer range
//! `[0, 2^53 - 1]` so encodings stay interchangeable with signers that
//! represent lengths as IEEE-754 doubles.

use crate::PrimitivesError;

/// Largest value accepted by the encoder (`2^53 - 1`).
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// A compact-size variable-length integer.
///
/// Construction through [`VarInt::new`] enforces the safe-integer range,
/// so every `VarInt` value can be encoded without further checks.
///
/// See <http://learnmeabitcoin.com/glossary/varint>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarInt(u64);

impl VarInt {
    /// Wrap `value`, rejecting anything above [`MAX_SAFE_INTEGER`].
    pub fn new(value: u64) -> Result<Self, PrimitivesError> {
        check_uint53(value)?;
        Ok(VarInt(value))
    }

    /// Decode a VarInt from the start of `data`.
    ///
    /// # Returns
    /// A tuple of `(VarInt, bytes_consumed)`, or `UnexpectedEof` if the
    /// marker announces more bytes than `data` holds. A decoded value above
    /// [`MAX_SAFE_INTEGER`] is rejected with `IntegerOutOfRange`.
    pub fn from_bytes(data: &[u8]) -> Result<(Self, usize), PrimitivesError> {
        let (&marker, rest) = data.split_first().ok_or(PrimitivesError::UnexpectedEof)?;
        let (value, size) = match marker {
            0xff => (u64::from_le_bytes(take::<8>(rest)?), 9),
            0xfe => (u32::from_le_bytes(take::<4>(rest)?) as u64, 5),
            0xfd => (u16::from_le_bytes(take::<2>(rest)?) as u64, 3),
            b => (b as u64, 1),
        };
        Ok((VarInt::new(value)?, size))
    }

    /// Wire-format byte length of this VarInt: 1, 3, 5 or 9.
    pub fn length(&self) -> usize {
        if self.0 < 0xfd {
            1
        } else if self.0 <= 0xffff {
            3
        } else if self.0 <= 0xffff_ffff {
            5
        } else {
            9
        }
    }

    /// Encode into a new byte vector.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.length()];
        self.write(&mut buf);
        buf
    }

    /// Write the encoding into `dst` starting at `offset`.
    ///
    /// # Returns
    /// The number of bytes written, or `BufferTooSmall` if `dst` cannot
    /// hold the encoding at that offset. Nothing is written on error.
    pub fn put_bytes(&self, dst: &mut [u8], offset: usize) -> Result<usize, PrimitivesError> {
        let needed = self.length();
        let available = dst.len().saturating_sub(offset);
        if available < needed {
            return Err(PrimitivesError::BufferTooSmall { needed, available });
        }
        Ok(self.write(&mut dst[offset..offset + needed]))
    }

    /// The underlying integer value.
    pub fn value(&self) -> u64 {
        self.0
    }

    // `dst` must be exactly `self.length()` bytes.
    fn write(&self, dst: &mut [u8]) -> usize {
        let v = self.0;
        if v < 0xfd {
            dst[0] = v as u8;
            1
        } else if v <= 0xffff {
            dst[0] = 0xfd;
            dst[1..3].copy_from_slice(&(v as u16).to_le_bytes());
            3
        } else if v <= 0xffff_ffff {
            dst[0] = 0xfe;
            dst[1..5].copy_from_slice(&(v as u32).to_le_bytes());
            5
        } else {
            dst[0] = 0xff;
            dst[1..5].copy_from_slice(&(v as u32).to_le_bytes());
            dst[5..9].copy_from_slice(&((v >> 32) as u32).to_le_bytes());
            9
        }
    }
}

impl TryFrom<u64> for VarInt {
    type Error = PrimitivesError;

    fn try_from(v: u64) -> Result<Self, Self::Error> {
        VarInt::new(v)
    }
}

impl TryFrom<usize> for VarInt {
    type Error = PrimitivesError;

    fn try_from(v: usize) -> Result<Self, Self::Error> {
        VarInt::new(v as u64)
    }
}

/// Number of bytes needed to encode `n` (1, 3, 5 or 9).
///
/// Fails with `IntegerOutOfRange` if `n` exceeds [`MAX_SAFE_INTEGER`].
pub fn encoding_length(n: u64) -> Result<usize, PrimitivesError> {
    Ok(VarInt::new(n)?.length())
}

/// Encode `n` into `dst` at `offset`, returning the number of bytes written.
///
/// The range check runs before anything is written.
pub fn encode(n: u64, dst: &mut [u8], offset: usize) -> Result<usize, PrimitivesError> {
    VarInt::new(n)?.put_bytes(dst, offset)
}

fn check_uint53(n: u64) -> Result<(), PrimitivesError> {
    if n > MAX_SAFE_INTEGER {
        return Err(PrimitivesError::IntegerOutOfRange(n));
    }
    Ok(())
}

fn take<const N: usize>(data: &[u8]) -> Result<[u8; N], PrimitivesError> {
    data.get(..N)
        .and_then(|s| s.try_into().ok())
        .ok_or(PrimitivesError::UnexpectedEof)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_varint() {
        let (vi, sz) = VarInt::from_bytes(&[0xff, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(vi.value(), 0);
        assert_eq!(sz, 9);

        let (vi, sz) = VarInt::from_bytes(&[0xfe, 0, 0, 0, 0]).unwrap();
        assert_eq!(vi.value(), 0);
        assert_eq!(sz, 5);

        let (vi, sz) = VarInt::from_bytes(&[0xfd, 0, 0]).unwrap();
        assert_eq!(vi.value(), 0);
        assert_eq!(sz, 3);

        let (vi, sz) = VarInt::from_bytes(&[0x01, 0xaa]).unwrap();
        assert_eq!(vi.value(), 1);
        assert_eq!(sz, 1);
    }

    #[test]
    fn test_decode_truncated() {
        assert!(matches!(VarInt::from_bytes(&[]), Err(PrimitivesError::UnexpectedEof)));
        assert!(matches!(VarInt::from_bytes(&[0xfd, 0x01]), Err(PrimitivesError::UnexpectedEof)));
        assert!(matches!(
            VarInt::from_bytes(&[0xfe, 0x01, 0x02, 0x03]),
            Err(PrimitivesError::UnexpectedEof)
        ));
        assert!(matches!(
            VarInt::from_bytes(&[0xff, 0, 0, 0, 0, 0, 0, 0]),
            Err(PrimitivesError::UnexpectedEof)
        ));
    }

    #[test]
    fn test_decode_above_safe_range() {
        let err = VarInt::from_bytes(&[0xff; 9]).unwrap_err();
        assert!(matches!(err, PrimitivesError::IntegerOutOfRange(u64::MAX)));
    }

    #[test]
    fn test_encoding_length_boundaries() {
        assert_eq!(encoding_length(0).unwrap(), 1);
        assert_eq!(encoding_length(0xfc).unwrap(), 1);
        assert_eq!(encoding_length(0xfd).unwrap(), 3);
        assert_eq!(encoding_length(0xffff).unwrap(), 3);
        assert_eq!(encoding_length(0x10000).unwrap(), 5);
        assert_eq!(encoding_length(0xffff_ffff).unwrap(), 5);
        assert_eq!(encoding_length(0x1_0000_0000).unwrap(), 9);
        assert_eq!(encoding_length(MAX_SAFE_INTEGER).unwrap(), 9);
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            encoding_length(MAX_SAFE_INTEGER + 1),
            Err(PrimitivesError::IntegerOutOfRange(_))
        ));
        assert!(VarInt::new(u64::MAX).is_err());
        assert!(VarInt::try_from(1u64 << 53).is_err());
    }

    #[test]
    fn test_out_of_range_writes_nothing() {
        let mut buf = [0xaau8; 16];
        assert!(encode(MAX_SAFE_INTEGER + 1, &mut buf, 0).is_err());
        assert_eq!(buf, [0xaau8; 16]);
    }

    #[test]
    fn test_put_bytes_cases() {
        let cases: Vec<(u64, Vec<u8>)> = vec![
            (0, vec![0x00]),
            (1, vec![0x01]),
            (0xfc, vec![0xfc]),
            (0xfd, vec![0xfd, 0xfd, 0x00]),
            (0xffff, vec![0xfd, 0xff, 0xff]),
            (0x10000, vec![0xfe, 0x00, 0x00, 0x01, 0x00]),
            (0xffff_ffff, vec![0xfe, 0xff, 0xff, 0xff, 0xff]),
            (0x1_0000_0000, vec![0xff, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00]),
            (MAX_SAFE_INTEGER, vec![0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x1f, 0x00]),
        ];

        for (value, expected) in cases {
            let vi = VarInt::new(value).unwrap();
            let mut buf = vec![0u8; vi.length()];
            let n = vi.put_bytes(&mut buf, 0).unwrap();
            assert_eq!(n, expected.len(), "length mismatch for {value}");
            assert_eq!(buf, expected, "content mismatch for {value}");
            assert_eq!(vi.to_bytes(), buf, "to_bytes != put_bytes for {value}");
            assert_eq!(VarInt::from_bytes(&buf).unwrap(), (vi, n));
        }
    }

    #[test]
    fn test_encode_at_offset() {
        let mut buf = [0u8; 6];
        let n = encode(0x1234, &mut buf, 2).unwrap();
        assert_eq!(n, 3);
        assert_eq!(buf, [0, 0, 0xfd, 0x34, 0x12, 0]);
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let mut buf = [0u8; 4];
        let err = encode(0x10000, &mut buf, 0).unwrap_err();
        assert!(matches!(err, PrimitivesError::BufferTooSmall { needed: 5, available: 4 }));

        let err = encode(1, &mut buf, 4).unwrap_err();
        assert!(matches!(err, PrimitivesError::BufferTooSmall { needed: 1, available: 0 }));

        let err = encode(1, &mut buf, 9).unwrap_err();
        assert!(matches!(err, PrimitivesError::BufferTooSmall { needed: 1, available: 0 }));
    }
}
