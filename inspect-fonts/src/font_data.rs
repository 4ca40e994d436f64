//! raw font bytes

use crate::read::ReadError;

/// The byte order used when reading multi-byte scalars.
///
/// Every font container handled by this crate is big-endian on disk, so
/// [`ByteOrder::Network`] (an alias for big-endian) is the default. The
/// little-endian mode exists for callers reading other material through
/// the same cursor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
    /// Big-endian, the on-disk order of every sfnt structure.
    #[default]
    Network,
}

impl ByteOrder {
    fn is_le(self) -> bool {
        matches!(self, ByteOrder::LittleEndian)
    }
}

/// Text encodings understood by [`Cursor::read_fixed_string`].
///
/// Decoding is always lossy: malformed sequences become replacement
/// characters rather than errors, since name records in real fonts are
/// frequently sloppy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf16Be,
}

/// A reference to raw binary font data.
///
/// This is a wrapper around a byte slice that provides bounds-checked
/// access for parsing. It is cheap to copy and never owns the bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontData<'a> {
    bytes: &'a [u8],
}

impl<'a> FontData<'a> {
    /// Create a new `FontData` with these bytes.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData { bytes }
    }

    /// The length of the data, in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Return a sub-slice of the data, or `None` if the range is out of
    /// bounds.
    pub fn slice(&self, range: std::ops::Range<usize>) -> Option<FontData<'a>> {
        self.bytes.get(range).map(FontData::new)
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// A cursor over this data, positioned at `pos`, reading in `order`.
    pub fn cursor_at(&self, pos: usize, order: ByteOrder) -> Cursor<'a> {
        Cursor {
            pos,
            order,
            data: *self,
        }
    }

    /// A big-endian cursor positioned at the start of the data.
    pub fn cursor(&self) -> Cursor<'a> {
        self.cursor_at(0, ByteOrder::default())
    }
}

impl AsRef<[u8]> for FontData<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

/// A seekable reader over a [`FontData`].
///
/// Each fixed-width read either consumes exactly its width or fails with
/// [`ReadError::TruncatedData`] and leaves the position unchanged, so a
/// failed parse attempt can re-seek and try a different format.
#[derive(Clone)]
pub struct Cursor<'a> {
    pos: usize,
    order: ByteOrder,
    data: FontData<'a>,
}

macro_rules! read_scalar {
    ($name:ident, $ty:ty) => {
        pub fn $name(&mut self) -> Result<$ty, ReadError> {
            const N: usize = std::mem::size_of::<$ty>();
            let end = self.pos.checked_add(N).ok_or(ReadError::TruncatedData)?;
            let raw: [u8; N] = self
                .data
                .as_bytes()
                .get(self.pos..end)
                .and_then(|b| b.try_into().ok())
                .ok_or(ReadError::TruncatedData)?;
            self.pos += N;
            Ok(if self.order.is_le() {
                <$ty>::from_le_bytes(raw)
            } else {
                <$ty>::from_be_bytes(raw)
            })
        }
    };
}

impl<'a> Cursor<'a> {
    read_scalar!(read_u8, u8);
    read_scalar!(read_i8, i8);
    read_scalar!(read_u16, u16);
    read_scalar!(read_i16, i16);
    read_scalar!(read_u32, u32);
    read_scalar!(read_i32, i32);
    read_scalar!(read_u64, u64);
    read_scalar!(read_i64, i64);
    read_scalar!(read_f32, f32);
    read_scalar!(read_f64, f64);

    /// Read `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], ReadError> {
        let bytes = self
            .data
            .as_bytes()
            .get(self.pos..self.pos.checked_add(n).ok_or(ReadError::TruncatedData)?)
            .ok_or(ReadError::TruncatedData)?;
        self.pos += n;
        Ok(bytes)
    }

    /// Read `n` bytes and decode them, lossily, as a string.
    pub fn read_fixed_string(&mut self, n: usize, encoding: Encoding) -> Result<String, ReadError> {
        let bytes = self.read_bytes(n)?;
        Ok(match encoding {
            Encoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Encoding::Utf16Be => crate::strings::decode_utf16_be_lossy(bytes),
        })
    }

    /// Move the read position to an absolute offset.
    ///
    /// Seeking past the end is permitted; the next read will fail with
    /// `TruncatedData`.
    pub fn seek(&mut self, offset: usize) {
        self.pos = offset;
    }

    /// Advance the read position by `n` bytes without reading them.
    pub fn skip(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n);
    }

    /// The current read position.
    pub fn tell(&self) -> usize {
        self.pos
    }

    /// The number of bytes between the current position and the end.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    pub fn set_byte_order(&mut self, order: ByteOrder) {
        self.order = order;
    }
}
