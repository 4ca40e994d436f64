//! Informational string identifiers and name-record decoding
//!
//! Although name identifiers are u16s on disk, we represent the supported
//! subset as a distinct type, following the usual treatment of `name`
//! table IDs.

use std::fmt;

/// Identifier for an informational string extracted from a font.
///
/// Only the predefined identifiers below are retained during parsing;
/// records with any other name ID are ignored.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct StringId(u16);

impl StringId {
    /// Copyright notice.
    pub const COPYRIGHT: Self = Self(0);
    /// Font family name.
    pub const FAMILY: Self = Self(1);
    /// Font subfamily name.
    pub const SUBFAMILY: Self = Self(2);
    /// Unique font identifier.
    pub const UNIQUE_ID: Self = Self(3);
    /// Full font name.
    pub const FULL_NAME: Self = Self(4);
    /// Version string.
    pub const VERSION: Self = Self(5);
    /// PostScript name.
    pub const POSTSCRIPT_NAME: Self = Self(6);
    /// Trademark notice.
    pub const TRADEMARK: Self = Self(7);
    /// Manufacturer name.
    pub const MANUFACTURER: Self = Self(8);
    /// Name of the designer of the typeface.
    pub const DESIGNER: Self = Self(9);
    /// Description of the typeface.
    pub const DESCRIPTION: Self = Self(10);
    /// URL of the font vendor.
    pub const VENDOR_URL: Self = Self(11);
    /// URL of the typeface designer.
    pub const DESIGNER_URL: Self = Self(12);
    /// License description.
    pub const LICENSE_DESCRIPTION: Self = Self(13);
    /// License information URL.
    pub const LICENSE_URL: Self = Self(14);
    /// Typographic family name.
    pub const TYPOGRAPHIC_FAMILY: Self = Self(16);
    /// Typographic subfamily name.
    pub const TYPOGRAPHIC_SUBFAMILY: Self = Self(17);

    /// Map a raw `name` table name ID to a supported identifier.
    pub fn from_name_id(raw: u16) -> Option<Self> {
        match raw {
            0..=14 | 16 | 17 => Some(Self(raw)),
            _ => None,
        }
    }

    pub fn to_u16(self) -> u16 {
        self.0
    }

    /// Human-readable label, e.g. for an inspector listing.
    pub fn label(self) -> &'static str {
        match self.0 {
            0 => "Copyright notice",
            1 => "Font family name",
            2 => "Font subfamily name",
            3 => "Unique font identifier",
            4 => "Full font name",
            5 => "Version",
            6 => "PostScript name",
            7 => "Trademark",
            8 => "Manufacturer name",
            9 => "Designer",
            10 => "Description",
            11 => "Vendor URL",
            12 => "Designer URL",
            13 => "License description",
            14 => "License info URL",
            16 => "Typographic family name",
            _ => "Typographic subfamily name",
        }
    }
}

impl fmt::Debug for StringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StringId({}: {})", self.0, self.label())
    }
}

/// Decode big-endian UTF-16 bytes, replacing anything malformed.
///
/// Surrogate pairs are combined; unpaired surrogates and an odd trailing
/// byte decode to U+FFFD so that a damaged record still yields a usable
/// string.
pub fn decode_utf16_be_lossy(bytes: &[u8]) -> String {
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
    let mut out: String = char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if bytes.len() % 2 != 0 {
        out.push(char::REPLACEMENT_CHARACTER);
    }
    out
}
