//! OpenType table directory, `OS/2` and `name` extraction
//!
//! This reads just enough of an sfnt to identify a font: the table
//! directory, the `fsType` field of `OS/2`, and the informational strings
//! in `name`. Everything else (outlines, metrics, layout) is ignored.

use std::collections::BTreeMap;

use crate::font_data::{Encoding, FontData};
use crate::read::ReadError;
use crate::rights::EmbeddingRights;
use crate::strings::StringId;

/// The sfnt version for fonts with TrueType outlines.
pub const TT_SFNT_VERSION: u32 = 0x00010000;
/// 'OTTO', the sfnt version for fonts with CFF outlines.
pub const CFF_SFNT_VERSION: u32 = 0x4F54544F;
/// 'ttcf', the tag opening a font collection header.
pub const TTC_HEADER_TAG: u32 = 0x74746366;

const TAG_OS2: [u8; 4] = *b"OS/2";
const TAG_NAME: [u8; 4] = *b"name";

/// One entry of the table directory. Offsets are from the start of the
/// whole file, also for fonts inside a collection.
struct TableRecord {
    tag: [u8; 4],
    offset: u32,
    length: u32,
}

/// The identification data of one sfnt font.
pub(crate) struct SfntFont {
    pub(crate) is_cff: bool,
    pub(crate) embedding_rights: Option<EmbeddingRights>,
    pub(crate) strings: BTreeMap<StringId, String>,
}

/// Parse the font whose table directory starts at offset 0.
///
/// Fails only when the 4-byte signature is absent or unrecognized. Once
/// the signature is accepted the rest is best effort: a truncated table
/// directory yields a record with the right format but no strings and no
/// rights (a damaged file still identifies as the format it claims).
pub(crate) fn parse_single(data: FontData) -> Result<SfntFont, ReadError> {
    let mut cursor = data.cursor();
    let is_cff = read_signature(cursor.read_u32()?)?;
    let mut font = SfntFont {
        is_cff,
        embedding_rights: None,
        strings: BTreeMap::new(),
    };
    if let Ok(tables) = read_table_directory(data, 4) {
        populate(&mut font, data, &tables);
    }
    Ok(font)
}

/// Parse a collection member whose table directory starts at `dir_offset`.
///
/// Unlike [`parse_single`], the table directory itself must parse; a
/// member with a bad offset or truncated directory is omitted from the
/// collection rather than reported as an empty font.
pub(crate) fn parse_at(data: FontData, dir_offset: usize) -> Result<SfntFont, ReadError> {
    let mut cursor = data.cursor_at(dir_offset, Default::default());
    let is_cff = read_signature(cursor.read_u32()?)?;
    let tables = read_table_directory(data, dir_offset + 4)?;
    let mut font = SfntFont {
        is_cff,
        embedding_rights: None,
        strings: BTreeMap::new(),
    };
    populate(&mut font, data, &tables);
    Ok(font)
}

fn read_signature(version: u32) -> Result<bool, ReadError> {
    match version {
        TT_SFNT_VERSION => Ok(false),
        CFF_SFNT_VERSION => Ok(true),
        _ => Err(ReadError::UnsupportedFormat),
    }
}

fn read_table_directory(data: FontData, offset: usize) -> Result<Vec<TableRecord>, ReadError> {
    let mut cursor = data.cursor_at(offset, Default::default());
    let num_tables = cursor.read_u16()? as usize;
    // searchRange, entrySelector, rangeShift
    cursor.skip(6);
    // guard against a bogus count before allocating
    if num_tables * 16 > cursor.remaining() {
        return Err(ReadError::TruncatedData);
    }
    let mut tables = Vec::with_capacity(num_tables);
    for _ in 0..num_tables {
        let tag: [u8; 4] = cursor.read_bytes(4)?.try_into().unwrap();
        let _checksum = cursor.read_u32()?;
        let offset = cursor.read_u32()?;
        let length = cursor.read_u32()?;
        tables.push(TableRecord {
            tag,
            offset,
            length,
        });
    }
    Ok(tables)
}

fn table_data<'a>(data: FontData<'a>, tables: &[TableRecord], tag: [u8; 4]) -> Option<FontData<'a>> {
    let record = tables.iter().find(|record| record.tag == tag)?;
    let start = record.offset as usize;
    let end = start.checked_add(record.length as usize)?;
    // tolerate a length that overshoots the file, as long as the table starts in bounds
    data.slice(start..end.min(data.len()))
}

fn populate(font: &mut SfntFont, data: FontData, tables: &[TableRecord]) {
    if let Some(os2) = table_data(data, tables, TAG_OS2) {
        font.embedding_rights = read_fs_type(os2);
    }
    if let Some(name) = table_data(data, tables, TAG_NAME) {
        font.strings = read_name_table(name).unwrap_or_default();
    }
}

/// Extract the embedding-rights bits from an `OS/2` table.
fn read_fs_type(table: FontData) -> Option<EmbeddingRights> {
    let mut cursor = table.cursor();
    // version, xAvgCharWidth, usWeightClass, usWidthClass
    cursor.skip(8);
    let fs_type = cursor.read_u16().ok()?;
    EmbeddingRights::from_bits(fs_type & 0x000F)
}

/// Read the informational strings out of a `name` table.
///
/// Records are processed in file order and later records overwrite
/// earlier ones for the same identifier. The accumulator is local; the
/// caller attaches the finished map to the record in one step.
fn read_name_table(table: FontData) -> Result<BTreeMap<StringId, String>, ReadError> {
    let mut cursor = table.cursor();
    let version = cursor.read_u16()?;
    let count = cursor.read_u16()? as usize;
    let storage_offset = cursor.read_u16()? as usize;
    if version == 1 {
        // language-tag records are not used for anything here
        let lang_tag_count = cursor.read_u16()? as usize;
        cursor.skip(lang_tag_count * 4);
    }
    if count * 12 > cursor.remaining() {
        return Err(ReadError::TruncatedData);
    }

    let mut strings = BTreeMap::new();
    for _ in 0..count {
        let platform_id = cursor.read_u16()?;
        let encoding_id = cursor.read_u16()?;
        let language_id = cursor.read_u16()?;
        let name_id = cursor.read_u16()?;
        let length = cursor.read_u16()? as usize;
        let string_offset = cursor.read_u16()? as usize;

        let Some(id) = StringId::from_name_id(name_id) else {
            continue;
        };
        let Some(encoding) = record_encoding(platform_id, encoding_id, language_id) else {
            continue;
        };
        let start = storage_offset + string_offset;
        let Some(raw) = table.slice(start..start + length) else {
            // a record pointing outside the storage area is dropped, not fatal
            continue;
        };
        let value = match encoding {
            Encoding::Utf8 => String::from_utf8_lossy(raw.as_bytes()).into_owned(),
            Encoding::Utf16Be => crate::strings::decode_utf16_be_lossy(raw.as_bytes()),
        };
        strings.insert(id, value.trim().to_string());
    }
    Ok(strings)
}

/// The platform/encoding/language combinations we retain, and how each
/// one decodes. English-only, matching the semantics of the registry
/// built on top.
fn record_encoding(platform_id: u16, encoding_id: u16, language_id: u16) -> Option<Encoding> {
    match (platform_id, encoding_id, language_id) {
        // Unicode platform, Unicode 1.0 semantics
        (0, 0, 0) => Some(Encoding::Utf8),
        // Macintosh Roman; UTF-8 is a lossy stand-in that covers the
        // ASCII range where nearly all English records live
        (1, 0, 0) => Some(Encoding::Utf8),
        // Windows, US or UK English
        (3, 1, 0x0409 | 0x0809) => Some(Encoding::Utf16Be),
        (3, _, 0x0409 | 0x0809) => Some(Encoding::Utf8),
        _ => None,
    }
}
