//! Structured description of one physical font resource

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::font_data::FontData;
use crate::read::ReadError;
use crate::rights::EmbeddingRights;
use crate::sfnt;
use crate::strings::StringId;
use crate::type1;

/// The container format of a font resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFormat {
    /// The file could not be opened, or was empty.
    Unreadable,
    /// Bytes were read but no signature was recognized.
    Unknown,
    /// OpenType with TrueType outlines (sfnt version 1.0).
    OpenTypeTrueType,
    /// OpenType with CFF outlines ('OTTO').
    OpenTypeCff,
    /// OpenType Collection ('ttcf').
    OpenTypeCollection,
    /// Adobe Type 1 in PFB wrapping.
    Type1,
}

impl FontFormat {
    pub fn label(self) -> &'static str {
        match self {
            Self::Unreadable => "Not readable",
            Self::Unknown => "Unknown",
            Self::OpenTypeTrueType => "OpenType (TrueType)",
            Self::OpenTypeCff => "OpenType (Compact Font Format)",
            Self::OpenTypeCollection => "OpenType (Collection)",
            Self::Type1 => "Type1",
        }
    }
}

/// One parsed font resource.
///
/// A record is immutable once constructed; re-reading a file produces a
/// fresh record. Exactly one of two shapes holds: a simple font carries
/// its own strings and rights and no children, while a collection
/// carries children (each a simple record) and aggregates their rights,
/// with no strings of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct FontRecord {
    source_path: PathBuf,
    format: FontFormat,
    embedding_rights: Option<EmbeddingRights>,
    strings: BTreeMap<StringId, String>,
    file_size: Option<u64>,
    file_modified: Option<u64>,
    children: Vec<FontRecord>,
}

impl FontRecord {
    /// Read and parse a font file.
    ///
    /// Never fails: an unopenable or empty file yields an `Unreadable`
    /// record, unrecognized content an `Unknown` one.
    pub fn load(path: impl AsRef<Path>) -> FontRecord {
        let path = path.as_ref();
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                log::debug!("unreadable font file {}: {err}", path.display());
                return FontRecord::empty(path.to_path_buf(), FontFormat::Unreadable);
            }
        };
        let file_modified = std::fs::metadata(path)
            .and_then(|meta| meta.modified())
            .ok()
            .and_then(|mtime| mtime.duration_since(UNIX_EPOCH).ok())
            .map(|age| age.as_secs());
        Self::parse_impl(&bytes, path.to_path_buf(), file_modified)
    }

    /// Parse an in-memory byte blob, e.g. a font extracted from a saved
    /// document. `origin` names where the bytes came from and may be
    /// empty.
    pub fn parse(bytes: &[u8], origin: impl Into<PathBuf>) -> FontRecord {
        Self::parse_impl(bytes, origin.into(), None)
    }

    fn parse_impl(bytes: &[u8], source_path: PathBuf, file_modified: Option<u64>) -> FontRecord {
        if bytes.is_empty() {
            return FontRecord::empty(source_path, FontFormat::Unreadable);
        }
        let data = FontData::new(bytes);
        let file_size = Some(bytes.len() as u64);

        // each attempt starts from offset 0 on its own cursor
        match sfnt::parse_single(data) {
            Ok(font) => {
                return FontRecord {
                    source_path,
                    format: if font.is_cff {
                        FontFormat::OpenTypeCff
                    } else {
                        FontFormat::OpenTypeTrueType
                    },
                    embedding_rights: font.embedding_rights,
                    strings: font.strings,
                    file_size,
                    file_modified,
                    children: Vec::new(),
                };
            }
            Err(ReadError::UnsupportedFormat) | Err(ReadError::TruncatedData) => {}
            Err(err) => {
                log::debug!("sfnt parse failed for {}: {err}", source_path.display());
            }
        }
        if let Ok(children) = parse_collection(data, &source_path) {
            let embedding_rights = EmbeddingRights::most_restrictive(
                children.iter().map(|child| child.embedding_rights),
            );
            return FontRecord {
                source_path,
                format: FontFormat::OpenTypeCollection,
                embedding_rights,
                strings: BTreeMap::new(),
                // a collection has no own size; totals come from children
                file_size: None,
                file_modified,
                children,
            };
        }
        if let Ok(font) = type1::parse(data) {
            return FontRecord {
                source_path,
                format: FontFormat::Type1,
                embedding_rights: font.embedding_rights,
                strings: font.strings,
                file_size,
                file_modified,
                children: Vec::new(),
            };
        }
        FontRecord::empty(source_path, FontFormat::Unknown)
    }

    fn empty(source_path: PathBuf, format: FontFormat) -> FontRecord {
        FontRecord {
            source_path,
            format,
            embedding_rights: None,
            strings: BTreeMap::new(),
            file_size: None,
            file_modified: None,
            children: Vec::new(),
        }
    }

    /// The file this record was read from; empty for ad-hoc byte blobs.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn format(&self) -> FontFormat {
        self.format
    }

    /// The font's declared embedding rights, `None` when indeterminate.
    /// For collections this is the most-restrictive aggregate over the
    /// children.
    pub fn embedding_rights(&self) -> Option<EmbeddingRights> {
        self.embedding_rights
    }

    pub fn strings(&self) -> &BTreeMap<StringId, String> {
        &self.strings
    }

    pub fn string(&self, id: StringId) -> Option<&str> {
        self.strings.get(&id).map(String::as_str)
    }

    /// Size in bytes of the source data; `None` for collections and
    /// unreadable files.
    pub fn file_size(&self) -> Option<u64> {
        self.file_size
    }

    /// Modification time of the source file in seconds since the epoch,
    /// when known.
    pub fn file_modified(&self) -> Option<u64> {
        self.file_modified
    }

    /// Member fonts of a collection; empty for every other format.
    pub fn children(&self) -> &[FontRecord] {
        &self.children
    }

    pub fn is_collection(&self) -> bool {
        self.format == FontFormat::OpenTypeCollection
    }

    /// The name a registry should index this font under: family name,
    /// else typographic family, else full name.
    pub fn family_key(&self) -> Option<&str> {
        self.string(StringId::FAMILY)
            .or_else(|| self.string(StringId::TYPOGRAPHIC_FAMILY))
            .or_else(|| self.string(StringId::FULL_NAME))
    }
}

/// Parse a 'ttcf' header and each member font it points at.
///
/// A member whose offset does not hold a valid table directory is
/// skipped; only the header itself failing aborts the attempt.
fn parse_collection(data: FontData, source_path: &Path) -> Result<Vec<FontRecord>, ReadError> {
    let mut cursor = data.cursor();
    if cursor.read_u32()? != sfnt::TTC_HEADER_TAG {
        return Err(ReadError::UnsupportedFormat);
    }
    let _version = cursor.read_u32()?;
    let num_fonts = cursor.read_u32()? as usize;
    if num_fonts * 4 > cursor.remaining() {
        return Err(ReadError::TruncatedData);
    }
    let mut offsets = Vec::with_capacity(num_fonts);
    for _ in 0..num_fonts {
        offsets.push(cursor.read_u32()? as usize);
    }

    let mut children = Vec::new();
    for offset in offsets {
        match sfnt::parse_at(data, offset) {
            Ok(font) => children.push(FontRecord {
                source_path: source_path.to_path_buf(),
                format: if font.is_cff {
                    FontFormat::OpenTypeCff
                } else {
                    FontFormat::OpenTypeTrueType
                },
                embedding_rights: font.embedding_rights,
                strings: font.strings,
                file_size: None,
                file_modified: None,
                children: Vec::new(),
            }),
            Err(err) => {
                log::debug!(
                    "skipping collection member at offset {offset} in {}: {err}",
                    source_path.display()
                );
            }
        }
    }
    Ok(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use font_fixtures::build::{mac_name, unicode_name, windows_name, NameSpec};
    use pretty_assertions::assert_eq;

    fn truetype(fs_type: Option<u16>, names: &[NameSpec]) -> Vec<u8> {
        font_fixtures::build::truetype_font(fs_type, names)
    }

    #[test]
    fn empty_input_is_unreadable() {
        let record = FontRecord::parse(&[], "");
        assert_eq!(record.format(), FontFormat::Unreadable);
        assert!(record.strings().is_empty());
        assert_eq!(record.embedding_rights(), None);
    }

    #[test]
    fn garbage_is_unknown() {
        let record = FontRecord::parse(font_fixtures::GARBAGE, "");
        assert_eq!(record.format(), FontFormat::Unknown);
        assert!(record.strings().is_empty());
        assert_eq!(record.embedding_rights(), None);
    }

    #[test]
    fn bare_signature_keeps_format() {
        // 4 valid signature bytes and nothing else must neither fail nor
        // fall through to another format
        let record = FontRecord::parse(font_fixtures::BARE_TRUETYPE_SIGNATURE, "");
        assert_eq!(record.format(), FontFormat::OpenTypeTrueType);
        assert!(record.strings().is_empty());
        assert_eq!(record.embedding_rights(), None);
    }

    #[test]
    fn fs_type_low_bits() {
        for (raw, expected) in [
            (0x0000, Some(EmbeddingRights::Installable)),
            (0x0002, Some(EmbeddingRights::Restricted)),
            (0x0004, Some(EmbeddingRights::PreviewAndPrint)),
            (0x0008, Some(EmbeddingRights::Editable)),
            // high bits (e.g. bitmap-only) are masked off
            (0x0208, Some(EmbeddingRights::Editable)),
            // an unexpected low-bit pattern carries no information
            (0x0006, None),
        ] {
            let record = FontRecord::parse(&truetype(Some(raw), &[]), "");
            assert_eq!(record.embedding_rights(), expected, "fsType {raw:#06x}");
        }
    }

    #[test]
    fn missing_os2_is_indeterminate() {
        let record = FontRecord::parse(&truetype(None, &[windows_name(1, "NoOs2")]), "");
        assert_eq!(record.format(), FontFormat::OpenTypeTrueType);
        assert_eq!(record.embedding_rights(), None);
        assert_eq!(record.string(StringId::FAMILY), Some("NoOs2"));
    }

    #[test]
    fn cff_signature() {
        let record = FontRecord::parse(
            &font_fixtures::build::cff_font(Some(0), &[windows_name(1, "Otto")]),
            "",
        );
        assert_eq!(record.format(), FontFormat::OpenTypeCff);
        assert_eq!(record.string(StringId::FAMILY), Some("Otto"));
    }

    #[test]
    fn name_records_decode_and_trim() {
        let names = [
            windows_name(0, "© 2024 Example"),
            windows_name(1, "  Example Sans  "),
            unicode_name(4, "Example Sans Regular"),
            mac_name(6, "ExampleSans-Regular"),
            windows_name(16, "Example"),
        ];
        let record = FontRecord::parse(&truetype(Some(0), &names), "");
        assert_eq!(record.string(StringId::COPYRIGHT), Some("© 2024 Example"));
        assert_eq!(record.string(StringId::FAMILY), Some("Example Sans"));
        assert_eq!(record.string(StringId::FULL_NAME), Some("Example Sans Regular"));
        assert_eq!(
            record.string(StringId::POSTSCRIPT_NAME),
            Some("ExampleSans-Regular")
        );
        assert_eq!(record.string(StringId::TYPOGRAPHIC_FAMILY), Some("Example"));
    }

    #[test]
    fn unsupported_name_ids_and_languages_ignored() {
        let mut french = windows_name(1, "Exemple");
        french.language_id = 0x040C;
        let names = [
            french,
            NameSpec {
                platform_id: 3,
                encoding_id: 1,
                language_id: 0x0409,
                name_id: 19, // sample text, not in the supported set
                value: "abc".encode_utf16().flat_map(u16::to_be_bytes).collect(),
            },
        ];
        let record = FontRecord::parse(&truetype(Some(0), &names), "");
        assert!(record.strings().is_empty());
    }

    #[test]
    fn later_name_record_wins() {
        let names = [windows_name(1, "First Family"), windows_name(1, "Second Family")];
        let record = FontRecord::parse(&truetype(Some(0), &names), "");
        assert_eq!(record.string(StringId::FAMILY), Some("Second Family"));
    }

    #[test]
    fn version_1_name_table_lang_tags_skipped() {
        let bytes = font_fixtures::build::truetype_font_v1_names(
            Some(0),
            2, // two language-tag records to skip
            &[windows_name(1, "Tagged")],
        );
        let record = FontRecord::parse(&bytes, "");
        assert_eq!(record.string(StringId::FAMILY), Some("Tagged"));
    }

    #[test]
    fn parse_is_pure() {
        let bytes = truetype(Some(8), &[windows_name(1, "Twice"), windows_name(2, "Bold")]);
        let first = FontRecord::parse(&bytes, "x.ttf");
        let second = FontRecord::parse(&bytes, "x.ttf");
        assert_eq!(first, second);
    }

    #[test]
    fn collection_children_and_aggregate() {
        let bytes = font_fixtures::build::collection(&[
            (Some(0), vec![windows_name(1, "Alpha")]),
            (Some(4), vec![windows_name(1, "Beta")]),
        ]);
        let record = FontRecord::parse(&bytes, "pair.ttc");
        assert_eq!(record.format(), FontFormat::OpenTypeCollection);
        assert!(record.strings().is_empty());
        assert_eq!(record.children().len(), 2);
        assert_eq!(record.children()[0].string(StringId::FAMILY), Some("Alpha"));
        assert_eq!(record.children()[1].string(StringId::FAMILY), Some("Beta"));
        assert!(record.children().iter().all(|child| child.children().is_empty()));
        // Preview & Print child dominates the Installable one
        assert_eq!(
            record.embedding_rights(),
            Some(EmbeddingRights::PreviewAndPrint)
        );
    }

    #[test]
    fn collection_bad_member_offset_omitted() {
        let bytes = font_fixtures::build::collection_with_bad_offset(&[(
            Some(0),
            vec![windows_name(1, "Solo")],
        )]);
        let record = FontRecord::parse(&bytes, "partial.ttc");
        assert_eq!(record.format(), FontFormat::OpenTypeCollection);
        // declared two members, one offset points at garbage
        assert_eq!(record.children().len(), 1);
        assert_eq!(record.children()[0].string(StringId::FAMILY), Some("Solo"));
    }

    #[test]
    fn collection_with_indeterminate_member() {
        let bytes = font_fixtures::build::collection(&[
            (Some(8), vec![windows_name(1, "Known")]),
            (None, vec![windows_name(1, "Mystery")]),
        ]);
        let record = FontRecord::parse(&bytes, "");
        assert_eq!(record.embedding_rights(), None);
    }

    #[test]
    fn type1_dictionary() {
        let record = FontRecord::parse(font_fixtures::TYPE1_SAMPLE, "sample.pfb");
        assert_eq!(record.format(), FontFormat::Type1);
        assert_eq!(record.string(StringId::POSTSCRIPT_NAME), Some("TestSans-Regular"));
        assert_eq!(record.string(StringId::FAMILY), Some("Test Sans"));
        assert_eq!(record.string(StringId::FULL_NAME), Some("Test Sans Regular"));
        assert_eq!(record.string(StringId::VERSION), Some("001.000"));
        assert_eq!(record.string(StringId::COPYRIGHT), Some("Copyright 2024 Example"));
        assert_eq!(record.string(StringId::UNIQUE_ID), Some("4038411"));
        assert_eq!(record.embedding_rights(), Some(EmbeddingRights::Editable));
    }

    #[test]
    fn type1_without_fs_type_is_indeterminate() {
        let record = FontRecord::parse(font_fixtures::TYPE1_NO_FSTYPE, "plain.pfb");
        assert_eq!(record.format(), FontFormat::Type1);
        assert_eq!(record.embedding_rights(), None);
    }

    #[test]
    fn family_key_fallback_chain() {
        let with_family = FontRecord::parse(&truetype(None, &[windows_name(1, "A")]), "");
        assert_eq!(with_family.family_key(), Some("A"));

        let typographic_only = FontRecord::parse(&truetype(None, &[windows_name(16, "B")]), "");
        assert_eq!(typographic_only.family_key(), Some("B"));

        let full_name_only = FontRecord::parse(&truetype(None, &[windows_name(4, "C")]), "");
        assert_eq!(full_name_only.family_key(), Some("C"));

        let nameless = FontRecord::parse(&truetype(None, &[]), "");
        assert_eq!(nameless.family_key(), None);
    }

    #[test]
    fn ad_hoc_blob_records_size() {
        let bytes = truetype(Some(0), &[]);
        let record = FontRecord::parse(&bytes, "");
        assert_eq!(record.file_size(), Some(bytes.len() as u64));
        assert_eq!(record.file_modified(), None);
        assert_eq!(record.source_path(), Path::new(""));
    }
}
