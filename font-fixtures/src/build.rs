//! Builders for minimal sfnt and ttc byte buffers.
//!
//! The emitted fonts carry only the tables the inspector reads (`OS/2`
//! and `name`); real fonts obviously have more, but nothing else is
//! needed to exercise identification and rights extraction.

/// A growable big-endian byte buffer.
#[derive(Default)]
pub struct BeBuffer {
    data: Vec<u8>,
}

impl BeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_u8(&mut self, value: u8) -> &mut Self {
        self.data.push(value);
        self
    }

    pub fn push_u16(&mut self, value: u16) -> &mut Self {
        self.data.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn push_u32(&mut self, value: u32) -> &mut Self {
        self.data.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn extend(&mut self, bytes: &[u8]) -> &mut Self {
        self.data.extend_from_slice(bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

/// One record of a synthetic `name` table, with the value already in its
/// on-disk encoding.
#[derive(Clone)]
pub struct NameSpec {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    pub value: Vec<u8>,
}

/// A Windows (platform 3) UTF-16BE record, US English.
pub fn windows_name(name_id: u16, value: &str) -> NameSpec {
    NameSpec {
        platform_id: 3,
        encoding_id: 1,
        language_id: 0x0409,
        name_id,
        value: value.encode_utf16().flat_map(u16::to_be_bytes).collect(),
    }
}

/// A Unicode (platform 0) record, encoded as UTF-8 bytes.
pub fn unicode_name(name_id: u16, value: &str) -> NameSpec {
    NameSpec {
        platform_id: 0,
        encoding_id: 0,
        language_id: 0,
        name_id,
        value: value.as_bytes().to_vec(),
    }
}

/// A Macintosh (platform 1) Roman record; ASCII values only.
pub fn mac_name(name_id: u16, value: &str) -> NameSpec {
    NameSpec {
        platform_id: 1,
        encoding_id: 0,
        language_id: 0,
        name_id,
        value: value.as_bytes().to_vec(),
    }
}

/// Serialize a version-0 `name` table.
pub fn name_table(records: &[NameSpec]) -> Vec<u8> {
    name_table_impl(records, None)
}

/// Serialize a version-1 `name` table with `lang_tag_count` (empty)
/// language-tag records before the name records.
pub fn name_table_v1(lang_tag_count: usize, records: &[NameSpec]) -> Vec<u8> {
    name_table_impl(records, Some(lang_tag_count))
}

fn name_table_impl(records: &[NameSpec], lang_tags: Option<usize>) -> Vec<u8> {
    let lang_tag_count = lang_tags.unwrap_or(0);
    let header_len = match lang_tags {
        Some(_) => 6 + 2 + lang_tag_count * 4,
        None => 6,
    };
    let storage_offset = header_len + records.len() * 12;

    let mut buf = BeBuffer::new();
    buf.push_u16(if lang_tags.is_some() { 1 } else { 0 });
    buf.push_u16(records.len() as u16);
    buf.push_u16(storage_offset as u16);
    if lang_tags.is_some() {
        buf.push_u16(lang_tag_count as u16);
        for _ in 0..lang_tag_count {
            buf.push_u16(0); // length
            buf.push_u16(0); // offset
        }
    }
    let mut string_offset = 0usize;
    for record in records {
        buf.push_u16(record.platform_id);
        buf.push_u16(record.encoding_id);
        buf.push_u16(record.language_id);
        buf.push_u16(record.name_id);
        buf.push_u16(record.value.len() as u16);
        buf.push_u16(string_offset as u16);
        string_offset += record.value.len();
    }
    for record in records {
        buf.extend(&record.value);
    }
    buf.into_vec()
}

/// Serialize an `OS/2` table carrying the given `fsType`.
pub fn os2_table(fs_type: u16) -> Vec<u8> {
    let mut buf = BeBuffer::new();
    buf.push_u16(4); // version
    buf.push_u16(500); // xAvgCharWidth
    buf.push_u16(400); // usWeightClass
    buf.push_u16(5); // usWidthClass
    buf.push_u16(fs_type);
    buf.push_u16(0); // ySubscriptXSize, truncated past here
    buf.into_vec()
}

const TT_SFNT_VERSION: u32 = 0x00010000;
const CFF_SFNT_VERSION: u32 = 0x4F54544F;
const TTC_HEADER_TAG: u32 = 0x74746366;

/// Serialize an sfnt whose table directory sits at `base_offset` within
/// the final file. Table record offsets are absolute, as the format
/// requires (this is what makes collection members work).
pub fn sfnt_font(sfnt_version: u32, tables: &[([u8; 4], Vec<u8>)], base_offset: usize) -> Vec<u8> {
    let mut directory = BeBuffer::new();
    directory.push_u32(sfnt_version);
    directory.push_u16(tables.len() as u16);
    directory.push_u16(0); // searchRange
    directory.push_u16(0); // entrySelector
    directory.push_u16(0); // rangeShift

    let header_len = 12 + tables.len() * 16;
    let mut data = BeBuffer::new();
    for (tag, table) in tables {
        let offset = base_offset + header_len + data.len();
        directory.extend(tag);
        directory.push_u32(0); // checksum
        directory.push_u32(offset as u32);
        directory.push_u32(table.len() as u32);
        data.extend(table);
        // pad to the customary 4-byte boundary
        while data.len() % 4 != 0 {
            data.push_u8(0);
        }
    }
    let mut font = directory.into_vec();
    font.extend_from_slice(&data.into_vec());
    font
}

fn identification_tables(fs_type: Option<u16>, names: &[NameSpec]) -> Vec<([u8; 4], Vec<u8>)> {
    let mut tables = Vec::new();
    if let Some(fs_type) = fs_type {
        tables.push((*b"OS/2", os2_table(fs_type)));
    }
    tables.push((*b"name", name_table(names)));
    tables
}

/// A standalone TrueType-flavored font with optional `OS/2` and the
/// given name records.
pub fn truetype_font(fs_type: Option<u16>, names: &[NameSpec]) -> Vec<u8> {
    sfnt_font(TT_SFNT_VERSION, &identification_tables(fs_type, names), 0)
}

/// A standalone CFF-flavored ('OTTO') font.
pub fn cff_font(fs_type: Option<u16>, names: &[NameSpec]) -> Vec<u8> {
    sfnt_font(CFF_SFNT_VERSION, &identification_tables(fs_type, names), 0)
}

/// A TrueType font whose `name` table uses format 1 with
/// `lang_tag_count` language-tag records.
pub fn truetype_font_v1_names(
    fs_type: Option<u16>,
    lang_tag_count: usize,
    names: &[NameSpec],
) -> Vec<u8> {
    let mut tables = Vec::new();
    if let Some(fs_type) = fs_type {
        tables.push((*b"OS/2", os2_table(fs_type)));
    }
    tables.push((*b"name", name_table_v1(lang_tag_count, names)));
    sfnt_font(TT_SFNT_VERSION, &tables, 0)
}

/// A 'ttcf' collection with one member per `(fs_type, names)` entry.
pub fn collection(members: &[(Option<u16>, Vec<NameSpec>)]) -> Vec<u8> {
    collection_impl(members, None)
}

/// Like [`collection`] but declaring one extra member whose offset does
/// not point at a valid table directory.
pub fn collection_with_bad_offset(members: &[(Option<u16>, Vec<NameSpec>)]) -> Vec<u8> {
    collection_impl(members, Some(()))
}

fn collection_impl(members: &[(Option<u16>, Vec<NameSpec>)], bad_member: Option<()>) -> Vec<u8> {
    let declared = members.len() + bad_member.map_or(0, |_| 1);
    let header_len = 12 + declared * 4;

    let mut bodies: Vec<Vec<u8>> = Vec::new();
    let mut offsets: Vec<u32> = Vec::new();
    let mut pos = header_len;
    for (fs_type, names) in members {
        let body = sfnt_font(
            TT_SFNT_VERSION,
            &identification_tables(*fs_type, names),
            pos,
        );
        offsets.push(pos as u32);
        pos += body.len();
        bodies.push(body);
    }
    if bad_member.is_some() {
        // well past the end of the file
        offsets.push((pos + 1024) as u32);
    }

    let mut buf = BeBuffer::new();
    buf.push_u32(TTC_HEADER_TAG);
    buf.push_u32(0x00010000); // header version 1.0
    buf.push_u32(declared as u32);
    for offset in &offsets {
        buf.push_u32(*offset);
    }
    let mut file = buf.into_vec();
    for body in bodies {
        file.extend_from_slice(&body);
    }
    file
}
