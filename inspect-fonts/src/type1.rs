//! Adobe Type 1 (PFB) parsing
//!
//! A PFB file wraps PostScript text in binary segments. Only the clear
//! text dictionary before `eexec` is examined; the encrypted portion and
//! the charstrings are of no interest here.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::font_data::{ByteOrder, FontData};
use crate::read::ReadError;
use crate::rights::EmbeddingRights;
use crate::strings::StringId;

pub(crate) struct Type1Font {
    pub(crate) embedding_rights: Option<EmbeddingRights>,
    pub(crate) strings: BTreeMap<StringId, String>,
}

/// Try to parse the data as a PFB-wrapped Type 1 font.
pub(crate) fn parse(data: FontData) -> Result<Type1Font, ReadError> {
    let mut cursor = data.cursor();
    if cursor.read_u8()? != 0x80 {
        return Err(ReadError::UnsupportedFormat);
    }
    // segment type 1 is ASCII text
    if cursor.read_u8()? != 0x01 {
        return Err(ReadError::UnsupportedFormat);
    }
    // segment length; read but not validated against the actual payload
    cursor.set_byte_order(ByteOrder::LittleEndian);
    let _segment_len = cursor.read_u32()?;
    cursor.set_byte_order(ByteOrder::Network);
    let text_start = cursor.tell();
    if cursor.read_bytes(2)? != b"%!" {
        return Err(ReadError::UnsupportedFormat);
    }

    let text = &data.as_bytes()[text_start..];
    let mut font = Type1Font {
        embedding_rights: None,
        strings: BTreeMap::new(),
    };
    scan_dictionary(text, &mut font);
    Ok(font)
}

/// Walk the clear-text lines: skip the leading comment run, then take
/// the first occurrence of each known dictionary entry, stopping at
/// `eexec`.
fn scan_dictionary(text: &[u8], font: &mut Type1Font) {
    let mut in_comments = true;
    for raw_line in Lines::new(text) {
        let line = String::from_utf8_lossy(raw_line);
        if in_comments {
            if raw_line.is_empty() || raw_line[0] == b'%' {
                continue;
            }
            in_comments = false;
        }
        if line.contains("eexec") {
            return;
        }
        if let Some(caps) = font_name_re().captures(&line) {
            set_first(&mut font.strings, StringId::POSTSCRIPT_NAME, &caps[1]);
        } else if let Some(caps) = unique_id_re().captures(&line) {
            set_first(&mut font.strings, StringId::UNIQUE_ID, &caps[1]);
        } else if let Some(caps) = version_re().captures(&line) {
            set_first(&mut font.strings, StringId::VERSION, &caps[1]);
        } else if let Some(caps) = notice_re().captures(&line) {
            set_first(&mut font.strings, StringId::COPYRIGHT, &caps[1]);
        } else if let Some(caps) = full_name_re().captures(&line) {
            set_first(&mut font.strings, StringId::FULL_NAME, &caps[1]);
        } else if let Some(caps) = family_name_re().captures(&line) {
            set_first(&mut font.strings, StringId::FAMILY, &caps[1]);
        } else if let Some(caps) = fs_type_re().captures(&line) {
            if font.embedding_rights.is_none() {
                font.embedding_rights = caps[1]
                    .parse::<u16>()
                    .ok()
                    .and_then(EmbeddingRights::from_bits);
            }
        }
    }
}

fn set_first(strings: &mut BTreeMap<StringId, String>, id: StringId, value: &str) {
    strings.entry(id).or_insert_with(|| value.trim().to_string());
}

macro_rules! dict_regex {
    ($name:ident, $pattern:literal) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($pattern).unwrap())
        }
    };
}

dict_regex!(font_name_re, r"^/FontName\s+/(\S+)\s+def");
dict_regex!(unique_id_re, r"^/UniqueID\s+(\d+)\s+def");
dict_regex!(version_re, r"^\s*/version\s+\((.*)\)\s*readonly\s+def");
dict_regex!(notice_re, r"^\s*/Notice\s+\((.*)\)\s*readonly\s+def");
dict_regex!(full_name_re, r"^\s*/FullName\s+\((.*)\)\s*readonly\s+def");
dict_regex!(family_name_re, r"^\s*/FamilyName\s+\((.*)\)\s*readonly\s+def");
dict_regex!(fs_type_re, r"^\s*/FSType\s+(\d+)");

/// Iterator over lines delimited by `\n`, `\r` or `\r\n`.
struct Lines<'a> {
    rest: &'a [u8],
}

impl<'a> Lines<'a> {
    fn new(text: &'a [u8]) -> Self {
        Lines { rest: text }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let end = self
            .rest
            .iter()
            .position(|&b| b == b'\n' || b == b'\r')
            .unwrap_or(self.rest.len());
        let line = &self.rest[..end];
        let mut next = end;
        if next < self.rest.len() {
            if self.rest[next] == b'\r'
                && self.rest.get(next + 1) == Some(&b'\n')
            {
                next += 1;
            }
            next += 1;
        }
        self.rest = &self.rest[next..];
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_delimiters() {
        let text = b"one\ntwo\rthree\r\nfour";
        let lines: Vec<&[u8]> = Lines::new(text).collect();
        assert_eq!(
            lines,
            [&b"one"[..], &b"two"[..], &b"three"[..], &b"four"[..]]
        );
    }

    #[test]
    fn first_occurrence_wins() {
        let mut font = Type1Font {
            embedding_rights: None,
            strings: BTreeMap::new(),
        };
        scan_dictionary(
            b"%!PS-AdobeFont-1.0\n/FontName /First def\n/FontName /Second def\n",
            &mut font,
        );
        assert_eq!(
            font.strings.get(&StringId::POSTSCRIPT_NAME).map(String::as_str),
            Some("First")
        );
    }

    #[test]
    fn stops_at_eexec() {
        let mut font = Type1Font {
            embedding_rights: None,
            strings: BTreeMap::new(),
        };
        scan_dictionary(
            b"%!PS-AdobeFont-1.0\ncurrentfile eexec\n/FontName /Hidden def\n",
            &mut font,
        );
        assert!(font.strings.is_empty());
    }
}
