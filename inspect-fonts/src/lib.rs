//! Inspecting font files
//!
//! This crate parses the container formats a desktop machine typically
//! has installed — OpenType single fonts (TrueType and CFF outlines),
//! OpenType Collections, and PFB-wrapped Adobe Type 1 fonts — and
//! extracts what is needed to identify a font and decide whether it may
//! be embedded in a document: the format, the informational strings of
//! the `name` table (or Type 1 dictionary), and the embedding-rights
//! bits of `OS/2` `fsType` (or `/FSType`).
//!
//! It deliberately ignores everything else in a font: no outlines, no
//! metrics, no shaping. Parsing never panics and never fails hard; a
//! damaged file degrades to an [`FontFormat::Unknown`] or
//! [`FontFormat::Unreadable`] record.
//!
//! # Example
//!
//! ```no_run
//! use inspect_fonts::{FontRecord, StringId};
//!
//! let record = FontRecord::load("/usr/share/fonts/some_font.ttf");
//! println!(
//!     "{}: {:?} rights {:?}",
//!     record.string(StringId::FAMILY).unwrap_or("?"),
//!     record.format(),
//!     record.embedding_rights(),
//! );
//! ```

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod font_data;
mod read;
mod record;
pub mod rights;
mod sfnt;
pub mod strings;
mod type1;

pub use font_data::{ByteOrder, Cursor, Encoding, FontData};
pub use read::ReadError;
pub use record::{FontFormat, FontRecord};
pub use rights::EmbeddingRights;
pub use sfnt::{CFF_SFNT_VERSION, TTC_HEADER_TAG, TT_SFNT_VERSION};
pub use strings::StringId;
