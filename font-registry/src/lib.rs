//! A registry of the fonts installed on the host, with embedding-rights
//! resolution on top.
//!
//! [`FontDatabase`] walks a set of directories, parses every font file it
//! recognizes with [`inspect_fonts`], and indexes the results by family
//! name and by path. [`EmbeddabilityResolver`] then answers, for a family
//! name, whether its fonts may legally be embedded in a document, taking
//! the most restrictive rights across all files backing the name.
//!
//! The database is a snapshot: scanning is the only mutation, and a
//! process-wide lazily scanned instance is available through
//! [`FontDatabase::global`].

#![forbid(unsafe_code)]

mod database;
mod embed;
mod host;

pub use database::{FontDatabase, FONT_EXTENSIONS};
pub use embed::{EmbeddabilityResolver, EmbeddingState};
pub use host::{platform_font_directories, InstalledFontOracle, SearchPathProvider};

pub use inspect_fonts::{EmbeddingRights, FontFormat, FontRecord, StringId};
