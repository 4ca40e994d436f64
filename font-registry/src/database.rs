//! The scanned-font registry and its two indices.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use inspect_fonts::{FontFormat, FontRecord};

use crate::host::SearchPathProvider;

/// File extensions the scan considers font files, without the dot.
pub const FONT_EXTENSIONS: [&str; 5] = ["ttf", "ttc", "otf", "otc", "pfb"];

static GLOBAL: OnceLock<FontDatabase> = OnceLock::new();

/// An index of every parseable font found under a set of directories.
///
/// Once built, a database is read only; it can be shared freely across
/// threads and re-scanning means building a new instance. The by-name
/// index maps one logical family to however many physical variants were
/// found (regular, bold, collection members and so on), in discovery
/// order.
pub struct FontDatabase {
    by_name: HashMap<String, Vec<Arc<FontRecord>>>,
    by_path: HashMap<PathBuf, Arc<FontRecord>>,
    search_paths: Vec<PathBuf>,
}

impl FontDatabase {
    /// Walk the provider's directories and build a fresh registry.
    ///
    /// Unreadable files and directories are skipped, never fatal; in the
    /// worst case the registry comes back empty.
    pub fn scan(provider: &(impl SearchPathProvider + ?Sized)) -> FontDatabase {
        let search_paths = provider.font_directories();
        let mut db = FontDatabase {
            by_name: HashMap::new(),
            by_path: HashMap::new(),
            search_paths,
        };
        for dir in db.search_paths.clone() {
            db.scan_directory(&dir);
        }
        log::debug!(
            "font scan complete: {} paths, {} family names",
            db.by_path.len(),
            db.by_name.len()
        );
        db
    }

    /// The process-wide registry, built by whichever caller gets here
    /// first. Later callers' providers are ignored; everyone observes
    /// the same fully-built instance.
    pub fn global(provider: &(impl SearchPathProvider + ?Sized)) -> &'static FontDatabase {
        GLOBAL.get_or_init(|| FontDatabase::scan(provider))
    }

    fn scan_directory(&mut self, dir: &Path) {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                log::debug!("skipping font directory {}: {err}", dir.display());
                return;
            }
        };
        for entry in entries {
            let Ok(entry) = entry else { continue };
            let path = entry.path();
            if path.is_dir() {
                self.scan_directory(&path);
            } else if has_font_extension(&path) {
                self.add_file(&path);
            }
        }
    }

    fn add_file(&mut self, path: &Path) {
        let record = FontRecord::load(path);
        match record.format() {
            FontFormat::Unreadable | FontFormat::Unknown => {
                log::debug!("not a usable font, skipping: {}", path.display());
                return;
            }
            _ => {}
        }
        let record = Arc::new(record);
        self.index_by_name(&record);
        self.by_path.insert(normalize(path), record);
    }

    fn index_by_name(&mut self, record: &Arc<FontRecord>) {
        if record.is_collection() {
            // the collection itself is only reachable by path; each
            // member is indexed under its own name
            for child in record.children() {
                let child = Arc::new(child.clone());
                self.index_by_name(&child);
            }
        } else if let Some(name) = record.family_key() {
            self.by_name
                .entry(name.to_string())
                .or_default()
                .push(Arc::clone(record));
        }
    }

    /// All records registered under a family name, in discovery order.
    ///
    /// An exact match is tried first; failing that, a foundry-qualified
    /// name of the form `Base [Foundry]` falls back to `Base`. An empty
    /// slice means the name is unknown either way.
    pub fn lookup_by_name(&self, name: &str) -> &[Arc<FontRecord>] {
        if let Some(records) = self.by_name.get(name) {
            return records;
        }
        if let Some(base) = foundry_base(name) {
            if let Some(records) = self.by_name.get(base) {
                return records;
            }
        }
        &[]
    }

    pub fn lookup_by_path(&self, path: &Path) -> Option<&FontRecord> {
        self.by_path.get(&normalize(path)).map(Arc::as_ref)
    }

    pub fn family_names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.by_path.keys().map(PathBuf::as_path)
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

fn has_font_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            FONT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Stable key for the by-path index. Canonicalization coalesces
/// symlinked duplicates when it succeeds; otherwise the path is used as
/// given.
fn normalize(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Strip a trailing bracketed foundry qualifier: `Arial [Monotype]` →
/// `Arial`.
fn foundry_base(name: &str) -> Option<&str> {
    let stripped = name.strip_suffix(']')?;
    let open = stripped.rfind(" [")?;
    let foundry = &stripped[open + 2..];
    if foundry.is_empty() || foundry.contains(']') {
        return None;
    }
    Some(&stripped[..open])
}
