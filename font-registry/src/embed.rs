//! Deciding whether a family may be embedded in a document.

use inspect_fonts::{EmbeddingRights, FontRecord};

use crate::database::FontDatabase;
use crate::host::InstalledFontOracle;

/// The embedding decision for one family name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmbeddingState {
    /// The host does not consider the family installed, or no scanned
    /// file backs it.
    NotAvailable,
    /// At least one backing font's rights could not be established.
    Unknown,
    Installable,
    Restricted,
    PreviewAndPrint,
    Editable,
}

impl EmbeddingState {
    /// Whether the family may be permanently embedded into a saved
    /// document.
    ///
    /// Deliberately excludes `PreviewAndPrint`: such fonts may only be
    /// loaded temporarily for display, never written into a document.
    pub fn is_embeddable(self) -> bool {
        matches!(self, Self::Installable | Self::Editable)
    }

    fn from_rights(rights: Option<EmbeddingRights>) -> Self {
        match rights {
            Some(EmbeddingRights::Installable) => Self::Installable,
            Some(EmbeddingRights::Restricted) => Self::Restricted,
            Some(EmbeddingRights::PreviewAndPrint) => Self::PreviewAndPrint,
            Some(EmbeddingRights::Editable) => Self::Editable,
            None => Self::Unknown,
        }
    }
}

/// Computes embedding decisions from database state; holds nothing of
/// its own, so a decision always reflects the registry it was asked
/// against.
pub struct EmbeddabilityResolver<'a> {
    db: &'a FontDatabase,
    oracle: &'a dyn InstalledFontOracle,
}

impl<'a> EmbeddabilityResolver<'a> {
    pub fn new(db: &'a FontDatabase, oracle: &'a dyn InstalledFontOracle) -> Self {
        Self { db, oracle }
    }

    /// The effective embedding state for a family: the most restrictive
    /// rights across every file (and collection member) registered under
    /// the name, gated on the host actually having the family installed.
    pub fn embedding_state(&self, family: &str) -> EmbeddingState {
        if !self.oracle.is_installed(family) {
            return EmbeddingState::NotAvailable;
        }
        let records = self.db.lookup_by_name(family);
        if records.is_empty() {
            return EmbeddingState::NotAvailable;
        }
        let rights = records
            .iter()
            .flat_map(|record| flatten_rights(record));
        EmbeddingState::from_rights(EmbeddingRights::most_restrictive(rights))
    }

    /// True only for families whose fonts may be saved into a document.
    pub fn is_embeddable(&self, family: &str) -> bool {
        self.embedding_state(family).is_embeddable()
    }

    /// Total size in bytes of the files backing a family; members with
    /// no known size contribute zero.
    pub fn total_file_size(&self, family: &str) -> u64 {
        self.db
            .lookup_by_name(family)
            .iter()
            .map(|record| {
                if record.is_collection() {
                    record
                        .children()
                        .iter()
                        .filter_map(FontRecord::file_size)
                        .sum()
                } else {
                    record.file_size().unwrap_or(0)
                }
            })
            .sum()
    }
}

/// The rights of a record, or of each member for a collection record.
fn flatten_rights(record: &FontRecord) -> Vec<Option<EmbeddingRights>> {
    if record.is_collection() {
        record
            .children()
            .iter()
            .map(FontRecord::embedding_rights)
            .collect()
    } else {
        vec![record.embedding_rights()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use font_fixtures::build::{truetype_font, windows_name};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use std::path::Path;

    struct Installed(HashSet<String>);

    impl Installed {
        fn of(families: &[&str]) -> Self {
            Installed(families.iter().map(|f| f.to_string()).collect())
        }
    }

    impl InstalledFontOracle for Installed {
        fn is_installed(&self, family: &str) -> bool {
            self.0.contains(family)
        }
    }

    /// Build a database over one family backed by one file per rights
    /// code (`None` meaning a font without an `OS/2` table).
    fn family_db(dir: &Path, family: &str, rights: &[Option<u16>]) -> FontDatabase {
        for (i, fs_type) in rights.iter().enumerate() {
            let bytes = truetype_font(*fs_type, &[windows_name(1, family)]);
            std::fs::write(dir.join(format!("{family}{i}.ttf")), bytes).unwrap();
        }
        FontDatabase::scan(&[dir.to_path_buf()])
    }

    #[test]
    fn restricted_member_dominates() {
        let tmp = tempfile::tempdir().unwrap();
        let db = family_db(tmp.path(), "Mixed", &[Some(8), Some(2), Some(0)]);
        let installed = Installed::of(&["Mixed"]);
        let resolver = EmbeddabilityResolver::new(&db, &installed);
        assert_eq!(resolver.embedding_state("Mixed"), EmbeddingState::Restricted);
        assert!(!resolver.is_embeddable("Mixed"));
    }

    #[test]
    fn unknown_member_collapses() {
        let tmp = tempfile::tempdir().unwrap();
        let db = family_db(tmp.path(), "Murky", &[Some(8), None]);
        let installed = Installed::of(&["Murky"]);
        let resolver = EmbeddabilityResolver::new(&db, &installed);
        assert_eq!(resolver.embedding_state("Murky"), EmbeddingState::Unknown);
        assert!(!resolver.is_embeddable("Murky"));
    }

    #[test]
    fn editable_over_installable() {
        let tmp = tempfile::tempdir().unwrap();
        let db = family_db(tmp.path(), "Open", &[Some(8), Some(0)]);
        let installed = Installed::of(&["Open"]);
        let resolver = EmbeddabilityResolver::new(&db, &installed);
        assert_eq!(resolver.embedding_state("Open"), EmbeddingState::Editable);
        assert!(resolver.is_embeddable("Open"));
    }

    #[test]
    fn uniform_installable() {
        let tmp = tempfile::tempdir().unwrap();
        let db = family_db(tmp.path(), "Libre", &[Some(0)]);
        let installed = Installed::of(&["Libre"]);
        let resolver = EmbeddabilityResolver::new(&db, &installed);
        assert_eq!(resolver.embedding_state("Libre"), EmbeddingState::Installable);
        assert!(resolver.is_embeddable("Libre"));
    }

    #[test]
    fn preview_and_print_not_embeddable() {
        let tmp = tempfile::tempdir().unwrap();
        let db = family_db(tmp.path(), "Viewer", &[Some(4), Some(8)]);
        let installed = Installed::of(&["Viewer"]);
        let resolver = EmbeddabilityResolver::new(&db, &installed);
        assert_eq!(
            resolver.embedding_state("Viewer"),
            EmbeddingState::PreviewAndPrint
        );
        assert!(!resolver.is_embeddable("Viewer"));
    }

    #[test]
    fn not_installed_or_not_scanned_is_not_available() {
        let tmp = tempfile::tempdir().unwrap();
        let db = family_db(tmp.path(), "Present", &[Some(0)]);

        // scanned but the host does not resolve the name
        let nothing_installed = Installed::of(&[]);
        let no_oracle = EmbeddabilityResolver::new(&db, &nothing_installed);
        assert_eq!(
            no_oracle.embedding_state("Present"),
            EmbeddingState::NotAvailable
        );

        // installed per the host but no file backs it
        let installed = Installed::of(&["Ghost"]);
        let resolver = EmbeddabilityResolver::new(&db, &installed);
        assert_eq!(
            resolver.embedding_state("Ghost"),
            EmbeddingState::NotAvailable
        );
        assert!(!resolver.is_embeddable("Ghost"));
    }

    #[test]
    fn total_file_size_sums_variants() {
        let tmp = tempfile::tempdir().unwrap();
        let a = truetype_font(Some(0), &[windows_name(1, "Sized")]);
        let b = truetype_font(Some(0), &[windows_name(1, "Sized"), windows_name(2, "Bold")]);
        std::fs::write(tmp.path().join("a.ttf"), &a).unwrap();
        std::fs::write(tmp.path().join("b.ttf"), &b).unwrap();
        let db = FontDatabase::scan(&[tmp.path().to_path_buf()]);

        let installed = Installed::of(&["Sized"]);
        let resolver = EmbeddabilityResolver::new(&db, &installed);
        assert_eq!(
            resolver.total_file_size("Sized"),
            (a.len() + b.len()) as u64
        );
        assert_eq!(resolver.total_file_size("Absent"), 0);
    }

    #[test]
    fn foundry_qualified_family_resolves() {
        let tmp = tempfile::tempdir().unwrap();
        let db = family_db(tmp.path(), "Arial", &[Some(0)]);
        let installed = Installed::of(&["Arial [Monotype]", "Arial"]);
        let resolver = EmbeddabilityResolver::new(&db, &installed);
        assert_eq!(
            resolver.embedding_state("Arial [Monotype]"),
            EmbeddingState::Installable
        );
    }
}
