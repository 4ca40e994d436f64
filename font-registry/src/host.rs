//! Contracts for the host collaborators.
//!
//! The registry does not know how a platform stores its fonts or which
//! families the host toolkit considers installed; both are supplied from
//! outside through these traits.

use std::path::{Path, PathBuf};

/// Supplies the directories a [`FontDatabase`](crate::FontDatabase) scan
/// should walk.
///
/// Non-existent directories are acceptable; the scan skips them.
pub trait SearchPathProvider {
    fn font_directories(&self) -> Vec<PathBuf>;
}

impl<T: AsRef<Path>> SearchPathProvider for [T] {
    fn font_directories(&self) -> Vec<PathBuf> {
        self.iter().map(|p| p.as_ref().to_path_buf()).collect()
    }
}

impl<T: AsRef<Path>, const N: usize> SearchPathProvider for [T; N] {
    fn font_directories(&self) -> Vec<PathBuf> {
        self.as_slice().font_directories()
    }
}

impl<T: AsRef<Path>> SearchPathProvider for Vec<T> {
    fn font_directories(&self) -> Vec<PathBuf> {
        self.as_slice().font_directories()
    }
}

/// Answers whether the platform's own font registry currently resolves a
/// family name to a usable installed font.
///
/// Only the embeddability resolver consults this; the database itself
/// never does.
pub trait InstalledFontOracle {
    fn is_installed(&self, family: &str) -> bool;
}

/// The conventional system font directories for the current platform.
///
/// A convenience for building a [`SearchPathProvider`]; embedders with a
/// richer notion of font locations (user-configured additions, toolkit
/// standard paths) supply their own list instead.
pub fn platform_font_directories() -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    if cfg!(target_os = "windows") {
        dirs.push(PathBuf::from(r"c:\windows\fonts"));
    } else if cfg!(target_os = "macos") {
        for dir in [
            "/Library/Fonts",
            "/Network/Library/Fonts",
            "/System/Library/Fonts",
            "/opt/local/share/fonts",
        ] {
            dirs.push(PathBuf::from(dir));
        }
    } else {
        dirs.push(PathBuf::from("/usr/share/fonts"));
        dirs.push(PathBuf::from("/usr/local/share/fonts"));
        if let Some(home) = std::env::var_os("HOME") {
            let home = PathBuf::from(home);
            dirs.push(home.join(".local/share/fonts"));
            dirs.push(home.join(".fonts"));
        }
    }
    dirs
}
