//! Directory listing for chapter groups and chapters.
//!
//! The chapters root holds one level of group directories, each of which holds
//! one level of chapter directories. Listings are never cached: every call
//! reads the filesystem again so changes between navigations show up.

use crate::error::FilesystemError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A named directory (a group or a chapter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Final path component
    pub name: String,
    /// Full path to the directory
    pub path: PathBuf,
}

impl Entry {
    /// Creates an entry from a directory path, using its final component as the name.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }
}

/// Lists the immediate subdirectories of `path`, sorted by name.
///
/// Plain files are skipped. Symlinks to directories count as directories.
pub fn list_entries(path: &Path) -> Result<Vec<Entry>, FilesystemError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => FilesystemError::NotFound {
            path: path.to_path_buf(),
        },
        _ => FilesystemError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    if !metadata.is_dir() {
        return Err(FilesystemError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    let read_err = |source| FilesystemError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(path).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let entry_path = entry.path();
        if !entry_path.is_dir() {
            continue;
        }
        entries.push(Entry {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry_path,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    debug!(path = %path.display(), count = entries.len(), "listed directory");

    Ok(entries)
}

/// Lists the groups below the chapters root.
pub fn list_groups(root: &Path) -> Result<Vec<Entry>, FilesystemError> {
    list_entries(root)
}

/// Lists the chapters inside a group.
pub fn list_chapters(group: &Entry) -> Result<Vec<Entry>, FilesystemError> {
    list_entries(&group.path)
}

/// Finds a chapter by group and chapter name.
pub fn find_chapter(root: &Path, group: &str, chapter: &str) -> Result<Entry, FilesystemError> {
    let group_entry = list_groups(root)?
        .into_iter()
        .find(|g| g.name == group)
        .ok_or_else(|| FilesystemError::NotFound {
            path: root.join(group),
        })?;

    list_chapters(&group_entry)?
        .into_iter()
        .find(|c| c.name == chapter)
        .ok_or_else(|| FilesystemError::NotFound {
            path: group_entry.path.join(chapter),
        })
}

/// A group together with its chapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupListing {
    /// Group name
    pub name: String,
    /// Group path
    pub path: PathBuf,
    /// Chapters inside the group, sorted by name
    pub chapters: Vec<Entry>,
}

/// Snapshot of the whole chapters tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Chapters root that was scanned
    pub root: PathBuf,
    /// Groups sorted by name
    pub groups: Vec<GroupListing>,
}

impl Catalog {
    /// Scans the chapters root and every group below it.
    pub fn scan(root: &Path) -> Result<Self, FilesystemError> {
        let groups = list_groups(root)?
            .into_iter()
            .map(|group| {
                let chapters = list_chapters(&group)?;
                Ok(GroupListing {
                    name: group.name,
                    path: group.path,
                    chapters,
                })
            })
            .collect::<Result<Vec<_>, FilesystemError>>()?;

        Ok(Self {
            root: root.to_path_buf(),
            groups,
        })
    }

    /// Total number of chapters across all groups.
    pub fn chapter_count(&self) -> usize {
        self.groups.iter().map(|g| g.chapters.len()).sum()
    }
}
