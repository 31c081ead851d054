use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::TranscribeError;

/// Media extensions searched when the caller does not narrow the set.
pub const DEFAULT_FILE_TYPES: &[&str] = &[
    "mp3", "mp4", "wav", "m4a", "webm", "ogg", "flac", "mov", "avi",
];

/// Lists media files under `directory`, case-insensitively matched against
/// `file_types` (extensions, leading dots tolerated). The result is
/// absolute, deduplicated, and sorted.
pub fn find_media_files(
    directory: &Path,
    file_types: &[String],
    recursive: bool,
) -> Result<Vec<PathBuf>, TranscribeError> {
    if !directory.exists() {
        return Err(TranscribeError::DirectoryNotFound(
            directory.display().to_string(),
        ));
    }
    if !directory.is_dir() {
        return Err(TranscribeError::NotADirectory(
            directory.display().to_string(),
        ));
    }

    let extensions: HashSet<String> = file_types
        .iter()
        .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
        .collect();

    let mut walker = WalkDir::new(directory);
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut found = BTreeSet::new();
    for entry in walker.into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.contains(&ext.to_ascii_lowercase()));
        if !matches {
            continue;
        }
        let absolute = entry
            .path()
            .canonicalize()
            .unwrap_or_else(|_| entry.path().to_path_buf());
        found.insert(absolute);
    }

    Ok(found.into_iter().collect())
}

/// The default set as owned strings, for callers taking overrides.
pub fn default_file_types() -> Vec<String> {
    DEFAULT_FILE_TYPES.iter().map(|s| s.to_string()).collect()
}
