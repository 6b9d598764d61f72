//! Path classification for navigation entries

use crate::error::NavigationError;

/// A relative content path split into folder segments and a final file segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedPath {
    /// Every segment except the last
    pub folders: Vec<String>,
    /// Final segment with its extension
    pub file_name: String,
}

impl ClassifiedPath {
    /// Display name: the file segment without its last extension
    pub fn stem(&self) -> &str {
        file_stem(&self.file_name)
    }

    /// Normalized relative path, segments joined with `/`
    pub fn relative_path(&self) -> String {
        let mut joined = self.folders.join("/");
        if !joined.is_empty() {
            joined.push('/');
        }
        joined.push_str(&self.file_name);
        joined
    }

    /// Path of the folder at `depth`: the first `depth + 1` segments joined
    pub fn folder_path(&self, depth: usize) -> String {
        let end = (depth + 1).min(self.folders.len());
        self.folders[..end].join("/")
    }
}

/// Split a path relative to a content root into folder segments and a file segment.
///
/// Both `/` and `\` separate segments; empty and `.` segments are dropped.
/// Matching is case-sensitive.
pub fn classify(relative: &str) -> Result<ClassifiedPath, NavigationError> {
    let mut segments: Vec<String> = relative
        .split(|c| c == '/' || c == '\\')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .map(str::to_string)
        .collect();

    let file_name = segments
        .pop()
        .ok_or_else(|| NavigationError::InvalidPath(relative.to_string()))?;

    Ok(ClassifiedPath {
        folders: segments,
        file_name,
    })
}

/// Strip the last extension. A leading dot is part of the name, not an extension.
fn file_stem(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < file_name.len() => &file_name[..idx],
        _ => file_name,
    }
}
