//! Batch queue helpers: folder scans, index selection and listings.
//!
//! A listing is the newline-delimited form of a scan result, so one scan can
//! feed many renders that each pick their file by index.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::keyword::keyword_enum;
use crate::source::expand_path;

/// Pattern used when none is given.
pub const DEFAULT_PATTERN: &str = "*.pdb";

keyword_enum! {
    /// File attribute a scan is ordered by.
    pub enum SortKey {
        /// File name, ignoring case.
        Name => "name",
        /// Last modification time.
        Modified => "date_modified",
        /// Creation time (modification time where unsupported).
        Created => "date_created",
        /// Size in bytes.
        Size => "size",
    }
}

keyword_enum! {
    /// Scan ordering direction.
    pub enum SortOrder {
        /// Smallest / oldest / first name first.
        Ascending => "ascending",
        /// Reverse of ascending.
        Descending => "descending",
    }
}

// ── Errors ──

/// Folder scan failure.
#[derive(Debug)]
pub enum ScanError {
    /// The folder does not exist or is not a directory.
    FolderNotFound {
        /// Expanded, absolute folder path.
        path: PathBuf,
    },
    /// Nothing in the folder matched.
    NoMatches {
        /// Folder scanned.
        folder: PathBuf,
        /// Pattern applied.
        pattern: String,
    },
    /// Reading the folder or a file's metadata failed.
    Io {
        /// Path involved.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FolderNotFound { path } => {
                write!(f, "folder not found: {}", path.display())
            }
            Self::NoMatches { folder, pattern } => {
                write!(
                    f,
                    "no files matching '{pattern}' in {}",
                    folder.display()
                )
            }
            Self::Io { path, source } => {
                write!(f, "{}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Selection index past the end of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexError {
    /// Requested index.
    pub index: usize,
    /// Number of entries available.
    pub total_count: usize,
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total_count == 0 {
            write!(f, "index {} requested from an empty list", self.index)
        } else {
            write!(
                f,
                "index {} out of range for {} entries (valid: 0..={})",
                self.index,
                self.total_count,
                self.total_count - 1
            )
        }
    }
}

impl std::error::Error for IndexError {}

// ── Scan ──

/// How to filter and order a folder scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// File name pattern (`*` and `?` wildcards). A leading `*` is added
    /// when missing, so `.cif` means `*.cif`.
    pub pattern: String,
    /// Attribute to order by.
    pub sort: SortKey,
    /// Direction.
    pub order: SortOrder,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_owned(),
            sort: SortKey::Name,
            order: SortOrder::Ascending,
        }
    }
}

impl ScanOptions {
    /// Pattern as applied: trimmed, `*`-prefixed, never empty.
    #[must_use]
    pub fn effective_pattern(&self) -> String {
        let pattern = self.pattern.trim();
        if pattern.is_empty() {
            DEFAULT_PATTERN.to_owned()
        } else if pattern.starts_with('*') {
            pattern.to_owned()
        } else {
            format!("*{pattern}")
        }
    }
}

struct Entry {
    path: PathBuf,
    name_key: String,
    modified: SystemTime,
    created: SystemTime,
    size: u64,
}

/// List files in `folder` matching the options, ordered. The folder is read
/// once; `$VAR` and `~` are expanded first.
pub fn scan(
    folder: &str,
    options: &ScanOptions,
) -> Result<Vec<PathBuf>, ScanError> {
    let expanded = expand_path(folder.trim());
    let folder = std::path::absolute(&expanded).unwrap_or(expanded);
    if !folder.is_dir() {
        return Err(ScanError::FolderNotFound { path: folder });
    }
    let pattern = options.effective_pattern();

    let mut entries = Vec::new();
    for dirent in fs::read_dir(&folder).map_err(io_error(&folder))? {
        let dirent = dirent.map_err(io_error(&folder))?;
        let name = dirent.file_name().to_string_lossy().into_owned();
        if !wildcard_match(&pattern, &name) {
            continue;
        }
        let path = dirent.path();
        let meta = fs::metadata(&path).map_err(io_error(&path))?;
        if !meta.is_file() {
            continue;
        }
        let modified = meta.modified().map_err(io_error(&path))?;
        entries.push(Entry {
            name_key: name.to_lowercase(),
            created: meta.created().unwrap_or(modified),
            modified,
            size: meta.len(),
            path,
        });
    }
    if entries.is_empty() {
        return Err(ScanError::NoMatches { folder, pattern });
    }

    // Name breaks ties so equal keys still order deterministically.
    match options.sort {
        SortKey::Name => entries.sort_by(|a, b| a.name_key.cmp(&b.name_key)),
        SortKey::Modified => entries.sort_by(|a, b| {
            a.modified
                .cmp(&b.modified)
                .then_with(|| a.name_key.cmp(&b.name_key))
        }),
        SortKey::Created => entries.sort_by(|a, b| {
            a.created
                .cmp(&b.created)
                .then_with(|| a.name_key.cmp(&b.name_key))
        }),
        SortKey::Size => entries.sort_by(|a, b| {
            a.size.cmp(&b.size).then_with(|| a.name_key.cmp(&b.name_key))
        }),
    }
    if options.order == SortOrder::Descending {
        entries.reverse();
    }
    log::debug!(
        "scanned {}: {} files matching {pattern}",
        folder.display(),
        entries.len()
    );
    Ok(entries.into_iter().map(|e| e.path).collect())
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> ScanError {
    let path = path.to_path_buf();
    move |source| ScanError::Io { path, source }
}

/// Glob-style match of a whole file name. `*` matches any run, `?` one
/// character. Names starting with `.` only match patterns that do too.
fn wildcard_match(pattern: &str, name: &str) -> bool {
    if name.starts_with('.') && !pattern.starts_with('.') {
        return false;
    }
    let p: Vec<char> = pattern.chars().collect();
    let n: Vec<char> = name.chars().collect();
    let (mut pi, mut ni) = (0, 0);
    let mut star: Option<(usize, usize)> = None;
    while ni < n.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == n[ni]) {
            pi += 1;
            ni += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, ni));
            pi += 1;
        } else if let Some((star_pi, star_ni)) = star {
            pi = star_pi + 1;
            ni = star_ni + 1;
            star = Some((star_pi, star_ni + 1));
        } else {
            return false;
        }
    }
    p[pi..].iter().all(|&c| c == '*')
}

// ── Selection and listings ──

/// One entry picked from a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selected<'a, T> {
    /// The entry.
    pub item: &'a T,
    /// Its index.
    pub index: usize,
    /// Length of the list.
    pub total_count: usize,
}

/// Pick entry `index`. Out-of-range indices are an error, never wrapped.
pub fn select<T>(
    items: &[T],
    index: usize,
) -> Result<Selected<'_, T>, IndexError> {
    items
        .get(index)
        .map(|item| Selected {
            item,
            index,
            total_count: items.len(),
        })
        .ok_or(IndexError {
            index,
            total_count: items.len(),
        })
}

/// Parse a newline-delimited listing, dropping blank lines and surrounding
/// whitespace.
#[must_use]
pub fn parse_listing(listing: &str) -> Vec<String> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Join paths into the newline-delimited listing format.
#[must_use]
pub fn format_listing<P: AsRef<Path>>(paths: &[P]) -> String {
    paths
        .iter()
        .map(|p| p.as_ref().display().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::time::Duration;

    use super::*;

    fn folder_with(files: &[(&str, usize)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, size) in files {
            fs::write(dir.path().join(name), vec![b'x'; *size]).unwrap();
        }
        dir
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn wildcards_match_whole_names() {
        assert!(wildcard_match("*.pdb", "1ubq.pdb"));
        assert!(!wildcard_match("*.pdb", "1ubq.pdb.gz"));
        assert!(wildcard_match("*.p?b", "x.pdb"));
        assert!(wildcard_match("*a*b", "xxaxxb"));
        assert!(!wildcard_match("*.pdb", ".hidden.pdb"));
    }

    #[test]
    fn scan_sorts_names_case_insensitively() {
        let dir = folder_with(&[
            ("b.pdb", 1),
            ("A.pdb", 1),
            ("c.pdb", 1),
            ("notes.txt", 1),
        ]);
        let found =
            scan(dir.path().to_str().unwrap(), &ScanOptions::default())
                .unwrap();
        assert_eq!(names(&found), ["A.pdb", "b.pdb", "c.pdb"]);
        assert!(found.iter().all(|p| p.is_absolute()));
    }

    #[test]
    fn scan_by_size_descending() {
        let dir = folder_with(&[
            ("small.cif", 1),
            ("large.cif", 30),
            ("mid.cif", 10),
        ]);
        let options = ScanOptions {
            pattern: ".cif".to_owned(),
            sort: SortKey::Size,
            order: SortOrder::Descending,
        };
        let found = scan(dir.path().to_str().unwrap(), &options).unwrap();
        assert_eq!(names(&found), ["large.cif", "mid.cif", "small.cif"]);
    }

    #[test]
    fn scan_by_modification_time() {
        let dir = folder_with(&[("old.pdb", 1), ("new.pdb", 1)]);
        let base = SystemTime::now() - Duration::from_secs(3600);
        File::options()
            .write(true)
            .open(dir.path().join("old.pdb"))
            .unwrap()
            .set_modified(base)
            .unwrap();
        File::options()
            .write(true)
            .open(dir.path().join("new.pdb"))
            .unwrap()
            .set_modified(base + Duration::from_secs(60))
            .unwrap();
        let options = ScanOptions {
            sort: SortKey::Modified,
            ..ScanOptions::default()
        };
        let found = scan(dir.path().to_str().unwrap(), &options).unwrap();
        assert_eq!(names(&found), ["old.pdb", "new.pdb"]);
    }

    #[test]
    fn scan_errors_name_the_folder() {
        let dir = folder_with(&[("a.txt", 1)]);
        let options = ScanOptions::default();
        let err = scan(dir.path().to_str().unwrap(), &options).unwrap_err();
        assert!(matches!(
            err,
            ScanError::NoMatches { ref pattern, .. } if pattern == "*.pdb"
        ));

        let missing = dir.path().join("nope");
        let err = scan(missing.to_str().unwrap(), &options).unwrap_err();
        assert!(matches!(err, ScanError::FolderNotFound { .. }));
    }

    #[test]
    fn select_out_of_range_is_an_error() {
        let list = ["a", "b", "c"];
        let picked = select(&list, 1).unwrap();
        assert_eq!(*picked.item, "b");
        assert_eq!(picked.total_count, 3);
        assert_eq!(
            select(&list, 5).unwrap_err(),
            IndexError {
                index: 5,
                total_count: 3,
            }
        );
        let empty: [&str; 0] = [];
        assert_eq!(select(&empty, 0).unwrap_err().total_count, 0);
    }

    #[test]
    fn listings_drop_blank_lines() {
        let listing = "  /a/1.pdb \n\n/a/2.pdb\n   \n";
        assert_eq!(parse_listing(listing), ["/a/1.pdb", "/a/2.pdb"]);
        let paths = [PathBuf::from("/a/1.pdb"), PathBuf::from("/a/2.pdb")];
        assert_eq!(format_listing(&paths), "/a/1.pdb\n/a/2.pdb");
        assert_eq!(
            parse_listing(&format_listing(&paths)),
            ["/a/1.pdb", "/a/2.pdb"]
        );
    }
}
