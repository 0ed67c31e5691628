//! Batch driver: sort includes in many files, one at a time.
//!
//! A failing file is recorded in the [`BatchReport`] and the batch moves on
//! to the next path.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{IncludeSortError, Result};
use crate::lines::{read_lines, write_lines};
use crate::sorter::IncludeSorter;

/// Progress callback invoked after each file
pub type FileCallback<'a> = Option<&'a dyn Fn(&Path, &Result<FileOutcome>)>;

/// Options shared by every file in a batch.
#[derive(Debug, Clone, Default)]
pub struct SortOptions {
    /// Path prefixes stripped before deriving the matching header name
    pub ignored_prefixes: Vec<String>,
    /// Report what would change without writing
    pub dry_run: bool,
}

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Includes were already in order
    Unchanged,
    /// Includes were reordered and the file rewritten
    Sorted,
    /// Includes are out of order; nothing written (dry run)
    WouldSort,
}

impl FileOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unchanged => "OK",
            Self::Sorted => "SORTED",
            Self::WouldSort => "WOULD SORT",
        }
    }
}

/// Per-file results of a batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<(PathBuf, Result<FileOutcome>)>,
}

impl BatchReport {
    fn count(&self, outcome: FileOutcome) -> usize {
        self.results
            .iter()
            .filter(|(_, r)| matches!(r, Ok(o) if *o == outcome))
            .count()
    }

    pub fn sorted(&self) -> usize {
        self.count(FileOutcome::Sorted)
    }

    pub fn unchanged(&self) -> usize {
        self.count(FileOutcome::Unchanged)
    }

    pub fn would_sort(&self) -> usize {
        self.count(FileOutcome::WouldSort)
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_err()).count()
    }
}

/// Sort the includes of a single file in place.
///
/// The sorter is built from the path before the file is opened, so a path
/// whose matching-header pattern cannot compile fails with
/// [`IncludeSortError::InvalidPattern`] whether or not it exists.
pub fn sort_file(path: &Path, options: &SortOptions) -> Result<FileOutcome> {
    let target = path.to_string_lossy();
    let sorter = IncludeSorter::new(&target, &options.ignored_prefixes)?;

    if !path.exists() {
        return Err(IncludeSortError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let source = read_lines(path)?;
    let sorted = sorter.sort(&source.lines);

    if sorted == source.lines {
        debug!(path = %path.display(), "includes already sorted");
        return Ok(FileOutcome::Unchanged);
    }
    if options.dry_run {
        return Ok(FileOutcome::WouldSort);
    }

    write_lines(path, &sorted, source.encoding)?;
    debug!(path = %path.display(), "includes sorted");
    Ok(FileOutcome::Sorted)
}

/// Sort every file in `paths`, calling `on_file` after each one.
pub fn sort_files<P: AsRef<Path>>(
    paths: &[P],
    options: &SortOptions,
    on_file: FileCallback<'_>,
) -> BatchReport {
    let mut report = BatchReport::default();

    for path in paths {
        let path = path.as_ref();
        let result = sort_file(path, options);
        if let Err(e) = &result {
            warn!(path = %path.display(), error = %e, "skipping file");
        }
        if let Some(callback) = on_file {
            callback(path, &result);
        }
        report.results.push((path.to_path_buf(), result));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_sort_file_rewrites_unsorted() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "a.cc", "#include <b>\n#include <a>\n");

        let outcome = sort_file(&path, &SortOptions::default()).unwrap();

        assert_eq!(outcome, FileOutcome::Sorted);
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().collect::<Vec<_>>(), vec!["#include <a>", "#include <b>"]);
    }

    #[test]
    fn test_sort_file_unchanged_is_not_rewritten() {
        let temp = TempDir::new().unwrap();
        // no trailing newline; an untouched file keeps it that way
        let path = write(&temp, "a.cc", "#include <a>\n#include <b>");

        let outcome = sort_file(&path, &SortOptions::default()).unwrap();

        assert_eq!(outcome, FileOutcome::Unchanged);
        assert_eq!(fs::read_to_string(&path).unwrap(), "#include <a>\n#include <b>");
    }

    #[test]
    fn test_sort_file_dry_run_does_not_write() {
        let temp = TempDir::new().unwrap();
        let original = "#include <b>\n#include <a>\n";
        let path = write(&temp, "a.cc", original);
        let options = SortOptions {
            dry_run: true,
            ..Default::default()
        };

        assert_eq!(sort_file(&path, &options).unwrap(), FileOutcome::WouldSort);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_sort_file_missing() {
        let temp = TempDir::new().unwrap();
        let err = sort_file(&temp.path().join("gone.cc"), &SortOptions::default()).unwrap_err();
        assert!(matches!(err, IncludeSortError::FileNotFound { .. }));
    }

    #[test]
    fn test_sort_file_uses_matching_header() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "widget.cc",
            "#include <vector>\n#include \"gadget.h\"\n#include \"widget.h\"\n",
        );
        let prefix = format!("{}{}", temp.path().display(), std::path::MAIN_SEPARATOR);
        let options = SortOptions {
            ignored_prefixes: vec![prefix],
            dry_run: false,
        };

        sort_file(&path, &options).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content.lines().collect::<Vec<_>>(),
            vec![
                "#include \"widget.h\"",
                "",
                "#include <vector>",
                "",
                "#include \"gadget.h\"",
            ]
        );
    }

    #[test]
    fn test_sort_files_continues_past_missing() {
        let temp = TempDir::new().unwrap();
        let first = temp.path().join("missing.cc");
        let second = write(&temp, "b.cc", "#include <z>\n#include <y>\n");
        let third = write(&temp, "c.cc", "int x;\n");

        let seen = RefCell::new(Vec::new());
        let on_file = |path: &Path, _: &Result<FileOutcome>| {
            seen.borrow_mut().push(path.to_path_buf());
        };
        let report = sort_files(
            &[first.clone(), second.clone(), third.clone()],
            &SortOptions::default(),
            Some(&on_file),
        );

        assert_eq!(report.failed(), 1);
        assert_eq!(report.sorted(), 1);
        assert_eq!(report.unchanged(), 1);
        assert_eq!(report.would_sort(), 0);
        assert_eq!(seen.into_inner(), vec![first, second.clone(), third]);
        assert_eq!(
            fs::read_to_string(&second).unwrap().lines().next(),
            Some("#include <y>")
        );
    }

    #[test]
    fn test_sort_file_keeps_non_utf8_bytes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("legacy.cc");
        fs::write(&path, b"// \xA9 Acme\n#include <b>\n#include <a>\n").unwrap();

        assert_eq!(
            sort_file(&path, &SortOptions::default()).unwrap(),
            FileOutcome::Sorted
        );

        let mut expected = Vec::new();
        for line in [&b"// \xA9 Acme"[..], b"#include <a>", b"#include <b>"] {
            expected.extend_from_slice(line);
            expected.extend_from_slice(crate::lines::LINE_ENDING.as_bytes());
        }
        assert_eq!(fs::read(&path).unwrap(), expected);
    }

    #[test]
    fn test_sort_files_continues_past_unbuildable_pattern() {
        let temp = TempDir::new().unwrap();
        let oversized = PathBuf::from(format!("{}.cc", "a".repeat(20_000_000)));
        let next = write(&temp, "next.cc", "#include <b>\n#include <a>\n");

        let report = sort_files(&[oversized, next.clone()], &SortOptions::default(), None);

        assert_eq!(report.failed(), 1);
        assert_eq!(report.sorted(), 1);
        assert!(matches!(
            report.results[0].1,
            Err(IncludeSortError::InvalidPattern { .. })
        ));
        assert_eq!(report.results[1].0, next);
        assert!(matches!(report.results[1].1, Ok(FileOutcome::Sorted)));
    }
}
