//! Include Classifier
//!
//! Assigns each source line at most one [`Category`]. Only the literal
//! `#include` line shape is recognised; nothing else about C/C++ is parsed.

use std::path::Path;

use regex::Regex;

use crate::error::{IncludeSortError, Result};

const THIRD_PARTY_PATTERN: &str = r"^\s*#include[^<]*<[A-Za-z0-9_\s/]*\.h>.*$";
const STANDARD_LIBRARY_PATTERN: &str = r"^\s*#include[^<]*<[A-Za-z0-9_\s/]*>.*$";
const LOCAL_PATTERN: &str = r#"^\s*#include[^"]*"[A-Za-z0-9_\s/]*\.h".*$"#;
const HEADER_NAME_PATTERN: &str = r#"^\s*#include[^"<]*["<]([^">]*)[">]"#;

/// Include category. Declaration order is the output order of the groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// `"<this file's stem>.h"`
    SelfHeader,
    /// `<name>` without an extension
    StandardLibrary,
    /// `<name.h>`
    ThirdParty,
    /// `"name.h"`
    Local,
}

impl Category {
    /// All categories in output order.
    pub const ALL: [Category; 4] = [
        Category::SelfHeader,
        Category::StandardLibrary,
        Category::ThirdParty,
        Category::Local,
    ];

    /// Position of this category's bucket in the output.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Compiled patterns for one target file.
#[derive(Debug, Clone)]
pub struct Matchers {
    self_header: Option<Regex>,
    third_party: Regex,
    standard_library: Regex,
    local: Regex,
    header_name: Regex,
}

impl Matchers {
    /// Build matchers for `target`, stripping the first ignored prefix it
    /// starts with before deriving the matching-header pattern.
    pub fn new(target: &str, ignored_prefixes: &[String]) -> Result<Self> {
        let stem = matching_header_stem(target, ignored_prefixes);
        let pattern = format!(r#"^\s*#include[^"]*"{}\.h".*$"#, regex::escape(&stem));
        let mut matchers = Self::without_self_header()?;
        matchers.self_header = Some(compile(&pattern)?);
        Ok(matchers)
    }

    /// Matchers with no matching-header pattern; every quoted `.h` include
    /// is treated as local.
    pub fn without_self_header() -> Result<Self> {
        Ok(Self {
            self_header: None,
            third_party: compile(THIRD_PARTY_PATTERN)?,
            standard_library: compile(STANDARD_LIBRARY_PATTERN)?,
            local: compile(LOCAL_PATTERN)?,
            header_name: compile(HEADER_NAME_PATTERN)?,
        })
    }

    /// Classify a line. Categories are tried in priority order and the
    /// first match wins, so a matching header is never also local and a
    /// `<name.h>` include is never also standard library.
    pub fn classify(&self, line: &str) -> Option<Category> {
        if self
            .self_header
            .as_ref()
            .is_some_and(|re| re.is_match(line))
        {
            return Some(Category::SelfHeader);
        }
        if self.third_party.is_match(line) {
            return Some(Category::ThirdParty);
        }
        if self.standard_library.is_match(line) {
            return Some(Category::StandardLibrary);
        }
        if self.local.is_match(line) {
            return Some(Category::Local);
        }
        None
    }

    /// Whether a line is an include of any category.
    pub fn is_include(&self, line: &str) -> bool {
        self.classify(line).is_some()
    }

    /// Whether a line may belong to an include region.
    pub fn is_region_line(&self, line: &str) -> bool {
        is_blank(line) || self.is_include(line)
    }

    /// Text between the include delimiters, or `""` for a malformed line.
    pub fn header_name<'a>(&self, line: &'a str) -> &'a str {
        self.header_name
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map_or("", |m| m.as_str())
    }
}

/// Empty or whitespace-only.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Path of the header matching `target`: the first ignored prefix the path
/// starts with is removed, then the extension of the last component.
pub fn matching_header_stem(target: &str, ignored_prefixes: &[String]) -> String {
    let stripped = ignored_prefixes
        .iter()
        .find(|prefix| target.starts_with(prefix.as_str()))
        .map_or(target, |prefix| &target[prefix.len()..]);

    Path::new(stripped)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| stripped.strip_suffix(ext))
        .and_then(|rest| rest.strip_suffix('.'))
        .unwrap_or(stripped)
        .to_string()
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| IncludeSortError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
