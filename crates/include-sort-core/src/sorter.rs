//! IncludeSorter
//!
//! Walks a line buffer once, copying ordinary lines through and sending each
//! include region through [`sort_region`].

use std::ops::Range;

use tracing::debug;

use crate::classifier::Matchers;
use crate::error::Result;
use crate::section::{next_region, sort_region};

/// Sorts the include regions of one target file.
#[derive(Debug, Clone)]
pub struct IncludeSorter {
    matchers: Matchers,
}

impl IncludeSorter {
    /// Build a sorter for `target`, whose own header is placed first.
    ///
    /// `ignored_prefixes` are path prefixes removed from `target` before the
    /// matching header name is derived, so `src/net/socket.cc` with prefix
    /// `src/` matches `#include "net/socket.h"`.
    pub fn new(target: &str, ignored_prefixes: &[String]) -> Result<Self> {
        Ok(Self {
            matchers: Matchers::new(target, ignored_prefixes)?,
        })
    }

    /// Build a sorter that recognises no matching header.
    pub fn without_self_header() -> Result<Self> {
        Ok(Self {
            matchers: Matchers::without_self_header()?,
        })
    }

    /// Compiled patterns this sorter classifies lines with.
    pub fn matchers(&self) -> &Matchers {
        &self.matchers
    }

    /// Regions that [`sort`](Self::sort) would reorder, in input order.
    pub fn regions(&self, lines: &[String]) -> Vec<Range<usize>> {
        let mut regions = Vec::new();
        let mut cursor = 0;
        while let Some(region) = next_region(&self.matchers, lines, cursor) {
            cursor = region.end;
            regions.push(region);
        }
        regions
    }

    /// Return `lines` with every include region grouped and sorted.
    pub fn sort(&self, lines: &[String]) -> Vec<String> {
        let mut output = Vec::with_capacity(lines.len());
        let mut cursor = 0;

        while let Some(region) = next_region(&self.matchers, lines, cursor) {
            debug!(start = region.start, end = region.end, "sorting include region");
            output.extend_from_slice(&lines[cursor..region.start]);
            output.extend(sort_region(&self.matchers, &lines[region.clone()]));
            cursor = region.end;
        }

        output.extend_from_slice(&lines[cursor..]);
        output
    }
}
