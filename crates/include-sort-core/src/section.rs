//! Include regions: locating them and reordering their entries.

use std::ops::Range;

use crate::classifier::{is_blank, Category, Matchers};

/// Find the next include region at or after `from`.
///
/// A region starts at an include line (never at a blank line) and runs
/// until the first line that is neither blank nor an include.
pub fn next_region(matchers: &Matchers, lines: &[String], from: usize) -> Option<Range<usize>> {
    let rest = lines.get(from..)?;
    let start = from + rest.iter().position(|line| matchers.is_include(line))?;
    let end = lines[start..]
        .iter()
        .position(|line| !matchers.is_region_line(line))
        .map_or(lines.len(), |offset| start + offset);
    Some(start..end)
}

/// Reorder one region into grouped, sorted buckets.
///
/// Leading and trailing blank runs are kept verbatim. A slice that is not a
/// valid region (contains other lines, or is blank only) is returned as is.
pub fn sort_region(matchers: &Matchers, lines: &[String]) -> Vec<String> {
    if !lines.iter().all(|line| matchers.is_region_line(line))
        || lines.iter().all(|line| is_blank(line))
    {
        return lines.to_vec();
    }

    let leading = lines.iter().take_while(|line| is_blank(line)).count();
    let trailing = lines.iter().rev().take_while(|line| is_blank(line)).count();
    let interior = &lines[leading..lines.len() - trailing];

    let mut buckets: [Vec<&String>; 4] = Default::default();
    for line in interior {
        if let Some(category) = matchers.classify(line) {
            buckets[category.index()].push(line);
        }
    }

    let mut output = Vec::with_capacity(lines.len() + Category::ALL.len());
    output.extend_from_slice(&lines[..leading]);

    let mut first = true;
    for bucket in buckets.iter_mut().filter(|bucket| !bucket.is_empty()) {
        // slice::sort_by is stable; equal names keep their input order
        bucket.sort_by(|a, b| matchers.header_name(a).cmp(matchers.header_name(b)));
        if !first {
            output.push(String::new());
        }
        first = false;
        output.extend(bucket.iter().map(|line| (*line).clone()));
    }

    output.extend_from_slice(&lines[lines.len() - trailing..]);
    output
}
