pub mod batch;
pub mod classifier;
pub mod config;
pub mod error;
pub mod lines;
pub mod section;
pub mod sorter;

pub use batch::{sort_file, sort_files, BatchReport, FileCallback, FileOutcome, SortOptions};
pub use classifier::{is_blank, matching_header_stem, Category, Matchers};
pub use config::Config;
pub use error::{IncludeSortError, Result};
pub use lines::{read_lines, write_lines, Encoding, SourceLines, LINE_ENDING};
pub use section::{next_region, sort_region};
pub use sorter::IncludeSorter;
