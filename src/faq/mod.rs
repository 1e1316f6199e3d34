//! FAQ entries and their sources.
//!
//! This module handles:
//! - The immutable entry model ([`Entry`], [`EntryId`], [`Category`])
//! - Loading entries from markdown (comrak), CSV and JSON files

mod error;
mod loader;
mod parser;
mod types;

pub use error::LoadError;
pub use loader::{SourceFormat, load_entries, parse_source};
pub use parser::{DEFAULT_CATEGORY, parse_markdown};
pub use types::{Category, Entry, EntryId, FaqSet, normalize_tag};
