//! Document updater
//!
//! Pure text transformations for the bookkeeping documents. Nothing here
//! touches the file system; callers read the current text (or `None` when the
//! file is missing), call one of the functions below, and write the result.
//!
//! Malformed input is normalized, never rejected:
//! - **changelog**: header synthesized or repaired, new entry always first
//! - **status**: fields replaced in place or appended, other lines untouched

pub mod changelog;
pub mod lines;
pub mod record;
pub mod status;

pub use changelog::{ChangelogDocument, prepend_changelog_entry};
pub use record::ReleaseRecord;
pub use status::{StatusDocument, StatusField, upsert_status_fields};
