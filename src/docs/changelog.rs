//! Changelog document: `# Changelog` header followed by newest-first entries
//!
//! ```markdown
//! # Changelog
//!
//! ## [1.1.0] - 2024-02-01
//! - Bug fixes
//!
//! ## [1.0.0] - 2024-01-01
//! - Initial
//! ```
//!
//! Entries are only ever prepended. Nothing below the header is reordered,
//! deduplicated or rewritten, apart from dropping blank lines between the
//! header and the first entry.

use super::lines::{Line, render_lines, split_lines};
use super::record::ReleaseRecord;
use serde::Serialize;

pub const CHANGELOG_HEADER: &str = "# Changelog";

/// A changelog split into its (implicit) header and the body below it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogDocument {
  body: Vec<Line>,
}

/// An entry heading and the bullet lines under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangelogEntry {
  pub version: String,
  pub date: String,
  pub items: Vec<String>,
}

impl ChangelogDocument {
  /// Parse existing changelog text; `None` is an empty changelog.
  ///
  /// A first line reading `# Changelog` in any case or spacing is taken as
  /// the header and replaced by the canonical one on render. Anything else
  /// on the first line is body content.
  pub fn parse(existing: Option<&str>) -> Self {
    let mut body = split_lines(existing.unwrap_or(""));

    if body.first().is_some_and(is_header_line) {
      body.remove(0);
    }

    let first_content = body.iter().position(|l| !l.is_blank()).unwrap_or(body.len());
    body.drain(..first_content);

    Self { body }
  }

  /// Insert an entry block above every existing entry
  pub fn prepend(&mut self, record: &ReleaseRecord) {
    let block = [
      Line::new(format!("## [{}] - {}", record.version(), record.date_string())),
      Line::new(format!("- {}", record.summary())),
      Line::blank(),
    ];
    self.body.splice(0..0, block);
  }

  /// Entries in document order (newest first)
  pub fn entries(&self) -> Vec<ChangelogEntry> {
    let mut entries: Vec<ChangelogEntry> = Vec::new();
    let mut in_entry = false;

    for line in &self.body {
      if let Some((version, date)) = parse_entry_heading(&line.text) {
        entries.push(ChangelogEntry {
          version: version.to_string(),
          date: date.to_string(),
          items: Vec::new(),
        });
        in_entry = true;
      } else if line.text.starts_with('#') {
        in_entry = false;
      } else if in_entry
        && let Some(item) = line.text.strip_prefix("- ")
        && let Some(current) = entries.last_mut()
      {
        current.items.push(item.to_string());
      }
    }

    entries
  }

  /// Canonical header, one blank line, then the body
  pub fn render(&self) -> String {
    let mut out = format!("{}\n\n", CHANGELOG_HEADER);
    out.push_str(&render_lines(&self.body));
    out
  }
}

/// Add `record` as the newest entry of `existing`, normalizing the header
pub fn prepend_changelog_entry(existing: Option<&str>, record: &ReleaseRecord) -> String {
  let mut doc = ChangelogDocument::parse(existing);
  doc.prepend(record);
  doc.render()
}

fn is_header_line(line: &Line) -> bool {
  let Some(title) = line.text.trim_end().strip_prefix('#') else {
    return false;
  };
  !title.starts_with('#') && title.trim().eq_ignore_ascii_case("changelog")
}

/// `## [1.0.0] - 2024-01-01` -> ("1.0.0", "2024-01-01")
fn parse_entry_heading(text: &str) -> Option<(&str, &str)> {
  let rest = text.strip_prefix("## [")?;
  let (version, date) = rest.split_once("] - ")?;
  Some((version, date.trim()))
}
