//! Status document: a small Markdown record of where the project stands
//!
//! ```markdown
//! # Project Status
//!
//! - Current Version: 2.0.0
//! - Next Target: 2.1.0
//! ```
//!
//! Only the first `- Current Version:` and the first `- Next Target:` line
//! are recognized. Later lines with the same prefix are ordinary text and
//! are never touched.

use super::lines::{Line, LineEnding, render_lines, split_lines};

pub const STATUS_TITLE: &str = "# Project Status";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusField {
  CurrentVersion,
  NextTarget,
}

impl StatusField {
  /// Case-sensitive line prefix identifying the field
  pub fn prefix(self) -> &'static str {
    match self {
      StatusField::CurrentVersion => "- Current Version:",
      StatusField::NextTarget => "- Next Target:",
    }
  }

  fn render(self, value: &str) -> String {
    format!("{} {}", self.prefix(), value)
  }

  fn matches(self, text: &str) -> bool {
    text.starts_with(self.prefix())
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct StatusLine {
  line: Line,
  field: Option<StatusField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDocument {
  lines: Vec<StatusLine>,
}

impl StatusDocument {
  /// Canonical skeleton used when there is no status document yet
  pub fn new() -> Self {
    Self {
      lines: vec![
        StatusLine {
          line: Line::new(STATUS_TITLE),
          field: None,
        },
        StatusLine {
          line: Line::blank(),
          field: None,
        },
      ],
    }
  }

  /// Parse existing status text; `None` or whitespace-only text yields the skeleton
  pub fn parse(existing: Option<&str>) -> Self {
    let Some(text) = existing.filter(|t| !t.trim().is_empty()) else {
      return Self::new();
    };

    let mut seen_current = false;
    let mut seen_next = false;
    let lines = split_lines(text)
      .into_iter()
      .map(|line| {
        let field = if !seen_current && StatusField::CurrentVersion.matches(&line.text) {
          seen_current = true;
          Some(StatusField::CurrentVersion)
        } else if !seen_next && StatusField::NextTarget.matches(&line.text) {
          seen_next = true;
          Some(StatusField::NextTarget)
        } else {
          None
        };
        StatusLine { line, field }
      })
      .collect();

    Self { lines }
  }

  /// Current value of a recognized field
  pub fn field(&self, field: StatusField) -> Option<&str> {
    self
      .lines
      .iter()
      .find(|l| l.field == Some(field))
      .and_then(|l| l.line.text.strip_prefix(field.prefix()))
      .map(str::trim)
  }

  /// Replace the field's value in place, or append the field at the end
  pub fn set(&mut self, field: StatusField, value: &str) {
    if let Some(existing) = self.lines.iter_mut().find(|l| l.field == Some(field)) {
      existing.line.text = field.render(value);
      return;
    }

    // Follow the document's own line endings; `\n` when it has none yet
    let ending = self
      .lines
      .iter()
      .rev()
      .map(|l| l.line.ending)
      .find(|e| *e != LineEnding::None)
      .unwrap_or(LineEnding::Lf);

    if let Some(last) = self.lines.last_mut()
      && last.line.ending == LineEnding::None
    {
      last.line.ending = ending;
    }
    self.lines.push(StatusLine {
      line: Line {
        text: field.render(value),
        ending,
      },
      field: Some(field),
    });
  }

  pub fn render(&self) -> String {
    render_lines(self.lines.iter().map(|l| &l.line))
  }
}

impl Default for StatusDocument {
  fn default() -> Self {
    Self::new()
  }
}

/// Record the current version and the next target in `existing`
pub fn upsert_status_fields(existing: Option<&str>, version: &str, next_target: &str) -> String {
  let mut doc = StatusDocument::parse(existing);
  doc.set(StatusField::CurrentVersion, version);
  doc.set(StatusField::NextTarget, next_target);
  doc.render()
}
