use crate::core::error::{RelbookError, RelbookResult, ValidationError};
use chrono::NaiveDate;

/// One release as it appears in the changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRecord {
  version: String,
  summary: String,
  date: NaiveDate,
}

impl ReleaseRecord {
  /// Validate caller input.
  ///
  /// The version must be a non-empty token. The summary is folded onto one
  /// line so it cannot break the entry structure, and must not end up empty.
  pub fn new(version: &str, summary: &str, date: NaiveDate) -> RelbookResult<Self> {
    let version = version.trim();
    if version.is_empty() {
      return Err(RelbookError::Validation(ValidationError::Empty { field: "version" }));
    }
    if version.chars().any(char::is_whitespace) {
      return Err(RelbookError::Validation(ValidationError::VersionNotToken {
        version: version.to_string(),
      }));
    }

    let summary = single_line(summary);
    if summary.is_empty() {
      return Err(RelbookError::Validation(ValidationError::Empty { field: "summary" }));
    }

    Ok(Self {
      version: version.to_string(),
      summary,
      date,
    })
  }

  pub fn version(&self) -> &str {
    &self.version
  }

  pub fn summary(&self) -> &str {
    &self.summary
  }

  /// `YYYY-MM-DD`
  pub fn date_string(&self) -> String {
    self.date.format("%Y-%m-%d").to_string()
  }
}

/// Collapse line breaks (and the whitespace around them) into single spaces
pub fn single_line(text: &str) -> String {
  text
    .lines()
    .map(str::trim)
    .filter(|l| !l.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

/// Parse a `--date` argument
pub fn parse_date(input: &str) -> RelbookResult<NaiveDate> {
  NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
    RelbookError::Validation(ValidationError::BadDate {
      input: input.to_string(),
    })
  })
}
