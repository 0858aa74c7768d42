//! Line splitting that remembers each line's terminator
//!
//! Documents are edited as a list of lines and written back by joining them
//! again; a line nobody touched comes out byte for byte as it went in,
//! including a missing final newline or CRLF endings.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
  /// Last line of a file without trailing newline
  None,
  Lf,
  CrLf,
}

impl LineEnding {
  pub fn as_str(self) -> &'static str {
    match self {
      LineEnding::None => "",
      LineEnding::Lf => "\n",
      LineEnding::CrLf => "\r\n",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
  pub text: String,
  pub ending: LineEnding,
}

impl Line {
  /// A new `\n`-terminated line
  pub fn new(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      ending: LineEnding::Lf,
    }
  }

  pub fn blank() -> Self {
    Self::new("")
  }

  /// Empty or whitespace-only
  pub fn is_blank(&self) -> bool {
    self.text.trim().is_empty()
  }
}

pub fn split_lines(text: &str) -> Vec<Line> {
  text
    .split_inclusive('\n')
    .map(|raw| {
      if let Some(text) = raw.strip_suffix("\r\n") {
        Line {
          text: text.to_string(),
          ending: LineEnding::CrLf,
        }
      } else if let Some(text) = raw.strip_suffix('\n') {
        Line {
          text: text.to_string(),
          ending: LineEnding::Lf,
        }
      } else {
        Line {
          text: raw.to_string(),
          ending: LineEnding::None,
        }
      }
    })
    .collect()
}

pub fn render_lines<'a>(lines: impl IntoIterator<Item = &'a Line>) -> String {
  let mut out = String::new();
  for line in lines {
    out.push_str(&line.text);
    out.push_str(line.ending.as_str());
  }
  out
}
