//! Error types for relbook with contextual messages and exit codes
//!
//! Every error knows its exit code and may carry a help message. Git failures
//! are special: their text is the collaborator's own output and is printed
//! as-is, and the process exits with git's status.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for relbook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User,
  /// System error (I/O)
  System,
  /// Validation failure (release inputs)
  Validation,
  /// Exit status reported by an external tool
  Collaborator(i32),
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    match self {
      ExitCode::User => 1,
      ExitCode::System => 2,
      ExitCode::Validation => 3,
      ExitCode::Collaborator(code) => code,
    }
  }
}

/// Main error type for relbook
#[derive(Debug)]
pub enum RelbookError {
  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// Invalid release inputs
  Validation(ValidationError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl RelbookError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    RelbookError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    RelbookError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  ///
  /// Git errors are left untouched so their text reaches the user verbatim.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      RelbookError::Message { message, context, help } => RelbookError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      RelbookError::Io(err) => RelbookError::Message {
        message: ctx_str,
        context: Some(err.to_string()),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      RelbookError::Config(_) => ExitCode::User,
      RelbookError::Git(e) => e.exit_code(),
      RelbookError::Validation(_) => ExitCode::Validation,
      RelbookError::Io(_) => ExitCode::System,
      RelbookError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      RelbookError::Config(e) => e.help_message(),
      RelbookError::Validation(e) => e.help_message(),
      RelbookError::Git(GitError::RepoNotFound { path }) => Some(format!(
        "Run inside a git repository or pass --repo (looked at {}).",
        path.display()
      )),
      RelbookError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for RelbookError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RelbookError::Config(e) => write!(f, "{}", e),
      RelbookError::Git(e) => write!(f, "{}", e),
      RelbookError::Validation(e) => write!(f, "{}", e),
      RelbookError::Io(e) => write!(f, "I/O error: {}", e),
      RelbookError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for RelbookError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      RelbookError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for RelbookError {
  fn from(err: io::Error) -> Self {
    RelbookError::Io(err)
  }
}

impl From<String> for RelbookError {
  fn from(msg: String) -> Self {
    RelbookError::message(msg)
  }
}

impl From<&str> for RelbookError {
  fn from(msg: &str) -> Self {
    RelbookError::message(msg)
  }
}

impl From<toml_edit::de::Error> for RelbookError {
  fn from(err: toml_edit::de::Error) -> Self {
    RelbookError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for RelbookError {
  fn from(err: toml_edit::ser::Error) -> Self {
    RelbookError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for RelbookError {
  fn from(err: serde_json::Error) -> Self {
    RelbookError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// A configuration file already exists where `init` would write one
  AlreadyExists { path: PathBuf },

  /// Field present but unusable
  InvalidField { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::AlreadyExists { .. } => Some("Re-run with `relbook init --force` to overwrite it.".to_string()),
      ConfigError::InvalidField { .. } => {
        Some("See `relbook init` for a configuration with every default filled in.".to_string())
      }
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::AlreadyExists { path } => {
        write!(f, "Configuration already exists: {}", path.display())
      }
      ConfigError::InvalidField { field, reason } => {
        write!(f, "Invalid config field `{}`: {}", field, reason)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git ran and reported failure
  CommandFailed {
    command: String,
    output: String,
    code: Option<i32>,
  },

  /// Repository not found
  RepoNotFound { path: PathBuf },
}

impl GitError {
  fn exit_code(&self) -> ExitCode {
    match self {
      GitError::CommandFailed { code: Some(code), .. } if *code != 0 => ExitCode::Collaborator(*code),
      GitError::CommandFailed { .. } => ExitCode::Collaborator(1),
      GitError::RepoNotFound { .. } => ExitCode::User,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { output, .. } => write!(f, "{}", output.trim_end()),
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
    }
  }
}

/// Release input errors
#[derive(Debug)]
pub enum ValidationError {
  /// A required value is empty
  Empty { field: &'static str },

  /// Version contains whitespace
  VersionNotToken { version: String },

  /// `--date` is not `YYYY-MM-DD`
  BadDate { input: String },

  /// Prefix plus version does not form a valid git tag name
  BadTagName { tag: String },
}

impl ValidationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationError::Empty { field } => Some(format!("Pass a non-empty {}.", field)),
      ValidationError::VersionNotToken { .. } => {
        Some("Versions are single tokens such as `1.4.0` or `2024.06-rc1`.".to_string())
      }
      ValidationError::BadDate { .. } => Some("Dates use the form YYYY-MM-DD, e.g. 2024-02-01.".to_string()),
      ValidationError::BadTagName { .. } => {
        Some("Tag names cannot contain `..`, `~`, `^`, `:`, `?`, `*`, `[` or end in `.lock`.".to_string())
      }
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::Empty { field } => write!(f, "The {} must not be empty", field),
      ValidationError::VersionNotToken { version } => {
        write!(f, "Version '{}' must not contain whitespace", version)
      }
      ValidationError::BadDate { input } => write!(f, "Invalid release date '{}'", input),
      ValidationError::BadTagName { tag } => write!(f, "'{}' is not a valid git tag name", tag),
    }
  }
}

/// Result type alias for relbook
pub type RelbookResult<T> = Result<T, RelbookError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> RelbookResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> RelbookResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<RelbookError>,
{
  fn context(self, ctx: impl Into<String>) -> RelbookResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> RelbookResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Print an error to stderr with help text
///
/// Git output is forwarded exactly as git produced it.
pub fn print_error(error: &RelbookError) {
  if let RelbookError::Git(GitError::CommandFailed { command, .. }) = error {
    tracing::debug!(%command, "git command failed");
    eprintln!("{}", error);
    return;
  }

  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
