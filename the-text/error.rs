use the_core::{
  collator::CollatorError,
  regex::RegexError,
};
use the_stdx::{
  buf::BufError,
  utf8::Utf8Error,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TextError>;

/// Errors that abort a whole vectorized call.
///
/// Per-element anomalies (unknown character classes, empty patterns,
/// unknown option keys) are reported with `tracing::warn!` instead and
/// leave NA or a fallback at the affected element.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TextError {
  #[error(transparent)]
  InvalidUtf8(#[from] Utf8Error),
  #[error("invalid argument '{name}': {reason}")]
  InvalidArgument { name: &'static str, reason: String },
  #[error(transparent)]
  Regex(#[from] RegexError),
  #[error(transparent)]
  Collator(#[from] CollatorError),
  #[error(transparent)]
  Buf(#[from] BufError),
  #[error("newline character found in a string")]
  NewlineFound,
  #[error("failed to parse configuration: {0}")]
  Config(String),
  #[error("internal error: {0}")]
  Internal(&'static str),
}

impl TextError {
  pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
    Self::InvalidArgument {
      name,
      reason: reason.into(),
    }
  }
}
