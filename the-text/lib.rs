//! Vectorized Unicode string operations.
//!
//! Every operation takes [`StrVec`]s, recycles shorter arguments to the
//! length of the longest one and maps NA inputs to NA outputs. Searching
//! works with four kinds of [`Pattern`]: character classes, literal
//! needles, collation-aware needles and regular expressions.

pub mod compare;
pub mod config;
pub mod container;
pub mod error;
pub mod join;
pub mod length;
pub mod pad;
pub mod pattern;
pub mod recycle;
pub mod search;
pub mod strvec;
pub mod trans;
pub mod wrap;

pub use the_core::{
  Span,
  collator::{
    CollatorOptions,
    Strength,
  },
  regex::RegexFlags,
};

pub use crate::{
  config::EngineConfig,
  error::{
    Result,
    TextError,
  },
  pattern::{
    FixedOptions,
    Pattern,
  },
  search::{
    Occurrence,
    Side,
    Which,
  },
  strvec::StrVec,
};
