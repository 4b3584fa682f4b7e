//! Regex adapter over `regex-automata`'s meta engine.
//!
//! Patterns run over UTF-8 bytes and report byte spans; callers translate
//! them to code points. Word boundaries are always Unicode-aware and
//! unknown escapes are always rejected, so [`RegexFlags::UWORD`] and
//! [`RegexFlags::ERROR_ON_UNKNOWN_ESCAPES`] change nothing; compiling with
//! either one logs that at debug level.

use bitflags::bitflags;
use once_cell::unsync::OnceCell;
use regex_automata::{
  Anchored,
  Input,
  MatchKind,
  PatternID,
  meta,
  util::syntax,
};
use smallvec::SmallVec;
use the_stdx::buf::StrBuf;
use thiserror::Error;

use crate::Span;

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RegexError {
  #[error("failed to compile regex '{pattern}': {reason}")]
  Syntax { pattern: String, reason: String },
  #[error("invalid replacement '{template}': {reason}")]
  Replacement { template: String, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, RegexError>;

bitflags! {
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
  pub struct RegexFlags: u32 {
    const CASE_INSENSITIVE         = 1 << 0;
    /// Whitespace and `#` comments in the pattern are ignored.
    const COMMENTS                 = 1 << 1;
    /// `.` matches line terminators too.
    const DOTALL                   = 1 << 2;
    /// The whole pattern is a literal string.
    const LITERAL                  = 1 << 3;
    /// `^` and `$` match at line boundaries.
    const MULTILINE                = 1 << 4;
    /// Only `\n` is a line terminator.
    const UNIX_LINES               = 1 << 5;
    const UWORD                    = 1 << 6;
    const ERROR_ON_UNKNOWN_ESCAPES = 1 << 7;
  }
}

impl RegexFlags {
  fn syntax(self) -> syntax::Config {
    syntax::Config::new()
      .unicode(true)
      .utf8(true)
      .case_insensitive(self.contains(Self::CASE_INSENSITIVE))
      .multi_line(self.contains(Self::MULTILINE))
      .dot_matches_new_line(self.contains(Self::DOTALL))
      .ignore_whitespace(self.contains(Self::COMMENTS) && !self.contains(Self::LITERAL))
      .crlf(!self.contains(Self::UNIX_LINES))
  }
}

/// Capture group spans in bytes; index 0 is the whole match.
pub type Groups = SmallVec<[Option<Span>; 4]>;

#[derive(Debug)]
pub struct Regex {
  source: String,
  flags:  RegexFlags,
  re:     meta::Regex,
  /// The pattern with all-matches semantics, built on first use.
  ends:   OnceCell<meta::Regex>,
}

impl Regex {
  pub fn new(pattern: &str, flags: RegexFlags) -> Result<Self> {
    let source = if flags.contains(RegexFlags::LITERAL) {
      escape(pattern)
    } else {
      pattern.to_owned()
    };

    for (flag, name) in [
      (RegexFlags::UWORD, "uword"),
      (RegexFlags::ERROR_ON_UNKNOWN_ESCAPES, "error_on_unknown_escapes"),
    ] {
      if flags.contains(flag) {
        tracing::debug!(pattern, flag = name, "regex flag has no effect");
      }
    }

    let re = build(&source, flags, meta::Config::new())?;
    tracing::trace!(pattern, ?flags, "compiled regex");
    Ok(Self {
      source,
      flags,
      re,
      ends: OnceCell::new(),
    })
  }

  #[must_use]
  pub fn flags(&self) -> RegexFlags {
    self.flags
  }

  /// Number of explicit capture groups.
  #[must_use]
  pub fn group_count(&self) -> usize {
    self.re.group_info().group_len(PatternID::ZERO).saturating_sub(1)
  }

  /// Leftmost match starting at or after byte `from`.
  #[must_use]
  pub fn find_at(&self, hay: &[u8], from: usize) -> Option<Span> {
    let input = Input::new(hay).span(from..hay.len());
    self.re.search(&input).map(|m| Span::new(m.start(), m.end()))
  }

  /// Match that starts exactly at byte `at`.
  #[must_use]
  pub fn find_anchored(&self, hay: &[u8], at: usize) -> Option<Span> {
    let input = Input::new(hay).span(at..hay.len()).anchored(Anchored::Yes);
    self.re.search(&input).map(|m| Span::new(m.start(), m.end()))
  }

  /// Whether some match ends exactly at byte `at`.
  ///
  /// The search stops at `at` but assertions still see the bytes after it.
  /// With all-matches semantics an unanchored search reports the last end
  /// of any match, which is `at` exactly when some match ends there.
  pub fn is_match_ending_at(&self, hay: &[u8], at: usize) -> Result<bool> {
    let ends = self.ends.get_or_try_init(|| {
      let config = meta::Config::new().match_kind(MatchKind::All).auto_prefilter(false);
      build(&self.source, self.flags, config)
    })?;
    let input = Input::new(hay).span(0..at);
    Ok(ends.search_half(&input).is_some_and(|m| m.offset() == at))
  }

  /// Capture groups of the leftmost match at or after byte `from`.
  #[must_use]
  pub fn captures_at(&self, hay: &[u8], from: usize) -> Option<Groups> {
    let mut caps = self.re.create_captures();
    let input = Input::new(hay).span(from..hay.len());
    self.re.search_captures(&input, &mut caps);
    if !caps.is_match() {
      return None;
    }
    Some(
      (0..=self.group_count())
        .map(|i| caps.get_group(i).map(|s| Span::new(s.start, s.end)))
        .collect(),
    )
  }

  /// Parses a replacement template against this regex's groups.
  ///
  /// `$n` and `${n}` refer to group `n`, `${name}` to a named group and a
  /// backslash makes the next character literal. `$n` takes as many digits
  /// as still name an existing group.
  pub fn replacement(&self, template: &str) -> Result<Replacement> {
    let err = |reason| {
      RegexError::Replacement {
        template: template.to_owned(),
        reason,
      }
    };

    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
      match c {
        '\\' => literal.push(chars.next().ok_or_else(|| err("trailing backslash"))?),
        '$' => {
          let group = if chars.next_if_eq(&'{').is_some() {
            let mut name = String::new();
            loop {
              match chars.next() {
                Some('}') => break,
                Some(c) => name.push(c),
                None => return Err(err("unterminated group reference")),
              }
            }
            match name.parse::<usize>() {
              Ok(n) if n <= self.group_count() => n,
              Ok(_) => return Err(err("group number out of range")),
              Err(_) => {
                self
                  .re
                  .group_info()
                  .to_index(PatternID::ZERO, &name)
                  .ok_or_else(|| err("unknown group name"))?
              },
            }
          } else {
            let mut n = chars
              .next_if(char::is_ascii_digit)
              .and_then(|d| d.to_digit(10))
              .ok_or_else(|| err("'$' not followed by a group number"))? as usize;
            if n > self.group_count() {
              return Err(err("group number out of range"));
            }
            while let Some(d) = chars.peek().and_then(|d| d.to_digit(10)) {
              let next = n * 10 + d as usize;
              if next > self.group_count() {
                break;
              }
              n = next;
              chars.next();
            }
            n
          };
          if !literal.is_empty() {
            pieces.push(Piece::Literal(std::mem::take(&mut literal)));
          }
          pieces.push(Piece::Group(group));
        },
        c => literal.push(c),
      }
    }
    if !literal.is_empty() {
      pieces.push(Piece::Literal(literal));
    }
    Ok(Replacement { pieces })
  }
}

fn build(pattern: &str, flags: RegexFlags, config: meta::Config) -> Result<meta::Regex> {
  meta::Regex::builder()
    .configure(config)
    .syntax(flags.syntax())
    .build(pattern)
    .map_err(|err| {
      RegexError::Syntax {
        pattern: pattern.to_owned(),
        reason:  err.to_string(),
      }
    })
}

/// Escapes every regex meta character in `text`.
#[must_use]
pub fn escape(text: &str) -> String {
  let mut out = String::with_capacity(text.len());
  for c in text.chars() {
    if matches!(
      c,
      '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$' | '#' | '&' | '-' | '~'
    ) {
      out.push('\\');
    }
    out.push(c);
  }
  out
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
  Literal(String),
  Group(usize),
}

/// A parsed replacement template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
  pieces: Vec<Piece>,
}

impl Replacement {
  /// A replacement that is taken verbatim.
  #[must_use]
  pub fn literal(text: &str) -> Self {
    let pieces = if text.is_empty() {
      Vec::new()
    } else {
      vec![Piece::Literal(text.to_owned())]
    };
    Self { pieces }
  }

  /// Whether the template has no group references.
  #[must_use]
  pub fn is_literal(&self) -> bool {
    self.pieces.iter().all(|p| matches!(p, Piece::Literal(_)))
  }

  /// Byte length of the expansion for one match.
  #[must_use]
  pub fn expanded_len(&self, groups: &[Option<Span>]) -> usize {
    self
      .pieces
      .iter()
      .map(|piece| {
        match piece {
          Piece::Literal(s) => s.len(),
          Piece::Group(i) => groups.get(*i).copied().flatten().map_or(0, |s| s.len()),
        }
      })
      .sum()
  }

  /// Appends the expansion for one match; non-participating groups expand
  /// to nothing.
  pub fn expand_into(&self, hay: &[u8], groups: &[Option<Span>], buf: &mut StrBuf) {
    for piece in &self.pieces {
      match piece {
        Piece::Literal(s) => buf.push_str(s),
        Piece::Group(i) => {
          if let Some(span) = groups.get(*i).copied().flatten() {
            buf.push_bytes(&hay[span.range()]);
          }
        },
      }
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  fn expand(re: &Regex, template: &str, hay: &str) -> String {
    let groups = re.captures_at(hay.as_bytes(), 0).unwrap();
    let repl = re.replacement(template).unwrap();
    let mut buf = StrBuf::new();
    repl.expand_into(hay.as_bytes(), &groups, &mut buf);
    assert_eq!(buf.len(), repl.expanded_len(&groups));
    String::from_utf8(buf.as_bytes().to_vec()).unwrap()
  }

  #[test]
  fn flags_change_matching() {
    let re = Regex::new("abc", RegexFlags::CASE_INSENSITIVE).unwrap();
    assert_eq!(re.find_at(b"xxABC", 0), Some(Span::new(2, 5)));

    let re = Regex::new("a.c", RegexFlags::empty()).unwrap();
    assert_eq!(re.find_at(b"a\nc", 0), None);
    let re = Regex::new("a.c", RegexFlags::DOTALL).unwrap();
    assert_eq!(re.find_at(b"a\nc", 0), Some(Span::new(0, 3)));

    let re = Regex::new("^b", RegexFlags::MULTILINE).unwrap();
    assert_eq!(re.find_at(b"a\nb", 0), Some(Span::new(2, 3)));

    let re = Regex::new("a.c(", RegexFlags::LITERAL).unwrap();
    assert_eq!(re.find_at(b"xa.c(", 0), Some(Span::new(1, 5)));

    let re = Regex::new("a b # letters", RegexFlags::COMMENTS).unwrap();
    assert_eq!(re.find_at(b"ab", 0), Some(Span::new(0, 2)));
  }

  #[test]
  fn syntax_errors() {
    assert!(matches!(
      Regex::new("(unclosed", RegexFlags::empty()),
      Err(RegexError::Syntax { .. })
    ));
    assert!(Regex::new(r"\q", RegexFlags::empty()).is_err());
  }

  #[test]
  fn anchored_searches() {
    let re = Regex::new("[0-9]+", RegexFlags::empty()).unwrap();
    assert_eq!(re.find_anchored(b"ab12", 2), Some(Span::new(2, 4)));
    assert_eq!(re.find_anchored(b"ab12", 1), None);
    assert!(re.is_match_ending_at(b"a12b", 3).unwrap());
    assert!(!re.is_match_ending_at(b"a12b", 4).unwrap());

    let re = Regex::new("b # trailing comment", RegexFlags::COMMENTS).unwrap();
    assert!(re.is_match_ending_at(b"ab", 2).unwrap());
  }

  #[test]
  fn match_ending_at_sees_the_rest_of_the_haystack() {
    let re = Regex::new(r"a\b", RegexFlags::empty()).unwrap();
    assert!(!re.is_match_ending_at(b"ab", 1).unwrap());
    assert!(re.is_match_ending_at(b"a b", 1).unwrap());

    let re = Regex::new("a$", RegexFlags::MULTILINE).unwrap();
    assert!(!re.is_match_ending_at(b"ab", 1).unwrap());
    assert!(re.is_match_ending_at(b"a\nb", 1).unwrap());

    // a shorter alternative does not hide a longer one ending at `at`
    let re = Regex::new("a|ab", RegexFlags::empty()).unwrap();
    assert!(re.is_match_ending_at(b"ab", 2).unwrap());
    let re = Regex::new("b", RegexFlags::empty()).unwrap();
    assert!(re.is_match_ending_at(b"bab", 1).unwrap());
    assert!(!re.is_match_ending_at(b"bab", 2).unwrap());
  }

  #[test]
  fn ignored_flags_still_compile() {
    let flags = RegexFlags::UWORD | RegexFlags::ERROR_ON_UNKNOWN_ESCAPES;
    let re = Regex::new(r"\bab\b", flags).unwrap();
    assert_eq!(re.flags(), flags);
    assert_eq!(re.find_at("żab ab".as_bytes(), 0), Some(Span::new(5, 7)));
  }

  #[test]
  fn captures_report_missing_groups() {
    let re = Regex::new("(a)|(b)", RegexFlags::empty()).unwrap();
    assert_eq!(re.group_count(), 2);
    let groups = re.captures_at(b"xb", 0).unwrap();
    assert_eq!(groups.as_slice(), &[Some(Span::new(1, 2)), None, Some(Span::new(1, 2))]);
  }

  #[test]
  fn replacement_templates() {
    let re = Regex::new(r"(\w+)@(?P<host>\w+)", RegexFlags::empty()).unwrap();
    assert_eq!(expand(&re, "$2 at $1", "me@home"), "home at me");
    assert_eq!(expand(&re, "${host}!", "me@home"), "home!");
    assert_eq!(expand(&re, r"\$1 $10", "me@home"), "$1 me0");
    assert!(re.replacement("$9").is_err());
    assert!(re.replacement("${nope}").is_err());
    assert!(re.replacement("$").is_err());
    assert!(re.replacement("x\\").is_err());
    assert!(re.replacement("plain").unwrap().is_literal());
  }
}
