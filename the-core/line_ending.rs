pub use unicode_linebreak::BreakOpportunity;

/// Hard line terminators per the Unicode newline guidelines (UTR #13).
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum LineEnding {
  /// U+000A -- LineFeed
  LF,

  /// U+000B -- VerticalTab
  VT,

  /// U+000C -- FormFeed
  FF,

  /// U+000D -- CarriageReturn
  CR,

  /// U+0085 -- NextLine
  Nel,

  /// U+2028 -- Line Separator
  LS,

  /// U+2029 -- ParagraphSeparator
  PS,
}

impl LineEnding {
  #[inline]
  pub const fn from_char(ch: char) -> Option<LineEnding> {
    match ch {
      '\u{000A}' => Some(LineEnding::LF),
      '\u{000B}' => Some(LineEnding::VT),
      '\u{000C}' => Some(LineEnding::FF),
      '\u{000D}' => Some(LineEnding::CR),
      '\u{0085}' => Some(LineEnding::Nel),
      '\u{2028}' => Some(LineEnding::LS),
      '\u{2029}' => Some(LineEnding::PS),
      _ => None,
    }
  }
}

#[inline]
pub fn char_is_line_ending(ch: char) -> bool {
  LineEnding::from_char(ch).is_some()
}

/// Returns an iterator over soft line break opportunities in the given string.
///
/// Each item is a `(byte_index, BreakOpportunity)` pair; the break happens
/// *before* the byte at `byte_index`. The end of the text is always reported
/// as a mandatory break.
///
/// # Example
/// ```ignore
/// use the_core::line_ending::{soft_breaks, BreakOpportunity};
///
/// let text = "hello world";
/// for (idx, opportunity) in soft_breaks(text) {
///   match opportunity {
///     BreakOpportunity::Mandatory => println!("Must break at byte {idx}"),
///     BreakOpportunity::Allowed => println!("May break at byte {idx}"),
///   }
/// }
/// ```
#[inline]
pub fn soft_breaks(text: &str) -> impl Iterator<Item = (usize, BreakOpportunity)> + '_ {
  unicode_linebreak::linebreaks(text)
}
