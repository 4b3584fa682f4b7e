//! Unicode binary properties addressable by name from character classes.
//!
//! Properties that the standard library or the normalization tables expose
//! directly (`Alphabetic`, `White_Space`, `Lowercase`, combining classes,
//! decompositions) are answered exactly. The rest are derived from the
//! general category plus the explicit code point ranges listed in the
//! Unicode property files.

use std::iter;

use unicode_casefold::UnicodeCaseFold;
use unicode_general_category::{
  GeneralCategory,
  get_general_category,
};
use unicode_normalization::{
  UnicodeNormalization,
  char::canonical_combining_class,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryProperty {
  Alphabetic,
  AsciiHexDigit,
  BidiControl,
  BidiMirrored,
  Cased,
  CaseIgnorable,
  CaseSensitive,
  ChangesWhenCasefolded,
  ChangesWhenCasemapped,
  ChangesWhenLowercased,
  ChangesWhenNfkcCasefolded,
  ChangesWhenTitlecased,
  ChangesWhenUppercased,
  Dash,
  DefaultIgnorableCodePoint,
  Deprecated,
  Diacritic,
  Extender,
  FullCompositionExclusion,
  GraphemeBase,
  GraphemeExtend,
  GraphemeLink,
  HexDigit,
  Hyphen,
  IdContinue,
  Ideographic,
  IdsBinaryOperator,
  IdStart,
  IdsTrinaryOperator,
  JoinControl,
  LogicalOrderException,
  Lowercase,
  Math,
  NfcInert,
  NfdInert,
  NfkcInert,
  NfkdInert,
  NoncharacterCodePoint,
  PatternSyntax,
  PatternWhiteSpace,
  PosixAlnum,
  PosixBlank,
  PosixGraph,
  PosixPrint,
  PosixXdigit,
  QuotationMark,
  Radical,
  SegmentStarter,
  SoftDotted,
  STerm,
  TerminalPunctuation,
  UnifiedIdeograph,
  Uppercase,
  VariationSelector,
  WhiteSpace,
  XidContinue,
  XidStart,
}

/// Normalized property names, sorted for binary search.
pub const PROPERTY_NAMES: [(&str, BinaryProperty); 57] = [
  ("ALPHABETIC", BinaryProperty::Alphabetic),
  ("ASCIIHEXDIGIT", BinaryProperty::AsciiHexDigit),
  ("BIDICONTROL", BinaryProperty::BidiControl),
  ("BIDIMIRRORED", BinaryProperty::BidiMirrored),
  ("CASED", BinaryProperty::Cased),
  ("CASEIGNORABLE", BinaryProperty::CaseIgnorable),
  ("CASESENSITIVE", BinaryProperty::CaseSensitive),
  ("CHANGESWHENCASEFOLDED", BinaryProperty::ChangesWhenCasefolded),
  ("CHANGESWHENCASEMAPPED", BinaryProperty::ChangesWhenCasemapped),
  ("CHANGESWHENLOWERCASED", BinaryProperty::ChangesWhenLowercased),
  ("CHANGESWHENNFKCCASEFOLDED", BinaryProperty::ChangesWhenNfkcCasefolded),
  ("CHANGESWHENTITLECASED", BinaryProperty::ChangesWhenTitlecased),
  ("CHANGESWHENUPPERCASED", BinaryProperty::ChangesWhenUppercased),
  ("DASH", BinaryProperty::Dash),
  ("DEFAULTIGNORABLECODEPOINT", BinaryProperty::DefaultIgnorableCodePoint),
  ("DEPRECATED", BinaryProperty::Deprecated),
  ("DIACRITIC", BinaryProperty::Diacritic),
  ("EXTENDER", BinaryProperty::Extender),
  ("FULLCOMPOSITIONEXCLUSION", BinaryProperty::FullCompositionExclusion),
  ("GRAPHEMEBASE", BinaryProperty::GraphemeBase),
  ("GRAPHEMEEXTEND", BinaryProperty::GraphemeExtend),
  ("GRAPHEMELINK", BinaryProperty::GraphemeLink),
  ("HEXDIGIT", BinaryProperty::HexDigit),
  ("HYPHEN", BinaryProperty::Hyphen),
  ("IDCONTINUE", BinaryProperty::IdContinue),
  ("IDEOGRAPHIC", BinaryProperty::Ideographic),
  ("IDSBINARYOPERATOR", BinaryProperty::IdsBinaryOperator),
  ("IDSTART", BinaryProperty::IdStart),
  ("IDSTRINARYOPERATOR", BinaryProperty::IdsTrinaryOperator),
  ("JOINCONTROL", BinaryProperty::JoinControl),
  ("LOGICALORDEREXCEPTION", BinaryProperty::LogicalOrderException),
  ("LOWERCASE", BinaryProperty::Lowercase),
  ("MATH", BinaryProperty::Math),
  ("NFCINERT", BinaryProperty::NfcInert),
  ("NFDINERT", BinaryProperty::NfdInert),
  ("NFKCINERT", BinaryProperty::NfkcInert),
  ("NFKDINERT", BinaryProperty::NfkdInert),
  ("NONCHARACTERCODEPOINT", BinaryProperty::NoncharacterCodePoint),
  ("PATTERNSYNTAX", BinaryProperty::PatternSyntax),
  ("PATTERNWHITESPACE", BinaryProperty::PatternWhiteSpace),
  ("POSIXALNUM", BinaryProperty::PosixAlnum),
  ("POSIXBLANK", BinaryProperty::PosixBlank),
  ("POSIXGRAPH", BinaryProperty::PosixGraph),
  ("POSIXPRINT", BinaryProperty::PosixPrint),
  ("POSIXXDIGIT", BinaryProperty::PosixXdigit),
  ("QUOTATIONMARK", BinaryProperty::QuotationMark),
  ("RADICAL", BinaryProperty::Radical),
  ("SEGMENTSTARTER", BinaryProperty::SegmentStarter),
  ("SOFTDOTTED", BinaryProperty::SoftDotted),
  ("STERM", BinaryProperty::STerm),
  ("TERMINALPUNCTUATION", BinaryProperty::TerminalPunctuation),
  ("UNIFIEDIDEOGRAPH", BinaryProperty::UnifiedIdeograph),
  ("UPPERCASE", BinaryProperty::Uppercase),
  ("VARIATIONSELECTOR", BinaryProperty::VariationSelector),
  ("WHITESPACE", BinaryProperty::WhiteSpace),
  ("XIDCONTINUE", BinaryProperty::XidContinue),
  ("XIDSTART", BinaryProperty::XidStart),
];

impl BinaryProperty {
  /// Looks up an already normalized name.
  #[must_use]
  pub fn from_normalized_name(name: &str) -> Option<Self> {
    PROPERTY_NAMES
      .binary_search_by(|(key, _)| (*key).cmp(name))
      .ok()
      .map(|idx| PROPERTY_NAMES[idx].1)
  }

  #[must_use]
  pub fn contains(self, c: char) -> bool {
    use BinaryProperty::*;

    let gc = get_general_category(c);
    match self {
      Alphabetic => c.is_alphabetic(),
      AsciiHexDigit => c.is_ascii_hexdigit(),
      BidiControl => in_table(c, BIDI_CONTROL),
      BidiMirrored => {
        matches!(
          gc,
          GeneralCategory::OpenPunctuation | GeneralCategory::ClosePunctuation
        ) || in_table(c, BIDI_MIRRORED_EXTRA)
      },
      Cased => is_cased(c, gc),
      CaseIgnorable => {
        matches!(
          gc,
          GeneralCategory::NonspacingMark
            | GeneralCategory::EnclosingMark
            | GeneralCategory::Format
            | GeneralCategory::ModifierLetter
            | GeneralCategory::ModifierSymbol
        ) || in_table(c, CASE_IGNORABLE_PUNCT)
      },
      CaseSensitive => is_cased(c, gc) || changes_when_casemapped(c),
      ChangesWhenCasefolded => !iter::once(c).case_fold().eq(iter::once(c)),
      ChangesWhenCasemapped => changes_when_casemapped(c),
      ChangesWhenLowercased => !c.to_lowercase().eq(iter::once(c)),
      ChangesWhenNfkcCasefolded => {
        default_ignorable(c) || !iter::once(c).nfkc().case_fold().eq(iter::once(c))
      },
      ChangesWhenTitlecased | ChangesWhenUppercased => !c.to_uppercase().eq(iter::once(c)),
      Dash => gc == GeneralCategory::DashPunctuation || in_table(c, DASH_EXTRA),
      DefaultIgnorableCodePoint => default_ignorable(c),
      Deprecated => in_table(c, DEPRECATED),
      Diacritic => {
        gc == GeneralCategory::ModifierSymbol
          || (gc == GeneralCategory::NonspacingMark && canonical_combining_class(c) != 0)
          || (gc == GeneralCategory::ModifierLetter && ('\u{02B0}'..='\u{02FF}').contains(&c))
      },
      Extender => in_table(c, EXTENDER),
      FullCompositionExclusion => {
        let nfd: String = iter::once(c).nfd().collect();
        !nfd.chars().eq(iter::once(c)) && !nfd.nfc().eq(iter::once(c))
      },
      GraphemeBase => {
        !grapheme_extend(c, gc)
          && !matches!(
            gc,
            GeneralCategory::Control
              | GeneralCategory::Format
              | GeneralCategory::Surrogate
              | GeneralCategory::PrivateUse
              | GeneralCategory::Unassigned
              | GeneralCategory::LineSeparator
              | GeneralCategory::ParagraphSeparator
          )
      },
      GraphemeExtend => grapheme_extend(c, gc),
      GraphemeLink => canonical_combining_class(c) == 9,
      HexDigit => c.is_ascii_hexdigit() || in_table(c, FULLWIDTH_HEX),
      Hyphen => in_table(c, HYPHEN),
      IdContinue | XidContinue => id_continue(c, gc),
      Ideographic => in_table(c, IDEOGRAPHIC),
      IdsBinaryOperator => in_table(c, IDS_BINARY),
      IdStart | XidStart => id_start(c, gc),
      IdsTrinaryOperator => matches!(c, '\u{2FF2}' | '\u{2FF3}'),
      JoinControl => matches!(c, '\u{200C}' | '\u{200D}'),
      LogicalOrderException => in_table(c, LOGICAL_ORDER_EXCEPTION),
      Lowercase => c.is_lowercase(),
      Math => gc == GeneralCategory::MathSymbol || in_table(c, MATH_EXTRA),
      NfdInert => nfd_inert(c),
      NfkdInert => nfkd_inert(c),
      NfcInert => nfd_inert(c) && !composes(c),
      NfkcInert => nfkd_inert(c) && !composes(c),
      NoncharacterCodePoint => {
        let cp = c as u32;
        (0xFDD0..=0xFDEF).contains(&cp) || cp & 0xFFFE == 0xFFFE
      },
      PatternSyntax => in_table(c, PATTERN_SYNTAX),
      PatternWhiteSpace => in_table(c, PATTERN_WHITE_SPACE),
      PosixAlnum => c.is_alphabetic() || gc == GeneralCategory::DecimalNumber,
      PosixBlank => c == '\t' || gc == GeneralCategory::SpaceSeparator,
      PosixGraph => posix_graph(c, gc),
      PosixPrint => {
        posix_graph(c, gc) || (gc == GeneralCategory::SpaceSeparator)
      },
      PosixXdigit => {
        gc == GeneralCategory::DecimalNumber || c.is_ascii_hexdigit() || in_table(c, FULLWIDTH_HEX)
      },
      QuotationMark => in_table(c, QUOTATION_MARK),
      Radical => in_table(c, RADICAL),
      SegmentStarter => {
        canonical_combining_class(c) == 0
          && iter::once(c)
            .nfd()
            .next()
            .is_some_and(|first| canonical_combining_class(first) == 0)
      },
      SoftDotted => in_table(c, SOFT_DOTTED),
      STerm => in_table(c, STERM),
      TerminalPunctuation => in_table(c, STERM) || in_table(c, TERMINAL_EXTRA),
      UnifiedIdeograph => in_table(c, UNIFIED_IDEOGRAPH),
      Uppercase => c.is_uppercase(),
      VariationSelector => in_table(c, VARIATION_SELECTOR),
      WhiteSpace => c.is_whitespace(),
    }
  }
}

fn in_table(c: char, table: &[(u32, u32)]) -> bool {
  let cp = c as u32;
  table
    .binary_search_by(|&(lo, hi)| {
      if hi < cp {
        std::cmp::Ordering::Less
      } else if lo > cp {
        std::cmp::Ordering::Greater
      } else {
        std::cmp::Ordering::Equal
      }
    })
    .is_ok()
}

fn is_cased(c: char, gc: GeneralCategory) -> bool {
  c.is_lowercase() || c.is_uppercase() || gc == GeneralCategory::TitlecaseLetter
}

fn changes_when_casemapped(c: char) -> bool {
  !c.to_lowercase().eq(iter::once(c)) || !c.to_uppercase().eq(iter::once(c))
}

fn default_ignorable(c: char) -> bool {
  in_table(c, DEFAULT_IGNORABLE)
}

fn grapheme_extend(c: char, gc: GeneralCategory) -> bool {
  matches!(
    gc,
    GeneralCategory::NonspacingMark | GeneralCategory::EnclosingMark
  ) || in_table(c, GRAPHEME_EXTEND_EXTRA)
}

fn id_start(c: char, gc: GeneralCategory) -> bool {
  matches!(
    gc,
    GeneralCategory::UppercaseLetter
      | GeneralCategory::LowercaseLetter
      | GeneralCategory::TitlecaseLetter
      | GeneralCategory::ModifierLetter
      | GeneralCategory::OtherLetter
      | GeneralCategory::LetterNumber
  ) || matches!(
    c,
    '\u{1885}' | '\u{1886}' | '\u{2118}' | '\u{212E}' | '\u{309B}' | '\u{309C}'
  )
}

fn id_continue(c: char, gc: GeneralCategory) -> bool {
  id_start(c, gc)
    || matches!(
      gc,
      GeneralCategory::NonspacingMark
        | GeneralCategory::SpacingMark
        | GeneralCategory::DecimalNumber
        | GeneralCategory::ConnectorPunctuation
    )
    || matches!(c, '\u{00B7}' | '\u{0387}' | '\u{1369}'..='\u{1371}' | '\u{19DA}')
}

fn posix_graph(c: char, gc: GeneralCategory) -> bool {
  !c.is_whitespace()
    && !matches!(
      gc,
      GeneralCategory::Control | GeneralCategory::Surrogate | GeneralCategory::Unassigned
    )
}

fn nfd_inert(c: char) -> bool {
  canonical_combining_class(c) == 0 && iter::once(c).nfd().eq(iter::once(c))
}

fn nfkd_inert(c: char) -> bool {
  canonical_combining_class(c) == 0 && iter::once(c).nfkd().eq(iter::once(c))
}

/// Characters that may take part in a canonical composition with a
/// neighbor: letters of the scripts with precomposed forms and Hangul jamo.
fn composes(c: char) -> bool {
  let cp = c as u32;
  (c.is_alphabetic() && (cp < 0x0530 || (0x1E00..=0x1FFF).contains(&cp)))
    || (0x1100..=0x11FF).contains(&cp)
    || (0xAC00..=0xD7A3).contains(&cp)
}

const BIDI_CONTROL: &[(u32, u32)] = &[
  (0x061C, 0x061C),
  (0x200E, 0x200F),
  (0x202A, 0x202E),
  (0x2066, 0x2069),
];

const BIDI_MIRRORED_EXTRA: &[(u32, u32)] = &[
  (0x003C, 0x003C),
  (0x003E, 0x003E),
  (0x00AB, 0x00AB),
  (0x00BB, 0x00BB),
  (0x2039, 0x203A),
  (0x2201, 0x2204),
  (0x2208, 0x220D),
  (0x2211, 0x2211),
  (0x2215, 0x2216),
  (0x221A, 0x221D),
  (0x2264, 0x226B),
  (0x2282, 0x228B),
  (0x27C3, 0x27C6),
];

const CASE_IGNORABLE_PUNCT: &[(u32, u32)] = &[
  (0x0027, 0x0027),
  (0x002E, 0x002E),
  (0x003A, 0x003A),
  (0x005E, 0x005E),
  (0x0060, 0x0060),
  (0x00A8, 0x00A8),
  (0x00AD, 0x00AD),
  (0x00AF, 0x00AF),
  (0x00B4, 0x00B4),
  (0x00B7, 0x00B8),
  (0x2018, 0x2019),
  (0x2024, 0x2024),
  (0x2027, 0x2027),
];

const DASH_EXTRA: &[(u32, u32)] = &[
  (0x2053, 0x2053),
  (0x207B, 0x207B),
  (0x208B, 0x208B),
  (0x2212, 0x2212),
];

const DEFAULT_IGNORABLE: &[(u32, u32)] = &[
  (0x00AD, 0x00AD),
  (0x034F, 0x034F),
  (0x061C, 0x061C),
  (0x115F, 0x1160),
  (0x17B4, 0x17B5),
  (0x180B, 0x180F),
  (0x200B, 0x200F),
  (0x202A, 0x202E),
  (0x2060, 0x206F),
  (0x3164, 0x3164),
  (0xFE00, 0xFE0F),
  (0xFEFF, 0xFEFF),
  (0xFFA0, 0xFFA0),
  (0xFFF0, 0xFFF8),
  (0x1BCA0, 0x1BCA3),
  (0x1D173, 0x1D17A),
  (0xE0000, 0xE0FFF),
];

const DEPRECATED: &[(u32, u32)] = &[
  (0x0149, 0x0149),
  (0x0673, 0x0673),
  (0x0F77, 0x0F77),
  (0x0F79, 0x0F79),
  (0x17A3, 0x17A4),
  (0x206A, 0x206F),
  (0x2329, 0x232A),
  (0xE0001, 0xE0001),
];

const EXTENDER: &[(u32, u32)] = &[
  (0x00B7, 0x00B7),
  (0x02D0, 0x02D1),
  (0x0640, 0x0640),
  (0x07FA, 0x07FA),
  (0x0E46, 0x0E46),
  (0x0EC6, 0x0EC6),
  (0x180A, 0x180A),
  (0x1843, 0x1843),
  (0x1AA7, 0x1AA7),
  (0x1C36, 0x1C36),
  (0x1C7B, 0x1C7B),
  (0x3005, 0x3005),
  (0x3031, 0x3035),
  (0x309D, 0x309E),
  (0x30FC, 0x30FE),
  (0xA015, 0xA015),
  (0xA60C, 0xA60C),
  (0xA9CF, 0xA9CF),
  (0xA9E6, 0xA9E6),
  (0xAA70, 0xAA70),
  (0xAADD, 0xAADD),
  (0xAAF3, 0xAAF4),
  (0xFF70, 0xFF70),
];

const FULLWIDTH_HEX: &[(u32, u32)] = &[
  (0xFF10, 0xFF19),
  (0xFF21, 0xFF26),
  (0xFF41, 0xFF46),
];

const GRAPHEME_EXTEND_EXTRA: &[(u32, u32)] = &[
  (0x09BE, 0x09BE),
  (0x09D7, 0x09D7),
  (0x0B3E, 0x0B3E),
  (0x0B57, 0x0B57),
  (0x0BBE, 0x0BBE),
  (0x0BD7, 0x0BD7),
  (0x0CC2, 0x0CC2),
  (0x0CD5, 0x0CD6),
  (0x0D3E, 0x0D3E),
  (0x0D57, 0x0D57),
  (0x0DCF, 0x0DCF),
  (0x0DDF, 0x0DDF),
  (0x200C, 0x200C),
  (0x302E, 0x302F),
  (0xFF9E, 0xFF9F),
  (0x1F3FB, 0x1F3FF),
  (0xE0020, 0xE007F),
];

const HYPHEN: &[(u32, u32)] = &[
  (0x002D, 0x002D),
  (0x00AD, 0x00AD),
  (0x058A, 0x058A),
  (0x1806, 0x1806),
  (0x2010, 0x2011),
  (0x2E17, 0x2E17),
  (0x30FB, 0x30FB),
  (0xFE63, 0xFE63),
  (0xFF0D, 0xFF0D),
  (0xFF65, 0xFF65),
];

const IDEOGRAPHIC: &[(u32, u32)] = &[
  (0x3006, 0x3007),
  (0x3021, 0x3029),
  (0x3038, 0x303A),
  (0x3400, 0x4DBF),
  (0x4E00, 0x9FFF),
  (0xF900, 0xFA6D),
  (0xFA70, 0xFAD9),
  (0x17000, 0x187F7),
  (0x18800, 0x18CD5),
  (0x1B170, 0x1B2FB),
  (0x20000, 0x2A6DF),
  (0x2A700, 0x2EBE0),
  (0x2F800, 0x2FA1D),
  (0x30000, 0x323AF),
];

const IDS_BINARY: &[(u32, u32)] = &[(0x2FF0, 0x2FF1), (0x2FF4, 0x2FFB)];

const LOGICAL_ORDER_EXCEPTION: &[(u32, u32)] = &[
  (0x0E40, 0x0E44),
  (0x0EC0, 0x0EC4),
  (0x19B5, 0x19B7),
  (0x19BA, 0x19BA),
  (0xAAB5, 0xAAB6),
  (0xAAB9, 0xAAB9),
  (0xAABB, 0xAABC),
];

const MATH_EXTRA: &[(u32, u32)] = &[
  (0x005E, 0x005E),
  (0x03D0, 0x03D2),
  (0x03D5, 0x03D5),
  (0x03F0, 0x03F1),
  (0x03F4, 0x03F5),
  (0x2016, 0x2016),
  (0x2032, 0x2034),
  (0x2040, 0x2040),
  (0x2061, 0x2064),
  (0x207D, 0x207E),
  (0x208D, 0x208E),
  (0x20D0, 0x20DC),
  (0x2102, 0x2102),
  (0x2107, 0x2107),
  (0x210A, 0x2113),
  (0x2115, 0x2115),
  (0x2119, 0x211D),
  (0x2124, 0x2124),
  (0x2128, 0x2129),
  (0x212C, 0x212D),
  (0x212F, 0x2131),
  (0x2133, 0x2138),
  (0x213C, 0x213F),
  (0x2145, 0x2149),
  (0x1D400, 0x1D7FF),
];

const PATTERN_SYNTAX: &[(u32, u32)] = &[
  (0x0021, 0x002F),
  (0x003A, 0x0040),
  (0x005B, 0x005E),
  (0x0060, 0x0060),
  (0x007B, 0x007E),
  (0x00A1, 0x00A7),
  (0x00A9, 0x00A9),
  (0x00AB, 0x00AC),
  (0x00AE, 0x00AE),
  (0x00B0, 0x00B1),
  (0x00B6, 0x00B6),
  (0x00BB, 0x00BB),
  (0x00BF, 0x00BF),
  (0x00D7, 0x00D7),
  (0x00F7, 0x00F7),
  (0x2010, 0x2027),
  (0x2030, 0x203E),
  (0x2041, 0x2053),
  (0x2055, 0x205E),
  (0x2190, 0x245F),
  (0x2500, 0x2775),
  (0x2794, 0x2BFF),
  (0x2E00, 0x2E7F),
  (0x3001, 0x3003),
  (0x3008, 0x3020),
  (0x3030, 0x3030),
  (0xFD3E, 0xFD3F),
  (0xFE45, 0xFE46),
];

const PATTERN_WHITE_SPACE: &[(u32, u32)] = &[
  (0x0009, 0x000D),
  (0x0020, 0x0020),
  (0x0085, 0x0085),
  (0x200E, 0x200F),
  (0x2028, 0x2029),
];

const QUOTATION_MARK: &[(u32, u32)] = &[
  (0x0022, 0x0022),
  (0x0027, 0x0027),
  (0x00AB, 0x00AB),
  (0x00BB, 0x00BB),
  (0x2018, 0x201F),
  (0x2039, 0x203A),
  (0x2E42, 0x2E42),
  (0x300C, 0x300F),
  (0x301D, 0x301F),
  (0xFE41, 0xFE44),
  (0xFF02, 0xFF02),
  (0xFF07, 0xFF07),
  (0xFF62, 0xFF63),
];

const RADICAL: &[(u32, u32)] = &[(0x2E80, 0x2E99), (0x2E9B, 0x2EF3), (0x2F00, 0x2FD5)];

const SOFT_DOTTED: &[(u32, u32)] = &[
  (0x0069, 0x006A),
  (0x012F, 0x012F),
  (0x0249, 0x0249),
  (0x0268, 0x0268),
  (0x029D, 0x029D),
  (0x02B2, 0x02B2),
  (0x03F3, 0x03F3),
  (0x0456, 0x0456),
  (0x0458, 0x0458),
  (0x1D62, 0x1D62),
  (0x1D96, 0x1D96),
  (0x1DA4, 0x1DA4),
  (0x1DA8, 0x1DA8),
  (0x1E2D, 0x1E2D),
  (0x1ECB, 0x1ECB),
  (0x2071, 0x2071),
  (0x2148, 0x2149),
  (0x2C7C, 0x2C7C),
];

const STERM: &[(u32, u32)] = &[
  (0x0021, 0x0021),
  (0x002E, 0x002E),
  (0x003F, 0x003F),
  (0x0589, 0x0589),
  (0x061D, 0x061F),
  (0x06D4, 0x06D4),
  (0x0700, 0x0702),
  (0x0964, 0x0965),
  (0x203C, 0x203D),
  (0x2047, 0x2049),
  (0x2E2E, 0x2E2E),
  (0x3002, 0x3002),
  (0xFE52, 0xFE52),
  (0xFE56, 0xFE57),
  (0xFF01, 0xFF01),
  (0xFF0E, 0xFF0E),
  (0xFF1F, 0xFF1F),
  (0xFF61, 0xFF61),
];

const TERMINAL_EXTRA: &[(u32, u32)] = &[
  (0x002C, 0x002C),
  (0x003A, 0x003B),
  (0x037E, 0x037E),
  (0x0387, 0x0387),
  (0x060C, 0x060C),
  (0x061B, 0x061B),
  (0x3001, 0x3001),
  (0xFE50, 0xFE51),
  (0xFE54, 0xFE55),
  (0xFF0C, 0xFF0C),
  (0xFF1A, 0xFF1B),
];

const UNIFIED_IDEOGRAPH: &[(u32, u32)] = &[
  (0x3400, 0x4DBF),
  (0x4E00, 0x9FFF),
  (0xFA0E, 0xFA0F),
  (0xFA11, 0xFA11),
  (0xFA13, 0xFA14),
  (0xFA1F, 0xFA1F),
  (0xFA21, 0xFA21),
  (0xFA23, 0xFA24),
  (0xFA27, 0xFA29),
  (0x20000, 0x2A6DF),
  (0x2A700, 0x2EBE0),
  (0x30000, 0x323AF),
];

const VARIATION_SELECTOR: &[(u32, u32)] = &[
  (0x180B, 0x180D),
  (0x180F, 0x180F),
  (0xFE00, 0xFE0F),
  (0xE0100, 0xE01EF),
];

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn names_are_sorted() {
    assert!(PROPERTY_NAMES.windows(2).all(|w| w[0].0 < w[1].0));
  }

  #[test]
  fn lookup_by_normalized_name() {
    assert_eq!(
      BinaryProperty::from_normalized_name("WHITESPACE"),
      Some(BinaryProperty::WhiteSpace)
    );
    assert_eq!(
      BinaryProperty::from_normalized_name("ALPHABETIC"),
      Some(BinaryProperty::Alphabetic)
    );
    assert_eq!(BinaryProperty::from_normalized_name("WHITE_SPACE"), None);
  }

  #[test]
  fn exact_properties() {
    use BinaryProperty::*;

    assert!(Alphabetic.contains('ż'));
    assert!(!Alphabetic.contains('1'));
    assert!(WhiteSpace.contains('\u{3000}'));
    assert!(Uppercase.contains('Ą'));
    assert!(Lowercase.contains('ą'));
    assert!(GraphemeLink.contains('\u{094D}'));
    assert!(FullCompositionExclusion.contains('\u{0958}'));
    assert!(!FullCompositionExclusion.contains('é'));
    assert!(NfdInert.contains('a'));
    assert!(!NfdInert.contains('é'));
    assert!(!NfcInert.contains('a'));
  }

  #[test]
  fn table_properties() {
    use BinaryProperty::*;

    assert!(Dash.contains('—'));
    assert!(Dash.contains('\u{2212}'));
    assert!(QuotationMark.contains('„'));
    assert!(Ideographic.contains('中'));
    assert!(NoncharacterCodePoint.contains('\u{FFFF}'));
    assert!(PatternWhiteSpace.contains('\u{2028}'));
    assert!(ChangesWhenCasefolded.contains('A'));
    assert!(!ChangesWhenCasefolded.contains('a'));
    assert!(ChangesWhenUppercased.contains('ß'));
  }
}
