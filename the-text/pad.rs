use the_stdx::{
  buf::{
    Measure,
    StrBuf,
  },
  utf8,
};

use crate::{
  error::{
    Result,
    TextError,
  },
  recycle::{
    recycle_length,
    recycling_warnings,
  },
  search::Side,
  strvec::StrVec,
};

struct Padded<'a> {
  text:  &'a [u8],
  fill:  &'a [u8],
  left:  usize,
  right: usize,
}

impl Measure for Padded<'_> {
  fn measure(&self) -> usize {
    self.text.len() + self.fill.len() * (self.left + self.right)
  }

  fn write(&self, buf: &mut StrBuf) {
    for _ in 0..self.left {
      buf.push_bytes(self.fill);
    }
    buf.push_bytes(self.text);
    for _ in 0..self.right {
      buf.push_bytes(self.fill);
    }
  }
}

/// Pads each string with `pad` up to `width` code points.
///
/// Strings already `width` long or longer are returned unchanged. With
/// [`Side::Both`] the left side gets the smaller half. NA in any argument
/// gives NA. Every non-NA `pad` must be exactly one code point, and a
/// padded string longer than [`StrBuf::MAX_LEN`] bytes is an error.
pub fn pad(strings: &StrVec, width: &[Option<i64>], side: Side, pad: &StrVec) -> Result<StrVec> {
  for fill in pad.iter().flatten() {
    if utf8::count_chars(fill)? != 1 {
      return Err(TextError::invalid("pad", "must be a single code point"));
    }
  }

  let nrecycle = recycle_length(recycling_warnings(), &[strings.len(), width.len(), pad.len()]);
  let mut out = StrVec::with_capacity(nrecycle);
  let mut buf = StrBuf::new();

  for i in 0..nrecycle {
    let (Some(text), Some(width), Some(fill)) = (
      strings.get(i % strings.len()),
      width[i % width.len()],
      pad.get(i % pad.len()),
    ) else {
      out.push(None);
      continue;
    };

    let len = utf8::count_chars(text)?;
    let needed = usize::try_from(width).unwrap_or(0).saturating_sub(len);
    if needed == 0 {
      out.push(Some(text));
      continue;
    }

    let (left, right) = match side {
      Side::Left => (needed, 0),
      Side::Right => (0, needed),
      Side::Both => (needed / 2, needed - needed / 2),
    };
    fill
      .len()
      .checked_mul(needed)
      .and_then(|filled| filled.checked_add(text.len()))
      .filter(|&total| total <= StrBuf::MAX_LEN)
      .ok_or_else(|| TextError::invalid("width", format!("padding to {width} exceeds the output limit")))?;
    out.push(Some(buf.build(&Padded {
      text,
      fill,
      left,
      right,
    })?));
  }
  Ok(out)
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn sides_and_halves() {
    let strings = StrVec::from(["ab", "żółw", "toolong"]);
    let dot = StrVec::from(".");
    assert_eq!(
      pad(&strings, &[Some(5)], Side::Left, &dot).unwrap(),
      StrVec::from(["...ab", ".żółw", "toolong"])
    );
    assert_eq!(
      pad(&strings, &[Some(5)], Side::Right, &dot).unwrap(),
      StrVec::from(["ab...", "żółw.", "toolong"])
    );
    assert_eq!(pad(&strings, &[Some(5)], Side::Both, &dot).unwrap().get_str(0), Some(".ab.."));
  }

  #[test]
  fn multibyte_fill_and_na() {
    let strings = StrVec::from([Some("x"), None, Some("y")]);
    let fill = StrVec::from("ż");
    assert_eq!(
      pad(&strings, &[Some(3), Some(3), None], Side::Left, &fill).unwrap(),
      StrVec::from([Some("żżx"), None, None])
    );
    let na_fill = StrVec::from([None::<&str>]);
    assert_eq!(pad(&strings, &[Some(3)], Side::Left, &na_fill).unwrap(), StrVec::na(3));
  }

  #[test]
  fn negative_width_keeps_string() {
    let strings = StrVec::from("abc");
    assert_eq!(pad(&strings, &[Some(-4)], Side::Both, &StrVec::from(" ")).unwrap(), strings);
  }

  #[test]
  fn fill_must_be_one_code_point() {
    let strings = StrVec::from("abc");
    for fill in ["", "ab"] {
      assert!(matches!(
        pad(&strings, &[Some(5)], Side::Left, &StrVec::from(fill)),
        Err(TextError::InvalidArgument { name: "pad", .. })
      ));
    }
  }

  #[test]
  fn oversized_width_fails() {
    let strings = StrVec::from("ab");
    for side in [Side::Left, Side::Right, Side::Both] {
      assert!(matches!(
        pad(&strings, &[Some(i64::MAX)], side, &StrVec::from("ż")),
        Err(TextError::InvalidArgument { name: "width", .. })
      ));
    }
    // width is checked only when padding is needed
    assert_eq!(pad(&strings, &[Some(i64::MIN)], Side::Left, &StrVec::from(".")).unwrap(), strings);
  }
}
