//! Benchmarks for display width in the-core.
//!
//! Run with: `cargo bench -p the-core --bench grapheme`

use divan::{
  Bencher,
  black_box,
};
use the_core::grapheme::str_width;

fn main() {
  divan::main();
}

fn repeat_to(unit: &str, size: usize) -> String {
  let mut s = String::with_capacity(size + unit.len());
  while s.len() < size {
    s.push_str(unit);
  }
  s
}

const SIZES: [usize; 3] = [64, 1024, 16 * 1024];

mod width {
  use super::*;

  #[divan::bench(args = SIZES)]
  fn ascii(bencher: Bencher, size: usize) {
    let text = repeat_to("The quick brown fox jumps over the lazy dog. ", size);
    bencher.bench(|| str_width(black_box(text.as_bytes())));
  }

  #[divan::bench(args = SIZES)]
  fn cjk(bencher: Bencher, size: usize) {
    let text = repeat_to("漢字文字測試中文日本語韓國語", size);
    bencher.bench(|| str_width(black_box(text.as_bytes())));
  }

  #[divan::bench(args = SIZES)]
  fn combining(bencher: Bencher, size: usize) {
    let text = repeat_to("a\u{0301}", size);
    bencher.bench(|| str_width(black_box(text.as_bytes())));
  }

  #[divan::bench(args = SIZES)]
  fn emoji(bencher: Bencher, size: usize) {
    let text = repeat_to("Hello 世界! 🎉 Test テスト 😀 ", size);
    bencher.bench(|| str_width(black_box(text.as_bytes())));
  }
}
