//! Benchmarks for paragraph wrapping in the-text.
//!
//! Run with: `cargo bench -p the-text --bench wrap`

use divan::{
  Bencher,
  black_box,
};
use the_text::{
  StrVec,
  wrap::wrap,
};

fn main() {
  divan::main();
}

fn make_paragraph(words: usize) -> StrVec {
  let vocabulary = ["lorem", "ipsum", "dolor", "sit", "amet,", "zażółć", "gęślą", "jaźń", "a", "consectetur"];
  let text: Vec<&str> = (0..words).map(|i| vocabulary[(i * 7) % vocabulary.len()]).collect();
  StrVec::from(text.join(" ").as_str())
}

#[divan::bench(args = [50, 200, 800])]
fn greedy(bencher: Bencher, words: usize) {
  let paragraph = make_paragraph(words);
  bencher.bench(|| wrap(black_box(&paragraph), 40, 0.0, Some("en")));
}

#[divan::bench(args = [50, 200, 800])]
fn dynamic(bencher: Bencher, words: usize) {
  let paragraph = make_paragraph(words);
  bencher.bench(|| wrap(black_box(&paragraph), 40, 2.0, Some("en")));
}
