//! Boundary-aware output writer.
//!
//! Callers emit token-sized fragments (keywords, identifiers, numbers, punctuation) and the
//! writer inserts the minimal whitespace required so the concatenation can't be lexed as a
//! different token sequence: `return x` not `returnx`, `a+ +b` not `a++b`, `a/ /re/` not
//! `a//re/`. It also breaks up accidental HTML comment markers (`<!--` anywhere, `-->` at the
//! start of a line), which a lexer would otherwise swallow as comments.

/// Controls layout; token-merge protection applies in both modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmitMode {
  /// No whitespace beyond what boundary protection requires.
  Minified,
  /// One statement per line, indented two spaces per nesting level.
  Pretty,
}

// What the last emitted significant character(s) could merge with.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Boundary {
  None,
  Word,
  Number,
  Plus,
  PlusPlus,
  Minus,
  MinusMinus,
  Slash,
}

// How the next fragment starts.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Leading {
  None,
  Word,
  Number,
  Plus,
  Minus,
  Slash,
  Star,
  Dot,
  Other,
}

// Progress towards emitting an HTML comment marker.
#[derive(Clone, Copy, PartialEq, Eq)]
enum HtmlStart {
  LineStart,
  Lt,
  LtBang,
  LtBangDash,
  Dash,
  DashDash,
  Other,
}

pub struct Emitter {
  out: String,
  mode: EmitMode,
  trailing: Boundary,
  html: HtmlStart,
  indent: usize,
}

impl Emitter {
  pub fn new(mode: EmitMode) -> Emitter {
    Emitter {
      out: String::new(),
      mode,
      trailing: Boundary::None,
      html: HtmlStart::LineStart,
      indent: 0,
    }
  }

  pub fn mode(&self) -> EmitMode {
    self.mode
  }

  pub fn into_string(self) -> String {
    self.out
  }

  pub fn write_keyword(&mut self, keyword: &str) {
    self.write_fragment(keyword, Leading::Word, Boundary::Word);
  }

  pub fn write_identifier(&mut self, identifier: &str) {
    self.write_fragment(identifier, leading_of(identifier), Boundary::Word);
  }

  pub fn write_number(&mut self, number: &str) {
    self.write_fragment(number, leading_of(number), trailing_of(number));
  }

  pub fn write_punct(&mut self, punct: &str) {
    let trailing = match punct {
      "+" => Boundary::Plus,
      "++" => Boundary::PlusPlus,
      "-" => Boundary::Minus,
      "--" => Boundary::MinusMinus,
      "/" => Boundary::Slash,
      _ => Boundary::None,
    };
    self.write_fragment(punct, leading_of(punct), trailing);
  }

  /// Writes a complete literal (string or regex) verbatim.
  pub fn write_literal(&mut self, raw: &str) {
    self.write_fragment(raw, leading_of(raw), trailing_of(raw));
  }

  pub fn write_space(&mut self) {
    self.out.push(' ');
    self.trailing = Boundary::None;
    self.html = HtmlStart::Other;
  }

  /// In pretty mode, starts a fresh indented line. No-op when minifying.
  pub fn write_line(&mut self) {
    if self.mode != EmitMode::Pretty {
      return;
    }
    self.out.push('\n');
    for _ in 0..self.indent {
      self.out.push_str("  ");
    }
    self.trailing = Boundary::None;
    self.html = HtmlStart::LineStart;
  }

  pub fn indent(&mut self) {
    self.indent += 1;
  }

  pub fn dedent(&mut self) {
    // A dedent without a matching indent is a caller bug.
    debug_assert!(self.indent > 0);
    self.indent = self.indent.saturating_sub(1);
  }

  fn write_fragment(&mut self, text: &str, leading: Leading, trailing: Boundary) {
    if text.is_empty() {
      return;
    }
    if needs_space(self.trailing, leading) || would_form_html_comment(self.html, text.as_bytes()) {
      self.out.push(' ');
      self.html = HtmlStart::Other;
    }
    self.out.push_str(text);
    for &b in text.as_bytes() {
      self.html = next_html(self.html, b).0;
    }
    self.trailing = trailing;
  }
}

// A space resets the marker state, so breaking before the fragment is enough even when the
// hazardous byte is not the fragment's first.
fn would_form_html_comment(mut state: HtmlStart, bytes: &[u8]) -> bool {
  for &b in bytes {
    let (next, hazard) = next_html(state, b);
    if hazard {
      return true;
    }
    state = next;
  }
  false
}

// Tracks `<!--` (a comment opener anywhere) and `-->` (a comment opener only at the start of
// a line). The hazard flag marks the byte that would complete a marker.
fn next_html(state: HtmlStart, b: u8) -> (HtmlStart, bool) {
  match (state, b) {
    (_, b'\n') => (HtmlStart::LineStart, false),
    (_, b' ') => (HtmlStart::Other, false),
    (HtmlStart::Lt, b'!') => (HtmlStart::LtBang, false),
    (HtmlStart::LtBang, b'-') => (HtmlStart::LtBangDash, false),
    (HtmlStart::LtBangDash, b'-') => (HtmlStart::Other, true),
    (HtmlStart::LineStart, b'-') => (HtmlStart::Dash, false),
    (HtmlStart::Dash, b'-') => (HtmlStart::DashDash, false),
    (HtmlStart::DashDash, b'>') => (HtmlStart::Other, true),
    (_, b'<') => (HtmlStart::Lt, false),
    _ => (HtmlStart::Other, false),
  }
}

fn needs_space(prev: Boundary, next: Leading) -> bool {
  match (prev, next) {
    (Boundary::Word, Leading::Word)
    | (Boundary::Word, Leading::Number)
    | (Boundary::Number, Leading::Word)
    | (Boundary::Number, Leading::Number) => true,
    // `1 .toString()` must not fuse into `1.toString()`.
    (Boundary::Number, Leading::Dot) => true,
    (Boundary::Plus, Leading::Plus)
    | (Boundary::PlusPlus, Leading::Plus)
    | (Boundary::Minus, Leading::Minus)
    | (Boundary::MinusMinus, Leading::Minus)
    | (Boundary::Slash, Leading::Slash)
    | (Boundary::Slash, Leading::Star) => true,
    _ => false,
  }
}

fn leading_of(text: &str) -> Leading {
  match text.as_bytes().first() {
    None => Leading::None,
    Some(b'0'..=b'9') => Leading::Number,
    Some(b'a'..=b'z') | Some(b'A'..=b'Z') | Some(b'_') | Some(b'$') => Leading::Word,
    // Unicode identifier characters and `\uXXXX` escapes continue an identifier.
    Some(b'\\') => Leading::Word,
    Some(&b) if !b.is_ascii() => Leading::Word,
    Some(b'+') => Leading::Plus,
    Some(b'-') => Leading::Minus,
    Some(b'/') => Leading::Slash,
    Some(b'*') => Leading::Star,
    Some(b'.') => Leading::Dot,
    _ => Leading::Other,
  }
}

fn trailing_of(text: &str) -> Boundary {
  match text.as_bytes().last() {
    None => Boundary::None,
    Some(b'0'..=b'9') | Some(b'.') => Boundary::Number,
    Some(b'a'..=b'z') | Some(b'A'..=b'Z') | Some(b'_') | Some(b'$') => Boundary::Word,
    Some(&b) if !b.is_ascii() => Boundary::Word,
    Some(b'+') => Boundary::Plus,
    Some(b'-') => Boundary::Minus,
    Some(b'/') => Boundary::Slash,
    _ => Boundary::None,
  }
}

#[cfg(test)]
mod tests {
  use super::EmitMode;
  use super::Emitter;

  #[test]
  fn test_words_are_separated() {
    let mut em = Emitter::new(EmitMode::Minified);
    em.write_keyword("return");
    em.write_identifier("a");
    assert_eq!(em.into_string(), "return a");
  }

  #[test]
  fn test_punctuation_does_not_separate_words() {
    let mut em = Emitter::new(EmitMode::Minified);
    em.write_keyword("if");
    em.write_punct("(");
    em.write_identifier("a");
    em.write_punct(")");
    em.write_identifier("b");
    assert_eq!(em.into_string(), "if(a)b");
  }

  #[test]
  fn test_plus_sequences_do_not_merge() {
    let mut em = Emitter::new(EmitMode::Minified);
    em.write_identifier("a");
    em.write_punct("+");
    em.write_punct("+");
    em.write_identifier("b");
    assert_eq!(em.into_string(), "a+ +b");
  }

  #[test]
  fn test_number_before_dot_keeps_space() {
    let mut em = Emitter::new(EmitMode::Minified);
    em.write_number("1");
    em.write_punct(".");
    em.write_identifier("x");
    assert_eq!(em.into_string(), "1 .x");
  }

  #[test]
  fn test_slash_before_regex_keeps_space() {
    let mut em = Emitter::new(EmitMode::Minified);
    em.write_identifier("a");
    em.write_punct("/");
    em.write_literal("/b/");
    assert_eq!(em.into_string(), "a/ /b/");
  }

  #[test]
  fn test_html_open_comment_is_broken() {
    let mut em = Emitter::new(EmitMode::Minified);
    em.write_identifier("a");
    em.write_punct("<");
    em.write_punct("!");
    em.write_punct("--");
    em.write_identifier("b");
    assert_eq!(em.into_string(), "a<! --b");
  }

  #[test]
  fn test_html_close_comment_is_broken_at_line_start() {
    let mut em = Emitter::new(EmitMode::Minified);
    em.write_punct("--");
    em.write_punct(">");
    assert_eq!(em.into_string(), "-- >");
  }

  #[test]
  fn test_pretty_indentation() {
    let mut em = Emitter::new(EmitMode::Pretty);
    em.write_punct("{");
    em.indent();
    em.write_line();
    em.write_identifier("a");
    em.dedent();
    em.write_line();
    em.write_punct("}");
    assert_eq!(em.into_string(), "{\n  a\n}");
  }
}
