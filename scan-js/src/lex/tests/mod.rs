#![cfg(test)]

use crate::error::SyntaxErrorType;
use crate::lex::lex_next;
use crate::lex::stream::TokenStream;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::token::TT;
use crate::token::TT::*;

fn check<const N: usize>(code: &str, expecteds: [TT; N]) {
  let mut lexer = Lexer::new(code);
  for expected in expecteds {
    let t = lex_next(&mut lexer, LexMode::Standard);
    assert_eq!(t.typ, expected, "in {:?}", code);
  }
  let t = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(EOF, t.typ);
}

// Like `check`, but driven through the stream so slash disambiguation and restricted-production
// semicolon insertion apply.
fn check_stream<const N: usize>(code: &str, expecteds: [TT; N]) {
  let mut stream = TokenStream::new(code);
  for expected in expecteds {
    let t = stream.next().unwrap();
    assert_eq!(t.typ, expected, "in {:?}", code);
  }
  let t = stream.next().unwrap();
  assert_eq!(EOF, t.typ);
}

fn check_stream_texts<const N: usize>(code: &str, expecteds: [(TT, &str); N]) {
  let mut stream = TokenStream::new(code);
  for (expected, text) in expecteds {
    let t = stream.next().unwrap();
    assert_eq!(t.typ, expected, "in {:?}", code);
    assert_eq!(stream.str(t.loc), text, "in {:?}", code);
  }
  let t = stream.next().unwrap();
  assert_eq!(EOF, t.typ);
}

fn check_error(code: &str, expected: SyntaxErrorType) {
  let mut stream = TokenStream::new(code);
  loop {
    match stream.next() {
      Ok(t) if t.typ == EOF => panic!("no error in {:?}", code),
      Ok(_) => {}
      Err(err) => {
        assert_eq!(err.typ, expected);
        return;
      }
    }
  }
}

#[test]
fn test_lex_keywords() {
  check("instanceof", [KeywordInstanceof]);
  check("var x", [KeywordVar, Identifier]);
  check("this", [KeywordThis]);
  check("null true false", [LiteralNull, LiteralTrue, LiteralFalse]);
}

#[test]
fn test_lex_identifiers() {
  check("h929", [Identifier]);
  check("$_", [Identifier]);
  // Identifiers that merely start with a keyword.
  check("nullify", [Identifier]);
  check("truelie", [Identifier]);
  check("falsy", [Identifier]);
  check("instanceofx", [Identifier]);
  check("ifs", [Identifier]);
  check("\\u0061bc", [Identifier]);
  check("a\\u{1d11}b", [Identifier]);
}

#[test]
fn test_lex_literal_numbers() {
  check("1", [LiteralNumber]);
  check("929", [LiteralNumber]);
  check(".929", [LiteralNumber]);
  check(". 929", [Dot, LiteralNumber]);
  check(". 929.2.", [Dot, LiteralNumber, Dot]);
  check(".929.2..", [LiteralNumber, LiteralNumber, Dot, Dot]);
  check(".929. 2..", [LiteralNumber, Dot, LiteralNumber, Dot]);
  check("3.e2", [LiteralNumber]);
  check("1.5e-7", [LiteralNumber]);
  check("1E+10", [LiteralNumber]);
  check("0x001", [LiteralNumber]);
  check("0Xdeadbeef", [LiteralNumber]);
  // Legacy octal; no fractional part follows it.
  check("010", [LiteralNumber]);
  check("010.5", [LiteralNumber, LiteralNumber]);
  check("089.5", [LiteralNumber]);
}

#[test]
fn test_lex_literal_strings() {
  check("'hello world'", [LiteralString]);
  check("\"mxmlm\"", [LiteralString]);
  check("'dont\\'t'", [LiteralString]);
  check("'split \\\nline'", [LiteralString]);
  check("'split \\\r\nline'", [LiteralString]);
  check("'split \\\u{2028}line'", [LiteralString]);
  // Every unescaped line terminator invalidates the literal, whichever side of the memchr
  // stop bytes it falls on.
  check("'hello world\n'", [Invalid]);
  check("'hello world\r'", [Invalid]);
  check("'hello world\r\n'", [Invalid]);
  check("'hello\u{2028}world'", [Invalid]);
  check("'hello\u{2029}world'", [Invalid]);
}

#[test]
fn test_lex_operators() {
  check(">>>=", [ChevronRightChevronRightChevronRightEquals]);
  check(">>> 2", [ChevronRightChevronRightChevronRight, LiteralNumber]);
  check("a !== b", [Identifier, ExclamationEqualsEquals, Identifier]);
  check("x <<= 1", [Identifier, ChevronLeftChevronLeftEquals, LiteralNumber]);
  check("i++ + ++j", [Identifier, PlusPlus, Plus, PlusPlus, Identifier]);
}

#[test]
fn test_lex_comments() {
  check("a // till the end\nb", [Identifier, Identifier]);
  check("a /* one\ntwo */ b", [Identifier, Identifier]);
  check("/* unterminated", []);
  check("<!-- html open is a comment\nx", [Identifier]);
  // `-->` only opens a comment at the start of a line.
  check("--> a comment\nx", [Identifier]);
  check("a\n--> also a comment", [Identifier]);
  check("a --> b", [Identifier, HyphenHyphen, ChevronRight, Identifier]);
}

#[test]
fn test_lex_regex_vs_division() {
  check_stream_texts("a=/a*/,1", [
    (Identifier, "a"),
    (Equals, "="),
    (LiteralRegex, "/a*/"),
    (Comma, ","),
    (LiteralNumber, "1"),
  ]);
  // `/` inside a character class does not terminate the literal.
  check_stream_texts("a=/a*[^/]+/,1", [
    (Identifier, "a"),
    (Equals, "="),
    (LiteralRegex, "/a*[^/]+/"),
    (Comma, ","),
    (LiteralNumber, "1"),
  ]);
  check_stream_texts("a=/a*\\[/,1", [
    (Identifier, "a"),
    (Equals, "="),
    (LiteralRegex, "/a*\\[/"),
    (Comma, ","),
    (LiteralNumber, "1"),
  ]);
  check_stream_texts("a=/[a-z]+/gi", [
    (Identifier, "a"),
    (Equals, "="),
    (LiteralRegex, "/[a-z]+/gi"),
  ]);
  // After an expression-ending token, `/` is division.
  check_stream("x = this / y;", [
    Identifier, Equals, KeywordThis, Slash, Identifier, Semicolon,
  ]);
  check_stream("x = 10 / 2", [
    Identifier, Equals, LiteralNumber, Slash, LiteralNumber,
  ]);
  check_stream("(a) / b", [
    ParenthesisOpen, Identifier, ParenthesisClose, Slash, Identifier,
  ]);
  check_stream("a[0] / b", [
    Identifier, BracketOpen, LiteralNumber, BracketClose, Slash, Identifier,
  ]);
  check_stream("x /= 2", [Identifier, SlashEquals, LiteralNumber]);
  // At the very start of input, `/` begins a regex.
  check_stream("/abc/.test(s)", [
    LiteralRegex, Dot, Identifier, ParenthesisOpen, Identifier, ParenthesisClose,
  ]);
  // After keywords and operators, `/` begins a regex.
  check_stream("typeof /abc/", [KeywordTypeof, LiteralRegex]);
  check_stream("return /abc/;", [KeywordReturn, LiteralRegex, Semicolon]);
  check_stream("a = b ? /x/ : /y/", [
    Identifier, Equals, Identifier, Question, LiteralRegex, Colon, LiteralRegex,
  ]);
  // Classification only looks at the previous token, so `/` after a `for` header's `)` is
  // division, exactly like `(a) / b` above.
  check_stream("for (;;) /x/.test(s);", [
    KeywordFor,
    ParenthesisOpen,
    Semicolon,
    Semicolon,
    ParenthesisClose,
    Slash,
    Identifier,
    Slash,
    Dot,
    Identifier,
    ParenthesisOpen,
    Identifier,
    ParenthesisClose,
    Semicolon,
  ]);
}

#[test]
fn test_restricted_semicolon_insertion() {
  // A line break after `return` terminates the statement.
  check_stream("return\na", [KeywordReturn, Semicolon, Identifier]);
  check_stream("return a", [KeywordReturn, Identifier]);
  check_stream("break\nouter", [KeywordBreak, Semicolon, Identifier]);
  check_stream("continue\nouter", [KeywordContinue, Semicolon, Identifier]);
  check_stream("throw\ne", [KeywordThrow, Semicolon, Identifier]);
  // A comment containing a line terminator counts as a line break.
  check_stream("return /* \n */ a", [KeywordReturn, Semicolon, Identifier]);
  check_stream("return /* */ a", [KeywordReturn, Identifier]);
}

#[test]
fn test_synthesized_semicolon_is_empty() {
  let mut stream = TokenStream::new("return\nab");
  let ret = stream.next().unwrap();
  assert_eq!(ret.typ, KeywordReturn);
  let semi = stream.next().unwrap();
  assert_eq!(semi.typ, Semicolon);
  assert!(semi.loc.is_empty());
  let id = stream.next().unwrap();
  assert_eq!(id.typ, Identifier);
  assert_eq!(semi.loc.0, id.loc.0);
}

#[test]
fn test_auto_semicolon() {
  // Legal: offending token on a new line.
  let mut stream = TokenStream::new("a\nb");
  assert_eq!(stream.next().unwrap().typ, Identifier);
  let offending = stream.next().unwrap();
  assert_eq!(offending.typ, Identifier);
  let semi = stream.auto_semicolon(offending).unwrap();
  assert_eq!(semi.typ, Semicolon);
  // The offending token is replayed.
  assert_eq!(stream.next().unwrap().typ, Identifier);
  assert_eq!(stream.next().unwrap().typ, EOF);

  // Legal: offending token is `}`.
  let mut stream = TokenStream::new("{a}");
  assert_eq!(stream.next().unwrap().typ, BraceOpen);
  assert_eq!(stream.next().unwrap().typ, Identifier);
  let offending = stream.next().unwrap();
  assert_eq!(offending.typ, BraceClose);
  assert!(stream.auto_semicolon(offending).is_some());
  assert_eq!(stream.next().unwrap().typ, BraceClose);

  // Legal: offending token is EOF.
  let mut stream = TokenStream::new("a");
  assert_eq!(stream.next().unwrap().typ, Identifier);
  let offending = stream.next().unwrap();
  assert_eq!(offending.typ, EOF);
  assert!(stream.auto_semicolon(offending).is_some());

  // Illegal: same line, ordinary token.
  let mut stream = TokenStream::new("a b");
  assert_eq!(stream.next().unwrap().typ, Identifier);
  let offending = stream.next().unwrap();
  assert!(stream.auto_semicolon(offending).is_none());
}

#[test]
fn test_lex_errors() {
  check_error("'abc", SyntaxErrorType::UnterminatedString);
  check_error("\"abc\ndef\"", SyntaxErrorType::UnterminatedString);
  check_error("\"abc\rdef\"", SyntaxErrorType::UnterminatedString);
  check_error("\"abc\u{2028}def\"", SyntaxErrorType::UnterminatedString);
  check_error("a = /abc", SyntaxErrorType::UnterminatedRegex);
  check_error("a = /abc\n/", SyntaxErrorType::UnterminatedRegex);
  check_error("a = #b", SyntaxErrorType::IllegalChar);
  check_error("a @ b", SyntaxErrorType::IllegalChar);
}
