use std::collections::VecDeque;

use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::stream::TokenStream;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;

pub mod expr;
pub mod func;
pub mod stmt;

#[derive(Debug)]
#[must_use]
pub struct MaybeToken {
  typ: TT,
  loc: Loc,
  matched: bool,
}

impl MaybeToken {
  pub fn is_match(&self) -> bool {
    self.matched
  }

  pub fn error(&self, err: SyntaxErrorType) -> SyntaxError {
    debug_assert!(!self.matched);
    self.loc.error(err, Some(self.typ))
  }
}

/// Recursive descent parser over a [`TokenStream`].
///
/// Unlike a plain lexer wrapper this cannot rewind arbitrarily, because the stream's
/// slash-vs-regex decision and semicolon insertion are stateful; lookahead goes through a small
/// token buffer instead.
pub struct Parser<'a> {
  stream: TokenStream<'a>,
  buf: VecDeque<Token>,
}

// Methods are extended in the expr and stmt submodules rather than passing `&mut Parser` to free
// functions everywhere.
impl<'a> Parser<'a> {
  pub fn new(source: &'a str) -> Parser<'a> {
    Parser {
      stream: TokenStream::new(source),
      buf: VecDeque::new(),
    }
  }

  pub fn str(&self, loc: Loc) -> &str {
    self.stream.str(loc)
  }

  pub fn string(&self, loc: Loc) -> String {
    self.str(loc).to_string()
  }

  fn fill(&mut self, n: usize) -> SyntaxResult<()> {
    while self.buf.len() < n {
      let t = self.stream.next()?;
      self.buf.push_back(t);
    }
    Ok(())
  }

  pub fn peek(&mut self) -> SyntaxResult<Token> {
    self.fill(1)?;
    Ok(self.buf[0].clone())
  }

  pub fn peek_2(&mut self) -> SyntaxResult<(Token, Token)> {
    self.fill(2)?;
    Ok((self.buf[0].clone(), self.buf[1].clone()))
  }

  pub fn consume(&mut self) -> SyntaxResult<Token> {
    self.fill(1)?;
    match self.buf.pop_front() {
      Some(t) => Ok(t),
      None => unreachable!(),
    }
  }

  /// Consumes the next token regardless of type, and returns its raw source code as a string.
  pub fn consume_as_string(&mut self) -> SyntaxResult<String> {
    let loc = self.consume()?.loc;
    Ok(self.string(loc))
  }

  pub fn consume_if(&mut self, typ: TT) -> SyntaxResult<MaybeToken> {
    let t = self.peek()?;
    let matched = t.typ == typ;
    if matched {
      self.buf.pop_front();
    }
    Ok(MaybeToken {
      typ,
      loc: t.loc,
      matched,
    })
  }

  pub fn require(&mut self, typ: TT) -> SyntaxResult<Token> {
    let t = self.consume()?;
    if t.typ != typ {
      Err(t.error(SyntaxErrorType::RequiredTokenNotFound(typ)))
    } else {
      Ok(t)
    }
  }

  /// Consumes a statement-terminating semicolon, or inserts one where the grammar allows.
  pub fn semicolon(&mut self) -> SyntaxResult<()> {
    let offending = self.consume()?;
    if offending.typ == TT::Semicolon {
      return Ok(());
    }
    if self.buf.is_empty() {
      // The synthesized semicolon itself isn't needed; the offending token is requeued in the
      // stream.
      if self.stream.auto_semicolon(offending.clone()).is_some() {
        return Ok(());
      }
    } else if offending.typ == TT::BraceClose
      || offending.typ == TT::EOF
      || offending.preceded_by_line_terminator
    {
      // Lookahead already pulled tokens past the offending one, so requeue locally under the
      // same insertion rule.
      self.buf.push_front(offending);
      return Ok(());
    }
    Err(offending.error(SyntaxErrorType::RequiredTokenNotFound(TT::Semicolon)))
  }
}
