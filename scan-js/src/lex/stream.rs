use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::lex_next;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;

/// Lexer driver that resolves the two context-sensitive parts of the grammar: whether a `/`
/// starts a regular expression or a division operator, and automatic semicolon insertion.
///
/// The slash decision needs only the previously emitted significant token. ASI has two halves:
/// the restricted productions (`return` etc. followed by a line break) are handled here, inline;
/// the parser drives the second half through [`TokenStream::auto_semicolon`] when a statement
/// fails to end in an explicit `;`.
pub struct TokenStream<'a> {
  lexer: Lexer<'a>,
  // Type of the last significant token handed out.
  prev: Option<TT>,
  // At most one token can ever be pushed back: the one displaced by a synthesized semicolon.
  pending: Option<Token>,
}

impl<'a> TokenStream<'a> {
  pub fn new(source: &'a str) -> TokenStream<'a> {
    TokenStream {
      lexer: Lexer::new(source),
      prev: None,
      pending: None,
    }
  }

  pub fn str(&self, loc: Loc) -> &str {
    &self.lexer[loc]
  }

  fn synthesize_semicolon(&mut self, at: &Token) -> Token {
    Token {
      loc: at.loc.at_start(),
      typ: TT::Semicolon,
      preceded_by_line_terminator: at.preceded_by_line_terminator,
    }
  }

  pub fn next(&mut self) -> SyntaxResult<Token> {
    if let Some(t) = self.pending.take() {
      self.prev = Some(t.typ);
      return Ok(t);
    }

    let mode = if self.prev.map_or(false, |t| t.ends_expression()) {
      LexMode::Standard
    } else {
      LexMode::SlashIsRegex
    };
    let t = lex_next(&mut self.lexer, mode);

    if t.typ == TT::Invalid {
      // Classify by the first character of the rejected text.
      let typ = match self.lexer.source()[t.loc.0..].chars().next() {
        Some('"') | Some('\'') => SyntaxErrorType::UnterminatedString,
        Some('/') => SyntaxErrorType::UnterminatedRegex,
        _ => SyntaxErrorType::IllegalChar,
      };
      return Err(t.error(typ));
    }

    // Restricted productions: a line break after these keywords terminates the statement no
    // matter what follows.
    if self.prev.map_or(false, |p| p.is_restricted()) && t.preceded_by_line_terminator {
      let semi = self.synthesize_semicolon(&t);
      debug_assert!(self.pending.is_none());
      self.pending = Some(t);
      self.prev = Some(TT::Semicolon);
      return Ok(semi);
    }

    self.prev = Some(t.typ);
    Ok(t)
  }

  /// Second-chance semicolon insertion, called by the parser when it required a `;` but found
  /// `offending` instead. Legal only when the offending token is `}`, EOF, or sits on a new
  /// line; in that case the offending token is pushed back and a synthesized semicolon is
  /// returned. Returns None when insertion is not permitted.
  pub fn auto_semicolon(&mut self, offending: Token) -> Option<Token> {
    let legal = offending.typ == TT::BraceClose
      || offending.typ == TT::EOF
      || offending.preceded_by_line_terminator;
    if !legal {
      return None;
    }
    let semi = self.synthesize_semicolon(&offending);
    debug_assert!(self.pending.is_none());
    self.pending = Some(offending);
    self.prev = Some(TT::Semicolon);
    Some(semi)
  }
}
