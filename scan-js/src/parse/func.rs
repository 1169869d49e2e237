use crate::ast::Func;
use crate::ast::Identifier;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::parse::Parser;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Parses a function from just after the `function` keyword. Declarations require a name;
  /// expressions may omit it.
  pub fn parse_func_tail(&mut self, name_required: bool) -> SyntaxResult<Func> {
    let name = if self.peek()?.typ == TT::Identifier {
      let t = self.consume()?;
      Some(Identifier::new(t.loc, self.string(t.loc)))
    } else if name_required {
      return Err(
        self
          .peek()?
          .error(SyntaxErrorType::ExpectedSyntax("function name")),
      );
    } else {
      None
    };

    self.require(TT::ParenthesisOpen)?;
    let mut params = Vec::new();
    if !self.consume_if(TT::ParenthesisClose)?.is_match() {
      loop {
        let t = self.require(TT::Identifier)?;
        params.push(Identifier::new(t.loc, self.string(t.loc)));
        if !self.consume_if(TT::Comma)?.is_match() {
          break;
        }
      }
      self.require(TT::ParenthesisClose)?;
    }

    self.require(TT::BraceOpen)?;
    let body = self.parse_stmts_until(TT::BraceClose)?;
    self.require(TT::BraceClose)?;

    Ok(Func {
      name,
      params,
      body,
      scope: None,
    })
  }
}
