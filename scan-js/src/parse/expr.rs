use crate::ast::Expr;
use crate::ast::Identifier;
use crate::ast::Property;
use crate::ast::PropertyKey;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::parse::Parser;
use crate::token::TT;

fn is_assignment_operator(typ: TT) -> bool {
  matches!(
    typ,
    TT::Equals
      | TT::PlusEquals
      | TT::HyphenEquals
      | TT::AsteriskEquals
      | TT::SlashEquals
      | TT::PercentEquals
      | TT::ChevronLeftChevronLeftEquals
      | TT::ChevronRightChevronRightEquals
      | TT::ChevronRightChevronRightChevronRightEquals
      | TT::AmpersandEquals
      | TT::CaretEquals
      | TT::BarEquals
  )
}

// Higher binds tighter. `in` only participates when the grammar position allows it (it's the
// for-in separator otherwise).
fn binary_precedence(typ: TT, no_in: bool) -> Option<u8> {
  Some(match typ {
    TT::BarBar => 1,
    TT::AmpersandAmpersand => 2,
    TT::Bar => 3,
    TT::Caret => 4,
    TT::Ampersand => 5,
    TT::EqualsEquals | TT::ExclamationEquals | TT::EqualsEqualsEquals | TT::ExclamationEqualsEquals => 6,
    TT::ChevronLeft | TT::ChevronRight | TT::ChevronLeftEquals | TT::ChevronRightEquals | TT::KeywordInstanceof => 7,
    TT::KeywordIn if !no_in => 7,
    TT::ChevronLeftChevronLeft | TT::ChevronRightChevronRight | TT::ChevronRightChevronRightChevronRight => 8,
    TT::Plus | TT::Hyphen => 9,
    TT::Asterisk | TT::Slash | TT::Percent => 10,
    _ => return None,
  })
}

fn is_valid_assignment_target(expr: &Expr) -> bool {
  match expr {
    Expr::Ident(_) | Expr::Member { .. } | Expr::Index { .. } => true,
    Expr::Group(inner) => is_valid_assignment_target(inner),
    _ => false,
  }
}

impl<'a> Parser<'a> {
  /// Full expression including the comma operator.
  pub fn parse_expr(&mut self, no_in: bool) -> SyntaxResult<Expr> {
    let mut expr = self.parse_assign(no_in)?;
    while self.consume_if(TT::Comma)?.is_match() {
      let right = self.parse_assign(no_in)?;
      expr = Expr::Comma {
        left: Box::new(expr),
        right: Box::new(right),
      };
    }
    Ok(expr)
  }

  pub fn parse_assign(&mut self, no_in: bool) -> SyntaxResult<Expr> {
    let target = self.parse_cond(no_in)?;
    let t = self.peek()?;
    if !is_assignment_operator(t.typ) {
      return Ok(target);
    }
    if !is_valid_assignment_target(&target) {
      return Err(t.error(SyntaxErrorType::InvalidAssignmentTarget));
    }
    self.consume()?;
    // Right associative.
    let value = self.parse_assign(no_in)?;
    Ok(Expr::Assign {
      op: t.typ,
      target: Box::new(target),
      value: Box::new(value),
    })
  }

  fn parse_cond(&mut self, no_in: bool) -> SyntaxResult<Expr> {
    let test = self.parse_binary(no_in, 1)?;
    if !self.consume_if(TT::Question)?.is_match() {
      return Ok(test);
    }
    // The consequent always permits `in`; only the alternate inherits the restriction.
    let cons = self.parse_assign(false)?;
    self.require(TT::Colon)?;
    let alt = self.parse_assign(no_in)?;
    Ok(Expr::Cond {
      test: Box::new(test),
      cons: Box::new(cons),
      alt: Box::new(alt),
    })
  }

  fn parse_binary(&mut self, no_in: bool, min_prec: u8) -> SyntaxResult<Expr> {
    let mut left = self.parse_unary()?;
    loop {
      let t = self.peek()?;
      let Some(prec) = binary_precedence(t.typ, no_in) else {
        break;
      };
      if prec < min_prec {
        break;
      }
      self.consume()?;
      let right = self.parse_binary(no_in, prec + 1)?;
      left = Expr::Binary {
        op: t.typ,
        left: Box::new(left),
        right: Box::new(right),
      };
    }
    Ok(left)
  }

  fn parse_unary(&mut self) -> SyntaxResult<Expr> {
    let t = self.peek()?;
    match t.typ {
      TT::Exclamation
      | TT::Tilde
      | TT::Plus
      | TT::Hyphen
      | TT::PlusPlus
      | TT::HyphenHyphen
      | TT::KeywordTypeof
      | TT::KeywordVoid
      | TT::KeywordDelete => {
        self.consume()?;
        let arg = self.parse_unary()?;
        Ok(Expr::Unary {
          op: t.typ,
          arg: Box::new(arg),
        })
      }
      _ => self.parse_postfix(),
    }
  }

  fn parse_postfix(&mut self) -> SyntaxResult<Expr> {
    let expr = self.parse_member_chain(true)?;
    let t = self.peek()?;
    // `a\n++` never attaches; the `++` starts the next statement.
    if matches!(t.typ, TT::PlusPlus | TT::HyphenHyphen) && !t.preceded_by_line_terminator {
      self.consume()?;
      return Ok(Expr::Postfix {
        op: t.typ,
        arg: Box::new(expr),
      });
    }
    Ok(expr)
  }

  // The callee of `new` absorbs member accesses but not calls; the first argument list (if any)
  // belongs to the `new` itself.
  fn parse_member_chain(&mut self, allow_call: bool) -> SyntaxResult<Expr> {
    let mut expr = if self.peek()?.typ == TT::KeywordNew {
      self.consume()?;
      let callee = self.parse_member_chain(false)?;
      let args = if self.peek()?.typ == TT::ParenthesisOpen {
        Some(self.parse_call_args()?)
      } else {
        None
      };
      Expr::New {
        callee: Box::new(callee),
        args,
      }
    } else {
      self.parse_primary()?
    };
    loop {
      let t = self.peek()?;
      match t.typ {
        TT::Dot => {
          self.consume()?;
          let name = self.require(TT::Identifier)?;
          expr = Expr::Member {
            object: Box::new(expr),
            property: self.string(name.loc),
          };
        }
        TT::BracketOpen => {
          self.consume()?;
          let index = self.parse_expr(false)?;
          self.require(TT::BracketClose)?;
          expr = Expr::Index {
            object: Box::new(expr),
            index: Box::new(index),
          };
        }
        TT::ParenthesisOpen if allow_call => {
          let args = self.parse_call_args()?;
          expr = Expr::Call {
            callee: Box::new(expr),
            args,
          };
        }
        _ => break,
      }
    }
    Ok(expr)
  }

  fn parse_call_args(&mut self) -> SyntaxResult<Vec<Expr>> {
    self.require(TT::ParenthesisOpen)?;
    let mut args = Vec::new();
    if self.consume_if(TT::ParenthesisClose)?.is_match() {
      return Ok(args);
    }
    loop {
      args.push(self.parse_assign(false)?);
      if !self.consume_if(TT::Comma)?.is_match() {
        break;
      }
    }
    self.require(TT::ParenthesisClose)?;
    Ok(args)
  }

  fn parse_primary(&mut self) -> SyntaxResult<Expr> {
    let t = self.consume()?;
    Ok(match t.typ {
      TT::KeywordThis => Expr::This,
      TT::Identifier => Expr::Ident(Identifier::new(t.loc, self.string(t.loc))),
      TT::LiteralNull => Expr::Null,
      TT::LiteralTrue => Expr::True,
      TT::LiteralFalse => Expr::False,
      TT::LiteralNumber => Expr::Num {
        raw: self.string(t.loc),
      },
      TT::LiteralString => Expr::Str {
        raw: self.string(t.loc),
      },
      TT::LiteralRegex => Expr::Regex {
        raw: self.string(t.loc),
      },
      TT::BracketOpen => self.parse_array_literal()?,
      TT::BraceOpen => self.parse_object_literal()?,
      TT::ParenthesisOpen => {
        let inner = self.parse_expr(false)?;
        self.require(TT::ParenthesisClose)?;
        Expr::Group(Box::new(inner))
      }
      TT::KeywordFunction => {
        let func = self.parse_func_tail(false)?;
        Expr::Func(Box::new(func))
      }
      TT::EOF => return Err(t.error(SyntaxErrorType::UnexpectedEnd)),
      _ => return Err(t.error(SyntaxErrorType::UnexpectedToken)),
    })
  }

  // The opening `[` has been consumed. Elisions become None elements; a trailing comma adds no
  // element.
  fn parse_array_literal(&mut self) -> SyntaxResult<Expr> {
    let mut elements = Vec::new();
    loop {
      if self.consume_if(TT::BracketClose)?.is_match() {
        break;
      }
      if self.consume_if(TT::Comma)?.is_match() {
        elements.push(None);
        continue;
      }
      elements.push(Some(self.parse_assign(false)?));
      if !self.consume_if(TT::Comma)?.is_match() {
        self.require(TT::BracketClose)?;
        break;
      }
    }
    Ok(Expr::Array(elements))
  }

  // The opening `{` has been consumed.
  fn parse_object_literal(&mut self) -> SyntaxResult<Expr> {
    let mut properties = Vec::new();
    loop {
      if self.consume_if(TT::BraceClose)?.is_match() {
        break;
      }
      let t = self.consume()?;
      let key = match t.typ {
        TT::Identifier => PropertyKey::Ident(self.string(t.loc)),
        TT::LiteralString => PropertyKey::Str(self.string(t.loc)),
        TT::LiteralNumber => PropertyKey::Num(self.string(t.loc)),
        _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("property name"))),
      };
      self.require(TT::Colon)?;
      let value = self.parse_assign(false)?;
      properties.push(Property { key, value });
      if !self.consume_if(TT::Comma)?.is_match() {
        self.require(TT::BraceClose)?;
        break;
      }
    }
    Ok(Expr::Object(properties))
  }
}
