use crate::ast::CatchClause;
use crate::ast::ForInLeft;
use crate::ast::ForInit;
use crate::ast::Identifier;
use crate::ast::Program;
use crate::ast::Stmt;
use crate::ast::SwitchCase;
use crate::ast::VarDeclarator;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::parse::Parser;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn parse_program(&mut self) -> SyntaxResult<Program> {
    let body = self.parse_stmts_until(TT::EOF)?;
    Ok(Program { body })
  }

  /// Parses statements up to (but not consuming) the given terminator.
  pub fn parse_stmts_until(&mut self, end: TT) -> SyntaxResult<Vec<Stmt>> {
    let mut stmts = Vec::new();
    while self.peek()?.typ != end {
      stmts.push(self.parse_stmt()?);
    }
    Ok(stmts)
  }

  pub fn parse_stmt(&mut self) -> SyntaxResult<Stmt> {
    let t = self.peek()?;
    match t.typ {
      TT::BraceOpen => self.parse_stmt_block(),
      TT::KeywordVar => self.parse_stmt_var(),
      TT::Semicolon => {
        self.consume()?;
        Ok(Stmt::Empty)
      }
      TT::KeywordIf => self.parse_stmt_if(),
      TT::KeywordDo => self.parse_stmt_do_while(),
      TT::KeywordWhile => self.parse_stmt_while(),
      TT::KeywordFor => self.parse_stmt_for(),
      TT::KeywordContinue => self.parse_stmt_continue(),
      TT::KeywordBreak => self.parse_stmt_break(),
      TT::KeywordReturn => self.parse_stmt_return(),
      TT::KeywordWith => self.parse_stmt_with(),
      TT::KeywordSwitch => self.parse_stmt_switch(),
      TT::KeywordThrow => self.parse_stmt_throw(),
      TT::KeywordTry => self.parse_stmt_try(),
      TT::KeywordDebugger => {
        self.consume()?;
        self.semicolon()?;
        Ok(Stmt::Debugger)
      }
      TT::KeywordFunction => {
        self.consume()?;
        let func = self.parse_func_tail(true)?;
        Ok(Stmt::Func(Box::new(func)))
      }
      TT::Identifier => {
        // An identifier followed by `:` labels the next statement.
        let (_, second) = self.peek_2()?;
        if second.typ == TT::Colon {
          let name = self.consume_as_string()?;
          self.consume()?;
          let body = self.parse_stmt()?;
          return Ok(Stmt::Label {
            name,
            body: Box::new(body),
          });
        }
        self.parse_stmt_expr()
      }
      TT::EOF => Err(t.error(SyntaxErrorType::UnexpectedEnd)),
      _ => self.parse_stmt_expr(),
    }
  }

  fn parse_stmt_block(&mut self) -> SyntaxResult<Stmt> {
    self.require(TT::BraceOpen)?;
    let body = self.parse_stmts_until(TT::BraceClose)?;
    self.require(TT::BraceClose)?;
    Ok(Stmt::Block(body))
  }

  fn parse_stmt_expr(&mut self) -> SyntaxResult<Stmt> {
    let expr = self.parse_expr(false)?;
    self.semicolon()?;
    Ok(Stmt::Expr(expr))
  }

  fn parse_var_declarators(&mut self, no_in: bool) -> SyntaxResult<Vec<VarDeclarator>> {
    let mut decls = Vec::new();
    loop {
      let t = self.require(TT::Identifier)?;
      let name = Identifier::new(t.loc, self.string(t.loc));
      let init = if self.consume_if(TT::Equals)?.is_match() {
        Some(self.parse_assign(no_in)?)
      } else {
        None
      };
      decls.push(VarDeclarator { name, init });
      if !self.consume_if(TT::Comma)?.is_match() {
        break;
      }
    }
    Ok(decls)
  }

  fn parse_stmt_var(&mut self) -> SyntaxResult<Stmt> {
    self.require(TT::KeywordVar)?;
    let decls = self.parse_var_declarators(false)?;
    self.semicolon()?;
    Ok(Stmt::Var(decls))
  }

  fn parse_stmt_if(&mut self) -> SyntaxResult<Stmt> {
    self.require(TT::KeywordIf)?;
    self.require(TT::ParenthesisOpen)?;
    let test = self.parse_expr(false)?;
    self.require(TT::ParenthesisClose)?;
    let cons = self.parse_stmt()?;
    let alt = if self.consume_if(TT::KeywordElse)?.is_match() {
      Some(Box::new(self.parse_stmt()?))
    } else {
      None
    };
    Ok(Stmt::If {
      test,
      cons: Box::new(cons),
      alt,
    })
  }

  fn parse_stmt_do_while(&mut self) -> SyntaxResult<Stmt> {
    self.require(TT::KeywordDo)?;
    let body = self.parse_stmt()?;
    self.require(TT::KeywordWhile)?;
    self.require(TT::ParenthesisOpen)?;
    let test = self.parse_expr(false)?;
    self.require(TT::ParenthesisClose)?;
    self.semicolon()?;
    Ok(Stmt::DoWhile {
      body: Box::new(body),
      test,
    })
  }

  fn parse_stmt_while(&mut self) -> SyntaxResult<Stmt> {
    self.require(TT::KeywordWhile)?;
    self.require(TT::ParenthesisOpen)?;
    let test = self.parse_expr(false)?;
    self.require(TT::ParenthesisClose)?;
    let body = self.parse_stmt()?;
    Ok(Stmt::While {
      test,
      body: Box::new(body),
    })
  }

  fn parse_stmt_for(&mut self) -> SyntaxResult<Stmt> {
    self.require(TT::KeywordFor)?;
    self.require(TT::ParenthesisOpen)?;
    let t = self.peek()?;
    let init = match t.typ {
      TT::Semicolon => ForInit::None,
      TT::KeywordVar => {
        self.consume()?;
        // `in` in a declarator initializer would be ambiguous with the for-in separator, so it's
        // excluded until we know which form this is.
        let mut decls = self.parse_var_declarators(true)?;
        let in_tok = self.consume_if(TT::KeywordIn)?;
        if in_tok.is_match() {
          if decls.len() != 1 {
            return Err(t.error(SyntaxErrorType::UnexpectedToken));
          }
          let Some(decl) = decls.pop() else {
            unreachable!();
          };
          return self.parse_stmt_for_in_tail(ForInLeft::Var(decl));
        }
        ForInit::Var(decls)
      }
      _ => {
        let expr = self.parse_expr(true)?;
        if self.consume_if(TT::KeywordIn)?.is_match() {
          return self.parse_stmt_for_in_tail(ForInLeft::Expr(expr));
        }
        ForInit::Expr(expr)
      }
    };
    self.require(TT::Semicolon)?;
    let test = if self.peek()?.typ == TT::Semicolon {
      None
    } else {
      Some(self.parse_expr(false)?)
    };
    self.require(TT::Semicolon)?;
    let update = if self.peek()?.typ == TT::ParenthesisClose {
      None
    } else {
      Some(self.parse_expr(false)?)
    };
    self.require(TT::ParenthesisClose)?;
    let body = self.parse_stmt()?;
    Ok(Stmt::For {
      init,
      test,
      update,
      body: Box::new(body),
    })
  }

  // The `in` has been consumed.
  fn parse_stmt_for_in_tail(&mut self, left: ForInLeft) -> SyntaxResult<Stmt> {
    let right = self.parse_expr(false)?;
    self.require(TT::ParenthesisClose)?;
    let body = self.parse_stmt()?;
    Ok(Stmt::ForIn {
      left,
      right,
      body: Box::new(body),
    })
  }

  // A label is only attached when it sits on the same line; otherwise a semicolon has already
  // been synthesized before it.
  fn parse_optional_label(&mut self) -> SyntaxResult<Option<String>> {
    let t = self.peek()?;
    if t.typ == TT::Identifier && !t.preceded_by_line_terminator {
      self.consume()?;
      Ok(Some(self.string(t.loc)))
    } else {
      Ok(None)
    }
  }

  fn parse_stmt_continue(&mut self) -> SyntaxResult<Stmt> {
    self.require(TT::KeywordContinue)?;
    let label = self.parse_optional_label()?;
    self.semicolon()?;
    Ok(Stmt::Continue { label })
  }

  fn parse_stmt_break(&mut self) -> SyntaxResult<Stmt> {
    self.require(TT::KeywordBreak)?;
    let label = self.parse_optional_label()?;
    self.semicolon()?;
    Ok(Stmt::Break { label })
  }

  fn parse_stmt_return(&mut self) -> SyntaxResult<Stmt> {
    self.require(TT::KeywordReturn)?;
    let t = self.peek()?;
    let arg = if matches!(t.typ, TT::Semicolon | TT::BraceClose | TT::EOF) {
      None
    } else {
      Some(self.parse_expr(false)?)
    };
    self.semicolon()?;
    Ok(Stmt::Return { arg })
  }

  fn parse_stmt_with(&mut self) -> SyntaxResult<Stmt> {
    self.require(TT::KeywordWith)?;
    self.require(TT::ParenthesisOpen)?;
    let object = self.parse_expr(false)?;
    self.require(TT::ParenthesisClose)?;
    let body = self.parse_stmt()?;
    Ok(Stmt::With {
      object,
      body: Box::new(body),
    })
  }

  fn parse_stmt_switch(&mut self) -> SyntaxResult<Stmt> {
    self.require(TT::KeywordSwitch)?;
    self.require(TT::ParenthesisOpen)?;
    let discriminant = self.parse_expr(false)?;
    self.require(TT::ParenthesisClose)?;
    self.require(TT::BraceOpen)?;
    let mut cases = Vec::new();
    loop {
      let t = self.consume()?;
      let test = match t.typ {
        TT::BraceClose => break,
        TT::KeywordCase => Some(self.parse_expr(false)?),
        TT::KeywordDefault => None,
        _ => return Err(t.error(SyntaxErrorType::UnexpectedToken)),
      };
      self.require(TT::Colon)?;
      let mut body = Vec::new();
      while !matches!(
        self.peek()?.typ,
        TT::KeywordCase | TT::KeywordDefault | TT::BraceClose
      ) {
        body.push(self.parse_stmt()?);
      }
      cases.push(SwitchCase { test, body });
    }
    Ok(Stmt::Switch {
      discriminant,
      cases,
    })
  }

  fn parse_stmt_throw(&mut self) -> SyntaxResult<Stmt> {
    self.require(TT::KeywordThrow)?;
    // A line break after `throw` is a hard error, not an insertion point; the synthesized
    // semicolon shows up here as an unexpected token.
    let arg = self.parse_expr(false)?;
    self.semicolon()?;
    Ok(Stmt::Throw(arg))
  }

  fn parse_stmt_try(&mut self) -> SyntaxResult<Stmt> {
    self.require(TT::KeywordTry)?;
    self.require(TT::BraceOpen)?;
    let block = self.parse_stmts_until(TT::BraceClose)?;
    self.require(TT::BraceClose)?;
    let catch = if self.consume_if(TT::KeywordCatch)?.is_match() {
      self.require(TT::ParenthesisOpen)?;
      let p = self.require(TT::Identifier)?;
      let param = Identifier::new(p.loc, self.string(p.loc));
      self.require(TT::ParenthesisClose)?;
      self.require(TT::BraceOpen)?;
      let body = self.parse_stmts_until(TT::BraceClose)?;
      self.require(TT::BraceClose)?;
      Some(CatchClause { param, body })
    } else {
      None
    };
    let finally = if self.consume_if(TT::KeywordFinally)?.is_match() {
      self.require(TT::BraceOpen)?;
      let body = self.parse_stmts_until(TT::BraceClose)?;
      self.require(TT::BraceClose)?;
      Some(body)
    } else {
      None
    };
    if catch.is_none() && finally.is_none() {
      let t = self.peek()?;
      return Err(t.error(SyntaxErrorType::ExpectedSyntax("catch or finally clause")));
    }
    Ok(Stmt::Try {
      block,
      catch,
      finally,
    })
  }
}
