use scan_js::ast::CatchClause;
use scan_js::ast::Expr;
use scan_js::ast::ForInLeft;
use scan_js::ast::ForInit;
use scan_js::ast::Func;
use scan_js::ast::Program;
use scan_js::ast::PropertyKey;
use scan_js::ast::Stmt;
use scan_js::ast::SwitchCase;
use scan_js::ast::VarDeclarator;
use scan_js::lex::KEYWORDS_MAPPING;
use scan_js::lex::OPERATORS_MAPPING;
use scan_js::token::TT;

pub mod emitter;

pub use emitter::EmitMode;
use emitter::Emitter;

/// Serializes a program back to source. The tree is emitted as parsed; grouping parentheses
/// survive as explicit nodes, so no operator precedence is reconstructed here.
pub fn emit(program: &Program, mode: EmitMode) -> String {
  let mut em = Emitter::new(mode);
  for (i, stmt) in program.body.iter().enumerate() {
    if i > 0 {
      em.write_line();
    }
    emit_stmt(&mut em, stmt);
  }
  em.into_string()
}

fn write_op(em: &mut Emitter, op: TT) {
  if let Some(text) = KEYWORDS_MAPPING.get(&op) {
    em.write_keyword(text);
  } else if let Some(text) = OPERATORS_MAPPING.get(&op) {
    em.write_punct(text);
  } else {
    unreachable!("operator {:?} has no source text", op);
  }
}

// Cosmetic space, pretty mode only.
fn pad(em: &mut Emitter) {
  if em.mode() == EmitMode::Pretty {
    em.write_space();
  }
}

fn emit_stmt(em: &mut Emitter, stmt: &Stmt) {
  match stmt {
    Stmt::Block(body) => emit_block(em, body),
    Stmt::Var(decls) => {
      emit_var(em, decls);
      em.write_punct(";");
    }
    Stmt::Empty => em.write_punct(";"),
    Stmt::Expr(expr) => {
      emit_expr(em, expr);
      em.write_punct(";");
    }
    Stmt::If { test, cons, alt } => {
      em.write_keyword("if");
      pad(em);
      emit_parenthesized(em, test);
      emit_body(em, cons);
      if let Some(alt) = alt {
        if matches!(cons.as_ref(), Stmt::Block(_)) {
          pad(em);
        } else {
          em.write_line();
        }
        em.write_keyword("else");
        if let Stmt::If { .. } = alt.as_ref() {
          // Keep `else if` chains on one line instead of nesting.
          pad(em);
          emit_stmt(em, alt);
        } else {
          emit_body(em, alt);
        }
      }
    }
    Stmt::DoWhile { body, test } => {
      em.write_keyword("do");
      emit_body(em, body);
      if matches!(body.as_ref(), Stmt::Block(_)) {
        pad(em);
      } else {
        em.write_line();
      }
      em.write_keyword("while");
      pad(em);
      emit_parenthesized(em, test);
      em.write_punct(";");
    }
    Stmt::While { test, body } => {
      em.write_keyword("while");
      pad(em);
      emit_parenthesized(em, test);
      emit_body(em, body);
    }
    Stmt::For {
      init,
      test,
      update,
      body,
    } => {
      em.write_keyword("for");
      pad(em);
      em.write_punct("(");
      match init {
        ForInit::None => {}
        ForInit::Expr(expr) => emit_expr(em, expr),
        ForInit::Var(decls) => emit_var(em, decls),
      }
      em.write_punct(";");
      if let Some(test) = test {
        pad(em);
        emit_expr(em, test);
      }
      em.write_punct(";");
      if let Some(update) = update {
        pad(em);
        emit_expr(em, update);
      }
      em.write_punct(")");
      emit_body(em, body);
    }
    Stmt::ForIn { left, right, body } => {
      em.write_keyword("for");
      pad(em);
      em.write_punct("(");
      match left {
        ForInLeft::Expr(expr) => emit_expr(em, expr),
        ForInLeft::Var(decl) => {
          em.write_keyword("var");
          emit_declarator(em, decl);
        }
      }
      em.write_keyword("in");
      emit_expr(em, right);
      em.write_punct(")");
      emit_body(em, body);
    }
    Stmt::Continue { label } => {
      em.write_keyword("continue");
      if let Some(label) = label {
        em.write_identifier(label);
      }
      em.write_punct(";");
    }
    Stmt::Break { label } => {
      em.write_keyword("break");
      if let Some(label) = label {
        em.write_identifier(label);
      }
      em.write_punct(";");
    }
    Stmt::Return { arg } => {
      em.write_keyword("return");
      if let Some(arg) = arg {
        emit_expr(em, arg);
      }
      em.write_punct(";");
    }
    Stmt::With { object, body } => {
      em.write_keyword("with");
      pad(em);
      emit_parenthesized(em, object);
      emit_body(em, body);
    }
    Stmt::Switch {
      discriminant,
      cases,
    } => {
      em.write_keyword("switch");
      pad(em);
      emit_parenthesized(em, discriminant);
      pad(em);
      emit_switch_cases(em, cases);
    }
    Stmt::Label { name, body } => {
      em.write_identifier(name);
      em.write_punct(":");
      pad(em);
      emit_stmt(em, body);
    }
    Stmt::Throw(arg) => {
      em.write_keyword("throw");
      emit_expr(em, arg);
      em.write_punct(";");
    }
    Stmt::Try {
      block,
      catch,
      finally,
    } => {
      em.write_keyword("try");
      pad(em);
      emit_block(em, block);
      if let Some(CatchClause { param, body }) = catch {
        pad(em);
        em.write_keyword("catch");
        pad(em);
        em.write_punct("(");
        em.write_identifier(&param.value);
        em.write_punct(")");
        pad(em);
        emit_block(em, body);
      }
      if let Some(finally) = finally {
        pad(em);
        em.write_keyword("finally");
        pad(em);
        emit_block(em, finally);
      }
    }
    Stmt::Debugger => {
      em.write_keyword("debugger");
      em.write_punct(";");
    }
    Stmt::Func(func) => emit_func(em, func),
  }
}

fn emit_block(em: &mut Emitter, body: &[Stmt]) {
  em.write_punct("{");
  em.indent();
  for stmt in body {
    em.write_line();
    emit_stmt(em, stmt);
  }
  em.dedent();
  em.write_line();
  em.write_punct("}");
}

// Body of a control statement; blocks stay on the same line, single statements get their own
// indented line in pretty mode.
fn emit_body(em: &mut Emitter, body: &Stmt) {
  if let Stmt::Block(stmts) = body {
    pad(em);
    emit_block(em, stmts);
  } else {
    em.indent();
    em.write_line();
    emit_stmt(em, body);
    em.dedent();
  }
}

fn emit_parenthesized(em: &mut Emitter, expr: &Expr) {
  em.write_punct("(");
  emit_expr(em, expr);
  em.write_punct(")");
}

fn emit_var(em: &mut Emitter, decls: &[VarDeclarator]) {
  em.write_keyword("var");
  for (i, decl) in decls.iter().enumerate() {
    if i > 0 {
      em.write_punct(",");
      pad(em);
    }
    emit_declarator(em, decl);
  }
}

fn emit_declarator(em: &mut Emitter, decl: &VarDeclarator) {
  em.write_identifier(&decl.name.value);
  if let Some(init) = &decl.init {
    pad(em);
    em.write_punct("=");
    pad(em);
    emit_expr(em, init);
  }
}

fn emit_switch_cases(em: &mut Emitter, cases: &[SwitchCase]) {
  em.write_punct("{");
  em.indent();
  for case in cases {
    em.write_line();
    match &case.test {
      Some(test) => {
        em.write_keyword("case");
        emit_expr(em, test);
      }
      None => em.write_keyword("default"),
    }
    em.write_punct(":");
    em.indent();
    for stmt in &case.body {
      em.write_line();
      emit_stmt(em, stmt);
    }
    em.dedent();
  }
  em.dedent();
  em.write_line();
  em.write_punct("}");
}

fn emit_func(em: &mut Emitter, func: &Func) {
  em.write_keyword("function");
  if let Some(name) = &func.name {
    em.write_identifier(&name.value);
  }
  em.write_punct("(");
  for (i, param) in func.params.iter().enumerate() {
    if i > 0 {
      em.write_punct(",");
      pad(em);
    }
    em.write_identifier(&param.value);
  }
  em.write_punct(")");
  pad(em);
  emit_block(em, &func.body);
}

fn emit_expr(em: &mut Emitter, expr: &Expr) {
  match expr {
    Expr::This => em.write_keyword("this"),
    Expr::Ident(ident) => em.write_identifier(&ident.value),
    Expr::Null => em.write_keyword("null"),
    Expr::True => em.write_keyword("true"),
    Expr::False => em.write_keyword("false"),
    Expr::Num { raw } => em.write_number(raw),
    Expr::Str { raw } => em.write_literal(raw),
    Expr::Regex { raw } => em.write_literal(raw),
    Expr::Array(elements) => {
      em.write_punct("[");
      for (i, element) in elements.iter().enumerate() {
        if i > 0 {
          em.write_punct(",");
          pad(em);
        }
        if let Some(element) = element {
          emit_expr(em, element);
        }
      }
      // `[a,]` is just `[a]`; a trailing elision needs one more comma to count.
      if matches!(elements.last(), Some(None)) {
        em.write_punct(",");
      }
      em.write_punct("]");
    }
    Expr::Object(properties) => {
      em.write_punct("{");
      for (i, property) in properties.iter().enumerate() {
        if i > 0 {
          em.write_punct(",");
          pad(em);
        }
        match &property.key {
          PropertyKey::Ident(name) => em.write_identifier(name),
          PropertyKey::Str(raw) => em.write_literal(raw),
          PropertyKey::Num(raw) => em.write_number(raw),
        }
        em.write_punct(":");
        pad(em);
        emit_expr(em, &property.value);
      }
      em.write_punct("}");
    }
    Expr::Group(inner) => emit_parenthesized(em, inner),
    Expr::Func(func) => emit_func(em, func),
    Expr::Unary { op, arg } => {
      write_op(em, *op);
      emit_expr(em, arg);
    }
    Expr::Postfix { op, arg } => {
      emit_expr(em, arg);
      write_op(em, *op);
    }
    Expr::Binary { op, left, right } => {
      emit_expr(em, left);
      pad(em);
      write_op(em, *op);
      pad(em);
      emit_expr(em, right);
    }
    Expr::Assign { op, target, value } => {
      emit_expr(em, target);
      pad(em);
      write_op(em, *op);
      pad(em);
      emit_expr(em, value);
    }
    Expr::Cond { test, cons, alt } => {
      emit_expr(em, test);
      pad(em);
      em.write_punct("?");
      pad(em);
      emit_expr(em, cons);
      pad(em);
      em.write_punct(":");
      pad(em);
      emit_expr(em, alt);
    }
    Expr::Call { callee, args } => {
      emit_expr(em, callee);
      em.write_punct("(");
      emit_args(em, args);
      em.write_punct(")");
    }
    Expr::New { callee, args } => {
      em.write_keyword("new");
      emit_expr(em, callee);
      if let Some(args) = args {
        em.write_punct("(");
        emit_args(em, args);
        em.write_punct(")");
      }
    }
    Expr::Member { object, property } => {
      emit_expr(em, object);
      em.write_punct(".");
      em.write_identifier(property);
    }
    Expr::Index { object, index } => {
      emit_expr(em, object);
      em.write_punct("[");
      emit_expr(em, index);
      em.write_punct("]");
    }
    Expr::Comma { left, right } => {
      emit_expr(em, left);
      em.write_punct(",");
      pad(em);
      emit_expr(em, right);
    }
  }
}

fn emit_args(em: &mut Emitter, args: &[Expr]) {
  for (i, arg) in args.iter().enumerate() {
    if i > 0 {
      em.write_punct(",");
      pad(em);
    }
    emit_expr(em, arg);
  }
}
