use scan_js::ast::Expr;
use scan_js::ast::ForInLeft;
use scan_js::ast::ForInit;
use scan_js::ast::Func;
use scan_js::ast::Identifier;
use scan_js::ast::Program;
use scan_js::ast::ScopeId;
use scan_js::ast::Stmt;
use scan_js::ast::VarDeclarator;

use crate::ScopeTree;
use crate::ROOT_SCOPE;

/// First analysis pass: builds the scope tree, declares every binding, and stamps each
/// identifier node with the scope it appears in. Also returns the flat list of (name, scope)
/// pairs for the reference propagation pass.
pub fn build_scopes(program: &mut Program) -> (ScopeTree, Vec<(String, ScopeId)>) {
  let mut builder = ScopeBuilder {
    tree: ScopeTree::new(),
    current: ROOT_SCOPE,
    idents: Vec::new(),
  };
  for stmt in &mut program.body {
    builder.visit_stmt(stmt);
  }
  (builder.tree, builder.idents)
}

struct ScopeBuilder {
  tree: ScopeTree,
  current: ScopeId,
  idents: Vec<(String, ScopeId)>,
}

impl ScopeBuilder {
  fn mark(&mut self, ident: &mut Identifier) {
    ident.scope = Some(self.current);
    self.idents.push((ident.value.clone(), self.current));
  }

  fn declare(&mut self, ident: &mut Identifier) {
    self.tree.declare(self.current, &ident.value);
    self.mark(ident);
  }

  fn visit_func(&mut self, func: &mut Func) {
    // A function's name, whether from a declaration or a named expression, binds in the scope
    // the function appears in, not in its own body scope.
    if let Some(name) = &mut func.name {
      self.declare(name);
    }
    let scope = self.tree.add_scope(self.current);
    func.scope = Some(scope);
    let saved = self.current;
    self.current = scope;
    for param in &mut func.params {
      self.declare(param);
    }
    for stmt in &mut func.body {
      self.visit_stmt(stmt);
    }
    self.current = saved;
  }

  fn visit_declarators(&mut self, decls: &mut [VarDeclarator]) {
    for decl in decls {
      self.declare(&mut decl.name);
      if let Some(init) = &mut decl.init {
        self.visit_expr(init);
      }
    }
  }

  fn visit_stmt(&mut self, stmt: &mut Stmt) {
    match stmt {
      Stmt::Block(body) => {
        for stmt in body {
          self.visit_stmt(stmt);
        }
      }
      Stmt::Var(decls) => self.visit_declarators(decls),
      Stmt::Empty | Stmt::Debugger => {}
      Stmt::Expr(expr) => self.visit_expr(expr),
      Stmt::If { test, cons, alt } => {
        self.visit_expr(test);
        self.visit_stmt(cons);
        if let Some(alt) = alt {
          self.visit_stmt(alt);
        }
      }
      Stmt::DoWhile { body, test } => {
        self.visit_stmt(body);
        self.visit_expr(test);
      }
      Stmt::While { test, body } => {
        self.visit_expr(test);
        self.visit_stmt(body);
      }
      Stmt::For {
        init,
        test,
        update,
        body,
      } => {
        match init {
          ForInit::None => {}
          ForInit::Expr(expr) => self.visit_expr(expr),
          ForInit::Var(decls) => self.visit_declarators(decls),
        }
        if let Some(test) = test {
          self.visit_expr(test);
        }
        if let Some(update) = update {
          self.visit_expr(update);
        }
        self.visit_stmt(body);
      }
      Stmt::ForIn { left, right, body } => {
        match left {
          ForInLeft::Expr(expr) => self.visit_expr(expr),
          ForInLeft::Var(decl) => {
            self.declare(&mut decl.name);
            if let Some(init) = &mut decl.init {
              self.visit_expr(init);
            }
          }
        }
        self.visit_expr(right);
        self.visit_stmt(body);
      }
      // Labels are not symbols.
      Stmt::Continue { .. } | Stmt::Break { .. } => {}
      Stmt::Return { arg } => {
        if let Some(arg) = arg {
          self.visit_expr(arg);
        }
      }
      Stmt::With { object, body } => {
        self.visit_expr(object);
        self.visit_stmt(body);
      }
      Stmt::Switch {
        discriminant,
        cases,
      } => {
        self.visit_expr(discriminant);
        for case in cases {
          if let Some(test) = &mut case.test {
            self.visit_expr(test);
          }
          for stmt in &mut case.body {
            self.visit_stmt(stmt);
          }
        }
      }
      Stmt::Label { body, .. } => self.visit_stmt(body),
      Stmt::Throw(expr) => self.visit_expr(expr),
      Stmt::Try {
        block,
        catch,
        finally,
      } => {
        for stmt in block {
          self.visit_stmt(stmt);
        }
        if let Some(catch) = catch {
          // The catch parameter binds in the enclosing function scope, not a scope of its own;
          // renaming it alongside the other locals is safe for minification.
          self.declare(&mut catch.param);
          for stmt in &mut catch.body {
            self.visit_stmt(stmt);
          }
        }
        if let Some(finally) = finally {
          for stmt in finally {
            self.visit_stmt(stmt);
          }
        }
      }
      Stmt::Func(func) => self.visit_func(func),
    }
  }

  fn visit_expr(&mut self, expr: &mut Expr) {
    match expr {
      Expr::This
      | Expr::Null
      | Expr::True
      | Expr::False
      | Expr::Num { .. }
      | Expr::Str { .. }
      | Expr::Regex { .. } => {}
      Expr::Ident(ident) => self.mark(ident),
      Expr::Array(elements) => {
        for element in elements.iter_mut().flatten() {
          self.visit_expr(element);
        }
      }
      // Property keys are names, not symbols.
      Expr::Object(properties) => {
        for property in properties {
          self.visit_expr(&mut property.value);
        }
      }
      Expr::Group(inner) => self.visit_expr(inner),
      Expr::Func(func) => self.visit_func(func),
      Expr::Unary { arg, .. } | Expr::Postfix { arg, .. } => self.visit_expr(arg),
      Expr::Binary { left, right, .. } | Expr::Comma { left, right } => {
        self.visit_expr(left);
        self.visit_expr(right);
      }
      Expr::Assign { target, value, .. } => {
        self.visit_expr(target);
        self.visit_expr(value);
      }
      Expr::Cond { test, cons, alt } => {
        self.visit_expr(test);
        self.visit_expr(cons);
        self.visit_expr(alt);
      }
      Expr::Call { callee, args } => {
        self.visit_expr(callee);
        for arg in args {
          self.visit_expr(arg);
        }
      }
      Expr::New { callee, args } => {
        self.visit_expr(callee);
        if let Some(args) = args {
          for arg in args {
            self.visit_expr(arg);
          }
        }
      }
      // `property` after `.` is a name, not a symbol.
      Expr::Member { object, .. } => self.visit_expr(object),
      Expr::Index { object, index } => {
        self.visit_expr(object);
        self.visit_expr(index);
      }
    }
  }
}
