use ahash::HashSet;
use once_cell::sync::Lazy;
use scan_js::ast::Expr;
use scan_js::ast::ForInLeft;
use scan_js::ast::ForInit;
use scan_js::ast::Func;
use scan_js::ast::Identifier;
use scan_js::ast::Program;
use scan_js::ast::ScopeId;
use scan_js::ast::Stmt;
use scan_js::ast::VarDeclarator;
use scan_js::lex::KEYWORDS_MAPPING;

use crate::ScopeTree;
use crate::ROOT_SCOPE;

// Single-character names first, ordered by how compressible the output tends to be.
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ$_";

// Replacement names must not collide with keywords in any case variation, so the check is done
// on the uppercased candidate.
static RESERVED: Lazy<HashSet<String>> = Lazy::new(|| {
  KEYWORDS_MAPPING
    .values()
    .map(|v| v.to_ascii_uppercase())
    .collect()
});

/// Generates candidate names in order of increasing length, alphabet order within a length.
/// Every scope starts its own sequence from the beginning.
pub struct NameSequence {
  next: usize,
}

impl NameSequence {
  pub fn new() -> NameSequence {
    NameSequence { next: 0 }
  }

  pub fn next_name(&mut self) -> String {
    let name = nth_name(self.next);
    self.next += 1;
    name
  }
}

impl Default for NameSequence {
  fn default() -> Self {
    NameSequence::new()
  }
}

fn nth_name(mut n: usize) -> String {
  let base = ALPHABET.len();
  let mut len = 1usize;
  let mut block = base;
  while n >= block {
    n -= block;
    block *= base;
    len += 1;
  }
  let mut out = vec![0u8; len];
  for slot in out.iter_mut().rev() {
    *slot = ALPHABET[n % base];
    n /= base;
  }
  out.into_iter().map(char::from).collect()
}

/// Assigns a replacement name to every symbol, walking parents before children so outer
/// assignments are visible when checking for capture. The root scope is skipped unless
/// `mangle_toplevel` is set, since global bindings may be referenced by other scripts.
pub fn assign_names(tree: &mut ScopeTree, mangle_toplevel: bool) {
  let mut stack = vec![ROOT_SCOPE];
  while let Some(id) = stack.pop() {
    stack.extend(tree.get(id).children.iter().copied());
    if id == ROOT_SCOPE && !mangle_toplevel {
      continue;
    }
    let symbols = tree.get(id).symbols().to_vec();
    let mut names = NameSequence::new();
    for name in symbols {
      loop {
        let candidate = names.next_name();
        if accepts(tree, id, &candidate) {
          let scope = tree.get_mut(id);
          scope.mangled.insert(name.clone(), candidate.clone());
          scope.rev_mangled.insert(candidate, name);
          break;
        }
      }
    }
  }
}

fn accepts(tree: &ScopeTree, scope: ScopeId, candidate: &str) -> bool {
  let s = tree.get(scope);
  // Already taken by an earlier symbol of this scope.
  if s.rev_mangled.contains_key(candidate) {
    return false;
  }
  if RESERVED.contains(&candidate.to_ascii_uppercase()) {
    return false;
  }
  for (name, &decl) in &s.refs {
    if decl == scope {
      continue;
    }
    match tree.get(decl).mangled.get(name.as_str()) {
      // An outer symbol referenced through this scope was renamed to the candidate; using it
      // here would capture that reference.
      Some(renamed) if renamed == candidate => return false,
      // An outer symbol referenced through this scope keeps its original name (e.g. the root
      // scope was skipped) and that name is the candidate.
      None if name == candidate => return false,
      _ => {}
    }
  }
  true
}

/// Replaces every identifier whose resolved symbol was assigned a new name. Unresolved
/// identifiers (implicit globals) and symbols in unmangled scopes are left untouched.
pub fn rewrite_identifiers(program: &mut Program, tree: &ScopeTree) {
  for stmt in &mut program.body {
    rewrite_stmt(stmt, tree);
  }
}

fn rewrite_ident(ident: &mut Identifier, tree: &ScopeTree) {
  let Some(use_scope) = ident.scope else {
    return;
  };
  let Some(decl_scope) = tree.resolve(use_scope, &ident.value) else {
    return;
  };
  if let Some(renamed) = tree.get(decl_scope).mangled.get(&ident.value) {
    ident.value = renamed.clone();
  }
}

fn rewrite_func(func: &mut Func, tree: &ScopeTree) {
  if let Some(name) = &mut func.name {
    rewrite_ident(name, tree);
  }
  for param in &mut func.params {
    rewrite_ident(param, tree);
  }
  for stmt in &mut func.body {
    rewrite_stmt(stmt, tree);
  }
}

fn rewrite_declarators(decls: &mut [VarDeclarator], tree: &ScopeTree) {
  for decl in decls {
    rewrite_ident(&mut decl.name, tree);
    if let Some(init) = &mut decl.init {
      rewrite_expr(init, tree);
    }
  }
}

fn rewrite_stmt(stmt: &mut Stmt, tree: &ScopeTree) {
  match stmt {
    Stmt::Block(body) => {
      for stmt in body {
        rewrite_stmt(stmt, tree);
      }
    }
    Stmt::Var(decls) => rewrite_declarators(decls, tree),
    Stmt::Empty | Stmt::Debugger | Stmt::Continue { .. } | Stmt::Break { .. } => {}
    Stmt::Expr(expr) | Stmt::Throw(expr) => rewrite_expr(expr, tree),
    Stmt::If { test, cons, alt } => {
      rewrite_expr(test, tree);
      rewrite_stmt(cons, tree);
      if let Some(alt) = alt {
        rewrite_stmt(alt, tree);
      }
    }
    Stmt::DoWhile { body, test } | Stmt::While { test, body } => {
      rewrite_expr(test, tree);
      rewrite_stmt(body, tree);
    }
    Stmt::For {
      init,
      test,
      update,
      body,
    } => {
      match init {
        ForInit::None => {}
        ForInit::Expr(expr) => rewrite_expr(expr, tree),
        ForInit::Var(decls) => rewrite_declarators(decls, tree),
      }
      if let Some(test) = test {
        rewrite_expr(test, tree);
      }
      if let Some(update) = update {
        rewrite_expr(update, tree);
      }
      rewrite_stmt(body, tree);
    }
    Stmt::ForIn { left, right, body } => {
      match left {
        ForInLeft::Expr(expr) => rewrite_expr(expr, tree),
        ForInLeft::Var(decl) => {
          rewrite_ident(&mut decl.name, tree);
          if let Some(init) = &mut decl.init {
            rewrite_expr(init, tree);
          }
        }
      }
      rewrite_expr(right, tree);
      rewrite_stmt(body, tree);
    }
    Stmt::Return { arg } => {
      if let Some(arg) = arg {
        rewrite_expr(arg, tree);
      }
    }
    Stmt::With { object, body } => {
      rewrite_expr(object, tree);
      rewrite_stmt(body, tree);
    }
    Stmt::Switch {
      discriminant,
      cases,
    } => {
      rewrite_expr(discriminant, tree);
      for case in cases {
        if let Some(test) = &mut case.test {
          rewrite_expr(test, tree);
        }
        for stmt in &mut case.body {
          rewrite_stmt(stmt, tree);
        }
      }
    }
    Stmt::Label { body, .. } => rewrite_stmt(body, tree),
    Stmt::Try {
      block,
      catch,
      finally,
    } => {
      for stmt in block {
        rewrite_stmt(stmt, tree);
      }
      if let Some(catch) = catch {
        rewrite_ident(&mut catch.param, tree);
        for stmt in &mut catch.body {
          rewrite_stmt(stmt, tree);
        }
      }
      if let Some(finally) = finally {
        for stmt in finally {
          rewrite_stmt(stmt, tree);
        }
      }
    }
    Stmt::Func(func) => rewrite_func(func, tree),
  }
}

fn rewrite_expr(expr: &mut Expr, tree: &ScopeTree) {
  match expr {
    Expr::This
    | Expr::Null
    | Expr::True
    | Expr::False
    | Expr::Num { .. }
    | Expr::Str { .. }
    | Expr::Regex { .. } => {}
    Expr::Ident(ident) => rewrite_ident(ident, tree),
    Expr::Array(elements) => {
      for element in elements.iter_mut().flatten() {
        rewrite_expr(element, tree);
      }
    }
    Expr::Object(properties) => {
      for property in properties {
        rewrite_expr(&mut property.value, tree);
      }
    }
    Expr::Group(inner) => rewrite_expr(inner, tree),
    Expr::Func(func) => rewrite_func(func, tree),
    Expr::Unary { arg, .. } | Expr::Postfix { arg, .. } => rewrite_expr(arg, tree),
    Expr::Binary { left, right, .. } | Expr::Comma { left, right } => {
      rewrite_expr(left, tree);
      rewrite_expr(right, tree);
    }
    Expr::Assign { target, value, .. } => {
      rewrite_expr(target, tree);
      rewrite_expr(value, tree);
    }
    Expr::Cond { test, cons, alt } => {
      rewrite_expr(test, tree);
      rewrite_expr(cons, tree);
      rewrite_expr(alt, tree);
    }
    Expr::Call { callee, args } => {
      rewrite_expr(callee, tree);
      for arg in args {
        rewrite_expr(arg, tree);
      }
    }
    Expr::New { callee, args } => {
      rewrite_expr(callee, tree);
      if let Some(args) = args {
        for arg in args {
          rewrite_expr(arg, tree);
        }
      }
    }
    Expr::Member { object, .. } => rewrite_expr(object, tree),
    Expr::Index { object, index } => {
      rewrite_expr(object, tree);
      rewrite_expr(index, tree);
    }
  }
}
