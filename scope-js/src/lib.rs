use ahash::HashMap;
use ahash::HashMapExt;
use ahash::HashSet;
use ahash::HashSetExt;
use scan_js::ast::Program;
use scan_js::ast::ScopeId;

pub mod builder;
pub mod mangle;
pub mod refs;

/// A single lexical scope: the global scope or one function body. Params, vars and nested
/// function names all land in the same scope; there are no block scopes in this dialect.
#[derive(Debug)]
pub struct Scope {
  pub parent: Option<ScopeId>,
  pub children: Vec<ScopeId>,
  // Declared names in declaration order; the order drives mangled name assignment.
  symbols: Vec<String>,
  declared: HashSet<String>,
  /// Names referenced in or through this scope, mapped to the scope that declares them.
  /// Unresolvable names (implicit globals) never appear here.
  pub refs: HashMap<String, ScopeId>,
  /// Original name to mangled name, for symbols declared in this scope.
  pub mangled: HashMap<String, String>,
  /// Mangled name back to original name; guards against reusing a name within the scope.
  pub rev_mangled: HashMap<String, String>,
}

impl Scope {
  fn new(parent: Option<ScopeId>) -> Scope {
    Scope {
      parent,
      children: Vec::new(),
      symbols: Vec::new(),
      declared: HashSet::new(),
      refs: HashMap::new(),
      mangled: HashMap::new(),
      rev_mangled: HashMap::new(),
    }
  }

  pub fn symbols(&self) -> &[String] {
    &self.symbols
  }

  pub fn declares(&self, name: &str) -> bool {
    self.declared.contains(name)
  }
}

/// Arena of scopes; [`ScopeId`] values attached to AST identifiers index into it.
#[derive(Debug)]
pub struct ScopeTree {
  scopes: Vec<Scope>,
}

pub const ROOT_SCOPE: ScopeId = ScopeId(0);

impl ScopeTree {
  fn new() -> ScopeTree {
    ScopeTree {
      scopes: vec![Scope::new(None)],
    }
  }

  fn add_scope(&mut self, parent: ScopeId) -> ScopeId {
    let id = ScopeId(self.scopes.len() as u32);
    self.scopes.push(Scope::new(Some(parent)));
    self.scopes[parent.0 as usize].children.push(id);
    id
  }

  /// Declares `name` in `scope` if it isn't already; the first declaration wins, so a `var` that
  /// repeats a param name merges with the param.
  fn declare(&mut self, scope: ScopeId, name: &str) {
    let s = &mut self.scopes[scope.0 as usize];
    if s.declared.insert(name.to_string()) {
      s.symbols.push(name.to_string());
    }
  }

  pub fn get(&self, id: ScopeId) -> &Scope {
    &self.scopes[id.0 as usize]
  }

  fn get_mut(&mut self, id: ScopeId) -> &mut Scope {
    &mut self.scopes[id.0 as usize]
  }

  pub fn len(&self) -> usize {
    self.scopes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.scopes.is_empty()
  }

  /// Walks outward from `scope` to the scope declaring `name`, if any.
  pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
    let mut cur = Some(scope);
    while let Some(id) = cur {
      if self.get(id).declares(name) {
        return Some(id);
      }
      cur = self.get(id).parent;
    }
    None
  }
}

/// Builds the scope tree for a program, annotating every identifier node with the scope it
/// appears in, and records which outer symbols each scope references.
pub fn compute_scopes(program: &mut Program) -> ScopeTree {
  let (mut tree, idents) = builder::build_scopes(program);
  refs::propagate_refs(&mut tree, &idents);
  tree
}

/// Renames every local symbol in `program` to the shortest name available in its scope.
pub fn mangle(program: &mut Program, mangle_toplevel: bool) {
  let mut tree = compute_scopes(program);
  mangle::assign_names(&mut tree, mangle_toplevel);
  mangle::rewrite_identifiers(program, &tree);
}
