use crate::loc::Loc;
use serde::Serialize;

/// Index of a scope in the analysis scope tree. Attached to identifier nodes during scope
/// analysis; None until then.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub struct ScopeId(pub u32);

/// An identifier in binding or expression position. Only these nodes ever participate in
/// renaming; property names and labels are plain strings elsewhere in the tree.
#[derive(Clone, Debug, Serialize)]
pub struct Identifier {
  pub loc: Loc,
  pub value: String,
  pub scope: Option<ScopeId>,
}

impl Identifier {
  pub fn new(loc: Loc, value: String) -> Identifier {
    Identifier {
      loc,
      value,
      scope: None,
    }
  }
}

#[derive(Clone, Debug, Serialize)]
pub struct Program {
  pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Func {
  pub name: Option<Identifier>,
  pub params: Vec<Identifier>,
  pub body: Vec<Stmt>,
  // Scope of the function body, filled in by scope analysis.
  pub scope: Option<ScopeId>,
}

#[derive(Clone, Debug, Serialize)]
pub struct VarDeclarator {
  pub name: Identifier,
  pub init: Option<Expr>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CatchClause {
  pub param: Identifier,
  pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SwitchCase {
  // None for the `default` clause.
  pub test: Option<Expr>,
  pub body: Vec<Stmt>,
}

#[derive(Clone, Debug, Serialize)]
pub enum PropertyKey {
  Ident(String),
  Str(String),
  Num(String),
}

#[derive(Clone, Debug, Serialize)]
pub struct Property {
  pub key: PropertyKey,
  pub value: Expr,
}

#[derive(Clone, Debug, Serialize)]
pub enum ForInit {
  None,
  Expr(Expr),
  Var(Vec<VarDeclarator>),
}

#[derive(Clone, Debug, Serialize)]
pub enum ForInLeft {
  Expr(Expr),
  // `for (var x in y)`; an initializer is legal here (`for (var x = 1 in y)`).
  Var(VarDeclarator),
}

#[derive(Clone, Debug, Serialize)]
pub enum Expr {
  This,
  Ident(Identifier),
  Null,
  True,
  False,
  // Literals keep their raw source text; the minifier never needs their values.
  Num {
    raw: String,
  },
  Str {
    raw: String,
  },
  Regex {
    raw: String,
  },
  Array(Vec<Option<Expr>>),
  Object(Vec<Property>),
  // Explicit parentheses. Kept as a node so emitted output preserves grouping without
  // reconstructing precedence.
  Group(Box<Expr>),
  Func(Box<Func>),
  Unary {
    op: crate::token::TT,
    arg: Box<Expr>,
  },
  Postfix {
    op: crate::token::TT,
    arg: Box<Expr>,
  },
  Binary {
    op: crate::token::TT,
    left: Box<Expr>,
    right: Box<Expr>,
  },
  Assign {
    op: crate::token::TT,
    target: Box<Expr>,
    value: Box<Expr>,
  },
  Cond {
    test: Box<Expr>,
    cons: Box<Expr>,
    alt: Box<Expr>,
  },
  Call {
    callee: Box<Expr>,
    args: Vec<Expr>,
  },
  New {
    callee: Box<Expr>,
    // None for `new X` without an argument list.
    args: Option<Vec<Expr>>,
  },
  Member {
    object: Box<Expr>,
    property: String,
  },
  Index {
    object: Box<Expr>,
    index: Box<Expr>,
  },
  Comma {
    left: Box<Expr>,
    right: Box<Expr>,
  },
}

#[derive(Clone, Debug, Serialize)]
pub enum Stmt {
  Block(Vec<Stmt>),
  Var(Vec<VarDeclarator>),
  Empty,
  Expr(Expr),
  If {
    test: Expr,
    cons: Box<Stmt>,
    alt: Option<Box<Stmt>>,
  },
  DoWhile {
    body: Box<Stmt>,
    test: Expr,
  },
  While {
    test: Expr,
    body: Box<Stmt>,
  },
  For {
    init: ForInit,
    test: Option<Expr>,
    update: Option<Expr>,
    body: Box<Stmt>,
  },
  ForIn {
    left: ForInLeft,
    right: Expr,
    body: Box<Stmt>,
  },
  Continue {
    label: Option<String>,
  },
  Break {
    label: Option<String>,
  },
  Return {
    arg: Option<Expr>,
  },
  With {
    object: Expr,
    body: Box<Stmt>,
  },
  Switch {
    discriminant: Expr,
    cases: Vec<SwitchCase>,
  },
  Label {
    name: String,
    body: Box<Stmt>,
  },
  Throw(Expr),
  Try {
    block: Vec<Stmt>,
    catch: Option<CatchClause>,
    finally: Option<Vec<Stmt>>,
  },
  Debugger,
  Func(Box<Func>),
}
