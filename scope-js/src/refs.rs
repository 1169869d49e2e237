use scan_js::ast::ScopeId;

use crate::ScopeTree;

/// Second analysis pass: resolves every identifier occurrence to its declaring scope and records
/// the result in the `refs` table of each scope the reference passes through, declaring scope
/// included.
///
/// The mangler later consults these tables to avoid choosing a replacement name in one scope
/// that would capture a reference travelling through it to another. Names that resolve nowhere
/// are implicit globals and are left out entirely; they are never renamed, and rule checks catch
/// collisions with them through the absence of a `mangled` entry.
pub fn propagate_refs(tree: &mut ScopeTree, idents: &[(String, ScopeId)]) {
  for (name, use_scope) in idents {
    let Some(decl_scope) = tree.resolve(*use_scope, name) else {
      continue;
    };
    let mut cur = Some(*use_scope);
    while let Some(id) = cur {
      tree.get_mut(id).refs.insert(name.clone(), decl_scope);
      if id == decl_scope {
        break;
      }
      cur = tree.get(id).parent;
    }
  }
}
