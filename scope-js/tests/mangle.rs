use scan_js::ast::Expr;
use scan_js::ast::Stmt;
use scan_js::parse;
use scope_js::mangle;

#[test]
fn locals_are_renamed_in_declaration_order() {
  let mut program = parse(
    "function test() { var long_name = 1, not_so_long; return long_name + not_so_long; }",
  )
  .unwrap();
  mangle(&mut program, true);
  let Stmt::Func(func) = &program.body[0] else {
    panic!();
  };
  assert_eq!(func.name.as_ref().unwrap().value, "a");
  let Stmt::Var(decls) = &func.body[0] else {
    panic!();
  };
  assert_eq!(decls[0].name.value, "a");
  assert_eq!(decls[1].name.value, "b");
  let Stmt::Return {
    arg: Some(Expr::Binary { left, right, .. }),
  } = &func.body[1]
  else {
    panic!();
  };
  assert!(matches!(left.as_ref(), Expr::Ident(i) if i.value == "a"));
  assert!(matches!(right.as_ref(), Expr::Ident(i) if i.value == "b"));
}

#[test]
fn inner_scope_skips_names_of_referenced_outer_symbols() {
  let mut program = parse(
    "function test() { var long_name = 1, not_so_long; \
     function inner(arg1, arg2) { return long_name + not_so_long + arg1 + arg2; } }",
  )
  .unwrap();
  mangle(&mut program, true);
  let Stmt::Func(test) = &program.body[0] else {
    panic!();
  };
  let Stmt::Func(inner) = &test.body[1] else {
    panic!();
  };
  // Outer locals take a and b, and inner itself takes c; the params must not capture the outer
  // names their body still references.
  assert_eq!(inner.name.as_ref().unwrap().value, "c");
  assert_eq!(inner.params[0].value, "c");
  assert_eq!(inner.params[1].value, "d");
}

#[test]
fn shadowing_is_allowed_when_nothing_is_captured() {
  let mut program =
    parse("function outer(x) { function inner(y) { return y; } return inner(x); }").unwrap();
  mangle(&mut program, true);
  let Stmt::Func(outer) = &program.body[0] else {
    panic!();
  };
  let Stmt::Func(inner) = &outer.body[0] else {
    panic!();
  };
  // inner's body references nothing from outer, so its param restarts at a.
  assert_eq!(outer.params[0].value, "a");
  assert_eq!(inner.params[0].value, "a");
}

#[test]
fn catch_param_is_renamed_with_the_function_locals() {
  let mut program =
    parse("function test() { var local = 1; try { g(); } catch ($exc) { h($exc, local); } }")
      .unwrap();
  mangle(&mut program, true);
  let Stmt::Func(func) = &program.body[0] else {
    panic!();
  };
  let Stmt::Try {
    catch: Some(catch), ..
  } = &func.body[1]
  else {
    panic!();
  };
  assert_eq!(catch.param.value, "b");
  let Stmt::Expr(Expr::Call { args, .. }) = &catch.body[0] else {
    panic!();
  };
  assert!(matches!(&args[0], Expr::Ident(i) if i.value == "b"));
  assert!(matches!(&args[1], Expr::Ident(i) if i.value == "a"));
}

#[test]
fn toplevel_is_kept_unless_requested() {
  let mut program = parse("var keep; function f(x) { return keep + x; }").unwrap();
  mangle(&mut program, false);
  let Stmt::Var(decls) = &program.body[0] else {
    panic!();
  };
  assert_eq!(decls[0].name.value, "keep");
  let Stmt::Func(func) = &program.body[1] else {
    panic!();
  };
  assert_eq!(func.name.as_ref().unwrap().value, "f");
  assert_eq!(func.params[0].value, "a");
}

#[test]
fn implicit_globals_are_never_renamed() {
  let mut program = parse("function f() { return document; }").unwrap();
  mangle(&mut program, true);
  let Stmt::Func(func) = &program.body[0] else {
    panic!();
  };
  let Stmt::Return {
    arg: Some(Expr::Ident(ident)),
  } = &func.body[0]
  else {
    panic!();
  };
  assert_eq!(ident.value, "document");
}

#[test]
fn function_expression_name_is_renamed_in_its_scope() {
  let mut program = parse("x = function named() { return named; };").unwrap();
  mangle(&mut program, true);
  let Stmt::Expr(Expr::Assign { target, value, .. }) = &program.body[0] else {
    panic!();
  };
  // `x` is an implicit global.
  assert!(matches!(target.as_ref(), Expr::Ident(i) if i.value == "x"));
  let Expr::Func(func) = value.as_ref() else {
    panic!();
  };
  assert_eq!(func.name.as_ref().unwrap().value, "a");
  let Stmt::Return {
    arg: Some(Expr::Ident(ident)),
  } = &func.body[0]
  else {
    panic!();
  };
  assert_eq!(ident.value, "a");
}

#[test]
fn property_names_and_labels_are_untouched() {
  let mut program = parse(
    "function f(obj) { loop: for (var k in obj) { if (obj.stop) break loop; g({ k: obj[k] }); } }",
  )
  .unwrap();
  mangle(&mut program, true);
  let Stmt::Func(func) = &program.body[0] else {
    panic!();
  };
  let Stmt::Label { name, body } = &func.body[0] else {
    panic!();
  };
  assert_eq!(name, "loop");
  let Stmt::ForIn { body, .. } = body.as_ref() else {
    panic!();
  };
  let Stmt::Block(body) = body.as_ref() else {
    panic!();
  };
  let Stmt::If { test, .. } = &body[0] else {
    panic!();
  };
  // `obj` is renamed but the `.stop` member name is not.
  let Expr::Member { object, property } = test else {
    panic!();
  };
  assert!(matches!(object.as_ref(), Expr::Ident(i) if i.value == "a"));
  assert_eq!(property, "stop");
}

#[test]
fn many_locals_get_unique_names() {
  let mut src = String::from("function test() {");
  for i in 0..120 {
    src.push_str(&format!("var v{} = {};", i, i));
  }
  src.push('}');
  let mut program = parse(&src).unwrap();
  mangle(&mut program, true);
  let Stmt::Func(func) = &program.body[0] else {
    panic!();
  };
  let mut seen = std::collections::HashSet::new();
  for stmt in &func.body {
    let Stmt::Var(decls) = stmt else {
      panic!();
    };
    assert!(seen.insert(decls[0].name.value.clone()));
    assert!(decls[0].name.value.len() <= 2);
  }
  assert_eq!(seen.len(), 120);
}

#[test]
fn reserved_words_are_never_assigned_as_names() {
  let mut src = String::from("function test() {");
  for i in 0..520 {
    src.push_str(&format!("var v{};", i));
  }
  src.push('}');
  let mut program = parse(&src).unwrap();
  mangle(&mut program, true);
  let Stmt::Func(func) = &program.body[0] else {
    panic!();
  };
  let names: Vec<String> = func
    .body
    .iter()
    .map(|stmt| {
      let Stmt::Var(decls) = stmt else {
        panic!();
      };
      decls[0].name.value.clone()
    })
    .collect();
  // 520 symbols push the sequence far enough into two-character candidates to produce `do`,
  // `if`, and `in`; all three must be passed over.
  for keyword in ["do", "if", "in"] {
    assert!(!names.iter().any(|n| n == keyword), "{} was assigned", keyword);
  }
  // `do` is the candidate right after `dn`; skipping it shifts the next symbol to `dp`.
  assert_eq!(names[229], "dn");
  assert_eq!(names[230], "dp");
  let unique: std::collections::HashSet<_> = names.iter().collect();
  assert_eq!(unique.len(), 520);
}
