use similar::TextDiff;

use crate::minify;
use crate::TrimError;
use crate::TrimOptions;

fn check_with(source: &str, options: &TrimOptions, expected: &str) {
  let got = minify(source, options).unwrap();
  if got != expected {
    let diff = TextDiff::from_lines(expected, got.as_str());
    panic!(
      "output differs from expected:\n{}",
      diff.unified_diff().header("expected", "got")
    );
  }
}

fn check(source: &str, expected: &str) {
  check_with(source, &TrimOptions::default(), expected);
}

fn check_mangled(source: &str, expected: &str) {
  check_with(
    source,
    &TrimOptions {
      mangle: true,
      ..TrimOptions::default()
    },
    expected,
  );
}

#[test]
fn test_statements_collapse_onto_one_line() {
  check("var a = 1;\nvar b = 2;\n", "var a=1;var b=2;");
  check("a();\nb();\n", "a();b();");
}

#[test]
fn test_mangle_keeps_toplevel_names_by_default() {
  check_mangled(
    "function f(long, names) { return long + names; }",
    "function f(a,b){return a+b;}",
  );
}

#[test]
fn test_mangle_toplevel() {
  check_with(
    "var longname = 1; function use() { return longname; }",
    &TrimOptions {
      mangle: true,
      mangle_toplevel: true,
      ..TrimOptions::default()
    },
    "var a=1;function b(){return a;}",
  );
}

#[test]
fn test_mangle_avoids_captured_names() {
  check_mangled(
    "var keep; function f(x) { return function(y) { return x + y; }; }",
    "var keep;function f(a){return function(b){return a+b;};}",
  );
}

#[test]
fn test_mangle_nested_functions_and_properties() {
  check_with(
    "function test(){function is_false(){var xpos=5; var point={xpos:17,ypos:10}; return true;}}",
    &TrimOptions {
      mangle: true,
      mangle_toplevel: true,
      ..TrimOptions::default()
    },
    "function a(){function a(){var a=5;var b={xpos:17,ypos:10};return true;}}",
  );
}

#[test]
fn test_mangle_never_captures_through_nested_scopes() {
  check_with(
    "var g; function f1() { return function f2() { return function f3() { var local; return g + local; }; }; }",
    &TrimOptions {
      mangle: true,
      mangle_toplevel: true,
      ..TrimOptions::default()
    },
    "var a;function b(){return function b(){return function b(){var b;return a+b;};};}",
  );
}

#[test]
fn test_semicolons_are_inserted() {
  check("var a = 1\nvar b = 2", "var a=1;var b=2;");
  check("a = b\n(c)", "a=b(c);");
}

#[test]
fn test_restricted_return_keeps_inserted_semicolon() {
  check(
    "function f() {\n  return\n  1\n}",
    "function f(){return;1;}",
  );
}

#[test]
fn test_unary_operators_do_not_merge() {
  check("a + +b;", "a+ +b;");
  check("a - -b;", "a- -b;");
  check("a + ++b;", "a+ ++b;");
  check("- -a;", "- -a;");
}

#[test]
fn test_keyword_operators_keep_word_breaks() {
  check("typeof a;", "typeof a;");
  check("void 0;", "void 0;");
  check("delete a.b;", "delete a.b;");
  check("a instanceof B;", "a instanceof B;");
  check("\"x\" in o;", "\"x\"in o;");
}

#[test]
fn test_division_next_to_regex_keeps_spaces() {
  check("var r = a / /b/ / c;", "var r=a/ /b/ /c;");
  check("var r = /a*/.test(s);", "var r=/a*/.test(s);");
}

#[test]
fn test_number_followed_by_dot_member() {
  check("1 .toString();", "1 .toString();");
  check("(1).toString();", "(1).toString();");
}

#[test]
fn test_html_comment_opener_is_broken_up() {
  check("a < !--b;", "a<! --b;");
}

#[test]
fn test_grouping_parentheses_are_preserved() {
  check("(a + b) * c;", "(a+b)*c;");
  check("(function() { go(); })();", "(function(){go();})();");
}

#[test]
fn test_array_literals() {
  check("var y = [1, , 3];", "var y=[1,,3];");
  check("var a = [1, , ];", "var a=[1,,];");
  check("var e = [];", "var e=[];");
}

#[test]
fn test_object_literals() {
  check(
    "var x = { a: 1, \"b\": 2, 3: c };",
    "var x={a:1,\"b\":2,3:c};",
  );
  check("var o = {};", "var o={};");
}

#[test]
fn test_control_statements() {
  check("if (a) b(); else c();", "if(a)b();else c();");
  check(
    "if (a) { b(); } else if (c) { d(); }",
    "if(a){b();}else if(c){d();}",
  );
  check("do a(); while (b);", "do a();while(b);");
  check(
    "for (var i = 0; i < n; i++) f(i);",
    "for(var i=0;i<n;i++)f(i);",
  );
  check("for (;;) wait();", "for(;;)wait();");
  check("for (var k in obj) keys.push(k);", "for(var k in obj)keys.push(k);");
  check("with (o) m();", "with(o)m();");
}

#[test]
fn test_switch() {
  check(
    "switch (a) { case 1: b(); break; default: c(); }",
    "switch(a){case 1:b();break;default:c();}",
  );
}

#[test]
fn test_labels() {
  check(
    "loop: while (a) { break loop; }",
    "loop:while(a){break loop;}",
  );
  check(
    "outer: for (;;) { continue outer; }",
    "outer:for(;;){continue outer;}",
  );
}

#[test]
fn test_try_catch_finally() {
  check(
    "try { f(); } catch (e) { g(e); } finally { h(); }",
    "try{f();}catch(e){g(e);}finally{h();}",
  );
}

#[test]
fn test_new_expressions() {
  check("var d = new Date();", "var d=new Date();");
  check("var p = new a.b;", "var p=new a.b;");
}

#[test]
fn test_conditional_and_comma() {
  check("a = b ? c : d, e;", "a=b?c:d,e;");
}

#[test]
fn test_throw_and_debugger() {
  check("throw new Error(m);", "throw new Error(m);");
  check("debugger;", "debugger;");
}

#[test]
fn test_pretty_output() {
  check_with(
    "function f(a) { if (a) return a; var b = 2; return b; }",
    &TrimOptions {
      pretty: true,
      ..TrimOptions::default()
    },
    "function f(a) {\n  if (a)\n    return a;\n  var b = 2;\n  return b;\n}",
  );
}

#[test]
fn test_syntax_errors_are_reported() {
  let err = minify("var", &TrimOptions::default()).unwrap_err();
  assert!(matches!(err, TrimError::Syntax(_)));
  assert!(minify("a = ;", &TrimOptions::default()).is_err());
  assert!(minify("\"unterminated", &TrimOptions::default()).is_err());
}
