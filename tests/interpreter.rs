mod common;

use pretty_assertions::assert_eq;

use common::{failure_of, output_of, session};
use rox::value::Value;

fn runtime_error(source: &str) -> (String, String) {
    let (out, failure) = failure_of(source);

    assert_eq!(failure.exit_code(), 70);
    (out, failure.to_string())
}

#[test]
fn arithmetic_and_printing() {
    assert_eq!(output_of("print (1 + 2) * 3;"), "9\n");
    assert_eq!(output_of("print 7 / 2;"), "3.5\n");
    assert_eq!(output_of("print -0.5 + 2;"), "1.5\n");
    assert_eq!(output_of("print \"a\" + \"b\";"), "ab\n");
}

#[test]
fn division_follows_ieee() {
    assert_eq!(
        output_of("print 1 / 0; print -1 / 0; print 0 / 0;"),
        "Infinity\n-Infinity\nNaN\n"
    );
}

#[test]
fn equality_and_truthiness() {
    let source = r#"
print nil == nil;
print 1 == "1";
print "x" == "x";
print !nil;
print !0;
print !"";
print 2 >= 2;
"#;

    assert_eq!(
        output_of(source),
        "true\nfalse\ntrue\ntrue\nfalse\nfalse\ntrue\n"
    );
}

#[test]
fn number_equality_compares_bits() {
    let source = r#"
var n = 0/0;
print n == n;
print n != n;
print 0 == -0;
print 1 == 1.0;
"#;

    assert_eq!(output_of(source), "true\nfalse\nfalse\ntrue\n");
}

#[test]
fn logical_operators_return_operands() {
    assert_eq!(
        output_of("print nil or \"yes\"; print 1 and 2; print false and undefined;"),
        "yes\n2\nfalse\n"
    );
}

#[test]
fn blocks_shadow_and_restore() {
    let source = r#"
var a = "outer";
{
  var a = "inner";
  print a;
}
print a;
"#;

    assert_eq!(output_of(source), "inner\nouter\n");
}

#[test]
fn control_flow() {
    let source = r#"
var i = 0;
while (i < 3) {
  if (i == 1) print "one"; else print i;
  i = i + 1;
}
for (var j = 0; j < 2; j = j + 1) print j;
"#;

    assert_eq!(output_of(source), "0\none\n2\n0\n1\n");
}

#[test]
fn recursion_and_return() {
    let source = r#"
fun fib(n) {
  if (n < 2) return n;
  return fib(n - 1) + fib(n - 2);
}
print fib(10);
"#;

    assert_eq!(output_of(source), "55\n");
}

#[test]
fn return_unwinds_out_of_loops() {
    let source = r#"
fun first() {
  for (var i = 0; i < 10; i = i + 1) {
    while (true) {
      return i;
    }
  }
}
print first();
"#;

    assert_eq!(output_of(source), "0\n");
}

#[test]
fn function_without_return_yields_nil() {
    assert_eq!(output_of("fun f() {} print f();"), "nil\n");
}

#[test]
fn closures_share_captured_frames() {
    let source = r#"
fun makeCounter() {
  var i = 0;
  fun count() {
    i = i + 1;
    return i;
  }
  return count;
}

var a = makeCounter();
var b = makeCounter();
print a();
print a();
print b();
"#;

    assert_eq!(output_of(source), "1\n2\n1\n");
}

#[test]
fn for_loop_capture() {
    let source = r#"
var direct;
var copied;
for (var i = 0; i < 3; i = i + 1) {
  var j = i;
  fun seeI() { return i; }
  fun seeJ() { return j; }
  if (i == 0) {
    direct = seeI;
    copied = seeJ;
  }
}
print direct();
print copied();
"#;

    assert_eq!(output_of(source), "3\n0\n");
}

#[test]
fn printing_callables() {
    assert_eq!(
        output_of("fun f() {} print f; print clock;"),
        "<fn f>\n<native fn>\n"
    );
}

#[test]
fn clock_returns_seconds() {
    assert_eq!(output_of("print clock() > 1000000000;"), "true\n");
}

#[test]
fn operand_type_errors() {
    assert_eq!(
        runtime_error("print -\"a\";").1,
        "Operand must be a number.\n[line 1]"
    );
    assert_eq!(
        runtime_error("print 1 < \"b\";").1,
        "Operands must be numbers.\n[line 1]"
    );
    assert_eq!(
        runtime_error("print 1 + nil;").1,
        "Operands must be two numbers or two strings.\n[line 1]"
    );
}

#[test]
fn runtime_error_stops_execution() {
    let (out, message) = runtime_error("print 1;\nprint missing;\nprint 2;");

    assert_eq!(out, "1\n");
    assert_eq!(message, "Undefined variable 'missing'.\n[line 2]");
}

#[test]
fn assigning_an_undeclared_global() {
    assert_eq!(
        runtime_error("x = 1;").1,
        "Undefined variable 'x'.\n[line 1]"
    );
}

#[test]
fn call_errors() {
    assert_eq!(
        runtime_error("\"str\"();").1,
        "Can only call functions and classes.\n[line 1]"
    );

    let (out, message) = runtime_error("fun f(a, b) { print \"ran\"; }\nf(1);");
    assert_eq!(out, "");
    assert_eq!(message, "Expected 2 arguments but got 1.\n[line 2]");

    let (out, message) = runtime_error("fun f(a, b) { print \"ran\"; }\nf(1, 2, 3);");
    assert_eq!(out, "");
    assert_eq!(message, "Expected 2 arguments but got 3.\n[line 2]");
}

#[test]
fn globals_persist_across_runs() {
    let (mut session, buf) = session();

    session.run("var total = 1;").unwrap();
    session.run("fun bump() { total = total + 1; }").unwrap();
    assert!(session.run("print nope;").is_err());
    session.run("bump(); print total;").unwrap();

    assert_eq!(buf.contents(), "2\n");
}

#[test]
fn evaluate_single_expression() {
    let (mut session, _) = session();

    assert_eq!(session.evaluate("(1 + 2) * 3").unwrap(), Value::Number(9.0));
    assert_eq!(
        session.evaluate("\"a\" + \"b\"").unwrap(),
        Value::String("ab".into())
    );
    assert_eq!(session.evaluate("-\"x\"").unwrap_err().exit_code(), 70);
    assert_eq!(session.evaluate("1 +").unwrap_err().exit_code(), 65);
}

fn double(args: &[Value]) -> Result<Value, String> {
    match args {
        [Value::Number(n)] => Ok(Value::Number(n * 2.0)),
        _ => Err("double expects a number.".to_string()),
    }
}

#[test]
fn host_functions() {
    let (mut session, buf) = session();
    session.interpreter_mut().define_native("double", 1, double);

    session.run("print double(21);").unwrap();
    let failure = session.run("double(\"x\");").unwrap_err();

    assert_eq!(buf.contents(), "42\n");
    assert_eq!(failure.to_string(), "double expects a number.\n[line 1]");
}

#[test]
fn lex_and_parse_errors_are_reported_together() {
    let (out, failure) = failure_of("print 1;\nvar x = @;\nprint ;");

    assert_eq!(out, "");
    assert_eq!(failure.exit_code(), 65);
    assert_eq!(
        failure.to_string(),
        "[line 2] Error: Unexpected character.\n\
         [line 2] Error at ';': Expect expression.\n\
         [line 3] Error at ';': Expect expression."
    );
}
