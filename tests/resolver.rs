mod common;

use pretty_assertions::assert_eq;

use common::{failure_of, output_of, run};

fn static_errors(source: &str) -> Vec<String> {
    let (out, failure) = failure_of(source);

    assert_eq!(out, "", "nothing may run when resolution fails");
    assert_eq!(failure.exit_code(), 65);
    failure.errors().iter().map(ToString::to_string).collect()
}

#[test]
fn local_read_in_own_initializer() {
    assert_eq!(
        static_errors("{ var a = 1; { var a = a; } }"),
        vec!["[line 1] Error at 'a': Can't read local variable in its own initializer."]
    );
}

#[test]
fn global_self_reference_is_a_runtime_matter() {
    let (_, result) = run("var a = a;");

    let failure = result.unwrap_err();
    assert_eq!(failure.exit_code(), 70);
    assert_eq!(failure.to_string(), "Undefined variable 'a'.\n[line 1]");
}

#[test]
fn local_redeclaration_is_rejected() {
    assert_eq!(
        static_errors("fun f() {\n  var a = 1;\n  var a = 2;\n}"),
        vec!["[line 3] Error at 'a': Already a variable with this name in this scope."]
    );
}

#[test]
fn parameter_shadowed_by_local_is_rejected() {
    assert_eq!(
        static_errors("fun f(a) { var a; }"),
        vec!["[line 1] Error at 'a': Already a variable with this name in this scope."]
    );
}

#[test]
fn global_redeclaration_is_allowed() {
    assert_eq!(output_of("var a = 1; var a = 2; print a;"), "2\n");
}

#[test]
fn misplaced_return() {
    assert_eq!(
        static_errors("return 1;"),
        vec!["[line 1] Error at 'return': Can't return from top-level code."]
    );
    assert_eq!(
        static_errors("class A { init() { return 1; } }"),
        vec!["[line 1] Error at 'return': Can't return a value from an initializer."]
    );
}

#[test]
fn bare_return_in_initializer_is_fine() {
    assert_eq!(
        output_of("class A { init() { this.x = 1; return; } } print A().x;"),
        "1\n"
    );
}

#[test]
fn this_and_super_outside_a_class() {
    assert_eq!(
        static_errors("print this;"),
        vec!["[line 1] Error at 'this': Can't use 'this' outside of a class."]
    );
    assert_eq!(
        static_errors("fun f() { super.g(); }"),
        vec!["[line 1] Error at 'super': Can't use 'super' outside of a class."]
    );
    assert_eq!(
        static_errors("class A { m() { super.m(); } }"),
        vec!["[line 1] Error at 'super': Can't use 'super' in a class with no superclass."]
    );
}

#[test]
fn class_cannot_inherit_from_itself() {
    assert_eq!(
        static_errors("class A < A {}"),
        vec!["[line 1] Error at 'A': A class can't inherit from itself."]
    );
}

#[test]
fn every_error_is_collected() {
    assert_eq!(
        static_errors("return;\nprint this;\n{ var b = 1; var b = 2; }"),
        vec![
            "[line 1] Error at 'return': Can't return from top-level code.",
            "[line 2] Error at 'this': Can't use 'this' outside of a class.",
            "[line 3] Error at 'b': Already a variable with this name in this scope.",
        ]
    );
}

#[test]
fn binding_is_fixed_at_resolution_time() {
    let source = r#"
var a = "global";
{
  fun showA() {
    print a;
  }

  showA();
  var a = "block";
  showA();
}
"#;

    assert_eq!(output_of(source), "global\nglobal\n");
}
