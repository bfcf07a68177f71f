mod common;

use pretty_assertions::assert_eq;

use common::{failure_of, output_of};

#[test]
fn printing_classes_and_instances() {
    assert_eq!(
        output_of("class Bagel {} print Bagel; print Bagel();"),
        "Bagel\nBagel instance\n"
    );
}

#[test]
fn fields_are_created_on_assignment() {
    let source = r#"
class Box {}
var b = Box();
b.content = "cat";
print b.content;
b.content = "dog";
print b.content;
"#;

    assert_eq!(output_of(source), "cat\ndog\n");
}

#[test]
fn initializer_and_methods() {
    let source = r#"
class Point {
  init(x, y) {
    this.x = x;
    this.y = y;
  }

  sum() {
    return this.x + this.y;
  }
}

var p = Point(1, 2);
print p.sum();
print p.init(5, 5).x;
"#;

    assert_eq!(output_of(source), "3\n5\n");
}

#[test]
fn bound_methods_remember_their_instance() {
    let source = r#"
class Person {
  init(name) { this.name = name; }
  greet() { print "hi " + this.name; }
}

var jane = Person("Jane");
var greet = jane.greet;
jane.name = "Janet";
greet();
"#;

    assert_eq!(output_of(source), "hi Janet\n");
}

#[test]
fn fields_shadow_methods() {
    let source = r#"
class A {
  m() { return "method"; }
}
var a = A();
print a.m();
a.m = "field";
print a.m;
"#;

    assert_eq!(output_of(source), "method\nfield\n");
}

#[test]
fn inheritance_and_super() {
    let source = r#"
class A {
  method() { print "A method"; }
}

class B < A {
  method() { print "B method"; }
  test() { super.method(); }
}

class C < B {}

C().test();
C().method();
"#;

    assert_eq!(output_of(source), "A method\nB method\n");
}

#[test]
fn super_resolves_statically() {
    let source = r#"
class A {
  say() { print "A"; }
}
class B < A {
  say() { print "B"; super.say(); }
}
class C < B {
  say() { print "C"; super.say(); }
}
C().say();
"#;

    assert_eq!(output_of(source), "C\nB\nA\n");
}

#[test]
fn inherited_initializer_sets_arity() {
    let source = r#"
class Base {
  init(v) { this.v = v; }
}
class Derived < Base {}
print Derived(7).v;
"#;

    assert_eq!(output_of(source), "7\n");

    let (_, failure) = failure_of("class Base { init(v) {} }\nclass D < Base {}\nD();");
    assert_eq!(
        failure.to_string(),
        "Expected 1 arguments but got 0.\n[line 3]"
    );
}

#[test]
fn class_arity_without_init_is_zero() {
    let (_, failure) = failure_of("class A {}\nA(1);");

    assert_eq!(failure.exit_code(), 70);
    assert_eq!(failure.to_string(), "Expected 0 arguments but got 1.\n[line 2]");
}

#[test]
fn property_errors() {
    let (_, failure) = failure_of("var x = 1;\nprint x.y;");
    assert_eq!(failure.to_string(), "Only instances have properties.\n[line 2]");

    let (_, failure) = failure_of("var x = \"s\";\nx.y = 1;");
    assert_eq!(failure.to_string(), "Only instances have fields.\n[line 2]");

    let (_, failure) = failure_of("class A {}\nprint A().nope;");
    assert_eq!(failure.to_string(), "Undefined property 'nope'.\n[line 2]");
}

#[test]
fn superclass_must_be_a_class() {
    let (_, failure) = failure_of("var NotAClass = \"nope\";\nclass B < NotAClass {}");

    assert_eq!(failure.exit_code(), 70);
    assert_eq!(failure.to_string(), "Superclass must be a class.\n[line 2]");
}

#[test]
fn instances_compare_by_identity() {
    let source = r#"
class A {}
var a = A();
var b = a;
print a == b;
print a == A();
"#;

    assert_eq!(output_of(source), "true\nfalse\n");
}

#[test]
fn methods_can_close_over_locals() {
    let source = r#"
fun make() {
  var greeting = "hello";
  class Greeter {
    greet() { return greeting; }
  }
  return Greeter;
}
print make()().greet();
"#;

    assert_eq!(output_of(source), "hello\n");
}
