//! Statement sequencing, branches, loops and completion values.

use lumen_ir::{BinaryOp, LogicalOp, UnaryOp};
use pretty_assertions::assert_eq;

use super::{run, Script};
use crate::{Completion, Interpreter, Value};

#[test]
fn empty_program_yields_undefined() {
    let s = Script::new();
    let (interner, ast) = s.finish(&[]);
    assert_eq!(run(&interner, &ast).unwrap(), Value::Undefined);
}

#[test]
fn program_yields_last_statement_value() {
    let mut s = Script::new();
    let one = s.num(1.0);
    let first = s.stmt(one);
    let two = s.num(2.0);
    let three = s.num(3.0);
    let sum = s.binary(BinaryOp::Add, two, three);
    let second = s.stmt(sum);
    let (interner, ast) = s.finish(&[first, second]);

    assert_eq!(run(&interner, &ast).unwrap(), Value::Number(5.0));
}

#[test]
fn declarations_yield_undefined() {
    let mut s = Script::new();
    let one = s.num(1.0);
    let decl = s.let_("x", Some(one));
    let (interner, ast) = s.finish(&[decl]);

    assert_eq!(run(&interner, &ast).unwrap(), Value::Undefined);
}

#[test]
fn function_declaration_yields_the_function() {
    let mut s = Script::new();
    let f = s.function("f", &[], &[]);
    let (interner, ast) = s.finish(&[f]);

    let mut interpreter = Interpreter::new(&interner, &ast);
    let value = interpreter.run().unwrap();
    assert_eq!(value.type_of(interpreter.heap()), "function");
    assert_eq!(interpreter.global("f"), Some(value));
}

#[test]
fn if_takes_exactly_one_branch() {
    for (predicate, expected) in [(0.0, "no"), (2.0, "yes")] {
        let mut s = Script::new();
        let p = s.num(predicate);
        let yes = s.str("yes");
        let yes = s.stmt(yes);
        let no = s.str("no");
        let no = s.stmt(no);
        let branch = s.if_else(p, &[yes], &[no]);
        let (interner, ast) = s.finish(&[branch]);

        let mut interpreter = Interpreter::new(&interner, &ast);
        let value = interpreter.run().unwrap();
        assert_eq!(interpreter.display(value).unwrap(), expected);
    }
}

#[test]
fn empty_else_yields_undefined() {
    let mut s = Script::new();
    let p = s.bool(false);
    let one = s.num(1.0);
    let one = s.stmt(one);
    let branch = s.if_else(p, &[one], &[]);
    let (interner, ast) = s.finish(&[branch]);

    assert_eq!(run(&interner, &ast).unwrap(), Value::Undefined);
}

/// `var i = 0; while (i < 3) { i = i + 1; }` yields the last body value.
#[test]
fn while_yields_last_body_value() {
    let mut s = Script::new();
    let zero = s.num(0.0);
    let init = s.var("i", Some(zero));
    let i = s.ident("i");
    let three = s.num(3.0);
    let test = s.binary(BinaryOp::Lt, i, three);
    let i = s.ident("i");
    let one = s.num(1.0);
    let next = s.binary(BinaryOp::Add, i, one);
    let step = s.assign("i", next);
    let step = s.stmt(step);
    let loop_ = s.while_(test, &[step]);
    let (interner, ast) = s.finish(&[init, loop_]);

    let mut interpreter = Interpreter::new(&interner, &ast);
    assert_eq!(interpreter.run().unwrap(), Value::Number(3.0));
    assert_eq!(interpreter.global("i"), Some(Value::Number(3.0)));
}

#[test]
fn while_that_never_runs_yields_undefined() {
    let mut s = Script::new();
    let test = s.bool(false);
    let one = s.num(1.0);
    let one = s.stmt(one);
    let loop_ = s.while_(test, &[one]);
    let (interner, ast) = s.finish(&[loop_]);

    assert_eq!(run(&interner, &ast).unwrap(), Value::Undefined);
}

/// `function f() { while (true) { return 7; } } f();`
#[test]
fn return_inside_while_ends_the_call() {
    let mut s = Script::new();
    let forever = s.bool(true);
    let seven = s.num(7.0);
    let ret = s.ret(Some(seven));
    let loop_ = s.while_(forever, &[ret]);
    let f = s.function("f", &[], &[loop_]);
    let call = s.call("f", &[]);
    let call = s.stmt(call);
    let (interner, ast) = s.finish(&[f, call]);

    assert_eq!(run(&interner, &ast).unwrap(), Value::Number(7.0));
}

/// `function f() { if (true) { { return 1; } } return 2; }`
#[test]
fn return_propagates_through_nested_blocks() {
    let mut s = Script::new();
    let t = s.bool(true);
    let one = s.num(1.0);
    let ret_one = s.ret(Some(one));
    let inner = s.block(&[ret_one]);
    let branch = s.if_else(t, &[inner], &[]);
    let two = s.num(2.0);
    let ret_two = s.ret(Some(two));
    let f = s.function("f", &[], &[branch, ret_two]);
    let call = s.call("f", &[]);
    let call = s.stmt(call);
    let (interner, ast) = s.finish(&[f, call]);

    assert_eq!(run(&interner, &ast).unwrap(), Value::Number(1.0));
}

#[test]
fn top_level_return_stops_the_program() {
    let mut s = Script::new();
    let five = s.num(5.0);
    let ret = s.ret(Some(five));
    let six = s.num(6.0);
    let after = s.assign("never", six);
    let after = s.stmt(after);
    let (interner, ast) = s.finish(&[ret, after]);

    assert_eq!(run(&interner, &ast).unwrap(), Value::Number(5.0));
}

#[test]
fn evaluate_reports_return_completion() {
    let mut s = Script::new();
    let ret = s.ret(None);
    let (interner, ast) = s.finish(&[ret]);

    let mut interpreter = Interpreter::new(&interner, &ast);
    assert_eq!(
        interpreter.evaluate(ret).unwrap(),
        Completion::Return(Value::Undefined)
    );
    assert!(interpreter.evaluate(ast.root()).unwrap().is_return());
}

/// `var calls = 0; function bump() { calls = calls + 1; return true; }`
/// then `false && bump(); true || bump();`
#[test]
fn logical_operators_evaluate_both_sides() {
    let mut s = Script::new();
    let zero = s.num(0.0);
    let counter = s.var("calls", Some(zero));
    let calls = s.ident("calls");
    let one = s.num(1.0);
    let inc = s.binary(BinaryOp::Add, calls, one);
    let inc = s.assign("calls", inc);
    let inc = s.stmt(inc);
    let t = s.bool(true);
    let ret = s.ret(Some(t));
    let bump = s.function("bump", &[], &[inc, ret]);

    let f = s.bool(false);
    let call = s.call("bump", &[]);
    let and = s.logical(LogicalOp::And, f, call);
    let and = s.stmt(and);
    let t = s.bool(true);
    let call = s.call("bump", &[]);
    let or = s.logical(LogicalOp::Or, t, call);
    let or = s.stmt(or);
    let (interner, ast) = s.finish(&[counter, bump, and, or]);

    let mut interpreter = Interpreter::new(&interner, &ast);
    assert_eq!(interpreter.run().unwrap(), Value::Boolean(true));
    assert_eq!(interpreter.global("calls"), Some(Value::Number(2.0)));
}

#[test]
fn logical_operators_yield_booleans_not_operands() {
    let mut s = Script::new();
    let a = s.str("a");
    let b = s.num(2.0);
    let or = s.logical(LogicalOp::Or, a, b);
    let or = s.stmt(or);
    let (interner, ast) = s.finish(&[or]);

    assert_eq!(run(&interner, &ast).unwrap(), Value::Boolean(true));
}

#[test]
fn unary_operators() {
    let mut s = Script::new();
    let empty = s.str("");
    let not = s.b.unary(UnaryOp::Not, empty);
    let not = s.stmt(not);
    let (interner, ast) = s.finish(&[not]);
    assert_eq!(run(&interner, &ast).unwrap(), Value::Boolean(true));

    let mut s = Script::new();
    let n = s.num(7.0);
    let inv = s.b.unary(UnaryOp::BitNot, n);
    let inv = s.stmt(inv);
    let (interner, ast) = s.finish(&[inv]);
    assert_eq!(run(&interner, &ast).unwrap(), Value::Number(-8.0));
}

#[test]
fn string_concatenation_and_identity() {
    let mut s = Script::new();
    let a = s.str("a");
    let one = s.num(1.0);
    let sum = s.binary(BinaryOp::Add, a, one);
    let decl = s.let_("s", Some(sum));
    let lhs = s.ident("s");
    let rhs = s.ident("s");
    let same = s.binary(BinaryOp::TypedEq, lhs, rhs);
    let same = s.stmt(same);
    let (interner, ast) = s.finish(&[decl, same]);

    let mut interpreter = Interpreter::new(&interner, &ast);
    assert_eq!(interpreter.run().unwrap(), Value::Boolean(true));
    let text = interpreter.global("s").unwrap();
    assert_eq!(interpreter.display(text).unwrap(), "a1");
}

#[test]
fn equal_string_literals_are_distinct_cells() {
    let mut s = Script::new();
    let a = s.str("x");
    let b = s.str("x");
    let eq = s.binary(BinaryOp::TypedEq, a, b);
    let eq = s.stmt(eq);
    let (interner, ast) = s.finish(&[eq]);

    assert_eq!(run(&interner, &ast).unwrap(), Value::Boolean(false));
}

/// `!!!...!true` nested far deeper than the native stack could hold unaided.
#[test]
fn deeply_nested_expressions_grow_the_stack() {
    let mut s = Script::new();
    let mut expr = s.bool(true);
    for _ in 0..20_000 {
        expr = s.b.unary(UnaryOp::Not, expr);
    }
    let stmt = s.stmt(expr);
    let (interner, ast) = s.finish(&[stmt]);

    assert_eq!(run(&interner, &ast).unwrap(), Value::Boolean(true));
}
