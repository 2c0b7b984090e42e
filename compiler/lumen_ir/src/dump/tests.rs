use super::*;
use crate::ast::{BinaryOp, DeclarationKind, UnaryOp};
use crate::AstBuilder;
use pretty_assertions::assert_eq;

#[test]
fn test_dump_function_declaration() {
    let interner = StringInterner::new();
    let a = interner.intern("a");
    let b_name = interner.intern("b");
    let f = interner.intern("add");

    let mut b = AstBuilder::new();
    let lhs = b.identifier(a);
    let rhs = b.identifier(b_name);
    let sum = b.binary(BinaryOp::Add, lhs, rhs);
    let ret = b.return_statement(Some(sum));
    let body = b.block(&[ret]);
    let decl = b.function_declaration(f, &[a, b_name], body);
    let root = b.program(&[decl]);
    let ast = b.finish(root).unwrap();

    let expected = "\
Program
  FunctionDeclaration 'add(a,b)'
    BlockStatement
      ReturnStatement
        BinaryExpression
          Identifier \"a\"
          +
          Identifier \"b\"
";
    assert_eq!(dump(&ast, &interner, root), expected);
}

#[test]
fn test_dump_control_flow_and_literals() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let hello = interner.intern("hello");

    let mut b = AstBuilder::new();
    let init = b.number(3.0);
    let decl = b.variable_declaration(DeclarationKind::Let, x, Some(init));
    let predicate = b.boolean(false);
    let text = b.string(hello);
    let stmt = b.expression_statement(text);
    let consequent = b.block(&[stmt]);
    let alternate = b.block(&[]);
    let if_stmt = b.if_statement(predicate, consequent, alternate);
    let root = b.program(&[decl, if_stmt]);
    let ast = b.finish(root).unwrap();

    let expected = "\
Program
  VariableDeclaration
    Let
    Identifier \"x\"
    NumericLiteral 3
  IfStatement
  If
    BooleanLiteral false
    BlockStatement
      ExpressionStatement
        StringLiteral \"hello\"
  Else
    BlockStatement
";
    assert_eq!(dump(&ast, &interner, root), expected);
}

#[test]
fn test_dump_subtree_and_unary() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new();
    let operand = b.number(0.5);
    let not = b.unary(UnaryOp::BitNot, operand);
    let stmt = b.expression_statement(not);
    let root = b.program(&[stmt]);
    let ast = b.finish(root).unwrap();

    assert_eq!(
        dump(&ast, &interner, not),
        "UnaryExpression\n  ~\n  NumericLiteral 0.5\n"
    );
}

#[test]
fn test_dump_call_lists_arguments() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new();
    let arg = b.number(f64::INFINITY);
    let call = b.call(interner.intern("$gc"), &[arg]);
    let stmt = b.expression_statement(call);
    let root = b.program(&[stmt]);
    let ast = b.finish(root).unwrap();

    assert_eq!(
        dump(&ast, &interner, call),
        "CallExpression '$gc'\n  NumericLiteral Infinity\n"
    );
}
