use super::*;
use crate::StringInterner;
use pretty_assertions::assert_eq;

#[test]
fn test_children_precede_parents() {
    let mut b = AstBuilder::new();
    let one = b.number(1.0);
    let two = b.number(2.0);
    let sum = b.binary(BinaryOp::Add, one, two);
    let stmt = b.expression_statement(sum);
    let root = b.program(&[stmt]);
    let ast = b.finish(root).unwrap();

    assert_eq!(ast.root(), root);
    assert_eq!(ast.len(), 5);
    assert_eq!(
        ast.kind(sum),
        NodeKind::BinaryExpression {
            op: BinaryOp::Add,
            lhs: one,
            rhs: two,
        }
    );
    let NodeKind::Program(range) = ast.kind(root) else {
        panic!("root is not a program");
    };
    assert_eq!(ast.node_list(range), &[stmt]);
    assert_eq!(ast.kind(one).as_number(), Some(1.0));
}

#[test]
fn test_parameter_names_are_stored_in_order() {
    let interner = StringInterner::new();
    let a = interner.intern("a");
    let b_name = interner.intern("b");
    let f = interner.intern("f");

    let mut b = AstBuilder::new();
    let body = b.block(&[]);
    let decl = b.function_declaration(f, &[a, b_name], body);
    let root = b.program(&[decl]);
    let ast = b.finish(root).unwrap();

    let NodeKind::FunctionDeclaration { params, .. } = ast.kind(decl) else {
        panic!("expected a function declaration");
    };
    assert_eq!(ast.name_list(params), &[a, b_name]);
}

#[test]
fn test_empty_lists_use_empty_range() {
    let mut b = AstBuilder::new();
    let root = b.program(&[]);
    let ast = b.finish(root).unwrap();
    assert_eq!(ast.kind(root), NodeKind::Program(NodeRange::EMPTY));
    assert!(ast.node_list(NodeRange::EMPTY).is_empty());
}

#[test]
fn test_root_must_be_program() {
    let mut b = AstBuilder::new();
    let root = b.block(&[]);
    assert_eq!(
        b.finish(root).unwrap_err(),
        AstError::RootNotProgram {
            root,
            found: "BlockStatement",
        }
    );
}

#[test]
fn test_missing_root_is_rejected() {
    let b = AstBuilder::new();
    assert!(matches!(
        b.finish(NodeId::new(0)),
        Err(AstError::RootNotProgram { found: "nothing", .. })
    ));
}

#[test]
fn test_nested_program_is_rejected() {
    let mut b = AstBuilder::new();
    let inner = b.program(&[]);
    let root = b.program(&[inner]);
    assert_eq!(
        b.finish(root).unwrap_err(),
        AstError::NestedProgram { node: inner }
    );
}

#[test]
fn test_forward_reference_is_rejected() {
    let mut b = AstBuilder::new();
    let stmt = b.expression_statement(NodeId::new(5));
    let root = b.program(&[stmt]);
    assert_eq!(
        b.finish(root).unwrap_err(),
        AstError::DanglingChild {
            parent: stmt,
            child: NodeId::new(5),
        }
    );
}

#[test]
fn test_out_of_range_statement_list_is_rejected() {
    let mut b = AstBuilder::new();
    let block = b.push(NodeKind::Block(NodeRange::new(50, 3)));
    let root = b.program(&[block]);
    assert_eq!(
        b.finish(root).unwrap_err(),
        AstError::DanglingList {
            node: block,
            start: 50,
            len: 3,
        }
    );
}

#[test]
fn test_out_of_range_argument_list_is_rejected() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new();
    let one = b.number(1.0);
    // Two entries are ever stored: `one` and the program's statement.
    let _valid = b.call(interner.intern("f"), &[one]);
    let call = b.push(NodeKind::CallExpression {
        callee: interner.intern("g"),
        arguments: NodeRange::new(0, 5),
    });
    let stmt = b.expression_statement(call);
    let root = b.program(&[stmt]);
    assert!(matches!(
        b.finish(root),
        Err(AstError::DanglingList { node, start: 0, len: 5 }) if node == call
    ));
}

#[test]
fn test_out_of_range_parameter_list_is_rejected() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new();
    let body = b.block(&[]);
    let decl = b.push(NodeKind::FunctionDeclaration {
        name: interner.intern("f"),
        params: NameRange::new(7, 1),
        body,
    });
    let root = b.program(&[decl]);
    assert_eq!(
        b.finish(root).unwrap_err(),
        AstError::DanglingList {
            node: decl,
            start: 7,
            len: 1,
        }
    );
}

#[test]
fn test_if_branches_must_be_blocks() {
    let mut b = AstBuilder::new();
    let predicate = b.boolean(true);
    let consequent = b.block(&[]);
    let alternate = b.number(0.0);
    let stmt = b.if_statement(predicate, consequent, alternate);
    let root = b.program(&[stmt]);
    assert_eq!(
        b.finish(root).unwrap_err(),
        AstError::ExpectedBlock {
            parent: stmt,
            child: alternate,
            found: "NumericLiteral",
        }
    );
}

#[test]
fn test_function_body_must_be_block() {
    let interner = StringInterner::new();
    let mut b = AstBuilder::new();
    let body = b.number(1.0);
    let decl = b.function_declaration(interner.intern("f"), &[], body);
    let root = b.program(&[decl]);
    assert!(matches!(
        b.finish(root),
        Err(AstError::ExpectedBlock { found: "NumericLiteral", .. })
    ));
}

#[test]
fn test_statement_in_expression_slot_is_rejected() {
    let mut b = AstBuilder::new();
    let inner = b.block(&[]);
    let ret = b.return_statement(Some(inner));
    let root = b.program(&[ret]);
    assert_eq!(
        b.finish(root).unwrap_err(),
        AstError::ExpectedExpression {
            parent: ret,
            child: inner,
            found: "BlockStatement",
        }
    );
}

#[test]
fn test_runtime_shapes_are_not_rejected() {
    // Non-identifier assignment targets and computed member properties are
    // reported by the evaluator, not by validation.
    let mut b = AstBuilder::new();
    let target = b.number(1.0);
    let value = b.number(2.0);
    let assign = b.assignment(target, value);
    let object = b.object();
    let property = b.string(crate::Name::EMPTY);
    let member = b.member(object, property);
    let s1 = b.expression_statement(assign);
    let s2 = b.expression_statement(member);
    let root = b.program(&[s1, s2]);
    assert!(b.finish(root).is_ok());
}

#[test]
fn test_error_display_names_nodes() {
    let err = AstError::ExpectedBlock {
        parent: NodeId::new(3),
        child: NodeId::new(2),
        found: "Identifier",
    };
    assert_eq!(
        err.to_string(),
        "NodeId(3) expects a block at NodeId(2), found Identifier"
    );
}
