use super::*;
use lumen_ir::StringInterner;
use pretty_assertions::assert_eq;

fn names(interner: &StringInterner) -> (Name, Name) {
    (interner.intern("x"), interner.intern("y"))
}

#[test]
fn let_reads_undefined_until_assigned() {
    let interner = StringInterner::new();
    let (x, _) = names(&interner);
    let mut env = Environment::new();

    env.declare(x, DeclarationKind::Let).unwrap();
    assert_eq!(env.lookup(x), Some(Value::Undefined));

    env.assign(x, Value::Number(3.0)).unwrap();
    assert_eq!(env.lookup(x), Some(Value::Number(3.0)));
}

#[test]
fn assign_to_missing_binding_fails() {
    let interner = StringInterner::new();
    let (x, _) = names(&interner);
    let mut env = Environment::new();
    assert_eq!(env.assign(x, Value::Undefined), Err(AssignError::Undefined));
    assert_eq!(env.lookup(x), None);
}

#[test]
fn let_is_block_scoped() {
    let interner = StringInterner::new();
    let (x, _) = names(&interner);
    let mut env = Environment::new();

    env.push_scope(ScopeKind::Block);
    env.declare(x, DeclarationKind::Let).unwrap();
    assert_eq!(env.lookup(x), Some(Value::Undefined));
    env.pop_scope();

    assert_eq!(env.lookup(x), None);
}

#[test]
fn var_hoists_out_of_blocks() {
    let interner = StringInterner::new();
    let (x, _) = names(&interner);
    let mut env = Environment::new();

    env.push_scope(ScopeKind::Block);
    env.push_scope(ScopeKind::Block);
    env.declare(x, DeclarationKind::Var).unwrap();
    env.assign(x, Value::Number(1.0)).unwrap();
    env.pop_scope();
    env.pop_scope();

    assert_eq!(env.lookup(x), Some(Value::Number(1.0)));
    assert_eq!(env.lookup_global(x), Some(Value::Number(1.0)));
}

#[test]
fn var_stops_at_function_scope() {
    let interner = StringInterner::new();
    let (x, _) = names(&interner);
    let env = Environment::new();

    let mut callee = env.child();
    callee.push_scope(ScopeKind::Block);
    callee.declare(x, DeclarationKind::Var).unwrap();
    callee.pop_scope();

    assert_eq!(callee.lookup(x), Some(Value::Undefined));
    assert_eq!(env.lookup(x), None);
}

#[test]
fn let_redeclaration_in_same_scope_is_rejected() {
    let interner = StringInterner::new();
    let (x, y) = names(&interner);
    let mut env = Environment::new();

    env.declare(x, DeclarationKind::Let).unwrap();
    assert_eq!(
        env.declare(x, DeclarationKind::Let),
        Err(DeclareError::Redeclaration)
    );

    env.declare(y, DeclarationKind::Var).unwrap();
    assert_eq!(
        env.declare(y, DeclarationKind::Let),
        Err(DeclareError::Redeclaration)
    );
}

#[test]
fn var_redeclaration_keeps_value() {
    let interner = StringInterner::new();
    let (x, _) = names(&interner);
    let mut env = Environment::new();

    env.declare(x, DeclarationKind::Var).unwrap();
    env.assign(x, Value::Boolean(true)).unwrap();
    env.declare(x, DeclarationKind::Var).unwrap();

    assert_eq!(env.lookup(x), Some(Value::Boolean(true)));
}

#[test]
fn var_over_let_is_rejected_even_across_blocks() {
    let interner = StringInterner::new();
    let (x, y) = names(&interner);
    let mut env = Environment::new();

    env.declare(x, DeclarationKind::Let).unwrap();
    assert_eq!(
        env.declare(x, DeclarationKind::Var),
        Err(DeclareError::Redeclaration)
    );

    env.push_scope(ScopeKind::Block);
    env.declare(y, DeclarationKind::Let).unwrap();
    env.push_scope(ScopeKind::Block);
    assert_eq!(
        env.declare(y, DeclarationKind::Var),
        Err(DeclareError::Redeclaration)
    );
}

#[test]
fn shadowing_across_scopes_is_allowed() {
    let interner = StringInterner::new();
    let (x, _) = names(&interner);
    let mut env = Environment::new();

    env.declare(x, DeclarationKind::Var).unwrap();
    env.assign(x, Value::Number(1.0)).unwrap();

    env.push_scope(ScopeKind::Block);
    env.declare(x, DeclarationKind::Let).unwrap();
    env.assign(x, Value::Number(2.0)).unwrap();
    assert_eq!(env.lookup(x), Some(Value::Number(2.0)));
    env.pop_scope();

    assert_eq!(env.lookup(x), Some(Value::Number(1.0)));
}

#[test]
fn function_declarations_replace_vars_but_not_lets() {
    let interner = StringInterner::new();
    let (x, y) = names(&interner);
    let mut env = Environment::new();

    env.declare(x, DeclarationKind::Var).unwrap();
    env.define_function(x, Value::Number(1.0)).unwrap();
    env.define_function(x, Value::Number(2.0)).unwrap();
    assert_eq!(env.lookup(x), Some(Value::Number(2.0)));

    env.declare(y, DeclarationKind::Let).unwrap();
    assert_eq!(
        env.define_function(y, Value::Number(3.0)),
        Err(DeclareError::Redeclaration)
    );
}

#[test]
fn child_sees_globals_but_not_caller_locals() {
    let interner = StringInterner::new();
    let (x, y) = names(&interner);
    let mut env = Environment::new();
    env.declare(x, DeclarationKind::Var).unwrap();
    env.assign(x, Value::Number(1.0)).unwrap();

    env.push_scope(ScopeKind::Block);
    env.declare(y, DeclarationKind::Let).unwrap();

    let mut callee = env.child();
    assert_eq!(callee.current_kind(), ScopeKind::Function);
    assert_eq!(callee.depth(), 2);
    assert_eq!(callee.lookup(x), Some(Value::Number(1.0)));
    assert_eq!(callee.lookup(y), None);

    // Writes through the shared global scope are visible to the caller.
    callee.assign(x, Value::Number(5.0)).unwrap();
    assert_eq!(env.lookup(x), Some(Value::Number(5.0)));
}

#[test]
fn global_scope_is_never_popped() {
    let mut env = Environment::new();
    env.pop_scope();
    env.pop_scope();
    assert_eq!(env.depth(), 1);
    assert_eq!(env.current_kind(), ScopeKind::Global);
}
