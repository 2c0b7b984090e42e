//! Heap cell payloads.

use lumen_ir::{Name, NodeId};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::Value;
use crate::heap::{Trace, Tracer};

/// Immutable heap string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringCell {
    text: String,
}

impl StringCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// A declared function: name, ordered parameters and a handle to its body.
///
/// `body` indexes the [`Ast`](lumen_ir::Ast) the function was declared in,
/// which must outlive every call to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionData {
    pub name: Name,
    pub params: SmallVec<[Name; 4]>,
    pub body: NodeId,
}

impl FunctionData {
    /// Declared parameter count.
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// What an object cell is besides its property table.
#[derive(Clone, Debug, PartialEq)]
pub enum ObjectKind {
    Ordinary,
    Function(FunctionData),
    /// A primitive wrapped by `to_object`.
    Boxed(Value),
}

/// Heap object: a property table plus its kind.
#[derive(Clone, Debug)]
pub struct ObjectCell {
    properties: FxHashMap<Name, Value>,
    kind: ObjectKind,
}

impl ObjectCell {
    /// Fresh empty ordinary object.
    pub fn ordinary() -> Self {
        Self::with_kind(ObjectKind::Ordinary)
    }

    pub fn function(data: FunctionData) -> Self {
        Self::with_kind(ObjectKind::Function(data))
    }

    pub fn boxed(primitive: Value) -> Self {
        Self::with_kind(ObjectKind::Boxed(primitive))
    }

    fn with_kind(kind: ObjectKind) -> Self {
        Self {
            properties: FxHashMap::default(),
            kind,
        }
    }

    #[inline]
    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    /// Function payload, if this object is callable.
    pub fn as_function(&self) -> Option<&FunctionData> {
        match &self.kind {
            ObjectKind::Function(data) => Some(data),
            _ => None,
        }
    }

    /// Own property, if present.
    pub fn get(&self, key: Name) -> Option<Value> {
        self.properties.get(&key).copied()
    }

    pub fn put(&mut self, key: Name, value: Value) {
        self.properties.insert(key, value);
    }
}

impl Trace for ObjectCell {
    fn trace(&self, tracer: &mut dyn Tracer) {
        for value in self.properties.values() {
            value.trace(tracer);
        }
        if let ObjectKind::Boxed(inner) = &self.kind {
            inner.trace(tracer);
        }
    }
}
