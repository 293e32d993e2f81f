//! Declarations: classes, methods, fields, variables and type references.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::stmt::Stmt;
use crate::shared::models::{ClassId, FieldId, MethodId, VarId};

/// Static type of an allocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeRef {
    Class(ClassId),
    Array(Box<TypeRef>),
}

impl TypeRef {
    #[inline]
    pub fn array_of(element: TypeRef) -> Self {
        TypeRef::Array(Box::new(element))
    }

    /// Class handle for class types, `None` for arrays
    #[inline]
    pub fn as_class(&self) -> Option<ClassId> {
        match self {
            TypeRef::Class(c) => Some(*c),
            TypeRef::Array(_) => None,
        }
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, TypeRef::Array(_))
    }
}

/// Method name plus parameter types, e.g. `foo(A,int)`.
///
/// Two methods override each other iff their subsignatures are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subsignature(String);

impl Subsignature {
    pub fn new(name: &str, param_types: &[&str]) -> Self {
        let params: Vec<&str> = param_types.iter().map(|t| t.trim()).collect();
        Subsignature(format!("{}({})", name.trim(), params.join(",")))
    }

    /// Parse `name(T1, T2)`; whitespace around the name and each type is
    /// dropped so `id(A, A)` and `id(A,A)` are the same subsignature
    pub fn parse(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref().trim();
        let Some((name, rest)) = raw.split_once('(') else {
            return Subsignature(raw.to_string());
        };
        let params = rest.strip_suffix(')').unwrap_or(rest);
        let types: Vec<&str> = params
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        Self::new(name, &types)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Method name part (before the parenthesis)
    pub fn name(&self) -> &str {
        self.0.split('(').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for Subsignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Symbolic method reference as written at a call site.
///
/// Resolved against the class hierarchy at analysis time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodRef {
    pub class: ClassId,
    pub subsignature: Subsignature,
}

impl MethodRef {
    pub fn new(class: ClassId, subsignature: Subsignature) -> Self {
        Self {
            class,
            subsignature,
        }
    }
}

/// Symbolic field reference as written at an access site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef {
    pub class: ClassId,
    pub name: String,
}

impl FieldRef {
    pub fn new(class: ClassId, name: impl Into<String>) -> Self {
        Self {
            class,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClassDef {
    pub name: String,
    pub super_class: Option<ClassId>,
    /// Directly implemented interfaces (for interfaces: direct super-interfaces)
    pub interfaces: Vec<ClassId>,
    pub is_interface: bool,
    pub is_abstract: bool,
    pub methods: Vec<MethodId>,
    pub fields: Vec<FieldId>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            super_class: None,
            interfaces: Vec::new(),
            is_interface: false,
            is_abstract: false,
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub declaring_class: ClassId,
    pub is_static: bool,
}

#[derive(Debug, Clone)]
pub struct MethodDef {
    pub name: String,
    pub declaring_class: ClassId,
    pub subsignature: Subsignature,
    pub is_static: bool,
    pub is_abstract: bool,
    /// Implicit receiver parameter; `None` for static methods
    pub this: Option<VarId>,
    pub params: Vec<VarId>,
    /// Every variable returned by some `return` in the body
    pub return_vars: Vec<VarId>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub struct VarDef {
    pub name: String,
    pub method: MethodId,
}
