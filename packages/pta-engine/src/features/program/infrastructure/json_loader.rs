//! JSON program descriptions
//!
//! Classes, members and statements are referred to by name. Loading runs in
//! passes (declare classes, link supertypes, declare members, fill bodies) so
//! declaration order in the file does not matter.
//!
//! ```text
//! {
//!   "entry": { "class": "Main", "method": "main()" },
//!   "classes": [
//!     { "name": "A", "fields": [{ "name": "f" }],
//!       "methods": [{ "name": "get", "returns": ["r"],
//!                     "body": [{ "op": "load_field", "lhs": "r", "base": "this",
//!                                "class": "A", "field": "f" }] }] }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::builder::{MethodKind, ProgramBuilder};
use crate::features::program::domain::{CallKind, FieldRef, MethodRef, Program, Subsignature, TypeRef};
use crate::features::program::error::{ProgramError, ProgramResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramSpec {
    pub entry: EntrySpec,
    pub classes: Vec<ClassSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrySpec {
    pub class: String,
    /// Subsignature, e.g. `main()`
    pub method: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassSpec {
    pub name: String,
    #[serde(rename = "super")]
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub interface: bool,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    pub fields: Vec<FieldSpec>,
    pub methods: Vec<MethodSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "static")]
    pub is_static: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodSpec {
    pub name: String,
    pub params: Vec<ParamSpec>,
    #[serde(rename = "static")]
    pub is_static: bool,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    pub returns: Vec<String>,
    pub body: Vec<StmtSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StmtSpec {
    New {
        lhs: String,
        #[serde(rename = "type")]
        ty: String,
    },
    Copy {
        lhs: String,
        rhs: String,
    },
    StoreField {
        base: String,
        class: String,
        field: String,
        rhs: String,
    },
    LoadField {
        lhs: String,
        base: String,
        class: String,
        field: String,
    },
    StoreStatic {
        class: String,
        field: String,
        rhs: String,
    },
    LoadStatic {
        lhs: String,
        class: String,
        field: String,
    },
    StoreArray {
        base: String,
        rhs: String,
    },
    LoadArray {
        lhs: String,
        base: String,
    },
    Invoke {
        kind: CallKind,
        #[serde(default)]
        result: Option<String>,
        #[serde(default)]
        receiver: Option<String>,
        class: String,
        method: String,
        #[serde(default)]
        args: Vec<String>,
    },
    Unsupported {
        description: String,
    },
}

impl ProgramSpec {
    pub fn from_json_str(json: &str) -> ProgramResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> ProgramResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the arena program
    pub fn build(&self) -> ProgramResult<Program> {
        let mut b = ProgramBuilder::new();

        for class in &self.classes {
            if class.interface {
                b.add_interface(&class.name)?;
            } else {
                b.add_class(&class.name)?;
            }
        }

        for class in &self.classes {
            let id = b.class_id(&class.name)?;
            if let Some(sup) = &class.super_class {
                let sup = b.class_id(sup)?;
                b.extends(id, sup);
            }
            for iface in &class.interfaces {
                let iface = b.class_id(iface)?;
                b.implements(id, iface);
            }
            if class.is_abstract {
                b.set_abstract(id);
            }
            for field in &class.fields {
                b.add_field(id, &field.name, field.is_static)?;
            }
        }
        b.program().check_hierarchy()?;

        let mut bodies = Vec::new();
        for class in &self.classes {
            let id = b.class_id(&class.name)?;
            for method in &class.methods {
                let kind = match (method.is_static, method.is_abstract) {
                    (true, true) => {
                        return Err(ProgramError::Malformed(format!(
                            "method {}.{} is both static and abstract",
                            class.name, method.name
                        )))
                    }
                    (true, false) => MethodKind::Static,
                    (false, true) => MethodKind::Abstract,
                    (false, false) => MethodKind::Instance,
                };
                for param in &method.params {
                    parse_type(&b, &param.ty)?;
                }
                let params: Vec<(&str, &str)> = method
                    .params
                    .iter()
                    .map(|p| (p.name.as_str(), p.ty.as_str()))
                    .collect();
                let mid = b.add_method(id, &method.name, &params, kind)?.id();
                bodies.push((mid, method));
            }
        }

        for (mid, method) in bodies {
            // Resolve every name first; the method builder holds the program
            // mutably while statements are appended.
            let mut resolved = Vec::with_capacity(method.body.len());
            for stmt in &method.body {
                resolved.push(resolve_names(&b, stmt)?);
            }

            let mut m = b.body(mid);
            for (stmt, refs) in method.body.iter().zip(resolved) {
                append(&mut m, stmt, refs);
            }
            for ret in &method.returns {
                m.returns(ret);
            }
        }

        let entry_class = b.class_id(&self.entry.class)?;
        let entry_sig = Subsignature::parse(self.entry.method.as_str());
        let entry = b
            .program()
            .class(entry_class)
            .methods
            .iter()
            .copied()
            .find(|&m| b.program().method(m).subsignature == entry_sig)
            .ok_or_else(|| {
                ProgramError::UnknownEntry(format!("{}.{}", self.entry.class, self.entry.method))
            })?;
        b.set_entry(entry);

        Ok(b.build())
    }
}

/// Load and build a program description from disk
pub fn load_program(path: impl AsRef<Path>) -> ProgramResult<Program> {
    let text = std::fs::read_to_string(path)?;
    ProgramSpec::from_json_str(&text)?.build()
}

/// Name-resolved payload of a statement
enum Resolved {
    Nothing,
    Type(TypeRef),
    Field(FieldRef),
    Method(MethodRef),
}

fn resolve_names(b: &ProgramBuilder, stmt: &StmtSpec) -> ProgramResult<Resolved> {
    Ok(match stmt {
        StmtSpec::New { ty, .. } => Resolved::Type(parse_type(b, ty)?),
        StmtSpec::StoreField { class, field, .. }
        | StmtSpec::LoadField { class, field, .. }
        | StmtSpec::StoreStatic { class, field, .. }
        | StmtSpec::LoadStatic { class, field, .. } => {
            Resolved::Field(FieldRef::new(b.class_id(class)?, field.as_str()))
        }
        StmtSpec::Invoke { class, method, .. } => Resolved::Method(MethodRef::new(
            b.class_id(class)?,
            Subsignature::parse(method.as_str()),
        )),
        StmtSpec::Copy { .. }
        | StmtSpec::StoreArray { .. }
        | StmtSpec::LoadArray { .. }
        | StmtSpec::Unsupported { .. } => Resolved::Nothing,
    })
}

fn append(m: &mut super::builder::MethodBuilder<'_>, stmt: &StmtSpec, refs: Resolved) {
    match (stmt, refs) {
        (StmtSpec::New { lhs, .. }, Resolved::Type(ty)) => {
            m.allocate(lhs, ty);
        }
        (StmtSpec::Copy { lhs, rhs }, _) => {
            m.copy(lhs, rhs);
        }
        (StmtSpec::StoreField { base, rhs, .. }, Resolved::Field(f)) => {
            m.store_field(base, f, rhs);
        }
        (StmtSpec::LoadField { lhs, base, .. }, Resolved::Field(f)) => {
            m.load_field(lhs, base, f);
        }
        (StmtSpec::StoreStatic { rhs, .. }, Resolved::Field(f)) => {
            m.store_static(f, rhs);
        }
        (StmtSpec::LoadStatic { lhs, .. }, Resolved::Field(f)) => {
            m.load_static(lhs, f);
        }
        (StmtSpec::StoreArray { base, rhs }, _) => {
            m.store_array(base, rhs);
        }
        (StmtSpec::LoadArray { lhs, base }, _) => {
            m.load_array(lhs, base);
        }
        (
            StmtSpec::Invoke {
                kind,
                result,
                receiver,
                args,
                ..
            },
            Resolved::Method(method),
        ) => {
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            let receiver = if *kind == CallKind::Static {
                None
            } else {
                receiver.as_deref()
            };
            m.invoke(result.as_deref(), *kind, receiver, method, &args);
        }
        (StmtSpec::Unsupported { description }, _) => {
            m.unsupported(description);
        }
        (other, _) => {
            // resolve_names always pairs each shape with its payload
            m.unsupported(&format!("{:?}", other));
        }
    }
}

/// `A`, `A[]`, `A[][]`
fn parse_type(b: &ProgramBuilder, raw: &str) -> ProgramResult<TypeRef> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ProgramError::Malformed("empty type name".to_string()));
    }
    match raw.strip_suffix("[]") {
        Some(elem) => Ok(TypeRef::array_of(parse_type(b, elem)?)),
        None => Ok(TypeRef::Class(b.class_id(raw)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::program::domain::Stmt;

    const SIMPLE: &str = r#"{
        "entry": { "class": "Main", "method": "main()" },
        "classes": [
            { "name": "Object" },
            { "name": "A", "super": "Object", "fields": [{ "name": "f" }] },
            { "name": "Main", "super": "Object", "methods": [
                { "name": "main", "static": true, "body": [
                    { "op": "new", "lhs": "a", "type": "A" },
                    { "op": "new", "lhs": "arr", "type": "A[]" },
                    { "op": "store_field", "base": "a", "class": "A", "field": "f", "rhs": "a" },
                    { "op": "invoke", "kind": "static", "class": "Main", "method": "main()" }
                ]}
            ]}
        ]
    }"#;

    #[test]
    fn test_load_simple_program() {
        let program = ProgramSpec::from_json_str(SIMPLE).unwrap().build().unwrap();
        let main = program.entry_method().unwrap();
        assert_eq!(program.method_signature(main), "Main.main()");

        let body = &program.method(main).body;
        assert_eq!(body.len(), 4);
        match &body[1] {
            Stmt::Allocate { ty, .. } => assert_eq!(program.type_name(ty), "A[]"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(program.call_sites_in(main).count(), 1);
    }

    #[test]
    fn test_unknown_class_rejected() {
        let json = SIMPLE.replace(r#""type": "A[]""#, r#""type": "Missing""#);
        let err = ProgramSpec::from_json_str(&json).unwrap().build().unwrap_err();
        assert!(matches!(err, ProgramError::UnknownClass(name) if name == "Missing"));
    }

    #[test]
    fn test_unknown_param_type_rejected() {
        let json = r#"{
            "entry": { "class": "A", "method": "main()" },
            "classes": [
                { "name": "A", "methods": [
                    { "name": "main", "static": true },
                    { "name": "take", "params": [{ "name": "p", "type": "Ghost[]" }] }
                ]}
            ]
        }"#;
        let err = ProgramSpec::from_json_str(json).unwrap().build().unwrap_err();
        assert!(matches!(err, ProgramError::UnknownClass(name) if name == "Ghost"));
    }

    #[test]
    fn test_spaced_subsignatures_match_declarations() {
        let json = r#"{
            "entry": { "class": "A", "method": " main( ) " },
            "classes": [
                { "name": "A", "methods": [
                    { "name": "id", "static": true, "returns": ["p"],
                      "params": [{ "name": "p", "type": "A" }, { "name": "q", "type": "A" }] },
                    { "name": "main", "static": true, "body": [
                        { "op": "invoke", "kind": "static", "class": "A", "method": "id(A, A)" }
                    ]}
                ]}
            ]
        }"#;
        let program = ProgramSpec::from_json_str(json).unwrap().build().unwrap();
        let main = program.entry_method().unwrap();
        assert_eq!(program.method_signature(main), "A.main()");
        match &program.method(main).body[0] {
            Stmt::Invoke { call, .. } => assert_eq!(call.method.subsignature.as_str(), "id(A,A)"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_cyclic_superclasses_rejected() {
        let json = r#"{
            "entry": { "class": "A", "method": "main()" },
            "classes": [
                { "name": "A", "super": "B", "methods": [{ "name": "main", "static": true }] },
                { "name": "B", "super": "A" }
            ]
        }"#;
        let err = ProgramSpec::from_json_str(json).unwrap().build().unwrap_err();
        assert!(matches!(err, ProgramError::Malformed(_)));
    }

    #[test]
    fn test_cyclic_interfaces_rejected() {
        let json = r#"{
            "entry": { "class": "A", "method": "main()" },
            "classes": [
                { "name": "I", "interface": true, "interfaces": ["J"] },
                { "name": "J", "interface": true, "interfaces": ["I"] },
                { "name": "A", "interfaces": ["I"], "methods": [{ "name": "main", "static": true }] }
            ]
        }"#;
        let err = ProgramSpec::from_json_str(json).unwrap().build().unwrap_err();
        assert!(matches!(err, ProgramError::Malformed(_)));
    }

    #[test]
    fn test_unknown_entry_rejected() {
        let json = SIMPLE.replace(r#""method": "main()" },"#, r#""method": "start()" },"#);
        let err = ProgramSpec::from_json_str(&json).unwrap().build().unwrap_err();
        assert!(matches!(err, ProgramError::UnknownEntry(_)));
    }
}
