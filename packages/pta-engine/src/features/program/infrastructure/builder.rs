//! Fluent program construction
//!
//! ```text
//! let mut b = ProgramBuilder::new();
//! let a = b.add_class("A")?;
//! let mut main = b.add_method(a, "main", &[], MethodKind::Static)?;
//! main.new_object("x", a).copy("y", "x");
//! let entry = main.id();
//! b.set_entry(entry);
//! let program = b.build();
//! ```

use rustc_hash::FxHashMap;

use crate::features::program::domain::{
    CallKind, ClassDef, FieldDef, FieldRef, InvokeExpr, MethodDef, MethodRef, Program, Stmt,
    Subsignature, TypeRef, VarDef,
};
use crate::features::program::error::{ProgramError, ProgramResult};
use crate::shared::models::{ClassId, FieldId, MethodId, StmtRef, VarId};

/// Method flavour at declaration time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Instance,
    Static,
    Abstract,
}

#[derive(Debug, Default)]
pub struct ProgramBuilder {
    program: Program,
    locals: FxHashMap<(MethodId, String), VarId>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Classes
    // ═══════════════════════════════════════════════════════════════════════

    pub fn add_class(&mut self, name: &str) -> ProgramResult<ClassId> {
        if self.program.class_index.contains_key(name) {
            return Err(ProgramError::DuplicateClass(name.to_string()));
        }
        let id = ClassId::new(self.program.classes.len());
        self.program.classes.push(ClassDef::new(name));
        self.program.class_index.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn add_interface(&mut self, name: &str) -> ProgramResult<ClassId> {
        let id = self.add_class(name)?;
        let class = &mut self.program.classes[id.index()];
        class.is_interface = true;
        class.is_abstract = true;
        Ok(id)
    }

    pub fn class_id(&self, name: &str) -> ProgramResult<ClassId> {
        self.program
            .class_by_name(name)
            .ok_or_else(|| ProgramError::UnknownClass(name.to_string()))
    }

    pub fn extends(&mut self, class: ClassId, super_class: ClassId) -> &mut Self {
        self.program.classes[class.index()].super_class = Some(super_class);
        self
    }

    /// For an interface `class`, records a super-interface
    pub fn implements(&mut self, class: ClassId, interface: ClassId) -> &mut Self {
        let interfaces = &mut self.program.classes[class.index()].interfaces;
        if !interfaces.contains(&interface) {
            interfaces.push(interface);
        }
        self
    }

    pub fn set_abstract(&mut self, class: ClassId) -> &mut Self {
        self.program.classes[class.index()].is_abstract = true;
        self
    }

    pub fn add_field(&mut self, class: ClassId, name: &str, is_static: bool) -> ProgramResult<FieldId> {
        let duplicate = self.program.classes[class.index()]
            .fields
            .iter()
            .any(|&f| self.program.fields[f.index()].name == name);
        if duplicate {
            return Err(ProgramError::DuplicateField {
                class: self.program.class(class).name.clone(),
                field: name.to_string(),
            });
        }
        let id = FieldId::new(self.program.fields.len());
        self.program.fields.push(FieldDef {
            name: name.to_string(),
            declaring_class: class,
            is_static,
        });
        self.program.classes[class.index()].fields.push(id);
        Ok(id)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Methods
    // ═══════════════════════════════════════════════════════════════════════

    /// Declare a method; `params` are `(name, type)` pairs
    pub fn add_method(
        &mut self,
        class: ClassId,
        name: &str,
        params: &[(&str, &str)],
        kind: MethodKind,
    ) -> ProgramResult<MethodBuilder<'_>> {
        let types: Vec<&str> = params.iter().map(|(_, t)| *t).collect();
        let subsignature = Subsignature::new(name, &types);

        let duplicate = self.program.classes[class.index()]
            .methods
            .iter()
            .any(|&m| self.program.methods[m.index()].subsignature == subsignature);
        if duplicate {
            return Err(ProgramError::DuplicateMethod {
                class: self.program.class(class).name.clone(),
                subsignature: subsignature.to_string(),
            });
        }

        let id = MethodId::new(self.program.methods.len());
        self.program.methods.push(MethodDef {
            name: name.to_string(),
            declaring_class: class,
            subsignature,
            is_static: kind == MethodKind::Static,
            is_abstract: kind == MethodKind::Abstract,
            this: None,
            params: Vec::with_capacity(params.len()),
            return_vars: Vec::new(),
            body: Vec::new(),
        });
        self.program.classes[class.index()].methods.push(id);

        if kind != MethodKind::Static {
            let this = self.local(id, "this");
            self.program.methods[id.index()].this = Some(this);
        }
        for (param, _) in params {
            let var = self.local(id, param);
            self.program.methods[id.index()].params.push(var);
        }

        Ok(MethodBuilder {
            builder: self,
            method: id,
        })
    }

    /// Reopen a declared method to append statements
    pub fn body(&mut self, method: MethodId) -> MethodBuilder<'_> {
        MethodBuilder {
            builder: self,
            method,
        }
    }

    pub fn set_entry(&mut self, method: MethodId) -> &mut Self {
        self.program.entry = Some(method);
        self
    }

    /// Read-only view of the program under construction
    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn build(self) -> Program {
        self.program
    }

    /// Build, rejecting cyclic class or interface hierarchies
    pub fn try_build(self) -> ProgramResult<Program> {
        self.program.check_hierarchy()?;
        Ok(self.program)
    }

    fn local(&mut self, method: MethodId, name: &str) -> VarId {
        if let Some(&v) = self.locals.get(&(method, name.to_string())) {
            return v;
        }
        let id = VarId::new(self.program.vars.len());
        self.program.vars.push(VarDef {
            name: name.to_string(),
            method,
        });
        self.locals.insert((method, name.to_string()), id);
        id
    }
}

/// Appends statements to one method body; locals are created on first use
pub struct MethodBuilder<'b> {
    builder: &'b mut ProgramBuilder,
    method: MethodId,
}

impl<'b> MethodBuilder<'b> {
    pub fn id(&self) -> MethodId {
        self.method
    }

    /// Local variable by name, created on first reference
    pub fn var(&mut self, name: &str) -> VarId {
        self.builder.local(self.method, name)
    }

    pub fn this(&self) -> Option<VarId> {
        self.builder.program.method(self.method).this
    }

    pub fn params(&self) -> &[VarId] {
        &self.builder.program.method(self.method).params
    }

    /// Mark `name` as returned by the method
    pub fn returns(&mut self, name: &str) -> &mut Self {
        let var = self.var(name);
        let method = &mut self.builder.program.methods[self.method.index()];
        if !method.return_vars.contains(&var) {
            method.return_vars.push(var);
        }
        self
    }

    /// Append a raw statement and return its site
    pub fn push(&mut self, stmt: Stmt) -> StmtRef {
        let body = &mut self.builder.program.methods[self.method.index()].body;
        body.push(stmt);
        StmtRef::new(self.method, body.len() - 1)
    }

    /// Site of the most recently appended statement
    pub fn last_site(&self) -> Option<StmtRef> {
        let len = self.builder.program.method(self.method).body.len();
        len.checked_sub(1).map(|i| StmtRef::new(self.method, i))
    }

    pub fn new_object(&mut self, lhs: &str, class: ClassId) -> &mut Self {
        self.allocate(lhs, TypeRef::Class(class))
    }

    pub fn new_array(&mut self, lhs: &str, element: TypeRef) -> &mut Self {
        self.allocate(lhs, TypeRef::array_of(element))
    }

    pub fn allocate(&mut self, lhs: &str, ty: TypeRef) -> &mut Self {
        let lhs = self.var(lhs);
        self.push(Stmt::Allocate { lhs, ty });
        self
    }

    pub fn copy(&mut self, lhs: &str, rhs: &str) -> &mut Self {
        let (lhs, rhs) = (self.var(lhs), self.var(rhs));
        self.push(Stmt::Copy { lhs, rhs });
        self
    }

    pub fn store_field(&mut self, base: &str, field: FieldRef, rhs: &str) -> &mut Self {
        let (base, rhs) = (self.var(base), self.var(rhs));
        self.push(Stmt::StoreInstanceField { base, field, rhs });
        self
    }

    pub fn load_field(&mut self, lhs: &str, base: &str, field: FieldRef) -> &mut Self {
        let (lhs, base) = (self.var(lhs), self.var(base));
        self.push(Stmt::LoadInstanceField { lhs, base, field });
        self
    }

    pub fn store_static(&mut self, field: FieldRef, rhs: &str) -> &mut Self {
        let rhs = self.var(rhs);
        self.push(Stmt::StoreStaticField { field, rhs });
        self
    }

    pub fn load_static(&mut self, lhs: &str, field: FieldRef) -> &mut Self {
        let lhs = self.var(lhs);
        self.push(Stmt::LoadStaticField { lhs, field });
        self
    }

    pub fn store_array(&mut self, base: &str, rhs: &str) -> &mut Self {
        let (base, rhs) = (self.var(base), self.var(rhs));
        self.push(Stmt::StoreArrayElement { base, rhs });
        self
    }

    pub fn load_array(&mut self, lhs: &str, base: &str) -> &mut Self {
        let (lhs, base) = (self.var(lhs), self.var(base));
        self.push(Stmt::LoadArrayElement { lhs, base });
        self
    }

    pub fn invoke(
        &mut self,
        result: Option<&str>,
        kind: CallKind,
        receiver: Option<&str>,
        method: MethodRef,
        args: &[&str],
    ) -> &mut Self {
        let result = result.map(|r| self.var(r));
        let receiver = receiver.map(|r| self.var(r));
        let args = args.iter().map(|a| self.var(a)).collect();
        self.push(Stmt::Invoke {
            result,
            call: InvokeExpr {
                kind,
                method,
                receiver,
                args,
            },
        });
        self
    }

    pub fn invoke_static(&mut self, result: Option<&str>, method: MethodRef, args: &[&str]) -> &mut Self {
        self.invoke(result, CallKind::Static, None, method, args)
    }

    pub fn invoke_virtual(
        &mut self,
        result: Option<&str>,
        receiver: &str,
        method: MethodRef,
        args: &[&str],
    ) -> &mut Self {
        self.invoke(result, CallKind::Virtual, Some(receiver), method, args)
    }

    pub fn invoke_interface(
        &mut self,
        result: Option<&str>,
        receiver: &str,
        method: MethodRef,
        args: &[&str],
    ) -> &mut Self {
        self.invoke(result, CallKind::Interface, Some(receiver), method, args)
    }

    pub fn invoke_special(
        &mut self,
        result: Option<&str>,
        receiver: &str,
        method: MethodRef,
        args: &[&str],
    ) -> &mut Self {
        self.invoke(result, CallKind::Special, Some(receiver), method, args)
    }

    pub fn unsupported(&mut self, description: &str) -> &mut Self {
        self.push(Stmt::Unsupported {
            description: description.to_string(),
        });
        self
    }
}
