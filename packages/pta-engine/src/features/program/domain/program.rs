//! Whole-program arena
//!
//! Every declaration lives in a flat vector and is addressed by its handle.
//! Nothing in here refers back to its owner by reference, so recursive call
//! structures and class cycles never form ownership cycles.

use rustc_hash::FxHashMap;

use super::stmt::Stmt;
use super::types::{ClassDef, FieldDef, MethodDef, TypeRef, VarDef};
use crate::features::program::error::{ProgramError, ProgramResult};
use crate::shared::models::{CallSite, ClassId, FieldId, MethodId, StmtRef, VarId};

#[derive(Debug, Clone, Default)]
pub struct Program {
    pub(crate) classes: Vec<ClassDef>,
    pub(crate) methods: Vec<MethodDef>,
    pub(crate) fields: Vec<FieldDef>,
    pub(crate) vars: Vec<VarDef>,
    pub(crate) class_index: FxHashMap<String, ClassId>,
    pub(crate) entry: Option<MethodId>,
}

impl Program {
    // ═══════════════════════════════════════════════════════════════════════
    // Lookups
    // ═══════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn class(&self, id: ClassId) -> &ClassDef {
        &self.classes[id.index()]
    }

    #[inline]
    pub fn method(&self, id: MethodId) -> &MethodDef {
        &self.methods[id.index()]
    }

    #[inline]
    pub fn field(&self, id: FieldId) -> &FieldDef {
        &self.fields[id.index()]
    }

    #[inline]
    pub fn var(&self, id: VarId) -> &VarDef {
        &self.vars[id.index()]
    }

    pub fn class_by_name(&self, name: &str) -> Option<ClassId> {
        self.class_index.get(name).copied()
    }

    /// Statement at a call or allocation site
    pub fn stmt(&self, site: StmtRef) -> Option<&Stmt> {
        self.method(site.method).body.get(site.index as usize)
    }

    /// Designated program entry
    pub fn entry_method(&self) -> Option<MethodId> {
        self.entry
    }

    /// Method declared in `class` (not inherited) by name, any arity
    pub fn method_by_name(&self, class: ClassId, name: &str) -> Option<MethodId> {
        self.class(class)
            .methods
            .iter()
            .copied()
            .find(|&m| self.method(m).name == name)
    }

    /// Local variable of `method` by name
    pub fn var_by_name(&self, method: MethodId, name: &str) -> Option<VarId> {
        self.vars
            .iter()
            .enumerate()
            .find(|(_, v)| v.method == method && v.name == name)
            .map(|(i, _)| VarId::new(i))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Iteration
    // ═══════════════════════════════════════════════════════════════════════

    pub fn class_ids(&self) -> impl Iterator<Item = ClassId> + '_ {
        (0..self.classes.len()).map(ClassId::new)
    }

    pub fn method_ids(&self) -> impl Iterator<Item = MethodId> + '_ {
        (0..self.methods.len()).map(MethodId::new)
    }

    pub fn var_ids(&self) -> impl Iterator<Item = VarId> + '_ {
        (0..self.vars.len()).map(VarId::new)
    }

    /// Invoke statements of a method in body order
    pub fn call_sites_in(&self, method: MethodId) -> impl Iterator<Item = CallSite> + '_ {
        self.method(method)
            .body
            .iter()
            .enumerate()
            .filter(|(_, s)| matches!(s, Stmt::Invoke { .. }))
            .map(move |(i, _)| StmtRef::new(method, i))
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn num_methods(&self) -> usize {
        self.methods.len()
    }

    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Well-formedness
    // ═══════════════════════════════════════════════════════════════════════

    /// Reject cyclic superclass chains and cyclic `implements` / interface
    /// `extends` lists. Hierarchy walks assume both relations are acyclic.
    pub fn check_hierarchy(&self) -> ProgramResult<()> {
        let n = self.classes.len();

        for start in self.class_ids() {
            let mut current = self.class(start).super_class;
            let mut steps = 0;
            while let Some(c) = current {
                if c == start || steps > n {
                    return Err(ProgramError::Malformed(format!(
                        "cyclic superclass chain through {}",
                        self.class(start).name
                    )));
                }
                steps += 1;
                current = self.class(c).super_class;
            }
        }

        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            Unvisited,
            OnStack,
            Done,
        }
        let mut marks = vec![Mark::Unvisited; n];
        for root in self.class_ids() {
            if marks[root.index()] != Mark::Unvisited {
                continue;
            }
            marks[root.index()] = Mark::OnStack;
            let mut stack = vec![(root, 0usize)];
            while let Some(top) = stack.last_mut() {
                let (c, next) = *top;
                let supers = &self.class(c).interfaces;
                if next < supers.len() {
                    top.1 += 1;
                    let iface = supers[next];
                    match marks[iface.index()] {
                        Mark::OnStack => {
                            return Err(ProgramError::Malformed(format!(
                                "cyclic interface hierarchy through {}",
                                self.class(iface).name
                            )))
                        }
                        Mark::Unvisited => {
                            marks[iface.index()] = Mark::OnStack;
                            stack.push((iface, 0));
                        }
                        Mark::Done => {}
                    }
                } else {
                    marks[c.index()] = Mark::Done;
                    stack.pop();
                }
            }
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Names
    // ═══════════════════════════════════════════════════════════════════════

    /// `Class.sub(sig)`
    pub fn method_signature(&self, id: MethodId) -> String {
        let m = self.method(id);
        format!("{}.{}", self.class(m.declaring_class).name, m.subsignature)
    }

    /// `Class.field`
    pub fn field_signature(&self, id: FieldId) -> String {
        let f = self.field(id);
        format!("{}.{}", self.class(f.declaring_class).name, f.name)
    }

    /// `Class.sub(sig)/name`
    pub fn var_signature(&self, id: VarId) -> String {
        let v = self.var(id);
        format!("{}/{}", self.method_signature(v.method), v.name)
    }

    /// `Class.sub(sig)#index`
    pub fn site_signature(&self, site: StmtRef) -> String {
        format!("{}#{}", self.method_signature(site.method), site.index)
    }

    pub fn type_name(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Class(c) => self.class(*c).name.clone(),
            TypeRef::Array(elem) => format!("{}[]", self.type_name(elem)),
        }
    }
}
