//! Class Hierarchy
//!
//! Subtype relations, member resolution and virtual dispatch over a
//! [`Program`]. Built once per analysis and shared read-only by the
//! solvers.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::errors::{PtaError, Result};
use crate::features::program::{FieldRef, MethodRef, Program, Subsignature, TypeRef};
use crate::shared::models::{ClassId, FieldId, MethodId};

/// Names treated as the root class when dispatching on array objects
const ROOT_CLASS_NAMES: [&str; 2] = ["java.lang.Object", "Object"];

pub struct ClassHierarchy<'p> {
    program: &'p Program,
    direct_subclasses: Vec<Vec<ClassId>>,
    direct_implementors: Vec<Vec<ClassId>>,
    direct_subinterfaces: Vec<Vec<ClassId>>,
    declared_methods: FxHashMap<(ClassId, Subsignature), MethodId>,
    root: Option<ClassId>,
}

impl<'p> ClassHierarchy<'p> {
    pub fn new(program: &'p Program) -> Self {
        let n = program.num_classes();
        let mut direct_subclasses = vec![Vec::new(); n];
        let mut direct_implementors = vec![Vec::new(); n];
        let mut direct_subinterfaces = vec![Vec::new(); n];
        let mut declared_methods = FxHashMap::default();

        for id in program.class_ids() {
            let class = program.class(id);
            if let Some(sup) = class.super_class {
                direct_subclasses[sup.index()].push(id);
            }
            for &iface in &class.interfaces {
                if class.is_interface {
                    direct_subinterfaces[iface.index()].push(id);
                } else {
                    direct_implementors[iface.index()].push(id);
                }
            }
            for &m in &class.methods {
                declared_methods.insert((id, program.method(m).subsignature.clone()), m);
            }
        }

        let root = ROOT_CLASS_NAMES
            .iter()
            .find_map(|name| program.class_by_name(name));

        Self {
            program,
            direct_subclasses,
            direct_implementors,
            direct_subinterfaces,
            declared_methods,
            root,
        }
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Structure
    // ═══════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn super_class_of(&self, class: ClassId) -> Option<ClassId> {
        self.program.class(class).super_class
    }

    #[inline]
    pub fn direct_subclasses_of(&self, class: ClassId) -> &[ClassId] {
        &self.direct_subclasses[class.index()]
    }

    /// Classes that list `interface` in their `implements` clause
    #[inline]
    pub fn direct_implementors_of(&self, interface: ClassId) -> &[ClassId] {
        &self.direct_implementors[interface.index()]
    }

    #[inline]
    pub fn direct_subinterfaces_of(&self, interface: ClassId) -> &[ClassId] {
        &self.direct_subinterfaces[interface.index()]
    }

    #[inline]
    pub fn declared_methods_of(&self, class: ClassId) -> &[MethodId] {
        &self.program.class(class).methods
    }

    /// Method declared directly in `class` with this subsignature
    #[inline]
    pub fn declared_method(&self, class: ClassId, subsignature: &Subsignature) -> Option<MethodId> {
        self.declared_methods
            .get(&(class, subsignature.clone()))
            .copied()
    }

    /// `class` followed by its superclass chain. A well-formed chain visits
    /// each class at most once, so the walk is capped at the class count.
    pub fn ancestors(&self, class: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        std::iter::successors(Some(class), move |&c| self.super_class_of(c))
            .take(self.program.num_classes())
    }

    /// All super-interfaces reachable from `class` and its superclasses,
    /// breadth-first, each reported once
    pub fn super_interfaces(&self, class: ClassId) -> Vec<ClassId> {
        let mut seen = FxHashSet::default();
        let mut order = Vec::new();
        let mut queue: VecDeque<ClassId> = self
            .ancestors(class)
            .flat_map(|c| self.program.class(c).interfaces.iter().copied())
            .collect();

        while let Some(iface) = queue.pop_front() {
            if seen.insert(iface) {
                order.push(iface);
                queue.extend(self.program.class(iface).interfaces.iter().copied());
            }
        }
        order
    }

    /// `class` plus every transitive subclass, implementor and
    /// sub-interface, each reported once, in breadth-first order
    pub fn subtypes_of(&self, class: ClassId) -> Vec<ClassId> {
        let mut seen = FxHashSet::default();
        let mut order = Vec::new();
        let mut queue = VecDeque::from([class]);

        while let Some(c) = queue.pop_front() {
            if !seen.insert(c) {
                continue;
            }
            order.push(c);
            queue.extend(self.direct_subclasses_of(c).iter().copied());
            queue.extend(self.direct_implementors_of(c).iter().copied());
            queue.extend(self.direct_subinterfaces_of(c).iter().copied());
        }
        order
    }

    pub fn is_subtype_of(&self, sub: ClassId, sup: ClassId) -> bool {
        self.ancestors(sub).any(|c| c == sup) || self.super_interfaces(sub).contains(&sup)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Resolution
    // ═══════════════════════════════════════════════════════════════════════

    /// Resolve a method reference: the referenced class, its superclasses,
    /// then its super-interfaces.
    pub fn resolve_method(&self, method_ref: &MethodRef) -> Result<MethodId> {
        let sig = &method_ref.subsignature;
        self.ancestors(method_ref.class)
            .find_map(|c| self.declared_method(c, sig))
            .or_else(|| {
                self.super_interfaces(method_ref.class)
                    .into_iter()
                    .find_map(|i| self.declared_method(i, sig))
            })
            .ok_or_else(|| {
                PtaError::unresolved_method(
                    self.program.class(method_ref.class).name.clone(),
                    sig.as_str(),
                )
            })
    }

    /// Resolve a field reference: the referenced class, its superclasses,
    /// then its super-interfaces (interface constants).
    pub fn resolve_field(&self, field_ref: &FieldRef) -> Result<FieldId> {
        let declared = |c: ClassId| {
            self.program
                .class(c)
                .fields
                .iter()
                .copied()
                .find(|&f| self.program.field(f).name == field_ref.name)
        };

        self.ancestors(field_ref.class)
            .find_map(declared)
            .or_else(|| {
                self.super_interfaces(field_ref.class)
                    .into_iter()
                    .find_map(declared)
            })
            .ok_or_else(|| {
                PtaError::unresolved_field(
                    self.program.class(field_ref.class).name.clone(),
                    field_ref.name.clone(),
                )
            })
    }

    /// First non-abstract method matching `subsignature` in `class` or its
    /// superclasses; falls back to default methods of super-interfaces.
    pub fn dispatch(&self, class: ClassId, subsignature: &Subsignature) -> Option<MethodId> {
        let concrete = |c: ClassId| {
            self.declared_method(c, subsignature)
                .filter(|&m| !self.program.method(m).is_abstract)
        };

        self.ancestors(class).find_map(concrete).or_else(|| {
            self.super_interfaces(class)
                .into_iter()
                .find_map(concrete)
        })
    }

    /// Dispatch on an object's type; arrays dispatch through the root class
    pub fn dispatch_on_type(&self, ty: &TypeRef, subsignature: &Subsignature) -> Option<MethodId> {
        match ty {
            TypeRef::Class(c) => self.dispatch(*c, subsignature),
            TypeRef::Array(_) => self.root.and_then(|r| self.dispatch(r, subsignature)),
        }
    }
}
