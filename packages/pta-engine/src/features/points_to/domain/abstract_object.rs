//! Abstract Heap Object
//!
//! Concrete heap instances are abstracted to their allocation site: every
//! execution of `x = new T()` at one statement yields the same object.
//!
//! # Example
//! ```text
//! // Main.main()#0: a = new A()
//! // Main.main()#1: b = new A()
//! // Main.main()#2: c = new B()
//! //
//! // new A@Main.main()#0, new A@Main.main()#1, new B@Main.main()#2
//! ```

use serde::{Deserialize, Serialize};

use crate::features::program::{Program, TypeRef};
use crate::shared::models::{AllocSite, ObjId};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AbstractObject {
    pub id: ObjId,

    /// Allocation statement; for merged heap models, the first site seen
    pub site: AllocSite,

    /// Allocated type, which drives dispatch
    #[serde(skip)]
    pub ty: Option<TypeRef>,

    /// Object stands for allocations at more than one site
    pub is_merged: bool,
}

impl AbstractObject {
    #[inline]
    pub fn new(id: ObjId, site: AllocSite, ty: TypeRef) -> Self {
        Self {
            id,
            site,
            ty: Some(ty),
            is_merged: false,
        }
    }

    #[inline]
    pub fn merged(mut self) -> Self {
        self.is_merged = true;
        self
    }

    /// Allocated type. Always present for objects made by a heap model.
    #[inline]
    pub fn ty(&self) -> Option<&TypeRef> {
        self.ty.as_ref()
    }

    /// `new A@Main.main()#0`, or `new A` for merged objects
    pub fn describe(&self, program: &Program) -> String {
        let ty = self
            .ty
            .as_ref()
            .map(|t| program.type_name(t))
            .unwrap_or_else(|| "?".to_string());
        if self.is_merged {
            format!("new {}", ty)
        } else {
            format!("new {}@{}", ty, program.site_signature(self.site))
        }
    }
}
