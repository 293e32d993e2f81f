//! Heap abstractions
//!
//! - [`AllocationSiteHeapModel`]: one object per allocation statement
//! - [`TypeBasedHeapModel`]: one object per allocated type, cheaper and less
//!   precise

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::config::HeapModelKind;
use crate::features::points_to::domain::AbstractObject;
use crate::features::points_to::ports::HeapModel;
use crate::features::program::TypeRef;
use crate::shared::models::{AllocSite, ObjId};

#[derive(Debug, Default)]
pub struct AllocationSiteHeapModel {
    objects: Vec<AbstractObject>,
    by_site: FxHashMap<AllocSite, ObjId>,
}

impl AllocationSiteHeapModel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HeapModel for AllocationSiteHeapModel {
    fn obj(&mut self, site: AllocSite, ty: &TypeRef) -> ObjId {
        if let Some(&id) = self.by_site.get(&site) {
            return id;
        }
        let id = ObjId::new(self.objects.len());
        self.objects.push(AbstractObject::new(id, site, ty.clone()));
        self.by_site.insert(site, id);
        trace!("heap: {} for site {}", id, site);
        id
    }

    fn object(&self, id: ObjId) -> &AbstractObject {
        &self.objects[id.index()]
    }

    fn objects(&self) -> &[AbstractObject] {
        &self.objects
    }

    fn name(&self) -> &'static str {
        "allocation_site"
    }
}

#[derive(Debug, Default)]
pub struct TypeBasedHeapModel {
    objects: Vec<AbstractObject>,
    by_type: FxHashMap<TypeRef, ObjId>,
}

impl TypeBasedHeapModel {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HeapModel for TypeBasedHeapModel {
    fn obj(&mut self, site: AllocSite, ty: &TypeRef) -> ObjId {
        if let Some(&id) = self.by_type.get(ty) {
            return id;
        }
        let id = ObjId::new(self.objects.len());
        self.objects
            .push(AbstractObject::new(id, site, ty.clone()).merged());
        self.by_type.insert(ty.clone(), id);
        trace!("heap: {} for type at site {}", id, site);
        id
    }

    fn object(&self, id: ObjId) -> &AbstractObject {
        &self.objects[id.index()]
    }

    fn objects(&self) -> &[AbstractObject] {
        &self.objects
    }

    fn name(&self) -> &'static str {
        "type_based"
    }
}

/// Factory for the configured heap abstraction
pub fn create_heap_model(kind: HeapModelKind) -> Box<dyn HeapModel> {
    match kind {
        HeapModelKind::AllocationSite => Box::new(AllocationSiteHeapModel::new()),
        HeapModelKind::TypeBased => Box::new(TypeBasedHeapModel::new()),
    }
}
