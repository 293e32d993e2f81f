//! Ports for Points-to Analysis
//!
//! The solver talks to the heap abstraction only through [`HeapModel`], so a
//! coarser or finer object naming scheme can be swapped in without touching
//! propagation.

use crate::features::points_to::domain::AbstractObject;
use crate::features::program::TypeRef;
use crate::shared::models::{AllocSite, ObjId};

/// Maps allocation sites to abstract objects.
///
/// Implementations must be deterministic: the same `(site, ty)` always yields
/// the same handle within one analysis run.
pub trait HeapModel: Send + Sync {
    /// Abstract object for an allocation of `ty` at `site`
    fn obj(&mut self, site: AllocSite, ty: &TypeRef) -> ObjId;

    /// Object created earlier by [`HeapModel::obj`]
    fn object(&self, id: ObjId) -> &AbstractObject;

    /// All objects, indexed by handle
    fn objects(&self) -> &[AbstractObject];

    fn name(&self) -> &'static str;
}

/// Object handles are dense, so `objects().len()` is the count
pub fn num_objects(heap: &dyn HeapModel) -> usize {
    heap.objects().len()
}
