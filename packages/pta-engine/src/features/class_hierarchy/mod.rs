//! Class hierarchy: subtype structure, member resolution and dispatch

pub mod hierarchy;

pub use hierarchy::ClassHierarchy;
