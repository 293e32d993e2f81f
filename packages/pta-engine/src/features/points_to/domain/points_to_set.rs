//! Points-to Set
//!
//! Sorted, deduplicated vector of object handles. Serves both as the
//! persistent set owned by a pointer and as the delta carried by worklist
//! entries.
//!
//! # Performance Characteristics
//! - Contains: O(log n)
//! - Union / difference: O(n + m) merge
//! - Iteration: ascending handle order, so results never depend on hashing

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::shared::models::ObjId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointsToSet {
    objects: Vec<ObjId>,
}

impl PointsToSet {
    /// Create an empty set
    #[inline]
    pub const fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    #[inline]
    pub fn singleton(obj: ObjId) -> Self {
        Self { objects: vec![obj] }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    #[inline]
    pub fn contains(&self, obj: ObjId) -> bool {
        self.objects.binary_search(&obj).is_ok()
    }

    /// Returns true if the object was not present
    pub fn insert(&mut self, obj: ObjId) -> bool {
        match self.objects.binary_search(&obj) {
            Ok(_) => false,
            Err(pos) => {
                self.objects.insert(pos, obj);
                true
            }
        }
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = ObjId> + '_ {
        self.objects.iter().copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[ObjId] {
        &self.objects
    }

    /// `self ∪= other`; returns true if `self` grew
    pub fn union_with(&mut self, other: &PointsToSet) -> bool {
        if other.is_empty() {
            return false;
        }
        if self.is_empty() {
            self.objects = other.objects.clone();
            return true;
        }

        let old_len = self.objects.len();
        let mut merged = Vec::with_capacity(old_len + other.len());
        let (a, b) = (&self.objects, &other.objects);
        let (mut i, mut j) = (0, 0);

        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                Ordering::Less => {
                    merged.push(a[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    merged.push(b[j]);
                    j += 1;
                }
                Ordering::Equal => {
                    merged.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        merged.extend_from_slice(&a[i..]);
        merged.extend_from_slice(&b[j..]);

        let grew = merged.len() > old_len;
        self.objects = merged;
        grew
    }

    /// Objects of `self` that are not in `other`
    pub fn difference(&self, other: &PointsToSet) -> PointsToSet {
        if other.is_empty() {
            return self.clone();
        }

        let mut out = Vec::new();
        let (a, b) = (&self.objects, &other.objects);
        let mut j = 0;
        for &obj in a {
            while j < b.len() && b[j] < obj {
                j += 1;
            }
            if j >= b.len() || b[j] != obj {
                out.push(obj);
            }
        }
        PointsToSet { objects: out }
    }

    /// True if the sets share at least one object
    pub fn intersects(&self, other: &PointsToSet) -> bool {
        let (mut i, mut j) = (0, 0);
        let (a, b) = (&self.objects, &other.objects);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => return true,
            }
        }
        false
    }

    pub fn is_subset_of(&self, other: &PointsToSet) -> bool {
        self.len() <= other.len() && self.iter().all(|o| other.contains(o))
    }
}

impl FromIterator<ObjId> for PointsToSet {
    fn from_iter<I: IntoIterator<Item = ObjId>>(iter: I) -> Self {
        let mut objects: Vec<ObjId> = iter.into_iter().collect();
        objects.sort_unstable();
        objects.dedup();
        Self { objects }
    }
}

impl<'a> IntoIterator for &'a PointsToSet {
    type Item = ObjId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, ObjId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter().copied()
    }
}
