//! Propagation worklist
//!
//! Holds `(pointer, delta)` entries waiting to be merged into the pointer's
//! points-to set. The processing order never changes the fixpoint, only the
//! number of iterations it takes to get there.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::points_to_set::PointsToSet;
use crate::shared::models::PointerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorklistOrder {
    /// Breadth-first
    #[default]
    Fifo,
    /// Depth-first
    Lifo,
}

impl WorklistOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorklistOrder::Fifo => "fifo",
            WorklistOrder::Lifo => "lifo",
        }
    }
}

impl fmt::Display for WorklistOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorklistOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fifo" => Ok(WorklistOrder::Fifo),
            "lifo" => Ok(WorklistOrder::Lifo),
            other => Err(format!("unknown worklist order '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub pointer: PointerId,
    pub pts: PointsToSet,
}

#[derive(Debug, Default)]
pub struct WorkList {
    entries: VecDeque<Entry>,
    order: WorklistOrder,
}

impl WorkList {
    pub fn new(order: WorklistOrder) -> Self {
        Self {
            entries: VecDeque::new(),
            order,
        }
    }

    /// Empty deltas are dropped
    pub fn add_entry(&mut self, pointer: PointerId, pts: PointsToSet) {
        if pts.is_empty() {
            return;
        }
        self.entries.push_back(Entry { pointer, pts });
    }

    pub fn poll_entry(&mut self) -> Option<Entry> {
        match self.order {
            WorklistOrder::Fifo => self.entries.pop_front(),
            WorklistOrder::Lifo => self.entries.pop_back(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn order(&self) -> WorklistOrder {
        self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::ObjId;

    #[test]
    fn test_fifo_and_lifo() {
        let pts = PointsToSet::singleton(ObjId(0));

        let mut fifo = WorkList::new(WorklistOrder::Fifo);
        fifo.add_entry(PointerId(1), pts.clone());
        fifo.add_entry(PointerId(2), pts.clone());
        assert_eq!(fifo.poll_entry().map(|e| e.pointer), Some(PointerId(1)));

        let mut lifo = WorkList::new(WorklistOrder::Lifo);
        lifo.add_entry(PointerId(1), pts.clone());
        lifo.add_entry(PointerId(2), pts);
        assert_eq!(lifo.poll_entry().map(|e| e.pointer), Some(PointerId(2)));
        assert_eq!(lifo.len(), 1);
    }

    #[test]
    fn test_empty_delta_dropped() {
        let mut wl = WorkList::new(WorklistOrder::Fifo);
        wl.add_entry(PointerId(0), PointsToSet::new());
        assert!(wl.is_empty());
        assert!(wl.poll_entry().is_none());
    }

    #[test]
    fn test_order_parse() {
        assert_eq!("LIFO".parse::<WorklistOrder>(), Ok(WorklistOrder::Lifo));
        assert!("random".parse::<WorklistOrder>().is_err());
        assert_eq!(WorklistOrder::default().to_string(), "fifo");
    }
}
