//! Containers layered on top of [SkipList](crate::SkipList).
pub mod priority_queue;

pub use priority_queue::PriorityQueue;
