//! Queue primitives for algorithms built on top of the graph

pub mod priority_queue;

pub use priority_queue::PriorityQueue;
