//! Trait-based node definitions: the unit of computation in a graph.

#![forbid(unsafe_code)]

use crate::port::{PortBank, Value};
use std::any::Any;

/// Unique identifier for a node. Assigned in registration order, which is
/// also evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Per-tick timing configuration, passed to every node instead of a
/// back-reference to the owning graph.
#[derive(Debug, Clone, Copy)]
pub struct TickContext {
    /// Duration of one tick in seconds.
    pub time_step: f64,
    /// Reciprocal of `time_step`.
    pub sample_rate: f64,
}

/// A processing node. Implement this for custom node kinds; the port handles
/// a node reads and writes are fixed fields of the implementing struct, so
/// arity and port types are pinned at definition time.
///
/// `evaluate` must only read its own input ports and write its own output
/// ports. The default body does nothing, which is the correct behavior for
/// pure data sources such as [`crate::nodes::Variable`].
pub trait Node<T: Value>: 'static {
    /// Recompute this node's outputs from its current input values.
    fn evaluate(&mut self, ports: &mut PortBank<T>, ctx: &TickContext) {
        let _ = (ports, ctx);
    }
}

/// Object-safe form the graph stores: [`Node`] plus the downcast hook behind
/// [`crate::graph::Graph::node_mut`]. Blanket-implemented, never implemented
/// by hand.
pub(crate) trait AnyNode<T: Value> {
    fn evaluate(&mut self, ports: &mut PortBank<T>, ctx: &TickContext);
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Value, N: Node<T>> AnyNode<T> for N {
    fn evaluate(&mut self, ports: &mut PortBank<T>, ctx: &TickContext) {
        Node::evaluate(self, ports, ctx);
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
