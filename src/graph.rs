//! Graph module: node ownership, wiring, and tick-driven evaluation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use crate::invariant_ppt::{
    assert_invariant, BINDING_TARGETS_LIVE, DEFAULT_ISOLATION, REGISTRATION_APPEND_ONLY,
    TIMING_POSITIVE,
};
use crate::node::{AnyNode, Node, NodeId, TickContext};
use crate::nodes::{Add, Div, Mul, Neg, Noise, Sub, Variable, WhiteNoise};
use crate::port::{InputId, OutputId, PortBank, Value};
use rand::distributions::uniform::SampleUniform;
use std::ops;

/// Default tick duration for a fresh graph, in seconds.
pub const DEFAULT_TIME_STEP: f64 = 1e-6;

/// A synchronous dataflow graph.
///
/// The graph exclusively owns its nodes and every port cell. Registration
/// order is append-only and **is** the evaluation order: `evaluate` makes one
/// linear pass, no dependency analysis, no cycle detection. Wiring an output
/// back to an earlier-registered node's input therefore closes a feedback
/// loop with one-tick-delay semantics, which integrator-style graphs rely on.
pub struct Graph<T: Value> {
    ports: PortBank<T>,
    nodes: Vec<Box<dyn AnyNode<T>>>,
    time_step: f64,
}

impl<T: Value> Graph<T> {
    /// Create an empty graph with the default time step.
    pub fn new() -> Self {
        Self {
            ports: PortBank::new(),
            nodes: Vec::new(),
            time_step: DEFAULT_TIME_STEP,
        }
    }

    /// Duration of one tick in seconds.
    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Set the tick duration.
    pub fn set_time_step(&mut self, dt: f64) {
        assert_invariant(
            TIMING_POSITIVE,
            dt > 0.0 && dt.is_finite(),
            "time step must be positive and finite",
            Some("set_time_step"),
        );
        self.time_step = dt;
    }

    /// Ticks per second; reciprocal view of the time step.
    pub fn sample_rate(&self) -> f64 {
        1.0 / self.time_step
    }

    /// Set the tick duration via its reciprocal.
    pub fn set_sample_rate(&mut self, sr: f64) {
        assert_invariant(
            TIMING_POSITIVE,
            sr > 0.0 && sr.is_finite(),
            "sample rate must be positive and finite",
            Some("set_sample_rate"),
        );
        self.time_step = 1.0 / sr;
    }

    /// Allocate an input port for a custom node. Reads its own zero-valued
    /// default cell until connected.
    pub fn input_port(&mut self) -> InputId {
        let id = self.ports.alloc_input();
        assert_invariant(
            DEFAULT_ISOLATION,
            !self.ports.is_connected(id),
            "fresh input must read its private default",
            Some("input_port"),
        );
        id
    }

    /// Allocate an output port for a custom node, owning a zero-valued cell.
    pub fn output_port(&mut self) -> OutputId {
        self.ports.alloc_output()
    }

    /// Register a node. Appended to the evaluation order; nodes are never
    /// removed or reordered.
    pub fn insert<N: Node<T>>(&mut self, node: N) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Box::new(node));
        assert_invariant(
            REGISTRATION_APPEND_ONLY,
            id.0 + 1 == self.nodes.len(),
            "registration order is append-only",
            Some("insert"),
        );
        id
    }

    /// Bind `to` to read `from`'s cell. Any previous binding is overwritten;
    /// one output may feed any number of inputs.
    pub fn connect(&mut self, from: OutputId, to: InputId) {
        assert_invariant(
            BINDING_TARGETS_LIVE,
            from.0 < self.ports.output_count() && to.0 < self.ports.input_count(),
            "port handles must belong to this graph",
            Some("connect"),
        );
        self.ports.connect(from, to);
    }

    /// Revert `input` to its private default cell.
    pub fn disconnect(&mut self, input: InputId) {
        assert_invariant(
            BINDING_TARGETS_LIVE,
            input.0 < self.ports.input_count(),
            "port handle must belong to this graph",
            Some("disconnect"),
        );
        self.ports.disconnect(input);
    }

    /// Read an input through its current binding.
    pub fn input(&self, id: InputId) -> T {
        self.ports.input(id)
    }

    /// Write through an input's binding: the producer's cell when connected,
    /// the private default otherwise.
    pub fn set_input(&mut self, id: InputId, value: T) {
        self.ports.set_input(id, value);
    }

    /// Read an output's cell.
    pub fn output(&self, id: OutputId) -> T {
        self.ports.output(id)
    }

    /// Overwrite an output's cell, e.g. to seed a feedback loop or set a
    /// `Variable`.
    pub fn set_output(&mut self, id: OutputId, value: T) {
        self.ports.set_output(id, value);
    }

    /// Whether the input currently reads an output rather than its default.
    pub fn is_connected(&self, id: InputId) -> bool {
        self.ports.is_connected(id)
    }

    /// Number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Typed access to a registered node, e.g. to retarget a noise source's
    /// range. `None` when the id does not name a node of kind `N`.
    pub fn node_mut<N: Node<T>>(&mut self, id: NodeId) -> Option<&mut N> {
        self.nodes.get_mut(id.0)?.as_any_mut().downcast_mut::<N>()
    }

    /// Advance one tick: evaluate every node once, in registration order.
    ///
    /// A node registered after its producer sees the value produced this
    /// tick; a node registered before its producer sees last tick's value.
    pub fn evaluate(&mut self) {
        let ctx = TickContext {
            time_step: self.time_step,
            sample_rate: 1.0 / self.time_step,
        };
        for node in &mut self.nodes {
            node.evaluate(&mut self.ports, &ctx);
        }
    }

    // Factories for the primitive node kinds.

    /// Register a [`Variable`] holding `value`.
    pub fn variable(&mut self, value: T) -> Variable {
        let output = self.ports.alloc_output();
        self.ports.set_output(output, value);
        let node = Variable { output };
        self.insert(node);
        node
    }

    /// Register a [`WhiteNoise`] source over `[min, max)` with an
    /// entropy-seeded generator. The returned handle carries the node id so
    /// the range can be retargeted later through [`Graph::node_mut`].
    pub fn noise(&mut self, min: T, max: T) -> Noise
    where
        T: SampleUniform + PartialOrd,
    {
        let output = self.ports.alloc_output();
        let node = self.insert(WhiteNoise::new(output, min, max));
        Noise { node, output }
    }

    /// Register a [`Neg`] node.
    pub fn neg(&mut self) -> Neg
    where
        T: ops::Neg<Output = T>,
    {
        let node = Neg {
            input: self.ports.alloc_input(),
            output: self.ports.alloc_output(),
        };
        self.insert(node);
        node
    }

    /// Register an [`Add`] node.
    pub fn add(&mut self) -> Add
    where
        T: ops::Add<Output = T>,
    {
        let node = Add {
            lhs: self.ports.alloc_input(),
            rhs: self.ports.alloc_input(),
            output: self.ports.alloc_output(),
        };
        self.insert(node);
        node
    }

    /// Register a [`Sub`] node.
    pub fn sub(&mut self) -> Sub
    where
        T: ops::Sub<Output = T>,
    {
        let node = Sub {
            lhs: self.ports.alloc_input(),
            rhs: self.ports.alloc_input(),
            output: self.ports.alloc_output(),
        };
        self.insert(node);
        node
    }

    /// Register a [`Mul`] node.
    pub fn mul(&mut self) -> Mul
    where
        T: ops::Mul<Output = T>,
    {
        let node = Mul {
            lhs: self.ports.alloc_input(),
            rhs: self.ports.alloc_input(),
            output: self.ports.alloc_output(),
        };
        self.insert(node);
        node
    }

    /// Register a [`Div`] node.
    pub fn div(&mut self) -> Div
    where
        T: ops::Div<Output = T>,
    {
        let node = Div {
            lhs: self.ports.alloc_input(),
            rhs: self.ports.alloc_input(),
            output: self.ports.alloc_output(),
        };
        self.insert(node);
        node
    }
}

impl<T: Value> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Value> std::fmt::Debug for Graph<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("nodes", &self.nodes.len())
            .field("time_step", &self.time_step)
            .finish_non_exhaustive()
    }
}
