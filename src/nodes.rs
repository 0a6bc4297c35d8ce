//! Built-in primitive node kinds: settable source, noise source, and
//! unary/binary arithmetic.

use crate::invariant_ppt::{assert_invariant, NOISE_RANGE_NONEMPTY};
use crate::node::{Node, NodeId, TickContext};
use crate::port::{InputId, OutputId, PortBank, Value};
use rand::distributions::uniform::SampleUniform;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::ops;

/// Settable constant source. Evaluation is a no-op: the output holds
/// whatever was last assigned to it.
#[derive(Debug, Clone, Copy)]
pub struct Variable {
    /// The value this node surfaces.
    pub output: OutputId,
}

impl<T: Value> Node<T> for Variable {}

/// Handle to a registered [`WhiteNoise`] node. Unlike the arithmetic kinds
/// the node itself carries a generator and cannot be copied out, so the
/// factory returns this instead; `node` feeds
/// [`crate::graph::Graph::node_mut`] for range retargeting.
#[derive(Debug, Clone, Copy)]
pub struct Noise {
    /// The registered node.
    pub node: NodeId,
    /// The sampled value.
    pub output: OutputId,
}

/// Uniform random source over `[min, max)`, resampled every tick from a
/// per-node generator seeded at construction.
#[derive(Debug, Clone)]
pub struct WhiteNoise<T> {
    /// The sampled value.
    pub output: OutputId,
    min: T,
    max: T,
    rng: SmallRng,
}

impl<T> WhiteNoise<T>
where
    T: Value + SampleUniform + PartialOrd,
{
    /// Create a noise node with an entropy-seeded generator.
    pub fn new(output: OutputId, min: T, max: T) -> Self {
        Self::from_rng(output, min, max, SmallRng::from_entropy())
    }

    /// Create a noise node with a fixed seed, for reproducible runs.
    pub fn with_seed(output: OutputId, min: T, max: T, seed: u64) -> Self {
        Self::from_rng(output, min, max, SmallRng::seed_from_u64(seed))
    }

    fn from_rng(output: OutputId, min: T, max: T, rng: SmallRng) -> Self {
        assert_invariant(
            NOISE_RANGE_NONEMPTY,
            min < max,
            "noise range must be non-empty",
            Some("WhiteNoise"),
        );
        Self {
            output,
            min,
            max,
            rng,
        }
    }

    /// Retarget the sampling range.
    pub fn range(&mut self, min: T, max: T) {
        assert_invariant(
            NOISE_RANGE_NONEMPTY,
            min < max,
            "noise range must be non-empty",
            Some("WhiteNoise::range"),
        );
        self.min = min;
        self.max = max;
    }
}

impl<T> Node<T> for WhiteNoise<T>
where
    T: Value + SampleUniform + PartialOrd,
{
    fn evaluate(&mut self, ports: &mut PortBank<T>, _ctx: &TickContext) {
        let sample = self.rng.gen_range(self.min..self.max);
        ports.set_output(self.output, sample);
    }
}

/// Sign change: `output := -input`.
#[derive(Debug, Clone, Copy)]
pub struct Neg {
    /// The value to negate.
    pub input: InputId,
    /// The negated value.
    pub output: OutputId,
}

impl<T> Node<T> for Neg
where
    T: Value + ops::Neg<Output = T>,
{
    fn evaluate(&mut self, ports: &mut PortBank<T>, _ctx: &TickContext) {
        let value = ports.input(self.input);
        ports.set_output(self.output, -value);
    }
}

/// `output := lhs + rhs`.
#[derive(Debug, Clone, Copy)]
pub struct Add {
    /// First operand.
    pub lhs: InputId,
    /// Second operand.
    pub rhs: InputId,
    /// The sum.
    pub output: OutputId,
}

impl<T> Node<T> for Add
where
    T: Value + ops::Add<Output = T>,
{
    fn evaluate(&mut self, ports: &mut PortBank<T>, _ctx: &TickContext) {
        let value = ports.input(self.lhs) + ports.input(self.rhs);
        ports.set_output(self.output, value);
    }
}

/// `output := lhs - rhs`.
#[derive(Debug, Clone, Copy)]
pub struct Sub {
    /// Minuend.
    pub lhs: InputId,
    /// Subtrahend.
    pub rhs: InputId,
    /// The difference.
    pub output: OutputId,
}

impl<T> Node<T> for Sub
where
    T: Value + ops::Sub<Output = T>,
{
    fn evaluate(&mut self, ports: &mut PortBank<T>, _ctx: &TickContext) {
        let value = ports.input(self.lhs) - ports.input(self.rhs);
        ports.set_output(self.output, value);
    }
}

/// `output := lhs * rhs`.
#[derive(Debug, Clone, Copy)]
pub struct Mul {
    /// First factor.
    pub lhs: InputId,
    /// Second factor.
    pub rhs: InputId,
    /// The product.
    pub output: OutputId,
}

impl<T> Node<T> for Mul
where
    T: Value + ops::Mul<Output = T>,
{
    fn evaluate(&mut self, ports: &mut PortBank<T>, _ctx: &TickContext) {
        let value = ports.input(self.lhs) * ports.input(self.rhs);
        ports.set_output(self.output, value);
    }
}

/// `output := lhs / rhs`. No divide-by-zero guard: floats follow IEEE
/// semantics (inf/NaN), integer division by zero panics.
#[derive(Debug, Clone, Copy)]
pub struct Div {
    /// Dividend.
    pub lhs: InputId,
    /// Divisor.
    pub rhs: InputId,
    /// The quotient.
    pub output: OutputId,
}

impl<T> Node<T> for Div
where
    T: Value + ops::Div<Output = T>,
{
    fn evaluate(&mut self, ports: &mut PortBank<T>, _ctx: &TickContext) {
        let value = ports.input(self.lhs) / ports.input(self.rhs);
        ports.set_output(self.output, value);
    }
}
