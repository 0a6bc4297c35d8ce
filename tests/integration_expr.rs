//! End-to-end expression graphs built through the public contract only:
//! construct, wire, evaluate, read.

use tickflow::graph::Graph;
use tickflow::invariant_ppt::{
    clear_invariant_log, contract_test, BINDING_TARGETS_LIVE, REGISTRATION_APPEND_ONLY,
};
use tickflow::node::{Node, TickContext};
use tickflow::port::{InputId, OutputId, PortBank};

#[test]
fn expression_tree_a_plus_b_times_c() {
    // (a + b) * c with a=1, b=2, c=3.
    let mut g: Graph<f32> = Graph::new();
    let a = g.variable(1.0);
    let b = g.variable(2.0);
    let c = g.variable(3.0);
    let add = g.add();
    let mul = g.mul();

    g.connect(a.output, add.lhs);
    g.connect(b.output, add.rhs);
    g.connect(add.output, mul.lhs);
    g.connect(c.output, mul.rhs);

    g.evaluate();
    assert_eq!(g.output(mul.output), 9.0);

    // Re-seeding a variable flows through on the next tick.
    g.set_output(a.output, 7.0);
    g.evaluate();
    assert_eq!(g.output(mul.output), 27.0);
}

/// Custom node: maximum of two integer inputs.
struct Max {
    a: InputId,
    b: InputId,
    output: OutputId,
}

impl Node<i32> for Max {
    fn evaluate(&mut self, ports: &mut PortBank<i32>, _ctx: &TickContext) {
        let value = ports.input(self.a).max(ports.input(self.b));
        ports.set_output(self.output, value);
    }
}

#[test]
fn custom_max_node() {
    let mut g: Graph<i32> = Graph::new();
    let a = g.variable(10);
    let b = g.variable(20);

    let max = Max {
        a: g.input_port(),
        b: g.input_port(),
        output: g.output_port(),
    };
    g.connect(a.output, max.a);
    g.connect(b.output, max.b);
    let out = max.output;
    g.insert(max);

    g.evaluate();
    assert_eq!(g.output(out), 20);

    g.set_output(a.output, 99);
    g.evaluate();
    assert_eq!(g.output(out), 99);
}

#[test]
fn contract_wiring_invariants() {
    clear_invariant_log();
    let mut g: Graph<i32> = Graph::new();
    let a = g.variable(1);
    let neg = g.neg();
    g.connect(a.output, neg.input);
    contract_test(
        "wiring invariants",
        &[REGISTRATION_APPEND_ONLY, BINDING_TARGETS_LIVE],
    );
}
