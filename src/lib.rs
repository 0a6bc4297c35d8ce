//! Tickflow: a synchronous dataflow graph kernel. Typed ports, arena-backed
//! value cells, registration-order evaluation, one-tick-delay feedback.

pub mod graph;
#[doc(hidden)]
pub mod invariant_ppt;
pub mod node;
pub mod nodes;
pub mod port;
