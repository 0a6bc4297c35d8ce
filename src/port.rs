//! Port module: value cells and the arena that backs every port.
//!
//! An `Output` owns exactly one cell in the graph's [`PortBank`]. An `Input`
//! owns a private default cell and a binding that points either at that
//! default or at some output's cell. Connections are nothing more than the
//! binding: no edge objects, no topology record.

use std::fmt;

/// Marker bounds for values that can flow through a graph.
///
/// Blanket-implemented; arithmetic requirements live on the node kinds that
/// need them, so a graph of non-numeric values can still host `Variable`s.
pub trait Value: Copy + Default + PartialEq + fmt::Debug + 'static {}

impl<T: Copy + Default + PartialEq + fmt::Debug + 'static> Value for T {}

/// Index of a value cell inside a [`PortBank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct CellId(pub(crate) usize);

/// Handle to an input port. Only meaningful for the graph that allocated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InputId(pub usize);

/// Handle to an output port. Only meaningful for the graph that allocated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutputId(pub usize);

/// Binding state of one input: the default cell it owns, and the cell it
/// currently reads. `bound == default` means disconnected.
#[derive(Debug, Clone, Copy, PartialEq)]
struct InputBinding {
    default: CellId,
    bound: CellId,
}

/// Arena of value cells plus the port tables that index into it.
///
/// Cell addresses are stable because cells are only ever appended, which is
/// what lets an input hold a binding for the life of the graph.
#[derive(Debug, Clone)]
pub struct PortBank<T> {
    cells: Vec<T>,
    inputs: Vec<InputBinding>,
    outputs: Vec<CellId>,
}

impl<T: Value> PortBank<T> {
    pub(crate) fn new() -> Self {
        Self {
            cells: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    fn alloc_cell(&mut self) -> CellId {
        let id = CellId(self.cells.len());
        self.cells.push(T::default());
        id
    }

    /// Allocate an input port with a zero-valued private default cell.
    pub(crate) fn alloc_input(&mut self) -> InputId {
        let default = self.alloc_cell();
        let id = InputId(self.inputs.len());
        self.inputs.push(InputBinding {
            default,
            bound: default,
        });
        id
    }

    /// Allocate an output port owning a fresh zero-valued cell.
    pub(crate) fn alloc_output(&mut self) -> OutputId {
        let cell = self.alloc_cell();
        let id = OutputId(self.outputs.len());
        self.outputs.push(cell);
        id
    }

    /// Read an input through its current binding.
    pub fn input(&self, id: InputId) -> T {
        self.cells[self.inputs[id.0].bound.0]
    }

    /// Write through an input's current binding. When connected this writes
    /// the producing output's cell; when disconnected, the private default.
    pub fn set_input(&mut self, id: InputId, value: T) {
        let cell = self.inputs[id.0].bound;
        self.cells[cell.0] = value;
    }

    /// Read an output's cell.
    pub fn output(&self, id: OutputId) -> T {
        self.cells[self.outputs[id.0].0]
    }

    /// Overwrite an output's cell. Visible immediately to every input bound
    /// to it.
    pub fn set_output(&mut self, id: OutputId, value: T) {
        let cell = self.outputs[id.0];
        self.cells[cell.0] = value;
    }

    /// Rebind `to` onto `from`'s cell. Last call wins; no refcount is kept.
    pub(crate) fn connect(&mut self, from: OutputId, to: InputId) {
        self.inputs[to.0].bound = self.outputs[from.0];
    }

    /// Revert `id` to its private default cell.
    pub(crate) fn disconnect(&mut self, id: InputId) {
        let binding = &mut self.inputs[id.0];
        binding.bound = binding.default;
    }

    /// Whether the input currently reads something other than its default.
    pub fn is_connected(&self, id: InputId) -> bool {
        let binding = &self.inputs[id.0];
        binding.bound != binding.default
    }

    pub(crate) fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub(crate) fn output_count(&self) -> usize {
        self.outputs.len()
    }
}
