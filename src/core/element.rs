use crate::core::{
    circuit::{self, Circuit},
    gate::Gate,
    level::Level,
};

/// Errors addressing a pin outside an element's declared arity
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Input index outside the element's input arity
    #[error("input index {index} out of range for element with {arity} inputs")]
    InputIndexOutOfRange { index: usize, arity: usize },
    /// Output index outside the element's output arity
    #[error("output index {index} out of range for element with {arity} outputs")]
    OutputIndexOutOfRange { index: usize, arity: usize },
}
pub type ElementError = Error;

/// A logic element: a primitive gate or a composed circuit.
///
/// Both variants share the same contract: index-addressed input and output
/// pins, one optional outbound wire handle per output, and synchronous
/// recomputation on every input drive. A circuit owns its children
/// exclusively, so dropping an element tears down its whole subtree.
#[derive(Clone, Debug)]
pub enum Element {
    Gate(Gate),
    Circuit(Circuit),
}

impl Element {
    pub fn input_len(&self) -> usize {
        match self {
            Element::Gate(gate) => gate.input_len(),
            Element::Circuit(circuit) => circuit.input_len(),
        }
    }

    pub fn output_len(&self) -> usize {
        match self {
            Element::Gate(gate) => gate.output_len(),
            Element::Circuit(circuit) => circuit.output_len(),
        }
    }

    /// Drives one input pin. When this returns `Ok`, the element and
    /// everything reachable downstream of it inside the element have
    /// settled; no separate stepping call exists.
    pub fn drive_input(&mut self, index: usize, level: Level) -> Result<(), circuit::Error> {
        match self {
            Element::Gate(gate) => Ok(gate.drive_input(index, level)?),
            Element::Circuit(circuit) => circuit.drive_input(index, level),
        }
    }

    /// Pure read of a settled output pin.
    pub fn output_state(&self, index: usize) -> Result<Level, Error> {
        match self {
            Element::Gate(gate) => gate.output_state(index),
            Element::Circuit(circuit) => circuit.output_state(index),
        }
    }

    /// Binds an output pin to a wire handle in the enclosing circuit's
    /// arena. Connecting never re-drives: the wire stays silent until the
    /// element's next recomputation.
    pub fn connect_output(&mut self, index: usize, wire: impl Into<String>) -> Result<(), Error> {
        match self {
            Element::Gate(gate) => gate.connect_output(index, wire),
            Element::Circuit(circuit) => circuit.connect_output(index, wire),
        }
    }

    pub fn output_wire(&self, index: usize) -> Option<&str> {
        match self {
            Element::Gate(gate) => gate.output_wire(index),
            Element::Circuit(circuit) => circuit.output_wire(index),
        }
    }
}

impl From<Gate> for Element {
    fn from(gate: Gate) -> Self {
        Element::Gate(gate)
    }
}

impl From<Circuit> for Element {
    fn from(circuit: Circuit) -> Self {
        Element::Circuit(circuit)
    }
}
