use std::collections::{HashMap, hash_map::Entry};

use log::trace;

use crate::core::{
    element::{Element, ElementError},
    level::Level,
    wire::{Wire, WireError},
};

/// Errors raised while building or driving a circuit
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A build operation referenced a child that was never registered
    #[error("no child registered under `{0}`")]
    UnknownChild(String),
    /// A build operation referenced a wire that was never registered
    #[error("no wire registered under `{0}`")]
    UnknownWire(String),
    /// The child identifier is already in use
    #[error("child identifier `{0}` already in use")]
    DuplicateChild(String),
    /// The wire identifier is already in use
    #[error("wire identifier `{0}` already in use")]
    DuplicateWire(String),
    /// Propagation exceeded the hop limit, so the wiring contains a cycle
    #[error("propagation exceeded the depth limit; wiring contains a cycle")]
    CycleDetected,
    #[error(transparent)]
    Element(#[from] ElementError),
    #[error(transparent)]
    Wire(#[from] WireError),
}
pub type CircuitError = Error;

/// Upper bound on wire-to-element hops within one circuit's propagation
/// wave. Combinational networks are contractually acyclic; a wave deeper
/// than this is treated as a feedback loop and fails fast instead of
/// overflowing the stack.
pub const MAX_PROPAGATION_DEPTH: usize = 1024;

/// Composite logic element built from owned child elements and internal
/// wires.
///
/// The circuit is the arena for everything it contains: children and wires
/// live in its tables and refer to each other only through identifiers.
/// Driving one of the circuit's inputs re-drives every mapped internal
/// wire, which recursively settles the reachable children before the
/// circuit's own outputs are pulled from the output map.
#[derive(Clone, Debug, Default)]
pub struct Circuit {
    inputs: Vec<Level>,
    outputs: Vec<Level>,
    output_wires: Vec<Option<String>>,
    children: HashMap<String, Element>,
    wires: HashMap<String, Wire>,
    input_map: Vec<(usize, String)>,
    output_map: Vec<(String, usize, usize)>,
}

impl Circuit {
    /// Creates an empty circuit with the declared pin arities. All pins
    /// start out `Undefined`.
    pub fn new(n_inputs: usize, n_outputs: usize) -> Self {
        Self {
            inputs: vec![Level::Undefined; n_inputs],
            outputs: vec![Level::Undefined; n_outputs],
            output_wires: vec![None; n_outputs],
            children: HashMap::new(),
            wires: HashMap::new(),
            input_map: Vec::new(),
            output_map: Vec::new(),
        }
    }

    pub fn input_len(&self) -> usize {
        self.inputs.len()
    }

    pub fn output_len(&self) -> usize {
        self.outputs.len()
    }

    pub fn has_child(&self, id: &str) -> bool {
        self.children.contains_key(id)
    }

    pub fn has_wire(&self, id: &str) -> bool {
        self.wires.contains_key(id)
    }

    /// Registers an owned child element. Identifiers are never reused:
    /// registering a taken one is rejected, not overwritten.
    pub fn add_child(&mut self, id: impl Into<String>, element: impl Into<Element>) -> Result<(), Error> {
        match self.children.entry(id.into()) {
            Entry::Occupied(occupied) => Err(Error::DuplicateChild(occupied.key().clone())),
            Entry::Vacant(vacant) => {
                vacant.insert(element.into());
                Ok(())
            }
        }
    }

    /// Registers an owned internal wire under the identifier.
    pub fn add_wire(&mut self, id: impl Into<String>) -> Result<(), Error> {
        match self.wires.entry(id.into()) {
            Entry::Occupied(occupied) => Err(Error::DuplicateWire(occupied.key().clone())),
            Entry::Vacant(vacant) => {
                vacant.insert(Wire::new());
                Ok(())
            }
        }
    }

    /// Fans the named wire out to one input of the named child.
    pub fn connect_wire_to_child(
        &mut self,
        wire_id: &str,
        child_id: &str,
        input: usize,
    ) -> Result<(), Error> {
        let arity = self
            .children
            .get(child_id)
            .ok_or_else(|| Error::UnknownChild(child_id.to_owned()))?
            .input_len();
        if input >= arity {
            return Err(ElementError::InputIndexOutOfRange { index: input, arity }.into());
        }
        let wire = self
            .wires
            .get_mut(wire_id)
            .ok_or_else(|| Error::UnknownWire(wire_id.to_owned()))?;
        wire.connect(child_id, input)?;
        Ok(())
    }

    /// Binds one output of the named child to the named wire. The wire
    /// stays silent until the child next recomputes.
    pub fn connect_child_to_wire(
        &mut self,
        child_id: &str,
        output: usize,
        wire_id: &str,
    ) -> Result<(), Error> {
        if !self.wires.contains_key(wire_id) {
            return Err(Error::UnknownWire(wire_id.to_owned()));
        }
        let child = self
            .children
            .get_mut(child_id)
            .ok_or_else(|| Error::UnknownChild(child_id.to_owned()))?;
        child.connect_output(output, wire_id)?;
        Ok(())
    }

    /// Records that driving the given circuit input must drive the named
    /// internal wire. With `index: None` the next free input index is
    /// used. Returns the index the entry landed on.
    ///
    /// One circuit input may map to several wires, and not every input
    /// needs a mapping.
    pub fn map_input(&mut self, wire_id: &str, index: Option<usize>) -> Result<usize, Error> {
        if !self.wires.contains_key(wire_id) {
            return Err(Error::UnknownWire(wire_id.to_owned()));
        }
        let index = index.unwrap_or_else(|| self.next_free_input());
        let arity = self.inputs.len();
        if index >= arity {
            return Err(ElementError::InputIndexOutOfRange { index, arity }.into());
        }
        self.input_map.push((index, wire_id.to_owned()));
        Ok(index)
    }

    /// Records that the given circuit output is sourced from one output of
    /// the named child. With `index: None` the next free output index is
    /// used. When several entries target the same circuit output, the one
    /// registered last wins.
    pub fn map_output(
        &mut self,
        child_id: &str,
        child_output: usize,
        index: Option<usize>,
    ) -> Result<usize, Error> {
        let child = self
            .children
            .get(child_id)
            .ok_or_else(|| Error::UnknownChild(child_id.to_owned()))?;
        let child_arity = child.output_len();
        if child_output >= child_arity {
            return Err(ElementError::OutputIndexOutOfRange {
                index: child_output,
                arity: child_arity,
            }
            .into());
        }
        let index = index.unwrap_or_else(|| self.next_free_output());
        let arity = self.outputs.len();
        if index >= arity {
            return Err(ElementError::OutputIndexOutOfRange { index, arity }.into());
        }
        self.output_map.push((child_id.to_owned(), child_output, index));
        Ok(index)
    }

    fn next_free_input(&self) -> usize {
        self.input_map.iter().map(|&(index, _)| index + 1).max().unwrap_or(0)
    }

    fn next_free_output(&self) -> usize {
        self.output_map.iter().map(|&(_, _, index)| index + 1).max().unwrap_or(0)
    }

    /// Sets the addressed circuit input and recomputes. When this returns
    /// `Ok`, every reachable child has settled and the circuit's outputs
    /// reflect the new input state.
    pub fn drive_input(&mut self, index: usize, level: Level) -> Result<(), Error> {
        let arity = self.inputs.len();
        let slot = self
            .inputs
            .get_mut(index)
            .ok_or(ElementError::InputIndexOutOfRange { index, arity })?;
        *slot = level;
        self.recompute()
    }

    /// Pure read of a settled circuit output; never triggers
    /// recomputation.
    pub fn output_state(&self, index: usize) -> Result<Level, ElementError> {
        let arity = self.outputs.len();
        self.outputs
            .get(index)
            .copied()
            .ok_or(ElementError::OutputIndexOutOfRange { index, arity })
    }

    /// Binds one of the circuit's own outputs to a wire handle in the
    /// enclosing circuit's arena.
    pub fn connect_output(&mut self, index: usize, wire: impl Into<String>) -> Result<(), ElementError> {
        let arity = self.outputs.len();
        let slot = self
            .output_wires
            .get_mut(index)
            .ok_or(ElementError::OutputIndexOutOfRange { index, arity })?;
        *slot = Some(wire.into());
        Ok(())
    }

    pub fn output_wire(&self, index: usize) -> Option<&str> {
        self.output_wires.get(index).and_then(|wire| wire.as_deref())
    }

    /// Two-phase recomputation: drive every mapped internal wire with the
    /// circuit's current input levels (fan-in), then pull the circuit's
    /// outputs from the mapped child outputs (fan-out), both in
    /// registration order.
    pub fn recompute(&mut self) -> Result<(), Error> {
        for (index, wire_id) in self.input_map.clone() {
            let level = self.inputs[index];
            self.drive_wire(&wire_id, level, 0)?;
        }
        for (child_id, child_output, circuit_output) in self.output_map.clone() {
            let child = self
                .children
                .get(&child_id)
                .ok_or_else(|| Error::UnknownChild(child_id.clone()))?;
            self.outputs[circuit_output] = child.output_state(child_output)?;
        }
        Ok(())
    }

    /// Pushes a level to every sink of the wire, in registration order.
    /// Each sink settles fully (including anything downstream of it)
    /// before the next sink is driven.
    fn drive_wire(&mut self, wire_id: &str, level: Level, depth: usize) -> Result<(), Error> {
        if depth >= MAX_PROPAGATION_DEPTH {
            return Err(Error::CycleDetected);
        }
        trace!("wire `{wire_id}` <- {level}");
        let sinks = self
            .wires
            .get(wire_id)
            .ok_or_else(|| Error::UnknownWire(wire_id.to_owned()))?
            .sinks()
            .to_vec();
        for sink in sinks {
            self.drive_child(&sink.child, sink.input, level, depth + 1)?;
        }
        Ok(())
    }

    /// Drives one child input, lets the child settle, then continues the
    /// wave through every wire bound to one of the child's outputs.
    fn drive_child(
        &mut self,
        child_id: &str,
        input: usize,
        level: Level,
        depth: usize,
    ) -> Result<(), Error> {
        let child = self
            .children
            .get_mut(child_id)
            .ok_or_else(|| Error::UnknownChild(child_id.to_owned()))?;
        child.drive_input(input, level)?;

        let mut downstream = Vec::new();
        for index in 0..child.output_len() {
            if let Some(wire_id) = child.output_wire(index) {
                downstream.push((wire_id.to_owned(), child.output_state(index)?));
            }
        }
        for (wire_id, level) in downstream {
            self.drive_wire(&wire_id, level, depth + 1)?;
        }
        Ok(())
    }
}
