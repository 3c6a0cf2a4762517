//! Combinational gate-level logic simulator.
//!
//! Networks of primitive gates and hierarchically composed circuits are
//! connected by bounded-fan-out wires and evaluated eagerly: driving any
//! input synchronously recomputes everything reachable downstream before
//! the call returns. Sequential logic, timing and tri-state buses beyond
//! the undefined level are out of scope.

mod core;
pub mod gadgets;
pub mod netlist;
pub mod tester;

pub use crate::core::{
    circuit::{Circuit, CircuitError, MAX_PROPAGATION_DEPTH},
    element::{Element, ElementError},
    gate::{Gate, GateKind},
    level::Level,
    wire::{MAX_FANOUT, Sink, Wire, WireError},
};
