use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{element::Error, level::Level};

/// The primitive gate catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    And,
    Or,
    Xor,
    Not,
}

impl GateKind {
    pub fn input_arity(self) -> usize {
        match self {
            GateKind::Not => 1,
            _ => 2,
        }
    }

    /// Looks a kind up by its netlist token. `inv` is accepted as an alias
    /// for `not`; matching is case-insensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "and" => Some(GateKind::And),
            "or" => Some(GateKind::Or),
            "xor" => Some(GateKind::Xor),
            "not" | "inv" => Some(GateKind::Not),
            _ => None,
        }
    }

    /// Pure truth function of the gate. Any undefined operand forces an
    /// undefined result regardless of the boolean outcome.
    pub fn eval(self, inputs: &[Level]) -> Level {
        debug_assert_eq!(inputs.len(), self.input_arity());
        if inputs.iter().any(|level| !level.is_defined()) {
            return Level::Undefined;
        }
        let a = inputs[0] == Level::High;
        let value = match self {
            GateKind::And => a && inputs[1] == Level::High,
            GateKind::Or => a || inputs[1] == Level::High,
            GateKind::Xor => a != (inputs[1] == Level::High),
            GateKind::Not => !a,
        };
        value.into()
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GateKind::And => "and",
            GateKind::Or => "or",
            GateKind::Xor => "xor",
            GateKind::Not => "not",
        };
        write!(f, "{name}")
    }
}

/// Leaf logic element: one output that is a pure boolean function of the
/// inputs, re-established synchronously on every input drive.
#[derive(Clone, Debug)]
pub struct Gate {
    kind: GateKind,
    inputs: Vec<Level>,
    output: Level,
    output_wire: Option<String>,
}

impl Gate {
    pub fn new(kind: GateKind) -> Self {
        Self {
            kind,
            inputs: vec![Level::Undefined; kind.input_arity()],
            output: Level::Undefined,
            output_wire: None,
        }
    }

    pub fn and() -> Self {
        Self::new(GateKind::And)
    }

    pub fn or() -> Self {
        Self::new(GateKind::Or)
    }

    pub fn xor() -> Self {
        Self::new(GateKind::Xor)
    }

    pub fn not() -> Self {
        Self::new(GateKind::Not)
    }

    pub fn kind(&self) -> GateKind {
        self.kind
    }

    pub fn input_len(&self) -> usize {
        self.inputs.len()
    }

    pub fn output_len(&self) -> usize {
        1
    }

    /// Sets the addressed input and recomputes the output before returning.
    pub fn drive_input(&mut self, index: usize, level: Level) -> Result<(), Error> {
        let arity = self.inputs.len();
        let slot = self
            .inputs
            .get_mut(index)
            .ok_or(Error::InputIndexOutOfRange { index, arity })?;
        *slot = level;
        self.output = self.kind.eval(&self.inputs);
        Ok(())
    }

    /// Pure read of the settled output; never triggers recomputation.
    pub fn output_state(&self, index: usize) -> Result<Level, Error> {
        if index != 0 {
            return Err(Error::OutputIndexOutOfRange { index, arity: 1 });
        }
        Ok(self.output)
    }

    /// Binds the output slot to a wire handle in the enclosing circuit's
    /// arena. The wire is silent until the next drive.
    pub fn connect_output(&mut self, index: usize, wire: impl Into<String>) -> Result<(), Error> {
        if index != 0 {
            return Err(Error::OutputIndexOutOfRange { index, arity: 1 });
        }
        self.output_wire = Some(wire.into());
        Ok(())
    }

    pub fn output_wire(&self, index: usize) -> Option<&str> {
        if index != 0 {
            return None;
        }
        self.output_wire.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::level::Level::{High, Low, Undefined};

    const TEST_CASES: [(bool, bool); 4] =
        [(false, false), (false, true), (true, false), (true, true)];

    fn drive_pair(gate: &mut Gate, a: Level, b: Level) -> Level {
        gate.drive_input(0, a).unwrap();
        gate.drive_input(1, b).unwrap();
        gate.output_state(0).unwrap()
    }

    fn check_truth_table(kind: GateKind, expected_fn: fn(bool, bool) -> bool) {
        for (a, b) in TEST_CASES {
            let mut gate = Gate::new(kind);
            let out = drive_pair(&mut gate, a.into(), b.into());
            assert_eq!(
                out,
                Level::from(expected_fn(a, b)),
                "{kind}({a}, {b}) settled to the wrong level"
            );
        }
    }

    #[test]
    fn and_truth_table() {
        check_truth_table(GateKind::And, |a, b| a && b);
    }

    #[test]
    fn or_truth_table() {
        check_truth_table(GateKind::Or, |a, b| a || b);
    }

    #[test]
    fn xor_truth_table() {
        check_truth_table(GateKind::Xor, |a, b| a != b);
    }

    #[test]
    fn not_truth_table() {
        for input in [false, true] {
            let mut gate = Gate::not();
            gate.drive_input(0, input.into()).unwrap();
            assert_eq!(gate.output_state(0).unwrap(), Level::from(!input));
        }
    }

    #[test]
    fn undefined_operand_dominates() {
        for kind in [GateKind::And, GateKind::Or, GateKind::Xor] {
            for defined in [Low, High] {
                let mut gate = Gate::new(kind);
                assert_eq!(drive_pair(&mut gate, Undefined, defined), Undefined);
                assert_eq!(drive_pair(&mut gate, defined, Undefined), Undefined);
            }
        }
        let mut gate = Gate::not();
        gate.drive_input(0, Undefined).unwrap();
        assert_eq!(gate.output_state(0).unwrap(), Undefined);
    }

    #[test]
    fn fresh_gate_is_settled_on_undefined() {
        let gate = Gate::and();
        assert_eq!(gate.output_state(0).unwrap(), Undefined);
    }

    #[test]
    fn reads_are_idempotent() {
        let mut gate = Gate::or();
        gate.drive_input(0, High).unwrap();
        gate.drive_input(1, Low).unwrap();
        for _ in 0..3 {
            assert_eq!(gate.output_state(0).unwrap(), High);
        }
    }

    #[test]
    fn out_of_range_pins_are_rejected() {
        let mut gate = Gate::not();
        assert_eq!(
            gate.drive_input(1, High),
            Err(Error::InputIndexOutOfRange { index: 1, arity: 1 })
        );
        assert_eq!(
            gate.output_state(3),
            Err(Error::OutputIndexOutOfRange { index: 3, arity: 1 })
        );
    }

    #[test]
    fn kind_tokens_cover_catalog_and_aliases() {
        assert_eq!(GateKind::from_token("AND"), Some(GateKind::And));
        assert_eq!(GateKind::from_token("xor"), Some(GateKind::Xor));
        assert_eq!(GateKind::from_token("inv"), Some(GateKind::Not));
        assert_eq!(GateKind::from_token("nand"), None);
    }
}
