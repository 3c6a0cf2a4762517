//! Line-oriented netlist mini-language.
//!
//! A netlist is a stream of directives, one per line, terminated by `end`:
//!
//! ```text
//! # a two-gate test circuit
//! component xor myXor0
//! component and myAnd0
//! wire inwireA 0 myXor0
//! wire inwireB 1 myXor0
//! connect myXor0 0 midwire
//! wire midwire 0 myAnd0
//! testerInput inwireA
//! testerInput inwireB
//! testerOutput myAnd0 0
//! end myCircuit
//! ```
//!
//! Wires are declared implicitly on first mention. Comment lines (leading
//! `#`) and unrecognized directives are skipped with a diagnostic;
//! unrecognized gate kinds skip their `component` line the same way.
//! `testerInput`/`testerOutput` pins become the circuit's inputs and
//! outputs, in encounter order.

use log::{debug, warn};

use crate::core::{
    circuit::{Circuit, CircuitError},
    gate::{Gate, GateKind},
};

/// Errors raised while parsing a netlist
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A directive was recognized but its operands did not parse
    #[error("line {line}: malformed `{verb}` directive")]
    Malformed { line: usize, verb: String },
    /// The stream ended without an `end` terminator
    #[error("netlist is missing its `end` terminator")]
    MissingEnd,
    #[error(transparent)]
    Build(#[from] CircuitError),
}
pub type NetlistError = Error;

/// A parsed netlist: the built circuit plus the optional name given on the
/// `end` line.
#[derive(Clone, Debug)]
pub struct Netlist {
    pub name: Option<String>,
    pub circuit: Circuit,
}

/// Parses a netlist source into a circuit.
///
/// Runs two passes: the first counts tester pins so the circuit can be
/// created with its declared arity, the second replays the directives
/// against the build API.
pub fn parse(source: &str) -> Result<Netlist, Error> {
    let (n_inputs, n_outputs) = count_tester_pins(source);
    let mut circuit = Circuit::new(n_inputs, n_outputs);
    let mut name = None;
    let mut terminated = false;

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let mut tokens = raw.split_whitespace();
        let Some(verb) = tokens.next() else { continue };
        if verb.starts_with('#') {
            continue;
        }
        match verb {
            "component" => {
                let (kind, child) = two_operands(&mut tokens, line, verb)?;
                match GateKind::from_token(kind) {
                    Some(kind) => {
                        debug!("adding {kind} gate `{child}`");
                        circuit.add_child(child, Gate::new(kind))?;
                    }
                    None => warn!("line {line}: unrecognized gate kind `{kind}`, skipping"),
                }
            }
            "wire" => {
                let (wire, input, child) = three_operands(&mut tokens, line, verb)?;
                let input = parse_index(input, line, verb)?;
                ensure_wire(&mut circuit, wire)?;
                circuit.connect_wire_to_child(wire, child, input)?;
            }
            "connect" => {
                let (child, output, wire) = three_operands(&mut tokens, line, verb)?;
                let output = parse_index(output, line, verb)?;
                ensure_wire(&mut circuit, wire)?;
                circuit.connect_child_to_wire(child, output, wire)?;
            }
            "testerInput" => {
                let wire = one_operand(&mut tokens, line, verb)?;
                ensure_wire(&mut circuit, wire)?;
                circuit.map_input(wire, None)?;
            }
            "testerOutput" => {
                let (child, output) = two_operands(&mut tokens, line, verb)?;
                let output = parse_index(output, line, verb)?;
                circuit.map_output(child, output, None)?;
            }
            "end" => {
                name = tokens.next().map(str::to_owned);
                terminated = true;
                break;
            }
            other => warn!("line {line}: unrecognized directive `{other}`, skipping"),
        }
    }

    if !terminated {
        return Err(Error::MissingEnd);
    }
    Ok(Netlist { name, circuit })
}

fn count_tester_pins(source: &str) -> (usize, usize) {
    let mut inputs = 0;
    let mut outputs = 0;
    for raw in source.lines() {
        match raw.split_whitespace().next() {
            Some("testerInput") => inputs += 1,
            Some("testerOutput") => outputs += 1,
            Some("end") => break,
            _ => {}
        }
    }
    (inputs, outputs)
}

fn ensure_wire(circuit: &mut Circuit, id: &str) -> Result<(), CircuitError> {
    if !circuit.has_wire(id) {
        circuit.add_wire(id)?;
    }
    Ok(())
}

fn malformed(line: usize, verb: &str) -> Error {
    Error::Malformed { line, verb: verb.to_owned() }
}

fn parse_index(token: &str, line: usize, verb: &str) -> Result<usize, Error> {
    token.parse().map_err(|_| malformed(line, verb))
}

fn one_operand<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    line: usize,
    verb: &str,
) -> Result<&'a str, Error> {
    tokens.next().ok_or_else(|| malformed(line, verb))
}

fn two_operands<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    line: usize,
    verb: &str,
) -> Result<(&'a str, &'a str), Error> {
    Ok((one_operand(tokens, line, verb)?, one_operand(tokens, line, verb)?))
}

fn three_operands<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    line: usize,
    verb: &str,
) -> Result<(&'a str, &'a str, &'a str), Error> {
    Ok((
        one_operand(tokens, line, verb)?,
        one_operand(tokens, line, verb)?,
        one_operand(tokens, line, verb)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::level::Level::{High, Low};

    const HALF_ADDER: &str = "\
# half adder from a xor and an and
component xor sum
component and carry

wire a 0 sum
wire a 0 carry
wire b 1 sum
wire b 1 carry

testerInput a
testerInput b
testerOutput sum 0
testerOutput carry 0
end halfAdder
";

    #[test]
    fn parses_and_simulates_a_half_adder() {
        let mut netlist = parse(HALF_ADDER).unwrap();
        assert_eq!(netlist.name.as_deref(), Some("halfAdder"));
        assert_eq!(netlist.circuit.input_len(), 2);
        assert_eq!(netlist.circuit.output_len(), 2);

        netlist.circuit.drive_input(0, High).unwrap();
        netlist.circuit.drive_input(1, High).unwrap();
        assert_eq!(netlist.circuit.output_state(0).unwrap(), Low);
        assert_eq!(netlist.circuit.output_state(1).unwrap(), High);
    }

    #[test]
    fn skips_comments_and_unknown_directives() {
        let source = "\
# leading comment
frobnicate something
component not inv
wire in 0 inv
testerInput in
testerOutput inv 0
end
";
        let mut netlist = parse(source).unwrap();
        assert_eq!(netlist.name, None);
        netlist.circuit.drive_input(0, Low).unwrap();
        assert_eq!(netlist.circuit.output_state(0).unwrap(), High);
    }

    #[test]
    fn skips_unrecognized_gate_kinds() {
        let source = "\
component frob g0
component not inv
wire in 0 inv
testerInput in
testerOutput inv 0
end
";
        let netlist = parse(source).unwrap();
        assert!(!netlist.circuit.has_child("g0"));
        assert!(netlist.circuit.has_child("inv"));
    }

    #[test]
    fn missing_end_is_an_error() {
        assert!(matches!(parse("component and g\n"), Err(Error::MissingEnd)));
    }

    #[test]
    fn malformed_directives_carry_their_line() {
        let err = parse("component and\nend\n").unwrap_err();
        assert_eq!(err, Error::Malformed { line: 1, verb: "component".into() });
    }

    #[test]
    fn build_errors_surface() {
        let source = "\
component and g
component and g
end
";
        assert!(matches!(parse(source), Err(Error::Build(_))));
    }
}
