use crate::core::{
    circuit::{Circuit, Error},
    gate::Gate,
};

/// Half adder. Inputs: A, B. Outputs: sum, carry.
pub fn half_adder() -> Result<Circuit, Error> {
    let mut circuit = Circuit::new(2, 2);
    circuit.add_child("xor", Gate::xor())?;
    circuit.add_child("and", Gate::and())?;
    circuit.add_wire("a")?;
    circuit.add_wire("b")?;

    circuit.connect_wire_to_child("a", "xor", 0)?;
    circuit.connect_wire_to_child("a", "and", 0)?;
    circuit.connect_wire_to_child("b", "xor", 1)?;
    circuit.connect_wire_to_child("b", "and", 1)?;

    circuit.map_input("a", Some(0))?;
    circuit.map_input("b", Some(1))?;
    circuit.map_output("xor", 0, Some(0))?;
    circuit.map_output("and", 0, Some(1))?;
    Ok(circuit)
}

/// Full adder. Inputs: A, B, Cin. Outputs: sum, carry-out.
///
/// Built from two xors, two ands and an or: sum = (A^B)^Cin,
/// carry = (Cin & (A^B)) | (A & B).
pub fn full_adder() -> Result<Circuit, Error> {
    let mut circuit = Circuit::new(3, 2);
    circuit.add_child("xor_ab", Gate::xor())?;
    circuit.add_child("xor_sum", Gate::xor())?;
    circuit.add_child("and_ab", Gate::and())?;
    circuit.add_child("and_cin", Gate::and())?;
    circuit.add_child("or_carry", Gate::or())?;
    for wire in ["a", "b", "cin", "p", "g1", "g2"] {
        circuit.add_wire(wire)?;
    }

    circuit.connect_wire_to_child("a", "xor_ab", 0)?;
    circuit.connect_wire_to_child("a", "and_ab", 0)?;
    circuit.connect_wire_to_child("b", "xor_ab", 1)?;
    circuit.connect_wire_to_child("b", "and_ab", 1)?;
    circuit.connect_wire_to_child("cin", "xor_sum", 1)?;
    circuit.connect_wire_to_child("cin", "and_cin", 0)?;

    // A^B feeds both the sum xor and the carry chain.
    circuit.connect_child_to_wire("xor_ab", 0, "p")?;
    circuit.connect_wire_to_child("p", "xor_sum", 0)?;
    circuit.connect_wire_to_child("p", "and_cin", 1)?;

    circuit.connect_child_to_wire("and_cin", 0, "g1")?;
    circuit.connect_child_to_wire("and_ab", 0, "g2")?;
    circuit.connect_wire_to_child("g1", "or_carry", 0)?;
    circuit.connect_wire_to_child("g2", "or_carry", 1)?;

    circuit.map_input("a", Some(0))?;
    circuit.map_input("b", Some(1))?;
    circuit.map_input("cin", Some(2))?;
    circuit.map_output("xor_sum", 0, Some(0))?;
    circuit.map_output("or_carry", 0, Some(1))?;
    Ok(circuit)
}

/// N-bit ripple-carry adder: a half adder for bit 0 and a full adder per
/// higher bit, carries chained through internal wires.
///
/// Inputs: A bits at 0..n, B bits at n..2n (least significant first).
/// Outputs: sum bits at 0..n, carry-out at n.
pub fn ripple_carry_adder(n_bits: usize) -> Result<Circuit, Error> {
    assert!(n_bits >= 1, "an adder needs at least one bit");

    let mut circuit = Circuit::new(2 * n_bits, n_bits + 1);

    for bit in 0..n_bits {
        let stage = if bit == 0 {
            half_adder()?
        } else {
            full_adder()?
        };
        circuit.add_child(format!("add{bit}"), stage)?;
        circuit.add_wire(format!("a{bit}"))?;
        circuit.add_wire(format!("b{bit}"))?;

        circuit.connect_wire_to_child(&format!("a{bit}"), &format!("add{bit}"), 0)?;
        circuit.connect_wire_to_child(&format!("b{bit}"), &format!("add{bit}"), 1)?;
        circuit.map_input(&format!("a{bit}"), Some(bit))?;
        circuit.map_input(&format!("b{bit}"), Some(n_bits + bit))?;
        circuit.map_output(&format!("add{bit}"), 0, Some(bit))?;

        if bit > 0 {
            // Carry out of the previous stage rides into input 2.
            let carry = format!("c{bit}");
            circuit.add_wire(&carry)?;
            circuit.connect_child_to_wire(&format!("add{}", bit - 1), 1, &carry)?;
            circuit.connect_wire_to_child(&carry, &format!("add{bit}"), 2)?;
        }
    }

    circuit.map_output(&format!("add{}", n_bits - 1), 1, Some(n_bits))?;
    Ok(circuit)
}

/// Half adder whose carry output is gated by an enable line. Inputs: A, B,
/// enable. Outputs: sum, gated carry. Mixes a nested circuit child with a
/// plain gate child.
pub fn carry_enable_half_adder() -> Result<Circuit, Error> {
    let mut circuit = Circuit::new(3, 2);
    circuit.add_child("ha", half_adder()?)?;
    circuit.add_child("gate", Gate::and())?;
    for wire in ["a", "b", "en", "carry"] {
        circuit.add_wire(wire)?;
    }

    circuit.connect_wire_to_child("a", "ha", 0)?;
    circuit.connect_wire_to_child("b", "ha", 1)?;
    circuit.connect_wire_to_child("en", "gate", 1)?;
    circuit.connect_child_to_wire("ha", 1, "carry")?;
    circuit.connect_wire_to_child("carry", "gate", 0)?;

    circuit.map_input("a", Some(0))?;
    circuit.map_input("b", Some(1))?;
    circuit.map_input("en", Some(2))?;
    circuit.map_output("ha", 0, Some(0))?;
    circuit.map_output("gate", 0, Some(1))?;
    Ok(circuit)
}
