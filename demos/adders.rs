//! Prints the truth tables of the bundled adder gadgets.

use logicsim::{Element, gadgets, tester};

fn print_table(title: &str, element: &mut Element) -> Result<(), logicsim::CircuitError> {
    println!("{title}:");
    for row in tester::truth_table(element)? {
        println!("  {row}");
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    print_table("half adder (A B -> S C)", &mut Element::from(gadgets::half_adder()?))?;
    print_table(
        "full adder (A B Cin -> S Cout)",
        &mut Element::from(gadgets::full_adder()?),
    )?;
    print_table(
        "three-bit adder (A0..A2 B0..B2 -> S0..S2 Cout)",
        &mut Element::from(gadgets::ripple_carry_adder(3)?),
    )?;
    Ok(())
}
