//! Reads a netlist from stdin, builds the circuit and dumps its truth
//! table as JSON.
//!
//! Try: `cargo run --example netlist < halfadder.txt`

use std::io::Read;

use logicsim::{Element, netlist, tester};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let mut source = String::new();
    std::io::stdin().read_to_string(&mut source)?;

    let parsed = netlist::parse(&source)?;
    if let Some(name) = &parsed.name {
        log::info!("built circuit `{name}`");
    }

    let mut element = Element::from(parsed.circuit);
    let table = tester::truth_table(&mut element)?;
    println!("{}", serde_json::to_string_pretty(&table)?);
    Ok(())
}
