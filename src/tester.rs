//! Test-vector driver: exhaustive truth-table sweeps over any logic
//! element.

use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use crate::core::{circuit::CircuitError, element::Element, level::Level};

/// One settled row of a truth table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VectorRow {
    pub inputs: Vec<Level>,
    pub outputs: Vec<Level>,
}

impl fmt::Display for VectorRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for level in &self.inputs {
            write!(f, "{level}")?;
        }
        write!(f, " -> ")?;
        for level in &self.outputs {
            write!(f, "{level}")?;
        }
        Ok(())
    }
}

/// Drives the given input levels in pin order and reads back every output.
pub fn drive_and_read(element: &mut Element, inputs: &[Level]) -> Result<VectorRow, CircuitError> {
    for (index, &level) in inputs.iter().enumerate() {
        element.drive_input(index, level)?;
    }
    let outputs = (0..element.output_len())
        .map(|index| element.output_state(index))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(VectorRow { inputs: inputs.to_vec(), outputs })
}

/// Sweeps every combination of defined levels over the element's inputs
/// and records the settled outputs, one row per combination in
/// lexicographic order (Low before High).
pub fn truth_table(element: &mut Element) -> Result<Vec<VectorRow>, CircuitError> {
    itertools::repeat_n([Level::Low, Level::High], element.input_len())
        .multi_cartesian_product()
        .map(|inputs| drive_and_read(element, &inputs))
        .collect()
}
