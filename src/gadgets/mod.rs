//! Prebuilt combinational circuits assembled on the public build API.

mod adders;

pub use adders::{carry_enable_half_adder, full_adder, half_adder, ripple_carry_adder};
