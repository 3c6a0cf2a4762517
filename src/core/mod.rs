pub mod circuit;
pub mod element;
pub mod gate;
pub mod level;
pub mod wire;
