/// Errors that can occur during wire operations
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The wire already drives its maximum number of sinks
    #[error("wire fan-out limit of {0} sinks reached")]
    CapacityExceeded(usize),
}
pub type WireError = Error;

/// Maximum number of gate inputs a single wire output may drive.
pub const MAX_FANOUT: usize = 2;

/// One downstream connection of a wire: which child of the owning circuit,
/// and which of that child's inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sink {
    pub child: String,
    pub input: usize,
}

/// Single-driver conduit fanning one level out to at most [`MAX_FANOUT`]
/// sinks.
///
/// A wire stores handles (child identifier plus input index) into the
/// owning circuit's child table rather than references; the circuit's
/// propagation loop resolves them when the wire is driven.
#[derive(Clone, Debug, Default)]
pub struct Wire {
    sinks: Vec<Sink>,
}

impl Wire {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Registers a new sink. The sink observes nothing until the wire is
    /// next driven.
    pub fn connect(&mut self, child: impl Into<String>, input: usize) -> Result<(), Error> {
        if self.sinks.len() == MAX_FANOUT {
            return Err(Error::CapacityExceeded(MAX_FANOUT));
        }
        self.sinks.push(Sink { child: child.into(), input });
        Ok(())
    }

    pub fn sinks(&self) -> &[Sink] {
        &self.sinks
    }
}
