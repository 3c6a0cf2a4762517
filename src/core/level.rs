use std::fmt;

use serde::{Deserialize, Serialize};

/// Signal level on a single pin.
///
/// Every pin starts out `Undefined`, and `Undefined` dominates any gate it
/// feeds: a gate with an undefined operand settles to an undefined output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    #[default]
    Undefined,
    Low,
    High,
}

impl Level {
    /// Defined levels as a boolean, `None` for `Undefined`.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Level::Undefined => None,
            Level::Low => Some(false),
            Level::High => Some(true),
        }
    }

    pub fn is_defined(self) -> bool {
        self != Level::Undefined
    }
}

impl From<bool> for Level {
    fn from(value: bool) -> Self {
        if value { Level::High } else { Level::Low }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Level::Undefined => 'X',
            Level::Low => '0',
            Level::High => '1',
        };
        write!(f, "{c}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_pins_are_undefined() {
        assert_eq!(Level::default(), Level::Undefined);
        assert_eq!(Level::default().as_bool(), None);
    }

    #[test]
    fn bool_round_trip() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
        assert_eq!(Level::High.as_bool(), Some(true));
        assert_eq!(Level::Low.as_bool(), Some(false));
    }

    #[test]
    fn display_uses_hardware_notation() {
        assert_eq!(format!("{}{}{}", Level::Low, Level::High, Level::Undefined), "01X");
    }
}
