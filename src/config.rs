/// Conventional tape length for this language.
pub const DEFAULT_MEMORY_SIZE: usize = 30_000;

/// What `,` stores once the input is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum EofPolicy {
    /// Store 255, i.e. -1 truncated to a cell.
    #[default]
    MinusOne,
    /// Store 0.
    Zero,
    /// Leave the current cell untouched.
    Unchanged,
}

impl EofPolicy {
    /// The value to store at end of input, or `None` to keep the cell as is.
    pub fn value(self) -> Option<u8> {
        match self {
            EofPolicy::MinusOne => Some(u8::MAX),
            EofPolicy::Zero => Some(0),
            EofPolicy::Unchanged => None,
        }
    }
}

/// Configuration for a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineConfig {
    /// Number of cells on the tape. Must be at least 1.
    pub memory_size: usize,
    /// End-of-input behaviour of `,`.
    pub eof: EofPolicy,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            eof: EofPolicy::MinusOne,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MachineConfig::default();
        assert_eq!(config.memory_size, 30_000);
        assert_eq!(config.eof, EofPolicy::MinusOne);
    }

    #[test]
    fn test_eof_values() {
        assert_eq!(EofPolicy::MinusOne.value(), Some(255));
        assert_eq!(EofPolicy::Zero.value(), Some(0));
        assert_eq!(EofPolicy::Unchanged.value(), None);
    }
}
