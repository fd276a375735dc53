use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop a program from loading or running.
///
/// None of these are recoverable: the machine never retries, and a faulted
/// machine is left exactly as it was before the failing step.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unmatched '[' at position {position}")]
    UnmatchedOpen { position: usize },

    #[error("unmatched ']' at position {position}")]
    UnmatchedClose { position: usize },

    #[error("memory size must be at least one cell")]
    EmptyMemory,

    #[error("could not allocate {size} cells of memory")]
    Allocation { size: usize },

    #[error("program counter {pc} outside of program of length {len}")]
    ProgramCounterOutOfBounds { pc: usize, len: usize },

    #[error("data pointer moved outside of the tape (pc {pc}, dp {dp}, memory size {size})")]
    DataPointerOutOfBounds { pc: usize, dp: usize, size: usize },

    #[error("step limit of {steps} reached at pc {pc} before the program halted")]
    StepLimit { steps: usize, pc: usize },

    #[error("i/o failed at pc {pc}")]
    Io {
        pc: usize,
        #[source]
        source: io::Error,
    },

    #[error("could not load {}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
