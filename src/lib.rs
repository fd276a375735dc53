pub mod config;
pub mod error;
pub mod io;
pub mod jump;
pub mod loader;
pub mod machine;
pub mod opcode;

pub use config::{DEFAULT_MEMORY_SIZE, EofPolicy, MachineConfig};
pub use error::{Error, Result};
pub use io::{BufferIo, FnIo, Io, StreamIo};
pub use machine::{Machine, Outcome};
