use tracing::{debug, trace};

use crate::config::{EofPolicy, MachineConfig};
use crate::error::{Error, Result};
use crate::io::Io;
use crate::jump::{self, JumpTable};
use crate::opcode::Opcode;

/// How a bounded run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The program counter ran off the end of the program.
    Halted { steps: usize },
    /// The step budget was used up first.
    StepLimit { steps: usize },
}

/// A loaded program together with its tape and machine state.
///
/// Execution is one instruction at a time through [`Machine::step`]; the
/// machine halts once the program counter reaches the end of the program.
/// There is no halt instruction.
///
/// The data pointer never leaves the tape: a move that would take it off
/// either end fails before anything is changed.
#[derive(Debug)]
pub struct Machine<I> {
    instructions: Box<[u8]>,
    jumps: JumpTable,
    memory: Box<[u8]>,
    pc: usize,
    dp: usize,
    steps: usize,
    eof: EofPolicy,
    io: I,
}

impl<I: Io> Machine<I> {
    /// Load `instructions` onto a fresh machine.
    ///
    /// Fails if the brackets do not balance, or if the tape cannot be
    /// allocated. Nothing is executed.
    pub fn new(instructions: &[u8], config: MachineConfig, io: I) -> Result<Self> {
        if config.memory_size == 0 {
            return Err(Error::EmptyMemory);
        }
        let jumps = jump::resolve(instructions)?;
        let memory = allocate(config.memory_size)?;

        debug!(
            instructions = instructions.len(),
            loops = jumps.pairs().count(),
            memory_size = config.memory_size,
            eof = ?config.eof,
            "program loaded"
        );

        Ok(Self {
            instructions: instructions.into(),
            jumps,
            memory,
            pc: 0,
            dp: 0,
            steps: 0,
            eof: config.eof,
            io,
        })
    }

    /// Execute the instruction at the program counter.
    ///
    /// On error the machine is left exactly as it was before the call.
    pub fn step(&mut self) -> Result<()> {
        let pc = self.pc;
        let len = self.instructions.len();
        if pc >= len {
            return Err(Error::ProgramCounterOutOfBounds { pc, len });
        }
        let size = self.memory.len();
        if self.dp >= size {
            return Err(Error::DataPointerOutOfBounds { pc, dp: self.dp, size });
        }

        match Opcode::decode(self.instructions[pc]) {
            Some(Opcode::Right) => {
                if self.dp + 1 >= size {
                    return Err(Error::DataPointerOutOfBounds { pc, dp: self.dp, size });
                }
                self.dp += 1;
            }
            Some(Opcode::Left) => {
                if self.dp == 0 {
                    return Err(Error::DataPointerOutOfBounds { pc, dp: self.dp, size });
                }
                self.dp -= 1;
            }
            Some(Opcode::Inc) => {
                let cell = &mut self.memory[self.dp];
                *cell = cell.wrapping_add(1);
            }
            Some(Opcode::Dec) => {
                let cell = &mut self.memory[self.dp];
                *cell = cell.wrapping_sub(1);
            }
            Some(Opcode::Output) => {
                self.io
                    .write(self.memory[self.dp])
                    .map_err(|source| Error::Io { pc, source })?;
            }
            Some(Opcode::Input) => {
                let byte = self.io.read().map_err(|source| Error::Io { pc, source })?;
                if let Some(value) = byte.or(self.eof.value()) {
                    self.memory[self.dp] = value;
                }
            }
            Some(Opcode::Open) => {
                if self.memory[self.dp] == 0 {
                    self.pc = self.jumps.target(pc);
                    trace!(from = pc, to = self.pc, "skip loop");
                }
            }
            Some(Opcode::Close) => {
                if self.memory[self.dp] != 0 {
                    self.pc = self.jumps.target(pc);
                    trace!(from = pc, to = self.pc, "repeat loop");
                }
            }
            None => {}
        }

        // Jumps land on the partner bracket; this moves past it.
        self.pc += 1;
        self.steps += 1;
        Ok(())
    }

    /// Run until the program halts.
    ///
    /// Returns the number of steps executed by this call. Output is flushed
    /// whether the run halts or faults.
    pub fn run(&mut self) -> Result<usize> {
        let start = self.steps;
        let result = self.drive(None);
        self.finish(result)?;
        debug!(steps = self.steps - start, "program halted");
        Ok(self.steps - start)
    }

    /// Run for at most `step_limit` steps.
    pub fn run_for(&mut self, step_limit: usize) -> Result<Outcome> {
        let start = self.steps;
        let result = self.drive(Some(step_limit));
        self.finish(result)?;
        let steps = self.steps - start;
        if self.is_halted() {
            debug!(steps, "program halted");
            Ok(Outcome::Halted { steps })
        } else {
            debug!(steps, step_limit, "step limit reached");
            Ok(Outcome::StepLimit { steps })
        }
    }

    /// Step until halted, or until `step_limit` steps if one is given.
    fn drive(&mut self, step_limit: Option<usize>) -> Result<()> {
        let mut budget = step_limit;
        while !self.is_halted() {
            if let Some(left) = budget.as_mut() {
                if *left == 0 {
                    break;
                }
                *left -= 1;
            }
            self.step()?;
        }
        Ok(())
    }

    fn finish(&mut self, result: Result<()>) -> Result<()> {
        let flushed = self.io.flush().map_err(|source| Error::Io { pc: self.pc, source });
        result.and(flushed)
    }

    /// True once the program counter has run off the end of the program.
    pub fn is_halted(&self) -> bool {
        self.pc >= self.instructions.len()
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn dp(&self) -> usize {
        self.dp
    }

    /// Total steps executed since loading.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    pub fn instructions(&self) -> &[u8] {
        &self.instructions
    }

    pub fn jump_table(&self) -> &JumpTable {
        &self.jumps
    }

    pub fn io(&self) -> &I {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut I {
        &mut self.io
    }

    pub fn into_io(self) -> I {
        self.io
    }
}

/// Zeroed tape, reporting allocation failure instead of aborting.
fn allocate(size: usize) -> Result<Box<[u8]>> {
    let mut memory = Vec::new();
    memory
        .try_reserve_exact(size)
        .map_err(|_| Error::Allocation { size })?;
    memory.resize(size, 0);
    Ok(memory.into_boxed_slice())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::io::BufferIo;
    use proptest::prelude::*;

    fn program() -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(prop::sample::select(b"><+-.,[]x".to_vec()), 0..64)
    }

    proptest! {
        #[test]
        fn random_programs_never_panic(
            code in program(),
            input in prop::collection::vec(any::<u8>(), 0..8),
            memory_size in 1usize..16,
        ) {
            let config = MachineConfig { memory_size, ..Default::default() };
            let Ok(mut m) = Machine::new(&code, config, BufferIo::new(input)) else {
                return Ok(());
            };
            for _ in 0..2000 {
                if m.is_halted() {
                    break;
                }
                let before = (m.pc(), m.dp(), m.memory().to_vec(), m.steps());
                match m.step() {
                    Ok(()) => prop_assert!(m.dp() < memory_size),
                    Err(Error::DataPointerOutOfBounds { .. }) => {
                        let after = (m.pc(), m.dp(), m.memory().to_vec(), m.steps());
                        prop_assert_eq!(before, after);
                        break;
                    }
                    Err(e) => prop_assert!(false, "unexpected error: {e}"),
                }
            }
        }

        #[test]
        fn run_for_respects_step_limit(code in program(), limit in 0usize..500) {
            let config = MachineConfig { memory_size: 8, ..Default::default() };
            if let Ok(mut m) = Machine::new(&code, config, BufferIo::default()) {
                match m.run_for(limit) {
                    Ok(Outcome::Halted { steps }) | Ok(Outcome::StepLimit { steps }) => {
                        prop_assert!(steps <= limit);
                    }
                    Err(e) => prop_assert!(
                        matches!(e, Error::DataPointerOutOfBounds { .. }),
                        "unexpected error: {}",
                        e
                    ),
                }
            }
        }

        #[test]
        fn cell_arithmetic_wraps(n in 0usize..600) {
            let code = vec![b'+'; n];
            let mut m = Machine::new(&code, MachineConfig { memory_size: 1, ..Default::default() }, BufferIo::default()).unwrap();
            m.run().unwrap();
            prop_assert_eq!(m.memory()[0] as usize, n % 256);
        }
    }
}
