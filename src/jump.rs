use crate::error::{Error, Result};
use crate::opcode::Opcode;

/// Precomputed loop partners for every position of a program.
///
/// `target(i)` is the matching bracket for a `[` or `]` at `i`. Every other
/// position maps to itself and is never consulted by the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpTable {
    targets: Vec<usize>,
}

impl JumpTable {
    /// Matching bracket for the bracket at `pc`.
    #[inline]
    pub fn target(&self, pc: usize) -> usize {
        self.targets[pc]
    }

    /// Matched `(open, close)` pairs in order of their opening bracket.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.targets
            .iter()
            .enumerate()
            .filter(|&(i, &t)| t > i)
            .map(|(i, &t)| (i, t))
    }
}

/// Resolve every loop bracket of `instructions` to its partner.
///
/// All brackets are matched up front, so an unbalanced program is rejected
/// before it executes a single step. The first unmatched `]` (scanning left to
/// right) is reported; otherwise the innermost unmatched `[`.
pub fn resolve(instructions: &[u8]) -> Result<JumpTable> {
    let mut targets: Vec<usize> = (0..instructions.len()).collect();
    let mut stack = Vec::new();

    for (i, &byte) in instructions.iter().enumerate() {
        match Opcode::decode(byte) {
            Some(Opcode::Open) => stack.push(i),
            Some(Opcode::Close) => {
                let open = stack.pop().ok_or(Error::UnmatchedClose { position: i })?;
                targets[open] = i;
                targets[i] = open;
            }
            _ => {}
        }
    }

    if let Some(position) = stack.pop() {
        return Err(Error::UnmatchedOpen { position });
    }

    Ok(JumpTable { targets })
}
