/// The eight meaningful instruction bytes.
///
/// Every other byte value is a comment and executes as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Right,
    Left,
    Inc,
    Dec,
    Output,
    Input,
    Open,
    Close,
}

const GREATER: u8 = b'>';
const LESS: u8 = b'<';
const PLUS: u8 = b'+';
const MINUS: u8 = b'-';
const DOT: u8 = b'.';
const COMMA: u8 = b',';
const LBRACKET: u8 = b'[';
const RBRACKET: u8 = b']';

impl Opcode {
    /// Decode a single byte, or `None` if the byte is not an instruction.
    #[inline]
    pub fn decode(byte: u8) -> Option<Self> {
        match byte {
            GREATER => Some(Opcode::Right),
            LESS => Some(Opcode::Left),
            PLUS => Some(Opcode::Inc),
            MINUS => Some(Opcode::Dec),
            DOT => Some(Opcode::Output),
            COMMA => Some(Opcode::Input),
            LBRACKET => Some(Opcode::Open),
            RBRACKET => Some(Opcode::Close),
            _ => None,
        }
    }
}
