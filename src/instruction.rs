use std::fmt;

/// A decoded instruction word.
///
/// `x` and `y` are register indices (`0x0..=0xF`), `nn` an 8-bit immediate
/// and `nnn` a 12-bit address. Words that match no known pattern decode to
/// [`Instruction::Unknown`] so that every 16-bit value has a representation.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0`
    ClearDisplay,
    /// `00EE`
    Return,
    /// `1NNN`
    Jump { nnn: u16 },
    /// `2NNN`
    Call { nnn: u16 },
    /// `3XNN`
    SkipIfEqual { x: usize, nn: u8 },
    /// `4XNN`
    SkipIfNotEqual { x: usize, nn: u8 },
    /// `5XY0`
    SkipIfRegistersEqual { x: usize, y: usize },
    /// `6XNN`
    Load { x: usize, nn: u8 },
    /// `7XNN`
    AddImmediate { x: usize, nn: u8 },
    /// `8XY0`
    Copy { x: usize, y: usize },
    /// `8XY1`
    Or { x: usize, y: usize },
    /// `8XY2`
    And { x: usize, y: usize },
    /// `8XY3`
    Xor { x: usize, y: usize },
    /// `8XY4`
    AddWithCarry { x: usize, y: usize },
    /// `8XY5`
    SubWithBorrow { x: usize, y: usize },
    /// `8XY6`
    ShiftRight { x: usize },
    /// `8XY7`
    ReverseSub { x: usize, y: usize },
    /// `8XYE`
    ShiftLeft { x: usize },
    /// `9XY0`
    SkipIfRegistersNotEqual { x: usize, y: usize },
    /// `ANNN`
    SetIndex { nnn: u16 },
    /// `BNNN`
    JumpWithOffset { nnn: u16 },
    /// `CXNN`
    Random { x: usize, nn: u8 },
    /// `DXYN`
    Draw { x: usize, y: usize, height: u8 },
    /// `EX9E`
    SkipIfKeyPressed { x: usize },
    /// `EXA1`
    SkipIfKeyNotPressed { x: usize },
    /// `FX07`
    ReadDelay { x: usize },
    /// `FX0A`
    WaitForKey { x: usize },
    /// `FX15`
    SetDelay { x: usize },
    /// `FX18`
    SetSound { x: usize },
    /// `FX1E`
    AddToIndex { x: usize },
    /// `FX29`
    IndexFromDigit { x: usize },
    /// `FX33`
    StoreBcd { x: usize },
    /// `FX55`
    StoreRegisters { x: usize },
    /// `FX65`
    LoadRegisters { x: usize },
    Unknown(u16),
}

impl From<u16> for Instruction {
    fn from(word: u16) -> Self {
        let x = usize::from((word >> 8) & 0xF);
        let y = usize::from((word >> 4) & 0xF);
        let n = (word & 0xF) as u8;
        let nn = (word & 0xFF) as u8;
        let nnn = word & 0xFFF;

        match (word >> 12, n) {
            (0x0, _) => match nnn {
                0x0E0 => Self::ClearDisplay,
                0x0EE => Self::Return,
                _ => Self::Unknown(word),
            },
            (0x1, _) => Self::Jump { nnn },
            (0x2, _) => Self::Call { nnn },
            (0x3, _) => Self::SkipIfEqual { x, nn },
            (0x4, _) => Self::SkipIfNotEqual { x, nn },
            (0x5, 0x0) => Self::SkipIfRegistersEqual { x, y },
            (0x6, _) => Self::Load { x, nn },
            (0x7, _) => Self::AddImmediate { x, nn },
            (0x8, 0x0) => Self::Copy { x, y },
            (0x8, 0x1) => Self::Or { x, y },
            (0x8, 0x2) => Self::And { x, y },
            (0x8, 0x3) => Self::Xor { x, y },
            (0x8, 0x4) => Self::AddWithCarry { x, y },
            (0x8, 0x5) => Self::SubWithBorrow { x, y },
            (0x8, 0x6) => Self::ShiftRight { x },
            (0x8, 0x7) => Self::ReverseSub { x, y },
            (0x8, 0xE) => Self::ShiftLeft { x },
            (0x9, 0x0) => Self::SkipIfRegistersNotEqual { x, y },
            (0xA, _) => Self::SetIndex { nnn },
            (0xB, _) => Self::JumpWithOffset { nnn },
            (0xC, _) => Self::Random { x, nn },
            (0xD, height) => Self::Draw { x, y, height },
            (0xE, _) => match nn {
                0x9E => Self::SkipIfKeyPressed { x },
                0xA1 => Self::SkipIfKeyNotPressed { x },
                _ => Self::Unknown(word),
            },
            (0xF, _) => match nn {
                0x07 => Self::ReadDelay { x },
                0x0A => Self::WaitForKey { x },
                0x15 => Self::SetDelay { x },
                0x18 => Self::SetSound { x },
                0x1E => Self::AddToIndex { x },
                0x29 => Self::IndexFromDigit { x },
                0x33 => Self::StoreBcd { x },
                0x55 => Self::StoreRegisters { x },
                0x65 => Self::LoadRegisters { x },
                _ => Self::Unknown(word),
            },
            _ => Self::Unknown(word),
        }
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ClearDisplay => write!(f, "CLS"),
            Self::Return => write!(f, "RET"),
            Self::Jump { nnn } => write!(f, "JP {nnn:03X}"),
            Self::Call { nnn } => write!(f, "CALL {nnn:03X}"),
            Self::SkipIfEqual { x, nn } => write!(f, "SE V{x:X}, {nn:02X}"),
            Self::SkipIfNotEqual { x, nn } => write!(f, "SNE V{x:X}, {nn:02X}"),
            Self::SkipIfRegistersEqual { x, y } => write!(f, "SE V{x:X}, V{y:X}"),
            Self::Load { x, nn } => write!(f, "LD V{x:X}, {nn:02X}"),
            Self::AddImmediate { x, nn } => write!(f, "ADD V{x:X}, {nn:02X}"),
            Self::Copy { x, y } => write!(f, "LD V{x:X}, V{y:X}"),
            Self::Or { x, y } => write!(f, "OR V{x:X}, V{y:X}"),
            Self::And { x, y } => write!(f, "AND V{x:X}, V{y:X}"),
            Self::Xor { x, y } => write!(f, "XOR V{x:X}, V{y:X}"),
            Self::AddWithCarry { x, y } => write!(f, "ADD V{x:X}, V{y:X}"),
            Self::SubWithBorrow { x, y } => write!(f, "SUB V{x:X}, V{y:X}"),
            Self::ShiftRight { x } => write!(f, "SHR V{x:X}"),
            Self::ReverseSub { x, y } => write!(f, "SUBN V{x:X}, V{y:X}"),
            Self::ShiftLeft { x } => write!(f, "SHL V{x:X}"),
            Self::SkipIfRegistersNotEqual { x, y } => write!(f, "SNE V{x:X}, V{y:X}"),
            Self::SetIndex { nnn } => write!(f, "LD I, {nnn:03X}"),
            Self::JumpWithOffset { nnn } => write!(f, "JP V0, {nnn:03X}"),
            Self::Random { x, nn } => write!(f, "RND V{x:X}, {nn:02X}"),
            Self::Draw { x, y, height } => write!(f, "DRW V{x:X}, V{y:X}, {height:X}"),
            Self::SkipIfKeyPressed { x } => write!(f, "SKP V{x:X}"),
            Self::SkipIfKeyNotPressed { x } => write!(f, "SKNP V{x:X}"),
            Self::ReadDelay { x } => write!(f, "LD V{x:X}, DT"),
            Self::WaitForKey { x } => write!(f, "LD V{x:X}, K"),
            Self::SetDelay { x } => write!(f, "LD DT, V{x:X}"),
            Self::SetSound { x } => write!(f, "LD ST, V{x:X}"),
            Self::AddToIndex { x } => write!(f, "ADD I, V{x:X}"),
            Self::IndexFromDigit { x } => write!(f, "LD F, V{x:X}"),
            Self::StoreBcd { x } => write!(f, "LD B, V{x:X}"),
            Self::StoreRegisters { x } => write!(f, "LD [I], V{x:X}"),
            Self::LoadRegisters { x } => write!(f, "LD V{x:X}, [I]"),
            Self::Unknown(word) => write!(f, "??? {word:04X}"),
        }
    }
}
