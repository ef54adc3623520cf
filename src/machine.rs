use crate::{
    alu,
    display::Framebuffer,
    error::{Error, Result},
    font,
    instruction::Instruction,
    keypad::{Capture, Keypad},
    timer::Timers,
};
use log::{debug, info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{fs, path::Path};

const STACK_DEPTH: usize = 16;

wrapper! {
    Memory => Interpreter::MEMORY_SIZE,
    RegisterArray => Interpreter::REGISTER_COUNT
}

#[derive(Debug)]
pub struct Interpreter {
    i: u16,                      // Index register
    pc: u16,                     // Program counter
    sp: usize,                   // Stack pointer
    stack: [u16; STACK_DEPTH],   // Return addresses
    memory: Memory,              // Memory
    registers: RegisterArray,    // Variable registers (V0..=VF)
    timers: Timers,              // Delay and sound timers
    framebuffer: Framebuffer,    // Display
    keypad: Keypad,              // Input latch
    rng: StdRng,                 // Source for CXNN
}

impl Interpreter {
    pub const MEMORY_SIZE: usize = 4096;
    pub const MEMORY_OFFSET: usize = 0x200;
    pub const MAX_ROM_SIZE: usize = Self::MEMORY_SIZE - Self::MEMORY_OFFSET;
    pub const REGISTER_COUNT: usize = 16;
    pub const STACK_SIZE: usize = STACK_DEPTH;

    const ADDRESS_MASK: u16 = 0x0FFF;
    const FLAG: usize = 0xF;

    /// A freshly powered-on machine with the font installed and the random
    /// source seeded from the OS.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Like [`Interpreter::new`], but `CXNN` draws from a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut memory = Memory::default();
        memory[font::MEMORY_RANGE].copy_from_slice(font::FONT);
        Self {
            i: 0,
            pc: Self::MEMORY_OFFSET as u16,
            sp: 0,
            stack: [0; STACK_DEPTH],
            memory,
            registers: RegisterArray::default(),
            timers: Timers::default(),
            framebuffer: Framebuffer::new(),
            keypad: Keypad::new(),
            rng,
        }
    }

    /// Copies a program image to the load address.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        if rom.len() > Self::MAX_ROM_SIZE {
            return Err(Error::CapacityExceeded {
                size: rom.len(),
                capacity: Self::MAX_ROM_SIZE,
            });
        }
        self.memory[Self::MEMORY_OFFSET..Self::MEMORY_OFFSET + rom.len()].copy_from_slice(rom);
        info!("Loaded ROM [size: {}]", rom.len());
        Ok(())
    }

    pub fn load_rom_file(&mut self, path: &Path) -> Result<()> {
        let rom = fs::read(path).map_err(|source| Error::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_rom(&rom)
    }

    /// Runs a single fetch-decode-execute cycle. Does nothing while an
    /// `FX0A` is waiting for a key.
    pub fn step(&mut self) -> Result<()> {
        if self.keypad.is_waiting() {
            return Ok(());
        }
        let pc = self.pc;
        let inst = self.decode();
        debug!("Executing instruction [{:?}] at [{:#05X}]", inst, pc);
        self.execute(inst, pc)
    }

    /// Records a key edge from the input source. A key-down completes a
    /// pending `FX0A`.
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        if let Some(Capture { register, key }) = self.keypad.set(key, pressed) {
            self.registers[register] = key;
            self.pc = (self.pc + 2) & Self::ADDRESS_MASK;
            debug!("Captured key {key:X} into V{register:X}");
        }
    }

    /// Advances both timers by one 60 Hz interval.
    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    /// Checks and clears the redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        self.framebuffer.take_dirty()
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn registers(&self) -> &[u8; Self::REGISTER_COUNT] {
        &self.registers
    }

    pub fn memory(&self) -> &[u8; Self::MEMORY_SIZE] {
        &self.memory
    }

    pub fn stack(&self) -> &[u16] {
        &self.stack[..self.sp]
    }

    pub fn timers(&self) -> Timers {
        self.timers
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    fn fetch(&mut self) -> u16 {
        let inst = u16::from_be_bytes([self.read(self.pc), self.read(self.pc.wrapping_add(1))]);
        self.pc = (self.pc + 2) & Self::ADDRESS_MASK;
        inst
    }

    fn decode(&mut self) -> Instruction {
        Instruction::from(self.fetch())
    }

    fn execute(&mut self, inst: Instruction, at: u16) -> Result<()> {
        match inst {
            Instruction::ClearDisplay => self.framebuffer.clear(),
            Instruction::Return => {
                if self.sp == 0 {
                    return Err(Error::StackUnderflow { pc: at });
                }
                self.sp -= 1;
                self.pc = self.stack[self.sp];
            }
            Instruction::Jump { nnn } => self.pc = nnn,
            Instruction::Call { nnn } => {
                if self.sp == Self::STACK_SIZE {
                    return Err(Error::StackOverflow { pc: at });
                }
                self.stack[self.sp] = self.pc;
                self.sp += 1;
                self.pc = nnn;
            }
            Instruction::SkipIfEqual { x, nn } => self.skip_if(self.registers[x] == nn),
            Instruction::SkipIfNotEqual { x, nn } => self.skip_if(self.registers[x] != nn),
            Instruction::SkipIfRegistersEqual { x, y } => {
                self.skip_if(self.registers[x] == self.registers[y])
            }
            Instruction::SkipIfRegistersNotEqual { x, y } => {
                self.skip_if(self.registers[x] != self.registers[y])
            }
            Instruction::Load { x, nn } => self.registers[x] = nn,
            Instruction::AddImmediate { x, nn } => {
                self.registers[x] = self.registers[x].wrapping_add(nn)
            }
            Instruction::Copy { x, y } => self.registers[x] = self.registers[y],
            Instruction::Or { x, y } => self.registers[x] |= self.registers[y],
            Instruction::And { x, y } => self.registers[x] &= self.registers[y],
            Instruction::Xor { x, y } => self.registers[x] ^= self.registers[y],
            Instruction::AddWithCarry { x, y } => {
                self.set_with_flag(x, alu::add(self.registers[x], self.registers[y]))
            }
            Instruction::SubWithBorrow { x, y } => {
                self.set_with_flag(x, alu::sub(self.registers[x], self.registers[y]))
            }
            Instruction::ReverseSub { x, y } => {
                self.set_with_flag(x, alu::sub_reversed(self.registers[x], self.registers[y]))
            }
            Instruction::ShiftRight { x } => self.set_with_flag(x, alu::shift_right(self.registers[x])),
            Instruction::ShiftLeft { x } => self.set_with_flag(x, alu::shift_left(self.registers[x])),
            Instruction::SetIndex { nnn } => self.i = nnn,
            Instruction::JumpWithOffset { nnn } => {
                self.pc = (nnn + u16::from(self.registers[0])) & Self::ADDRESS_MASK
            }
            Instruction::Random { x, nn } => self.registers[x] = self.rng.gen::<u8>() & nn,
            Instruction::Draw { x, y, height } => self.draw_sprite(x, y, height),
            Instruction::SkipIfKeyPressed { x } => {
                self.skip_if(self.keypad.is_pressed(self.registers[x]))
            }
            Instruction::SkipIfKeyNotPressed { x } => {
                self.skip_if(!self.keypad.is_pressed(self.registers[x]))
            }
            Instruction::ReadDelay { x } => self.registers[x] = self.timers.delay,
            Instruction::WaitForKey { x } => {
                // Park on this instruction until a key-down arrives.
                self.pc = at;
                self.keypad.wait_for(x);
            }
            Instruction::SetDelay { x } => self.timers.delay = self.registers[x],
            Instruction::SetSound { x } => self.timers.sound = self.registers[x],
            Instruction::AddToIndex { x } => {
                self.i = self.i.wrapping_add(u16::from(self.registers[x]))
            }
            Instruction::IndexFromDigit { x } => self.i = font::glyph_address(self.registers[x]),
            Instruction::StoreBcd { x } => {
                let value = self.registers[x];
                self.write(self.i, value / 100);
                self.write(self.i.wrapping_add(1), value / 10 % 10);
                self.write(self.i.wrapping_add(2), value % 10);
            }
            Instruction::StoreRegisters { x } => {
                for r in 0..=x {
                    self.write(self.i.wrapping_add(r as u16), self.registers[r]);
                }
            }
            Instruction::LoadRegisters { x } => {
                for r in 0..=x {
                    self.registers[r] = self.read(self.i.wrapping_add(r as u16));
                }
            }
            Instruction::Unknown(word) => warn!("Unknown instruction [{word:04X}] at [{at:#05X}]"),
        }
        Ok(())
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.pc = (self.pc + 2) & Self::ADDRESS_MASK;
        }
    }

    /// Writes the flag to VF, then the ALU result to VX. With X = F the
    /// result is what remains in VF.
    fn set_with_flag(&mut self, x: usize, (value, flag): (u8, u8)) {
        self.registers[Self::FLAG] = flag;
        self.registers[x] = value;
    }

    fn draw_sprite(&mut self, x: usize, y: usize, height: u8) {
        let mut rows = [0u8; 15];
        let rows = &mut rows[..usize::from(height)];
        for (offset, row) in (0u16..).zip(rows.iter_mut()) {
            *row = self.read(self.i.wrapping_add(offset));
        }
        let collision = self
            .framebuffer
            .draw_sprite(self.registers[x], self.registers[y], rows);
        self.registers[Self::FLAG] = u8::from(collision);
    }

    fn read(&self, addr: u16) -> u8 {
        self.memory[usize::from(addr & Self::ADDRESS_MASK)]
    }

    fn write(&mut self, addr: u16, value: u8) {
        let addr = usize::from(addr & Self::ADDRESS_MASK);
        if font::MEMORY_RANGE.contains(&addr) {
            warn!("Ignored write to font memory [{addr:#05X}]");
            return;
        }
        self.memory[addr] = value;
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
