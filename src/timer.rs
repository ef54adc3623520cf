/// Delay and sound countdowns, decremented at 60 Hz by the scheduler.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub const HZ: u32 = 60;

    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// Whether the tone should currently be audible.
    pub fn is_sounding(&self) -> bool {
        self.sound > 0
    }
}
