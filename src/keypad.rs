use log::warn;

pub const KEY_COUNT: usize = 16;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WaitState {
    #[default]
    Normal,
    /// `FX0A` is pending; the next key-down is written to `register`.
    WaitingForKey { register: usize },
}

/// A press or release edge for one logical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: u8,
    pub pressed: bool,
}

/// A completed `FX0A`: `key` goes into `register`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    pub register: usize,
    pub key: u8,
}

/// The 16-key hex keypad latch.
#[derive(Debug, Default, Clone)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
    state: WaitState,
}

impl Keypad {
    pub fn new() -> Self {
        Default::default()
    }

    /// Records a key edge. A key-down while waiting completes the wait.
    /// Keys outside 0x0..=0xF are ignored.
    pub fn set(&mut self, key: u8, pressed: bool) -> Option<Capture> {
        if usize::from(key) >= KEY_COUNT {
            warn!("Ignored edge for unknown key [{key:#04X}]");
            return None;
        }
        self.keys[usize::from(key)] = pressed;
        match self.state {
            WaitState::WaitingForKey { register } if pressed => {
                self.state = WaitState::Normal;
                Some(Capture { register, key })
            }
            _ => None,
        }
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[usize::from(key & 0xF)]
    }

    pub fn wait_for(&mut self, register: usize) {
        self.state = WaitState::WaitingForKey { register };
    }

    pub fn state(&self) -> WaitState {
        self.state
    }

    pub fn is_waiting(&self) -> bool {
        matches!(self.state, WaitState::WaitingForKey { .. })
    }
}
