use crate::keypad::KeyEvent;
use std::collections::BTreeMap;
use winit::event::VirtualKeyCode;
use winit_input_helper::WinitInputHelper;

/// Generates a keymap from a mapping of QWERTY keys to CHIP-8 key codes,
/// represented as a [`BTreeMap`](std::collections::BTreeMap) ordered by
/// CHIP-8 key.
macro_rules! keymap {
    ($($keycode:ident => $mapping:literal),*) => {
        lazy_static::lazy_static! {
            /// A mapping of CHIP-8 keys to the QWERTY key code that represents it.
            pub static ref KEYMAP: BTreeMap<u8, VirtualKeyCode> = {
                let mut m = BTreeMap::new();
                $(
                  m.insert($mapping, VirtualKeyCode::$keycode);
                )*
                m
            };
        }
    };
}

keymap! {
    Key1 => 0x1,
    Key2 => 0x2,
    Key3 => 0x3,
    Key4 => 0xC,
    Q => 0x4,
    W => 0x5,
    E => 0x6,
    R => 0xD,
    A => 0x7,
    S => 0x8,
    D => 0x9,
    F => 0xE,
    Z => 0xA,
    X => 0x0,
    C => 0xB,
    V => 0xF
}

/// Press and release edges of mapped keys seen in the last batch of
/// window events, in key order.
///
/// A tap inside one batch yields the press followed by the release. A
/// release is dropped when the key went down again before the batch ended.
pub fn key_edges(input: &WinitInputHelper) -> impl Iterator<Item = KeyEvent> + '_ {
    KEYMAP.iter().flat_map(move |(&key, &code)| {
        let press = input
            .key_pressed(code)
            .then_some(KeyEvent { key, pressed: true });
        let release = (input.key_released(code) && !input.key_held(code))
            .then_some(KeyEvent { key, pressed: false });
        [press, release].into_iter().flatten()
    })
}

/// Escape or a request from the window system to close.
pub fn quit_requested(input: &WinitInputHelper) -> bool {
    input.key_pressed(VirtualKeyCode::Escape) || input.quit()
}
