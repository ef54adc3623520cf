//! An interpreter for the CHIP-8 virtual machine.
//!
//! [`Interpreter`] holds the machine and executes one instruction per
//! [`Interpreter::step`]. [`Scheduler`] paces those steps and the 60 Hz timers
//! against wall-clock time and hands display updates, key edges and the tone
//! level to a [`Host`]. [`Desktop`] is the windowed host used by the binary.

macro_rules! wrapper {
    ($($name:ident => $size:expr),*) => {
        $(
            #[derive(Debug, Clone)]
            struct $name([u8; $size]);

            impl Default for $name {
                fn default() -> Self {
                    Self([0; $size])
                }
            }

            impl std::ops::Deref for $name {
                type Target = [u8; $size];

                fn deref(&self) -> &Self::Target {
                    &self.0
                }
            }

            impl std::ops::DerefMut for $name {
                fn deref_mut(&mut self) -> &mut Self::Target {
                    &mut self.0
                }
            }
        )*
    };
}

pub mod alu;
pub mod audio;
pub mod cli;
pub mod display;
pub mod error;
pub mod font;
pub mod input;
pub mod instruction;
pub mod keypad;
pub mod machine;
pub mod scheduler;
pub mod timer;
pub mod window;

pub use audio::Beeper;
pub use display::Framebuffer;
pub use error::{Error, Result};
pub use instruction::Instruction;
pub use keypad::{KeyEvent, WaitState};
pub use machine::Interpreter;
pub use scheduler::{Host, Scheduler};
pub use timer::Timers;
pub use window::{Desktop, Screen};
