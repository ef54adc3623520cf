use crate::{
    audio::Beeper,
    display::{Framebuffer, HEIGHT, WIDTH},
    error::Result,
    input,
    keypad::KeyEvent,
    scheduler::Host,
};
use log::info;
use pixels::{Pixels, SurfaceTexture};
use std::collections::VecDeque;
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};
use winit_input_helper::WinitInputHelper;

const ON: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];
const OFF: [u8; 4] = [0x00, 0x00, 0x00, 0xFF];

/// A window showing the display, scaled up.
#[derive(Debug)]
pub struct Screen {
    window: Window,
    pixels: Pixels,
}

impl Screen {
    pub fn new(event_loop: &EventLoop<()>, scale: u32) -> Result<Self> {
        let window = {
            let size = LogicalSize::new(WIDTH as u32, HEIGHT as u32);
            let scaled_size = LogicalSize::new(
                WIDTH as f64 * f64::from(scale),
                HEIGHT as f64 * f64::from(scale),
            );
            WindowBuilder::new()
                .with_title("CHIP-8")
                .with_inner_size(scaled_size)
                .with_min_inner_size(size)
                .build(event_loop)?
        };

        let pixels = {
            let size = window.inner_size();
            let texture = SurfaceTexture::new(size.width, size.height, &window);
            Pixels::new(WIDTH as u32, HEIGHT as u32, texture)?
        };

        info!("Attached display [scale: {scale}]");
        Ok(Self { window, pixels })
    }

    /// Copies the display into the pixel buffer and asks for a redraw.
    pub fn draw(&mut self, framebuffer: &Framebuffer) {
        blit(framebuffer, self.pixels.get_frame_mut());
        self.window.request_redraw();
    }

    pub fn render(&mut self) -> Result<()> {
        Ok(self.pixels.render()?)
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) -> Result<()> {
        Ok(self.pixels.resize_surface(size.width, size.height)?)
    }
}

/// Writes one RGBA pixel per display pixel into `frame`.
fn blit(framebuffer: &Framebuffer, frame: &mut [u8]) {
    for (pixel, on) in frame.chunks_exact_mut(4).zip(framebuffer.iter()) {
        pixel.copy_from_slice(if on { &ON } else { &OFF });
    }
}

/// The desktop side of the machine: window, speaker and queued key edges.
pub struct Desktop {
    pub screen: Screen,
    beeper: Option<Beeper>,
    keys: VecDeque<KeyEvent>,
}

impl Desktop {
    /// `beeper` is `None` when running muted.
    pub fn new(screen: Screen, beeper: Option<Beeper>) -> Self {
        Self {
            screen,
            beeper,
            keys: VecDeque::new(),
        }
    }

    /// Queues the key edges from the latest batch of window events.
    pub fn queue_keys(&mut self, input: &WinitInputHelper) {
        self.keys.extend(input::key_edges(input));
    }
}

impl Host for Desktop {
    fn poll_key(&mut self) -> Option<KeyEvent> {
        self.keys.pop_front()
    }

    fn present(&mut self, framebuffer: &Framebuffer) -> Result<()> {
        self.screen.draw(framebuffer);
        Ok(())
    }

    fn set_tone(&mut self, on: bool) {
        if let Some(beeper) = self.beeper.as_mut() {
            beeper.set_tone(on);
        }
    }
}
