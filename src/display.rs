use log::trace;

pub const WIDTH: usize = 64;
pub const HEIGHT: usize = 32;

/// The 64x32 monochrome display, stored row-major.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    pixels: [bool; WIDTH * HEIGHT],
    dirty: bool,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self {
            pixels: [false; WIDTH * HEIGHT],
            dirty: false,
        }
    }
}

impl Framebuffer {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn clear(&mut self) {
        self.pixels = [false; WIDTH * HEIGHT];
        self.dirty = true;
    }

    /// XORs `rows` onto the display with its top-left corner at `(x, y)`.
    ///
    /// Each byte is one 8-pixel row, most significant bit leftmost. Both
    /// axes wrap around. Returns whether any lit pixel was switched off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, rows: &[u8]) -> bool {
        let mut collision = false;
        for (row, sprite) in rows.iter().enumerate() {
            let py = (usize::from(y) + row) % HEIGHT;
            for column in 0..8 {
                if sprite & (0x80 >> column) == 0 {
                    continue;
                }
                let px = (usize::from(x) + column) % WIDTH;
                let pixel = &mut self.pixels[py * WIDTH + px];
                collision |= *pixel;
                *pixel = !*pixel;
                trace!("Toggled pixel [on: {}] at ({px}, {py})", *pixel);
            }
        }
        self.dirty = true;
        collision
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels[(y % HEIGHT) * WIDTH + x % WIDTH]
    }

    /// Pixels in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.pixels.iter().copied()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the dirty flag and resets it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
