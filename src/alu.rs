//! Register arithmetic for the `8XYn` group.
//!
//! Every operation returns the new value of `VX` together with the value the
//! caller writes to `VF`.

/// `VX + VY`, flag set on carry out of bit 7.
pub const fn add(x: u8, y: u8) -> (u8, u8) {
    let (sum, carry) = x.overflowing_add(y);
    (sum, carry as u8)
}

/// `VX - VY`, flag set when no borrow occurred (`VX >= VY`).
pub const fn sub(x: u8, y: u8) -> (u8, u8) {
    (x.wrapping_sub(y), (x >= y) as u8)
}

/// `VY - VX`, flag set when no borrow occurred (`VY >= VX`).
pub const fn sub_reversed(x: u8, y: u8) -> (u8, u8) {
    sub(y, x)
}

/// Flag receives the bit shifted out (bit 0).
pub const fn shift_right(x: u8) -> (u8, u8) {
    (x >> 1, x & 0x1)
}

/// Flag receives the bit shifted out (bit 7).
pub const fn shift_left(x: u8) -> (u8, u8) {
    (x << 1, x >> 7)
}
