/// Control change carrying the coarse half of the fader position.
pub const FADER_MSB_CONTROL: u8 = 0;
/// Control change carrying the fine half of the fader position.
pub const FADER_LSB_CONTROL: u8 = 32;
/// Highest position the fader reports or accepts.
pub const FADER_MAX: u16 = 1023;

/// Reassembles the 10-bit fader position from its two 7-bit halves.
///
/// The device sends the MSB first and then the LSB. The MSB is kept
/// until a new one arrives, since the fine half alone can update while
/// the fader moves slowly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaderCodec {
    msb: u8,
}

impl FaderCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the coarse half. Never yields a position on its own.
    pub fn set_msb(&mut self, msb: u8) {
        self.msb = msb & 0x7F;
    }

    /// Combine the fine half with the pending coarse half.
    ///
    /// The device resolves 14 bits but only the top 10 are meaningful,
    /// so the low bits of the combination are dropped.
    pub fn combine(&self, lsb: u8) -> u16 {
        ((u16::from(self.msb) << 7) | u16::from(lsb & 0x7F)) >> 4
    }

    pub fn pending_msb(&self) -> u8 {
        self.msb
    }

    pub fn reset(&mut self) {
        self.msb = 0;
    }
}

/// Clamp a requested position. Anything outside `1..=1023` moves the
/// fader to 0.
pub fn clamp_position(value: i32) -> u16 {
    if 0 < value && value <= i32::from(FADER_MAX) {
        value as u16
    } else {
        0
    }
}

/// Split a position into the `(msb, lsb)` control values, in send order.
pub fn encode(position: u16) -> (u8, u8) {
    let position = position.min(FADER_MAX);
    ((position >> 7) as u8, (position & 0x7F) as u8)
}
