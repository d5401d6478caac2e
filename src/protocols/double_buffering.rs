//! Double buffering on the original Launchpads (Mk1, S and Mini).
//!
//! The device keeps two LED buffers. One is displayed, one receives updates, and flipping between
//! them makes flicker-free animation possible.

#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
#[repr(u8)]
pub enum Buffer {
    A = 0,
    B = 1,
}

/// Specifies a double buffering mode change
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub struct DoubleBuffering {
    // If true, copy the contents from the new "displayed" buffer to the new "edited" buffer
    pub copy: bool,
    // If true, continually flip "displayed" buffers to make a flashing effect
    pub flash: bool,
    // The buffer that is being edited
    pub edited_buffer: Buffer,
    // The buffer that is being displayed
    pub displayed_buffer: Buffer,
}

impl DoubleBuffering {
    /// Data byte of the `B0 00 xx` control message
    pub fn control_byte(&self) -> u8 {
        0b0010_0000
            | ((self.copy as u8) << 4)
            | ((self.flash as u8) << 3)
            | ((self.edited_buffer as u8) << 2)
            | self.displayed_buffer as u8
    }
}

impl Default for DoubleBuffering {
    /// Power-up state: no flashing, buffer A edited and displayed
    fn default() -> Self {
        Self {
            copy: false,
            flash: false,
            edited_buffer: Buffer::A,
            displayed_buffer: Buffer::A,
        }
    }
}
