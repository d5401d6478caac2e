//! Color packing for the different LED generations.
//!
//! The original Launchpads and the Launch Control family mix a red and a green LED with 2 bits
//! each. The RGB Launchpads take 6-bit channels, which the Mk3 generation expects shifted into
//! the upper bits of a 7-bit data byte. The Dicer takes a hue and an intensity.

/// The factor used to bring a 2-bit channel (0..=3) into the 6-bit range (0..=63)
pub const CLASSIC_SCALE: u8 = 21;

/// Largest value of a 6-bit RGB channel
pub const MAX_RGB: u8 = 63;

/// Largest palette color code
pub const MAX_CODE: u8 = 127;

/// Some palette codes that mean the same thing on all RGB Launchpads.
pub mod palette {
    pub const BLACK: u8 = 0;
    pub const WHITE: u8 = 3;
    pub const RED: u8 = 5;
    pub const GREEN: u8 = 17;

    /// Looks a palette code up by its lowercase name
    pub fn by_name(name: &str) -> Option<u8> {
        match name {
            "black" | "off" => Some(BLACK),
            "white" => Some(WHITE),
            "red" => Some(RED),
            "green" => Some(GREEN),
            _ => None,
        }
    }
}

/// How a single LED should be colored.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LedColor {
    /// A palette entry, or a pre-packed color byte on families without a palette
    Code(u8),
    /// Red, green and an optional blue channel.
    ///
    /// Without blue, red and green are read as 2-bit values (0..=3), the way the original
    /// Launchpads count. RGB families scale those by [`CLASSIC_SCALE`].
    Rgb { r: u8, g: u8, b: Option<u8> },
}

impl LedColor {
    pub const OFF: LedColor = LedColor::Code(palette::BLACK);

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b: Some(b) }
    }

    pub fn classic(red: u8, green: u8) -> Self {
        Self::Rgb {
            r: red,
            g: green,
            b: None,
        }
    }
}

impl Default for LedColor {
    fn default() -> Self {
        Self::Code(palette::WHITE)
    }
}

impl From<u8> for LedColor {
    fn from(code: u8) -> Self {
        Self::Code(code)
    }
}

/// Packs a 2-bit red and green value into a single LED byte: red in bits 0..=1, green in bits
/// 4..=5.
pub fn pack_2bit_rg(red: u8, green: u8) -> u8 {
    red.clamp(0, 3) | (green.clamp(0, 3) << 4)
}

/// Like [`pack_2bit_rg`], but reduces 6-bit channels to 2 bits first.
pub fn pack_2bit_from_6bit(red: u8, green: u8) -> u8 {
    pack_2bit_rg(red.clamp(0, MAX_RGB) >> 4, green.clamp(0, MAX_RGB) >> 4)
}

pub fn pack_6bit_rgb(r: u8, g: u8, b: u8) -> [u8; 3] {
    [r.clamp(0, MAX_RGB), g.clamp(0, MAX_RGB), b.clamp(0, MAX_RGB)]
}

/// 6-bit RGB shifted left by one, as the Mk3 generation reads its 7-bit RGB values
pub fn pack_6bit_rgb_extended(r: u8, g: u8, b: u8) -> [u8; 3] {
    pack_6bit_rgb(r, g, b).map(|channel| channel << 1)
}

/// Brings a 2-bit red/green pair into 6-bit RGB with blue off
pub fn classic_to_6bit(red: u8, green: u8) -> [u8; 3] {
    [
        red.clamp(0, 3) * CLASSIC_SCALE,
        green.clamp(0, 3) * CLASSIC_SCALE,
        0,
    ]
}

/// Resolves an optional blue channel to 6-bit RGB: with blue the channels are clamped, without
/// it red and green are scaled up from 2 bits.
pub fn resolve_rgb(r: u8, g: u8, b: Option<u8>) -> [u8; 3] {
    match b {
        Some(b) => pack_6bit_rgb(r, g, b),
        None => classic_to_6bit(r, g),
    }
}

/// Resolves an optional blue channel to a 2-bit red/green byte
pub fn resolve_2bit(r: u8, g: u8, b: Option<u8>) -> u8 {
    match b {
        Some(_) => pack_2bit_from_6bit(r, g),
        None => pack_2bit_rg(r, g),
    }
}

/// Dicer LED byte: hue (0..=7) in the upper nibble, intensity (0..=15) in the lower one
pub fn pack_hue_intensity(hue: u8, intensity: u8) -> u8 {
    (hue.clamp(0, 7) << 4) | intensity.clamp(0, 15)
}

pub fn clamp_code(code: u8) -> u8 {
    code.clamp(0, MAX_CODE)
}
