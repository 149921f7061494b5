//! Colors, blend modes and depth

use std::fmt;

/// Depth of a draw operation; higher values are drawn on top
pub type ZPos = f64;

/// 32-bit ARGB color
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(u32);

impl Color {
    /// Fully transparent black
    pub const NONE: Self = Self(0x0000_0000);
    /// Opaque black
    pub const BLACK: Self = Self(0xff00_0000);
    /// Opaque gray
    pub const GRAY: Self = Self(0xff80_8080);
    /// Opaque white
    pub const WHITE: Self = Self(0xffff_ffff);
    /// Opaque aqua
    pub const AQUA: Self = Self(0xff00_ffff);
    /// Opaque red
    pub const RED: Self = Self(0xffff_0000);
    /// Opaque green
    pub const GREEN: Self = Self(0xff00_ff00);
    /// Opaque blue
    pub const BLUE: Self = Self(0xff00_00ff);
    /// Opaque yellow
    pub const YELLOW: Self = Self(0xffff_ff00);
    /// Opaque fuchsia, the color key of BMP files
    pub const FUCHSIA: Self = Self(0xffff_00ff);
    /// Opaque cyan
    pub const CYAN: Self = Self(0xff00_ffff);

    /// Color from a packed `0xAARRGGBB` value
    pub const fn from_argb_u32(argb: u32) -> Self {
        Self(argb)
    }

    /// Opaque color from channels
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::argb(0xff, red, green, blue)
    }

    /// Color from channels including alpha
    pub const fn argb(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self((alpha as u32) << 24 | (red as u32) << 16 | (green as u32) << 8 | blue as u32)
    }

    /// Color from an `[r, g, b, a]` pixel as produced by the `image` crate
    pub const fn from_rgba_bytes(px: [u8; 4]) -> Self {
        Self::argb(px[3], px[0], px[1], px[2])
    }

    /// Packed `0xAARRGGBB` value
    pub const fn argb_u32(self) -> u32 {
        self.0
    }

    /// Alpha channel
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red channel
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self(self.0 & 0x00ff_ffff | (alpha as u32) << 24)
    }

    /// Channel-wise product, used for color modulation
    pub fn multiply(self, other: Self) -> Self {
        let mul = |a: u8, b: u8| ((u16::from(a) * u16::from(b) + 127) / 255) as u8;
        Self::argb(
            mul(self.alpha(), other.alpha()),
            mul(self.red(), other.red()),
            mul(self.green(), other.green()),
            mul(self.blue(), other.blue()),
        )
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color(#{:08x})", self.0)
    }
}

/// How a drawn image is composited onto the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlphaMode {
    /// Regular alpha blending
    #[default]
    Default,
    /// Color values are added to the background
    Additive,
    /// Color values are multiplied with the background
    Multiply,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels() {
        let c = Color::argb(0x80, 0x11, 0x22, 0x33);
        assert_eq!(c.argb_u32(), 0x8011_2233);
        assert_eq!((c.alpha(), c.red(), c.green(), c.blue()), (0x80, 0x11, 0x22, 0x33));
        assert_eq!(c.with_alpha(0xff), Color::rgb(0x11, 0x22, 0x33));
        assert_eq!(Color::from_rgba_bytes([0xff, 0x00, 0xff, 0xff]), Color::FUCHSIA);
    }

    #[test]
    fn test_multiply() {
        assert_eq!(Color::WHITE.multiply(Color::RED), Color::RED);
        assert_eq!(Color::RED.multiply(Color::BLUE), Color::BLACK);
        assert_eq!(Color::WHITE.multiply(Color::NONE), Color::NONE);
    }
}
