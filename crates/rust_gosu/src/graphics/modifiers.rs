//! Draw modifiers
//!
//! A modifier overrides one group of draw parameters. Any number of them can
//! be passed to [`Image::draw_with`](super::Image::draw_with) in any order;
//! they are folded left to right into a [`DrawParams`] record starting from
//! the defaults. A modifier given twice simply overwrites the earlier one.
//!
//! Only the types listed in [`DrawModifier`] convert into a modifier, so a
//! stray argument of any other type is rejected by the compiler.

use super::color::{AlphaMode, Color, ZPos};

/// Place the top-left corner of the image at `(x, y)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub f64, pub f64);

/// Place the center of the image at `(x, y)`
///
/// This also moves the rotation pivot to the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionOfCenter(pub f64, pub f64);

/// Scale by relative factors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale(pub f64, pub f64);

/// Scale to an absolute on-screen size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleAbsolute(pub f64, pub f64);

/// Rotate clockwise by degrees around the pivot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotate(pub f64);

/// Individual colors for the four corners
///
/// Order: top-left, top-right, bottom-left, bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSet(pub Color, pub Color, pub Color, pub Color);

/// Override the depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZPosSet(pub ZPos);

/// Every argument accepted by the modifier draw calls
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawModifier {
    /// See [`Position`]
    Position(Position),
    /// See [`PositionOfCenter`]
    PositionOfCenter(PositionOfCenter),
    /// See [`Scale`]
    Scale(Scale),
    /// See [`ScaleAbsolute`]
    ScaleAbsolute(ScaleAbsolute),
    /// See [`Rotate`]
    Rotate(Rotate),
    /// See [`ColorSet`]
    ColorSet(ColorSet),
    /// One color for all four corners
    Color(Color),
    /// Blend mode
    AlphaMode(AlphaMode),
    /// See [`ZPosSet`]
    ZPosSet(ZPosSet),
}

macro_rules! modifier_from {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl From<$ty> for DrawModifier {
                fn from(value: $ty) -> Self {
                    Self::$ty(value)
                }
            }
        )+
    };
}

modifier_from!(
    Position,
    PositionOfCenter,
    Scale,
    ScaleAbsolute,
    Rotate,
    ColorSet,
    Color,
    AlphaMode,
    ZPosSet,
);

/// Fully resolved arguments of one image draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
    /// Horizontal position of the pivot
    pub x: f64,
    /// Vertical position of the pivot
    pub y: f64,
    /// Depth
    pub z: ZPos,
    /// Horizontal scale factor
    pub factor_x: f64,
    /// Vertical scale factor
    pub factor_y: f64,
    /// Clockwise rotation in degrees
    pub angle: f64,
    /// Relative horizontal pivot, 0 = left edge, 1 = right edge
    pub center_x: f64,
    /// Relative vertical pivot, 0 = top edge, 1 = bottom edge
    pub center_y: f64,
    /// Corner colors: top-left, top-right, bottom-left, bottom-right
    pub colors: [Color; 4],
    /// Blend mode
    pub mode: AlphaMode,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self::at(0.0, 0.0, 0.0)
    }
}

impl DrawParams {
    /// Defaults with the given position and depth
    pub fn at(x: f64, y: f64, z: ZPos) -> Self {
        Self {
            x,
            y,
            z,
            factor_x: 1.0,
            factor_y: 1.0,
            angle: 0.0,
            center_x: 0.0,
            center_y: 0.0,
            colors: [Color::WHITE; 4],
            mode: AlphaMode::Default,
        }
    }

    /// Fold `modifiers` over the defaults at `(x, y, z)`
    ///
    /// `width` and `height` are the intrinsic image size, needed by
    /// [`ScaleAbsolute`].
    pub fn resolve<I>(x: f64, y: f64, z: ZPos, modifiers: I, width: u32, height: u32) -> Self
    where
        I: IntoIterator,
        I::Item: Into<DrawModifier>,
    {
        modifiers.into_iter().fold(Self::at(x, y, z), |mut params, modifier| {
            params.apply(modifier.into(), width, height);
            params
        })
    }

    /// Overwrite the fields governed by `modifier`
    pub fn apply(&mut self, modifier: DrawModifier, width: u32, height: u32) {
        match modifier {
            DrawModifier::Position(Position(x, y)) => {
                self.x = x;
                self.y = y;
            }
            DrawModifier::PositionOfCenter(PositionOfCenter(x, y)) => {
                self.x = x;
                self.y = y;
                self.center_x = 0.5;
                self.center_y = 0.5;
            }
            DrawModifier::Scale(Scale(fx, fy)) => {
                self.factor_x = fx;
                self.factor_y = fy;
            }
            DrawModifier::ScaleAbsolute(ScaleAbsolute(w, h)) => {
                self.factor_x = w / f64::from(width);
                self.factor_y = h / f64::from(height);
            }
            DrawModifier::Rotate(Rotate(angle)) => self.angle = angle,
            DrawModifier::ColorSet(ColorSet(c1, c2, c3, c4)) => self.colors = [c1, c2, c3, c4],
            DrawModifier::Color(color) => self.colors = [color; 4],
            DrawModifier::AlphaMode(mode) => self.mode = mode,
            DrawModifier::ZPosSet(ZPosSet(z)) => self.z = z,
        }
    }
}

/// Draw an image with a variadic list of modifiers
///
/// ```ignore
/// draw!(image, Position(10.0, 20.0), Rotate(45.0), Color::RED);
/// draw!(image, at 10.0, 20.0, 1.0; Scale(2.0, 2.0));
/// ```
///
/// Each argument is converted with `DrawModifier::from`, so anything that is
/// not a modifier, a `Color` or an `AlphaMode` fails to compile.
#[macro_export]
macro_rules! draw {
    ($image:expr, at $x:expr, $y:expr, $z:expr $(; $($modifier:expr),+ $(,)?)?) => {{
        let modifiers: &[$crate::graphics::DrawModifier] =
            &[$($($crate::graphics::DrawModifier::from($modifier)),+)?];
        $image.draw_with($x, $y, $z, modifiers.iter().copied())
    }};
    ($image:expr $(, $modifier:expr)*) => {{
        let modifiers: &[$crate::graphics::DrawModifier] =
            &[$($crate::graphics::DrawModifier::from($modifier)),*];
        $image.draw_modified(modifiers.iter().copied())
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const W: u32 = 40;
    const H: u32 = 20;

    #[test]
    fn test_defaults() {
        let params = DrawParams::resolve(0.0, 0.0, 0.0, Vec::<DrawModifier>::new(), W, H);
        assert_eq!(params, DrawParams::default());
        assert_eq!(params.colors, [Color::WHITE; 4]);
        assert_eq!((params.factor_x, params.factor_y), (1.0, 1.0));
        assert_eq!(params.mode, AlphaMode::Default);
    }

    #[test]
    fn test_only_governed_fields_change() {
        let params = DrawParams::resolve(1.0, 2.0, 3.0, [Rotate(90.0)], W, H);
        let expected = DrawParams {
            angle: 90.0,
            ..DrawParams::at(1.0, 2.0, 3.0)
        };
        assert_eq!(params, expected);
    }

    #[test]
    fn test_non_overlapping_modifiers_commute() {
        let modifiers: [DrawModifier; 6] = [
            Position(5.0, 6.0).into(),
            Scale(2.0, 3.0).into(),
            Rotate(30.0).into(),
            Color::RED.into(),
            AlphaMode::Additive.into(),
            ZPosSet(7.0).into(),
        ];
        let forward = DrawParams::resolve(0.0, 0.0, 0.0, modifiers, W, H);

        let mut reversed = modifiers;
        reversed.reverse();
        let backward = DrawParams::resolve(0.0, 0.0, 0.0, reversed, W, H);

        assert_eq!(forward, backward);
        assert_eq!((forward.x, forward.y, forward.z), (5.0, 6.0, 7.0));
        assert_eq!(forward.colors, [Color::RED; 4]);
        assert_eq!(forward.mode, AlphaMode::Additive);
    }

    #[test]
    fn test_position_of_center_forces_center_pivot() {
        let without_rotation = DrawParams::resolve(0.0, 0.0, 0.0, [PositionOfCenter(3.0, 4.0)], W, H);
        assert_eq!((without_rotation.center_x, without_rotation.center_y), (0.5, 0.5));
        assert_eq!((without_rotation.x, without_rotation.y), (3.0, 4.0));

        let with_rotation = DrawParams::resolve(
            0.0,
            0.0,
            0.0,
            [DrawModifier::from(Rotate(45.0)), PositionOfCenter(3.0, 4.0).into()],
            W,
            H,
        );
        assert_eq!((with_rotation.center_x, with_rotation.center_y), (0.5, 0.5));
        assert_eq!(with_rotation.angle, 45.0);
    }

    #[test]
    fn test_scale_absolute_uses_intrinsic_size() {
        let once = DrawParams::resolve(0.0, 0.0, 0.0, [ScaleAbsolute(80.0, 5.0)], W, H);
        assert_relative_eq!(once.factor_x, 2.0);
        assert_relative_eq!(once.factor_y, 0.25);

        let twice = DrawParams::resolve(0.0, 0.0, 0.0, [ScaleAbsolute(80.0, 5.0), ScaleAbsolute(80.0, 5.0)], W, H);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_flat_color_and_color_set() {
        let flat = DrawParams::resolve(0.0, 0.0, 0.0, [Color::BLUE], W, H);
        assert!(flat.colors.iter().all(|&c| c == Color::BLUE));

        let set = ColorSet(Color::RED, Color::GREEN, Color::BLUE, Color::YELLOW);
        let per_corner = DrawParams::resolve(0.0, 0.0, 0.0, [set], W, H);
        assert_eq!(per_corner.colors, [Color::RED, Color::GREEN, Color::BLUE, Color::YELLOW]);
    }

    #[test]
    fn test_last_modifier_wins() {
        let params = DrawParams::resolve(
            0.0,
            0.0,
            0.0,
            [Scale(2.0, 2.0), Scale(3.0, 4.0)],
            W,
            H,
        );
        assert_eq!((params.factor_x, params.factor_y), (3.0, 4.0));

        let params = DrawParams::resolve(
            0.0,
            0.0,
            0.0,
            [DrawModifier::from(ColorSet(Color::RED, Color::RED, Color::RED, Color::BLUE)), Color::GREEN.into()],
            W,
            H,
        );
        assert_eq!(params.colors, [Color::GREEN; 4]);
    }
}
