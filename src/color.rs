use std::ops::Mul;

use glam::Vec4;

use crate::lerp::Lerp;

/// A linear RGBA color. Used as the multiplicative tint of particles.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl Lerp for Color {
    fn lerp(&self, other: &Self, factor: f32) -> Self {
        Self {
            r: self.r.lerp(&other.r, factor),
            g: self.g.lerp(&other.g, factor),
            b: self.b.lerp(&other.b, factor),
            a: self.a.lerp(&other.a, factor),
        }
    }
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const GREY: Color = Color::new(0.4, 0.4, 0.5);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const ORANGE: Color = Color::new(1.0, 0.6, 0.0);
    pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);
    pub const LIGHTBLUE: Color = Color::new(0.4, 0.4, 1.0);
    pub const PURPLE: Color = Color::new(1.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }

    pub const fn alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn with_alpha_scaled(self, factor: f32) -> Self {
        Self {
            a: self.a * factor,
            ..self
        }
    }

    pub fn mix(self, other: Color, factor: f32) -> Self {
        self.lerp(&other, factor)
    }

    /// * hue: position on the color wheel, wraps around 360
    /// * saturation: 0 is grey, 1 is fully colored
    /// * value: 0 is black, 1 is full brightness
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let c = value * saturation;
        let h = hue.rem_euclid(360.0) / 60.0;
        let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
        let m = value - c;

        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        Color::new(r + m, g + m, b + m)
    }

    /// Parses `#rrggbb` or `#rrggbbaa`. Channels are divided by 255, no gamma mapping.
    pub fn from_hex(hex: &str) -> anyhow::Result<Color> {
        let Some(digits) = hex.strip_prefix('#') else {
            anyhow::bail!("hex color {hex:?} needs to start with #");
        };
        if !digits.bytes().all(|b| b.is_ascii_hexdigit())
            || !(digits.len() == 6 || digits.len() == 8)
        {
            anyhow::bail!("hex color {hex:?} needs 6 or 8 hex digits");
        }
        let channel = |i: usize| -> anyhow::Result<f32> {
            let byte = u8::from_str_radix(&digits[i..i + 2], 16)?;
            Ok(byte as f32 / 255.0)
        };
        let a = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl From<Vec4> for Color {
    fn from(value: Vec4) -> Self {
        Color::rgba(value.x, value.y, value.z, value.w)
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Color { r, g, b, a }
    }
}

impl From<Color> for Vec4 {
    fn from(c: Color) -> Self {
        Vec4::new(c.r, c.g, c.b, c.a)
    }
}

impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Self::Output {
        Self {
            r: self.r * rhs.r,
            g: self.g * rhs.g,
            b: self.b * rhs.b,
            a: self.a * rhs.a,
        }
    }
}

/// Leaves alpha untouched.
impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            r: self.r * rhs,
            g: self.g * rhs,
            b: self.b * rhs,
            a: self.a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn hex_parsing() {
        assert_eq!(Color::from_hex("#ff0000").unwrap(), Color::RED);
        let c = Color::from_hex("#00ff0080").unwrap();
        assert_eq!(c.g, 1.0);
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert!(Color::from_hex("ff0000").is_err());
        assert!(Color::from_hex("#ff00").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("#+f0000").is_err());
        assert!(Color::from_hex("#ff00+f").is_err());
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(Color::from_hsv(0.0, 1.0, 1.0), Color::RED);
        assert_eq!(Color::from_hsv(120.0, 1.0, 1.0), Color::GREEN);
        assert_eq!(Color::from_hsv(240.0, 1.0, 1.0), Color::BLUE);
        assert_eq!(Color::from_hsv(360.0, 1.0, 1.0), Color::RED);
        assert_eq!(Color::from_hsv(0.0, 0.0, 1.0), Color::WHITE);
    }

    #[test]
    fn alpha_scaling_keeps_rgb() {
        let c = Color::ORANGE.with_alpha_scaled(0.5);
        assert_eq!(c, Color::rgba(1.0, 0.6, 0.0, 0.5));
        assert_eq!((Color::WHITE * 0.5).a, 1.0);
    }
}
