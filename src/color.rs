/// An RGBA color with components between 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0., 0., 0., 0.);
    pub const BLACK: Color = Color::rgba(0., 0., 0., 1.);
    pub const WHITE: Color = Color::rgba(1., 1., 1., 1.);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Color {
        Color { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit components.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Color {
        Color::rgba8(r, g, b, 255)
    }

    /// Creates a color from 8-bit components.
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color {
            r: f32::from(r) / 255.,
            g: f32::from(g) / 255.,
            b: f32::from(b) / 255.,
            a: f32::from(a) / 255.,
        }
    }

    /// Linearly interpolates between two colors; `t` is clamped to 0..1.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.max(0.).min(1.);
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

#[test]
fn test_color_lerp() {
    let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
    assert_eq!(mid, Color::rgba(0.5, 0.5, 0.5, 1.));
    assert_eq!(Color::BLACK.lerp(Color::WHITE, 2.), Color::WHITE);
}
