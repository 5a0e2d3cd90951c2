use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// HSL → egui colour
// ---------------------------------------------------------------------------

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let hsl = Hsl::new(hue, saturation, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Sequential ramps for bar charts and the word cloud
// ---------------------------------------------------------------------------

/// A linear path through HSL space, sampled at `t ∈ [0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    /// `(hue°, saturation, lightness)` at `t = 0`.
    pub start: (f32, f32, f32),
    /// `(hue°, saturation, lightness)` at `t = 1`.
    pub end: (f32, f32, f32),
}

impl Ramp {
    /// Deep purple through teal to yellow.
    pub const VIRIDIS: Ramp = Ramp {
        start: (285.0, 0.60, 0.30),
        end: (55.0, 0.90, 0.50),
    };
    /// Near-black purple to warm orange.
    pub const MAGMA: Ramp = Ramp {
        start: (270.0, 0.65, 0.18),
        end: (25.0, 0.95, 0.65),
    };
    /// Blue to red through a pale midpoint.
    pub const COOLWARM: Ramp = Ramp {
        start: (220.0, 0.65, 0.55),
        end: (360.0, 0.70, 0.50),
    };

    /// Colour at position `t`, clamped into `[0, 1]`.
    pub fn sample(&self, t: f32) -> Color32 {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: f32, b: f32| a + (b - a) * t;
        hsl_to_color32(
            lerp(self.start.0, self.end.0),
            lerp(self.start.1, self.end.1),
            lerp(self.start.2, self.end.2),
        )
    }

    /// `n` colours evenly spaced along the ramp.
    pub fn colors(&self, n: usize) -> Vec<Color32> {
        match n {
            0 => Vec::new(),
            1 => vec![self.sample(0.0)],
            _ => (0..n)
                .map(|i| self.sample(i as f32 / (n - 1) as f32))
                .collect(),
        }
    }
}
