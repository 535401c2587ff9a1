//! Sequential colormaps for heat-map rendering.

use image::Rgb;
use serde::{Deserialize, Serialize};

/// A sequential colormap from a light to a dark shade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Colormap {
    /// Light to dark blue (the default heat-map palette)
    #[default]
    Blues,
    /// Light to dark green
    Greens,
    /// Light to dark orange
    Oranges,
    /// White to black
    Greys,
}

impl Colormap {
    /// Light, middle, and dark anchor colors.
    fn anchors(&self) -> [[u8; 3]; 3] {
        match self {
            Colormap::Blues => [[247, 251, 255], [107, 174, 214], [8, 48, 107]],
            Colormap::Greens => [[247, 252, 245], [116, 196, 118], [0, 68, 27]],
            Colormap::Oranges => [[255, 245, 235], [253, 141, 60], [127, 39, 4]],
            Colormap::Greys => [[255, 255, 255], [150, 150, 150], [0, 0, 0]],
        }
    }

    /// Sample the map at `t` in [0, 1] (clamped), interpolating linearly
    /// between the anchors.
    pub fn sample(&self, t: f64) -> Rgb<u8> {
        let t = t.clamp(0.0, 1.0);
        let anchors = self.anchors();
        let (from, to, local) = if t <= 0.5 {
            (anchors[0], anchors[1], t * 2.0)
        } else {
            (anchors[1], anchors[2], (t - 0.5) * 2.0)
        };

        let mut channels = [0u8; 3];
        for (i, channel) in channels.iter_mut().enumerate() {
            let value = from[i] as f64 + (to[i] as f64 - from[i] as f64) * local;
            *channel = value.round() as u8;
        }
        Rgb(channels)
    }
}
