use std::fmt;

use palette::{Hsl, IntoColor, Srgb};
use serde::{Serialize, Serializer};

use crate::data::model::Species;

// ---------------------------------------------------------------------------
// Renderer-agnostic colour
// ---------------------------------------------------------------------------

/// 8-bit sRGB triple. Serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.0;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            let rgb: Srgb<u8> = rgb.into_format();
            Rgb([rgb.red, rgb.green, rgb.blue])
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Species → colour
// ---------------------------------------------------------------------------

/// Fixed species colours. Built over all species, not the ones currently
/// visible, so a species keeps its colour while filters change.
#[derive(Debug, Clone)]
pub struct SpeciesColors {
    colors: [Rgb; 3],
}

impl Default for SpeciesColors {
    fn default() -> Self {
        let palette = generate_palette(Species::ALL.len());
        let mut colors = [Rgb([128, 128, 128]); 3];
        for (slot, c) in colors.iter_mut().zip(palette) {
            *slot = c;
        }
        SpeciesColors { colors }
    }
}

impl SpeciesColors {
    pub fn color_for(&self, species: Species) -> Rgb {
        self.colors[species.label() as usize]
    }

    /// Legend entries in label order.
    pub fn legend_entries(&self) -> Vec<(Species, Rgb)> {
        Species::ALL
            .into_iter()
            .map(|sp| (sp, self.color_for(sp)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let p = generate_palette(3);
        assert_eq!(p.len(), 3);
        assert_ne!(p[0], p[1]);
        assert_ne!(p[1], p[2]);
        assert_ne!(p[0], p[2]);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn species_colours_are_stable() {
        let a = SpeciesColors::default();
        let b = SpeciesColors::default();
        for sp in Species::ALL {
            assert_eq!(a.color_for(sp), b.color_for(sp));
        }
        assert_eq!(a.legend_entries().len(), 3);
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(Rgb([255, 0, 16]).to_hex(), "#ff0010");
        assert_eq!(serde_json::to_string(&Rgb([1, 2, 3])).unwrap(), "\"#010203\"");
    }
}
