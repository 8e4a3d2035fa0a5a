use palette::{LinSrgb, Mix, Srgb};

use crate::data::model::Gender;

// ---------------------------------------------------------------------------
// Fixed colours
// ---------------------------------------------------------------------------

pub const MALE: Srgb<u8> = Srgb::<u8>::new(0xFF, 0x57, 0x22);
pub const FEMALE: Srgb<u8> = Srgb::<u8>::new(0x21, 0x96, 0xF3);

/// Choropleth scale endpoints (low → high mean intake).
pub const MAP_LOW: Srgb<u8> = Srgb::<u8>::new(0xFF, 0xE0, 0xB2);
pub const MAP_HIGH: Srgb<u8> = Srgb::<u8>::new(0xFF, 0x57, 0x22);

/// `#RRGGBB` form expected by the charting layer.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02X}{:02X}{:02X}", color.red, color.green, color.blue)
}

// ---------------------------------------------------------------------------
// Color mapping: gender → colour
// ---------------------------------------------------------------------------

/// Maps each gender to its series colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenderColors {
    pub male: Srgb<u8>,
    pub female: Srgb<u8>,
}

impl Default for GenderColors {
    fn default() -> Self {
        Self {
            male: MALE,
            female: FEMALE,
        }
    }
}

impl GenderColors {
    pub fn color_for(&self, gender: Gender) -> Srgb<u8> {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
        }
    }

    pub fn hex_for(&self, gender: Gender) -> String {
        to_hex(self.color_for(gender))
    }
}

// ---------------------------------------------------------------------------
// Gradient stops
// ---------------------------------------------------------------------------

/// `steps` colours evenly interpolated from `low` to `high` in linear RGB.
/// The endpoints are returned unchanged.
pub fn gradient(low: Srgb<u8>, high: Srgb<u8>, steps: usize) -> Vec<Srgb<u8>> {
    match steps {
        0 => Vec::new(),
        1 => vec![low],
        _ => {
            let lo: LinSrgb<f32> = low.into_linear();
            let hi: LinSrgb<f32> = high.into_linear();
            let last = steps - 1;
            (0..steps)
                .map(|i| {
                    if i == 0 {
                        low
                    } else if i == last {
                        high
                    } else {
                        let t = i as f32 / last as f32;
                        Srgb::<u8>::from_linear(lo.mix(hi, t))
                    }
                })
                .collect()
        }
    }
}
