use serde::{Deserialize, Serialize};

/// The six bound values of an HSV color range.
///
/// The field order is the serialized key order of the `hsv_values.json`
/// export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    /// minimum hue, 0-179
    pub h_min: u8,
    /// maximum hue, 0-179
    pub h_max: u8,
    /// minimum saturation
    pub s_min: u8,
    /// maximum saturation
    pub s_max: u8,
    /// minimum value
    pub v_min: u8,
    /// maximum value
    pub v_max: u8,
}

impl Default for HsvRange {
    /// The full range, selecting every pixel.
    fn default() -> Self {
        Self {
            h_min: 0,
            h_max: 179,
            s_min: 0,
            s_max: 255,
            v_min: 0,
            v_max: 255,
        }
    }
}

impl HsvRange {
    /// The inclusive lower (H, S, V) bound.
    pub fn lower(&self) -> [u8; 3] {
        [self.h_min, self.s_min, self.v_min]
    }

    /// The inclusive upper (H, S, V) bound.
    pub fn upper(&self) -> [u8; 3] {
        [self.h_max, self.s_max, self.v_max]
    }

    /// Serialize the six values for the `hsv_values.json` export,
    /// 2-space indented.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
