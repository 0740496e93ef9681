// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HSB color type for light control.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// HSB color representation (Hue, Saturation, Brightness).
///
/// Hue is in degrees within `[0, 360)`, saturation and brightness are
/// fractions within `[0, 1]`. There is no kelvin or alpha component.
///
/// # Examples
///
/// ```
/// use lifx_master::types::HsbColor;
///
/// let red = HsbColor::new(0.0, 1.0, 1.0).unwrap();
/// assert_eq!(red, HsbColor::red());
///
/// // Out-of-range hues from effect formulas wrap around the color wheel
/// let wrapped = HsbColor::wrapped(-90.0, 1.0, 1.0);
/// assert_eq!(wrapped.hue(), 270.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHsbColor")]
pub struct HsbColor {
    hue: f32,
    saturation: f32,
    brightness: f32,
}

impl HsbColor {
    /// Hue upper bound (exclusive, wraps at 360).
    pub const MAX_HUE: f32 = 360.0;

    /// Creates a new HSB color.
    ///
    /// # Arguments
    ///
    /// * `hue` - Color hue (0 up to but excluding 360 degrees, where 0 is red)
    /// * `saturation` - Color saturation (0-1)
    /// * `brightness` - Color brightness (0-1)
    ///
    /// # Errors
    ///
    /// Returns error if any value is outside its valid range or not finite.
    pub fn new(hue: f32, saturation: f32, brightness: f32) -> Result<Self, ValueError> {
        if !(0.0..Self::MAX_HUE).contains(&hue) {
            return Err(ValueError::InvalidHue(hue));
        }
        if !(0.0..=1.0).contains(&saturation) {
            return Err(ValueError::InvalidSaturation(saturation));
        }
        if !(0.0..=1.0).contains(&brightness) {
            return Err(ValueError::InvalidBrightness(brightness));
        }
        Ok(Self {
            hue,
            saturation,
            brightness,
        })
    }

    /// Creates a color, wrapping the hue onto the color wheel and clamping
    /// saturation and brightness to `[0, 1]`.
    ///
    /// Non-finite inputs are treated as zero.
    #[must_use]
    pub fn wrapped(hue: f32, saturation: f32, brightness: f32) -> Self {
        let hue = finite_or_zero(hue).rem_euclid(Self::MAX_HUE);
        // rem_euclid of a tiny negative value can round up to exactly 360
        let hue = if hue >= Self::MAX_HUE { 0.0 } else { hue };
        Self {
            hue,
            saturation: finite_or_zero(saturation).clamp(0.0, 1.0),
            brightness: finite_or_zero(brightness).clamp(0.0, 1.0),
        }
    }

    /// Creates a fully saturated color at full brightness.
    #[must_use]
    pub fn saturated(hue: f32) -> Self {
        Self::wrapped(hue, 1.0, 1.0)
    }

    /// Pure red at full brightness.
    #[must_use]
    pub const fn red() -> Self {
        Self {
            hue: 0.0,
            saturation: 1.0,
            brightness: 1.0,
        }
    }

    /// Pure green at full brightness.
    #[must_use]
    pub const fn green() -> Self {
        Self {
            hue: 120.0,
            saturation: 1.0,
            brightness: 1.0,
        }
    }

    /// Amber at full brightness.
    #[must_use]
    pub const fn amber() -> Self {
        Self {
            hue: 50.0,
            saturation: 1.0,
            brightness: 1.0,
        }
    }

    /// Pure blue at full brightness.
    #[must_use]
    pub const fn blue() -> Self {
        Self {
            hue: 240.0,
            saturation: 1.0,
            brightness: 1.0,
        }
    }

    /// White (no saturation) at full brightness.
    #[must_use]
    pub const fn white() -> Self {
        Self {
            hue: 0.0,
            saturation: 0.0,
            brightness: 1.0,
        }
    }

    /// Returns the hue in degrees.
    #[must_use]
    pub const fn hue(&self) -> f32 {
        self.hue
    }

    /// Returns the saturation (0-1).
    #[must_use]
    pub const fn saturation(&self) -> f32 {
        self.saturation
    }

    /// Returns the brightness (0-1).
    #[must_use]
    pub const fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Creates a new color with a different hue.
    ///
    /// # Errors
    ///
    /// Returns error if hue is outside `[0, 360)`.
    pub fn with_hue(&self, hue: f32) -> Result<Self, ValueError> {
        Self::new(hue, self.saturation, self.brightness)
    }

    /// Creates a new color with a different saturation.
    ///
    /// # Errors
    ///
    /// Returns error if saturation is outside `[0, 1]`.
    pub fn with_saturation(&self, saturation: f32) -> Result<Self, ValueError> {
        Self::new(self.hue, saturation, self.brightness)
    }

    /// Creates a new color with a different brightness.
    ///
    /// # Errors
    ///
    /// Returns error if brightness is outside `[0, 1]`.
    pub fn with_brightness(&self, brightness: f32) -> Result<Self, ValueError> {
        Self::new(self.hue, self.saturation, brightness)
    }
}

impl Default for HsbColor {
    fn default() -> Self {
        Self::white()
    }
}

impl fmt::Display for HsbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HSB({:.1}, {:.0}%, {:.0}%)",
            self.hue,
            self.saturation * 100.0,
            self.brightness * 100.0
        )
    }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

/// Unvalidated wire form, checked through [`HsbColor::new`].
#[derive(Deserialize)]
struct RawHsbColor {
    hue: f32,
    saturation: f32,
    brightness: f32,
}

impl TryFrom<RawHsbColor> for HsbColor {
    type Error = ValueError;

    fn try_from(raw: RawHsbColor) -> Result<Self, Self::Error> {
        Self::new(raw.hue, raw.saturation, raw.brightness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsb_color_valid() {
        let color = HsbColor::new(180.0, 0.5, 0.75).unwrap();
        assert_eq!(color.hue(), 180.0);
        assert_eq!(color.saturation(), 0.5);
        assert_eq!(color.brightness(), 0.75);
    }

    #[test]
    fn hsb_color_rejects_full_turn_hue() {
        let result = HsbColor::new(360.0, 0.5, 0.5);
        assert!(matches!(result, Err(ValueError::InvalidHue(h)) if h == 360.0));
    }

    #[test]
    fn hsb_color_invalid_saturation() {
        let result = HsbColor::new(10.0, 1.01, 0.5);
        assert!(matches!(result, Err(ValueError::InvalidSaturation(_))));
    }

    #[test]
    fn hsb_color_invalid_brightness() {
        let result = HsbColor::new(10.0, 0.5, -0.1);
        assert!(matches!(result, Err(ValueError::InvalidBrightness(_))));
    }

    #[test]
    fn hsb_color_rejects_nan() {
        assert!(HsbColor::new(f32::NAN, 0.5, 0.5).is_err());
    }

    #[test]
    fn wrapped_normalizes_hue() {
        assert_eq!(HsbColor::wrapped(360.0, 1.0, 1.0).hue(), 0.0);
        assert_eq!(HsbColor::wrapped(396.0, 1.0, 1.0).hue(), 36.0);
        assert_eq!(HsbColor::wrapped(-3600.0, 1.0, 1.0).hue(), 0.0);
        assert_eq!(HsbColor::wrapped(-1.0, 1.0, 1.0).hue(), 359.0);
    }

    #[test]
    fn wrapped_clamps_components() {
        let color = HsbColor::wrapped(10.0, 2.0, -1.0);
        assert_eq!(color.saturation(), 1.0);
        assert_eq!(color.brightness(), 0.0);
    }

    #[test]
    fn wrapped_tiny_negative_stays_in_range() {
        let color = HsbColor::wrapped(-1e-6, 1.0, 1.0);
        assert!(color.hue() < HsbColor::MAX_HUE);
    }

    #[test]
    fn hsb_color_presets() {
        assert_eq!(HsbColor::red().hue(), 0.0);
        assert_eq!(HsbColor::green().hue(), 120.0);
        assert_eq!(HsbColor::amber().hue(), 50.0);
        assert_eq!(HsbColor::blue().hue(), 240.0);
        assert_eq!(HsbColor::white().saturation(), 0.0);
    }

    #[test]
    fn hsb_color_with_methods() {
        let green = HsbColor::red().with_hue(120.0).unwrap();
        assert_eq!(green, HsbColor::green());
        assert!(HsbColor::red().with_brightness(3.0).is_err());
    }

    #[test]
    fn hsb_color_display() {
        let color = HsbColor::new(120.0, 1.0, 0.5).unwrap();
        assert_eq!(color.to_string(), "HSB(120.0, 100%, 50%)");
    }

    #[test]
    fn hsb_color_deserialize_validates() {
        let ok: HsbColor =
            serde_json::from_str(r#"{"hue": 50, "saturation": 1, "brightness": 1}"#).unwrap();
        assert_eq!(ok, HsbColor::amber());

        let bad = serde_json::from_str::<HsbColor>(r#"{"hue": 400, "saturation": 1, "brightness": 1}"#);
        assert!(bad.is_err());
    }
}
