// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color patterns driven by a tick counter.

use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::HsbColor;

/// How an effect turns a tick count into a color.
///
/// Every pattern except [`Pattern::Random`] is a pure function of the tick.
///
/// # Examples
///
/// ```
/// use lifx_master::effect::Pattern;
///
/// let rainbow = Pattern::HueStep { degrees_per_tick: 36 };
/// let mut rng = rand::thread_rng();
/// assert_eq!(rainbow.color_at(11, &mut rng).hue(), 36.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pattern {
    /// The same color on every tick.
    Solid {
        /// Color to show.
        color: HsbColor,
    },

    /// Saturated hue advancing by a fixed angle per tick.
    HueStep {
        /// Degrees added on each tick.
        degrees_per_tick: u32,
    },

    /// Saturated hue advancing one degree every `ticks_per_degree` ticks.
    ///
    /// Uses integer division, so the hue holds for that many ticks.
    HueCrawl {
        /// Ticks spent on each degree. Must be non-zero.
        ticks_per_degree: u32,
    },

    /// Saturated hue following `sin(tick * rate / (180 * PI)) * amplitude`,
    /// wrapped onto the color wheel.
    HueOscillation {
        /// Multiplier applied to the tick before the sine.
        rate: f64,
        /// Multiplier applied to the sine, in degrees.
        amplitude: f64,
    },

    /// Uniformly random hue, saturation and brightness on each tick.
    ///
    /// Hue is a whole degree in `0..360`; saturation and brightness are
    /// multiples of `1/256` in `[0, 1)`.
    Random,

    /// Steps through a list of colors, one per tick.
    Cycle {
        /// Colors in playback order. Must not be empty.
        colors: Vec<HsbColor>,
    },
}

impl Pattern {
    /// Returns the color for a tick.
    ///
    /// `rng` is only drawn from by [`Pattern::Random`].
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn color_at<R: Rng + ?Sized>(&self, tick: u64, rng: &mut R) -> HsbColor {
        match self {
            Self::Solid { color } => *color,
            Self::HueStep { degrees_per_tick } => {
                let hue = (tick % 360) * (u64::from(*degrees_per_tick) % 360) % 360;
                HsbColor::saturated(hue as f32)
            }
            Self::HueCrawl { ticks_per_degree } => {
                let hue = tick / u64::from((*ticks_per_degree).max(1)) % 360;
                HsbColor::saturated(hue as f32)
            }
            Self::HueOscillation { rate, amplitude } => {
                let hue = (tick as f64 * rate / (180.0 * PI)).sin() * amplitude;
                HsbColor::saturated(hue as f32)
            }
            Self::Random => {
                let hue = rng.gen_range(0_u16..360);
                let saturation = rng.gen_range(0_u16..256);
                let brightness = rng.gen_range(0_u16..256);
                HsbColor::wrapped(
                    f32::from(hue),
                    f32::from(saturation) / 256.0,
                    f32::from(brightness) / 256.0,
                )
            }
            Self::Cycle { colors } => {
                if colors.is_empty() {
                    return HsbColor::white();
                }
                let index = (tick % colors.len() as u64) as usize;
                colors[index]
            }
        }
    }
}
