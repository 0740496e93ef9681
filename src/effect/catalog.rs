// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered collection of effects.

use std::time::Duration;

use crate::error::ConfigError;
use crate::types::HsbColor;

use super::{Effect, Pattern};

/// Ordered, index-addressed list of effects.
///
/// [`EffectCatalog::reference`] holds the seven stock effects. More can be
/// appended before the catalog is handed to a controller; names must be
/// unique.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectCatalog {
    effects: Vec<Effect>,
}

impl EffectCatalog {
    /// Index of "Standard": constant white.
    pub const STANDARD: usize = 0;
    /// Index of "Rainbow": hue advances 36 degrees per tick.
    pub const RAINBOW: usize = 1;
    /// Index of "Random": random color each tick.
    pub const RANDOM: usize = 2;
    /// Index of "Varying Rainbow": sine-driven hue, five ticks per second.
    pub const VARYING_RAINBOW: usize = 3;
    /// Index of "Slow Rainbow": hue advances one degree every two ticks.
    pub const SLOW_RAINBOW: usize = 4;
    /// Index of "Christmas 1": red and green.
    pub const CHRISTMAS_1: usize = 5;
    /// Index of "Christmas 2": red, green, amber and blue.
    pub const CHRISTMAS_2: usize = 6;

    /// Creates a catalog without effects.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            effects: Vec::new(),
        }
    }

    /// Creates the stock catalog.
    #[must_use]
    pub fn reference() -> Self {
        let second = Duration::from_secs(1);
        let effects = vec![
            Effect::from_parts(
                "Standard",
                second,
                Duration::from_millis(500),
                Pattern::Solid {
                    color: HsbColor::white(),
                },
            ),
            Effect::from_parts(
                "Rainbow",
                second,
                second,
                Pattern::HueStep {
                    degrees_per_tick: 36,
                },
            ),
            Effect::from_parts("Random", second, second, Pattern::Random),
            Effect::from_parts(
                "Varying Rainbow",
                Duration::from_millis(200),
                Duration::from_millis(200),
                Pattern::HueOscillation {
                    rate: 5.0,
                    amplitude: 3600.0,
                },
            ),
            Effect::from_parts(
                "Slow Rainbow",
                second,
                second,
                Pattern::HueCrawl {
                    ticks_per_degree: 2,
                },
            ),
            Effect::from_parts(
                "Christmas 1",
                second,
                Duration::ZERO,
                Pattern::Cycle {
                    colors: vec![HsbColor::red(), HsbColor::green()],
                },
            ),
            Effect::from_parts(
                "Christmas 2",
                second,
                Duration::ZERO,
                Pattern::Cycle {
                    colors: vec![
                        HsbColor::red(),
                        HsbColor::green(),
                        HsbColor::amber(),
                        HsbColor::blue(),
                    ],
                },
            ),
        ];
        Self { effects }
    }

    /// Appends an effect.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEffect` if the effect fails validation and
    /// `ConfigError::DuplicateEffect` if its name is taken.
    pub fn push(&mut self, effect: Effect) -> Result<(), ConfigError> {
        effect.validate()?;
        if self.position(effect.name()).is_some() {
            return Err(ConfigError::DuplicateEffect(effect.name().to_string()));
        }
        self.effects.push(effect);
        Ok(())
    }

    /// Appends an effect, builder style.
    ///
    /// # Errors
    ///
    /// Same as [`push`](Self::push).
    pub fn with_effect(mut self, effect: Effect) -> Result<Self, ConfigError> {
        self.push(effect)?;
        Ok(self)
    }

    /// Returns the effect at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Effect> {
        self.effects.get(index)
    }

    /// Returns the index of the effect called `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.effects.iter().position(|effect| effect.name() == name)
    }

    /// Returns the display names in catalog order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.effects.iter().map(Effect::name).collect()
    }

    /// Returns an iterator over the effects.
    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    /// Returns the number of effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Returns `true` if the catalog holds no effect.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl Default for EffectCatalog {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::error::ValueError;

    fn hue(catalog: &EffectCatalog, index: usize, tick: u64) -> f32 {
        let mut rng = StdRng::seed_from_u64(0);
        catalog.get(index).unwrap().color_at(tick, &mut rng).hue()
    }

    #[test]
    fn reference_names_in_order() {
        assert_eq!(
            EffectCatalog::reference().names(),
            vec![
                "Standard",
                "Rainbow",
                "Random",
                "Varying Rainbow",
                "Slow Rainbow",
                "Christmas 1",
                "Christmas 2"
            ]
        );
    }

    #[test]
    fn reference_timings() {
        let catalog = EffectCatalog::reference();
        let timings: Vec<_> = catalog
            .iter()
            .map(|e| (e.interval().as_millis(), e.transition().as_millis()))
            .collect();
        assert_eq!(
            timings,
            vec![
                (1000, 500),
                (1000, 1000),
                (1000, 1000),
                (200, 200),
                (1000, 1000),
                (1000, 0),
                (1000, 0)
            ]
        );
    }

    #[test]
    fn reference_entries_are_valid() {
        for effect in EffectCatalog::reference().iter() {
            assert!(effect.validate().is_ok(), "{}", effect.name());
        }
    }

    #[test]
    fn standard_is_white() {
        let catalog = EffectCatalog::reference();
        let mut rng = StdRng::seed_from_u64(0);
        let effect = catalog.get(EffectCatalog::STANDARD).unwrap();
        for tick in 0..5 {
            assert_eq!(effect.color_at(tick, &mut rng), HsbColor::white());
        }
    }

    #[test]
    fn rainbow_hue_is_36_times_tick() {
        let catalog = EffectCatalog::reference();
        for tick in 0..1_000_u64 {
            let expected = (36 * tick % 360) as f32;
            assert_eq!(hue(&catalog, EffectCatalog::RAINBOW, tick), expected);
        }
    }

    #[test]
    fn slow_rainbow_hue_is_half_tick() {
        let catalog = EffectCatalog::reference();
        for tick in 0..2_000_u64 {
            let expected = (tick / 2 % 360) as f32;
            assert_eq!(hue(&catalog, EffectCatalog::SLOW_RAINBOW, tick), expected);
        }
    }

    #[test]
    fn varying_rainbow_follows_literal_formula() {
        let catalog = EffectCatalog::reference();
        for tick in [0_u64, 1, 10, 113, 500] {
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            let raw = ((tick * 5) as f64 / (180.0 * std::f64::consts::PI)).sin() * 3600.0;
            #[allow(clippy::cast_possible_truncation)]
            let expected = HsbColor::saturated(raw as f32).hue();
            assert_eq!(hue(&catalog, EffectCatalog::VARYING_RAINBOW, tick), expected);
        }
    }

    #[test]
    fn christmas_1_alternates_two_colors() {
        let catalog = EffectCatalog::reference();
        let mut rng = StdRng::seed_from_u64(0);
        let effect = catalog.get(EffectCatalog::CHRISTMAS_1).unwrap();

        let colors: Vec<_> = (0..10).map(|t| effect.color_at(t, &mut rng)).collect();
        let distinct: HashSet<_> = colors.iter().map(|c| c.hue().to_bits()).collect();

        assert_eq!(distinct.len(), 2);
        for (tick, color) in colors.iter().enumerate() {
            assert_eq!(*color, colors[tick % 2]);
        }
        assert_eq!(colors[0], HsbColor::red());
        assert_eq!(colors[1], HsbColor::green());
    }

    #[test]
    fn christmas_2_cycles_four_colors() {
        let catalog = EffectCatalog::reference();
        let mut rng = StdRng::seed_from_u64(0);
        let effect = catalog.get(EffectCatalog::CHRISTMAS_2).unwrap();

        let colors: Vec<_> = (0..12).map(|t| effect.color_at(t, &mut rng)).collect();
        assert_eq!(
            &colors[..4],
            &[
                HsbColor::red(),
                HsbColor::green(),
                HsbColor::amber(),
                HsbColor::blue()
            ]
        );
        for (tick, color) in colors.iter().enumerate() {
            assert_eq!(*color, colors[tick % 4]);
        }
    }

    #[test]
    fn push_rejects_duplicate_name() {
        let mut catalog = EffectCatalog::reference();
        let dup = Effect::new(
            "Rainbow",
            Duration::from_secs(1),
            Duration::ZERO,
            Pattern::Random,
        )
        .unwrap();

        let result = catalog.push(dup);
        assert!(matches!(result, Err(ConfigError::DuplicateEffect(name)) if name == "Rainbow"));
        assert_eq!(catalog.len(), 7);
    }

    #[test]
    fn push_rejects_invalid_effect() {
        let mut catalog = EffectCatalog::empty();
        let bad = Effect::from_parts("Bad", Duration::ZERO, Duration::ZERO, Pattern::Random);

        let result = catalog.push(bad);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEffect(ValueError::ZeroInterval(_)))
        ));
        assert!(catalog.is_empty());
    }

    #[test]
    fn position_finds_by_name() {
        let catalog = EffectCatalog::reference();
        assert_eq!(catalog.position("Christmas 2"), Some(EffectCatalog::CHRISTMAS_2));
        assert_eq!(catalog.position("Disco"), None);
    }
}
