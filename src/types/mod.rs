// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for light control.
//!
//! Each type ensures values are within their valid ranges at construction
//! time.
//!
//! # Types
//!
//! - [`HsbColor`] - HSB color (Hue 0-360, Saturation 0-1, Brightness 0-1)
//! - [`PowerState`] - On/Off power state

mod color;
pub(crate) mod millis;
mod power;

pub use color::HsbColor;
pub use power::PowerState;
