// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge between an external discovery source and the controller.
//!
//! The vendor SDK that finds bulbs on the network reports lights appearing
//! and disappearing from its own threads. It pushes those reports into a
//! [`DiscoveryFeed`]; the controller drains the matching receiver with
//! [`LightController::spawn_discovery_listener`](crate::controller::LightController::spawn_discovery_listener).
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use lifx_master::controller::LightController;
//! use lifx_master::discovery;
//! use lifx_master::light::SimulatedLight;
//!
//! # async fn example() -> lifx_master::Result<()> {
//! let controller = LightController::<SimulatedLight>::new();
//! let (feed, rx) = discovery::channel(32);
//! controller.spawn_discovery_listener(rx);
//!
//! feed.discovered(Arc::new(SimulatedLight::new("Lamp1"))).await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::Error;
use crate::light::Light;

/// A report from the discovery source.
pub enum DiscoveryEvent<L> {
    /// A light appeared on the network.
    Discovered(Arc<L>),
    /// A light left the network.
    Removed(Arc<L>),
}

impl<L: Light> DiscoveryEvent<L> {
    /// Returns the label of the light concerned.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Discovered(light) | Self::Removed(light) => light.label(),
        }
    }
}

impl<L: Light> fmt::Debug for DiscoveryEvent<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discovered(light) => f.debug_tuple("Discovered").field(&light.label()).finish(),
            Self::Removed(light) => f.debug_tuple("Removed").field(&light.label()).finish(),
        }
    }
}

/// Sending half handed to the discovery source.
pub struct DiscoveryFeed<L> {
    sender: mpsc::Sender<DiscoveryEvent<L>>,
}

impl<L: Light> DiscoveryFeed<L> {
    /// Reports a discovered light.
    ///
    /// # Errors
    ///
    /// Returns `Error::DiscoveryClosed` if the listener has stopped.
    pub async fn discovered(&self, light: Arc<L>) -> Result<(), Error> {
        self.send(DiscoveryEvent::Discovered(light)).await
    }

    /// Reports a removed light.
    ///
    /// # Errors
    ///
    /// Returns `Error::DiscoveryClosed` if the listener has stopped.
    pub async fn removed(&self, light: Arc<L>) -> Result<(), Error> {
        self.send(DiscoveryEvent::Removed(light)).await
    }

    /// Reports a discovery event without waiting, for use from SDK threads
    /// outside the runtime.
    ///
    /// # Errors
    ///
    /// Returns `Error::DiscoveryClosed` if the listener has stopped.
    pub fn blocking_send(&self, event: DiscoveryEvent<L>) -> Result<(), Error> {
        self.sender
            .blocking_send(event)
            .map_err(|_| Error::DiscoveryClosed)
    }

    async fn send(&self, event: DiscoveryEvent<L>) -> Result<(), Error> {
        self.sender
            .send(event)
            .await
            .map_err(|_| Error::DiscoveryClosed)
    }
}

impl<L> Clone for DiscoveryFeed<L> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<L> fmt::Debug for DiscoveryFeed<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoveryFeed").finish_non_exhaustive()
    }
}

/// Creates a bounded discovery channel.
///
/// A zero capacity is raised to one.
#[must_use]
pub fn channel<L: Light>(capacity: usize) -> (DiscoveryFeed<L>, mpsc::Receiver<DiscoveryEvent<L>>) {
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    (DiscoveryFeed { sender }, receiver)
}
