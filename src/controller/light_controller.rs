// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light controller combining registry, effect scheduling and dispatch.

use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::discovery::DiscoveryEvent;
use crate::dispatch::Dispatcher;
use crate::effect::EffectCatalog;
use crate::error::Error;
use crate::event::{ControllerEvent, EventBus};
use crate::light::Light;
use crate::registry::{LightEntry, LightRegistry};
use crate::types::{HsbColor, PowerState};

use super::config::ControllerConfig;
use super::scheduler::Scheduler;

/// Controller for a set of discovered lights.
///
/// The `LightController` is the API a presentation layer (menu, tray icon,
/// CLI) talks to. It owns the registry of discovered lights, the effect
/// scheduler and the power toggle, all guarded by a single mutex. Device
/// commands are spawned onto the Tokio runtime and never awaited, so every
/// method returns immediately.
///
/// Cloning is cheap; clones share the same state. The effect timer stops
/// when [`shutdown`](Self::shutdown) is called or the last clone is dropped.
///
/// Methods that issue device commands (effect selection, power toggle,
/// manual color) must be called from within a Tokio runtime.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use lifx_master::controller::LightController;
/// use lifx_master::effect::EffectCatalog;
/// use lifx_master::light::SimulatedLight;
///
/// #[tokio::main]
/// async fn main() -> lifx_master::Result<()> {
///     let controller = LightController::new();
///
///     controller.on_light_discovered(Arc::new(SimulatedLight::new("Lamp1")));
///     controller.set_approval("Lamp1", true)?;
///
///     controller.select_effect(EffectCatalog::RAINBOW)?;
///     controller.toggle_approved_power()?;
///
///     Ok(())
/// }
/// ```
pub struct LightController<L: Light> {
    shared: Arc<Shared<L>>,
}

/// State shared between controller clones and the effect timer task.
struct Shared<L: Light> {
    state: Mutex<ControllerState<L>>,
    catalog: EffectCatalog,
    dispatcher: Dispatcher,
    event_bus: EventBus,
    manual_transition: Duration,
}

struct ControllerState<L: Light> {
    registry: LightRegistry<L>,
    scheduler: Scheduler,
    /// Whether the approved lights are believed to be on.
    power_on: bool,
    manual_color: HsbColor,
    rng: StdRng,
}

impl<L: Light> LightController<L> {
    /// Creates a controller with the default configuration and the stock
    /// effect catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(ControllerConfig::default(), EffectCatalog::reference())
    }

    /// Creates a controller from a configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if an extra effect is invalid or reuses a name.
    pub fn with_config(config: ControllerConfig) -> Result<Self, Error> {
        let catalog = config.catalog()?;
        Ok(Self::from_parts(config, catalog))
    }

    fn from_parts(config: ControllerConfig, catalog: EffectCatalog) -> Self {
        let event_bus = EventBus::with_capacity(config.event_capacity);
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let state = ControllerState {
            registry: LightRegistry::new().with_pruning(config.prune_removed_lights),
            scheduler: Scheduler::new(),
            power_on: false,
            manual_color: config.initial_manual_color,
            rng,
        };

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                catalog,
                dispatcher: Dispatcher::new(event_bus.clone()),
                event_bus,
                manual_transition: config.manual_transition,
            }),
        }
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Subscribes to controller events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ControllerEvent> {
        self.shared.event_bus.subscribe()
    }

    // =========================================================================
    // Discovery
    // =========================================================================

    /// Records a light reported by the discovery feed.
    ///
    /// Known labels keep their approval.
    pub fn on_light_discovered(&self, light: Arc<L>) {
        let label = light.label().to_string();
        let added = {
            let mut state = self.shared.state.lock();
            let added = state.registry.on_discovered(light);
            if added {
                state.sync_power_flag();
            }
            added
        };

        if added {
            tracing::debug!(%label, "Light discovered");
            self.shared
                .event_bus
                .publish(ControllerEvent::light_discovered(label));
        }
    }

    /// Records a light that left the network.
    ///
    /// The light stops receiving commands from the next tick on.
    pub fn on_light_removed(&self, label: &str) {
        let removed = {
            let mut state = self.shared.state.lock();
            let removed = state.registry.on_removed(label);
            if removed {
                state.sync_power_flag();
            }
            removed
        };

        if removed {
            tracing::debug!(%label, "Light removed");
            self.shared
                .event_bus
                .publish(ControllerEvent::light_removed(label));
        }
    }

    /// Applies a report from the discovery feed.
    pub fn apply_discovery(&self, event: DiscoveryEvent<L>) {
        match event {
            DiscoveryEvent::Discovered(light) => self.on_light_discovered(light),
            DiscoveryEvent::Removed(light) => self.on_light_removed(light.label()),
        }
    }

    /// Spawns a task applying discovery reports until the feed closes.
    pub fn spawn_discovery_listener(
        &self,
        mut rx: mpsc::Receiver<DiscoveryEvent<L>>,
    ) -> JoinHandle<()> {
        let controller = self.clone();

        tokio::spawn(async move {
            tracing::debug!("Starting discovery listener");

            while let Some(event) = rx.recv().await {
                controller.apply_discovery(event);
            }

            tracing::debug!("Discovery listener stopped");
        })
    }

    // =========================================================================
    // Lights
    // =========================================================================

    /// Returns the discovered lights with their approval, in discovery order.
    #[must_use]
    pub fn list_lights(&self) -> Vec<LightEntry> {
        self.shared.state.lock().registry.entries()
    }

    /// Returns the approved lights, in discovery order.
    #[must_use]
    pub fn approved_lights(&self) -> Vec<Arc<L>> {
        self.shared.state.lock().registry.approved_lights()
    }

    /// Approves or disapproves a light for control.
    ///
    /// When exactly one light ends up approved, the power toggle is synced
    /// to that light's reported power state.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownLight` if the label was never discovered.
    pub fn set_approval(&self, label: &str, approved: bool) -> Result<(), Error> {
        let changed = {
            let mut state = self.shared.state.lock();
            let changed = state.registry.set_approved(label, approved)?;
            state.sync_power_flag();
            changed
        };

        if changed {
            tracing::debug!(%label, approved, "Light approval changed");
            self.shared
                .event_bus
                .publish(ControllerEvent::approval_changed(label, approved));
        }
        Ok(())
    }

    // =========================================================================
    // Effects
    // =========================================================================

    /// Returns the effect names in catalog order.
    #[must_use]
    pub fn list_effects(&self) -> Vec<String> {
        self.shared
            .catalog
            .names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Returns the effect catalog.
    #[must_use]
    pub fn effect_catalog(&self) -> &EffectCatalog {
        &self.shared.catalog
    }

    /// Starts the effect at `index`.
    ///
    /// Any running effect is cancelled first and reported as stopped. The
    /// tick counter restarts at 0, tick 0 is dispatched before this method
    /// returns, and later ticks follow at the effect's interval. Ticks with
    /// no approved light dispatch nothing.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownEffect` if `index` is outside the catalog; the
    /// running effect, if any, keeps playing.
    pub fn select_effect(&self, index: usize) -> Result<(), Error> {
        let effect = self
            .shared
            .catalog
            .get(index)
            .ok_or(Error::UnknownEffect(index))?;

        let replaced = {
            let mut guard = self.shared.state.lock();
            let state = &mut *guard;

            let replaced = state.scheduler.cancel();
            let generation = state.scheduler.begin(index);
            self.shared.render_tick(state);

            let timer = spawn_effect_timer(
                Arc::downgrade(&self.shared),
                generation,
                effect.interval(),
            );
            state.scheduler.attach(timer);
            replaced
        };

        if let Some(previous) = replaced {
            tracing::debug!(index = previous, "Effect replaced");
            self.shared
                .event_bus
                .publish(ControllerEvent::EffectStopped { index: previous });
        }

        tracing::debug!(
            index,
            effect = effect.name(),
            interval = ?effect.interval(),
            "Effect started"
        );
        self.shared
            .event_bus
            .publish(ControllerEvent::effect_started(index, effect.name()));
        Ok(())
    }

    /// Stops the active effect.
    ///
    /// Returns `true` if an effect was playing. Lights keep their last color.
    pub fn stop_effect(&self) -> bool {
        let stopped = self.shared.state.lock().scheduler.cancel();

        match stopped {
            Some(index) => {
                tracing::debug!(index, "Effect stopped");
                self.shared
                    .event_bus
                    .publish(ControllerEvent::EffectStopped { index });
                true
            }
            None => false,
        }
    }

    /// Returns the catalog index of the active effect.
    #[must_use]
    pub fn active_effect(&self) -> Option<usize> {
        self.shared.state.lock().scheduler.active_index()
    }

    /// Returns the tick the active effect will render next.
    #[must_use]
    pub fn current_tick(&self) -> Option<u64> {
        self.shared.state.lock().scheduler.current_tick()
    }

    // =========================================================================
    // Power
    // =========================================================================

    /// Switches all approved lights on or off.
    ///
    /// The direction comes from the controller's toggle flag, not from the
    /// lights, so it can drift if a light is switched elsewhere. The flag is
    /// re-read from the light whenever an approval change, a discovery or a
    /// removal leaves exactly one light approved.
    ///
    /// Returns the power state sent.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoApprovedLights` if no light is approved.
    pub fn toggle_approved_power(&self) -> Result<PowerState, Error> {
        let target = {
            let mut state = self.shared.state.lock();
            let lights = state.registry.approved_lights();
            if lights.is_empty() {
                return Err(Error::NoApprovedLights);
            }

            let target = !PowerState::from(state.power_on);
            state.power_on = target.is_on();
            self.shared.dispatcher.set_power(&lights, target);
            target
        };

        tracing::debug!(state = %target, "Approved lights toggled");
        self.shared
            .event_bus
            .publish(ControllerEvent::PowerToggled { state: target });
        Ok(target)
    }

    /// Returns `true` if the approved lights are believed to be on.
    #[must_use]
    pub fn power_toggle_state(&self) -> bool {
        self.shared.state.lock().power_on
    }

    /// Returns `true` if at least one light is approved.
    #[must_use]
    pub fn can_toggle_power(&self) -> bool {
        !self.shared.state.lock().registry.approved_lights().is_empty()
    }

    // =========================================================================
    // Manual color
    // =========================================================================

    /// Returns the current manual color.
    #[must_use]
    pub fn manual_color(&self) -> HsbColor {
        self.shared.state.lock().manual_color
    }

    /// Applies a color to all approved lights.
    ///
    /// The color is remembered as the manual color. A running effect is
    /// stopped first so it cannot overwrite the choice on its next tick.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoApprovedLights` if no light is approved. The color is
    /// still remembered and the running effect keeps playing.
    pub fn set_manual_color(&self, color: HsbColor) -> Result<(), Error> {
        self.update_manual_color(|_| Ok(color))
    }

    /// Changes the hue of the manual color and applies it.
    ///
    /// A hue of exactly 360 is the slider's end stop and maps to 0.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for a hue outside `[0, 360]`, otherwise as
    /// [`set_manual_color`](Self::set_manual_color).
    pub fn set_manual_hue(&self, hue: f32) -> Result<(), Error> {
        let hue = if (0.0..=HsbColor::MAX_HUE).contains(&hue) {
            hue % HsbColor::MAX_HUE
        } else {
            hue
        };
        self.update_manual_color(|color| color.with_hue(hue).map_err(Error::from))
    }

    /// Changes the saturation of the manual color and applies it.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for a saturation outside `[0, 1]`, otherwise as
    /// [`set_manual_color`](Self::set_manual_color).
    pub fn set_manual_saturation(&self, saturation: f32) -> Result<(), Error> {
        self.update_manual_color(|color| color.with_saturation(saturation).map_err(Error::from))
    }

    /// Changes the brightness of the manual color and applies it.
    ///
    /// # Errors
    ///
    /// Returns `Error::Value` for a brightness outside `[0, 1]`, otherwise as
    /// [`set_manual_color`](Self::set_manual_color).
    pub fn set_manual_brightness(&self, brightness: f32) -> Result<(), Error> {
        self.update_manual_color(|color| color.with_brightness(brightness).map_err(Error::from))
    }

    fn update_manual_color<F>(&self, update: F) -> Result<(), Error>
    where
        F: FnOnce(HsbColor) -> Result<HsbColor, Error>,
    {
        let (color, stopped) = {
            let mut state = self.shared.state.lock();
            let color = update(state.manual_color)?;
            state.manual_color = color;

            let lights = state.registry.approved_lights();
            if lights.is_empty() {
                return Err(Error::NoApprovedLights);
            }

            let stopped = state.scheduler.cancel();
            self.shared
                .dispatcher
                .set_color(&lights, color, self.shared.manual_transition);
            (color, stopped)
        };

        if let Some(index) = stopped {
            tracing::debug!(index, "Effect stopped by manual color");
            self.shared
                .event_bus
                .publish(ControllerEvent::EffectStopped { index });
        }
        tracing::debug!(%color, "Manual color applied");
        self.shared
            .event_bus
            .publish(ControllerEvent::ManualColorApplied { color });
        Ok(())
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Cancels the effect timer. No tick fires after this returns.
    pub fn shutdown(&self) {
        if self.shared.state.lock().scheduler.cancel().is_some() {
            tracing::debug!("Controller shut down with an active effect");
        }
    }
}

impl<L: Light> ControllerState<L> {
    /// Re-reads the toggle flag when a single light is approved.
    fn sync_power_flag(&mut self) {
        if let [only] = self.registry.approved_lights().as_slice() {
            self.power_on = only.power_state().is_on();
        }
    }
}

impl<L: Light> Shared<L> {
    /// Renders one tick of the active effect onto the approved lights.
    fn render_tick(&self, state: &mut ControllerState<L>) {
        let Some((index, tick)) = state.scheduler.advance() else {
            return;
        };
        let Some(effect) = self.catalog.get(index) else {
            return;
        };

        let color = effect.color_at(tick, &mut state.rng);
        let lights = state.registry.approved_lights();

        tracing::trace!(
            effect = effect.name(),
            tick,
            %color,
            lights = lights.len(),
            "Effect tick"
        );
        self.dispatcher
            .set_color(&lights, color, effect.transition());
    }

    /// Fires a timer tick. Returns `false` once `generation` is stale.
    fn fire(&self, generation: u64) -> bool {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        if !state.scheduler.is_current(generation) {
            return false;
        }
        self.render_tick(state);
        true
    }
}

/// Spawns the periodic task firing ticks 1, 2, ... of an effect.
fn spawn_effect_timer<L: Light>(
    shared: Weak<Shared<L>>,
    generation: u64,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;

            let Some(shared) = shared.upgrade() else {
                break;
            };
            if !shared.fire(generation) {
                break;
            }
        }
    })
}

impl<L: Light> Default for LightController<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Light> Clone for LightController<L> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<L: Light> fmt::Debug for LightController<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("LightController")
            .field("lights", &state.registry.len())
            .field("active_effect", &state.scheduler.active_index())
            .field("power_on", &state.power_on)
            .field("effects", &self.shared.catalog.len())
            .finish_non_exhaustive()
    }
}
