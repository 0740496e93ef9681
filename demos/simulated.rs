// SPDX-License-Identifier: MPL-2.0

//! Demo program: play effects on simulated bulbs and print controller events.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example simulated -- [effect-index] [seconds]
//! ```
//!
//! # Example
//!
//! ```bash
//! RUST_LOG=lifx_master=debug cargo run --example simulated -- 1 5
//! ```

use std::env;
use std::sync::Arc;
use std::time::Duration;

use lifx_master::discovery;
use lifx_master::{
    ControllerConfig, EffectCatalog, HsbColor, Light, LightController, SimulatedLight,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let effect: usize = match args.get(1) {
        Some(arg) => arg.parse()?,
        None => EffectCatalog::RAINBOW,
    };
    let seconds: u64 = match args.get(2) {
        Some(arg) => arg.parse()?,
        None => 5,
    };

    let config = ControllerConfig::new().with_manual_transition(Duration::from_millis(250));
    let controller = LightController::with_config(config)?;

    let mut events = controller.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            println!("event: {event:?}");
        }
    });

    println!("Available effects:");
    for (index, name) in controller.list_effects().iter().enumerate() {
        println!("  {index}: {name}");
    }

    let (feed, rx) = discovery::channel(8);
    let listener = controller.spawn_discovery_listener(rx);

    let kitchen = Arc::new(SimulatedLight::new("Kitchen"));
    let desk = Arc::new(SimulatedLight::new("Desk"));
    feed.discovered(Arc::clone(&kitchen)).await?;
    feed.discovered(Arc::clone(&desk)).await?;
    drop(feed);
    listener.await?;

    for entry in controller.list_lights() {
        controller.set_approval(&entry.label, true)?;
    }

    println!("Switching approved lights: {}", controller.toggle_approved_power()?);
    controller.select_effect(effect)?;

    tokio::time::sleep(Duration::from_secs(seconds)).await;

    println!("Stopping effect with a manual color");
    controller.set_manual_color(HsbColor::amber())?;
    tokio::time::sleep(Duration::from_millis(100)).await;

    for light in [&kitchen, &desk] {
        println!(
            "{} received {} colors, now {}",
            light.label(),
            light.color_history().len(),
            light.color()
        );
    }

    controller.shutdown();
    Ok(())
}
