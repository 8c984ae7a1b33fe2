//! Bridge simulation example.
//!
//! Drives a device the way a control bridge would: value writes, enable
//! presses, an early cycle press that lands inside the debounce window, then
//! a few cycles once the window has passed.
//!
//! Run with: cargo run --example bridge_sim

use std::time::Duration;

use route_cycle::{FeedbackEvent, RouteCycle, DEBOUNCE_WINDOW};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let device = RouteCycle::builder("route-cycle-1", "Lobby Cycle")
        .on_feedback(|event| match event {
            FeedbackEvent::Value { bank, index, value } => {
                println!("  {bank:<11} {index:>2} -> {value}");
            }
            FeedbackEvent::NotifyMessage(text) => println!("  notify: {text}"),
            FeedbackEvent::Enabled { .. } | FeedbackEvent::NotifyPulse(_) => {}
        })
        .build()?;

    println!("Loading sources 2, 7 and 11...");
    for (index, value) in [(2, 5), (7, 9), (11, 14)] {
        device.on_source_value_write(index, value)?;
        device.on_source_enable_toggle(index)?;
    }

    println!("Enabling destinations 0, 1...");
    device.on_destination_enable_toggle(0)?;
    device.on_destination_enable_toggle(1)?;
    device.set_in_use(true);

    println!("Cycle pressed immediately:");
    device.on_cycle_requested();

    tokio::time::sleep(DEBOUNCE_WINDOW + Duration::from_millis(100)).await;

    for pass in 1..=3 {
        println!("Cycle {pass}:");
        device.on_cycle_requested();
    }

    println!("Clearing sources:");
    device.on_clear_sources_requested();

    device.shutdown();
    Ok(())
}
