//! Walkthrough of the registry: registration, spam rejection and the
//! most-clicked query.
//!
//! Run with `cargo run --example driver`. Registry events are logged at
//! DEBUG and WARN.

use flyer_clicks::{Flyer, InMemoryRegistry, RegistryError};
use tracing::Level;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .init();

    println!("=== Flyer Click Tracking ===\n");

    let registry = InMemoryRegistry::builder().build()?;

    // Every flyer: 5-unit trailing window, at most 3 clicks inside it
    for id in ["1", "2", "3"] {
        registry.add_flyer(Flyer::new(id, 5, 3)?)?;
    }

    match registry.add_flyer(Flyer::new("1", 5, 3)?) {
        Err(err @ RegistryError::FlyerAlreadyExists(_)) => println!("Expected: {}\n", err),
        other => println!("Unexpected result: {:?}\n", other),
    }

    println!("Flyer 1 receives clicks at 1 and 5:");
    for t in [1, 5] {
        registry.record_click("1", t)?;
    }

    println!("\nFlyer 2 receives clicks at 1, 3, 4, 4, 5:");
    for t in [1, 3, 4, 4, 5] {
        if let Err(err) = registry.record_click("2", t) {
            println!("  t={}: {}", t, err);
        }
    }

    println!("\nClick counts in [1, 4]:");
    for entry in registry.ranking(1, 4) {
        println!("  flyer {}: {}", entry.id, entry.clicks);
    }

    let leader = registry.most_clicked(1, 4)?;
    println!("\nMost clicked in [1, 4]: flyer {} ({} clicks)", leader.id, leader.clicks);

    match registry.most_clicked(100, 200) {
        Err(RegistryError::NoQualifyingFlyer) => {
            println!("No flyer has clicks in [100, 200]")
        }
        other => println!("Unexpected result: {:?}", other),
    }

    let snapshot = registry.metrics().snapshot();
    println!(
        "\nAccepted {} clicks, rejected {} ({:.0}% rejected)",
        snapshot.clicks_accepted,
        snapshot.clicks_rejected,
        snapshot.rejection_rate() * 100.0
    );

    println!("\n=== Done ===");
    Ok(())
}
