//! Fingerprint gating walkthrough
//!
//! Run with: cargo run --example fingerprint

use sable::{Fingerprint, FingerprintConfig, Shared};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Fingerprint module demo ===\n");

    for (name, config) in [
        ("minimal", FingerprintConfig::minimal()),
        ("basic", FingerprintConfig::basic()),
        ("full", FingerprintConfig::full()),
    ] {
        let fingerprint = Fingerprint::with_config(Shared::new(config));
        let all = fingerprint.get_all_fingerprints();
        let keys: Vec<&str> = all.keys().map(String::as_str).collect();
        println!("{name} preset -> groups {keys:?}");
    }

    let fingerprint = Fingerprint::with_config(Shared::new(FingerprintConfig::basic()));
    println!(
        "\nbasic profile:\n{}",
        serde_json::to_string_pretty(&fingerprint.get_all_fingerprints()).unwrap()
    );

    println!("\nDisabled group returns an empty map, not an error:");
    println!("  webgl -> {:?}", fingerprint.get_random_webgl());

    println!("\nEnabling webgl at runtime:");
    fingerprint.config().update(|c| c.webgl = true);
    println!(
        "  webgl -> {}",
        serde_json::to_string(&fingerprint.get_random_webgl()).unwrap()
    );

    let script = fingerprint.override_script();
    println!(
        "\nOverride script ({} bytes), first lines:\n{}",
        script.len(),
        script.lines().take(4).collect::<Vec<_>>().join("\n")
    );
}
