//! Behavior gating walkthrough
//!
//! Run with: cargo run --example behavior

use sable::{Behavior, BehaviorConfig, InputEvent, Shared};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Shared::new(BehaviorConfig::basic());
    let behavior = Behavior::with_config(config.clone());

    println!("=== Behavior module demo ===\n");
    println!(
        "status: {}",
        serde_json::to_string_pretty(&behavior.get_status()).unwrap()
    );

    let dispatch = |event: InputEvent| async move {
        println!("  -> {}", serde_json::to_string(&event).unwrap());
        Ok::<(), std::convert::Infallible>(())
    };

    println!("\nTyping with the basic preset (typing enabled):");
    behavior.type_like_human("rust", dispatch).await.unwrap();

    println!("\nMouse is disabled in the basic preset; this emits nothing:");
    behavior
        .move_mouse((0.0, 0.0), (400.0, 300.0), dispatch)
        .await
        .unwrap();
    println!("  (no events)");

    println!("\nEnabling mouse at runtime and moving again:");
    config.update(|c| c.mouse = true);
    behavior
        .move_mouse((0.0, 0.0), (400.0, 300.0), dispatch)
        .await
        .unwrap();

    println!("\nShort human pause...");
    behavior.short_wait().await;
    println!("Done!");
}
