//! # Sable
//!
//! Configurable human-behavior simulation and browser-fingerprint
//! generation for stealth automation.
//!
//! Two capability modules share one pattern: a record of per-group boolean
//! switches ([`BehaviorConfig`], [`FingerprintConfig`]) drives a module
//! whose every operation is safe to call unconditionally. A disabled group
//! degrades its operations to no-ops and empty results; configuration gates
//! behavior, never validity.
//!
//! ## Features
//!
//! - **Runtime-togglable** - flip a flag on a shared record, the next call of
//!   every module bound to it sees the change
//! - **Human behavior** - jittered waits, bezier pointer paths, scroll and
//!   keystroke pacing
//! - **Fingerprints** - randomized user agent, screen, timezone, language,
//!   WebGL, plugins, hardware and fonts, plus a JS override-script builder
//! - **Backend-neutral** - imperative operations emit events through a
//!   caller-supplied dispatch function; any automation backend fits
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sable::{Behavior, BehaviorConfig, Fingerprint, FingerprintConfig, Shared};
//!
//! #[tokio::main]
//! async fn main() {
//!     let behavior = Behavior::with_config(Shared::new(BehaviorConfig::basic()));
//!
//!     // Enabled: paced keystrokes flow through the dispatch function.
//!     behavior
//!         .type_like_human("rust tutorial", |event| async move {
//!             println!("{event:?}");
//!             Ok::<(), std::convert::Infallible>(())
//!         })
//!         .await
//!         .unwrap();
//!
//!     // Disabled groups are safe no-ops, not errors.
//!     behavior
//!         .move_mouse((0.0, 0.0), (400.0, 300.0), |_| async { Ok::<(), ()>(()) })
//!         .await
//!         .unwrap();
//!
//!     let fingerprint = Fingerprint::with_config(Shared::new(FingerprintConfig::full()));
//!     let profile = fingerprint.get_all_fingerprints();
//!     println!("{}", serde_json::to_string_pretty(&profile).unwrap());
//! }
//! ```
//!
//! ## Shared configuration
//!
//! ```rust
//! use sable::{Fingerprint, FingerprintConfig, Shared};
//!
//! let config = Shared::new(FingerprintConfig::minimal());
//! let fingerprint = Fingerprint::with_config(config.clone());
//!
//! assert!(fingerprint.get_random_webgl().is_empty());
//! config.update(|c| c.webgl = true);
//! assert!(!fingerprint.get_random_webgl().is_empty());
//! ```

pub mod behavior;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod inject;
pub mod input;
pub mod status;

// Re-exports
pub use behavior::{Behavior, Point, PointVec, ScrollStep};
pub use config::{BehaviorConfig, FingerprintConfig, Shared};
pub use error::{Error, Result};
pub use fingerprint::{Attributes, Fingerprint};
pub use inject::build_override_script;
pub use input::{InputEvent, MouseButton};
pub use status::ModuleStatus;
