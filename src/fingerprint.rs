//! Browser fingerprint generation
//!
//! Randomized fingerprint attributes drawn from pools of realistic values,
//! gated per group by a [`FingerprintConfig`]. Every getter returns a JSON
//! object map; a disabled group yields an empty map, never an error.

use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::{json, Value};

use crate::config::{FingerprintConfig, Shared};
use crate::status::ModuleStatus;

/// Attribute map returned by every fingerprint getter.
///
/// Empty when the getter's capability group is disabled.
pub type Attributes = serde_json::Map<String, Value>;

/// Chrome versions (recent, realistic)
const CHROME_VERSIONS: &[&str] = &[
    "126.0.0.0",
    "127.0.0.0",
    "128.0.0.0",
    "129.0.0.0",
    "130.0.0.0",
    "131.0.0.0",
    "132.0.0.0",
    "133.0.0.0",
    "134.0.0.0",
];

/// macOS versions as they appear in user agents
const MACOS_VERSIONS: &[&str] = &[
    "10_15_7", "12_6_0", "13_4_0", "14_0_0", "14_2_0", "14_4_0", "15_0_0",
];

/// Screen resolutions, desktop-weighted
const SCREEN_RESOLUTIONS: &[(u32, u32)] = &[
    (1920, 1080),
    (2560, 1440),
    (3840, 2160),
    (1366, 768),
    (1440, 900),
    (1536, 864),
    (1680, 1050),
    (2560, 1600),
    (2880, 1800),
];

/// IANA timezone names with their standard `getTimezoneOffset` minutes
const TIMEZONES: &[(&str, i32)] = &[
    ("America/New_York", 300),
    ("America/Chicago", 360),
    ("America/Denver", 420),
    ("America/Los_Angeles", 480),
    ("Europe/London", 0),
    ("Europe/Berlin", -60),
    ("Europe/Paris", -60),
    ("Asia/Tokyo", -540),
    ("Australia/Sydney", -600),
];

/// Primary language with its accept-language list
const LANGUAGE_SETS: &[(&str, &[&str])] = &[
    ("en-US", &["en-US", "en"]),
    ("en-GB", &["en-GB", "en"]),
    ("de-DE", &["de-DE", "de", "en"]),
    ("fr-FR", &["fr-FR", "fr", "en"]),
    ("es-ES", &["es-ES", "es", "en"]),
];

/// WebGL vendor paired with a renderer from the same hardware family
const WEBGL_PAIRS: &[(&str, &str)] = &[
    ("Google Inc. (Apple)", "ANGLE (Apple, Apple M1, OpenGL 4.1)"),
    ("Google Inc. (Apple)", "ANGLE (Apple, Apple M2, OpenGL 4.1)"),
    ("Google Inc. (Apple)", "ANGLE (Apple, Apple M3 Pro, OpenGL 4.1)"),
    (
        "Google Inc. (NVIDIA)",
        "ANGLE (NVIDIA, NVIDIA GeForce RTX 3080 Direct3D11 vs_5_0 ps_5_0)",
    ),
    (
        "Google Inc. (NVIDIA)",
        "ANGLE (NVIDIA, NVIDIA GeForce RTX 4070 Direct3D11 vs_5_0 ps_5_0)",
    ),
    (
        "Google Inc. (AMD)",
        "ANGLE (AMD, AMD Radeon RX 6800 XT Direct3D11 vs_5_0 ps_5_0)",
    ),
    (
        "Google Inc. (Intel)",
        "ANGLE (Intel, Intel(R) UHD Graphics 630 Direct3D11 vs_5_0 ps_5_0)",
    ),
];

/// Plugin entries as Chrome reports them: name, description, filename
const PLUGINS: &[(&str, &str, &str)] = &[
    ("PDF Viewer", "Portable Document Format", "internal-pdf-viewer"),
    (
        "Chrome PDF Viewer",
        "Portable Document Format",
        "internal-pdf-viewer",
    ),
    (
        "Chromium PDF Viewer",
        "Portable Document Format",
        "internal-pdf-viewer",
    ),
    (
        "Microsoft Edge PDF Viewer",
        "Portable Document Format",
        "internal-pdf-viewer",
    ),
    (
        "WebKit built-in PDF",
        "Portable Document Format",
        "internal-pdf-viewer",
    ),
];

const HARDWARE_CONCURRENCY: &[u32] = &[4, 6, 8, 10, 12, 16];
const DEVICE_MEMORY: &[u32] = &[4, 8, 16, 32];

/// Common fonts across Windows and macOS installs
const FONTS: &[&str] = &[
    "Arial",
    "Arial Black",
    "Calibri",
    "Cambria",
    "Comic Sans MS",
    "Consolas",
    "Courier New",
    "Georgia",
    "Helvetica",
    "Helvetica Neue",
    "Impact",
    "Segoe UI",
    "Tahoma",
    "Times New Roman",
    "Trebuchet MS",
    "Verdana",
];

fn fields(value: Value) -> Attributes {
    match value {
        Value::Object(map) => map,
        _ => Attributes::new(),
    }
}

/// Random realistic Chrome user agent (60% macOS, 40% Windows).
pub fn random_user_agent() -> Attributes {
    let mut rng = rand::thread_rng();
    let chrome = CHROME_VERSIONS.choose(&mut rng).unwrap();

    let user_agent = if rng.gen_bool(0.6) {
        let macos = MACOS_VERSIONS.choose(&mut rng).unwrap();
        format!(
            "Mozilla/5.0 (Macintosh; Intel Mac OS X {macos}) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{chrome} Safari/537.36"
        )
    } else {
        format!(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{chrome} Safari/537.36"
        )
    };

    fields(json!({ "user_agent": user_agent }))
}

/// Random screen attributes. Available height accounts for a taskbar.
pub fn random_screen_size() -> Attributes {
    let mut rng = rand::thread_rng();
    let (width, height) = *SCREEN_RESOLUTIONS.choose(&mut rng).unwrap();

    fields(json!({
        "width": width,
        "height": height,
        "avail_width": width,
        "avail_height": height.saturating_sub(40),
        "color_depth": 24,
        "pixel_depth": 24,
    }))
}

/// Random timezone name with its offset in minutes.
pub fn random_timezone() -> Attributes {
    let mut rng = rand::thread_rng();
    let (name, offset_minutes) = *TIMEZONES.choose(&mut rng).unwrap();

    fields(json!({ "name": name, "offset_minutes": offset_minutes }))
}

/// Random primary language with its accept-language list.
pub fn random_language() -> Attributes {
    let mut rng = rand::thread_rng();
    let (language, languages) = *LANGUAGE_SETS.choose(&mut rng).unwrap();

    fields(json!({ "language": language, "languages": languages }))
}

/// Random WebGL vendor/renderer pair, consistent within one hardware family.
pub fn random_webgl() -> Attributes {
    let mut rng = rand::thread_rng();
    let (vendor, renderer) = *WEBGL_PAIRS.choose(&mut rng).unwrap();

    fields(json!({ "vendor": vendor, "renderer": renderer }))
}

/// Plugin list as Chrome exposes it.
pub fn random_plugins() -> Attributes {
    let plugins: Vec<Value> = PLUGINS
        .iter()
        .map(|(name, description, filename)| {
            json!({ "name": name, "description": description, "filename": filename })
        })
        .collect();

    fields(json!({ "plugins": plugins }))
}

/// Random hardware concurrency and device memory.
pub fn random_hardware() -> Attributes {
    let mut rng = rand::thread_rng();
    let concurrency = *HARDWARE_CONCURRENCY.choose(&mut rng).unwrap();
    let memory = *DEVICE_MEMORY.choose(&mut rng).unwrap();

    fields(json!({
        "hardware_concurrency": concurrency,
        "device_memory": memory,
    }))
}

/// Random subset of common fonts, in stable order.
pub fn random_fonts() -> Attributes {
    let mut rng = rand::thread_rng();
    let count = rng.gen_range(10..=FONTS.len());
    let mut picked: Vec<&str> = FONTS
        .choose_multiple(&mut rng, count)
        .copied()
        .collect();
    picked.sort_unstable();

    fields(json!({ "fonts": picked }))
}

/// Fingerprint capability module.
///
/// Binds a shared [`FingerprintConfig`] to the attribute generators. Safe to
/// call unconditionally: a disabled group returns an empty map, and no
/// getter fails because of configuration state.
#[derive(Debug, Clone)]
pub struct Fingerprint {
    config: Shared<FingerprintConfig>,
}

impl Fingerprint {
    /// Module with a fresh all-disabled record.
    pub fn new() -> Self {
        Self::with_config(Shared::default())
    }

    /// Module bound to an existing shared record.
    ///
    /// Modules built from clones of one handle share the record: a flag
    /// flipped through any of them is visible to all on the next call.
    pub fn with_config(config: Shared<FingerprintConfig>) -> Self {
        Self { config }
    }

    /// Handle to the bound record, for runtime mutation.
    pub fn config(&self) -> Shared<FingerprintConfig> {
        self.config.clone()
    }

    fn gate(
        &self,
        flag: fn(&FingerprintConfig) -> bool,
        group: &'static str,
        generate: fn() -> Attributes,
    ) -> Attributes {
        if !self.config.read(flag) {
            tracing::trace!("fingerprint group '{}' disabled, returning empty", group);
            return Attributes::new();
        }
        generate()
    }

    /// User-agent attributes; empty when `user_agents` is disabled.
    pub fn get_random_user_agent(&self) -> Attributes {
        self.gate(|c| c.user_agents, "user_agents", random_user_agent)
    }

    /// Screen attributes; empty when `screen_sizes` is disabled.
    pub fn get_random_screen_size(&self) -> Attributes {
        self.gate(|c| c.screen_sizes, "screen_sizes", random_screen_size)
    }

    /// Timezone attributes; empty when `timezones` is disabled.
    pub fn get_random_timezone(&self) -> Attributes {
        self.gate(|c| c.timezones, "timezones", random_timezone)
    }

    /// Language attributes; empty when `languages` is disabled.
    pub fn get_random_language(&self) -> Attributes {
        self.gate(|c| c.languages, "languages", random_language)
    }

    /// WebGL attributes; empty when `webgl` is disabled.
    pub fn get_random_webgl(&self) -> Attributes {
        self.gate(|c| c.webgl, "webgl", random_webgl)
    }

    /// Plugin attributes; empty when `plugins` is disabled.
    pub fn get_random_plugins(&self) -> Attributes {
        self.gate(|c| c.plugins, "plugins", random_plugins)
    }

    /// Hardware attributes; empty when `hardware` is disabled.
    pub fn get_random_hardware(&self) -> Attributes {
        self.gate(|c| c.hardware, "hardware", random_hardware)
    }

    /// Font attributes; empty when `fonts` is disabled.
    pub fn get_random_fonts(&self) -> Attributes {
        self.gate(|c| c.fonts, "fonts", random_fonts)
    }

    /// Composite of every enabled group, keyed by group name.
    ///
    /// Calls each getter in registry order and keeps only non-empty
    /// results, so the key set is exactly the set of enabled groups. Flags
    /// are read per group; a concurrent writer may be observed partway
    /// through the iteration.
    pub fn get_all_fingerprints(&self) -> Attributes {
        let mut all = Attributes::new();
        for (group, attrs) in [
            ("user_agents", self.get_random_user_agent()),
            ("screen_sizes", self.get_random_screen_size()),
            ("timezones", self.get_random_timezone()),
            ("languages", self.get_random_language()),
            ("webgl", self.get_random_webgl()),
            ("plugins", self.get_random_plugins()),
            ("hardware", self.get_random_hardware()),
            ("fonts", self.get_random_fonts()),
        ] {
            if !attrs.is_empty() {
                all.insert(group.to_string(), Value::Object(attrs));
            }
        }
        all
    }

    /// JS override script for every enabled group.
    ///
    /// Convenience over [`crate::inject::build_override_script`] applied to
    /// [`get_all_fingerprints`](Self::get_all_fingerprints).
    pub fn override_script(&self) -> String {
        crate::inject::build_override_script(&self.get_all_fingerprints())
    }

    /// Registry listing plus a copy of the current flags.
    pub fn get_status(&self) -> ModuleStatus {
        ModuleStatus::new(FingerprintConfig::GROUPS, self.config.read(|c| c.flags()))
    }
}

impl Default for Fingerprint {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_format() {
        for _ in 0..20 {
            let attrs = random_user_agent();
            let ua = attrs["user_agent"].as_str().unwrap();
            assert!(ua.starts_with("Mozilla/5.0"));
            assert!(ua.contains("Chrome/"));
            assert!(ua.contains("Safari/537.36"));
        }
    }

    #[test]
    fn test_screen_size_from_pool() {
        let attrs = random_screen_size();
        let width = attrs["width"].as_u64().unwrap() as u32;
        let height = attrs["height"].as_u64().unwrap() as u32;
        assert!(SCREEN_RESOLUTIONS.contains(&(width, height)));
        assert_eq!(attrs["avail_height"].as_u64().unwrap() as u32, height - 40);
    }

    #[test]
    fn test_webgl_pair_consistent() {
        for _ in 0..20 {
            let attrs = random_webgl();
            let vendor = attrs["vendor"].as_str().unwrap();
            let renderer = attrs["renderer"].as_str().unwrap();
            assert!(WEBGL_PAIRS
                .iter()
                .any(|(v, r)| *v == vendor && *r == renderer));
        }
    }

    #[test]
    fn test_timezone_from_pool() {
        let attrs = random_timezone();
        let name = attrs["name"].as_str().unwrap();
        let offset = attrs["offset_minutes"].as_i64().unwrap() as i32;
        assert!(TIMEZONES.contains(&(name, offset)));
    }

    #[test]
    fn test_fonts_sorted_subset() {
        let attrs = random_fonts();
        let fonts: Vec<&str> = attrs["fonts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert!(fonts.len() >= 10);
        let mut sorted = fonts.clone();
        sorted.sort_unstable();
        assert_eq!(fonts, sorted);
        assert!(fonts.iter().all(|f| FONTS.contains(f)));
    }

    #[test]
    fn test_disabled_getter_returns_empty_map() {
        let fingerprint = Fingerprint::new();
        assert!(fingerprint.get_random_user_agent().is_empty());
        assert!(fingerprint.get_random_webgl().is_empty());
        // Idempotent: repeated disabled calls stay empty.
        assert!(fingerprint.get_random_webgl().is_empty());
    }

    #[test]
    fn test_enabled_getter_returns_attributes() {
        let fingerprint = Fingerprint::with_config(Shared::new(FingerprintConfig::full()));
        let hardware = fingerprint.get_random_hardware();
        assert!(HARDWARE_CONCURRENCY
            .contains(&(hardware["hardware_concurrency"].as_u64().unwrap() as u32)));
        assert!(DEVICE_MEMORY.contains(&(hardware["device_memory"].as_u64().unwrap() as u32)));
    }

    #[test]
    fn test_aggregate_keys_equal_enabled_groups() {
        let fingerprint = Fingerprint::with_config(Shared::new(FingerprintConfig::basic()));
        let all = fingerprint.get_all_fingerprints();
        let keys: Vec<&str> = all.keys().map(String::as_str).collect();
        let mut expected = vec!["user_agents", "screen_sizes", "timezones", "languages"];
        expected.sort_unstable();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_aggregate_empty_when_all_disabled() {
        let fingerprint = Fingerprint::new();
        assert!(fingerprint.get_all_fingerprints().is_empty());
    }

    #[test]
    fn test_mutation_changes_next_call() {
        let fingerprint = Fingerprint::new();
        let config = fingerprint.config();

        config.update(|c| c.webgl = true);
        assert!(!fingerprint.get_random_webgl().is_empty());

        config.update(|c| c.webgl = false);
        assert!(fingerprint.get_random_webgl().is_empty());
    }

    #[test]
    fn test_status_available_constant_across_configs() {
        let disabled = Fingerprint::new();
        let enabled = Fingerprint::with_config(Shared::new(FingerprintConfig::full()));
        assert_eq!(
            disabled.get_status().available,
            enabled.get_status().available
        );
    }
}
