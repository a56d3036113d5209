//! Fingerprint override-script builder
//!
//! Turns a composite fingerprint map into one JavaScript snippet of property
//! overrides, intended for injection before any page script runs. A section
//! is emitted per group key present in the map, so configuration gating
//! flows through structurally: disabled groups are absent from the map and
//! produce no override.

use serde_json::Value;

use crate::fingerprint::Attributes;

fn js(value: &Value) -> String {
    // JSON literals are valid JS literals for the shapes used here.
    value.to_string()
}

fn navigator_getter(prop: &str, value: &Value) -> String {
    format!(
        "Object.defineProperty(navigator, '{prop}', {{ get: () => {}, configurable: true }});",
        js(value)
    )
}

fn screen_section(screen: &Attributes, out: &mut Vec<String>) {
    const PROPS: &[(&str, &str)] = &[
        ("width", "width"),
        ("height", "height"),
        ("availWidth", "avail_width"),
        ("availHeight", "avail_height"),
        ("colorDepth", "color_depth"),
        ("pixelDepth", "pixel_depth"),
    ];
    for (prop, key) in PROPS {
        if let Some(value) = screen.get(*key) {
            out.push(format!(
                "Object.defineProperty(screen, '{prop}', {{ get: () => {}, configurable: true }});",
                js(value)
            ));
        }
    }
}

fn timezone_section(timezone: &Attributes, out: &mut Vec<String>) {
    let (Some(name), Some(offset)) = (timezone.get("name"), timezone.get("offset_minutes"))
    else {
        return;
    };
    out.push(format!(
        r#"const origResolvedOptions = Intl.DateTimeFormat.prototype.resolvedOptions;
Intl.DateTimeFormat.prototype.resolvedOptions = function() {{
    const options = origResolvedOptions.call(this);
    options.timeZone = {name};
    return options;
}};
Date.prototype.getTimezoneOffset = function() {{ return {offset}; }};"#,
        name = js(name),
        offset = js(offset),
    ));
}

fn webgl_section(webgl: &Attributes, out: &mut Vec<String>) {
    let (Some(vendor), Some(renderer)) = (webgl.get("vendor"), webgl.get("renderer")) else {
        return;
    };
    // 37445/37446 are UNMASKED_VENDOR_WEBGL / UNMASKED_RENDERER_WEBGL.
    out.push(format!(
        r#"const origGetParameter = WebGLRenderingContext.prototype.getParameter;
WebGLRenderingContext.prototype.getParameter = function(parameter) {{
    if (parameter === 37445) return {vendor};
    if (parameter === 37446) return {renderer};
    return origGetParameter.apply(this, arguments);
}};
if (typeof WebGL2RenderingContext !== 'undefined') {{
    const origGetParameter2 = WebGL2RenderingContext.prototype.getParameter;
    WebGL2RenderingContext.prototype.getParameter = function(parameter) {{
        if (parameter === 37445) return {vendor};
        if (parameter === 37446) return {renderer};
        return origGetParameter2.apply(this, arguments);
    }};
}}"#,
        vendor = js(vendor),
        renderer = js(renderer),
    ));
}

fn fonts_section(fonts: &Attributes, out: &mut Vec<String>) {
    let Some(list) = fonts.get("fonts") else {
        return;
    };
    out.push(format!(
        r#"const knownFonts = {list};
if (document.fonts && document.fonts.check) {{
    const origCheck = document.fonts.check.bind(document.fonts);
    document.fonts.check = function(font, text) {{
        if (knownFonts.some(name => font.includes(name))) return true;
        return origCheck(font, text);
    }};
}}"#,
        list = js(list),
    ));
}

/// Build the override script for whichever groups are present in the map.
///
/// Expects the composite shape produced by
/// [`Fingerprint::get_all_fingerprints`](crate::Fingerprint::get_all_fingerprints);
/// with an empty map the result is the bare IIFE shell.
pub fn build_override_script(fingerprints: &Attributes) -> String {
    let mut sections: Vec<String> = Vec::new();

    if let Some(ua) = fingerprints
        .get("user_agents")
        .and_then(|v| v.get("user_agent"))
    {
        sections.push(navigator_getter("userAgent", ua));
    }

    if let Some(screen) = fingerprints.get("screen_sizes").and_then(Value::as_object) {
        screen_section(screen, &mut sections);
    }

    if let Some(timezone) = fingerprints.get("timezones").and_then(Value::as_object) {
        timezone_section(timezone, &mut sections);
    }

    if let Some(language) = fingerprints.get("languages").and_then(Value::as_object) {
        if let Some(primary) = language.get("language") {
            sections.push(navigator_getter("language", primary));
        }
        if let Some(list) = language.get("languages") {
            sections.push(navigator_getter("languages", list));
        }
    }

    if let Some(webgl) = fingerprints.get("webgl").and_then(Value::as_object) {
        webgl_section(webgl, &mut sections);
    }

    if let Some(plugins) = fingerprints
        .get("plugins")
        .and_then(|v| v.get("plugins"))
    {
        sections.push(format!(
            "const pluginData = {};\n{}",
            js(plugins),
            "Object.defineProperty(navigator, 'plugins', { get: () => pluginData, configurable: true });"
        ));
    }

    if let Some(hardware) = fingerprints.get("hardware").and_then(Value::as_object) {
        if let Some(concurrency) = hardware.get("hardware_concurrency") {
            sections.push(navigator_getter("hardwareConcurrency", concurrency));
        }
        if let Some(memory) = hardware.get("device_memory") {
            sections.push(navigator_getter("deviceMemory", memory));
        }
    }

    if let Some(fonts) = fingerprints.get("fonts").and_then(Value::as_object) {
        fonts_section(fonts, &mut sections);
    }

    // Wrap in IIFE
    format!("(function(){{\n{}\n}})();", sections.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FingerprintConfig, Shared};
    use crate::fingerprint::Fingerprint;

    fn full_fingerprint() -> Fingerprint {
        Fingerprint::with_config(Shared::new(FingerprintConfig::full()))
    }

    #[test]
    fn test_full_script_covers_every_group() {
        let script = full_fingerprint().override_script();
        assert!(script.contains("userAgent"));
        assert!(script.contains("availWidth"));
        assert!(script.contains("getTimezoneOffset"));
        assert!(script.contains("'languages'"));
        assert!(script.contains("37445"));
        assert!(script.contains("pluginData"));
        assert!(script.contains("hardwareConcurrency"));
        assert!(script.contains("knownFonts"));
    }

    #[test]
    fn test_script_is_wrapped_in_iife() {
        let script = full_fingerprint().override_script();
        assert!(script.starts_with("(function()"));
        assert!(script.ends_with("})();"));
    }

    #[test]
    fn test_disabled_groups_emit_nothing() {
        let fingerprint = Fingerprint::with_config(Shared::new(FingerprintConfig::minimal()));
        let script = fingerprint.override_script();
        assert!(script.contains("userAgent"));
        assert!(script.contains("'width'"));
        assert!(!script.contains("37445"));
        assert!(!script.contains("pluginData"));
        assert!(!script.contains("knownFonts"));
    }

    #[test]
    fn test_empty_map_yields_bare_shell() {
        let script = build_override_script(&Attributes::new());
        assert_eq!(script, "(function(){\n\n})();");
    }
}
