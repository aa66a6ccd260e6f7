//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Values are layered:
//!
//! ```text
//! stock defaults  →  site/config.toml  →  environment (PORT, ALTONA_HOST)
//! ```
//!
//! The environment layer only applies to `serve`; `build` and `check` read
//! the file alone.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Villa Altona Goa"
//! tagline = "A private pool villa in North Goa"
//! description = "..."          # Markdown, rendered under the gallery
//! contact_email = "stay@villaaltonagoa.com"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [animation]
//! enter_ms = 300               # Lightbox fade/scale in
//! exit_ms = 200                # Lightbox fade out
//! hover_scale = 1.05           # Grid tile zoom on hover
//!
//! [colors.light]
//! background = "#faf7f2"
//! text = "#1f1a14"
//! text_muted = "#6b6257"
//! border = "#e6dfd3"
//! accent = "#0f766e"           # Call-to-action button
//! overlay = "rgba(0, 0, 0, 0.92)"
//!
//! [colors.dark]
//! ...
//!
//! [backend]
//! project_id = "villa-altona-goa"
//! storage_bucket = "villa-altona-goa.appspot.com"
//!
//! [[images]]                   # Replaces the stock gallery when present
//! url = "/images/villa-exterior.jpg"
//! title = "Villa Exterior"
//! category = "Exterior"
//! ```
//!
//! Config files are sparse and unknown keys are rejected to catch typos early.

use crate::backend::{BackendConfig, BackendError};
use crate::gallery::{Gallery, sample_gallery};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

impl From<BackendError> for ConfigError {
    fn from(err: BackendError) -> Self {
        ConfigError::Validation(err.to_string())
    }
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Listing copy shown in the page header and intro.
    pub site: SiteInfo,
    /// Static file server settings.
    pub server: ServerConfig,
    /// Lightbox and grid animation timings.
    pub animation: AnimationConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Managed backend project identity.
    pub backend: BackendConfig,
    /// Gallery override. The stock villa gallery is used when absent, and
    /// an empty list fails to parse.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Gallery>,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port must be non-zero".into()));
        }
        if !(self.animation.hover_scale > 0.0 && self.animation.hover_scale <= 2.0) {
            return Err(ConfigError::Validation("animation.hover_scale must be in (0, 2]".into()));
        }
        self.backend.validate()?;
        Ok(())
    }

    /// The gallery this site shows: the configured images, or the stock set.
    pub fn gallery(&self) -> Gallery {
        self.images.clone().unwrap_or_else(sample_gallery)
    }
}

/// Listing copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub title: String,
    pub tagline: String,
    /// Markdown.
    pub description: String,
    pub contact_email: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Villa Altona Goa".to_string(),
            tagline: "A private pool villa in North Goa".to_string(),
            description: "Four bedrooms, a private pool and a garden a short walk \
                          from the beach. **Sleeps eight.**"
                .to_string(),
            contact_email: "stay@villaaltonagoa.com".to_string(),
        }
    }
}

/// Static file server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address. `0.0.0.0` listens on all interfaces.
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Animation timings. Purely cosmetic; the viewer state never waits on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    pub enter_ms: u32,
    pub exit_ms: u32,
    pub hover_scale: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enter_ms: 300,
            exit_ms: 200,
            hover_scale: 1.05,
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Captions, category labels, image counter.
    pub text_muted: String,
    pub border: String,
    /// Call-to-action button.
    pub accent: String,
    /// Lightbox backdrop.
    pub overlay: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#faf7f2".to_string(),
            text: "#1f1a14".to_string(),
            text_muted: "#6b6257".to_string(),
            border: "#e6dfd3".to_string(),
            accent: "#0f766e".to_string(),
            overlay: "rgba(0, 0, 0, 0.92)".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#12100d".to_string(),
            text: "#f2ede4".to_string(),
            text_muted: "#a39a8c".to_string(),
            border: "#2e2a24".to_string(),
            accent: "#2dd4bf".to_string(),
            overlay: "rgba(0, 0, 0, 0.95)".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        debug!("no config.toml in {}, using stock defaults", path.display());
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Apply environment overrides on top of a resolved config.
///
/// `PORT` sets the server port, `ALTONA_HOST` the bind address. Invalid
/// values are logged and ignored. `lookup` is `std::env::var` in production.
pub fn apply_env_overrides<F>(config: &mut SiteConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup("PORT") {
        match raw.trim().parse::<u16>() {
            Ok(port) => {
                info!("PORT set, serving on port {port}");
                config.server.port = port;
            }
            Err(e) => warn!("Invalid PORT value {raw:?}: {e}"),
        }
    }
    if let Some(host) = lookup("ALTONA_HOST") {
        if host.trim().is_empty() {
            warn!("ALTONA_HOST is empty, keeping {}", config.server.host);
        } else {
            config.server.host = host.trim().to_string();
        }
    }
}

/// Merge `config.toml` (if any) over the stock defaults, rejecting unknown keys.
fn resolve_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let merged = match load_raw_config(root)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    Ok(merged.try_into()?)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys, and
/// validates the result. The environment is not consulted.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config = resolve_config(root)?;
    config.validate()?;
    Ok(config)
}

/// Load config for `serve`: like [`load_config`], with the `PORT` and
/// `ALTONA_HOST` overrides from `lookup` applied before validation.
pub fn load_serve_config<F>(root: &Path, lookup: F) -> Result<SiteConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = resolve_config(root)?;
    apply_env_overrides(&mut config, lookup);
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Villa Altona Goa site configuration
# ===================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Listing copy
# ---------------------------------------------------------------------------
[site]
title = "Villa Altona Goa"
tagline = "A private pool villa in North Goa"
# Markdown, rendered below the gallery.
description = "Four bedrooms, a private pool and a garden a short walk from the beach. **Sleeps eight.**"
contact_email = "stay@villaaltonagoa.com"

# ---------------------------------------------------------------------------
# Static file server
# ---------------------------------------------------------------------------
[server]
# 0.0.0.0 listens on all interfaces. ALTONA_HOST overrides.
host = "0.0.0.0"
# PORT overrides.
port = 8080

# ---------------------------------------------------------------------------
# Animation (cosmetic only)
# ---------------------------------------------------------------------------
[animation]
enter_ms = 300
exit_ms = 200
# Grid tile zoom on hover, in (0, 2].
hover_scale = 1.05

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#faf7f2"
text = "#1f1a14"
text_muted = "#6b6257"    # Captions, categories, counter
border = "#e6dfd3"
accent = "#0f766e"        # Call-to-action button
overlay = "rgba(0, 0, 0, 0.92)"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#12100d"
text = "#f2ede4"
text_muted = "#a39a8c"
border = "#2e2a24"
accent = "#2dd4bf"
overlay = "rgba(0, 0, 0, 0.95)"

# ---------------------------------------------------------------------------
# Managed backend project (written to backend.json for the browser)
# ---------------------------------------------------------------------------
[backend]
api_key = ""
auth_domain = "villa-altona-goa.firebaseapp.com"
project_id = "villa-altona-goa"
storage_bucket = "villa-altona-goa.appspot.com"
messaging_sender_id = ""
app_id = ""
auth_host = "https://identitytoolkit.googleapis.com"
documents_host = "https://firestore.googleapis.com"
storage_host = "https://firebasestorage.googleapis.com"

# ---------------------------------------------------------------------------
# Gallery
# ---------------------------------------------------------------------------
# Uncomment to replace the stock gallery. The first image is the hero, the
# next four fill the grid, and all of them open in the lightbox.
#
# [[images]]
# url = "/images/villa-exterior.jpg"
# title = "Villa Exterior"
# category = "Exterior"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_text_muted};
    --color-border: {light_border};
    --color-accent: {light_accent};
    --color-overlay: {light_overlay};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_text_muted};
        --color-border: {dark_border};
        --color-accent: {dark_accent};
        --color-overlay: {dark_overlay};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_text_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_accent = colors.light.accent,
        light_overlay = colors.light.overlay,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_text_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_accent = colors.dark.accent,
        dark_overlay = colors.dark.overlay,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.site.title, "Villa Altona Goa");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.animation.enter_ms, 300);
        assert!(config.images.is_none());
    }

    #[test]
    fn default_config_uses_sample_gallery() {
        let gallery = SiteConfig::default().gallery();
        assert_eq!(gallery.len(), 8);
        assert_eq!(gallery.hero().title, "Villa Exterior");
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[colors.light]
accent = "#ff6600"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.colors.light.accent, "#ff6600");
        assert_eq!(config.colors.light.background, "#faf7f2");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn parse_image_override() {
        let toml = r##"
[[images]]
url = "/img/a.jpg"
title = "Terrace"
category = "Outdoor"

[[images]]
url = "/img/b.jpg"
title = "Lounge"
category = "Interior"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        let gallery = config.gallery();
        assert_eq!(gallery.len(), 2);
        assert_eq!(gallery.hero().title, "Terrace");
    }

    #[test]
    fn generate_css_uses_config_colors() {
        let mut colors = ColorConfig::default();
        colors.light.background = "#f0f0f0".to_string();
        colors.dark.accent = "#123456".to_string();

        let css = generate_color_css(&colors);
        assert!(css.contains("--color-bg: #f0f0f0"));
        assert!(css.contains("--color-accent: #123456"));
        assert!(css.contains("@media (prefers-color-scheme: dark)"));
    }

    #[test]
    fn server_address_joins_host_and_port() {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        };
        assert_eq!(server.address(), "127.0.0.1:3000");
    }

    // =========================================================================
    // Environment overrides
    // =========================================================================

    #[test]
    fn port_env_overrides_file() {
        let mut config = SiteConfig::default();
        apply_env_overrides(&mut config, |key| {
            (key == "PORT").then(|| "9090".to_string())
        });
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn invalid_port_env_is_ignored() {
        let mut config = SiteConfig::default();
        apply_env_overrides(&mut config, |key| {
            (key == "PORT").then(|| "eighty".to_string())
        });
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn host_env_overrides_bind_address() {
        let mut config = SiteConfig::default();
        apply_env_overrides(&mut config, |key| {
            (key == "ALTONA_HOST").then(|| "127.0.0.1".to_string())
        });
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn no_env_leaves_config_alone() {
        let mut config = SiteConfig::default();
        apply_env_overrides(&mut config, no_env);
        assert_eq!(config.server, ServerConfig::default());
    }

    // =========================================================================
    // merge_toml
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("port = 8080").unwrap();
        let overlay: toml::Value = toml::from_str("port = 3000").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["port"].as_integer(), Some(3000));
    }

    #[test]
    fn merge_toml_preserves_base_keys() {
        let base: toml::Value = toml::from_str(
            r#"
[server]
host = "0.0.0.0"
port = 8080
"#,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str("[server]\nport = 1234").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["server"]["host"].as_str(), Some("0.0.0.0"));
        assert_eq!(merged["server"]["port"].as_integer(), Some(1234));
    }

    #[test]
    fn merge_toml_replaces_arrays() {
        let base: toml::Value = toml::from_str("sizes = [1, 2, 3]").unwrap();
        let overlay: toml::Value = toml::from_str("sizes = [9]").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["sizes"].as_array().map(|a| a.len()), Some(1));
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_zero_port() {
        let mut config = SiteConfig::default();
        config.server.port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_hover_scale_bounds() {
        let mut config = SiteConfig::default();
        config.animation.hover_scale = 0.0;
        assert!(config.validate().is_err());
        config.animation.hover_scale = 2.0;
        assert!(config.validate().is_ok());
        config.animation.hover_scale = 2.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_image_list_fails_to_parse() {
        let result: Result<SiteConfig, _> = toml::from_str("images = []");
        assert!(result.is_err());
    }

    #[test]
    fn load_config_rejects_empty_image_list() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "images = []\n").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn validate_backend_identity() {
        let mut config = SiteConfig::default();
        config.backend.project_id = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("backend.project_id"));
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[server]\nportt = 80");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[thumbnails]\nsize = 1");
        assert!(result.is_err());
    }

    // =========================================================================
    // load_config
    // =========================================================================

    #[test]
    fn load_raw_config_returns_none_when_no_file() {
        let tmp = TempDir::new().unwrap();
        assert!(load_raw_config(tmp.path()).unwrap().is_none());
    }

    #[test]
    fn load_config_reads_file_over_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
[site]
title = "Casa Test"

[animation]
enter_ms = 120
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "Casa Test");
        assert_eq!(config.site.tagline, "A private pool villa in North Goa");
        assert_eq!(config.animation.enter_ms, 120);
        assert_eq!(config.animation.exit_ms, 200);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[site\ntitle = ").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[animation]\nhover_scale = 9.0\n",
        )
        .unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn serve_config_applies_env_overrides() {
        let tmp = TempDir::new().unwrap();
        let config = load_serve_config(tmp.path(), |key| match key {
            "PORT" => Some("9090".to_string()),
            "ALTONA_HOST" => Some("127.0.0.1".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.server.address(), "127.0.0.1:9090");
    }

    #[test]
    fn serve_config_validates_env_port() {
        let tmp = TempDir::new().unwrap();
        let result = load_serve_config(tmp.path(), |key| (key == "PORT").then(|| "0".to_string()));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn serve_env_can_repair_file_port() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[server]\nport = 0\n").unwrap();
        assert!(load_config(tmp.path()).is_err());
        let config =
            load_serve_config(tmp.path(), |key| (key == "PORT").then(|| "3000".to_string()))
                .unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(config.server, defaults.server);
        assert_eq!(config.animation, defaults.animation);
        assert_eq!(config.backend, defaults.backend);
        assert_eq!(config.colors.dark.accent, defaults.colors.dark.accent);
    }
}
