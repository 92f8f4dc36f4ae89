//! Render configuration
//!
//!     Configuration has two halves:
//!
//!     - [`RenderSettings`]: declarative knobs (anchor prefixes, badge and wrapper attributes).
//!       `defaults/orgview.default.toml` is embedded into the crate so documented defaults and
//!       runtime behavior stay in sync; callers layer their own files and key overrides on top
//!       via [`SettingsLoader`].
//!     - [`RenderConfig`]: the settings plus the rendering strategies for code blocks, literal
//!       blocks and links. It is fully specified once built and is never mutated by a render.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::{Deserialize, Serialize};

use crate::render::element::Attributes;
use crate::render::renderers::{
    AnchorLinkRenderer, BlockRenderer, CodeBlockRenderer, LinkRenderer,
};

const DEFAULT_TOML: &str = include_str!("../defaults/orgview.default.toml");

const DEFAULT_BADGE_STYLE: &str = "background-color: #eee; border: 1.5px solid #aaa; \
     border-radius: 4px; float: right; font-size: 1rem; font-weight: normal; \
     margin-left: 10px; padding: 0 10px";

/// Declarative render settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub anchors: AnchorSettings,
    pub tag_badge: TagBadgeSettings,
    pub source_block: BlockSettings,
    pub preformatted: BlockSettings,
    pub document: DocumentSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorSettings {
    /// Applied to every TOC index as `<prefix>-<index>`.
    pub prefix: Option<String>,
    /// Header element ids are `<heading_id_prefix>-<index>`.
    pub heading_id_prefix: String,
}

impl Default for AnchorSettings {
    fn default() -> Self {
        Self {
            prefix: None,
            heading_id_prefix: "section".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagBadgeSettings {
    /// Merged onto every generated tag badge.
    pub attributes: Attributes,
}

impl Default for TagBadgeSettings {
    fn default() -> Self {
        let mut attributes = Attributes::new();
        attributes.insert("style".to_string(), DEFAULT_BADGE_STYLE.to_string());
        Self { attributes }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockSettings {
    /// Attributes of the `div` wrapping the rendered block.
    pub wrapper_attributes: Attributes,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSettings {
    /// Attributes of the outer container of a full document.
    pub attributes: Attributes,
}

impl RenderSettings {
    /// The TOC anchor prefix, treating an empty string as unset.
    pub fn anchor_prefix(&self) -> Option<&str> {
        self.anchors.prefix.as_deref().filter(|p| !p.is_empty())
    }

    /// Element id for a header with the given index.
    pub fn heading_anchor(&self, index: &str) -> String {
        match self.anchors.heading_id_prefix.as_str() {
            "" => index.to_string(),
            prefix => format!("{prefix}-{index}"),
        }
    }
}

/// Layers user settings over the embedded defaults.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    builder: ConfigBuilder<DefaultState>,
}

impl SettingsLoader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a settings file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional settings file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer settings given as TOML text.
    pub fn with_toml(mut self, toml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Apply a single key/value override (e.g. `anchors.prefix`).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting settings.
    pub fn build(self) -> Result<RenderSettings, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings from the embedded defaults alone.
pub fn load_defaults() -> Result<RenderSettings, ConfigError> {
    SettingsLoader::new().build()
}

/// Everything a render pass needs: settings plus rendering strategies.
#[derive(Clone)]
pub struct RenderConfig {
    pub settings: RenderSettings,
    pub source_block_renderer: Arc<dyn BlockRenderer>,
    pub preformatted_renderer: Arc<dyn BlockRenderer>,
    pub link_renderer: Arc<dyn LinkRenderer>,
}

impl RenderConfig {
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::default()
    }

    /// Default strategies over the given settings.
    pub fn with_settings(settings: RenderSettings) -> Self {
        Self::builder().settings(settings).build()
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for RenderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderConfig")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Merges caller overrides over the documented defaults.
#[derive(Default)]
pub struct RenderConfigBuilder {
    settings: RenderSettings,
    source_block_renderer: Option<Arc<dyn BlockRenderer>>,
    preformatted_renderer: Option<Arc<dyn BlockRenderer>>,
    link_renderer: Option<Arc<dyn LinkRenderer>>,
}

impl RenderConfigBuilder {
    pub fn settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn anchor_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.settings.anchors.prefix = Some(prefix.into());
        self
    }

    pub fn heading_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.settings.anchors.heading_id_prefix = prefix.into();
        self
    }

    /// Merge one attribute onto generated tag badges.
    pub fn tag_badge_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings
            .tag_badge
            .attributes
            .insert(name.into(), value.into());
        self
    }

    /// Add an attribute to the `div` wrapping source blocks.
    pub fn source_block_wrapper_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.settings
            .source_block
            .wrapper_attributes
            .insert(name.into(), value.into());
        self
    }

    /// Add an attribute to the `div` wrapping literal blocks.
    pub fn preformatted_wrapper_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.settings
            .preformatted
            .wrapper_attributes
            .insert(name.into(), value.into());
        self
    }

    pub fn source_block_renderer(mut self, renderer: impl BlockRenderer + 'static) -> Self {
        self.source_block_renderer = Some(Arc::new(renderer));
        self
    }

    pub fn preformatted_renderer(mut self, renderer: impl BlockRenderer + 'static) -> Self {
        self.preformatted_renderer = Some(Arc::new(renderer));
        self
    }

    pub fn link_renderer(mut self, renderer: impl LinkRenderer + 'static) -> Self {
        self.link_renderer = Some(Arc::new(renderer));
        self
    }

    pub fn build(self) -> RenderConfig {
        RenderConfig {
            settings: self.settings,
            source_block_renderer: self
                .source_block_renderer
                .unwrap_or_else(|| Arc::new(CodeBlockRenderer)),
            preformatted_renderer: self
                .preformatted_renderer
                .unwrap_or_else(|| Arc::new(CodeBlockRenderer)),
            link_renderer: self
                .link_renderer
                .unwrap_or_else(|| Arc::new(AnchorLinkRenderer)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::element::OutputElement;

    #[test]
    fn embedded_defaults_match_default_impl() {
        let settings = load_defaults().expect("defaults to deserialize");
        assert_eq!(settings, RenderSettings::default());
    }

    #[test]
    fn default_heading_anchor_uses_section_prefix() {
        let settings = RenderSettings::default();
        assert_eq!(settings.heading_anchor("1.2"), "section-1.2");
        assert_eq!(settings.anchor_prefix(), None);
    }

    #[test]
    fn empty_heading_prefix_yields_bare_index() {
        let mut settings = RenderSettings::default();
        settings.anchors.heading_id_prefix.clear();
        assert_eq!(settings.heading_anchor("3"), "3");
    }

    #[test]
    fn supports_overrides() {
        let settings = SettingsLoader::new()
            .set_override("anchors.prefix", "doc")
            .expect("override to apply")
            .build()
            .expect("settings to build");
        assert_eq!(settings.anchor_prefix(), Some("doc"));
        assert_eq!(settings.anchors.heading_id_prefix, "section");
    }

    #[test]
    fn layered_badge_attributes_merge_with_defaults() {
        let settings = SettingsLoader::new()
            .with_toml("[tag_badge.attributes]\nclass = \"pill\"\n")
            .build()
            .expect("settings to build");
        assert_eq!(
            settings.tag_badge.attributes.get("class").map(String::as_str),
            Some("pill")
        );
        assert!(settings.tag_badge.attributes.contains_key("style"));
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = SettingsLoader::new()
            .with_file("/nonexistent/orgview.toml")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn optional_file_may_be_absent() {
        let settings = SettingsLoader::new()
            .with_optional_file("/nonexistent/orgview.toml")
            .build()
            .expect("settings to build");
        assert_eq!(settings, RenderSettings::default());
    }

    #[test]
    fn empty_anchor_prefix_counts_as_unset() {
        let config = RenderConfig::builder().anchor_prefix("").build();
        assert_eq!(config.settings.anchor_prefix(), None);
    }

    #[test]
    fn builder_replaces_strategies() {
        let config = RenderConfig::builder()
            .source_block_renderer(|_: Option<&str>, content: &str| {
                OutputElement::new("custom").with_child(content)
            })
            .tag_badge_attribute("class", "pill")
            .build();

        let element = config.source_block_renderer.render(Some("rust"), "x");
        assert_eq!(element.tag, "custom");
        assert_eq!(
            config.settings.tag_badge.attributes.get("class").map(String::as_str),
            Some("pill")
        );
        assert!(config.settings.tag_badge.attributes.contains_key("style"));
    }
}
