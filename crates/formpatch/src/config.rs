//! Immutable broadcast configuration.
//!
//! One [`Config`] value is built at startup and threaded by reference into
//! the selector deriver and the walker. Nothing here mutates after
//! construction; concurrent broadcasts can share a config freely.

use serde::Deserialize;

use formpatch_dom_selector::SelectorLabels;

/// Resolves the transport channel key for a broadcast, given the root
/// resource label.
pub type ChannelResolver = fn(resource: &str) -> String;

fn default_channel(_resource: &str) -> String {
    "FormPatchChannel".to_string()
}

fn default_channel_resolver() -> ChannelResolver {
    default_channel
}

/// Process-lifetime configuration for selector derivation and patch
/// emission. Defaults reproduce the stock renderer contract; field-level
/// serde defaults let callers override only what they deploy differently.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Label fragments used by selector derivation.
    pub labels: SelectorLabels,
    /// CSS class toggled on the form element while the model is invalid.
    /// An empty string disables the form-class toggle entirely.
    pub form_class: String,
    /// CSS class toggled on each invalid attribute's container.
    pub error_class: String,
    /// Styling class the renderer puts on inline error spans. Published
    /// here for the view-side contract; the walker never reads it.
    pub error_field_class: String,
    /// Styling class for the base-error span. View-side contract only.
    pub base_error_field_class: String,
    /// Appended to every surfaced message.
    pub suffix: String,
    /// Emit `dispatch_event` operations.
    pub emit_events: bool,
    /// Emit CSS-class add/remove operations per attribute.
    pub add_css: bool,
    /// Emit inline `text_content` operations.
    pub inject_inline: bool,
    /// Toggle the `disabled` attribute on the submit control with form
    /// validity.
    pub disable_submit: bool,
    /// Per-call channel key resolution.
    #[serde(skip, default = "default_channel_resolver")]
    pub channel: ChannelResolver,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            labels: SelectorLabels::default(),
            form_class: "invalid".to_string(),
            error_class: "error".to_string(),
            error_field_class: "small align-bottom text-danger".to_string(),
            base_error_field_class: "align-bottom text-danger".to_string(),
            suffix: String::new(),
            emit_events: false,
            add_css: true,
            inject_inline: true,
            disable_submit: false,
            channel: default_channel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_renderer_contract() {
        let config = Config::default();
        assert_eq!(config.form_class, "invalid");
        assert_eq!(config.error_class, "error");
        assert_eq!(config.suffix, "");
        assert!(!config.emit_events);
        assert!(config.add_css);
        assert!(config.inject_inline);
        assert!(!config.disable_submit);
        assert_eq!((config.channel)("post"), "FormPatchChannel");
    }

    #[test]
    fn partial_toml_overrides_keep_remaining_defaults() {
        let config: Config = toml::from_str(
            r#"
            form_class = "is-invalid"
            emit_events = true

            [labels]
            error = "msg"
            "#,
        )
        .unwrap();
        assert_eq!(config.form_class, "is-invalid");
        assert!(config.emit_events);
        assert_eq!(config.labels.error, "msg");
        assert_eq!(config.labels.form, "form");
        assert_eq!(config.error_class, "error");
        assert_eq!((config.channel)("post"), "FormPatchChannel");
    }
}
