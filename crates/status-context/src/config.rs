//! Notification configuration.
//!
//! [`NotificationConfig`] is the immutable value the resolver runs against.
//! [`NotificationSettings`] mirrors the declared settings surface
//! (`contextLabel`, `reportFailure`, `messageGood`, ...) and is what gets
//! read from TOML or JSON files.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::ResultCategory;
use crate::error::{ConfigError, Result};

/// How a message is chosen when no override exists for the category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageMode {
    /// Built-in text per result category.
    #[default]
    PerCategory,
    /// The host's single static message, as before per-category messages
    /// existed. Built-in text is used if the host supplies none.
    HostDefault,
}

/// Immutable notification configuration.
///
/// Two configs are equal iff every field is equal. Use [`Self::to_builder`]
/// to derive a modified copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationConfig {
    label_template: String,
    #[serde(default)]
    type_suffix: bool,
    #[serde(default)]
    split_into_multiple: bool,
    #[serde(default)]
    delimiter: String,
    #[serde(default)]
    report_filters: BTreeMap<ResultCategory, bool>,
    #[serde(default)]
    message_overrides: BTreeMap<ResultCategory, String>,
    #[serde(default)]
    message_mode: MessageMode,
}

impl NotificationConfig {
    /// Start building a config for the given label template.
    pub fn builder(label_template: impl Into<String>) -> NotificationConfigBuilder {
        NotificationConfigBuilder {
            config: NotificationConfig {
                label_template: label_template.into(),
                type_suffix: false,
                split_into_multiple: false,
                delimiter: String::new(),
                report_filters: BTreeMap::new(),
                message_overrides: BTreeMap::new(),
                message_mode: MessageMode::default(),
            },
        }
    }

    /// A builder seeded with this config's values.
    pub fn to_builder(&self) -> NotificationConfigBuilder {
        NotificationConfigBuilder {
            config: self.clone(),
        }
    }

    pub fn label_template(&self) -> &str {
        &self.label_template
    }

    pub fn type_suffix(&self) -> bool {
        self.type_suffix
    }

    pub fn split_into_multiple(&self) -> bool {
        self.split_into_multiple
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn report_filters(&self) -> &BTreeMap<ResultCategory, bool> {
        &self.report_filters
    }

    pub fn message_overrides(&self) -> &BTreeMap<ResultCategory, String> {
        &self.message_overrides
    }

    pub fn message_mode(&self) -> MessageMode {
        self.message_mode
    }
}

/// Builder for [`NotificationConfig`]; each behavior composes independently.
#[derive(Debug, Clone)]
pub struct NotificationConfigBuilder {
    config: NotificationConfig,
}

impl NotificationConfigBuilder {
    /// Append `/branch`, `/pr-head` or `/pr-merge` to each context.
    pub fn type_suffix(mut self, enabled: bool) -> Self {
        self.config.type_suffix = enabled;
        self
    }

    /// Split the label template into several contexts on `delimiter`.
    pub fn split_on(mut self, delimiter: impl Into<String>) -> Self {
        self.config.split_into_multiple = true;
        self.config.delimiter = delimiter.into();
        self
    }

    /// Turn splitting off, keeping any delimiter already set.
    pub fn single_label(mut self) -> Self {
        self.config.split_into_multiple = false;
        self
    }

    /// Record an explicit report decision for a category.
    pub fn report(mut self, category: ResultCategory, include: bool) -> Self {
        self.config.report_filters.insert(category, include);
        self
    }

    /// Override the message for a category.
    pub fn message(mut self, category: ResultCategory, text: impl Into<String>) -> Self {
        self.config.message_overrides.insert(category, text.into());
        self
    }

    pub fn message_mode(mut self, mode: MessageMode) -> Self {
        self.config.message_mode = mode;
        self
    }

    pub fn build(self) -> NotificationConfig {
        self.config
    }
}

fn default_true() -> bool {
    true
}

/// Declared settings surface, as stored in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NotificationSettings {
    pub context_label: String,

    #[serde(default)]
    pub type_suffix: bool,

    #[serde(default)]
    pub multiple_statuses: bool,

    #[serde(default)]
    pub multiple_status_delimiter: String,

    #[serde(default = "default_true")]
    pub report_success: bool,

    #[serde(default = "default_true")]
    pub report_unstable: bool,

    #[serde(default = "default_true")]
    pub report_failure: bool,

    #[serde(default = "default_true")]
    pub report_not_built: bool,

    #[serde(default = "default_true")]
    pub report_aborted: bool,

    #[serde(default)]
    pub message_good: String,

    #[serde(default)]
    pub message_unstable: String,

    #[serde(default)]
    pub message_failure: String,

    #[serde(default)]
    pub message_aborted: String,

    #[serde(default)]
    pub message_other: String,

    #[serde(default)]
    pub message_pending: String,

    #[serde(default)]
    pub message_queued: String,

    #[serde(default)]
    pub message_mode: MessageMode,
}

impl NotificationSettings {
    /// Settings for a label with every other field at its default.
    pub fn new(context_label: impl Into<String>) -> Self {
        Self {
            context_label: context_label.into(),
            type_suffix: false,
            multiple_statuses: false,
            multiple_status_delimiter: String::new(),
            report_success: true,
            report_unstable: true,
            report_failure: true,
            report_not_built: true,
            report_aborted: true,
            message_good: String::new(),
            message_unstable: String::new(),
            message_failure: String::new(),
            message_aborted: String::new(),
            message_other: String::new(),
            message_pending: String::new(),
            message_queued: String::new(),
            message_mode: MessageMode::default(),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Validate and convert into a [`NotificationConfig`].
    ///
    /// `reportNotBuilt` governs the `Other` category, which is where
    /// not-built results land.
    pub fn into_config(self) -> Result<NotificationConfig> {
        if self.context_label.trim().is_empty() {
            return Err(ConfigError::BlankContextLabel);
        }
        if self.multiple_statuses && self.multiple_status_delimiter.trim().is_empty() {
            warn!(
                event = "config.blank_delimiter",
                context_label = %self.context_label,
                "multipleStatuses is set without a delimiter; using a single context"
            );
        }

        let mut builder = NotificationConfig::builder(self.context_label)
            .type_suffix(self.type_suffix)
            .message_mode(self.message_mode)
            .report(ResultCategory::Success, self.report_success)
            .report(ResultCategory::Unstable, self.report_unstable)
            .report(ResultCategory::Failure, self.report_failure)
            .report(ResultCategory::Other, self.report_not_built)
            .report(ResultCategory::Aborted, self.report_aborted);

        builder = builder.split_on(self.multiple_status_delimiter);
        if !self.multiple_statuses {
            builder = builder.single_label();
        }

        let messages = [
            (ResultCategory::Success, self.message_good),
            (ResultCategory::Unstable, self.message_unstable),
            (ResultCategory::Failure, self.message_failure),
            (ResultCategory::Aborted, self.message_aborted),
            (ResultCategory::Other, self.message_other),
            (ResultCategory::Pending, self.message_pending),
            (ResultCategory::Queued, self.message_queued),
        ];
        for (category, text) in messages {
            if !text.trim().is_empty() {
                builder = builder.message(category, text);
            }
        }

        Ok(builder.build())
    }
}

/// Load settings from a file; `.toml` files are parsed as TOML, anything
/// else as JSON.
pub fn load_settings(path: &Path) -> Result<NotificationSettings> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        NotificationSettings::from_toml_str(&contents)
    } else {
        NotificationSettings::from_json_str(&contents)
    }
}

/// Load settings from a file and convert them into a config.
pub fn load_config(path: &Path) -> Result<NotificationConfig> {
    load_settings(path)?.into_config()
}
