//! Expander configuration.
//!
//! Options are read from JSON in camelCase, then normalized once per run
//! into `NormalizedOptions`, which is shared read-only by every compilation
//! unit.

use crate::error::ConfigError;
use dm_parser::LiteralValue;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer, Serialize};

/// Canonical debug-flags module whose import `expand` inlines.
pub const ENV_FLAGS_MODULE: &str = "@ember/env-flags";

/// A flag's compile-time value. Objects and arrays are rejected at load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Null(()),
}

impl FlagValue {
    pub fn to_literal(&self) -> LiteralValue {
        match self {
            Self::Bool(b) => LiteralValue::Boolean(*b),
            Self::Number(n) => LiteralValue::Number(n.to_string()),
            Self::String(s) => LiteralValue::String(s.clone()),
            Self::Null(()) => LiteralValue::Null,
        }
    }
}

/// Flag name to value, in configuration order.
pub type FlagMap = IndexMap<String, FlagValue>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlagSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Module path whose imports are replaced by this spec's flags.
    #[serde(alias = "featuresImport")]
    pub source: String,
    #[serde(default)]
    pub flags: FlagMap,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvFlagsOptions {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub flags: FlagMap,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugToolsOptions {
    #[serde(default)]
    pub source: Option<String>,
}

/// Whether helper imports are treated as globals (and therefore removed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugHelpers {
    #[serde(default)]
    pub global: bool,
}

/// How debug helper calls are rendered.
///
/// - `global: Some("Ember")` renders `Ember.assert(...)`
/// - `module: true` keeps the call as written
/// - otherwise helpers become `console.*` calls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalizeHelpers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<String>,
    #[serde(default)]
    pub module: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugHelpers>,
}

/// Raw options as written in the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    #[serde(default)]
    pub env_flags: Option<EnvFlagsOptions>,
    #[serde(default)]
    pub debug_tools: Option<DebugToolsOptions>,
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub features: Vec<FeatureFlagSpec>,
    #[serde(default)]
    pub externalize_helpers: Option<ExternalizeHelpers>,
}

/// `features` may be a single spec or a list of specs.
fn deserialize_one_or_many<'de, D>(deserializer: D) -> Result<Vec<FeatureFlagSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(FeatureFlagSpec),
        Many(Vec<FeatureFlagSpec>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(spec)) => vec![spec],
        Some(OneOrMany::Many(specs)) => specs,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvFlags {
    pub source: String,
    pub flags: FlagMap,
}

/// Validated options for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedOptions {
    pub env_flags: EnvFlags,
    pub debug_tools_source: String,
    pub features: Vec<FeatureFlagSpec>,
    pub externalize_helpers: ExternalizeHelpers,
    #[serde(skip)]
    debug: FlagValue,
    #[serde(skip)]
    feature_sources: FxHashSet<String>,
}

impl Options {
    pub fn from_json(text: &str) -> Result<Options, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn normalize(self) -> Result<NormalizedOptions, ConfigError> {
        let debug_tools_source = self
            .debug_tools
            .and_then(|tools| tools.source)
            .filter(|source| !source.is_empty())
            .ok_or(ConfigError::MissingDebugToolsSource)?;

        let env_flags = self.env_flags.unwrap_or_default();
        let debug = env_flags
            .flags
            .get(crate::macros::DEBUG)
            .cloned()
            .ok_or(ConfigError::MissingDebugFlag)?;
        let env_source = env_flags
            .source
            .unwrap_or_else(|| ENV_FLAGS_MODULE.to_string());
        if env_source != ENV_FLAGS_MODULE {
            tracing::warn!(
                source = %env_source,
                "envFlags.source is informational; imports of {ENV_FLAGS_MODULE} are the ones inlined"
            );
        }

        let mut feature_sources = FxHashSet::default();
        for spec in &self.features {
            if !feature_sources.insert(spec.source.clone()) {
                tracing::warn!(source = %spec.source, "duplicate feature source; the first spec wins");
            }
        }

        Ok(NormalizedOptions {
            env_flags: EnvFlags {
                source: env_source,
                flags: env_flags.flags,
            },
            debug_tools_source,
            features: self.features,
            externalize_helpers: self.externalize_helpers.unwrap_or_default(),
            debug,
            feature_sources,
        })
    }
}

impl NormalizedOptions {
    pub fn from_json(text: &str) -> Result<NormalizedOptions, ConfigError> {
        Options::from_json(text)?.normalize()
    }

    /// True when `source` is the import path of some feature spec.
    pub fn is_feature_source(&self, source: &str) -> bool {
        self.feature_sources.contains(source)
    }

    /// First feature spec declared for `source`.
    pub fn feature_spec(&self, source: &str) -> Option<&FeatureFlagSpec> {
        self.features.iter().find(|spec| spec.source == source)
    }

    /// Value of `DEBUG` in the environment flags.
    pub fn debug_flag(&self) -> &FlagValue {
        &self.debug
    }
}

#[cfg(test)]
#[path = "tests/options.rs"]
mod tests;
