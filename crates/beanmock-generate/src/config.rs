use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::MockError;
use crate::model::{
    BuildOptions, DEFAULT_MAX_DEPTH, DepthPolicy, MAX_DEPTH_LIMIT, NumericRange, ValueMode,
};
use crate::registry::{RegistrySettings, ScalarKind};

/// Engine configuration, usually read from a TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    pub value_mode: ValueMode,
    pub max_depth: usize,
    pub depth_policy: DepthPolicy,
    /// Seed for the value source; OS entropy when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub default_recurse: bool,
    /// Range overrides keyed by type identifier (`long`, `integer`, ...).
    pub ranges: BTreeMap<String, NumericRange>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            value_mode: ValueMode::Static,
            max_depth: DEFAULT_MAX_DEPTH,
            depth_policy: DepthPolicy::Fail,
            seed: None,
            default_recurse: true,
            ranges: BTreeMap::new(),
        }
    }
}

impl MockConfig {
    pub fn load(path: &Path) -> Result<Self, MockError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(input: &str) -> Result<Self, MockError> {
        let config: MockConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the depth bound and the range overrides.
    pub fn validate(&self) -> Result<(), MockError> {
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(MockError::Config(format!(
                "max_depth {} exceeds the limit of {MAX_DEPTH_LIMIT}",
                self.max_depth
            )));
        }
        self.registry_settings()?;
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, MockError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            max_depth: self.max_depth,
            depth_policy: self.depth_policy,
            default_recurse: self.default_recurse,
        }
    }

    /// Validate range overrides and turn them into registry settings.
    pub fn registry_settings(&self) -> Result<RegistrySettings, MockError> {
        let mut ranges = HashMap::new();
        for (type_id, range) in &self.ranges {
            let kind = ScalarKind::parse(type_id).ok_or_else(|| {
                MockError::Config(format!("unknown scalar type in ranges: '{type_id}'"))
            })?;
            let bounds = kind.bounds().ok_or_else(|| {
                MockError::Config(format!("type '{type_id}' does not accept a range"))
            })?;
            if range.min > range.max {
                return Err(MockError::Config(format!(
                    "range for '{type_id}': min must be <= max"
                )));
            }
            if !bounds.contains(range.min) || !bounds.contains(range.max) {
                return Err(MockError::Config(format!(
                    "range for '{type_id}' exceeds [{}, {}]",
                    bounds.min, bounds.max
                )));
            }
            ranges.insert(kind, *range);
        }
        Ok(RegistrySettings {
            mode: self.value_mode,
            ranges,
        })
    }
}
