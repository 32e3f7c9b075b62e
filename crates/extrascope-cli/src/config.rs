use std::{fs, path::Path};

use anyhow::{Context, ensure};
use extrascope_stats::welch::{DEFAULT_ALPHA, SignificancePolicy};

use crate::command::dashboard::PanelKind;

/// Settings read from the optional `--config` JSON file.
///
/// Every field may be omitted. Command-line flags override the file.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct DashboardConfig {
    /// Significance threshold of the weekly-hours test.
    pub alpha: f64,
    /// Panels visible when the dashboard starts; `None` keeps the defaults.
    pub visible_panels: Option<Vec<PanelKind>>,
    /// Number of words listed in the preferred-activities ranking.
    pub word_count: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            visible_panels: None,
            word_count: 20,
        }
    }
}

impl DashboardConfig {
    pub(crate) fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = serde_json::from_str::<Self>(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Decision policy, with `alpha_override` taking precedence over the file.
    pub(crate) fn significance_policy(
        &self,
        alpha_override: Option<f64>,
    ) -> anyhow::Result<SignificancePolicy> {
        let alpha = alpha_override.unwrap_or(self.alpha);
        ensure!(
            alpha > 0.0 && alpha < 1.0,
            "significance threshold must be between 0 and 1, got {alpha}"
        );
        Ok(SignificancePolicy::new(alpha))
    }
}
