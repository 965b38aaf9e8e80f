use crate::extractor::{ChainSyntax, DEFAULT_SEPARATOR};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyserConfig {
    #[serde(default)]
    pub chain: ChainConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    #[serde(default)]
    pub syntax: ChainSyntax,
    /// Only used by the separator syntax.
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            syntax: ChainSyntax::default(),
            separator: default_separator(),
        }
    }
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}
