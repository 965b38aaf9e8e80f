//! Identifier Type Analysis
//!
//! Classifies identifier strings so callers can pick a resolution strategy:
//! query by CSS, query by XPath, read an attribute, or walk a descendant chain.

use crate::config::AnalyserConfig;
use crate::error::ConfigError;
use crate::extractor::{
    ChainSyntax, DescendantIdentifierExtractor, IdentifierExtractor, ParentPrefixExtractor,
};
use crate::grammar::{
    ATTRIBUTE_IDENTIFIER_REGEX, CSS_SELECTOR_REGEX, XPATH_EXPRESSION_REGEX,
    is_xpath_expression_shaped,
};
use crate::identifier::{ElementIdentifier, IdentifierType, Position};
use regex::Captures;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

#[derive(Clone)]
pub struct IdentifierTypeAnalyser {
    extractor: Arc<dyn IdentifierExtractor>,
}

impl IdentifierTypeAnalyser {
    pub fn new(extractor: impl IdentifierExtractor + 'static) -> Self {
        Self {
            extractor: Arc::new(extractor),
        }
    }

    pub fn from_config(config: &AnalyserConfig) -> Result<Self, ConfigError> {
        let analyser = match config.chain.syntax {
            ChainSyntax::Separator => {
                let separator = config.chain.separator.trim();
                if separator.is_empty() {
                    return Err(ConfigError::EmptySeparator);
                }
                Self::new(DescendantIdentifierExtractor::with_separator(separator))
            }
            ChainSyntax::Braced => Self::new(ParentPrefixExtractor::new()),
        };
        Ok(analyser)
    }

    /// Single-pass classification. A whole-string descendant chain takes
    /// precedence over every other shape.
    pub fn classify(&self, identifier: &str) -> IdentifierType {
        let identifier_type = if self.is_whole_chain(identifier) {
            IdentifierType::DescendantChain
        } else if let Some(caps) = CSS_SELECTOR_REGEX.captures(identifier) {
            IdentifierType::Css(element_from_captures(&caps))
        } else if let Some(caps) = XPATH_EXPRESSION_REGEX.captures(identifier) {
            IdentifierType::Xpath(element_from_captures(&caps))
        } else if let Some(caps) = ATTRIBUTE_IDENTIFIER_REGEX.captures(identifier) {
            IdentifierType::Attribute {
                base: element_from_captures(&caps),
                name: caps["name"].to_string(),
            }
        } else {
            IdentifierType::Unknown
        };

        trace!(identifier, kind = identifier_type.name(), "classified identifier");
        identifier_type
    }

    pub fn is_css_selector(&self, identifier: &str) -> bool {
        matches!(self.classify(identifier), IdentifierType::Css(_))
    }

    /// Tests the XPath grammar alone. Unlike [`Self::is_css_selector`] this does
    /// not exclude descendant chains, so `$"/a" >> $".b"` is both an XPath
    /// expression and a descendant chain.
    pub fn is_xpath_expression(&self, identifier: &str) -> bool {
        is_xpath_expression_shaped(identifier)
    }

    pub fn is_element_identifier(&self, identifier: &str) -> bool {
        self.is_css_selector(identifier) || self.is_xpath_expression(identifier)
    }

    pub fn is_attribute_identifier(&self, identifier: &str) -> bool {
        matches!(
            self.classify(identifier),
            IdentifierType::Attribute { .. }
        )
    }

    pub fn is_dom_identifier(&self, identifier: &str) -> bool {
        self.is_element_identifier(identifier) || self.is_attribute_identifier(identifier)
    }

    pub fn is_descendant_dom_identifier(&self, identifier: &str) -> bool {
        self.is_whole_chain(identifier)
    }

    pub fn is_dom_or_descendant_dom_identifier(&self, identifier: &str) -> bool {
        self.is_dom_identifier(identifier) || self.is_descendant_dom_identifier(identifier)
    }

    /// An extractor returns `""` when there is no chain, which would equal an
    /// empty input, so the empty string is excluded explicitly.
    fn is_whole_chain(&self, identifier: &str) -> bool {
        !identifier.is_empty() && self.extractor.extract_identifier(identifier) == identifier
    }
}

impl Default for IdentifierTypeAnalyser {
    fn default() -> Self {
        Self::new(DescendantIdentifierExtractor::new())
    }
}

impl fmt::Debug for IdentifierTypeAnalyser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentifierTypeAnalyser").finish_non_exhaustive()
    }
}

fn element_from_captures(caps: &Captures<'_>) -> ElementIdentifier {
    // The grammar only admits qualifiers that parse.
    let position = caps
        .name("position")
        .and_then(|m| m.as_str().parse::<Position>().ok());
    ElementIdentifier::new(&caps["body"], position)
}
