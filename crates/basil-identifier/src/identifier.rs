//! Identifier Types
//!
//! The structured result of classifying an identifier string.

use crate::error::PositionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selects one match among several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Position {
    /// Zero-based; negative values count back from the last match.
    Index(i64),
    First,
    Last,
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Position::First),
            "last" => Ok(Position::Last),
            _ => {
                let negative = s.starts_with('-');
                let digits = s.strip_prefix('-').unwrap_or(s);
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(PositionError::Invalid(s.to_string()));
                }
                // Out-of-range indices saturate so that classification stays total.
                let index = s
                    .parse::<i64>()
                    .unwrap_or(if negative { i64::MIN } else { i64::MAX });
                Ok(Position::Index(index))
            }
        }
    }
}

impl TryFrom<String> for Position {
    type Error = PositionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Index(i) => write!(f, "{}", i),
            Position::First => f.write_str("first"),
            Position::Last => f.write_str("last"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorKind {
    Css,
    Xpath,
}

/// A quoted CSS selector or XPath expression with an optional position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementIdentifier {
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl ElementIdentifier {
    pub fn new(body: impl Into<String>, position: Option<Position>) -> Self {
        Self {
            body: body.into(),
            position,
        }
    }

    pub fn kind(&self) -> SelectorKind {
        if self.body.starts_with('/') {
            SelectorKind::Xpath
        } else {
            SelectorKind::Css
        }
    }
}

impl fmt::Display for ElementIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$\"{}\"", self.body)?;
        if let Some(position) = &self.position {
            write!(f, ":{}", position)?;
        }
        Ok(())
    }
}

/// Structural category of an identifier string.
///
/// Exactly one variant applies to any input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IdentifierType {
    Css(ElementIdentifier),
    Xpath(ElementIdentifier),
    Attribute {
        base: ElementIdentifier,
        name: String,
    },
    #[serde(rename = "descendant")]
    DescendantChain,
    Unknown,
}

impl IdentifierType {
    pub fn name(&self) -> &'static str {
        match self {
            IdentifierType::Css(_) => "css",
            IdentifierType::Xpath(_) => "xpath",
            IdentifierType::Attribute { .. } => "attribute",
            IdentifierType::DescendantChain => "descendant",
            IdentifierType::Unknown => "unknown",
        }
    }

    /// The element being addressed, for element and attribute identifiers.
    pub fn element(&self) -> Option<&ElementIdentifier> {
        match self {
            IdentifierType::Css(element) | IdentifierType::Xpath(element) => Some(element),
            IdentifierType::Attribute { base, .. } => Some(base),
            IdentifierType::DescendantChain | IdentifierType::Unknown => None,
        }
    }
}

impl fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_parsing() {
        assert_eq!("first".parse::<Position>(), Ok(Position::First));
        assert_eq!("last".parse::<Position>(), Ok(Position::Last));
        assert_eq!("0".parse::<Position>(), Ok(Position::Index(0)));
        assert_eq!("-1".parse::<Position>(), Ok(Position::Index(-1)));
        assert!("".parse::<Position>().is_err());
        assert!("-".parse::<Position>().is_err());
        assert!("1.5".parse::<Position>().is_err());
        assert!("First".parse::<Position>().is_err());
    }

    #[test]
    fn test_position_saturates_on_overflow() {
        assert_eq!(
            "99999999999999999999".parse::<Position>(),
            Ok(Position::Index(i64::MAX))
        );
        assert_eq!(
            "-99999999999999999999".parse::<Position>(),
            Ok(Position::Index(i64::MIN))
        );
    }

    #[test]
    fn test_element_identifier_display() {
        let element = ElementIdentifier::new(".selector", Some(Position::Index(-1)));
        assert_eq!(element.to_string(), r#"$".selector":-1"#);
        assert_eq!(element.kind(), SelectorKind::Css);

        let element = ElementIdentifier::new("//body", None);
        assert_eq!(element.to_string(), r#"$"//body""#);
        assert_eq!(element.kind(), SelectorKind::Xpath);
    }

    #[test]
    fn test_identifier_type_serialization() {
        let ty = IdentifierType::Attribute {
            base: ElementIdentifier::new("#id", Some(Position::First)),
            name: "href".into(),
        };
        let json = serde_json::to_value(&ty).unwrap();
        assert_eq!(json["type"], "attribute");
        assert_eq!(json["base"]["body"], "#id");
        assert_eq!(json["base"]["position"], "first");
        assert_eq!(json["name"], "href");

        let json = serde_json::to_value(IdentifierType::Css(ElementIdentifier::new(".a", None)))
            .unwrap();
        assert_eq!(json["type"], "css");
        assert_eq!(json["body"], ".a");
        assert!(json.get("position").is_none());

        let json = serde_json::to_value(IdentifierType::DescendantChain).unwrap();
        assert_eq!(json["type"], "descendant");
    }

    #[test]
    fn test_element_accessor() {
        let base = ElementIdentifier::new("/body", None);
        let ty = IdentifierType::Attribute {
            base: base.clone(),
            name: "class".into(),
        };
        assert_eq!(ty.element(), Some(&base));
        assert_eq!(IdentifierType::Unknown.element(), None);
        assert_eq!(IdentifierType::DescendantChain.name(), "descendant");
    }
}
