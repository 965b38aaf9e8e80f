//! Identifier Grammar
//!
//! Pattern fragments for element, attribute and parent-prefixed identifiers.
//! The composed patterns are compiled once on first use and never change.
//!
//! Every pattern is anchored at both ends and captures:
//! - `body`: the quoted selector or expression
//! - `position`: the qualifier after `:` (optional)
//! - `name`: the attribute name (attribute pattern only)

use regex::Regex;
use std::sync::LazyLock;

/// Positional qualifier: a signed index or one of the `first`/`last` keywords.
pub const POSITION_PATTERN: &str = r":(?P<position>-?[0-9]+|first|last)";

pub const ELEMENT_IDENTIFIER_STARTING_PATTERN: &str = r#"\$""#;

/// A CSS body may start with anything but `/`.
pub const CSS_SELECTOR_STARTING_PATTERN: &str = r"[^/\n].*";

pub const XPATH_EXPRESSION_STARTING_PATTERN: &str = r"/.+";

pub const PARENT_PREFIX_PATTERN: &str = r"^\{\{ [^}]+ \}\} ";

fn element_identifier_ending_pattern() -> String {
    format!(r#""(?:{POSITION_PATTERN})?"#)
}

fn element_identifier_regex(body_pattern: &str) -> Regex {
    let pattern = format!(
        "^{}(?P<body>{}){}$",
        ELEMENT_IDENTIFIER_STARTING_PATTERN,
        body_pattern,
        element_identifier_ending_pattern(),
    );
    Regex::new(&pattern).unwrap()
}

pub static CSS_SELECTOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| element_identifier_regex(CSS_SELECTOR_STARTING_PATTERN));

pub static XPATH_EXPRESSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| element_identifier_regex(XPATH_EXPRESSION_STARTING_PATTERN));

pub static ATTRIBUTE_IDENTIFIER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"^{}(?P<body>{}|{}){}\.(?P<name>.+)$",
        ELEMENT_IDENTIFIER_STARTING_PATTERN,
        CSS_SELECTOR_STARTING_PATTERN,
        XPATH_EXPRESSION_STARTING_PATTERN,
        element_identifier_ending_pattern(),
    );
    Regex::new(&pattern).unwrap()
});

pub static PARENT_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PARENT_PREFIX_PATTERN).unwrap());

pub fn is_xpath_expression_shaped(identifier: &str) -> bool {
    XPATH_EXPRESSION_REGEX.is_match(identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_captures_body_and_position() {
        let caps = CSS_SELECTOR_REGEX.captures(r#"$".selector":-1"#).unwrap();
        assert_eq!(&caps["body"], ".selector");
        assert_eq!(&caps["position"], "-1");

        let caps = CSS_SELECTOR_REGEX.captures(r##"$"#id""##).unwrap();
        assert_eq!(&caps["body"], "#id");
        assert!(caps.name("position").is_none());
    }

    #[test]
    fn test_css_body_keeps_inner_quotes() {
        let caps = CSS_SELECTOR_REGEX
            .captures(r#"$"input[name="email"]":first"#)
            .unwrap();
        assert_eq!(&caps["body"], r#"input[name="email"]"#);
        assert_eq!(&caps["position"], "first");
    }

    #[test]
    fn test_xpath_requires_leading_slash() {
        assert!(is_xpath_expression_shaped(r#"$"//foo""#));
        assert!(!is_xpath_expression_shaped(r#"$".foo""#));
        assert!(!CSS_SELECTOR_REGEX.is_match(r#"$"//foo""#));
    }

    #[test]
    fn test_bare_slash_is_neither_shape() {
        assert!(!is_xpath_expression_shaped(r#"$"/""#));
        assert!(!CSS_SELECTOR_REGEX.is_match(r#"$"/""#));
    }

    #[test]
    fn test_empty_body_is_rejected() {
        assert!(!CSS_SELECTOR_REGEX.is_match(r#"$"""#));
        assert!(!ATTRIBUTE_IDENTIFIER_REGEX.is_match(r#"$"".name"#));
    }

    #[test]
    fn test_attribute_captures() {
        let caps = ATTRIBUTE_IDENTIFIER_REGEX
            .captures(r#"$"//hr[@class='edge']":last.data-id"#)
            .unwrap();
        assert_eq!(&caps["body"], "//hr[@class='edge']");
        assert_eq!(&caps["position"], "last");
        assert_eq!(&caps["name"], "data-id");
    }

    #[test]
    fn test_position_must_follow_closing_quote() {
        assert!(!CSS_SELECTOR_REGEX.is_match(r#"$".selector:0"#));
        assert!(!CSS_SELECTOR_REGEX.is_match(r#"$".selector":middle"#));
    }

    #[test]
    fn test_multibyte_bodies() {
        let caps = CSS_SELECTOR_REGEX.captures(r#"$"[title=«日本»]":2"#).unwrap();
        assert_eq!(&caps["body"], "[title=«日本»]");
        assert_eq!(caps["body"].chars().count(), 12);
        assert!(is_xpath_expression_shaped(r#"$"/é""#));
    }

    #[test]
    fn test_trailing_newline_is_not_accepted() {
        assert!(!CSS_SELECTOR_REGEX.is_match("$\".a\"\n"));
        assert!(!is_xpath_expression_shaped("$\"/a\"\n"));
        assert!(!ATTRIBUTE_IDENTIFIER_REGEX.is_match("$\".a\".name\n"));
    }

    #[test]
    fn test_parent_prefix() {
        let found = PARENT_PREFIX_REGEX.find(r#"{{ $".parent" }} $".child""#).unwrap();
        assert_eq!(found.as_str(), r#"{{ $".parent" }} "#);
        assert!(PARENT_PREFIX_REGEX.find(r#"$".parent" >> $".child""#).is_none());
    }
}
