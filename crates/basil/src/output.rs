use basil_identifier::IdentifierTypeAnalyser;
use serde_json::json;

pub fn classification(analyser: &IdentifierTypeAnalyser, identifier: &str, as_json: bool) -> String {
    let identifier_type = analyser.classify(identifier);
    if as_json {
        json!({
            "identifier": identifier,
            "classification": identifier_type,
        })
        .to_string()
    } else {
        format!("{}\t{}", identifier_type, identifier)
    }
}

pub fn predicates(analyser: &IdentifierTypeAnalyser, identifier: &str, as_json: bool) -> String {
    let results = [
        ("css_selector", analyser.is_css_selector(identifier)),
        ("xpath_expression", analyser.is_xpath_expression(identifier)),
        ("element_identifier", analyser.is_element_identifier(identifier)),
        ("attribute_identifier", analyser.is_attribute_identifier(identifier)),
        ("dom_identifier", analyser.is_dom_identifier(identifier)),
        ("descendant_dom_identifier", analyser.is_descendant_dom_identifier(identifier)),
        (
            "dom_or_descendant_dom_identifier",
            analyser.is_dom_or_descendant_dom_identifier(identifier),
        ),
    ];

    if as_json {
        let mut object = serde_json::Map::new();
        object.insert("identifier".into(), json!(identifier));
        for (name, value) in results {
            object.insert(name.into(), json!(value));
        }
        serde_json::Value::Object(object).to_string()
    } else {
        let mut lines = vec![identifier.to_string()];
        for (name, value) in results {
            lines.push(format!("  {:<34}{}", name, value));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_text() {
        let analyser = IdentifierTypeAnalyser::default();
        assert_eq!(
            classification(&analyser, r#"$".selector""#, false),
            "css\t$\".selector\""
        );
        assert_eq!(classification(&analyser, "invalid", false), "unknown\tinvalid");
    }

    #[test]
    fn test_classification_json() {
        let analyser = IdentifierTypeAnalyser::default();
        let line = classification(&analyser, r#"$"/body":first.id"#, true);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["identifier"], r#"$"/body":first.id"#);
        assert_eq!(value["classification"]["type"], "attribute");
        assert_eq!(value["classification"]["base"]["body"], "/body");
        assert_eq!(value["classification"]["name"], "id");
    }

    #[test]
    fn test_predicates_json() {
        let analyser = IdentifierTypeAnalyser::default();
        let line = predicates(&analyser, r#"$".parent" >> $".child""#, true);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["css_selector"], false);
        assert_eq!(value["dom_identifier"], false);
        assert_eq!(value["descendant_dom_identifier"], true);
        assert_eq!(value["dom_or_descendant_dom_identifier"], true);
    }

    #[test]
    fn test_predicates_text() {
        let analyser = IdentifierTypeAnalyser::default();
        let report = predicates(&analyser, r#"$"/body""#, false);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], r#"$"/body""#);
        assert!(lines[2].trim_start().starts_with("xpath_expression"));
        assert!(lines[2].ends_with("true"));
    }
}
