//! Opt-in validation of cheatsheet data.
//!
//! [`Repository::create`] and [`Repository::update`] write whatever they are
//! given. Callers that take data from a user run [`Repository::validate`]
//! first and decide themselves whether to block the write.
//!
//! Errors are human-readable strings; per-item errors are 1-indexed
//! (`"Item 3: code is required"`). [`Repository::validate_raw`] accepts
//! untyped JSON so that shape errors (tags not a list, items that are not
//! objects) can be reported too.

use crate::catalog::UNSUPPORTED_LANGUAGE_KEY;
use crate::model::CheatItem;
use crate::repository::Repository;
use crate::store::SheetBackend;
use serde_json::{Map, Value};

impl<B: SheetBackend> Repository<B> {
    /// Validates typed input. Empty result means valid.
    pub fn validate(
        &self,
        title: &str,
        tags: &[String],
        items: &[CheatItem],
        language: Option<&str>,
    ) -> Vec<String> {
        let tags = Value::Array(tags.iter().cloned().map(Value::String).collect());
        let items = Value::Array(items.iter().map(item_to_value).collect());
        self.validate_raw(title, &tags, &items, language)
    }

    /// Validates caller-supplied JSON for `tags` and `items`.
    pub fn validate_raw(
        &self,
        title: &str,
        tags: &Value,
        items: &Value,
        language: Option<&str>,
    ) -> Vec<String> {
        let mut errors = Vec::new();

        if title.trim().is_empty() {
            errors.push("Title is required".to_string());
        }

        if let Some(code) = language.filter(|code| !code.is_empty()) {
            if !self.catalog().is_supported(code) {
                let message = self.interface_text(UNSUPPORTED_LANGUAGE_KEY, None);
                errors.push(format!("{}: {}", message, self.catalog().codes().join(", ")));
            }
        }

        if !tags.is_array() {
            errors.push("Tags must be a list".to_string());
        }

        let items = items.as_array();
        if items.map_or(true, |items| items.is_empty()) {
            errors.push("There must be at least one item".to_string());
        }

        for (i, item) in items.into_iter().flatten().enumerate() {
            let n = i + 1;
            let Some(item) = item.as_object() else {
                errors.push(format!("Item {}: must be an object", n));
                continue;
            };
            if is_blank(item, "code") {
                errors.push(format!("Item {}: code is required", n));
            }
            if is_blank(item, "description") {
                errors.push(format!("Item {}: description is required", n));
            }
        }

        errors
    }
}

fn is_blank(item: &Map<String, Value>, field: &str) -> bool {
    item.get(field)
        .and_then(Value::as_str)
        .map_or(true, |s| s.trim().is_empty())
}

fn item_to_value(item: &CheatItem) -> Value {
    let mut map = Map::new();
    map.insert("code".to_string(), Value::String(item.code.clone()));
    map.insert(
        "description".to_string(),
        Value::String(item.description.clone()),
    );
    if let Some(example) = &item.example {
        map.insert("example".to_string(), Value::String(example.clone()));
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{item, mem_repo};
    use serde_json::json;

    #[test]
    fn test_valid_input() {
        let repo = mem_repo();
        let errors = repo.validate("Git", &["git".into()], &[item("git status", "Status")], Some("es"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_empty_everything() {
        let repo = mem_repo();
        let errors = repo.validate("", &[], &[], None);
        assert_eq!(
            errors,
            vec!["Title is required", "There must be at least one item"]
        );
    }

    #[test]
    fn test_blank_code_is_single_item_error() {
        let repo = mem_repo();
        let errors = repo.validate("X", &["git".into()], &[item("", "d")], None);
        assert_eq!(errors, vec!["Item 1: code is required"]);
    }

    #[test]
    fn test_item_errors_are_one_indexed() {
        let repo = mem_repo();
        let items = [item("a", "b"), item("c", "d"), item("  ", " ")];
        let errors = repo.validate("X", &[], &items, None);
        assert_eq!(
            errors,
            vec!["Item 3: code is required", "Item 3: description is required"]
        );
    }

    #[test]
    fn test_unsupported_language_message() {
        let repo = mem_repo();
        let errors = repo.validate("X", &[], &[item("a", "b")], Some("xx"));
        assert_eq!(
            errors,
            vec!["Language not supported. Available languages: en, es, fr"]
        );

        // Message follows the repository's default language
        let repo = repo.with_default_language("es");
        let errors = repo.validate("X", &[], &[item("a", "b")], Some("xx"));
        assert!(errors[0].starts_with("Idioma no soportado"));
    }

    #[test]
    fn test_empty_language_is_ignored() {
        let repo = mem_repo();
        assert!(repo.validate("X", &[], &[item("a", "b")], Some("")).is_empty());
    }

    #[test]
    fn test_raw_shape_errors() {
        let repo = mem_repo();
        let errors = repo.validate_raw(
            "X",
            &json!("git"),
            &json!([{"code": "a", "description": "b"}, "oops", {"code": 3}]),
            None,
        );
        assert_eq!(
            errors,
            vec![
                "Tags must be a list",
                "Item 2: must be an object",
                "Item 3: code is required",
                "Item 3: description is required",
            ]
        );

        let errors = repo.validate_raw("X", &json!([]), &json!({"code": "a"}), None);
        assert_eq!(errors, vec!["There must be at least one item"]);
    }
}
