//! The results area and the renderer that fills it.

use std::sync::OnceLock;

use minijinja::{context, Environment};
use serde_json::Value;
use tracing::error;

use crate::error::SearchError;

pub const NO_RESULTS: &str = "No results found";

const RESULTS_TEMPLATE: &str = include_str!("../templates/results.html");

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultsContent {
    #[default]
    Empty,
    /// A single line of text: the no-results notice or an error.
    Message(String),
    /// One entry per result, already serialized for display.
    List(Vec<String>),
}

/// The page region that search output is written to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsArea {
    content: ResultsContent,
}

impl ResultsArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &ResultsContent {
        &self.content
    }

    pub fn clear(&mut self) {
        self.content = ResultsContent::Empty;
    }

    pub fn show_message(&mut self, text: impl Into<String>) {
        self.content = ResultsContent::Message(text.into());
    }

    /// Replace the content with `Error: <description>`.
    pub fn show_error(&mut self, err: impl std::fmt::Display) {
        self.show_message(format!("Error: {}", err));
    }

    /// Replace the content with a rendering of `data`.
    ///
    /// Absent data, `[]` and the falsy scalars (`null`, `false`, `0`, `""`)
    /// show [`NO_RESULTS`]. An array shows one item per entry, each
    /// pretty-printed with two-space indentation. Any other shape is an error
    /// and leaves the area cleared.
    pub fn render(&mut self, data: Option<&Value>) -> Result<(), SearchError> {
        self.clear();

        let entries = match data {
            None => {
                self.show_message(NO_RESULTS);
                return Ok(());
            }
            Some(value) if is_falsy(value) => {
                self.show_message(NO_RESULTS);
                return Ok(());
            }
            Some(Value::Array(entries)) => entries,
            Some(other) => return Err(SearchError::UnexpectedShape(json_kind(other))),
        };

        if entries.is_empty() {
            self.show_message(NO_RESULTS);
            return Ok(());
        }

        let items = entries
            .iter()
            .map(serde_json::to_string_pretty)
            .collect::<Result<Vec<_>, _>>()
            .map_err(SearchError::Encode)?;
        self.content = ResultsContent::List(items);
        Ok(())
    }

    /// List items, empty unless a result list is shown.
    pub fn items(&self) -> &[String] {
        match &self.content {
            ResultsContent::List(items) => items,
            _ => &[],
        }
    }

    /// Plain-text content, as `textContent` would read it.
    pub fn text(&self) -> String {
        match &self.content {
            ResultsContent::Empty => String::new(),
            ResultsContent::Message(text) => text.clone(),
            ResultsContent::List(items) => items.join("\n"),
        }
    }

    /// Markup for the area's inner HTML. All text is escaped.
    pub fn to_html(&self) -> Result<String, minijinja::Error> {
        let tmpl = templates().get_template("results.html")?;

        match &self.content {
            ResultsContent::Empty => Ok(String::new()),
            ResultsContent::Message(message) => {
                tmpl.render(context! { kind => "message", message => message })
            }
            ResultsContent::List(items) => tmpl.render(context! { kind => "list", items => items }),
        }
    }
}

/// Parsed once per process. A broken template surfaces as a lookup error on render.
fn templates() -> &'static Environment<'static> {
    static TEMPLATES: OnceLock<Environment<'static>> = OnceLock::new();
    TEMPLATES.get_or_init(|| {
        let mut env = Environment::new();
        if let Err(e) = env.add_template("results.html", RESULTS_TEMPLATE) {
            error!(error = %e, "results template failed to parse");
        }
        env
    })
}

/// `null`, `false`, zero and the empty string.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_array_shows_no_results() {
        let mut area = ResultsArea::new();
        area.render(Some(&json!([]))).unwrap();
        assert_eq!(area.text(), "No results found");
        assert!(area.items().is_empty());
    }

    #[test]
    fn test_null_and_absent_show_no_results() {
        let mut area = ResultsArea::new();
        area.render(Some(&Value::Null)).unwrap();
        assert_eq!(area.text(), NO_RESULTS);

        area.render(None).unwrap();
        assert_eq!(area.content(), &ResultsContent::Message(NO_RESULTS.to_string()));
    }

    #[test]
    fn test_falsy_scalars_show_no_results() {
        for data in [json!(false), json!(0), json!(0.0), json!("")] {
            let mut area = ResultsArea::new();
            area.show_message("stale");
            area.render(Some(&data)).unwrap();
            assert_eq!(area.text(), NO_RESULTS, "{data} did not show no-results");
        }
    }

    #[test]
    fn test_truthy_scalars_are_rejected() {
        let mut area = ResultsArea::new();
        for (data, kind) in [(json!(true), "boolean"), (json!(3), "number"), (json!("x"), "string")] {
            let err = area.render(Some(&data)).unwrap_err();
            assert!(matches!(err, SearchError::UnexpectedShape(k) if k == kind));
        }
    }

    #[test]
    fn test_html_template_is_reused() {
        let mut area = ResultsArea::new();
        area.show_message(NO_RESULTS);
        let first = area.to_html().unwrap();
        assert_eq!(area.to_html().unwrap(), first);
        assert!(std::ptr::eq(templates(), templates()));
    }

    #[test]
    fn test_one_item_per_entry_pretty_printed() {
        let data = json!([
            { "agent": "iqvia", "data": { "competitors": 3 } },
            { "agent": "pubmed" },
            "plain string",
        ]);
        let mut area = ResultsArea::new();
        area.render(Some(&data)).unwrap();

        let items = area.items();
        assert_eq!(items.len(), 3);
        assert_eq!(
            items[0],
            "{\n  \"agent\": \"iqvia\",\n  \"data\": {\n    \"competitors\": 3\n  }\n}"
        );
        assert_eq!(items[1], "{\n  \"agent\": \"pubmed\"\n}");
        assert_eq!(items[2], "\"plain string\"");
    }

    #[test]
    fn test_render_replaces_previous_content() {
        let mut area = ResultsArea::new();
        area.render(Some(&json!([{ "a": 1 }, { "b": 2 }]))).unwrap();
        assert_eq!(area.items().len(), 2);

        area.render(Some(&json!([]))).unwrap();
        assert!(area.items().is_empty());
        assert_eq!(area.text(), NO_RESULTS);
    }

    #[test]
    fn test_non_array_is_rejected_and_area_cleared() {
        let mut area = ResultsArea::new();
        area.show_message("stale");
        let err = area.render(Some(&json!({ "results": [] }))).unwrap_err();
        assert!(matches!(err, SearchError::UnexpectedShape("object")));
        assert_eq!(area.content(), &ResultsContent::Empty);
    }

    #[test]
    fn test_error_text() {
        let mut area = ResultsArea::new();
        area.show_error(&SearchError::Status(reqwest::StatusCode::NOT_FOUND));
        assert_eq!(area.text(), "Error: HTTP error! status: 404");
    }

    #[test]
    fn test_html_escapes_text() {
        let mut area = ResultsArea::new();
        area.render(Some(&json!([{ "note": "<script>alert(1)</script>" }]))).unwrap();
        let html = area.to_html().unwrap();

        assert!(html.starts_with("<ul class=\"result-list\">"));
        assert_eq!(html.matches("<li").count(), 1);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_html_for_message_and_empty() {
        let mut area = ResultsArea::new();
        assert_eq!(area.to_html().unwrap(), "");

        area.show_message(NO_RESULTS);
        assert_eq!(area.to_html().unwrap(), "<p>No results found</p>");
    }
}
