//! Wire types for Notion pages and database queries
//!
//! API docs: https://developers.notion.com/reference/page-property-values
//!
//! Only the property types the model maps are modelled structurally; any
//! other `type` deserializes to [`PropertyValue::Unsupported`] so a page
//! with extra columns still parses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Property map as sent to and returned by the pages endpoints.
pub type Properties = BTreeMap<String, PropertyValue>;

/// A page property, tagged by its `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<RichText>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    Select {
        #[serde(default)]
        select: Option<SelectOption>,
    },
    MultiSelect {
        #[serde(default)]
        multi_select: Vec<SelectOption>,
    },
    Files {
        #[serde(default)]
        files: Vec<FileObject>,
    },
    #[serde(other)]
    Unsupported,
}

impl PropertyValue {
    /// The `type` tag as it appears on the wire.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Title { .. } => "title",
            PropertyValue::RichText { .. } => "rich_text",
            PropertyValue::Select { .. } => "select",
            PropertyValue::MultiSelect { .. } => "multi_select",
            PropertyValue::Files { .. } => "files",
            PropertyValue::Unsupported => "unsupported",
        }
    }
}

/// One run of rich text.
///
/// Responses carry `plain_text`; requests only need `text.content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(rename = "type", default = "RichText::default_type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plain_text: Option<String>,
}

impl RichText {
    /// A plain `text` run with the given content.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: Self::default_type(),
            text: Some(TextContent {
                content: content.into(),
            }),
            plain_text: None,
        }
    }

    /// Rendered text of the run: `plain_text` when the store supplied it,
    /// otherwise the raw text content.
    pub fn plain_text(&self) -> &str {
        self.plain_text
            .as_deref()
            .or_else(|| self.text.as_ref().map(|t| t.content.as_str()))
            .unwrap_or_default()
    }

    fn default_type() -> String {
        "text".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
}

/// Select / multi-select option. Only the name is needed to write one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl SelectOption {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            color: None,
        }
    }
}

/// Entry of a `files` property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FileObject {
    /// File hosted elsewhere, referenced by URL
    External {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        external: ExternalFile,
    },
    /// File uploaded to and hosted by Notion
    File {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        file: HostedFile,
    },
    #[serde(other)]
    Other,
}

impl FileObject {
    pub fn external(name: impl Into<String>, url: impl Into<String>) -> Self {
        FileObject::External {
            name: Some(name.into()),
            external: ExternalFile { url: url.into() },
        }
    }

    /// Download URL, if this file kind has one.
    pub fn url(&self) -> Option<&str> {
        match self {
            FileObject::External { external, .. } => Some(&external.url),
            FileObject::File { file, .. } => Some(&file.url),
            FileObject::Other => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalFile {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostedFile {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_time: Option<String>,
}

/// A page object. `properties` is absent on partial page responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
}

/// Response body of a database query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<RawPage>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_property_type_is_unsupported() {
        let value: PropertyValue = serde_json::from_value(json!({
            "id": "%3AUPp",
            "type": "number",
            "number": 42
        }))
        .unwrap();
        assert_eq!(value, PropertyValue::Unsupported);
    }

    #[test]
    fn null_select_parses_as_unset() {
        let value: PropertyValue = serde_json::from_value(json!({
            "id": "abc",
            "type": "select",
            "select": null
        }))
        .unwrap();
        assert_eq!(value, PropertyValue::Select { select: None });
    }

    #[test]
    fn rich_text_request_shape() {
        let value = PropertyValue::RichText {
            rich_text: vec![RichText::text("hello")],
        };
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({
                "type": "rich_text",
                "rich_text": [{ "type": "text", "text": { "content": "hello" } }]
            })
        );
    }

    #[test]
    fn plain_text_prefers_rendered_text() {
        let run: RichText = serde_json::from_value(json!({
            "type": "text",
            "text": { "content": "raw", "link": null },
            "plain_text": "rendered"
        }))
        .unwrap();
        assert_eq!(run.plain_text(), "rendered");
        assert_eq!(RichText::text("raw").plain_text(), "raw");
    }

    #[test]
    fn file_urls() {
        let files: Vec<FileObject> = serde_json::from_value(json!([
            { "type": "external", "name": "a.pdf", "external": { "url": "https://x/a.pdf" } },
            { "type": "file", "name": "b.png", "file": { "url": "https://s3/b.png", "expiry_time": "2024-01-01T00:00:00.000Z" } },
            { "type": "file_upload", "file_upload": { "id": "u1" } }
        ]))
        .unwrap();
        let urls: Vec<_> = files.iter().map(FileObject::url).collect();
        assert_eq!(urls, vec![Some("https://x/a.pdf"), Some("https://s3/b.png"), None]);
    }

    #[test]
    fn partial_page_has_no_properties() {
        let page: RawPage = serde_json::from_value(json!({ "object": "page", "id": "p1" })).unwrap();
        assert_eq!(page.id, "p1");
        assert!(page.properties.is_none());
    }
}
