//! # Rich Text Module
//!
//! Renders the CMS rich-text tree (product descriptions) to HTML.
//!
//! ## Document Shape
//! ```text
//! { "root": { "children": [
//!     { "type": "heading",   "tag": "h2", "children": [...] },
//!     { "type": "paragraph", "children": [
//!         { "type": "text", "text": "Бърз", "format": 1 }      ← bold
//!     ]},
//!     { "type": "list", "listType": "check", "children": [
//!         { "type": "listitem", "children": [...] }
//!     ]}
//! ]}}
//! ```
//!
//! Unknown node types keep their children and drop their own wrapper, so a
//! newer editor feature degrades to plain text instead of vanishing.

use serde::{Deserialize, Serialize};

/// Text format bit for bold.
pub const FORMAT_BOLD: u64 = 1;
/// Text format bit for italic.
pub const FORMAT_ITALIC: u64 = 1 << 1;

// =============================================================================
// Document Types
// =============================================================================

/// A rich-text document as stored by the CMS.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextDocument {
    #[serde(default)]
    pub root: Option<RichTextRoot>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextRoot {
    #[serde(default)]
    pub children: Vec<RichTextNode>,
}

/// One node of the tree.
///
/// Kept as a loose record rather than an enum: the editor emits fields whose
/// type depends on the node (`format` is a bitmask on text nodes and an
/// alignment string on paragraphs).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichTextNode {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub format: serde_json::Value,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub list_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Link nodes from newer editor versions nest the url here.
    #[serde(default)]
    pub fields: Option<LinkFields>,
    #[serde(default)]
    pub children: Vec<RichTextNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkFields {
    #[serde(default)]
    pub url: Option<String>,
}

impl RichTextNode {
    /// Creates a text node.
    pub fn text(text: impl Into<String>, format: u64) -> Self {
        RichTextNode {
            kind: "text".to_string(),
            text: Some(text.into()),
            format: serde_json::Value::from(format),
            ..RichTextNode::default()
        }
    }

    /// Creates an element node of the given type.
    pub fn element(kind: impl Into<String>, children: Vec<RichTextNode>) -> Self {
        RichTextNode {
            kind: kind.into(),
            children,
            ..RichTextNode::default()
        }
    }

    fn format_bits(&self) -> u64 {
        self.format.as_u64().unwrap_or(0)
    }

    fn link_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .or_else(|| self.fields.as_ref().and_then(|f| f.url.as_deref()))
    }

    /// `h1`..`h6`; anything else falls back to `h2`.
    fn heading_tag(&self) -> &'static str {
        let level = self
            .tag
            .as_deref()
            .map(|tag| tag.trim_start_matches('h'))
            .unwrap_or("");
        match level {
            "1" => "h1",
            "2" => "h2",
            "3" => "h3",
            "4" => "h4",
            "5" => "h5",
            "6" => "h6",
            _ => "h2",
        }
    }
}

impl RichTextDocument {
    /// Wraps top-level nodes into a document.
    pub fn from_nodes(children: Vec<RichTextNode>) -> Self {
        RichTextDocument {
            root: Some(RichTextRoot { children }),
        }
    }

    fn nodes(&self) -> &[RichTextNode] {
        self.root.as_ref().map(|r| r.children.as_slice()).unwrap_or(&[])
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders the document to an HTML fragment.
///
/// Text and attribute values are escaped. Links open in a new tab; links with
/// a `javascript:`, `data:` or `vbscript:` target are rendered as their text
/// only.
pub fn render_html(document: &RichTextDocument) -> String {
    let mut out = String::new();
    for node in document.nodes() {
        render_node(node, &mut out);
    }
    out
}

/// Concatenates the document's text, one space between blocks.
pub fn plain_text(document: &RichTextDocument) -> String {
    let blocks: Vec<String> = document
        .nodes()
        .iter()
        .map(|node| {
            let mut text = String::new();
            collect_text(node, &mut text);
            text.trim().to_string()
        })
        .filter(|text| !text.is_empty())
        .collect();
    blocks.join(" ")
}

fn collect_text(node: &RichTextNode, out: &mut String) {
    if let Some(text) = &node.text {
        out.push_str(text);
    }
    for child in &node.children {
        collect_text(child, out);
    }
}

fn render_children(node: &RichTextNode, out: &mut String) {
    for child in &node.children {
        render_node(child, out);
    }
}

fn render_wrapped(node: &RichTextNode, open: &str, close: &str, out: &mut String) {
    out.push_str(open);
    render_children(node, out);
    out.push_str(close);
}

fn render_node(node: &RichTextNode, out: &mut String) {
    match node.kind.as_str() {
        "text" => {
            let mut text = escape_html(node.text.as_deref().unwrap_or(""));
            let bits = node.format_bits();
            if bits & FORMAT_BOLD != 0 {
                text = format!("<strong>{}</strong>", text);
            }
            if bits & FORMAT_ITALIC != 0 {
                text = format!("<em>{}</em>", text);
            }
            out.push_str(&text);
        }
        "linebreak" => out.push_str("<br>"),
        "paragraph" => render_wrapped(node, "<p>", "</p>", out),
        "heading" => {
            let tag = node.heading_tag();
            render_wrapped(node, &format!("<{}>", tag), &format!("</{}>", tag), out);
        }
        "list" => match node.list_type.as_deref() {
            Some("check") => render_wrapped(node, "<ul class=\"checklist\">", "</ul>", out),
            Some("number") => render_wrapped(node, "<ol>", "</ol>", out),
            _ => render_wrapped(node, "<ul>", "</ul>", out),
        },
        "listitem" => render_wrapped(node, "<li>", "</li>", out),
        "link" | "autolink" => match node.link_url().filter(|url| is_safe_url(url)) {
            Some(url) => {
                let open = format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">",
                    escape_html(url)
                );
                render_wrapped(node, &open, "</a>", out);
            }
            None => render_children(node, out),
        },
        _ => render_children(node, out),
    }
}

/// Reads the scheme the way a browser would: leading controls and spaces are
/// trimmed and tab/newline characters anywhere are ignored.
fn is_safe_url(url: &str) -> bool {
    let scheme: String = url
        .trim_start_matches(|c: char| c.is_ascii_control() || c == ' ')
        .chars()
        .filter(|c| !c.is_ascii_control())
        .take_while(|c| !matches!(c, ':' | '/' | '?' | '#'))
        .collect::<String>()
        .to_ascii_lowercase();
    !matches!(scheme.as_str(), "javascript" | "data" | "vbscript")
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(children: Vec<RichTextNode>) -> RichTextNode {
        RichTextNode::element("paragraph", children)
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(render_html(&RichTextDocument::default()), "");
        assert_eq!(render_html(&RichTextDocument::from_nodes(vec![])), "");
        assert_eq!(plain_text(&RichTextDocument::default()), "");
    }

    #[test]
    fn test_paragraph_with_formats() {
        let doc = RichTextDocument::from_nodes(vec![paragraph(vec![
            RichTextNode::text("Бърз ", 0),
            RichTextNode::text("печат", FORMAT_BOLD),
            RichTextNode::text(" и ", 0),
            RichTextNode::text("тих", FORMAT_BOLD | FORMAT_ITALIC),
        ])]);
        assert_eq!(
            render_html(&doc),
            "<p>Бърз <strong>печат</strong> и <em><strong>тих</strong></em></p>"
        );
    }

    #[test]
    fn test_escapes_text() {
        let doc = RichTextDocument::from_nodes(vec![paragraph(vec![RichTextNode::text(
            "<script>alert('x')</script> & co",
            0,
        )])]);
        assert_eq!(
            render_html(&doc),
            "<p>&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co</p>"
        );
    }

    #[test]
    fn test_lists_and_headings_from_json() {
        let json = r#"{"root":{"type":"root","children":[
            {"type":"heading","tag":"h3","children":[{"type":"text","text":"Характеристики","format":0}]},
            {"type":"list","listType":"check","children":[
                {"type":"listitem","children":[{"type":"text","text":"Wi-Fi"}]}
            ]},
            {"type":"list","listType":"number","children":[
                {"type":"listitem","children":[{"type":"text","text":"Първо"}]}
            ]},
            {"type":"paragraph","format":"center","children":[{"type":"text","text":"Край"}]}
        ]}}"#;
        let doc: RichTextDocument = serde_json::from_str(json).unwrap();
        assert_eq!(
            render_html(&doc),
            "<h3>Характеристики</h3>\
             <ul class=\"checklist\"><li>Wi-Fi</li></ul>\
             <ol><li>Първо</li></ol>\
             <p>Край</p>"
        );
    }

    #[test]
    fn test_links() {
        let json = r#"{"root":{"children":[{"type":"paragraph","children":[
            {"type":"link","url":"https://nra.bg","children":[{"type":"text","text":"НАП"}]},
            {"type":"link","fields":{"url":"https://datecs.bg"},"children":[{"type":"text","text":"Datecs"}]},
            {"type":"link","url":"javascript:alert(1)","children":[{"type":"text","text":"bad"}]}
        ]}]}}"#;
        let doc: RichTextDocument = serde_json::from_str(json).unwrap();
        assert_eq!(
            render_html(&doc),
            "<p><a href=\"https://nra.bg\" target=\"_blank\" rel=\"noopener noreferrer\">НАП</a>\
             <a href=\"https://datecs.bg\" target=\"_blank\" rel=\"noopener noreferrer\">Datecs</a>\
             bad</p>"
        );
    }

    #[test]
    fn test_obfuscated_script_links_render_as_text() {
        for url in [
            "java\tscript:alert(1)",
            "java\nscript:alert(1)",
            "\u{1}javascript:alert(1)",
            " \r\nJavaScript:alert(1)",
            "data\t:text/html,x",
        ] {
            let mut link = RichTextNode::element("link", vec![RichTextNode::text("x", 0)]);
            link.url = Some(url.to_string());
            let doc = RichTextDocument::from_nodes(vec![paragraph(vec![link])]);
            assert_eq!(render_html(&doc), "<p>x</p>", "url {:?}", url);
        }
    }

    #[test]
    fn test_relative_and_mail_links_kept() {
        assert!(is_safe_url("/products/daisy"));
        assert!(is_safe_url("mailto:office@gpinvest.bg"));
        assert!(is_safe_url("?page=2#javascript:x"));
    }

    #[test]
    fn test_unknown_nodes_keep_children() {
        let doc = RichTextDocument::from_nodes(vec![RichTextNode::element(
            "quote",
            vec![RichTextNode::text("цитат", 0)],
        )]);
        assert_eq!(render_html(&doc), "цитат");
    }

    #[test]
    fn test_missing_root_children() {
        let doc: RichTextDocument = serde_json::from_str(r#"{"root":{}}"#).unwrap();
        assert_eq!(render_html(&doc), "");
        let doc: RichTextDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(render_html(&doc), "");
    }

    #[test]
    fn test_plain_text() {
        let doc = RichTextDocument::from_nodes(vec![
            paragraph(vec![RichTextNode::text("Касов апарат", 0)]),
            paragraph(vec![]),
            paragraph(vec![RichTextNode::text("с ", 0), RichTextNode::text("GPRS", FORMAT_BOLD)]),
        ]);
        assert_eq!(plain_text(&doc), "Касов апарат с GPRS");
    }
}
