//! Rendering of Atlassian Document Format trees to terminal text.
//!
//! Only text runs and paragraphs are rendered. Every other node kind
//! (lists, headings, media, ...) is skipped without error.

use crate::api::{Mark, Node};

use super::theme;

/// Render a sequence of nodes to a string.
pub fn render(nodes: &[Node]) -> String {
    let mut out = String::new();
    render_into(nodes, &mut out);
    out
}

fn render_into(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text { text, marks } => out.push_str(&render_text(text, marks)),
            Node::Paragraph { content } => {
                render_into(content, out);
                out.push_str("\n\n");
            }
            Node::Other => {}
        }
    }
}

/// A text run, styled by its first link mark if it has one.
fn render_text(text: &str, marks: &[Mark]) -> String {
    let href = marks.iter().find_map(|mark| match mark {
        Mark::Link { attrs } => Some(attrs.href.as_str()),
        Mark::Other => None,
    });

    match href {
        Some(href) if !href.is_empty() && href != text => {
            format!("[{}]({})", text, theme::link(href))
        }
        Some(_) => theme::link(text),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Document;

    #[test]
    fn test_plain_text() {
        assert_eq!(render(&[Node::text("hello")]), "hello");
    }

    #[test]
    fn test_link_with_same_href() {
        let node = Node::link("https://example.com", "https://example.com");
        assert_eq!(render(&[node]), "\x1b[4m\x1b[36mhttps://example.com\x1b[0m");
    }

    #[test]
    fn test_link_with_different_href() {
        let node = Node::link("the docs", "https://example.com/docs");
        assert_eq!(
            render(&[node]),
            "[the docs](\x1b[4m\x1b[36mhttps://example.com/docs\x1b[0m)"
        );
    }

    #[test]
    fn test_link_with_empty_href() {
        let node = Node::link("dangling", "");
        assert_eq!(render(&[node]), "\x1b[4m\x1b[36mdangling\x1b[0m");
    }

    #[test]
    fn test_non_link_marks_are_ignored() {
        let node = Node::Text {
            text: "bold".to_string(),
            marks: vec![Mark::Other],
        };
        assert_eq!(render(&[node]), "bold");
    }

    #[test]
    fn test_paragraphs() {
        let nodes = vec![
            Node::paragraph(vec![Node::text("a")]),
            Node::paragraph(vec![Node::text("b")]),
        ];
        assert_eq!(render(&nodes), "a\n\nb\n\n");
    }

    #[test]
    fn test_nested_paragraph_and_mixed_runs() {
        let nodes = vec![Node::paragraph(vec![
            Node::text("see "),
            Node::link("here", "https://x.test"),
            Node::text("."),
        ])];
        assert_eq!(
            render(&nodes),
            "see [here](\x1b[4m\x1b[36mhttps://x.test\x1b[0m).\n\n"
        );
    }

    #[test]
    fn test_unknown_nodes_are_skipped() {
        let nodes = vec![
            Node::Other,
            Node::paragraph(vec![Node::Other, Node::text("kept")]),
            Node::Other,
        ];
        assert_eq!(render(&nodes), "kept\n\n");
    }

    #[test]
    fn test_empty() {
        assert_eq!(render(&[]), "");
        assert_eq!(render(&[Node::paragraph(vec![])]), "\n\n");
    }

    #[test]
    fn test_render_is_repeatable() {
        let doc: Document = serde_json::from_str(
            r#"{"type": "doc", "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "one"}]},
                {"type": "bulletList", "content": [{"type": "listItem"}]},
                {"type": "paragraph", "content": [{"type": "text", "text": "two"}]}
            ]}"#,
        )
        .unwrap();

        let first = render(&doc.content);
        assert_eq!(first, "one\n\ntwo\n\n");
        assert_eq!(render(&doc.content), first);
    }
}
