//! Rendered-text extraction from parsed HTML.
//!
//! Produces roughly what a browser's `innerText` would show: whitespace
//! inside text nodes collapses to single spaces, `<br>` starts a new line,
//! block elements sit on their own lines and paragraphs are separated by a
//! blank line. Text inside `<pre>` keeps its spaces and newlines.

use ego_tree::NodeRef;
use scraper::{ElementRef, Node};
use std::ops::Deref;

/// Elements whose boundaries force a line break.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "center", "dd", "div", "dl", "dt",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "main", "nav", "ol", "pre", "section", "table", "tbody", "td", "tfoot", "th",
    "thead", "tr", "ul",
];

/// Elements that never contribute visible text.
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Visible text of `element` with line structure preserved.
pub fn inner_text(element: ElementRef<'_>) -> String {
    let mut out = TextBuffer::default();
    walk(*element.deref(), &mut out);
    out.finish()
}

fn walk(node: NodeRef<'_, Node>, out: &mut TextBuffer) {
    match node.value() {
        Node::Text(text) if out.preformatted > 0 => out.push_preformatted(text.deref()),
        Node::Text(text) => out.push_text(text.deref()),
        Node::Element(elem) => {
            let tag = elem.name();
            if SKIPPED_TAGS.contains(&tag) {
                return;
            }
            if tag == "br" {
                out.push_newline();
                return;
            }

            let breaks = if tag == "p" {
                2
            } else if BLOCK_TAGS.contains(&tag) {
                1
            } else {
                0
            };

            let pre = tag == "pre";
            out.request_breaks(breaks);
            if pre {
                out.preformatted += 1;
            }
            for child in node.children() {
                walk(child, out);
            }
            if pre {
                out.preformatted -= 1;
            }
            out.request_breaks(breaks);
        }
        _ => {}
    }
}

#[derive(Default)]
struct TextBuffer {
    text: String,
    pending_space: bool,
    /// Newlines owed before the next visible character.
    pending_breaks: usize,
    /// Depth of enclosing `<pre>` elements; whitespace is kept verbatim inside.
    preformatted: usize,
}

impl TextBuffer {
    fn push_text(&mut self, s: &str) {
        for c in s.chars() {
            if c.is_whitespace() {
                self.pending_space = true;
                continue;
            }
            self.flush_breaks();
            if self.pending_space && !self.at_line_start() {
                self.text.push(' ');
            }
            self.pending_space = false;
            self.text.push(c);
        }
    }

    fn push_preformatted(&mut self, s: &str) {
        for c in s.chars() {
            match c {
                '\n' => self.push_newline(),
                '\r' => {}
                _ => {
                    self.flush_breaks();
                    if self.pending_space && !self.at_line_start() {
                        self.text.push(' ');
                    }
                    self.pending_space = false;
                    self.text.push(c);
                }
            }
        }
    }

    fn push_newline(&mut self) {
        self.flush_breaks();
        self.text.push('\n');
        self.pending_space = false;
    }

    fn request_breaks(&mut self, n: usize) {
        if n > 0 {
            self.pending_breaks = self.pending_breaks.max(n);
            self.pending_space = false;
        }
    }

    fn flush_breaks(&mut self) {
        if self.pending_breaks == 0 {
            return;
        }
        if !self.text.is_empty() {
            let trailing = self.text.chars().rev().take_while(|&c| c == '\n').count();
            for _ in trailing..self.pending_breaks {
                self.text.push('\n');
            }
        }
        self.pending_breaks = 0;
    }

    fn at_line_start(&self) -> bool {
        self.text.is_empty() || self.text.ends_with('\n')
    }

    fn finish(self) -> String {
        self.text.trim().to_string()
    }
}
