//! Turn → display markup.
//!
//! Rendering is a projection: it never touches the stored turn. User text is
//! shown literally. Assistant text is split into paragraphs at blank lines and
//! at the labeled section headers the assistant is prompted to use
//! (`Script:`, `Tone:`, `CTA:` ...), with remaining newlines as soft breaks.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Role, Turn};

/// Section labels that open a new paragraph, matched case-insensitively.
pub const SECTION_LABELS: [&str; 7] = [
    "Script",
    "Voiceover",
    "Tone",
    "CTA",
    "Music",
    "Visual direction",
    "Structure",
];

static SECTION_BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    let labels = SECTION_LABELS
        .iter()
        .map(|label| regex::escape(label))
        .collect::<Vec<_>>()
        .join("|");
    // A leading `**` stays with a bold header.
    Regex::new(&format!(r"(?i)\r?\n[ \t\r]*\n\s*|\*{{0,2}}\b(?:{labels}):"))
        .expect("section boundary regex must compile")
});

/// One paragraph; lines are separated by soft breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    lines: Vec<String>,
}

impl Block {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Display projection of a single turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    role: Role,
    blocks: Vec<Block>,
}

impl RenderedMessage {
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// HTML fragment: one `<div>` per message, one `<p>` per block,
    /// `<br>` between lines. All text is escaped.
    pub fn to_markup(&self) -> String {
        let mut out = format!(r#"<div class="chatbot-message chatbot-message--{}">"#, self.role);
        for block in &self.blocks {
            out.push_str("<p>");
            let lines = block
                .lines
                .iter()
                .map(|line| escape_html(line))
                .collect::<Vec<_>>();
            out.push_str(&lines.join("<br>"));
            out.push_str("</p>");
        }
        out.push_str("</div>");
        out
    }

    /// Terminal rendering: blank line between blocks.
    pub fn to_plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.lines.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Stateless turn renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageFormatter;

impl MessageFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Render a turn for display. System turns are never shown.
    pub fn render(&self, turn: &Turn) -> Option<RenderedMessage> {
        let blocks = match turn.role() {
            Role::System => return None,
            Role::User => vec![Block {
                lines: vec![turn.content().to_string()],
            }],
            Role::Assistant => split_sections(turn.content()),
        };
        Some(RenderedMessage {
            role: turn.role(),
            blocks,
        })
    }
}

fn split_sections(text: &str) -> Vec<Block> {
    let mut raw = Vec::new();
    let mut cursor = 0;
    for m in SECTION_BOUNDARY_RE.find_iter(text) {
        raw.push(&text[cursor..m.start()]);
        // Headers stay with the paragraph they open; blank lines are dropped.
        cursor = if m.as_str().ends_with(':') {
            m.start()
        } else {
            m.end()
        };
    }
    raw.push(&text[cursor..]);

    raw.into_iter()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| Block {
            lines: segment
                .lines()
                .map(|line| line.trim_end().to_string())
                .collect(),
        })
        .collect()
}

fn escape_html(text: &str) -> String {
    text.chars()
        .fold(String::with_capacity(text.len()), |mut escaped, ch| {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#39;"),
                _ => escaped.push(ch),
            }
            escaped
        })
}
