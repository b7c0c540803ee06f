use std::fmt;

/// Indentation emitted per nesting level.
pub const INDENTATION: &str = "\t";

/// Generated source text as a tree of lines and indented blocks.
///
/// Rendering is pure: the same tree always renders to the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedSource {
    Line(String),
    /// A lead line, a body indented one level deeper, and a tail line.
    Block {
        lead: String,
        body: Vec<GeneratedSource>,
        tail: String,
    },
}

impl GeneratedSource {
    pub fn line(line: impl Into<String>) -> Self {
        GeneratedSource::Line(line.into())
    }

    /// An empty line; rendered without indentation.
    pub fn blank() -> Self {
        GeneratedSource::Line(String::new())
    }

    pub fn block(lead: impl Into<String>, body: Vec<GeneratedSource>, tail: impl Into<String>) -> Self {
        GeneratedSource::Block {
            lead: lead.into(),
            body,
            tail: tail.into(),
        }
    }

    pub fn render(&self) -> String {
        self.render_at(0)
    }

    /// Render with `level` levels of indentation.
    pub fn render_at(&self, level: usize) -> String {
        let mut lines = Vec::new();
        self.collect_lines(level, &mut lines);
        lines.join("\n")
    }

    fn collect_lines(&self, level: usize, lines: &mut Vec<String>) {
        let indentation = INDENTATION.repeat(level);
        match self {
            GeneratedSource::Line(line) if line.is_empty() => lines.push(String::new()),
            GeneratedSource::Line(line) => lines.push(format!("{}{}", indentation, line)),
            GeneratedSource::Block { lead, body, tail } => {
                lines.push(format!("{}{}", indentation, lead));
                for source in body {
                    source.collect_lines(level + 1, lines);
                }
                lines.push(format!("{}{}", indentation, tail));
            }
        }
    }
}

impl fmt::Display for GeneratedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Render a sequence of top-level sources, one after the other.
pub fn render_all(sources: &[GeneratedSource]) -> String {
    sources
        .iter()
        .map(GeneratedSource::render)
        .collect::<Vec<_>>()
        .join("\n")
}
