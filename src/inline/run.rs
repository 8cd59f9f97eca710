//! Inline run types.

use serde::Serialize;

/// A span of text within a block, with optional markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content")]
pub enum InlineRun {
    /// Literal text, escapes already resolved.
    PlainText(String),
    /// `**strong**` or `__strong__`.
    Bold(Vec<InlineRun>),
    /// `*em*` or `_em_`.
    Italic(Vec<InlineRun>),
    /// `` `code` ``, content verbatim.
    InlineCode(String),
    /// `~~struck~~`.
    Strikethrough(Vec<InlineRun>),
    /// `[text](url)`.
    Link { text: Vec<InlineRun>, url: String },
    /// `![alt](url "title")`. The alt text keeps no markup.
    Image {
        alt: String,
        url: String,
        title: Option<String>,
    },
}

impl InlineRun {
    /// Shorthand for a plain text run.
    pub fn plain(text: impl Into<String>) -> Self {
        InlineRun::PlainText(text.into())
    }

    /// Nested runs of a container run; empty for leaf runs.
    pub fn children(&self) -> &[InlineRun] {
        match self {
            InlineRun::Bold(runs)
            | InlineRun::Italic(runs)
            | InlineRun::Strikethrough(runs)
            | InlineRun::Link { text: runs, .. } => runs,
            InlineRun::PlainText(_) | InlineRun::InlineCode(_) | InlineRun::Image { .. } => &[],
        }
    }

    /// Append the visible text of this run, markup stripped.
    pub fn push_text(&self, out: &mut String) {
        match self {
            InlineRun::PlainText(text)
            | InlineRun::InlineCode(text)
            | InlineRun::Image { alt: text, .. } => out.push_str(text),
            _ => self.children().iter().for_each(|run| run.push_text(out)),
        }
    }
}

/// Visible text of a run sequence.
pub fn plain_text(runs: &[InlineRun]) -> String {
    let mut out = String::new();
    for run in runs {
        run.push_text(&mut out);
    }
    out
}

/// Collects runs, merging adjacent plain text.
#[derive(Debug, Default)]
pub(crate) struct RunBuilder {
    runs: Vec<InlineRun>,
    plain: String,
}

impl RunBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn push_str(&mut self, text: &str) {
        self.plain.push_str(text);
    }

    #[inline]
    pub(crate) fn push_char(&mut self, c: char) {
        self.plain.push(c);
    }

    pub(crate) fn push_run(&mut self, run: InlineRun) {
        self.flush_plain();
        self.runs.push(run);
    }

    fn flush_plain(&mut self) {
        if !self.plain.is_empty() {
            let text = std::mem::take(&mut self.plain);
            self.runs.push(InlineRun::PlainText(text));
        }
    }

    pub(crate) fn finish(mut self) -> Vec<InlineRun> {
        self.flush_plain();
        self.runs
    }
}
