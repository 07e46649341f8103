//! Diff records shared by the run diff and judge diff renderers

use serde::{Deserialize, Serialize};

/// Classification of a compared line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineClass {
    /// Both sides match
    Equal,
    /// Both sides have differing content
    Differ,
    /// Content matches but the lines end differently
    EndOfLine,
    /// One side has unmatched trailing content
    Extra,
    /// Not a comparison line
    Plain,
}

impl LineClass {
    /// Whether this line marks a difference
    pub fn is_difference(&self) -> bool {
        !matches!(self, LineClass::Equal | LineClass::Plain)
    }

    /// CSS class used when the whole line is styled
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            LineClass::Equal => Some("correct"),
            LineClass::Differ => Some("differ"),
            LineClass::EndOfLine => Some("endline"),
            LineClass::Extra => Some("extra"),
            LineClass::Plain => None,
        }
    }
}

/// One rendered line of a run diff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    /// 1-based line number
    pub line_number: usize,
    pub class: LineClass,
    /// Inline HTML markup for the line
    pub rendered: String,
}

/// The lines of a run diff shown around the differences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffWindow {
    /// 0-based first and last shown line, `None` if nothing differs
    pub bounds: Option<(usize, usize)>,
    pub lines: Vec<DiffLine>,
    pub truncated_before: bool,
    pub truncated_after: bool,
    /// Number of line pairs that were compared
    pub compared_lines: usize,
}

impl DiffWindow {
    /// A window showing nothing
    pub fn empty(compared_lines: usize) -> Self {
        Self {
            compared_lines,
            ..Self::default()
        }
    }

    pub fn first_shown(&self) -> Option<usize> {
        self.bounds.map(|(first, _)| first)
    }

    pub fn last_shown(&self) -> Option<usize> {
        self.bounds.map(|(_, last)| last)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of shown lines that differ
    pub fn differing_lines(&self) -> usize {
        self.lines.iter().filter(|l| l.class.is_difference()).count()
    }
}

/// One body line of a judge-produced diff report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeDiffLine {
    /// Line number column, as printed
    pub label: String,
    pub class: LineClass,
    /// Raw line body (team output, marker, reference output)
    pub body: String,
}

/// A judge-produced diff report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeDiff {
    /// First differing line announced in the header
    pub first_difference: i64,
    pub header: String,
    /// Column legend (`team ? reference`), if present
    pub legend: Option<String>,
    pub lines: Vec<JudgeDiffLine>,
}
