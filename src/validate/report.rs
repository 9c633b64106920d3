use std::fmt;

use crate::config::canvas::RenderMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathElem {
    Field(&'static str),
    Index(usize),
}

pub(crate) fn format_path(path: &[PathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            PathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            PathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

/// What a validation finding is about. The auto-fixer keys its repair steps
/// on these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    OutOfBounds,
    SizeOutOfRange,
    TooManyNodes,
    LabelTooLong,
    DanglingLink,
    DuplicateId,
    PredictedCollision,
    /// The layout calculator could not place a comparison at all.
    LayoutFailed,
    /// Advisory emitted by the layout calculator.
    LayoutAdvisory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub kind: IssueKind,
    pub path: Vec<PathElem>,
    pub message: String,
}

impl Issue {
    pub(crate) fn at(kind: IssueKind, path: &[PathElem], message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

impl serde::Serialize for Issue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct as _;
        let mut st = serializer.serialize_struct("Issue", 3)?;
        st.serialize_field("kind", &self.kind)?;
        st.serialize_field("path", &format_path(&self.path))?;
        st.serialize_field("message", &self.message)?;
        st.end()
    }
}

/// Outcome of validating one visualization against one mode.
///
/// Errors must be fixed before rendering; warnings are advisory. Both lists
/// follow check order, then input order.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub mode: RenderMode,
    pub valid: bool,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    /// Set by the auto-fixer when it changed the data before this report.
    pub auto_fixed: bool,
}

impl ValidationReport {
    pub(crate) fn new(mode: RenderMode, errors: Vec<Issue>, warnings: Vec<Issue>) -> Self {
        Self {
            mode,
            valid: errors.is_empty(),
            errors,
            warnings,
            auto_fixed: false,
        }
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    pub fn has(&self, kind: IssueKind) -> bool {
        self.errors
            .iter()
            .chain(&self.warnings)
            .any(|i| i.kind == kind)
    }

    pub fn count(&self, kind: IssueKind) -> usize {
        self.errors
            .iter()
            .chain(&self.warnings)
            .filter(|i| i.kind == kind)
            .count()
    }
}

/// Human-readable report for logs.
impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "validation report (mode={}): {}, {} error(s), {} warning(s)",
            self.mode,
            if self.valid { "VALID" } else { "INVALID" },
            self.errors.len(),
            self.warnings.len()
        )?;
        if self.auto_fixed {
            write!(f, ", auto-fixed")?;
        }
        for e in &self.errors {
            write!(f, "\n  error   {e}")?;
        }
        for w in &self.warnings {
            write!(f, "\n  warning {w}")?;
        }
        Ok(())
    }
}
