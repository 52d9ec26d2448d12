use ariadne::{Config, IndexType, Label, Report, ReportKind, Source};
use std::ops::Range;
use thiserror::Error;

/// Errors raised while scanning, parsing or evaluating a rule.
///
/// Spans are byte ranges into the rule text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    #[error("{message} at '{fragment}' ({line}:{column})")]
    Syntax {
        message: String,
        fragment: String,
        span: Range<usize>,
        line: usize,
        column: usize,
    },

    #[error("unknown variable '{name}'")]
    UnknownVariable { name: String, span: Range<usize> },

    #[error("division by zero")]
    DivisionByZero { span: Range<usize> },
}

pub type Result<T> = std::result::Result<T, RuleError>;

impl RuleError {
    pub fn span(&self) -> Range<usize> {
        match self {
            RuleError::Syntax { span, .. }
            | RuleError::UnknownVariable { span, .. }
            | RuleError::DivisionByZero { span } => span.clone(),
        }
    }

    fn label_message(&self) -> String {
        match self {
            RuleError::Syntax { message, .. } => message.clone(),
            RuleError::UnknownVariable { name, .. } => format!("'{}' is not a known variable", name),
            RuleError::DivisionByZero { .. } => "divisor evaluates to zero".to_string(),
        }
    }

    /// Renders the error against `source` as a plain-text ariadne report.
    pub fn report(&self, source: &str) -> String {
        let mut buffer = Vec::new();
        let _ = self.build_report(false).write((SOURCE_NAME, Source::from(padded(source))), &mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Prints a colored report to stderr.
    pub fn print(&self, source: &str) {
        let _ = self.build_report(true).eprint((SOURCE_NAME, Source::from(padded(source))));
    }

    fn build_report(&self, color: bool) -> Report<'static, (&'static str, Range<usize>)> {
        let span = self.clamped_span();
        Report::build(ReportKind::Error, (SOURCE_NAME, span.clone()))
            .with_config(Config::default().with_color(color).with_index_type(IndexType::Byte))
            .with_message(self.headline())
            .with_label(Label::new((SOURCE_NAME, span)).with_message(self.label_message()))
            .finish()
    }

    fn headline(&self) -> &'static str {
        match self {
            RuleError::Syntax { .. } => "Syntax error",
            RuleError::UnknownVariable { .. } => "Unknown variable",
            RuleError::DivisionByZero { .. } => "Division by zero",
        }
    }

    // ariadne needs a non-empty label to draw an arrow, e.g. for errors at end of input
    fn clamped_span(&self) -> Range<usize> {
        let span = self.span();
        if span.is_empty() { span.start..span.start + 1 } else { span }
    }
}

const SOURCE_NAME: &str = "rule";

// One trailing column so that end-of-input labels have a character to point at.
fn padded(source: &str) -> String {
    format!("{} ", source)
}
