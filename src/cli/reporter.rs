use checkt_common::{Diagnostic, DiagnosticCategory};
use colored::Colorize;

const CODE_PREFIX: &str = "CK";

pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for diagnostic in diagnostics {
            out.push_str(&self.format_diagnostic(diagnostic));
            out.push('\n');
        }
        if !diagnostics.is_empty() {
            out.push('\n');
            out.push_str(&self.format_summary(diagnostics));
            out.push('\n');
        }
        out
    }

    /// `pkg.Type#member - error CK1001: message`
    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let mut output = String::new();
        match diagnostic.element.as_deref() {
            Some(element) if self.color => output.push_str(&element.cyan().to_string()),
            Some(element) => output.push_str(element),
            None => output.push_str("<manifest>"),
        }
        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category));
        output.push(' ');
        output.push_str(&self.format_code(diagnostic.code));
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);
        output
    }

    fn format_summary(&self, diagnostics: &[Diagnostic]) -> String {
        let errors = diagnostics.iter().filter(|d| d.is_error()).count();
        let label = match errors {
            1 => "Found 1 error.".to_string(),
            n => format!("Found {n} errors."),
        };
        if self.color && errors > 0 {
            label.red().to_string()
        } else {
            label
        }
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Message => "message",
        };

        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = format!("{CODE_PREFIX}{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}
