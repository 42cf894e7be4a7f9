//! Diagnostic types and message lookup for the generator.
//!
//! Every generator phase reports through a [`DiagnosticSink`]. Messages are
//! looked up by code in [`DIAGNOSTIC_MESSAGES`] and filled in with
//! [`format_message`].

use serde::Serialize;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Message = 2,
}

/// A generator diagnostic, optionally attributed to the declaration it concerns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    /// Qualified name of the originating declaration (`pkg.Type#method`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    pub message_text: String,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(element: Option<String>, message: String, code: u32) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            element,
            message_text: message,
        }
    }

    /// Build a diagnostic from the message table.
    ///
    /// Unknown codes still produce an error diagnostic so that nothing is lost.
    #[must_use]
    pub fn from_code(code: u32, element: Option<String>, args: &[&str]) -> Self {
        match get_diagnostic_message(code) {
            Some(message) => Self {
                category: message.category,
                code,
                element,
                message_text: format_message(message.message, args),
            },
            None => Self::error(element, args.join(" "), code),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

/// Receiver for diagnostics produced during a generation pass.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);

    fn report_code(&mut self, code: u32, element: Option<String>, args: &[&str]) {
        self.report(Diagnostic::from_code(code, element, args));
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

// =============================================================================
// Message Table
// =============================================================================

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    pub const TOKEN_ACCESSOR_MUST_RETURN_REFERENCE: u32 = 1001;
    pub const TOKEN_ACCESSOR_WITNESSES_NOTHING: u32 = 1002;
    pub const DUPLICATE_TOKEN_NAME: u32 = 1003;
    pub const UNEXPECTED_MARKER_CARRIER: u32 = 2001;
    pub const DUPLICATE_TYPE_DECLARATION: u32 = 2002;
    pub const INVALID_CONTAINER_SUPERCLASS: u32 = 3001;
    pub const INVALID_CONTAINER_NAME: u32 = 3002;
    pub const FAILED_TO_WRITE_SOURCE: u32 = 4001;
    pub const DUPLICATE_OUTPUT_TARGET: u32 = 4002;
    pub const MALFORMED_TYPE_EXPRESSION: u32 = 5001;
}

use diagnostic_codes as codes;

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: codes::TOKEN_ACCESSOR_MUST_RETURN_REFERENCE,
        category: DiagnosticCategory::Error,
        message: "Type token accessor '{0}' must return a parameterized reference type, found '{1}'.",
    },
    DiagnosticMessage {
        code: codes::TOKEN_ACCESSOR_WITNESSES_NOTHING,
        category: DiagnosticCategory::Error,
        message: "Type token accessor '{0}' does not return a valid type token: '{1}' references no type parameter of '{2}'.",
    },
    DiagnosticMessage {
        code: codes::DUPLICATE_TOKEN_NAME,
        category: DiagnosticCategory::Error,
        message: "Type token accessors '{0}' and '{1}' both derive the token name '{2}'.",
    },
    DiagnosticMessage {
        code: codes::UNEXPECTED_MARKER_CARRIER,
        category: DiagnosticCategory::Error,
        message: "Unexpected @{0} on {1} '{2}'.",
    },
    DiagnosticMessage {
        code: codes::DUPLICATE_TYPE_DECLARATION,
        category: DiagnosticCategory::Error,
        message: "Type '{0}' is declared more than once; only one of them is used.",
    },
    DiagnosticMessage {
        code: codes::INVALID_CONTAINER_SUPERCLASS,
        category: DiagnosticCategory::Error,
        message: "Container declaration '{0}' must extend a container type with exactly two type arguments (key, value).",
    },
    DiagnosticMessage {
        code: codes::INVALID_CONTAINER_NAME,
        category: DiagnosticCategory::Error,
        message: "Container declaration '{0}' names an invalid class '{1}'.",
    },
    DiagnosticMessage {
        code: codes::FAILED_TO_WRITE_SOURCE,
        category: DiagnosticCategory::Error,
        message: "Failed to write source file '{0}': {1}",
    },
    DiagnosticMessage {
        code: codes::DUPLICATE_OUTPUT_TARGET,
        category: DiagnosticCategory::Error,
        message: "Class '{0}' generated from '{1}' clashes with the one generated from '{2}' and is skipped.",
    },
    DiagnosticMessage {
        code: codes::MALFORMED_TYPE_EXPRESSION,
        category: DiagnosticCategory::Error,
        message: "Malformed type expression '{0}': {1}",
    },
];

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

#[cfg(test)]
#[path = "tests/diagnostics_tests.rs"]
mod diagnostics_tests;
