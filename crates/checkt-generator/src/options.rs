use checkt_emitter::PrinterOptions;
use serde::{Deserialize, Serialize};

/// How parameters that a narrowing does not pin appear in its signature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureStyle {
    /// Unpinned parameters are `?` in both the argument and the result; only
    /// pinned parameters (and whatever their bounds mention) are quantified.
    #[default]
    Wildcard,
    /// Every parameter is quantified; unpinned ones pass through unchanged
    /// from argument to result.
    Passthrough,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub signature_style: SignatureStyle,
    /// Simple name of the per-namespace holder class.
    pub holder_name: String,
    /// Name of the full narrowing operation.
    pub cast_name: String,
    /// Prefix of the per-accessor narrowing operations.
    pub partial_cast_prefix: String,
    /// Add `@SuppressWarnings("unchecked")` to generated casts.
    pub suppress_unchecked: bool,
    pub printer: PrinterOptions,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            signature_style: SignatureStyle::Wildcard,
            holder_name: "SafeCast".to_string(),
            cast_name: "cast".to_string(),
            partial_cast_prefix: "castBy".to_string(),
            suppress_unchecked: true,
            printer: PrinterOptions::default(),
        }
    }
}
