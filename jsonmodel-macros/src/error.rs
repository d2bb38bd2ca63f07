//! Error types for the macro crate.
//!
//! Parse and validation failures carry a span so the `compile_error!` lands
//! on the offending attribute or field. Attribute syntax errors come from
//! darling and keep its own spans.

use proc_macro2::Span;
use std::fmt;

/// Error that occurred while parsing or validating a derive input.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Error message.
    pub message: String,
    /// Source span for error reporting.
    pub span: Option<Span>,
    /// Suggestions for fixing the error.
    pub suggestions: Vec<String>,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
            suggestions: Vec::new(),
        }
    }

    /// Add span information.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Add a suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Convert to a syn::Error for proc-macro error reporting.
    pub fn into_syn_error(self) -> syn::Error {
        let span = self.span.unwrap_or_else(Span::call_site);
        let mut error = syn::Error::new(span, &self.message);

        for suggestion in self.suggestions {
            error.combine(syn::Error::new(span, format!("suggestion: {}", suggestion)));
        }

        error
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Any failure of a derive, reported as `compile_error!` tokens.
#[derive(Debug, thiserror::Error)]
pub enum DeriveError {
    /// Malformed `#[json(...)]` attributes.
    #[error(transparent)]
    Attributes(#[from] darling::Error),

    /// A declaration the derive rejects.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl DeriveError {
    pub fn into_compile_error(self) -> proc_macro2::TokenStream {
        match self {
            Self::Attributes(err) => err.write_errors(),
            Self::Parse(err) => err.into_syn_error().into_compile_error(),
        }
    }
}
