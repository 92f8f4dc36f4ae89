//! Output format trait definition
//!
//! An output format turns the result of a render pass into text. Formats are looked up by name
//! through the [`FormatRegistry`](crate::registry::FormatRegistry).

use crate::error::Result;
use crate::pipeline::Rendered;
use crate::render::html::to_html_document;

/// Trait for output formats
///
/// # Examples
///
/// ```ignore
/// struct OutlineFormat;
///
/// impl Format for OutlineFormat {
///     fn name(&self) -> &str {
///         "outline"
///     }
///
///     fn serialize(&self, rendered: &Rendered) -> Result<String> {
///         Ok(rendered.toc.iter().map(|e| e.title.clone()).collect::<Vec<_>>().join("\n"))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "html", "json")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// Serialize a rendered document into text
    fn serialize(&self, rendered: &Rendered) -> Result<String>;
}

/// HTML fragment, wrapped in a container when document attributes are configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML markup of the rendered elements"
    }

    fn serialize(&self, rendered: &Rendered) -> Result<String> {
        Ok(to_html_document(
            &rendered.elements,
            &rendered.document_attributes,
        ))
    }
}

/// The output element tree as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Output element tree as JSON"
    }

    fn serialize(&self, rendered: &Rendered) -> Result<String> {
        Ok(serde_json::to_string_pretty(&rendered.elements)?)
    }
}

/// The table of contents forest as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct TocFormat;

impl Format for TocFormat {
    fn name(&self) -> &str {
        "toc"
    }

    fn description(&self) -> &str {
        "Table of contents as JSON"
    }

    fn serialize(&self, rendered: &Rendered) -> Result<String> {
        Ok(serde_json::to_string_pretty(&rendered.toc)?)
    }
}
