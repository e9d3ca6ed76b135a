//! Entity renderer
//!
//! Turns message text plus platform style annotations (UTF-16 offset/length
//! ranges, as chat APIs report them) into validly nested HTML, even when the
//! annotations cross each other.
//!
//! ```
//! use entity_renderer::{render, Annotation, AnnotationKind};
//!
//! let annotations = [
//!     Annotation::new(AnnotationKind::Bold, 0, 5),
//!     Annotation::new(AnnotationKind::Italic, 3, 5),
//! ];
//! let result = render("Hello World", &annotations);
//! assert_eq!(result.markup, "<b>Hel<i>lo</i></b><i> Wo</i>rld");
//! ```

mod error;
mod html_output;
mod offsets;
mod options;
mod preview;
mod processor;
mod types;

pub use error::{EntityRenderError, RenderIssue};
pub use html_output::{escape_html_attr, escape_html_body, HtmlAnnotationOutput};
pub use offsets::{Boundary, OffsetMap};
pub use options::RenderOptions;
pub use preview::{annotation_listing, render_preview};
pub use processor::{process_annotated_text, resolve_spans, ResolvedSpan};
pub use types::{Annotation, AnnotationKind, Message, Tag, Utf16Range};

use serde::Serialize;

/// Sink for the event sweep. Tags always arrive properly nested.
pub trait AnnotationOutput {
    type Error;

    fn write_text(&mut self, text: &str) -> Result<(), Self::Error>;
    fn start_tag(&mut self, tag: &Tag<'_>) -> Result<(), Self::Error>;
    fn end_tag(&mut self, tag: &Tag<'_>) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderResult {
    pub markup: String,
    pub preview: String,
    pub issues: Vec<RenderIssue>,
}

/// One rendered message. Everything is computed in [`EntityRenderer::new`].
#[derive(Debug, Clone)]
pub struct EntityRenderer {
    markup: String,
    preview: String,
    issues: Vec<RenderIssue>,
}

impl EntityRenderer {
    #[tracing::instrument(level = "debug", skip_all, fields(text_len = text.len(), annotations = annotations.len()))]
    pub fn new(text: &str, annotations: &[Annotation], options: &RenderOptions) -> Self {
        let map = OffsetMap::new(text);
        let (spans, mut issues) = resolve_spans(text, &map, annotations, options);

        let mut output = HtmlAnnotationOutput::new(String::with_capacity(text.len()));
        let markup = match process_annotated_text(text, spans, &mut output) {
            Ok(crossings) => {
                issues.extend(crossings);
                output.into_inner()
            }
            // Only reachable if writing to a String fails
            Err(_) => {
                let mut escaped = String::with_capacity(text.len());
                let _ = escape_html_body(&mut escaped, text);
                escaped
            }
        };

        let preview = render_preview(annotations, &markup);
        if !issues.is_empty() {
            tracing::debug!(issues = issues.len(), "rendered with workarounds");
        }

        Self {
            markup,
            preview,
            issues,
        }
    }

    pub fn from_message(message: &Message, options: &RenderOptions) -> Self {
        let (text, annotations) = message.body();
        Self::new(text, annotations, options)
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }

    pub fn issues(&self) -> &[RenderIssue] {
        &self.issues
    }

    pub fn into_result(self) -> RenderResult {
        RenderResult {
            markup: self.markup,
            preview: self.preview,
            issues: self.issues,
        }
    }
}

/// Render with default options.
pub fn render(text: &str, annotations: &[Annotation]) -> RenderResult {
    render_with(text, annotations, &RenderOptions::default())
}

pub fn render_with(text: &str, annotations: &[Annotation], options: &RenderOptions) -> RenderResult {
    EntityRenderer::new(text, annotations, options).into_result()
}
