use miette::Diagnostic;
use serde::Serialize;
use smol_str::SmolStr;
use thiserror::Error;

/// Errors from the fallible edges around rendering: reading and decoding input.
///
/// Rendering itself never fails; see [`RenderIssue`].
#[derive(Debug, Error, Diagnostic)]
pub enum EntityRenderError {
    #[error("io error: {0}")]
    #[diagnostic(code(entity_renderer::io))]
    Io(#[from] std::io::Error),

    #[error("failed to decode message: {0}")]
    #[diagnostic(
        code(entity_renderer::decode),
        help("expected a message object with `text` and `entities` (or `caption` and `caption_entities`)")
    )]
    Decode(#[from] serde_json::Error),

    #[error("invalid render options: {0}")]
    #[diagnostic(code(entity_renderer::options))]
    Options(String),
}

/// Something odd about the input that rendering worked around.
///
/// Indices refer to the annotation's position in the order it was supplied.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum RenderIssue {
    #[error("annotation {index} ({offset}+{length}) does not fit {utf16_len} UTF-16 units, clamped to end of text")]
    #[diagnostic(code(entity_renderer::malformed_offset), severity(Warning))]
    MalformedOffset {
        index: usize,
        offset: u32,
        length: u32,
        utf16_len: usize,
    },

    #[error("annotation {index} has unknown kind `{kind}`, rendered as plain text")]
    #[diagnostic(code(entity_renderer::unknown_kind), severity(Advice))]
    UnknownAnnotationKind { index: usize, kind: SmolStr },

    #[error("annotation {index} crosses annotation {reopened}, which was split around it")]
    #[diagnostic(code(entity_renderer::crossing_overlap), severity(Advice))]
    CrossingOverlap { index: usize, reopened: usize },

    #[error("link annotation {index} has no url, rendered as plain text")]
    #[diagnostic(code(entity_renderer::missing_link_target), severity(Advice))]
    MissingLinkTarget { index: usize },

    #[error("annotation {index} covers no text")]
    #[diagnostic(code(entity_renderer::empty_annotation), severity(Advice))]
    EmptyAnnotation { index: usize },
}

impl RenderIssue {
    pub fn index(&self) -> usize {
        match self {
            Self::MalformedOffset { index, .. }
            | Self::UnknownAnnotationKind { index, .. }
            | Self::CrossingOverlap { index, .. }
            | Self::MissingLinkTarget { index }
            | Self::EmptyAnnotation { index } => *index,
        }
    }
}
