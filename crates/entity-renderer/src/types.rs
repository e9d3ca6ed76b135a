use super::error::EntityRenderError;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

/// A span of text in UTF-16 code units, as the messaging platform reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utf16Range {
    pub offset: u32,
    pub length: u32,
}

impl Utf16Range {
    pub fn new(offset: u32, length: u32) -> Self {
        Self { offset, length }
    }

    pub fn start(&self) -> u32 {
        self.offset
    }

    /// Exclusive end. Saturates instead of wrapping for hostile lengths.
    pub fn end(&self) -> u32 {
        self.offset.saturating_add(self.length)
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

/// The closed set of styles the renderer knows how to emit.
///
/// Names that don't map onto a known style decode to [`AnnotationKind::Unknown`]
/// and render as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
    Pre,
    Link,
    Unknown(SmolStr),
}

impl AnnotationKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "bold" => Self::Bold,
            "italic" => Self::Italic,
            "underline" => Self::Underline,
            "strikethrough" => Self::Strikethrough,
            "code" => Self::Code,
            "pre" => Self::Pre,
            "link" | "text_link" | "url" => Self::Link,
            other => Self::Unknown(SmolStr::new(other)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Strikethrough => "strikethrough",
            Self::Code => "code",
            Self::Pre => "pre",
            Self::Link => "link",
            Self::Unknown(name) => name.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One style instruction over a UTF-16 range of the message text.
///
/// Serializes in the platform's entity shape:
/// `{"type": "bold", "offset": 0, "length": 5}` with an optional `"url"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAnnotation", into = "RawAnnotation")]
pub struct Annotation {
    pub kind: AnnotationKind,
    pub utf16_offset: u32,
    pub utf16_length: u32,
    pub url: Option<String>,
    /// Type name exactly as received, kept for the debug listing
    /// (`text_link` and `url` both decode to [`AnnotationKind::Link`]).
    type_name: SmolStr,
}

impl Annotation {
    pub fn new(kind: AnnotationKind, utf16_offset: u32, utf16_length: u32) -> Self {
        let type_name = SmolStr::new(kind.as_str());
        Self {
            kind,
            utf16_offset,
            utf16_length,
            url: None,
            type_name,
        }
    }

    pub fn link(utf16_offset: u32, utf16_length: u32, url: impl Into<String>) -> Self {
        Self::new(AnnotationKind::Link, utf16_offset, utf16_length).with_url(url)
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn range(&self) -> Utf16Range {
        Utf16Range::new(self.utf16_offset, self.utf16_length)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawAnnotation {
    #[serde(rename = "type")]
    type_name: SmolStr,
    offset: u32,
    length: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

impl From<RawAnnotation> for Annotation {
    fn from(raw: RawAnnotation) -> Self {
        Self {
            kind: AnnotationKind::from_name(&raw.type_name),
            utf16_offset: raw.offset,
            utf16_length: raw.length,
            url: raw.url,
            type_name: raw.type_name,
        }
    }
}

impl From<Annotation> for RawAnnotation {
    fn from(annotation: Annotation) -> Self {
        Self {
            type_name: annotation.type_name,
            offset: annotation.utf16_offset,
            length: annotation.utf16_length,
            url: annotation.url,
        }
    }
}

/// The subset of a platform message the renderer consumes.
///
/// Media messages carry their text in `caption`/`caption_entities`;
/// everything else uses `text`/`entities`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub entities: Vec<Annotation>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub caption_entities: Vec<Annotation>,
}

impl Message {
    pub fn from_json(input: &str) -> Result<Self, EntityRenderError> {
        Ok(serde_json::from_str(input)?)
    }

    /// The text and annotations to render. A caption wins over text.
    pub fn body(&self) -> (&str, &[Annotation]) {
        match (&self.caption, &self.text) {
            (Some(caption), _) => (caption.as_str(), self.caption_entities.as_slice()),
            (None, Some(text)) => (text.as_str(), self.entities.as_slice()),
            (None, None) => ("", &[]),
        }
    }
}

/// A markup tag resolved from an annotation, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag<'a> {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
    Pre,
    Link { href: &'a str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_platform_entities() {
        let json = r#"[
            {"type": "bold", "offset": 0, "length": 5},
            {"type": "text_link", "offset": 6, "length": 4, "url": "https://example.com"},
            {"type": "url", "offset": 11, "length": 19},
            {"type": "spoiler", "offset": 2, "length": 1}
        ]"#;

        let annotations: Vec<Annotation> = serde_json::from_str(json).unwrap();
        assert_eq!(annotations.len(), 4);
        assert_eq!(annotations[0].kind, AnnotationKind::Bold);
        assert_eq!(annotations[0].range(), Utf16Range::new(0, 5));
        assert_eq!(annotations[1].kind, AnnotationKind::Link);
        assert_eq!(annotations[1].url.as_deref(), Some("https://example.com"));
        assert_eq!(annotations[1].type_name(), "text_link");
        assert_eq!(annotations[2].kind, AnnotationKind::Link);
        assert!(annotations[2].url.is_none());
        assert_eq!(annotations[3].kind, AnnotationKind::Unknown("spoiler".into()));
        assert!(!annotations[3].kind.is_known());
    }

    #[test]
    fn test_serialize_keeps_wire_name() {
        let json = r#"{"type":"text_link","offset":1,"length":2,"url":"https://a.b"}"#;
        let annotation: Annotation = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&annotation).unwrap(), json);

        let built = Annotation::new(AnnotationKind::Italic, 3, 4);
        assert_eq!(
            serde_json::to_string(&built).unwrap(),
            r#"{"type":"italic","offset":3,"length":4}"#
        );
    }

    #[test]
    fn test_range_end_saturates() {
        let range = Utf16Range::new(u32::MAX - 1, 10);
        assert_eq!(range.end(), u32::MAX);
        assert!(Utf16Range::new(4, 0).is_empty());
    }

    #[test]
    fn test_message_body_prefers_caption() {
        let json = r#"{
            "text": "ignored",
            "caption": "photo caption",
            "caption_entities": [{"type": "italic", "offset": 0, "length": 5}]
        }"#;
        let message: Message = serde_json::from_str(json).unwrap();
        let (text, annotations) = message.body();
        assert_eq!(text, "photo caption");
        assert_eq!(annotations.len(), 1);

        let empty = Message::default();
        let (text, annotations) = empty.body();
        assert_eq!(text, "");
        assert!(annotations.is_empty());

        let err = Message::from_json("{\"text\": 5}").unwrap_err();
        assert!(matches!(err, EntityRenderError::Decode(_)));
        let decoded = Message::from_json("{}").unwrap();
        let (text, annotations) = decoded.body();
        assert_eq!(text, "");
        assert!(annotations.is_empty());
    }
}
