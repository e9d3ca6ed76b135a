//! Literal preview of a render: the annotation list and the markup, escaped
//! and wrapped in `<pre>` so a chat client shows the tags instead of
//! applying them.

use super::html_output::escape_html_body;
use super::types::Annotation;
use std::fmt::{self, Write};

/// One line per annotation, in the order supplied.
pub fn annotation_listing(annotations: &[Annotation]) -> String {
    let mut listing = String::new();
    for (i, annotation) in annotations.iter().enumerate() {
        if i > 0 {
            listing.push('\n');
        }
        // Writing to a String can't fail
        let _ = write_listing_line(&mut listing, annotation);
    }
    listing
}

fn write_listing_line<W: Write>(writer: &mut W, annotation: &Annotation) -> fmt::Result {
    write!(
        writer,
        "type={}, offset={}, length={}",
        annotation.type_name(),
        annotation.utf16_offset,
        annotation.utf16_length
    )?;
    if let Some(url) = &annotation.url {
        write!(writer, ", url={url}")?;
    }
    Ok(())
}

pub fn render_preview(annotations: &[Annotation], markup: &str) -> String {
    let listing = annotation_listing(annotations);
    let mut preview = String::with_capacity(listing.len() + markup.len() * 2 + 13);
    preview.push_str("<pre>");
    let _ = escape_html_body(&mut preview, &listing);
    preview.push_str("\n\n");
    let _ = escape_html_body(&mut preview, markup);
    preview.push_str("</pre>");
    preview
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AnnotationKind;

    #[test]
    fn test_listing_keeps_order_and_wire_names() {
        let annotations: Vec<Annotation> = serde_json::from_str(
            r#"[
                {"type": "italic", "offset": 4, "length": 2},
                {"type": "text_link", "offset": 0, "length": 3, "url": "https://a.b"}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            annotation_listing(&annotations),
            "type=italic, offset=4, length=2\ntype=text_link, offset=0, length=3, url=https://a.b"
        );
    }

    #[test]
    fn test_preview_escapes_everything_once() {
        let annotations = vec![Annotation::new(AnnotationKind::Bold, 0, 1)];
        let preview = render_preview(&annotations, "<b>a</b> &amp; b");
        assert_eq!(
            preview,
            "<pre>type=bold, offset=0, length=1\n\n&lt;b&gt;a&lt;/b&gt; &amp;amp; b</pre>"
        );
    }

    #[test]
    fn test_preview_without_annotations() {
        assert_eq!(render_preview(&[], "hi"), "<pre>\n\nhi</pre>");
    }
}
