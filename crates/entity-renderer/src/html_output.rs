use super::{AnnotationOutput, Tag};
use std::fmt::{self, Write};

/// Writes the subset of HTML chat platforms accept for formatted messages.
pub struct HtmlAnnotationOutput<W: Write> {
    writer: W,
}

impl<W: Write> HtmlAnnotationOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> AnnotationOutput for HtmlAnnotationOutput<W> {
    type Error = fmt::Error;

    fn write_text(&mut self, text: &str) -> Result<(), Self::Error> {
        escape_html_body(&mut self.writer, text)
    }

    fn start_tag(&mut self, tag: &Tag<'_>) -> Result<(), Self::Error> {
        match tag {
            Tag::Bold => write!(self.writer, "<b>"),
            Tag::Italic => write!(self.writer, "<i>"),
            Tag::Underline => write!(self.writer, "<u>"),
            Tag::Strikethrough => write!(self.writer, "<s>"),
            Tag::Code => write!(self.writer, "<code>"),
            Tag::Pre => write!(self.writer, "<pre>"),
            Tag::Link { href } => {
                write!(self.writer, "<a href=\"")?;
                escape_html_attr(&mut self.writer, href)?;
                write!(self.writer, "\">")
            }
        }
    }

    fn end_tag(&mut self, tag: &Tag<'_>) -> Result<(), Self::Error> {
        match tag {
            Tag::Bold => write!(self.writer, "</b>"),
            Tag::Italic => write!(self.writer, "</i>"),
            Tag::Underline => write!(self.writer, "</u>"),
            Tag::Strikethrough => write!(self.writer, "</s>"),
            Tag::Code => write!(self.writer, "</code>"),
            Tag::Pre => write!(self.writer, "</pre>"),
            Tag::Link { .. } => write!(self.writer, "</a>"),
        }
    }
}

/// Escape text for an element body: `&`, `<` and `>`.
pub fn escape_html_body<W: Write>(writer: &mut W, text: &str) -> fmt::Result {
    for c in text.chars() {
        match c {
            '&' => writer.write_str("&amp;")?,
            '<' => writer.write_str("&lt;")?,
            '>' => writer.write_str("&gt;")?,
            _ => writer.write_char(c)?,
        }
    }
    Ok(())
}

/// Escape text for a double-quoted attribute value.
pub fn escape_html_attr<W: Write>(writer: &mut W, text: &str) -> fmt::Result {
    for c in text.chars() {
        match c {
            '&' => writer.write_str("&amp;")?,
            '<' => writer.write_str("&lt;")?,
            '>' => writer.write_str("&gt;")?,
            '"' => writer.write_str("&quot;")?,
            '\'' => writer.write_str("&#x27;")?,
            _ => writer.write_char(c)?,
        }
    }
    Ok(())
}
