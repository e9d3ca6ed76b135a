use super::error::RenderIssue;
use super::offsets::{Boundary, OffsetMap};
use super::options::RenderOptions;
use super::types::{Annotation, AnnotationKind, Tag};
use super::AnnotationOutput;
use std::cmp::{Ordering, Reverse};

/// An annotation translated to text boundaries, with the tag it renders as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpan<'a> {
    pub start: Boundary,
    pub end: Boundary,
    pub tag: Tag<'a>,
    /// Position of the source annotation in declaration order.
    pub index: usize,
}

/// Translate annotations into spans, dropping the ones that render no tag.
///
/// Offsets that don't land on a boundary clamp to end-of-string. Every
/// workaround is reported as a [`RenderIssue`].
pub fn resolve_spans<'a>(
    text: &'a str,
    map: &OffsetMap,
    annotations: &'a [Annotation],
    options: &RenderOptions,
) -> (Vec<ResolvedSpan<'a>>, Vec<RenderIssue>) {
    let mut spans = Vec::with_capacity(annotations.len());
    let mut issues = Vec::new();

    for (index, annotation) in annotations.iter().enumerate() {
        let range = annotation.range();
        let (start, end) = match (map.lookup(range.start()), map.lookup(range.end())) {
            (Some(start), Some(end)) => (start, end),
            (start, end) => {
                tracing::warn!(
                    index,
                    offset = annotation.utf16_offset,
                    length = annotation.utf16_length,
                    utf16_len = map.utf16_len(),
                    "annotation out of range, clamping to end of text"
                );
                issues.push(RenderIssue::MalformedOffset {
                    index,
                    offset: annotation.utf16_offset,
                    length: annotation.utf16_length,
                    utf16_len: map.utf16_len(),
                });
                (start.unwrap_or(map.end()), end.unwrap_or(map.end()))
            }
        };

        let tag = match &annotation.kind {
            AnnotationKind::Bold => Tag::Bold,
            AnnotationKind::Italic => Tag::Italic,
            AnnotationKind::Underline => Tag::Underline,
            AnnotationKind::Strikethrough => Tag::Strikethrough,
            AnnotationKind::Code => Tag::Code,
            AnnotationKind::Pre => Tag::Pre,
            AnnotationKind::Link => match annotation.url.as_deref() {
                Some(href) => Tag::Link { href },
                None if options.prefer_explicit_url => {
                    tracing::debug!(index, "link without url, rendering as plain text");
                    issues.push(RenderIssue::MissingLinkTarget { index });
                    continue;
                }
                // Link to the covered text itself
                None => Tag::Link {
                    href: text.get(start.byte..end.byte).unwrap_or_default(),
                },
            },
            AnnotationKind::Unknown(kind) => {
                tracing::debug!(index, %kind, "unknown annotation kind, rendering as plain text");
                issues.push(RenderIssue::UnknownAnnotationKind {
                    index,
                    kind: kind.clone(),
                });
                continue;
            }
        };

        if end.scalar <= start.scalar {
            issues.push(RenderIssue::EmptyAnnotation { index });
            continue;
        }

        spans.push(ResolvedSpan {
            start,
            end,
            tag,
            index,
        });
    }

    (spans, issues)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SpanEvent {
    pos: usize,
    byte: usize,
    is_start: bool,
    /// Index into the spans sorted by opening order.
    rank: usize,
}

impl SpanEvent {
    fn start(boundary: Boundary, rank: usize) -> Self {
        Self {
            pos: boundary.scalar,
            byte: boundary.byte,
            is_start: true,
            rank,
        }
    }

    fn end(boundary: Boundary, rank: usize) -> Self {
        Self {
            pos: boundary.scalar,
            byte: boundary.byte,
            is_start: false,
            rank,
        }
    }
}

impl PartialOrd for SpanEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SpanEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.pos.cmp(&other.pos).then_with(|| {
            match (self.is_start, other.is_start) {
                // At same position: ends before starts
                (false, true) => Ordering::Less,
                (true, false) => Ordering::Greater,
                // Opens in the order they were declared
                (true, true) => self.rank.cmp(&other.rank),
                // Closes unwind the stack, most recently opened first
                (false, false) => Reverse(self.rank).cmp(&Reverse(other.rank)),
            }
        })
    }
}

/// Sweep `text`, writing escaped runs and tag transitions to `output`.
///
/// The open-tag stack is kept validly nested. A close that targets a tag
/// buried under others closes everything above it, closes the target, then
/// reopens the others in their original order, so a crossing annotation is
/// split into adjacent tag instances around the crossing point.
///
/// Returns a [`RenderIssue::CrossingOverlap`] for every tag that had to be split.
pub fn process_annotated_text<'a, O: AnnotationOutput>(
    text: &'a str,
    mut spans: Vec<ResolvedSpan<'a>>,
    output: &mut O,
) -> Result<Vec<RenderIssue>, O::Error> {
    // Spans opening together keep declaration order. The stack is always a
    // subsequence of this order, which is what makes `rank` a depth.
    spans.sort_by_key(|span| (span.start.scalar, span.index));

    let mut events: Vec<SpanEvent> = Vec::with_capacity(spans.len() * 2);
    for (rank, span) in spans.iter().enumerate() {
        events.push(SpanEvent::start(span.start, rank));
        events.push(SpanEvent::end(span.end, rank));
    }
    events.sort();

    let mut issues = Vec::new();
    let mut active_stack: Vec<usize> = Vec::new();
    let mut last_pos = 0;

    for event in events {
        let pos = event.byte.min(text.len());

        // Write text up to this position
        if pos > last_pos {
            if let Some(segment) = text.get(last_pos..pos) {
                output.write_text(segment)?;
            }
            last_pos = pos;
        }

        if event.is_start {
            output.start_tag(&spans[event.rank].tag)?;
            active_stack.push(event.rank);
            continue;
        }

        let Some(close_idx) = active_stack.iter().rposition(|&rank| rank == event.rank) else {
            continue;
        };

        // Close from the top down to the one we need to close
        let to_reopen: Vec<usize> = active_stack.drain(close_idx..).collect();
        for &rank in to_reopen.iter().rev() {
            output.end_tag(&spans[rank].tag)?;
        }

        // Reopen everything above it, skipping the one we just closed
        for rank in to_reopen.into_iter().skip(1) {
            let closed = spans[event.rank].index;
            let reopened = spans[rank].index;
            tracing::debug!(closed, reopened, "crossing annotations, splitting tag");
            issues.push(RenderIssue::CrossingOverlap {
                index: closed,
                reopened,
            });
            output.start_tag(&spans[rank].tag)?;
            active_stack.push(rank);
        }
    }

    // Write remaining text
    if last_pos < text.len() {
        output.write_text(&text[last_pos..])?;
    }

    // Close any remaining open tags
    for rank in active_stack.into_iter().rev() {
        output.end_tag(&spans[rank].tag)?;
    }

    Ok(issues)
}
