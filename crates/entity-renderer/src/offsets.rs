//! UTF-16 offset translation.
//!
//! Platform annotations count UTF-16 code units. Rust strings are indexed by
//! UTF-8 byte, and positions are reasoned about as Unicode scalar indices.
//! [`OffsetMap`] is built once per text and answers both.

/// A position between two scalar values of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Boundary {
    /// Index into the sequence of scalar values (`text.chars()`).
    pub scalar: usize,
    /// UTF-8 byte index, always on a char boundary.
    pub byte: usize,
}

/// Table from every UTF-16 offset in `0..=utf16_len` to the boundary it names.
///
/// Offsets that fall between the two halves of a surrogate pair have no entry.
#[derive(Debug, Clone)]
pub struct OffsetMap {
    boundaries: Vec<Option<Boundary>>,
    end: Boundary,
}

impl OffsetMap {
    pub fn new(text: &str) -> Self {
        let mut boundaries = Vec::with_capacity(text.len() + 1);
        let mut scalars = 0;

        for (byte, ch) in text.char_indices() {
            boundaries.push(Some(Boundary {
                scalar: scalars,
                byte,
            }));
            // Astral scalars occupy two code units; the second is not a boundary.
            for _ in 1..ch.len_utf16() {
                boundaries.push(None);
            }
            scalars += 1;
        }

        let end = Boundary {
            scalar: scalars,
            byte: text.len(),
        };
        boundaries.push(Some(end));

        Self { boundaries, end }
    }

    /// Exact lookup. `None` for offsets past the end or inside a surrogate pair.
    pub fn lookup(&self, utf16_offset: u32) -> Option<Boundary> {
        let idx = usize::try_from(utf16_offset).ok()?;
        self.boundaries.get(idx).copied().flatten()
    }

    /// Total lookup: anything [`lookup`](Self::lookup) rejects resolves to end-of-string.
    pub fn resolve(&self, utf16_offset: u32) -> Boundary {
        self.lookup(utf16_offset).unwrap_or(self.end)
    }

    pub fn utf16_to_scalar(&self, utf16_offset: u32) -> usize {
        self.resolve(utf16_offset).scalar
    }

    pub fn utf16_to_byte(&self, utf16_offset: u32) -> usize {
        self.resolve(utf16_offset).byte
    }

    pub fn end(&self) -> Boundary {
        self.end
    }

    pub fn utf16_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn scalar_len(&self) -> usize {
        self.end.scalar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_is_identity() {
        let map = OffsetMap::new("hello");
        for i in 0..=5u32 {
            assert_eq!(map.utf16_to_scalar(i), i as usize);
            assert_eq!(map.utf16_to_byte(i), i as usize);
        }
        assert_eq!(map.utf16_len(), 5);
        assert_eq!(map.scalar_len(), 5);
    }

    #[test]
    fn test_astral_takes_two_units() {
        // 😀 is U+1F600: 4 UTF-8 bytes, 2 UTF-16 units, 1 scalar
        let text = "😀ab";
        let map = OffsetMap::new(text);
        assert_eq!(map.utf16_len(), 4);
        assert_eq!(map.scalar_len(), 3);

        assert_eq!(map.lookup(0), Some(Boundary { scalar: 0, byte: 0 }));
        assert_eq!(map.lookup(1), None);
        assert_eq!(map.lookup(2), Some(Boundary { scalar: 1, byte: 4 }));
        assert_eq!(map.lookup(3), Some(Boundary { scalar: 2, byte: 5 }));
        assert_eq!(map.lookup(4), Some(Boundary { scalar: 3, byte: 6 }));
    }

    #[test]
    fn test_bmp_multibyte_takes_one_unit() {
        // Cyrillic letters are 2 UTF-8 bytes but a single UTF-16 unit
        let text = "Привет";
        let map = OffsetMap::new(text);
        assert_eq!(map.utf16_len(), 6);
        assert_eq!(map.utf16_to_scalar(3), 3);
        assert_eq!(map.utf16_to_byte(3), 6);
    }

    #[test]
    fn test_unmapped_offsets_resolve_to_end() {
        let text = "a😀b";
        let map = OffsetMap::new(text);
        // Inside the surrogate pair
        assert_eq!(map.resolve(2), map.end());
        // Past the end
        assert_eq!(map.resolve(100), map.end());
        assert_eq!(map.resolve(u32::MAX), map.end());
        assert_eq!(map.end(), Boundary { scalar: 3, byte: 6 });
    }

    #[test]
    fn test_empty_text() {
        let map = OffsetMap::new("");
        assert_eq!(map.utf16_len(), 0);
        assert_eq!(map.lookup(0), Some(map.end()));
        assert_eq!(map.utf16_to_scalar(7), 0);
    }
}
