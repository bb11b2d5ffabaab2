use std::fmt;

/// Message storage with an inline fast path.
///
/// Messages shorter than `N` bytes live inside the value; longer ones get their own heap
/// buffer. Callers only ever see [`MessageBuf::as_str`], the representation is invisible.
/// When the heap allocation fails the message is truncated into the inline bytes instead,
/// so building one never fails.
pub struct MessageBuf<const N: usize> {
    repr: Repr<N>,
}

enum Repr<const N: usize> {
    Inline { len: usize, bytes: [u8; N] },
    Heap(String),
}

impl<const N: usize> MessageBuf<N> {
    pub const CAPACITY: usize = N;

    pub fn new(message: &str) -> Self {
        if message.len() < N {
            return Self::inline(message);
        }

        match heap_copy(message) {
            Some(buf) => Self {
                repr: Repr::Heap(buf),
            },
            None => Self::inline(truncate(message, N.saturating_sub(1))),
        }
    }

    #[inline]
    pub const fn empty() -> Self {
        Self {
            repr: Repr::Inline {
                len: 0,
                bytes: [0; N],
            },
        }
    }

    fn inline(message: &str) -> Self {
        let mut bytes = [0u8; N];
        let len = message.len().min(N);
        bytes[..len].copy_from_slice(&message.as_bytes()[..len]);
        Self {
            repr: Repr::Inline { len, bytes },
        }
    }

    pub fn as_str(&self) -> &str {
        match &self.repr {
            Repr::Inline { len, bytes } => std::str::from_utf8(&bytes[..*len]).unwrap_or_default(),
            Repr::Heap(buf) => buf.as_str(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_inline(&self) -> bool {
        matches!(self.repr, Repr::Inline { .. })
    }
}

impl<const N: usize> Clone for MessageBuf<N> {
    fn clone(&self) -> Self {
        Self::new(self.as_str())
    }

    /// Reuses an existing heap buffer when it is already large enough.
    fn clone_from(&mut self, source: &Self) {
        let message = source.as_str();

        if message.len() < N {
            *self = Self::inline(message);
            return;
        }

        if let Repr::Heap(buf) = &mut self.repr {
            if buf.capacity() >= message.len() {
                buf.clear();
                buf.push_str(message);
                return;
            }
        }

        *self = Self::new(message);
    }
}

impl<const N: usize> Default for MessageBuf<N> {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<const N: usize> PartialEq for MessageBuf<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl<const N: usize> Eq for MessageBuf<N> {}

impl<const N: usize> fmt::Debug for MessageBuf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl<const N: usize> fmt::Display for MessageBuf<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn heap_copy(message: &str) -> Option<String> {
    let mut buf = String::new();
    buf.try_reserve_exact(message.len()).ok()?;
    buf.push_str(message);
    Some(buf)
}

/// Longest prefix of `s` that fits in `max` bytes without splitting a char.
pub(crate) fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    type Small = MessageBuf<8>;

    #[test]
    fn short_messages_stay_inline() {
        let m = Small::new("1234567");
        assert!(m.is_inline());
        assert_eq!(m.as_str(), "1234567");
    }

    #[test]
    fn messages_at_capacity_go_to_heap() {
        let m = Small::new("12345678");
        assert!(!m.is_inline());
        assert_eq!(m.as_str(), "12345678");
    }

    #[test]
    fn empty_message_reads_as_empty_str() {
        assert_eq!(Small::empty().as_str(), "");
        assert!(Small::default().is_empty());
    }

    #[test]
    fn clone_is_deep_for_both_representations() {
        let short = Small::new("abc");
        let long = Small::new("a much longer message");

        let short_copy = short.clone();
        let long_copy = long.clone();
        drop(short);
        drop(long);

        assert_eq!(short_copy.as_str(), "abc");
        assert_eq!(long_copy.as_str(), "a much longer message");
    }

    #[test]
    fn clone_from_reuses_heap_buffer_when_it_fits() {
        let mut target = Small::new("a long message to start with");
        let source = Small::new("shorter heap one");

        let before = match &target.repr {
            Repr::Heap(buf) => buf.as_ptr(),
            Repr::Inline { .. } => unreachable!(),
        };
        target.clone_from(&source);
        let after = match &target.repr {
            Repr::Heap(buf) => buf.as_ptr(),
            Repr::Inline { .. } => unreachable!(),
        };

        assert_eq!(before, after);
        assert_eq!(target.as_str(), "shorter heap one");
    }

    #[test]
    fn clone_from_switches_representation() {
        let mut target = Small::new("a long message to start with");
        target.clone_from(&Small::new("tiny"));
        assert!(target.is_inline());
        assert_eq!(target.as_str(), "tiny");

        target.clone_from(&Small::new("grown past the inline size"));
        assert!(!target.is_inline());
        assert_eq!(target.as_str(), "grown past the inline size");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "h");
        assert_eq!(truncate("héllo", 3), "hé");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
