//! Immutable character sets for single-character patterns.

use std::ops::RangeInclusive;

use rustc_hash::FxHashSet;

/// Highest char stored in the ASCII bitmap.
const ASCII_MAX: char = '\u{7f}';

/// A set of characters.
///
/// ASCII members live in a 128-bit bitmap, so the common case is a single
/// shift and mask. Everything else is kept as individual chars in a hash set
/// plus a list of inclusive ranges.
///
/// ```
/// use lexrule_core::CharSet;
///
/// let hex = CharSet::range('0', '9').with_range('a', 'f').with_range('A', 'F');
/// assert!(hex.contains('c'));
/// assert!(!hex.contains('g'));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharSet {
    ascii: u128,
    chars: FxHashSet<char>,
    ranges: Vec<RangeInclusive<char>>,
}

impl CharSet {
    /// The empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set of every char in `chars`.
    pub fn from_chars(chars: &str) -> Self {
        Self::new().with_chars(chars)
    }

    /// Set of every char in `lo..=hi`. Empty if `lo > hi`.
    pub fn range(lo: char, hi: char) -> Self {
        Self::new().with_range(lo, hi)
    }

    /// `0` through `9`.
    pub fn ascii_digits() -> Self {
        Self::range('0', '9')
    }

    /// ASCII letters, both cases.
    pub fn ascii_letters() -> Self {
        Self::range('a', 'z').with_range('A', 'Z')
    }

    /// Space, tab, carriage return and line feed.
    pub fn whitespace() -> Self {
        Self::from_chars(" \t\r\n")
    }

    /// Add every char in `chars`.
    #[must_use]
    pub fn with_chars(mut self, chars: &str) -> Self {
        for ch in chars.chars() {
            self.insert(ch);
        }
        self
    }

    /// Add every char in `lo..=hi`.
    #[must_use]
    pub fn with_range(mut self, lo: char, hi: char) -> Self {
        if lo > hi {
            return self;
        }
        for ch in lo..=hi.min(ASCII_MAX) {
            self.insert(ch);
        }
        if hi > ASCII_MAX {
            self.ranges.push(lo.max('\u{80}')..=hi);
        }
        self
    }

    /// Union of `self` and `other`.
    #[must_use]
    pub fn union(mut self, other: &CharSet) -> Self {
        self.ascii |= other.ascii;
        self.chars.extend(other.chars.iter().copied());
        self.ranges.extend(other.ranges.iter().cloned());
        self
    }

    /// Add a single char.
    pub fn insert(&mut self, ch: char) {
        if ch.is_ascii() {
            self.ascii |= 1u128 << u32::from(ch);
        } else {
            self.chars.insert(ch);
        }
    }

    /// Membership test.
    #[inline]
    pub fn contains(&self, ch: char) -> bool {
        if ch.is_ascii() {
            self.ascii & (1u128 << u32::from(ch)) != 0
        } else {
            self.chars.contains(&ch) || self.ranges.iter().any(|range| range.contains(&ch))
        }
    }

    /// Returns `true` if no char is a member.
    pub fn is_empty(&self) -> bool {
        self.ascii == 0 && self.chars.is_empty() && self.ranges.is_empty()
    }
}
