//! Abstractions for page-number pagination.

use std::num::NonZeroU32;

use derive_more::Display;

/// Number of a [`Page`], starting from `1`.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Number(NonZeroU32);

impl Number {
    /// The first [`Page`].
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Creates a new [`Number`] if the provided `number` is `1` or greater.
    #[must_use]
    pub fn new(number: u32) -> Option<Self> {
        NonZeroU32::new(number).map(Self)
    }

    /// Returns the numeric value of this [`Number`].
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns the [`Window`] of rows this [`Number`] addresses for pages of
    /// the provided `size`.
    #[must_use]
    pub fn window(self, size: Size) -> Window {
        Window {
            offset: u64::from(self.get() - 1) * u64::from(size.get()),
            limit: u64::from(size.get()),
        }
    }

    /// Returns whether this [`Number`] is the [`FIRST`] one.
    ///
    /// [`FIRST`]: Self::FIRST
    #[must_use]
    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Size of a [`Page`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub struct Size(NonZeroU32);

impl Size {
    /// Creates a new [`Size`] out of a non-zero value.
    #[must_use]
    pub const fn new(size: NonZeroU32) -> Self {
        Self(size)
    }

    /// Returns the numeric value of this [`Size`].
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns the number of pages required to hold `total` rows.
    #[must_use]
    pub fn pages_for(self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.get()))
    }
}

/// Offset/limit window over an ordered row set.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Window {
    /// Number of rows to skip.
    pub offset: u64,

    /// Maximum number of rows to return.
    pub limit: u64,
}

impl Window {
    /// Applies this [`Window`] to the provided iterator.
    pub fn apply<I: IntoIterator>(
        self,
        items: I,
    ) -> impl Iterator<Item = I::Item> {
        items
            .into_iter()
            .skip(usize::try_from(self.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(self.limit).unwrap_or(usize::MAX))
    }
}

/// Page of `T` items along with the total count of matching rows.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<T> {
    /// Items on this [`Page`].
    pub items: Vec<T>,

    /// Total number of rows matching the query, across all the pages.
    pub total: u64,

    /// [`Number`] of this [`Page`].
    pub number: Number,

    /// [`Size`] of pages the rows are split into.
    pub size: Size,
}

impl<T> Page<T> {
    /// Creates an empty [`Page`] with no matching rows at all.
    #[must_use]
    pub fn empty(number: Number, size: Size) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            number,
            size,
        }
    }

    /// Returns the total number of pages.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.size.pages_for(self.total)
    }

    /// Indicates whether there is a page after this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.number.get()) < self.total_pages()
    }

    /// Indicates whether there is a page before this one.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        !self.number.is_first()
    }

    /// Maps the items of this [`Page`] keeping its position.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            number: self.number,
            size: self.size,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::num::NonZeroU32;

    use super::{Number, Page, Size};

    const TWENTY: Size = match NonZeroU32::new(20) {
        Some(n) => Size::new(n),
        None => unreachable!(),
    };

    #[test]
    fn number_starts_from_one() {
        assert!(Number::new(0).is_none());
        assert_eq!(Number::new(1), Some(Number::FIRST));
        assert_eq!(Number::default().get(), 1);
    }

    #[test]
    fn window_is_one_indexed() {
        let first = Number::FIRST.window(TWENTY);
        assert_eq!((first.offset, first.limit), (0, 20));

        let third = Number::new(3).unwrap().window(TWENTY);
        assert_eq!((third.offset, third.limit), (40, 20));
    }

    #[test]
    fn pages_are_rounded_up() {
        assert_eq!(TWENTY.pages_for(0), 0);
        assert_eq!(TWENTY.pages_for(1), 1);
        assert_eq!(TWENTY.pages_for(20), 1);
        assert_eq!(TWENTY.pages_for(21), 2);
        assert_eq!(TWENTY.pages_for(45), 3);
    }

    #[test]
    fn window_applies_to_remainder() {
        let rows = (0..45).collect::<Vec<_>>();

        let last = Number::new(3).unwrap().window(TWENTY);
        assert_eq!(last.apply(&rows).count(), 5);

        let beyond = Number::new(4).unwrap().window(TWENTY);
        assert_eq!(beyond.apply(&rows).count(), 0);
    }

    #[test]
    fn navigation_flags() {
        let page = Page {
            items: vec![(); 20],
            total: 45,
            number: Number::new(2).unwrap(),
            size: TWENTY,
        };
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(page.has_previous());

        let empty = Page::<()>::empty(Number::FIRST, TWENTY);
        assert_eq!(empty.total_pages(), 0);
        assert!(!empty.has_next());
        assert!(!empty.has_previous());
    }
}
