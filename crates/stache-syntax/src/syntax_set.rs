use std::fmt;

use crate::SyntaxKind;

/// A `const`-constructible set of [`SyntaxKind`]s, one bit per kind.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SyntaxSet {
    bits: u64,
}

const _: () = assert!(SyntaxKind::ALL.len() <= u64::BITS as usize);

impl SyntaxSet {
    pub const EMPTY: Self = Self { bits: 0 };

    #[inline]
    const fn mask(kind: SyntaxKind) -> u64 {
        1 << kind as u8
    }

    pub const fn new<const N: usize>(kinds: [SyntaxKind; N]) -> Self {
        let mut set = Self::EMPTY;

        let mut i = 0;
        while i < kinds.len() {
            set = set.with(kinds[i]);
            i += 1;
        }

        set
    }

    #[must_use]
    pub const fn with(self, kind: SyntaxKind) -> Self {
        Self { bits: self.bits | Self::mask(kind) }
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self { bits: self.bits | other.bits }
    }

    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        self.bits & Self::mask(kind) != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = SyntaxKind> + '_ {
        SyntaxKind::ALL.into_iter().filter(|&kind| self.contains(kind))
    }
}

impl fmt::Debug for SyntaxSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<SyntaxKind> for SyntaxSet {
    fn from_iter<I: IntoIterator<Item = SyntaxKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}
