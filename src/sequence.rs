use std::{cmp::Ordering, fmt, ops::Index};
use crate::Label;

/// An arrangement of labeled layers on a ring.
///
/// Position `len() - 1` is adjacent to position `0`.  Sequences are
/// compared lexicographically, according to the [`Label`] order.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Sequence {
    labels: Vec<Label>,
}

/// A maximal run of consecutive layers of the same component.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Block {
    pub label:     Label,
    pub thickness: usize,
}

impl Sequence {
    /// Parses a string of uppercase letters, e.g. `"AABB"`.
    pub fn from_letters<S: AsRef<str>>(letters: S) -> Option<Self> {
        let labels: Option<Vec<_>> = letters.as_ref().chars().map(Label::from_letter).collect();

        labels.map(Sequence::from)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Label] {
        self.labels.as_slice()
    }

    #[inline]
    pub fn into_labels(self) -> Vec<Label> {
        self.labels
    }

    pub fn iter(&self) -> std::slice::Iter<Label> {
        self.labels.iter()
    }

    /// Returns the label following position `pos` on the ring.
    #[inline]
    pub fn successor(&self, pos: usize) -> Label {
        self.labels[(pos + 1) % self.labels.len()]
    }

    /// Returns this sequence rotated left by `shift` positions.
    pub fn rotated(&self, shift: usize) -> Self {
        let mut labels = self.labels.clone();

        if !labels.is_empty() {
            labels.rotate_left(shift % self.labels.len());
        }

        Sequence { labels }
    }

    pub fn reversed(&self) -> Self {
        Sequence { labels: self.labels.iter().rev().copied().collect() }
    }

    /// Iterates over all `2n` images of this sequence under the
    /// dihedral group: `n` rotations followed by `n` rotations of the
    /// reversal.  Images of a symmetric sequence repeat.
    pub fn images(&self) -> impl Iterator<Item = Sequence> + '_ {
        let size = self.labels.len();
        let reversed = self.reversed();

        (0..size).map(move |shift| self.rotated(shift)).chain((0..size).map(move |shift| reversed.rotated(shift)))
    }

    /// Returns the starting position of the lexicographically
    /// smallest rotation (the smallest such position, if there are
    /// ties).
    pub fn least_rotation(&self) -> usize {
        least_rotation(self.labels.as_slice())
    }

    /// The smallest rotation, i.e. the canonical representative of
    /// the necklace of this sequence.
    pub fn necklace(&self) -> Self {
        self.rotated(self.least_rotation())
    }

    /// The smallest sequence among all rotations and reflections,
    /// i.e. the canonical representative of the bracelet of this
    /// sequence.
    pub fn canonical(&self) -> Self {
        let forward = self.necklace();
        let backward = self.reversed().necklace();

        match forward.cmp(&backward) {
            Ordering::Greater => backward,
            _ => forward,
        }
    }

    pub fn is_canonical(&self) -> bool {
        *self == self.canonical()
    }

    /// The smallest positive rotation offset mapping this sequence
    /// onto itself (always a divisor of the length).
    pub fn period(&self) -> usize {
        let size = self.labels.len();

        (1..size)
            .filter(|shift| size % shift == 0)
            .find(|&shift| (0..size).all(|pos| self.labels[pos] == self.labels[(pos + shift) % size]))
            .unwrap_or(size)
    }

    /// Run-length encoding of the ring.
    ///
    /// The first block starts at the first block boundary at or after
    /// position `0`; for a canonical representative of more than one
    /// component this is position `0` itself.  A ring of a single
    /// component is one block.
    pub fn blocks(&self) -> Vec<Block> {
        let size = self.labels.len();
        let mut result: Vec<Block> = Vec::new();

        if size == 0 {
            return result
        }

        let start = (0..size).find(|&pos| self.labels[pos] != self.labels[(pos + size - 1) % size]);

        if let Some(start) = start {
            for pos in start..start + size {
                let label = self.labels[pos % size];

                match result.last_mut() {
                    Some(block) if block.label == label => block.thickness += 1,
                    _ => result.push(Block { label, thickness: 1 }),
                }
            }
        } else {
            result.push(Block { label: self.labels[0], thickness: size });
        }

        result
    }
}

/// Two-pointer search for the smallest rotation, linear in the
/// length of `word`.
fn least_rotation<T: Ord>(word: &[T]) -> usize {
    let size = word.len();
    let (mut i, mut j, mut k) = (0, 1, 0);

    while i < size && j < size && k < size {
        match word[(i + k) % size].cmp(&word[(j + k) % size]) {
            Ordering::Equal => k += 1,
            Ordering::Greater => {
                i += k + 1;
                if i <= j {
                    i = j + 1;
                }
                k = 0;
            }
            Ordering::Less => {
                j += k + 1;
                if j <= i {
                    j = i + 1;
                }
                k = 0;
            }
        }
    }

    i.min(j).min(size.saturating_sub(1))
}

impl From<Vec<Label>> for Sequence {
    #[inline]
    fn from(labels: Vec<Label>) -> Self {
        Sequence { labels }
    }
}

impl Index<usize> for Sequence {
    type Output = Label;

    #[inline]
    fn index(&self, pos: usize) -> &Label {
        &self.labels[pos]
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Label;
    type IntoIter = std::slice::Iter<'a, Label>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for label in self.labels.iter() {
            label.fmt(f)?;
        }

        Ok(())
    }
}
