//! Fixed content of a ferecrystal repeating unit.
//!
//! A [`ContentSpec`] records how many layers of each component type
//! appear in the repeating unit, i.e. the multiset of labels to be
//! arranged on a ring.  Arrangements themselves are
//! [`Sequence`](crate::Sequence)s.

use rand::{Rng, seq::SliceRandom};
use crate::{MAX_LABELS, Label, Alphabet, Contextual, Sequence, IsomerError, IsomerErrorKind};

/// Validated mapping from [`Label`]s to positive layer counts.
///
/// Invariants: at least one label, at most [`MAX_LABELS`] labels,
/// every count positive, every label known to the [`Alphabet`], and
/// the total number of layers fits in `usize`.  Entries are kept in
/// label order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ContentSpec {
    alphabet: Alphabet,
    entries:  Vec<(Label, usize)>,
    length:   usize,
}

impl ContentSpec {
    pub fn new<I>(alphabet: &Alphabet, entries: I) -> Result<Self, IsomerError>
    where
        I: IntoIterator<Item = (Label, usize)>,
    {
        let mut entries: Vec<_> = entries.into_iter().collect();

        if entries.is_empty() {
            return Err(IsomerErrorKind::ContentEmpty.into())
        }

        if entries.len() > MAX_LABELS {
            return Err(IsomerErrorKind::ContentTooManyLabels(entries.len()).into())
        }

        entries.sort_by_key(|&(label, _)| label);

        let mut length = 0_usize;
        let mut prev_label = None;

        for &(label, count) in entries.iter() {
            if !alphabet.contains(label) {
                return Err(IsomerErrorKind::ContentUnknownLabel(label).into())
            }

            if prev_label == Some(label) {
                return Err(IsomerErrorKind::ContentDuplicateLabel(label).into())
            }

            if count == 0 {
                return Err(IsomerErrorKind::ContentZeroCount(label).into())
            }

            length = length.checked_add(count).ok_or(IsomerErrorKind::ContentOverflow)?;
            prev_label = Some(label);
        }

        Ok(ContentSpec { alphabet: alphabet.clone(), entries, length })
    }

    /// Creates content over the default alphabet, such that the
    /// `i`-th count is the number of layers labeled with the `i`-th
    /// letter.
    pub fn from_counts(counts: &[usize]) -> Result<Self, IsomerError> {
        if counts.is_empty() {
            return Err(IsomerErrorKind::ContentEmpty.into())
        }

        if counts.len() > MAX_LABELS {
            return Err(IsomerErrorKind::ContentTooManyLabels(counts.len()).into())
        }

        let alphabet = Alphabet::latin(counts.len())?;

        ContentSpec::new(&alphabet, alphabet.labels().zip(counts.iter().copied()))
    }

    #[inline]
    pub fn get_alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Total number of layers, `n`.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Always `false`: valid content has at least one layer.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    pub fn num_labels(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn entries(&self) -> &[(Label, usize)] {
        self.entries.as_slice()
    }

    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.entries.iter().map(|&(label, _)| label)
    }

    pub fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|&(_, count)| count)
    }

    pub fn contains(&self, label: Label) -> bool {
        self.entries.binary_search_by_key(&label, |&(l, _)| l).is_ok()
    }

    pub fn count_of(&self, label: Label) -> usize {
        self.entries
            .binary_search_by_key(&label, |&(l, _)| l)
            .map(|ndx| self.entries[ndx].1)
            .unwrap_or(0)
    }

    /// The arrangement listing all layers in label order.
    pub fn arrangement(&self) -> Sequence {
        let mut labels = Vec::with_capacity(self.length);

        for &(label, count) in self.entries.iter() {
            labels.extend(std::iter::repeat(label).take(count));
        }

        Sequence::from(labels)
    }

    /// Draws a uniformly random arrangement of this content.
    pub fn random_arrangement<R: Rng + ?Sized>(&self, rng: &mut R) -> Sequence {
        let mut labels = self.arrangement().into_labels();

        labels.shuffle(rng);

        Sequence::from(labels)
    }
}

impl Contextual for ContentSpec {
    /// Chemical formula of the repeating unit, e.g.
    /// `(VSe2)3(SnSe)4(SnSe2)5`.
    fn format(&self, alphabet: &Alphabet) -> String {
        self.entries
            .iter()
            .map(|(label, count)| format!("({}){}", alphabet.with(label), count))
            .collect()
    }
}
