use std::fmt;
use bit_vec::BitVec;
use crate::{MAX_LABELS, Label, Alphabet, Contextual, Sequence};

/// Matching mode of interfaces.
///
/// Under `Symmetric` matching (the default) the interface _A-B_ is the
/// same as _B-A_.  Under `Directed` matching _A>B_ occurs only where
/// _A_ is immediately followed by _B_ when reading the canonical
/// representative left to right.
///
/// Directed results are not invariant under reflection: the isomer
/// `ABC` has no _A>C_ interface, although its mirror image `ACB`,
/// which is the same bracelet, has one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Orientation {
    Symmetric,
    Directed,
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Symmetric
    }
}

/// An adjacency of two components at consecutive ring positions.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Interface {
    first:  Label,
    second: Label,
}

impl Interface {
    #[inline]
    pub fn new(first: Label, second: Label) -> Self {
        Interface { first, second }
    }

    #[inline]
    pub fn first(self) -> Label {
        self.first
    }

    #[inline]
    pub fn second(self) -> Label {
        self.second
    }

    #[inline]
    pub fn reversed(self) -> Self {
        Interface { first: self.second, second: self.first }
    }

    /// Returns the representative of this interface under the given
    /// matching mode: the pair in label order if matching is
    /// symmetric, the pair itself otherwise.
    pub fn normalized(self, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Symmetric if self.first > self.second => self.reversed(),
            _ => self,
        }
    }

    #[inline]
    fn bit_index(self) -> usize {
        self.first.index() * MAX_LABELS + self.second.index()
    }

    fn from_bit_index(ndx: usize) -> Option<Self> {
        Some(Interface { first: Label::new(ndx / MAX_LABELS)?, second: Label::new(ndx % MAX_LABELS)? })
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.second)
    }
}

impl Contextual for Interface {
    fn format(&self, alphabet: &Alphabet) -> String {
        format!("{}-{}", alphabet.with(&self.first), alphabet.with(&self.second))
    }
}

/// The set of interfaces occurring in a ring, one bit per (normalized)
/// pair of labels.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct InterfaceSet {
    bits:        BitVec,
    orientation: Orientation,
}

impl InterfaceSet {
    /// Scans all `n` cyclic adjacent pairs of `sequence`, including
    /// the pair of its last and first layer.
    pub fn of(sequence: &Sequence, orientation: Orientation) -> Self {
        let mut bits = BitVec::from_elem(MAX_LABELS * MAX_LABELS, false);

        for (pos, &label) in sequence.iter().enumerate() {
            let interface = Interface::new(label, sequence.successor(pos)).normalized(orientation);

            bits.set(interface.bit_index(), true);
        }

        InterfaceSet { bits, orientation }
    }

    #[inline]
    pub fn get_orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn contains(&self, interface: Interface) -> bool {
        self.bits.get(interface.normalized(self.orientation).bit_index()).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.bits.iter().filter(|&bit| bit).count()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.none()
    }

    /// Iterates over normalized interfaces in label order.
    pub fn iter(&self) -> impl Iterator<Item = Interface> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter(|&(_, bit)| bit)
            .filter_map(|(ndx, _)| Interface::from_bit_index(ndx))
    }
}

/// Counts ring positions at which `pattern` starts, reading
/// `sequence` cyclically.  Under symmetric matching, occurrences of
/// the reversed pattern are added, unless the pattern is a
/// palindrome.
pub fn count_occurrences(sequence: &Sequence, pattern: &[Label], orientation: Orientation) -> usize {
    let forward = count_forward(sequence, pattern);

    match orientation {
        Orientation::Directed => forward,
        Orientation::Symmetric => {
            let reversed: Vec<_> = pattern.iter().rev().copied().collect();

            if reversed.as_slice() == pattern {
                forward
            } else {
                forward + count_forward(sequence, &reversed)
            }
        }
    }
}

fn count_forward(sequence: &Sequence, pattern: &[Label]) -> usize {
    let size = sequence.len();

    if size == 0 || pattern.is_empty() {
        return 0
    }

    (0..size)
        .filter(|&start| pattern.iter().enumerate().all(|(ndx, &label)| sequence[(start + ndx) % size] == label))
        .count()
}
