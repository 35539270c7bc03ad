//! Generation of bracelets with fixed content.
//!
//! This is the algorithm of Karim, Sawada, Alamgir and Husnine
//! (_Generating bracelets with fixed content_, Theor. Comput. Sci.
//! 475, 2013), which extends Sawada's generation of necklaces with
//! fixed content.  Prefixes are extended in a depth-first search
//! which only ever visits prefixes of canonical representatives:
//!
//! * a candidate label smaller than the one at distance _p_ (the
//!   current period) is never tried, which keeps the prefix a
//!   prenecklace;
//! * the run-length encoding of the prefix is compared with its
//!   reversal after each extension, and the branch is cut as soon as
//!   some reflection is provably smaller;
//! * when only copies of the largest label remain to be placed, the
//!   tail is fixed, and the word is emitted iff its length is a
//!   multiple of the period and no reflection is smaller.
//!
//! The recursion of the published algorithm is replaced by an
//! explicit stack of frames, so that bracelets are produced lazily,
//! one per call of [`Iterator::next()`].  Since the largest label is
//! never stored explicitly past the current position, unfilled
//! positions of the word hold the largest label, which is exactly
//! what the incremental comparison with the reversal relies on.

use std::{cmp::Ordering, fmt, iter::FusedIterator};
use crate::{Label, Alphabet, ContentSpec, Contextual, Sequence, pool::LabelPool};

/// The canonical representative of a class of sequences equivalent
/// under rotation and reflection.
///
/// A `Bracelet` is immutable; the only ways to obtain one are
/// iterating over a [`BraceletGenerator`] or canonicalizing an
/// arbitrary sequence with [`Bracelet::of()`].
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Bracelet(Sequence);

impl Bracelet {
    /// Returns the bracelet of an arbitrary arrangement.
    pub fn of(sequence: &Sequence) -> Self {
        Bracelet(sequence.canonical())
    }

    #[inline]
    pub fn representative(&self) -> &Sequence {
        &self.0
    }

    #[inline]
    pub fn into_sequence(self) -> Sequence {
        self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` iff `sequence` is one of the `2n` images of this
    /// bracelet's representative.
    pub fn contains(&self, sequence: &Sequence) -> bool {
        sequence.len() == self.0.len() && sequence.canonical() == self.0
    }
}

impl fmt::Display for Bracelet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Contextual for Bracelet {
    /// Isomer notation listing the blocks of the representative,
    /// e.g. `(VSe2)1-(SnSe)2-(SnSe2)3`.
    fn format(&self, alphabet: &Alphabet) -> String {
        let blocks: Vec<_> = self
            .0
            .blocks()
            .into_iter()
            .map(|block| format!("({}){}", alphabet.with(&block.label), block.thickness))
            .collect();

        blocks.join("-")
    }
}

/// Producer of all bracelets with the content of a [`ContentSpec`].
///
/// The generator itself holds no search state; every call of
/// [`iter()`](BraceletGenerator::iter) starts an independent run
/// which owns its buffers.  The order of emission is fixed: reverse
/// lexicographic order of representatives.
#[derive(Clone, Debug)]
pub struct BraceletGenerator {
    content: ContentSpec,
}

impl BraceletGenerator {
    pub fn new(content: &ContentSpec) -> Self {
        BraceletGenerator { content: content.clone() }
    }

    #[inline]
    pub fn get_content(&self) -> &ContentSpec {
        &self.content
    }

    pub fn iter(&self) -> Bracelets {
        let labels: Vec<_> = self.content.labels().collect();
        let counts: Vec<_> = self.content.counts().collect();

        Bracelets { labels, search: Search::new(counts) }
    }

    /// Number of bracelets, found by running the search without
    /// materializing representatives.
    pub fn count(&self) -> u64 {
        let counts: Vec<_> = self.content.counts().collect();
        let mut search = Search::new(counts);
        let mut result = 0;

        while search.advance() {
            result += 1;
        }

        result
    }
}

impl<'a> IntoIterator for &'a BraceletGenerator {
    type Item = Bracelet;
    type IntoIter = Bracelets;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy sequence of [`Bracelet`]s produced by a single run of a
/// [`BraceletGenerator`].  Dropping it cancels the run.
#[derive(Clone, Debug)]
pub struct Bracelets {
    labels: Vec<Label>,
    search: Search,
}

impl Iterator for Bracelets {
    type Item = Bracelet;

    fn next(&mut self) -> Option<Self::Item> {
        if self.search.advance() {
            let labels = &self.labels;
            let word = self.search.word().iter().map(|&ndx| labels[ndx]).collect::<Vec<_>>();

            Some(Bracelet(Sequence::from(word)))
        } else {
            None
        }
    }
}

impl FusedIterator for Bracelets {}

/// Search state of a single extension step.
///
/// Positions are one-based, as in the published algorithm: `t` is
/// the position being filled, `p` the period of the prefix, `r` the
/// end of the longest prefix whose run-length encoding is a
/// palindrome, `z` the start of the trailing run of the largest
/// label, and `b` the number of blocks of the prefix `1..=r`.
#[derive(Clone, Copy, Debug)]
struct Frame {
    t:                usize,
    p:                usize,
    r:                usize,
    z:                usize,
    b:                usize,
    reversal_smaller: bool,
    cursor:           Option<usize>,
    placed:           Option<usize>,
}

impl Frame {
    fn new(t: usize, p: usize, r: usize, z: usize, b: usize, reversal_smaller: bool) -> Self {
        Frame { t, p, r, z, b, reversal_smaller, cursor: None, placed: None }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Phase {
    Start,
    Running,
    Done,
}

/// Explicit-stack form of the recursive bracelet generation.
///
/// Labels are dense indices `0..=top`.  `word[1..=length]` is the
/// buffer being filled (`word[0]` is unused), `run[i]` is the length
/// of the run of `top` labels starting at position `i`, and `blocks`
/// is the run-length encoding of the current prefix (`blocks[0]` is a
/// sentinel).
///
/// Candidate labels are tried from the largest down, walking the
/// [`LabelPool`], which makes the emission order reverse
/// lexicographic.
#[derive(Clone, Debug)]
struct Search {
    top:       usize,
    length:    usize,
    remaining: Vec<usize>,
    word:      Vec<usize>,
    run:       Vec<usize>,
    blocks:    Vec<(usize, usize)>,
    pool:      LabelPool,
    stack:     Vec<Frame>,
    phase:     Phase,
}

impl Search {
    fn new(counts: Vec<usize>) -> Self {
        let top = counts.len().saturating_sub(1);
        let length = counts.iter().sum();
        let pool = LabelPool::new(counts.len());

        Search {
            top,
            length,
            remaining: counts,
            word: vec![top; length + 1],
            run: vec![0; length + 2],
            blocks: vec![(usize::max_value(), 0)],
            pool,
            stack: Vec::with_capacity(length),
            phase: Phase::Start,
        }
    }

    #[inline]
    fn word(&self) -> &[usize] {
        &self.word[1..]
    }

    /// Moves to the next bracelet.  Returns `false` when the search
    /// is exhausted; otherwise the bracelet is in `word()`.
    fn advance(&mut self) -> bool {
        match self.phase {
            Phase::Start => {
                self.phase = Phase::Running;

                if self.length == 0 {
                    self.phase = Phase::Done;
                    return false
                }

                if self.top == 0 {
                    // A single component: the only arrangement is emitted as is.
                    self.phase = Phase::Done;
                    return true
                }

                // The smallest label always comes first.
                self.place(1, 0);

                if self.enter(Frame::new(2, 1, 1, 2, 1, false)) {
                    return true
                }
            }
            Phase::Running => {}
            Phase::Done => return false,
        }

        if self.resume() {
            true
        } else {
            self.phase = Phase::Done;
            false
        }
    }

    fn resume(&mut self) -> bool {
        while let Some(last) = self.stack.len().checked_sub(1) {
            let Frame { t, p, r, z, b, reversal_smaller, .. } = self.stack[last];

            if let Some(ndx) = self.stack[last].placed.take() {
                self.unplace(ndx);
                self.stack[last].cursor = self.pool.next(ndx);
            }

            let ndx = match self.stack[last].cursor {
                Some(ndx) if ndx >= self.word[t - p] => ndx,
                _ => {
                    self.word[t] = self.top;
                    self.stack.pop();
                    continue
                }
            };

            self.run[z] = t - z;
            self.place(t, ndx);
            self.stack[last].placed = Some(ndx);

            let z2 = if ndx == self.top { z } else { t + 1 };
            let p2 = if ndx == self.word[t - p] { p } else { t };

            let child = match self.compare_with_reversal() {
                Ordering::Equal => Some(Frame::new(t + 1, p2, t, z2, self.blocks.len() - 1, false)),
                Ordering::Less => Some(Frame::new(t + 1, p2, r, z2, b, reversal_smaller)),
                Ordering::Greater => None,
            };

            if let Some(child) = child {
                if self.enter(child) {
                    return true
                }
            }
        }

        false
    }

    /// Processes a freshly created frame.  Returns `true` iff the
    /// word is complete and is a bracelet representative; pushes the
    /// frame if it has children to explore.
    fn enter(&mut self, mut frame: Frame) -> bool {
        let (n, top) = (self.length, self.top);
        let Frame { t, r, .. } = frame;

        // Incremental comparison of word[r+1..=n] with its reversal.
        if 2 * (t - 1) > n + r {
            match self.word[t - 1].cmp(&self.word[n + r + 2 - t]) {
                Ordering::Greater => frame.reversal_smaller = false,
                Ordering::Less => frame.reversal_smaller = true,
                Ordering::Equal => {}
            }
        }

        let tail = n + 1 - t;
        let num_top = self.remaining[top];

        if num_top == tail {
            // Only the largest label remains: the tail is forced.
            let mut p = frame.p;

            if num_top > self.run[t - p] {
                p = n;
            }

            if num_top > 0 && t != r + 1 {
                match self.blocks.get(frame.b + 1) {
                    Some(&(label, len)) if label == top && len > num_top => frame.reversal_smaller = true,
                    Some(&(label, len)) if label == top && len == num_top => {}
                    _ => frame.reversal_smaller = false,
                }
            }

            !frame.reversal_smaller && n % p == 0
        } else {
            // A prefix followed only by smallest labels can't be a necklace.
            if self.remaining[0] != tail {
                frame.cursor = self.pool.head();
                self.stack.push(frame);
            }

            false
        }
    }

    fn place(&mut self, t: usize, ndx: usize) {
        match self.blocks.last_mut() {
            Some(block) if block.0 == ndx => block.1 += 1,
            _ => self.blocks.push((ndx, 1)),
        }

        self.remaining[ndx] -= 1;

        if self.remaining[ndx] == 0 {
            self.pool.remove(ndx);
        }

        self.word[t] = ndx;
    }

    fn unplace(&mut self, ndx: usize) {
        if self.remaining[ndx] == 0 {
            self.pool.restore(ndx);
        }

        self.remaining[ndx] += 1;

        if let Some(block) = self.blocks.last_mut() {
            if block.1 > 1 {
                block.1 -= 1;
            } else {
                self.blocks.pop();
            }
        }
    }

    /// Compares the run-length encoding of the current prefix with
    /// the encoding of its reversal.  `Equal` means the encoding is a
    /// palindrome, `Greater` that the reversal is provably smaller.
    fn compare_with_reversal(&self) -> Ordering {
        let blocks = &self.blocks;
        let num_blocks = blocks.len() - 1;
        let mut j = 1;

        while j <= num_blocks / 2 && blocks[j] == blocks[num_blocks + 1 - j] {
            j += 1;
        }

        if j > num_blocks / 2 {
            return Ordering::Equal
        }

        let (front, back) = (blocks[j], blocks[num_blocks + 1 - j]);

        if front.0 != back.0 {
            return front.0.cmp(&back.0)
        }

        if front.1 < back.1 && blocks[j + 1].0 < back.0 {
            return Ordering::Less
        }

        if front.1 > back.1 && front.0 < blocks[num_blocks - j].0 {
            return Ordering::Less
        }

        Ordering::Greater
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, BTreeSet};
    use rand::Rng;
    use super::*;

    fn generate(counts: &[usize]) -> Vec<Bracelet> {
        let content = ContentSpec::from_counts(counts).unwrap();
        BraceletGenerator::new(&content).iter().collect()
    }

    fn letters(counts: &[usize]) -> Vec<String> {
        generate(counts).iter().map(|b| b.to_string()).collect()
    }

    /// Canonical forms of all distinct permutations of the content.
    fn brute_force(counts: &[usize]) -> BTreeSet<Sequence> {
        fn extend(prefix: &mut Vec<Label>, remaining: &mut [usize], result: &mut BTreeSet<Sequence>) {
            if remaining.iter().all(|&c| c == 0) {
                result.insert(Sequence::from(prefix.clone()).canonical());
                return
            }

            for ndx in 0..remaining.len() {
                if remaining[ndx] > 0 {
                    remaining[ndx] -= 1;
                    prefix.push(Label::new(ndx).unwrap());
                    extend(prefix, remaining, result);
                    prefix.pop();
                    remaining[ndx] += 1;
                }
            }
        }

        let mut result = BTreeSet::new();
        extend(&mut Vec::new(), &mut counts.to_vec(), &mut result);
        result
    }

    fn factorial(n: u64) -> u64 {
        (1..=n).product()
    }

    #[test]
    fn test_scenarios() {
        assert_eq!(letters(&[2, 1]), vec!["AAB"]);
        assert_eq!(letters(&[2, 2]), vec!["ABAB", "AABB"]);
        assert_eq!(letters(&[1, 1, 1]), vec!["ABC"]);
    }

    #[test]
    fn test_exact_lists() {
        assert_eq!(
            letters(&[1, 2, 3]),
            vec!["ACBCBC", "ACBBCC", "ABCCCB", "ABCCBC", "ABCBCC", "ABBCCC"]
        );
        assert_eq!(
            letters(&[2, 2, 2]),
            vec![
                "ABCBAC", "ABCACB", "ABCABC", "ABBCAC", "ABBACC", "ABACBC", "ABABCC", "AACBBC",
                "AABCCB", "AABCBC", "AABBCC",
            ]
        );
    }

    #[test]
    fn test_single_label() {
        for n in 1..8 {
            let bracelets = generate(&[n]);
            assert_eq!(bracelets.len(), 1);
            assert_eq!(bracelets[0].len(), n);
        }
    }

    #[test]
    fn test_distinct_labels() {
        for n in 1..=8 {
            let expected = if n < 3 { 1 } else { factorial(n as u64 - 1) / 2 };
            let bracelets = generate(&vec![1; n]);
            assert_eq!(bracelets.len() as u64, expected, "n = {}", n);

            let distinct: HashSet<_> = bracelets.iter().collect();
            assert_eq!(distinct.len(), bracelets.len());
        }
    }

    #[test]
    fn test_against_brute_force() {
        let contents: &[&[usize]] = &[
            &[1, 1],
            &[3, 3],
            &[4, 2],
            &[1, 2, 2],
            &[2, 2, 3],
            &[3, 3, 2],
            &[1, 1, 2, 2],
            &[2, 2, 2, 2],
            &[3, 1, 1, 2],
            &[1, 1, 1, 1, 2],
            &[4, 4],
            &[6, 3],
        ];

        for counts in contents {
            let generated: Vec<_> = generate(counts).into_iter().map(Bracelet::into_sequence).collect();
            let unique: BTreeSet<_> = generated.iter().cloned().collect();
            assert_eq!(unique.len(), generated.len(), "duplicates for {:?}", counts);
            assert_eq!(unique, brute_force(counts), "mismatch for {:?}", counts);
        }
    }

    #[test]
    fn test_canonicality() {
        for bracelet in generate(&[3, 2, 2, 1]) {
            let representative = bracelet.representative();
            assert_eq!(&representative.canonical(), representative);

            for image in representative.images() {
                assert_eq!(&image.canonical(), representative);
                assert!(bracelet.contains(&image));
            }
        }
    }

    #[test]
    fn test_reverse_lexicographic_order() {
        let bracelets = generate(&[3, 4, 5]);
        assert_eq!(bracelets.len(), 1170);
        assert!(bracelets.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn test_restartable() {
        let content = ContentSpec::from_counts(&[2, 3, 2]).unwrap();
        let generator = BraceletGenerator::new(&content);

        let first: Vec<_> = generator.iter().collect();
        let second: Vec<_> = (&generator).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(generator.count(), first.len() as u64);

        let mut partial = generator.iter();
        assert_eq!(partial.next(), Some(first[0].clone()));
        assert_eq!(partial.next(), Some(first[1].clone()));
        drop(partial);
        assert_eq!(generator.iter().next(), Some(first[0].clone()));

        let mut exhausted = generator.iter();
        for _ in exhausted.by_ref() {}
        assert_eq!(exhausted.next(), None);
        assert_eq!(exhausted.next(), None);
    }

    #[test]
    fn test_sparse_labels() {
        let alphabet = Alphabet::latin(5).unwrap();
        let content = ContentSpec::new(
            &alphabet,
            vec![(Label::new(1).unwrap(), 2), (Label::new(4).unwrap(), 2)],
        )
        .unwrap();
        let generated: Vec<_> = BraceletGenerator::new(&content).iter().map(|b| b.to_string()).collect();
        assert_eq!(generated, vec!["BEBE", "BBEE"]);
    }

    #[test]
    fn test_random_arrangements_are_covered() {
        let mut rng = rand::thread_rng();
        let content = ContentSpec::from_counts(&[2, 3, 3, 1]).unwrap();
        let bracelets: HashSet<_> = BraceletGenerator::new(&content).iter().collect();

        for _ in 0..100 {
            let mut arrangement = content.random_arrangement(&mut rng);
            arrangement = arrangement.rotated(rng.gen_range(0..arrangement.len()));
            assert!(bracelets.contains(&Bracelet::of(&arrangement)));
        }
    }

    #[test]
    fn test_isomer_notation() {
        let alphabet = Alphabet::from_names(&["VSe2", "SnSe", "SnSe2"]).unwrap();
        let content = ContentSpec::new(&alphabet, alphabet.labels().zip(vec![1, 2, 3])).unwrap();
        let mut isomers: Vec<_> = BraceletGenerator::new(&content).iter().collect();
        isomers.sort();

        let formatted: Vec<_> = isomers.iter().map(|b| alphabet.with(b).to_string()).collect();
        assert_eq!(
            formatted,
            vec![
                "(VSe2)1-(SnSe)2-(SnSe2)3",
                "(VSe2)1-(SnSe)1-(SnSe2)1-(SnSe)1-(SnSe2)2",
                "(VSe2)1-(SnSe)1-(SnSe2)2-(SnSe)1-(SnSe2)1",
                "(VSe2)1-(SnSe)1-(SnSe2)3-(SnSe)1",
                "(VSe2)1-(SnSe2)1-(SnSe)2-(SnSe2)2",
                "(VSe2)1-(SnSe2)1-(SnSe)1-(SnSe2)1-(SnSe)1-(SnSe2)1",
            ]
        );
    }
}
