use std::{collections::HashMap, fmt};
use crate::{MAX_LABELS, IsomerError, IsomerErrorKind};

/// An interned `String` representing the name of a component.
type Name = string_cache::DefaultAtom;

/// An identifier of a component type, i.e. one of at most
/// [`MAX_LABELS`] symbols which label layers in a stacking sequence.
///
/// Labels are totally ordered, and this order defines the
/// lexicographic comparison of sequences.  The plain `Display` form
/// of a label is an uppercase letter; component names are attached to
/// labels by an [`Alphabet`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(transparent)]
pub struct Label(u8);

impl Label {
    pub fn new(index: usize) -> Option<Self> {
        if index < MAX_LABELS {
            Some(Label(index as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn letter(self) -> char {
        (b'A' + self.0) as char
    }

    /// Parses a single uppercase letter.
    pub fn from_letter(letter: char) -> Option<Self> {
        if letter.is_ascii_uppercase() {
            Label::new((letter as u8 - b'A') as usize)
        } else {
            None
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// This type maintains a bijection between component [`Name`]s and
/// their [`Label`]s.
///
/// An alphabet is an immutable configuration value: it is built once
/// (from a list of names, or as the default `A`, `B`, ... alphabet)
/// and then passed into [`ContentSpec`] construction.
///
/// [`ContentSpec`]: crate::ContentSpec
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Alphabet {
    names: Vec<Name>,
    ids:   HashMap<Name, Label>,
}

impl Alphabet {
    /// Creates an alphabet of `size` single-letter names.
    pub fn latin(size: usize) -> Result<Self, IsomerError> {
        if size > MAX_LABELS {
            return Err(IsomerErrorKind::AlphabetTooLarge(size).into())
        }

        let letters = (0..size).filter_map(Label::new).map(|label| label.letter().to_string());

        Alphabet::from_names(letters)
    }

    /// Creates an alphabet from a list of names; the `i`-th name is
    /// given the `i`-th label.
    pub fn from_names<I, S>(names: I) -> Result<Self, IsomerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = Alphabet { names: Vec::new(), ids: HashMap::new() };

        for name in names {
            let name = Name::from(name.as_ref().trim());
            let label = Label::new(result.names.len())
                .ok_or(IsomerErrorKind::AlphabetTooLarge(result.names.len() + 1))?;

            if result.ids.insert(name.clone(), label).is_some() {
                return Err(IsomerErrorKind::AlphabetNameDup(name.to_string()).into())
            }

            result.names.push(name);
        }

        if result.names.is_empty() {
            Err(IsomerErrorKind::AlphabetEmpty.into())
        } else {
            Ok(result)
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[inline]
    pub fn contains(&self, label: Label) -> bool {
        label.index() < self.names.len()
    }

    pub fn get_name(&self, label: Label) -> Option<&str> {
        self.names.get(label.index()).map(|n| n.as_ref())
    }

    pub fn get_label<S: AsRef<str>>(&self, name: S) -> Option<Label> {
        self.ids.get(&Name::from(name.as_ref().trim())).copied()
    }

    pub fn labels(&self) -> impl Iterator<Item = Label> {
        (0..self.names.len()).filter_map(Label::new)
    }
}
