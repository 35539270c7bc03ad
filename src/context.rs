use std::fmt;
use crate::Alphabet;

/// Formatting of things whose textual form depends on component
/// names.
///
/// Labels are just small integers; the names under which they are
/// shown (`PbSe`, `SnSe2`, ...) are stored in an [`Alphabet`].  Values
/// of `Contextual` types are displayed through an [`InContext`]
/// wrapper obtained with [`Alphabet::with()`].
pub trait Contextual {
    fn format(&self, alphabet: &Alphabet) -> String;
}

/// A pair of a [`Contextual`] thing and the [`Alphabet`] to display
/// it with.
pub struct InContext<'a, T: Contextual + ?Sized> {
    alphabet: &'a Alphabet,
    thing:    &'a T,
}

impl<'a, T: Contextual + ?Sized> InContext<'a, T> {
    #[inline]
    pub fn get_alphabet(&self) -> &Alphabet {
        self.alphabet
    }

    #[inline]
    pub fn get_thing(&self) -> &T {
        self.thing
    }
}

impl<'a, T: Contextual + ?Sized> fmt::Display for InContext<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.thing.format(self.alphabet))
    }
}

impl Alphabet {
    #[inline]
    pub fn with<'a, T: Contextual + ?Sized>(&'a self, thing: &'a T) -> InContext<'a, T> {
        InContext { alphabet: self, thing }
    }
}

impl Contextual for crate::Label {
    fn format(&self, alphabet: &Alphabet) -> String {
        match alphabet.get_name(*self) {
            Some(name) => name.to_owned(),
            None => self.to_string(),
        }
    }
}
