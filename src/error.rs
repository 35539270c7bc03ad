use std::{fmt, error::Error};
use crate::Label;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum IsomerErrorKind {
    AlphabetEmpty,
    AlphabetTooLarge(usize),
    AlphabetNameDup(String),

    ContentEmpty,
    ContentTooManyLabels(usize),
    ContentZeroCount(Label),
    ContentDuplicateLabel(Label),
    ContentUnknownLabel(Label),
    ContentOverflow,

    FilterUnknownLabel(Label),
    ThicknessMissing(Label),
    ThicknessZero(Label),
    BoundsInverted(usize, usize),
    PatternTooShort(usize),

    CountOverflow,
}

impl fmt::Display for IsomerErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use IsomerErrorKind::*;

        match self {
            AlphabetEmpty => write!(f, "Alphabet has no component names"),
            AlphabetTooLarge(size) => {
                write!(f, "Alphabet has {} component names, but at most {} are allowed", size, crate::MAX_LABELS)
            }
            AlphabetNameDup(name) => write!(f, "Component name '{}' is duplicated", name),

            ContentEmpty => write!(f, "Content has no components"),
            ContentTooManyLabels(size) => {
                write!(f, "Content has {} components, but at most {} are allowed", size, crate::MAX_LABELS)
            }
            ContentZeroCount(label) => write!(f, "Component {} has zero layer count", label),
            ContentDuplicateLabel(label) => write!(f, "Component {} is given more than once", label),
            ContentUnknownLabel(label) => write!(f, "Component {} is missing in the alphabet", label),
            ContentOverflow => write!(f, "Total number of layers is too large"),

            FilterUnknownLabel(label) => {
                write!(f, "Filter refers to component {}, which is absent from content", label)
            }
            ThicknessMissing(label) => write!(f, "Missing thickness of component {}", label),
            ThicknessZero(label) => write!(f, "Thickness of component {} isn't positive", label),
            BoundsInverted(min, max) => write!(f, "Lower bound {} exceeds upper bound {}", min, max),
            PatternTooShort(len) => {
                write!(f, "Interface pattern of length {} is too short (two components at least)", len)
            }

            CountOverflow => write!(f, "Number of isomers overflows the counter"),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct IsomerError {
    kind: IsomerErrorKind,
}

impl IsomerError {
    #[inline]
    pub fn kind(&self) -> &IsomerErrorKind {
        &self.kind
    }

    /// Returns `true` for errors raised while validating a
    /// [`ContentSpec`](crate::ContentSpec).
    pub fn is_invalid_content(&self) -> bool {
        use IsomerErrorKind::*;

        matches!(
            self.kind,
            ContentEmpty
                | ContentTooManyLabels(_)
                | ContentZeroCount(_)
                | ContentDuplicateLabel(_)
                | ContentUnknownLabel(_)
                | ContentOverflow
        )
    }

    pub fn is_invalid_filter_reference(&self) -> bool {
        matches!(self.kind, IsomerErrorKind::FilterUnknownLabel(_))
    }

    pub fn is_lookup_missing(&self) -> bool {
        matches!(self.kind, IsomerErrorKind::ThicknessMissing(_))
    }
}

impl From<IsomerErrorKind> for IsomerError {
    #[inline]
    fn from(kind: IsomerErrorKind) -> Self {
        IsomerError { kind }
    }
}

impl fmt::Display for IsomerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl Error for IsomerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_groups() {
        let label = Label::new(2).unwrap();

        let err = IsomerError::from(IsomerErrorKind::ContentZeroCount(label));
        assert!(err.is_invalid_content());
        assert!(!err.is_lookup_missing());
        assert_eq!(err.to_string(), "Component C has zero layer count");

        let err = IsomerError::from(IsomerErrorKind::FilterUnknownLabel(label));
        assert!(err.is_invalid_filter_reference());
        assert!(!err.is_invalid_content());

        let err = IsomerError::from(IsomerErrorKind::ThicknessMissing(label));
        assert!(err.is_lookup_missing());
        assert_eq!(err.kind(), &IsomerErrorKind::ThicknessMissing(label));
    }
}
