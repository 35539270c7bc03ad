//! Selection of isomers by thickness, block and interface criteria.
//!
//! An [`IsomerFilter`] is built once per content, from a
//! [`ThicknessTable`] and a [`FilterSpec`], and validated at that
//! point: any reference to a component absent from the content is an
//! error, and so is a missing thickness value when thickness bounds
//! are in effect.  Afterwards, every bracelet is checked
//! independently, and the result is either acceptance or the list of
//! all violated constraints.
//!
//! Constraints come in four groups, combined by conjunction:
//!
//! * thickness bounds &mdash; the thickness of every component of a
//!   representative (looked up in the table) must lie within the
//!   global bounds and within bounds set for that component;
//! * required and forbidden [`Interface`]s;
//! * interface counts &mdash; the number of occurrences of a pattern
//!   of two or more components must lie within bounds;
//! * block conditions &mdash; constraints on the number of
//!   consecutive layers in blocks of a component.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};
use crate::{
    Label, Alphabet, Contextual, ContentSpec, Bracelet, Interface, InterfaceSet, Orientation,
    IsomerError, IsomerErrorKind, interface::count_occurrences,
};

/// A closed range of nonnegative integers, possibly unbounded above.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Bounds {
    min: usize,
    max: Option<usize>,
}

impl Bounds {
    pub fn new(min: usize, max: Option<usize>) -> Result<Self, IsomerError> {
        match max {
            Some(max) if max < min => Err(IsomerErrorKind::BoundsInverted(min, max).into()),
            _ => Ok(Bounds { min, max }),
        }
    }

    #[inline]
    pub fn exactly(value: usize) -> Self {
        Bounds { min: value, max: Some(value) }
    }

    #[inline]
    pub fn at_least(min: usize) -> Self {
        Bounds { min, max: None }
    }

    #[inline]
    pub fn at_most(max: usize) -> Self {
        Bounds { min: 0, max: Some(max) }
    }

    #[inline]
    pub fn get_min(&self) -> usize {
        self.min
    }

    #[inline]
    pub fn get_max(&self) -> Option<usize> {
        self.max
    }

    #[inline]
    pub fn contains(&self, value: usize) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{}..{}", self.min, max),
            None => write!(f, "{}..", self.min),
        }
    }
}

/// Physical layer thickness of component types.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct ThicknessTable {
    values: BTreeMap<Label, usize>,
}

impl ThicknessTable {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn insert(&mut self, label: Label, thickness: usize) -> Result<(), IsomerError> {
        if thickness == 0 {
            Err(IsomerErrorKind::ThicknessZero(label).into())
        } else {
            self.values.insert(label, thickness);
            Ok(())
        }
    }

    pub fn with(mut self, label: Label, thickness: usize) -> Result<Self, IsomerError> {
        self.insert(label, thickness)?;
        Ok(self)
    }

    #[inline]
    pub fn get(&self, label: Label) -> Option<usize> {
        self.values.get(&label).copied()
    }

    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.values.keys().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A condition on blocks (maximal runs of consecutive layers) of a
/// single component.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BlockCondition {
    /// At least one block has exactly this many layers.
    Includes(usize),
    /// Every block has a number of layers within bounds.
    Within(Bounds),
}

/// Bounds on the number of occurrences of a multi-layer interface
/// pattern, e.g. _A-B-B_.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct InterfaceCount {
    pattern: Vec<Label>,
    bounds:  Bounds,
}

impl InterfaceCount {
    pub fn new(pattern: Vec<Label>, bounds: Bounds) -> Result<Self, IsomerError> {
        if pattern.len() < 2 {
            Err(IsomerErrorKind::PatternTooShort(pattern.len()).into())
        } else {
            Ok(InterfaceCount { pattern, bounds })
        }
    }

    #[inline]
    pub fn get_pattern(&self) -> &[Label] {
        self.pattern.as_slice()
    }

    #[inline]
    pub fn get_bounds(&self) -> Bounds {
        self.bounds
    }
}

/// Configuration of an [`IsomerFilter`].  The default value has no
/// constraints and accepts everything.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct FilterSpec {
    orientation:      Orientation,
    thickness_bounds: Option<Bounds>,
    label_thickness:  BTreeMap<Label, Bounds>,
    required:         BTreeSet<Interface>,
    forbidden:        BTreeSet<Interface>,
    interface_counts: Vec<InterfaceCount>,
    block_conditions: BTreeMap<Label, Vec<BlockCondition>>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Bounds applying to the thickness of every component.
    pub fn with_thickness_bounds(mut self, bounds: Bounds) -> Self {
        self.thickness_bounds = Some(bounds);
        self
    }

    pub fn with_label_thickness(mut self, label: Label, bounds: Bounds) -> Self {
        self.label_thickness.insert(label, bounds);
        self
    }

    pub fn require(mut self, interface: Interface) -> Self {
        self.required.insert(interface);
        self
    }

    pub fn forbid(mut self, interface: Interface) -> Self {
        self.forbidden.insert(interface);
        self
    }

    pub fn with_interface_count(mut self, count: InterfaceCount) -> Self {
        self.interface_counts.push(count);
        self
    }

    pub fn with_block_condition(mut self, label: Label, condition: BlockCondition) -> Self {
        self.block_conditions.entry(label).or_insert_with(Vec::new).push(condition);
        self
    }

    #[inline]
    pub fn get_orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn has_thickness_bounds(&self) -> bool {
        self.thickness_bounds.is_some() || !self.label_thickness.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_thickness_bounds()
            && self.required.is_empty()
            && self.forbidden.is_empty()
            && self.interface_counts.is_empty()
            && self.block_conditions.is_empty()
    }

    /// All components referred to by some constraint.
    pub fn referenced_labels(&self) -> BTreeSet<Label> {
        let mut result: BTreeSet<Label> = self.label_thickness.keys().copied().collect();

        for interface in self.required.iter().chain(self.forbidden.iter()) {
            result.insert(interface.first());
            result.insert(interface.second());
        }

        for count in self.interface_counts.iter() {
            result.extend(count.pattern.iter().copied());
        }

        result.extend(self.block_conditions.keys().copied());

        result
    }
}

/// A single constraint violated by a representative.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Violation {
    ThicknessOutOfBounds { label: Label, thickness: usize, bounds: Bounds },
    MissingInterface(Interface),
    ForbiddenInterface(Interface),
    InterfaceCountOutOfBounds { pattern: Vec<Label>, count: usize, bounds: Bounds },
    BlockMissing { label: Label, thickness: usize },
    BlockOutOfBounds { label: Label, thickness: usize, bounds: Bounds },
}

impl Violation {
    fn describe<F: Fn(Label) -> String>(&self, name: F) -> String {
        use Violation::*;

        match self {
            ThicknessOutOfBounds { label, thickness, bounds } => {
                format!("Thickness {} of {} is outside {}", thickness, name(*label), bounds)
            }
            MissingInterface(interface) => {
                format!("Missing interface {}-{}", name(interface.first()), name(interface.second()))
            }
            ForbiddenInterface(interface) => {
                format!("Forbidden interface {}-{}", name(interface.first()), name(interface.second()))
            }
            InterfaceCountOutOfBounds { pattern, count, bounds } => {
                let pattern: Vec<_> = pattern.iter().map(|&label| name(label)).collect();
                format!("Interface {} occurs {} times, outside {}", pattern.join("-"), count, bounds)
            }
            BlockMissing { label, thickness } => {
                format!("No block of {} layers of {}", thickness, name(*label))
            }
            BlockOutOfBounds { label, thickness, bounds } => {
                format!("Block of {} layers of {} is outside {}", thickness, name(*label), bounds)
            }
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.describe(|label| label.to_string()))
    }
}

impl Contextual for Violation {
    fn format(&self, alphabet: &Alphabet) -> String {
        self.describe(|label| alphabet.with(&label).to_string())
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Verdict {
    Accepted,
    Rejected(Vec<Violation>),
}

impl Verdict {
    #[inline]
    pub fn is_accepted(&self) -> bool {
        *self == Verdict::Accepted
    }

    pub fn get_violations(&self) -> &[Violation] {
        match self {
            Verdict::Accepted => &[],
            Verdict::Rejected(violations) => violations.as_slice(),
        }
    }
}

/// Stateless, order-preserving selection of bracelets.
#[derive(Clone, Debug)]
pub struct IsomerFilter {
    table:  ThicknessTable,
    spec:   FilterSpec,
}

impl IsomerFilter {
    /// Validates `table` and `spec` against `content`.
    ///
    /// Fails with [`IsomerErrorKind::FilterUnknownLabel`] if either
    /// refers to a component absent from `content`, and with
    /// [`IsomerErrorKind::ThicknessMissing`] if thickness bounds are
    /// set, but `table` lacks a component of `content`.
    pub fn new(content: &ContentSpec, table: ThicknessTable, spec: FilterSpec) -> Result<Self, IsomerError> {
        let labels: BTreeSet<_> = content.labels().collect();

        if let Some(label) = spec.referenced_labels().into_iter().chain(table.labels()).find(|l| !labels.contains(l)) {
            return Err(IsomerErrorKind::FilterUnknownLabel(label).into())
        }

        if spec.has_thickness_bounds() {
            if let Some(&label) = labels.iter().find(|&&l| table.get(l).is_none()) {
                return Err(IsomerErrorKind::ThicknessMissing(label).into())
            }
        }

        Ok(IsomerFilter { table, spec })
    }

    /// A filter accepting every bracelet.
    pub fn accept_all() -> Self {
        IsomerFilter { table: ThicknessTable::new(), spec: FilterSpec::new() }
    }

    #[inline]
    pub fn get_spec(&self) -> &FilterSpec {
        &self.spec
    }

    #[inline]
    pub fn get_table(&self) -> &ThicknessTable {
        &self.table
    }

    /// Checks all constraints and lists the violated ones.
    pub fn check(&self, bracelet: &Bracelet) -> Result<Verdict, IsomerError> {
        let mut violations = Vec::new();

        self.check_thickness(bracelet, &mut violations)?;
        self.check_interfaces(bracelet, &mut violations);
        self.check_blocks(bracelet, &mut violations);

        if violations.is_empty() {
            Ok(Verdict::Accepted)
        } else {
            Ok(Verdict::Rejected(violations))
        }
    }

    pub fn accepts(&self, bracelet: &Bracelet) -> Result<bool, IsomerError> {
        self.check(bracelet).map(|verdict| verdict.is_accepted())
    }

    /// Lazily filters a stream of bracelets.  The first error ends
    /// the stream.
    pub fn select<I>(&self, bracelets: I) -> Selection<'_, I::IntoIter>
    where
        I: IntoIterator<Item = Bracelet>,
    {
        Selection { filter: self, bracelets: bracelets.into_iter(), failed: false }
    }

    /// Collects the accepted bracelets, or rejects the whole stream
    /// on the first error.
    pub fn select_all<I>(&self, bracelets: I) -> Result<Vec<Bracelet>, IsomerError>
    where
        I: IntoIterator<Item = Bracelet>,
    {
        self.select(bracelets).collect()
    }

    fn check_thickness(&self, bracelet: &Bracelet, violations: &mut Vec<Violation>) -> Result<(), IsomerError> {
        if !self.spec.has_thickness_bounds() {
            return Ok(())
        }

        let present: BTreeSet<_> = bracelet.representative().iter().copied().collect();

        for label in present {
            let thickness = self.table.get(label).ok_or(IsomerErrorKind::ThicknessMissing(label))?;
            let label_bounds = self.spec.label_thickness.get(&label);

            for bounds in self.spec.thickness_bounds.iter().chain(label_bounds) {
                if !bounds.contains(thickness) {
                    violations.push(Violation::ThicknessOutOfBounds { label, thickness, bounds: *bounds });
                }
            }
        }

        Ok(())
    }

    fn check_interfaces(&self, bracelet: &Bracelet, violations: &mut Vec<Violation>) {
        let spec = &self.spec;
        let representative = bracelet.representative();

        if !spec.required.is_empty() || !spec.forbidden.is_empty() {
            let present = InterfaceSet::of(representative, spec.orientation);

            for &interface in spec.required.iter() {
                if !present.contains(interface) {
                    violations.push(Violation::MissingInterface(interface));
                }
            }

            for &interface in spec.forbidden.iter() {
                if present.contains(interface) {
                    violations.push(Violation::ForbiddenInterface(interface));
                }
            }
        }

        for count in spec.interface_counts.iter() {
            let occurrences = count_occurrences(representative, &count.pattern, spec.orientation);

            if !count.bounds.contains(occurrences) {
                violations.push(Violation::InterfaceCountOutOfBounds {
                    pattern: count.pattern.clone(),
                    count:   occurrences,
                    bounds:  count.bounds,
                });
            }
        }
    }

    fn check_blocks(&self, bracelet: &Bracelet, violations: &mut Vec<Violation>) {
        if self.spec.block_conditions.is_empty() {
            return
        }

        let blocks = bracelet.representative().blocks();

        for (&label, conditions) in self.spec.block_conditions.iter() {
            let thicknesses: Vec<_> = blocks.iter().filter(|b| b.label == label).map(|b| b.thickness).collect();

            for condition in conditions {
                match *condition {
                    BlockCondition::Includes(thickness) => {
                        if !thicknesses.contains(&thickness) {
                            violations.push(Violation::BlockMissing { label, thickness });
                        }
                    }
                    BlockCondition::Within(bounds) => {
                        if let Some(&thickness) = thicknesses.iter().find(|&&t| !bounds.contains(t)) {
                            violations.push(Violation::BlockOutOfBounds { label, thickness, bounds });
                        }
                    }
                }
            }
        }
    }
}

/// Lazy selection produced by [`IsomerFilter::select()`].
pub struct Selection<'a, I> {
    filter:    &'a IsomerFilter,
    bracelets: I,
    failed:    bool,
}

impl<'a, I: Iterator<Item = Bracelet>> Iterator for Selection<'a, I> {
    type Item = Result<Bracelet, IsomerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None
        }

        for bracelet in self.bracelets.by_ref() {
            match self.filter.accepts(&bracelet) {
                Ok(true) => return Some(Ok(bracelet)),
                Ok(false) => {}
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err))
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BraceletGenerator, Sequence};

    fn label(letter: char) -> Label {
        Label::from_letter(letter).unwrap()
    }

    fn iface(pair: &str) -> Interface {
        let mut chars = pair.chars();
        Interface::new(label(chars.next().unwrap()), label(chars.next().unwrap()))
    }

    fn select(counts: &[usize], spec: FilterSpec) -> Vec<String> {
        let content = ContentSpec::from_counts(counts).unwrap();
        let filter = IsomerFilter::new(&content, ThicknessTable::new(), spec).unwrap();

        filter
            .select_all(BraceletGenerator::new(&content).iter())
            .unwrap()
            .iter()
            .map(|b| b.to_string())
            .collect()
    }

    fn num_selected(counts: &[usize], spec: FilterSpec) -> usize {
        select(counts, spec).len()
    }

    #[test]
    fn test_bounds() {
        let bounds = Bounds::new(2, Some(4)).unwrap();
        assert!(bounds.contains(2));
        assert!(bounds.contains(4));
        assert!(!bounds.contains(5));
        assert!(!bounds.contains(1));
        assert_eq!(bounds.to_string(), "2..4");
        assert_eq!(Bounds::at_least(3).to_string(), "3..");
        assert!(Bounds::at_least(3).contains(1000));
        assert!(Bounds::at_most(0).contains(0));
        assert_eq!(Bounds::exactly(7), Bounds::new(7, Some(7)).unwrap());

        let err = Bounds::new(4, Some(2)).unwrap_err();
        assert_eq!(err.kind(), &IsomerErrorKind::BoundsInverted(4, 2));
    }

    #[test]
    fn test_table() {
        let mut table = ThicknessTable::new();
        assert!(table.is_empty());
        table.insert(label('A'), 6).unwrap();
        assert_eq!(table.get(label('A')), Some(6));
        assert_eq!(table.get(label('B')), None);

        let err = table.insert(label('B'), 0).unwrap_err();
        assert_eq!(err.kind(), &IsomerErrorKind::ThicknessZero(label('B')));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_empty_spec_accepts_all() {
        assert!(FilterSpec::new().is_empty());
        assert_eq!(num_selected(&[3, 4, 5], FilterSpec::new()), 1170);
        assert_eq!(select(&[2, 2], FilterSpec::new()), vec!["ABAB", "AABB"]);
    }

    #[test]
    fn test_forbidden_self_interface() {
        assert_eq!(select(&[2, 2], FilterSpec::new().forbid(iface("AA"))), vec!["ABAB"]);
        assert_eq!(
            select(&[2, 2, 2], FilterSpec::new().forbid(iface("AA"))),
            vec!["ABCBAC", "ABCACB", "ABCABC", "ABBCAC", "ABBACC", "ABACBC", "ABABCC"]
        );
    }

    #[test]
    fn test_required_and_forbidden() {
        let spec = FilterSpec::new().forbid(iface("AB")).require(iface("CB"));
        assert_eq!(select(&[2, 2, 2], spec), vec!["AACBBC"]);

        assert_eq!(num_selected(&[3, 4, 5], FilterSpec::new().forbid(iface("AB"))), 55);
        assert_eq!(num_selected(&[3, 4, 5], FilterSpec::new().require(iface("BA"))), 1115);
    }

    #[test]
    fn test_directed_interfaces() {
        let spec = FilterSpec::new().with_orientation(Orientation::Directed).require(iface("AC"));
        assert_eq!(select(&[2, 2, 2], spec), vec!["ABCBAC", "ABCACB", "ABBCAC", "ABBACC", "ABACBC", "AACBBC"]);

        let ab = vec![label('A'), label('B')];
        let spec = FilterSpec::new()
            .with_orientation(Orientation::Directed)
            .with_interface_count(InterfaceCount::new(ab, Bounds::exactly(0)).unwrap());
        assert_eq!(num_selected(&[3, 4, 5], spec), 95);
    }

    #[test]
    fn test_interface_counts() {
        let ab = vec![label('A'), label('B')];

        let spec = FilterSpec::new()
            .with_interface_count(InterfaceCount::new(ab.clone(), Bounds::new(4, Some(5)).unwrap()).unwrap());
        assert_eq!(num_selected(&[3, 4, 5], spec), 126);

        let spec = FilterSpec::new().with_interface_count(InterfaceCount::new(ab, Bounds::exactly(5)).unwrap());
        assert_eq!(num_selected(&[3, 4, 5], spec), 15);

        let abb = vec![label('A'), label('B'), label('B')];
        let spec = FilterSpec::new().with_interface_count(InterfaceCount::new(abb, Bounds::at_least(1)).unwrap());
        assert_eq!(num_selected(&[3, 4, 5], spec), 614);

        let err = InterfaceCount::new(vec![label('A')], Bounds::at_least(1)).unwrap_err();
        assert_eq!(err.kind(), &IsomerErrorKind::PatternTooShort(1));
    }

    #[test]
    fn test_block_conditions() {
        let c = label('C');

        let spec = FilterSpec::new().with_block_condition(c, BlockCondition::Includes(4));
        assert_eq!(num_selected(&[3, 4, 5], spec), 105);

        let includes = select(&[3, 4, 5], FilterSpec::new().with_block_condition(c, BlockCondition::Includes(5)));
        let within = select(
            &[3, 4, 5],
            FilterSpec::new().with_block_condition(c, BlockCondition::Within(Bounds::new(4, Some(5)).unwrap())),
        );
        assert_eq!(includes.len(), 19);
        assert_eq!(includes, within);
    }

    #[test]
    fn test_isomer_selection() {
        let alphabet = Alphabet::from_names(&["VSe2", "SnSe", "SnSe2"]).unwrap();
        let content = ContentSpec::new(&alphabet, alphabet.labels().zip(vec![3, 4, 5])).unwrap();
        let snse = alphabet.get_label("SnSe").unwrap();
        let snse2 = alphabet.get_label("SnSe2").unwrap();

        let spec = FilterSpec::new()
            .with_block_condition(snse, BlockCondition::Within(Bounds::exactly(2)))
            .with_block_condition(snse2, BlockCondition::Includes(5));
        let filter = IsomerFilter::new(&content, ThicknessTable::new(), spec).unwrap();

        let mut isomers = filter.select_all(&BraceletGenerator::new(&content)).unwrap();
        isomers.sort();

        let formatted: Vec<_> = isomers.iter().map(|b| alphabet.with(b).to_string()).collect();
        assert_eq!(
            formatted,
            vec![
                "(VSe2)3-(SnSe)2-(SnSe2)5-(SnSe)2",
                "(VSe2)2-(SnSe)2-(VSe2)1-(SnSe)2-(SnSe2)5",
                "(VSe2)2-(SnSe)2-(VSe2)1-(SnSe2)5-(SnSe)2",
                "(VSe2)1-(SnSe)2-(VSe2)1-(SnSe)2-(VSe2)1-(SnSe2)5",
            ]
        );
    }

    #[test]
    fn test_monotonicity() {
        let base = FilterSpec::new().forbid(iface("AA"));
        let stricter = base.clone().forbid(iface("CC"));

        let loose = select(&[3, 4, 5], base);
        let strict = select(&[3, 4, 5], stricter);
        assert!(strict.len() < loose.len());
        assert!(strict.iter().all(|s| loose.contains(s)));
    }

    #[test]
    fn test_thickness() {
        let content = ContentSpec::from_counts(&[1, 2, 3]).unwrap();
        let table = ThicknessTable::new()
            .with(label('A'), 1)
            .and_then(|t| t.with(label('B'), 2))
            .and_then(|t| t.with(label('C'), 3))
            .unwrap();
        let all = BraceletGenerator::new(&content);

        let spec = FilterSpec::new().with_thickness_bounds(Bounds::at_most(3));
        let filter = IsomerFilter::new(&content, table.clone(), spec).unwrap();
        assert_eq!(filter.select_all(&all).unwrap().len(), 6);

        let spec = FilterSpec::new().with_label_thickness(label('C'), Bounds::at_most(2));
        let filter = IsomerFilter::new(&content, table.clone(), spec).unwrap();
        assert!(filter.select_all(&all).unwrap().is_empty());

        let bracelet = all.iter().next().unwrap();
        assert_eq!(
            filter.check(&bracelet).unwrap(),
            Verdict::Rejected(vec![Violation::ThicknessOutOfBounds {
                label:     label('C'),
                thickness: 3,
                bounds:    Bounds::at_most(2),
            }])
        );
    }

    #[test]
    fn test_setup_errors() {
        let content = ContentSpec::from_counts(&[2, 2]).unwrap();

        let spec = FilterSpec::new().forbid(iface("AC"));
        let err = IsomerFilter::new(&content, ThicknessTable::new(), spec).unwrap_err();
        assert!(err.is_invalid_filter_reference());
        assert_eq!(err.kind(), &IsomerErrorKind::FilterUnknownLabel(label('C')));

        let table = ThicknessTable::new().with(label('D'), 1).unwrap();
        let err = IsomerFilter::new(&content, table, FilterSpec::new()).unwrap_err();
        assert_eq!(err.kind(), &IsomerErrorKind::FilterUnknownLabel(label('D')));

        let table = ThicknessTable::new().with(label('A'), 1).unwrap();
        let spec = FilterSpec::new().with_thickness_bounds(Bounds::at_least(1));
        let err = IsomerFilter::new(&content, table.clone(), spec).unwrap_err();
        assert!(err.is_lookup_missing());
        assert_eq!(err.kind(), &IsomerErrorKind::ThicknessMissing(label('B')));

        // Without thickness bounds an incomplete table is fine.
        assert!(IsomerFilter::new(&content, table, FilterSpec::new().forbid(iface("AA"))).is_ok());
    }

    #[test]
    fn test_violations() {
        let content = ContentSpec::from_counts(&[2, 2]).unwrap();
        let spec = FilterSpec::new()
            .forbid(iface("AA"))
            .require(iface("AB"))
            .with_block_condition(label('B'), BlockCondition::Includes(1));
        let filter = IsomerFilter::new(&content, ThicknessTable::new(), spec).unwrap();

        let aabb = Bracelet::of(&Sequence::from_letters("BBAA").unwrap());
        let verdict = filter.check(&aabb).unwrap();
        assert!(!verdict.is_accepted());
        assert_eq!(
            verdict.get_violations(),
            &[
                Violation::ForbiddenInterface(iface("AA")),
                Violation::BlockMissing { label: label('B'), thickness: 1 },
            ]
        );
        assert_eq!(verdict.get_violations()[0].to_string(), "Forbidden interface A-A");

        let alphabet = Alphabet::from_names(&["PbSe", "MoSe2"]).unwrap();
        assert_eq!(
            alphabet.with(&verdict.get_violations()[1]).to_string(),
            "No block of 1 layers of MoSe2"
        );

        let abab = Bracelet::of(&Sequence::from_letters("BABA").unwrap());
        assert_eq!(filter.check(&abab).unwrap(), Verdict::Accepted);
        assert!(filter.accepts(&abab).unwrap());
        assert!(IsomerFilter::accept_all().accepts(&aabb).unwrap());
    }

    #[test]
    fn test_selection_stops_on_error() {
        let content = ContentSpec::from_counts(&[2, 2]).unwrap();
        let other = ContentSpec::from_counts(&[1, 1, 1]).unwrap();
        let table = ThicknessTable::new().with(label('A'), 1).and_then(|t| t.with(label('B'), 1)).unwrap();
        let spec = FilterSpec::new().with_thickness_bounds(Bounds::at_least(1));
        let filter = IsomerFilter::new(&content, table, spec).unwrap();

        // Bracelets of a different content refer to an unlisted label.
        let stream = BraceletGenerator::new(&other).iter().chain(BraceletGenerator::new(&content).iter());
        let results: Vec<_> = filter.select(stream).collect();
        assert_eq!(results.len(), 1);
        assert!(results[0].as_ref().unwrap_err().is_lookup_missing());

        assert!(filter.select_all(&BraceletGenerator::new(&other)).is_err());
    }
}
