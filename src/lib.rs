//! Enumeration of ferecrystal isomers.
//!
//! A ferecrystal is a layered material whose repeating unit stacks
//! layers of several component types (e.g. _VSe<sub>2</sub>_, _SnSe_,
//! _SnSe<sub>2</sub>_) in some order.  Two stacking sequences describe
//! the same isomer iff one may be obtained from the other by a cyclic
//! shift or by reading it backwards.  This crate lists, counts and
//! filters isomers of a given composition.
//!
//! # Content, sequence, bracelet
//!
//! A _content_ ([`ContentSpec`]) is a multiset of component
//! [`Label`]s: how many layers of each type appear in the repeating
//! unit.  A _sequence_ ([`Sequence`]) is any arrangement of a content
//! on a ring of _n_ positions.  The 2_n_ images of a sequence under
//! rotations and reflections form its _bracelet_ class, and the
//! lexicographically smallest image is the class's _canonical
//! representative_ ([`Bracelet`]).
//!
//! A [`BraceletGenerator`] produces each bracelet of a content exactly
//! once, in constant amortized time per bracelet, and
//! [`census::bracelet_count()`] computes their number in closed form.
//!
//! # Blocks and interfaces
//!
//! A _block_ ([`Block`]) is a maximal cyclic run of layers of a single
//! component, and its _thickness_ is the run length.  An _interface_
//! ([`Interface`]) is a pair of components occupying consecutive ring
//! positions, including the wrap-around pair.  Interfaces are
//! matched either symmetrically (_A-B_ is _B-A_), or in the reading
//! direction of canonical representatives (see [`Orientation`]).
//!
//! An [`IsomerFilter`] selects bracelets by interface, block and
//! thickness criteria, as configured by a [`FilterSpec`] and a
//! [`ThicknessTable`].

#![allow(clippy::toplevel_ref_arg)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;

mod error;
mod alphabet;
mod context;
mod content;
mod sequence;
mod pool;
mod generator;
pub mod census;
mod interface;
mod filter;
mod yaml_script;
mod logging;
pub mod cli;

pub use error::{IsomerError, IsomerErrorKind};
pub use alphabet::{Label, Alphabet};
pub use context::{Contextual, InContext};
pub use content::ContentSpec;
pub use sequence::{Sequence, Block};
pub use generator::{Bracelet, BraceletGenerator, Bracelets};
pub use census::{necklace_count, bracelet_count};
pub use interface::{Interface, InterfaceSet, Orientation, count_occurrences};
pub use filter::{
    Bounds, ThicknessTable, BlockCondition, InterfaceCount, FilterSpec, Violation, Verdict,
    IsomerFilter, Selection,
};
pub use yaml_script::{Job, JobScriptError};
pub use logging::Logger;

/// Maximum number of component types in a single content.
pub const MAX_LABELS: usize = 26;
