//! Closed-form counts of necklaces and bracelets with fixed content.
//!
//! Both counts follow from Burnside's lemma.  For content
//! _c<sub>1</sub>, ..., c<sub>k</sub>_ of total length _n_ and
//! _g = gcd(c<sub>1</sub>, ..., c<sub>k</sub>)_, the number of
//! necklaces is
//!
//! _N = (1/n) &Sigma;<sub>d | g</sub> &phi;(d) M(c/d)_,
//!
//! where _M_ is the multinomial coefficient.  The number of bracelets
//! adds the arrangements fixed by the _n_ reflections:
//!
//! * odd _n_ &mdash; nonzero iff exactly one count is odd, then
//!   _n M(&lfloor;c/2&rfloor;)_;
//! * even _n_, all counts even &mdash; _n/2_ edge axes fixing
//!   _M(c/2)_ arrangements each, and _n/2_ vertex axes whose two
//!   beads carry the same label;
//! * even _n_, exactly two odd counts &mdash; the _n/2_ vertex axes
//!   carry the two odd labels, _n M(&lfloor;c/2&rfloor;)_ in total.
//!
//! The bracelet count is then _(n N + reflections) / 2n_.  All
//! arithmetic is checked; results which don't fit in `u128` are
//! reported as [`IsomerErrorKind::CountOverflow`].

use crate::{ContentSpec, IsomerError, IsomerErrorKind};

/// Number of necklaces (classes under rotation) with the given
/// content.
pub fn necklace_count(content: &ContentSpec) -> Result<u128, IsomerError> {
    let counts: Vec<_> = content.counts().collect();
    let length = content.len() as u128;

    Ok(rotation_sum(&counts)? / length)
}

/// Number of bracelets (classes under rotation and reflection) with
/// the given content.  Equal to the number of items produced by a
/// [`BraceletGenerator`](crate::BraceletGenerator).
pub fn bracelet_count(content: &ContentSpec) -> Result<u128, IsomerError> {
    let counts: Vec<_> = content.counts().collect();
    let length = content.len() as u128;

    let total = rotation_sum(&counts)?
        .checked_add(reflection_sum(&counts)?)
        .ok_or(IsomerErrorKind::CountOverflow)?;

    Ok(total / (2 * length))
}

/// Sum of fixed points of all rotations.
fn rotation_sum(counts: &[usize]) -> Result<u128, IsomerError> {
    let g = counts.iter().fold(0, |acc, &c| gcd(acc, c as u128));
    let mut result = 0_u128;

    for d in (1..=g).filter(|d| g % d == 0) {
        let parts: Vec<_> = counts.iter().map(|&c| c as u128 / d).collect();
        let fixed = multinomial(&parts)?
            .checked_mul(totient(d))
            .ok_or(IsomerErrorKind::CountOverflow)?;

        result = result.checked_add(fixed).ok_or(IsomerErrorKind::CountOverflow)?;
    }

    Ok(result)
}

/// Sum of fixed points of all reflections.
fn reflection_sum(counts: &[usize]) -> Result<u128, IsomerError> {
    let length: u128 = counts.iter().map(|&c| c as u128).sum();
    let halves: Vec<_> = counts.iter().map(|&c| c as u128 / 2).collect();
    let num_odd = counts.iter().filter(|&&c| c % 2 == 1).count();

    let overflow = || IsomerError::from(IsomerErrorKind::CountOverflow);

    if length % 2 == 1 {
        if num_odd == 1 {
            multinomial(&halves)?.checked_mul(length).ok_or_else(overflow)
        } else {
            Ok(0)
        }
    } else if num_odd == 0 {
        let mut per_axis = multinomial(&halves)?;

        for ndx in 0..halves.len() {
            let mut parts = halves.clone();
            parts[ndx] -= 1;
            per_axis = per_axis.checked_add(multinomial(&parts)?).ok_or_else(overflow)?;
        }

        per_axis.checked_mul(length / 2).ok_or_else(overflow)
    } else if num_odd == 2 {
        multinomial(&halves)?.checked_mul(length).ok_or_else(overflow)
    } else {
        Ok(0)
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }

    a
}

fn totient(n: u128) -> u128 {
    (1..=n).filter(|&k| gcd(k, n) == 1).count() as u128
}

fn binomial(n: u128, k: u128) -> Result<u128, IsomerError> {
    let k = k.min(n - k);
    let mut result = 1_u128;

    for i in 0..k {
        // result == C(n, i), and C(n, i) * (n - i) is divisible by i + 1.
        let divisor = i + 1;
        let g = gcd(result, divisor);

        result = (result / g)
            .checked_mul((n - i) / (divisor / g))
            .ok_or(IsomerErrorKind::CountOverflow)?;
    }

    Ok(result)
}

fn multinomial(parts: &[u128]) -> Result<u128, IsomerError> {
    let mut total = 0_u128;
    let mut result = 1_u128;

    for &part in parts {
        total += part;
        result = result.checked_mul(binomial(total, part)?).ok_or(IsomerErrorKind::CountOverflow)?;
    }

    Ok(result)
}
