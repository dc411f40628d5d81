//! `GF(2^4)` scalar arithmetic
//!
//! Field elements are integers in `[0, 16)`. Addition, subtraction and
//! negation are all bitwise XOR. Multiplication and division go through
//! fixed log/antilog tables over the cyclic multiplicative group of order
//! 15, generated by the primitive polynomial `x^4 + x + 1`.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Sub, SubAssign};

/// `log[a]` for `a in 1..16`; `log[0]` is unused (multiplication by zero is
/// special-cased) and kept as `0` as a harmless placeholder.
const LOG: [u8; 16] = [0, 0, 1, 4, 2, 8, 5, 10, 3, 14, 9, 7, 6, 13, 11, 12];

/// `exp[i] = g^i` for `i in 0..15`; index 15 repeats index 0 so that
/// `log[a] + log[b]` (which can reach 28) never needs an extra `% 15`
/// branch beyond a single wraparound subtract.
const EXP: [u8; 16] = [1, 2, 4, 8, 3, 6, 12, 11, 5, 10, 7, 14, 15, 13, 9, 1];

/// An element of `GF(2^4)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct GfElement(u8);

impl GfElement {
    /// The additive identity.
    pub const ZERO: GfElement = GfElement(0);
    /// The multiplicative identity.
    pub const ONE: GfElement = GfElement(1);

    /// Build an element from its raw nibble value, masking off any bits
    /// beyond the low 4.
    #[inline]
    pub fn new(raw: u8) -> Self {
        GfElement(raw & 0x0F)
    }

    /// The raw nibble value `[0, 16)`.
    #[inline]
    pub fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `log[self]`. Panics (debug) if `self` is zero; zero has no logarithm.
    #[inline]
    pub fn log(self) -> u8 {
        debug_assert!(!self.is_zero(), "log of zero is undefined");
        LOG[self.0 as usize]
    }

    #[inline]
    fn antilog(e: i32) -> GfElement {
        let e = e.rem_euclid(15) as usize;
        GfElement(EXP[e])
    }

    /// `self^n` for `n >= 0`.
    pub fn pow(self, n: u32) -> GfElement {
        if self.is_zero() {
            return if n == 0 { GfElement::ONE } else { GfElement::ZERO };
        }
        GfElement::antilog(self.log() as i32 * n as i32)
    }

    /// Checked division: `None` if `rhs` is zero.
    pub fn checked_div(self, rhs: GfElement) -> Option<GfElement> {
        if rhs.is_zero() {
            return None;
        }
        if self.is_zero() {
            return Some(GfElement::ZERO);
        }
        Some(GfElement::antilog(self.log() as i32 - rhs.log() as i32))
    }
}

impl From<u8> for GfElement {
    #[inline]
    fn from(raw: u8) -> Self {
        GfElement::new(raw)
    }
}

impl From<GfElement> for u8 {
    #[inline]
    fn from(v: GfElement) -> Self {
        v.0
    }
}

impl fmt::Display for GfElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for GfElement {
    type Output = GfElement;
    #[inline]
    fn add(self, rhs: GfElement) -> GfElement {
        GfElement(self.0 ^ rhs.0)
    }
}

impl Sub for GfElement {
    type Output = GfElement;
    #[inline]
    fn sub(self, rhs: GfElement) -> GfElement {
        GfElement(self.0 ^ rhs.0)
    }
}

impl AddAssign for GfElement {
    #[inline]
    fn add_assign(&mut self, rhs: GfElement) {
        self.0 ^= rhs.0;
    }
}

impl SubAssign for GfElement {
    #[inline]
    fn sub_assign(&mut self, rhs: GfElement) {
        self.0 ^= rhs.0;
    }
}

impl Mul for GfElement {
    type Output = GfElement;
    fn mul(self, rhs: GfElement) -> GfElement {
        if self.is_zero() || rhs.is_zero() {
            return GfElement::ZERO;
        }
        GfElement::antilog(self.log() as i32 + rhs.log() as i32)
    }
}

impl MulAssign for GfElement {
    #[inline]
    fn mul_assign(&mut self, rhs: GfElement) {
        *self = *self * rhs;
    }
}

impl Div for GfElement {
    type Output = GfElement;
    /// Divides by `rhs`. Panics (debug) on division by zero, since callers in
    /// this crate never divide by an element they have not already
    /// checked is nonzero (e.g. a pivot already tested during Gauss-Jordan
    /// elimination).
    fn div(self, rhs: GfElement) -> GfElement {
        self.checked_div(rhs).expect("division by zero in GF(2^4)")
    }
}
