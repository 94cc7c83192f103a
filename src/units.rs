//! Layout units. All page geometry is expressed in [Pt], the native PDF unit
//! of 72 points per inch.

use derive_more::{Add, AddAssign, Deref, Display, From, Into, Sub, SubAssign};
use std::ops::{Div, Mul, Neg};

/// Points, 1/72 of an inch
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Deref,
    Display,
    From,
    Into,
)]
#[display("{_0}pt")]
pub struct Pt(pub f32);

/// Inches
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, From, Into)]
pub struct In(pub f32);

/// Millimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, From, Into)]
pub struct Mm(pub f32);

impl From<In> for Pt {
    fn from(value: In) -> Self {
        Pt(value.0 * 72.0)
    }
}

impl From<Mm> for Pt {
    fn from(value: Mm) -> Self {
        Pt(value.0 * 72.0 / 25.4)
    }
}

impl Pt {
    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }

    pub fn abs(self) -> Pt {
        Pt(self.0.abs())
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Mul<Pt> for f32 {
    type Output = Pt;

    fn mul(self, rhs: Pt) -> Pt {
        Pt(self * rhs.0)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

/// Ratio of two lengths
impl Div<Pt> for Pt {
    type Output = f32;

    fn div(self, rhs: Pt) -> f32 {
        self.0 / rhs.0
    }
}

impl Neg for Pt {
    type Output = Pt;

    fn neg(self) -> Pt {
        Pt(-self.0)
    }
}

impl std::iter::Sum for Pt {
    fn sum<I: Iterator<Item = Pt>>(iter: I) -> Pt {
        iter.fold(Pt(0.0), |acc, pt| acc + pt)
    }
}

impl<'a> std::iter::Sum<&'a Pt> for Pt {
    fn sum<I: Iterator<Item = &'a Pt>>(iter: I) -> Pt {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inches_convert_to_points() {
        assert_eq!(Pt::from(In(1.0)), Pt(72.0));
        assert_eq!(Pt::from(In(0.5)), Pt(36.0));
    }

    #[test]
    fn millimetres_convert_to_points() {
        let a4_width: Pt = Mm(210.0).into();
        assert!((a4_width.0 - 595.28).abs() < 0.01);
    }

    #[test]
    fn arithmetic_stays_in_points() {
        let total: Pt = [Pt(100.0), Pt(300.0), Pt(100.0)].iter().sum();
        assert_eq!(total, Pt(500.0));
        assert_eq!(Pt(10.0) * 2.0 - Pt(5.0), Pt(15.0));
        assert_eq!(Pt(10.0) / Pt(4.0), 2.5);
        assert_eq!(-Pt(3.0), Pt(-3.0));
    }
}
