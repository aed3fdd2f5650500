use derive_more::{Add, AddAssign, Deref, DerefMut, Display, From, Into, MulAssign, Sum};

/// A distance in points (1/72 of an inch), the canonical PDF unit.
///
/// All layout maths in the crate happens in points; [`In`] and [`Mm`]
/// exist as entry points for callers who think in other units.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, PartialOrd, Add, AddAssign, Deref, DerefMut, Display,
    From, Into, MulAssign, Sum,
)]
pub struct Pt(pub f32);

impl Pt {
    pub const ZERO: Pt = Pt(0.0);

    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }

    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    pub fn abs(self) -> Pt {
        Pt(self.0.abs())
    }
}

impl std::ops::Sub for Pt {
    type Output = Pt;
    fn sub(self, rhs: Pt) -> Pt {
        Pt(self.0 - rhs.0)
    }
}

impl std::ops::Neg for Pt {
    type Output = Pt;
    fn neg(self) -> Pt {
        Pt(-self.0)
    }
}

impl std::ops::Mul<f32> for Pt {
    type Output = Pt;
    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl std::ops::Div<f32> for Pt {
    type Output = Pt;
    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

/// A distance in inches
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, From, Into)]
pub struct In(pub f32);

/// A distance in millimetres
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, From, Into)]
pub struct Mm(pub f32);

impl From<In> for Pt {
    fn from(value: In) -> Pt {
        Pt(value.0 * 72.0)
    }
}

impl From<Mm> for Pt {
    fn from(value: Mm) -> Pt {
        Pt(value.0 * 72.0 / 25.4)
    }
}

impl From<Pt> for In {
    fn from(value: Pt) -> In {
        In(value.0 / 72.0)
    }
}

impl From<Pt> for Mm {
    fn from(value: Pt) -> Mm {
        Mm(value.0 * 25.4 / 72.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_conversions() {
        assert_eq!(Pt::from(In(1.0)), Pt(72.0));
        assert_eq!(Pt::from(In(0.5)), Pt(36.0));
        assert!((Pt::from(Mm(25.4)).0 - 72.0).abs() < 1e-4);
    }

    #[test]
    fn arithmetic() {
        assert_eq!(Pt(10.0) + Pt(5.0), Pt(15.0));
        assert_eq!(Pt(10.0) - Pt(5.0), Pt(5.0));
        assert_eq!(Pt(10.0) * 1.5, Pt(15.0));
        assert_eq!(Pt(10.0) / 2.0, Pt(5.0));
        assert_eq!([Pt(1.0), Pt(2.0)].into_iter().sum::<Pt>(), Pt(3.0));
    }
}
