//! Tolerance-aware topological relation between two geometries.
//!
//! A [`Relation`] is a 4-bit mask describing how geometry `A` (the receiver)
//! sits relative to geometry `B` (the argument):
//!
//! | Flag          | Meaning                                          |
//! |---------------|--------------------------------------------------|
//! | `A_OUTSIDE_B` | some part of A lies outside B                    |
//! | `B_OUTSIDE_A` | some part of B lies outside A                    |
//! | `A_INSIDE_B`  | the interiors overlap (also named `B_INSIDE_A`)  |
//! | `TOUCH`       | A and B share a boundary point within accuracy   |

pub(crate) mod shape;

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Relation bitmask between geometry `A` and geometry `B`.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Relation: u8 {
        /// Some part of A lies outside B.
        const A_OUTSIDE_B = 0b0001;
        /// Some part of B lies outside A.
        const B_OUTSIDE_A = 0b0010;
        /// The interiors of A and B overlap.
        const A_INSIDE_B  = 0b0100;
        /// A and B share a boundary point within accuracy.
        const TOUCH       = 0b1000;
    }
}

impl Relation {
    /// Interior overlap seen from B. Overlap is symmetric, so this is the
    /// same bit as [`Relation::A_INSIDE_B`].
    pub const B_INSIDE_A: Self = Self::A_INSIDE_B;

    /// Neither geometry reaches the other.
    pub const DISJOINT: Self = Self::A_OUTSIDE_B.union(Self::B_OUTSIDE_A);

    /// Swaps the A- and B-specific bits.
    ///
    /// Used when a relation was computed from the other geometry's
    /// perspective. `flip_ab` is an involution.
    #[must_use]
    pub fn flip_ab(self) -> Self {
        let mut flipped = self & (Self::TOUCH | Self::A_INSIDE_B);
        if self.contains(Self::A_OUTSIDE_B) {
            flipped |= Self::B_OUTSIDE_A;
        }
        if self.contains(Self::B_OUTSIDE_A) {
            flipped |= Self::A_OUTSIDE_B;
        }
        flipped
    }

    /// All-outside, no touch, no interior overlap.
    #[must_use]
    pub fn is_disjoint(self) -> bool {
        self == Self::DISJOINT
    }

    /// The geometries meet somewhere (boundary or interior).
    #[must_use]
    pub fn meets(self) -> bool {
        self.contains(Self::TOUCH) || self.contains(Self::A_INSIDE_B)
    }

    /// Boundaries meet but interiors do not overlap.
    #[must_use]
    pub fn is_touch(self) -> bool {
        self.contains(Self::TOUCH) && !self.contains(Self::A_INSIDE_B)
    }

    /// Equal within accuracy: touching with nothing outside on either side.
    #[must_use]
    pub fn is_equal(self) -> bool {
        self.contains(Self::TOUCH) && !self.intersects(Self::A_OUTSIDE_B | Self::B_OUTSIDE_A)
    }

    /// A meets B and no part of A lies outside B.
    #[must_use]
    pub fn a_within_b(self) -> bool {
        self.meets() && !self.contains(Self::A_OUTSIDE_B)
    }

    /// B meets A and no part of B lies outside A.
    #[must_use]
    pub fn b_within_a(self) -> bool {
        self.meets() && !self.contains(Self::B_OUTSIDE_A)
    }

    /// Folds the relation of one member of a composite into the running
    /// relation of the composite.
    ///
    /// `A_OUTSIDE_B`, `A_INSIDE_B` and `TOUCH` accumulate with OR. The other
    /// geometry lies outside the composite only if it lies outside every
    /// member, so `B_OUTSIDE_A` accumulates with AND; a plain OR would
    /// report B outside a composite even when one member contains B. Start
    /// the fold from [`Relation::fold_start`].
    ///
    /// The fold always runs with the composite as A. When the composite is
    /// the other operand, fold from its side and apply [`Relation::flip_ab`]
    /// once to the result, so the AND lands on the composite's side.
    #[must_use]
    pub fn fold_member(self, member: Self) -> Self {
        let or_bits = (self | member) & !Self::B_OUTSIDE_A;
        if self.contains(Self::B_OUTSIDE_A) && member.contains(Self::B_OUTSIDE_A) {
            or_bits | Self::B_OUTSIDE_A
        } else {
            or_bits
        }
    }

    /// Identity element of [`Relation::fold_member`].
    #[must_use]
    pub fn fold_start() -> Self {
        Self::B_OUTSIDE_A
    }
}

impl fmt::Debug for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Relation(EMPTY)");
        }
        let names: Vec<&str> = self.iter_names().map(|(name, _)| name).collect();
        write!(f, "Relation({})", names.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_swaps_outside_bits() {
        assert_eq!(Relation::A_OUTSIDE_B.flip_ab(), Relation::B_OUTSIDE_A);
        assert_eq!(Relation::B_OUTSIDE_A.flip_ab(), Relation::A_OUTSIDE_B);
        assert_eq!(Relation::TOUCH.flip_ab(), Relation::TOUCH);
        assert_eq!(Relation::A_INSIDE_B.flip_ab(), Relation::B_INSIDE_A);
        assert_eq!(
            (Relation::A_OUTSIDE_B | Relation::TOUCH).flip_ab(),
            Relation::B_OUTSIDE_A | Relation::TOUCH
        );
    }

    #[test]
    fn flip_is_an_involution_for_every_mask() {
        for bits in 0..16_u8 {
            let r = Relation::from_bits_truncate(bits);
            assert_eq!(r.flip_ab().flip_ab(), r, "mask {bits:#06b}");
        }
    }

    #[test]
    fn disjoint_is_exactly_both_outside() {
        assert!(Relation::DISJOINT.is_disjoint());
        assert!(!(Relation::DISJOINT | Relation::TOUCH).is_disjoint());
        assert!(!Relation::A_OUTSIDE_B.is_disjoint());
        assert!(!Relation::DISJOINT.meets());
    }

    #[test]
    fn equality_requires_touch_without_outside() {
        assert!(Relation::TOUCH.is_equal());
        assert!((Relation::TOUCH | Relation::A_INSIDE_B).is_equal());
        assert!(!(Relation::TOUCH | Relation::A_OUTSIDE_B).is_equal());
        assert!(!Relation::A_INSIDE_B.is_equal());
    }

    #[test]
    fn within_predicates() {
        let point_in_polygon = Relation::A_INSIDE_B | Relation::B_OUTSIDE_A;
        assert!(point_in_polygon.a_within_b());
        assert!(!point_in_polygon.b_within_a());
        assert!(point_in_polygon.flip_ab().b_within_a());
        assert!(!Relation::DISJOINT.a_within_b());
    }

    #[test]
    fn fold_ands_b_outside_a() {
        // Composite {p1, p2} against p1: one member touches, one is disjoint.
        let folded = Relation::fold_start()
            .fold_member(Relation::TOUCH)
            .fold_member(Relation::DISJOINT);
        assert_eq!(folded, Relation::TOUCH | Relation::A_OUTSIDE_B);
        assert!(folded.b_within_a());
    }

    #[test]
    fn fold_of_disjoint_members_is_disjoint() {
        let folded = Relation::fold_start()
            .fold_member(Relation::DISJOINT)
            .fold_member(Relation::DISJOINT);
        assert!(folded.is_disjoint());
    }

    #[test]
    fn debug_lists_flag_names() {
        let text = format!("{:?}", Relation::TOUCH | Relation::A_OUTSIDE_B);
        assert_eq!(text, "Relation(A_OUTSIDE_B | TOUCH)");
        assert_eq!(format!("{:?}", Relation::empty()), "Relation(EMPTY)");
    }

    #[test]
    fn fold_ands_the_other_outside_bit() {
        // B reaches outside the first member but lies inside the second.
        let left = Relation::A_OUTSIDE_B | Relation::B_OUTSIDE_A | Relation::A_INSIDE_B;
        let right = Relation::A_OUTSIDE_B | Relation::A_INSIDE_B;
        let folded = Relation::fold_start().fold_member(left).fold_member(right);
        assert_eq!(folded, Relation::A_OUTSIDE_B | Relation::A_INSIDE_B);
        assert!(folded.b_within_a());
        assert_ne!(folded, left | right);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn any_relation() -> impl Strategy<Value = Relation> {
            (0u8..16).prop_map(Relation::from_bits_truncate)
        }

        proptest! {
            #[test]
            fn flip_is_an_involution(r in any_relation()) {
                prop_assert_eq!(r.flip_ab().flip_ab(), r);
            }

            #[test]
            fn within_is_symmetric_under_flip(r in any_relation()) {
                prop_assert_eq!(r.a_within_b(), r.flip_ab().b_within_a());
                prop_assert_eq!(r.meets(), r.flip_ab().meets());
            }

            #[test]
            fn fold_start_is_identity(r in any_relation()) {
                prop_assert_eq!(Relation::fold_start().fold_member(r), r);
            }
        }
    }
}
