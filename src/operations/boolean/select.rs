use crate::relation::shape::Location;

/// The type of boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Subtract,
    Intersect,
}

/// Determines whether a piece of the receiver's linework is kept, given
/// where the piece lies relative to the other geometry.
///
/// | Piece vs other | Union | Subtract | Intersect |
/// |----------------|-------|----------|-----------|
/// | Outside        | keep  | keep     | discard   |
/// | Inside         | keep  | discard  | keep      |
/// | Boundary       | keep  | discard  | keep      |
#[allow(clippy::match_same_arms)]
#[must_use]
pub(crate) fn should_keep_piece(location: Location, op: BooleanOp) -> bool {
    match (location, op) {
        (_, BooleanOp::Union) => true,

        (Location::Outside, BooleanOp::Subtract) => true,
        (Location::Inside, BooleanOp::Subtract) => false,
        (Location::Boundary, BooleanOp::Subtract) => false,

        (Location::Outside, BooleanOp::Intersect) => false,
        (Location::Inside, BooleanOp::Intersect) => true,
        (Location::Boundary, BooleanOp::Intersect) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtract_keeps_only_outside_pieces() {
        assert!(should_keep_piece(Location::Outside, BooleanOp::Subtract));
        assert!(!should_keep_piece(Location::Inside, BooleanOp::Subtract));
        assert!(!should_keep_piece(Location::Boundary, BooleanOp::Subtract));
    }

    #[test]
    fn intersect_keeps_covered_pieces() {
        assert!(!should_keep_piece(Location::Outside, BooleanOp::Intersect));
        assert!(should_keep_piece(Location::Inside, BooleanOp::Intersect));
        assert!(should_keep_piece(Location::Boundary, BooleanOp::Intersect));
    }

    #[test]
    fn union_keeps_everything() {
        for location in [Location::Inside, Location::Boundary, Location::Outside] {
            assert!(should_keep_piece(location, BooleanOp::Union));
        }
    }
}
