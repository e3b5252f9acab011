use crate::data::Pos;

/// One configuration of the movable entities - the player plus every box.
///
/// Equality and hashing depend on the player position and the *set* of boxes,
/// never on the order boxes were discovered in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State {
    pub(crate) player_pos: Pos,
    pub(crate) boxes: Vec<Pos>,
}

impl State {
    pub(crate) fn new(player_pos: Pos, mut boxes: Vec<Pos>) -> State {
        // sort to detect equal states when we reorder boxes
        boxes.sort_unstable();
        State { player_pos, boxes }
    }

    pub fn player_pos(&self) -> Pos {
        self.player_pos
    }

    pub fn boxes(&self) -> &[Pos] {
        &self.boxes
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use super::*;

    fn hash(state: &State) -> u64 {
        let mut hasher = DefaultHasher::new();
        state.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn box_order_does_not_matter() {
        let a = State::new(
            Pos::new(1, 1),
            vec![Pos::new(2, 3), Pos::new(4, 5), Pos::new(1, 2)],
        );
        let b = State::new(
            Pos::new(1, 1),
            vec![Pos::new(4, 5), Pos::new(1, 2), Pos::new(2, 3)],
        );
        assert_eq!(a, b);
        assert_eq!(hash(&a), hash(&b));
    }

    #[test]
    fn different_states_differ() {
        let a = State::new(Pos::new(1, 1), vec![Pos::new(2, 3), Pos::new(4, 5)]);
        let player_moved = State::new(Pos::new(1, 2), vec![Pos::new(2, 3), Pos::new(4, 5)]);
        let box_moved = State::new(Pos::new(1, 1), vec![Pos::new(2, 4), Pos::new(4, 5)]);
        assert_ne!(a, player_moved);
        assert_ne!(a, box_moved);
    }
}
