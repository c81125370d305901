use std::hash::{Hash, Hasher};

use fnv::FnvHasher;

use crate::data::{Dir, Pos};

#[derive(Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub(crate) struct State {
    pub(crate) player_pos: Pos,
    pub(crate) boxes: Vec<Pos>,
}

impl State {
    pub(crate) fn new(player_pos: Pos, mut boxes: Vec<Pos>) -> State {
        boxes.sort(); // sort to detect equal states when we reorder boxes
        State { player_pos, boxes }
    }

    pub(crate) fn has_box(&self, pos: Pos) -> bool {
        self.boxes.binary_search(&pos).is_ok()
    }

    /// The player pushes the box at `box_pos` in `dir` and ends up where the box was.
    pub(crate) fn push(&self, box_pos: Pos, dir: Dir) -> State {
        let mut boxes = self.boxes.clone();
        let old = boxes
            .binary_search(&box_pos)
            .unwrap_or_else(|_| panic!("No box to push at {:?}", box_pos));
        boxes.remove(old);
        let new_pos = box_pos + dir;
        let new = boxes.binary_search(&new_pos).unwrap_or_else(|i| i);
        boxes.insert(new, new_pos);
        State {
            player_pos: box_pos,
            boxes,
        }
    }

    /// One player move - either a step or a push.
    pub(crate) fn after_move(&self, dir: Dir) -> State {
        let new_player_pos = self.player_pos + dir;
        if self.has_box(new_player_pos) {
            self.push(new_player_pos, dir)
        } else {
            State {
                player_pos: new_player_pos,
                boxes: self.boxes.clone(),
            }
        }
    }
}

/// Hash of a sorted box set - equal sets always have equal fingerprints.
pub(crate) fn fingerprint(boxes: &[Pos]) -> u64 {
    let mut hasher = FnvHasher::default();
    boxes.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pushing_keeps_boxes_sorted() {
        let state = State::new(
            Pos::new(2, 1),
            vec![Pos::new(3, 3), Pos::new(2, 2), Pos::new(1, 5)],
        );
        assert_eq!(
            state.boxes,
            vec![Pos::new(1, 5), Pos::new(2, 2), Pos::new(3, 3)]
        );

        let pushed = state.push(Pos::new(2, 2), Dir::Up);
        assert_eq!(pushed.player_pos, Pos::new(2, 2));
        assert_eq!(
            pushed.boxes,
            vec![Pos::new(1, 2), Pos::new(1, 5), Pos::new(3, 3)]
        );
        assert!(pushed.has_box(Pos::new(1, 2)));
        assert!(!pushed.has_box(Pos::new(2, 2)));
    }

    #[test]
    fn moving() {
        let state = State::new(Pos::new(2, 1), vec![Pos::new(2, 2)]);
        let stepped = state.after_move(Dir::Up);
        assert_eq!(stepped.player_pos, Pos::new(1, 1));
        assert_eq!(stepped.boxes, state.boxes);

        let pushed = state.after_move(Dir::Right);
        assert_eq!(pushed.player_pos, Pos::new(2, 2));
        assert_eq!(pushed.boxes, vec![Pos::new(2, 3)]);
    }

    #[test]
    fn fingerprints_ignore_order() {
        let a = State::new(Pos::new(1, 1), vec![Pos::new(4, 4), Pos::new(2, 3)]);
        let b = State::new(Pos::new(3, 1), vec![Pos::new(2, 3), Pos::new(4, 4)]);
        let c = State::new(Pos::new(1, 1), vec![Pos::new(2, 3), Pos::new(4, 5)]);
        assert_eq!(fingerprint(&a.boxes), fingerprint(&b.boxes));
        assert_ne!(fingerprint(&a.boxes), fingerprint(&c.boxes));
    }
}
