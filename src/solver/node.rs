use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::{self, Debug, Formatter};
use std::mem;

use crate::data::{Dir, Pos};
use crate::moves::Moves;
use crate::state::State;

use super::strategy::Strategy;

/// One state after a push. Never modified after it's created.
pub(crate) struct SearchNode<'a> {
    pub(crate) state: State,
    /// Box position before the push and the push direction, `None` for the root
    pub(crate) pushed: Option<(Pos, Dir)>,
    /// Player moves from the previous node, ending with the push
    pub(crate) moves: Moves,
    pub(crate) prev: Option<&'a SearchNode<'a>>,
    /// pushes
    pub(crate) depth: u16,
    /// moves
    pub(crate) cost: u32,
    pub(crate) h: u32,
}

impl<'a> SearchNode<'a> {
    pub(crate) fn root(state: State, h: u32) -> Self {
        SearchNode {
            state,
            pushed: None,
            moves: Moves::default(),
            prev: None,
            depth: 0,
            cost: 0,
            h,
        }
    }

    pub(crate) fn child(
        prev: &'a SearchNode<'a>,
        state: State,
        pushed: (Pos, Dir),
        moves: Moves,
        h: u32,
    ) -> Self {
        let cost = prev.cost + moves.move_cnt() as u32;
        SearchNode {
            state,
            pushed: Some(pushed),
            moves,
            prev: Some(prev),
            depth: prev.depth + 1,
            cost,
            h,
        }
    }

    /// All moves from the root to this node.
    pub(crate) fn path(&self) -> Moves {
        let mut nodes = Vec::new();
        let mut cur = Some(self);
        while let Some(node) = cur {
            nodes.push(node);
            cur = node.prev;
        }

        let mut moves = Moves::default();
        for node in nodes.iter().rev() {
            moves.extend(&node.moves);
        }
        moves
    }
}

impl Debug for SearchNode<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SearchNode {{ pushed: {:?}, depth: {}, cost: {}, h: {}, boxes: {:?} }}",
            self.pushed, self.depth, self.cost, self.h, self.state.boxes
        )
    }
}

struct Queued<'a> {
    key: u64,
    seq: u64,
    node: &'a SearchNode<'a>,
}

impl PartialOrd for Queued<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // intentionally reversed for BinaryHeap
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialEq for Queued<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.seq == other.seq
    }
}

impl Eq for Queued<'_> {}

/// Nodes waiting to be expanded, best first according to the current strategy.
/// Equal keys come out in insertion order.
pub(crate) struct OpenSet<'a> {
    heap: BinaryHeap<Queued<'a>>,
    strategy: Strategy,
    next_seq: u64,
}

impl<'a> OpenSet<'a> {
    pub(crate) fn new(strategy: Strategy) -> Self {
        OpenSet {
            heap: BinaryHeap::new(),
            strategy,
            next_seq: 0,
        }
    }

    pub(crate) fn push(&mut self, node: &'a SearchNode<'a>) {
        let queued = Queued {
            key: self.strategy.priority(node),
            seq: self.next_seq,
            node,
        };
        self.next_seq += 1;
        self.heap.push(queued);
    }

    pub(crate) fn pop(&mut self) -> Option<&'a SearchNode<'a>> {
        self.heap.pop().map(|queued| queued.node)
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    /// Re-keys everything already queued.
    pub(crate) fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
        let old = mem::replace(&mut self.heap, BinaryHeap::new());
        self.heap = old
            .into_iter()
            .map(|queued| Queued {
                key: strategy.priority(queued.node),
                ..queued
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use typed_arena::Arena;

    use super::*;
    use crate::moves::Move;

    fn state(boxes: Vec<Pos>) -> State {
        State::new(Pos::new(1, 1), boxes)
    }

    fn push_moves(steps: usize, dir: Dir) -> Moves {
        let mut moves: Moves = (0..steps).map(|_| Move::new(dir, false)).collect();
        moves.add(Move::new(dir, true));
        moves
    }

    #[test]
    fn path_is_root_first() {
        let arena = Arena::new();
        let root = arena.alloc(SearchNode::root(state(vec![Pos::new(2, 2)]), 2));
        let child = arena.alloc(SearchNode::child(
            root,
            state(vec![Pos::new(2, 3)]),
            (Pos::new(2, 2), Dir::Right),
            push_moves(1, Dir::Right),
            1,
        ));
        let grandchild = arena.alloc(SearchNode::child(
            child,
            state(vec![Pos::new(3, 3)]),
            (Pos::new(2, 3), Dir::Down),
            push_moves(2, Dir::Down),
            0,
        ));

        assert_eq!(grandchild.depth, 2);
        assert_eq!(grandchild.cost, 5);
        assert_eq!(grandchild.path().to_string(), "rRddD");
        assert_eq!(root.path().to_string(), "");
    }

    #[test]
    fn ties_keep_insertion_order() {
        let arena = Arena::new();
        let a = arena.alloc(SearchNode::root(state(vec![Pos::new(2, 2)]), 5));
        let b = arena.alloc(SearchNode::root(state(vec![Pos::new(2, 3)]), 1));
        let c = arena.alloc(SearchNode::root(state(vec![Pos::new(2, 4)]), 3));

        let mut open = OpenSet::new(Strategy::Breadth);
        open.push(a);
        open.push(b);
        open.push(c);
        assert_eq!(open.len(), 3);

        // all have depth 0
        assert!(std::ptr::eq(open.pop().unwrap(), a));
        assert!(std::ptr::eq(open.pop().unwrap(), b));
        assert!(std::ptr::eq(open.pop().unwrap(), c));
        assert!(open.pop().is_none());
    }

    #[test]
    fn switching_rekeys() {
        let arena = Arena::new();
        let a = arena.alloc(SearchNode::root(state(vec![Pos::new(2, 2)]), 5));
        let b = arena.alloc(SearchNode::root(state(vec![Pos::new(2, 3)]), 1));
        let c = arena.alloc(SearchNode::root(state(vec![Pos::new(2, 4)]), 3));

        let mut open = OpenSet::new(Strategy::Breadth);
        open.push(a);
        open.push(b);
        open.push(c);
        open.set_strategy(Strategy::Greedy);

        assert!(std::ptr::eq(open.pop().unwrap(), b));
        assert!(std::ptr::eq(open.pop().unwrap(), c));
        assert!(std::ptr::eq(open.pop().unwrap(), a));
    }

    #[test]
    fn priorities() {
        let arena = Arena::new();
        let root = arena.alloc(SearchNode::root(state(vec![Pos::new(2, 2)]), 4));
        let child = SearchNode::child(
            root,
            state(vec![Pos::new(2, 3)]),
            (Pos::new(2, 2), Dir::Right),
            push_moves(2, Dir::Right),
            3,
        );
        assert_eq!(Strategy::Breadth.priority(&child), 1);
        assert_eq!(Strategy::Weighted.priority(&child), 2 * 3 + 1 + 3);
        assert_eq!(Strategy::Greedy.priority(&child), 6 * 3 + 1);
    }
}
