//! Scan-eligible list (SEList): a deque threaded through a per-node `next` array.
//!
//! Each slot doubles as membership state, so "is `v` queued?" costs O(1) and no
//! per-node allocation happens while the solver runs:
//!
//! | slot value            | meaning                                        |
//! |-----------------------|------------------------------------------------|
//! | `UNSEEN` (-1)         | never queued, unless the node is the tail      |
//! | `>= 0`                | queued, value is the next node                 |
//! | `UNSEEN` and tail     | queued, last in line                           |
//! | `WAS_IN_DEQUE` (-7)   | popped at least once and not queued right now  |
//!
//! The tail's slot reuses `UNSEEN` as its end marker, which is why the tail index
//! takes part in every membership query.

/// Slot value for nodes never queued; also the end-of-list marker and "no node".
pub const UNSEEN: i32 = -1;
/// Slot value for nodes popped at least once.
pub const WAS_IN_DEQUE: i32 = -7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    Unseen,
    Queued,
    Dequeued,
}

/// Borrowed view over a caller's `next` buffer, sized to the node count.
pub struct ScanList<'a> {
    next: &'a mut [i32],
    head: i32,
    tail: i32,
}

impl<'a> ScanList<'a> {
    /// Mark every node unseen and start empty.
    pub fn reset(next: &'a mut [i32]) -> Self {
        next.fill(UNSEEN);
        Self { next, head: UNSEEN, tail: UNSEEN }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool { self.head == UNSEEN }

    #[inline(always)]
    pub fn state(&self, i: usize) -> SlotState {
        match self.next[i] {
            WAS_IN_DEQUE => SlotState::Dequeued,
            UNSEEN if self.tail != i as i32 => SlotState::Unseen,
            _ => SlotState::Queued,
        }
    }

    #[inline(always)] pub fn is_new(&self, i: usize) -> bool { self.state(i) == SlotState::Unseen }
    #[inline(always)] pub fn was_dequeued(&self, i: usize) -> bool { self.next[i] == WAS_IN_DEQUE }

    /// Caller guarantees `i` is not currently queued.
    #[inline(always)]
    pub fn push_front(&mut self, i: usize) {
        debug_assert_ne!(self.state(i), SlotState::Queued);
        self.next[i] = self.head;
        self.head = i as i32;
        if self.tail == UNSEEN { self.tail = i as i32; }
    }

    /// Caller guarantees `i` is not currently queued.
    #[inline(always)]
    pub fn push_back(&mut self, i: usize) {
        debug_assert_ne!(self.state(i), SlotState::Queued);
        self.next[i] = UNSEEN;
        if self.tail == UNSEEN {
            self.head = i as i32;
        } else {
            self.next[self.tail as usize] = i as i32;
        }
        self.tail = i as i32;
    }

    /// Pop the head and mark it dequeued.
    #[inline(always)]
    pub fn pop_front(&mut self) -> Option<usize> {
        if self.head == UNSEEN { return None; }
        let u = self.head as usize;
        self.head = self.next[u];
        self.next[u] = WAS_IN_DEQUE;
        if self.tail == u as i32 { self.tail = UNSEEN; }
        Some(u)
    }

    /// Reinsert a node whose label just improved: popped nodes go to the front,
    /// first-time discoveries to the back, queued nodes stay where they are.
    /// Returns the state the node was in.
    #[inline(always)]
    pub fn requeue(&mut self, v: usize) -> SlotState {
        let state = self.state(v);
        match state {
            SlotState::Dequeued => self.push_front(v),
            SlotState::Unseen => self.push_back(v),
            SlotState::Queued => {}
        }
        state
    }
}
