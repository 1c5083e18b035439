/// Ring buffer of past head positions.
///
/// The live snake is the last `length` entries written, walking backward
/// from `head_slot`. Capacity is the grid size, so nothing is ever
/// reallocated and the oldest slots are simply overwritten.
#[derive(Clone, Debug)]
pub struct BodyTracker {
    slots: Vec<usize>,
    head_slot: usize,
    length: usize,
}

impl BodyTracker {
    pub fn new(capacity: usize, start: usize) -> Self {
        assert!(capacity > 0, "body tracker needs at least one slot");

        let mut slots = vec![0; capacity];
        slots[0] = start;
        BodyTracker { slots, head_slot: 0, length: 1 }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.length
    }

    /// Records a new head position. The length is left alone, so the
    /// oldest segment silently drops off unless `grow` follows.
    pub fn advance(&mut self, next_index: usize) {
        self.head_slot = (self.head_slot + 1) % self.capacity();
        self.slots[self.head_slot] = next_index;
    }

    pub fn grow(&mut self) {
        if self.length < self.capacity() {
            self.length += 1;
        }
    }

    pub fn head_index(&self) -> usize {
        self.slots[self.head_slot]
    }

    pub fn tail_index(&self) -> usize {
        self.slots[self.slot_behind_head(self.length - 1)]
    }

    /// Live segments, head first.
    pub fn segments(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.length).map(move |offset| self.slots[self.slot_behind_head(offset)])
    }

    fn slot_behind_head(&self, offset: usize) -> usize {
        let cap = self.capacity();
        (self.head_slot + cap - offset % cap) % cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_a_single_segment() {
        let body = BodyTracker::new(10, 4);

        assert_eq!(body.len(), 1);
        assert_eq!(body.head_index(), 4);
        assert_eq!(body.tail_index(), 4);
        assert_eq!(body.segments().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn advance_keeps_length() {
        let mut body = BodyTracker::new(10, 4);
        body.advance(5);
        body.grow();
        body.advance(6);

        assert_eq!(body.len(), 2);
        assert_eq!(body.head_index(), 6);
        assert_eq!(body.tail_index(), 5);
        assert_eq!(body.segments().collect::<Vec<_>>(), vec![6, 5]);
    }

    #[test]
    fn grow_keeps_the_old_tail() {
        let mut body = BodyTracker::new(10, 0);
        body.advance(1);
        body.grow();

        let tail = body.tail_index();
        body.advance(2);
        body.grow();

        assert_eq!(body.len(), 3);
        assert_eq!(body.tail_index(), tail);
    }

    #[test]
    fn wraps_around_the_ring() {
        let mut body = BodyTracker::new(4, 100);
        body.advance(101);
        body.grow();
        body.advance(102);
        body.grow();

        // Eight more moves without growing: the write slot laps the ring twice
        for next in 103..111 {
            body.advance(next);
        }

        assert_eq!(body.len(), 3);
        assert_eq!(body.head_index(), 110);
        assert_eq!(body.tail_index(), 108);
        assert_eq!(body.segments().collect::<Vec<_>>(), vec![110, 109, 108]);
    }

    #[test]
    fn length_is_capped_by_capacity() {
        let mut body = BodyTracker::new(2, 0);
        body.advance(1);
        body.grow();
        body.grow();

        assert_eq!(body.len(), 2);
        assert_eq!(body.tail_index(), 0);
    }
}
