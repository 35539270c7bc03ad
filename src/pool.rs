/// Doubly linked list of the labels which still have unplaced layers,
/// ordered from the largest label (the head) downwards.
///
/// Removal and restoration are constant-time "dancing links"
/// operations: a removed label keeps its own links, so it may be put
/// back as long as restorations happen in the reverse order of
/// removals, which is the case in a backtracking search.  Labels are
/// dense indices `0..size`.
#[derive(Clone, Debug)]
pub(crate) struct LabelPool {
    next: Vec<Option<usize>>,
    prev: Vec<Option<usize>>,
    head: Option<usize>,
}

impl LabelPool {
    pub(crate) fn new(size: usize) -> Self {
        let next = (0..size).map(|ndx| ndx.checked_sub(1)).collect();
        let prev = (0..size).map(|ndx| if ndx + 1 < size { Some(ndx + 1) } else { None }).collect();
        let head = size.checked_sub(1);

        LabelPool { next, prev, head }
    }

    #[inline]
    pub(crate) fn head(&self) -> Option<usize> {
        self.head
    }

    /// The next smaller label in the pool, after `ndx`.  Valid for
    /// labels currently in the pool.
    #[inline]
    pub(crate) fn next(&self, ndx: usize) -> Option<usize> {
        self.next[ndx]
    }

    pub(crate) fn remove(&mut self, ndx: usize) {
        let (next, prev) = (self.next[ndx], self.prev[ndx]);

        match prev {
            Some(prev) => self.next[prev] = next,
            None => self.head = next,
        }

        if let Some(next) = next {
            self.prev[next] = prev;
        }
    }

    pub(crate) fn restore(&mut self, ndx: usize) {
        let (next, prev) = (self.next[ndx], self.prev[ndx]);

        match prev {
            Some(prev) => self.next[prev] = Some(ndx),
            None => self.head = Some(ndx),
        }

        if let Some(next) = next {
            self.prev[next] = Some(ndx);
        }
    }

    #[cfg(test)]
    fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.head, move |&ndx| self.next[ndx])
    }
}
