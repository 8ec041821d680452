/// Client-side pagination over an already filtered (and sorted) collection.
///
/// Pages are 1-based. `total_pages` is never below 1, so an empty collection
/// is "page 1 of 1" with nothing on it. Out-of-range navigation is clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    current_page: usize,
    page_size: usize,
    total_items: usize,
}

impl Paginator {
    /// A zero page size is treated as 1
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size).max(1)
    }

    /// Updates the item count and clamps the current page into range
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        if total_items == 0 {
            self.current_page = 1;
        } else {
            self.current_page = self.current_page.clamp(1, self.total_pages());
        }
    }

    /// Moves to `page`, clamped into `[1, total_pages]`
    pub fn go_to(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages());
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    pub fn next(&mut self) {
        if self.has_next() {
            self.current_page += 1;
        }
    }

    pub fn previous(&mut self) {
        if self.has_previous() {
            self.current_page -= 1;
        }
    }

    pub fn first(&mut self) {
        self.current_page = 1;
    }

    pub fn last(&mut self) {
        self.current_page = self.total_pages();
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Items of the current page. Empty (never a panic) when the collection
    /// is shorter than the page offset.
    pub fn slice<'a, T>(&self, collection: &'a [T]) -> &'a [T] {
        let start = (self.current_page - 1).saturating_mul(self.page_size);
        if start >= collection.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(collection.len());
        &collection[start..end]
    }

    /// 1-based inclusive item range of the current page, `None` when empty
    pub fn range(&self) -> Option<(usize, usize)> {
        let start = (self.current_page - 1) * self.page_size;
        if start >= self.total_items {
            return None;
        }
        let end = (start + self.page_size).min(self.total_items);
        Some((start + 1, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginator(page_size: usize, total: usize) -> Paginator {
        let mut p = Paginator::new(page_size);
        p.set_total_items(total);
        p
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(paginator(9, 0).total_pages(), 1);
        assert_eq!(paginator(9, 1).total_pages(), 1);
        assert_eq!(paginator(9, 9).total_pages(), 1);
        assert_eq!(paginator(9, 10).total_pages(), 2);
        assert_eq!(paginator(9, 18).total_pages(), 2);
        assert_eq!(paginator(9, 19).total_pages(), 3);
    }

    #[test]
    fn test_ten_items_page_two_has_one() {
        let items: Vec<u32> = (1..=10).collect();
        let mut p = paginator(9, items.len());
        p.go_to(2);
        assert_eq!(p.slice(&items), [10]);
        assert_eq!(p.range(), Some((10, 10)));
    }

    #[test]
    fn test_set_total_items_clamps_and_is_idempotent() {
        for total in [0usize, 1, 5, 9, 10, 27, 28] {
            let mut p = paginator(9, 100);
            p.go_to(11);
            p.set_total_items(total);
            let page = p.current_page();
            assert!(page >= 1 && page <= p.total_pages());
            p.set_total_items(total);
            p.set_total_items(total);
            assert_eq!(p.current_page(), page);
        }
    }

    #[test]
    fn test_shrinking_collection_clamps_to_last_page() {
        let mut p = paginator(10, 50);
        p.go_to(5);
        p.set_total_items(21);
        assert_eq!(p.current_page(), 3);
        p.set_total_items(0);
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.range(), None);
    }

    #[test]
    fn test_go_to_clamps() {
        let mut p = paginator(9, 30);
        p.go_to(0);
        assert_eq!(p.current_page(), 1);
        p.go_to(99);
        assert_eq!(p.current_page(), 4);
    }

    #[test]
    fn test_next_previous_do_not_wrap() {
        let mut p = paginator(5, 10);
        p.previous();
        assert_eq!(p.current_page(), 1);
        p.next();
        p.next();
        p.next();
        assert_eq!(p.current_page(), 2);
        assert!(!p.has_next());
        p.first();
        assert!(!p.has_previous());
        p.last();
        assert_eq!(p.current_page(), 2);
    }

    #[test]
    fn test_slices_cover_collection_exactly() {
        for len in 0..30usize {
            for size in 1..8usize {
                let items: Vec<usize> = (0..len).collect();
                let mut p = paginator(size, len);
                let mut seen = Vec::new();
                for page in 1..=p.total_pages() {
                    p.go_to(page);
                    seen.extend_from_slice(p.slice(&items));
                }
                assert_eq!(seen, items, "len={} size={}", len, size);
            }
        }
    }

    #[test]
    fn test_slice_beyond_data_is_empty() {
        let mut p = paginator(5, 20);
        p.go_to(4);
        let short: Vec<u8> = vec![1, 2, 3];
        assert!(p.slice(&short).is_empty());
        assert_eq!(p.slice(&short), p.slice(&short));
    }

    #[test]
    fn test_zero_page_size_is_one() {
        let p = paginator(0, 3);
        assert_eq!(p.page_size(), 1);
        assert_eq!(p.total_pages(), 3);
    }
}
