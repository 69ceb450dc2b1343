use std::ops::Range;

/// Number of pages needed for `len` items; never less than one so an empty
/// list still renders "page 1 of 1".
pub fn total_pages(len: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    len.div_ceil(page_size).max(1)
}

/// Page numbers for a windowed pager: at most `window` consecutive pages,
/// centred on `current` and slid inwards near either end.
pub fn page_window(current: usize, total: usize, window: usize) -> Vec<usize> {
    let total = total.max(1);
    let window = window.max(1);
    if total <= window {
        return (1..=total).collect();
    }

    let current = current.clamp(1, total);
    let before = (window - 1) / 2;
    let first = current.saturating_sub(before).clamp(1, total - window + 1);
    (first..first + window).collect()
}

/// 1-based inclusive bounds of the visible items, for "showing X-Y of N".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpan {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self, len: usize) -> usize {
        total_pages(len, self.page_size)
    }

    /// Index range of the current page within a sequence of `len` items.
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(len);
        let end = (start + self.page_size).min(len);
        start..end
    }

    pub fn span(&self, len: usize) -> PageSpan {
        let range = self.range(len);
        if range.is_empty() {
            return PageSpan { first: 0, last: 0, total: len };
        }
        PageSpan {
            first: range.start + 1,
            last: range.end,
            total: len,
        }
    }

    pub fn go_to(&mut self, page: usize, len: usize) {
        self.page = page.clamp(1, self.total_pages(len));
    }

    pub fn next(&mut self, len: usize) {
        self.go_to(self.page + 1, len);
    }

    pub fn prev(&mut self, len: usize) {
        self.go_to(self.page.saturating_sub(1), len);
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Pulls the current page back into range after the sequence shrank.
    pub fn clamp(&mut self, len: usize) {
        self.go_to(self.page, len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_has_floor_of_one() {
        assert_eq!(total_pages(0, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(11, 5), 3);
    }

    #[test]
    fn six_items_in_pages_of_five() {
        let mut pager = Pager::new(5);
        assert_eq!(pager.range(6), 0..5);
        pager.next(6);
        assert_eq!(pager.page(), 2);
        assert_eq!(pager.range(6), 5..6);
        pager.next(6);
        assert_eq!(pager.page(), 2);
    }

    #[test]
    fn go_to_clamps_both_ends() {
        let mut pager = Pager::new(10);
        pager.go_to(0, 35);
        assert_eq!(pager.page(), 1);
        pager.go_to(99, 35);
        assert_eq!(pager.page(), 4);
        pager.prev(35);
        assert_eq!(pager.page(), 3);
    }

    #[test]
    fn clamp_after_shrink() {
        let mut pager = Pager::new(5);
        pager.go_to(3, 15);
        pager.clamp(6);
        assert_eq!(pager.page(), 2);
        pager.clamp(0);
        assert_eq!(pager.page(), 1);
        assert_eq!(pager.range(0), 0..0);
    }

    #[test]
    fn span_reports_one_based_bounds() {
        let mut pager = Pager::new(10);
        pager.go_to(2, 25);
        assert_eq!(pager.span(25), PageSpan { first: 11, last: 20, total: 25 });
        assert_eq!(Pager::new(10).span(0), PageSpan { first: 0, last: 0, total: 0 });
    }

    #[test]
    fn window_of_five() {
        assert_eq!(page_window(1, 3, 5), vec![1, 2, 3]);
        assert_eq!(page_window(1, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(3, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(4, 10, 5), vec![2, 3, 4, 5, 6]);
        assert_eq!(page_window(8, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(10, 10, 5), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn window_handles_degenerate_inputs() {
        assert_eq!(page_window(0, 0, 5), vec![1]);
        assert_eq!(page_window(50, 10, 4), vec![7, 8, 9, 10]);
        assert_eq!(page_window(5, 10, 1), vec![5]);
    }
}
