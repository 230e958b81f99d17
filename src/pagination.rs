//! Page-number windows for rendering pagination controls.

use serde::Serialize;

/// Builds the list of page links to show, using `None` for elided ranges.
///
/// The window keeps `edge` pages at both ends and `around` pages on each side
/// of `current_page`.
fn page_window(
    total_pages: usize,
    current_page: usize,
    edge: usize,
    around: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;
    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(around));
    let mid_end = current_page
        .saturating_add(around + 1)
        .min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Page of items plus everything a template needs to draw page controls.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    /// One-based index of the first item on this page, `0` when empty.
    pub first_item: usize,
    /// One-based index of the last item on this page.
    pub last_item: usize,
    pub prev_page: Option<usize>,
    pub next_page: Option<usize>,
}

impl<T> Paginated<T> {
    pub fn new(
        items: Vec<T>,
        current_page: usize,
        total_pages: usize,
        total_count: usize,
        page_size: usize,
    ) -> Self {
        let current_page = current_page.max(1);
        let pages = page_window(total_pages, current_page, 2, 2);

        let first_item = if total_count == 0 {
            0
        } else {
            (current_page - 1).saturating_mul(page_size).saturating_add(1)
        };
        let last_item = current_page.saturating_mul(page_size).min(total_count);

        Self {
            items,
            pages,
            page: current_page,
            total_pages,
            total_count,
            first_item,
            last_item,
            prev_page: (current_page > 1).then(|| current_page - 1),
            next_page: (current_page < total_pages).then(|| current_page + 1),
        }
    }

    /// Page controls are only useful with more than one page.
    pub fn show_controls(&self) -> bool {
        self.total_pages > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_empty_without_pages() {
        assert!(page_window(0, 1, 2, 2).is_empty());
    }

    #[test]
    fn small_totals_list_every_page() {
        assert_eq!(
            page_window(4, 2, 2, 2),
            vec![Some(1), Some(2), Some(3), Some(4)]
        );
    }

    #[test]
    fn long_ranges_are_elided_around_current() {
        assert_eq!(
            page_window(20, 10, 2, 2),
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                None,
                Some(19),
                Some(20)
            ]
        );
    }

    #[test]
    fn item_range_covers_partial_last_page() {
        let page: Paginated<u8> = Paginated::new(vec![0; 5], 3, 3, 25, 10);
        assert_eq!(page.first_item, 21);
        assert_eq!(page.last_item, 25);
        assert_eq!(page.prev_page, Some(2));
        assert_eq!(page.next_page, None);
        assert!(page.show_controls());
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        let page: Paginated<u8> = Paginated::new(vec![], usize::MAX, 3, 25, 10);
        assert_eq!(page.first_item, usize::MAX);
        assert_eq!(page.last_item, 25);
        assert_eq!(page.prev_page, Some(usize::MAX - 1));
        assert_eq!(page.next_page, None);
        assert_eq!(page.pages, vec![Some(1), Some(2), None]);
    }

    #[test]
    fn empty_result_has_no_controls() {
        let page: Paginated<u8> = Paginated::new(vec![], 1, 0, 0, 10);
        assert_eq!(page.first_item, 0);
        assert_eq!(page.last_item, 0);
        assert!(!page.show_controls());
    }
}
