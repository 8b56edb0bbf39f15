//! Property tests for listing pagination.

use enrollment_tracker::db::query::{total_pages, Listing, PageRequest, PAGE_SIZE};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_pages_partition_the_rows(rows in prop::collection::vec(any::<u16>(), 0..120)) {
        let pages = total_pages(rows.len(), PAGE_SIZE);
        let mut seen = Vec::new();
        for page in 1..=pages {
            let slice = PageRequest::new(Some(i64::from(page))).paginate(rows.clone());
            prop_assert!(!slice.data.is_empty());
            prop_assert!(slice.data.len() <= PAGE_SIZE as usize);
            prop_assert_eq!(slice.info.total, rows.len());
            prop_assert_eq!(slice.info.total_pages, pages);
            seen.extend(slice.data);
        }
        prop_assert_eq!(seen, rows);
    }

    #[test]
    fn prop_page_past_the_end_is_empty(
        len in 0usize..60,
        extra in 1i64..50,
    ) {
        let rows: Vec<usize> = (0..len).collect();
        let last = i64::from(total_pages(len, PAGE_SIZE));
        let slice = PageRequest::new(Some(last + extra)).paginate(rows);
        prop_assert!(slice.data.is_empty());
        prop_assert_eq!(slice.info.total, len);
    }

    #[test]
    fn prop_non_positive_page_reads_as_first(page in i64::MIN..=0) {
        let request = PageRequest::new(Some(page));
        prop_assert_eq!(request.page(), 1);
        prop_assert_eq!(request.offset(), 0);
    }

    #[test]
    fn prop_total_pages_is_ceiling(total in 0usize..10_000, size in 1u32..100) {
        let pages = total_pages(total, size) as usize;
        prop_assert!(pages * size as usize >= total);
        prop_assert!(pages == 0 || (pages - 1) * (size as usize) < total);
    }

    #[test]
    fn prop_all_mode_keeps_every_row(rows in prop::collection::vec(any::<u8>(), 0..80)) {
        let page = Listing::All.apply(rows.clone());
        prop_assert_eq!(page.info.total, rows.len());
        prop_assert_eq!(page.info.total_pages, u32::from(!rows.is_empty()));
        prop_assert_eq!(page.data, rows);
    }
}

#[test]
fn test_twenty_five_rows_make_three_pages() {
    let rows: Vec<u32> = (1..=25).collect();
    let third = PageRequest::new(Some(3)).paginate(rows);
    assert_eq!(third.data, vec![21, 22, 23, 24, 25]);
    assert_eq!(third.info.total_pages, 3);
    assert_eq!(third.info.page, 3);
    assert_eq!(third.info.page_size, PAGE_SIZE);
}
