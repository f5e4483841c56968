use hotel_booking_bot::bot::pagination::{page_window, PageTracker, PAGE_SIZE};
use teloxide::types::{ChatId, MessageId};

#[test]
fn test_page_size_is_ten() {
    assert_eq!(PAGE_SIZE, 10);
}

#[test]
fn test_window_math_for_25_items() {
    // 25 items -> 3 pages: 10, 10, 5
    let w = page_window(25, 1);
    assert_eq!((w.page, w.total_pages, w.offset), (1, 3, 0));

    let w = page_window(25, 3);
    assert_eq!((w.page, w.total_pages, w.offset), (3, 3, 20));
}

#[test]
fn test_out_of_range_requests_clamp() {
    // page 0 renders page 1
    let w = page_window(25, 0);
    assert_eq!(w.page, 1);

    // page 99 renders the last page
    let w = page_window(25, 99);
    assert_eq!((w.page, w.offset), (3, 20));

    let w = page_window(25, -5);
    assert_eq!(w.page, 1);
}

#[test]
fn test_zero_items_render_a_single_empty_page() {
    let w = page_window(0, 1);
    assert_eq!((w.page, w.total_pages, w.offset), (1, 1, 0));

    let w = page_window(0, 42);
    assert_eq!((w.page, w.total_pages, w.offset), (1, 1, 0));
}

#[test]
fn test_page_boundaries() {
    assert_eq!(page_window(10, 2).total_pages, 1);
    assert_eq!(page_window(11, 2).total_pages, 2);
    assert_eq!(page_window(11, 2).offset, 10);
}

#[test]
fn test_requested_page_always_within_bounds() {
    for total in [0i64, 1, 9, 10, 11, 25, 100] {
        for requested in [-3i64, 0, 1, 2, 7, 99] {
            let w = page_window(total, requested);
            assert!(w.page >= 1);
            assert!(w.page <= w.total_pages);
            assert_eq!(w.total_pages, (total + PAGE_SIZE - 1).div_euclid(PAGE_SIZE).max(1));
        }
    }
}

#[test]
fn test_tracker_take_empties_the_set() {
    let tracker = PageTracker::default();
    let chat = ChatId(42);

    tracker.set(chat, vec![MessageId(1), MessageId(2)]);
    assert_eq!(tracker.tracked_count(chat), 2);

    let taken = tracker.take(chat);
    assert_eq!(taken, vec![MessageId(1), MessageId(2)]);
    assert_eq!(tracker.tracked_count(chat), 0);
    assert!(tracker.take(chat).is_empty());
}

#[test]
fn test_tracker_last_writer_wins() {
    let tracker = PageTracker::default();
    let chat = ChatId(42);

    tracker.set(chat, vec![MessageId(1)]);
    tracker.set(chat, vec![MessageId(7), MessageId(8)]);

    assert_eq!(tracker.take(chat), vec![MessageId(7), MessageId(8)]);
}

#[test]
fn test_tracker_chats_are_independent() {
    let tracker = PageTracker::default();

    tracker.set(ChatId(1), vec![MessageId(10)]);
    tracker.set(ChatId(2), vec![MessageId(20)]);

    assert_eq!(tracker.take(ChatId(1)), vec![MessageId(10)]);
    assert_eq!(tracker.tracked_count(ChatId(2)), 1);
}
