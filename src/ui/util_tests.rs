#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_small() {
    assert_eq!(format_amount(dec!(5)), "$5.00");
}

#[test]
fn test_format_thousands() {
    assert_eq!(format_amount(dec!(1234.5)), "$1,234.50");
}

#[test]
fn test_format_millions() {
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
}

#[test]
fn test_format_negative() {
    assert_eq!(format_amount(dec!(-42.99)), "-$42.99");
}

#[test]
fn test_format_zero() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
}

#[test]
fn test_format_exact_group_boundary() {
    assert_eq!(format_amount(dec!(100)), "$100.00");
    assert_eq!(format_amount(dec!(1000)), "$1,000.00");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("latte", 10), "latte");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("latte", 5), "latte");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("grocery run", 5), "groc…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("latte", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_cursor() {
    let (mut index, mut scroll) = (0, 0);
    scroll_down(&mut index, &mut scroll, 10, 5);
    assert_eq!((index, scroll), (1, 0));
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (9, 5);
    scroll_down(&mut index, &mut scroll, 10, 5);
    assert_eq!(index, 9);
}

#[test]
fn test_scroll_down_adjusts_viewport() {
    let (mut index, mut scroll) = (4, 0);
    scroll_down(&mut index, &mut scroll, 10, 5);
    assert_eq!((index, scroll), (5, 1));
}

#[test]
fn test_scroll_up_from_top_is_noop() {
    let (mut index, mut scroll) = (0, 0);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_up_adjusts_viewport() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (2, 2));
}

#[test]
fn test_scroll_to_top_and_bottom() {
    let (mut index, mut scroll) = (7, 5);
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));

    scroll_to_bottom(&mut index, &mut scroll, 20, 5);
    assert_eq!((index, scroll), (19, 15));
}

#[test]
fn test_scroll_to_bottom_empty_list() {
    let (mut index, mut scroll) = (3, 1);
    scroll_to_bottom(&mut index, &mut scroll, 0, 5);
    assert_eq!((index, scroll), (3, 1));
}
