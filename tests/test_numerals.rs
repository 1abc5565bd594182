use flappy_game::numerals::*;
use flappy_game::score::ScoreTracker;

#[test]
fn digits_of_score() {
    assert_eq!(digits(0), vec![0]);
    assert_eq!(digits(7), vec![7]);
    assert_eq!(digits(105), vec![1, 0, 5]);
}

#[test]
fn single_digit_is_centred() {
    // 432 / 2 - 24 / 2
    let placed = layout(3, 432, 24, 50);
    assert_eq!(placed, vec![PlacedDigit { digit: 3, x: 204, y: 50 }]);
}

#[test]
fn digits_are_laid_out_left_to_right() {
    let placed = layout(42, 432, 24, 50);
    assert_eq!(
        placed,
        vec![
            PlacedDigit { digit: 4, x: 192, y: 50 },
            PlacedDigit { digit: 2, x: 216, y: 50 },
        ]
    );
}

#[test]
fn odd_total_width_rounds_left_edge() {
    let placed = layout(123, 100, 5, 0);
    // total 15: 50 - 7
    assert_eq!(placed[0].x, 43);
    assert_eq!(placed[2].x, 53);
}

// ── ScoreTracker ──────────────────────────────────────────────────────────────

#[test]
fn tracker_starts_at_zero_and_accumulates() {
    let mut score = ScoreTracker::new();
    assert_eq!(score.current_score(), 0);
    score.record(1);
    score.record(0);
    score.record(2);
    assert_eq!(score.current_score(), 3);
}

#[test]
fn tracker_saturates() {
    let mut score = ScoreTracker::new();
    score.record(u32::MAX);
    score.record(1);
    assert_eq!(score.current_score(), u32::MAX);
}
