//! Scenario: card escalation and opponent point bookkeeping.
//!
//! # Invariants under test
//!
//! 1. Yellow on yellow → Red and exactly +1 for the opponent, once per transition.
//! 2. Red from None or Yellow → exactly +1 for the opponent.
//! 3. Black never changes either score.
//! 4. Strict policy: downgrades out of Red/Black are rejected no-ops; a yellow
//!    can still be cleared back to None.
//! 5. Overwrite policy: unguarded overwrite, Red re-entry awards again.

use fr_bout::*;

fn bout_with(policy: CardPolicy) -> BoutController {
    BoutController::new(BoutConfig {
        card_policy: policy,
        ..BoutConfig::default()
    })
    .unwrap()
}

#[test]
fn yellow_on_yellow_awards_exactly_once() {
    let mut bout = bout_with(CardPolicy::Strict);
    bout.card_right(Card::Yellow);
    let out = bout.card_right(Card::Yellow);
    assert_eq!(out.card, Card::Red);
    assert_eq!(bout.left_score(), 1);
    assert_eq!(bout.right_score(), 0);

    // Red is not yellow: a further yellow is a downgrade under Strict.
    let again = bout.card_right(Card::Yellow);
    assert!(!again.accepted);
    assert_eq!(bout.left_score(), 1);
}

#[test]
fn red_from_none_or_yellow_awards_one() {
    for start in [Card::None, Card::Yellow] {
        let mut bout = bout_with(CardPolicy::Strict);
        if start != Card::None {
            bout.card_left(start);
        }
        let before = bout.right_score();
        bout.card_left(Card::Red);
        assert_eq!(bout.right_score(), before + 1, "from {start:?}");
        assert_eq!(bout.card_of(Side::Left), Card::Red);
    }
}

#[test]
fn repeated_red_awards_each_time() {
    let mut bout = bout_with(CardPolicy::Strict);
    bout.card_left(Card::Red);
    bout.card_left(Card::Red);
    assert_eq!(bout.right_score(), 2);
}

#[test]
fn black_never_changes_scores() {
    for start in [Card::None, Card::Yellow, Card::Red] {
        let mut bout = bout_with(CardPolicy::Strict);
        bout.touch_left();
        bout.touch_right();
        bout.card_left(start);
        let (l, r) = (bout.left_score(), bout.right_score());

        bout.card_left(Card::Black);
        assert_eq!(bout.card_of(Side::Left), Card::Black);
        assert_eq!((bout.left_score(), bout.right_score()), (l, r), "from {start:?}");
    }
}

#[test]
fn strict_rejects_every_downgrade_from_black() {
    let mut bout = bout_with(CardPolicy::Strict);
    bout.card_left(Card::Black);
    for c in [Card::None, Card::Yellow, Card::Red] {
        let out = bout.card_left(c);
        assert!(!out.accepted);
        assert_eq!(bout.card_of(Side::Left), Card::Black);
    }
    assert_eq!(bout.right_score(), 0);
}

#[test]
fn strict_accepts_yellow_back_to_none() {
    let mut bout = bout_with(CardPolicy::Strict);
    let display = RecordingListener::new();
    bout.subscribe(display.clone());

    bout.card_left(Card::Yellow);
    let out = bout.card_left(Card::None);
    assert!(out.accepted);
    assert_eq!(bout.card_of(Side::Left), Card::None);
    assert_eq!(display.last_card(Side::Left), Some(Card::None));
    assert_eq!((bout.left_score(), bout.right_score()), (0, 0));

    // A fresh yellow after clearing is a first yellow again.
    bout.card_left(Card::Yellow);
    assert_eq!(bout.card_of(Side::Left), Card::Yellow);
    assert_eq!(bout.right_score(), 0);
}

#[test]
fn strict_rejects_downgrade_from_red() {
    let mut bout = bout_with(CardPolicy::Strict);
    bout.card_left(Card::Red);
    for c in [Card::None, Card::Yellow] {
        assert!(!bout.card_left(c).accepted);
        assert_eq!(bout.card_of(Side::Left), Card::Red);
    }
    assert_eq!(bout.right_score(), 1);
}

#[test]
fn overwrite_reproduces_unguarded_assignment() {
    let mut bout = bout_with(CardPolicy::Overwrite);
    bout.card_left(Card::Black);
    let out = bout.card_left(Card::Red);
    assert!(out.accepted);
    assert_eq!(bout.card_of(Side::Left), Card::Red);
    assert_eq!(bout.right_score(), 1);

    bout.card_left(Card::None);
    assert_eq!(bout.card_of(Side::Left), Card::None);
}

#[test]
fn cards_do_not_touch_event_log_by_default() {
    let mut bout = bout_with(CardPolicy::Strict);
    bout.card_left(Card::Yellow);
    bout.card_left(Card::Yellow);
    bout.card_right(Card::Red);
    bout.card_right(Card::Black);
    assert_eq!(bout.event_log().len(), 0);
    assert_eq!((bout.left_score(), bout.right_score()), (1, 1));
}
