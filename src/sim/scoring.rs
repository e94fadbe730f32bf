//! Reward and penalty rules for contacts

use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::items::ItemKind;
use super::state::RoundState;

/// Effect of one contact on the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactOutcome {
    GiftScored { points: u64 },
    LifeLost { lives_left: u32 },
}

/// Apply a contact using the difficulty in effect at contact time.
///
/// Lives saturate at zero; the caller ends the round once they run out.
pub fn apply_contact(state: &mut RoundState, kind: ItemKind, difficulty: &Difficulty) -> ContactOutcome {
    match kind {
        ItemKind::Gift => {
            let points = difficulty.gift_reward();
            state.score = state.score.saturating_add(points);
            ContactOutcome::GiftScored { points }
        }
        ItemKind::Hazard => {
            state.lives = state.lives.saturating_sub(1);
            ContactOutcome::LifeLost {
                lives_left: state.lives,
            }
        }
    }
}

pub fn is_out_of_lives(state: &RoundState) -> bool {
    state.lives == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gift_base_reward() {
        let mut state = RoundState::fresh(3, 60.0);
        let outcome = apply_contact(&mut state, ItemKind::Gift, &Difficulty::at(0.0));
        assert_eq!(outcome, ContactOutcome::GiftScored { points: 10 });
        assert_eq!(state.score, 10);
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_gift_bonus_at_contact_time() {
        let mut state = RoundState::fresh(3, 60.0);
        apply_contact(&mut state, ItemKind::Gift, &Difficulty::at(25.0));
        assert_eq!(state.score, 14);
        apply_contact(&mut state, ItemKind::Gift, &Difficulty::at(41.0));
        assert_eq!(state.score, 14 + 18);
    }

    #[test]
    fn test_hazard_costs_life() {
        let mut state = RoundState::fresh(3, 60.0);
        state.score = 50;
        let outcome = apply_contact(&mut state, ItemKind::Hazard, &Difficulty::at(10.0));
        assert_eq!(outcome, ContactOutcome::LifeLost { lives_left: 2 });
        assert_eq!(state.score, 50);
        assert!(!is_out_of_lives(&state));
    }

    #[test]
    fn test_lives_saturate() {
        let mut state = RoundState::fresh(1, 60.0);
        apply_contact(&mut state, ItemKind::Hazard, &Difficulty::at(0.0));
        assert!(is_out_of_lives(&state));
        apply_contact(&mut state, ItemKind::Hazard, &Difficulty::at(0.0));
        assert_eq!(state.lives, 0);
    }
}
