//! Vertical motion for the runner
//!
//! Per-tick units: velocity in pixels/tick, gravity in pixels/tick².

use super::state::Player;
use crate::consts::{GRAVITY, JUMP_IMPULSE, PLAYER_GROUND_CLAMP};

/// Apply gravity, move, then clamp to the ground
pub fn integrate(player: &mut Player) {
    player.vel_y += GRAVITY;
    player.pos.y += player.vel_y;

    if player.pos.y >= PLAYER_GROUND_CLAMP {
        player.pos.y = PLAYER_GROUND_CLAMP;
        player.vel_y = 0.0;
        player.on_ground = true;
    } else {
        player.on_ground = false;
    }

    if player.on_ground {
        player.anim_frame = player.anim_frame.wrapping_add(1);
    }
}

/// Launch upward if grounded. Returns whether the impulse was applied.
pub fn try_jump(player: &mut Player) -> bool {
    if !player.on_ground {
        return false;
    }
    player.vel_y = JUMP_IMPULSE;
    player.on_ground = false;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_resting_player_stays_grounded() {
        let mut player = Player::default();
        for _ in 0..100 {
            integrate(&mut player);
            assert!(player.on_ground);
            assert_eq!(player.pos.y, PLAYER_GROUND_CLAMP);
            assert_eq!(player.vel_y, 0.0);
        }
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let mut player = Player::default();
        assert!(try_jump(&mut player));
        assert!(!player.on_ground);
        assert_eq!(player.vel_y, JUMP_IMPULSE);

        let mut ticks = 0;
        while !player.on_ground {
            integrate(&mut player);
            ticks += 1;
            assert!(player.pos.y <= PLAYER_GROUND_CLAMP);
            assert!(ticks < 100, "player never landed");
        }

        // -16n + 0.4n(n+1) crosses zero at n = 39; allow one tick of float slop
        assert!((39..=40).contains(&ticks), "landed after {ticks} ticks");
        assert_eq!(player.vel_y, 0.0);
        assert_eq!(player.pos.y, PLAYER_GROUND_CLAMP);
    }

    #[test]
    fn test_airborne_jump_is_ignored() {
        let mut player = Player::default();
        assert!(try_jump(&mut player));
        integrate(&mut player);
        let vel = player.vel_y;

        for _ in 0..5 {
            assert!(!try_jump(&mut player));
            assert_eq!(player.vel_y, vel);
        }
    }

    #[test]
    fn test_apex_is_above_ground() {
        let mut player = Player::default();
        try_jump(&mut player);
        let mut min_y = player.pos.y;
        loop {
            integrate(&mut player);
            if player.on_ground {
                break;
            }
            min_y = min_y.min(player.pos.y);
        }
        // Peak displacement is 16*20 - 0.4*20*21 = 152 px
        assert!((PLAYER_GROUND_CLAMP - min_y - 152.0).abs() < 1.0);
    }

    proptest! {
        #[test]
        fn prop_never_below_clamp(jump_ticks in proptest::collection::vec(0u32..120, 0..20)) {
            let mut player = Player::default();
            for t in 0..120u32 {
                if jump_ticks.contains(&t) {
                    try_jump(&mut player);
                }
                let was_airborne = !player.on_ground;
                integrate(&mut player);
                prop_assert!(player.pos.y <= PLAYER_GROUND_CLAMP);
                if player.on_ground {
                    prop_assert_eq!(player.vel_y, 0.0);
                    prop_assert_eq!(player.pos.y, PLAYER_GROUND_CLAMP);
                } else {
                    prop_assert!(was_airborne);
                }
            }
        }
    }
}
