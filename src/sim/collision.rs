//! Axis-aligned collision detection
//!
//! The player's hitbox is shrunk inside its sprite so near misses that look
//! clean on screen don't end the run.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, Player};
use crate::consts::*;

/// Axis-aligned rectangle in playfield pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Shrink each edge inward
    pub fn inset(&self, insets: Insets) -> Self {
        Self {
            min: self.min + Vec2::new(insets.left, insets.top),
            max: self.max - Vec2::new(insets.right, insets.bottom),
        }
    }

    /// Strict overlap; touching edges don't count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Per-edge shrink amounts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

pub const PLAYER_HITBOX_INSETS: Insets = Insets {
    left: HITBOX_INSET_LEFT,
    right: HITBOX_INSET_RIGHT,
    top: HITBOX_INSET_TOP,
    bottom: HITBOX_INSET_BOTTOM,
};

/// The forgiving hitbox used for obstacle tests
pub fn player_hitbox(player: &Player) -> Rect {
    player.bounds().inset(PLAYER_HITBOX_INSETS)
}

/// Does the player touch this obstacle?
pub fn player_hits(player: &Player, obstacle: &Obstacle) -> bool {
    player_hitbox(player).overlaps(&obstacle.bounds())
}

/// First obstacle overlapping the player, front to back
pub fn first_collision<'a>(player: &Player, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    let hitbox = player_hitbox(player);
    obstacles.iter().find(|o| hitbox.overlaps(&o.bounds()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ObstacleKind;

    fn obstacle_at(x: f32, kind: ObstacleKind) -> Obstacle {
        let mut o = Obstacle::spawn(1, kind);
        o.pos.x = x;
        o
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        // Touching edges only
        let c = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(5.0, 5.0));
        assert!(!a.overlaps(&c));
        let d = Rect::new(Vec2::new(0.0, 10.0), Vec2::new(5.0, 5.0));
        assert!(!a.overlaps(&d));
    }

    #[test]
    fn test_hitbox_is_inset() {
        let player = Player::default();
        let full = player.bounds();
        let hitbox = player_hitbox(&player);
        assert_eq!(hitbox.left(), full.left() + HITBOX_INSET_LEFT);
        assert_eq!(hitbox.right(), full.right() - HITBOX_INSET_RIGHT);
        assert_eq!(hitbox.top(), full.top() + HITBOX_INSET_TOP);
        assert_eq!(hitbox.bottom(), full.bottom() - HITBOX_INSET_BOTTOM);
    }

    #[test]
    fn test_overlap_then_shift_past_right_edge() {
        let player = Player::default();
        let hitbox = player_hitbox(&player);

        // Obstacle's left edge 1px inside the hitbox's right edge
        let o = obstacle_at(hitbox.right() - 1.0, ObstacleKind::SmallCactus);
        assert!(player_hits(&player, &o));

        // Left edge exactly on the hitbox's right edge, then 1px beyond
        let o = obstacle_at(hitbox.right(), ObstacleKind::SmallCactus);
        assert!(!player_hits(&player, &o));
        let o = obstacle_at(hitbox.right() + 1.0, ObstacleKind::SmallCactus);
        assert!(!player_hits(&player, &o));
    }

    #[test]
    fn test_overlap_then_shift_past_left_edge() {
        let player = Player::default();
        let hitbox = player_hitbox(&player);
        let width = ObstacleKind::Rock.size().x;

        let o = obstacle_at(hitbox.left() - width + 1.0, ObstacleKind::Rock);
        assert!(player_hits(&player, &o));

        let o = obstacle_at(hitbox.left() - width - 1.0, ObstacleKind::Rock);
        assert!(!player_hits(&player, &o));
    }

    #[test]
    fn test_sprite_overlap_inside_inset_is_forgiven() {
        let player = Player::default();
        // Overlaps the full sprite by 2px, but not the inset hitbox
        let o = obstacle_at(player.bounds().right() - 2.0, ObstacleKind::Spikes);
        assert!(player.bounds().overlaps(&o.bounds()));
        assert!(!player_hits(&player, &o));
    }

    #[test]
    fn test_airborne_player_clears_low_obstacle() {
        let mut player = Player::default();
        let o = obstacle_at(player.pos.x, ObstacleKind::Log);
        assert!(player_hits(&player, &o));

        // Lift the player so its hitbox bottom sits 1px above the log
        let lift = player_hitbox(&player).bottom() - o.bounds().top() + 1.0;
        player.pos.y -= lift;
        assert!(!player_hits(&player, &o));
    }

    #[test]
    fn test_first_collision_picks_overlapping() {
        let player = Player::default();
        let obstacles = vec![
            obstacle_at(600.0, ObstacleKind::Rock),
            obstacle_at(player.pos.x, ObstacleKind::TallCactus),
            obstacle_at(300.0, ObstacleKind::Log),
        ];
        let hit = first_collision(&player, &obstacles).map(|o| o.kind);
        assert_eq!(hit, Some(ObstacleKind::TallCactus));
        assert!(first_collision(&player, &obstacles[..1]).is_none());
    }
}
