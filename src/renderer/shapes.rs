//! Shape generation for the playfield
//!
//! Everything is in playfield pixels (origin top-left, y down);
//! `RenderState` maps to NDC at upload time.

use glam::Vec2;

use super::vertex::{Palette, Vertex};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, GROUND_Y};
use crate::sim::{ObstacleKind, ObstacleView, PlayerView, Rect, Snapshot};

/// Spacing of the scrolling ground pebbles
const PEBBLE_SPACING: f32 = 37.0;
/// Ticks per leg swap in the run cycle
const RUN_CYCLE_TICKS: u32 = 6;

/// Two triangles covering an axis-aligned rectangle
pub fn rect(out: &mut Vec<Vertex>, min: Vec2, max: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(min.x, min.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(min.x, max.y, color));

    out.push(Vertex::new(min.x, max.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(max.x, max.y, color));
}

/// Single triangle
pub fn triangle(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));
}

fn tint(color: [f32; 4], by: [f32; 4]) -> [f32; 4] {
    [
        color[0] * by[0],
        color[1] * by[1],
        color[2] * by[2],
        color[3] * by[3],
    ]
}

/// Sky, ground strip and scrolling pebbles
pub fn backdrop(out: &mut Vec<Vertex>, scroll: f32, palette: &Palette) {
    rect(out, Vec2::ZERO, Vec2::new(CANVAS_WIDTH, GROUND_Y), palette.sky);
    rect(
        out,
        Vec2::new(0.0, GROUND_Y),
        Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        palette.ground,
    );
    rect(
        out,
        Vec2::new(0.0, GROUND_Y),
        Vec2::new(CANVAS_WIDTH, GROUND_Y + 2.0),
        palette.ground_line,
    );

    let offset = scroll.rem_euclid(PEBBLE_SPACING);
    let mut x = -offset;
    let mut row = 0;
    while x < CANVAS_WIDTH {
        let y = GROUND_Y + 8.0 + (row % 3) as f32 * 9.0;
        rect(
            out,
            Vec2::new(x, y),
            Vec2::new(x + 4.0, y + 2.0),
            palette.ground_line,
        );
        x += PEBBLE_SPACING;
        row += 1;
    }
}

/// Blocky runner: body, head, eye and alternating legs
pub fn player(out: &mut Vec<Vertex>, view: &PlayerView, palette: &Palette) {
    let min = view.pos;
    let size = view.size;
    let leg_h = size.y * 0.2;
    let body_max = Vec2::new(min.x + size.x * 0.75, min.y + size.y - leg_h);

    // Body
    rect(
        out,
        Vec2::new(min.x, min.y + size.y * 0.3),
        body_max,
        palette.player,
    );
    // Head, pushed forward
    let head_min = Vec2::new(min.x + size.x * 0.45, min.y);
    let head_max = Vec2::new(min.x + size.x, min.y + size.y * 0.35);
    rect(out, head_min, head_max, palette.player);
    rect(
        out,
        Vec2::new(head_max.x - 10.0, head_min.y + 4.0),
        Vec2::new(head_max.x - 6.0, head_min.y + 8.0),
        palette.player_eye,
    );

    // Legs: both down while airborne, alternating while running
    let leg_top = body_max.y;
    let full = min.y + size.y - leg_top;
    let back_leg = Vec2::new(min.x + size.x * 0.15, leg_top);
    let front_leg = Vec2::new(min.x + size.x * 0.5, leg_top);
    let (back_len, front_len) = if !view.on_ground {
        (full, full)
    } else if (view.anim_frame / RUN_CYCLE_TICKS) % 2 == 0 {
        (full, full * 0.5)
    } else {
        (full * 0.5, full)
    };
    rect(
        out,
        back_leg,
        back_leg + Vec2::new(6.0, back_len),
        palette.player,
    );
    rect(
        out,
        front_leg,
        front_leg + Vec2::new(6.0, front_len),
        palette.player,
    );
}

/// One obstacle, shaped by kind but always filling its bounds' footprint
pub fn obstacle(out: &mut Vec<Vertex>, view: &ObstacleView, palette: &Palette) {
    let color = palette.obstacle(view.kind);
    let Rect { min, max } = view.bounds;
    let size = view.bounds.size();

    match view.kind {
        ObstacleKind::SmallCactus | ObstacleKind::TallCactus => cactus(out, min, max, color),
        ObstacleKind::CactusCluster => {
            let mid = min.x + size.x * 0.5;
            cactus(out, min, Vec2::new(mid, max.y), color);
            cactus(
                out,
                Vec2::new(mid, min.y + size.y * 0.25),
                max,
                color,
            );
        }
        ObstacleKind::Rock => {
            rect(
                out,
                Vec2::new(min.x, min.y + size.y * 0.3),
                max,
                color,
            );
            rect(
                out,
                Vec2::new(min.x + size.x * 0.2, min.y),
                Vec2::new(max.x - size.x * 0.2, min.y + size.y * 0.3),
                color,
            );
        }
        ObstacleKind::Log => {
            rect(out, min, max, color);
            rect(
                out,
                Vec2::new(max.x - 6.0, min.y + 4.0),
                Vec2::new(max.x - 2.0, max.y - 4.0),
                palette.ground_line,
            );
        }
        ObstacleKind::Spikes => {
            let teeth = 3;
            let w = size.x / teeth as f32;
            for i in 0..teeth {
                let x0 = min.x + w * i as f32;
                triangle(
                    out,
                    Vec2::new(x0, max.y),
                    Vec2::new(x0 + w, max.y),
                    Vec2::new(x0 + w * 0.5, min.y),
                    color,
                );
            }
        }
    }
}

/// Trunk with two arms
fn cactus(out: &mut Vec<Vertex>, min: Vec2, max: Vec2, color: [f32; 4]) {
    let size = max - min;
    let trunk_w = (size.x * 0.4).max(4.0);
    let cx = min.x + size.x * 0.5;
    rect(
        out,
        Vec2::new(cx - trunk_w * 0.5, min.y),
        Vec2::new(cx + trunk_w * 0.5, max.y),
        color,
    );
    let arm_y = min.y + size.y * 0.35;
    rect(
        out,
        Vec2::new(min.x, arm_y),
        Vec2::new(min.x + size.x * 0.2, arm_y + size.y * 0.3),
        color,
    );
    rect(
        out,
        Vec2::new(max.x - size.x * 0.2, arm_y - size.y * 0.1),
        Vec2::new(max.x, arm_y + size.y * 0.2),
        color,
    );
}

/// Build the full frame from a snapshot
pub fn scene(snapshot: &Snapshot, palette: &Palette) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(64 * 6 + snapshot.obstacles.len() * 18);

    let scroll = snapshot.ticks as f32 * snapshot.speed;
    backdrop(&mut vertices, scroll, palette);

    for view in &snapshot.obstacles {
        obstacle(&mut vertices, view, palette);
    }
    player(&mut vertices, &snapshot.player, palette);

    if snapshot.is_game_over {
        for v in vertices.iter_mut() {
            v.color = tint(v.color, palette.game_over_tint);
        }
    }

    vertices
}
