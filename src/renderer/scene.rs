//! Frame composition
//!
//! Turns the game state into a flat triangle list in playfield units. Pure,
//! so it is tested without a GPU; `RenderState` only uploads the result.

use glam::Vec2;

use super::shapes::{circle, dashed_outline, hsl_to_rgb, rect, ring, square, with_alpha};
use super::vertex::{Vertex, colors};
use crate::consts::TILE_SIZE;
use crate::settings::Settings;
use crate::sim::{Behavior, GameMode, GamePhase, GameState, PowerUpKind, Session, wall_pulse};

/// Wall band thickness
const WALL_THICKNESS: f32 = 10.0;
/// Base hue of the snake's head (green)
const SNAKE_HUE: f32 = 0.3;
/// Hue shift per segment
const SNAKE_HUE_STEP: f32 = 0.01;

const TILE: f32 = TILE_SIZE as f32;

/// Build the triangle list for one frame
pub fn build_frame(state: &GameState, now: u64, settings: &Settings) -> Vec<Vertex> {
    let mut out = Vec::new();
    match state.phase {
        GamePhase::Menu | GamePhase::HighScores => {}
        GamePhase::Playing => {
            if let Some(session) = state.session.as_ref() {
                draw_session(&mut out, session, now, settings);
            }
        }
        GamePhase::GameOver => {
            if let Some(session) = state.session.as_ref() {
                draw_session(&mut out, session, now, settings);
                let size = Vec2::new(session.field.width as f32, session.field.height as f32);
                out.extend(rect(Vec2::ZERO, size, colors::GAME_OVER_DIM));
            }
        }
    }
    out
}

fn draw_session(out: &mut Vec<Vertex>, session: &Session, now: u64, settings: &Settings) {
    draw_border(out, session, now, settings);

    for obstacle in &session.obstacles {
        out.extend(rect(
            Vec2::new(obstacle.x as f32, obstacle.y as f32),
            Vec2::new(obstacle.width as f32, obstacle.height as f32),
            colors::OBSTACLE,
        ));
    }

    draw_snake(out, session, now, settings);

    // Food pulses around its tile center
    let food_center = session.food.pos.as_vec2() + Vec2::splat(TILE / 2.0);
    let radius = TILE / 2.0 * session.food.scale();
    if settings.glow {
        out.extend(circle(food_center, radius * 1.4, colors::FOOD_GLOW, 16));
    }
    out.extend(circle(food_center, radius * 0.8, colors::FOOD, 16));

    if let Some(item) = session.power_up.as_ref() {
        let center = item.pos.as_vec2() + Vec2::splat(TILE / 2.0);
        let rgb = item.kind.color();
        if settings.glow {
            out.extend(circle(center, TILE * 0.7, with_alpha(rgb, 0.3), 16));
        }
        out.extend(square(center, TILE - 4.0, with_alpha(rgb, 1.0)));
    }

    if let Some(mongoose) = session.mongoose.as_ref() {
        let (body, trail_rgb) = match mongoose.behavior {
            Behavior::Scatter => (colors::MONGOOSE_SCATTER, [0.39, 0.58, 0.93]),
            Behavior::Chase => (colors::MONGOOSE_CHASE, [0.545, 0.271, 0.075]),
        };
        let shown = settings.trail_length().min(mongoose.trail.len());
        for (i, point) in mongoose.trail.iter().take(shown).enumerate() {
            let alpha = (shown - i) as f32 / shown as f32;
            out.extend(circle(
                *point + Vec2::splat(TILE / 2.0),
                TILE / 2.0 * alpha,
                with_alpha(trail_rgb, alpha * 0.3),
                12,
            ));
        }
        out.extend(rect(mongoose.pos, Vec2::splat(TILE), body));
    }

    for p in &session.particles.particles {
        out.extend(square(p.pos, 3.0, with_alpha(p.color, p.life.clamp(0.0, 1.0))));
    }
}

/// Walls in bounded modes, the portal shimmer in Unbounded
fn draw_border(out: &mut Vec<Vertex>, session: &Session, now: u64, settings: &Settings) {
    let w = session.field.width as f32;
    let h = session.field.height as f32;
    match session.mode {
        GameMode::Unbounded => {
            out.extend(dashed_outline(Vec2::ZERO, Vec2::new(w, h), 2.0, 5.0, colors::PORTAL_EDGE));
            if settings.glow
                && let Some(portal) = session.portal.as_ref()
            {
                for p in &portal.particles {
                    // Violet at the top left through blue to cyan at the bottom right
                    let t = ((p.pos.x / w + p.pos.y / h) / 2.0).clamp(0.0, 1.0);
                    let color = [(0.27 * (1.0 - 2.0 * t)).max(0.0), t, 1.0, 1.0];
                    out.extend(circle(p.pos, 2.0, color, 8));
                }
            }
        }
        GameMode::PrisonYard | GameMode::ObstacleCourse | GameMode::MongooseInfested => {
            let bands = [
                (Vec2::ZERO, Vec2::new(w, WALL_THICKNESS)),
                (Vec2::new(0.0, h - WALL_THICKNESS), Vec2::new(w, WALL_THICKNESS)),
                (Vec2::ZERO, Vec2::new(WALL_THICKNESS, h)),
                (Vec2::new(w - WALL_THICKNESS, 0.0), Vec2::new(WALL_THICKNESS, h)),
            ];
            for (side, (pos, size)) in bands.into_iter().enumerate() {
                if settings.glow {
                    let glow = wall_pulse(now, side);
                    out.extend(rect(
                        pos - Vec2::splat(glow / 2.0),
                        size + Vec2::splat(glow),
                        colors::WALL_GLOW,
                    ));
                }
                out.extend(rect(pos, size, colors::WALL));
            }
        }
    }
}

fn draw_snake(out: &mut Vec<Vertex>, session: &Session, now: u64, settings: &Settings) {
    let snake = &session.snake;
    let glow = if settings.glow { snake.glow(now) } else { 0.0 };
    let t = now as f32 / 200.0;

    for (i, segment) in snake.body.iter().enumerate() {
        let hue = (SNAKE_HUE + i as f32 * SNAKE_HUE_STEP).fract();
        let wobble = if settings.reduced_motion {
            0.0
        } else {
            (t + i as f32 * 0.5).sin() * 0.5
        };
        let pos = segment.as_vec2() + Vec2::splat(1.0 + wobble);
        let size = Vec2::splat(TILE - 2.0);

        if glow > 0.0 {
            let halo = 2.0 + glow * 4.0;
            out.extend(rect(
                pos - Vec2::splat(halo),
                size + Vec2::splat(halo * 2.0),
                with_alpha(hsl_to_rgb(hue, 1.0, 0.5), 0.25 * glow),
            ));
        }
        out.extend(rect(pos, size, with_alpha(hsl_to_rgb(hue, 0.8, 0.5), 1.0)));
    }

    if snake.has_power_up(PowerUpKind::Shield) && !snake.is_empty() {
        let center = snake.head().as_vec2() + Vec2::splat(TILE / 2.0);
        out.extend(ring(center, TILE * 0.7, TILE * 0.85, colors::SHIELD, 20));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScores;
    use crate::sim::{Direction, Playfield, Position, Snake};
    use crate::tuning::Tuning;

    fn plain() -> Settings {
        Settings {
            glow: false,
            trails: false,
            reduced_motion: true,
            ..Settings::default()
        }
    }

    fn playing(mode: GameMode) -> GameState {
        let mut state = GameState::new(3, Playfield::default(), Tuning::default(), HighScores::new());
        state.start_session(mode, 0);
        state
    }

    #[test]
    fn test_menu_draws_nothing() {
        let state = GameState::new(3, Playfield::default(), Tuning::default(), HighScores::new());
        assert!(build_frame(&state, 0, &Settings::default()).is_empty());
    }

    #[test]
    fn test_each_segment_adds_a_quad() {
        let mut state = playing(GameMode::PrisonYard);
        let short = build_frame(&state, 0, &plain()).len();

        let session = state.session.as_mut().unwrap();
        session.snake = Snake::from_segments(
            [Position::new(100, 100), Position::new(80, 100), Position::new(60, 100)],
            Direction::Right,
            100,
        );
        let long = build_frame(&state, 0, &plain()).len();
        assert_eq!(long - short, 12);
    }

    #[test]
    fn test_segments_sit_inside_their_tiles_without_motion() {
        let state = playing(GameMode::PrisonYard);
        let head = state.session.as_ref().unwrap().snake.head().as_vec2();
        let frame = build_frame(&state, 1234, &plain());
        let inside = frame.iter().filter(|v| {
            let p = Vec2::from(v.position);
            p.x >= head.x + 1.0 && p.x <= head.x + TILE - 1.0 && p.y >= head.y + 1.0 && p.y <= head.y + TILE - 1.0
        });
        assert!(inside.count() >= 6);
    }

    #[test]
    fn test_game_over_adds_dim_overlay() {
        let mut state = playing(GameMode::Unbounded);
        let before = build_frame(&state, 0, &plain()).len();
        state.end_session(crate::sim::LossCause::SelfCollision);
        let after = build_frame(&state, 0, &plain());
        assert_eq!(after.len(), before + 6);
        assert_eq!(after.last().unwrap().color, colors::GAME_OVER_DIM);
    }

    #[test]
    fn test_glow_adds_portal_particles() {
        let state = playing(GameMode::Unbounded);
        let plain_len = build_frame(&state, 0, &plain()).len();
        let glowing = Settings {
            glow: true,
            ..plain()
        };
        assert!(build_frame(&state, 0, &glowing).len() > plain_len);
    }
}
