//! Per-frame simulation step

use super::collision::LossCause;
use super::state::{GameEvent, GamePhase, GameState};

/// Advance the game to `now` (ms)
///
/// Called once per animation frame. Only the Playing phase simulates; the
/// game-over screen keeps animating its card and the last particles.
pub fn tick(state: &mut GameState, now: u64) {
    match state.phase {
        GamePhase::Menu | GamePhase::HighScores => {}
        GamePhase::Playing => {
            if let Some(cause) = step_session(state, now) {
                state.end_session(cause);
            }
        }
        GamePhase::GameOver => {
            let reduced_motion = state.reduced_motion;
            if let Some(session) = state.session.as_mut() {
                session.game_over.update(now, reduced_motion);
                session.particles.update();
            }
        }
    }
}

/// One Playing frame; returns the loss cause if the session just ended
fn step_session(state: &mut GameState, now: u64) -> Option<LossCause> {
    let GameState {
        session,
        rng,
        tuning,
        particle_cap,
        ..
    } = state;
    let session = session.as_mut()?;
    let mut events = Vec::new();

    for kind in session.snake.expire_power_ups(now) {
        log::debug!("{:?} power-up expired", kind);
        events.push(GameEvent::PowerUpExpired(kind));
    }

    if let Some(step) = session.snake.advance(now, session.mode, &session.field)
        && step.grew
    {
        log::debug!(
            "Snake grew to {} segments at ({}, {})",
            session.snake.len(),
            step.head.x,
            step.head.y
        );
    }

    if let Some(behavior) = session.update_entities(now, rng, tuning) {
        log::debug!("Mongoose switched to {:?}", behavior);
        events.push(GameEvent::MongooseBehavior(behavior));
    }

    let score_before = session.score;
    if let Some(points) = session.consume_food(rng, tuning, *particle_cap) {
        events.push(GameEvent::Ate {
            points,
            score: session.score,
        });
        if let Some(every) = std::num::NonZeroU32::new(tuning.level_up_every) {
            let level = session.score / every;
            if level > score_before / every {
                events.push(GameEvent::LevelUp(level));
            }
        }
        session.maybe_spawn_power_up(rng, now, tuning);
    }

    if let Some(kind) = session.collect_power_up(now, rng, tuning, *particle_cap) {
        log::debug!("Collected {:?} power-up", kind);
        events.push(GameEvent::PowerUpCollected(kind));
    }

    let loss = session.check_loss();
    for event in events {
        state.push_event(event);
    }
    loss
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TILE_SIZE;
    use crate::highscores::HighScores;
    use crate::platform::Key;
    use crate::sim::{Direction, Food, GameMode, Playfield, Position, PowerUp, PowerUpKind, Snake};
    use crate::tuning::Tuning;

    fn playing(mode: GameMode) -> GameState {
        let mut state = GameState::new(7, Playfield::default(), Tuning::default(), HighScores::new());
        state.start_session(mode, 0);
        state.drain_events();
        state
    }

    fn session(state: &mut GameState) -> &mut crate::sim::Session {
        state.session.as_mut().unwrap()
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut state = playing(GameMode::PrisonYard);
        let s = session(&mut state);
        s.snake = Snake::new(Position::new(100, 100), 100);
        s.food = Food::at(Position::new(100, 100));

        tick(&mut state, 50);

        let s = session(&mut state);
        assert_eq!(s.snake.target_len, 2);
        assert_eq!(s.score, 10);
        assert_ne!(s.food.pos, Position::new(100, 100));
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::Ate { points: 10, score: 10 })
        );
    }

    #[test]
    fn test_snake_moves_on_interval() {
        let mut state = playing(GameMode::PrisonYard);
        let start = session(&mut state).snake.head();

        tick(&mut state, 99);
        assert_eq!(session(&mut state).snake.head(), start);
        tick(&mut state, 100);
        assert_eq!(session(&mut state).snake.head(), start.offset((TILE_SIZE, 0)));
        tick(&mut state, 150);
        assert_eq!(session(&mut state).snake.head(), start.offset((TILE_SIZE, 0)));
    }

    #[test]
    fn test_self_collision_ends_session() {
        let mut state = playing(GameMode::PrisonYard);
        let s = session(&mut state);
        s.snake = Snake::from_segments(
            [
                Position::new(100, 100),
                Position::new(120, 100),
                Position::new(120, 80),
                Position::new(100, 80),
                Position::new(80, 80),
            ],
            Direction::Up,
            100,
        );
        s.score = 30;

        tick(&mut state, 100);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_scores.scores, vec![30]);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::GameOver {
                cause: LossCause::SelfCollision,
                score: 30,
                rank: Some(1),
            }]
        );

        // Frozen while the card animates
        let head = session(&mut state).snake.head();
        tick(&mut state, 1000);
        assert_eq!(session(&mut state).snake.head(), head);
        assert!(session(&mut state).game_over.alpha > 0.0);

        state.handle_key(Key::Enter, 1100);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.mode, GameMode::PrisonYard);
    }

    #[test]
    fn test_walls_depend_on_mode() {
        for (mode, survives) in [(GameMode::PrisonYard, false), (GameMode::Unbounded, true)] {
            let mut state = playing(mode);
            let s = session(&mut state);
            s.snake = Snake::from_segments([Position::new(0, 0)], Direction::Left, 100);
            s.food = Food::at(Position::new(400, 400));

            tick(&mut state, 100);

            assert_eq!(state.phase == GamePhase::Playing, survives, "{mode}");
            if survives {
                let w = state.field.width;
                assert_eq!(session(&mut state).snake.head(), Position::new(w - TILE_SIZE, 0));
            } else {
                assert_eq!(
                    state.last_result.unwrap().cause,
                    LossCause::OutOfBounds
                );
            }
        }
    }

    #[test]
    fn test_speed_halves_then_restores() {
        let mut state = playing(GameMode::PrisonYard);
        let s = session(&mut state);
        let head = s.snake.head();
        s.power_up = Some(PowerUp::new(PowerUpKind::Speed, head, 0, 10_000));

        tick(&mut state, 10);
        assert_eq!(session(&mut state).snake.move_interval, 50);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::PowerUpCollected(PowerUpKind::Speed))
        );

        // Keep the snake away from the walls while waiting
        session(&mut state).snake.direction = Direction::None;
        tick(&mut state, 5010);
        assert_eq!(session(&mut state).snake.move_interval, 100);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::PowerUpExpired(PowerUpKind::Speed))
        );
    }

    #[test]
    fn test_level_up_every_hundred() {
        let mut state = playing(GameMode::PrisonYard);
        let s = session(&mut state);
        s.score = 90;
        s.food = Food::at(s.snake.head());

        tick(&mut state, 10);

        assert!(state.drain_events().contains(&GameEvent::LevelUp(1)));
    }

    #[test]
    fn test_mongoose_catches_snake() {
        let mut state = playing(GameMode::MongooseInfested);
        let tuning = state.tuning.clone();
        let s = session(&mut state);
        let head = s.snake.head();
        s.mongoose = Some(crate::sim::Mongoose::at(head.as_vec2(), 0, &tuning));

        tick(&mut state, 10);

        assert_eq!(state.last_result.unwrap().cause, LossCause::Mongoose);
    }

    #[test]
    fn test_shield_survives_obstacle() {
        let mut state = playing(GameMode::ObstacleCourse);
        let s = session(&mut state);
        let head = s.snake.head();
        s.obstacles = vec![crate::sim::Rect::new(head.x, head.y, 40, 40)];
        s.snake.apply_power_up(PowerUpKind::Shield, 0, 5000);

        tick(&mut state, 10);
        assert_eq!(state.phase, GamePhase::Playing);

        // Shield runs out while still inside the obstacle
        session(&mut state).snake.direction = Direction::None;
        tick(&mut state, 5000);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.last_result.unwrap().cause, LossCause::Obstacle);
    }

    #[test]
    fn test_identical_seeds_identical_sessions() {
        let run = || {
            let mut state =
                GameState::new(99, Playfield::default(), Tuning::default(), HighScores::new());
            state.start_session(GameMode::ObstacleCourse, 0);
            let mut now = 0;
            for key in [Key::Up, Key::Left, Key::Down, Key::Right] {
                state.handle_key(key, now);
                for _ in 0..6 {
                    now += 16;
                    tick(&mut state, now);
                }
            }
            let s = state.session.unwrap();
            (s.snake.body, s.food.pos, s.obstacles, s.score, state.phase)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_menu_phase_does_not_simulate() {
        let mut state = GameState::new(1, Playfield::default(), Tuning::default(), HighScores::new());
        tick(&mut state, 1000);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.session.is_none());
        assert!(state.drain_events().is_empty());
    }
}
