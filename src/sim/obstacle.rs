//! Static obstacles for the Obstacle Course mode

use rand::Rng;

use super::geom::{Playfield, Rect};
use crate::consts::TILE_SIZE;
use crate::tuning::Tuning;

/// Roll the session's obstacles
///
/// Makes `obstacle_attempts` tile-aligned placements and drops any that land
/// within `obstacle_clearance` of the spawn point on both axes, so a session
/// can end up with fewer obstacles than attempts.
pub fn generate_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    field: &Playfield,
    tuning: &Tuning,
) -> Vec<Rect> {
    let size = tuning.obstacle_size;
    let spawn = field.center();
    let max_col = ((field.width - size) / TILE_SIZE).max(1);
    let max_row = ((field.height - size) / TILE_SIZE).max(1);

    let mut obstacles = Vec::with_capacity(tuning.obstacle_attempts as usize);
    for _ in 0..tuning.obstacle_attempts {
        let x = rng.random_range(0..max_col) * TILE_SIZE;
        let y = rng.random_range(0..max_row) * TILE_SIZE;

        let clear_of_spawn = (x - spawn.x).abs() > tuning.obstacle_clearance
            || (y - spawn.y).abs() > tuning.obstacle_clearance;
        if clear_of_spawn {
            obstacles.push(Rect::new(x, y, size, size));
        }
    }
    log::debug!("Placed {} obstacles", obstacles.len());
    obstacles
}
