//! Collision tests and movement utilities
//!
//! Hits are plain radius checks between entity centres. The interesting part
//! is the fleet step: the whole fleet bounces and descends together so no
//! member ever drifts out of formation.

use glam::Vec2;

use super::state::{Boss, Enemy};
use crate::consts::*;
use crate::distance;

/// True if `a` and `b` are strictly closer than `radius`
#[inline]
pub fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    distance(a, b) < radius
}

/// Clamp an x coordinate into `[min, max]`
#[inline]
pub fn clamp_x(x: f32, min: f32, max: f32) -> f32 {
    x.max(min).min(max)
}

/// Index of the first alive enemy hit by a shot at `pos`
pub fn first_enemy_hit(enemies: &[Enemy], pos: Vec2) -> Option<usize> {
    enemies
        .iter()
        .position(|e| e.alive && within(pos, e.pos, ENEMY_HIT_RADIUS))
}

/// Index of the first boss hit by a shot at `pos`
pub fn first_boss_hit(bosses: &[Boss], pos: Vec2) -> Option<usize> {
    bosses
        .iter()
        .position(|b| within(pos, b.pos, BOSS_HIT_RADIUS))
}

/// Outcome of one fleet step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetStep {
    /// Nobody alive to move
    Empty,
    /// Fleet slid sideways by `dx`
    Advanced,
    /// Fleet hit a border, reversed and dropped
    Bounced {
        /// A dropped enemy is now below the danger line
        breached: bool,
    },
}

/// Move the alive fleet one tick.
///
/// If any alive enemy's next x would leave `[BORDER_LEFT, BORDER_RIGHT]`, the
/// shared velocity flips and every alive enemy drops by `ENEMY_DROP` with no
/// horizontal movement this tick. Otherwise everyone slides by `dx`.
pub fn step_fleet(enemies: &mut [Enemy], dx: &mut f32) -> FleetStep {
    let mut any_alive = false;
    let mut hits_border = false;
    for enemy in enemies.iter().filter(|e| e.alive) {
        any_alive = true;
        let nx = enemy.pos.x + *dx;
        if !(BORDER_LEFT..=BORDER_RIGHT).contains(&nx) {
            hits_border = true;
            break;
        }
    }
    if !any_alive {
        return FleetStep::Empty;
    }

    if hits_border {
        *dx = -*dx;
        let mut breached = false;
        for enemy in enemies.iter_mut().filter(|e| e.alive) {
            enemy.pos.y -= ENEMY_DROP;
            if enemy.pos.y < ENEMY_DANGER_Y {
                breached = true;
            }
        }
        return FleetStep::Bounced { breached };
    }

    for enemy in enemies.iter_mut().filter(|e| e.alive) {
        enemy.pos.x += *dx;
    }
    FleetStep::Advanced
}

/// Move a boss one tick; returns true if it dropped below the danger line
pub fn step_boss(boss: &mut Boss) -> bool {
    let nx = boss.pos.x + boss.dx;
    let min = BORDER_LEFT + BOSS_EDGE_MARGIN;
    let max = BORDER_RIGHT - BOSS_EDGE_MARGIN;
    if nx < min || nx > max {
        boss.dx = -boss.dx;
        boss.pos.y -= BOSS_DROP;
        return boss.pos.y < BOSS_DANGER_Y;
    }
    boss.pos.x = nx;
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(xs: &[f32], y: f32) -> Vec<Enemy> {
        xs.iter()
            .enumerate()
            .map(|(i, &x)| Enemy::new(i as u32 + 1, Vec2::new(x, y)))
            .collect()
    }

    #[test]
    fn test_within_is_strict() {
        assert!(within(Vec2::ZERO, Vec2::new(19.9, 0.0), 20.0));
        assert!(!within(Vec2::ZERO, Vec2::new(20.0, 0.0), 20.0));
        assert!(within(Vec2::ZERO, Vec2::new(3.0, 4.0), 5.1));
    }

    #[test]
    fn test_fleet_advances() {
        let mut fleet = row(&[-60.0, 0.0, 60.0], 100.0);
        let mut dx = 2.0;
        assert_eq!(step_fleet(&mut fleet, &mut dx), FleetStep::Advanced);
        assert_eq!(dx, 2.0);
        assert_eq!(fleet[0].pos, Vec2::new(-58.0, 100.0));
        assert_eq!(fleet[2].pos, Vec2::new(62.0, 100.0));
    }

    #[test]
    fn test_fleet_bounces_together() {
        let mut fleet = row(&[300.0, 340.0, 379.0], 100.0);
        let mut dx = 2.0;
        let step = step_fleet(&mut fleet, &mut dx);
        assert_eq!(step, FleetStep::Bounced { breached: false });
        assert_eq!(dx, -2.0);
        for (enemy, x) in fleet.iter().zip([300.0, 340.0, 379.0]) {
            assert_eq!(enemy.pos, Vec2::new(x, 70.0));
        }
    }

    #[test]
    fn test_dead_enemies_ignored_by_fleet() {
        let mut fleet = row(&[0.0, 379.0], 100.0);
        fleet[1].hide();
        let mut dx = 2.0;
        assert_eq!(step_fleet(&mut fleet, &mut dx), FleetStep::Advanced);
        assert_eq!(fleet[1].pos, Vec2::new(379.0, 100.0));

        fleet[0].hide();
        assert_eq!(step_fleet(&mut fleet, &mut dx), FleetStep::Empty);
    }

    #[test]
    fn test_fleet_breach_after_drop() {
        let mut fleet = row(&[-379.0], ENEMY_DANGER_Y + 10.0);
        let mut dx = -2.0;
        assert_eq!(
            step_fleet(&mut fleet, &mut dx),
            FleetStep::Bounced { breached: true }
        );
    }

    #[test]
    fn test_first_enemy_hit_skips_dead() {
        let mut fleet = row(&[0.0, 10.0], 0.0);
        fleet[0].hide();
        assert_eq!(first_enemy_hit(&fleet, Vec2::new(5.0, 0.0)), Some(1));
        assert_eq!(first_enemy_hit(&fleet, Vec2::new(100.0, 0.0)), None);
    }

    #[test]
    fn test_boss_turns_and_drops() {
        let mut boss = Boss::new(1, 0, Vec2::new(BORDER_RIGHT - 31.0, 100.0), 3.0);
        assert!(!step_boss(&mut boss));
        assert_eq!(boss.dx, -3.0);
        assert_eq!(boss.pos, Vec2::new(BORDER_RIGHT - 31.0, 80.0));

        assert!(!step_boss(&mut boss));
        assert_eq!(boss.pos.x, BORDER_RIGHT - 34.0);

        let mut low = Boss::new(2, 1, Vec2::new(BORDER_LEFT + 31.0, BOSS_DANGER_Y + 5.0), -3.0);
        assert!(step_boss(&mut low));
    }

    #[test]
    fn test_clamp_x() {
        assert_eq!(clamp_x(500.0, -365.0, 365.0), 365.0);
        assert_eq!(clamp_x(-500.0, -365.0, 365.0), -365.0);
        assert_eq!(clamp_x(12.5, -365.0, 365.0), 12.5);
    }
}
