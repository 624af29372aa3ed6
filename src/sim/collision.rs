//! Collision detection and asteroid fragmentation
//!
//! Detection never mutates: each check scans immutable slices and reports
//! what it found. The tick driver applies the report afterwards, so removing
//! one entity can never make the scan skip or revisit a neighbour.

use glam::Vec2;

use super::state::{Asteroid, PowerUp, Projectile, Ship};
use crate::consts::SCORE_PER_SIZE;
use crate::distance;

/// Circle-circle overlap (strict: touching circles do not collide)
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    distance(a, b) < radius_a + radius_b
}

/// Point inside circle (strict)
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    distance(point, center) < radius
}

/// Indices of power-ups the ship is touching, in insertion order
pub fn ship_power_up_hits(ship: &Ship, power_ups: &[PowerUp]) -> Vec<usize> {
    power_ups
        .iter()
        .enumerate()
        .filter(|(_, p)| circles_overlap(ship.pos, ship.radius, p.pos, p.radius))
        .map(|(i, _)| i)
        .collect()
}

/// What destroyed an asteroid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitCause {
    /// Hit by the projectile at this index
    Shot { projectile: usize },
    /// Rammed by the invincible ship
    Rammed,
}

/// One destroyed asteroid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsteroidHit {
    pub asteroid: usize,
    pub cause: HitCause,
}

/// Result of scanning every asteroid against projectiles and the ship
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Destroyed asteroids in scan order; each asteroid and projectile appears at most once
    pub hits: Vec<AsteroidHit>,
    /// A non-invincible ship touched an asteroid; the scan stopped there
    pub ship_destroyed: bool,
}

/// Check every asteroid, in order, against the live projectiles and the ship
///
/// For each asteroid the earliest unspent projectile inside its radius wins
/// and the asteroid is settled. Otherwise the ship is tested: an invincible
/// ship destroys the asteroid, any other contact ends the scan.
pub fn scan_asteroids(
    ship: &Ship,
    projectiles: &[Projectile],
    asteroids: &[Asteroid],
) -> CollisionReport {
    let mut report = CollisionReport::default();
    let mut spent = vec![false; projectiles.len()];

    for (index, asteroid) in asteroids.iter().enumerate() {
        let radius = asteroid.radius();

        let shot = projectiles
            .iter()
            .enumerate()
            .find(|(i, p)| !spent[*i] && point_in_circle(p.pos, asteroid.pos, radius))
            .map(|(i, _)| i);

        if let Some(projectile) = shot {
            spent[projectile] = true;
            report.hits.push(AsteroidHit {
                asteroid: index,
                cause: HitCause::Shot { projectile },
            });
            continue;
        }

        if circles_overlap(ship.pos, ship.radius, asteroid.pos, radius) {
            if ship.invincible {
                report.hits.push(AsteroidHit {
                    asteroid: index,
                    cause: HitCause::Rammed,
                });
            } else {
                report.ship_destroyed = true;
                break;
            }
        }
    }

    report
}

/// Child sizes produced when an asteroid of `size` is destroyed
///
/// Size above 1 splits into `floor(size)` children of half the size;
/// anything smaller vanishes.
pub fn fragment_sizes(size: f32) -> Vec<f32> {
    if size <= 1.0 {
        return Vec::new();
    }
    vec![size / 2.0; size.floor() as usize]
}

/// Points awarded for destroying an asteroid of `size`
#[inline]
pub fn score_for_size(size: f32) -> u64 {
    (size * SCORE_PER_SIZE).floor() as u64
}

/// Remove the elements at `indices` while keeping the others in order
pub fn remove_indices<T>(items: &mut Vec<T>, indices: &[usize]) {
    if indices.is_empty() {
        return;
    }
    let mut keep = vec![true; items.len()];
    for &i in indices {
        if let Some(slot) = keep.get_mut(i) {
            *slot = false;
        }
    }
    let mut flags = keep.into_iter();
    items.retain(|_| flags.next().unwrap_or(true));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PowerUpKind;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn asteroid_at(id: u32, x: f32, y: f32, size: f32) -> Asteroid {
        let mut rng = Pcg32::seed_from_u64(id as u64);
        let mut asteroid = Asteroid::new(id, Vec2::new(x, y), size, &mut rng);
        asteroid.vel = Vec2::ZERO;
        asteroid
    }

    fn shot_at(id: u32, x: f32, y: f32) -> Projectile {
        let mut p = Projectile::new(id, Vec2::new(x, y), 0.0);
        p.vel = Vec2::ZERO;
        p
    }

    #[test]
    fn test_circles_overlap_is_strict() {
        assert!(circles_overlap(Vec2::ZERO, 10.0, Vec2::new(19.9, 0.0), 10.0));
        assert!(!circles_overlap(Vec2::ZERO, 10.0, Vec2::new(20.0, 0.0), 10.0));
    }

    #[test]
    fn test_power_up_hits_in_order() {
        let ship = Ship::new(Vec2::new(100.0, 100.0));
        let power_ups = vec![
            PowerUp::new(1, Vec2::new(110.0, 100.0), PowerUpKind::Invincibility),
            PowerUp::new(2, Vec2::new(400.0, 400.0), PowerUpKind::Invincibility),
            PowerUp::new(3, Vec2::new(100.0, 125.0), PowerUpKind::Invincibility),
        ];
        assert_eq!(ship_power_up_hits(&ship, &power_ups), vec![0, 2]);
    }

    #[test]
    fn test_projectile_is_a_point() {
        // 40 px radius asteroid; a shot 41 px away misses even though its
        // drawn radius would overlap
        let ship = Ship::new(Vec2::new(700.0, 500.0));
        let asteroids = vec![asteroid_at(1, 100.0, 100.0, 4.0)];
        let miss = vec![shot_at(2, 141.0, 100.0)];
        assert!(scan_asteroids(&ship, &miss, &asteroids).hits.is_empty());

        let hit = vec![shot_at(2, 139.0, 100.0)];
        let report = scan_asteroids(&ship, &hit, &asteroids);
        assert_eq!(
            report.hits,
            vec![AsteroidHit { asteroid: 0, cause: HitCause::Shot { projectile: 0 } }]
        );
    }

    #[test]
    fn test_first_projectile_wins() {
        let ship = Ship::new(Vec2::new(700.0, 500.0));
        let asteroids = vec![asteroid_at(1, 100.0, 100.0, 4.0)];
        let shots = vec![shot_at(2, 100.0, 100.0), shot_at(3, 105.0, 100.0)];
        let report = scan_asteroids(&ship, &shots, &asteroids);
        assert_eq!(report.hits.len(), 1);
        assert_eq!(report.hits[0].cause, HitCause::Shot { projectile: 0 });
    }

    #[test]
    fn test_earliest_asteroid_wins_shared_projectile() {
        let ship = Ship::new(Vec2::new(700.0, 500.0));
        let asteroids = vec![
            asteroid_at(1, 100.0, 100.0, 3.0),
            asteroid_at(2, 110.0, 100.0, 3.0),
        ];
        let shots = vec![shot_at(3, 105.0, 100.0)];
        let report = scan_asteroids(&ship, &shots, &asteroids);
        assert_eq!(
            report.hits,
            vec![AsteroidHit { asteroid: 0, cause: HitCause::Shot { projectile: 0 } }]
        );
    }

    #[test]
    fn test_shot_asteroid_is_not_rammed_too() {
        let mut ship = Ship::new(Vec2::new(100.0, 100.0));
        ship.grant_invincibility();
        let asteroids = vec![asteroid_at(1, 100.0, 100.0, 2.0)];
        let shots = vec![shot_at(2, 100.0, 100.0)];
        let report = scan_asteroids(&ship, &shots, &asteroids);
        assert_eq!(report.hits.len(), 1);
    }

    #[test]
    fn test_invincible_ship_rams() {
        let mut ship = Ship::new(Vec2::new(100.0, 100.0));
        ship.grant_invincibility();
        let asteroids = vec![
            asteroid_at(1, 110.0, 100.0, 2.0),
            asteroid_at(2, 600.0, 100.0, 2.0),
        ];
        let report = scan_asteroids(&ship, &[], &asteroids);
        assert!(!report.ship_destroyed);
        assert_eq!(
            report.hits,
            vec![AsteroidHit { asteroid: 0, cause: HitCause::Rammed }]
        );
    }

    #[test]
    fn test_ship_contact_stops_scan() {
        let ship = Ship::new(Vec2::new(300.0, 300.0));
        let asteroids = vec![
            asteroid_at(1, 100.0, 100.0, 2.0),
            asteroid_at(2, 300.0, 300.0, 2.0),
            asteroid_at(3, 500.0, 500.0, 2.0),
        ];
        let shots = vec![shot_at(4, 100.0, 100.0), shot_at(5, 500.0, 500.0)];
        let report = scan_asteroids(&ship, &shots, &asteroids);
        assert!(report.ship_destroyed);
        // Asteroid 0 was settled before the ship died; asteroid 2 never scanned
        assert_eq!(
            report.hits,
            vec![AsteroidHit { asteroid: 0, cause: HitCause::Shot { projectile: 0 } }]
        );
    }

    #[test]
    fn test_fragment_sizes() {
        assert_eq!(fragment_sizes(4.0), vec![2.0; 4]);
        assert_eq!(fragment_sizes(3.7), vec![1.85; 3]);
        assert_eq!(fragment_sizes(2.0), vec![1.0; 2]);
        assert_eq!(fragment_sizes(1.5), vec![0.75]);
        assert!(fragment_sizes(1.0).is_empty());
        assert!(fragment_sizes(0.5).is_empty());
    }

    #[test]
    fn test_score_for_size() {
        assert_eq!(score_for_size(4.0), 400);
        assert_eq!(score_for_size(2.0), 200);
        assert_eq!(score_for_size(2.345), 234);
        assert_eq!(score_for_size(0.5), 50);
    }

    #[test]
    fn test_remove_indices_keeps_order() {
        let mut items = vec!['a', 'b', 'c', 'd', 'e'];
        remove_indices(&mut items, &[3, 0, 3]);
        assert_eq!(items, vec!['b', 'c', 'e']);
    }

    /// Total asteroids destroyed when one asteroid is shot down completely
    fn extinction_count(size: f32, depth: u32) -> u64 {
        assert!(depth < 64, "fragmentation did not terminate");
        1 + fragment_sizes(size)
            .into_iter()
            .map(|child| extinction_count(child, depth + 1))
            .sum::<u64>()
    }

    #[test]
    fn test_size_four_fragments_to_extinction() {
        // 4 -> 4x2 -> 8x1 -> gone
        assert_eq!(extinction_count(4.0, 0), 1 + 4 + 8);
    }

    proptest! {
        #[test]
        fn fragments_halve_and_count_floor(size in 0.1f32..8.0) {
            let children = fragment_sizes(size);
            if size > 1.0 {
                prop_assert_eq!(children.len(), size.floor() as usize);
                prop_assert!(children.iter().all(|c| *c == size / 2.0));
            } else {
                prop_assert!(children.is_empty());
            }
        }

        #[test]
        fn fragmentation_terminates(size in 0.1f32..8.0) {
            prop_assert!(extinction_count(size, 0) >= 1);
        }
    }
}
