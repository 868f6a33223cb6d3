//! Food placement
//!
//! Rejection sampling over the grid. No attempt bound: the caller must not
//! call this on a saturated grid, which the game never produces for sane
//! grid sizes.

use glam::IVec2;
use rand::Rng;
use rand_pcg::Pcg32;

/// Uniformly random cell disjoint from every segment and different from
/// the previous food cell
pub fn place_food(
    rng: &mut Pcg32,
    grid_size: i32,
    segments: &[IVec2],
    prev_food: IVec2,
) -> IVec2 {
    loop {
        let cell = IVec2::new(
            rng.random_range(0..grid_size),
            rng.random_range(0..grid_size),
        );
        if cell != prev_food && !segments.contains(&cell) {
            return cell;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn never_lands_on_snake_or_previous_food() {
        let mut rng = Pcg32::seed_from_u64(123);
        // 3x3 grid almost filled: 7 segments plus the previous food leave
        // a single legal cell
        let segments = vec![
            IVec2::new(0, 0),
            IVec2::new(1, 0),
            IVec2::new(2, 0),
            IVec2::new(2, 1),
            IVec2::new(1, 1),
            IVec2::new(0, 1),
            IVec2::new(0, 2),
        ];
        let prev_food = IVec2::new(1, 2);

        for _ in 0..1000 {
            let food = place_food(&mut rng, 3, &segments, prev_food);
            assert_eq!(food, IVec2::new(2, 2));
        }
    }

    #[test]
    fn stays_on_the_grid() {
        let mut rng = Pcg32::seed_from_u64(5);
        let segments = vec![IVec2::new(0, 0)];
        for _ in 0..1000 {
            let food = place_food(&mut rng, 4, &segments, IVec2::new(3, 3));
            assert!((0..4).contains(&food.x) && (0..4).contains(&food.y));
        }
    }
}
