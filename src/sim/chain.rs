//! Chain-reaction resolver for TNT bricks
//!
//! A detonation destroys every intact brick whose center lies within the
//! blast radius; TNT bricks caught in the blast detonate in turn. Propagation
//! is breadth-first over an explicit queue, so chain length never touches the
//! call stack. The resolver only flips `hit` flags and reports what happened;
//! scoring, debris and explosion visuals are applied by the caller.

use std::collections::VecDeque;

use glam::Vec2;

use super::state::Brick;

/// Points awarded by a detonation
#[derive(Debug, Clone, Copy)]
pub struct BlastScoring {
    /// For the brick that set off the chain
    pub origin: u64,
    /// For every brick caught in a blast
    pub victim: u64,
}

/// Outcome of one detonation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detonation {
    /// True when the origin was still intact and got destroyed here
    pub origin_destroyed: bool,
    /// Bricks destroyed by blasts, in destruction order (origin excluded)
    pub victims: Vec<usize>,
    /// Blast centers, origin first, one per TNT that went off
    pub explosions: Vec<Vec2>,
    pub points: u64,
}

impl Detonation {
    /// Bricks destroyed by this detonation, origin included
    pub fn destroyed(&self) -> usize {
        self.victims.len() + usize::from(self.origin_destroyed)
    }
}

/// Detonate `origin` and propagate through the brick collection
///
/// Every brick is destroyed at most once: the `hit` flag is checked before a
/// brick is counted or queued, so the queue holds at most one entry per brick
/// and the loop always terminates. Neighbors are scanned in collection order
/// and the radius test is inclusive.
pub fn detonate(bricks: &mut [Brick], origin: usize, radius: f32, scoring: BlastScoring) -> Detonation {
    debug_assert!(radius >= 0.0, "negative explosion radius");
    let mut result = Detonation::default();
    let Some(first) = bricks.get_mut(origin) else {
        return result;
    };

    if !first.hit {
        first.hit = true;
        first.primed = false;
        result.origin_destroyed = true;
        result.points += scoring.origin;
    }
    result.explosions.push(first.center());

    let mut queue = VecDeque::from([origin]);
    while let Some(current) = queue.pop_front() {
        let blast_center = bricks[current].center();

        for (idx, brick) in bricks.iter_mut().enumerate() {
            if brick.hit {
                continue;
            }
            if brick.center().distance(blast_center) <= radius {
                brick.hit = true;
                brick.primed = false;
                result.victims.push(idx);
                result.points += scoring.victim;

                if brick.is_tnt {
                    queue.push_back(idx);
                    result.explosions.push(brick.center());
                }
            }
        }
    }

    log::debug!(
        "Detonation at brick {}: {} destroyed, {} blasts",
        origin,
        result.destroyed(),
        result.explosions.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SCORING: BlastScoring = BlastScoring {
        origin: 100,
        victim: 100,
    };

    /// Grid of 60x30 bricks with 10px gaps
    fn grid(rows: usize, cols: usize) -> Vec<Brick> {
        let mut bricks = Vec::new();
        for row in 0..rows {
            for col in 0..cols {
                let x = 50.0 + col as f32 * 70.0;
                let y = 50.0 + row as f32 * 40.0;
                bricks.push(Brick::new(x, y, 60.0, 30.0, [255, 0, 0]));
            }
        }
        bricks
    }

    #[test]
    fn test_center_of_3x3_clears_all() {
        let mut bricks = grid(3, 3);
        bricks[4].is_tnt = true;

        let result = detonate(&mut bricks, 4, 100.0, SCORING);
        assert_eq!(result.destroyed(), 9);
        assert!(bricks.iter().all(|b| b.hit));
        assert_eq!(result.points, 900);
        assert_eq!(result.explosions.len(), 1);
    }

    #[test]
    fn test_row_of_three_tnt_chains() {
        // Neighbors 70px apart, outer pair 140px apart
        let mut bricks = grid(1, 3);
        for brick in &mut bricks {
            brick.is_tnt = true;
        }

        let result = detonate(&mut bricks, 1, 100.0, SCORING);
        assert_eq!(result.destroyed(), 3);
        assert_eq!(result.explosions.len(), 3);
    }

    #[test]
    fn test_chain_reaches_beyond_first_radius() {
        // Five in a row, only TNT links carry the blast
        let mut bricks = grid(1, 5);
        bricks[0].is_tnt = true;
        bricks[1].is_tnt = true;
        bricks[2].is_tnt = true;

        let result = detonate(&mut bricks, 0, 100.0, SCORING);
        assert_eq!(result.destroyed(), 4);
        assert!(bricks[3].hit);
        assert!(!bricks[4].hit);
        assert_eq!(result.victims, vec![1, 2, 3]);
    }

    #[test]
    fn test_plain_neighbor_does_not_propagate() {
        let mut bricks = grid(1, 3);
        bricks[0].is_tnt = true;

        let result = detonate(&mut bricks, 0, 100.0, SCORING);
        assert_eq!(result.destroyed(), 2);
        assert!(!bricks[2].hit);
    }

    #[test]
    fn test_radius_is_inclusive() {
        let mut bricks = grid(1, 2);
        bricks[0].is_tnt = true;
        let result = detonate(&mut bricks, 0, 70.0, SCORING);
        assert_eq!(result.destroyed(), 2);

        let mut bricks = grid(1, 2);
        bricks[0].is_tnt = true;
        let result = detonate(&mut bricks, 0, 69.9, SCORING);
        assert_eq!(result.destroyed(), 1);
    }

    #[test]
    fn test_destroyed_bricks_are_skipped() {
        let mut bricks = grid(1, 3);
        bricks[0].is_tnt = true;
        bricks[1].hit = true;

        let result = detonate(&mut bricks, 0, 100.0, SCORING);
        assert_eq!(result.victims, Vec::<usize>::new());
        assert_eq!(result.destroyed(), 1);
        assert_eq!(result.points, 100);
    }

    #[test]
    fn test_already_destroyed_origin_counts_nothing_itself() {
        let mut bricks = grid(1, 2);
        bricks[0].is_tnt = true;
        bricks[0].hit = true;

        let result = detonate(&mut bricks, 0, 100.0, SCORING);
        assert!(!result.origin_destroyed);
        assert_eq!(result.destroyed(), 1);
        assert_eq!(result.victims, vec![1]);
    }

    #[test]
    fn test_detonating_twice_is_idempotent() {
        let mut bricks = grid(3, 3);
        bricks[4].is_tnt = true;
        detonate(&mut bricks, 4, 100.0, SCORING);
        let again = detonate(&mut bricks, 4, 100.0, SCORING);
        assert_eq!(again.destroyed(), 0);
        assert_eq!(again.points, 0);
    }

    proptest! {
        #[test]
        fn prop_chain_destroys_each_brick_once(
            rows in 1usize..6,
            cols in 1usize..8,
            tnt_mask in proptest::collection::vec(any::<bool>(), 48),
            origin_seed in any::<usize>(),
            radius in 0.0f32..200.0,
        ) {
            let mut bricks = grid(rows, cols);
            for (brick, &tnt) in bricks.iter_mut().zip(&tnt_mask) {
                brick.is_tnt = tnt;
            }
            let origin = origin_seed % bricks.len();
            bricks[origin].is_tnt = true;

            let result = detonate(&mut bricks, origin, radius, SCORING);
            let hit = bricks.iter().filter(|b| b.hit).count();
            prop_assert_eq!(result.destroyed(), hit);

            let mut seen = result.victims.clone();
            seen.sort_unstable();
            seen.dedup();
            prop_assert_eq!(seen.len(), result.victims.len());
            prop_assert!(!result.victims.contains(&origin));
        }
    }
}
