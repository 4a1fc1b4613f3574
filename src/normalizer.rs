use crate::{Tally, Tile};

/// Number of identical tiles that make a declared quad
pub const QUAD_SIZE: u32 = 4;

/// A raw hand split into its structural tally and the tiles set aside
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    /// Counts of the tiles the decomposition has to account for
    pub tally: Tally,
    /// Flowers and seasons, in sorted order
    pub bonus: Vec<Tile>,
    /// One entry per declared quad, in sorted order
    pub quads: Vec<Tile>,
}

impl Normalized {
    /// Structural tiles in the hand: the tally plus a triplet for each quad
    pub fn structural_count(&self) -> usize {
        self.tally.total() + self.quads.len() * (QUAD_SIZE as usize - 1)
    }
}

/// Separate bonus tiles and declared quads from a raw hand and tally the rest.
///
/// The hand is sorted so identical tiles are adjacent, then scanned once while
/// tracking how many times the preceding tile has repeated. The fourth copy in
/// a run turns the run into a quad and all four copies leave the tally. Bonus
/// tiles never count towards a run.
pub fn normalize(hand: &[Tile]) -> Normalized {
    let mut sorted = hand.to_vec();
    sorted.sort();

    let mut normalized = Normalized::default();
    let mut previous: Option<Tile> = None;
    let mut run_length = 0u32;

    for tile in sorted {
        if tile.is_bonus() {
            normalized.bonus.push(tile);
            previous = None;
            run_length = 0;
            continue;
        }

        if previous == Some(tile) {
            run_length += 1;
        } else {
            previous = Some(tile);
            run_length = 1;
        }

        if run_length == QUAD_SIZE {
            // The first three copies were tallied on the way here
            normalized.tally.remove_n(tile, QUAD_SIZE - 1);
            normalized.quads.push(tile);
            previous = None;
            run_length = 0;
            continue;
        }

        normalized.tally.add(tile);
    }

    normalized
}
