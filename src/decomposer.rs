use crate::normalizer::{Normalized, normalize};
use crate::{Category, Group, Meld, Tally, Tile};

/// Tiles in the pair
pub const PAIR_SIZE: u32 = 2;

/// Tiles in a triplet or run
pub const MELD_SIZE: u32 = 3;

/// Melds in a winning hand, declared quads included
pub const MELDS_NEEDED: usize = 4;

/// Structural tiles in a winning hand: one pair and four melds
pub const STRUCTURAL_TILES: usize = PAIR_SIZE as usize + MELDS_NEEDED * MELD_SIZE as usize;

/// Witness that a hand wins: one pair and exactly four melds covering every
/// structural tile once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    pub pair: Tile,
    pub melds: Vec<Meld>,
}

impl Decomposition {
    /// Flatten the witness back into its 14 structural tiles
    pub fn tiles(&self) -> Vec<Tile> {
        let mut tiles = vec![self.pair; PAIR_SIZE as usize];
        for meld in &self.melds {
            tiles.extend_from_slice(&meld.tiles);
        }
        tiles
    }
}

/// Outcome of evaluating a raw hand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// The witness, or None if the hand does not win
    pub decomposition: Option<Decomposition>,
    /// Bonus tiles found in the hand
    pub bonus: Vec<Tile>,
    /// Declared quads found in the hand
    pub quads: Vec<Tile>,
}

impl Evaluation {
    pub fn is_win(&self) -> bool {
        self.decomposition.is_some()
    }
}

/// Pair slot and melds placed so far during the search
#[derive(Debug, Default)]
struct Placement {
    pair: Option<Tile>,
    melds: Vec<Meld>,
}

impl Placement {
    fn push(&mut self, group: Group) {
        match group {
            Group::Pair(tile) => self.pair = Some(tile),
            Group::Meld(meld) => self.melds.push(meld),
        }
    }

    fn pop(&mut self, group: Group) {
        match group {
            Group::Pair(_) => self.pair = None,
            Group::Meld(_) => {
                self.melds.pop();
            }
        }
    }

    fn into_decomposition(self) -> Option<Decomposition> {
        let pair = self.pair?;
        if self.melds.len() != MELDS_NEEDED {
            return None;
        }
        Some(Decomposition {
            pair,
            melds: self.melds,
        })
    }
}

/// Normalize a raw hand and search it for a winning decomposition
pub fn evaluate(hand: &[Tile]) -> Evaluation {
    let Normalized {
        tally,
        bonus,
        quads,
    } = normalize(hand);
    let decomposition = decompose_with_quads(&tally, &quads);

    Evaluation {
        decomposition,
        bonus,
        quads,
    }
}

/// Check if a raw hand, bonus tiles and declared quads included, has won
pub fn is_won(hand: &[Tile]) -> bool {
    evaluate(hand).is_win()
}

/// Find a decomposition of a tally into one pair and four melds
pub fn decompose(tally: &Tally) -> Option<Decomposition> {
    decompose_with_quads(tally, &[])
}

/// Find a decomposition of a tally when some melds were already declared as
/// quads.
///
/// Each quad stands in for one triplet, so the tally has to supply the pair
/// and `4 - quads.len()` melds. Honor categories are placed first since their
/// counts alone decide their groups; linear categories are then searched one
/// at a time with backtracking. The search runs on a private copy of the
/// tally and the result is the same for the same input.
pub fn decompose_with_quads(tally: &Tally, quads: &[Tile]) -> Option<Decomposition> {
    if quads.len() > MELDS_NEEDED
        || tally.total() + quads.len() * MELD_SIZE as usize != STRUCTURAL_TILES
    {
        return None;
    }

    let mut placement = Placement::default();
    placement.melds.extend(quads.iter().map(|&tile| Meld::triplet(tile)));

    let mut remaining = tally.clone();
    for category in Category::HONOR {
        if !place_honors(&mut remaining, category, &mut placement) {
            return None;
        }
    }
    for category in Category::LINEAR {
        if !place_linear(&mut remaining, category, &mut placement) {
            return None;
        }
    }

    // Anything left belongs to a category that forms no groups
    if !remaining.is_empty() {
        return None;
    }

    placement.into_decomposition()
}

/// Place every tile of an honor category. A count of two is the pair, three
/// is a triplet, and any other count cannot be placed.
fn place_honors(tally: &mut Tally, category: Category, placement: &mut Placement) -> bool {
    let present: Vec<(u8, u32)> = tally.counts(category).collect();

    for (value, count) in present {
        let tile = Tile { category, value };
        let group = match count {
            PAIR_SIZE if placement.pair.is_none() => Group::Pair(tile),
            MELD_SIZE => Group::Meld(Meld::triplet(tile)),
            _ => return false,
        };
        if !take(tally, group) {
            return false;
        }
        placement.push(group);
    }

    true
}

/// Recursive backtracking over one linear category.
///
/// The lowest remaining value has to belong to some group, so only groups
/// containing it are tried, in the order pair, triplet, run ending at it, run
/// centered on it, run starting at it. A failed branch puts its tiles back and
/// drops its group before the next one is tried.
fn place_linear(tally: &mut Tally, category: Category, placement: &mut Placement) -> bool {
    let Some(lowest) = tally.lowest(category) else {
        return true;
    };

    for group in candidate_groups(tally, category, lowest, placement.pair.is_none()) {
        if !take(tally, group) {
            continue;
        }
        placement.push(group);

        if place_linear(tally, category, placement) {
            return true;
        }

        // Backtrack
        placement.pop(group);
        restore(tally, group);
    }

    false
}

/// Groups containing `value` that the tally can currently supply
fn candidate_groups(tally: &Tally, category: Category, value: u8, pair_open: bool) -> Vec<Group> {
    let tile = Tile { category, value };
    let count = tally.count(tile);
    let mut groups = Vec::with_capacity(5);

    if pair_open && count >= PAIR_SIZE {
        groups.push(Group::Pair(tile));
    }
    if count >= MELD_SIZE {
        groups.push(Group::Meld(Meld::triplet(tile)));
    }

    let starts = [value.checked_sub(2), value.checked_sub(1), Some(value)];
    for start in starts.into_iter().flatten() {
        if let Some(run) = Meld::run(category, start) {
            if run.tiles.iter().all(|&t| tally.count(t) > 0) {
                groups.push(Group::Meld(run));
            }
        }
    }

    groups
}

/// Remove the tiles of a group from the tally. Nothing is removed unless the
/// whole group is present.
fn take(tally: &mut Tally, group: Group) -> bool {
    let needed = group.needed();
    if needed.iter().any(|&(tile, n)| tally.count(tile) < n) {
        return false;
    }
    for (tile, n) in needed {
        tally.remove_n(tile, n);
    }
    true
}

/// Put the tiles of a group back (backtracking)
fn restore(tally: &mut Tally, group: Group) {
    for (tile, n) in group.needed() {
        tally.add_n(tile, n);
    }
}
