use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use thiserror::Error;

pub mod decomposer;
pub mod json;
pub mod normalizer;
#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

pub use decomposer::{Decomposition, Evaluation, decompose, decompose_with_quads, evaluate, is_won};
pub use normalizer::{Normalized, normalize};

/// Number of physical copies of every suited or honor tile in a full set
pub const COPIES_PER_TILE: usize = 4;

/// Number of tiles in a full set, bonus tiles included
pub const TILE_SET_SIZE: usize = 144;

const WIND_NAMES: [char; 4] = ['e', 's', 'w', 'n'];
const DRAGON_NAMES: [char; 3] = ['r', 'g', 'w'];

/// Errors raised when a tile is built from an invalid category/value or string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TileError {
    #[error("empty tile string")]
    Empty,
    #[error("unknown tile category in '{0}'")]
    UnknownCategory(String),
    #[error("invalid tile value in '{0}'")]
    InvalidValue(String),
    #[error("value {value} is out of range for {category:?} tiles")]
    OutOfRange { category: Category, value: u8 },
}

/// Tile category. The declaration order is the sort order of tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// Characters, 1-9
    Character,
    /// Dots, 1-9
    Dot,
    /// Bamboo, 1-9
    Bamboo,
    /// East, south, west, north
    Wind,
    /// Red, green, white
    Dragon,
    /// Flowers, 1-4 (bonus)
    Flower,
    /// Seasons, 1-4 (bonus)
    Season,
}

impl Category {
    /// Categories whose values are ordered and can form runs
    pub const LINEAR: [Category; 3] = [Category::Character, Category::Dot, Category::Bamboo];

    /// Categories that only form pairs and triplets
    pub const HONOR: [Category; 2] = [Category::Wind, Category::Dragon];

    /// Every category, in sort order
    pub const ALL: [Category; 7] = [
        Category::Character,
        Category::Dot,
        Category::Bamboo,
        Category::Wind,
        Category::Dragon,
        Category::Flower,
        Category::Season,
    ];

    pub fn is_linear(self) -> bool {
        matches!(self, Category::Character | Category::Dot | Category::Bamboo)
    }

    pub fn is_honor(self) -> bool {
        matches!(self, Category::Wind | Category::Dragon)
    }

    pub fn is_bonus(self) -> bool {
        matches!(self, Category::Flower | Category::Season)
    }

    /// Valid values for tiles of this category
    pub fn value_range(self) -> RangeInclusive<u8> {
        match self {
            Category::Character | Category::Dot | Category::Bamboo => 1..=9,
            Category::Wind => 0..=3,
            Category::Dragon => 0..=2,
            Category::Flower | Category::Season => 1..=4,
        }
    }

    fn prefix(self) -> char {
        match self {
            Category::Character => 'm',
            Category::Dot => 'p',
            Category::Bamboo => 's',
            Category::Wind => 'w',
            Category::Dragon => 'd',
            Category::Flower => 'f',
            Category::Season => 'q',
        }
    }

    fn from_prefix(prefix: char) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.prefix() == prefix)
    }
}

/// A single tile, compared by (category, value).
///
/// Construction goes through [`Tile::new`] or string parsing, so the value is
/// always inside the category's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile {
    category: Category,
    value: u8,
}

impl Tile {
    /// Create a tile, rejecting a value outside the category's range
    pub fn new(category: Category, value: u8) -> Result<Self, TileError> {
        if !category.value_range().contains(&value) {
            return Err(TileError::OutOfRange { category, value });
        }
        Ok(Tile { category, value })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn is_bonus(&self) -> bool {
        self.category.is_bonus()
    }
}

/// Formats: "m1".."m9" characters, "p1".."p9" dots, "s1".."s9" bamboo,
/// "we" "ws" "ww" "wn" winds, "dr" "dg" "dw" dragons, "f1".."f4" flowers,
/// "q1".."q4" seasons
impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.category.prefix();
        match self.category {
            Category::Wind => write!(f, "{}{}", prefix, WIND_NAMES[self.value as usize]),
            Category::Dragon => write!(f, "{}{}", prefix, DRAGON_NAMES[self.value as usize]),
            _ => write!(f, "{}{}", prefix, self.value),
        }
    }
}

impl FromStr for Tile {
    type Err = TileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let prefix = chars.next().ok_or(TileError::Empty)?;
        let category = Category::from_prefix(prefix)
            .ok_or_else(|| TileError::UnknownCategory(s.to_string()))?;

        let rest = chars.as_str();
        let value = match category {
            Category::Wind => honor_index(&WIND_NAMES, rest),
            Category::Dragon => honor_index(&DRAGON_NAMES, rest),
            _ => rest.parse::<u8>().ok(),
        }
        .ok_or_else(|| TileError::InvalidValue(s.to_string()))?;

        Tile::new(category, value)
    }
}

fn honor_index(names: &[char], rest: &str) -> Option<u8> {
    let mut chars = rest.chars();
    let name = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    names.iter().position(|&n| n == name).map(|i| i as u8)
}

/// Parse a whitespace-separated hand such as "m1 m2 m3 we we"
pub fn parse_hand(input: &str) -> Result<Vec<Tile>, TileError> {
    input.split_whitespace().map(str::parse).collect()
}

/// Every tile of a full set in sorted order: four copies of each suited and
/// honor tile, one of each bonus tile
pub fn tile_set() -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(TILE_SET_SIZE);
    for category in Category::ALL {
        let copies = if category.is_bonus() { 1 } else { COPIES_PER_TILE };
        for value in category.value_range() {
            tiles.extend(std::iter::repeat_n(Tile { category, value }, copies));
        }
    }
    tiles
}

/// Per-category count of each distinct tile value.
///
/// Entries never hold a zero count; removing the last copy drops the entry,
/// so the lowest present value of a category is always its first key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally(BTreeMap<Category, BTreeMap<u8, u32>>);

impl Tally {
    pub fn new() -> Self {
        Tally(BTreeMap::new())
    }

    /// Add one copy of a tile
    pub fn add(&mut self, tile: Tile) {
        self.add_n(tile, 1);
    }

    /// Add `n` copies of a tile. Counts saturate at `u32::MAX`.
    pub fn add_n(&mut self, tile: Tile, n: u32) {
        if n == 0 {
            return;
        }
        let count = self
            .0
            .entry(tile.category)
            .or_default()
            .entry(tile.value)
            .or_insert(0);
        *count = count.saturating_add(n);
    }

    /// Remove `n` copies of a tile. Leaves the tally untouched and returns
    /// false if fewer than `n` are present.
    pub fn remove_n(&mut self, tile: Tile, n: u32) -> bool {
        let Some(values) = self.0.get_mut(&tile.category) else {
            return false;
        };
        let Some(count) = values.get_mut(&tile.value) else {
            return false;
        };
        if *count < n {
            return false;
        }
        *count -= n;
        if *count == 0 {
            values.remove(&tile.value);
            if values.is_empty() {
                self.0.remove(&tile.category);
            }
        }
        true
    }

    /// Get the count of a specific tile
    pub fn count(&self, tile: Tile) -> u32 {
        self.0
            .get(&tile.category)
            .and_then(|values| values.get(&tile.value))
            .copied()
            .unwrap_or(0)
    }

    /// (value, count) pairs of one category in ascending value order
    pub fn counts(&self, category: Category) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.0
            .get(&category)
            .into_iter()
            .flat_map(|values| values.iter().map(|(&v, &c)| (v, c)))
    }

    /// Smallest value still present in a category
    pub fn lowest(&self, category: Category) -> Option<u8> {
        self.0.get(&category)?.keys().next().copied()
    }

    /// Total number of tiles across all categories
    pub fn total(&self) -> usize {
        self.0
            .values()
            .flat_map(|values| values.values())
            .map(|&c| c as usize)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over all (tile, count) entries in tile order
    pub fn iter(&self) -> impl Iterator<Item = (Tile, u32)> + '_ {
        self.0.iter().flat_map(|(&category, values)| {
            values
                .iter()
                .map(move |(&value, &count)| (Tile { category, value }, count))
        })
    }
}

impl FromIterator<Tile> for Tally {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for tile in iter {
            tally.add(tile);
        }
        tally
    }
}

/// Type of meld
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeldType {
    /// Three identical tiles
    Triplet,
    /// Three consecutive values of one linear category
    Run,
}

/// Three tiles placed together in a decomposition.
///
/// Build melds with [`Meld::triplet`] or [`Meld::run`]; the search trusts
/// `tiles` to match `meld_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Meld {
    pub meld_type: MeldType,
    pub tiles: [Tile; 3],
}

impl Meld {
    pub fn triplet(tile: Tile) -> Self {
        Meld {
            meld_type: MeldType::Triplet,
            tiles: [tile; 3],
        }
    }

    /// Run of `start`, `start + 1`, `start + 2`. None for honor and bonus
    /// categories or when the run leaves the value range.
    pub fn run(category: Category, start: u8) -> Option<Self> {
        if !category.is_linear() {
            return None;
        }
        let first = Tile::new(category, start).ok()?;
        let second = Tile::new(category, start.checked_add(1)?).ok()?;
        let third = Tile::new(category, start.checked_add(2)?).ok()?;
        Some(Meld {
            meld_type: MeldType::Run,
            tiles: [first, second, third],
        })
    }
}

/// One unit of a decomposition: the pair or a meld
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Pair(Tile),
    Meld(Meld),
}

impl Group {
    /// Tiles consumed by this group, with how many copies of each
    pub fn needed(&self) -> Vec<(Tile, u32)> {
        match self {
            Group::Pair(tile) => vec![(*tile, 2)],
            Group::Meld(meld) => match meld.meld_type {
                MeldType::Triplet => vec![(meld.tiles[0], 3)],
                MeldType::Run => meld.tiles.iter().map(|&t| (t, 1)).collect(),
            },
        }
    }
}
