//! The perceived world: one record per tile, refined turn by turn.
//!
//! # Storage
//!
//! A single flat `Vec<TileRecord>` indexed by `y * width + x`.  Full-grid
//! passes (perception merge, food scans) walk it front to back.
//!
//! # Perception
//!
//! Only [`WorldModel::merge_perception`] changes terrain or food.  A cell the
//! host reports as `Unseen` keeps whatever was last perceived there, so fog
//! never erases knowledge.  Cells never seen at all stay `Unseen` and count as
//! open ground when planning.
//!
//! # Bounds
//!
//! Public queries `debug_assert!` that the coordinate lies on the map and, in
//! release builds, answer `false` / `None` for off-map input.  Nothing wraps.

use hive_core::{AgentId, Direction, HiveError, Tick, TileCoord, TileIndex, TileType};
use hive_core::protocol::MAX_ARENA_WIDTH;

use crate::{WorldError, WorldResult};

// ── TileRecord ────────────────────────────────────────────────────────────────

/// What the player believes about one tile.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileRecord {
    pub tile:        TileType,
    pub has_food:    bool,
    /// Last turn this tile was actually visible; `None` if never.
    pub last_seen:   Option<Tick>,
    /// Agent currently routed here, `AgentId::INVALID` if none.
    pub reserved_by: AgentId,
}

impl Default for TileRecord {
    fn default() -> Self {
        Self {
            tile:        TileType::Unseen,
            has_food:    false,
            last_seen:   None,
            reserved_by: AgentId::INVALID,
        }
    }
}

impl TileRecord {
    #[inline]
    pub fn is_reserved(&self) -> bool {
        self.reserved_by.is_valid()
    }
}

// ── WorldModel ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct WorldModel {
    width:                u16,
    tiles:                Vec<TileRecord>,
    lethal_is_impassable: bool,
    /// Tiles with `last_seen == None`.
    unexplored:           usize,
}

impl WorldModel {
    /// A fully unseen `width × width` map.
    pub fn new(width: u16, lethal_is_impassable: bool) -> WorldResult<Self> {
        let mut world = Self { width: 0, tiles: Vec::new(), lethal_is_impassable, unexplored: 0 };
        world.configure(width)?;
        Ok(world)
    }

    /// Set the map size and forget everything perceived so far.
    pub fn configure(&mut self, width: u16) -> WorldResult<()> {
        if width == 0 || width > MAX_ARENA_WIDTH {
            return Err(HiveError::Config(format!("map width {width} not in 1..={MAX_ARENA_WIDTH}")).into());
        }
        self.width = width;
        self.tiles.clear();
        self.tiles.resize(width as usize * width as usize, TileRecord::default());
        self.unexplored = self.tiles.len();
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn lethal_is_impassable(&self) -> bool {
        self.lethal_is_impassable
    }

    /// Tiles never seen at all.
    #[inline]
    pub fn unexplored(&self) -> usize {
        self.unexplored
    }

    // ── Indexing ──────────────────────────────────────────────────────────

    #[inline]
    pub fn in_bounds(&self, coord: TileCoord) -> bool {
        let w = i32::from(self.width);
        (0..w).contains(&i32::from(coord.x)) && (0..w).contains(&i32::from(coord.y))
    }

    /// Flat index of `coord`, or `None` off the map.  Never asserts; use this
    /// when probing neighbours that may legitimately fall off the edge.
    #[inline]
    pub fn index_of(&self, coord: TileCoord) -> Option<TileIndex> {
        if !self.in_bounds(coord) {
            return None;
        }
        Some(TileIndex(coord.y as u32 * u32::from(self.width) + coord.x as u32))
    }

    /// Inverse of [`index_of`](Self::index_of).
    #[inline]
    pub fn coord_of(&self, idx: TileIndex) -> TileCoord {
        debug_assert!(idx.index() < self.tiles.len(), "{idx} out of range");
        let w = u32::from(self.width);
        TileCoord::new((idx.0 % w) as i16, (idx.0 / w) as i16)
    }

    #[inline]
    fn checked(&self, coord: TileCoord) -> Option<usize> {
        debug_assert!(self.in_bounds(coord), "{coord} outside {0}x{0} map", self.width);
        self.index_of(coord).map(TileIndex::index)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn record(&self, coord: TileCoord) -> Option<&TileRecord> {
        self.checked(coord).map(|i| &self.tiles[i])
    }

    #[inline]
    pub fn record_at(&self, idx: TileIndex) -> &TileRecord {
        &self.tiles[idx.index()]
    }

    /// Perceived terrain; `Unseen` for never-seen (or off-map) tiles.
    #[inline]
    pub fn tile(&self, coord: TileCoord) -> TileType {
        self.record(coord).map_or(TileType::Unseen, |r| r.tile)
    }

    /// Terrain-level passability: stone never, water only when lethal terrain
    /// is allowed.  Per-class restrictions live in the cost table.
    pub fn is_passable(&self, coord: TileCoord) -> bool {
        self.record(coord).is_some_and(|r| self.tile_is_passable(r.tile))
    }

    #[inline]
    pub(crate) fn tile_is_passable(&self, tile: TileType) -> bool {
        match tile {
            TileType::Stone => false,
            TileType::Water => !self.lethal_is_impassable,
            _               => true,
        }
    }

    #[inline]
    pub fn has_food(&self, coord: TileCoord) -> bool {
        self.record(coord).is_some_and(|r| r.has_food)
    }

    /// The four cardinal neighbours in `Direction::ALL` order, `None` where
    /// the step would leave the map.
    pub fn neighbors4(&self, coord: TileCoord) -> [Option<TileCoord>; 4] {
        Direction::ALL.map(|dir| {
            let n = coord.step(dir);
            self.in_bounds(n).then_some(n)
        })
    }

    /// Every tile currently believed to hold food, in index order.
    pub fn food_tiles(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, r)| r.has_food)
            .map(|(i, _)| self.coord_of(TileIndex(i as u32)))
    }

    // ── Reservations ──────────────────────────────────────────────────────

    /// Mark `coord` as the destination of `agent`.  Last writer wins.
    pub fn reserve_tile(&mut self, coord: TileCoord, agent: AgentId) {
        if let Some(i) = self.checked(coord) {
            self.tiles[i].reserved_by = agent;
        }
    }

    pub fn release_tile(&mut self, coord: TileCoord) {
        if let Some(i) = self.checked(coord) {
            self.tiles[i].reserved_by = AgentId::INVALID;
        }
    }

    /// The agent `coord` is reserved for, if any.
    pub fn reserved_by(&self, coord: TileCoord) -> Option<AgentId> {
        self.record(coord).map(|r| r.reserved_by).filter(|a| a.is_valid())
    }

    /// Clear every reservation held by `agent` (used when it dies).
    pub fn release_all(&mut self, agent: AgentId) -> usize {
        let mut released = 0;
        for r in self.tiles.iter_mut().filter(|r| r.reserved_by == agent) {
            r.reserved_by = AgentId::INVALID;
            released += 1;
        }
        released
    }

    // ── Perception ────────────────────────────────────────────────────────

    /// Fold one turn's observation into the perceived grid.
    ///
    /// Both buffers must hold exactly `width²` cells.  Returns the number of
    /// cells that were visible (and therefore overwritten).
    pub fn merge_perception(
        &mut self,
        observed_tiles: &[TileType],
        observed_food: &[bool],
        tick: Tick,
    ) -> WorldResult<usize> {
        let expected = self.tiles.len();
        for got in [observed_tiles.len(), observed_food.len()] {
            if got != expected {
                return Err(WorldError::SnapshotSize { expected, got });
            }
        }
        let mut seen = 0;
        for ((rec, &tile), &food) in self.tiles.iter_mut().zip(observed_tiles).zip(observed_food) {
            if tile.is_unseen() {
                continue;
            }
            if rec.last_seen.is_none() {
                self.unexplored -= 1;
            }
            rec.tile = tile;
            rec.has_food = food;
            rec.last_seen = Some(tick);
            seen += 1;
        }
        Ok(seen)
    }

    /// Set one tile directly.  Test and demo helper; the client proper only
    /// learns terrain through `merge_perception`.
    pub fn set_tile(&mut self, coord: TileCoord, tile: TileType, has_food: bool) {
        if let Some(i) = self.checked(coord) {
            self.tiles[i].tile = tile;
            self.tiles[i].has_food = has_food;
        }
    }
}
