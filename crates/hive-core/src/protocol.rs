//! Types exchanged with the tournament host.
//!
//! The host protocol is fixed; these types reproduce it behaviourally.  Enum
//! discriminants match the host's wire values so a thin FFI shim can convert
//! with `from_u8` without a lookup table.

use crate::{AgentId, Direction, PlayerId, TeamId, Tick, TileCoord};

/// Widest map the host will ever configure.
pub const MAX_ARENA_WIDTH: u16 = 256;
/// Upper bound on `map_width²`.
pub const MAX_ARENA_TILES: usize = MAX_ARENA_WIDTH as usize * MAX_ARENA_WIDTH as usize;
/// Live agents a single player may own.
pub const MAX_AGENTS_PER_PLAYER: usize = 256;
/// One order per owned agent per turn.
pub const MAX_ORDERS_PER_PLAYER: usize = MAX_AGENTS_PER_PLAYER;
/// Reports include agents that died last turn, hence the factor of two.
pub const MAX_REPORTS_PER_PLAYER: usize = 2 * MAX_AGENTS_PER_PLAYER;
/// Number of concrete terrain categories (excludes `Unseen`).
pub const NUM_TILE_TYPES: usize = 7;
/// Number of agent classes.
pub const NUM_AGENT_TYPES: usize = 4;
/// Value in `AgentTypeInfo::move_exhaust` meaning "cannot enter".
pub const TILE_IMPASSABLE: i32 = -1;

// ── Terrain ───────────────────────────────────────────────────────────────────

/// Terrain category of one tile.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TileType {
    /// Open space, traversable by every agent type.
    Air = 0,
    /// Light porous tile; diggable, traversable by some types.
    Sand = 1,
    /// Medium porous tile.
    Dirt = 2,
    /// Heavy porous tile.
    Gravel = 3,
    /// Lethal: the first agent to enter drowns and leaves a corpse bridge.
    Water = 4,
    /// Open like air; may be dug back into water.
    CorpseBridge = 5,
    /// Impassable and indestructible.
    Stone = 6,
    /// Not visible this turn (fog of war).
    #[default]
    Unseen = 0xff,
}

impl TileType {
    pub const ALL: [TileType; NUM_TILE_TYPES] = [
        TileType::Air,
        TileType::Sand,
        TileType::Dirt,
        TileType::Gravel,
        TileType::Water,
        TileType::CorpseBridge,
        TileType::Stone,
    ];

    pub fn from_u8(v: u8) -> Option<TileType> {
        match v {
            0    => Some(TileType::Air),
            1    => Some(TileType::Sand),
            2    => Some(TileType::Dirt),
            3    => Some(TileType::Gravel),
            4    => Some(TileType::Water),
            5    => Some(TileType::CorpseBridge),
            6    => Some(TileType::Stone),
            0xff => Some(TileType::Unseen),
            _    => None,
        }
    }

    /// Index into per-tile-type tables; `None` for `Unseen`.
    #[inline]
    pub fn table_index(self) -> Option<usize> {
        match self {
            TileType::Unseen => None,
            other            => Some(other as usize),
        }
    }

    #[inline]
    pub fn is_unseen(self) -> bool {
        self == TileType::Unseen
    }

    /// Sand, dirt and gravel.
    #[inline]
    pub fn is_porous(self) -> bool {
        matches!(self, TileType::Sand | TileType::Dirt | TileType::Gravel)
    }
}

// ── Agents ────────────────────────────────────────────────────────────────────

/// Permanent class of an agent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AgentType {
    Scout = 0,
    Worker = 1,
    Soldier = 2,
    Queen = 3,
}

impl AgentType {
    pub const ALL: [AgentType; NUM_AGENT_TYPES] = [
        AgentType::Scout,
        AgentType::Worker,
        AgentType::Soldier,
        AgentType::Queen,
    ];

    pub fn from_u8(v: u8) -> Option<AgentType> {
        AgentType::ALL.get(v as usize).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The queen order that births an agent of this type.
    pub fn birth_order(self) -> OrderCode {
        match self {
            AgentType::Scout   => OrderCode::BirthScout,
            AgentType::Worker  => OrderCode::BirthWorker,
            AgentType::Soldier => OrderCode::BirthSoldier,
            AgentType::Queen   => OrderCode::BirthQueen,
        }
    }
}

/// Transient status flags reported for an owned or observed agent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AgentState {
    #[default]
    Normal = 0,
    Dead = 1,
    HoldingFood = 2,
    HoldingSand = 3,
    HoldingDirt = 4,
    HoldingGravel = 5,
}

impl AgentState {
    #[inline]
    pub fn is_carrying(self) -> bool {
        !matches!(self, AgentState::Normal | AgentState::Dead)
    }
}

/// Outcome of an agent's previous order, as reported by the host.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum OrderResult {
    WasCreated = 0,
    KilledByEnemy,
    KilledByWater,
    KilledBySuffocation,
    KilledByStarvation,
    KilledByPenalty,
    SuccessHeld,
    SuccessMoved,
    SuccessDug,
    SuccessPickup,
    SuccessDrop,
    SuccessBirthed,
    SuccessGaveBirth,
    SuccessSuicide,
    ErrorBadAntId,
    ErrorExhausted,
    ErrorCantCarryFood,
    ErrorCantCarryTile,
    ErrorCantBirth,
    ErrorCantDigInvalidTile,
    ErrorCantDigWhileCarrying,
    ErrorMoveBlocked,
    ErrorOutOfBounds,
    ErrorNoFoodPresent,
    ErrorAlreadyCarryingFood,
    ErrorSquareNotEmpty,
    ErrorNotCarrying,
    ErrorInsufficientFood,
    ErrorMaximumPopulationReached,
}

impl OrderResult {
    /// `true` when the previous move failed because the destination was
    /// blocked or off the map; the agent's cached path is no longer valid.
    #[inline]
    pub fn invalidates_path(self) -> bool {
        matches!(self, OrderResult::ErrorMoveBlocked | OrderResult::ErrorOutOfBounds)
    }
}

/// One discrete action for one agent.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum OrderCode {
    #[default]
    Hold = 0,
    MoveEast,
    MoveNorth,
    MoveWest,
    MoveSouth,
    /// Does not cause dig exhaustion.
    DigHere,
    DigEast,
    DigNorth,
    DigWest,
    DigSouth,
    PickUpFood,
    PickUpTile,
    DropCarriedObject,
    BirthScout,
    BirthWorker,
    BirthSoldier,
    BirthQueen,
    Suicide,
    EmoteHappy,
    EmoteSad,
    EmoteAngry,
    EmoteTaunt,
    EmoteDance,
}

impl OrderCode {
    /// The direction of a move order, `None` for everything else.
    #[inline]
    pub fn move_direction(self) -> Option<Direction> {
        match self {
            OrderCode::MoveEast  => Some(Direction::East),
            OrderCode::MoveNorth => Some(Direction::North),
            OrderCode::MoveWest  => Some(Direction::West),
            OrderCode::MoveSouth => Some(Direction::South),
            _                    => None,
        }
    }

    #[inline]
    pub fn is_move(self) -> bool {
        self.move_direction().is_some()
    }
}

/// Per-turn status of one owned agent.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentReport {
    pub agent: AgentId,
    pub coord: TileCoord,
    /// Turns until the agent may act again; non-HOLD orders fail while > 0.
    pub exhaustion: i16,
    pub agent_type: AgentType,
    pub state: AgentState,
    pub result: OrderResult,
}

impl AgentReport {
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.state == AgentState::Dead
    }

    #[inline]
    pub fn can_act(&self) -> bool {
        !self.is_dead() && self.exhaustion == 0
    }
}

/// An agent owned by another player, visible this turn.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservedAgent {
    pub agent: AgentId,
    pub player: PlayerId,
    pub team: TeamId,
    pub coord: TileCoord,
    pub agent_type: AgentType,
    pub state: AgentState,
    pub last_action: OrderCode,
}

// ── Turn snapshot ─────────────────────────────────────────────────────────────

/// Everything the host tells a player at the start of one turn.
///
/// `observed_tiles` and `food` are flat `width²` buffers indexed by
/// `y * width + x`.  Cells hidden by fog of war carry `TileType::Unseen`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurnSnapshot {
    pub tick: Tick,
    pub current_nutrients: i32,
    pub num_faults: i32,
    pub reports: Vec<AgentReport>,
    pub observed_agents: Vec<ObservedAgent>,
    pub observed_tiles: Vec<TileType>,
    pub food: Vec<bool>,
}

impl TurnSnapshot {
    /// A fully fogged snapshot for a `width × width` map.
    pub fn fogged(tick: Tick, width: u16) -> Self {
        let cells = width as usize * width as usize;
        Self {
            tick,
            observed_tiles: vec![TileType::Unseen; cells],
            food: vec![false; cells],
            ..Self::default()
        }
    }
}

// ── Orders ────────────────────────────────────────────────────────────────────

/// One entry of the outbound order batch.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentOrder {
    pub agent: AgentId,
    pub order: OrderCode,
}

/// The outbound batch for one turn.  Agents without an entry idle.
///
/// The host faults a player that orders the same agent twice, so `push`
/// refuses duplicates instead of trusting callers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnOrders {
    orders: Vec<AgentOrder>,
}

impl TurnOrders {
    pub fn new() -> Self {
        Self { orders: Vec::with_capacity(MAX_ORDERS_PER_PLAYER) }
    }

    /// Append an order.  Returns `false` (and changes nothing) if `agent`
    /// already has an order this turn or the batch is full.
    pub fn push(&mut self, agent: AgentId, order: OrderCode) -> bool {
        if self.orders.len() >= MAX_ORDERS_PER_PLAYER || self.order_for(agent).is_some() {
            return false;
        }
        self.orders.push(AgentOrder { agent, order });
        true
    }

    pub fn order_for(&self, agent: AgentId) -> Option<OrderCode> {
        self.orders.iter().find(|o| o.agent == agent).map(|o| o.order)
    }

    pub fn clear(&mut self) {
        self.orders.clear();
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgentOrder> + '_ {
        self.orders.iter()
    }

    pub fn as_slice(&self) -> &[AgentOrder] {
        &self.orders
    }
}

// ── Match setup ───────────────────────────────────────────────────────────────

/// Stats and capabilities of one agent type for this match.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentTypeInfo {
    pub cost_to_birth: i32,
    pub upkeep_per_turn: i32,
    /// Taxicab radius of vision.
    pub visibility_range: i32,
    pub combat_strength: i32,
    pub can_carry_food: bool,
    pub can_carry_tiles: bool,
    pub can_birth: bool,
    /// Exhaustion gained by moving into each tile type, indexed by
    /// `TileType::table_index`.  `TILE_IMPASSABLE` means the type cannot
    /// enter that terrain at all.
    pub move_exhaust: [i32; NUM_TILE_TYPES],
    /// Exhaustion gained by remote-digging each tile type.
    pub dig_exhaust: [i32; NUM_TILE_TYPES],
}

impl AgentTypeInfo {
    /// Representative stats used when the host sends none (and in tests).
    pub fn default_for(agent_type: AgentType) -> Self {
        const X: i32 = TILE_IMPASSABLE;
        //                      air sand dirt grav water bridge stone
        let (move_exhaust, cost, vis, strength) = match agent_type {
            AgentType::Scout   => ([0, 1, 2, 3, 0, 0, X], 10, 8, 1),
            AgentType::Worker  => ([0, 2, 4, 6, 0, 0, X], 20, 3, 2),
            AgentType::Soldier => ([0, X, X, X, 0, 0, X], 40, 4, 6),
            AgentType::Queen   => ([0, X, X, X, 0, 0, X], 500, 5, 10),
        };
        Self {
            cost_to_birth: cost,
            upkeep_per_turn: 1,
            visibility_range: vis,
            combat_strength: strength,
            can_carry_food: agent_type == AgentType::Worker,
            can_carry_tiles: agent_type == AgentType::Worker,
            can_birth: agent_type == AgentType::Queen,
            move_exhaust,
            dig_exhaust: [X, 1, 2, 4, X, 1, X],
        }
    }
}

/// Match-wide rules announced before the first turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchInfo {
    pub num_players: u8,
    /// Width and height of the (always square) map.
    pub map_width: u16,
    pub fog_of_war: bool,
    pub colony_max_population: i32,
    pub starting_nutrients: i32,
    pub agent_types: [AgentTypeInfo; NUM_AGENT_TYPES],
}

impl MatchInfo {
    pub fn with_width(map_width: u16) -> Self {
        Self {
            num_players: 2,
            map_width,
            fog_of_war: true,
            colony_max_population: MAX_AGENTS_PER_PLAYER as i32,
            starting_nutrients: 2_000,
            agent_types: AgentType::ALL.map(AgentTypeInfo::default_for),
        }
    }

    #[inline]
    pub fn agent_type(&self, agent_type: AgentType) -> &AgentTypeInfo {
        &self.agent_types[agent_type.index()]
    }
}

/// What the host hands a player once, before the match starts.
#[derive(Clone, Debug, PartialEq)]
pub struct StartupInfo {
    pub match_info: MatchInfo,
    pub player: PlayerId,
    pub team: TeamId,
    /// How many threads the host will lend via `thread_entry` (≥ 1).
    pub expected_thread_count: u32,
    /// Wall-clock budget for each host → player call.
    pub max_turn_secs: f64,
}
