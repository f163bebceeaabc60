//! A scripted stand-in for the tournament host.
//!
//! Rules are deliberately naive: no enemies, no combat, no suffocation.
//! Moves, food handling, digging, births, water deaths and upkeep are
//! enough to drive the colony rules end to end.

use hive_core::{
    AgentId, AgentReport, AgentState, AgentType, Direction, MatchInfo, OrderCode, OrderResult,
    SimRng, Tick, TileCoord, TileType, TurnOrders, TurnSnapshot,
};

/// Nutrients credited for each food item dropped on the queen.
pub const FOOD_VALUE: i32 = 50;

/// Chance per turn that a new food item appears somewhere on open ground.
const FOOD_REGROWTH: f64 = 0.2;

#[derive(Clone, Debug)]
pub struct HostAgent {
    pub id:         AgentId,
    pub coord:      TileCoord,
    pub agent_type: AgentType,
    pub state:      AgentState,
    pub exhaustion: i16,
    pub result:     OrderResult,
}

impl HostAgent {
    fn report(&self) -> AgentReport {
        AgentReport {
            agent:      self.id,
            coord:      self.coord,
            exhaustion: self.exhaustion,
            agent_type: self.agent_type,
            state:      self.state,
            result:     self.result,
        }
    }
}

pub struct Arena {
    pub info:      MatchInfo,
    pub tiles:     Vec<TileType>,
    pub food:      Vec<bool>,
    pub agents:    Vec<HostAgent>,
    pub nutrients: i32,
    pub delivered: u32,
    pub births:    u32,
    pub drowned:   u32,
    next_id:       u32,
}

impl Arena {
    /// Random terrain with a cleared nest in the middle, a queen, two
    /// workers and a scout.
    pub fn generate(info: MatchInfo, rng: &mut SimRng) -> Self {
        let width = info.map_width;
        let cells = width as usize * width as usize;
        let mut tiles = Vec::with_capacity(cells);
        let mut food = Vec::with_capacity(cells);
        for _ in 0..cells {
            let tile = match rng.gen_range(0..100) {
                0..6   => TileType::Stone,
                6..10  => TileType::Water,
                10..18 => TileType::Dirt,
                18..24 => TileType::Sand,
                24..27 => TileType::Gravel,
                _      => TileType::Air,
            };
            food.push(tile == TileType::Air && rng.gen_bool(0.04));
            tiles.push(tile);
        }

        let mid = (width / 2) as i16;
        let nest = TileCoord::new(mid, mid);
        let mut arena = Self {
            nutrients: info.starting_nutrients,
            info,
            tiles,
            food,
            agents: Vec::new(),
            delivered: 0,
            births: 0,
            drowned: 0,
            next_id: 0,
        };
        for y in mid - 2..=mid + 2 {
            for x in mid - 2..=mid + 2 {
                if let Some(i) = arena.index(TileCoord::new(x, y)) {
                    arena.tiles[i] = TileType::Air;
                    arena.food[i] = false;
                }
            }
        }
        arena.spawn(AgentType::Queen, nest);
        arena.spawn(AgentType::Worker, nest.step(Direction::East));
        arena.spawn(AgentType::Worker, nest.step(Direction::West));
        arena.spawn(AgentType::Scout, nest.step(Direction::North));
        arena
    }

    pub fn width(&self) -> u16 {
        self.info.map_width
    }

    fn index(&self, c: TileCoord) -> Option<usize> {
        let w = self.width() as i16;
        (c.x >= 0 && c.y >= 0 && c.x < w && c.y < w).then(|| c.y as usize * w as usize + c.x as usize)
    }

    fn spawn(&mut self, agent_type: AgentType, coord: TileCoord) {
        self.agents.push(HostAgent {
            id: AgentId(self.next_id),
            coord,
            agent_type,
            state: AgentState::Normal,
            exhaustion: 0,
            result: OrderResult::WasCreated,
        });
        self.next_id += 1;
    }

    pub fn live(&self) -> impl Iterator<Item = &HostAgent> + '_ {
        self.agents.iter().filter(|a| a.state != AgentState::Dead)
    }

    pub fn queen(&self) -> Option<&HostAgent> {
        self.live().find(|a| a.agent_type == AgentType::Queen)
    }

    /// What our player sees at `tick`: everything within each live agent's
    /// visibility range, plus a report per agent (the dead included, once).
    pub fn snapshot(&self, tick: Tick) -> TurnSnapshot {
        let width = self.width();
        let mut snap = TurnSnapshot::fogged(tick, width);
        snap.current_nutrients = self.nutrients;
        snap.reports = self.agents.iter().map(HostAgent::report).collect();

        for a in self.live() {
            let r = self.info.agent_type(a.agent_type).visibility_range as i16;
            for dy in -r..=r {
                let span = r - dy.abs();
                for dx in -span..=span {
                    if let Some(i) = self.index(TileCoord::new(a.coord.x + dx, a.coord.y + dy)) {
                        snap.observed_tiles[i] = self.tiles[i];
                        snap.food[i] = self.food[i];
                    }
                }
            }
        }
        snap
    }

    /// Apply one batch of orders and advance the world a turn.
    pub fn apply(&mut self, orders: &TurnOrders, rng: &mut SimRng) {
        // Dead agents were reported once; forget them now.
        self.agents.retain(|a| a.state != AgentState::Dead);

        let queen_at = self.queen().map(|q| q.coord);
        let mut newborns = Vec::new();
        for i in 0..self.agents.len() {
            let order = orders.order_for(self.agents[i].id).unwrap_or(OrderCode::Hold);
            let result = if self.agents[i].exhaustion > 0 && order != OrderCode::Hold {
                OrderResult::ErrorExhausted
            } else {
                self.execute(i, order, queen_at, &mut newborns)
            };
            let a = &mut self.agents[i];
            a.result = result;
            a.exhaustion = (a.exhaustion - 1).max(0);
        }
        for (agent_type, coord) in newborns {
            self.spawn(agent_type, coord);
        }

        let upkeep: i32 = self.live().map(|a| self.info.agent_type(a.agent_type).upkeep_per_turn).sum();
        self.nutrients = (self.nutrients - upkeep).max(0);

        if rng.gen_bool(FOOD_REGROWTH) {
            let i = rng.gen_range(0..self.tiles.len());
            if self.tiles[i] == TileType::Air {
                self.food[i] = true;
            }
        }
    }

    fn execute(
        &mut self,
        i: usize,
        order: OrderCode,
        queen_at: Option<TileCoord>,
        newborns: &mut Vec<(AgentType, TileCoord)>,
    ) -> OrderResult {
        let (coord, agent_type, state) = (self.agents[i].coord, self.agents[i].agent_type, self.agents[i].state);
        let stats = self.info.agent_type(agent_type).clone();

        if let Some(dir) = order.move_direction() {
            let to = coord.step(dir);
            let Some(t) = self.index(to) else { return OrderResult::ErrorOutOfBounds };
            let Some(penalty) = self.tiles[t].table_index().map(|k| stats.move_exhaust[k]) else {
                return OrderResult::ErrorMoveBlocked;
            };
            if penalty < 0 {
                return OrderResult::ErrorMoveBlocked;
            }
            let a = &mut self.agents[i];
            a.coord = to;
            if self.tiles[t] == TileType::Water {
                // The first to enter drowns and leaves a bridge behind.
                self.tiles[t] = TileType::CorpseBridge;
                a.state = AgentState::Dead;
                self.drowned += 1;
                return OrderResult::KilledByWater;
            }
            a.exhaustion += penalty as i16;
            return OrderResult::SuccessMoved;
        }

        if let Some(dir) = Direction::ALL.into_iter().find(|d| d.dig_order() == order) {
            let Some(t) = self.index(coord.step(dir)) else { return OrderResult::ErrorOutOfBounds };
            return self.dig(i, t, &stats.dig_exhaust);
        }

        match order {
            OrderCode::PickUpFood => {
                let Some(t) = self.index(coord) else { return OrderResult::ErrorOutOfBounds };
                if !stats.can_carry_food {
                    OrderResult::ErrorCantCarryFood
                } else if state.is_carrying() {
                    OrderResult::ErrorAlreadyCarryingFood
                } else if !self.food[t] {
                    OrderResult::ErrorNoFoodPresent
                } else {
                    self.food[t] = false;
                    self.agents[i].state = AgentState::HoldingFood;
                    OrderResult::SuccessPickup
                }
            }
            OrderCode::DropCarriedObject => {
                let Some(t) = self.index(coord) else { return OrderResult::ErrorOutOfBounds };
                match state {
                    AgentState::HoldingFood if queen_at == Some(coord) => {
                        self.nutrients += FOOD_VALUE;
                        self.delivered += 1;
                    }
                    AgentState::HoldingFood => self.food[t] = true,
                    AgentState::HoldingSand => self.tiles[t] = TileType::Sand,
                    AgentState::HoldingDirt => self.tiles[t] = TileType::Dirt,
                    AgentState::HoldingGravel => self.tiles[t] = TileType::Gravel,
                    AgentState::Normal | AgentState::Dead => return OrderResult::ErrorNotCarrying,
                }
                self.agents[i].state = AgentState::Normal;
                OrderResult::SuccessDrop
            }
            OrderCode::BirthScout | OrderCode::BirthWorker | OrderCode::BirthSoldier | OrderCode::BirthQueen => {
                let Some(child) = AgentType::ALL.into_iter().find(|t| t.birth_order() == order) else {
                    return OrderResult::ErrorCantBirth;
                };
                let cost = self.info.agent_type(child).cost_to_birth;
                let population = self.live().count() + newborns.len();
                if !stats.can_birth {
                    OrderResult::ErrorCantBirth
                } else if population as i32 >= self.info.colony_max_population {
                    OrderResult::ErrorMaximumPopulationReached
                } else if self.nutrients < cost {
                    OrderResult::ErrorInsufficientFood
                } else {
                    self.nutrients -= cost;
                    self.births += 1;
                    newborns.push((child, coord));
                    OrderResult::SuccessGaveBirth
                }
            }
            OrderCode::Suicide => {
                self.agents[i].state = AgentState::Dead;
                OrderResult::SuccessSuicide
            }
            _ => OrderResult::SuccessHeld,
        }
    }

    fn dig(&mut self, i: usize, t: usize, dig_exhaust: &[i32]) -> OrderResult {
        let tile = self.tiles[t];
        let a = &mut self.agents[i];
        if a.state.is_carrying() {
            return OrderResult::ErrorCantDigWhileCarrying;
        }
        let penalty = tile.table_index().map_or(-1, |k| dig_exhaust[k]);
        if !tile.is_porous() || penalty < 0 {
            return OrderResult::ErrorCantDigInvalidTile;
        }
        a.state = match tile {
            TileType::Sand => AgentState::HoldingSand,
            TileType::Dirt => AgentState::HoldingDirt,
            _ => AgentState::HoldingGravel,
        };
        a.exhaustion += penalty as i16;
        self.tiles[t] = TileType::Air;
        OrderResult::SuccessDug
    }
}
