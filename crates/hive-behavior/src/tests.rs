//! Unit tests for hive-behavior.

#[cfg(test)]
mod helpers {
    use hive_core::{
        AgentId, AgentReport, AgentState, AgentType, MatchInfo, ObservedAgent, OrderResult,
        PlayerConfig, Tick, TileCoord, TileType,
    };
    use hive_world::WorldModel;

    use crate::{ColonyCensus, TurnContext};

    pub fn report(id: u32, agent_type: AgentType, x: i16, y: i16) -> AgentReport {
        AgentReport {
            agent: AgentId(id),
            coord: TileCoord::new(x, y),
            exhaustion: 0,
            agent_type,
            state: AgentState::Normal,
            result: OrderResult::SuccessHeld,
        }
    }

    /// Owns everything a `TurnContext` borrows.
    pub struct Harness {
        pub world:      WorldModel,
        pub census:     ColonyCensus,
        pub config:     PlayerConfig,
        pub match_info: MatchInfo,
        pub enemies:    Vec<ObservedAgent>,
        pub nutrients:  i32,
    }

    impl Harness {
        /// An all-air, fully seen `width × width` map.
        pub fn new(width: u16) -> Self {
            let mut world = WorldModel::new(width, true).unwrap();
            let cells = width as usize * width as usize;
            world
                .merge_perception(&vec![TileType::Air; cells], &vec![false; cells], Tick(0))
                .unwrap();
            Self {
                world,
                census: ColonyCensus::default(),
                config: PlayerConfig { map_width: width, ..PlayerConfig::default() },
                match_info: MatchInfo::with_width(width),
                enemies: Vec::new(),
                nutrients: 10_000,
            }
        }

        pub fn ctx(&mut self, tick: u32, queen: Option<TileCoord>) -> TurnContext<'_> {
            TurnContext {
                tick: Tick(tick),
                nutrients: self.nutrients,
                world: &mut self.world,
                census: &self.census,
                queen,
                enemies: &self.enemies,
                config: &self.config,
                match_info: &self.match_info,
            }
        }
    }
}

// ── Census ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod census {
    use hive_core::{AgentState, AgentType};

    use super::helpers::report;
    use crate::ColonyCensus;

    #[test]
    fn counts_only_the_living() {
        let mut dead = report(3, AgentType::Worker, 0, 0);
        dead.state = AgentState::Dead;
        let reports = [
            report(1, AgentType::Queen, 0, 0),
            report(2, AgentType::Worker, 0, 0),
            dead,
            report(4, AgentType::Worker, 1, 0),
        ];
        let census = ColonyCensus::from_reports(&reports);
        assert_eq!(census.count(AgentType::Worker), 2);
        assert_eq!(census.count(AgentType::Queen), 1);
        assert_eq!(census.count(AgentType::Soldier), 0);
        assert_eq!(census.total(), 3);
    }
}

// ── Controller pool ───────────────────────────────────────────────────────────

#[cfg(test)]
mod pool {
    use hive_core::{AgentId, AgentType, OrderCode, OrderResult, TileCoord};
    use hive_schedule::{RepathTarget, RouteGoal, RouteRequest};
    use hive_world::{Path, SearchOutcome};

    use super::helpers::report;
    use crate::{BehaviorError, ControllerPool};

    #[test]
    fn acquire_creates_then_updates() {
        let mut pool = ControllerPool::new(4, 8, 0);
        pool.acquire(report(5, AgentType::Worker, 1, 1)).unwrap();
        assert_eq!(pool.len(), 1);
        let ctrl = pool.acquire(report(5, AgentType::Worker, 2, 1)).unwrap();
        assert_eq!(ctrl.coord, TileCoord::new(2, 1));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn exhaustion_is_recoverable() {
        let mut pool = ControllerPool::new(2, 8, 0);
        pool.acquire(report(1, AgentType::Worker, 0, 0)).unwrap();
        pool.acquire(report(2, AgentType::Worker, 0, 0)).unwrap();
        let err = pool.acquire(report(3, AgentType::Worker, 0, 0)).unwrap_err();
        assert!(matches!(err, BehaviorError::PoolExhausted { capacity: 2 }));
        assert!(pool.contains(AgentId(1)) && pool.contains(AgentId(2)));
    }

    #[test]
    fn released_slots_are_reused() {
        let mut pool = ControllerPool::new(2, 8, 0);
        pool.acquire(report(1, AgentType::Worker, 0, 0)).unwrap();
        pool.acquire(report(2, AgentType::Worker, 0, 0)).unwrap();
        assert!(pool.release(AgentId(1)).is_some());
        assert!(pool.release(AgentId(1)).is_none());
        pool.acquire(report(3, AgentType::Scout, 0, 0)).unwrap();
        assert_eq!(pool.agents(), vec![AgentId(2), AgentId(3)]);
    }

    #[test]
    fn blocked_move_invalidates_path() {
        let mut pool = ControllerPool::new(2, 8, 0);
        let ctrl = pool.acquire(report(1, AgentType::Worker, 0, 0)).unwrap();
        let path = Path { orders: vec![OrderCode::MoveEast; 3], outcome: SearchOutcome::Found, cost: 3.0, expanded: 3 };
        ctrl.path.install(&path, TileCoord::new(3, 0));

        let mut bounced = report(1, AgentType::Worker, 0, 0);
        bounced.result = OrderResult::ErrorMoveBlocked;
        let ctrl = pool.acquire(bounced).unwrap();
        assert!(ctrl.path.is_exhausted());
    }

    #[test]
    fn repath_target_round_trip() {
        let mut pool = ControllerPool::new(2, 8, 0);
        pool.acquire(report(1, AgentType::Worker, 0, 0)).unwrap();
        assert_eq!(pool.route_request(AgentId(1)), None, "no goal yet");

        let goal = TileCoord::new(2, 0);
        pool.get_mut(AgentId(1)).unwrap().goal = Some(RouteGoal::Tile(goal));
        let req = pool.route_request(AgentId(1)).unwrap();
        assert_eq!(
            req,
            RouteRequest { start: TileCoord::new(0, 0), goal: RouteGoal::Tile(goal), agent_type: AgentType::Worker }
        );

        let path = Path { orders: vec![OrderCode::MoveEast; 2], outcome: SearchOutcome::Found, cost: 2.0, expanded: 2 };
        pool.install_path(AgentId(1), goal, path);
        assert_eq!(pool.get(AgentId(1)).unwrap().path.goal(), Some(goal));
        assert_eq!(pool.next_order(AgentId(1)), OrderCode::MoveEast);
        assert_eq!(pool.next_order(AgentId(1)), OrderCode::MoveEast);
        assert_eq!(pool.next_order(AgentId(1)), OrderCode::Hold);
        assert_eq!(pool.next_order(AgentId(99)), OrderCode::Hold);
    }
}

// ── Colony rules ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod colony {
    use hive_core::{
        AgentId, AgentState, AgentType, ObservedAgent, OrderCode, PlayerId, TeamId, TileCoord,
    };

    use hive_world::{Path, SearchOutcome};

    use super::helpers::{Harness, report};
    use crate::{AgentController, BehaviorModel, ColonyBehavior, ColonyCensus, Decision};

    fn controller(id: u32, agent_type: AgentType, x: i16, y: i16) -> AgentController {
        AgentController::new(report(id, agent_type, x, y), 32, 7)
    }

    #[test]
    fn queen_births_workers_while_food_is_visible() {
        let mut h = Harness::new(8);
        h.world.set_tile(TileCoord::new(5, 5), hive_core::TileType::Air, true);
        let mut q = controller(1, AgentType::Queen, 0, 0);
        let d = ColonyBehavior.decide(&mut q, &mut h.ctx(1, Some(TileCoord::new(0, 0))));
        assert_eq!(d, Decision::Act(OrderCode::BirthWorker));
    }

    #[test]
    fn queen_waits_without_food_or_nutrients() {
        let mut h = Harness::new(8);
        let mut q = controller(1, AgentType::Queen, 0, 0);
        let d = ColonyBehavior.decide(&mut q, &mut h.ctx(1, Some(TileCoord::new(0, 0))));
        assert_eq!(d, Decision::Idle);

        h.world.set_tile(TileCoord::new(5, 5), hive_core::TileType::Air, true);
        h.nutrients = 0;
        let d = ColonyBehavior.decide(&mut q, &mut h.ctx(1, Some(TileCoord::new(0, 0))));
        assert_eq!(d, Decision::Idle);
    }

    #[test]
    fn queen_births_a_soldier_after_threshold() {
        let mut h = Harness::new(8);
        let mut q = controller(1, AgentType::Queen, 0, 0);
        let early = h.config.soldiers_after_turn - 1;
        let late = h.config.soldiers_after_turn;
        assert_eq!(ColonyBehavior.decide(&mut q, &mut h.ctx(early, None)), Decision::Idle);
        assert_eq!(
            ColonyBehavior.decide(&mut q, &mut h.ctx(late, None)),
            Decision::Act(OrderCode::BirthSoldier)
        );

        h.census = ColonyCensus::from_reports(&[report(9, AgentType::Soldier, 1, 1)]);
        assert_eq!(ColonyBehavior.decide(&mut q, &mut h.ctx(late, None)), Decision::Idle);
    }

    #[test]
    fn worker_reserves_nearest_food_and_requests_route() {
        let mut h = Harness::new(10);
        let near = TileCoord::new(3, 0);
        h.world.set_tile(near, hive_core::TileType::Air, true);
        h.world.set_tile(TileCoord::new(9, 9), hive_core::TileType::Air, true);

        let mut w = controller(2, AgentType::Worker, 0, 0);
        let d = ColonyBehavior.decide(&mut w, &mut h.ctx(1, Some(TileCoord::new(0, 0))));
        assert!(matches!(d, Decision::Repath { goal, .. } if goal == near));
        assert_eq!(w.job, Some(near));
        assert_eq!(h.world.reserved_by(near), Some(AgentId(2)));

        // a second worker skips the reserved tile
        let mut w2 = controller(3, AgentType::Worker, 0, 0);
        let d = ColonyBehavior.decide(&mut w2, &mut h.ctx(1, Some(TileCoord::new(0, 0))));
        assert!(matches!(d, Decision::Repath { goal, .. } if goal == TileCoord::new(9, 9)));
    }

    #[test]
    fn worker_picks_up_on_arrival_and_releases() {
        let mut h = Harness::new(6);
        let food = TileCoord::new(2, 2);
        h.world.set_tile(food, hive_core::TileType::Air, true);
        let mut w = controller(2, AgentType::Worker, 2, 2);
        let d = ColonyBehavior.decide(&mut w, &mut h.ctx(1, None));
        assert_eq!(d, Decision::Act(OrderCode::PickUpFood));
        assert_eq!(h.world.reserved_by(food), None);
        assert_eq!(w.job, None);
    }

    #[test]
    fn loaded_worker_returns_to_queen_and_drops() {
        let mut h = Harness::new(6);
        let queen = TileCoord::new(4, 4);
        let mut w = controller(2, AgentType::Worker, 1, 1);
        w.report.state = AgentState::HoldingFood;
        let d = ColonyBehavior.decide(&mut w, &mut h.ctx(1, Some(queen)));
        assert!(matches!(d, Decision::Repath { goal, .. } if goal == queen));

        w.coord = queen;
        let d = ColonyBehavior.decide(&mut w, &mut h.ctx(2, Some(queen)));
        assert_eq!(d, Decision::Act(OrderCode::DropCarriedObject));
    }

    #[test]
    fn worker_without_food_wanders() {
        let mut h = Harness::new(6);
        let mut w = controller(2, AgentType::Worker, 3, 3);
        let d = ColonyBehavior.decide(&mut w, &mut h.ctx(1, None));
        assert!(matches!(d, Decision::Act(o) if o.is_move()));
    }

    #[test]
    fn soldier_engages_visible_enemy_urgently() {
        let mut h = Harness::new(10);
        h.enemies.push(ObservedAgent {
            agent: AgentId(500),
            player: PlayerId(1),
            team: TeamId(1),
            coord: TileCoord::new(4, 0),
            agent_type: AgentType::Worker,
            state: AgentState::Normal,
            last_action: OrderCode::Hold,
        });
        let mut s = controller(3, AgentType::Soldier, 0, 0);
        let d = ColonyBehavior.decide(&mut s, &mut h.ctx(200, None));
        assert_eq!(
            d,
            Decision::Repath { goal: TileCoord::new(4, 0), priority: h.config.urgent_priority }
        );
    }

    #[test]
    fn soldier_steps_onto_adjacent_enemy_without_search() {
        let mut h = Harness::new(10);
        h.enemies.push(ObservedAgent {
            agent: AgentId(501),
            player: PlayerId(1),
            team: TeamId(1),
            coord: TileCoord::new(5, 6),
            agent_type: AgentType::Soldier,
            state: AgentState::Normal,
            last_action: OrderCode::Hold,
        });
        let mut s = controller(3, AgentType::Soldier, 5, 5);
        let d = ColonyBehavior.decide(&mut s, &mut h.ctx(200, None));
        assert_eq!(d, Decision::Act(OrderCode::MoveNorth));
    }

    #[test]
    fn soldier_guards_queen() {
        let mut h = Harness::new(10);
        let queen = TileCoord::new(8, 8);
        let mut s = controller(3, AgentType::Soldier, 0, 0);
        let d = ColonyBehavior.decide(&mut s, &mut h.ctx(200, Some(queen)));
        assert!(matches!(d, Decision::Repath { goal, .. } if goal == queen));

        let mut near = controller(4, AgentType::Soldier, 7, 8);
        assert_eq!(ColonyBehavior.decide(&mut near, &mut h.ctx(200, Some(queen))), Decision::Idle);
    }

    /// Only the left half of an 8-wide map has been seen.
    fn half_fogged(h: &mut Harness) {
        h.world = hive_world::WorldModel::new(8, true).unwrap();
        let mut tiles = vec![hive_core::TileType::Unseen; 64];
        for y in 0..8 {
            for x in 0..4 {
                tiles[y * 8 + x] = hive_core::TileType::Air;
            }
        }
        h.world.merge_perception(&tiles, &[false; 64], hive_core::Tick(0)).unwrap();
    }

    #[test]
    fn scout_asks_the_scheduler_for_unseen_ground() {
        let mut h = Harness::new(8);
        half_fogged(&mut h);

        let mut sc = controller(6, AgentType::Scout, 0, 0);
        let d = ColonyBehavior.decide(&mut sc, &mut h.ctx(1, None));
        assert_eq!(d, Decision::Explore { priority: 0.0 });
        // routing is left to the scheduler
        assert!(sc.path.is_exhausted());
        assert_eq!(sc.path.goal(), None);
    }

    #[test]
    fn scout_follows_an_installed_route() {
        let mut h = Harness::new(8);
        half_fogged(&mut h);
        let mut sc = controller(6, AgentType::Scout, 0, 0);
        let path = Path { orders: vec![OrderCode::MoveEast; 4], outcome: SearchOutcome::Found, cost: 4.0, expanded: 4 };
        sc.path.install(&path, TileCoord::new(4, 0));
        assert_eq!(ColonyBehavior.decide(&mut sc, &mut h.ctx(1, None)), Decision::FollowPath);
    }

    #[test]
    fn scout_wanders_once_the_map_is_known() {
        let mut h = Harness::new(8);
        assert_eq!(h.world.unexplored(), 0);
        let mut sc = controller(6, AgentType::Scout, 3, 3);
        let d = ColonyBehavior.decide(&mut sc, &mut h.ctx(1, None));
        assert!(matches!(d, Decision::Act(order) if order.is_move()));
    }

    #[test]
    fn scout_wanders_after_a_route_that_ends_underfoot() {
        let mut h = Harness::new(8);
        half_fogged(&mut h);
        let mut sc = controller(6, AgentType::Scout, 2, 2);
        sc.path.install(&Path::hold(SearchOutcome::Unreachable, 0), TileCoord::new(2, 2));
        sc.path.next_order();
        let d = ColonyBehavior.decide(&mut sc, &mut h.ctx(2, None));
        assert!(matches!(d, Decision::Act(order) if order.is_move()));
    }

    #[test]
    fn dead_worker_releases_its_reservation() {
        let mut h = Harness::new(6);
        let food = TileCoord::new(5, 5);
        h.world.set_tile(food, hive_core::TileType::Air, true);
        let mut w = controller(2, AgentType::Worker, 0, 0);
        ColonyBehavior.decide(&mut w, &mut h.ctx(1, None));
        assert_eq!(h.world.reserved_by(food), Some(AgentId(2)));
        ColonyBehavior.on_death(&w, &mut h.ctx(2, None));
        assert_eq!(h.world.reserved_by(food), None);
    }
}
