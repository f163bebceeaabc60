//! Unit tests for hive-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, TileIndex};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(AgentId::default(), AgentId::INVALID);
        assert!(!TileIndex::default().is_valid());
        assert!(TileIndex(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod coord {
    use crate::{Direction, OrderCode, TileCoord};

    #[test]
    fn step_and_opposite_cancel() {
        let c = TileCoord::new(3, 3);
        for dir in Direction::ALL {
            assert_eq!(c.step(dir).step(dir.opposite()), c);
        }
    }

    #[test]
    fn manhattan_counts_moves() {
        assert_eq!(TileCoord::new(0, 0).manhattan(TileCoord::new(4, 0)), 4);
        assert_eq!(TileCoord::new(-1, 2).manhattan(TileCoord::new(2, -2)), 7);
    }

    #[test]
    fn octile_never_exceeds_manhattan() {
        let a = TileCoord::new(0, 0);
        let b = TileCoord::new(5, 3);
        assert!(a.octile(b) <= a.manhattan(b) as f32);
        assert!(a.octile(b) >= 5.0);
    }

    #[test]
    fn greedy_prefers_dominant_axis() {
        let a = TileCoord::new(0, 0);
        assert_eq!(a.greedy_direction_to(TileCoord::new(5, 1)), Some(Direction::East));
        assert_eq!(a.greedy_direction_to(TileCoord::new(-1, -4)), Some(Direction::South));
        // tie goes vertical
        assert_eq!(a.greedy_direction_to(TileCoord::new(2, 2)), Some(Direction::North));
        assert_eq!(a.greedy_direction_to(a), None);
    }

    #[test]
    fn move_orders_round_trip_through_direction() {
        for dir in Direction::ALL {
            assert_eq!(dir.move_order().move_direction(), Some(dir));
        }
        assert_eq!(OrderCode::Hold.move_direction(), None);
        assert!(!Direction::East.dig_order().is_move());
    }
}

#[cfg(test)]
mod time {
    use crate::Tick;

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15).since(Tick(10)), 5);
        assert_eq!(Tick(3).since(Tick(10)), 0);
    }
}

#[cfg(test)]
mod heap {
    use crate::MinHeap;

    fn drain(heap: &mut MinHeap<u32>) -> Vec<f32> {
        std::iter::from_fn(|| heap.pop()).map(|e| e.priority).collect()
    }

    #[test]
    fn pops_in_priority_order() {
        let mut heap = MinHeap::with_capacity(8);
        for (k, p) in [5.0, 3.0, 8.0, 1.0, 4.0].into_iter().enumerate() {
            heap.push(k as u32, p).unwrap();
            assert!(heap.is_valid_heap());
        }
        assert_eq!(drain(&mut heap), vec![1.0, 3.0, 4.0, 5.0, 8.0]);
    }

    #[test]
    fn pop_empty_is_none() {
        let mut heap: MinHeap<u32> = MinHeap::with_capacity(2);
        assert!(heap.pop().is_none());
        assert!(heap.peek().is_none());
    }

    #[test]
    fn push_beyond_capacity_is_refused_without_damage() {
        let mut heap = MinHeap::with_capacity(3);
        heap.push(0u32, 2.0).unwrap();
        heap.push(1, 9.0).unwrap();
        heap.push(2, 4.0).unwrap();
        let err = heap.push(3, 0.5).unwrap_err();
        assert_eq!(err.capacity, 3);
        assert_eq!(heap.len(), 3);
        assert!(!heap.contains(3));
        assert_eq!(drain(&mut heap), vec![2.0, 4.0, 9.0]);
    }

    #[test]
    fn index_of_matches_key_only() {
        let mut heap = MinHeap::with_capacity(4);
        heap.push(10u32, 1.0).unwrap();
        heap.push(20, 2.0).unwrap();
        let idx = heap.index_of(20).unwrap();
        assert_eq!(heap.get(idx).unwrap().key, 20);
        assert_eq!(heap.index_of(30), None);
    }

    #[test]
    fn update_at_decrease_moves_to_front() {
        let mut heap = MinHeap::with_capacity(8);
        for k in 0..6u32 {
            heap.push(k, 10.0 + k as f32).unwrap();
        }
        let idx = heap.index_of(5).unwrap();
        assert!(heap.update_at(idx, 5, 0.0));
        assert!(heap.is_valid_heap());
        assert_eq!(heap.peek().unwrap().key, 5);
    }

    #[test]
    fn update_at_increase_keeps_heap_valid() {
        let mut heap = MinHeap::with_capacity(8);
        for k in 0..7u32 {
            heap.push(k, k as f32).unwrap();
        }
        assert!(heap.update_at(0, 0, 100.0));
        assert!(heap.is_valid_heap());
        assert_eq!(heap.peek().unwrap().key, 1);
        assert_eq!(drain(&mut heap).last().copied(), Some(100.0));
    }

    #[test]
    fn delete_at_removes_by_identity() {
        let mut heap = MinHeap::with_capacity(8);
        for (k, p) in [5.0, 3.0, 8.0, 1.0, 4.0].into_iter().enumerate() {
            heap.push(k as u32, p).unwrap();
        }
        let idx = heap.index_of(2).unwrap(); // priority 8
        let removed = heap.delete_at(idx).unwrap();
        assert_eq!((removed.key, removed.priority), (2, 8.0));
        assert!(heap.is_valid_heap());
        assert_eq!(drain(&mut heap), vec![1.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn delete_at_removes_exactly_that_entry_next_to_neg_infinity() {
        let mut heap = MinHeap::with_capacity(8);
        heap.push(0u32, f32::NEG_INFINITY).unwrap();
        heap.push(1, 2.0).unwrap();
        heap.push(2, 3.0).unwrap();
        heap.push(3, 7.0).unwrap();
        let idx = heap.index_of(3).unwrap();
        let removed = heap.delete_at(idx).unwrap();
        assert_eq!((removed.key, removed.priority), (3, 7.0));
        assert!(heap.contains(0));
        assert!(!heap.contains(3));
        assert!(heap.is_valid_heap());
        assert_eq!(drain(&mut heap), vec![f32::NEG_INFINITY, 2.0, 3.0]);
    }

    #[test]
    fn delete_at_out_of_range_is_none() {
        let mut heap = MinHeap::with_capacity(2);
        heap.push(1u32, 1.0).unwrap();
        assert!(heap.delete_at(5).is_none());
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn mixed_operations_preserve_invariant() {
        let mut heap = MinHeap::with_capacity(64);
        let mut state = 7u32;
        let mut next = || {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (state >> 16) % 1000
        };
        for k in 0..64u32 {
            heap.push(k, next() as f32).unwrap();
        }
        for _ in 0..40 {
            let key = next() % 64;
            if let Some(idx) = heap.index_of(key) {
                heap.update_at(idx, key, next() as f32);
            }
            assert!(heap.is_valid_heap());
        }
        let out = drain(&mut heap);
        assert!(out.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[cfg(test)]
mod protocol {
    use crate::protocol::MAX_ORDERS_PER_PLAYER;
    use crate::{AgentId, AgentType, MatchInfo, OrderCode, TileType, TurnOrders};

    #[test]
    fn tile_type_wire_values() {
        assert_eq!(TileType::from_u8(6), Some(TileType::Stone));
        assert_eq!(TileType::from_u8(0xff), Some(TileType::Unseen));
        assert_eq!(TileType::from_u8(7), None);
        assert_eq!(TileType::Unseen.table_index(), None);
        assert_eq!(TileType::Water.table_index(), Some(4));
    }

    #[test]
    fn orders_reject_duplicates() {
        let mut orders = TurnOrders::new();
        assert!(orders.push(AgentId(1), OrderCode::MoveEast));
        assert!(!orders.push(AgentId(1), OrderCode::Hold));
        assert_eq!(orders.order_for(AgentId(1)), Some(OrderCode::MoveEast));
        assert_eq!(orders.len(), 1);
    }

    #[test]
    fn orders_are_bounded() {
        let mut orders = TurnOrders::new();
        for i in 0..MAX_ORDERS_PER_PLAYER as u32 {
            assert!(orders.push(AgentId(i), OrderCode::Hold));
        }
        assert!(!orders.push(AgentId(9999), OrderCode::Hold));
    }

    #[test]
    fn default_match_info_has_every_type() {
        let info = MatchInfo::with_width(32);
        assert!(info.agent_type(AgentType::Queen).can_birth);
        assert!(info.agent_type(AgentType::Worker).can_carry_food);
        assert!(!info.agent_type(AgentType::Soldier).can_carry_food);
    }
}

#[cfg(test)]
mod config {
    use crate::{MatchInfo, PlayerConfig};

    #[test]
    fn defaults_validate() {
        PlayerConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_zero_caps_and_wide_maps() {
        let cfg = PlayerConfig { repaths_per_turn: 0, ..PlayerConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = PlayerConfig { map_width: 257, ..PlayerConfig::default() };
        assert!(cfg.validate().is_err());
        let cfg = PlayerConfig { max_path_len: 0, ..PlayerConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn urgent_priority_must_sort_before_routine_requests() {
        assert!(PlayerConfig::default().urgent_priority < 0.0);
        for bad in [0.0, 0.5, f32::NAN, f32::NEG_INFINITY] {
            let cfg = PlayerConfig { urgent_priority: bad, ..PlayerConfig::default() };
            assert!(cfg.validate().is_err(), "urgent_priority {bad} accepted");
        }
    }

    #[test]
    fn for_match_takes_width() {
        let cfg = PlayerConfig::for_match(&MatchInfo::with_width(100));
        assert_eq!(cfg.map_width, 100);
        assert_eq!(cfg.tile_count(), 10_000);
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        let items: Vec<u32> = (0..1000).collect();
        for _ in 0..100 {
            assert_eq!(r1.choose(&items), r2.choose(&items));
        }
    }

    #[test]
    fn different_agents_differ() {
        let items: Vec<u32> = (0..1000).collect();
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        let a: Vec<u32> = (0..8).filter_map(|_| r0.choose(&items).copied()).collect();
        let b: Vec<u32> = (0..8).filter_map(|_| r1.choose(&items).copied()).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn choose_from_empty_is_none() {
        let mut r = AgentRng::new(3, AgentId(9));
        assert!(r.choose::<u8>(&[]).is_none());
    }

    #[test]
    fn children_are_independent_and_reproducible() {
        let mut a = SimRng::new(42);
        let mut b = SimRng::new(42);
        let (mut ca, mut cb) = (a.child(1), b.child(1));
        let xs: Vec<u32> = (0..8).map(|_| ca.gen_range(0..1_000_000)).collect();
        let ys: Vec<u32> = (0..8).map(|_| cb.gen_range(0..1_000_000)).collect();
        assert_eq!(xs, ys);
        let mut other = SimRng::new(42).child(2);
        let zs: Vec<u32> = (0..8).map(|_| other.gen_range(0..1_000_000)).collect();
        assert_ne!(xs, zs);
        assert!(!SimRng::new(0).gen_bool(0.0));
    }
}
