//! Pool and shape generation tests

use tui_pipes::core::{GenerationPolicy, Pool, ShapeGenerator, Tile};
use tui_pipes::types::{Connections, DEFAULT_POOL_SIZE};

fn shapes(pool: &Pool) -> Vec<Connections> {
    pool.iter().map(Tile::connections).collect()
}

#[test]
fn test_pool_keeps_its_size() {
    let mut pool = Pool::new(DEFAULT_POOL_SIZE, GenerationPolicy::Classic, 9, 2000);
    for _ in 0..50 {
        let _ = pool.take_next();
        assert_eq!(pool.len(), DEFAULT_POOL_SIZE);
    }
}

#[test]
fn test_take_next_shifts_the_queue() {
    let mut pool = Pool::new(4, GenerationPolicy::Classic, 1234, 2000);
    let before = shapes(&pool);
    let taken = pool.take_next();
    let after = shapes(&pool);

    assert_eq!(taken.connections(), before[0]);
    assert_eq!(&after[..3], &before[1..]);
    assert!(!taken.is_blocked());
    assert_eq!(taken.fill_ms(), 2000);
}

#[test]
fn test_rotate_discards_the_front() {
    let mut pool = Pool::new(3, GenerationPolicy::Classic, 5, 100);
    let before = shapes(&pool);
    pool.rotate();
    assert_eq!(pool.peek_next().connections(), before[1]);
}

#[test]
fn test_same_seed_same_tiles() {
    let mut a = Pool::new(5, GenerationPolicy::Classic, 42, 100);
    let mut b = Pool::new(5, GenerationPolicy::Classic, 42, 100);
    for _ in 0..20 {
        assert_eq!(a.take_next(), b.take_next());
    }
}

#[test]
fn test_junctions_mix_in_tees_and_crosses() {
    let mut generator = ShapeGenerator::new(
        GenerationPolicy::Junctions {
            junction_percent: 50,
        },
        3,
    );
    let drawn: Vec<_> = (0..400).map(|_| generator.next_shape()).collect();
    assert!(drawn.iter().all(|s| s.is_pipe()));
    assert!(drawn.iter().any(|s| s.count() >= 3));
    assert!(drawn.iter().any(|s| s.count() == 2));
}

#[test]
fn test_sequence_cycles() {
    let list = vec![Connections::CROSS, Connections::TOP_RIGHT];
    let mut generator = ShapeGenerator::new(GenerationPolicy::Sequence { shapes: list }, 0);
    let drawn: Vec<_> = (0..5).map(|_| generator.next_shape()).collect();
    assert_eq!(
        drawn,
        vec![
            Connections::CROSS,
            Connections::TOP_RIGHT,
            Connections::CROSS,
            Connections::TOP_RIGHT,
            Connections::CROSS,
        ]
    );
}
