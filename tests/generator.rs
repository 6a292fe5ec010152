use mouse_maze::constants::{AGENT_START, MAZE_SIZE};
use mouse_maze::map::generator::{generate_maze, MazeGenerator};
use mouse_maze::map::validator::{is_perfect, reachable_cells};
use mouse_maze::map::Cell;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use speculoos::prelude::*;

mod common;

#[test]
fn test_generated_mazes_are_perfect() {
    let generator = MazeGenerator::new(MAZE_SIZE.x, MAZE_SIZE.y);
    for seed in 0..50 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let grid = generator.generate(&mut rng);

        assert_that(&grid.size()).is_equal_to(MAZE_SIZE);
        assert!(grid.is_open(AGENT_START), "seed {seed}: origin must be carved");
        assert!(is_perfect(&grid, AGENT_START), "seed {seed}: maze is not a tree\n{grid}");
    }
}

#[test]
fn test_every_open_cell_is_reachable_from_origin() {
    let mut rng = SmallRng::seed_from_u64(7);
    let grid = generate_maze(20, 15, &mut rng);

    let reachable = reachable_cells(&grid, AGENT_START);
    assert_that(&reachable.len()).is_equal_to(grid.open_count());
    assert!(grid.open_cells().all(|p| reachable.contains(&p)));
}

#[test]
fn test_same_seed_same_maze() {
    let generator = MazeGenerator::new(12, 9);
    let a = generator.generate(&mut SmallRng::seed_from_u64(99));
    let b = generator.generate(&mut SmallRng::seed_from_u64(99));
    assert_that(&a).is_equal_to(&b);
}

#[test]
fn test_different_seeds_usually_differ() {
    let generator = MazeGenerator::new(20, 15);
    let first = generator.generate(&mut SmallRng::seed_from_u64(1));
    let distinct = (2..10).any(|seed| generator.generate(&mut SmallRng::seed_from_u64(seed)) != first);
    assert!(distinct);
}

#[test]
fn test_single_cell_grid_opens_only_origin() {
    let grid = generate_maze(1, 1, &mut SmallRng::seed_from_u64(0));
    assert_that(&grid.open_count()).is_equal_to(1);
    assert_that(&grid.get(AGENT_START)).is_equal_to(Some(Cell::Open));
}

#[test]
fn test_single_column_is_fully_carved() {
    let grid = generate_maze(1, 5, &mut SmallRng::seed_from_u64(3));
    assert_that(&grid.open_count()).is_equal_to(5);
    assert!(is_perfect(&grid, AGENT_START));
}

#[test]
fn test_two_by_two_leaves_one_wall() {
    // Opening the fourth cell would close a loop
    for seed in 0..10 {
        let grid = generate_maze(2, 2, &mut SmallRng::seed_from_u64(seed));
        assert_that(&grid.open_count()).is_equal_to(3);
        assert_that(&grid.open_edge_count()).is_equal_to(2);
    }
}

#[test]
fn test_empty_grid_is_all_wall() {
    let grid = generate_maze(0, 0, &mut SmallRng::seed_from_u64(0));
    assert_that(&grid.cell_count()).is_equal_to(0);
    assert_that(&grid.open_count()).is_equal_to(0);
}
