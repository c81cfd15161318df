use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
};

use derive_more::Display;
use derive_new::new;
use log::debug;
use serde::{Deserialize, Serialize};

pub mod load;

/// One grid cell marker. Grids are immutable once built; a search never
/// flips a cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Cell {
    Free,
    Blocked,
}

#[derive(Debug, Display)]
pub enum GridError {
    #[display(fmt = "Grid has no cells")]
    Empty,
    #[display(fmt = "Grid rows have unequal lengths")]
    Ragged,
}

#[derive(Debug, Display)]
pub enum FindPathError {
    #[display(fmt = "Start out of bounds")]
    StartOutOfBounds,
    #[display(fmt = "Goal out of bounds")]
    GoalOutOfBounds,
}

/// Grid position. `x` is the row index and `y` the column index; bounds
/// checks compare `x` against the row count and `y` against the row
/// length, so callers must keep this axis order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, new)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Frontier/visited bookkeeping for one grid position. Nodes live in an
/// arena owned by a single `find_path` call; `parent` is the arena index
/// of the node this one was reached from.
#[derive(Debug, new)]
struct SearchNode {
    point: Point,
    g: f64,
    h: f64,
    parent: Option<usize>,
}

impl SearchNode {
    fn f(&self) -> f64 {
        self.g + self.h
    }
}

#[derive(Debug)]
struct Direction {
    dx: i32,
    dy: i32,
}

impl Direction {
    const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

const UP: Direction = Direction::new(-1, 0);
const DOWN: Direction = Direction::new(1, 0);
const LEFT: Direction = Direction::new(0, -1);
const RIGHT: Direction = Direction::new(0, 1);

// Generation order is fixed. The frontier is a stack, so the last admitted
// direction is expanded first; changing this order changes the path.
const DIRECTIONS: [Direction; 4] = [UP, DOWN, LEFT, RIGHT];

pub struct SearchGrid {
    grid: Vec<Vec<Cell>>,
}

impl SearchGrid {
    pub fn new(grid: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        if grid.is_empty() || grid[0].is_empty() {
            return Err(GridError::Empty);
        }

        let cols = grid[0].len();
        if grid.iter().any(|row| row.len() != cols) {
            return Err(GridError::Ragged);
        }

        Ok(Self { grid })
    }

    /// Builds a grid from integer rows: 0 is `Free`, anything else is
    /// `Blocked`.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, GridError> {
        let grid = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|b| if b == 0 { Cell::Free } else { Cell::Blocked })
                    .collect()
            })
            .collect();

        Self::new(grid)
    }

    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    pub fn cols(&self) -> usize {
        self.grid[0].len()
    }

    pub fn is_free(&self, point: &Point) -> bool {
        self.grid[point.x as usize][point.y as usize] == Cell::Free
    }

    /**
     * Returns a path from start to goal, inclusive of both. Depth-first:
     * the frontier is a stack, so the result is a path, not the shortest
     * one. None if no path is found.
     * Err if start or goal is out of bounds.
     */
    pub fn find_path(
        &self,
        start: &Point,
        goal: &Point,
    ) -> Result<Option<Vec<Point>>, FindPathError> {
        if !self.in_bounds(start) {
            return Err(FindPathError::StartOutOfBounds);
        }

        if !self.in_bounds(goal) {
            return Err(FindPathError::GoalOutOfBounds);
        }

        Ok(self.stack_search(*start, *goal))
    }

    /// Core loop. Keeps A*-style g/h bookkeeping per node but pops LIFO;
    /// f() is logged, never used to order the frontier. Superseded nodes
    /// may still sit on the stack and get popped later with a stale g.
    fn stack_search(&self, start: Point, goal: Point) -> Option<Vec<Point>> {
        let mut nodes = Vec::new();
        let mut open = Vec::new();
        let mut best: HashMap<usize, usize> = HashMap::new();

        nodes.push(SearchNode::new(start, 0.0, heuristic(&start, &goal), None));
        open.push(0);
        best.insert(self.key(&start), 0);

        while let Some(idx) = open.pop() {
            let current = &nodes[idx];
            let (current_point, current_g) = (current.point, current.g);

            debug!("curr:{}", current_point);
            debug!("f:{} g:{} h:{}", current.f(), current.g, current.h);

            if current_point == goal {
                debug!("found path");
                return Some(reconstruct_path(&nodes, idx));
            }

            for mut neighbor in self.neighbors(&nodes[idx], idx) {
                let tentative_g = current_g + 1.0;
                let k = self.key(&neighbor.point);

                // Admit when the position is unseen, or when this route
                // beats the best-known g for it. The table tracks the best
                // node per position; the stack may keep older ones.
                let admit = match best.get(&k) {
                    None => true,
                    Some(&i) => tentative_g < nodes[i].g,
                };

                if !admit {
                    debug!("already have g for {}", neighbor.point);
                    continue;
                }

                neighbor.g = tentative_g;
                neighbor.h = heuristic(&neighbor.point, &goal);
                neighbor.parent = Some(idx);

                let ni = nodes.len();
                nodes.push(neighbor);
                open.push(ni);
                best.insert(k, ni);
            }
        }

        debug!("no path found");
        None
    }

    /// Up to 4 cardinal candidates in fixed order (row-1, row+1, col-1,
    /// col+1), bounds- and Free-checked. The h assigned here is relative
    /// to the generating node; the search loop replaces it with the
    /// goal-relative value on admission.
    fn neighbors(&self, node: &SearchNode, parent: usize) -> Vec<SearchNode> {
        let mut neighbors = Vec::new();

        for dir in DIRECTIONS {
            let candidate = Point::new(node.point.x + dir.dx, node.point.y + dir.dy);

            if !self.in_bounds(&candidate) || !self.is_free(&candidate) {
                continue;
            }

            neighbors.push(SearchNode::new(
                candidate,
                node.g + 1.0,
                heuristic(&candidate, &node.point),
                Some(parent),
            ));
        }

        neighbors
    }

    // Row bound against the row count, column bound against the first
    // row's length. Safe because new() rejects ragged grids.
    fn in_bounds(&self, point: &Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && point.x < self.grid.len() as i32
            && point.y < self.grid[0].len() as i32
    }

    fn key(&self, point: &Point) -> usize {
        point.x as usize * self.cols() + point.y as usize
    }
}

fn reconstruct_path(nodes: &[SearchNode], goal_idx: usize) -> Vec<Point> {
    let mut path = Vec::new();
    let mut cursor = Some(goal_idx);

    while let Some(i) = cursor {
        path.push(nodes[i].point);
        cursor = nodes[i].parent;
    }

    path.reverse();
    path
}

fn heuristic(a: &Point, b: &Point) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    (dx * dx + dy * dy).sqrt()
}
