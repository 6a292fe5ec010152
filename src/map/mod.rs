//! This module defines the maze grid and everything that builds or inspects it.

pub mod direction;
pub mod generator;
pub mod grid;
pub mod level;
pub mod parser;
pub mod validator;

pub use direction::{Direction, Facing};
pub use grid::{Cell, Grid, Position};
pub use level::{Level, LevelFactory};
