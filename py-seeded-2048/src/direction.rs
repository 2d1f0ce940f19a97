//! PyO3 bindings for the Direction enum

use pyo3::prelude::*;
use seeded_2048_lib::engine::Direction;

/// A direction to slide/merge tiles.
#[pyclass(name = "Direction")]
#[derive(Clone, Copy)]
pub struct PyDirection {
    pub(crate) inner: Direction,
}

#[pymethods]
impl PyDirection {
    #[classattr]
    const UP: PyDirection = PyDirection { inner: Direction::Up };

    #[classattr]
    const DOWN: PyDirection = PyDirection { inner: Direction::Down };

    #[classattr]
    const LEFT: PyDirection = PyDirection { inner: Direction::Left };

    #[classattr]
    const RIGHT: PyDirection = PyDirection { inner: Direction::Right };

    fn __repr__(&self) -> String {
        format!("Direction.{}", self.inner)
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __eq__(&self, other: &PyDirection) -> bool {
        self.inner == other.inner
    }

    fn __hash__(&self) -> u64 {
        self.inner.code() as u64
    }
}

impl From<Direction> for PyDirection {
    fn from(inner: Direction) -> Self {
        PyDirection { inner }
    }
}
