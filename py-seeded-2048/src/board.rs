//! PyO3 bindings for Board and Moves

use pyo3::exceptions::PyIndexError;
use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyList};
use seeded_2048_lib::engine::{Board, BoardError, MoveSet, ValuesIter};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::direction::PyDirection;
use crate::{InvalidSeed, MalformedEncoding};

pub(crate) fn to_py_err(err: BoardError) -> PyErr {
    match err {
        BoardError::InvalidSeed(_) => InvalidSeed::new_err(err.to_string()),
        BoardError::MalformedEncoding(_) => MalformedEncoding::new_err(err.to_string()),
    }
}

/// A seeded 4x4 2048 board
#[pyclass(name = "Board")]
#[derive(Clone, Copy)]
pub struct PyBoard {
    inner: Board,
}

#[pymethods]
impl PyBoard {
    /// Start a game from a seed in [0, 2**32)
    #[staticmethod]
    fn from_seed(seed: u64) -> PyResult<Self> {
        Board::from_seed(seed).map(PyBoard::from).map_err(to_py_err)
    }

    /// Rebuild a board from the bytes produced by `bytes(board)`
    #[staticmethod]
    fn from_data(data: &[u8]) -> PyResult<Self> {
        Board::from_data(data).map(PyBoard::from).map_err(to_py_err)
    }

    /// Build a board from 16 row-major exponents and a seed
    #[staticmethod]
    fn from_exponents(exponents: Vec<u8>, seed: u64) -> PyResult<Self> {
        Board::from_exponents(&exponents, seed)
            .map(PyBoard::from)
            .map_err(to_py_err)
    }

    /// The four boards one move away
    fn moves(&self) -> PyMoves {
        self.inner.moves().into()
    }

    /// Apply a single direction
    fn apply(&self, direction: PyDirection) -> Self {
        self.inner.apply(direction.inner).into()
    }

    /// True when no direction changes the board
    fn is_stuck(&self) -> bool {
        self.inner.is_stuck()
    }

    /// The seed this game started from
    #[getter]
    fn seed(&self) -> u64 {
        self.inner.seed()
    }

    /// Get all tile exponents as a list (0 for empty, 1 for 2, 2 for 4, etc.)
    fn to_exponents(&self, py: Python) -> PyResult<Py<PyList>> {
        let py_list = PyList::new_bound(py, self.inner.exponents());
        Ok(py_list.into())
    }

    /// Get all tile values as a flat row-major list
    fn to_values(&self, py: Python) -> PyResult<Py<PyList>> {
        let py_list = PyList::new_bound(py, self.inner.values());
        Ok(py_list.into())
    }

    fn __bytes__<'py>(&self, py: Python<'py>) -> Bound<'py, PyBytes> {
        PyBytes::new_bound(py, &self.inner.to_bytes())
    }

    fn __int__(&self) -> u64 {
        self.inner.seed()
    }

    fn __len__(&self) -> usize {
        16
    }

    fn __getitem__(&self, index: isize) -> PyResult<u16> {
        let idx = if index < 0 { index + 16 } else { index };
        if !(0..16).contains(&idx) {
            return Err(PyIndexError::new_err("board index out of range"));
        }
        Ok(self.inner.values().nth(idx as usize).unwrap_or(0))
    }

    /// Iterator over tile values (not exponents)
    fn __iter__(slf: PyRef<'_, Self>) -> PyResult<Py<PyBoardValueIter>> {
        let iter = PyBoardValueIter {
            iter: slf.inner.values(),
        };
        Py::new(slf.py(), iter)
    }

    fn __str__(&self) -> String {
        format!("{}", self.inner)
    }

    fn __repr__(&self) -> String {
        format!("{:?}", self.inner)
    }

    /// Equality compares tile layout only, not generator state
    fn __eq__(&self, other: &PyBoard) -> bool {
        self.inner == other.inner
    }

    fn __ne__(&self, other: &PyBoard) -> bool {
        self.inner != other.inner
    }

    fn __hash__(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.inner.hash(&mut hasher);
        hasher.finish()
    }
}

#[pyclass]
pub(crate) struct PyBoardValueIter {
    iter: ValuesIter,
}

#[pymethods]
impl PyBoardValueIter {
    fn __iter__(slf: PyRef<'_, Self>) -> PyRef<'_, Self> {
        slf
    }

    fn __next__(mut slf: PyRefMut<'_, Self>) -> Option<u16> {
        slf.iter.next()
    }
}

/// The boards reached by moving up, down, left and right
#[pyclass(name = "Moves")]
#[derive(Clone, Copy)]
pub struct PyMoves {
    inner: MoveSet,
}

#[pymethods]
impl PyMoves {
    #[getter]
    fn up(&self) -> PyBoard {
        self.inner.up.into()
    }

    #[getter]
    fn down(&self) -> PyBoard {
        self.inner.down.into()
    }

    #[getter]
    fn left(&self) -> PyBoard {
        self.inner.left.into()
    }

    #[getter]
    fn right(&self) -> PyBoard {
        self.inner.right.into()
    }

    fn get(&self, direction: PyDirection) -> PyBoard {
        self.inner.get(direction.inner).into()
    }

    fn __str__(&self) -> String {
        format!("{}", self.inner)
    }
}

impl From<Board> for PyBoard {
    fn from(inner: Board) -> Self {
        PyBoard { inner }
    }
}

impl From<PyBoard> for Board {
    fn from(py_board: PyBoard) -> Self {
        py_board.inner
    }
}

impl From<MoveSet> for PyMoves {
    fn from(inner: MoveSet) -> Self {
        PyMoves { inner }
    }
}
