//! PyO3 Python bindings for seeded-2048
//!
//! Exposes the board engine to the Python training code as the `py2048`
//! module: seeding, byte round trips, move sets, tile values and display.

use pyo3::create_exception;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

mod board;
mod direction;

pub use board::{PyBoard, PyMoves};
pub use direction::PyDirection;

create_exception!(py2048, InvalidSeed, PyValueError, "Seed outside the generator domain.");
create_exception!(py2048, MalformedEncoding, PyValueError, "Board bytes or exponents are malformed.");

/// Initialize the py2048 Python module
#[pymodule]
fn py2048(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Build the line tables up front rather than on the first move
    seeded_2048_lib::engine::warm();

    m.add_class::<PyBoard>()?;
    m.add_class::<PyMoves>()?;
    m.add_class::<PyDirection>()?;
    m.add_class::<board::PyBoardValueIter>()?;
    m.add("InvalidSeed", m.py().get_type_bound::<InvalidSeed>())?;
    m.add("MalformedEncoding", m.py().get_type_bound::<MalformedEncoding>())?;
    Ok(())
}
