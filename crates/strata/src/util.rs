//! Small helpers shared by the layout passes.

use crate::error::Result;
use crate::graph::{Graph, Marker, Numeration};

/// Runs `f` with a fresh marker and frees it afterwards, whatever `f` returns.
pub(crate) fn with_marker<N, E, T>(
    g: &mut Graph<N, E>,
    f: impl FnOnce(&mut Graph<N, E>, &Marker) -> Result<T>,
) -> Result<T> {
    let marker = g.new_marker()?;
    let out = f(g, &marker);
    g.free_marker(marker);
    out
}

/// Runs `f` with a fresh numeration and frees it afterwards, whatever `f` returns.
pub(crate) fn with_num<N, E, T>(
    g: &mut Graph<N, E>,
    f: impl FnOnce(&mut Graph<N, E>, &Numeration) -> Result<T>,
) -> Result<T> {
    let num = g.new_num()?;
    let out = f(g, &num);
    g.free_num(num);
    out
}
