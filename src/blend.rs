//! Generalized Porter-Duff compositing and the named blend modes built on it.

pub(crate) mod algebra;
pub(crate) mod modes;
