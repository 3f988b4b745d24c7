//! Library side of the `where` tool: logging setup and table scanning.

pub mod logging;
pub mod scan;
