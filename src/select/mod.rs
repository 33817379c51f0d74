// Geometric selection: rectangle maintenance, link hit-testing, and
// edge-zone auto-scroll.

pub mod autoscroll;
pub mod hittest;
pub mod rect;
