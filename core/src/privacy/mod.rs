// Anonymous Routing: Concealment, marking and restoration
//
// Every operation takes its input graph by reference and returns a freshly
// built graph. Inputs are never mutated.

pub mod annotation;
pub mod concealment;
pub mod restoration;

pub use annotation::mark_anonymous_routes;
pub use concealment::{apply_anonymous_routing, hidden_count, ConcealmentResult};
pub use restoration::restore_topology;
