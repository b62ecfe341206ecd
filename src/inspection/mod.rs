/// Package inspection core
///
/// Pure domain logic for exploring Maven packages: coordinates, the package
/// model, version series and the lazily fetched dependency tree. Nothing in
/// this module performs I/O; fetching is driven by the application layer.
pub mod domain;
pub mod policies;
pub mod services;
