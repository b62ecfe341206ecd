/// Ports module defining interfaces for hexagonal architecture
///
/// The application core only talks to the outside world (the jar hell
/// backend, the state file, the terminal) through these traits.
pub mod outbound;
