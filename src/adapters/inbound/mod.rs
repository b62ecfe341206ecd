/// Inbound adapters - drive the application from user input
mod explore_session;

pub use explore_session::ExploreSession;
