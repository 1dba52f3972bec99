// Session orchestration for the Demari Bets client: the backend API client,
// the draw/results state machine, and the event loop that ties them to the UI.

pub mod api;
pub mod app;
pub mod protocol;
pub mod session;
