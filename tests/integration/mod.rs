//! Integration tests for the playback controller
//!
//! These drive a controller bound to the simulated hosts the same way a view
//! would: host notifications arrive through the event pump, user input through
//! keyboard codes and pointer seeks.

mod event_pump;
mod playback_session;
