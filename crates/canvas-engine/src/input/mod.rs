pub mod intents;
pub mod queue;
