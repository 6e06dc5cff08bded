// Wire models and helpers shared by the engine and the GUI.
pub mod indicators;
pub mod models;
pub mod utils;
