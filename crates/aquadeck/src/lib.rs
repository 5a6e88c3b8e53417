pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod deck;
pub mod logging;
pub mod render;
pub mod theme;
