//! Codebook Launcher Library
//!
//! This library provides the pieces of the codebook launcher: listing chapter
//! groups and chapters, the arrow-key menu, running a chapter as a child
//! process, and the navigation loop tying them together.

// Module declarations
pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod doctor;
pub mod error;
pub mod logging;
pub mod menu;
pub mod navigator;
pub mod runner;
pub mod theme;
