//! victor - a vi-style modal vector drawing editor
//!
//! This library exposes the modal core (mode controller, normal-mode
//! dispatcher, command line, ex registry) and the drawing editor built on it,
//! for testing and embedding.

#![deny(warnings)]

pub mod app;
pub mod cmdline;
pub mod config;
pub mod coords;
pub mod editor;
pub mod ex;
pub mod input;
pub mod keystroke_log;
pub mod mode;
pub mod ui;
