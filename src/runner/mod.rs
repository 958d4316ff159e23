//! Running installer operations off the foreground thread.

pub mod background;

pub use background::run_in_background;
