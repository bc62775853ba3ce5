pub mod args;
pub mod format;
pub mod io;
