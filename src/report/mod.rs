mod aggregate;
mod windows;

pub use aggregate::{aggregate, ReportPolicy, WindowReport};
pub use windows::{resolve_windows, Windows};

#[cfg(test)]
mod tests;
