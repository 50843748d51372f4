//! Command implementations for the ghb bootstrap tool.

pub mod clone;
pub mod factory;
pub mod gitignore;
pub mod setup;

#[cfg(test)]
pub mod test_helpers;
