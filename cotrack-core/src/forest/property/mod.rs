//! Property-based tests for the maximum spanning forest selector.
//!
//! Checks the selector against a brute-force oracle on small graphs and
//! validates structural invariants (acyclicity, edge count, determinism)
//! on larger generated graphs.

mod oracle;
mod strategies;
mod tests;
