//! Scenario tests for the game engine, organised by phase of play.

#![cfg(test)]
#![allow(clippy::bool_assert_comparison)]

pub mod executive_powers;
pub mod legislative;
