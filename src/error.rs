//! Error types.
//!
//! Lookups never fail: an absent element is `None`. Errors only come from building a
//! [LevelGenerator](crate::LevelGenerator) with unusable parameters and from
//! [SkipList::verify](crate::SkipList::verify) finding a broken structure.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("max level must be between 1 and 32, got {0}")]
    MaxLevel(usize),

    #[error("level probability must lie strictly between 0 and 1, got {0}")]
    Probability(f64),
}

/// A structural invariant that [SkipList::verify](crate::SkipList::verify) found violated.
///
/// Seeing one of these means the comparator is not a consistent total order, or the list has
/// a bug.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("level {level}: element at rank {rank} is ordered before its predecessor")]
    Order { level: usize, rank: usize },

    #[error("level {level}: {found} towers linked, {expected} tall enough")]
    Nesting {
        level: usize,
        expected: usize,
        found: usize,
    },

    #[error("level {level}: span at rank {rank} is {found}, expected {expected}")]
    Span {
        level: usize,
        rank: usize,
        expected: usize,
        found: usize,
    },

    #[error("backward link at rank {rank} does not point to its predecessor")]
    Backward { rank: usize },

    #[error("tail does not point to the last element")]
    Tail,

    #[error("list level is {found}, highest occupied level is {expected}")]
    Level { expected: usize, found: usize },

    #[error("length is {found}, but {expected} elements are linked")]
    Length { expected: usize, found: usize },
}
