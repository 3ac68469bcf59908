#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Core type definitions for procpool
//!
//! Value types shared by the pool, the event system and the CLI: slot
//! identifiers, reclamation strategy, exit records and output settings.

pub mod format;
pub mod reports;

pub use format::{ColorChoice, OutputFormat};
pub use reports::{ExitRecord, PoolReport, PoolStats};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one admitted process
///
/// Ids are handed out in admission order and never reused within a pool, so
/// ordering by id is ordering by admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(pub u64);

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How many exited processes one reclamation round frees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReclaimStrategy {
    /// Stop the round at the first exited process found
    #[default]
    FirstExited,
    /// Free every process found exited during the round
    AllExited,
}

impl ReclaimStrategy {
    /// Parse the kebab-case name used in config files and env vars
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "first-exited" | "first" => Some(Self::FirstExited),
            "all-exited" | "all" => Some(Self::AllExited),
            _ => None,
        }
    }
}

impl fmt::Display for ReclaimStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstExited => write!(f, "first-exited"),
            Self::AllExited => write!(f, "all-exited"),
        }
    }
}

impl clap::ValueEnum for ReclaimStrategy {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::FirstExited, Self::AllExited]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::FirstExited => clap::builder::PossibleValue::new("first-exited").alias("first"),
            Self::AllExited => clap::builder::PossibleValue::new("all-exited").alias("all"),
        })
    }
}
