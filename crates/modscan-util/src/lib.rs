#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Filesystem helpers for modscan: finding source files under a tree,
//! reading them for scanning, hashing their contents, and writing reports
//! without leaving half-written files behind. No logging here; callers log.

pub mod discover;
pub mod fs;
pub mod hash;
