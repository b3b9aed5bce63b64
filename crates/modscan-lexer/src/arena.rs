//! Caller-owned storage for scan records.
//!
//! The lexer never owns its output: import and export lists are vectors
//! allocated in an [`Arena`] handed to [`crate::scan`]. One arena per scan,
//! or one arena reset between scans, keeps allocation out of the hot loop.

use bumpalo::Bump;

/// Rough record density used to size an arena up front: one record per this
/// many source units is generous for real modules.
const UNITS_PER_RECORD: usize = 64;

/// Bump arena holding the record vectors of one or more scans.
#[derive(Default)]
pub struct Arena {
    bump: Bump,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arena with room for `capacity` bytes before its first growth.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bump: Bump::with_capacity(capacity),
        }
    }

    /// Arena pre-sized for scanning a buffer of `len` code units.
    pub fn for_source_len(len: usize) -> Self {
        let records = len / UNITS_PER_RECORD + 1;
        // Imports are the larger record; exports share the slack.
        Self::with_capacity(records * 2 * std::mem::size_of::<crate::Import>())
    }

    #[inline]
    pub(crate) fn vec<T>(&self) -> Vec<'_, T> {
        Vec::new_in(&self.bump)
    }

    /// Drop every record allocated so far. Requires that no `ParseResult`
    /// borrowing this arena is alive.
    pub fn reset(&mut self) {
        self.bump.reset();
    }

    /// Bytes currently held by the arena's chunks.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}

/// A vector allocated in an [`Arena`].
pub type Vec<'a, T> = bumpalo::collections::Vec<'a, T>;
