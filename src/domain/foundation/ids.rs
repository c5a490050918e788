//! Strongly-typed identifier value objects and their allocator.
//!
//! Every entity type is keyed by a positive integer. Ids are handed out by an
//! [`IdSequence`] owned by the entity's store, never by global state.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

use super::ValidationError;

/// Largest id any entity may carry.
pub const MAX_ID: u32 = i32::MAX as u32;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            /// Creates an id in `1..=MAX_ID`.
            pub fn try_new(value: u32) -> Result<Self, ValidationError> {
                if value == 0 || value > MAX_ID {
                    return Err(ValidationError::invalid_format(
                        $field,
                        format!("{} is outside 1..={}", value, MAX_ID),
                    ));
                }
                Ok(Self(value))
            }

            /// Returns the raw integer value.
            pub fn value(&self) -> u32 {
                self.0
            }

            /// Wraps a value handed out by an [`IdSequence`], which never yields zero.
            pub(crate) fn from_allocated(raw: u32) -> Self {
                Self(raw.max(1))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw: i64 = s.trim().parse().map_err(|_| {
                    ValidationError::invalid_format($field, format!("'{}' is not an integer", s))
                })?;
                if raw <= 0 || raw > i64::from(MAX_ID) {
                    return Err(ValidationError::invalid_format(
                        $field,
                        format!("'{}' is not a positive id", s),
                    ));
                }
                Self::try_new(raw as u32)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> u32 {
                id.0
            }
        }
    };
}

numeric_id!(
    /// Identifier of a catalog movie.
    MovieId,
    "movie_id"
);
numeric_id!(
    /// Identifier of a screening room.
    RoomId,
    "room_id"
);
numeric_id!(
    /// Identifier of a scheduled screening session.
    SessionId,
    "session_id"
);
numeric_id!(
    /// Identifier of a registered client.
    ClientId,
    "client_id"
);
numeric_id!(
    /// Identifier of a sold ticket.
    TicketId,
    "ticket_id"
);

/// Monotonic id counter for one entity type.
///
/// Starts at 1. Reconstruction from persisted records calls [`observe`] for
/// every loaded id so the next allocation lands above all of them. Once
/// [`MAX_ID`] has been handed out or observed the sequence is exhausted and
/// never wraps.
///
/// [`observe`]: IdSequence::observe
#[derive(Debug)]
pub struct IdSequence {
    next: AtomicU32,
}

impl IdSequence {
    /// Creates a sequence whose first allocation is 1.
    pub fn new() -> Self {
        Self {
            next: AtomicU32::new(1),
        }
    }

    /// Returns the next raw id and advances the counter, or `None` once
    /// every id up to [`MAX_ID`] is taken.
    pub fn allocate(&self) -> Option<u32> {
        self.next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |next| {
                (next <= MAX_ID).then(|| next + 1)
            })
            .ok()
    }

    /// Advances the counter past `id` if it is not already beyond it.
    pub fn observe(&self, id: u32) {
        let after = id.min(MAX_ID) + 1;
        self.next.fetch_max(after, Ordering::SeqCst);
    }

    /// Rewinds the counter to 1.
    ///
    /// Only safe when no persisted record references an id from this sequence.
    pub fn reset(&self) {
        self.next.store(1, Ordering::SeqCst);
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}
