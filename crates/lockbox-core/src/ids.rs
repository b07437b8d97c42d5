//! Identity handles for everything the host runtime refers to.
//!
//! Handles are assigned once at construction (or read from a scene file) and
//! compared by value. Nothing in the core ever matches objects by name.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! identity_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Allocate a fresh handle.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID (for scene files).
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// The underlying UUID.
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

identity_handle!(
    /// An object that can be hovered or grabbed (button, drawer handle, door handle).
    InteractableId
);
identity_handle!(
    /// A hand or controller that hovers and grabs.
    InteractorId
);
identity_handle!(
    /// A socket that accepts an inserted object (the drawer key socket).
    SocketId
);
identity_handle!(
    /// A trigger volume reporting enter/exit membership.
    ZoneId
);
