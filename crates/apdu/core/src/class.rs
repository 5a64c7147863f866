//! APDU class byte (CLA)
//!
//! The class byte selects between the interindustry and proprietary command
//! sets and carries the command chaining indicator.

use derive_more::{Display, From};

/// APDU class byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, From)]
#[display("{_0:02X}")]
pub struct Class(pub u8);

impl Class {
    /// Interindustry class, no secure messaging, basic logical channel
    pub const INTERINDUSTRY: Self = Self(0x00);

    /// Proprietary class used by EMV payment applications
    pub const PROPRIETARY: Self = Self(0x80);

    const CHAINING_BIT: u8 = 0x10;

    /// Raw class byte
    pub const fn value(self) -> u8 {
        self.0
    }

    /// `FF` is reserved for protocol type selection and is never a valid class
    pub const fn invalid(self) -> bool {
        self.0 == 0xFF
    }

    /// Whether the top bit marks a proprietary class
    pub const fn proprietary(self) -> bool {
        self.0 & 0x80 != 0
    }

    /// Whether this is the last (or only) command of a chain.
    ///
    /// Only meaningful for interindustry classes: a set chaining bit means
    /// more commands follow. Proprietary classes are never reported as last.
    pub const fn last_in_chain(self) -> bool {
        !self.proprietary() && self.0 & Self::CHAINING_BIT == 0
    }

    /// Same class with the chaining bit set
    pub const fn chained(self) -> Self {
        Self(self.0 | Self::CHAINING_BIT)
    }
}

impl From<Class> for u8 {
    fn from(class: Class) -> Self {
        class.0
    }
}
