use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of rotor slots on the form.
pub const ROTOR_SLOTS: usize = 3;

/// Distinct assignment the form starts with, one per slot.
pub const DEFAULT_ROTORS: [&str; ROTOR_SLOTS] = ["I", "II", "III"];
pub const DEFAULT_POSITION: u32 = 1;

pub const ROTOR_CATALOG: &[&str] = &["I", "II", "III", "IV", "V"];
pub const REFLECTOR_CATALOG: &[&str] = &["UKWA", "UKWB", "UKWC"];
pub const DEFAULT_REFLECTOR: &str = "UKWA";

macro_rules! name_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

name_newtype!(RotorId);
name_newtype!(ReflectorId);

impl RotorId {
    pub fn defaults() -> Vec<RotorId> {
        DEFAULT_ROTORS.iter().copied().map(RotorId::from).collect()
    }
}

impl Default for ReflectorId {
    fn default() -> Self {
        Self::from(DEFAULT_REFLECTOR)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputToggle {
    Punctuation,
    Case,
    Spacing,
}

impl OutputToggle {
    pub const ALL: [OutputToggle; 3] = [
        OutputToggle::Punctuation,
        OutputToggle::Case,
        OutputToggle::Spacing,
    ];

    /// Name of the checkbox field carrying this toggle.
    pub fn field_name(self) -> &'static str {
        match self {
            OutputToggle::Punctuation => "punc",
            OutputToggle::Case => "case",
            OutputToggle::Spacing => "space",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputOptions {
    pub preserve_punctuation: bool,
    pub preserve_case: bool,
    pub preserve_spacing: bool,
}

impl OutputOptions {
    pub fn get(&self, toggle: OutputToggle) -> bool {
        match toggle {
            OutputToggle::Punctuation => self.preserve_punctuation,
            OutputToggle::Case => self.preserve_case,
            OutputToggle::Spacing => self.preserve_spacing,
        }
    }

    pub fn set(&mut self, toggle: OutputToggle, checked: bool) {
        match toggle {
            OutputToggle::Punctuation => self.preserve_punctuation = checked,
            OutputToggle::Case => self.preserve_case = checked,
            OutputToggle::Spacing => self.preserve_spacing = checked,
        }
    }
}
