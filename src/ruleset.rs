//! Named rule variants.
//!
//! A ruleset is pure data: the engine only consults
//! [`Ruleset::suicide_allowed`]. Komi and the draw flag are carried for
//! scoring front ends.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ruleset {
    Aga,
    Japanese,
    Chinese,
    NewZealand,
    TrompTaylor,
}

impl Ruleset {
    pub const ALL: [Ruleset; 5] = [
        Ruleset::Aga,
        Ruleset::Japanese,
        Ruleset::Chinese,
        Ruleset::NewZealand,
        Ruleset::TrompTaylor,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Ruleset::Aga => "AGA",
            Ruleset::Japanese => "Japanese",
            Ruleset::Chinese => "Chinese",
            Ruleset::NewZealand => "NewZealand",
            Ruleset::TrompTaylor => "TrompTaylor",
        }
    }

    /// Komi without the tie-breaking half point.
    pub const fn komi(self) -> u32 {
        match self {
            Ruleset::Aga | Ruleset::Chinese | Ruleset::NewZealand => 7,
            Ruleset::Japanese => 6,
            Ruleset::TrompTaylor => 0,
        }
    }

    pub const fn suicide_allowed(self) -> bool {
        matches!(self, Ruleset::NewZealand | Ruleset::TrompTaylor)
    }

    /// If `false`, White wins ties.
    pub const fn draws_allowed(self) -> bool {
        matches!(self, Ruleset::NewZealand | Ruleset::TrompTaylor)
    }

    /// Komi as a GTP front end reports it: half a point is added when draws
    /// are not allowed.
    pub fn effective_komi(self) -> f32 {
        let half = if self.draws_allowed() { 0.0 } else { 0.5 };
        self.komi() as f32 + half
    }
}

impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive; `-` and `_` are ignored so `tromp-taylor` works.
impl FromStr for Ruleset {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        Ruleset::ALL
            .into_iter()
            .find(|r| r.name().to_ascii_lowercase() == key)
            .ok_or_else(|| ParseError::Ruleset(s.to_string()))
    }
}
