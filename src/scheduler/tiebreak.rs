use crate::model::Member;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Départage des candidats encore à égalité après les critères du moteur.
///
/// Le gagnant exact parmi des candidats strictement équivalents n'est pas
/// garanti : seule la stratégie choisie le détermine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreak {
    /// Premier dans l'ordre d'inscription
    #[default]
    Registration,
    /// Plus petit nom (ordre lexicographique)
    ByName,
    /// Tirage pseudo-aléatoire reproductible
    Seeded(u64),
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::Registration => f.write_str("registration"),
            TieBreak::ByName => f.write_str("name"),
            TieBreak::Seeded(seed) => write!(f, "seed:{seed}"),
        }
    }
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "registration" => Ok(TieBreak::Registration),
            "name" => Ok(TieBreak::ByName),
            _ => s
                .strip_prefix("seed:")
                .and_then(|n| n.parse().ok())
                .map(TieBreak::Seeded)
                .ok_or_else(|| format!("unknown tie-break strategy: {s}")),
        }
    }
}

/// État d'un départage pour un passage du moteur.
pub(super) struct Picker {
    strategy: TieBreak,
    rng: Option<StdRng>,
}

impl Picker {
    pub(super) fn new(strategy: TieBreak) -> Self {
        let rng = match strategy {
            TieBreak::Seeded(seed) => Some(StdRng::seed_from_u64(seed)),
            _ => None,
        };
        Self { strategy, rng }
    }

    /// `tied` est non vide, dans l'ordre d'inscription.
    pub(super) fn pick<'a>(&mut self, tied: &[&'a Member]) -> &'a Member {
        match (self.strategy, self.rng.as_mut()) {
            (TieBreak::Seeded(_), Some(rng)) => tied[rng.random_range(0..tied.len())],
            (TieBreak::ByName, _) => tied
                .iter()
                .copied()
                .min_by(|a, b| a.name.cmp(&b.name))
                .unwrap_or(tied[0]),
            _ => tied[0],
        }
    }
}
