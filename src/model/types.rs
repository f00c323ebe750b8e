use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported particle species: '{0}'")]
pub struct ParseSpeciesError(String);

/// Charged daughter species with a well-known mass hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Species {
    Electron,
    Muon,
    Pion,
    Kaon,
    Proton,
    Deuteron,
}

impl Species {
    /// Mass in GeV/c².
    pub fn mass(&self) -> f64 {
        match self {
            Species::Electron => 0.000_510_998_95,
            Species::Muon => 0.105_658_375_5,
            Species::Pion => 0.139_570_39,
            Species::Kaon => 0.493_677,
            Species::Proton => 0.938_272_088_16,
            Species::Deuteron => 1.875_612_942_57,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Species::Electron => "electron",
            Species::Muon => "muon",
            Species::Pion => "pion",
            Species::Kaon => "kaon",
            Species::Proton => "proton",
            Species::Deuteron => "deuteron",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Species {
    type Err = ParseSpeciesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "electron" | "e" => Ok(Species::Electron),
            "muon" | "mu" => Ok(Species::Muon),
            "pion" | "pi" => Ok(Species::Pion),
            "kaon" | "k" => Ok(Species::Kaon),
            "proton" | "p" => Ok(Species::Proton),
            "deuteron" | "d" => Ok(Species::Deuteron),
            _ => Err(ParseSpeciesError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn species_from_str_variants() {
        assert_eq!(Species::from_str("pion").unwrap(), Species::Pion);
        assert_eq!(Species::from_str("PI").unwrap(), Species::Pion);
        assert_eq!(Species::from_str("Kaon").unwrap(), Species::Kaon);
        assert_eq!(Species::from_str("k").unwrap(), Species::Kaon);
        assert_eq!(Species::from_str("p").unwrap(), Species::Proton);
        assert_eq!(Species::from_str("d").unwrap(), Species::Deuteron);
    }

    #[test]
    fn species_from_str_invalid() {
        let err = Species::from_str("gluon").unwrap_err();
        assert_eq!(err.to_string(), "invalid or unsupported particle species: 'gluon'");
    }

    #[test]
    fn species_masses() {
        assert!(approx_eq(Species::Pion.mass(), 0.13957, 1e-5));
        assert!(approx_eq(Species::Kaon.mass(), 0.493677, 1e-9));
        assert!(approx_eq(Species::Proton.mass(), 0.938272, 1e-6));
        assert_eq!(Species::Kaon.to_string(), "kaon");
    }
}
