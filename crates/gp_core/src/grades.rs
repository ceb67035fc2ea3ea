//! Letter-grade scale (A 93 … D- 60, F 0).

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CoreError;
use crate::numeric::FEASIBILITY_EPS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterGrade {
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    DPlus,
    D,
    DMinus,
    F,
}

impl LetterGrade {
    /// Highest grade first.
    pub const ALL: [LetterGrade; 12] = [
        LetterGrade::A,
        LetterGrade::AMinus,
        LetterGrade::BPlus,
        LetterGrade::B,
        LetterGrade::BMinus,
        LetterGrade::CPlus,
        LetterGrade::C,
        LetterGrade::CMinus,
        LetterGrade::DPlus,
        LetterGrade::D,
        LetterGrade::DMinus,
        LetterGrade::F,
    ];

    /// Minimum final percentage for this grade.
    pub fn threshold(self) -> f64 {
        match self {
            LetterGrade::A => 93.0,
            LetterGrade::AMinus => 90.0,
            LetterGrade::BPlus => 87.0,
            LetterGrade::B => 83.0,
            LetterGrade::BMinus => 80.0,
            LetterGrade::CPlus => 77.0,
            LetterGrade::C => 73.0,
            LetterGrade::CMinus => 70.0,
            LetterGrade::DPlus => 67.0,
            LetterGrade::D => 63.0,
            LetterGrade::DMinus => 60.0,
            LetterGrade::F => 0.0,
        }
    }

    /// Best grade whose threshold `pct` reaches.
    pub fn from_percentage(pct: f64) -> LetterGrade {
        Self::ALL
            .into_iter()
            .find(|g| pct + FEASIBILITY_EPS >= g.threshold())
            .unwrap_or(LetterGrade::F)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::DPlus => "D+",
            LetterGrade::D => "D",
            LetterGrade::DMinus => "D-",
            LetterGrade::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LetterGrade {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == t)
            .ok_or(CoreError::UnknownGrade)
    }
}

#[cfg(feature = "serde")]
impl Serialize for LetterGrade {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for LetterGrade {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        use serde::de::{Error as _, Unexpected};
        let s = String::deserialize(d)?;
        s.parse()
            .map_err(|_| D::Error::invalid_value(Unexpected::Str(&s), &"letter grade A..F"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_descend() {
        let ts: Vec<f64> = LetterGrade::ALL.iter().map(|g| g.threshold()).collect();
        assert!(ts.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn from_percentage_boundaries() {
        assert_eq!(LetterGrade::from_percentage(100.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_percentage(93.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_percentage(92.99), LetterGrade::AMinus);
        assert_eq!(LetterGrade::from_percentage(80.0), LetterGrade::BMinus);
        assert_eq!(LetterGrade::from_percentage(59.9), LetterGrade::F);
        assert_eq!(LetterGrade::from_percentage(0.0), LetterGrade::F);
    }

    #[test]
    fn parse_and_display() {
        for g in LetterGrade::ALL {
            assert_eq!(g.to_string().parse::<LetterGrade>(), Ok(g));
        }
        assert_eq!("b+".parse::<LetterGrade>(), Ok(LetterGrade::BPlus));
        assert_eq!("E".parse::<LetterGrade>(), Err(CoreError::UnknownGrade));
    }
}
