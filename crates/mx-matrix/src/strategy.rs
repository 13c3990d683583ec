use std::fmt;
use std::str::FromStr;

use crate::multiplier::Multiplier;
use crate::naive::NaiveMultiplier;
use crate::strassen::StrassenMultiplier;

/// The three multiplication strategies benchmarked side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    #[default]
    Naive,
    Strassen,
    Hybrid,
}

impl Strategy {
    /// All strategies in report column order.
    pub const ALL: [Strategy; 3] = [Strategy::Naive, Strategy::Strassen, Strategy::Hybrid];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Naive => "naive",
            Strategy::Strassen => "strassen",
            Strategy::Hybrid => "hybrid",
        }
    }

    /// Builds the multiplier for this strategy. `hybrid_threshold` is only
    /// used by [`Strategy::Hybrid`].
    pub fn multiplier(&self, hybrid_threshold: usize) -> Box<dyn Multiplier> {
        match self {
            Strategy::Naive => Box::new(NaiveMultiplier::new()),
            Strategy::Strassen => Box::new(StrassenMultiplier::pure()),
            Strategy::Hybrid => Box::new(StrassenMultiplier::hybrid(hybrid_threshold)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "naive" => Ok(Strategy::Naive),
            "strassen" => Ok(Strategy::Strassen),
            "hybrid" => Ok(Strategy::Hybrid),
            other => Err(format!("unknown strategy '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_naive() {
        assert_eq!(Strategy::default(), Strategy::Naive);
    }

    #[test]
    fn test_parse_roundtrip() {
        for s in Strategy::ALL {
            assert_eq!(s.name().parse::<Strategy>().unwrap(), s);
            assert_eq!(s.to_string(), s.name());
        }
        assert_eq!("HYBRID".parse::<Strategy>().unwrap(), Strategy::Hybrid);
        assert!("winograd".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_multiplier_names_match() {
        for s in Strategy::ALL {
            assert_eq!(s.multiplier(8).name(), s.name());
        }
    }
}
