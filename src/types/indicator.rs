//! The one-letter trend classification assigned to a place.

use std::fmt;
use std::str::FromStr;

/// Two-sided p-value at or below which a one-sided 1% test is significant.
pub const STRONG_P_THRESHOLD: f64 = 0.02;
/// Two-sided p-value at or below which a one-sided 10% test is significant.
pub const WEAK_P_THRESHOLD: f64 = 0.2;

/// Temperature trend of a place, comparing the late segment of its series
/// against the early one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Indicator {
    /// `H`: later period warmer, one-sided 1% significance.
    Hot,
    /// `W`: later period warmer, one-sided 10% significance.
    Warm,
    /// `N`: no significant difference in either direction.
    Neutral,
    /// `C`: later period cooler, one-sided 10% significance.
    Cool,
    /// `F`: later period cooler, one-sided 1% significance.
    Frigid,
}

impl Indicator {
    pub const ALL: [Indicator; 5] = [
        Indicator::Hot,
        Indicator::Warm,
        Indicator::Neutral,
        Indicator::Cool,
        Indicator::Frigid,
    ];

    /// Turns a two-sided t-test of (late vs. early) into a directional verdict.
    ///
    /// The sign of `statistic` picks the tail; the two-sided p-value is then
    /// compared against doubled one-sided thresholds (1% -> 0.02, 10% -> 0.2).
    /// A statistic of exactly zero goes to the warming branch. A NaN statistic
    /// or p-value (zero-variance samples with equal means) is neutral.
    pub fn from_ttest(statistic: f64, pvalue: f64) -> Indicator {
        if statistic.is_nan() || pvalue.is_nan() {
            return Indicator::Neutral;
        }
        let warming = statistic >= 0.0;
        match (warming, pvalue) {
            (true, p) if p <= STRONG_P_THRESHOLD => Indicator::Hot,
            (true, p) if p <= WEAK_P_THRESHOLD => Indicator::Warm,
            (false, p) if p <= STRONG_P_THRESHOLD => Indicator::Frigid,
            (false, p) if p <= WEAK_P_THRESHOLD => Indicator::Cool,
            _ => Indicator::Neutral,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Indicator::Hot => 'H',
            Indicator::Warm => 'W',
            Indicator::Neutral => 'N',
            Indicator::Cool => 'C',
            Indicator::Frigid => 'F',
        }
    }

    /// Marker color on the rendered map.
    pub fn color(self) -> &'static str {
        match self {
            Indicator::Hot => "red",
            Indicator::Warm => "pink",
            Indicator::Neutral => "green",
            Indicator::Cool => "lightblue",
            Indicator::Frigid => "blue",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl TryFrom<char> for Indicator {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Indicator::ALL
            .into_iter()
            .find(|indicator| indicator.letter() == c.to_ascii_uppercase())
            .ok_or(c)
    }
}

impl FromStr for Indicator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Indicator::try_from(c).map_err(|_| s.to_string()),
            _ => Err(s.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_values() {
        assert_eq!(Indicator::from_ttest(1.5, 0.02), Indicator::Hot);
        assert_eq!(Indicator::from_ttest(1.5, 0.020001), Indicator::Warm);
        assert_eq!(Indicator::from_ttest(1.5, 0.2), Indicator::Warm);
        assert_eq!(Indicator::from_ttest(1.5, 0.200001), Indicator::Neutral);
        assert_eq!(Indicator::from_ttest(-1.5, 0.02), Indicator::Frigid);
        assert_eq!(Indicator::from_ttest(-1.5, 0.15), Indicator::Cool);
        assert_eq!(Indicator::from_ttest(-1.5, 0.5), Indicator::Neutral);
    }

    // Arbitrary tie-break: a zero statistic is treated as warming.
    #[test]
    fn zero_statistic_takes_the_warm_branch() {
        assert_eq!(Indicator::from_ttest(0.0, 0.01), Indicator::Hot);
        assert_eq!(Indicator::from_ttest(-0.0, 0.1), Indicator::Warm);
    }

    #[test]
    fn nan_is_neutral() {
        assert_eq!(Indicator::from_ttest(f64::NAN, f64::NAN), Indicator::Neutral);
        assert_eq!(Indicator::from_ttest(2.0, f64::NAN), Indicator::Neutral);
    }

    #[test]
    fn letters_parse_back() {
        for indicator in Indicator::ALL {
            assert_eq!(indicator.to_string().parse::<Indicator>(), Ok(indicator));
        }
        assert_eq!(Indicator::try_from('x'), Err('x'));
    }
}
