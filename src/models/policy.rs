//! Basis selection policy
//!
//! Anchor picks where the basis price is located; mode picks which price
//! field is compared.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference point for the basis price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// First trading day on/after the ticker's first mention
    #[default]
    Mention,

    /// First trading day of the selected month (exchange-local calendar)
    Month,
}

/// Price field used for basis and latest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PriceMode {
    /// Basis on the open, latest is the live quote
    Oc,

    /// Basis on the close, latest is the last close
    #[default]
    Cc,
}

impl Anchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Anchor::Mention => "mention",
            Anchor::Month => "month",
        }
    }
}

impl PriceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceMode::Oc => "oc",
            PriceMode::Cc => "cc",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PriceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Anchor::default(), Anchor::Mention);
        assert_eq!(PriceMode::default(), PriceMode::Cc);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Anchor::Month).unwrap(), r#""month""#);
        assert_eq!(serde_json::to_string(&PriceMode::Oc).unwrap(), r#""oc""#);

        let mode: PriceMode = serde_json::from_str(r#""cc""#).unwrap();
        assert_eq!(mode, PriceMode::Cc);
        assert!(serde_json::from_str::<Anchor>(r#""week""#).is_err());
    }
}
