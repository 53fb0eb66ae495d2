use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L = 0,
    /// Medium (~15% recovery capacity)
    #[default]
    M = 1,
    /// Quartile (~25% recovery capacity)
    Q = 2,
    /// High (~30% recovery capacity)
    H = 3,
}

impl ECLevel {
    /// All levels from lowest to highest redundancy
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Single-letter name (`L`, `M`, `Q`, `H`)
    pub fn letter(&self) -> char {
        match self {
            ECLevel::L => 'L',
            ECLevel::M => 'M',
            ECLevel::Q => 'Q',
            ECLevel::H => 'H',
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            ECLevel::L => "Low (L)",
            ECLevel::M => "Medium (M)",
            ECLevel::Q => "Quartile (Q)",
            ECLevel::H => "High (H)",
        }
    }
}

impl From<ECLevel> for qrcode::EcLevel {
    fn from(level: ECLevel) -> Self {
        match level {
            ECLevel::L => qrcode::EcLevel::L,
            ECLevel::M => qrcode::EcLevel::M,
            ECLevel::Q => qrcode::EcLevel::Q,
            ECLevel::H => qrcode::EcLevel::H,
        }
    }
}

impl fmt::Display for ECLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for ECLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" | "LOW" => Ok(ECLevel::L),
            "M" | "MEDIUM" => Ok(ECLevel::M),
            "Q" | "QUARTILE" => Ok(ECLevel::Q),
            "H" | "HIGH" => Ok(ECLevel::H),
            _ => Err(Error::InvalidOption(format!("error correction level '{s}'"))),
        }
    }
}
