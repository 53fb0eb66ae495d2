use crate::error::Error;
use image::Rgba;
use std::fmt;
use std::str::FromStr;

/// Opaque 24-bit colour, written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Black
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// White
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a colour from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Fully opaque RGBA pixel of this colour
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed
            .strip_prefix('#')
            .ok_or_else(|| Error::InvalidColor(s.to_string()))?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_string()));
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
        let parsed = match hex.len() {
            3 => {
                // #abc expands to #aabbcc
                let expand = |i: usize| channel(&hex[i..=i].repeat(2));
                Some((expand(0), expand(1), expand(2)))
            }
            6 => Some((channel(&hex[0..2]), channel(&hex[2..4]), channel(&hex[4..6]))),
            _ => None,
        };

        match parsed {
            Some((Some(r), Some(g), Some(b))) => Ok(Rgb::new(r, g, b)),
            _ => Err(Error::InvalidColor(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!("#ff8000".parse::<Rgb>().unwrap(), Rgb::new(255, 128, 0));
        assert_eq!("#FFF".parse::<Rgb>().unwrap(), Rgb::WHITE);
        assert_eq!(" #0a0B0c ".parse::<Rgb>().unwrap(), Rgb::new(10, 11, 12));
    }

    #[test]
    fn rejects_malformed_colours() {
        assert!("000000".parse::<Rgb>().is_err());
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#gg0000".parse::<Rgb>().is_err());
        assert!("#".parse::<Rgb>().is_err());
    }

    #[test]
    fn displays_lowercase_hex() {
        assert_eq!(Rgb::new(171, 205, 239).to_string(), "#abcdef");
        assert_eq!(Rgb::BLACK.to_string(), "#000000");
    }
}
