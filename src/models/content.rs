use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Semantic type of the encoded payload.
///
/// The kind only drives input hints; payloads are encoded verbatim and are
/// not validated or reformatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentKind {
    /// Free text
    #[default]
    Text,
    /// Web address
    Url,
    /// Email address
    Email,
    /// Phone number
    Phone,
    /// "latitude, longitude" pair
    Location,
}

impl ContentKind {
    /// Every kind, in menu order
    pub const ALL: [ContentKind; 5] = [
        ContentKind::Text,
        ContentKind::Url,
        ContentKind::Email,
        ContentKind::Phone,
        ContentKind::Location,
    ];

    /// Example input shown while the content is empty
    pub fn placeholder(&self) -> &'static str {
        match self {
            ContentKind::Text => "Enter your text here...",
            ContentKind::Url => "https://example.com",
            ContentKind::Email => "mail@example.com",
            ContentKind::Phone => "+1234567890",
            ContentKind::Location => "Latitude, Longitude (e.g. 40.7128, -74.0060)",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Url => "url",
            ContentKind::Email => "email",
            ContentKind::Phone => "phone",
            ContentKind::Location => "location",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ContentKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| Error::InvalidOption(format!("content kind '{s}'")))
    }
}
