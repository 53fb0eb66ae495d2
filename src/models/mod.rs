pub mod color;
pub mod content;
pub mod ec_level;
pub mod logo;
pub mod matrix;
pub mod options;

pub use color::Rgb;
pub use content::ContentKind;
pub use ec_level::ECLevel;
pub use logo::Logo;
pub use matrix::BitMatrix;
pub use options::{BorderStyle, OptionChange, QrOptions};
