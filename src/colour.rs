use serde::Deserialize;

/// A colour, expressed in RGB, CMYK or grey colour spaces.
///
/// In configuration files a colour may be written as a hex string
/// (`"#1ba1ec"`), or as an object with `r`/`g`/`b`, `c`/`m`/`y`/`k`, or a lone
/// `g` for grey. Components range from 0.0 to 1.0.
#[derive(Copy, Clone, PartialEq, Debug, Deserialize)]
#[serde(try_from = "ColourRepr")]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub const fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the CMYK space. c, m, y, and k range from 0.0 to 1.0
    pub fn new_cmyk(c: f32, m: f32, y: f32, k: f32) -> Colour {
        Colour::CMYK { c, m, y, k }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex string into an RGB colour
    pub fn from_hex(hex: &str) -> Option<Colour> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Colour::new_rgb_bytes(channel(0)?, channel(2)?, channel(4)?))
    }

    fn components(&self) -> Vec<f32> {
        match *self {
            Colour::RGB { r, g, b } => vec![r, g, b],
            Colour::CMYK { c, m, y, k } => vec![c, m, y, k],
            Colour::Grey { g } => vec![g],
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColourRepr {
    Hex(String),
    Rgb { r: f32, g: f32, b: f32 },
    Cmyk { c: f32, m: f32, y: f32, k: f32 },
    Grey { g: f32 },
}

impl TryFrom<ColourRepr> for Colour {
    type Error = String;

    fn try_from(repr: ColourRepr) -> Result<Self, Self::Error> {
        let colour = match repr {
            ColourRepr::Hex(hex) => {
                Colour::from_hex(&hex).ok_or_else(|| format!("`{hex}` is not a #rrggbb colour"))?
            }
            ColourRepr::Rgb { r, g, b } => Colour::RGB { r, g, b },
            ColourRepr::Cmyk { c, m, y, k } => Colour::CMYK { c, m, y, k },
            ColourRepr::Grey { g } => Colour::Grey { g },
        };
        if colour.components().iter().any(|v| !(0.0..=1.0).contains(v)) {
            return Err(format!("colour components must lie in 0.0..=1.0: {colour:?}"));
        }
        Ok(colour)
    }
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::RGB {
            r: c.0.into(),
            g: c.1.into(),
            b: c.2.into(),
        }
    }
}

impl<T: Into<f32>> From<(T, T, T, T)> for Colour {
    fn from(c: (T, T, T, T)) -> Self {
        Colour::CMYK {
            c: c.0.into(),
            m: c.1.into(),
            y: c.2.into(),
            k: c.3.into(),
        }
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    pub const LIGHT_GREY: Colour = Colour::Grey { g: 0.8 };
    /// The hot pink the badge names are printed in
    pub const SIGNAL_RED: Colour = Colour::new_rgb_bytes(252, 15, 60);
    /// Sheet and badge background
    pub const SKY_BLUE: Colour = Colour::new_rgb_bytes(27, 161, 236);
    /// Jagged frame fill
    pub const SUNSHINE: Colour = Colour::new_rgb_bytes(254, 223, 53);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_strings_parse() {
        assert_eq!(Colour::from_hex("#1ba1ec"), Some(colours::SKY_BLUE));
        assert_eq!(Colour::from_hex("fedf35"), Some(colours::SUNSHINE));
        assert_eq!(Colour::from_hex("#12345"), None);
        assert_eq!(Colour::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn colours_deserialize_from_every_form() {
        let parsed: Vec<Colour> = serde_json::from_str(
            r##"["#fc0f3c", {"r": 1.0, "g": 0.5, "b": 0.0}, {"c": 0.0, "m": 1.0, "y": 0.0, "k": 0.0}, {"g": 0.25}]"##,
        )
        .expect("colours parse");
        assert_eq!(parsed[0], colours::SIGNAL_RED);
        assert_eq!(parsed[1], Colour::new_rgb(1.0, 0.5, 0.0));
        assert_eq!(parsed[2], Colour::new_cmyk(0.0, 1.0, 0.0, 0.0));
        assert_eq!(parsed[3], Colour::new_grey(0.25));
    }

    #[test]
    fn out_of_range_components_are_rejected() {
        let parsed: Result<Colour, _> = serde_json::from_str(r#"{"r": 255, "g": 0, "b": 0}"#);
        assert!(parsed.is_err());
    }
}
