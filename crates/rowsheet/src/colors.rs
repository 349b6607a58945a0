//! Cell color values and the coarse color classifier

use std::fmt;

use crate::error::{Error, Result};

/// Engine default for an unset font color
pub const DEFAULT_FONT_ARGB: &str = "FF000000";
/// Engine default for an unset fill start stop
pub const DEFAULT_FILL_START_ARGB: &str = "FFFFFFFF";
/// Engine default for an unset fill end stop
pub const DEFAULT_FILL_END_ARGB: &str = "FF000000";

/// Channels must exceed this to dominate
const DOMINANT_MIN: u8 = 150;
/// Lead a dominant channel needs over each of the others
const DOMINANT_LEAD: u8 = 80;

/// Coarse name of a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorName {
    Red,
    Green,
    Blue,
    Gray,
    Black,
    White,
    Unknown,
}

impl ColorName {
    /// Classify an 8-digit ARGB hex string
    ///
    /// Gray levels split on the channel sum: above 750 is white, below 180
    /// black, anything between gray. Otherwise a channel above 150 that
    /// leads both others by more than 80 names the color. A dominant blue
    /// channel reports [`ColorName::Green`], which existing consumers rely
    /// on. Malformed input is [`ColorName::Unknown`].
    ///
    /// ```
    /// use rowsheet::ColorName;
    ///
    /// assert_eq!(ColorName::classify("FFFFFFFF"), ColorName::White);
    /// assert_eq!(ColorName::classify("FFED1C24"), ColorName::Red);
    /// assert_eq!(ColorName::classify("FF336699"), ColorName::Unknown);
    /// ```
    pub fn classify(argb: &str) -> ColorName {
        match rgb_channels(argb) {
            Some(rgb) => Self::classify_rgb(rgb),
            None => ColorName::Unknown,
        }
    }

    /// Classify RGB channels
    pub fn classify_rgb((r, g, b): (u8, u8, u8)) -> ColorName {
        if r == g && g == b {
            let sum = r as u16 + g as u16 + b as u16;
            return if sum > 750 {
                ColorName::White
            } else if sum < 180 {
                ColorName::Black
            } else {
                ColorName::Gray
            };
        }

        if dominates(r, g, b) {
            ColorName::Red
        } else if dominates(g, r, b) || dominates(b, r, g) {
            ColorName::Green
        } else {
            ColorName::Unknown
        }
    }

    /// Lower-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorName::Red => "red",
            ColorName::Green => "green",
            ColorName::Blue => "blue",
            ColorName::Gray => "gray",
            ColorName::Black => "black",
            ColorName::White => "white",
            ColorName::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn dominates(channel: u8, other_a: u8, other_b: u8) -> bool {
    channel > DOMINANT_MIN
        && channel > other_a
        && channel > other_b
        && channel - other_a > DOMINANT_LEAD
        && channel - other_b > DOMINANT_LEAD
}

/// RGB channels of an 8-digit ARGB hex string (alpha ignored)
fn rgb_channels(argb: &str) -> Option<(u8, u8, u8)> {
    if argb.len() != 8 || !argb.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&argb[i..i + 2], 16).ok();
    Some((channel(2)?, channel(4)?, channel(6)?))
}

/// Validate an 8-digit ARGB string, returning it upper-cased
pub fn parse_argb(argb: &str) -> Result<String> {
    if argb.len() != 8 || !argb.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidColor(argb.to_string()));
    }
    Ok(argb.to_ascii_uppercase())
}

/// ARGB of a color as the engine stores it
///
/// 6-digit RGB gains an opaque alpha. Theme and unset colors have no ARGB
/// and come back as `None`.
pub(crate) fn normalize_argb(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match raw.len() {
        8 => Some(raw.to_ascii_uppercase()),
        6 => Some(format!("FF{}", raw.to_ascii_uppercase())),
        _ => None,
    }
}

/// ARGB of a font color, with the engine default for an unset color
pub(crate) fn font_argb(color: Option<&str>) -> String {
    color.unwrap_or(DEFAULT_FONT_ARGB).to_string()
}

/// ARGB of both fill stops, with the engine defaults for unset stops
pub(crate) fn fill_argb(start: Option<&str>, end: Option<&str>) -> FillStops {
    FillStops {
        start: start.unwrap_or(DEFAULT_FILL_START_ARGB).to_string(),
        end: end.unwrap_or(DEFAULT_FILL_END_ARGB).to_string(),
    }
}

/// The two stops of a cell fill as ARGB strings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FillStops {
    pub start: String,
    pub end: String,
}

/// Colors of a cell in ARGB form
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ArgbColors {
    pub font: String,
    pub fill: FillStops,
}

/// Colors of a cell as coarse names, the fill collapsed to its end stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NamedColors {
    pub font: ColorName,
    pub fill: ColorName,
}

/// Colors of a cell, in the presentation chosen by [`ColorMode`](crate::ColorMode)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum CellColors {
    Argb(ArgbColors),
    Named(NamedColors),
}

impl CellColors {
    /// The ARGB view, if this is one
    pub fn as_argb(&self) -> Option<&ArgbColors> {
        match self {
            CellColors::Argb(colors) => Some(colors),
            CellColors::Named(_) => None,
        }
    }

    /// The coarse view, if this is one
    pub fn as_named(&self) -> Option<&NamedColors> {
        match self {
            CellColors::Named(colors) => Some(colors),
            CellColors::Argb(_) => None,
        }
    }
}

/// A fill to apply: either stop may be left untouched
///
/// A plain ARGB string converts into a solid fill with both stops set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FillColor {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl FillColor {
    /// Both stops set to one color
    pub fn solid<S: Into<String>>(argb: S) -> Self {
        let argb = argb.into();
        Self {
            start: Some(argb.clone()),
            end: Some(argb),
        }
    }

    /// Set the start stop
    pub fn with_start<S: Into<String>>(mut self, argb: S) -> Self {
        self.start = Some(argb.into());
        self
    }

    /// Set the end stop
    pub fn with_end<S: Into<String>>(mut self, argb: S) -> Self {
        self.end = Some(argb.into());
        self
    }

    /// Parse the stops that are present
    pub(crate) fn parse(&self) -> Result<(Option<String>, Option<String>)> {
        let start = self.start.as_deref().map(parse_argb).transpose()?;
        let end = self.end.as_deref().map(parse_argb).transpose()?;
        Ok((start, end))
    }
}

impl From<&str> for FillColor {
    fn from(argb: &str) -> Self {
        FillColor::solid(argb)
    }
}

impl From<String> for FillColor {
    fn from(argb: String) -> Self {
        FillColor::solid(argb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_gray_levels() {
        assert_eq!(ColorName::classify("FFFFFFFF"), ColorName::White);
        assert_eq!(ColorName::classify("FF000000"), ColorName::Black);
        assert_eq!(ColorName::classify("FF3B3B3B"), ColorName::Black);
        assert_eq!(ColorName::classify("FF3C3C3C"), ColorName::Gray);
        assert_eq!(ColorName::classify("FFFAFAFA"), ColorName::Gray);
        assert_eq!(ColorName::classify("FFFBFBFB"), ColorName::White);
    }

    #[test]
    fn test_dominant_channels() {
        assert_eq!(ColorName::classify("FFED1C24"), ColorName::Red);
        assert_eq!(ColorName::classify("FF993300"), ColorName::Red);
        assert_eq!(ColorName::classify("FF00C800"), ColorName::Green);
        assert_eq!(ColorName::classify("FF00A65D"), ColorName::Unknown);
        // Blue reports green
        assert_eq!(ColorName::classify("FF0000FF"), ColorName::Green);
        assert_eq!(ColorName::classify("FF0066B3"), ColorName::Unknown);
    }

    #[test]
    fn test_lead_must_exceed_margin() {
        // 230 - 150 is exactly 80
        assert_eq!(ColorName::classify_rgb((230, 150, 0)), ColorName::Unknown);
        assert_eq!(ColorName::classify_rgb((231, 150, 0)), ColorName::Red);
        // 150 itself is not enough
        assert_eq!(ColorName::classify_rgb((150, 0, 0)), ColorName::Unknown);
    }

    #[test]
    fn test_alpha_is_ignored() {
        assert_eq!(ColorName::classify("00ED1C24"), ColorName::Red);
    }

    #[test]
    fn test_malformed_input() {
        assert_eq!(ColorName::classify("ED1C24"), ColorName::Unknown);
        assert_eq!(ColorName::classify("FFED1C2G"), ColorName::Unknown);
        assert_eq!(ColorName::classify("FFÉD1C2"), ColorName::Unknown);
    }

    #[test]
    fn test_engine_defaults() {
        assert_eq!(font_argb(None), "FF000000");
        assert_eq!(font_argb(Some("FFFFFFFF")), "FFFFFFFF");
        assert_eq!(
            fill_argb(None, None),
            FillStops {
                start: "FFFFFFFF".into(),
                end: "FF000000".into(),
            }
        );
    }

    #[test]
    fn test_normalize_engine_colors() {
        assert_eq!(normalize_argb("ffed1c24").as_deref(), Some("FFED1C24"));
        assert_eq!(normalize_argb("0066B3").as_deref(), Some("FF0066B3"));
        assert_eq!(normalize_argb(""), None);
        assert_eq!(normalize_argb("theme"), None);
    }

    #[test]
    fn test_fill_color_parse() {
        let fill = FillColor::default().with_end("ff0066b3");
        assert_eq!(fill.parse().unwrap(), (None, Some("FF0066B3".to_string())));
        assert!(matches!(
            FillColor::from("blue").parse(),
            Err(Error::InvalidColor(c)) if c == "blue"
        ));
        assert!(matches!(parse_argb("#FFFFFF"), Err(Error::InvalidColor(_))));
    }

    proptest! {
        #[test]
        fn classification_is_deterministic(a in any::<u8>(), r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let argb = format!("{:02X}{:02X}{:02X}{:02X}", a, r, g, b);
            prop_assert_eq!(ColorName::classify(&argb), ColorName::classify(&argb));
            prop_assert_eq!(ColorName::classify(&argb), ColorName::classify_rgb((r, g, b)));
            prop_assert_ne!(ColorName::classify(&argb), ColorName::Blue);
        }
    }
}
