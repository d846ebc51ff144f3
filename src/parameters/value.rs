use super::page_size::*;

use flo_plot_canvas::Color;

///
/// The type of value a parameter holds
///
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ParameterKind {
    /// Free text, such as a display name
    Text,

    /// An integer within an inclusive range
    Integer(i64, i64),

    /// "yes" or "no"
    Flag,

    /// A colour name or #rrggbb
    Color,

    /// A colour, or "none"
    OptionalColor,

    /// A distance with a unit suffix: "in", "cm" or "mm" (bare numbers are inches)
    Length,

    /// A paper size name
    PageSize,

    /// Bitmap dimensions, "WIDTHxHEIGHT"
    BitmapSize,

    /// 0, 90, 180 or 270 ("no" means 0 and "yes" means 90)
    Rotation,

    /// An HP-GL version: 1, 1.5 or 2
    Version,

    /// A pen assignment list, "1=black:2=red:..."
    PenList
}

///
/// A parsed parameter value
///
#[derive(Clone, PartialEq, Debug)]
pub enum ParameterValue {
    Text(String),
    Integer(i64),
    Flag(bool),
    Color(Color),
    NoColor,

    /// A length in inches
    Length(f64),

    PageSize(PageSize),
    BitmapSize(u32, u32),
    Rotation(u32),
    Version(f64),
    Pens(Vec<(u8, Color)>)
}

impl ParameterKind {
    ///
    /// Describes the values this kind accepts, for error messages
    ///
    pub fn expected(&self) -> &'static str {
        use self::ParameterKind::*;

        match self {
            Text            => "text",
            Integer(_, _)   => "an integer in range",
            Flag            => "yes or no",
            Color           => "a colour name or #rrggbb",
            OptionalColor   => "a colour name, #rrggbb or none",
            Length          => "a length such as 2cm, 10mm or 1.5in",
            PageSize        => "a paper size name such as letter or a4",
            BitmapSize      => "a size such as 570x570",
            Rotation        => "0, 90, 180 or 270",
            Version         => "1, 1.5 or 2",
            PenList         => "a pen list such as 1=black:2=red"
        }
    }

    ///
    /// Parses a value of this kind, returning None if it's malformed
    ///
    pub fn parse(&self, value: &str) -> Option<ParameterValue> {
        let value = value.trim();

        match self {
            ParameterKind::Text                 => Some(ParameterValue::Text(value.to_string())),
            ParameterKind::Integer(min, max)    => value.parse::<i64>().ok().filter(|num| num >= min && num <= max).map(ParameterValue::Integer),
            ParameterKind::Flag                 => parse_flag(value).map(ParameterValue::Flag),
            ParameterKind::Color                => Color::from_name(value).map(ParameterValue::Color),
            ParameterKind::OptionalColor        => if value.eq_ignore_ascii_case("none") { Some(ParameterValue::NoColor) } else { Color::from_name(value).map(ParameterValue::Color) },
            ParameterKind::Length               => parse_length(value).map(ParameterValue::Length),
            ParameterKind::PageSize             => PageSize::from_name(value).map(ParameterValue::PageSize),
            ParameterKind::BitmapSize           => parse_bitmap_size(value).map(|(w, h)| ParameterValue::BitmapSize(w, h)),
            ParameterKind::Rotation             => parse_rotation(value).map(ParameterValue::Rotation),
            ParameterKind::Version              => parse_version(value).map(ParameterValue::Version),
            ParameterKind::PenList              => parse_pens(value).map(ParameterValue::Pens)
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "true" | "1"    => Some(true),
        "no" | "false" | "0"    => Some(false),
        _                       => None
    }
}

///
/// Reads a length, returning it in inches
///
fn parse_length(value: &str) -> Option<f64> {
    let lower           = value.to_ascii_lowercase();
    let (number, units) = if lower.ends_with("in") {
        (&lower[..lower.len()-2], 1.0)
    } else if lower.ends_with("cm") {
        (&lower[..lower.len()-2], 2.54)
    } else if lower.ends_with("mm") {
        (&lower[..lower.len()-2], 25.4)
    } else {
        (&lower[..], 1.0)
    };

    number.trim().parse::<f64>().ok()
        .filter(|length| length.is_finite())
        .map(|length| length/units)
}

///
/// Reads "WIDTHxHEIGHT", ignoring any X-style "+x+y" position that follows
///
fn parse_bitmap_size(value: &str) -> Option<(u32, u32)> {
    let size            = value.split('+').next()?;
    let mut dimensions  = size.split(|c: char| c == 'x' || c == 'X');

    let width           = dimensions.next()?.trim().parse::<u32>().ok()?;
    let height          = dimensions.next()?.trim().parse::<u32>().ok()?;

    if dimensions.next().is_some() || width == 0 || height == 0 {
        None
    } else {
        Some((width, height))
    }
}

fn parse_rotation(value: &str) -> Option<u32> {
    match value.to_ascii_lowercase().as_str() {
        "no" | "0"      => Some(0),
        "yes" | "90"    => Some(90),
        "180"           => Some(180),
        "270"           => Some(270),
        _               => None
    }
}

fn parse_version(value: &str) -> Option<f64> {
    match value {
        "1" | "1.0"     => Some(1.0),
        "1.5"           => Some(1.5),
        "2" | "2.0"     => Some(2.0),
        _               => None
    }
}

///
/// Reads a pen list such as "1=black:2=red:3=#00ff00". Pen numbers run from 1 to 31.
///
fn parse_pens(value: &str) -> Option<Vec<(u8, Color)>> {
    value.split(':')
        .filter(|pen| !pen.trim().is_empty())
        .map(|pen| {
            let mut parts   = pen.splitn(2, '=');
            let number      = parts.next()?.trim().parse::<u8>().ok().filter(|num| *num >= 1 && *num <= 31)?;
            let color       = Color::from_name(parts.next()?)?;

            Some((number, color))
        })
        .collect()
}
