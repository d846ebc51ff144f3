use flo_plot_canvas::*;

use std::str::FromStr;

///
/// The canonical line styles
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum LineMode {
    Solid,
    Dotted,
    DotDashed,
    ShortDashed,
    LongDashed,
    DotDotDashed,
    DotDotDotDashed,

    /// Only the junctions between segments are drawn, as dots
    Disconnected
}

///
/// A dash pattern in device units
///
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct DashPattern {
    pub dashes: Vec<f64>,
    pub offset: f64
}

///
/// The attributes a path is drawn with, resolved to device units when the path began
///
#[derive(Clone, PartialEq, Debug)]
pub struct PathStyle {
    /// Map from the path's user coordinates to device coordinates
    pub transform:      Transform2D,

    pub pen_color:      Color,

    /// The colour the path is filled with, after applying the fill level, or None if it's not filled
    pub fill:           Option<Color>,

    pub fill_rule:      WindingRule,

    /// Width of the line in device units
    pub line_width:     f64,

    pub line_mode:      LineMode,

    /// The dashes to stroke with, or None for a solid line
    pub dashes:         Option<DashPattern>,

    pub cap:            LineCap,
    pub join:           LineJoin,
    pub miter_limit:    f64
}

impl LineMode {
    ///
    /// The dash pattern for this line mode, as multiples of the dash unit (None for modes that aren't dashed)
    ///
    pub fn dash_units(&self) -> Option<&'static [f64]> {
        use self::LineMode::*;

        let units: &'static [f64] = match self {
            Solid | Disconnected    => &[],
            Dotted                  => &[1.0, 3.0],
            DotDashed               => &[4.0, 3.0, 1.0, 3.0],
            ShortDashed             => &[4.0, 4.0],
            LongDashed              => &[7.0, 4.0],
            DotDotDashed            => &[4.0, 3.0, 1.0, 3.0, 1.0, 3.0],
            DotDotDotDashed         => &[4.0, 3.0, 1.0, 3.0, 1.0, 3.0, 1.0, 3.0]
        };

        if units.is_empty() { None } else { Some(units) }
    }

    ///
    /// The dash pattern for this line mode in device units
    ///
    pub fn dash_pattern(&self, unit: f64) -> Option<DashPattern> {
        self.dash_units()
            .map(|units| DashPattern { dashes: units.iter().map(|length| length*unit).collect(), offset: 0.0 })
    }

    ///
    /// Finds the dashed line mode that best resembles a dash array, for devices that can't draw arbitrary dashes
    ///
    pub fn nearest_to_dashes(dashes: &[f64], unit: f64) -> LineMode {
        use self::LineMode::*;

        if dashes.is_empty() || dashes.iter().all(|length| *length <= 0.0) || unit <= 0.0 {
            return Solid;
        }

        // Compare the first dash and first gap against each canonical pattern
        let dash    = dashes[0] / unit;
        let gap     = dashes.get(1).cloned().unwrap_or(dashes[0]) / unit;
        let count   = dashes.len();

        [Dotted, DotDashed, ShortDashed, LongDashed, DotDotDashed, DotDotDotDashed].iter()
            .map(|mode| {
                let units       = mode.dash_units().unwrap_or(&[]);
                let shape       = (units[0]-dash).abs() + (units[1]-gap).abs();
                let length      = (units.len() as f64 - count as f64).abs() * 0.5;

                (*mode, shape + length)
            })
            .fold((Solid, f64::MAX), |best, candidate| if candidate.1 < best.1 { candidate } else { best })
            .0
    }
}

impl FromStr for LineMode {
    type Err = ();

    fn from_str(name: &str) -> Result<LineMode, ()> {
        use self::LineMode::*;

        match name.to_ascii_lowercase().as_str() {
            "solid"             => Ok(Solid),
            "dotted"            => Ok(Dotted),
            "dotdashed"         => Ok(DotDashed),
            "shortdashed"       => Ok(ShortDashed),
            "longdashed"        => Ok(LongDashed),
            "dotdotdashed"      => Ok(DotDotDashed),
            "dotdotdotdashed"   => Ok(DotDotDotDashed),
            "disconnected"      => Ok(Disconnected),
            _                   => Err(())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dash_patterns_scale_with_unit() {
        let pattern = LineMode::DotDashed.dash_pattern(2.0).unwrap();

        assert!(pattern.dashes == vec![8.0, 6.0, 2.0, 6.0]);
        assert!(LineMode::Solid.dash_pattern(2.0).is_none());
    }

    #[test]
    fn nearest_line_mode() {
        assert!(LineMode::nearest_to_dashes(&[7.0, 4.0], 1.0) == LineMode::LongDashed);
        assert!(LineMode::nearest_to_dashes(&[2.0, 6.0], 2.0) == LineMode::Dotted);
        assert!(LineMode::nearest_to_dashes(&[], 1.0) == LineMode::Solid);
    }

    #[test]
    fn parse_line_modes() {
        assert!("longdashed".parse::<LineMode>() == Ok(LineMode::LongDashed));
        assert!("zigzag".parse::<LineMode>().is_err());
    }
}
