use crate::backend::PlotterType;
use crate::parameters::ParameterRegistry;

///
/// The answer to a capability query
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Capability {
    No,
    Yes,

    /// The plotter doesn't render directly, so the answer depends on what its output is translated to
    Maybe
}

///
/// The capabilities that can be queried, in the order of the rows in the capability table
///
pub const CAPABILITY_NAMES: [&str; 15] = [
    "WIDE_LINES",
    "DASH_ARRAY",
    "SETTABLE_BACKGROUND",
    "SOLID_FILL",
    "EVEN_ODD_FILL",
    "NONZERO_WINDING_NUMBER_FILL",
    "SETTABLE_BOUNDING_BOX",
    "HERSHEY_FONTS",
    "PS_FONTS",
    "PCL_FONTS",
    "STICK_FONTS",
    "EXTRA_STICK_FONTS",
    "OTHER_FONTS",
    "DOUBLE_BUFFERING",
    "REAL_TIME"
];

///
/// Capabilities of each plotter type: one character per entry of CAPABILITY_NAMES ('Y', 'N' or 'M' for maybe)
///
fn capability_row(plotter_type: PlotterType) -> &'static str {
    use self::PlotterType::*;

    match plotter_type {
        X | XDrawable       => "YYYYYYNYYNNNYYY",
        Pnm | Png | Gif     => "YYYYYYNYNNNNNNN",
        Ai                  => "YYNYYYYYYYNNNNN",
        Ps                  => "YYNYYYYYYNNNNNN",
        Fig                 => "YNNYYNYYYNNNNNN",
        Svg                 => "YYYYYYYYYYNNNNN",
        Cgm                 => "YYYYYNYYYNNNNNN",
        Pcl                 => "YYNYYYYYYYYNNNN",
        Hpgl                => "YYNYYYYYYYYNNNN",
        Tek                 => "NNNNNNNYNNNNNNY",
        Meta                => "MMMMMMMYMMMMMNY"
    }
}

///
/// The immutable set of capabilities of a plotter
///
#[derive(Clone, PartialEq, Debug)]
pub struct CapabilityTable {
    values: [Capability; 15]
}

impl Capability {
    ///
    /// The classic integer form of an answer: 0 for no, 1 for yes and 2 for maybe
    ///
    pub fn as_int(&self) -> i32 {
        match self {
            Capability::No      => 0,
            Capability::Yes     => 1,
            Capability::Maybe   => 2
        }
    }

    ///
    /// True unless the answer is a definite no
    ///
    pub fn is_possible(&self) -> bool {
        *self != Capability::No
    }

    fn from_char(c: char) -> Capability {
        match c {
            'Y' => Capability::Yes,
            'M' => Capability::Maybe,
            _   => Capability::No
        }
    }
}

impl CapabilityTable {
    ///
    /// Builds the table for a plotter type, refined by the parameters it was created with
    ///
    pub fn for_plotter(plotter_type: PlotterType, parameters: &ParameterRegistry) -> CapabilityTable {
        let mut values = [Capability::No; 15];

        for (idx, c) in capability_row(plotter_type).chars().enumerate().take(15) {
            values[idx] = Capability::from_char(c);
        }

        let mut table = CapabilityTable { values };

        if plotter_type == PlotterType::Hpgl {
            table.refine_for_hpgl_version(parameters.hpgl_version());
        }

        table
    }

    ///
    /// Older HP-GL devices lack most of the features of HP-GL/2
    ///
    fn refine_for_hpgl_version(&mut self, version: f64) {
        if version < 2.0 {
            for name in ["WIDE_LINES", "DASH_ARRAY", "NONZERO_WINDING_NUMBER_FILL", "PS_FONTS", "PCL_FONTS"].iter() {
                self.set(name, Capability::No);
            }

            // The HP7550A (HP-GL/1.5) adds a set of extra stick fonts
            if version >= 1.5 {
                self.set("EXTRA_STICK_FONTS", Capability::Yes);
            } else {
                self.set("SOLID_FILL", Capability::No);
                self.set("EVEN_ODD_FILL", Capability::No);
            }
        }
    }

    fn set(&mut self, name: &str, value: Capability) {
        if let Some(idx) = CAPABILITY_NAMES.iter().position(|cap| *cap == name) {
            self.values[idx] = value;
        }
    }

    ///
    /// Queries a capability by name (case-insensitive). Names that aren't known are answered with 'no'.
    ///
    pub fn query(&self, name: &str) -> Capability {
        CAPABILITY_NAMES.iter()
            .position(|cap| cap.eq_ignore_ascii_case(name))
            .map(|idx| self.values[idx])
            .unwrap_or(Capability::No)
    }

    ///
    /// True if the capability is definitely or possibly present
    ///
    pub fn allows(&self, name: &str) -> bool {
        self.query(name).is_possible()
    }
}

///
/// Queries the capabilities of a plotter type with its default parameters
///
pub fn query_capability(plotter_type: PlotterType, name: &str) -> Capability {
    CapabilityTable::for_plotter(plotter_type, &ParameterRegistry::new()).query(name)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::backend::ALL_PLOTTER_TYPES;

    #[test]
    fn every_row_is_complete() {
        for plotter_type in ALL_PLOTTER_TYPES.iter() {
            assert!(capability_row(*plotter_type).len() == CAPABILITY_NAMES.len());
        }
    }

    #[test]
    fn unknown_capability_is_no() {
        assert!(query_capability(PlotterType::Svg, "TELEPATHY") == Capability::No);
    }

    #[test]
    fn metafile_answers_maybe() {
        assert!(query_capability(PlotterType::Meta, "WIDE_LINES") == Capability::Maybe);
        assert!(query_capability(PlotterType::Meta, "WIDE_LINES").as_int() == 2);
    }

    #[test]
    fn tek_cannot_fill() {
        assert!(query_capability(PlotterType::Tek, "SOLID_FILL") == Capability::No);
        assert!(query_capability(PlotterType::Tek, "REAL_TIME") == Capability::Yes);
    }

    #[test]
    fn hpgl_version_refines_table() {
        let mut parameters = ParameterRegistry::new();
        assert!(CapabilityTable::for_plotter(PlotterType::Hpgl, &parameters).query("WIDE_LINES") == Capability::Yes);

        parameters.set("HPGL_VERSION", "1.5").unwrap();
        let table = CapabilityTable::for_plotter(PlotterType::Hpgl, &parameters);

        assert!(table.query("WIDE_LINES") == Capability::No);
        assert!(table.query("NONZERO_WINDING_NUMBER_FILL") == Capability::No);
        assert!(table.query("EXTRA_STICK_FONTS") == Capability::Yes);
        assert!(table.query("SOLID_FILL") == Capability::Yes);
    }

    #[test]
    fn query_is_case_insensitive() {
        assert!(query_capability(PlotterType::X, "double_buffering") == Capability::Yes);
    }
}
