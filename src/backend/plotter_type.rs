use crate::error::*;
use crate::path::SegmentSupport;
use crate::parameters::ParameterRegistry;

use std::fmt;
use std::str::FromStr;

///
/// The backends that a plotter can be created for
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PlotterType {
    X,
    XDrawable,
    Pnm,
    Png,
    Gif,
    Ai,
    Ps,
    Fig,
    Svg,
    Cgm,
    Pcl,
    Hpgl,
    Tek,
    Meta
}

///
/// The family of devices a plotter type belongs to
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BackendClass {
    RealTimeWindow,
    RealTimeDrawable,
    Bitmap,
    PageVector,
    VectorDrawing,
    VectorStream,
    PenPlotter,
    Terminal,
    Metafile
}

///
/// When the backend hands a finished page to its encoder
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PageEmission {
    /// Instructions reach the device as soon as they are produced
    Immediate,

    /// Each page is written when it is closed
    AtClose,

    /// Every page is retained and written when the plotter is deleted
    AtDelete
}

///
/// Every plotter type, in the order they're listed by `PlotterType::name()`
///
pub const ALL_PLOTTER_TYPES: [PlotterType; 14] = [
    PlotterType::X, PlotterType::XDrawable, PlotterType::Pnm, PlotterType::Png, PlotterType::Gif,
    PlotterType::Ai, PlotterType::Ps, PlotterType::Fig, PlotterType::Svg, PlotterType::Cgm,
    PlotterType::Pcl, PlotterType::Hpgl, PlotterType::Tek, PlotterType::Meta
];

impl PlotterType {
    ///
    /// The name used to request this plotter type
    ///
    pub fn name(&self) -> &'static str {
        use self::PlotterType::*;

        match self {
            X           => "X",
            XDrawable   => "Xdrawable",
            Pnm         => "pnm",
            Png         => "png",
            Gif         => "gif",
            Ai          => "ai",
            Ps          => "ps",
            Fig         => "fig",
            Svg         => "svg",
            Cgm         => "cgm",
            Pcl         => "pcl",
            Hpgl        => "hpgl",
            Tek         => "tek",
            Meta        => "meta"
        }
    }

    pub fn class(&self) -> BackendClass {
        use self::PlotterType::*;

        match self {
            X                   => BackendClass::RealTimeWindow,
            XDrawable           => BackendClass::RealTimeDrawable,
            Pnm | Png | Gif     => BackendClass::Bitmap,
            Ai | Ps | Fig       => BackendClass::PageVector,
            Svg                 => BackendClass::VectorDrawing,
            Cgm                 => BackendClass::VectorStream,
            Pcl | Hpgl          => BackendClass::PenPlotter,
            Tek                 => BackendClass::Terminal,
            Meta                => BackendClass::Metafile
        }
    }

    ///
    /// True if drawing instructions reach the device while the page is open
    ///
    pub fn is_realtime(&self) -> bool {
        use self::PlotterType::*;

        match self {
            X | XDrawable | Tek | Meta  => true,
            _                           => false
        }
    }

    ///
    /// True if what has been drawn survives a close/open cycle (it's only removed by erase)
    ///
    pub fn is_persistent(&self) -> bool {
        match self {
            PlotterType::XDrawable | PlotterType::Tek   => true,
            _                                           => false
        }
    }

    ///
    /// True if the device is a pixel grid
    ///
    pub fn produces_bitmap(&self) -> bool {
        self.class() == BackendClass::Bitmap || self.class() == BackendClass::RealTimeWindow || self.class() == BackendClass::RealTimeDrawable
    }

    ///
    /// The most pages this backend can write, if it's limited
    ///
    pub fn page_limit(&self) -> Option<usize> {
        use self::PlotterType::*;

        match self {
            Pnm | Png | Gif | Ai | Fig | Svg    => Some(1),
            _                                   => None
        }
    }

    pub fn page_emission(&self) -> PageEmission {
        if self.is_realtime() {
            PageEmission::Immediate
        } else if *self == PlotterType::Ps {
            PageEmission::AtDelete
        } else {
            PageEmission::AtClose
        }
    }

    ///
    /// True if path segments are sent to the device as they are added instead of when the path ends
    ///
    pub fn streams_segments(&self) -> bool {
        match self {
            PlotterType::Tek | PlotterType::Meta    => true,
            _                                       => false
        }
    }

    ///
    /// True if long unfilled paths are broken into pieces to respect MAX_LINE_LENGTH
    ///
    pub fn splits_long_paths(&self) -> bool {
        !self.streams_segments()
    }

    ///
    /// The font used until fontname() is called
    ///
    pub fn default_font(&self) -> &'static str {
        use self::PlotterType::*;

        match self {
            Pnm | Png | Gif | Hpgl | Tek | Meta => "HersheySerif",
            _                                   => "Helvetica"
        }
    }
}

impl PlotterType {
    ///
    /// The kinds of curve that this plotter can send to its device without converting them
    ///
    pub fn segment_support(&self, parameters: &ParameterRegistry) -> SegmentSupport {
        use self::PlotterType::*;

        match self {
            X | XDrawable | Pnm | Png | Gif | Ai    => SegmentSupport { arcs: false, quadratics: false, cubics: true },
            Ps | Fig | Cgm                          => SegmentSupport { arcs: true, quadratics: false, cubics: true },
            Svg | Meta                              => SegmentSupport::all(),
            Pcl                                     => SegmentSupport { arcs: true, quadratics: false, cubics: parameters.flag("PCL_BEZIERS") },
            Hpgl                                    => SegmentSupport { arcs: true, quadratics: false, cubics: parameters.hpgl_version() >= 2.0 },
            Tek                                     => SegmentSupport::lines_only()
        }
    }
}

impl fmt::Display for PlotterType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PlotterType {
    type Err = PlotError;

    fn from_str(name: &str) -> Result<PlotterType, PlotError> {
        ALL_PLOTTER_TYPES.iter()
            .find(|plotter_type| plotter_type.name().eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| PlotError::UnknownPlotterType(name.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_names_ignoring_case() {
        assert!("svg".parse::<PlotterType>().ok() == Some(PlotterType::Svg));
        assert!("xdrawable".parse::<PlotterType>().ok() == Some(PlotterType::XDrawable));
        assert!("HPGL".parse::<PlotterType>().ok() == Some(PlotterType::Hpgl));
    }

    #[test]
    fn unknown_name_is_an_error() {
        match "dxf".parse::<PlotterType>() {
            Err(PlotError::UnknownPlotterType(name))    => assert!(name == "dxf"),
            _                                           => panic!("dxf should not be a plotter type")
        }
    }

    #[test]
    fn names_round_trip() {
        for plotter_type in ALL_PLOTTER_TYPES.iter() {
            assert!(plotter_type.name().parse::<PlotterType>().ok() == Some(*plotter_type));
        }
    }

    #[test]
    fn only_ps_waits_for_delete() {
        for plotter_type in ALL_PLOTTER_TYPES.iter() {
            let at_delete = plotter_type.page_emission() == PageEmission::AtDelete;
            assert!(at_delete == (*plotter_type == PlotterType::Ps));
        }
    }

    #[test]
    fn old_plotters_flatten_curves() {
        let mut parameters = ParameterRegistry::new();
        assert!(PlotterType::Hpgl.segment_support(&parameters).cubics);

        parameters.set("HPGL_VERSION", "1").unwrap();
        parameters.set("PCL_BEZIERS", "no").unwrap();
        assert!(!PlotterType::Hpgl.segment_support(&parameters).cubics);
        assert!(!PlotterType::Pcl.segment_support(&parameters).cubics);
        assert!(PlotterType::Tek.segment_support(&parameters) == SegmentSupport::lines_only());
    }

    #[test]
    fn persistent_types_are_realtime() {
        for plotter_type in ALL_PLOTTER_TYPES.iter() {
            if plotter_type.is_persistent() {
                assert!(plotter_type.is_realtime());
            }
        }
    }
}
