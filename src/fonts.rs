use crate::capability::*;

///
/// The families of fonts that plotters can support
///
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FontClass {
    /// Vector fonts drawn by the plotter itself
    Hershey,

    /// The 35 standard PostScript fonts
    PostScript,

    /// Fonts built into PCL 5 printers
    Pcl,

    /// Fonts built into HP-GL pen plotters
    Stick,

    /// The additional stick fonts of HP-GL/1.5 devices
    ExtraStick,

    /// Any other font, which only window systems can provide
    Other
}

const HERSHEY_FONTS: [&str; 22] = [
    "HersheySerif", "HersheySerif-Italic", "HersheySerif-Bold", "HersheySerif-BoldItalic",
    "HersheyCyrillic", "HersheyCyrillic-Oblique", "HersheyEUC",
    "HersheySerifSymbol", "HersheySerifSymbol-Oblique", "HersheySerifSymbol-Bold", "HersheySerifSymbol-BoldOblique",
    "HersheySans", "HersheySans-Oblique", "HersheySans-Bold", "HersheySans-BoldOblique",
    "HersheySansSymbol", "HersheySansSymbol-Oblique",
    "HersheyScript", "HersheyScript-Bold",
    "HersheyGothicEnglish", "HersheyGothicGerman", "HersheyGothicItalian"
];

const POSTSCRIPT_FONTS: [&str; 35] = [
    "Helvetica", "Helvetica-Oblique", "Helvetica-Bold", "Helvetica-BoldOblique",
    "Helvetica-Narrow", "Helvetica-Narrow-Oblique", "Helvetica-Narrow-Bold", "Helvetica-Narrow-BoldOblique",
    "Times-Roman", "Times-Italic", "Times-Bold", "Times-BoldItalic",
    "AvantGarde-Book", "AvantGarde-BookOblique", "AvantGarde-Demi", "AvantGarde-DemiOblique",
    "Bookman-Light", "Bookman-LightItalic", "Bookman-Demi", "Bookman-DemiItalic",
    "Courier", "Courier-Oblique", "Courier-Bold", "Courier-BoldOblique",
    "NewCenturySchlbk-Roman", "NewCenturySchlbk-Italic", "NewCenturySchlbk-Bold", "NewCenturySchlbk-BoldItalic",
    "Palatino-Roman", "Palatino-Italic", "Palatino-Bold", "Palatino-BoldItalic",
    "ZapfChancery-MediumItalic", "ZapfDingbats", "Symbol"
];

const PCL_FONTS: [&str; 16] = [
    "Univers", "Univers-Bold", "Univers-Italic", "Univers-BoldItalic",
    "UniversCondensed", "UniversCondensed-Bold", "UniversCondensed-Italic", "UniversCondensed-BoldItalic",
    "CGTimes", "CGTimes-Bold", "CGTimes-Italic", "CGTimes-BoldItalic",
    "Albertus-Medium", "AntiqueOlive", "Arial", "Wingdings"
];

const STICK_FONTS: [&str; 2] = [ "Stick", "StickFixed" ];

const EXTRA_STICK_FONTS: [&str; 2] = [ "Arc", "ArcFixed" ];

///
/// Works out which family a font belongs to
///
pub fn font_class(name: &str) -> FontClass {
    let matches = |fonts: &[&str]| fonts.iter().any(|font| font.eq_ignore_ascii_case(name));

    if matches(&HERSHEY_FONTS[..]) {
        FontClass::Hershey
    } else if matches(&POSTSCRIPT_FONTS[..]) {
        FontClass::PostScript
    } else if matches(&PCL_FONTS[..]) {
        FontClass::Pcl
    } else if matches(&STICK_FONTS[..]) {
        FontClass::Stick
    } else if matches(&EXTRA_STICK_FONTS[..]) {
        FontClass::ExtraStick
    } else {
        FontClass::Other
    }
}

impl FontClass {
    ///
    /// The capability that says whether a plotter can draw fonts of this class
    ///
    pub fn capability(&self) -> &'static str {
        match self {
            FontClass::Hershey      => "HERSHEY_FONTS",
            FontClass::PostScript   => "PS_FONTS",
            FontClass::Pcl          => "PCL_FONTS",
            FontClass::Stick        => "STICK_FONTS",
            FontClass::ExtraStick   => "EXTRA_STICK_FONTS",
            FontClass::Other        => "OTHER_FONTS"
        }
    }
}

///
/// True if a plotter with the specified capabilities can draw text in the named font
///
pub fn is_font_available(name: &str, capabilities: &CapabilityTable) -> bool {
    capabilities.allows(font_class(name).capability())
}

///
/// Measures text for positioning labels
///
/// Sizes are in whatever units the font size is given in.
///
pub trait FontMetrics {
    ///
    /// The advance width of a string set in the specified font
    ///
    fn string_width(&self, font_name: &str, font_size: f64, text: &str) -> f64;
}

///
/// Metrics that treat every character as having the same advance, a fixed fraction of the font size
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct FixedPitchMetrics {
    pub advance: f64
}

impl Default for FixedPitchMetrics {
    fn default() -> FixedPitchMetrics {
        FixedPitchMetrics { advance: 0.6 }
    }
}

impl FontMetrics for FixedPitchMetrics {
    fn string_width(&self, _font_name: &str, font_size: f64, text: &str) -> f64 {
        (text.chars().count() as f64) * font_size * self.advance
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::backend::PlotterType;
    use crate::parameters::ParameterRegistry;

    #[test]
    fn classify_fonts() {
        assert!(font_class("HersheySerif") == FontClass::Hershey);
        assert!(font_class("times-roman") == FontClass::PostScript);
        assert!(font_class("Univers") == FontClass::Pcl);
        assert!(font_class("Stick") == FontClass::Stick);
        assert!(font_class("Comic Sans") == FontClass::Other);
    }

    #[test]
    fn hershey_fonts_are_everywhere() {
        for plotter_type in crate::backend::ALL_PLOTTER_TYPES.iter() {
            let capabilities = CapabilityTable::for_plotter(*plotter_type, &ParameterRegistry::new());
            assert!(is_font_available("HersheySans", &capabilities));
        }
    }

    #[test]
    fn bitmaps_have_no_postscript_fonts() {
        let capabilities = CapabilityTable::for_plotter(PlotterType::Png, &ParameterRegistry::new());
        assert!(!is_font_available("Helvetica", &capabilities));
    }

    #[test]
    fn fixed_pitch_width() {
        let metrics = FixedPitchMetrics::default();
        assert!((metrics.string_width("Helvetica", 10.0, "abcde") - 30.0).abs() < 1e-9);
    }
}
