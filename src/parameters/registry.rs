use super::value::*;
use super::page_size::*;
use crate::error::*;
use crate::backend::PlotterType;
use crate::backend::PlotterType::*;

use flo_plot_canvas::Color;

use std::sync::*;
use std::collections::BTreeMap;

///
/// Describes a parameter that plotters understand
///
#[derive(Clone, Copy, Debug)]
pub struct ParameterDefinition {
    pub name:           &'static str,
    pub default:        Option<&'static str>,
    pub kind:           ParameterKind,
    pub relevant_to:    &'static [PlotterType]
}

const BITMAP_TYPES: [PlotterType; 5]    = [X, XDrawable, Pnm, Png, Gif];
const PAGE_TYPES: [PlotterType; 7]      = [Ai, Ps, Fig, Svg, Cgm, Pcl, Hpgl];
const SPLITTING_TYPES: [PlotterType; 12] = [X, XDrawable, Pnm, Png, Gif, Ai, Ps, Fig, Svg, Cgm, Pcl, Hpgl];

const fn definition(name: &'static str, default: Option<&'static str>, kind: ParameterKind, relevant_to: &'static [PlotterType]) -> ParameterDefinition {
    ParameterDefinition { name, default, kind, relevant_to }
}

///
/// Every parameter a plotter reads, with its default value
///
pub static PARAMETER_DEFINITIONS: [ParameterDefinition; 31] = [
    definition("BG_COLOR",              Some("white"),      ParameterKind::Color,               &[X, XDrawable, Pnm, Png, Gif, Svg, Cgm]),
    definition("BITMAPSIZE",            Some("570x570"),    ParameterKind::BitmapSize,          &BITMAP_TYPES),
    definition("DISPLAY",               None,               ParameterKind::Text,                &[X]),
    definition("GIF_ANIMATION",         Some("yes"),        ParameterKind::Flag,                &[Gif]),
    definition("GIF_DELAY",             Some("0"),          ParameterKind::Integer(0, 65535),   &[Gif]),
    definition("GIF_ITERATIONS",        Some("0"),          ParameterKind::Integer(0, 65535),   &[Gif]),
    definition("HPGL_ASSIGN_COLORS",    Some("no"),         ParameterKind::Flag,                &[Hpgl]),
    definition("HPGL_OPAQUE_MODE",      Some("yes"),        ParameterKind::Flag,                &[Hpgl]),
    definition("HPGL_PENS",             Some("1=black:2=red:3=green:4=yellow:5=blue:6=magenta:7=cyan"), ParameterKind::PenList, &[Hpgl]),
    definition("HPGL_ROTATE",           Some("0"),          ParameterKind::Rotation,            &[Hpgl]),
    definition("HPGL_VERSION",          Some("2"),          ParameterKind::Version,             &[Hpgl]),
    definition("HPGL_XOFFSET",          Some("0.0cm"),      ParameterKind::Length,              &[Hpgl]),
    definition("HPGL_YOFFSET",          Some("0.0cm"),      ParameterKind::Length,              &[Hpgl]),
    definition("INTERLACE",             Some("no"),         ParameterKind::Flag,                &[Gif]),
    definition("MAX_LINE_LENGTH",       Some("500"),        ParameterKind::Integer(1, 1<<30),   &SPLITTING_TYPES),
    definition("META_PORTABLE",         Some("no"),         ParameterKind::Flag,                &[Meta]),
    definition("PAGESIZE",              Some("letter"),     ParameterKind::PageSize,            &PAGE_TYPES),
    definition("PCL_ASSIGN_COLORS",     Some("no"),         ParameterKind::Flag,                &[Pcl]),
    definition("PCL_BEZIERS",           Some("yes"),        ParameterKind::Flag,                &[Pcl]),
    definition("PCL_ROTATE",            Some("0"),          ParameterKind::Rotation,            &[Pcl]),
    definition("PCL_XOFFSET",           Some("0.0cm"),      ParameterKind::Length,              &[Pcl]),
    definition("PCL_YOFFSET",           Some("0.0cm"),      ParameterKind::Length,              &[Pcl]),
    definition("PNM_PORTABLE",          Some("no"),         ParameterKind::Flag,                &[Pnm]),
    definition("TERM",                  None,               ParameterKind::Text,                &[Tek]),
    definition("TRANSPARENT_COLOR",     Some("none"),       ParameterKind::OptionalColor,       &[Gif]),
    definition("USE_DOUBLE_BUFFERING",  Some("no"),         ParameterKind::Flag,                &[X, XDrawable]),
    definition("VANISH_ON_DELETE",      Some("no"),         ParameterKind::Flag,                &[X]),
    definition("XDRAWABLE_COLORMAP",    None,               ParameterKind::Text,                &[XDrawable]),
    definition("XDRAWABLE_DISPLAY",     None,               ParameterKind::Text,                &[XDrawable]),
    definition("XDRAWABLE_DRAWABLE1",   None,               ParameterKind::Text,                &[XDrawable]),
    definition("XDRAWABLE_DRAWABLE2",   None,               ParameterKind::Text,                &[XDrawable]),
];

lazy_static! {
    /// The parameters that new plotters take a snapshot of
    static ref GLOBAL_PARAMETERS: Mutex<ParameterRegistry> = Mutex::new(ParameterRegistry::new());
}

///
/// A set of parameter values, keyed by upper-case parameter name
///
/// Only values that have been explicitly set are stored: lookups fall back to the definition's default.
///
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct ParameterRegistry {
    values: BTreeMap<String, String>
}

impl ParameterDefinition {
    ///
    /// Finds the definition for a parameter name (case-insensitive)
    ///
    pub fn find(name: &str) -> Option<&'static ParameterDefinition> {
        PARAMETER_DEFINITIONS.iter().find(|definition| definition.name.eq_ignore_ascii_case(name))
    }

    ///
    /// True if plotters of the specified type read this parameter
    ///
    pub fn is_relevant_to(&self, plotter_type: PlotterType) -> bool {
        self.relevant_to.contains(&plotter_type)
    }
}

impl ParameterRegistry {
    ///
    /// Creates a registry where every parameter has its default value
    ///
    pub fn new() -> ParameterRegistry {
        ParameterRegistry { values: BTreeMap::new() }
    }

    ///
    /// Sets a parameter. Names that aren't recognised are ignored, and values that can't be parsed are rejected.
    ///
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), ParameterError> {
        let definition = match ParameterDefinition::find(name) {
            Some(definition)    => definition,
            None                => {
                debug!("Ignoring unrecognised parameter {}", name);
                return Ok(());
            }
        };

        if definition.kind.parse(value).is_none() {
            return Err(ParameterError::InvalidValue {
                name:       definition.name.to_string(),
                value:      value.to_string(),
                expected:   definition.kind.expected()
            });
        }

        self.values.insert(definition.name.to_string(), value.trim().to_string());
        Ok(())
    }

    ///
    /// Returns a parameter to its default value
    ///
    pub fn unset(&mut self, name: &str) {
        if let Some(definition) = ParameterDefinition::find(name) {
            self.values.remove(definition.name);
        }
    }

    ///
    /// True if the parameter has been explicitly set
    ///
    pub fn is_set(&self, name: &str) -> bool {
        ParameterDefinition::find(name)
            .map(|definition| self.values.contains_key(definition.name))
            .unwrap_or(false)
    }

    ///
    /// The text of a parameter: the value that was set, or else its default
    ///
    pub fn raw(&self, name: &str) -> Option<&str> {
        let definition = ParameterDefinition::find(name)?;

        self.values.get(definition.name)
            .map(|value| value.as_str())
            .or(definition.default)
    }

    ///
    /// Retrieves the parsed value of a parameter
    ///
    pub fn get(&self, name: &str) -> Option<ParameterValue> {
        let definition = ParameterDefinition::find(name)?;
        let raw_value  = self.raw(name)?;

        definition.kind.parse(raw_value)
    }

    pub fn text(&self, name: &str) -> Option<String> {
        match self.get(name) {
            Some(ParameterValue::Text(text))    => Some(text),
            _                                   => None
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        match self.get(name) {
            Some(ParameterValue::Flag(flag))    => flag,
            _                                   => false
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.get(name) {
            Some(ParameterValue::Integer(num))  => Some(num),
            _                                   => None
        }
    }

    ///
    /// A length parameter in inches (0 if it's not set)
    ///
    pub fn length(&self, name: &str) -> f64 {
        match self.get(name) {
            Some(ParameterValue::Length(length))    => length,
            _                                       => 0.0
        }
    }

    pub fn color(&self, name: &str) -> Option<Color> {
        match self.get(name) {
            Some(ParameterValue::Color(color))  => Some(color),
            _                                   => None
        }
    }

    pub fn page_size(&self) -> PageSize {
        match self.get("PAGESIZE") {
            Some(ParameterValue::PageSize(size))    => size,
            _                                       => PageSize::letter()
        }
    }

    pub fn bitmap_size(&self) -> (u32, u32) {
        match self.get("BITMAPSIZE") {
            Some(ParameterValue::BitmapSize(w, h))  => (w, h),
            _                                       => (570, 570)
        }
    }

    pub fn rotation(&self, name: &str) -> u32 {
        match self.get(name) {
            Some(ParameterValue::Rotation(degrees)) => degrees,
            _                                       => 0
        }
    }

    pub fn hpgl_version(&self) -> f64 {
        match self.get("HPGL_VERSION") {
            Some(ParameterValue::Version(version))  => version,
            _                                       => 2.0
        }
    }

    ///
    /// Iterates over the parameters that have been explicitly set
    ///
    pub fn explicit_values<'a>(&'a self) -> impl 'a+Iterator<Item=(&'a str, &'a str)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    ///
    /// Reads a registry from a JSON object mapping names to values. Every value is validated.
    ///
    pub fn from_json(json: &str) -> Result<ParameterRegistry, ParameterError> {
        let values: BTreeMap<String, String>    = serde_json::from_str(json).map_err(|err| ParameterError::Serialization(err.to_string()))?;
        let mut registry                        = ParameterRegistry::new();

        for (name, value) in values.iter() {
            registry.set(name, value)?;
        }

        Ok(registry)
    }

    ///
    /// Writes the explicitly set parameters as a JSON object
    ///
    pub fn to_json(&self) -> Result<String, ParameterError> {
        serde_json::to_string_pretty(&self.values).map_err(|err| ParameterError::Serialization(err.to_string()))
    }
}

///
/// Sets a parameter in the process-wide registry. Plotters created afterwards see the new value.
///
pub fn set_parameter(name: &str, value: &str) -> Result<(), ParameterError> {
    let mut global = GLOBAL_PARAMETERS.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    global.set(name, value)
}

///
/// Returns a parameter in the process-wide registry to its default
///
pub fn unset_parameter(name: &str) {
    let mut global = GLOBAL_PARAMETERS.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    global.unset(name)
}

///
/// Takes a copy of the process-wide registry
///
pub fn parameter_snapshot() -> ParameterRegistry {
    let global = GLOBAL_PARAMETERS.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    global.clone()
}
