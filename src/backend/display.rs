use super::plotter_type::*;
use crate::parameters::*;

use flo_plot_canvas::*;

///
/// Points per inch, the device unit of the page formats
///
const POINTS_PER_INCH: f64 = 72.0;

///
/// Plotter units per inch, the device unit of HP-GL and PCL
///
const PLOTTER_UNITS_PER_INCH: f64 = 1016.0;

///
/// The margin taken off the shorter side of the page to make the square display area
///
const PAGE_MARGIN_INCHES: f64 = 0.5;

///
/// Addressable size of a Tektronix screen
///
const TEK_SIZE: (f64, f64) = (4096.0, 3120.0);

///
/// Where the display area of a plotter lies on its device surface
///
/// Normalized coordinates run from (0, 0) at the lower left of the display to (1, 1) at the upper right.
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DisplayGeometry {
    /// Size of the device surface in device units
    pub device_size:    (f64, f64),

    /// Map from normalized display coordinates to device coordinates
    pub ndc_to_device:  Transform2D,

    /// Length of the shorter side of the display area in device units
    pub display_size:   f64,

    /// True if the device coordinates are pixels
    pub is_bitmap:      bool
}

impl DisplayGeometry {
    ///
    /// Works out the display geometry of a plotter from its type and parameters
    ///
    pub fn for_plotter(plotter_type: PlotterType, parameters: &ParameterRegistry) -> DisplayGeometry {
        use self::PlotterType::*;

        match plotter_type {
            X | XDrawable | Pnm | Png | Gif => {
                let (width, height) = parameters.bitmap_size();
                let (width, height) = (width as f64, height as f64);

                // Pixel rows run downwards
                DisplayGeometry {
                    device_size:    (width, height),
                    ndc_to_device:  Transform2D([width, 0.0, 0.0, -height, 0.0, height]),
                    display_size:   width.min(height),
                    is_bitmap:      true
                }
            },

            Ai | Ps | Fig | Svg | Cgm => {
                DisplayGeometry::page(parameters.page_size(), POINTS_PER_INCH, (0.0, 0.0), 0)
            },

            Pcl => {
                let offset = (parameters.length("PCL_XOFFSET"), parameters.length("PCL_YOFFSET"));
                DisplayGeometry::page(parameters.page_size(), PLOTTER_UNITS_PER_INCH, offset, parameters.rotation("PCL_ROTATE"))
            },

            Hpgl => {
                let offset = (parameters.length("HPGL_XOFFSET"), parameters.length("HPGL_YOFFSET"));
                DisplayGeometry::page(parameters.page_size(), PLOTTER_UNITS_PER_INCH, offset, parameters.rotation("HPGL_ROTATE"))
            },

            Tek => {
                let side = TEK_SIZE.1;

                DisplayGeometry {
                    device_size:    TEK_SIZE,
                    ndc_to_device:  Transform2D([side, 0.0, 0.0, side, (TEK_SIZE.0-side)/2.0, 0.0]),
                    display_size:   side,
                    is_bitmap:      false
                }
            },

            Meta => {
                DisplayGeometry {
                    device_size:    (1.0, 1.0),
                    ndc_to_device:  Transform2D::identity(),
                    display_size:   1.0,
                    is_bitmap:      false
                }
            }
        }
    }

    ///
    /// A square display centered on a page, shifted by an offset (in inches) and rotated about its center
    ///
    fn page(page_size: PageSize, units_per_inch: f64, offset: (f64, f64), rotation: u32) -> DisplayGeometry {
        let (width, height) = (page_size.width()*units_per_inch, page_size.height()*units_per_inch);
        let side            = (page_size.width().min(page_size.height()) - PAGE_MARGIN_INCHES).max(PAGE_MARGIN_INCHES) * units_per_inch;
        let origin          = ((width-side)/2.0 + offset.0*units_per_inch, (height-side)/2.0 + offset.1*units_per_inch);

        let ndc_to_device   = Transform2D::translate(-0.5, -0.5)
            .compose(&Transform2D::rotate_degrees(rotation as f64))
            .compose(&Transform2D::translate(0.5, 0.5))
            .compose(&Transform2D::scale(side, side))
            .compose(&Transform2D::translate(origin.0, origin.1));

        DisplayGeometry {
            device_size:    (width, height),
            ndc_to_device:  ndc_to_device,
            display_size:   side,
            is_bitmap:      false
        }
    }

    ///
    /// The line width that plotters start with, in device units: the thinnest possible line on
    /// bitmaps and 1/850th of the display elsewhere
    ///
    pub fn default_line_width(&self) -> f64 {
        if self.is_bitmap { 0.0 } else { self.display_size / 850.0 }
    }

    pub fn default_font_size(&self) -> f64 {
        self.display_size / 50.0
    }

    ///
    /// The dash unit used for very thin lines
    ///
    pub fn min_dash_unit(&self) -> f64 {
        self.display_size / 576.0
    }

    ///
    /// The longest chord used when curves are drawn as lines
    ///
    pub fn flattening_chord(&self) -> f64 {
        if self.is_bitmap { 1.0 } else { self.display_size / 400.0 }
    }

    ///
    /// The map from user coordinates to device coordinates for a user-space parallelogram with
    /// corners at p0 (lower left), p1 (lower right) and p2 (upper left)
    ///
    /// Returns None if the parallelogram is degenerate.
    ///
    pub fn user_transform(&self, p0: (f64, f64), p1: (f64, f64), p2: (f64, f64)) -> Option<Transform2D> {
        let ndc_to_user = Transform2D([p1.0-p0.0, p1.1-p0.1, p2.0-p0.0, p2.1-p0.1, p0.0, p0.1]);
        let user_to_ndc = ndc_to_user.invert()?;

        Some(user_to_ndc.compose(&self.ndc_to_device))
    }
}
