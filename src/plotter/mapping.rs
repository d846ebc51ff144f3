use super::lifecycle::*;
use crate::error::*;

use flo_plot_canvas::*;

impl Plotter {
    ///
    /// Maps the rectangle from (x0, y0) to (x1, y1) in user coordinates onto the plotter's display
    ///
    pub fn space(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> Result<(), PlotError> {
        self.space2(x0, y0, x1, y0, x0, y1)
    }

    ///
    /// Maps a parallelogram in user coordinates onto the plotter's display
    ///
    /// The corners are the lower left (x0, y0), lower right (x1, y1) and upper left (x2, y2). A
    /// parallelogram with no area is ignored.
    ///
    pub fn space2(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<(), PlotError> {
        self.check_open()?;

        match self.geometry.user_transform((x0, y0), (x1, y1), (x2, y2)) {
            Some(transform) => self.update_context(true, |context| context.transform = transform),

            None => {
                self.diagnostics.warn("ignoring a coordinate space with no area");
                Ok(())
            }
        }
    }

    ///
    /// Applies a transformation to user coordinates before the current user to device mapping
    ///
    pub fn concat(&mut self, transform: Transform2D) -> Result<(), PlotError> {
        self.update_context(true, |context| context.transform = transform.compose(&context.transform))
    }

    ///
    /// Rotates the user coordinate system counterclockwise by an angle in degrees
    ///
    pub fn rotate(&mut self, degrees: f64) -> Result<(), PlotError> {
        self.concat(Transform2D::rotate_degrees(degrees))
    }

    pub fn scale(&mut self, scale_x: f64, scale_y: f64) -> Result<(), PlotError> {
        self.concat(Transform2D::scale(scale_x, scale_y))
    }

    pub fn translate(&mut self, x: f64, y: f64) -> Result<(), PlotError> {
        self.concat(Transform2D::translate(x, y))
    }

    ///
    /// The current map from user coordinates to device coordinates
    ///
    pub fn transform(&self) -> Result<Transform2D, PlotError> {
        Ok(self.graphics_context()?.transform)
    }
}
