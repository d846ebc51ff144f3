use super::lifecycle::*;
use crate::fonts::*;
use crate::error::*;

use flo_plot_canvas::*;

impl Plotter {
    ///
    /// Draws text anchored at a point in user coordinates, with the font and angle of the current
    /// graphics context and a font size in user units. Returns the width of the text in user units.
    ///
    pub (super) fn place_label(&mut self, position: (f64, f64), horizontal: HorizontalAlignment, vertical: VerticalAlignment, text: &str, font_size: f64) -> Result<f64, PlotError> {
        let context     = self.graphics_context()?;
        let angle       = context.text_angle.to_radians();

        // The device size and angle come from how the transform maps the text's baseline and up vectors
        let baseline    = context.transform.transform_vector(angle.cos(), angle.sin());
        let up          = context.transform.transform_vector(-angle.sin(), angle.cos());
        let position    = context.transform.transform_point(position.0, position.1);

        let label       = TextLabel {
            position:   position,
            angle:      baseline.1.atan2(baseline.0).to_degrees(),
            font_size:  font_size * (up.0*up.0 + up.1*up.1).sqrt(),
            font_name:  context.font_name.clone(),
            horizontal: horizontal,
            vertical:   vertical,
            text:       text.to_string()
        };

        let pen_color   = context.pen_color;
        let width       = self.font_metrics.string_width(&label.font_name, font_size, text);

        trace!("{}: label {:?}", self.plotter_type, label);
        self.device.draw_label(label, pen_color);

        Ok(width)
    }

    ///
    /// Draws a label at the cursor, justified horizontally by `horizontal` ('l', 'c' or 'r') and
    /// vertically by `vertical` ('b', 'x' for the baseline, 'c' or 't')
    ///
    /// Left-justified text moves the cursor to the end of the text and right-justified text moves it
    /// back by the text's width. Centered text leaves the cursor where it was.
    ///
    pub fn alabel(&mut self, horizontal: char, vertical: char, text: &str) -> Result<(), PlotError> {
        self.endpath()?;

        let horizontal_alignment = match HorizontalAlignment::from_char(horizontal) {
            Some(alignment) => alignment,
            None            => {
                self.diagnostics.warn(&format!("unknown horizontal justification '{}'", horizontal));
                HorizontalAlignment::Left
            }
        };

        let vertical_alignment = match VerticalAlignment::from_char(vertical) {
            Some(alignment) => alignment,
            None            => {
                self.diagnostics.warn(&format!("unknown vertical justification '{}'", vertical));
                VerticalAlignment::Baseline
            }
        };

        if text.is_empty() {
            return Ok(());
        }

        let (cursor, font_size, angle) = {
            let context = self.graphics_context()?;
            (context.cursor, context.font_size_user(), context.text_angle.to_radians())
        };

        let width   = self.place_label(cursor, horizontal_alignment, vertical_alignment, text, font_size)?;
        let advance = match horizontal_alignment {
            HorizontalAlignment::Left   => width,
            HorizontalAlignment::Center => 0.0,
            HorizontalAlignment::Right  => -width
        };

        self.update_context(false, |context| {
            context.cursor = (cursor.0 + advance*angle.cos(), cursor.1 + advance*angle.sin());
        })
    }

    ///
    /// Draws a label at the cursor, left-justified on its baseline
    ///
    pub fn label(&mut self, text: &str) -> Result<(), PlotError> {
        self.alabel('l', 'x', text)
    }

    ///
    /// The width that a label would have in user units
    ///
    pub fn labelwidth(&self, text: &str) -> Result<f64, PlotError> {
        let context = self.graphics_context()?;
        Ok(self.font_metrics.string_width(&context.font_name, context.font_size_user(), text))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::*;
    use crate::backend::*;
    use crate::parameters::*;

    fn recorded_meta() -> (Plotter, Recording) {
        let recording   = Recording::new();
        let mut plotter = PlotterBuilder::new("meta")
            .output(OutputTarget::Recording(recording.clone()))
            .parameters(ParameterRegistry::new())
            .build()
            .unwrap();

        plotter.open().unwrap();
        (plotter, recording)
    }

    fn labels(recording: &Recording) -> Vec<TextLabel> {
        recording.events().into_iter()
            .filter_map(|event| match event {
                MetafileEvent::Draw(Draw::Label(label)) => Some(label),
                _                                       => None
            })
            .collect()
    }

    #[test]
    fn left_label_advances_cursor() {
        let (mut plotter, _recording) = recorded_meta();

        plotter.fontsize(0.1).unwrap();
        plotter.move_to(Coords::Absolute, 0.2, 0.3).unwrap();
        plotter.label("abcd").unwrap();

        let (x, y) = plotter.cursor().unwrap();
        assert!((x - (0.2 + 4.0*0.1*0.6)).abs() < 1e-9);
        assert!((y - 0.3).abs() < 1e-9);
    }

    #[test]
    fn centered_label_keeps_cursor() {
        let (mut plotter, _recording) = recorded_meta();

        plotter.move_to(Coords::Absolute, 0.5, 0.5).unwrap();
        plotter.alabel('c', 'c', "middle").unwrap();

        assert!(plotter.cursor().unwrap() == (0.5, 0.5));
    }

    #[test]
    fn right_label_moves_cursor_back() {
        let (mut plotter, _recording) = recorded_meta();

        plotter.fontsize(0.1).unwrap();
        plotter.textangle(90.0).unwrap();
        plotter.move_to(Coords::Absolute, 0.5, 0.5).unwrap();
        plotter.alabel('r', 'b', "ab").unwrap();

        let (x, y) = plotter.cursor().unwrap();
        assert!((x - 0.5).abs() < 1e-9);
        assert!((y - (0.5 - 2.0*0.1*0.6)).abs() < 1e-9);
    }

    #[test]
    fn labels_follow_transform() {
        let (mut plotter, recording) = recorded_meta();

        plotter.space(0.0, 0.0, 10.0, 10.0).unwrap();
        plotter.fontsize(1.0).unwrap();
        plotter.move_to(Coords::Absolute, 5.0, 5.0).unwrap();
        plotter.label("x").unwrap();
        plotter.flush().unwrap();

        let labels = labels(&recording);
        assert!(labels.len() == 1);
        assert!((labels[0].font_size - 0.1).abs() < 1e-9);
        assert!((labels[0].position.0 - 0.5).abs() < 1e-9);
        assert!(labels[0].angle.abs() < 1e-9);
        assert!(labels[0].horizontal == HorizontalAlignment::Left);
        assert!(labels[0].vertical == VerticalAlignment::Baseline);
    }

    #[test]
    fn label_width_uses_font_size() {
        let (mut plotter, _recording) = recorded_meta();

        plotter.fontsize(2.0).unwrap();
        assert!((plotter.labelwidth("abc").unwrap() - 3.6).abs() < 1e-9);
    }
}
