use super::lifecycle::*;
use super::builder::*;
use crate::error::*;

///
/// Opens and erases a plotter, then runs an action that draws on it
///
fn draw_page<T, Action>(plotter: &mut Plotter, action: Action) -> Result<T, PlotError>
where Action: FnOnce(&mut Plotter) -> Result<T, PlotError> {
    plotter.open()?;
    plotter.erase()?;

    action(plotter)
}

///
/// Creates a plotter, opens and erases it and passes it to an action, deleting it afterwards
///
/// The plotter is deleted whether or not the action succeeds (and also if it panics). An error
/// from the action takes precedence over an error from deleting the plotter.
///
pub fn with_plotter<T, Action>(builder: PlotterBuilder, action: Action) -> Result<T, PlotError>
where Action: FnOnce(&mut Plotter) -> Result<T, PlotError> {
    let mut plotter = builder.build()?;
    let result      = draw_page(&mut plotter, action);
    let deleted     = plotter.delete();

    match result {
        Ok(value)   => deleted.map(move |_| value),
        Err(err)    => Err(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::*;
    use crate::backend::*;
    use crate::parameters::*;

    fn builder(recording: &Recording) -> PlotterBuilder {
        PlotterBuilder::new("svg")
            .output(OutputTarget::Recording(recording.clone()))
            .parameters(ParameterRegistry::new())
    }

    #[test]
    fn draws_and_deletes() {
        let recording   = Recording::new();
        let result      = with_plotter(builder(&recording), |plotter| {
            plotter.line(Coords::Absolute, 0.0, 0.0, 1.0, 1.0)?;
            Ok(42)
        });

        assert!(result.ok() == Some(42));
        assert!(recording.is_released());
        assert!(recording.pages().len() == 1);
        assert!(recording.pages()[0].path_count() == 1);
    }

    #[test]
    fn deletes_after_error() {
        let recording   = Recording::new();
        let result: Result<(), PlotError> = with_plotter(builder(&recording), |plotter| {
            plotter.restorestate()
        });

        assert!(match result { Err(PlotError::StackUnderflow) => true, _ => false });
        assert!(recording.is_released());
    }

    #[test]
    fn unknown_type_fails_to_build() {
        let result = with_plotter(PlotterBuilder::new("teletype"), |_plotter| Ok(()));

        assert!(match result { Err(PlotError::UnknownPlotterType(_)) => true, _ => false });
    }
}
