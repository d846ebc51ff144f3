use super::graphics_context::*;
use crate::error::*;

///
/// The stack of graphics contexts belonging to an open plotter
///
/// The base context at the bottom of the stack can't be popped. The stack is empty while the
/// plotter is closed.
///
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ContextStack {
    contexts: Vec<GraphicsContext>
}

impl ContextStack {
    ///
    /// Creates an empty stack (as for a plotter that isn't open)
    ///
    pub fn new() -> ContextStack {
        ContextStack { contexts: vec![] }
    }

    ///
    /// Replaces the contents of the stack with a single base context
    ///
    pub fn reset(&mut self, base: GraphicsContext) {
        self.contexts.clear();
        self.contexts.push(base);
    }

    pub fn depth(&self) -> usize {
        self.contexts.len()
    }

    ///
    /// The context that drawing operations use
    ///
    pub fn current(&self) -> Result<&GraphicsContext, PlotError> {
        self.contexts.last().ok_or(PlotError::NotOpen)
    }

    pub fn current_mut(&mut self) -> Result<&mut GraphicsContext, PlotError> {
        self.contexts.last_mut().ok_or(PlotError::NotOpen)
    }

    ///
    /// Pushes a copy of the current context (without its path under construction)
    ///
    pub fn push(&mut self) -> Result<(), PlotError> {
        let copy = self.current()?.saved_copy();
        self.contexts.push(copy);

        Ok(())
    }

    ///
    /// Removes the current context, returning it so that its path can be ended
    ///
    pub fn pop(&mut self) -> Result<GraphicsContext, PlotError> {
        match self.contexts.len() {
            0   => Err(PlotError::NotOpen),
            1   => Err(PlotError::StackUnderflow),
            _   => self.contexts.pop().ok_or(PlotError::StackUnderflow)
        }
    }

    ///
    /// Removes every context, topmost first
    ///
    pub fn drain(&mut self) -> Vec<GraphicsContext> {
        let mut contexts = self.contexts.drain(..).collect::<Vec<_>>();
        contexts.reverse();
        contexts
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn stack() -> ContextStack {
        let mut stack = ContextStack::new();
        stack.reset(GraphicsContext::new(DeviceDefaults::default()));
        stack
    }

    #[test]
    fn empty_stack_is_not_open() {
        let mut stack = ContextStack::new();

        assert!(stack.current().is_err());
        match stack.pop() {
            Err(PlotError::NotOpen) => { },
            _                       => panic!("Expected NotOpen")
        }
    }

    #[test]
    fn base_context_cannot_be_popped() {
        let mut stack = stack();

        match stack.pop() {
            Err(PlotError::StackUnderflow)  => { },
            _                               => panic!("Expected StackUnderflow")
        }
        assert!(stack.depth() == 1);
    }

    #[test]
    fn pop_restores_attributes() {
        let mut stack = stack();

        stack.current_mut().unwrap().miter_limit = 3.0;
        stack.push().unwrap();
        stack.current_mut().unwrap().miter_limit = 7.0;
        stack.pop().unwrap();

        assert!(stack.current().unwrap().miter_limit == 3.0);
    }

    #[test]
    fn drain_is_topmost_first() {
        let mut stack = stack();

        stack.push().unwrap();
        stack.current_mut().unwrap().text_angle = 45.0;

        let drained = stack.drain();
        assert!(drained.len() == 2);
        assert!(drained[0].text_angle == 45.0);
        assert!(stack.depth() == 0);
    }
}
