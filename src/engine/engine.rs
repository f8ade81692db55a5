use tracing::{debug, info};

use crate::engine::cursor::StepCursor;
use crate::engine::projection::{project, ViewState};
use crate::engine::protocol::VisualiserCommand;
use crate::model::trace::Trace;

pub struct Engine {
    trace: Trace,
    cursor: StepCursor,
}

impl Engine {
    pub fn new(trace: Trace) -> Self {
        let cursor = StepCursor::new(trace.len());
        Self { trace, cursor }
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn cursor(&self) -> &StepCursor {
        &self.cursor
    }

    /// Applies one command. Returns false when nothing changed.
    pub fn handle(&mut self, cmd: VisualiserCommand) -> bool {
        let before = self.cursor.clone();

        match &cmd {
            VisualiserCommand::Advance => self.cursor.advance(),
            VisualiserCommand::Retreat => self.cursor.retreat(),
            VisualiserCommand::JumpTo(index) => {
                self.cursor.jump_to(*index);
            }
            VisualiserCommand::Inspect(id) => self.cursor.select(id.as_str()),
            VisualiserCommand::CloseInspection => self.cursor.clear_selection(),
        }

        let changed = self.cursor != before;
        debug!(
            ?cmd,
            step = self.cursor.index(),
            selected = self.cursor.selected(),
            changed,
            "handled command"
        );
        changed
    }

    pub fn replace_trace(&mut self, trace: Trace) {
        info!(title = %trace.title, steps = trace.len(), "switching trace");
        self.cursor = StepCursor::new(trace.len());
        self.trace = trace;
    }

    pub fn view(&self) -> Option<ViewState<'_>> {
        project(&self.trace, &self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_reports_changes() {
        let mut engine = Engine::new(Trace::builtin().unwrap());
        assert!(engine.handle(VisualiserCommand::Advance));
        assert!(!engine.handle(VisualiserCommand::CloseInspection));
        assert!(engine.handle(VisualiserCommand::Inspect("llm".into())));
        assert!(!engine.handle(VisualiserCommand::JumpTo(999)));
        assert_eq!(engine.cursor().index(), 1);
    }

    #[test]
    fn replacing_trace_resets_cursor() {
        let mut engine = Engine::new(Trace::builtin().unwrap());
        engine.handle(VisualiserCommand::JumpTo(7));
        engine.handle(VisualiserCommand::Inspect("backend".into()));

        engine.replace_trace(Trace::builtin().unwrap());
        assert_eq!(engine.cursor().index(), 0);
        assert_eq!(engine.cursor().selected(), None);
    }
}
