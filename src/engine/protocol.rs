/// Everything the UI can ask of the engine. Widgets return these instead of
/// mutating state, the app applies them once drawing is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisualiserCommand {
    Advance,
    Retreat,
    JumpTo(usize),
    Inspect(String),
    CloseInspection,
}
