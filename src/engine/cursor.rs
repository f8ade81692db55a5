/// Current position in the timeline plus the participant picked for
/// memory inspection. The selection belongs to one step and is dropped
/// whenever the position changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCursor {
    index: usize,
    len: usize,
    selected: Option<String>,
}

impl StepCursor {
    /// `len` must be non-zero; validated traces always are.
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            len: len.max(1),
            selected: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.len
    }

    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.len;
        self.selected = None;
    }

    pub fn retreat(&mut self) {
        self.index = (self.index + self.len - 1) % self.len;
        self.selected = None;
    }

    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.index = index;
        self.selected = None;
        true
    }

    pub fn select(&mut self, participant_id: impl Into<String>) {
        self.selected = Some(participant_id.into());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}
