/// Text input for new tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    input: String,
    /// Keys go to the input while editing
    pub editing: bool,
}

impl TaskForm {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn insert(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Take the text to create. Blank input yields `None` and is left in place.
    pub fn submit(&mut self) -> Option<String> {
        if self.input.trim().is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.input))
    }
}
