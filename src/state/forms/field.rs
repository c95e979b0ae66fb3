//! Form field value objects

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// A value picked from a fixed list
    Select { options: Vec<String>, value: String },
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single form field with its configuration and value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: FieldValue,
    pub is_multiline: bool,
    pub read_only: bool,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str, is_multiline: bool) -> Self {
        Self::text_with_value(name, label, String::new(), is_multiline)
    }

    /// Create a new text field with initial value
    pub fn text_with_value(name: &str, label: &str, value: String, is_multiline: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Text(value),
            is_multiline,
            read_only: false,
        }
    }

    /// Create a select field
    pub fn select(name: &str, label: &str, options: Vec<String>, value: String) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: FieldValue::Select { options, value },
            is_multiline: false,
            read_only: false,
        }
    }

    /// Mark the field as not user editable
    pub fn locked(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn is_select(&self) -> bool {
        matches!(self.value, FieldValue::Select { .. })
    }

    /// Get the current value
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Select { value, .. } => value,
        }
    }

    /// Options of a select field (empty for text fields)
    pub fn options(&self) -> &[String] {
        match &self.value {
            FieldValue::Text(_) => &[],
            FieldValue::Select { options, .. } => options,
        }
    }

    /// Set the value
    pub fn set_text(&mut self, new_value: String) {
        match &mut self.value {
            FieldValue::Text(s) => *s = new_value,
            FieldValue::Select { value, .. } => *value = new_value,
        }
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = &mut self.value {
            s.push(c);
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = &mut self.value {
            s.pop();
        }
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        self.set_text(String::new());
    }

    /// The option after the current one, wrapping; the first when nothing matches
    pub fn next_option(&self) -> Option<&str> {
        let options = self.options();
        if options.is_empty() {
            return None;
        }
        let next = match self.selected_index() {
            Some(i) => (i + 1) % options.len(),
            None => 0,
        };
        Some(&options[next])
    }

    /// The option before the current one, wrapping; the last when nothing matches
    pub fn prev_option(&self) -> Option<&str> {
        let options = self.options();
        if options.is_empty() {
            return None;
        }
        let prev = match self.selected_index() {
            Some(0) | None => options.len() - 1,
            Some(i) => i - 1,
        };
        Some(&options[prev])
    }

    fn selected_index(&self) -> Option<usize> {
        let current = self.as_text();
        self.options().iter().position(|o| o == current)
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Select { value, .. } if value.is_empty() => "(select)".to_string(),
            FieldValue::Select { value, .. } => value.clone(),
        }
    }
}
