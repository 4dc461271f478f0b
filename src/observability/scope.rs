//! Scoped begin/complete logging
//!
//! ```ignore
//! let scope = ObservationScope::with_fields("MENU_LOAD", &[("food", "Pizza")]);
//! // ... work ...
//! scope.complete_with_fields(&[("rows", "12")]);
//! ```
//!
//! - `{NAME}_BEGIN` at INFO when created
//! - `{NAME}_COMPLETE` at INFO on `complete`
//! - `{NAME}_FAILED` at ERROR on `fail`
//! - `{NAME}_INCOMPLETE` at WARN if dropped without either

use std::time::Instant;

use super::logger::Logger;

pub struct ObservationScope {
    name: String,
    fields: Vec<(String, String)>,
    started: Instant,
    finished: bool,
}

impl ObservationScope {
    pub fn new(name: &str) -> Self {
        Self::with_fields(name, &[])
    }

    /// Starts a scope whose fields are repeated on every event it logs
    pub fn with_fields(name: &str, fields: &[(&str, &str)]) -> Self {
        Logger::info(&format!("{}_BEGIN", name), fields);
        Self {
            name: name.to_string(),
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            started: Instant::now(),
            finished: false,
        }
    }

    pub fn complete(self) {
        self.complete_with_fields(&[]);
    }

    pub fn complete_with_fields(mut self, extra: &[(&str, &str)]) {
        self.finished = true;
        let elapsed = self.elapsed_ms();
        let mut fields = self.field_refs();
        fields.extend(extra.iter().copied());
        fields.push(("elapsed_ms", elapsed.as_str()));
        Logger::info(&format!("{}_COMPLETE", self.name), &fields);
    }

    pub fn fail(mut self, code: &str, reason: &str) {
        self.finished = true;
        let mut fields = self.field_refs();
        fields.push(("code", code));
        fields.push(("reason", reason));
        Logger::error(&format!("{}_FAILED", self.name), &fields);
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Milliseconds since the scope began
    pub fn elapsed_ms(&self) -> String {
        self.started.elapsed().as_millis().to_string()
    }

    fn field_refs(&self) -> Vec<(&str, &str)> {
        self.fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

impl Drop for ObservationScope {
    fn drop(&mut self) {
        if !self.finished {
            let mut fields = self.field_refs();
            fields.push(("reason", "scope dropped without completion"));
            Logger::warn(&format!("{}_INCOMPLETE", self.name), &fields);
        }
    }
}
