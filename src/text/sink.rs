//! Pending and output text buffers.
//!
//! Pending text holds the run currently being assembled, already in reading
//! order for its direction. Flushing moves it to the output and, when a
//! visitor is attached, hands the fragment over together with a snapshot of
//! the text state at that moment.

use std::fmt;

use super::state::{TextSnapshot, TextState};

/// Receiver for flushed text fragments, called in processing order.
pub trait TextVisitor {
    /// Called once per flush, including flushes with nothing pending.
    fn visit_text(&mut self, text: &str, state: &TextSnapshot);
}

impl<F> TextVisitor for F
where
    F: FnMut(&str, &TextSnapshot),
{
    fn visit_text(&mut self, text: &str, state: &TextSnapshot) {
        self(text, state)
    }
}

/// Visitor that keeps every fragment and its snapshot.
#[derive(Debug, Default, Clone)]
pub struct CollectingVisitor {
    /// Fragments in delivery order
    pub fragments: Vec<(String, TextSnapshot)>,
}

impl CollectingVisitor {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Just the fragment texts.
    pub fn texts(&self) -> Vec<&str> {
        self.fragments.iter().map(|(t, _)| t.as_str()).collect()
    }
}

impl TextVisitor for CollectingVisitor {
    fn visit_text(&mut self, text: &str, state: &TextSnapshot) {
        self.fragments.push((text.to_string(), state.clone()));
    }
}

/// Pending/output buffers plus the optional visitor.
#[derive(Default)]
pub struct TextSink<'v> {
    pending: String,
    output: String,
    visitor: Option<&'v mut (dyn TextVisitor + 'v)>,
}

impl<'v> TextSink<'v> {
    /// Buffers without a visitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffers that also deliver every flushed fragment to `visitor`.
    pub fn with_visitor(visitor: &'v mut (dyn TextVisitor + 'v)) -> Self {
        Self {
            pending: String::new(),
            output: String::new(),
            visitor: Some(visitor),
        }
    }

    /// Text of the current run.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Text flushed so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Consume the sink, returning the output.
    pub fn into_output(self) -> String {
        self.output
    }

    /// Append to the end of the current run.
    pub fn push_back(&mut self, text: &str) {
        self.pending.push_str(text);
    }

    /// Insert at the start of the current run.
    pub fn push_front(&mut self, text: &str) {
        self.pending.insert_str(0, text);
    }

    /// Last character of output followed by pending, if there is any text.
    pub fn last_char(&self) -> Option<char> {
        self.pending
            .chars()
            .next_back()
            .or_else(|| self.output.chars().next_back())
    }

    /// Move pending text plus `suffix` to the output.
    ///
    /// Returns the number of characters flushed. The visitor sees every
    /// flush, so an empty fragment still marks a state change.
    pub fn flush(&mut self, suffix: &str, state: &TextState) -> usize {
        let mut fragment = std::mem::take(&mut self.pending);
        fragment.push_str(suffix);
        self.output.push_str(&fragment);
        if let Some(visitor) = self.visitor.as_mut() {
            visitor.visit_text(&fragment, &state.snapshot());
        }
        fragment.chars().count()
    }
}

impl fmt::Debug for TextSink<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextSink")
            .field("pending", &self.pending)
            .field("output", &self.output)
            .field("has_visitor", &self.visitor.is_some())
            .finish()
    }
}
