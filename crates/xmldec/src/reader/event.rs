//! Parse events and the sink interface consumed by the tree builder

use indexmap::IndexMap;

use crate::error::Error;

/// A low-level parse event.
///
/// Events are delivered in document order. Start and end events nest
/// correctly, and prefix-mapping events fire strictly around the element
/// carrying the declaration. The empty prefix denotes the default namespace
/// binding.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// An element opened.
    ///
    /// The namespace is the element's already-resolved namespace URI, taking
    /// the default binding into account for unprefixed names. The raw
    /// attribute map preserves document order and includes namespace
    /// declarations as ordinary attributes.
    StartElement {
        namespace: Option<String>,
        local_name: String,
        attributes: IndexMap<String, String>,
    },
    /// The most recently opened element closed.
    EndElement,
    /// A run of character data, entities decoded.
    Characters(String),
    /// A CDATA section, taken verbatim.
    CData(String),
    /// A namespace declaration came into scope.
    StartPrefixMapping { prefix: String, namespace: String },
    /// The matching declaration went out of scope.
    EndPrefixMapping { prefix: String },
}

/// A consumer of parse events.
pub trait EventSink {
    /// Delivers the next parse event.
    fn event(&mut self, event: Event);

    /// Reports a syntax error. The event stream may end early afterwards.
    fn parse_error(&mut self, error: Error);
}

/// A sink that records events for inspection, used in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub events: Vec<Event>,
    pub errors: Vec<Error>,
}

#[cfg(test)]
impl EventSink for RecordingSink {
    fn event(&mut self, event: Event) {
        self.events.push(event);
    }

    fn parse_error(&mut self, error: Error) {
        self.errors.push(error);
    }
}
