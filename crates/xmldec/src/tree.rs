//! Node tree construction from parse events
//!
//! The builder is single-threaded and driven by a strictly ordered event
//! stream. The insertion path is kept as an explicit stack of open
//! elements: the element under construction is the top of the stack, and
//! closing it appends it to its parent below (or makes it the root).

use crate::error::{Error, Result};
use crate::node::{Element, Namespace, Node, Text};
use crate::reader::event::{Event, EventSink};
use crate::scope::Scope;

/// Builds a node tree from a stream of parse events.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    /// The ancestors of the insertion point, deepest last.
    open: Vec<Element>,
    /// The completed root element, if any.
    root: Option<Element>,
    /// The active namespace scope, used to resolve attribute prefixes.
    scope: Scope,
    /// The first reported parse error, which suppresses tree completion.
    error: Option<Error>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the builder, returning the completed root element.
    ///
    /// Fails with the first recorded parse error, or with
    /// [`Error::NoRootElement`] if the stream contained no element.
    pub fn finish(self) -> Result<Element> {
        if let Some(error) = self.error {
            return Err(error);
        }
        debug_assert!(self.open.is_empty(), "event stream ended mid-element");
        self.root.ok_or(Error::NoRootElement)
    }

    fn append_text(&mut self, string_value: String) {
        // Character data outside the root element is ignored.
        if let Some(open) = self.open.last_mut() {
            open.children.push(Node::Text(Text { string_value }));
        }
    }
}

impl EventSink for TreeBuilder {
    fn event(&mut self, event: Event) {
        if self.error.is_some() {
            return;
        }
        match event {
            Event::StartElement {
                namespace,
                local_name,
                attributes,
            } => {
                assert!(
                    self.root.is_none(),
                    "start-element event after the document element closed"
                );
                self.open.push(Element::from_start_event(
                    namespace,
                    local_name,
                    &attributes,
                    &self.scope,
                ));
            }
            Event::EndElement => {
                let Some(closed) = self.open.pop() else {
                    panic!("end-element event without a matching start-element")
                };
                match self.open.last_mut() {
                    Some(parent) => parent.children.push(Node::Element(closed)),
                    None => self.root = Some(closed),
                }
            }
            Event::Characters(text) | Event::CData(text) => self.append_text(text),
            Event::StartPrefixMapping { prefix, namespace } => {
                if prefix.is_empty() {
                    self.scope.begin_default_scope(Namespace::new(namespace));
                } else {
                    self.scope.begin_scope(&prefix, Namespace::new(namespace));
                }
            }
            Event::EndPrefixMapping { prefix } => {
                if prefix.is_empty() {
                    self.scope.end_default_scope();
                } else {
                    self.scope.end_scope(&prefix);
                }
            }
        }
    }

    fn parse_error(&mut self, error: Error) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}
