//! The XML tokenizer
//!
//! Turns raw document bytes into the event stream consumed by
//! [`crate::tree::TreeBuilder`]. The tokenizer resolves element names itself
//! (a prefixed name through its scope, an unprefixed name through the
//! current default binding) so that start-element events carry resolved
//! namespace URIs, and reports namespace declarations both as mapping events
//! and as ordinary attributes.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::node::Namespace;
use crate::reader::cursor::Cursor;
use crate::reader::event::{Event, EventSink};
use crate::scope::Scope;

/// Event-emitting XML reader
#[derive(Debug)]
pub struct Reader<'a> {
    cursor: Cursor<'a>,
    scope: Scope,
}

impl<'a> Reader<'a> {
    /// Create a new reader over raw document bytes
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(input),
            scope: Scope::default(),
        }
    }

    /// Parse the document, delivering events to the sink.
    ///
    /// A syntax error is reported through [`EventSink::parse_error`] and
    /// ends the stream.
    pub fn parse_into<S: EventSink>(mut self, sink: &mut S) {
        if let Err(error) = self.parse_document(sink) {
            sink.parse_error(error);
        }
    }

    fn parse_document<S: EventSink>(&mut self, sink: &mut S) -> Result<()> {
        self.skip_misc()?;
        if self.cursor.is_eof() {
            // No content at all; the builder reports the missing root.
            return Ok(());
        }
        self.parse_element(sink)?;
        self.skip_misc()?;
        if !self.cursor.is_eof() {
            return Err(self.error_here("unexpected content after document element"));
        }
        Ok(())
    }

    fn parse_element<S: EventSink>(&mut self, sink: &mut S) -> Result<()> {
        self.expect_byte(b'<')?;
        let name = self.parse_name()?;
        let attributes = self.parse_attributes()?;

        // Declarations on this element open scopes around it.
        let mut declared: Vec<String> = Vec::new();
        for (attribute_name, value) in &attributes {
            let prefix = if attribute_name == "xmlns" {
                Some("")
            } else {
                attribute_name.strip_prefix("xmlns:")
            };
            let Some(prefix) = prefix else { continue };
            if prefix.is_empty() {
                self.scope.begin_default_scope(Namespace::new(value.clone()));
            } else {
                self.scope.begin_scope(prefix, Namespace::new(value.clone()));
            }
            declared.push(prefix.to_owned());
            sink.event(Event::StartPrefixMapping {
                prefix: prefix.to_owned(),
                namespace: value.clone(),
            });
        }

        let (namespace, local_name) = self.resolve_qualified_name(&name)?;
        sink.event(Event::StartElement {
            namespace,
            local_name,
            attributes,
        });

        if self.cursor.current() == Some(b'/') {
            self.cursor.advance();
            self.expect_byte(b'>')?;
            self.close_element(sink, &declared);
            return Ok(());
        }
        self.expect_byte(b'>')?;

        loop {
            match (self.cursor.current(), self.cursor.peek(1)) {
                (Some(b'<'), Some(b'/')) => {
                    self.cursor.advance_by(2);
                    let close_name = self.parse_name()?;
                    if close_name != name {
                        return Err(self.error_here("mismatched closing tag"));
                    }
                    self.skip_whitespace();
                    self.expect_byte(b'>')?;
                    self.close_element(sink, &declared);
                    return Ok(());
                }
                (Some(b'<'), Some(b'!')) => {
                    if self.cursor.starts_with(b"<![CDATA[") {
                        let text = self.parse_cdata()?;
                        sink.event(Event::CData(text));
                    } else {
                        self.skip_comment_or_declaration()?;
                    }
                }
                (Some(b'<'), Some(b'?')) => self.skip_processing_instruction()?,
                (Some(b'<'), _) => self.parse_element(sink)?,
                (Some(_), _) => {
                    let text = self.parse_text()?;
                    sink.event(Event::Characters(text));
                }
                (None, _) => return Err(self.error_here("unterminated element")),
            }
        }
    }

    /// Emits the end-element event and closes the element's declarations in
    /// reverse order.
    fn close_element<S: EventSink>(&mut self, sink: &mut S, declared: &[String]) {
        sink.event(Event::EndElement);
        for prefix in declared.iter().rev() {
            sink.event(Event::EndPrefixMapping {
                prefix: prefix.clone(),
            });
            if prefix.is_empty() {
                self.scope.end_default_scope();
            } else {
                self.scope.end_scope(prefix);
            }
        }
    }

    fn resolve_qualified_name(&self, name: &str) -> Result<(Option<String>, String)> {
        match name.split_once(':') {
            Some((prefix, local_name)) => {
                let namespace = self
                    .scope
                    .namespace_for_prefix(prefix)
                    .ok_or_else(|| self.error_here("unbound namespace prefix"))?;
                Ok((Some(namespace.name.clone()), local_name.to_owned()))
            }
            None => Ok((
                self.scope
                    .default_namespace()
                    .map(|namespace| namespace.name.clone()),
                name.to_owned(),
            )),
        }
    }

    fn parse_attributes(&mut self) -> Result<IndexMap<String, String>> {
        let mut attributes = IndexMap::new();

        loop {
            self.skip_whitespace();
            match self.cursor.current() {
                Some(b'/') | Some(b'>') => break,
                Some(_) => {}
                None => return Err(self.error_here("unexpected end of input")),
            }

            let name = self.parse_name()?;
            self.skip_whitespace();
            self.expect_byte(b'=')?;
            self.skip_whitespace();
            let value = self.parse_attribute_value()?;

            if attributes.contains_key(&name) {
                return Err(self.error_here("duplicate attribute"));
            }
            attributes.insert(name, value);
        }

        Ok(attributes)
    }

    fn parse_attribute_value(&mut self) -> Result<String> {
        let quote = match self.cursor.current() {
            Some(b @ b'"') | Some(b @ b'\'') => b,
            _ => return Err(self.error_here("expected quoted attribute value")),
        };
        self.cursor.advance();

        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == quote {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance();
                let text = self.bytes_to_string(raw)?;
                return self.decode_entities(&text);
            }
            self.cursor.advance();
        }

        Err(self.error_here("unterminated attribute value"))
    }

    fn parse_text(&mut self) -> Result<String> {
        let start = self.cursor.pos();
        while let Some(b) = self.cursor.current() {
            if b == b'<' {
                break;
            }
            self.cursor.advance();
        }

        let raw = self.cursor.slice_from(start);
        let text = self.bytes_to_string(raw)?;
        self.decode_entities(&text)
    }

    fn parse_cdata(&mut self) -> Result<String> {
        // cursor at "<![CDATA["
        self.cursor.advance_by(9);
        let start = self.cursor.pos();
        while self.cursor.current().is_some() {
            if self.cursor.starts_with(b"]]>") {
                let raw = self.cursor.slice_from(start);
                self.cursor.advance_by(3);
                return self.bytes_to_string(raw);
            }
            self.cursor.advance();
        }
        Err(self.error_here("unterminated CDATA section"))
    }

    fn parse_name(&mut self) -> Result<String> {
        let start = self.cursor.pos();

        let Some(first) = self.cursor.current() else {
            return Err(self.error_here("expected name"));
        };
        if !is_name_start(first) {
            return Err(self.error_here("invalid name"));
        }

        self.cursor.advance();
        while let Some(b) = self.cursor.current() {
            if is_name_char(b) {
                self.cursor.advance();
            } else {
                break;
            }
        }

        let raw = self.cursor.slice_from(start);
        self.bytes_to_string(raw)
    }

    fn skip_misc(&mut self) -> Result<()> {
        loop {
            self.skip_whitespace();
            match (self.cursor.current(), self.cursor.peek(1)) {
                (Some(b'<'), Some(b'?')) => self.skip_processing_instruction()?,
                (Some(b'<'), Some(b'!')) => self.skip_comment_or_declaration()?,
                _ => return Ok(()),
            }
        }
    }

    fn skip_comment_or_declaration(&mut self) -> Result<()> {
        // cursor at "<!"
        if self.cursor.starts_with(b"<!--") {
            self.cursor.advance_by(4);
            return self.skip_until(b"-->");
        }
        self.cursor.advance_by(2);
        self.skip_until(b">")
    }

    fn skip_processing_instruction(&mut self) -> Result<()> {
        // cursor at "<?"
        self.cursor.advance_by(2);
        self.skip_until(b"?>")
    }

    fn skip_until(&mut self, pattern: &[u8]) -> Result<()> {
        while self.cursor.current().is_some() {
            if self.cursor.starts_with(pattern) {
                self.cursor.advance_by(pattern.len());
                return Ok(());
            }
            self.cursor.advance();
        }
        Err(self.error_here("unterminated markup"))
    }

    fn expect_byte(&mut self, expected: u8) -> Result<()> {
        if self.cursor.current() == Some(expected) {
            self.cursor.advance();
            Ok(())
        } else {
            Err(self.error_here("unexpected token"))
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.cursor.current() {
            if matches!(b, b' ' | b'\t' | b'\r' | b'\n') {
                self.cursor.advance();
            } else {
                break;
            }
        }
    }

    fn error_here(&self, message: &str) -> Error {
        Error::syntax(self.cursor.position(), message)
    }

    fn bytes_to_string(&self, bytes: &[u8]) -> Result<String> {
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| self.error_here("invalid utf-8"))
    }

    fn decode_entities(&self, input: &str) -> Result<String> {
        if !input.contains('&') {
            return Ok(input.to_owned());
        }

        let mut result = String::with_capacity(input.len());
        let mut chars = input.chars();
        while let Some(ch) = chars.next() {
            if ch != '&' {
                result.push(ch);
                continue;
            }

            let mut entity = String::new();
            for next in chars.by_ref() {
                if next == ';' {
                    break;
                }
                entity.push(next);
            }

            let decoded = match entity.as_str() {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => decode_numeric_entity(&entity),
            };

            match decoded {
                Some(ch) => result.push(ch),
                None => return Err(self.error_here("invalid xml entity")),
            }
        }

        Ok(result)
    }
}

fn is_name_start(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':')
}

fn is_name_char(b: u8) -> bool {
    is_name_start(b) || matches!(b, b'0'..=b'9' | b'-' | b'.')
}

fn decode_numeric_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    }
}
