//! Whole-catalog parsing: splitting a line sequence into entries.
//!
//! The assembler makes one forward pass. Blank and comment lines are held
//! back until the next keyworded line decides which entry they belong to:
//! a comment block that directly precedes a new `msgctxt`/`msgid` stays with
//! the entry that is ending, unless it contains a blank line, in which case
//! everything from the first blank line on opens the new entry.

use std::{
    collections::HashSet,
    io::{BufRead, Write},
    mem,
};

use crate::{
    entry::{Entry, EntryKey, MSGCTXT, MSGID},
    error::{DocumentIssue, Error},
    header::Header,
    line::Line,
    options::ParseOptions,
    traits::Parser,
};

const BOM: char = '\u{feff}';

/// A parsed catalog: the header entry first, then every message in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    header: Header,
    entries: Vec<Entry>,
}

impl Document {
    /// Parses catalog text with default options.
    ///
    /// ```rust
    /// use pocatalog::Document;
    ///
    /// let document = Document::parse("msgid \"\"\nmsgstr \"Language: ja\\n\"\n\nmsgid \"foo\"\nmsgstr \"bar\"")?;
    /// assert_eq!(document.header().language().to_string(), "ja");
    /// assert_eq!(document.messages()[0].value(), "bar");
    /// # Ok::<(), pocatalog::Error>(())
    /// ```
    pub fn parse(text: &str) -> Result<Self, Error> {
        Self::parse_with_options(text, &ParseOptions::default())
    }

    pub fn parse_with_options(text: &str, options: &ParseOptions) -> Result<Self, Error> {
        Self::from_text_lines(text.lines(), options)
    }

    fn from_text_lines<'a>(
        texts: impl IntoIterator<Item = &'a str>,
        options: &ParseOptions,
    ) -> Result<Self, Error> {
        let mut assembler = Assembler::default();

        for (index, text) in texts.into_iter().enumerate() {
            let number = index + 1;
            let text = if index == 0 {
                text.strip_prefix(BOM).unwrap_or(text)
            } else {
                text
            };
            let line = Line::parse(text).map_err(|source| Error::LineSyntax {
                line: number,
                source,
            })?;
            assembler.push(line, number)?;
        }

        let entries = assembler.finish()?;
        Self::from_entries(entries, options)
    }

    /// Builds a document from already assembled entries.
    ///
    /// The first entry must be the header.
    pub fn from_entries(entries: Vec<Entry>, options: &ParseOptions) -> Result<Self, Error> {
        let header = match entries.first() {
            Some(first) if first.is_header() => Header::from_entry(first, options)?,
            _ => {
                return Err(Error::DocumentStructure {
                    line: 1,
                    issue: DocumentIssue::MissingHeader,
                });
            }
        };
        Ok(Document { header, entries })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Every entry, header entry included.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn header_entry(&self) -> &Entry {
        &self.entries[0]
    }

    /// Every entry after the header.
    pub fn messages(&self) -> &[Entry] {
        &self.entries[1..]
    }

    pub fn find(&self, context: Option<&str>, id: &str) -> Option<&Entry> {
        self.messages()
            .iter()
            .find(|entry| entry.context() == context && entry.id() == id)
    }

    pub fn get(&self, key: &EntryKey) -> Option<&Entry> {
        self.find(key.context.as_deref(), &key.id)
    }
}

impl Parser for Document {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let texts = reader.lines().collect::<Result<Vec<_>, _>>()?;
        Self::from_text_lines(texts.iter().map(String::as_str), &ParseOptions::default())
    }

    /// Emits every entry's source lines exactly as they were read.
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        for line in self.entries.iter().flat_map(Entry::lines) {
            writeln!(writer, "{}", line.raw())?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[derive(Default)]
struct Assembler {
    entries: Vec<Entry>,
    seen: HashSet<EntryKey>,

    have_header: bool,
    processing_contextual_entry: bool,
    context_line: usize,

    current: Vec<Line>,
    pending: Vec<Line>,
    /// Lines already handed to finalized entries.
    consumed: usize,
    last_line: usize,
}

impl Assembler {
    fn push(&mut self, line: Line, number: usize) -> Result<(), Error> {
        self.last_line = number;
        let structure = |issue| Error::DocumentStructure {
            line: number,
            issue,
        };

        let logical = line.logical();
        if logical.is_comment_or_whitespace() {
            self.pending.push(line);
            return Ok(());
        }

        if !self.have_header {
            if logical.has_keyword(MSGCTXT) {
                return Err(structure(DocumentIssue::ContextualHeader));
            }
            if !logical.has_keyword(MSGID) {
                return Err(structure(DocumentIssue::MissingHeader));
            }
            if line.is_marked_obsolete() {
                return Err(structure(DocumentIssue::ObsoleteHeader));
            }
            if logical.value().is_some_and(|v| !v.raw().is_empty()) {
                return Err(structure(DocumentIssue::HeaderIdNotBlank(
                    line.raw().to_string(),
                )));
            }

            self.have_header = true;
            self.flush_pending();
            self.current.push(line);
            return Ok(());
        }

        if logical.has_keyword(MSGCTXT) {
            if self.processing_contextual_entry {
                return Err(structure(DocumentIssue::ConsecutiveContexts));
            }
            self.start_next_entry()?;
            self.processing_contextual_entry = true;
            self.context_line = number;
        } else if logical.has_keyword(MSGID) {
            if !self.processing_contextual_entry {
                self.start_next_entry()?;
            }
            self.processing_contextual_entry = false;
        } else {
            self.flush_pending();
        }

        self.current.push(line);
        Ok(())
    }

    fn flush_pending(&mut self) {
        self.current.append(&mut self.pending);
    }

    /// Closes the current entry, handing pending lines from the first blank
    /// one onward to the entry that is starting.
    fn start_next_entry(&mut self) -> Result<(), Error> {
        let mut split = false;
        for line in mem::take(&mut self.pending) {
            if !split && line.is_whitespace() {
                split = true;
                self.finish_entry()?;
            }
            self.current.push(line);
        }

        if !split {
            self.finish_entry()?;
        }
        Ok(())
    }

    fn finish_entry(&mut self) -> Result<(), Error> {
        let lines = mem::take(&mut self.current);
        let start = self.consumed + 1;
        self.consumed += lines.len();

        let entry = Entry::from_lines(lines)
            .map_err(|issue| Error::EntryStructure { line: start, issue })?;

        let key = entry.key();
        if self.seen.contains(&key) {
            return Err(Error::DocumentStructure {
                line: start,
                issue: DocumentIssue::DuplicateEntry(key.to_string()),
            });
        }
        self.seen.insert(key);

        tracing::debug!(
            line = start,
            id = entry.id(),
            obsolete = entry.is_obsolete(),
            "finalized entry"
        );
        self.entries.push(entry);
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Entry>, Error> {
        if !self.have_header {
            return Err(Error::DocumentStructure {
                line: self.last_line.max(1),
                issue: DocumentIssue::MissingHeader,
            });
        }
        if self.processing_contextual_entry {
            return Err(Error::DocumentStructure {
                line: self.context_line,
                issue: DocumentIssue::DanglingContext,
            });
        }

        self.flush_pending();
        self.finish_entry()?;
        Ok(self.entries)
    }
}
