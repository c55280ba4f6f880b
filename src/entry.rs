//! Catalog entries and the assembler that builds one from its line run.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
};

use serde::Serialize;

use crate::{error::EntryIssue, line::Line};

pub const MSGCTXT: &str = "msgctxt";
pub const MSGID: &str = "msgid";
pub const MSGID_PLURAL: &str = "msgid_plural";
pub const MSGSTR: &str = "msgstr";

/// Identity of an entry within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntryKey {
    pub context: Option<String>,
    pub id: String,
}

impl Display for EntryKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.context {
            Some(context) => write!(f, "{context:?}/{:?}", self.id),
            None => write!(f, "{:?}", self.id),
        }
    }
}

/// Metadata carried by the comments that open an entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct EntryHeader {
    /// Plain `#` comments.
    pub translator_comments: Vec<String>,
    /// `#.` comments.
    pub extracted_comments: Vec<String>,
    /// `#:` source references.
    pub references: Vec<String>,
    /// `#,` flags such as `fuzzy` or `c-format`.
    pub flags: Vec<String>,
}

impl EntryHeader {
    fn from_lines(lines: &[Line]) -> Self {
        let mut header = EntryHeader::default();

        let comments = lines
            .iter()
            .take_while(|line| line.is_comment_or_whitespace() && !line.is_marked_obsolete())
            .filter_map(Line::comment);

        for comment in comments {
            if let Some(references) = comment.strip_prefix(':') {
                header
                    .references
                    .extend(references.split_whitespace().map(str::to_string));
            } else if let Some(flags) = comment.strip_prefix(',') {
                header.flags.extend(
                    flags
                        .split(',')
                        .map(str::trim)
                        .filter(|flag| !flag.is_empty())
                        .map(str::to_string),
                );
            } else if let Some(extracted) = comment.strip_prefix('.') {
                header.extracted_comments.push(extracted.trim().to_string());
            } else if !comment.starts_with('|') {
                // `#|` previous-msgid lines are not kept.
                header.translator_comments.push(comment.trim().to_string());
            }
        }

        header
    }

    pub fn is_fuzzy(&self) -> bool {
        self.flags.iter().any(|flag| flag == "fuzzy")
    }
}

/// One translatable message. Built once from a finalized line run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    header: EntryHeader,
    context: Option<String>,
    id: String,
    value: String,
    plural_id: Option<String>,
    plural_values: Vec<String>,
    obsolete: bool,
    lines: Vec<Line>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Slot {
    Context,
    Id,
    PluralId,
    Value,
    Plural(usize),
    Discard,
}

impl Entry {
    /// Assembles an entry from the lines that belong to it.
    ///
    /// The run may start with blank and comment lines. Bare string lines
    /// continue whichever keyword was selected last.
    pub fn from_lines(lines: Vec<Line>) -> Result<Self, EntryIssue> {
        let mut context: Option<String> = None;
        let mut id: Option<String> = None;
        let mut plural_id: Option<String> = None;
        let mut value: Option<String> = None;
        let mut plural_values: BTreeMap<usize, String> = BTreeMap::new();

        let mut current: Option<Slot> = None;
        let mut unsupported = Vec::new();
        let mut obsolete_lines = false;
        let mut active_lines = false;

        for line in &lines {
            let logical = line.logical();
            if !logical.is_comment_or_whitespace() {
                if line.is_marked_obsolete() {
                    obsolete_lines = true;
                } else {
                    active_lines = true;
                }
            }

            if let Some(keyword) = logical.keyword() {
                let slot = match (keyword.name.as_str(), keyword.index) {
                    (MSGSTR, Some(index)) => {
                        if plural_values.insert(index, String::new()).is_some() {
                            return Err(EntryIssue::DuplicatePluralIndex(index));
                        }
                        Slot::Plural(index)
                    }
                    (MSGCTXT, None) => open(&mut context, MSGCTXT, Slot::Context)?,
                    (MSGID, None) => open(&mut id, MSGID, Slot::Id)?,
                    (MSGID_PLURAL, None) => open(&mut plural_id, MSGID_PLURAL, Slot::PluralId)?,
                    (MSGSTR, None) => open(&mut value, MSGSTR, Slot::Value)?,
                    _ => {
                        unsupported.push(keyword.to_string());
                        Slot::Discard
                    }
                };
                current = Some(slot);
            }

            if let Some(line_value) = logical.value() {
                let text = line_value.value();
                let target = match current {
                    None => return Err(EntryIssue::OrphanValue(line.raw().to_string())),
                    Some(Slot::Context) => context.as_mut(),
                    Some(Slot::Id) => id.as_mut(),
                    Some(Slot::PluralId) => plural_id.as_mut(),
                    Some(Slot::Value) => value.as_mut(),
                    Some(Slot::Plural(index)) => plural_values.get_mut(&index),
                    Some(Slot::Discard) => None,
                };
                if let Some(target) = target {
                    target.push_str(text);
                }
            }
        }

        if obsolete_lines && active_lines {
            return Err(EntryIssue::MixedObsolete);
        }

        if let Some((&max_index, _)) = plural_values.last_key_value() {
            if max_index + 1 != plural_values.len() {
                return Err(EntryIssue::PluralIndexGap {
                    expected: max_index + 1,
                    found: plural_values.len(),
                });
            }
        }

        match (plural_id.is_some(), plural_values.is_empty()) {
            (true, true) => return Err(EntryIssue::PluralIdWithoutValues),
            (false, false) => return Err(EntryIssue::PluralValuesWithoutId),
            _ => {}
        }

        if !unsupported.is_empty() {
            return Err(EntryIssue::UnsupportedKeywords(unsupported));
        }

        Ok(Entry {
            header: EntryHeader::from_lines(&lines),
            context,
            id: id.unwrap_or_default(),
            value: value.unwrap_or_default(),
            plural_id,
            plural_values: plural_values.into_values().collect(),
            obsolete: obsolete_lines,
            lines,
        })
    }

    pub fn key(&self) -> EntryKey {
        EntryKey {
            context: self.context.clone(),
            id: self.id.clone(),
        }
    }

    pub fn header(&self) -> &EntryHeader {
        &self.header
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn is_contextual(&self) -> bool {
        self.context.is_some()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn plural_id(&self) -> Option<&str> {
        self.plural_id.as_deref()
    }

    pub fn plural_values(&self) -> &[String] {
        &self.plural_values
    }

    pub fn is_plural(&self) -> bool {
        self.plural_id.is_some()
    }

    pub fn is_obsolete(&self) -> bool {
        self.obsolete
    }

    /// The header entry has a blank id and no context.
    pub fn is_header(&self) -> bool {
        self.id.is_empty() && self.context.is_none()
    }

    /// The source lines this entry was assembled from, in order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Entry {{ key: {}, value: {:?}, obsolete: {} }}",
            self.key(),
            self.value,
            self.obsolete
        )
    }
}

fn open(buffer: &mut Option<String>, keyword: &str, slot: Slot) -> Result<Slot, EntryIssue> {
    if buffer.is_some() {
        return Err(EntryIssue::RepeatedKeyword(keyword.to_string()));
    }
    *buffer = Some(String::new());
    Ok(slot)
}
