//! Sorted textual output of dynamic fields.
//!
//! Entries are gathered from the store, filtered against the owner's
//! static fields, sorted by key text, and emitted one per line as
//! `key = "escaped value";`. Sorting keeps the output independent of hash
//! bucket layout and insertion order, so saved files diff cleanly.

use std::cmp::Ordering;
use std::io::{self, Write};
use std::rc::Rc;

use dynfield_core::{StaticFields, StringTable};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::escape::expand_escape_into;
use crate::store::PropertyStore;

/// Line terminator for [`PropertyStore::write_fields`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineEnding {
    /// `\r\n`.
    #[default]
    CrLf,
    /// `\n`.
    Lf,
}

impl LineEnding {
    /// The terminator text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CrLf => "\r\n",
            Self::Lf => "\n",
        }
    }
}

/// Layout of written fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Indentation of the owning object. Fields are written one tab deeper.
    pub tab_stop: u32,
    /// Line terminator.
    pub line_ending: LineEnding,
}

impl WriteOptions {
    /// Options for an owner indented by `tab_stop` tabs.
    pub fn new(tab_stop: u32) -> Self {
        Self {
            tab_stop,
            ..Self::default()
        }
    }

    /// Use `line_ending` instead of the default `\r\n`.
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }
}

/// Gathered `(key text, value)` pairs. Most objects carry only a handful.
type Gathered<'t> = SmallVec<[(&'t str, Rc<str>); 16]>;

impl PropertyStore {
    /// Write every non-static field to `sink`, sorted by key.
    ///
    /// Fields whose key is one of `owner`'s static fields are skipped, as
    /// are fields `owner` vetoes through
    /// [`StaticFields::should_write_field`].
    pub fn write_fields<R, W>(
        &self,
        table: &StringTable,
        owner: &R,
        options: &WriteOptions,
        mut sink: W,
    ) -> io::Result<()>
    where
        R: StaticFields + ?Sized,
        W: Write,
    {
        let fields = self.gather(table, owner, true);
        let indent = "\t".repeat(options.tab_stop as usize + 1);
        let mut line = String::new();
        for (key, value) in &fields {
            line.clear();
            line.push_str(&indent);
            line.push_str(key);
            line.push_str(" = \"");
            expand_escape_into(&mut line, value);
            line.push_str("\";");
            line.push_str(options.line_ending.as_str());
            sink.write_all(line.as_bytes())?;
        }
        debug!(fields = fields.len(), "wrote dynamic fields");
        Ok(())
    }

    /// The lines [`print_fields`](Self::print_fields) logs, in order.
    ///
    /// Static fields are skipped; the write veto is not consulted.
    pub fn print_lines<R>(&self, table: &StringTable, owner: &R) -> Vec<String>
    where
        R: StaticFields + ?Sized,
    {
        self.gather(table, owner, false)
            .into_iter()
            .map(|(key, value)| {
                let mut line = format!("  {key} = \"");
                expand_escape_into(&mut line, &value);
                line.push('"');
                line
            })
            .collect()
    }

    /// Log every non-static field at `info`, sorted by key.
    pub fn print_fields<R>(&self, table: &StringTable, owner: &R)
    where
        R: StaticFields + ?Sized,
    {
        for line in self.print_lines(table, owner) {
            info!(target: "dynfield::fields", "{line}");
        }
    }

    fn gather<'t, R>(&self, table: &'t StringTable, owner: &R, apply_veto: bool) -> Gathered<'t>
    where
        R: StaticFields + ?Sized,
    {
        let mut fields = Gathered::new();
        for field in self.cursor() {
            if owner.is_static_field(field.key) {
                continue;
            }
            if apply_veto && !owner.should_write_field(field.key, &field.value) {
                continue;
            }
            let Some(name) = table.resolve(field.key) else {
                warn!(key = %field.key, "dynamic field key missing from string table");
                continue;
            };
            fields.push((name, field.value));
        }
        fields.sort_by(|a, b| compare_keys(a.0, b.0));
        fields
    }
}

/// Case-insensitive key order, falling back to exact text so the order is
/// total.
fn compare_keys(a: &str, b: &str) -> Ordering {
    let folded = a
        .bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()));
    folded.then_with(|| a.cmp(b))
}
