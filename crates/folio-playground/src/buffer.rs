//! Source buffers and render snapshots

use folio_template::{ExampleTemplate, BEHAVIOR_FILE, PRESENTATION_FILE, STRUCTURE_FILE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which of the three fragments a buffer holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    /// Markup (HTML)
    Structure,
    /// Styling (CSS)
    Presentation,
    /// Script (JavaScript)
    Behavior,
}

impl FragmentKind {
    /// All kinds in assembly order
    pub const ALL: [Self; 3] = [Self::Structure, Self::Presentation, Self::Behavior];

    /// Short label used by the CLI and logs
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Structure => "html",
            Self::Presentation => "css",
            Self::Behavior => "js",
        }
    }

    /// File name the fragment is stored under in a template directory
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Structure => STRUCTURE_FILE,
            Self::Presentation => PRESENTATION_FILE,
            Self::Behavior => BEHAVIOR_FILE,
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FragmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" | "structure" => Ok(Self::Structure),
            "css" | "presentation" => Ok(Self::Presentation),
            "js" | "javascript" | "behavior" => Ok(Self::Behavior),
            other => Err(format!("unknown fragment kind: {other}")),
        }
    }
}

/// One editable fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBuffer {
    kind: FragmentKind,
    text: String,
    dirty: bool,
}

impl SourceBuffer {
    /// Create empty buffer
    #[must_use]
    pub fn new(kind: FragmentKind) -> Self {
        Self {
            kind,
            text: String::new(),
            dirty: false,
        }
    }

    /// Fragment kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> FragmentKind {
        self.kind
    }

    /// Current text
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Changed since the last render
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Overwrite text and mark dirty
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.dirty = true;
    }

    fn clear(&mut self) {
        self.text.clear();
        self.dirty = false;
    }
}

/// The three buffers, exactly one per kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBuffers {
    structure: SourceBuffer,
    presentation: SourceBuffer,
    behavior: SourceBuffer,
}

impl Default for SourceBuffers {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceBuffers {
    /// Create three empty buffers
    #[must_use]
    pub fn new() -> Self {
        Self {
            structure: SourceBuffer::new(FragmentKind::Structure),
            presentation: SourceBuffer::new(FragmentKind::Presentation),
            behavior: SourceBuffer::new(FragmentKind::Behavior),
        }
    }

    /// Buffer for `kind`
    #[must_use]
    pub fn get(&self, kind: FragmentKind) -> &SourceBuffer {
        match kind {
            FragmentKind::Structure => &self.structure,
            FragmentKind::Presentation => &self.presentation,
            FragmentKind::Behavior => &self.behavior,
        }
    }

    fn get_mut(&mut self, kind: FragmentKind) -> &mut SourceBuffer {
        match kind {
            FragmentKind::Structure => &mut self.structure,
            FragmentKind::Presentation => &mut self.presentation,
            FragmentKind::Behavior => &mut self.behavior,
        }
    }

    /// Text of the buffer for `kind`
    #[inline]
    #[must_use]
    pub fn text(&self, kind: FragmentKind) -> &str {
        self.get(kind).text()
    }

    /// Overwrite one buffer
    pub fn set(&mut self, kind: FragmentKind, text: impl Into<String>) {
        self.get_mut(kind).set(text);
    }

    /// Overwrite all three buffers from a template
    pub fn load(&mut self, template: &ExampleTemplate) {
        self.structure.set(template.structure());
        self.presentation.set(template.presentation());
        self.behavior.set(template.behavior());
    }

    /// Empty all three buffers
    pub fn clear(&mut self) {
        for kind in FragmentKind::ALL {
            self.get_mut(kind).clear();
        }
    }

    /// Any buffer changed since the last render
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        FragmentKind::ALL.iter().any(|&kind| self.get(kind).is_dirty())
    }

    /// All buffers empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        FragmentKind::ALL
            .iter()
            .all(|&kind| self.get(kind).text().is_empty())
    }

    pub(crate) fn mark_clean(&mut self) {
        for kind in FragmentKind::ALL {
            self.get_mut(kind).dirty = false;
        }
    }

    /// Owned copy of the current texts
    #[must_use]
    pub fn snapshot(&self, sequence: u64) -> RenderRequest {
        RenderRequest {
            sequence,
            structure: self.structure.text.clone(),
            presentation: self.presentation.text.clone(),
            behavior: self.behavior.text.clone(),
        }
    }
}

/// Immutable snapshot taken when a render starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    sequence: u64,
    structure: String,
    presentation: String,
    behavior: String,
}

impl RenderRequest {
    /// Build a request directly from fragment texts
    #[must_use]
    pub fn new(
        sequence: u64,
        structure: impl Into<String>,
        presentation: impl Into<String>,
        behavior: impl Into<String>,
    ) -> Self {
        Self {
            sequence,
            structure: structure.into(),
            presentation: presentation.into(),
            behavior: behavior.into(),
        }
    }

    /// Monotonic render number
    #[inline]
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Markup text
    #[inline]
    #[must_use]
    pub fn structure(&self) -> &str {
        &self.structure
    }

    /// Style text
    #[inline]
    #[must_use]
    pub fn presentation(&self) -> &str {
        &self.presentation
    }

    /// Script text
    #[inline]
    #[must_use]
    pub fn behavior(&self) -> &str {
        &self.behavior
    }
}
