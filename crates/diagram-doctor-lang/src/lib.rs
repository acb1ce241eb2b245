#![warn(missing_docs)]
//! `diagram-doctor-lang` - data-driven diagram format configuration for `diagram-doctor`.
//!
//! This crate intentionally stays lightweight and does **not** depend on any parser, renderer or
//! regex engine. It provides the closed set of diagram formats the diagnostics core knows about,
//! the family each one belongs to (formats in a family share error-message shapes), and the small
//! amount of per-format syntax knowledge the fix engine needs (mandatory declarations, header
//! keywords).

use std::fmt;

/// Groups of diagram grammars whose compilers report errors in the same shape.
///
/// Error extraction is dispatched per family rather than per format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatFamily {
    /// Jison-generated flow / sequence diagram grammars (Mermaid).
    FlowSequence,
    /// UML-like textual languages (PlantUML, C4-PlantUML, Structurizr DSL).
    UmlLike,
    /// Graph-description languages (Graphviz DOT, the blockdiag family, D2, ...).
    GraphDescription,
    /// XML documents (BPMN, UMLet).
    Xml,
    /// JSON documents (Vega, Vega-Lite, WaveDrom, Excalidraw).
    Json,
    /// YAML documents (WireViz).
    Yaml,
    /// Plain-text drawings (Svgbob, Ditaa).
    AsciiArt,
}

/// A supported diagram format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramFormat {
    /// Mermaid.
    Mermaid,
    /// PlantUML.
    PlantUml,
    /// C4 model diagrams on top of PlantUML.
    C4PlantUml,
    /// Structurizr DSL.
    Structurizr,
    /// Graphviz DOT.
    Graphviz,
    /// blockdiag.
    BlockDiag,
    /// seqdiag.
    SeqDiag,
    /// actdiag.
    ActDiag,
    /// nwdiag.
    NwDiag,
    /// packetdiag.
    PacketDiag,
    /// rackdiag.
    RackDiag,
    /// D2.
    D2,
    /// nomnoml.
    Nomnoml,
    /// erd.
    Erd,
    /// Pikchr.
    Pikchr,
    /// BPMN 2.0 XML.
    Bpmn,
    /// UMLet XML.
    Umlet,
    /// Vega-Lite JSON.
    VegaLite,
    /// Vega JSON.
    Vega,
    /// WaveDrom JSON.
    WaveDrom,
    /// Excalidraw JSON.
    Excalidraw,
    /// WireViz YAML.
    WireViz,
    /// Svgbob ASCII art.
    Svgbob,
    /// Ditaa ASCII art.
    Ditaa,
}

impl DiagramFormat {
    /// Every supported format, in registry order.
    pub const ALL: [DiagramFormat; 24] = [
        Self::Mermaid,
        Self::PlantUml,
        Self::C4PlantUml,
        Self::Structurizr,
        Self::Graphviz,
        Self::BlockDiag,
        Self::SeqDiag,
        Self::ActDiag,
        Self::NwDiag,
        Self::PacketDiag,
        Self::RackDiag,
        Self::D2,
        Self::Nomnoml,
        Self::Erd,
        Self::Pikchr,
        Self::Bpmn,
        Self::Umlet,
        Self::VegaLite,
        Self::Vega,
        Self::WaveDrom,
        Self::Excalidraw,
        Self::WireViz,
        Self::Svgbob,
        Self::Ditaa,
    ];

    /// Resolve a format tag (case-insensitive, aliases accepted).
    ///
    /// Returns `None` for tags outside the registry; callers treat those as "generic".
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase();
        let format = match tag.as_str() {
            "mermaid" => Self::Mermaid,
            "plantuml" | "puml" => Self::PlantUml,
            "c4plantuml" | "c4" => Self::C4PlantUml,
            "structurizr" => Self::Structurizr,
            "graphviz" | "dot" => Self::Graphviz,
            "blockdiag" => Self::BlockDiag,
            "seqdiag" => Self::SeqDiag,
            "actdiag" => Self::ActDiag,
            "nwdiag" => Self::NwDiag,
            "packetdiag" => Self::PacketDiag,
            "rackdiag" => Self::RackDiag,
            "d2" => Self::D2,
            "nomnoml" => Self::Nomnoml,
            "erd" => Self::Erd,
            "pikchr" => Self::Pikchr,
            "bpmn" => Self::Bpmn,
            "umlet" => Self::Umlet,
            "vegalite" | "vega-lite" => Self::VegaLite,
            "vega" => Self::Vega,
            "wavedrom" => Self::WaveDrom,
            "excalidraw" => Self::Excalidraw,
            "wireviz" => Self::WireViz,
            "svgbob" => Self::Svgbob,
            "ditaa" => Self::Ditaa,
            _ => return None,
        };
        Some(format)
    }

    /// The canonical tag, used as the prefix of category codes.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Mermaid => "mermaid",
            Self::PlantUml => "plantuml",
            Self::C4PlantUml => "c4plantuml",
            Self::Structurizr => "structurizr",
            Self::Graphviz => "graphviz",
            Self::BlockDiag => "blockdiag",
            Self::SeqDiag => "seqdiag",
            Self::ActDiag => "actdiag",
            Self::NwDiag => "nwdiag",
            Self::PacketDiag => "packetdiag",
            Self::RackDiag => "rackdiag",
            Self::D2 => "d2",
            Self::Nomnoml => "nomnoml",
            Self::Erd => "erd",
            Self::Pikchr => "pikchr",
            Self::Bpmn => "bpmn",
            Self::Umlet => "umlet",
            Self::VegaLite => "vegalite",
            Self::Vega => "vega",
            Self::WaveDrom => "wavedrom",
            Self::Excalidraw => "excalidraw",
            Self::WireViz => "wireviz",
            Self::Svgbob => "svgbob",
            Self::Ditaa => "ditaa",
        }
    }

    /// The family whose error shapes this format's compiler produces.
    pub fn family(self) -> FormatFamily {
        match self {
            Self::Mermaid => FormatFamily::FlowSequence,
            Self::PlantUml | Self::C4PlantUml | Self::Structurizr => FormatFamily::UmlLike,
            Self::Graphviz
            | Self::BlockDiag
            | Self::SeqDiag
            | Self::ActDiag
            | Self::NwDiag
            | Self::PacketDiag
            | Self::RackDiag
            | Self::D2
            | Self::Nomnoml
            | Self::Erd
            | Self::Pikchr => FormatFamily::GraphDescription,
            Self::Bpmn | Self::Umlet => FormatFamily::Xml,
            Self::VegaLite | Self::Vega | Self::WaveDrom | Self::Excalidraw => FormatFamily::Json,
            Self::WireViz => FormatFamily::Yaml,
            Self::Svgbob | Self::Ditaa => FormatFamily::AsciiArt,
        }
    }

    /// Mandatory start/end declarations for this format.
    pub fn markers(self) -> DeclarationMarkers {
        match self {
            Self::PlantUml | Self::C4PlantUml => DeclarationMarkers::both("@startuml", "@enduml"),
            Self::Structurizr => DeclarationMarkers::start("workspace {"),
            _ => DeclarationMarkers::default(),
        }
    }

    /// Keywords that may open the first line of a document, used when the compiler cannot
    /// detect which kind of diagram it is looking at. The first entry is the preferred default.
    pub fn header_keywords(self) -> &'static [&'static str] {
        match self {
            Self::Mermaid => &[
                "flowchart TD",
                "sequenceDiagram",
                "classDiagram",
                "stateDiagram-v2",
                "erDiagram",
                "gantt",
            ],
            Self::Graphviz => &["digraph G {", "graph G {"],
            Self::BlockDiag => &["blockdiag {"],
            Self::SeqDiag => &["seqdiag {"],
            Self::ActDiag => &["actdiag {"],
            Self::NwDiag => &["nwdiag {"],
            Self::PacketDiag => &["packetdiag {"],
            Self::RackDiag => &["rackdiag {"],
            _ => &[],
        }
    }
}

impl fmt::Display for DiagramFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Mandatory declaration lines for a format (e.g. `@startuml` / `@enduml`).
///
/// The fix engine uses these to synthesize "add the missing declaration" edits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeclarationMarkers {
    /// Declaration that must open the document.
    pub start: Option<&'static str>,
    /// Declaration that must close the document.
    pub end: Option<&'static str>,
}

impl DeclarationMarkers {
    /// Markers with only a start declaration.
    pub fn start(start: &'static str) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// Markers with both a start and an end declaration.
    pub fn both(start: &'static str, end: &'static str) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Returns `true` if a start declaration is required.
    pub fn has_start(&self) -> bool {
        self.start.is_some_and(|s| !s.is_empty())
    }

    /// Returns `true` if an end declaration is required.
    pub fn has_end(&self) -> bool {
        self.end.is_some_and(|s| !s.is_empty())
    }
}

/// Resolve the family for a raw tag, if the tag is known.
pub fn family_for_tag(tag: &str) -> Option<FormatFamily> {
    DiagramFormat::from_tag(tag).map(DiagramFormat::family)
}

/// Normalize a tag for use as a category-code prefix.
///
/// Known tags (and their aliases) map to the canonical tag; unknown tags are lowercased and
/// trimmed so codes stay stable regardless of caller casing.
pub fn code_prefix(tag: &str) -> String {
    match DiagramFormat::from_tag(tag) {
        Some(format) => format.tag().to_string(),
        None => tag.trim().to_ascii_lowercase(),
    }
}
