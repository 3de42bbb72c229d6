//! Page layouts as data.
//!
//! Each [`Variant`] maps to one static [`Schema`] describing where the fields
//! of a [`Record`](crate::record::Record) live in that generation of the
//! Serebii dex pages. The extractor only interprets these descriptions.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Variant {
    /// Generation 1 dex (`/pokedex/`), combined special stat.
    Legacy,
    /// Sword/Shield dex (`/pokedex-swsh/`), split special stats.
    Modern,
    /// Scarlet/Violet dex (`/pokedex-sv/`), also reachable by name.
    Alt,
}

impl Variant {
    pub const fn schema(self) -> &'static Schema {
        match self {
            Self::Legacy => &LEGACY,
            Self::Modern => &MODERN,
            Self::Alt => &ALT,
        }
    }

    pub const fn path_prefix(self) -> &'static str {
        match self {
            Self::Legacy => "pokedex",
            Self::Modern => "pokedex-swsh",
            Self::Alt => "pokedex-sv",
        }
    }

    pub const fn supports_name(self) -> bool {
        matches!(self, Self::Alt)
    }
}

#[derive(Debug)]
pub struct Schema {
    pub panel: PanelRule,
    pub stats: StatsRule,
    /// Caption of the effort value column, if the layout has one.
    pub effort_caption: Option<&'static str>,
}

#[derive(Debug)]
pub struct PanelRule {
    /// Index among all `div[align=center]` elements of the page.
    pub container: usize,
    pub cell_class: &'static str,
    pub name: usize,
    pub number: NumberSource,
    pub classification: usize,
    pub height: MeasureRule,
    pub weight: MeasureRule,
}

#[derive(Debug, Clone, Copy)]
pub enum NumberSource {
    /// Text of the cell, as is.
    Cell(usize),
    /// `#NNN` from the requested identifier. Without one (name lookups) the
    /// first `#NNN` found in `fallback` is used.
    Identifier { fallback: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct MeasureRule {
    pub cell: usize,
    /// Unit that ends the imperial token inside a `Standard` sub-table.
    pub unit_suffix: &'static str,
}

#[derive(Debug)]
pub struct StatsRule {
    pub locate: StatsLocator,
    pub layout: StatLayout,
}

#[derive(Debug)]
pub enum StatsLocator {
    /// The `index`-th `table.{class}`, its flattened cells read from `offset`.
    NthClassTable { class: &'static str, index: usize, offset: usize },
    /// The first `table` after `a[name={anchor}]`.
    AnchorNextTable { anchor: &'static str, offset: usize },
    /// The sibling cells following the cell labelled `label`.
    LabelSiblings { label: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatLayout {
    /// hp, attack, defense, special, speed
    Combined,
    /// hp, attack, defense, sp. attack, sp. defense, speed
    Split,
}

impl StatLayout {
    pub const fn len(self) -> usize {
        match self {
            Self::Combined => 5,
            Self::Split => 6,
        }
    }
}

const HEIGHT_SUFFIX: &str = "\"";
const WEIGHT_SUFFIX: &str = "lbs";

static LEGACY: Schema = Schema {
    panel: PanelRule {
        container: 3,
        cell_class: "fooinfo",
        name: 1,
        number: NumberSource::Cell(3),
        classification: 4,
        height: MeasureRule { cell: 5, unit_suffix: HEIGHT_SUFFIX },
        weight: MeasureRule { cell: 6, unit_suffix: WEIGHT_SUFFIX },
    },
    stats: StatsRule {
        locate: StatsLocator::NthClassTable { class: "dextable", index: 7, offset: 8 },
        layout: StatLayout::Combined,
    },
    effort_caption: None,
};

static MODERN: Schema = Schema {
    panel: PanelRule {
        container: 1,
        cell_class: "fooinfo",
        name: 1,
        number: NumberSource::Identifier { fallback: 3 },
        classification: 5,
        height: MeasureRule { cell: 6, unit_suffix: HEIGHT_SUFFIX },
        weight: MeasureRule { cell: 7, unit_suffix: WEIGHT_SUFFIX },
    },
    stats: StatsRule {
        locate: StatsLocator::LabelSiblings { label: "Base Stats - Total" },
        layout: StatLayout::Split,
    },
    effort_caption: Some("effort values earned"),
};

static ALT: Schema = Schema {
    panel: PanelRule {
        container: 1,
        cell_class: "fooinfo",
        name: 1,
        number: NumberSource::Identifier { fallback: 3 },
        classification: 5,
        height: MeasureRule { cell: 6, unit_suffix: HEIGHT_SUFFIX },
        weight: MeasureRule { cell: 7, unit_suffix: WEIGHT_SUFFIX },
    },
    stats: StatsRule {
        locate: StatsLocator::AnchorNextTable { anchor: "stats", offset: 0 },
        layout: StatLayout::Split,
    },
    effort_caption: Some("effort values earned"),
};
