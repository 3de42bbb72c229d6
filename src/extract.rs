use std::sync::LazyLock;

use compact_str::{CompactString, ToCompactString};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use unicase::UniCase;

use crate::{
    error::ScrapeError,
    record::{Record, Special},
    schema::{MeasureRule, NumberSource, Schema, StatLayout, StatsLocator, Variant},
    util::{next_siblings_named, own_text, text_of, zero_pad},
};

static DEX_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#\d{3,4}").unwrap());
/// A three-tab run, or a line break followed by any run of tabs.
static MEASURE_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r?\n)?\t{3,}|\r?\n\t+").unwrap());

const STANDARD: &str = "Standard";

fn selector(css: &str) -> anyhow::Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow::anyhow!("bad selector {css:?}: {e}"))
}

/// Compiled selectors for one [`Schema`].
pub struct Extractor {
    schema: &'static Schema,
    sel_container: Selector,
    sel_cell: Selector,
    sel_td: Selector,
    sel_tr: Selector,
    sel_stats: Option<Selector>,
}

impl Extractor {
    pub fn new(variant: Variant) -> anyhow::Result<Self> {
        let schema = variant.schema();
        let sel_stats = match schema.stats.locate {
            StatsLocator::NthClassTable { class, .. } => Some(selector(&format!("table.{class}"))?),
            StatsLocator::AnchorNextTable { anchor, .. } => {
                Some(selector(&format!("a[name=\"{anchor}\"], table"))?)
            }
            StatsLocator::LabelSiblings { .. } => None,
        };
        Ok(Self {
            schema,
            sel_container: selector("div[align=\"center\"]")?,
            sel_cell: selector(&format!("td.{}", schema.panel.cell_class))?,
            sel_td: selector("td")?,
            sel_tr: selector("tr")?,
            sel_stats,
        })
    }

    /// Assembles the record of one dex page. `id` is the requested identifier,
    /// `None` for name lookups.
    pub fn extract(&self, html: &Html, id: Option<u16>) -> Result<Record, ScrapeError> {
        let panel = &self.schema.panel;

        let container = html
            .select(&self.sel_container)
            .nth(panel.container)
            .ok_or_else(|| ScrapeError::missing(format!("centered container #{}", panel.container)))?;
        let cells = container.select(&self.sel_cell).collect::<Vec<_>>();
        let cell = |idx: usize| {
            cells
                .get(idx)
                .copied()
                .ok_or_else(|| ScrapeError::missing(format!("info cell #{idx} (found {})", cells.len())))
        };

        let name = text_of(cell(panel.name)?).to_compact_string();
        let number = match (panel.number, id) {
            (NumberSource::Cell(idx), _) => text_of(cell(idx)?).to_compact_string(),
            (NumberSource::Identifier { .. }, Some(id)) => compact_str::format_compact!("#{}", zero_pad(id)),
            (NumberSource::Identifier { fallback }, None) => {
                let raw = text_of(cell(fallback)?);
                DEX_NUMBER
                    .find(&raw)
                    .map(|m| m.as_str().to_compact_string())
                    .ok_or(ScrapeError::FieldFormat { field: "number", raw })?
            }
        };
        let classification = text_of(cell(panel.classification)?).to_compact_string();
        let height = self.measure(cell(panel.height.cell)?, &panel.height);
        let weight = self.measure(cell(panel.weight.cell)?, &panel.weight);

        let stats = self.stat_cells(html, container)?;
        let layout = self.schema.stats.layout;
        if stats.len() < layout.len() {
            return Err(ScrapeError::missing(format!(
                "{} stat cells (found {})",
                layout.len(),
                stats.len()
            )));
        }
        let stat = |idx: usize, field: &'static str| parse_stat(&text_of(stats[idx]), field);

        let (special, speed) = match layout {
            StatLayout::Combined => (Special::Combined { special: stat(3, "special")? }, stat(4, "speed")?),
            StatLayout::Split => (
                Special::Split {
                    sp_att: stat(3, "sp_att")?,
                    sp_def: stat(4, "sp_def")?,
                },
                stat(5, "speed")?,
            ),
        };

        Ok(Record {
            name,
            number,
            classification,
            height,
            weight,
            hit_points: stat(0, "hit_points")?,
            attack: stat(1, "attack")?,
            defense: stat(2, "defense")?,
            special,
            speed,
            effort_values: self.effort_values(html),
        })
    }

    fn measure(&self, cell: ElementRef, rule: &MeasureRule) -> Vec<CompactString> {
        let standard = cell
            .select(&self.sel_td)
            .find(|td| own_text(*td).trim() == STANDARD)
            .and_then(|td| next_siblings_named(td, "td").next());
        match standard {
            Some(value) => split_spaced(&text_of(value), rule.unit_suffix),
            None => split_measure(&cell.text().collect::<String>()),
        }
    }

    fn stat_cells<'a>(
        &self,
        html: &'a Html,
        container: ElementRef<'a>,
    ) -> Result<Vec<ElementRef<'a>>, ScrapeError> {
        let take = self.schema.stats.layout.len();
        match self.schema.stats.locate {
            StatsLocator::NthClassTable { class, index, offset } => {
                let table = self
                    .sel_stats
                    .as_ref()
                    .and_then(|sel| html.select(sel).nth(index))
                    .ok_or_else(|| ScrapeError::missing(format!("table.{class} #{index}")))?;
                Ok(table.select(&self.sel_td).skip(offset).take(take).collect())
            }
            StatsLocator::AnchorNextTable { anchor, offset } => {
                let mut candidates = self
                    .sel_stats
                    .as_ref()
                    .map(|sel| html.select(sel))
                    .ok_or_else(|| ScrapeError::missing(format!("anchor {anchor:?}")))?
                    .skip_while(|e| e.value().name() != "a");
                if candidates.next().is_none() {
                    return Err(ScrapeError::missing(format!("anchor {anchor:?}")));
                }
                let table = candidates
                    .find(|e| e.value().name() == "table")
                    .ok_or_else(|| ScrapeError::missing(format!("table after anchor {anchor:?}")))?;
                Ok(table.select(&self.sel_td).skip(offset).take(take).collect())
            }
            StatsLocator::LabelSiblings { label } => {
                let head = container
                    .select(&self.sel_td)
                    .find(|td| own_text(*td).trim_start().starts_with(label))
                    .ok_or_else(|| ScrapeError::missing(format!("cell labelled {label:?}")))?;
                Ok(next_siblings_named(head, "td").take(take).collect())
            }
        }
    }

    fn effort_values(&self, html: &Html) -> Option<String> {
        let caption = UniCase::new(self.schema.effort_caption?);
        html.select(&self.sel_tr).find_map(|row| {
            let column = row
                .child_elements()
                .position(|cell| UniCase::new(text_of(cell).as_str()) == caption)?;
            let next = next_siblings_named(row, "tr").next()?;
            next.child_elements().nth(column).map(text_of)
        })
    }
}

/// Splits a raw measurement cell into its imperial and metric tokens.
/// Every layout's delimiter is recognised; stray line breaks inside a token
/// are dropped.
pub fn split_measure(raw: &str) -> Vec<CompactString> {
    MEASURE_DELIMITER
        .split(raw)
        .map(|token| token.replace(['\r', '\n'], ""))
        .map(|token| token.trim().to_compact_string())
        .filter(|token| !token.is_empty())
        .collect()
}

/// `Standard` sub-tables glue the unit to the next value (`2'04"0.7m`).
pub fn split_spaced(raw: &str, unit_suffix: &str) -> Vec<CompactString> {
    let spaced = raw.replace(unit_suffix, &format!("{unit_suffix} "));
    collect_tokens(spaced.split_whitespace())
}

fn collect_tokens<'a>(tokens: impl Iterator<Item = &'a str>) -> Vec<CompactString> {
    tokens
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(CompactString::from)
        .collect()
}

fn parse_stat(raw: &str, field: &'static str) -> Result<u32, ScrapeError> {
    raw.trim().parse().map_err(|_| ScrapeError::FieldFormat {
        field,
        raw: raw.to_owned(),
    })
}
