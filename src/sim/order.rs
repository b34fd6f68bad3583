//! Orders and order lines

use serde::{Deserialize, Serialize};

use crate::catalog::ItemKind;

/// Fulfilment status of one order line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStatus {
    /// Not checked yet
    #[default]
    Pending,
    Sorted,
    Missing,
}

/// One requested item type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub name: String,
    /// Always at least 1
    pub required: u32,
    /// Recomputed from the sorting zone on every check
    pub collected: u32,
    pub status: LineStatus,
}

impl OrderLine {
    /// Unchecked line for `required` items of `kind`
    pub fn new(kind: ItemKind, required: u32) -> Self {
        Self {
            kind,
            name: kind.display_name().to_string(),
            required: required.max(1),
            collected: 0,
            status: LineStatus::Pending,
        }
    }

    pub fn is_sorted(&self) -> bool {
        self.status == LineStatus::Sorted
    }

    /// Items still needed according to the last check
    pub fn shortfall(&self) -> u32 {
        self.required.saturating_sub(self.collected)
    }
}

/// Ordered list of lines, at most one per item type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Order {
    lines: Vec<OrderLine>,
}

impl Order {
    /// Build an order; later lines repeating a type are dropped
    pub fn new(lines: Vec<OrderLine>) -> Self {
        let mut order = Self {
            lines: Vec::with_capacity(lines.len()),
        };
        for line in lines {
            if order.contains(line.kind) {
                log::debug!("Dropping duplicate order line for {}", line.kind.as_str());
                continue;
            }
            order.lines.push(line);
        }
        order
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrderLine> {
        self.lines.iter()
    }

    /// Line for a given item type
    pub fn line(&self, kind: ItemKind) -> Option<&OrderLine> {
        self.lines.iter().find(|line| line.kind == kind)
    }

    pub fn contains(&self, kind: ItemKind) -> bool {
        self.line(kind).is_some()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of required quantities
    pub fn total_required(&self) -> u32 {
        self.lines.iter().map(|line| line.required).sum()
    }

    /// Sum of collected quantities as of the last check
    pub fn total_collected(&self) -> u32 {
        self.lines.iter().map(|line| line.collected).sum()
    }
}

impl FromIterator<OrderLine> for Order {
    fn from_iter<I: IntoIterator<Item = OrderLine>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Order {
    type Item = &'a OrderLine;
    type IntoIter = std::slice::Iter<'a, OrderLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
