//! Layered Sankey layout.
//!
//! Same scheme as the common plotting libraries use:
//! - columns by longest path from a source, sinks pushed to the last column
//! - node height proportional to `max(inflow, outflow)`
//! - `iterations` relaxation sweeps (right-to-left, then left-to-right),
//!   each followed by collision resolution
//! - links stacked at both ends in the order of the opposite node
//!
//! Everything is deterministic: ties are broken by node / link index.

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::core::{
    color::Rgb,
    config::{EdgeColor, RenderConfig},
    data::FlowRecord,
    error::ValidationError,
};

/// Rectangle available to nodes and links.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub column: usize,
    pub value: f64,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub color: Rgb,
    /// Outgoing link indices
    pub source_links: Vec<usize>,
    /// Incoming link indices
    pub target_links: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub source: usize,
    pub target: usize,
    /// Signed value as read, used for labels.
    pub value: f64,
    pub unit: Option<String>,
    pub width: f64,
    /// Band centre at the source node
    pub y0: f64,
    /// Band centre at the target node
    pub y1: f64,
    pub color: Rgb,
}

impl Link {
    #[inline]
    fn magnitude(&self) -> f64 {
        self.value.abs()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SankeyLayout {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
    pub columns: usize,
    pub extent: Extent,
}

impl SankeyLayout {
    /// Lay out `records` inside `extent`.
    pub fn compute(
        records: &[FlowRecord],
        cfg: &RenderConfig,
        extent: Extent,
    ) -> Result<Self, ValidationError> {
        let mut builder = Builder::new(records, cfg, extent)?;
        builder.compute_node_columns()?;
        builder.compute_node_breadths();
        builder.compute_link_breadths();
        Ok(builder.finish())
    }
}

struct Builder<'a> {
    cfg: &'a RenderConfig,
    extent: Extent,
    nodes: Vec<Node>,
    links: Vec<Link>,
    columns: Vec<Vec<usize>>,
    padding: f64,
}

impl<'a> Builder<'a> {
    fn new(
        records: &[FlowRecord],
        cfg: &'a RenderConfig,
        extent: Extent,
    ) -> Result<Self, ValidationError> {
        let mut index: IndexMap<&str, usize> = IndexMap::new();
        for r in records {
            let next = index.len();
            index.entry(r.source.as_str()).or_insert(next);
            let next = index.len();
            index.entry(r.target.as_str()).or_insert(next);
        }

        let mut nodes: Vec<Node> = index
            .keys()
            .enumerate()
            .map(|(i, name)| Node {
                name: (*name).to_owned(),
                column: 0,
                value: 0.0,
                x0: 0.0,
                x1: 0.0,
                y0: 0.0,
                y1: 0.0,
                color: cfg.palette.color_for(i, name),
                source_links: Vec::new(),
                target_links: Vec::new(),
            })
            .collect();

        let mut links = Vec::with_capacity(records.len());
        for r in records {
            let source = index[r.source.as_str()];
            let target = index[r.target.as_str()];
            if source == target {
                return Err(ValidationError::CircularLink {
                    node: r.source.clone(),
                });
            }
            let color = match cfg.edge_color {
                EdgeColor::From => nodes[source].color,
                EdgeColor::To => nodes[target].color,
            };
            let li = links.len();
            nodes[source].source_links.push(li);
            nodes[target].target_links.push(li);
            links.push(Link {
                source,
                target,
                value: r.value,
                unit: r.unit.clone(),
                width: 0.0,
                y0: 0.0,
                y1: 0.0,
                color,
            });
        }

        for node in &mut nodes {
            let out: f64 = node.source_links.iter().map(|&l| links[l].magnitude()).sum();
            let inc: f64 = node.target_links.iter().map(|&l| links[l].magnitude()).sum();
            node.value = out.max(inc);
        }

        Ok(Self {
            cfg,
            extent,
            nodes,
            links,
            columns: Vec::new(),
            padding: cfg.node_padding,
        })
    }

    // --- Columns ---

    /// Longest-path depth; nodes without outgoing links go to the last column.
    fn compute_node_columns(&mut self) -> Result<(), ValidationError> {
        let n = self.nodes.len();
        let mut depth = vec![0usize; n];
        let mut current: Vec<bool> = vec![true; n];
        let mut x = 0usize;

        while current.iter().any(|&c| c) {
            let mut next = vec![false; n];
            for (i, _) in current.iter().enumerate().filter(|(_, c)| **c) {
                depth[i] = x;
                for &l in &self.nodes[i].source_links {
                    next[self.links[l].target] = true;
                }
            }
            x += 1;
            if x > n {
                let node = next
                    .iter()
                    .position(|&c| c)
                    .map(|i| self.nodes[i].name.clone())
                    .unwrap_or_default();
                return Err(ValidationError::CircularLink { node });
            }
            current = next;
        }

        let last = x.saturating_sub(1);
        let mut columns = vec![Vec::new(); x.max(1)];
        for (i, node) in self.nodes.iter_mut().enumerate() {
            node.column = if node.source_links.is_empty() {
                last
            } else {
                depth[i]
            };
            columns[node.column].push(i);
        }
        columns.retain(|c| !c.is_empty());
        // re-number after dropping empty columns
        for (ci, col) in columns.iter().enumerate() {
            for &i in col {
                self.nodes[i].column = ci;
            }
        }
        self.columns = columns;
        Ok(())
    }

    // --- Breadths ---

    #[allow(clippy::cast_precision_loss)]
    fn compute_node_breadths(&mut self) {
        let Extent { x0, y0, x1, y1 } = self.extent;
        let nw = self.cfg.node_width;
        let ncols = self.columns.len();

        let kx = if ncols > 1 {
            ((x1 - x0 - nw) / (ncols - 1) as f64).max(0.0)
        } else {
            0.0
        };
        for node in &mut self.nodes {
            node.x0 = x0 + node.column as f64 * kx;
            node.x1 = node.x0 + nw;
        }

        let max_len = self.columns.iter().map(Vec::len).max().unwrap_or(1);
        if max_len > 1 {
            self.padding = self.padding.min((y1 - y0) / (max_len - 1) as f64);
        }
        let py = self.padding;

        let ky = self
            .columns
            .iter()
            .map(|c| {
                let total: f64 = c.iter().map(|&i| self.nodes[i].value).sum();
                (y1 - y0 - (c.len() - 1) as f64 * py) / total
            })
            .filter(|k| k.is_finite())
            .fold(f64::INFINITY, f64::min);
        let ky = if ky.is_finite() { ky.max(0.0) } else { 0.0 };

        for col in &self.columns {
            let mut y = y0;
            for &i in col {
                let node = &mut self.nodes[i];
                node.y0 = y;
                node.y1 = y + node.value * ky;
                y = node.y1 + py;
                for &l in &node.source_links {
                    self.links[l].width = self.links[l].magnitude() * ky;
                }
            }
            // spread leftover space evenly
            let spare = (y1 - y + py) / (col.len() + 1) as f64;
            for (k, &i) in col.iter().enumerate() {
                let shift = spare * (k + 1) as f64;
                self.nodes[i].y0 += shift;
                self.nodes[i].y1 += shift;
            }
        }
        self.reorder_all_links();

        let iterations = self.cfg.iterations;
        for i in 0..iterations {
            let alpha = 0.99f64.powi(i32::try_from(i).unwrap_or(i32::MAX));
            let beta = (1.0 - alpha).max((i + 1) as f64 / iterations as f64);
            self.relax_right_to_left(alpha, beta);
            self.relax_left_to_right(alpha, beta);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn relax_left_to_right(&mut self, alpha: f64, beta: f64) {
        for ci in 1..self.columns.len() {
            let column = self.columns[ci].clone();
            for &t in &column {
                let (mut y, mut w) = (0.0, 0.0);
                for &l in &self.nodes[t].target_links {
                    let s = self.links[l].source;
                    let v = self.links[l].magnitude()
                        * (self.nodes[t].column - self.nodes[s].column) as f64;
                    y += self.target_top(s, t) * v;
                    w += v;
                }
                if w <= 0.0 {
                    continue;
                }
                let dy = (y / w - self.nodes[t].y0) * alpha;
                self.nodes[t].y0 += dy;
                self.nodes[t].y1 += dy;
                self.reorder_node_links(t);
            }
            self.sort_column(ci);
            self.resolve_collisions(ci, beta);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn relax_right_to_left(&mut self, alpha: f64, beta: f64) {
        for ci in (0..self.columns.len().saturating_sub(1)).rev() {
            let column = self.columns[ci].clone();
            for &s in &column {
                let (mut y, mut w) = (0.0, 0.0);
                for &l in &self.nodes[s].source_links {
                    let t = self.links[l].target;
                    let v = self.links[l].magnitude()
                        * (self.nodes[t].column - self.nodes[s].column) as f64;
                    y += self.source_top(s, t) * v;
                    w += v;
                }
                if w <= 0.0 {
                    continue;
                }
                let dy = (y / w - self.nodes[s].y0) * alpha;
                self.nodes[s].y0 += dy;
                self.nodes[s].y1 += dy;
                self.reorder_node_links(s);
            }
            self.sort_column(ci);
            self.resolve_collisions(ci, beta);
        }
    }

    /// `target.y0` that would give a straight link from `s` to `t`.
    #[allow(clippy::cast_precision_loss)]
    fn target_top(&self, s: usize, t: usize) -> f64 {
        let py = self.padding;
        let source = &self.nodes[s];
        let mut y = source.y0 - (source.source_links.len() as f64 - 1.0) * py / 2.0;
        for &l in &source.source_links {
            if self.links[l].target == t {
                break;
            }
            y += self.links[l].width + py;
        }
        for &l in &self.nodes[t].target_links {
            if self.links[l].source == s {
                break;
            }
            y -= self.links[l].width;
        }
        y
    }

    /// `source.y0` that would give a straight link from `s` to `t`.
    #[allow(clippy::cast_precision_loss)]
    fn source_top(&self, s: usize, t: usize) -> f64 {
        let py = self.padding;
        let target = &self.nodes[t];
        let mut y = target.y0 - (target.target_links.len() as f64 - 1.0) * py / 2.0;
        for &l in &target.target_links {
            if self.links[l].source == s {
                break;
            }
            y += self.links[l].width + py;
        }
        for &l in &self.nodes[s].source_links {
            if self.links[l].target == t {
                break;
            }
            y -= self.links[l].width;
        }
        y
    }

    fn sort_column(&mut self, ci: usize) {
        let nodes = &self.nodes;
        self.columns[ci].sort_by(|&a, &b| breadth(nodes[a].y0, nodes[b].y0).then(a.cmp(&b)));
    }

    fn resolve_collisions(&mut self, ci: usize, alpha: f64) {
        let column = self.columns[ci].clone();
        if column.is_empty() {
            return;
        }
        let py = self.padding;
        let mid = column.len() >> 1;
        let subject_y0 = self.nodes[column[mid]].y0;
        let subject_y1 = self.nodes[column[mid]].y1;

        if mid > 0 {
            self.collide_bottom_to_top(&column, subject_y0 - py, mid - 1, alpha);
        }
        self.collide_top_to_bottom(&column, subject_y1 + py, mid + 1, alpha);
        self.collide_bottom_to_top(&column, self.extent.y1, column.len() - 1, alpha);
        self.collide_top_to_bottom(&column, self.extent.y0, 0, alpha);
    }

    /// Push overlapping nodes down, starting at `from`.
    fn collide_top_to_bottom(&mut self, column: &[usize], mut y: f64, from: usize, alpha: f64) {
        for &i in column.iter().skip(from) {
            let node = &mut self.nodes[i];
            let dy = (y - node.y0) * alpha;
            if dy > 1e-6 {
                node.y0 += dy;
                node.y1 += dy;
            }
            y = node.y1 + self.padding;
        }
    }

    /// Push overlapping nodes up, starting at `from` and walking upwards.
    fn collide_bottom_to_top(&mut self, column: &[usize], mut y: f64, from: usize, alpha: f64) {
        for &i in column[..=from].iter().rev() {
            let node = &mut self.nodes[i];
            let dy = (node.y1 - y) * alpha;
            if dy > 1e-6 {
                node.y0 -= dy;
                node.y1 -= dy;
            }
            y = node.y0 - self.padding;
        }
    }

    // --- Link ordering ---

    fn sort_source_links(&mut self, n: usize) {
        let mut list = std::mem::take(&mut self.nodes[n].source_links);
        list.sort_by(|&a, &b| {
            let (ta, tb) = (self.links[a].target, self.links[b].target);
            breadth(self.nodes[ta].y0, self.nodes[tb].y0).then(a.cmp(&b))
        });
        self.nodes[n].source_links = list;
    }

    fn sort_target_links(&mut self, n: usize) {
        let mut list = std::mem::take(&mut self.nodes[n].target_links);
        list.sort_by(|&a, &b| {
            let (sa, sb) = (self.links[a].source, self.links[b].source);
            breadth(self.nodes[sa].y0, self.nodes[sb].y0).then(a.cmp(&b))
        });
        self.nodes[n].target_links = list;
    }

    fn reorder_all_links(&mut self) {
        for n in 0..self.nodes.len() {
            self.sort_source_links(n);
            self.sort_target_links(n);
        }
    }

    /// After `n` moved, its neighbours' link stacks may be out of order.
    fn reorder_node_links(&mut self, n: usize) {
        let upstream: Vec<usize> = self.nodes[n]
            .target_links
            .iter()
            .map(|&l| self.links[l].source)
            .collect();
        for s in upstream {
            self.sort_source_links(s);
        }
        let downstream: Vec<usize> = self.nodes[n]
            .source_links
            .iter()
            .map(|&l| self.links[l].target)
            .collect();
        for t in downstream {
            self.sort_target_links(t);
        }
    }

    fn compute_link_breadths(&mut self) {
        for n in 0..self.nodes.len() {
            let (mut y0, mut y1) = (self.nodes[n].y0, self.nodes[n].y0);
            for &l in &self.nodes[n].source_links {
                let link = &mut self.links[l];
                link.y0 = y0 + link.width / 2.0;
                y0 += link.width;
            }
            for &l in &self.nodes[n].target_links {
                let link = &mut self.links[l];
                link.y1 = y1 + link.width / 2.0;
                y1 += link.width;
            }
        }
    }

    fn finish(self) -> SankeyLayout {
        SankeyLayout {
            columns: self.columns.len(),
            nodes: self.nodes,
            links: self.links,
            extent: self.extent,
        }
    }
}

#[inline]
fn breadth(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}
