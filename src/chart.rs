// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! SVG rendering for the category bar chart and the monthly line chart.

use crate::report::{CategoryTotal, MonthTotal};
use anyhow::{Context, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use svg::node::element::{Circle, Line, Polyline, Rectangle, Text};
use svg::{node, Document};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 480.0;
const MARGIN: f64 = 60.0;
const BAR_COLOR: &str = "steelblue";
const LINE_COLOR: &str = "darkorange";

struct Frame {
    ymax: f64,
}

impl Frame {
    fn new(values: &[f64]) -> Self {
        let ymax = values.iter().cloned().fold(0.0, f64::max);
        Frame {
            ymax: if ymax > 0.0 { ymax } else { 1.0 },
        }
    }

    fn plot_width(&self) -> f64 {
        WIDTH - 2.0 * MARGIN
    }

    fn plot_height(&self) -> f64 {
        HEIGHT - 2.0 * MARGIN
    }

    fn y(&self, v: f64) -> f64 {
        HEIGHT - MARGIN - v.max(0.0) / self.ymax * self.plot_height()
    }
}

fn to_f64(d: &Decimal) -> f64 {
    d.to_f64().unwrap_or_default()
}

fn label(x: f64, y: f64, content: &str) -> Text {
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("font-size", 12)
        .set("font-family", "sans-serif")
        .add(node::Text::new(content))
}

/// Rotated x-axis tick label, anchored at its end like a slanted caption.
fn tick(x: f64, content: &str) -> Text {
    let y = HEIGHT - MARGIN + 14.0;
    label(x, y, content)
        .set("text-anchor", "end")
        .set("transform", format!("rotate(-45 {} {})", x, y))
}

fn axes(doc: Document, title: &str, frame: &Frame) -> Document {
    let x_axis = Line::new()
        .set("x1", MARGIN)
        .set("x2", WIDTH - MARGIN)
        .set("y1", HEIGHT - MARGIN)
        .set("y2", HEIGHT - MARGIN)
        .set("stroke", "black")
        .set("stroke-width", 1.5);
    let y_axis = Line::new()
        .set("x1", MARGIN)
        .set("x2", MARGIN)
        .set("y1", MARGIN)
        .set("y2", HEIGHT - MARGIN)
        .set("stroke", "black")
        .set("stroke-width", 1.5);
    doc.add(x_axis)
        .add(y_axis)
        .add(label(MARGIN, MARGIN / 2.0, title).set("font-size", 16))
        .add(label(4.0, MARGIN + 4.0, &format!("{:.0}", frame.ymax)))
        .add(label(4.0, HEIGHT - MARGIN, "0"))
}

fn blank(title: &str, frame: &Frame) -> Document {
    let doc = Document::new()
        .set("viewBox", (0.0, 0.0, WIDTH, HEIGHT))
        .set("width", WIDTH)
        .set("height", HEIGHT);
    axes(doc, title, frame)
}

pub fn category_bars(data: &[CategoryTotal], base: &str) -> Document {
    let values: Vec<f64> = data.iter().map(|c| to_f64(&c.total)).collect();
    let frame = Frame::new(&values);
    let title = format!("Spending by category ({})", base);
    let slot = frame.plot_width() / data.len().max(1) as f64;
    data.iter()
        .zip(&values)
        .enumerate()
        .fold(blank(&title, &frame), |doc, (i, (cat, v))| {
            let x = MARGIN + i as f64 * slot;
            let top = frame.y(*v);
            let bar = Rectangle::new()
                .set("x", x + slot * 0.1)
                .set("y", top)
                .set("width", slot * 0.8)
                .set("height", HEIGHT - MARGIN - top)
                .set("fill", BAR_COLOR);
            doc.add(bar).add(tick(x + slot / 2.0, &cat.category))
        })
}

pub fn monthly_line(data: &[MonthTotal], base: &str) -> Document {
    let values: Vec<f64> = data.iter().map(|m| to_f64(&m.total)).collect();
    let frame = Frame::new(&values);
    let title = format!("Spending per month ({})", base);
    let step = if data.len() > 1 {
        frame.plot_width() / (data.len() - 1) as f64
    } else {
        0.0
    };
    let x_at = |i: usize| {
        if data.len() > 1 {
            MARGIN + i as f64 * step
        } else {
            WIDTH / 2.0
        }
    };
    let points = values
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{:.1},{:.1}", x_at(i), frame.y(*v)))
        .collect::<Vec<_>>()
        .join(" ");
    let line = Polyline::new()
        .set("points", points)
        .set("fill", "none")
        .set("stroke", LINE_COLOR)
        .set("stroke-width", 2);
    data.iter()
        .zip(&values)
        .enumerate()
        .fold(blank(&title, &frame).add(line), |doc, (i, (m, v))| {
            let marker = Circle::new()
                .set("cx", x_at(i))
                .set("cy", frame.y(*v))
                .set("r", 4)
                .set("fill", LINE_COLOR);
            doc.add(marker).add(tick(x_at(i), &m.month))
        })
}

pub fn save(doc: &Document, path: &Path) -> Result<()> {
    fs::write(path, doc.to_string())
        .with_context(|| format!("Failed to write chart to {}", path.display()))
}
