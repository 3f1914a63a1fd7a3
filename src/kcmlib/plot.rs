use crate::kcmlib::{CandidateScore, ClusterConfig, ModelSnapshot, Result};
use ndarray::{ArrayView1, Axis};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Colors handed out to clusters by index, wrapping around
pub const PALETTE: [&str; 10] = [
    "red", "blue", "green", "orange", "purple", "brown", "pink", "gray", "olive", "cyan",
];

pub fn cluster_color(idx: usize) -> &'static str {
    PALETTE[idx % PALETTE.len()]
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PlotCenter {
    pub x: f64,
    pub y: f64,
    pub color: &'static str,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub label: Option<usize>,
    pub color: Option<&'static str>,
}

/// Everything a renderer needs to draw the published model in 2-D
#[derive(Serialize, Debug, Clone)]
pub struct PlotData<'a> {
    pub config: &'a ClusterConfig,
    pub clusters: usize,
    pub entropy: f64,
    pub candidates: &'a [CandidateScore],
    pub centers: Vec<PlotCenter>,
    pub points: Vec<PlotPoint>,
}

/// First two coordinates; one-dimensional data gets y = 0
fn project(values: ArrayView1<f64>) -> (f64, f64) {
    let x = values.get(0).copied().unwrap_or(0.0);
    let y = values.get(1).copied().unwrap_or(0.0);
    (x, y)
}

impl<'a> PlotData<'a> {
    pub fn new(
        model: &ModelSnapshot,
        config: &'a ClusterConfig,
        candidates: &'a [CandidateScore],
    ) -> Self {
        let centers = model
            .centers
            .axis_iter(Axis(0))
            .enumerate()
            .map(|(i, row)| {
                let (x, y) = project(row);
                PlotCenter {
                    x,
                    y,
                    color: cluster_color(i),
                }
            })
            .collect();

        let points = model
            .points
            .points()
            .iter()
            .map(|p| {
                let (x, y) = project(p.values().view());
                PlotPoint {
                    x,
                    y,
                    label: p.label,
                    color: p.label.map(cluster_color),
                }
            })
            .collect();

        Self {
            config,
            clusters: model.c,
            entropy: model.entropy,
            candidates,
            centers,
            points,
        }
    }
}

pub struct PlotWriter {
    writer: Box<dyn Write>,
}

impl PlotWriter {
    /// Write to `out_path`, or stdout when no path is given
    pub fn new(out_path: &Option<impl AsRef<Path>>) -> Result<Self> {
        let writer: Box<dyn Write> = match out_path {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(BufWriter::new(std::io::stdout())),
        };
        Ok(Self { writer })
    }

    pub fn from_writer(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }

    pub fn write(&mut self, data: &PlotData) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, data)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
