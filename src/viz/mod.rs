use std::io::{self, Write};

use crate::neural::layer::LayerData;

/// Snapshot of a network handed to a [`Visualizer`].
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkReport {
    pub class_name: String,
    pub input: Vec<f64>,
    /// `(name, output)` per registered layer, in registration order.
    pub layers: Vec<(String, LayerData)>,
}

impl NetworkReport {
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

/// Any sink that can show a network dump.
pub trait Visualizer {
    fn render(&mut self, report: &NetworkReport) -> io::Result<()>;
}

/// Plain-text dump to any writer.
pub struct TextVisualizer<W: Write> {
    out: W,
}

impl TextVisualizer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TextVisualizer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Visualizer for TextVisualizer<W> {
    fn render(&mut self, report: &NetworkReport) -> io::Result<()> {
        writeln!(self.out, "Class: {}", report.class_name)?;
        writeln!(self.out, "Total layers: {}", report.layer_count())?;
        writeln!(self.out, "Input data: {:?}\n", report.input)?;
        for (name, data) in &report.layers {
            writeln!(self.out, "Layer: {name}")?;
            writeln!(self.out, "Layer data: {data}\n")?;
        }
        self.out.flush()
    }
}
