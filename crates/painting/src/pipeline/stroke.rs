//! Live stroke capture for modal painting sessions

use glam::Vec2;
use tracing::{debug, warn};

use crate::types::Stroke;
use crate::validation::validate_point;

/// Accumulates screen samples between button press and release
#[derive(Debug, Clone, Default)]
pub struct StrokeCapture {
    points: Vec<Vec2>,
    stroking: bool,
}

impl StrokeCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a stroke at `start`, discarding any previous samples
    pub fn begin_stroke(&mut self, start: Vec2) {
        self.points.clear();
        self.stroking = true;
        self.push(start);
    }

    /// Continue the current stroke
    pub fn stroke_to(&mut self, point: Vec2) {
        if !self.stroking {
            debug!("stroke_to: no active stroke, ignoring");
            return;
        }
        self.push(point);
    }

    /// End the current stroke and hand over the samples
    pub fn end_stroke(&mut self) -> Option<Stroke> {
        if !self.stroking {
            return None;
        }
        self.stroking = false;
        let stroke = Stroke::new(std::mem::take(&mut self.points));
        debug!("Captured stroke with {} points", stroke.len());
        Some(stroke)
    }

    /// Abort the current stroke, dropping its samples
    pub fn cancel_stroke(&mut self) {
        self.points.clear();
        self.stroking = false;
    }

    /// Check if a stroke is currently in progress
    pub fn is_stroking(&self) -> bool {
        self.stroking
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn push(&mut self, point: Vec2) {
        match validate_point(self.points.len(), point) {
            Ok(point) => self.points.push(point),
            Err(err) => warn!("Skipping stroke sample: {}", err),
        }
    }
}
