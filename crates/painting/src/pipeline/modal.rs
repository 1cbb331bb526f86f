//! Modal interaction controller
//!
//! A [`ModalOperator`] is re-entered once per host input event and walks
//! `Idle -> Capturing -> Finalizing -> Committed | Cancelled`. The scene is
//! only mutated on the way into `Committed`.

use glam::Vec2;
use lightpaint_config::PaintConfig;
use lightpaint_ipc::{InputEvent, MouseButton, MouseEvent, OperatorCall, OperatorReport};
use tracing::{debug, info, warn};

use crate::error::LightPaintError;
use crate::projection::ViewTransform;
use crate::scene::Scene;
use crate::types::Stroke;
use crate::validation::validate_point;

use super::{execute, report, OperatorOutcome, StrokeCapture};

/// Where a modal session is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Idle,
    Capturing,
    Finalizing,
    Committed,
    Cancelled,
}

impl ModalPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, ModalPhase::Committed | ModalPhase::Cancelled)
    }
}

/// Input as seen by the controller
#[derive(Debug, Clone, PartialEq)]
pub enum ModalEvent {
    Press(Vec2),
    Move(Vec2),
    Release(Vec2),
    /// A complete recorded path (headless invocation)
    LiteralPath(Vec<Vec2>),
    Cancel,
}

impl ModalEvent {
    /// Translate a host input event. Left button paints; right button and
    /// escape cancel. Anything else is not for us.
    pub fn from_input(event: &InputEvent) -> Option<Self> {
        match event {
            InputEvent::Mouse(MouseEvent::ButtonDown {
                button: MouseButton::Left,
                x,
                y,
            }) => Some(ModalEvent::Press(Vec2::new(*x, *y))),
            InputEvent::Mouse(MouseEvent::ButtonDown {
                button: MouseButton::Right,
                ..
            }) => Some(ModalEvent::Cancel),
            InputEvent::Mouse(MouseEvent::Move { x, y }) => Some(ModalEvent::Move(Vec2::new(*x, *y))),
            InputEvent::Mouse(MouseEvent::ButtonUp {
                button: MouseButton::Left,
                x,
                y,
            }) => Some(ModalEvent::Release(Vec2::new(*x, *y))),
            InputEvent::Keyboard(key) if key.is_escape_press() => Some(ModalEvent::Cancel),
            _ => None,
        }
    }
}

/// One interactive run of an operator
pub struct ModalOperator {
    call: OperatorCall,
    view: ViewTransform,
    config: PaintConfig,
    phase: ModalPhase,
    capture: StrokeCapture,
    outcome: Option<OperatorOutcome>,
    error: Option<LightPaintError>,
}

impl ModalOperator {
    pub fn new(call: OperatorCall, view: ViewTransform, config: PaintConfig) -> Self {
        Self {
            call,
            view,
            config,
            phase: ModalPhase::Idle,
            capture: StrokeCapture::new(),
            outcome: None,
            error: None,
        }
    }

    pub fn call(&self) -> &OperatorCall {
        &self.call
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    /// The committed result, once the session finished
    pub fn outcome(&self) -> Option<&OperatorOutcome> {
        self.outcome.as_ref()
    }

    /// Why the session was cancelled, if an operator failure caused it
    pub fn error(&self) -> Option<&LightPaintError> {
        self.error.as_ref()
    }

    /// Feed one event; returns the phase after handling it
    pub fn on_event<S: Scene + ?Sized>(&mut self, event: ModalEvent, scene: &mut S) -> ModalPhase {
        match (self.phase, event) {
            (phase, _) if phase.is_terminal() => {}
            (ModalPhase::Idle, ModalEvent::Press(p)) => {
                self.capture.begin_stroke(p);
                self.phase = ModalPhase::Capturing;
            }
            (ModalPhase::Capturing, ModalEvent::Move(p)) => self.capture.stroke_to(p),
            (ModalPhase::Capturing, ModalEvent::Release(p)) => {
                self.capture.stroke_to(p);
                let stroke = self.capture.end_stroke().unwrap_or_default();
                self.finalize(Ok(stroke), scene);
            }
            (ModalPhase::Idle, ModalEvent::LiteralPath(points)) => {
                let stroke = points
                    .into_iter()
                    .enumerate()
                    .map(|(index, point)| validate_point(index, point))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Stroke::new)
                    .map_err(LightPaintError::from);
                self.finalize(stroke, scene);
            }
            (ModalPhase::Idle | ModalPhase::Capturing, ModalEvent::Cancel) => {
                debug!("{} cancelled by user", self.call.id());
                self.capture.cancel_stroke();
                self.phase = ModalPhase::Cancelled;
            }
            (phase, event) => debug!("Ignoring {:?} while {:?}", event, phase),
        }
        self.phase
    }

    fn finalize<S: Scene + ?Sized>(&mut self, stroke: Result<Stroke, LightPaintError>, scene: &mut S) {
        self.phase = ModalPhase::Finalizing;
        let result = stroke.and_then(|stroke| execute(&self.call, &stroke, &self.view, scene, &self.config));
        match result {
            Ok(outcome) => {
                info!("{} committed {}", self.call.id(), outcome.name());
                self.outcome = Some(outcome);
                self.phase = ModalPhase::Committed;
            }
            Err(err) => {
                warn!("{} failed: {}", self.call.id(), err);
                self.error = Some(err);
                self.phase = ModalPhase::Cancelled;
            }
        }
    }

    /// Host-facing report, once the session reached a terminal phase
    pub fn report(&self) -> Option<OperatorReport> {
        match (self.phase, &self.outcome, &self.error) {
            (ModalPhase::Committed, Some(outcome), _) => Some(report(&self.call, &Ok(outcome.clone()))),
            (ModalPhase::Cancelled, _, Some(err)) => Some(OperatorReport::Cancelled {
                operator: self.call.id(),
                code: err.code().to_string(),
                message: err.to_string(),
            }),
            (ModalPhase::Cancelled, _, None) => Some(OperatorReport::Cancelled {
                operator: self.call.id(),
                code: "cancelled".to_string(),
                message: "Cancelled by user".to_string(),
            }),
            _ => None,
        }
    }
}
