//! Visibility gate for the animation loop.
//!
//! The gate owns the pending `requestAnimationFrame` handle. Holding a handle
//! means the loop is running; no handle means it is paused. Intersection
//! events are translated into at most one action each, so repeated signals
//! never cancel twice or schedule a second loop.

/// Whether a frame is currently scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateState {
	/// A frame is scheduled.
	Running,
	/// No frame is scheduled.
	Paused,
}

/// What the caller must do in response to a visibility change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateAction {
	/// Nothing to do.
	Idle,
	/// Cancel this frame handle; the gate has already forgotten it.
	Cancel(i32),
	/// Restart the loop and `arm` the gate with the new handle.
	Resume,
}

/// Owner of the pending animation frame handle.
///
/// Starts paused; the component arms it with the first frame at mount.
#[derive(Clone, Debug, Default)]
pub struct FrameGate {
	handle: Option<i32>,
}

impl FrameGate {
	/// A paused gate with no frame scheduled.
	pub fn new() -> Self {
		Self::default()
	}

	/// Running while a handle is held.
	pub fn state(&self) -> GateState {
		if self.handle.is_some() {
			GateState::Running
		} else {
			GateState::Paused
		}
	}

	/// The pending frame handle, if any.
	pub fn handle(&self) -> Option<i32> {
		self.handle
	}

	/// Record the handle of a freshly scheduled frame.
	pub fn arm(&mut self, handle: i32) {
		self.handle = Some(handle);
	}

	/// Forget the pending frame without cancelling it, e.g. when scheduling
	/// the next one failed.
	pub fn disarm(&mut self) {
		self.handle = None;
	}

	/// Translate an intersection report into an action.
	///
	/// Hiding a running loop yields `Cancel` with the forgotten handle;
	/// showing a paused loop yields `Resume`. Every other combination is
	/// `Idle`, so repeated reports never cancel twice or start a second loop.
	pub fn on_visibility(&mut self, visible: bool) -> GateAction {
		match (visible, self.handle) {
			(true, None) => GateAction::Resume,
			(false, Some(_)) => self.handle.take().map_or(GateAction::Idle, GateAction::Cancel),
			(true, Some(_)) | (false, None) => GateAction::Idle,
		}
	}
}
