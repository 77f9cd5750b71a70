//! One-shot gate that keeps the first foreground return after a launch from resolving a login.

// std
use std::sync::atomic::{AtomicBool, Ordering};
// self
use crate::_prelude::*;

/// Tracks whether the next foreground return belongs to the launch itself.
///
/// Hosts see a foreground event right after handing off to the browser. That event must
/// not be read as "the user came back", otherwise a redirect arriving moments later loses
/// the race to a spurious "no response".
#[derive(Default)]
pub struct ForegroundGate {
	armed: AtomicBool,
}
impl ForegroundGate {
	/// Arms the gate right after a launch.
	pub fn arm(&self) {
		self.armed.store(true, Ordering::SeqCst);
	}

	/// Disarms the gate without consuming a foreground event.
	pub fn disarm(&self) {
		self.armed.store(false, Ordering::SeqCst);
	}

	/// Consumes a foreground return; true when it was the suppressed one.
	pub fn suppress_once(&self) -> bool {
		self.armed.swap(false, Ordering::SeqCst)
	}

	/// Returns true while the next foreground return would be suppressed.
	pub fn is_armed(&self) -> bool {
		self.armed.load(Ordering::SeqCst)
	}
}
impl Debug for ForegroundGate {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ForegroundGate").field("armed", &self.is_armed()).finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn gate_suppresses_exactly_once_per_arm() {
		let gate = ForegroundGate::default();

		assert!(!gate.suppress_once());

		gate.arm();

		assert!(gate.suppress_once());
		assert!(!gate.suppress_once());

		gate.arm();
		gate.disarm();

		assert!(!gate.is_armed());
	}
}
