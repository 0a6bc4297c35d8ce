//! PPT invariant system: build-time invariant enforcement with contract
//! tracking.
//!
//! Assertions here run at graph-construction and wiring boundaries only.
//! They are never called from the per-tick `evaluate` loop.

#[cfg(feature = "ppt")]
use lazy_static::lazy_static;
#[cfg(feature = "ppt")]
use std::collections::HashSet;
#[cfg(feature = "ppt")]
use std::sync::Mutex;

/// Node registration is append-only; ids equal list position forever.
pub const REGISTRATION_APPEND_ONLY: u32 = 1;
/// Connect/disconnect only accept handles allocated by this graph.
pub const BINDING_TARGETS_LIVE: u32 = 2;
/// A freshly allocated input reads its own zero-valued default cell.
pub const DEFAULT_ISOLATION: u32 = 3;
/// Time step and sample rate stay positive and finite.
pub const TIMING_POSITIVE: u32 = 4;
/// A noise node's sampling range is non-empty.
pub const NOISE_RANGE_NONEMPTY: u32 = 5;

#[cfg(feature = "ppt")]
lazy_static! {
    static ref INVARIANT_LOG: Mutex<HashSet<u32>> = Mutex::new(HashSet::new());
}

#[cfg(feature = "ppt")]
/// Assert an invariant: records that it was enforced and panics on failure.
pub fn assert_invariant(id: u32, condition: bool, message: &str, context: Option<&str>) {
    if !condition {
        match context {
            Some(ctx) => panic!("Invariant {} failed: {} (context: {})", id, message, ctx),
            None => panic!("Invariant {} failed: {}", id, message),
        }
    }
    INVARIANT_LOG.lock().unwrap().insert(id);
}

#[cfg(not(feature = "ppt"))]
/// Assert an invariant: checks the condition and panics on failure.
pub fn assert_invariant(_id: u32, condition: bool, message: &str, _context: Option<&str>) {
    if !condition {
        panic!("Invariant failed: {}", message);
    }
}

#[cfg(feature = "ppt")]
/// Contract test: checks that the named invariants were asserted at least
/// once since the log was last cleared.
pub fn contract_test(test_name: &str, required_invariants: &[u32]) {
    let log = INVARIANT_LOG.lock().unwrap();
    let missing: Vec<u32> = required_invariants
        .iter()
        .copied()
        .filter(|inv| !log.contains(inv))
        .collect();
    drop(log);
    if !missing.is_empty() {
        panic!(
            "Contract test '{}' failed: invariants not enforced: {:?}",
            test_name, missing
        );
    }
}

#[cfg(not(feature = "ppt"))]
/// Contract test: no-op when the PPT feature is disabled.
pub fn contract_test(_test_name: &str, _required_invariants: &[u32]) {}

#[cfg(feature = "ppt")]
/// Clear the invariant log (between test runs).
pub fn clear_invariant_log() {
    INVARIANT_LOG.lock().unwrap().clear();
}

#[cfg(not(feature = "ppt"))]
/// Clear the invariant log: no-op when the PPT feature is disabled.
pub fn clear_invariant_log() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assert_invariant_passes_on_true() {
        clear_invariant_log();
        assert_invariant(TIMING_POSITIVE, 1.0 > 0.0, "positive", Some("unit"));
    }

    #[test]
    #[should_panic]
    fn assert_invariant_panics_on_false() {
        assert_invariant(TIMING_POSITIVE, false, "deliberately false", None);
    }

    #[test]
    fn contract_sees_enforced_invariants() {
        clear_invariant_log();
        assert_invariant(BINDING_TARGETS_LIVE, true, "ok", None);
        contract_test("binding contract", &[BINDING_TARGETS_LIVE]);
    }
}
