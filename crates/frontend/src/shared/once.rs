use std::sync::atomic::{AtomicBool, Ordering};

/// Runs a setup closure at most once per instance.
///
/// Used for app-lifetime DOM listeners that live outside any component.
#[derive(Debug, Default)]
pub struct AttachOnce {
    attached: AtomicBool,
}

impl AttachOnce {
    pub const fn new() -> Self {
        Self {
            attached: AtomicBool::new(false),
        }
    }

    /// Runs `setup` if nothing was attached yet; returns whether it ran.
    pub fn attach(&self, setup: impl FnOnce()) -> bool {
        if self.attached.swap(true, Ordering::AcqRel) {
            return false;
        }
        setup();
        true
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn repeated_loads_attach_a_single_listener() {
        let guard = AttachOnce::new();
        let listeners = Cell::new(0);
        for _ in 0..3 {
            guard.attach(|| listeners.set(listeners.get() + 1));
        }
        assert_eq!(listeners.get(), 1);
        assert!(guard.is_attached());
    }
}
