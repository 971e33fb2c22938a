use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Shared change counter between a chart host and the series attached to it.
///
/// Series only ever hold a `Weak` reference, so a dropped host silently stops
/// receiving notifications. Multiple bumps between two renders collapse into
/// one pending redraw.
#[derive(Debug, Default)]
pub struct RedrawSignal {
    version: AtomicU64,
    scroll_to_end: AtomicBool,
}

impl RedrawSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current version. Any change to attached data increments it.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    pub fn request_redraw(&self) {
        self.version.fetch_add(1, Ordering::AcqRel);
    }

    /// Requests a redraw that also scrolls the host viewport to the data end.
    pub fn request_scroll_to_end(&self) {
        self.scroll_to_end.store(true, Ordering::Release);
        self.request_redraw();
    }

    /// Consumes a pending scroll request.
    pub fn take_scroll_to_end(&self) -> bool {
        self.scroll_to_end.swap(false, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::RedrawSignal;

    #[test]
    fn scroll_request_is_consumed_once() {
        let signal = RedrawSignal::new();
        let before = signal.version();
        signal.request_scroll_to_end();
        assert!(signal.version() > before);
        assert!(signal.take_scroll_to_end());
        assert!(!signal.take_scroll_to_end());
    }
}
