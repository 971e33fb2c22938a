use std::ops::{Deref, Range};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};

use crate::core::SeriesPoint;
use crate::core::notify::RedrawSignal;
use crate::core::windowing::{window_bounds, y_extent};
use crate::error::{ChartError, ChartResult};

/// Consistent view over one published version of a series.
///
/// Holding a window keeps that version alive even if a writer publishes a
/// newer one meanwhile.
#[derive(Debug, Clone)]
pub struct Window<P> {
    snapshot: Arc<[P]>,
    range: Range<usize>,
}

impl<P> Window<P> {
    #[must_use]
    pub fn as_slice(&self) -> &[P] {
        &self.snapshot[self.range.clone()]
    }

    /// Index of the first windowed point inside the full snapshot.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.range.start
    }
}

impl<P> Deref for Window<P> {
    type Target = [P];

    fn deref(&self) -> &[P] {
        self.as_slice()
    }
}

/// Ordered, append-only point storage with copy-on-write publication.
///
/// Writers build a complete replacement sequence and swap the shared `Arc`;
/// readers clone the current `Arc` and never observe a partial write. The
/// stored sequence is non-decreasing in x at all times.
#[derive(Debug)]
pub struct DataSeries<P: SeriesPoint> {
    values: RwLock<Arc<[P]>>,
    writer: Mutex<()>,
    hosts: Mutex<Vec<Weak<RedrawSignal>>>,
}

impl<P: SeriesPoint> Default for DataSeries<P> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<P: SeriesPoint> DataSeries<P> {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            values: RwLock::new(Arc::from(Vec::new())),
            writer: Mutex::new(()),
            hosts: Mutex::new(Vec::new()),
        }
    }

    /// Creates a store from an initial sequence that must be ascending in x.
    pub fn new(points: Vec<P>) -> ChartResult<Self> {
        check_value_order(&points)?;
        Ok(Self {
            values: RwLock::new(Arc::from(points)),
            writer: Mutex::new(()),
            hosts: Mutex::new(Vec::new()),
        })
    }

    /// Current published sequence.
    #[must_use]
    pub fn snapshot(&self) -> Arc<[P]> {
        Arc::clone(&self.values.read())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends one point.
    ///
    /// Fails with `ChartError::Ordering` when `point.x` is smaller than the
    /// last stored x, and with `ChartError::InvalidData` for a non-finite x or
    /// y. With `max_count`, the oldest points are dropped so at
    /// most `max_count` remain. Attached hosts are notified, and asked to
    /// scroll to the end when `scroll_to_end` is set.
    pub fn append(&self, point: P, scroll_to_end: bool, max_count: Option<usize>) -> ChartResult<()> {
        check_point_finite(&point)?;
        if max_count == Some(0) {
            return Err(ChartError::InvalidArgument(
                "max count must be > 0".to_owned(),
            ));
        }

        let _guard = self.writer.lock();
        let current = self.snapshot();
        if let Some(last) = current.last()
            && point.x() < last.x()
        {
            return Err(ChartError::Ordering {
                previous_x: last.x(),
                offending_x: point.x(),
            });
        }

        let keep_from = match max_count {
            Some(max) if current.len() + 1 > max => current.len() + 1 - max,
            _ => 0,
        };
        let mut next = Vec::with_capacity(current.len() + 1 - keep_from);
        next.extend_from_slice(&current[keep_from..]);
        next.push(point);

        let count = next.len();
        *self.values.write() = Arc::from(next);
        trace!(count, evicted = keep_from, "append series point");

        self.notify_hosts(scroll_to_end);
        Ok(())
    }

    /// Atomically replaces the whole sequence.
    ///
    /// The replacement is validated first; on failure the previous sequence
    /// stays published.
    pub fn reset(&self, points: Vec<P>) -> ChartResult<()> {
        check_value_order(&points)?;
        let _guard = self.writer.lock();
        let count = points.len();
        *self.values.write() = Arc::from(points);
        debug!(count, "reset series data");
        self.notify_hosts(false);
        Ok(())
    }

    /// Points relevant to the viewport `[start, start + size]`, including one
    /// boundary point on each side. `size == 0` returns everything.
    #[must_use]
    pub fn windowed_values(&self, start: f64, size: f64) -> Window<P> {
        let snapshot = self.snapshot();
        let range = window_bounds(&snapshot, start, size);
        Window { snapshot, range }
    }

    /// Smallest `y_low` over the window; `None` when the window is empty.
    #[must_use]
    pub fn min_y(&self, start: f64, size: f64) -> Option<f64> {
        self.y_extent(start, size).map(|(min, _)| min)
    }

    /// Largest `y_high` over the window; `None` when the window is empty.
    #[must_use]
    pub fn max_y(&self, start: f64, size: f64) -> Option<f64> {
        self.y_extent(start, size).map(|(_, max)| max)
    }

    #[must_use]
    pub fn y_extent(&self, start: f64, size: f64) -> Option<(f64, f64)> {
        y_extent(&self.windowed_values(start, size))
    }

    /// First and last x of the stored sequence (its x extrema).
    #[must_use]
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        let snapshot = self.snapshot();
        match (snapshot.first(), snapshot.last()) {
            (Some(first), Some(last)) => Some((first.x(), last.x())),
            _ => None,
        }
    }

    /// Registers a host signal. Only a weak reference is kept.
    pub fn attach(&self, signal: &Arc<RedrawSignal>) {
        let mut hosts = self.hosts.lock();
        hosts.retain(|host| host.strong_count() > 0);
        if !hosts
            .iter()
            .any(|host| std::ptr::eq(host.as_ptr(), Arc::as_ptr(signal)))
        {
            hosts.push(Arc::downgrade(signal));
        }
    }

    pub fn detach(&self, signal: &Arc<RedrawSignal>) {
        self.hosts.lock().retain(|host| {
            host.strong_count() > 0 && !std::ptr::eq(host.as_ptr(), Arc::as_ptr(signal))
        });
    }

    #[must_use]
    pub fn is_attached(&self, signal: &Arc<RedrawSignal>) -> bool {
        self.hosts.lock().iter().any(|host| {
            host.strong_count() > 0 && std::ptr::eq(host.as_ptr(), Arc::as_ptr(signal))
        })
    }

    #[must_use]
    pub fn attached_host_count(&self) -> usize {
        self.hosts
            .lock()
            .iter()
            .filter(|host| host.strong_count() > 0)
            .count()
    }

    fn notify_hosts(&self, scroll_to_end: bool) {
        let hosts = self.hosts.lock();
        for host in hosts.iter().filter_map(Weak::upgrade) {
            if scroll_to_end {
                host.request_scroll_to_end();
            } else {
                host.request_redraw();
            }
        }
    }
}

/// Verifies that `points` is non-decreasing in x and every value is finite.
pub fn check_value_order<P: SeriesPoint>(points: &[P]) -> ChartResult<()> {
    points.iter().try_for_each(check_point_finite)?;
    if let Some(pair) = points.windows(2).find(|pair| pair[0].x() > pair[1].x()) {
        return Err(ChartError::Ordering {
            previous_x: pair[0].x(),
            offending_x: pair[1].x(),
        });
    }
    Ok(())
}

fn check_point_finite<P: SeriesPoint>(point: &P) -> ChartResult<()> {
    if !point.x().is_finite() {
        return Err(ChartError::InvalidData(format!(
            "x-values must be finite, got {}",
            point.x()
        )));
    }
    if !point.y().is_finite() || !point.y_low().is_finite() || !point.y_high().is_finite() {
        return Err(ChartError::InvalidData(format!(
            "y-values must be finite, got {} at x = {}",
            point.y(),
            point.x()
        )));
    }
    Ok(())
}
