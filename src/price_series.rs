use crate::{Candle, TimePoint};

use tracing::{debug, warn};

/// Builds the full price series from candles.
///
/// Output is one `(open_time, close)` point per distinct open time, sorted
/// ascending. Candles with a non-finite close are dropped and logged. When
/// several candles share an open time the later one in input order wins,
/// as a repainted bar replaces the one before it.
///
/// Empty input yields an empty series.
///
/// # Example
///
/// ```
/// use quantedge_overlay::{Kline, TimePoint, price_series};
///
/// let candles = [Kline::new(2, 20.0), Kline::new(1, 10.0), Kline::new(2, 21.0)];
///
/// assert_eq!(
///     price_series(&candles),
///     [TimePoint::new(1, 10.0), TimePoint::new(2, 21.0)],
/// );
/// ```
#[must_use]
pub fn price_series<C: Candle>(candles: &[C]) -> Vec<TimePoint> {
    let mut points: Vec<TimePoint> = candles
        .iter()
        .enumerate()
        .filter_map(|(index, candle)| {
            let close = candle.close();
            if close.is_finite() {
                Some(TimePoint::new(candle.open_time(), close))
            } else {
                warn!(index, open_time = candle.open_time(), close, "dropping candle with invalid close");
                None
            }
        })
        .collect();

    // Stable: equal open times keep input order for the collapse below.
    points.sort_by_key(TimePoint::timestamp);

    let mut series: Vec<TimePoint> = Vec::with_capacity(points.len());
    for point in points {
        match series.last_mut() {
            Some(last) if last.timestamp() == point.timestamp() => *last = point,
            _ => series.push(point),
        }
    }

    debug!(candles = candles.len(), points = series.len(), "built price series");

    series
}
