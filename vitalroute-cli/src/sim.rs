//! Scripted drive used as the demo position source.
//!
//! Emits a deterministic fix pattern: a starting fix, then for every hop a
//! jitter-sized wobble followed by a significant move due north. The wobbles
//! exercise the significance gate; the hops drive facility refreshes.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use vitalroute::geo::GeoPoint;
use vitalroute::position::{
    LocationSample, PositionError, PositionEvent, PositionSource, WatchOptions,
};

/// Ground meters per degree of latitude.
const METERS_PER_DEGREE_LAT: f64 = 111_194.93;

/// Wobble size in meters, small enough to be held by any sensible
/// significance threshold.
const JITTER_METERS: f64 = 5.0;

/// Deterministic drive: `steps` hops of `step_meters` due north of `start`.
#[derive(Debug, Clone)]
pub struct ScriptedDrive {
    start: GeoPoint,
    steps: u32,
    step_meters: f64,
    interval: Duration,
}

impl ScriptedDrive {
    pub fn new(start: GeoPoint, steps: u32, step_meters: f64, interval: Duration) -> Self {
        Self {
            start,
            steps,
            step_meters,
            interval,
        }
    }
}

impl PositionSource for ScriptedDrive {
    fn subscribe(
        &self,
        _options: WatchOptions,
    ) -> Result<mpsc::Receiver<PositionEvent>, PositionError> {
        let (tx, rx) = mpsc::channel(32);
        let drive = self.clone();

        tokio::spawn(async move {
            let step_degrees = drive.step_meters / METERS_PER_DEGREE_LAT;
            let jitter_degrees = JITTER_METERS / METERS_PER_DEGREE_LAT;

            if send_fix(&tx, drive.start).await.is_err() {
                return;
            }

            for step in 1..=drive.steps {
                let reached = drive.start.latitude + f64::from(step - 1) * step_degrees;

                tokio::time::sleep(drive.interval / 2).await;
                let Ok(wobble) = GeoPoint::new(reached + jitter_degrees, drive.start.longitude)
                else {
                    debug!(step, "Scripted drive left the coordinate range, stopping");
                    return;
                };
                if send_fix(&tx, wobble).await.is_err() {
                    return;
                }

                tokio::time::sleep(drive.interval / 2).await;
                let Ok(hop) = GeoPoint::new(reached + step_degrees, drive.start.longitude) else {
                    debug!(step, "Scripted drive left the coordinate range, stopping");
                    return;
                };
                if send_fix(&tx, hop).await.is_err() {
                    return;
                }
            }

            debug!(steps = drive.steps, "Scripted drive complete");
        });

        Ok(rx)
    }
}

async fn send_fix(
    tx: &mpsc::Sender<PositionEvent>,
    point: GeoPoint,
) -> Result<(), mpsc::error::SendError<PositionEvent>> {
    tx.send(PositionEvent::Fix(LocationSample::new(point))).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latitudes(events: Vec<PositionEvent>) -> Vec<f64> {
        events
            .into_iter()
            .map(|event| match event {
                PositionEvent::Fix(sample) => sample.point.latitude,
                PositionEvent::Failure(err) => panic!("unexpected failure: {err}"),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_drive_emits_start_then_wobble_hop_pairs() {
        let start = GeoPoint::new(17.385044, 78.486671).unwrap();
        let drive = ScriptedDrive::new(start, 2, 150.0, Duration::from_millis(10));

        let mut rx = drive.subscribe(WatchOptions::default()).unwrap();
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }

        // start + 2 * (wobble, hop)
        assert_eq!(events.len(), 5);
        let lats = latitudes(events);
        assert_eq!(lats[0], start.latitude);
        // wobble stays near the last hop, each hop advances ~150 m north
        assert!((lats[1] - lats[0]) * METERS_PER_DEGREE_LAT < 10.0);
        assert!((lats[2] - lats[0]) * METERS_PER_DEGREE_LAT > 140.0);
        assert!((lats[3] - lats[2]) * METERS_PER_DEGREE_LAT < 10.0);
        assert!((lats[4] - lats[2]) * METERS_PER_DEGREE_LAT > 140.0);
    }

    #[tokio::test]
    async fn test_drive_with_zero_steps_emits_only_the_start() {
        let start = GeoPoint::new(17.385044, 78.486671).unwrap();
        let drive = ScriptedDrive::new(start, 0, 120.0, Duration::from_millis(10));

        let mut rx = drive.subscribe(WatchOptions::default()).unwrap();
        let mut count = 0;
        while rx.recv().await.is_some() {
            count += 1;
        }
        assert_eq!(count, 1);
    }
}
