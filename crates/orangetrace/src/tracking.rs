//! # Order Tracking Projector
//!
//! Turns an order's creation time and status into a five-step delivery timeline. Nothing
//! is persisted: the timeline is recomputed on every request.
//!
//! ```text
//! Order Confirmed → Shipped → In Transit → Out for Delivery → Delivered
//!  created_at      next day   +4..=7 h     next day           +2..=5 h
//!                  09:00-12:00             08:00-10:00
//! ```
//!
//! Steps up to the current status are completed and carry a concrete time; later steps
//! show "Estimated by <date>", one day after the last completed step.
//!
//! The time-of-day jitter comes from an injected random source. [`TrackingProjector::steps`]
//! seeds a [`StdRng`] from the projector's seed (for orders, folded from the order id's bytes), so
//! the same order always projects the same timeline and a completed step keeps its time as
//! the order moves on.

use crate::model::{Order, OrderId, OrderStatus};
use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, NaiveTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use uuid::Uuid;

pub const CARRIER: &str = "OrangeTrace Express";
pub const ORIGIN: &str = "Nagpur, MH";
const DEFAULT_CITY: &str = "Destination";

const TIMESTAMP_FORMAT: &str = "%-d %B %Y, %-I:%M %P";
const DATE_FORMAT: &str = "%-d %B %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrackingStage {
    #[serde(rename = "Order Confirmed")]
    OrderConfirmed,
    Shipped,
    #[serde(rename = "In Transit")]
    InTransit,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    Delivered,
}

impl TrackingStage {
    pub const ALL: [TrackingStage; 5] = [
        TrackingStage::OrderConfirmed,
        TrackingStage::Shipped,
        TrackingStage::InTransit,
        TrackingStage::OutForDelivery,
        TrackingStage::Delivered,
    ];

    fn location(self, city: &str) -> String {
        match self {
            TrackingStage::OrderConfirmed => "Nagpur, Maharashtra".to_string(),
            TrackingStage::Shipped => "Nagpur Hub, Maharashtra".to_string(),
            TrackingStage::InTransit => "Mumbai Airport, Maharashtra".to_string(),
            TrackingStage::OutForDelivery | TrackingStage::Delivered => {
                format!("{city}, Maharashtra")
            }
        }
    }

    /// When this stage happens, given when the previous one did.
    fn after<R: Rng>(self, previous: NaiveDateTime, rng: &mut R) -> NaiveDateTime {
        match self {
            TrackingStage::OrderConfirmed => previous,
            TrackingStage::Shipped => next_day_between(previous, 9, 12, rng),
            TrackingStage::InTransit => previous + Duration::hours(rng.gen_range(4..=7)),
            TrackingStage::OutForDelivery => next_day_between(previous, 8, 10, rng),
            TrackingStage::Delivered => previous + Duration::hours(rng.gen_range(2..=5)),
        }
    }
}

/// The following day at a random minute in `[start_hour:00, end_hour:00)`.
fn next_day_between<R: Rng>(
    previous: NaiveDateTime,
    start_hour: i64,
    end_hour: i64,
    rng: &mut R,
) -> NaiveDateTime {
    let midnight = previous.date().and_time(NaiveTime::default());
    midnight
        + Duration::days(1)
        + Duration::hours(rng.gen_range(start_hour..end_hour))
        + Duration::minutes(rng.gen_range(0..60))
}

/// One entry of the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingStep {
    pub status: TrackingStage,
    pub location: String,
    /// Display label: a formatted time, "Estimated by ..." or "Cancelled".
    pub timestamp: String,
    /// Concrete time in the display offset; only set on completed steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<NaiveDateTime>,
    pub is_completed: bool,
}

/// Projects the timeline of one order.
#[derive(Debug, Clone)]
pub struct TrackingProjector {
    created_at: NaiveDateTime,
    status: OrderStatus,
    city: String,
    seed: u64,
}

impl TrackingProjector {
    /// `created_at` is already in the display offset.
    pub fn new(created_at: NaiveDateTime, status: OrderStatus) -> Self {
        Self {
            created_at,
            status,
            city: DEFAULT_CITY.to_string(),
            seed: 0,
        }
    }

    /// Projector for a stored order, seeded from its id.
    pub fn for_order(order: &Order, offset: FixedOffset) -> Self {
        Self::new(local_time(order.created_at, offset), order.status)
            .with_destination(&order.delivery_address.city)
            .with_seed(order_seed(&order.id))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// City used for the last two stages. Blank keeps the default.
    pub fn with_destination(mut self, city: &str) -> Self {
        if !city.trim().is_empty() {
            self.city = city.trim().to_string();
        }
        self
    }

    /// How many leading stages are completed for the current status.
    pub fn completed_through(&self) -> usize {
        match self.status {
            OrderStatus::Placed | OrderStatus::Cancelled => 1,
            OrderStatus::Shipped => 2,
            OrderStatus::Delivered => TrackingStage::ALL.len(),
        }
    }

    /// The timeline with jitter from the projector's seed. Calling it again restarts the
    /// same sequence.
    pub fn steps(&self) -> TimelineSteps<StdRng> {
        self.steps_with_rng(StdRng::seed_from_u64(self.seed))
    }

    /// The timeline with jitter drawn from `rng`.
    pub fn steps_with_rng<R: Rng>(&self, rng: R) -> TimelineSteps<R> {
        TimelineSteps {
            rng,
            stages: TrackingStage::ALL.into_iter(),
            index: 0,
            completed_through: self.completed_through(),
            cancelled: self.status == OrderStatus::Cancelled,
            city: self.city.clone(),
            cursor: self.created_at,
            last_completed: self.created_at,
        }
    }
}

/// Lazy iterator over the five timeline steps.
pub struct TimelineSteps<R> {
    rng: R,
    stages: std::array::IntoIter<TrackingStage, 5>,
    index: usize,
    completed_through: usize,
    cancelled: bool,
    city: String,
    cursor: NaiveDateTime,
    last_completed: NaiveDateTime,
}

impl<R: Rng> Iterator for TimelineSteps<R> {
    type Item = TrackingStep;

    fn next(&mut self) -> Option<TrackingStep> {
        let stage = self.stages.next()?;
        // Times are drawn for every stage so completed times don't shift as status advances.
        self.cursor = stage.after(self.cursor, &mut self.rng);
        let is_completed = self.index < self.completed_through;
        self.index += 1;

        let (timestamp, occurred_at) = if is_completed {
            self.last_completed = self.cursor;
            (self.cursor.format(TIMESTAMP_FORMAT).to_string(), Some(self.cursor))
        } else if self.cancelled {
            ("Cancelled".to_string(), None)
        } else {
            let estimate = self.last_completed.date() + Duration::days(1);
            (format!("Estimated by {}", estimate.format(DATE_FORMAT)), None)
        };

        Some(TrackingStep {
            status: stage,
            location: stage.location(&self.city),
            timestamp,
            occurred_at,
            is_completed,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stages.size_hint()
    }
}

/// Shipment summary shown above the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingSummary {
    pub tracking_number: String,
    pub carrier: String,
    pub estimated_delivery: String,
    pub shipping_address: String,
    pub origin: String,
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingDetails {
    pub order_details: TrackingSummary,
    pub tracking_history: Vec<TrackingStep>,
}

fn local_time(at: DateTime<Utc>, offset: FixedOffset) -> NaiveDateTime {
    at.with_timezone(&offset).naive_local()
}

/// Summary plus timeline for `order`, with times shown in `offset`.
pub fn tracking_details(order: &Order, offset: FixedOffset) -> TrackingDetails {
    let address = &order.delivery_address;
    let estimated = local_time(order.created_at, offset).date() + Duration::days(2);

    TrackingDetails {
        order_details: TrackingSummary {
            tracking_number: order.id.to_string(),
            carrier: CARRIER.to_string(),
            estimated_delivery: estimated.format(DATE_FORMAT).to_string(),
            shipping_address: address.formatted(),
            origin: ORIGIN.to_string(),
            destination: format!("{}, {}", address.city, address.state),
        },
        tracking_history: TrackingProjector::for_order(order, offset).steps().collect(),
    }
}

/// Seed for an order's timeline. Only depends on the id's bytes, so it stays fixed across
/// builds.
fn order_seed(id: &OrderId) -> u64 {
    match Uuid::parse_str(&id.0) {
        Ok(uuid) => {
            let bits = u128::from_be_bytes(*uuid.as_bytes());
            (bits >> 64) as u64 ^ bits as u64
        }
        // FNV-1a
        Err(_) => id.0.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, 0, 0))
            .unwrap()
    }

    #[test]
    fn placed_order_has_one_completed_step() {
        let steps: Vec<_> = TrackingProjector::new(at(2024, 1, 10, 10), OrderStatus::Placed)
            .steps()
            .collect();

        assert_eq!(steps.len(), 5);
        assert_eq!(steps.iter().filter(|s| s.is_completed).count(), 1);
        assert_eq!(steps[0].timestamp, "10 January 2024, 10:00 am");
        for step in &steps[1..] {
            assert_eq!(step.timestamp, "Estimated by 11 January 2024");
            assert!(step.occurred_at.is_none());
        }
    }

    #[test]
    fn delivered_order_completes_every_step() {
        let steps: Vec<_> = TrackingProjector::new(at(2024, 1, 10, 10), OrderStatus::Delivered)
            .with_seed(7)
            .steps()
            .collect();
        assert!(steps.iter().all(|s| s.is_completed && s.occurred_at.is_some()));
    }

    #[test]
    fn shipped_order_matches_expected_timeline() {
        let created = at(2024, 1, 10, 10);
        let steps: Vec<_> = TrackingProjector::new(created, OrderStatus::Shipped)
            .with_seed(42)
            .steps()
            .collect();

        let confirmed = steps[0].occurred_at.unwrap();
        let shipped = steps[1].occurred_at.unwrap();
        assert!(confirmed >= created);
        assert_eq!(shipped.date(), NaiveDate::from_ymd_opt(2024, 1, 11).unwrap());
        assert!((9..12).contains(&shipped.hour()));

        let estimate = format!(
            "Estimated by {}",
            (shipped.date() + Duration::days(1)).format(DATE_FORMAT)
        );
        for step in &steps[2..] {
            assert!(!step.is_completed);
            assert!(step.occurred_at.is_none());
            assert_eq!(step.timestamp, estimate);
        }
    }

    #[test]
    fn offsets_stay_within_their_windows() {
        for seed in 0..50 {
            let steps: Vec<_> = TrackingProjector::new(at(2024, 3, 31, 23), OrderStatus::Delivered)
                .with_seed(seed)
                .steps()
                .collect();
            let times: Vec<_> = steps.iter().map(|s| s.occurred_at.unwrap()).collect();

            assert_eq!(times[1].date(), NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
            assert!((9..12).contains(&times[1].hour()));
            let transit = times[2] - times[1];
            assert!(transit >= Duration::hours(4) && transit <= Duration::hours(7));
            assert_eq!(times[3].date(), times[2].date() + Duration::days(1));
            assert!((8..10).contains(&times[3].hour()));
            let last_mile = times[4] - times[3];
            assert!(last_mile >= Duration::hours(2) && last_mile <= Duration::hours(5));
        }
    }

    #[test]
    fn timeline_is_restartable_and_stable_across_status() {
        let created = at(2024, 1, 10, 10);
        let shipped = TrackingProjector::new(created, OrderStatus::Shipped).with_seed(9);
        let first: Vec<_> = shipped.steps().collect();
        let again: Vec<_> = shipped.steps().collect();
        assert_eq!(first, again);

        let delivered: Vec<_> = TrackingProjector::new(created, OrderStatus::Delivered)
            .with_seed(9)
            .steps()
            .collect();
        assert_eq!(first[1].occurred_at, delivered[1].occurred_at);
    }

    #[test]
    fn cancelled_order_stops_after_confirmation() {
        let steps: Vec<_> = TrackingProjector::new(at(2024, 1, 10, 10), OrderStatus::Cancelled)
            .steps()
            .collect();
        assert!(steps[0].is_completed);
        assert!(steps[1..]
            .iter()
            .all(|s| !s.is_completed && s.timestamp == "Cancelled"));
    }

    #[test]
    fn injected_rng_drives_jitter() {
        let projector = TrackingProjector::new(at(2024, 1, 10, 10), OrderStatus::Delivered);
        let a: Vec<_> = projector.steps_with_rng(StdRng::seed_from_u64(1)).collect();
        let b: Vec<_> = projector.steps_with_rng(StdRng::seed_from_u64(1)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn order_seed_is_fixed_by_the_id() {
        assert_eq!(order_seed(&"00000000000000000000000000000001".into()), 1);
        assert_eq!(
            order_seed(&"0000000000000001000000000000000f".into()),
            1 ^ 0xf
        );
        assert_eq!(order_seed(&"".into()), 0xcbf2_9ce4_8422_2325);
        assert_ne!(order_seed(&"legacy-42".into()), order_seed(&"legacy-43".into()));
    }

    #[test]
    fn destination_city_labels_last_mile() {
        let steps: Vec<_> = TrackingProjector::new(at(2024, 1, 10, 10), OrderStatus::Placed)
            .with_destination("Pune")
            .steps()
            .collect();
        assert_eq!(steps[0].location, "Nagpur, Maharashtra");
        assert_eq!(steps[3].location, "Pune, Maharashtra");
        assert_eq!(steps[4].location, "Pune, Maharashtra");

        let unnamed: Vec<_> = TrackingProjector::new(at(2024, 1, 10, 10), OrderStatus::Placed)
            .with_destination("  ")
            .steps()
            .collect();
        assert_eq!(unnamed[4].location, "Destination, Maharashtra");
    }
}
