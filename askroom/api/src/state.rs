use crate::room::Rooms;
use parking_lot::Mutex;
use prometheus::{IntCounter, IntGauge, Registry};

pub struct AppState {
    pub(crate) rooms: Mutex<Rooms>,
    pub(crate) metrics: Metrics,
}

impl AppState {
    pub fn new(registry: &Registry) -> anyhow::Result<Self> {
        Ok(Self {
            rooms: Mutex::new(Rooms::new()),
            metrics: Metrics::register(registry)?,
        })
    }
}

/// Domain metrics of the API.
#[derive(Clone)]
pub(crate) struct Metrics {
    pub(crate) rooms: IntGauge,
    pub(crate) rooms_created: IntCounter,
    pub(crate) questions_published: IntCounter,
    pub(crate) votes_cast: IntCounter,
}

impl Metrics {
    fn register(registry: &Registry) -> Result<Self, prometheus::Error> {
        let rooms = IntGauge::new("askroom_rooms", "Number of open or closed rooms")?;
        let rooms_created = IntCounter::new("askroom_rooms_created_total", "Total number of rooms created")?;
        let questions_published = IntCounter::new(
            "askroom_questions_published_total",
            "Total number of questions published",
        )?;
        let votes_cast = IntCounter::new("askroom_votes_cast_total", "Total number of votes cast")?;

        registry.register(Box::new(rooms.clone()))?;
        registry.register(Box::new(rooms_created.clone()))?;
        registry.register(Box::new(questions_published.clone()))?;
        registry.register(Box::new(votes_cast.clone()))?;

        Ok(Self {
            rooms,
            rooms_created,
            questions_published,
            votes_cast,
        })
    }
}
