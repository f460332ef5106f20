pub mod ace;
pub mod activity;
pub mod class;
pub mod dataset;
pub mod domain;
pub mod loaders;
pub mod record;
pub mod recommendation;
pub mod settings;
pub mod timetable;
pub mod weather;

pub use ace::AcePhase;
pub use activity::ActivityCandidate;
pub use class::ClassInfo;
pub use dataset::WeeklyDataset;
pub use domain::Domain;
pub use loaders::{candidates_for_grade, load_catalog, load_weekly_dataset};
pub use record::LessonRecord;
pub use recommendation::{Recommendation, RecommendationDetail, SlotRecommendation};
pub use settings::{EngineSettings, EventKind, ManualSpecialEvent};
pub use timetable::{TimetableSlot, Weekday, WeeklyTimetable};
pub use weather::{AirQualitySnapshot, PrecipType, WeatherSnapshot};
