pub mod ai_enhancer;
pub mod candidate_scorer;
pub mod domain_balance;
pub mod special_event;
pub mod weather_context;

pub use ai_enhancer::{AiEnhancer, AiError};
pub use candidate_scorer::{
    allowed_spaces, parse_priority_order, rank, rationale, Priority, ScoreContext,
    ScoredCandidate,
};
pub use domain_balance::{aggregate, DomainBalance};
pub use special_event::{detect, detect_keyword, detect_manual, SpecialEvent};
pub use weather_context::{
    resolve, restricted_spaces, OutdoorStatus, WeatherCheck, WeatherContext,
};
