//! API 모듈
//!
//! 외부 공공 데이터 API와의 통신을 담당한다

pub mod air_quality;
pub mod weather;

// 자주 쓰는 함수 재노출
pub use air_quality::fetch_air_quality;
pub use weather::fetch_live_weather;
