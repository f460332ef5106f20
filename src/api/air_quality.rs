//! 에어코리아 API 모듈
//!
//! 측정소 실시간 농도(getMsrstnAcctoRltmMesureDnsty)를 조회해
//! 대기질 스냅샷을 만든다. 통신 장애 값("-")은 기본값으로 남는다.

use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::weather::AirQualitySnapshot;

/// 빈도 제한 시 최대 재시도 횟수
const MAX_RETRIES: usize = 3;
/// 재시도 대기 시간 (초)
const RETRY_WAIT_SECS: u64 = 2;

/// 측정소 실시간 대기질 조회 (재시도 포함)
///
/// # 인자
/// - `config`: 서비스 키와 측정소 이름이 담긴 설정
///
/// # 반환
/// 대기질 스냅샷 (결측 항목은 기본값)
pub async fn fetch_air_quality(config: &Config) -> AppResult<AirQualitySnapshot> {
    let endpoint = format!("{}/getMsrstnAcctoRltmMesureDnsty", config.air_api_base_url);

    debug!("에어코리아 실시간 조회: {}", config.air_station_name);

    let client = reqwest::Client::new();

    for retry_count in 0..MAX_RETRIES {
        let response = client
            .get(&endpoint)
            .query(&[
                ("serviceKey", config.weather_service_key.as_str()),
                ("returnType", "json"),
                ("stationName", config.air_station_name.as_str()),
                ("dataTerm", "DAILY"),
                ("numOfRows", "1"),
                ("pageNo", "1"),
                ("ver", "1.3"),
            ])
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::api_request_failed(&endpoint, e))?;

        if is_rate_limited(&body) {
            warn!(
                "에어코리아 API 요청 빈도 제한 (시도 {}/{}), {}초 후 재시도...",
                retry_count + 1,
                MAX_RETRIES,
                RETRY_WAIT_SECS
            );
            sleep(Duration::from_secs(RETRY_WAIT_SECS)).await;
            continue;
        }

        let result_code = body
            .pointer("/response/header/resultCode")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());
        if result_code.as_deref() != Some("00") {
            return Err(AppError::Api(ApiError::BadResponse {
                endpoint,
                code: result_code,
                message: body
                    .pointer("/response/header/resultMsg")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string()),
            }));
        }

        let first_item = body
            .pointer("/response/body/items/0")
            .cloned()
            .unwrap_or(Value::Null);
        return Ok(snapshot_from_item(&first_item));
    }

    Err(AppError::Api(ApiError::RateLimited {
        endpoint,
        retries: MAX_RETRIES,
    }))
}

// ========== 보조 함수 ==========

/// 빈도 제한 응답인지 확인 (공공데이터포털 resultCode 22)
fn is_rate_limited(body: &Value) -> bool {
    body.pointer("/response/header/resultCode")
        .and_then(|v| v.as_str())
        == Some("22")
}

/// 측정 항목 하나로 대기질 스냅샷 구성
///
/// 측정값은 문자열이고 통신 장애면 "-"가 온다. 숫자로 읽히지 않는
/// 항목은 기본값 그대로 둔다.
fn snapshot_from_item(item: &Value) -> AirQualitySnapshot {
    let mut snapshot = AirQualitySnapshot::default();

    let numeric_field = |name: &str| -> Option<f64> {
        item.get(name)?.as_str()?.trim().parse().ok()
    };
    let grade_field = |name: &str| -> Option<u8> {
        item.get(name)?.as_str()?.trim().parse().ok()
    };

    if let Some(v) = numeric_field("pm10Value") {
        snapshot.pm10_value = v;
    }
    if let Some(v) = grade_field("pm10Grade") {
        snapshot.pm10_grade = v;
    }
    if let Some(v) = numeric_field("pm25Value") {
        snapshot.pm25_value = v;
    }
    if let Some(v) = grade_field("pm25Grade") {
        snapshot.pm25_grade = v;
    }

    snapshot
}
