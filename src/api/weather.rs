//! 기상청 API 모듈
//!
//! 초단기실황(getUltraSrtNcst)을 조회해 날씨 스냅샷을 만든다.
//! 응답에 빠진 항목은 스냅샷의 방어적 기본값으로 남는다.

use chrono::{NaiveDateTime, Timelike};
use regex::Regex;
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::weather::{PrecipType, WeatherSnapshot};

/// 빈도 제한 시 최대 재시도 횟수
const MAX_RETRIES: usize = 3;
/// 재시도 대기 시간 (초)
const RETRY_WAIT_SECS: u64 = 2;

/// 실황 날씨 조회 (재시도 포함)
///
/// # 인자
/// - `config`: 서비스 키와 격자 좌표가 담긴 설정
///
/// # 반환
/// 날씨 스냅샷 (응답에 없는 항목은 기본값)
pub async fn fetch_live_weather(config: &Config) -> AppResult<WeatherSnapshot> {
    let endpoint = format!("{}/getUltraSrtNcst", config.weather_api_base_url);
    let (base_date, base_time) = latest_base_datetime(chrono::Local::now().naive_local());

    debug!("기상청 실황 조회: {} {} ({}, {})", base_date, base_time, config.weather_nx, config.weather_ny);

    let client = reqwest::Client::new();
    let nx = config.weather_nx.to_string();
    let ny = config.weather_ny.to_string();

    for retry_count in 0..MAX_RETRIES {
        let response = client
            .get(&endpoint)
            .query(&[
                ("serviceKey", config.weather_service_key.as_str()),
                ("pageNo", "1"),
                ("numOfRows", "100"),
                ("dataType", "JSON"),
                ("base_date", base_date.as_str()),
                ("base_time", base_time.as_str()),
                ("nx", nx.as_str()),
                ("ny", ny.as_str()),
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
                "기상청 API 요청 빈도 제한 (시도 {}/{}), {}초 후 재시도...",
                retry_count + 1,
                MAX_RETRIES,
                RETRY_WAIT_SECS
            );
            sleep(Duration::from_secs(RETRY_WAIT_SECS)).await;
            continue;
        }

        let result_code = header_result_code(&body);
        if result_code.as_deref() != Some("00") {
            return Err(AppError::Api(ApiError::BadResponse {
                endpoint,
                code: result_code,
                message: header_result_message(&body),
            }));
        }

        let items = extract_items(&body);
        return Ok(snapshot_from_items(&items));
    }

    Err(AppError::Api(ApiError::RateLimited {
        endpoint,
        retries: MAX_RETRIES,
    }))
}

// ========== 보조 함수 ==========

/// 조회에 쓸 최신 발표 기준 시각
///
/// 실황은 매시 40분께 발표되므로 그 전에는 한 시간 전 자료를 쓴다.
fn latest_base_datetime(now: NaiveDateTime) -> (String, String) {
    let base = if now.minute() < 40 {
        now - chrono::Duration::hours(1)
    } else {
        now
    };
    (
        base.format("%Y%m%d").to_string(),
        format!("{:02}00", base.hour()),
    )
}

/// 빈도 제한 응답인지 확인 (공공데이터포털 resultCode 22)
fn is_rate_limited(body: &Value) -> bool {
    header_result_code(body).as_deref() == Some("22")
}

fn header_result_code(body: &Value) -> Option<String> {
    body.pointer("/response/header/resultCode")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

fn header_result_message(body: &Value) -> Option<String> {
    body.pointer("/response/header/resultMsg")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// 응답에서 관측 항목 배열 추출
fn extract_items(body: &Value) -> Vec<Value> {
    body.pointer("/response/body/items/item")
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default()
}

/// 관측값 문자열에서 숫자 추출
///
/// "20.3" 같은 값 외에 "1.5mm", "강수없음" 같은 꼴도 들어오므로
/// 앞쪽 숫자만 관대하게 뽑는다.
fn parse_observation_value(value: &str) -> Option<f64> {
    let re = Regex::new(r"-?\d+(\.\d+)?").ok()?;
    re.find(value)?.as_str().parse().ok()
}

/// 관측 항목 목록으로 날씨 스냅샷 구성
fn snapshot_from_items(items: &[Value]) -> WeatherSnapshot {
    let mut snapshot = WeatherSnapshot::default();

    for item in items {
        let (Some(category), Some(value)) = (
            item.get("category").and_then(|v| v.as_str()),
            item.get("obsrValue").and_then(|v| v.as_str()),
        ) else {
            continue;
        };

        match category {
            "T1H" => {
                if let Some(v) = parse_observation_value(value) {
                    snapshot.temperature = v;
                }
            }
            "PTY" => {
                if let Some(v) = parse_observation_value(value) {
                    snapshot.pty = PrecipType::from_code(v as u8);
                }
            }
            "REH" => {
                if let Some(v) = parse_observation_value(value) {
                    snapshot.humidity = v;
                }
            }
            _ => {}
        }
    }

    snapshot
}
