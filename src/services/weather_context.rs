//! 야외 수업 적합도 판정 - 업무 능력 계층
//!
//! 날씨/대기질 실황 한 쌍을 받아 3단계 적합도와 사용 불가 공간을
//! 계산한다. 입력이 일부 비어 있어도 실패하지 않는다(모델 단계에서
//! 방어적 기본값이 채워진다).

use serde::Serialize;

use crate::models::weather::{AirQualitySnapshot, WeatherSnapshot};

/// PM10 "나쁨" 기준 (µg/m³, 초과 시 야외 비권장)
pub const PM10_BAD_THRESHOLD: f64 = 80.0;
/// PM10 "보통~나쁨" 기준 (µg/m³, 초과 시 주의)
pub const PM10_CAUTION_THRESHOLD: f64 = 50.0;
/// 야외 수업 가능 최저 기온 (°C)
pub const TEMP_MIN: f64 = -5.0;
/// 야외 수업 가능 최고 기온 (°C)
pub const TEMP_MAX: f64 = 33.0;

/// 운동장 공간 이름
pub const OUTDOOR_SPACE: &str = "운동장";

/// 야외 수업 적합도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutdoorStatus {
    /// 야외 수업 최적
    #[serde(rename = "optimal")]
    Optimal,
    /// 야외 수업 주의
    #[serde(rename = "caution")]
    Caution,
    /// 야외 수업 비권장
    #[serde(rename = "not-recommended")]
    NotRecommended,
}

impl OutdoorStatus {
    /// 상태 코드 문자열
    pub fn code(self) -> &'static str {
        match self {
            OutdoorStatus::Optimal => "optimal",
            OutdoorStatus::Caution => "caution",
            OutdoorStatus::NotRecommended => "not-recommended",
        }
    }

    /// 표시용 한글 문구
    pub fn text(self) -> &'static str {
        match self {
            OutdoorStatus::Optimal => "야외 수업 최적",
            OutdoorStatus::Caution => "야외 수업 주의",
            OutdoorStatus::NotRecommended => "야외 수업 비권장",
        }
    }

    /// 표시용 색상 (HEX)
    pub fn color(self) -> &'static str {
        match self {
            OutdoorStatus::Optimal => "#2E7D32",
            OutdoorStatus::Caution => "#F9A825",
            OutdoorStatus::NotRecommended => "#C62828",
        }
    }

    /// 야외 활동에 불리한 상태인지 (주의 이상)
    pub fn is_unfavorable(self) -> bool {
        self != OutdoorStatus::Optimal
    }
}

/// 개별 검사 결과 (UI 표시용)
#[derive(Debug, Clone, Serialize)]
pub struct WeatherCheck {
    /// 검사 이름
    pub name: &'static str,
    /// 통과 여부
    pub passed: bool,
    /// 검사 당시 값 설명
    pub detail: String,
}

/// 판정 결과
#[derive(Debug, Clone, Serialize)]
pub struct WeatherContext {
    /// 적합도 상태
    pub status: OutdoorStatus,
    /// 표시용 문구
    pub text: String,
    /// 표시용 색상
    pub color: String,
    /// 상태 원인 (최적이면 None)
    pub reason: Option<String>,
    /// 개별 검사 내역
    pub checks: Vec<WeatherCheck>,
}

/// 날씨/대기질 실황으로 야외 수업 적합도 판정
///
/// 검사는 엄격한 우선순위로 평가하며 먼저 실패한 검사가 결과를 정한다:
/// 강수 → PM10 나쁨 → 기온 범위 → PM10 보통~나쁨 → 최적.
pub fn resolve(weather: &WeatherSnapshot, air: &AirQualitySnapshot) -> WeatherContext {
    let precip_ok = !weather.pty.is_precipitating();
    let pm10_ok = air.pm10_value <= PM10_BAD_THRESHOLD;
    let temp_ok = (TEMP_MIN..=TEMP_MAX).contains(&weather.temperature);
    let pm10_moderate_ok = air.pm10_value <= PM10_CAUTION_THRESHOLD;

    let checks = vec![
        WeatherCheck {
            name: "강수",
            passed: precip_ok,
            detail: weather.pty.label().to_string(),
        },
        WeatherCheck {
            name: "미세먼지 나쁨",
            passed: pm10_ok,
            detail: format!("PM10 {:.0}µg/m³", air.pm10_value),
        },
        WeatherCheck {
            name: "기온",
            passed: temp_ok,
            detail: format!("{:.1}°C", weather.temperature),
        },
        WeatherCheck {
            name: "미세먼지 보통~나쁨",
            passed: pm10_moderate_ok,
            detail: format!("PM10 {:.0}µg/m³", air.pm10_value),
        },
    ];

    let (status, reason) = if !precip_ok {
        (
            OutdoorStatus::NotRecommended,
            Some(weather.pty.label().to_string()),
        )
    } else if !pm10_ok {
        (OutdoorStatus::NotRecommended, Some("미세먼지 나쁨".to_string()))
    } else if !temp_ok {
        let reason = if weather.temperature < TEMP_MIN {
            "기온이 너무 낮음"
        } else {
            "기온이 너무 높음"
        };
        (OutdoorStatus::NotRecommended, Some(reason.to_string()))
    } else if !pm10_moderate_ok {
        (
            OutdoorStatus::Caution,
            Some("미세먼지 보통~나쁨 수준".to_string()),
        )
    } else {
        (OutdoorStatus::Optimal, None)
    };

    WeatherContext {
        status,
        text: status.text().to_string(),
        color: status.color().to_string(),
        reason,
        checks,
    }
}

// 운동장 제한을 걸던 구 버전 상태 코드. 현재 판정기는
// optimal/caution/not-recommended만 내므로 일치하는 경우가 없고,
// 날씨에 의한 운동장 제한은 사실상 동작하지 않는다.
// TODO: 비권장(not-recommended)에도 운동장을 제한할지 제품 결정 필요.
const RESTRICTED_STATUS_CODE: &str = "bad";

/// 판정 결과에 따라 사용 불가가 되는 공간 목록
pub fn restricted_spaces(ctx: &WeatherContext) -> Vec<String> {
    if ctx.status.code() == RESTRICTED_STATUS_CODE {
        vec![OUTDOOR_SPACE.to_string()]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::weather::PrecipType;

    fn weather(temperature: f64, pty: PrecipType) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature,
            pty,
            ..Default::default()
        }
    }

    fn air(pm10_value: f64) -> AirQualitySnapshot {
        AirQualitySnapshot {
            pm10_value,
            ..Default::default()
        }
    }

    #[test]
    fn clear_day_is_optimal() {
        let ctx = resolve(&weather(22.0, PrecipType::None), &air(30.0));
        assert_eq!(ctx.status, OutdoorStatus::Optimal);
        assert!(ctx.reason.is_none());
        assert!(ctx.checks.iter().all(|c| c.passed));
    }

    #[test]
    fn precipitation_wins_over_everything() {
        // 비가 오면 미세먼지가 아무리 나빠도 원인은 강수여야 한다
        let ctx = resolve(&weather(22.0, PrecipType::Rain), &air(150.0));
        assert_eq!(ctx.status, OutdoorStatus::NotRecommended);
        assert_eq!(ctx.reason.as_deref(), Some("비"));
    }

    #[test]
    fn pm10_bad_wins_over_temperature() {
        let ctx = resolve(&weather(38.0, PrecipType::None), &air(95.0));
        assert_eq!(ctx.status, OutdoorStatus::NotRecommended);
        assert_eq!(ctx.reason.as_deref(), Some("미세먼지 나쁨"));
    }

    #[test]
    fn temperature_out_of_range() {
        let cold = resolve(&weather(-10.0, PrecipType::None), &air(20.0));
        assert_eq!(cold.status, OutdoorStatus::NotRecommended);
        assert_eq!(cold.reason.as_deref(), Some("기온이 너무 낮음"));

        let hot = resolve(&weather(35.0, PrecipType::None), &air(20.0));
        assert_eq!(hot.status, OutdoorStatus::NotRecommended);
        assert_eq!(hot.reason.as_deref(), Some("기온이 너무 높음"));

        let edge = resolve(&weather(33.0, PrecipType::None), &air(20.0));
        assert_eq!(edge.status, OutdoorStatus::Optimal);
    }

    #[test]
    fn moderate_pm10_is_caution() {
        let ctx = resolve(&weather(20.0, PrecipType::None), &air(65.0));
        assert_eq!(ctx.status, OutdoorStatus::Caution);
        assert_eq!(ctx.reason.as_deref(), Some("미세먼지 보통~나쁨 수준"));
    }

    #[test]
    fn checks_record_every_test_even_after_first_failure() {
        let ctx = resolve(&weather(-10.0, PrecipType::Rain), &air(95.0));
        assert_eq!(ctx.checks.len(), 4);
        assert!(!ctx.checks[0].passed); // 강수
        assert!(!ctx.checks[1].passed); // PM10 나쁨
        assert!(!ctx.checks[2].passed); // 기온
    }

    #[test]
    fn restriction_path_is_inert_for_all_statuses() {
        // 판정기가 내는 어떤 상태에서도 날씨만으로는 공간 제한이 걸리지 않는다
        for (temp, pty, pm10) in [
            (20.0, PrecipType::None, 20.0),
            (20.0, PrecipType::None, 65.0),
            (20.0, PrecipType::Rain, 20.0),
        ] {
            let ctx = resolve(&weather(temp, pty), &air(pm10));
            assert!(restricted_spaces(&ctx).is_empty());
        }
    }

    #[test]
    fn default_snapshots_are_optimal() {
        let ctx = resolve(&WeatherSnapshot::default(), &AirQualitySnapshot::default());
        assert_eq!(ctx.status, OutdoorStatus::Optimal);
    }
}
