use serde::{Deserialize, Serialize};

/// 강수 형태 (기상청 초단기실황 PTY 코드 기준)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PrecipType {
    /// 0 - 강수 없음
    #[default]
    #[serde(rename = "none")]
    None,
    /// 1 - 비
    #[serde(rename = "rain")]
    Rain,
    /// 2 - 비/눈
    #[serde(rename = "rain_snow")]
    RainSnow,
    /// 3 - 눈
    #[serde(rename = "snow")]
    Snow,
    /// 4 - 소나기
    #[serde(rename = "shower")]
    Shower,
    /// 5 - 빗방울
    #[serde(rename = "drizzle")]
    Drizzle,
    /// 6 - 빗방울눈날림
    #[serde(rename = "drizzle_snow")]
    DrizzleSnow,
    /// 7 - 눈날림
    #[serde(rename = "flurry")]
    Flurry,
}

impl PrecipType {
    /// PTY 코드에서 해석 (알 수 없는 코드는 강수 없음 처리)
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => PrecipType::Rain,
            2 => PrecipType::RainSnow,
            3 => PrecipType::Snow,
            4 => PrecipType::Shower,
            5 => PrecipType::Drizzle,
            6 => PrecipType::DrizzleSnow,
            7 => PrecipType::Flurry,
            _ => PrecipType::None,
        }
    }

    /// 강수가 있는 상태인지
    pub fn is_precipitating(self) -> bool {
        self != PrecipType::None
    }

    /// 한글 강수 라벨
    pub fn label(self) -> &'static str {
        match self {
            PrecipType::None => "강수 없음",
            PrecipType::Rain => "비",
            PrecipType::RainSnow => "비/눈",
            PrecipType::Snow => "눈",
            PrecipType::Shower => "소나기",
            PrecipType::Drizzle => "빗방울",
            PrecipType::DrizzleSnow => "빗방울눈날림",
            PrecipType::Flurry => "눈날림",
        }
    }
}

/// 날씨 실황 스냅샷
///
/// 외부에서 시간 단위로 갱신해 공급한다. 일부 값이 빠져도 추천이
/// 멈추지 않도록 모든 필드에 방어적 기본값을 둔다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// 기온 (°C)
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// 강수 형태
    #[serde(default)]
    pub pty: PrecipType,
    /// 습도 (%)
    #[serde(default = "default_humidity")]
    pub humidity: f64,
    /// 강수 확률 (%)
    #[serde(default)]
    pub pop: f64,
}

fn default_temperature() -> f64 {
    20.0
}

fn default_humidity() -> f64 {
    50.0
}

impl Default for WeatherSnapshot {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            pty: PrecipType::None,
            humidity: default_humidity(),
            pop: 0.0,
        }
    }
}

/// 대기질 실황 스냅샷
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualitySnapshot {
    /// PM10 농도 (µg/m³)
    #[serde(default = "default_pm10_value")]
    pub pm10_value: f64,
    /// PM10 등급 (1 좋음 ~ 4 매우나쁨)
    #[serde(default = "default_grade")]
    pub pm10_grade: u8,
    /// PM2.5 농도 (µg/m³)
    #[serde(default = "default_pm25_value")]
    pub pm25_value: f64,
    /// PM2.5 등급
    #[serde(default = "default_grade")]
    pub pm25_grade: u8,
}

fn default_pm10_value() -> f64 {
    20.0
}

fn default_pm25_value() -> f64 {
    10.0
}

fn default_grade() -> u8 {
    1
}

impl Default for AirQualitySnapshot {
    fn default() -> Self {
        Self {
            pm10_value: default_pm10_value(),
            pm10_grade: default_grade(),
            pm25_value: default_pm25_value(),
            pm25_grade: default_grade(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_weather_fills_defaults() {
        let snapshot: WeatherSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot.temperature, 20.0);
        assert_eq!(snapshot.pty, PrecipType::None);
        assert_eq!(snapshot.humidity, 50.0);
        assert_eq!(snapshot.pop, 0.0);
    }

    #[test]
    fn partial_air_quality_fills_defaults() {
        let snapshot: AirQualitySnapshot =
            serde_json::from_str(r#"{"pm10_value": 95.0}"#).unwrap();
        assert_eq!(snapshot.pm10_value, 95.0);
        assert_eq!(snapshot.pm10_grade, 1);
        assert_eq!(snapshot.pm25_value, 10.0);
    }

    #[test]
    fn pty_code_mapping() {
        assert_eq!(PrecipType::from_code(0), PrecipType::None);
        assert_eq!(PrecipType::from_code(1), PrecipType::Rain);
        assert_eq!(PrecipType::from_code(4), PrecipType::Shower);
        assert_eq!(PrecipType::from_code(99), PrecipType::None);
        assert!(PrecipType::Rain.is_precipitating());
        assert!(!PrecipType::None.is_precipitating());
    }
}
