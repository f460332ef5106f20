use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 학사 일정 이벤트 종류
///
/// 키워드 탐지와 수동 등록 일정이 공유하는 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// 수업 건너뜀 (운동회, 시험 등)
    #[serde(rename = "skip")]
    Skip,
    /// 일정 조정 (훈련, 조회 등)
    #[serde(rename = "adjust")]
    Adjust,
    /// 실내 수업 강제 (우천, 미세먼지 등)
    #[serde(rename = "indoor")]
    Indoor,
    /// 특별 안내 (체육대회 준비 등)
    #[serde(rename = "special")]
    Special,
}

impl EventKind {
    /// 종류 한글 이름
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Skip => "휴업",
            EventKind::Adjust => "일정 조정",
            EventKind::Indoor => "실내 전환",
            EventKind::Special => "특별 안내",
        }
    }
}

/// 수동 등록 학사 일정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualSpecialEvent {
    /// 일정 날짜
    pub date: NaiveDate,
    /// 이벤트 종류
    pub kind: EventKind,
    /// 표시용 이름 (예: "전교 현장학습")
    pub label: String,
}

/// 추천 엔진 설정
///
/// 교사 설정 화면이 저장하는 값의 스냅샷.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// 점수화 우선순위 (토큰 순서가 곧 적용 순서)
    #[serde(default = "default_priority_order")]
    pub priority_order: Vec<String>,
    /// 현재 사용 가능한 물리 공간
    #[serde(default = "default_available_spaces")]
    pub available_spaces: Vec<String>,
    /// 수동 등록 일정 목록
    #[serde(default)]
    pub manual_special_events: Vec<ManualSpecialEvent>,
}

fn default_priority_order() -> Vec<String> {
    vec![
        "weather".to_string(),
        "continuity".to_string(),
        "space".to_string(),
        "domainBalance".to_string(),
    ]
}

fn default_available_spaces() -> Vec<String> {
    vec![
        "운동장".to_string(),
        "체육관".to_string(),
        "교실".to_string(),
        "강당".to_string(),
    ]
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            priority_order: default_priority_order(),
            available_spaces: default_available_spaces(),
            manual_special_events: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_fill_defaults() {
        let settings: EngineSettings = toml::from_str("").unwrap();
        assert_eq!(settings.priority_order.len(), 4);
        assert_eq!(settings.priority_order[0], "weather");
        assert!(settings.available_spaces.contains(&"운동장".to_string()));
        assert!(settings.manual_special_events.is_empty());
    }

    #[test]
    fn manual_event_parses() {
        let toml_src = r#"
            [[manual_special_events]]
            date = "2026-04-22"
            kind = "skip"
            label = "전교 현장학습"
        "#;
        let settings: EngineSettings = toml::from_str(toml_src).unwrap();
        assert_eq!(settings.manual_special_events.len(), 1);
        assert_eq!(settings.manual_special_events[0].kind, EventKind::Skip);
    }
}
