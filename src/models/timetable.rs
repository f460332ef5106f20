use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::class::ClassInfo;

/// 요일 열거형 (주 5일제 수업 기준)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Weekday {
    #[serde(rename = "mon")]
    Mon,
    #[serde(rename = "tue")]
    Tue,
    #[serde(rename = "wed")]
    Wed,
    #[serde(rename = "thu")]
    Thu,
    #[serde(rename = "fri")]
    Fri,
}

impl Weekday {
    /// 월~금 고정 순서
    pub const ALL: [Weekday; 5] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ];

    /// 요일 코드 (주간 뷰의 키로 사용)
    pub fn code(self) -> &'static str {
        match self {
            Weekday::Mon => "mon",
            Weekday::Tue => "tue",
            Weekday::Wed => "wed",
            Weekday::Thu => "thu",
            Weekday::Fri => "fri",
        }
    }

    /// 한글 요일 이름
    pub fn label(self) -> &'static str {
        match self {
            Weekday::Mon => "월",
            Weekday::Tue => "화",
            Weekday::Wed => "수",
            Weekday::Thu => "목",
            Weekday::Fri => "금",
        }
    }

    /// 코드 문자열에서 해석
    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "mon" => Some(Weekday::Mon),
            "tue" => Some(Weekday::Tue),
            "wed" => Some(Weekday::Wed),
            "thu" => Some(Weekday::Thu),
            "fri" => Some(Weekday::Fri),
            _ => None,
        }
    }

    /// 주 시작일(월요일)로부터의 날짜 오프셋
    pub fn offset_days(self) -> i64 {
        match self {
            Weekday::Mon => 0,
            Weekday::Tue => 1,
            Weekday::Wed => 2,
            Weekday::Thu => 3,
            Weekday::Fri => 4,
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 시간표 한 칸 (요일 × 교시)
///
/// 한 주 분량의 읽기 전용 스냅샷. 메모는 학사 일정 키워드 탐지에 쓰인다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableSlot {
    /// 요일
    pub day: Weekday,
    /// 교시 (1부터 시작)
    pub period: u8,
    /// 배정된 학급 ID (비어 있으면 미배정)
    #[serde(default)]
    pub class_id: Option<String>,
    /// 자유 텍스트 메모
    #[serde(default)]
    pub memo: String,
}

/// 한 주 시간표
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyTimetable {
    /// 주 시작일 (월요일)
    pub week_start: NaiveDate,
    /// 학급 목록
    #[serde(default)]
    pub classes: Vec<ClassInfo>,
    /// 배정된 칸 목록
    #[serde(default)]
    pub slots: Vec<TimetableSlot>,
}

impl WeeklyTimetable {
    /// 해당 요일의 실제 달력 날짜
    pub fn date_of(&self, day: Weekday) -> NaiveDate {
        self.week_start + Duration::days(day.offset_days())
    }

    /// 해당 요일의 칸들을 교시 순으로 반환
    pub fn slots_for(&self, day: Weekday) -> Vec<&TimetableSlot> {
        let mut slots: Vec<&TimetableSlot> =
            self.slots.iter().filter(|s| s.day == day).collect();
        slots.sort_by_key(|s| s.period);
        slots
    }

    /// 학급 ID로 학급 정보 조회
    pub fn class_by_id(&self, class_id: &str) -> Option<&ClassInfo> {
        self.classes.iter().find(|c| c.id == class_id)
    }
}
