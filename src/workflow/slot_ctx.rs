//! 시간표 칸 처리 문맥
//!
//! "어느 요일 몇 교시, 어느 학급을 계산 중인가"를 묶어 전달한다.

use chrono::NaiveDate;
use std::fmt::Display;

use crate::models::class::ClassInfo;
use crate::models::timetable::Weekday;

/// 시간표 칸 처리 문맥
///
/// 칸 하나의 추천을 계산하는 데 필요한 문맥 정보 전부.
#[derive(Debug, Clone)]
pub struct SlotCtx {
    /// 대상 학급
    pub class: ClassInfo,

    /// 요일
    pub day: Weekday,

    /// 교시 (1부터 시작)
    pub period: u8,

    /// 칸의 실제 달력 날짜 (수동 일정 대조용)
    pub date: NaiveDate,

    /// 시간표 메모 (키워드 탐지용)
    pub memo: String,
}

impl SlotCtx {
    /// 새 칸 문맥 생성
    pub fn new(
        class: ClassInfo,
        day: Weekday,
        period: u8,
        date: NaiveDate,
        memo: String,
    ) -> Self {
        Self {
            class,
            day,
            period,
            date,
            memo,
        }
    }
}

impl Display for SlotCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} {}교시 {}]",
            self.day.label(),
            self.period,
            self.class.display_name()
        )
    }
}
