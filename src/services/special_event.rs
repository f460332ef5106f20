//! 학사 일정 이벤트 탐지 - 업무 능력 계층
//!
//! 시간표 메모의 키워드와 수동 등록 일정에서 수업을 건너뛰거나
//! 조정해야 하는 상황을 찾아낸다.

use chrono::NaiveDate;

use crate::models::settings::{EventKind, ManualSpecialEvent};

/// 탐지된 학사 일정 이벤트
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialEvent {
    /// 이벤트 종류
    pub kind: EventKind,
    /// 일치한 키워드 (수동 일정이면 일정 이름)
    pub keyword: String,
    /// 교사에게 보여줄 안내 문구
    pub message: String,
}

/// 키워드 규칙 표
///
/// 그룹 순서(skip → adjust → indoor → special)와 그룹 내 선언 순서가
/// 곧 우선순위다. 순서를 바꾸면 판정 결과가 달라진다.
const KEYWORD_RULES: &[(EventKind, &str, &str)] = &[
    // --- skip: 수업이 없는 날 ---
    (EventKind::Skip, "운동회", "오늘은 운동회입니다! 체육 수업이 없어요."),
    (EventKind::Skip, "현장학습", "현장학습으로 체육 수업이 없어요."),
    (EventKind::Skip, "소풍", "소풍 가는 날! 체육 수업은 쉬어요."),
    (EventKind::Skip, "수학여행", "수학여행 기간이라 수업이 없어요."),
    (EventKind::Skip, "수련회", "수련회 기간이라 수업이 없어요."),
    (EventKind::Skip, "학예회", "학예회 준비로 체육 수업이 없어요."),
    (EventKind::Skip, "시험", "시험 기간입니다. 체육 수업이 없어요."),
    (EventKind::Skip, "평가", "평가가 진행되는 날이에요. 체육 수업이 없어요."),
    (EventKind::Skip, "재량휴업", "재량휴업일입니다. 수업이 없어요."),
    // --- adjust: 일정 조정 ---
    (EventKind::Adjust, "대피훈련", "대피훈련이 있어요. 수업 시간이 조정될 수 있어요."),
    (EventKind::Adjust, "방송조회", "방송조회로 수업 시작이 늦어질 수 있어요."),
    (EventKind::Adjust, "학부모상담", "학부모상담 주간이라 일정 조정이 필요할 수 있어요."),
    // --- indoor: 실내 수업 강제 ---
    (EventKind::Indoor, "우천", "우천으로 실내 수업을 권장해요."),
    (EventKind::Indoor, "미세먼지", "미세먼지가 심한 날이에요. 실내 수업을 권장해요."),
    (EventKind::Indoor, "실내수업", "실내 수업이 예정되어 있어요."),
    (EventKind::Indoor, "실내", "실내 공간에서 수업을 진행해요."),
    // --- special: 특별 안내 ---
    (EventKind::Special, "체육대회", "체육대회가 다가오고 있어요! 관련 연습을 추천해요."),
    (EventKind::Special, "스포츠데이", "스포츠데이! 특별한 하루를 만들어 보세요."),
    (EventKind::Special, "공개수업", "공개수업이 있는 날이에요. 준비된 활동을 추천해요."),
    (EventKind::Special, "재량활동", "재량활동 시간이에요."),
];

/// 메모에서 키워드 이벤트 탐지
///
/// 규칙 표 순서대로 훑어 메모에 처음 포함된 키워드를 돌려준다.
/// 일치가 없으면 `None` (정상 경로).
pub fn detect_keyword(memo: &str) -> Option<SpecialEvent> {
    if memo.is_empty() {
        return None;
    }

    for (kind, keyword, message) in KEYWORD_RULES {
        if memo.contains(keyword) {
            return Some(SpecialEvent {
                kind: *kind,
                keyword: (*keyword).to_string(),
                message: (*message).to_string(),
            });
        }
    }

    None
}

/// 수동 등록 일정에서 이벤트 탐지 (날짜 정확 일치)
pub fn detect_manual(
    events: &[ManualSpecialEvent],
    date: NaiveDate,
) -> Option<SpecialEvent> {
    events.iter().find(|e| e.date == date).map(|e| SpecialEvent {
        kind: e.kind,
        keyword: e.label.clone(),
        message: format!("등록된 학사 일정이 있어요: {}", e.label),
    })
}

/// 메모 키워드와 수동 일정을 합쳐 최종 이벤트 판정
///
/// skip 이벤트는 출처와 무관하게 다른 모든 종류보다 우선한다.
/// 같은 종류끼리는 키워드 탐지가 수동 일정보다 먼저다.
pub fn detect(
    memo: &str,
    events: &[ManualSpecialEvent],
    date: NaiveDate,
) -> Option<SpecialEvent> {
    let keyword_hit = detect_keyword(memo);
    if matches!(&keyword_hit, Some(e) if e.kind == EventKind::Skip) {
        return keyword_hit;
    }

    let manual_hit = detect_manual(events, date);
    if matches!(&manual_hit, Some(e) if e.kind == EventKind::Skip) {
        return manual_hit;
    }

    keyword_hit.or(manual_hit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual(date: &str, kind: EventKind, label: &str) -> ManualSpecialEvent {
        ManualSpecialEvent {
            date: date.parse().unwrap(),
            kind,
            label: label.to_string(),
        }
    }

    #[test]
    fn skip_group_checked_before_adjust_group() {
        // 대피훈련(adjust)이 문자열 앞에 있어도 skip 그룹이 먼저 검사된다
        let event = detect_keyword("대피훈련 및 운동회 예정").unwrap();
        assert_eq!(event.kind, EventKind::Skip);
        assert_eq!(event.keyword, "운동회");
        assert_eq!(event.message, "오늘은 운동회입니다! 체육 수업이 없어요.");
    }

    #[test]
    fn in_group_declaration_order_wins() {
        // 같은 그룹 안에서는 선언 순서가 빠른 키워드가 이긴다
        let event = detect_keyword("시험 및 평가 주간").unwrap();
        assert_eq!(event.keyword, "시험");
    }

    #[test]
    fn indoor_keyword_order_prefers_longer_token() {
        // "실내수업"이 "실내"보다 먼저 선언되어 있어야 정확한 메시지가 나온다
        let event = detect_keyword("실내수업으로 변경").unwrap();
        assert_eq!(event.keyword, "실내수업");
    }

    #[test]
    fn no_match_is_normal_path() {
        assert_eq!(detect_keyword("평소 수업"), None);
        assert_eq!(detect_keyword(""), None);
    }

    #[test]
    fn manual_event_matches_exact_date_only() {
        let events = vec![manual("2026-04-22", EventKind::Skip, "전교 현장학습")];
        let hit = detect_manual(&events, "2026-04-22".parse().unwrap()).unwrap();
        assert_eq!(hit.kind, EventKind::Skip);
        assert_eq!(hit.keyword, "전교 현장학습");

        assert_eq!(detect_manual(&events, "2026-04-23".parse().unwrap()), None);
    }

    #[test]
    fn manual_skip_overrides_keyword_indoor() {
        let events = vec![manual("2026-04-22", EventKind::Skip, "재량휴업일")];
        let hit = detect("우천 시 실내", &events, "2026-04-22".parse().unwrap()).unwrap();
        assert_eq!(hit.kind, EventKind::Skip);
        assert_eq!(hit.keyword, "재량휴업일");
    }

    #[test]
    fn keyword_beats_manual_of_equal_rank() {
        let events = vec![manual("2026-04-22", EventKind::Special, "공개수업 주간")];
        let hit = detect("미세먼지 주의", &events, "2026-04-22".parse().unwrap()).unwrap();
        assert_eq!(hit.kind, EventKind::Indoor);
        assert_eq!(hit.keyword, "미세먼지");
    }
}
