//! 칸 단위 추천 흐름 - 흐름 계층
//!
//! 핵심 직책: 시간표 칸 하나의 추천을 끝까지 계산하는 순서 정의
//!
//! 흐름 순서:
//! 1. 학사 일정 탐지 → skip이면 즉시 종료 (점수 계산 없음)
//! 2. indoor면 운동장 제한, adjust/special이면 안내 문구만 보관
//! 3. 기록 집계 → 후보 점수화 → 추천 조립

use tracing::{debug, info, warn};

use crate::models::activity::ActivityCandidate;
use crate::models::loaders::candidates_for_grade;
use crate::models::record::LessonRecord;
use crate::models::recommendation::{Recommendation, RecommendationDetail};
use crate::models::settings::{EngineSettings, EventKind};
use crate::services::candidate_scorer::{
    allowed_spaces, parse_priority_order, rank, rationale, Priority, ScoreContext,
    CLASSROOM_SPACE,
};
use crate::services::weather_context::{restricted_spaces, WeatherContext, OUTDOOR_SPACE};
use crate::services::{domain_balance, special_event};
use crate::workflow::slot_ctx::SlotCtx;

/// 차선 후보로 보여줄 개수
const ALTERNATIVE_COUNT: usize = 2;

/// 칸 단위 추천 흐름
///
/// - 칸 하나의 추천 계산 순서를 편성
/// - 자원을 쥐지 않고 업무 능력(services)에만 의존
/// - 한 주 계산 동안 카탈로그/설정/날씨 판정을 공유한다
pub struct SlotFlow<'a> {
    catalog: &'a [ActivityCandidate],
    settings: &'a EngineSettings,
    weather: &'a WeatherContext,
    priority_order: Vec<Priority>,
}

impl<'a> SlotFlow<'a> {
    /// 새 추천 흐름 생성 (우선순위 토큰은 여기서 한 번만 해석)
    pub fn new(
        catalog: &'a [ActivityCandidate],
        settings: &'a EngineSettings,
        weather: &'a WeatherContext,
    ) -> Self {
        Self {
            catalog,
            settings,
            weather,
            priority_order: parse_priority_order(&settings.priority_order),
        }
    }

    /// 칸 하나의 추천 계산
    ///
    /// # 인자
    /// - `ctx`: 칸 문맥 (학급/요일/교시/날짜/메모)
    /// - `records`: 해당 학급의 수업 기록 (최신순)
    pub fn run(&self, ctx: &SlotCtx, records: &[LessonRecord]) -> Recommendation {
        // ========== 1단계: 학사 일정 탐지 ==========
        let event = special_event::detect(
            &ctx.memo,
            &self.settings.manual_special_events,
            ctx.date,
        );

        if let Some(event) = &event {
            if event.kind == EventKind::Skip {
                info!("{} ⏭️ 수업 없음 ({})", ctx, event.keyword);
                return Recommendation::Skipped {
                    skip_reason: event.keyword.clone(),
                    skip_message: event.message.clone(),
                };
            }
        }

        let adjust_message = event
            .as_ref()
            .filter(|e| e.kind == EventKind::Adjust)
            .map(|e| e.message.clone());
        let special_message = event
            .as_ref()
            .filter(|e| e.kind == EventKind::Special)
            .map(|e| e.message.clone());

        // ========== 2단계: 공간 제한 계산 ==========
        let mut restricted = restricted_spaces(self.weather);
        if matches!(&event, Some(e) if e.kind == EventKind::Indoor) {
            if !restricted.iter().any(|s| s == OUTDOOR_SPACE) {
                restricted.push(OUTDOOR_SPACE.to_string());
            }
            info!("{} 🏠 실내 수업 전환, 운동장 제외", ctx);
        }
        let allowed = allowed_spaces(&self.settings.available_spaces, &restricted);

        // ========== 3단계: 기록 집계와 후보 점수화 ==========
        let balance = domain_balance::aggregate(records);
        let last_record = records.first();

        let candidates = candidates_for_grade(self.catalog, ctx.class.grade);
        if candidates.is_empty() {
            warn!("{} ⚠️ 학년에 맞는 활동 자료가 없습니다", ctx);
            return Recommendation::Computed {
                detail: None,
                adjust_message,
                special_message,
            };
        }

        let score_ctx = ScoreContext {
            weather: self.weather,
            balance: &balance,
            last_record,
            allowed_spaces: allowed,
        };
        let ranked = rank(&candidates, &score_ctx, &self.priority_order);

        let top = &ranked[0];
        debug!(
            "{} 1위 후보: {} ({}점, 근거: {})",
            ctx,
            top.candidate.name,
            top.score,
            top.dominant_priority.label()
        );

        let alternatives: Vec<String> = ranked
            .iter()
            .skip(1)
            .take(ALTERNATIVE_COUNT)
            .map(|s| s.candidate.name.clone())
            .collect();

        let detail = RecommendationDetail {
            activity: top.candidate.name.clone(),
            domain: top.candidate.domain,
            space: pick_space(&top.candidate, &score_ctx.allowed_spaces),
            ace_phase: top.candidate.ace_phase,
            rationale: rationale(top.dominant_priority, self.weather.status),
            alternatives,
        };

        Recommendation::Computed {
            detail: Some(detail),
            adjust_message,
            special_message,
        }
    }
}

/// 추천 활동의 수업 공간 선택
///
/// 활동이 선언한 공간 중 오늘 쓸 수 있는 첫 번째 공간. 선언 공간이
/// 없는 활동은 쓸 수 있는 아무 공간이나, 그마저 없으면 교실.
fn pick_space(candidate: &ActivityCandidate, allowed: &[String]) -> String {
    candidate
        .spaces
        .iter()
        .find(|s| allowed.contains(s))
        .cloned()
        .or_else(|| {
            if candidate.spaces.is_empty() {
                allowed.first().cloned()
            } else {
                None
            }
        })
        .unwrap_or_else(|| CLASSROOM_SPACE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::class::ClassInfo;
    use crate::models::settings::ManualSpecialEvent;
    use crate::models::timetable::Weekday;
    use crate::models::weather::{AirQualitySnapshot, WeatherSnapshot};
    use crate::services::weather_context;

    fn catalog() -> Vec<ActivityCandidate> {
        serde_json::from_str(
            r#"[
                {"id": "a1", "name": "운동장 이어달리기", "domain": "운동",
                 "acePhase": "A", "grades": [3], "spaces": ["운동장"]},
                {"id": "a2", "name": "체육관 피구", "domain": "스포츠",
                 "acePhase": "E", "grades": [3], "spaces": ["체육관", "교실"]},
                {"id": "a3", "name": "교실 리듬 표현", "domain": "표현",
                 "acePhase": "A", "grades": [3], "spaces": ["교실"]},
                {"id": "a4", "name": "6학년 플래그풋볼", "domain": "스포츠",
                 "acePhase": "C", "grades": [6], "spaces": ["운동장"]}
            ]"#,
        )
        .unwrap()
    }

    fn ctx_with_memo(memo: &str) -> SlotCtx {
        SlotCtx::new(
            ClassInfo {
                id: "3-1".to_string(),
                grade: 3,
                class_num: 1,
                color: "#4F86C6".to_string(),
            },
            Weekday::Mon,
            1,
            "2026-04-20".parse().unwrap(),
            memo.to_string(),
        )
    }

    fn optimal_weather() -> WeatherContext {
        weather_context::resolve(&WeatherSnapshot::default(), &AirQualitySnapshot::default())
    }

    #[test]
    fn skip_keyword_short_circuits_without_scoring() {
        let catalog = catalog();
        let settings = EngineSettings::default();
        let weather = optimal_weather();
        let flow = SlotFlow::new(&catalog, &settings, &weather);

        let result = flow.run(&ctx_with_memo("운동회 예행 연습"), &[]);
        match result {
            Recommendation::Skipped {
                skip_reason,
                skip_message,
            } => {
                assert_eq!(skip_reason, "운동회");
                assert_eq!(skip_message, "오늘은 운동회입니다! 체육 수업이 없어요.");
            }
            other => panic!("skip이어야 합니다: {:?}", other),
        }
    }

    #[test]
    fn adjust_event_does_not_short_circuit() {
        let catalog = catalog();
        let settings = EngineSettings::default();
        let weather = optimal_weather();
        let flow = SlotFlow::new(&catalog, &settings, &weather);

        let result = flow.run(&ctx_with_memo("대피훈련 예정"), &[]);
        match result {
            Recommendation::Computed {
                detail,
                adjust_message,
                ..
            } => {
                assert!(detail.is_some());
                assert!(adjust_message.unwrap().contains("대피훈련"));
            }
            other => panic!("계산 결과여야 합니다: {:?}", other),
        }
    }

    #[test]
    fn indoor_event_restricts_outdoor_space() {
        let catalog = catalog();
        let settings = EngineSettings::default();
        let weather = optimal_weather();
        let flow = SlotFlow::new(&catalog, &settings, &weather);

        let result = flow.run(&ctx_with_memo("미세먼지 경보 발령"), &[]);
        let detail = result.detail().unwrap().clone();
        // 운동장 전용 활동은 탈락하고 공간도 운동장이 아니어야 한다
        assert_ne!(detail.activity, "운동장 이어달리기");
        assert_ne!(detail.space, "운동장");
    }

    #[test]
    fn special_event_attaches_message_only() {
        let catalog = catalog();
        let settings = EngineSettings::default();
        let weather = optimal_weather();
        let flow = SlotFlow::new(&catalog, &settings, &weather);

        let plain = flow.run(&ctx_with_memo(""), &[]);
        let special = flow.run(&ctx_with_memo("체육대회 연습"), &[]);

        let plain_detail = plain.detail().unwrap();
        let special_detail = special.detail().unwrap();
        assert_eq!(plain_detail.activity, special_detail.activity);

        match special {
            Recommendation::Computed {
                special_message, ..
            } => assert!(special_message.unwrap().contains("체육대회")),
            _ => unreachable!(),
        }
    }

    #[test]
    fn manual_skip_event_short_circuits() {
        let catalog = catalog();
        let settings = EngineSettings {
            manual_special_events: vec![ManualSpecialEvent {
                date: "2026-04-20".parse().unwrap(),
                kind: EventKind::Skip,
                label: "재량휴업일".to_string(),
            }],
            ..Default::default()
        };
        let weather = optimal_weather();
        let flow = SlotFlow::new(&catalog, &settings, &weather);

        let result = flow.run(&ctx_with_memo(""), &[]);
        assert!(result.is_skipped());
    }

    #[test]
    fn no_candidates_for_grade_yields_null_detail() {
        let catalog: Vec<ActivityCandidate> = serde_json::from_str(
            r#"[{"id": "a4", "name": "6학년 플래그풋볼", "domain": "스포츠",
                 "acePhase": "C", "grades": [6], "spaces": ["운동장"]}]"#,
        )
        .unwrap();
        let settings = EngineSettings::default();
        let weather = optimal_weather();
        let flow = SlotFlow::new(&catalog, &settings, &weather);

        let result = flow.run(&ctx_with_memo(""), &[]);
        match result {
            Recommendation::Computed { detail, .. } => assert!(detail.is_none()),
            other => panic!("계산 결과여야 합니다: {:?}", other),
        }
    }

    #[test]
    fn alternatives_are_next_two_candidates() {
        let catalog = catalog();
        let settings = EngineSettings::default();
        let weather = optimal_weather();
        let flow = SlotFlow::new(&catalog, &settings, &weather);

        let result = flow.run(&ctx_with_memo(""), &[]);
        let detail = result.detail().unwrap();
        assert_eq!(detail.alternatives.len(), 2);
        assert!(!detail.alternatives.contains(&detail.activity));
    }
}
