//! 주간 추천 편성기
//!
//! 한 주 분량의 입력 스냅샷을 쥐고 일간/주간 추천 뷰와 학급 조회,
//! AI 해설 호출을 제공한다. 추천 계산 자체는 순수 동기 연산이고,
//! 비동기는 AI 해설 호출 하나뿐이다.

use std::collections::BTreeMap;

use tracing::warn;

use crate::models::activity::ActivityCandidate;
use crate::models::dataset::WeeklyDataset;
use crate::models::domain::Domain;
use crate::models::record::LessonRecord;
use crate::models::recommendation::SlotRecommendation;
use crate::models::timetable::Weekday;
use crate::models::weather::{AirQualitySnapshot, WeatherSnapshot};
use crate::services::ai_enhancer::{AiEnhancer, AiError};
use crate::services::domain_balance::{self, DomainBalance};
use crate::services::weather_context::{self, WeatherContext};
use crate::workflow::{SlotCtx, SlotFlow};

/// 주간 추천 편성기
///
/// 입력(시간표/기록/카탈로그/설정/날씨)이 바뀌면 호출 측이 새
/// 스냅샷으로 다시 만든다. 같은 스냅샷이면 결과도 항상 같다.
pub struct Recommender {
    dataset: WeeklyDataset,
    catalog: Vec<ActivityCandidate>,
    weather: WeatherContext,
    ai: AiEnhancer,
}

impl Recommender {
    /// 새 편성기 생성 (날씨 판정은 여기서 한 번 계산)
    pub fn new(
        dataset: WeeklyDataset,
        catalog: Vec<ActivityCandidate>,
        weather_snapshot: &WeatherSnapshot,
        air_snapshot: &AirQualitySnapshot,
        ai: AiEnhancer,
    ) -> Self {
        let weather = weather_context::resolve(weather_snapshot, air_snapshot);
        Self {
            dataset,
            catalog,
            weather,
            ai,
        }
    }

    /// 야외 적합도 판정 결과
    pub fn weather(&self) -> &WeatherContext {
        &self.weather
    }

    /// 하루치 추천 (학급이 배정된 칸만, 교시 순)
    pub fn day_recommendations(&self, day: Weekday) -> Vec<SlotRecommendation> {
        let flow = SlotFlow::new(&self.catalog, &self.dataset.settings, &self.weather);
        let date = self.dataset.timetable.date_of(day);

        let mut results = Vec::new();
        for slot in self.dataset.timetable.slots_for(day) {
            let Some(class_id) = &slot.class_id else {
                continue;
            };
            let Some(class) = self.dataset.timetable.class_by_id(class_id) else {
                warn!("⚠️ 시간표에 모르는 학급 ID가 있습니다: {}", class_id);
                continue;
            };

            let ctx = SlotCtx::new(class.clone(), day, slot.period, date, slot.memo.clone());
            let outcome = flow.run(&ctx, self.dataset.records_for(class_id));

            results.push(SlotRecommendation {
                class_id: class_id.clone(),
                day,
                period: slot.period,
                outcome,
            });
        }
        results
    }

    /// 주간 추천 (요일 코드 → 하루치 추천)
    pub fn week_recommendations(&self) -> BTreeMap<Weekday, Vec<SlotRecommendation>> {
        Weekday::ALL
            .iter()
            .map(|&day| (day, self.day_recommendations(day)))
            .collect()
    }

    /// 학급의 영역 균형 집계
    pub fn domain_balance(&self, class_id: &str) -> DomainBalance {
        domain_balance::aggregate(self.dataset.records_for(class_id))
    }

    /// 학급의 최근 수업 기록 (최신순, 최대 `limit`개)
    pub fn class_history(&self, class_id: &str, limit: usize) -> Vec<LessonRecord> {
        self.dataset
            .records_for(class_id)
            .iter()
            .take(limit)
            .cloned()
            .collect()
    }

    /// 해당 영역의 다음 차시 번호
    ///
    /// 그 영역 기록이 없으면 1부터 시작한다.
    pub fn next_lesson_sequence(&self, class_id: &str, domain: Domain) -> u32 {
        self.dataset
            .records_for(class_id)
            .iter()
            .filter(|r| Domain::from_label(&r.domain) == Some(domain))
            .map(|r| r.sequence)
            .max()
            .map(|max| max + 1)
            .unwrap_or(1)
    }

    /// 학급 추천의 AI 해설 생성
    ///
    /// 해당 요일에 계산된 추천이 없으면(칸 미배정, 수업 없음, 자료 없음)
    /// `None`. 결과는 학급별로 캐시되며 쿨다운은 AI 서비스가 검사한다.
    ///
    /// # 반환
    /// 해설 문자열 또는 `None`. 실패 시 종류가 구분된 `AiError`.
    pub async fn enrich_class(
        &mut self,
        class_id: &str,
        day: Weekday,
    ) -> Result<Option<String>, AiError> {
        let Some(class) = self.dataset.timetable.class_by_id(class_id).cloned() else {
            warn!("⚠️ 모르는 학급의 AI 해설 요청: {}", class_id);
            return Ok(None);
        };

        let detail = self
            .day_recommendations(day)
            .into_iter()
            .filter(|r| r.class_id == class_id)
            .find_map(|r| r.outcome.detail().cloned());

        let Some(detail) = detail else {
            return Ok(None);
        };

        let text = self.ai.enrich(&class, &detail, &self.weather).await?;
        Ok(Some(text))
    }

    /// AI 해설 캐시 비우기
    pub fn clear_ai_cache(&mut self) {
        self.ai.clear_cache();
    }
}
