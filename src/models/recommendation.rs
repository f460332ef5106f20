use serde::Serialize;

use crate::models::ace::AcePhase;
use crate::models::domain::Domain;
use crate::models::timetable::Weekday;

/// 추천된 활동의 상세 내용
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationDetail {
    /// 활동 이름
    pub activity: String,
    /// 수업 영역
    pub domain: Domain,
    /// 권장 수업 공간
    pub space: String,
    /// ACE 단계
    pub ace_phase: AcePhase,
    /// 추천 근거 문구
    pub rationale: String,
    /// 차선 후보 (최대 2개)
    pub alternatives: Vec<String>,
}

/// 한 칸(slot)에 대한 추천 결과
///
/// 휴업성 이벤트면 `Skipped`, 그 외에는 계산 결과를 담은 `Computed`.
/// 매 호출마다 새로 만들어지며 어디에도 저장하지 않는다.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "isSkipped")]
pub enum Recommendation {
    /// 수업 자체가 없는 날 (점수 계산 생략)
    #[serde(rename = "true", rename_all = "camelCase")]
    Skipped {
        /// 건너뛴 원인 (일치한 키워드 또는 수동 일정 이름)
        skip_reason: String,
        /// 교사에게 보여줄 안내 문구
        skip_message: String,
    },
    /// 정상 계산된 추천
    #[serde(rename = "false", rename_all = "camelCase")]
    Computed {
        /// 추천 상세 (학년 후보가 없으면 None → "자료 없음" 표시)
        detail: Option<RecommendationDetail>,
        /// 일정 조정 안내 (있으면 표시만, 계산엔 영향 없음)
        adjust_message: Option<String>,
        /// 특별 안내 (있으면 표시만)
        special_message: Option<String>,
    },
}

impl Recommendation {
    /// 건너뛴 결과인지
    pub fn is_skipped(&self) -> bool {
        matches!(self, Recommendation::Skipped { .. })
    }

    /// 계산된 상세가 있으면 참조 반환
    pub fn detail(&self) -> Option<&RecommendationDetail> {
        match self {
            Recommendation::Computed { detail, .. } => detail.as_ref(),
            Recommendation::Skipped { .. } => None,
        }
    }
}

/// 시간표 칸 정보가 붙은 추천 결과 (일간/주간 뷰 항목)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRecommendation {
    /// 학급 ID
    pub class_id: String,
    /// 요일
    pub day: Weekday,
    /// 교시
    pub period: u8,
    /// 추천 내용
    pub outcome: Recommendation,
}
