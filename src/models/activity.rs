use serde::{Deserialize, Serialize};

use crate::models::ace::AcePhase;
use crate::models::domain::Domain;

/// 후보 활동
///
/// 교육과정 카탈로그(CSV에서 동기화된 JSON 자산)가 공급하는 데이터.
/// 추천 계산 한 번 동안은 불변으로 취급한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityCandidate {
    /// 활동 ID
    pub id: String,
    /// 활동 이름
    pub name: String,
    /// 수업 영역
    pub domain: Domain,
    /// 사용 가능한 공간 목록 (비어 있으면 공간 제약 없음)
    #[serde(default)]
    pub spaces: Vec<String>,
    /// ACE 단계
    pub ace_phase: AcePhase,
    /// 대상 학년 (비어 있으면 전 학년)
    #[serde(default)]
    pub grades: Vec<u8>,
    /// 기타 분류 태그 (FMS 분류 등)
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ActivityCandidate {
    /// 해당 학년이 대상인지 확인
    pub fn fits_grade(&self, grade: u8) -> bool {
        self.grades.is_empty() || self.grades.contains(&grade)
    }
}
