use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::ace::AcePhase;

/// 수업 기록
///
/// 교사용 기록 화면(외부)에서 생성되며 엔진은 읽기만 한다.
/// 목록은 항상 최신순 정렬을 전제한다.
///
/// 영역(domain)은 표준 라벨 세 가지(운동/스포츠/표현) 외의 값이 들어올 수
/// 있어 문자열 그대로 보관한다. 비표준 값의 처리 방식은 균형 집계 쪽 책임.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonRecord {
    /// 학급 ID
    pub class_id: String,
    /// 수업 날짜
    pub date: NaiveDate,
    /// 활동 이름
    pub activity: String,
    /// 수업 영역 라벨 (없으면 "스포츠")
    #[serde(default = "default_domain")]
    pub domain: String,
    /// ACE 단계
    pub ace_phase: AcePhase,
    /// 차시 번호 (영역별 진행 순서)
    #[serde(default = "default_sequence")]
    pub sequence: u32,
    /// 수행 평가 메모
    #[serde(default)]
    pub performance: Option<String>,
    /// 변형 운영 메모
    #[serde(default)]
    pub variation: Option<String>,
    /// 일반 메모
    #[serde(default)]
    pub memo: Option<String>,
}

fn default_domain() -> String {
    "스포츠".to_string()
}

fn default_sequence() -> u32 {
    1
}
