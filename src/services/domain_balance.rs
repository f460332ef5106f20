//! 영역 균형 집계 - 업무 능력 계층
//!
//! 학급의 수업 기록을 영역별로 집계해 가장 덜 다룬 영역을 찾는다.

use serde::Serialize;

use crate::models::domain::Domain;
use crate::models::record::LessonRecord;

/// 영역별 수업 횟수 집계 결과
#[derive(Debug, Clone, Serialize)]
pub struct DomainBalance {
    /// 영역별 횟수 (고정 순서: 운동, 스포츠, 표현)
    pub counts: [(Domain, u32); 3],
    /// 집계에 포함된 기록 수
    pub total: u32,
    /// 다음 수업에 권하는 영역 (최소 횟수, 동점이면 선언 순서 앞쪽)
    pub suggested: Domain,
}

impl DomainBalance {
    /// 특정 영역의 횟수
    pub fn count_of(&self, domain: Domain) -> u32 {
        self.counts
            .iter()
            .find(|(d, _)| *d == domain)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }
}

/// 기록 목록을 영역별로 집계
///
/// 표준 라벨(운동/스포츠/표현) 외의 영역 값을 가진 기록은 집계에서
/// 조용히 제외한다. 기록이 하나도 없으면 스포츠를 중립 기본값으로 권한다.
pub fn aggregate(records: &[LessonRecord]) -> DomainBalance {
    let mut counts: [(Domain, u32); 3] =
        [(Domain::Fitness, 0), (Domain::Sport, 0), (Domain::Expression, 0)];

    for record in records {
        match Domain::from_label(&record.domain) {
            Some(domain) => {
                for entry in counts.iter_mut() {
                    if entry.0 == domain {
                        entry.1 += 1;
                    }
                }
            }
            None => {
                tracing::debug!(
                    "알 수 없는 영역 값이라 집계에서 제외합니다: {} ({})",
                    record.domain,
                    record.activity
                );
            }
        }
    }

    let total: u32 = counts.iter().map(|(_, c)| c).sum();

    let suggested = if total == 0 {
        Domain::Sport
    } else {
        // 안정 정렬이라 동점이면 선언 순서(운동 → 스포츠 → 표현)가 유지된다
        let mut pairs = counts.to_vec();
        pairs.sort_by_key(|(_, count)| *count);
        pairs[0].0
    };

    DomainBalance {
        counts,
        total,
        suggested,
    }
}
