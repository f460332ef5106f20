//! 후보 활동 점수화 - 업무 능력 계층
//!
//! 날씨 판정, 영역 균형, 직전 수업을 근거로 후보 활동에 점수를 매기고
//! 정렬한다. 우선순위 토큰 목록은 호출 측(교사 설정)이 정하며,
//! 토큰마다 순수 점수 규칙 하나가 대응한다(전략 표).

use tracing::warn;

use crate::models::activity::ActivityCandidate;
use crate::models::record::LessonRecord;
use crate::services::domain_balance::DomainBalance;
use crate::services::weather_context::{OutdoorStatus, WeatherContext};

/// 기본 점수
pub const BASE_SCORE: i32 = 50;
/// 사용 가능한 공간이 하나도 없을 때 감점 (사실상 탈락)
const SPACE_CONFLICT_PENALTY: i32 = 100;
/// 날씨가 불리할 때 교실 가능 활동 가점
const INDOOR_BONUS: i32 = 20;
/// 직전 수업과 같은 영역 가점
const CONTINUITY_BONUS: i32 = 15;
/// ACE 단계 진행(A→C, C→E) 가점
const PROGRESSION_BONUS: i32 = 10;
/// 사용 가능 공간 1개당 가점
const SPACE_MATCH_BONUS: i32 = 5;
/// 권장 영역 일치 가점
const BALANCE_BONUS: i32 = 20;
/// 직전 활동과 이름이 같을 때 감점 (반복 방지)
const REPEAT_PENALTY: i32 = 30;

/// 교실 공간 이름
pub const CLASSROOM_SPACE: &str = "교실";

/// 점수화 우선순위 토큰
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Priority {
    #[serde(rename = "weather")]
    Weather,
    #[serde(rename = "continuity")]
    Continuity,
    #[serde(rename = "space")]
    Space,
    #[serde(rename = "domainBalance")]
    DomainBalance,
}

impl Priority {
    /// 설정 파일에 쓰이는 토큰 문자열
    pub fn token(self) -> &'static str {
        match self {
            Priority::Weather => "weather",
            Priority::Continuity => "continuity",
            Priority::Space => "space",
            Priority::DomainBalance => "domainBalance",
        }
    }

    /// 한글 이름
    pub fn label(self) -> &'static str {
        match self {
            Priority::Weather => "날씨",
            Priority::Continuity => "수업 연계",
            Priority::Space => "공간 활용",
            Priority::DomainBalance => "영역 균형",
        }
    }

    /// 토큰 문자열에서 해석
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "weather" => Some(Priority::Weather),
            "continuity" => Some(Priority::Continuity),
            "space" => Some(Priority::Space),
            "domainBalance" => Some(Priority::DomainBalance),
            _ => None,
        }
    }
}

/// 설정의 우선순위 문자열 목록을 토큰으로 변환 (모르는 토큰은 경고 후 제외)
pub fn parse_priority_order(tokens: &[String]) -> Vec<Priority> {
    tokens
        .iter()
        .filter_map(|t| {
            let parsed = Priority::from_token(t);
            if parsed.is_none() {
                warn!("⚠️ 알 수 없는 우선순위 토큰을 건너뜁니다: {}", t);
            }
            parsed
        })
        .collect()
}

/// 점수화 문맥
///
/// 한 칸(slot)의 추천 계산 동안 불변으로 유지되는 입력 묶음.
#[derive(Debug)]
pub struct ScoreContext<'a> {
    /// 야외 적합도 판정 결과
    pub weather: &'a WeatherContext,
    /// 영역 균형 집계
    pub balance: &'a DomainBalance,
    /// 직전 수업 기록 (없을 수 있음)
    pub last_record: Option<&'a LessonRecord>,
    /// 오늘 실제로 사용할 수 있는 공간 (설정 공간 − 제한 공간)
    pub allowed_spaces: Vec<String>,
}

impl ScoreContext<'_> {
    fn is_allowed(&self, space: &str) -> bool {
        self.allowed_spaces.iter().any(|s| s == space)
    }
}

/// 사용 가능 공간 계산 (설정 공간에서 제한 공간 제거)
pub fn allowed_spaces(available: &[String], restricted: &[String]) -> Vec<String> {
    available
        .iter()
        .filter(|s| !restricted.contains(s))
        .cloned()
        .collect()
}

/// 점수가 매겨진 후보
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    /// 후보 활동
    pub candidate: ActivityCandidate,
    /// 최종 점수
    pub score: i32,
    /// 점수를 지배한 우선순위 (근거 문구 선택에 쓰임)
    pub dominant_priority: Priority,
}

type ScoringRule = fn(&ActivityCandidate, &ScoreContext) -> i32;

/// 날씨 규칙: 쓸 수 있는 공간이 전혀 없으면 탈락급 감점,
/// 날씨가 불리한데 교실 수업이 가능하면 가점.
fn rule_weather(candidate: &ActivityCandidate, ctx: &ScoreContext) -> i32 {
    if !candidate.spaces.is_empty()
        && !candidate.spaces.iter().any(|s| ctx.is_allowed(s))
    {
        return -SPACE_CONFLICT_PENALTY;
    }
    if ctx.weather.status.is_unfavorable()
        && candidate.spaces.iter().any(|s| s == CLASSROOM_SPACE)
    {
        return INDOOR_BONUS;
    }
    0
}

/// 연계 규칙: 직전 수업과 같은 영역이면 가점, 그 안에서 ACE 단계가
/// 자연스럽게 이어지면(A→C, C→E) 추가 가점.
fn rule_continuity(candidate: &ActivityCandidate, ctx: &ScoreContext) -> i32 {
    let Some(last) = ctx.last_record else {
        return 0;
    };
    if crate::models::domain::Domain::from_label(&last.domain) != Some(candidate.domain) {
        return 0;
    }
    let mut delta = CONTINUITY_BONUS;
    if last.ace_phase.next() == Some(candidate.ace_phase) {
        delta += PROGRESSION_BONUS;
    }
    delta
}

/// 공간 규칙: 사용 가능 공간과 겹치는 공간 1개당 가점.
fn rule_space(candidate: &ActivityCandidate, ctx: &ScoreContext) -> i32 {
    let matches = candidate.spaces.iter().filter(|s| ctx.is_allowed(s)).count();
    SPACE_MATCH_BONUS * matches as i32
}

/// 균형 규칙: 권장 영역과 일치하면 가점.
fn rule_domain_balance(candidate: &ActivityCandidate, ctx: &ScoreContext) -> i32 {
    if candidate.domain == ctx.balance.suggested {
        BALANCE_BONUS
    } else {
        0
    }
}

/// 우선순위 토큰 → 점수 규칙 (전략 표)
fn rule_for(priority: Priority) -> ScoringRule {
    match priority {
        Priority::Weather => rule_weather,
        Priority::Continuity => rule_continuity,
        Priority::Space => rule_space,
        Priority::DomainBalance => rule_domain_balance,
    }
}

/// 후보 목록 점수화 및 정렬
///
/// # 인자
/// - `candidates`: 학년에 맞는 후보 목록 (카탈로그 순서)
/// - `ctx`: 점수화 문맥
/// - `priority_order`: 적용할 규칙과 그 순서
///
/// # 반환
/// 점수 내림차순 목록. 동점은 카탈로그 순서를 유지한다(안정 정렬).
pub fn rank(
    candidates: &[ActivityCandidate],
    ctx: &ScoreContext,
    priority_order: &[Priority],
) -> Vec<ScoredCandidate> {
    let default_priority = priority_order.first().copied().unwrap_or(Priority::Weather);

    let mut scored: Vec<ScoredCandidate> = candidates
        .iter()
        .map(|candidate| {
            let mut score = BASE_SCORE;
            let mut dominant: Option<Priority> = None;

            for &priority in priority_order {
                let delta = rule_for(priority)(candidate, ctx);
                score += delta;
                if priority == Priority::DomainBalance && delta > 0 && dominant.is_none() {
                    dominant = Some(Priority::DomainBalance);
                }
            }

            // 반복 방지 감점은 우선순위 목록과 무관하게 한 번만 적용한다
            if let Some(last) = ctx.last_record {
                if last.activity == candidate.name {
                    score -= REPEAT_PENALTY;
                }
            }

            ScoredCandidate {
                candidate: candidate.clone(),
                score,
                dominant_priority: dominant.unwrap_or(default_priority),
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

/// 근거 문구 표 (지배 우선순위 + 날씨 상태로 선택)
static RATIONALE_TEMPLATES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "weather:optimal" => "오늘은 날씨가 좋아 야외 활동까지 고려해 골랐어요.",
    "weather:caution" => "대기 상태가 애매한 날이라 공간 선택이 중요한 활동이에요.",
    "weather:not-recommended" => "야외 수업이 어려운 날씨라 실내에서도 가능한 활동이에요.",
    "continuity" => "지난 수업과 자연스럽게 이어지는 활동이에요.",
    "space" => "오늘 사용할 수 있는 공간과 잘 맞는 활동이에요.",
    "domainBalance" => "최근 적게 다룬 영역을 보충할 수 있는 활동이에요.",
};

/// 추천 근거 문구 선택
pub fn rationale(dominant: Priority, status: OutdoorStatus) -> String {
    let combined = format!("{}:{}", dominant.token(), status.code());
    RATIONALE_TEMPLATES
        .get(combined.as_str())
        .or_else(|| RATIONALE_TEMPLATES.get(dominant.token()))
        .copied()
        .unwrap_or("오늘 수업에 알맞은 활동이에요.")
        .to_string()
}
