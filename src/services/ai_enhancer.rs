//! AI 추천 해설 - 업무 능력 계층
//!
//! 계산이 끝난 추천을 자연어로 풀어 설명하는 선택 기능. 결정적 추천
//! 엔진의 일부가 아니며, 실패해도 추천 자체에는 영향이 없다.
//!
//! ## 기술 스택
//! - `async-openai` crate로 OpenAI 호환 API 호출
//! - 학급별 결과 캐시 (만료 없음, 호출 측이 비움)
//! - 재호출 전 쿨다운 검사 (자동 재시도 없음)

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::class::ClassInfo;
use crate::models::recommendation::RecommendationDetail;
use crate::services::weather_context::WeatherContext;

/// AI 해설 오류
///
/// 재시도는 하지 않으며 사용자가 명시적으로 다시 요청해야 한다.
#[derive(Debug, Error)]
pub enum AiError {
    /// 쿨다운 중 재호출 또는 API 측 빈도 제한
    #[error("요청이 너무 잦습니다. {0}초 후에 다시 시도해 주세요.")]
    RateLimited(u64),
    /// 키 권한/인증 문제
    #[error("AI API 접근 권한이 없습니다: {0}")]
    PermissionDenied(String),
    /// 그 외 API 오류
    #[error("AI API 호출에 실패했습니다: {0}")]
    Api(String),
    /// 응답은 왔지만 내용이 비어 있음
    #[error("AI가 빈 응답을 돌려주었습니다")]
    EmptyContent,
}

/// 오류 메시지로 종류 분류
///
/// async-openai가 돌려주는 메시지 문자열을 보고 빈도 제한 / 권한 /
/// 일반 오류로 나눈다.
fn classify_message(message: &str, cooldown_secs: u64) -> AiError {
    let lowered = message.to_lowercase();
    if lowered.contains("429") || lowered.contains("rate") || lowered.contains("too many") {
        AiError::RateLimited(cooldown_secs)
    } else if lowered.contains("401")
        || lowered.contains("403")
        || lowered.contains("permission")
        || lowered.contains("unauthorized")
    {
        AiError::PermissionDenied(message.to_string())
    } else {
        AiError::Api(message.to_string())
    }
}

/// AI 해설 서비스
///
/// 직책:
/// - 추천 한 건을 설명하는 프롬프트 구성과 API 호출
/// - 학급별 결과 캐시 보관
/// - 쿨다운 검사 (동시 요청은 &mut 수신자가 구조적으로 막는다)
pub struct AiEnhancer {
    client: Client<OpenAIConfig>,
    model_name: String,
    cooldown: Duration,
    cache: HashMap<String, String>,
    last_call: Option<Instant>,
}

impl AiEnhancer {
    /// 설정으로 새 해설 서비스 생성
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            cooldown: Duration::from_secs(config.ai_cooldown_secs),
            cache: HashMap::new(),
            last_call: None,
        }
    }

    /// 캐시된 해설 조회
    pub fn cached(&self, class_id: &str) -> Option<&str> {
        self.cache.get(class_id).map(String::as_str)
    }

    /// 캐시 전체 비우기 (입력 데이터가 바뀌었을 때 호출 측이 사용)
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// 쿨다운 검사 (남은 시간을 담아 실패)
    fn check_cooldown(&self) -> Result<(), AiError> {
        if let Some(last) = self.last_call {
            let elapsed = last.elapsed();
            if elapsed < self.cooldown {
                let remaining = (self.cooldown - elapsed).as_secs().max(1);
                return Err(AiError::RateLimited(remaining));
            }
        }
        Ok(())
    }

    /// 추천 해설 프롬프트 구성
    ///
    /// # 인자
    /// - `class`: 대상 학급
    /// - `detail`: 계산된 추천 상세
    /// - `weather`: 야외 적합도 판정 결과
    pub fn build_prompt(
        class: &ClassInfo,
        detail: &RecommendationDetail,
        weather: &WeatherContext,
    ) -> String {
        let alternatives = if detail.alternatives.is_empty() {
            "없음".to_string()
        } else {
            detail.alternatives.join(", ")
        };

        format!(
            r#"다음 체육 수업 추천을 선생님께 설명해 주세요.

대상 학급: {} ({}학년)
추천 활동: {}
수업 영역: {}
ACE 단계: {}
수업 공간: {}
추천 이유: {}
차선 활동: {}
오늘 날씨: {}{}

위 내용을 바탕으로 수업 운영 팁을 3~4문장으로 정리해 주세요.
활동 이름과 공간은 바꾸지 말고, 친근한 존댓말로 써 주세요."#,
            class.display_name(),
            class.grade,
            detail.activity,
            detail.domain,
            detail.ace_phase,
            detail.space,
            detail.rationale,
            alternatives,
            weather.text,
            weather
                .reason
                .as_ref()
                .map(|r| format!(" ({})", r))
                .unwrap_or_default(),
        )
    }

    /// 추천 해설 생성
    ///
    /// 캐시에 있으면 네트워크 없이 그대로 돌려준다. 없으면 쿨다운을
    /// 확인한 뒤 한 번 호출하고, 성공 결과만 캐시한다.
    ///
    /// # 반환
    /// 해설 문자열. 실패 시 종류가 구분된 `AiError`.
    pub async fn enrich(
        &mut self,
        class: &ClassInfo,
        detail: &RecommendationDetail,
        weather: &WeatherContext,
    ) -> Result<String, AiError> {
        if let Some(cached) = self.cache.get(&class.id) {
            debug!("캐시된 AI 해설 사용: {}", class.id);
            return Ok(cached.clone());
        }

        self.check_cooldown()?;

        let prompt = Self::build_prompt(class, detail, weather);
        debug!("AI 해설 요청, 모델: {}, 학급: {}", self.model_name, class.id);

        self.last_call = Some(Instant::now());

        let system_message = ChatCompletionRequestSystemMessageArgs::default()
            .content(
                "당신은 초등 체육 수업을 오래 도운 조력자입니다. \
                 추천된 활동을 바꾸지 말고, 운영 팁만 간결하게 보태 주세요.",
            )
            .build()
            .map_err(|e| AiError::Api(e.to_string()))?;

        let user_message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| AiError::Api(e.to_string()))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![
                ChatCompletionRequestMessage::System(system_message),
                ChatCompletionRequestMessage::User(user_message),
            ])
            .temperature(0.3)
            .max_tokens(1024u32)
            .build()
            .map_err(|e| AiError::Api(e.to_string()))?;

        let cooldown_secs = self.cooldown.as_secs();
        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("AI API 호출 실패: {}", e);
            classify_message(&e.to_string(), cooldown_secs)
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or(AiError::EmptyContent)?;

        let content = content.trim().to_string();
        if content.is_empty() {
            return Err(AiError::EmptyContent);
        }

        debug!("AI 해설 수신: {}자", content.chars().count());
        self.cache.insert(class.id.clone(), content.clone());

        Ok(content)
    }
}
