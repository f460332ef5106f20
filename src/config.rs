/// 프로그램 설정
#[derive(Clone, Debug)]
pub struct Config {
    /// 주간 데이터(TOML) 폴더
    pub data_folder: String,
    /// 활동 카탈로그 JSON 경로
    pub catalog_file: String,
    /// 주간 계획 출력 파일
    pub output_log_file: String,
    /// 상세 로그 여부
    pub verbose_logging: bool,
    // --- 기상청 API 설정 ---
    pub weather_api_base_url: String,
    pub weather_service_key: String,
    /// 예보 격자 X 좌표
    pub weather_nx: i32,
    /// 예보 격자 Y 좌표
    pub weather_ny: i32,
    // --- 에어코리아 API 설정 ---
    pub air_api_base_url: String,
    pub air_station_name: String,
    // --- AI 해설 설정 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// AI 재호출 쿨다운 (초)
    pub ai_cooldown_secs: u64,
    /// 실행 시 오늘 추천의 AI 해설까지 생성할지
    pub enable_ai_summary: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_folder: "data".to_string(),
            catalog_file: "assets/activities.json".to_string(),
            output_log_file: "week_plan.txt".to_string(),
            verbose_logging: false,
            weather_api_base_url: "https://apis.data.go.kr/1360000/VilageFcstInfoService_2.0"
                .to_string(),
            weather_service_key: String::new(),
            weather_nx: 60,
            weather_ny: 127,
            air_api_base_url: "https://apis.data.go.kr/B552584/ArpltnInforInqireSvc".to_string(),
            air_station_name: "중구".to_string(),
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
            ai_cooldown_secs: 10,
            enable_ai_summary: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            data_folder: std::env::var("DATA_FOLDER").unwrap_or(default.data_folder),
            catalog_file: std::env::var("CATALOG_FILE").unwrap_or(default.catalog_file),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            weather_api_base_url: std::env::var("WEATHER_API_BASE_URL").unwrap_or(default.weather_api_base_url),
            weather_service_key: std::env::var("WEATHER_SERVICE_KEY").unwrap_or(default.weather_service_key),
            weather_nx: std::env::var("WEATHER_NX").ok().and_then(|v| v.parse().ok()).unwrap_or(default.weather_nx),
            weather_ny: std::env::var("WEATHER_NY").ok().and_then(|v| v.parse().ok()).unwrap_or(default.weather_ny),
            air_api_base_url: std::env::var("AIR_API_BASE_URL").unwrap_or(default.air_api_base_url),
            air_station_name: std::env::var("AIR_STATION_NAME").unwrap_or(default.air_station_name),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            ai_cooldown_secs: std::env::var("AI_COOLDOWN_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.ai_cooldown_secs),
            enable_ai_summary: std::env::var("ENABLE_AI_SUMMARY").ok().and_then(|v| v.parse().ok()).unwrap_or(default.enable_ai_summary),
        }
    }
}
