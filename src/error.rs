use std::fmt;

/// 애플리케이션 오류 타입
#[derive(Debug)]
pub enum AppError {
    /// 외부 API 호출 오류 (기상청, 에어코리아)
    Api(ApiError),
    /// 파일 입출력 오류
    File(FileError),
    /// 그 외 오류 (서드파티 오류 포장용)
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Api(e) => write!(f, "API 오류: {}", e),
            AppError::File(e) => write!(f, "파일 오류: {}", e),
            AppError::Other(msg) => write!(f, "오류: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Api(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// 외부 API 호출 오류
#[derive(Debug)]
pub enum ApiError {
    /// 네트워크 요청 실패
    RequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API가 오류 응답을 반환
    BadResponse {
        endpoint: String,
        code: Option<String>,
        message: Option<String>,
    },
    /// 요청 빈도 제한 (재시도를 다 써도 풀리지 않음)
    RateLimited {
        endpoint: String,
        retries: usize,
    },
    /// 응답 JSON 해석 실패
    JsonParseFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::RequestFailed { endpoint, source } => {
                write!(f, "API 요청 실패 ({}): {}", endpoint, source)
            }
            ApiError::BadResponse {
                endpoint,
                code,
                message,
            } => {
                write!(
                    f,
                    "API 오류 응답 ({}): code={:?}, message={:?}",
                    endpoint, code, message
                )
            }
            ApiError::RateLimited { endpoint, retries } => {
                write!(
                    f,
                    "API 요청 빈도 제한 ({}), {}회 재시도 후 포기",
                    endpoint, retries
                )
            }
            ApiError::JsonParseFailed { source } => {
                write!(f, "JSON 해석 실패: {}", source)
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::RequestFailed { source, .. } | ApiError::JsonParseFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 파일 입출력 오류
#[derive(Debug)]
pub enum FileError {
    /// 파일 쓰기 실패
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 파일 읽기 실패
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::WriteFailed { path, source } => {
                write!(f, "파일 쓰기 실패 ({}): {}", path, source)
            }
            FileError::ReadFailed { path, source } => {
                write!(f, "파일 읽기 실패 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::WriteFailed { source, .. } | FileError::ReadFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

// ========== 흔한 오류 타입에서 변환 ==========
// AppError는 std::error::Error를 구현하므로 anyhow 변환은 자동이다.

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            source: Box::new(err),
        })
    }
}

// ========== 편의 생성자 ==========

impl AppError {
    /// API 요청 실패 오류 생성
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 파일 쓰기 실패 오류 생성
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 타입 별칭 ==========

/// 애플리케이션 결과 타입
pub type AppResult<T> = Result<T, AppError>;
