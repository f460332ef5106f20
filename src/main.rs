use anyhow::Result;
use lesson_recommender::utils::logging;
use lesson_recommender::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 로그 초기화
    logging::init();

    // 설정 로드
    let config = Config::from_env();

    // 애플리케이션 초기화 및 실행
    App::initialize(config).await?.run().await?;

    Ok(())
}
