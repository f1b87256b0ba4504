use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use tracing::info;

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    // 优先使用 config.toml，缺失时回退到环境变量
    let cfg = AppConfig::load_and_validate()?;
    let workers = cfg.server.worker_threads.unwrap_or(4);
    info!(workers, "building runtime");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(workers)
        .enable_all()
        .build()?;
    runtime.block_on(server::run_with_config(cfg))
}
