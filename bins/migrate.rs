use dotenvy::dotenv;
use migration::MigratorTrait;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug, Clone, Copy)]
enum Command {
    Up,
    Down,
    Status,
}

impl Command {
    fn from_args() -> anyhow::Result<Self> {
        match std::env::args().nth(1).as_deref() {
            None | Some("up") => Ok(Self::Up),
            Some("down") => Ok(Self::Down),
            Some("status") => Ok(Self::Status),
            Some(other) => Err(anyhow::anyhow!("unknown command '{}'; expected up, down or status", other)),
        }
    }
}

fn load_config() -> models::db::DatabaseConfig {
    // 优先 config.toml（CONFIG_PATH），否则回退到 DATABASE_URL
    match configs::AppConfig::load_and_validate() {
        Ok(cfg) => {
            common::utils::logging::init_logging(cfg.logging.json);
            models::db::DatabaseConfig::from(&cfg.database)
        }
        Err(e) => {
            common::utils::logging::init_logging_default();
            info!(service = "migrate", event = "config_fallback", reason = %e, "config.toml unavailable; using DATABASE_URL");
            models::db::DatabaseConfig::from_env()
        }
    }
}

async fn run(command: Command, cfg: &models::db::DatabaseConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(cfg).await?;
    match command {
        Command::Up => migration::Migrator::up(&db, None).await?,
        Command::Down => migration::Migrator::down(&db, Some(1)).await?,
        Command::Status => migration::Migrator::status(&db).await?,
    }
    Ok(())
}

fn main() -> std::process::ExitCode {
    // 提前加载 .env，使得 RUST_LOG / DATABASE_URL 生效
    dotenv().ok();
    let cfg = load_config();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    let command = match Command::from_args() {
        Ok(c) => c,
        Err(e) => {
            error!(service = "migrate", event = "bad_args", error = %e, "invalid arguments");
            return std::process::ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "migrate", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(service = "migrate", event = "start", %service_id, pid, version, ?command, "migration starting");

    match rt.block_on(run(command, &cfg)) {
        Ok(()) => {
            info!(service = "migrate", event = "done", %service_id, ?command, "migration finished");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "migrate", event = "failed", %service_id, error = %e, "migration failed");
            std::process::ExitCode::FAILURE
        }
    }
}
