//! 命令轉發器
//!
//! 用法：`reposter <config.json> <server command> [args...]`

mod host;
mod server;

use repostcore::{Config, Controller};
use server::ServerProcess;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日誌
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [config_path, program, server_args @ ..] = args.as_slice() else {
        eprintln!("用法: reposter <config.json> <server command> [args...]");
        std::process::exit(2);
    };

    // 載入設定，失敗時使用預設值
    let config = Config::load(config_path).unwrap_or_else(|e| {
        error!("{}，使用預設設定", e);
        Config::default()
    });
    let mut controller = Controller::new(config);

    let (mut server, mut server_out) = match ServerProcess::spawn(program, server_args) {
        Ok(pair) => pair,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    // 控制台輸入
    let (console_tx, mut console_rx) = mpsc::channel(32);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if console_tx.send(line).await.is_err() {
                break;
            }
        }
    });

    host::run(&mut controller, server.stdin(), &mut server_out, &mut console_rx).await;

    let code = match server.wait().await {
        Ok(status) => {
            info!("伺服器已結束: {}", status);
            status.code().unwrap_or(1)
        }
        Err(e) => {
            warn!("無法取得伺服器結束狀態: {}", e);
            1
        }
    };
    std::process::exit(code);
}
