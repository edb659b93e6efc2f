//! 事件迴圈
//!
//! 單一任務持有 [`Controller`]，依序處理伺服器輸出與控制台輸入，
//! 每個事件處理完才接下一個。

use repostcore::{Clock, Controller, Outbound, Player};
use tokio::io::AsyncWrite;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::server::write_line;

/// 從 channel 取出一批輸出：先等一行，再收走所有已在排隊的行
pub async fn next_batch(rx: &mut mpsc::Receiver<String>) -> Option<Vec<String>> {
    let first = rx.recv().await?;
    let mut batch = vec![first];
    while let Ok(line) = rx.try_recv() {
        batch.push(line);
    }
    Some(batch)
}

/// 把控制器產生的動作寫到伺服器
pub async fn deliver<W: AsyncWrite + Unpin>(writer: &mut W, outbound: Vec<Outbound>) {
    for out in outbound {
        match out.render() {
            Ok(Some(cmd)) => {
                if let Err(e) = write_line(writer, &cmd).await {
                    error!("寫入伺服器失敗: {}", e);
                }
            }
            Ok(None) => {
                if let Outbound::Tell { message, .. } = &out {
                    info!("[CONSOLE] {}", message);
                }
            }
            Err(e) => error!("無法產生 tellraw 內容: {}", e),
        }
    }
}

/// 主迴圈，伺服器輸出結束時回傳
///
/// 控制台輸入原樣轉送給伺服器，同時以控制台身分交給控制器。
pub async fn run<C, W>(
    controller: &mut Controller<C>,
    server_in: &mut W,
    server_out: &mut mpsc::Receiver<String>,
    console: &mut mpsc::Receiver<String>,
) where
    C: Clock,
    W: AsyncWrite + Unpin,
{
    let mut console_open = true;

    loop {
        tokio::select! {
            biased;

            line = console.recv(), if console_open => {
                match line {
                    Some(line) => {
                        if let Err(e) = write_line(server_in, &line).await {
                            error!("寫入伺服器失敗: {}", e);
                        }
                        let outbound = controller.on_player_input(&Player::console(), &line);
                        deliver(server_in, outbound).await;
                    }
                    None => console_open = false,
                }
            }
            batch = next_batch(server_out) => {
                let Some(batch) = batch else {
                    break;
                };
                for line in &batch {
                    println!("{}", line);
                }
                let outbound = controller.on_server_output_batch(&batch);
                deliver(server_in, outbound).await;
            }
        }
    }

    controller.on_server_stop();
}
