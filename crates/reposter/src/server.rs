//! 遊戲伺服器行程
//!
//! 啟動伺服器子行程，stdout 逐行送進 channel，命令寫入 stdin。

use std::io;
use std::process::{ExitStatus, Stdio};

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// 伺服器行程錯誤
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("無法啟動伺服器: {0}")]
    Spawn(#[source] io::Error),

    #[error("無法取得伺服器 {0}")]
    MissingPipe(&'static str),

    #[error("伺服器 I/O 錯誤: {0}")]
    Io(#[from] io::Error),
}

/// 執行中的伺服器
pub struct ServerProcess {
    child: Child,
    stdin: ChildStdin,
}

impl ServerProcess {
    /// 啟動伺服器，回傳行程與 stdout 行的接收端
    pub fn spawn(program: &str, args: &[String]) -> Result<(Self, mpsc::Receiver<String>), ServerError> {
        info!("正在啟動伺服器: {} {}", program, args.join(" "));

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(ServerError::Spawn)?;

        let stdin = child.stdin.take().ok_or(ServerError::MissingPipe("stdin"))?;
        let stdout = child.stdout.take().ok_or(ServerError::MissingPipe("stdout"))?;

        let (tx, rx) = mpsc::channel(1024);
        tokio::spawn(read_lines(stdout, tx));

        Ok((Self { child, stdin }, rx))
    }

    /// 伺服器輸入
    pub fn stdin(&mut self) -> &mut ChildStdin {
        &mut self.stdin
    }

    /// 等待伺服器結束
    pub async fn wait(&mut self) -> Result<ExitStatus, ServerError> {
        Ok(self.child.wait().await?)
    }
}

/// 寫入一行命令
pub async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, line: &str) -> io::Result<()> {
    writer.write_all(format!("{}\n", line).as_bytes()).await?;
    writer.flush().await?;
    debug!("已發送: {}", line);
    Ok(())
}

/// 逐行讀取並送到 channel，讀到 EOF 或接收端關閉時結束
///
/// 非 UTF-8 的位元組以替代字元取代，不中斷讀取。
pub async fn read_lines<R: AsyncRead + Unpin>(reader: R, tx: mpsc::Sender<String>) {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => {
                debug!("輸出已結束");
                break;
            }
            Ok(_) => {
                while matches!(buf.last(), Some(b'\n' | b'\r')) {
                    buf.pop();
                }
                let line = match std::str::from_utf8(&buf) {
                    Ok(line) => line.to_string(),
                    Err(e) => {
                        warn!("輸出含無效 UTF-8 位元組: {}", e);
                        String::from_utf8_lossy(&buf).into_owned()
                    }
                };
                if tx.send(line).await.is_err() {
                    warn!("接收端已關閉");
                    break;
                }
            }
            Err(e) => {
                warn!("讀取錯誤: {}", e);
                break;
            }
        }
    }
}
