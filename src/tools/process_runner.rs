use crate::signal::CancelToken;
use log::{debug, warn};
use std::ffi::OsString;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;

/// 外部程序的執行結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// 被信號終止時為 `None`
    pub exit_code: Option<i32>,
    pub stdout_lines: Vec<String>,
    pub stderr_lines: Vec<String>,
}

impl ProcessOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// 最後一行非空白的錯誤輸出
    #[must_use]
    pub fn last_error_line(&self) -> Option<&str> {
        self.stderr_lines
            .iter()
            .rev()
            .map(|line| line.trim())
            .find(|line| !line.is_empty())
    }
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("無法啟動 {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("等待 {program} 結束時發生錯誤: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} 已被取消")]
    Cancelled { program: String },
}

/// 執行外部工具的介面
///
/// 核心流程只透過此介面啟動 ffmpeg / ffprobe，測試時可替換為假的實作。
pub trait ProcessRunner: Send + Sync {
    fn run(
        &self,
        program: &Path,
        args: &[OsString],
        cancel: &CancelToken,
    ) -> Result<ProcessOutput, ProcessError>;
}

/// 以 `std::process` 執行外部工具
///
/// 程序執行期間定期檢查取消標記，被取消時終止程序；已結束的程序不會再被處理。
#[derive(Debug, Clone)]
pub struct SystemProcessRunner {
    poll_interval: Duration,
}

impl Default for SystemProcessRunner {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(50),
        }
    }
}

impl SystemProcessRunner {
    #[must_use]
    pub const fn with_poll_interval(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    /// 讀取到 EOF 為止；非 UTF-8 的內容以替代字元保留，不會中斷讀取
    fn spawn_line_reader<R>(stream: Option<R>) -> Option<JoinHandle<Vec<String>>>
    where
        R: Read + Send + 'static,
    {
        stream.map(|s| thread::spawn(move || read_lines_lossy(BufReader::new(s))))
    }

    fn collect_lines(handle: Option<JoinHandle<Vec<String>>>) -> Vec<String> {
        handle
            .and_then(|h| h.join().ok())
            .unwrap_or_default()
    }
}

fn read_lines_lossy<R: BufRead>(mut reader: R) -> Vec<String> {
    let mut lines = Vec::new();
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        match reader.read_until(b'\n', &mut buffer) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buffer);
                lines.push(line.trim_end_matches(['\n', '\r']).to_string());
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => {
                debug!("讀取程序輸出失敗: {e}");
                break;
            }
        }
    }
    lines
}

impl ProcessRunner for SystemProcessRunner {
    fn run(
        &self,
        program: &Path,
        args: &[OsString],
        cancel: &CancelToken,
    ) -> Result<ProcessOutput, ProcessError> {
        let program_name = program.display().to_string();

        if cancel.is_cancelled() {
            return Err(ProcessError::Cancelled {
                program: program_name,
            });
        }

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ProcessError::Launch {
                program: program_name.clone(),
                source,
            })?;

        let pid = child.id();
        debug!("啟動程序 [{pid}]: {program_name}");

        let stdout_reader = Self::spawn_line_reader(child.stdout.take());
        let stderr_reader = Self::spawn_line_reader(child.stderr.take());

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {}
                Err(source) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ProcessError::Wait {
                        program: program_name,
                        source,
                    });
                }
            }

            if cancel.is_cancelled() {
                // 取消前程序可能剛好結束，此時回報實際結果
                if let Ok(Some(status)) = child.try_wait() {
                    break status;
                }
                warn!("終止程序 [{pid}]: {program_name}");
                let _ = child.kill();
                let _ = child.wait();
                Self::collect_lines(stdout_reader);
                Self::collect_lines(stderr_reader);
                return Err(ProcessError::Cancelled {
                    program: program_name,
                });
            }

            thread::sleep(self.poll_interval);
        };

        Ok(ProcessOutput {
            exit_code: status.code(),
            stdout_lines: Self::collect_lines(stdout_reader),
            stderr_lines: Self::collect_lines(stderr_reader),
        })
    }
}
