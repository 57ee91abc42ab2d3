use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use log::{debug, error, warn};
use crate::models::batch::{ItemOutcome, ItemStatus};
use crate::models::work_item::WorkItem;
use crate::service::traits::i_service::CommandServiceTrait;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(20);

enum ProcessResult {
    Exited {
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },
    TimedOut,
}

/// Command 服務，透過系統 shell 呼叫外部工具並實現 CommandServiceTrait
pub struct CommandService {
    poll_interval: Duration,
}

impl CommandService {
    pub fn new() -> Self {
        CommandService {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    fn execute(&self, command_line: &str, timeout: Option<Duration>) -> io::Result<ProcessResult> {
        let mut child = shell_command(command_line, timeout.is_some())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // 另開執行緒讀取輸出，避免管線塞滿導致子行程卡住
        let stdout_reader = spawn_reader(child.stdout.take());
        let stderr_reader = spawn_reader(child.stderr.take());

        let status = match timeout {
            None => child.wait()?,
            Some(limit) => match wait_with_timeout(&mut child, limit, self.poll_interval)? {
                Some(status) => status,
                None => {
                    // 整個行程群組已終止，管線關閉後讀取執行緒即會結束
                    join_reader(stdout_reader);
                    join_reader(stderr_reader);
                    return Ok(ProcessResult::TimedOut);
                }
            },
        };

        Ok(ProcessResult::Exited {
            status,
            stdout: join_reader(stdout_reader),
            stderr: join_reader(stderr_reader),
        })
    }
}

impl Default for CommandService {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandServiceTrait for CommandService {
    fn run(&self, item: &WorkItem, command_line: &str, timeout: Option<Duration>) -> ItemOutcome {
        let start = Instant::now();
        debug!("執行指令：{}", command_line);

        let (status, stdout) = match self.execute(command_line, timeout) {
            Ok(ProcessResult::Exited { status, stdout, stderr }) => {
                if status.success() {
                    (ItemStatus::Succeeded, stdout)
                } else {
                    (ItemStatus::Failed { code: status.code(), stderr }, stdout)
                }
            }
            Ok(ProcessResult::TimedOut) => {
                warn!("處理檔案 {} 逾時，已終止外部行程", item.input_path.display());
                (ItemStatus::TimedOut, String::new())
            }
            Err(e) => {
                error!("無法啟動指令 '{}': {}", command_line, e);
                (ItemStatus::SpawnFailed(e.to_string()), String::new())
            }
        };

        ItemOutcome {
            item: item.clone(),
            status,
            stdout,
            elapsed: start.elapsed(),
        }
    }
}

#[cfg(windows)]
fn shell_command(command_line: &str, _own_group: bool) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(command_line);
    command
}

/// 有逾時時讓 shell 自成行程群組，逾時可連同孫行程一併終止；
/// 無逾時則留在前景群組，Ctrl+C 仍會傳到外部工具
#[cfg(unix)]
fn shell_command(command_line: &str, own_group: bool) -> Command {
    use std::os::unix::process::CommandExt;

    let mut command = Command::new("sh");
    command.arg("-c").arg(command_line);
    if own_group {
        command.process_group(0);
    }
    command
}

#[cfg(unix)]
fn kill_process_group(child: &mut Child) -> io::Result<()> {
    let pgid = child.id() as libc::pid_t;
    // SAFETY: kill(2) 只送出訊號；負值 pid 代表以子行程為首的整個群組
    if unsafe { libc::kill(-pgid, libc::SIGKILL) } == 0 {
        Ok(())
    } else {
        let group_err = io::Error::last_os_error();
        child.kill().map_err(|_| group_err)
    }
}

#[cfg(not(unix))]
fn kill_process_group(child: &mut Child) -> io::Result<()> {
    child.kill()
}

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buffer = Vec::new();
            let _ = pipe.read_to_end(&mut buffer);
            String::from_utf8_lossy(&buffer).to_string()
        })
    })
}

fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    handle.and_then(|h| h.join().ok()).unwrap_or_default()
}

/// 輪詢子行程直到結束或逾時；逾時則終止整個行程群組並返回 None
fn wait_with_timeout(child: &mut Child, limit: Duration, poll_interval: Duration) -> io::Result<Option<ExitStatus>> {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        let elapsed = start.elapsed();
        if elapsed >= limit {
            if let Err(e) = kill_process_group(child) {
                warn!("終止子行程失敗: {}", e);
            }
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(poll_interval.min(limit - elapsed));
    }
}
