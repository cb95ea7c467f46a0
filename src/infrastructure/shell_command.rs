use std::io::{BufRead, BufReader, Read};
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, Stdio};
use std::thread;

use log::{debug, warn};

use crate::domain::command_service::CommandService;
use crate::error::EmonitorError;

/// Запускает команды через `sh -c`
pub struct ShellCommandService {
    shell: String,
}

impl ShellCommandService {
    pub fn new() -> Self {
        Self {
            shell: "sh".to_string(),
        }
    }

    fn command(&self, command: &str) -> Command {
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c").arg(command).stdin(Stdio::null());
        cmd
    }

    /// Ждёт завершения процесса в отдельном потоке, чтобы не оставлять зомби
    fn reap_in_background(mut child: Child) {
        thread::spawn(move || {
            if let Err(e) = child.wait() {
                warn!("emonitor: failed to wait for child {}: {}", child.id(), e);
            }
        });
    }
}

impl Default for ShellCommandService {
    fn default() -> Self {
        Self::new()
    }
}

/// Декодирует прочитанные байты. Обрезанный на границе лимита UTF-8 символ
/// отбрасывается, прочие невалидные последовательности заменяются.
fn decode_line(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            let utf8_error = e.utf8_error();
            let mut bytes = e.into_bytes();
            if utf8_error.error_len().is_none() {
                bytes.truncate(utf8_error.valid_up_to());
            }
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }
}

impl CommandService for ShellCommandService {
    fn read_first_line(&self, command: &str, max_len: usize) -> Result<Option<String>, EmonitorError> {
        let mut child = self
            .command(command)
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| EmonitorError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let mut line = Vec::new();
        let read = match child.stdout.take() {
            Some(stdout) => {
                let mut reader = BufReader::new(stdout).take(max_len as u64);
                reader.read_until(b'\n', &mut line)
            }
            None => Ok(0),
        };

        // Пайп уже закрыт: дожидаемся завершения, как это делает pclose
        if let Err(e) = child.wait() {
            warn!("emonitor: failed to wait for {:?}: {}", command, e);
        }

        let read = read.map_err(|source| EmonitorError::ReadOutput {
            command: command.to_string(),
            source,
        })?;

        if read == 0 {
            return Ok(None);
        }
        Ok(Some(decode_line(line)))
    }

    fn spawn_detached(&self, command: &str) -> Result<(), EmonitorError> {
        let child = self
            .command(command)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .process_group(0)
            .spawn()
            .map_err(|source| EmonitorError::Spawn {
                command: command.to_string(),
                source,
            })?;

        debug!("emonitor: spawned {:?} as pid {}", command, child.id());
        Self::reap_in_background(child);
        Ok(())
    }
}
