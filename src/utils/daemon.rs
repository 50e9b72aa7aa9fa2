use crate::error::{Result, SwitcherError};
use nix::unistd::{fork, ForkResult};

/// Результат ухода в фон.
pub enum Forked {
    Parent { child: i32 },
    Child,
}

/// Уйти в фон через fork. Вызывать строго до старта tokio runtime: после
/// появления рабочих потоков fork небезопасен.
pub fn daemonize() -> Result<Forked> {
    match unsafe { fork() } {
        Ok(ForkResult::Parent { child }) => Ok(Forked::Parent {
            child: child.as_raw(),
        }),
        Ok(ForkResult::Child) => Ok(Forked::Child),
        Err(e) => Err(SwitcherError::Internal(format!("fork не удался: {}", e))),
    }
}
