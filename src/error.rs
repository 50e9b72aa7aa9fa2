use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwitcherError {
    #[error("Ошибка конфигурации: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ошибка IPC Sway/i3: {0}")]
    Ipc(#[from] swayipc_async::Error),

    #[error("Файл блокировки занят: {0}")]
    Lock(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, SwitcherError>;
