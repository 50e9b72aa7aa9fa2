use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

mod config;
mod error;
mod events;
mod layout;
mod services;
mod utils;

use config::Config;
use services::{create_transport, create_watcher, LayoutSwitcher};
use utils::daemon::{daemonize, Forked};
use utils::LockFile;

#[derive(Parser, Debug)]
#[command(name = "sway-xkb-rust", version)]
#[command(about = "Индивидуальная раскладка клавиатуры для каждого окна в Sway/i3")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "sway-xkb.toml")]
    config: String,

    /// Раскладка по умолчанию для новых окон (например, "English (US)")
    #[arg(short = 'D', long)]
    default_lang: Option<String>,

    /// Режим сухого запуска (без реальных действий)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования
    #[arg(long)]
    log_level: Option<String>,

    /// Путь к файлу лога
    #[arg(long)]
    log_path: Option<PathBuf>,

    /// Запуск в фоне
    #[arg(long)]
    background: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации и наложение опций командной строки
    let mut config = Config::load(&args.config)?;
    if let Some(default_lang) = args.default_lang.clone() {
        config.switcher.default_layout = Some(default_lang);
    }
    if let Some(level) = args.log_level.clone() {
        config.logging.level = level;
    }
    if let Some(path) = args.log_path.clone() {
        config.logging.file = Some(path);
    }
    config.daemon.background |= args.background;
    config.validate()?;

    // Блокировка единственного экземпляра - до ухода в фон, чтобы отказ
    // попал пользователю в терминал
    let mut lock = LockFile::acquire(config.lock_path())?;

    // Fork строго до старта tokio runtime
    if config.daemon.background {
        match daemonize()? {
            Forked::Parent { child } => {
                // Lock-файл теперь принадлежит потомку - не удаляем его в Drop
                std::mem::forget(lock);
                println!("Запущено в фоне, pid {}", child);
                return Ok(());
            }
            Forked::Child => {}
        }
    }

    init_tracing(&config)?;
    lock.write_pid()?;

    info!("Запуск sway-xkb-rust v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {}", args.config);

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run(&config, args.dry_run));

    drop(lock);
    result
}

async fn run(config: &Config, dry_run: bool) -> Result<()> {
    if dry_run {
        warn!("Режим сухого запуска - реальные действия отключены");
    }

    // Инициализация компонентов
    let transport = create_transport(dry_run).await?;
    let switcher = Arc::new(LayoutSwitcher::new(
        transport,
        config.switcher.default_layout.clone(),
    ));
    let watcher = create_watcher(switcher, dry_run)?;

    info!("Все компоненты инициализированы");

    let watcher_handle = tokio::spawn(async move {
        if let Err(e) = watcher.run().await {
            error!("Ошибка в WindowWatcher: {}", e);
        }
    });

    // Ожидание сигнала завершения
    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;
    tokio::select! {
        result = signal::ctrl_c() => match result {
            Ok(()) => info!("Получен сигнал завершения (Ctrl+C)"),
            Err(err) => error!("Ошибка при ожидании сигнала завершения: {}", err),
        },
        _ = sigterm.recv() => info!("Получен сигнал SIGTERM"),
    }

    info!("Завершение работы...");

    // Задача наблюдателя снимается на точке ожидания: обработчик в полёте
    // не прерывается посреди мутации состояния
    watcher_handle.abort();
    let _ = watcher_handle.await;

    info!("sway-xkb-rust завершил работу");
    Ok(())
}

fn init_tracing(config: &Config) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))?;

    let registry = tracing_subscriber::registry().with(filter);

    match &config.logging.file {
        Some(path) => {
            if let Some(dir) = path.parent() {
                if !dir.as_os_str().is_empty() {
                    std::fs::create_dir_all(dir)?;
                }
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file));
            match config.logging.format.as_str() {
                "full" => registry.with(layer).init(),
                _ => registry.with(layer.compact()).init(),
            }
        }
        None => {
            let layer = tracing_subscriber::fmt::layer();
            match config.logging.format.as_str() {
                "full" => registry.with(layer).init(),
                _ => registry.with(layer.compact()).init(),
            }
        }
    }

    Ok(())
}
