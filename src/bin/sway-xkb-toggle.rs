//! Одноразовый переключатель раскладки с учётом Emacs.
//!
//! В обычном окне переключает xkb-раскладку клавиатуры на следующую.
//! В окне Emacs вместо этого переключает собственный метод ввода
//! редактора через emacsclient, чтобы раскладка системы не расходилась
//! с состоянием буфера.

use anyhow::{Context, Result};
use clap::Parser;
use std::process::Command;
use swayipc_async::{Connection, Node};

#[derive(Parser, Debug)]
#[command(name = "sway-xkb-toggle", version)]
#[command(about = "Переключение раскладки/метода ввода с учётом Emacs")]
struct Args {
    /// Идентификатор клавиатуры для xkb_switch_layout
    #[arg(short, long, default_value = "1:1:AT_Translated_Set_2_keyboard")]
    keyboard: String,

    /// app_id/класс окна, в котором переключается метод ввода редактора
    #[arg(long, default_value = "Emacs")]
    editor_class: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut connection = Connection::new().await?;
    let tree = connection.get_tree().await?;

    let focused_is_editor = find_focused(&tree)
        .and_then(window_class)
        .is_some_and(|class| class == args.editor_class);

    if focused_is_editor {
        let status = Command::new("emacsclient")
            .arg("-e")
            .arg("(with-current-buffer (window-buffer) (toggle-input-method))")
            .status()
            .context("Не удалось запустить emacsclient")?;
        anyhow::ensure!(status.success(), "emacsclient завершился с ошибкой");
        return Ok(());
    }

    for outcome in connection
        .run_command(format!("input {} xkb_switch_layout next", args.keyboard))
        .await?
    {
        outcome?;
    }

    Ok(())
}

fn find_focused(node: &Node) -> Option<&Node> {
    if node.focused {
        return Some(node);
    }
    node.nodes
        .iter()
        .chain(node.floating_nodes.iter())
        .find_map(find_focused)
}

fn window_class(node: &Node) -> Option<&str> {
    node.app_id.as_deref().or_else(|| {
        node.window_properties
            .as_ref()
            .and_then(|props| props.class.as_deref())
    })
}
