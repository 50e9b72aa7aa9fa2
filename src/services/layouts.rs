use crate::error::Result;
use crate::layout::LayoutSnapshot;
use crate::services::transport::Transport;
use std::collections::HashMap;
use tracing::debug;

/// Считывает текущий снимок раскладок со всех клавиатур.
///
/// Чистое чтение, один round trip к транспорту. Ошибки транспорта
/// пробрасываются наверх без восстановления.
pub async fn read_snapshot(transport: &dyn Transport) -> Result<LayoutSnapshot> {
    let mut map = HashMap::new();

    for device in transport.get_inputs().await? {
        if !device.is_keyboard() {
            continue;
        }
        if let Some(index) = device.active_layout_index {
            map.insert(device.identifier, index);
        }
    }

    Ok(LayoutSnapshot::PerDevice(map))
}

/// Применяет снимок раскладки: одна команда на затронутое устройство,
/// последовательно. Порядок между устройствами значения не имеет.
pub async fn apply_snapshot(transport: &dyn Transport, snapshot: &LayoutSnapshot) -> Result<()> {
    match snapshot {
        LayoutSnapshot::Name(name) => {
            // Имя разрешаем в индекс по каждой клавиатуре отдельно
            for device in transport.get_inputs().await? {
                if !device.is_keyboard() {
                    continue;
                }
                match device
                    .layout_names
                    .iter()
                    .position(|candidate| candidate == name)
                {
                    Some(index) => switch(transport, &device.identifier, index).await?,
                    None => {
                        // У этой клавиатуры нет раскладки с таким именем
                        debug!(
                            "У устройства {} нет раскладки \"{}\" - пропускаем",
                            device.identifier, name
                        );
                    }
                }
            }
        }
        LayoutSnapshot::PerDevice(map) => {
            for (identifier, index) in map {
                switch(transport, identifier, *index).await?;
            }
        }
    }

    Ok(())
}

async fn switch(transport: &dyn Transport, identifier: &str, index: usize) -> Result<()> {
    transport
        .run_command(&format!("input {} xkb_switch_layout {}", identifier, index))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::transport::DryRunTransport;

    #[tokio::test]
    async fn test_read_snapshot_filters_keyboards() {
        let transport = DryRunTransport::with_default_devices();

        let snapshot = read_snapshot(&transport).await.unwrap();
        let LayoutSnapshot::PerDevice(map) = snapshot else {
            panic!("ожидался снимок по устройствам");
        };

        // Мышь в снимок не попадает
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("1:1:AT_Translated_Set_2_keyboard"), Some(&0));
    }

    #[tokio::test]
    async fn test_apply_per_device_snapshot() {
        let transport = DryRunTransport::with_default_devices();

        let mut map = HashMap::new();
        map.insert("1:1:AT_Translated_Set_2_keyboard".to_string(), 1);
        apply_snapshot(&transport, &LayoutSnapshot::PerDevice(map))
            .await
            .unwrap();

        assert_eq!(
            transport.sent_commands(),
            vec!["input 1:1:AT_Translated_Set_2_keyboard xkb_switch_layout 1"]
        );
    }

    #[tokio::test]
    async fn test_apply_uniform_name_resolves_index() {
        let transport = DryRunTransport::with_default_devices();

        apply_snapshot(&transport, &LayoutSnapshot::name("Russian"))
            .await
            .unwrap();

        assert_eq!(
            transport.sent_commands(),
            vec!["input 1:1:AT_Translated_Set_2_keyboard xkb_switch_layout 1"]
        );
        let inputs = transport.get_inputs().await.unwrap();
        assert_eq!(inputs[0].active_layout_index, Some(1));
    }

    #[tokio::test]
    async fn test_apply_uniform_name_skips_unknown_layout() {
        let transport = DryRunTransport::with_default_devices();

        // Ни у одной клавиатуры нет такой раскладки - команды не уходят
        apply_snapshot(&transport, &LayoutSnapshot::name("German"))
            .await
            .unwrap();

        assert!(transport.sent_commands().is_empty());
    }
}
