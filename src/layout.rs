use std::collections::HashMap;
use std::fmt;

/// Снимок конфигурации раскладок клавиатуры.
///
/// Два представления: единое имя раскладки для всех клавиатур либо
/// карта "идентификатор устройства -> индекс активной раскладки".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutSnapshot {
    /// Имя раскладки, применяется к каждой клавиатуре, у которой есть
    /// раскладка с таким именем. Остальные клавиатуры не трогаем.
    Name(String),
    /// Снимок по устройствам: у каждой известной клавиатуры свой индекс.
    PerDevice(HashMap<String, usize>),
}

impl LayoutSnapshot {
    #[allow(dead_code)]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Снимок без единой клавиатуры. Применение такого снимка - no-op.
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Name(name) => name.is_empty(),
            Self::PerDevice(map) => map.is_empty(),
        }
    }
}

impl fmt::Display for LayoutSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "\"{}\"", name),
            Self::PerDevice(map) => {
                write!(f, "{{")?;
                for (i, (identifier, index)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", identifier, index)?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_snapshot_display() {
        let snapshot = LayoutSnapshot::name("ru");
        assert_eq!(snapshot.to_string(), "\"ru\"");
    }

    #[test]
    fn test_per_device_snapshot_display() {
        let mut map = HashMap::new();
        map.insert("1:1:AT_Translated_Set_2_keyboard".to_string(), 1);
        let snapshot = LayoutSnapshot::PerDevice(map);
        assert_eq!(
            snapshot.to_string(),
            "{1:1:AT_Translated_Set_2_keyboard: 1}"
        );
    }

    #[test]
    fn test_is_empty() {
        assert!(LayoutSnapshot::name("").is_empty());
        assert!(LayoutSnapshot::PerDevice(HashMap::new()).is_empty());
        assert!(!LayoutSnapshot::name("us").is_empty());

        let mut map = HashMap::new();
        map.insert("kbd".to_string(), 0);
        assert!(!LayoutSnapshot::PerDevice(map).is_empty());
    }
}
