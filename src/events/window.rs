use std::fmt;

/// Событие жизненного цикла окна, приведённое к внутренней модели.
///
/// Транспорт отдаёт свои wire-события; в ядро попадает только идентификатор
/// контейнера и вид события.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowEvent {
    pub container_id: i64,
    pub kind: WindowEventKind,
}

impl WindowEvent {
    pub fn focus(container_id: i64) -> Self {
        Self {
            container_id,
            kind: WindowEventKind::Focus,
        }
    }

    pub fn close(container_id: i64) -> Self {
        Self {
            container_id,
            kind: WindowEventKind::Close,
        }
    }
}

impl fmt::Display for WindowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            WindowEventKind::Focus => write!(f, "focus(id={})", self.container_id),
            WindowEventKind::Close => write!(f, "close(id={})", self.container_id),
        }
    }
}

/// Вид события окна
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowEventKind {
    Focus,
    Close,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_event_creation() {
        let event = WindowEvent::focus(42);
        assert_eq!(event.container_id, 42);
        assert_eq!(event.kind, WindowEventKind::Focus);

        let event = WindowEvent::close(7);
        assert_eq!(event.kind, WindowEventKind::Close);
    }

    #[test]
    fn test_window_event_display() {
        assert_eq!(WindowEvent::focus(1).to_string(), "focus(id=1)");
        assert_eq!(WindowEvent::close(2).to_string(), "close(id=2)");
    }
}
