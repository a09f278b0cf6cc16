use std::time::Duration;

/// Delay before a new toast slides in.
pub const TOAST_ENTER: Duration = Duration::from_millis(100);
/// How long a toast stays up before it starts leaving.
pub const TOAST_VISIBLE: Duration = Duration::from_millis(3000);
/// Slide-out time before the toast is dropped.
pub const TOAST_LEAVE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    Success,
    Error,
    #[default]
    Info,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            ToastKind::Success => "notification notification-success",
            ToastKind::Error => "notification notification-error",
            ToastKind::Info => "notification notification-info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Shown,
    Leaving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub phase: ToastPhase,
}

impl Toast {
    pub fn class_attr(&self) -> String {
        match self.phase {
            ToastPhase::Shown => format!("{} show", self.kind.class()),
            ToastPhase::Entering | ToastPhase::Leaving => self.kind.class().to_string(),
        }
    }
}

/// Toasts currently on screen, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastQueue {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            kind,
            phase: ToastPhase::Entering,
        });
        id
    }

    /// Moves a toast to `phase`. Unknown ids are ignored.
    pub fn advance(&mut self, id: u64, phase: ToastPhase) {
        if let Some(toast) = self.toasts.iter_mut().find(|t| t.id == id) {
            toast.phase = phase;
        }
    }

    pub fn remove(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_lifecycle() {
        let mut queue = ToastQueue::default();
        let id = queue.push("Opening location in maps...", ToastKind::Success);
        assert_eq!(queue.toasts()[0].phase, ToastPhase::Entering);
        assert_eq!(queue.toasts()[0].class_attr(), "notification notification-success");

        queue.advance(id, ToastPhase::Shown);
        assert_eq!(
            queue.toasts()[0].class_attr(),
            "notification notification-success show"
        );

        queue.advance(id, ToastPhase::Leaving);
        queue.remove(id);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_toast_ids_are_unique() {
        let mut queue = ToastQueue::default();
        let a = queue.push("a", ToastKind::Info);
        queue.remove(a);
        let b = queue.push("b", ToastKind::Error);
        assert_ne!(a, b);

        // late timers for a removed toast do nothing
        queue.advance(a, ToastPhase::Leaving);
        assert_eq!(queue.toasts().len(), 1);
        assert_eq!(queue.toasts()[0].message, "b");
    }
}
