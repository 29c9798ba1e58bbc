use log::{debug, info};

use crate::toast::{ToastLevel, ToastSink};

/// Permission state mirroring the browser notification model: a request is
/// only ever made from `Default`, and a granted/denied answer is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Default,
    Granted,
    Denied,
}

/// Host-side permission dialog. Resolution is synchronous from the hub's
/// perspective and cannot be cancelled once requested.
pub trait PermissionPrompt {
    fn request(&mut self) -> Permission;
}

/// Prompt used by the terminal binary, where there is no dialog to show.
pub struct AutoGrantPrompt;

impl PermissionPrompt for AutoGrantPrompt {
    fn request(&mut self) -> Permission {
        Permission::Granted
    }
}

pub struct NotificationHub {
    permission: Permission,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self {
            permission: Permission::Default,
        }
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    /// Ask the host for permission, once. Repeat calls after an answer are
    /// no-ops, which makes the un-cancellable startup timer safe.
    pub fn request_permission(
        &mut self,
        prompt: &mut dyn PermissionPrompt,
        toasts: &mut dyn ToastSink,
    ) {
        if self.permission != Permission::Default {
            return;
        }
        self.permission = prompt.request();
        if self.permission == Permission::Granted {
            toasts.toast("Notifications enabled", ToastLevel::Success);
        }
    }

    /// Deliver a notification if permission was granted; otherwise drop it.
    pub fn notify(&self, title: &str, body: &str) {
        if self.permission == Permission::Granted {
            info!("{title}: {body}");
        } else {
            debug!("notification suppressed ({title})");
        }
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::MemorySink;

    struct CountingPrompt {
        answer: Permission,
        calls: usize,
    }

    impl PermissionPrompt for CountingPrompt {
        fn request(&mut self) -> Permission {
            self.calls += 1;
            self.answer
        }
    }

    #[test]
    fn requests_only_from_default_state() {
        let mut hub = NotificationHub::new();
        let mut prompt = CountingPrompt {
            answer: Permission::Granted,
            calls: 0,
        };
        let mut toasts = MemorySink::new();

        hub.request_permission(&mut prompt, &mut toasts);
        hub.request_permission(&mut prompt, &mut toasts);

        assert_eq!(prompt.calls, 1);
        assert_eq!(hub.permission(), Permission::Granted);
        assert_eq!(toasts.entries.len(), 1);
        assert_eq!(toasts.entries[0].0, "Notifications enabled");
    }

    #[test]
    fn denied_answer_emits_no_toast() {
        let mut hub = NotificationHub::new();
        let mut prompt = CountingPrompt {
            answer: Permission::Denied,
            calls: 0,
        };
        let mut toasts = MemorySink::new();

        hub.request_permission(&mut prompt, &mut toasts);

        assert_eq!(hub.permission(), Permission::Denied);
        assert!(toasts.entries.is_empty());
    }
}
