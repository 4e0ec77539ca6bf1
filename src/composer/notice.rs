// Transient notices shown in the notice bar.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoticeVariant {
    #[default]
    Default,
    Destructive,
}

/// A short message for the user: a title, an optional description, and
/// whether it reports a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: Option<String>,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            variant: NoticeVariant::Default,
        }
    }

    /// A failure notice. An empty `message` is replaced by `fallback`.
    pub fn destructive(title: impl Into<String>, message: &str, fallback: &str) -> Self {
        let message = message.trim();
        let description = if message.is_empty() { fallback } else { message };
        Self {
            title: title.into(),
            description: Some(description.to_string()),
            variant: NoticeVariant::Destructive,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }
}
