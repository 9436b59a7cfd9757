use serde::Deserialize;

/// A single comment as returned by the comment service.
///
/// The service either returns a tree (with `replies` populated) or a flat
/// paginated list where nesting must be reconstructed from `parent_id`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    #[serde(default)]
    pub author_name: Option<String>,
    /// Precomputed identity hash; the service never exposes raw emails.
    #[serde(default)]
    pub author_email_hash: Option<String>,
    pub content: String,
    pub created_at: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub replies: Option<Vec<Comment>>,
}

impl Comment {
    /// Display name for the author, falling back to "Anonymous"
    pub fn display_name(&self) -> &str {
        match self.author_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => "Anonymous",
        }
    }
}

/// Identifies one page's comment thread on the service.
///
/// Built once from config when a thread view opens; immutable for the
/// lifetime of that view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    pub host: String,
    pub app_id: String,
    pub page_id: String,
    pub page_title: String,
    pub page_url: String,
}

/// The comment a draft replies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyTarget {
    pub parent_id: String,
    pub parent_author: String,
}

/// Which composer field a validation failure points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Email,
    Content,
}

/// An in-progress comment composition. Created empty when the composer
/// opens, discarded on close or successful submit, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub author_name: String,
    pub author_email: String,
    pub content: String,
    pub reply_target: Option<ReplyTarget>,
}

impl Draft {
    pub fn new(reply_target: Option<ReplyTarget>) -> Self {
        Self {
            author_name: String::new(),
            author_email: String::new(),
            content: String::new(),
            reply_target,
        }
    }

    pub fn is_reply(&self) -> bool {
        self.reply_target.is_some()
    }

    /// Mutable access to the text field the composer currently edits
    pub fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Name => &mut self.author_name,
            DraftField::Email => &mut self.author_email,
            DraftField::Content => &mut self.content,
        }
    }

    /// Composer title for this draft's mode
    pub fn title(&self) -> &'static str {
        if self.is_reply() {
            "Leave a Reply"
        } else {
            "Leave a Comment"
        }
    }

    /// Context line shown under the title in reply mode
    pub fn context_line(&self) -> Option<String> {
        self.reply_target
            .as_ref()
            .map(|t| format!("Replying to {}", t.parent_author))
    }

    /// Local validation, run before any network call. Returns the field
    /// that should receive focus when a required value is missing.
    pub fn validate(&self) -> Result<(), DraftField> {
        if self.author_name.trim().is_empty() {
            return Err(DraftField::Name);
        }
        if self.content.trim().is_empty() {
            return Err(DraftField::Content);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment_with_name(name: Option<&str>) -> Comment {
        Comment {
            id: "c1".to_string(),
            author_name: name.map(|n| n.to_string()),
            author_email_hash: None,
            content: "hello".to_string(),
            created_at: "2024-01-15T10:00:00Z".to_string(),
            parent_id: None,
            replies: None,
        }
    }

    #[test]
    fn test_display_name_present() {
        let c = comment_with_name(Some("Alice"));
        assert_eq!(c.display_name(), "Alice");
    }

    #[test]
    fn test_display_name_missing() {
        assert_eq!(comment_with_name(None).display_name(), "Anonymous");
    }

    #[test]
    fn test_display_name_blank() {
        assert_eq!(comment_with_name(Some("")).display_name(), "Anonymous");
        assert_eq!(comment_with_name(Some("   ")).display_name(), "Anonymous");
    }

    #[test]
    fn test_draft_starts_empty() {
        let draft = Draft::new(None);
        assert!(draft.author_name.is_empty());
        assert!(draft.author_email.is_empty());
        assert!(draft.content.is_empty());
        assert!(!draft.is_reply());
    }

    #[test]
    fn test_draft_titles() {
        let draft = Draft::new(None);
        assert_eq!(draft.title(), "Leave a Comment");
        assert_eq!(draft.context_line(), None);

        let reply = Draft::new(Some(ReplyTarget {
            parent_id: "c9".to_string(),
            parent_author: "Alice".to_string(),
        }));
        assert_eq!(reply.title(), "Leave a Reply");
        assert_eq!(reply.context_line().as_deref(), Some("Replying to Alice"));
    }

    #[test]
    fn test_validate_empty_name() {
        let mut draft = Draft::new(None);
        draft.content = "some text".to_string();
        assert_eq!(draft.validate(), Err(DraftField::Name));

        // Whitespace-only counts as empty
        draft.author_name = "   ".to_string();
        assert_eq!(draft.validate(), Err(DraftField::Name));
    }

    #[test]
    fn test_validate_empty_content() {
        let mut draft = Draft::new(None);
        draft.author_name = "Alice".to_string();
        assert_eq!(draft.validate(), Err(DraftField::Content));

        draft.content = "\n  ".to_string();
        assert_eq!(draft.validate(), Err(DraftField::Content));
    }

    #[test]
    fn test_validate_ok_without_email() {
        let mut draft = Draft::new(None);
        draft.author_name = "Alice".to_string();
        draft.content = "hello".to_string();
        assert_eq!(draft.validate(), Ok(()));
    }
}
