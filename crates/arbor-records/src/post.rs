use arbor_auth::Account;
use arbor_auth::Identity;
use arbor_core::ID;
use arbor_core::Unique;
use serde::Deserialize;
use serde::Serialize;

/// Forum post with embedded, ordered replies.
///
/// Posting a reply is open to any authenticated identity; deleting one is
/// authorized against the reply's own author, never the post's.
#[derive(Debug, Clone, Serialize)]
pub struct ForumPost {
    id: ID<Self>,
    title: String,
    body: String,
    replies: Vec<Reply>,
    author_id: ID<Account>,
    author_name: String,
    created_at: String,
}

impl ForumPost {
    pub fn new(draft: PostDraft, author: &Identity) -> Self {
        Self {
            id: ID::default(),
            title: draft.title,
            body: draft.body,
            replies: Vec::new(),
            author_id: author.id(),
            author_name: author.name().to_string(),
            created_at: arbor_core::timestamp(),
        }
    }
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn body(&self) -> &str {
        &self.body
    }
    pub fn replies(&self) -> &[Reply] {
        &self.replies
    }
    pub fn author(&self) -> ID<Account> {
        self.author_id
    }
    pub fn author_name(&self) -> &str {
        &self.author_name
    }
    pub fn created(&self) -> &str {
        &self.created_at
    }
}

impl Unique for ForumPost {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl From<tokio_postgres::Row> for ForumPost {
    fn from(row: tokio_postgres::Row) -> Self {
        Self {
            id: ID::from(row.get::<_, uuid::Uuid>(0)),
            title: row.get(1),
            body: row.get(2),
            replies: serde_json::from_value(row.get::<_, serde_json::Value>(3))
                .unwrap_or_default(),
            author_id: ID::from(row.get::<_, uuid::Uuid>(4)),
            author_name: row.get(5),
            created_at: row.get(6),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl PostPatch {
    pub(crate) fn changes(&self) -> Vec<(&'static str, &(dyn tokio_postgres::types::ToSql + Sync))> {
        let mut set: Vec<(&'static str, &(dyn tokio_postgres::types::ToSql + Sync))> = Vec::new();
        if let Some(ref title) = self.title {
            set.push(("title", title));
        }
        if let Some(ref body) = self.body {
            set.push(("body", body));
        }
        set
    }
    pub fn is_empty(&self) -> bool {
        self.changes().is_empty()
    }
}

/// Reply embedded in a post document. Carries its own author attribute,
/// distinct from the parent post's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    id: ID<Self>,
    body: String,
    author_id: ID<Account>,
    author_name: String,
    created_at: String,
}

impl Reply {
    pub fn new(draft: ReplyDraft, author: &Identity) -> Self {
        Self {
            id: ID::default(),
            body: draft.body,
            author_id: author.id(),
            author_name: author.name().to_string(),
            created_at: arbor_core::timestamp(),
        }
    }
    pub fn body(&self) -> &str {
        &self.body
    }
    pub fn author(&self) -> ID<Account> {
        self.author_id
    }
    pub fn author_name(&self) -> &str {
        &self.author_name
    }
}

impl Unique for Reply {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplyDraft {
    pub body: String,
}

mod schema {
    use arbor_pg::*;

    impl Schema for super::ForumPost {
        fn name() -> &'static str {
            POSTS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                POSTS,
                " (
                    id           UUID PRIMARY KEY,
                    title        VARCHAR(255) NOT NULL,
                    body         TEXT NOT NULL,
                    replies      JSONB NOT NULL DEFAULT '[]'::jsonb,
                    author_id    UUID NOT NULL REFERENCES ",
                USERS,
                "(id),
                    author_name  VARCHAR(255) NOT NULL,
                    created_at   TEXT NOT NULL
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_posts_author ON ",
                POSTS,
                " (author_id);"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author() -> Identity {
        Identity::new(
            ID::default(),
            "a@x.com".to_string(),
            "Aunt May".to_string(),
            false,
        )
    }

    #[test]
    fn reply_document_carries_its_own_author() {
        let me = author();
        let reply = Reply::new(
            ReplyDraft {
                body: "welcome!".to_string(),
            },
            &me,
        );
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["author_id"], me.id().to_string());
        assert_eq!(json["author_name"], "Aunt May");
        assert_eq!(json["id"], reply.id().to_string());
    }

    #[test]
    fn post_author_is_the_creating_identity() {
        let me = author();
        let post = ForumPost::new(
            PostDraft {
                title: "hello".to_string(),
                body: "first post".to_string(),
            },
            &me,
        );
        assert_eq!(post.author(), me.id());
        assert!(post.replies().is_empty());
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(PostPatch::default().is_empty());
    }
}
