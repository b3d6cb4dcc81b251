use arbor_auth::Account;
use arbor_core::ID;
use arbor_core::Unique;
use serde::Deserialize;
use serde::Serialize;

/// Family member profile with an embedded, ordered photo album.
///
/// `parent_id` is stored verbatim and never validated or traversed; the
/// "tree" is a flat collection with an optional parent pointer.
/// `created_by` is immutable after creation and is the sole authorization
/// dimension.
#[derive(Debug, Clone, Serialize)]
pub struct FamilyMember {
    id: ID<Self>,
    name: String,
    relationship: String,
    birth_date: Option<String>,
    bio: Option<String>,
    photo_url: Option<String>,
    parent_id: Option<ID<FamilyMember>>,
    photos: Vec<Photo>,
    created_by: ID<Account>,
    created_at: String,
}

impl FamilyMember {
    pub fn new(draft: MemberDraft, owner: ID<Account>) -> Self {
        Self {
            id: ID::default(),
            name: draft.name,
            relationship: draft.relationship,
            birth_date: draft.birth_date,
            bio: draft.bio,
            photo_url: draft.photo_url,
            parent_id: draft.parent_id,
            photos: Vec::new(),
            created_by: owner,
            created_at: arbor_core::timestamp(),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn relationship(&self) -> &str {
        &self.relationship
    }
    pub fn birth_date(&self) -> Option<&str> {
        self.birth_date.as_deref()
    }
    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }
    pub fn photo_url(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }
    pub fn parent(&self) -> Option<ID<FamilyMember>> {
        self.parent_id
    }
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }
    pub fn owner(&self) -> ID<Account> {
        self.created_by
    }
    pub fn created(&self) -> &str {
        &self.created_at
    }
}

impl Unique for FamilyMember {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl From<tokio_postgres::Row> for FamilyMember {
    fn from(row: tokio_postgres::Row) -> Self {
        Self {
            id: ID::from(row.get::<_, uuid::Uuid>(0)),
            name: row.get(1),
            relationship: row.get(2),
            birth_date: row.get(3),
            bio: row.get(4),
            photo_url: row.get(5),
            parent_id: row.get::<_, Option<uuid::Uuid>>(6).map(ID::from),
            photos: serde_json::from_value(row.get::<_, serde_json::Value>(7))
                .unwrap_or_default(),
            created_by: ID::from(row.get::<_, uuid::Uuid>(8)),
            created_at: row.get(9),
        }
    }
}

/// Fields accepted at member creation.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberDraft {
    pub name: String,
    pub relationship: String,
    pub birth_date: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub parent_id: Option<ID<FamilyMember>>,
}

/// Partial update. Absent fields are left untouched; an entirely absent
/// changeset is rejected before any store access.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberPatch {
    pub name: Option<String>,
    pub relationship: Option<String>,
    pub birth_date: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub parent_id: Option<uuid::Uuid>,
}

impl MemberPatch {
    pub(crate) fn changes(&self) -> Vec<(&'static str, &(dyn tokio_postgres::types::ToSql + Sync))> {
        let mut set: Vec<(&'static str, &(dyn tokio_postgres::types::ToSql + Sync))> = Vec::new();
        if let Some(ref name) = self.name {
            set.push(("name", name));
        }
        if let Some(ref relationship) = self.relationship {
            set.push(("relationship", relationship));
        }
        if let Some(ref birth_date) = self.birth_date {
            set.push(("birth_date", birth_date));
        }
        if let Some(ref bio) = self.bio {
            set.push(("bio", bio));
        }
        if let Some(ref photo_url) = self.photo_url {
            set.push(("photo_url", photo_url));
        }
        if let Some(ref parent_id) = self.parent_id {
            set.push(("parent_id", parent_id));
        }
        set
    }
    pub fn is_empty(&self) -> bool {
        self.changes().is_empty()
    }
}

/// Album entry embedded in a member document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    id: ID<Self>,
    photo_url: String,
    caption: Option<String>,
    added_at: String,
}

impl Photo {
    pub fn new(draft: PhotoDraft) -> Self {
        Self {
            id: ID::default(),
            photo_url: draft.photo_url,
            caption: draft.caption,
            added_at: arbor_core::timestamp(),
        }
    }
    pub fn url(&self) -> &str {
        &self.photo_url
    }
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }
}

impl Unique for Photo {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoDraft {
    pub photo_url: String,
    pub caption: Option<String>,
}

mod schema {
    use arbor_pg::*;

    impl Schema for super::FamilyMember {
        fn name() -> &'static str {
            MEMBERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                MEMBERS,
                " (
                    id            UUID PRIMARY KEY,
                    name          VARCHAR(255) NOT NULL,
                    relationship  VARCHAR(64) NOT NULL,
                    birth_date    TEXT,
                    bio           TEXT,
                    photo_url     TEXT,
                    parent_id     UUID,
                    photos        JSONB NOT NULL DEFAULT '[]'::jsonb,
                    created_by    UUID NOT NULL REFERENCES ",
                USERS,
                "(id),
                    created_at    TEXT NOT NULL
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_members_owner ON ",
                MEMBERS,
                " (created_by);"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_is_empty() {
        assert!(MemberPatch::default().is_empty());
    }

    #[test]
    fn single_field_patch_is_not_empty() {
        let patch = MemberPatch {
            bio: Some("keeper of the recipes".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        assert_eq!(patch.changes().len(), 1);
        assert_eq!(patch.changes()[0].0, "bio");
    }

    #[test]
    fn unknown_json_fields_do_not_count_as_changes() {
        let patch: MemberPatch =
            serde_json::from_str(r#"{"created_by": "intruder", "nickname": "x"}"#).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn photo_document_shape() {
        let photo = Photo::new(PhotoDraft {
            photo_url: "/uploads/abc.jpg".to_string(),
            caption: Some("reunion".to_string()),
        });
        let json = serde_json::to_value(&photo).unwrap();
        assert_eq!(json["photo_url"], "/uploads/abc.jpg");
        assert_eq!(json["caption"], "reunion");
        assert_eq!(json["id"], photo.id().to_string());
        assert!(json["added_at"].is_string());
    }

    #[test]
    fn member_owner_is_set_at_creation() {
        let owner = ID::default();
        let member = FamilyMember::new(
            MemberDraft {
                name: "Grandma June".to_string(),
                relationship: "grandmother".to_string(),
                birth_date: None,
                bio: None,
                photo_url: None,
                parent_id: None,
            },
            owner,
        );
        assert_eq!(member.owner(), owner);
        assert!(member.photos().is_empty());
    }
}
