//! Ownership scoping against a live store. These run only when `DB_URL`
//! points at a reachable PostgreSQL; without it each test returns early.

use arbor_auth::Account;
use arbor_auth::AccountRepository;
use arbor_core::ID;
use arbor_core::Unique;
use arbor_records::*;

fn account(name: &str) -> Account {
    Account::new(
        ID::default(),
        format!("{}@scoping.test", uuid::Uuid::now_v7()),
        name.to_string(),
        false,
    )
}

fn draft(name: &str) -> MemberDraft {
    MemberDraft {
        name: name.to_string(),
        relationship: "cousin".to_string(),
        birth_date: None,
        bio: None,
        photo_url: None,
        parent_id: None,
    }
}

#[tokio::test]
async fn foreign_members_read_as_absent_and_admins_see_everything() {
    if std::env::var("DB_URL").is_err() {
        return;
    }
    let client = arbor_pg::db().await;
    arbor_pg::prepare::<Account>(&client).await.unwrap();
    arbor_pg::prepare::<FamilyMember>(&client).await.unwrap();

    let a = account("A");
    let b = account("B");
    client.create(&a, "hashword-a").await.unwrap();
    client.create(&b, "hashword-b").await.unwrap();

    let member = FamilyMember::new(draft("Grandma June"), a.id());
    client.create_member(&member).await.unwrap();

    let mine = Scope::Owned(a.id());
    let theirs = Scope::Owned(b.id());

    // the owner sees it; a stranger cannot tell it exists
    assert!(client.get_member(mine, member.id()).await.unwrap().is_some());
    assert!(client.get_member(theirs, member.id()).await.unwrap().is_none());

    // listing never returns a record owned by someone else
    assert!(
        client
            .get_members(theirs)
            .await
            .unwrap()
            .iter()
            .all(|m| m.owner() == b.id())
    );

    // writes outside scope are no-ops and leave the record untouched
    let patch = MemberPatch {
        bio: Some("unreachable".to_string()),
        ..Default::default()
    };
    assert!(
        client
            .update_member(theirs, member.id(), &patch)
            .await
            .unwrap()
            .is_none()
    );
    assert!(!client.delete_member(theirs, member.id()).await.unwrap());
    assert!(
        client
            .get_member(mine, member.id())
            .await
            .unwrap()
            .unwrap()
            .bio()
            .is_none()
    );

    // admin scope reaches every record regardless of owner
    assert!(
        client
            .get_member(Scope::Any, member.id())
            .await
            .unwrap()
            .is_some()
    );
    assert!(client.delete_member(Scope::Any, member.id()).await.unwrap());
}

#[tokio::test]
async fn reply_deletion_is_authorized_by_the_reply_author() {
    if std::env::var("DB_URL").is_err() {
        return;
    }
    let client = arbor_pg::db().await;
    arbor_pg::prepare::<Account>(&client).await.unwrap();
    arbor_pg::prepare::<ForumPost>(&client).await.unwrap();

    let poster = account("Poster");
    let replier = account("Replier");
    client.create(&poster, "hashword-p").await.unwrap();
    client.create(&replier, "hashword-r").await.unwrap();

    let post = ForumPost::new(
        PostDraft {
            title: "hello".to_string(),
            body: "first post".to_string(),
        },
        &arbor_auth::Identity::new(
            poster.id(),
            poster.email().to_string(),
            poster.name().to_string(),
            false,
        ),
    );
    client.create_post(&post).await.unwrap();

    let reply = Reply::new(
        ReplyDraft {
            body: "welcome!".to_string(),
        },
        &arbor_auth::Identity::new(
            replier.id(),
            replier.email().to_string(),
            replier.name().to_string(),
            false,
        ),
    );
    assert!(client.add_reply(post.id(), &reply).await.unwrap());

    // the post's author gets no say over someone else's reply
    assert!(
        !client
            .remove_reply(Scope::Owned(poster.id()), post.id(), reply.id())
            .await
            .unwrap()
    );
    // its own author may delete it
    assert!(
        client
            .remove_reply(Scope::Owned(replier.id()), post.id(), reply.id())
            .await
            .unwrap()
    );

    assert!(client.delete_post(Scope::Any, post.id()).await.unwrap());
}
