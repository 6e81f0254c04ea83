//! Member adapter operation tests

use teamgate_member_adapter_memory::MemberAdapterMemory;
use teamgate::error::Error;
use teamgate::member_adapter::{CreateMemberData, ListMembersOptions, MemberAdapter, MemberStatus};

fn data<'a>(team_id: &'a str, email: &'a str, name: Option<&'a str>, role: &'a str) -> CreateMemberData<'a> {
	CreateMemberData { team_id, email, name, role, status: MemberStatus::Active }
}

async fn seeded() -> MemberAdapterMemory {
	let adapter = MemberAdapterMemory::new();
	adapter.create_member(data("t1", "ann@example.com", Some("Ann Lee"), "owner")).await.unwrap();
	adapter.create_member(data("t1", "bob@example.com", Some("Bob"), "member")).await.unwrap();
	adapter.create_member(data("t2", "cy@example.com", None, "owner")).await.unwrap();
	adapter
}

#[tokio::test]
async fn test_list_is_scoped_to_team() {
	let adapter = seeded().await;
	let members = adapter.list_members("t1", &ListMembersOptions::default()).await.unwrap();
	let emails: Vec<&str> = members.iter().map(|m| &*m.email).collect();
	assert_eq!(emails, ["ann@example.com", "bob@example.com"]);
}

#[tokio::test]
async fn test_search_matches_email_or_name() {
	let adapter = seeded().await;
	let opts = ListMembersOptions { search: Some("LEE"), role: None };
	let members = adapter.list_members("t1", &opts).await.unwrap();
	assert_eq!(members.len(), 1);
	assert_eq!(&*members[0].email, "ann@example.com");

	let opts = ListMembersOptions { search: None, role: Some("member") };
	assert_eq!(adapter.list_members("t1", &opts).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
	let adapter = seeded().await;
	let res = adapter.create_member(data("t1", " ANN@example.com", None, "member")).await;
	assert!(matches!(res, Err(Error::ValidationFailed(ref e)) if &*e[0].code == "ALREADY_MEMBER"));

	// Same address on another team is fine
	assert!(adapter.create_member(data("t2", "ann@example.com", None, "member")).await.is_ok());
}

#[tokio::test]
async fn test_read_member() {
	let adapter = seeded().await;
	let created = adapter.create_member(data("t3", "dee@example.com", None, "member")).await.unwrap();
	let read = adapter.read_member("t3", &created.member_id).await.unwrap();
	assert_eq!(read, created);
	assert!(matches!(adapter.read_member("t1", &created.member_id).await, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_counts() {
	let adapter = seeded().await;
	let mut invite = data("t2", "eve@example.com", None, "member");
	invite.status = MemberStatus::Invited;
	adapter.create_member(invite).await.unwrap();

	assert_eq!(adapter.count_members().await.unwrap(), 3);
	assert_eq!(adapter.count_teams().await.unwrap(), 2);
}

// vim: ts=4
