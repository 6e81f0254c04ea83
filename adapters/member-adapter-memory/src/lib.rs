//! In-memory `MemberAdapter`.
//!
//! Everything lives in one `parking_lot::RwLock`; nothing survives a restart.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeSet;

use teamgate::member_adapter::{
	CreateMemberData, ListMembersOptions, Member, MemberAdapter, MemberStatus,
};
use teamgate::prelude::*;

#[derive(Debug, Default)]
pub struct MemberAdapterMemory {
	members: RwLock<Vec<Member>>,
}

impl MemberAdapterMemory {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adapter pre-filled with active members, e.g. for a demo instance
	pub fn with_members(members: impl IntoIterator<Item = Member>) -> Self {
		MemberAdapterMemory { members: RwLock::new(members.into_iter().collect()) }
	}
}

fn matches_search(member: &Member, search: &str) -> bool {
	let search = search.to_lowercase();
	member.email.to_lowercase().contains(&search)
		|| member.name.as_ref().is_some_and(|n| n.to_lowercase().contains(&search))
}

#[async_trait]
impl MemberAdapter for MemberAdapterMemory {
	async fn list_members(&self, team_id: &str, opts: &ListMembersOptions<'_>) -> TgResult<Vec<Member>> {
		let members = self.members.read();
		Ok(members
			.iter()
			.filter(|m| &*m.team_id == team_id)
			.filter(|m| opts.role.is_none_or(|r| &*m.role == r))
			.filter(|m| opts.search.is_none_or(|s| matches_search(m, s)))
			.cloned()
			.collect())
	}

	async fn read_member(&self, team_id: &str, member_id: &str) -> TgResult<Member> {
		self.members
			.read()
			.iter()
			.find(|m| &*m.team_id == team_id && &*m.member_id == member_id)
			.cloned()
			.ok_or(Error::NotFound)
	}

	async fn create_member(&self, data: CreateMemberData<'_>) -> TgResult<Member> {
		let mut members = self.members.write();
		let email = data.email.trim().to_lowercase();
		if members.iter().any(|m| &*m.team_id == data.team_id && *m.email == *email) {
			return Err(Error::ValidationFailed(vec![ValidationError::new(
				"email",
				"ALREADY_MEMBER",
				"Already a member of this team",
			)]));
		}

		let member = Member {
			member_id: uuid::Uuid::new_v4().to_string().into(),
			team_id: data.team_id.into(),
			email: email.into(),
			name: data.name.map(Into::into),
			role: data.role.into(),
			status: data.status,
			created_at: Timestamp::now(),
		};
		members.push(member.clone());
		debug!("Member {} added to team {}", member.member_id, member.team_id);
		Ok(member)
	}

	async fn count_members(&self) -> TgResult<usize> {
		Ok(self.members.read().iter().filter(|m| m.status == MemberStatus::Active).count())
	}

	async fn count_teams(&self) -> TgResult<usize> {
		let members = self.members.read();
		Ok(members.iter().map(|m| &m.team_id).collect::<BTreeSet<_>>().len())
	}
}

// vim: ts=4
