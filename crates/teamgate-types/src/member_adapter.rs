//! Adapter that stores team memberships.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
	Active,
	Invited,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
	pub member_id: Box<str>,
	pub team_id: Box<str>,
	pub email: Box<str>,
	pub name: Option<Box<str>>,
	pub role: Box<str>,
	pub status: MemberStatus,
	pub created_at: Timestamp,
}

/// Filters for `list_members`
#[derive(Debug, Default)]
pub struct ListMembersOptions<'a> {
	/// Case-insensitive substring of email or name
	pub search: Option<&'a str>,
	pub role: Option<&'a str>,
}

pub struct CreateMemberData<'a> {
	pub team_id: &'a str,
	pub email: &'a str,
	pub name: Option<&'a str>,
	pub role: &'a str,
	pub status: MemberStatus,
}

#[async_trait]
pub trait MemberAdapter: Debug + Send + Sync {
	/// Members of a team ordered by creation time
	async fn list_members(&self, team_id: &str, opts: &ListMembersOptions<'_>) -> TgResult<Vec<Member>>;

	async fn read_member(&self, team_id: &str, member_id: &str) -> TgResult<Member>;

	/// Fails with an `ALREADY_MEMBER` validation error on `email` when the
	/// address is already on the team
	async fn create_member(&self, data: CreateMemberData<'_>) -> TgResult<Member>;

	/// Member count across all teams
	async fn count_members(&self) -> TgResult<usize>;

	async fn count_teams(&self) -> TgResult<usize>;
}

// vim: ts=4
