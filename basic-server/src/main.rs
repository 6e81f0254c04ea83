use std::{env, sync::Arc};

use teamgate::auth::AccessClaims;
use teamgate::member_adapter::{Member, MemberStatus};
use teamgate::principal::AccountType;
use teamgate::types::Timestamp;
use teamgate_member_adapter_memory::MemberAdapterMemory;
use tracing::{error, info};

const DEMO_TEAM: &str = "demo";

fn demo_members() -> Vec<Member> {
	let now = Timestamp::now();
	[("owner@demo.test", "Demo Owner", "owner"), ("member@demo.test", "Demo Member", "member")]
		.into_iter()
		.enumerate()
		.map(|(i, (email, name, role))| Member {
			member_id: format!("demo_{}", i + 1).into(),
			team_id: DEMO_TEAM.into(),
			email: email.into(),
			name: Some(name.into()),
			role: role.into(),
			status: MemberStatus::Active,
			created_at: now,
		})
		.collect()
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
	let demo = env::var("TEAMGATE_DEMO").is_ok_and(|v| v == "1" || v == "true");

	let mut builder = teamgate::AppBuilder::new();
	if let Ok(path) = env::var("TEAMGATE_CONFIG") {
		builder.config_file(path);
	}
	if let Ok(listen) = env::var("TEAMGATE_LISTEN") {
		builder.listen(listen);
	}

	if demo {
		builder.member_adapter(Arc::new(MemberAdapterMemory::with_members(demo_members())));
		builder.on_init(|app| async move {
			let owner = AccessClaims::new("demo_owner", AccountType::User).team(DEMO_TEAM, "owner").plan("pro", "demo");
			info!("Demo owner token: {}", app.auth_keys.issue(owner)?);
			let admin = AccessClaims::new("demo_admin", AccountType::Admin);
			info!("Demo admin token: {}", app.auth_keys.issue(admin)?);
			Ok(())
		});
	} else {
		builder.member_adapter(Arc::new(MemberAdapterMemory::new()));
	}

	if let Err(e) = builder.run().await {
		error!("FATAL: {}", e);
		std::process::exit(1);
	}
}

// vim: ts=4
