use crate::commands::Commands;
use crate::error::Result as CliResult;
use crate::output;

use std::process::ExitCode;
use std::sync::Arc;

use log::{debug, info};
use rw_core::{Role, SignUpRequest};
use rw_hosted::{HostedAuthClient, HostedProfileStore};
use rw_session::{SessionSync, register};
use serde_json::json;

/// Hosted collaborators shared by every command
pub(crate) struct Context {
    pub(crate) auth: Arc<HostedAuthClient>,
    pub(crate) profiles: Arc<HostedProfileStore>,
}

impl Context {
    /// Start session sync and wait until the stored session has been resolved
    async fn resolved_sync(&self) -> CliResult<SessionSync> {
        let sync = SessionSync::start(self.auth.clone(), self.profiles.clone())?;
        let state = sync.wait_until_resolved().await;
        debug!("Session resolved: {}", state.phase());
        Ok(sync)
    }
}

pub(crate) async fn execute(command: Commands, ctx: &Context, pretty: bool) -> CliResult<ExitCode> {
    match command {
        Commands::SignIn { email, password } => {
            let sync = ctx.resolved_sync().await?;
            sync.sign_in(&email, &password).await?;
            sync.flush_enrichment().await;
            output::print(&output::state_json(&sync.state())?, pretty)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::SignUp {
            email,
            password,
            name,
            role,
        } => sign_up(ctx, SignUpRequest::new(email, password, name, role), pretty).await,

        Commands::SignOut => {
            let sync = ctx.resolved_sync().await?;
            sync.sign_out().await;
            output::print(&output::state_json(&sync.state())?, pretty)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Whoami => {
            let sync = ctx.resolved_sync().await?;
            sync.flush_enrichment().await;
            output::print(&output::state_json(&sync.state())?, pretty)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::CanAccess { role } => can_access(ctx, role, pretty).await,

        Commands::Watch => watch(ctx, pretty).await,
    }
}

async fn sign_up(ctx: &Context, request: SignUpRequest, pretty: bool) -> CliResult<ExitCode> {
    let identity = register(ctx.auth.as_ref(), ctx.profiles.as_ref(), &request).await?;
    let value = json!({
        "registered": output::to_value(&identity)?,
        "role": request.role,
        "signed_in": ctx.auth.current_session().is_some(),
    });
    output::print(&value, pretty)?;
    Ok(ExitCode::SUCCESS)
}

async fn can_access(ctx: &Context, role: Option<Role>, pretty: bool) -> CliResult<ExitCode> {
    let sync = ctx.resolved_sync().await?;
    sync.flush_enrichment().await;

    let state = sync.state();
    let access = state.authorize(role);
    output::print(&output::access_json(&access, &state)?, pretty)?;

    Ok(if access.is_granted() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn watch(ctx: &Context, pretty: bool) -> CliResult<ExitCode> {
    let sync = SessionSync::start(ctx.auth.clone(), ctx.profiles.clone())?;
    let mut rx = sync.subscribe();
    info!("Watching session changes (Ctrl-C to stop)");

    loop {
        let state = rx.borrow_and_update().clone();
        output::print(&output::state_json(&state)?, pretty)?;

        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    sync.teardown();
    Ok(ExitCode::SUCCESS)
}
