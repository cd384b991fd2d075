use clap::Subcommand;
use rw_core::Role;

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Sign in with e-mail and password
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account and its profile
    SignUp {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Display name
        #[arg(long)]
        name: String,
        /// citizen, worker or admin
        #[arg(long, default_value_t = Role::Citizen)]
        role: Role,
    },

    /// Sign out and forget the stored session
    SignOut,

    /// Show the current session
    Whoami,

    /// Check a route guard; exits non-zero unless access is granted
    CanAccess {
        /// Required role; omit to only require a signed-in user
        #[arg(long)]
        role: Option<Role>,
    },

    /// Print every session change until Ctrl-C
    Watch,
}
