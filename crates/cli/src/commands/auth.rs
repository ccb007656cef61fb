//! Session commands.

use crate::context::{CliError, Context};

/// Log in against the credential directory.
pub fn login(ctx: &mut Context, username: &str, password: &str) -> Result<(), CliError> {
    let user = ctx.session.login(username, password)?;
    println!("Welcome, {}!", user.display_name);
    if user.role.is_admin() {
        println!("Admin commands are available via `tuhogar admin`.");
    }
    Ok(())
}

/// Log out and clear the persisted session.
pub fn logout(ctx: &mut Context) {
    ctx.session.logout();
    println!("Logged out.");
}

/// Show the current session, if any.
pub fn whoami(ctx: &Context) {
    match ctx.session.session() {
        Some(session) => {
            println!(
                "{} ({}) - session expires {}",
                session.user.display_name,
                session.user.role,
                session.expires_at.format("%Y-%m-%d %H:%M:%S UTC"),
            );
        }
        None => println!("Not logged in."),
    }
}
