//! User command implementations

use serde::Serialize;
use tabled::Tabled;

use crate::cli::args::{GlobalOptions, or_dash};
use crate::cli::context::CommandContext;
use crate::client::models::User;
use crate::client::Cons3rtApi;
use crate::error::Result;
use crate::output::Formattable;

/// User display model
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct UserDisplay {
    #[tabled(rename = "USERNAME")]
    pub username: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "EMAIL")]
    pub email: String,

    #[tabled(rename = "STATE")]
    pub state: String,
}

impl From<User> for UserDisplay {
    fn from(user: User) -> Self {
        let name = match (&user.first_name, &user.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => "--".to_string(),
        };
        Self {
            username: user.username,
            name,
            email: or_dash(user.email),
            state: or_dash(user.state),
        }
    }
}

/// Run the user list command.
///
/// Drains every page up to the cap, concatenating before display.
pub async fn list(opts: &GlobalOptions, limit: Option<usize>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let users = ctx.client.list_all_users(limit).await?;
    let rows: Vec<UserDisplay> = users.into_iter().map(UserDisplay::from).collect();
    rows.print(ctx.format)
}
