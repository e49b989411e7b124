use super::{client, server, Action};
use anyhow::Result;

pub(super) async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Server(args) => server::execute(args).await,
        Action::Login(args) => client::login(args).await,
        Action::Logout(args) => client::logout(&args),
        Action::Whoami(args) => client::whoami(args).await,
    }
}
