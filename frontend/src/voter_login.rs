use std::io::{self, Write};

use tokio::io::AsyncBufRead;
use backend::{Credentials, ElectionApp};

use crate::console::{back_label, settle, unknown_choice, Console, Flow};

pub async fn show<R: AsyncBufRead + Unpin, W: Write>(app: &mut ElectionApp, console: &mut Console<R, W>) -> io::Result<Flow> {
    console.header(app)?;
    console.menu(&[("1", "Log in"), ("b", back_label(app.screen()))])?;

    let Some(choice) = console.choose().await? else { return Ok(Flow::Quit) };
    match choice.as_str() {
        "1" => {
            let Some(voter_id) = console.ask("Voter ID").await? else { return Ok(Flow::Quit) };
            let Some(password) = console.ask("Password").await? else { return Ok(Flow::Quit) };
            let mut credentials = Credentials { voter_id, password };
            settle(app.voter_login().submit(&mut credentials).await);
        }
        "b" => app.go_home(),
        other => return unknown_choice(console, other),
    }
    Ok(Flow::Continue)
}
