use std::io::{self, Write};

use tokio::io::AsyncBufRead;
use backend::{ElectionApp, Screen};

use crate::console::{settle, unknown_choice, Console, Flow};

pub async fn show<R: AsyncBufRead + Unpin, W: Write>(app: &mut ElectionApp, console: &mut Console<R, W>) -> io::Result<Flow> {
    console.header(app)?;
    console.menu(&[
        ("1", "Admin login"),
        ("2", "Register as voter"),
        ("3", "Voter login"),
        ("4", "Results"),
        ("q", "Quit"),
    ])?;

    let Some(choice) = console.choose().await? else { return Ok(Flow::Quit) };
    let target = match choice.as_str() {
        "1" => Screen::AdminLogin,
        "2" => Screen::Register,
        "3" => Screen::VoterLogin,
        "4" => Screen::Results,
        "q" => return Ok(Flow::Quit),
        other => return unknown_choice(console, other),
    };
    settle(app.open(target));
    Ok(Flow::Continue)
}
