use std::io::{self, Write};

use tokio::io::AsyncBufRead;
use backend::{ElectionApp, RegistrationForm};

use crate::console::{back_label, settle, unknown_choice, Console, Flow};

pub async fn show<R: AsyncBufRead + Unpin, W: Write>(app: &mut ElectionApp, console: &mut Console<R, W>) -> io::Result<Flow> {
    console.header(app)?;
    console.menu(&[("1", "Register"), ("b", back_label(app.screen()))])?;

    let Some(choice) = console.choose().await? else { return Ok(Flow::Quit) };
    match choice.as_str() {
        "1" => {
            let mut form = RegistrationForm::default();
            for (label, field) in [
                ("Voter ID", &mut form.voter_id),
                ("Name", &mut form.voter_name),
                ("Password", &mut form.password),
            ] {
                let Some(value) = console.ask(label).await? else { return Ok(Flow::Quit) };
                *field = value;
            }
            settle(app.register().submit(&mut form).await);
        }
        "b" => app.go_home(),
        other => return unknown_choice(console, other),
    }
    Ok(Flow::Continue)
}
