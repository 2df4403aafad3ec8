#![cfg(not(tarpaulin_include))]

use alumni::config::AppConfig;
use alumni::loader::load_data;
use alumni::router::{dispatch, render};
use alumni::state::SessionState;
use alumni::terminal::{Command, HELP, parse_command, render_text};
use std::env;
use std::io::{self, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_args(env::args().skip(1))?;
    let outcome = load_data(&config.data_path, &config.sheet_name);
    let mut state = SessionState::from_outcome(&outcome);

    let mut status = String::from("ok");
    let mut show = true;
    loop {
        if show {
            println!("{}", render_text(&render(&mut state)));
        }

        print!("[{}] ({}) > ", state.page, status);
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        show = true;
        match parse_command(&line, &state) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => {
                println!("{}", HELP);
                show = false;
                status = String::from("ok");
            }
            Ok(Command::Edit { field, value }) => {
                state.draft.set(&field, &value);
                status = String::from("ok");
            }
            Ok(Command::Run(action)) => {
                dispatch(&mut state, action);
                status = String::from("ok");
            }
            Err(e) => {
                show = false;
                status = e;
            }
        }
    }

    Ok(())
}
