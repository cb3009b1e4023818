mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

use std::io::{self, BufRead, Write};
use std::process;

use common::error::Error;

use cli::parse_args;
use domain::canned;
use domain::session::SessionContext;
use usecase::{Action, DispatchRequest};
use wiring::{wire_axon, App, WiringOptions};

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("axon: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

fn print_usage() {
    eprintln!("Usage: axon [-m|--message text] [-i|--image path] [-c|--config path] [--seed n] [--log-file path]");
}

fn run() -> Result<i32, Error> {
    let args = parse_args()?;
    let app = wire_axon(&WiringOptions {
        config_path: args.config.clone(),
        seed: args.seed,
        log_file: args.log_file.clone(),
    })?;

    // -m か -i があればワンショット、どちらも無ければ REPL
    if args.message.is_some() || args.image.is_some() {
        let mut session = SessionContext::new();
        let request = DispatchRequest {
            text: args.message.unwrap_or_default(),
            image_path: args.image,
        };
        let response = app.dispatch_use_case.dispatch(&mut session, &request);
        println!("{}", response.message);
        print_action(response.action.as_ref());
        return Ok(0);
    }

    repl(&app)
}

/// 対話 REPL。EOF または farewell 応答で終了する。
fn repl(app: &App) -> Result<i32, Error> {
    let mut session = SessionContext::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("axon> ");
        stdout.flush().map_err(|e| Error::io_msg(e.to_string()))?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|e| Error::io_msg(e.to_string()))?;
        if read == 0 {
            break;
        }
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        let response = app.dispatch_use_case.dispatch(
            &mut session,
            &DispatchRequest {
                text: text.to_string(),
                image_path: None,
            },
        );
        println!("{}", response.message);
        print_action(response.action.as_ref());

        if response.message == canned::FAREWELL {
            break;
        }
    }
    Ok(0)
}

/// 実行指示を表示する（実行自体はしない設計）
fn print_action(action: Option<&Action>) {
    match action {
        Some(Action::Open { target }) => println!("(action) open {}", target),
        Some(Action::ClearSession) | None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_action_ignores_clear() {
        // 表示専用のヘルパーがパニックしないことだけ確認する
        print_action(Some(&Action::ClearSession));
        print_action(Some(&Action::Open {
            target: "spotify".to_string(),
        }));
        print_action(None);
    }
}
