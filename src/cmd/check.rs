//! The `check` command: validate candidate tokens against one service.

use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead};
use std::path::Path;

use keyprobe::transport::HttpTransport;
use keyprobe::Checker;

pub fn run(config: Option<&Path>, service: &str, tokens: &[String], quiet: bool) -> Result<i32> {
    let registry = super::load_registry(config)?;
    let checker = Checker::new(registry);

    // Single token: the exit code is the verdict.
    if tokens.len() == 1 && tokens[0] != "-" {
        let token = &tokens[0];
        if checker.check(service, token)? {
            println!("{}", token.green());
            return Ok(0);
        }
        if !quiet {
            eprintln!("{}", "token is not valid".red());
        }
        return Ok(1);
    }

    // A stream on stdin, or several tokens (xargs style): print the live
    // ones and keep going past individual failures. Exit 0 either way.
    if tokens.len() == 1 && tokens[0] == "-" {
        for line in io::stdin().lock().lines() {
            check_one(&checker, service, &line?);
        }
    } else {
        for token in tokens {
            check_one(&checker, service, token);
        }
    }

    Ok(0)
}

fn check_one(checker: &Checker<HttpTransport>, service: &str, token: &str) {
    match checker.check(service, token) {
        Ok(true) => println!("{}", token.green()),
        Ok(false) => {}
        // anyhow's alternate formatting prints the whole cause chain.
        Err(err) => eprintln!("{} {:#}", "error:".red(), anyhow::Error::new(err)),
    }
}
