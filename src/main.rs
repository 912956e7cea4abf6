//! mcda-engine - Evaluates one JSON request and prints the report.
//!
//! Usage: `mcda-engine [REQUEST.json]`. Reads stdin when no path is given.
//! The report is written to stdout as pretty JSON; logs go to stderr.

use std::error::Error;
use std::fs;
use std::io::{self, Read};

use mcda_engine::application::{EvaluationHandler, EvaluationRequest};
use mcda_engine::config::AppConfig;
use mcda_engine::logging::init_tracing;

fn read_request(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.logging);

    let path = std::env::args().nth(1);
    let input = read_request(path.as_deref())?;
    let request: EvaluationRequest = serde_json::from_str(&input)?;

    let handler = EvaluationHandler::new(config.scoring);
    let report = match handler.handle(request) {
        Ok(report) => report,
        Err(err) => {
            tracing::error!(code = %err.code(), error = %err, "Evaluation failed");
            return Err(err.into());
        }
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
