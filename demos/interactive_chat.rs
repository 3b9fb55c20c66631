use std::io;
use std::io::Write;
use std::process;

use clap::{App, Arg};
use intent_responder::ResponderEngine;

fn main() {
    env_logger::Builder::from_default_env()
        .format_timestamp_nanos()
        .init();

    let matches = App::new("intent-responder-chat")
        .about("Interactive chat with a trained intent responder engine")
        .arg(
            Arg::with_name("ENGINE_DIR")
                .required(true)
                .takes_value(true)
                .index(1)
                .help("path to the trained engine directory or zip archive"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("print the classification result of each message"),
        )
        .get_matches();
    let engine_path = matches.value_of("ENGINE_DIR").unwrap();
    let verbose = matches.is_present("verbose");

    if let Err(error) = run(engine_path, verbose) {
        eprintln!("Error: {}", error);
        for cause in error.iter_causes() {
            eprintln!("  caused by: {}", cause);
        }
        process::exit(1);
    }
}

fn run(engine_path: &str, verbose: bool) -> Result<(), failure::Error> {
    println!("\nLoading the engine...");
    let engine = if engine_path.ends_with(".zip") {
        ResponderEngine::from_zip(std::fs::File::open(engine_path)?)?
    } else {
        ResponderEngine::from_path(engine_path)?
    };

    println!("Start chatting with the bot! (type 'quit' to stop)");
    loop {
        print!("You: ");
        io::stdout().flush()?;
        let mut message = String::new();
        if io::stdin().read_line(&mut message)? == 0 {
            break;
        }
        let message = message.trim();
        if message.to_lowercase() == "quit" {
            break;
        }
        if verbose {
            let intents = engine.get_intents(message)?;
            println!("{}", serde_json::to_string_pretty(&intents)?);
        }
        println!("Bot: {}", engine.infer(message)?);
    }
    Ok(())
}
