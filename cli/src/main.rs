//! chaintrigger CLI: print and translate trigger codes from the terminal.
//!
//! Usage:
//! ```bash
//! # Print the LOG0..LOG4 table
//! chaintrigger table
//!
//! # Decode a config byte
//! chaintrigger decode 0x18
//!
//! # Encode an (arity, topics) pattern
//! chaintrigger encode --arity 4 --topics 1,3
//!
//! # Output as JSON
//! chaintrigger decode 0x18 --json
//! ```

use std::env;
use std::process;

use chaintrigger_core::{TopicSubset, TriggerCode, TriggerCodec, TriggerPattern};
use chaintrigger_evm::{decode_trigger, encode_trigger, format_line, format_table, MAX_LOG_TOPICS};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "table" => cmd_table(&args[2..]),
        "decode" => cmd_decode(&args[2..]),
        "encode" => cmd_encode(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("chaintrigger {}", env!("CARGO_PKG_VERSION"));
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("chaintrigger {}", env!("CARGO_PKG_VERSION"));
    println!("Trigger codes for EVM log events\n");
    println!("USAGE:");
    println!("    chaintrigger <COMMAND>\n");
    println!("COMMANDS:");
    println!("    table     Print the code table");
    println!("    decode    Decode a code byte, e.g. `decode 0x18`");
    println!("    encode    Encode an (arity, topics) pattern");
    println!("    version   Print version");
    println!("    help      Print this help\n");
    println!("TABLE FLAGS:");
    println!("    --max-arity <N>   Cover arities 0..=N (default 4, max 7)");
    println!("    --json            Output as JSON\n");
    println!("DECODE FLAGS:");
    println!("    <CODE>            Hex code byte, e.g. 18 or 0x18  [required]");
    println!("    --json            Output as JSON\n");
    println!("ENCODE FLAGS:");
    println!("    --arity <N>       Log arity (LOG0..LOG4)  [required]");
    println!("    --topics <LIST>   Comma-separated slot indices, e.g. 1,3");
    println!("    --json            Output as JSON");
}

fn cmd_table(args: &[String]) {
    let mut max_arity = MAX_LOG_TOPICS;
    let mut as_json = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--max-arity" => {
                i += 1;
                max_arity = match args.get(i).and_then(|s| s.parse().ok()) {
                    Some(n) => n,
                    None => {
                        eprintln!("Error: --max-arity expects a number");
                        process::exit(1);
                    }
                };
            }
            "--json" => as_json = true,
            flag => {
                eprintln!("Unknown flag: {flag}");
                process::exit(1);
            }
        }
        i += 1;
    }

    let codec = match TriggerCodec::new(max_arity) {
        Ok(codec) => codec,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if as_json {
        let entries: Vec<serde_json::Value> = codec
            .iter()
            .map(|(code, pattern)| entry_json(code, &pattern))
            .collect();
        print_json(&serde_json::Value::Array(entries));
    } else {
        print!("{}", format_table(&codec));
    }
}

fn cmd_decode(args: &[String]) {
    let mut code_arg: Option<&str> = None;
    let mut as_json = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => as_json = true,
            arg if !arg.starts_with('-') && code_arg.is_none() => code_arg = Some(arg),
            flag => {
                eprintln!("Unknown flag: {flag}");
                process::exit(1);
            }
        }
        i += 1;
    }

    let code_str = match code_arg {
        Some(c) => c,
        None => {
            eprintln!("Error: a code argument is required, e.g. `chaintrigger decode 0x18`");
            process::exit(1);
        }
    };

    let raw = code_str.strip_prefix("0x").unwrap_or(code_str);
    let code = match u8::from_str_radix(raw, 16) {
        Ok(v) => v,
        Err(_) => {
            eprintln!("Error: '{code_str}' is not a hex byte");
            process::exit(1);
        }
    };

    match decode_trigger(code) {
        Ok(pattern) => emit(TriggerCode::new(code), &pattern, as_json),
        Err(e) => {
            eprintln!("Decode error: {e}");
            process::exit(1);
        }
    }
}

fn cmd_encode(args: &[String]) {
    let mut arity: Option<u8> = None;
    let mut topics = TopicSubset::EMPTY;
    let mut as_json = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--arity" => {
                i += 1;
                arity = match args.get(i).and_then(|s| s.parse().ok()) {
                    Some(n) => Some(n),
                    None => {
                        eprintln!("Error: --arity expects a number");
                        process::exit(1);
                    }
                };
            }
            "--topics" => {
                i += 1;
                topics = match args.get(i) {
                    Some(list) => parse_topics_arg(list),
                    None => {
                        eprintln!("Error: --topics expects a comma-separated list");
                        process::exit(1);
                    }
                };
            }
            "--json" => as_json = true,
            flag => {
                eprintln!("Unknown flag: {flag}");
                process::exit(1);
            }
        }
        i += 1;
    }

    let arity = match arity {
        Some(a) => a,
        None => {
            eprintln!("Error: --arity is required");
            process::exit(1);
        }
    };

    match encode_trigger(arity, topics) {
        Ok(code) => {
            let pattern = TriggerPattern { arity, topics };
            emit(code, &pattern, as_json);
        }
        Err(e) => {
            eprintln!("Encode error: {e}");
            process::exit(1);
        }
    }
}

fn parse_topics_arg(list: &str) -> TopicSubset {
    let mut topics = TopicSubset::EMPTY;
    for part in list.split(',') {
        match part.trim().parse::<u8>() {
            Ok(index) if index < 8 => topics.insert(index),
            _ => {
                eprintln!("Error: bad topic index '{part}' (expected 0..=7)");
                process::exit(1);
            }
        }
    }
    topics
}

fn emit(code: TriggerCode, pattern: &TriggerPattern, as_json: bool) {
    if as_json {
        print_json(&entry_json(code, pattern));
    } else {
        println!("{}", format_line(code, pattern));
    }
}

fn entry_json(code: TriggerCode, pattern: &TriggerPattern) -> serde_json::Value {
    serde_json::json!({
        "code": code.to_string(),
        "arity": pattern.arity,
        "topics": pattern.topics.indices().collect::<Vec<u8>>(),
    })
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("JSON serialization error: {e}");
            process::exit(1);
        }
    }
}
