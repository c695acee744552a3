//! travel-order - CLI for toolpath travel ordering
//!
//! Usage:
//!   travel-order parts <svg>        Order closed paths, choose seams
//!   travel-order lines <svg>        Order open paths, choose entry ends
//!   travel-order benchmark <svg>    Compare cluster grid sizes
//!   travel-order seams              List seam placement types

use std::env;
use std::process::ExitCode;

use travel_order::SeamType;

mod cli;

use cli::{benchmark, cmd_benchmark, cmd_lines, cmd_parts, lines, parse_order_args, parts};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage(&args[0]);
        return ExitCode::FAILURE;
    }

    let result = match args[1].as_str() {
        "parts" => match parse_order_args(&args[2..], parts::print_usage) {
            Some(order_args) => cmd_parts(&order_args),
            None => Ok(()),
        },
        "lines" => match parse_order_args(&args[2..], lines::print_usage) {
            Some(order_args) => cmd_lines(&order_args),
            None => Ok(()),
        },
        "benchmark" => match parse_order_args(&args[2..], benchmark::print_usage) {
            Some(order_args) => cmd_benchmark(&order_args),
            None => Ok(()),
        },
        "seams" => {
            cmd_seams();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage(&args[0]);
            Ok(())
        }
        unknown => {
            log::error!("Unknown command: {}", unknown);
            print_usage(&args[0]);
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_seams() {
    println!("Available seam types:");
    for seam in SeamType::all() {
        println!("  {}", seam.name());
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <command> [options]", program);
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  parts <input.svg>       Order closed paths and place seams");
    eprintln!("  lines <input.svg>       Order open paths, clustering neighbors");
    eprintln!("  benchmark <input.svg>   Compare line ordering across grid sizes");
    eprintln!("  seams                   List seam placement types");
    eprintln!("  help                    Show this help");
    eprintln!();
    eprintln!("Run '{} <command> --help' for command options.", program);
    eprintln!("Log verbosity follows RUST_LOG (default: info).");
}
