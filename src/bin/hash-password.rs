use bcrypt::{hash, DEFAULT_COST};
use std::env;

const MIN_PASSWORD_LENGTH: usize = 8;

fn main() {
    let password = env::args().nth(1).unwrap_or_else(|| {
        eprintln!("Usage: cargo run --bin hash-password <PASSWORD>");
        std::process::exit(1);
    });

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        eprintln!(
            "Refusing to hash: admin passwords need at least {} characters",
            MIN_PASSWORD_LENGTH
        );
        std::process::exit(1);
    }

    match hash(&password, DEFAULT_COST) {
        Ok(hashed) => {
            println!("\nCost     : {}", DEFAULT_COST);
            println!("Hash     : {}\n", hashed);
            println!("# Paste this into your .env with the matching ADMIN_EMAIL:");
            println!("ADMIN_HASH_PASSWORD={}", hashed);
        }
        Err(e) => {
            eprintln!("Error hashing password: {}", e);
            std::process::exit(1);
        }
    }
}
