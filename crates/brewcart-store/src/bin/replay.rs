//! # Action Replay
//!
//! Drives a [`Store`] through a scripted sequence of screen actions and
//! canned service responses, then prints the final snapshot. Handy for
//! reproducing a user report without a device.
//!
//! ## Usage
//! ```bash
//! # Replay a script file
//! cargo run -p brewcart-store --bin brewcart-replay -- --script ./session.json
//!
//! # Read the script from stdin
//! cat session.json | cargo run -p brewcart-store --bin brewcart-replay
//! ```
//!
//! ## Script Format
//! A JSON array of steps, each tagged by `action`:
//! ```json
//! [
//!   { "action": "login", "email": "a@x.com", "password": "pw",
//!     "ok": true, "body": { "userDetails": { "name": "Ann", "emailId": "a@x.com" } } },
//!   { "action": "load_catalog", "body": { "success": true, "products": [] } },
//!   { "action": "search", "text": "latte" },
//!   { "action": "add", "product_id": "p1" },
//!   { "action": "remove", "product_id": "p1" },
//!   { "action": "logout" }
//! ]
//! ```

use std::env;
use std::fs;
use std::io::{self, Read};

use brewcart_core::{LoginForm, RegistrationForm};
use brewcart_store::{
    init_tracing, prepare_login, prepare_registration, AuthFlow, AuthOutcome, CatalogOutcome,
    CatalogUpdate, Endpoints, Notice, Store, StoreConfig,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Step {
    LoadCatalog {
        body: Value,
    },
    CatalogFailed {
        detail: String,
    },
    Search {
        text: String,
    },
    Add {
        product_id: String,
    },
    Remove {
        product_id: String,
    },
    ClearCart,
    Login {
        email: String,
        password: String,
        ok: bool,
        body: Value,
    },
    Register {
        name: String,
        email: String,
        password: String,
        confirm_password: String,
        ok: bool,
        body: Value,
    },
    Logout,
}

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    /// Replay a script; `None` reads stdin.
    Replay { script: Option<String> },
    Help,
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut script: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--script" | "-s" => match args.get(i + 1) {
                Some(path) if !path.starts_with('-') => {
                    script = Some(path.clone());
                    i += 1;
                }
                _ => return Err(format!("{} requires a path", args[i])),
            },
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(format!("unknown option '{}'", other)),
        }
        i += 1;
    }

    Ok(Command::Replay { script })
}

fn print_usage() {
    println!("BrewCart Action Replay");
    println!();
    println!("Usage: brewcart-replay [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -s, --script <PATH>  Script file (default: read stdin)");
    println!("  -h, --help           Show this help message");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let script_path = match parse_args(&args) {
        Ok(Command::Replay { script }) => script,
        Ok(Command::Help) => {
            print_usage();
            return Ok(());
        }
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!();
            print_usage();
            return Err(message.into());
        }
    };

    let raw = match &script_path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let steps: Vec<Step> = serde_json::from_str(&raw)?;

    let config = StoreConfig::from_env()?;
    let endpoints = Endpoints::new(&config);
    let store = Store::shared();
    info!(steps = steps.len(), api = %config.api_base_url, "Replaying script");

    for step in steps {
        if let Some(notice) = run_step(&store, &endpoints, step)? {
            eprintln!("[{:?}] {}", notice.code, notice.message);
        }
    }

    let snapshot = store.snapshot();
    eprintln!(
        "Cart total: {} ({} lines)",
        config.format_currency(snapshot.cart.total),
        snapshot.cart.item_count
    );
    println!("{}", serde_json::to_string_pretty(&*snapshot)?);

    Ok(())
}

/// Applies one step and returns the notice the screen would show, if any.
fn run_step(
    store: &Store,
    endpoints: &Endpoints,
    step: Step,
) -> Result<Option<Notice>, Box<dyn std::error::Error>> {
    let notice = match step {
        Step::LoadCatalog { body } => {
            let ticket = store.begin_catalog_fetch();
            info!(url = %endpoints.catalog_url(&ticket.search)?, "Catalog fetch");
            match store.apply_catalog(&ticket, CatalogOutcome::from_body(&body_text(&body))) {
                CatalogUpdate::Cleared { reason } => Some(Notice::from(reason)),
                _ => None,
            }
        }
        Step::CatalogFailed { detail } => {
            let ticket = store.begin_catalog_fetch();
            match store.apply_catalog(&ticket, CatalogOutcome::TransportFailed(detail)) {
                CatalogUpdate::Cleared { reason } => Some(Notice::from(reason)),
                _ => None,
            }
        }
        Step::Search { text } => {
            store.set_search_text(&text);
            None
        }
        Step::Add { product_id } => {
            let product = store
                .snapshot()
                .catalog
                .products
                .iter()
                .find(|p| p.id == product_id)
                .cloned();
            match product {
                Some(product) => Some(match store.add_item(&product, product.price) {
                    Ok(_) => Notice::added_to_cart(&product.title),
                    Err(e) => Notice::from(&e),
                }),
                None => {
                    eprintln!("Unknown product {}, skipping", product_id);
                    None
                }
            }
        }
        Step::Remove { product_id } => {
            store.remove_item(&product_id);
            None
        }
        Step::ClearCart => {
            store.clear_cart();
            None
        }
        Step::Login {
            email,
            password,
            ok,
            body,
        } => {
            let form = LoginForm { email, password };
            Some(match prepare_login(&form) {
                Ok(_) => {
                    info!(url = %endpoints.login_url()?, "Login request");
                    let outcome = AuthOutcome::from_http(ok, &body_text(&body));
                    auth_notice(store.apply_auth(AuthFlow::Login, outcome))
                }
                Err(e) => Notice::from(&e),
            })
        }
        Step::Register {
            name,
            email,
            password,
            confirm_password,
            ok,
            body,
        } => {
            let form = RegistrationForm {
                name,
                email,
                password,
                confirm_password,
            };
            Some(match prepare_registration(&form) {
                Ok(_) => {
                    info!(url = %endpoints.signup_url()?, "Signup request");
                    let outcome = AuthOutcome::from_http(ok, &body_text(&body));
                    auth_notice(store.apply_auth(AuthFlow::Register, outcome))
                }
                Err(e) => Notice::from(&e),
            })
        }
        Step::Logout => {
            store.logout();
            None
        }
    };
    Ok(notice)
}

fn auth_notice(result: brewcart_store::StoreResult<Notice>) -> Notice {
    match result {
        Ok(notice) => notice,
        Err(e) => Notice::from(&e),
    }
}

/// Canned bodies may be JSON or a raw string (e.g. an HTML error page).
fn body_text(body: &Value) -> String {
    match body {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
